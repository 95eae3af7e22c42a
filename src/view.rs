//! Destinations for the rendered page.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{domain::Document, render};

/// Displays the document. Called after every change with the full state.
pub trait View {
    /// Redraws the whole view.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn render(&mut self, document: &Document, edit_mode: bool) -> io::Result<()>;
}

/// Writes the HTML page to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlPage {
    path: PathBuf,
}

impl HtmlPage {
    /// A page written to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where the page is written.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl View for HtmlPage {
    fn render(&mut self, document: &Document, edit_mode: bool) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, render::page(document, edit_mode))?;
        tracing::debug!("Rendered page to {}", self.path.display());
        Ok(())
    }
}

/// A view that displays nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullView;

impl View for NullView {
    fn render(&mut self, _document: &Document, _edit_mode: bool) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::{HtmlPage, View};
    use crate::domain::Document;

    #[test]
    fn html_page_is_written_and_replaced() {
        let tmp = TempDir::new().unwrap();
        let mut view = HtmlPage::new(tmp.path().join("site").join("horarios.html"));

        view.render(&Document::fallback(), true).unwrap();
        let first = std::fs::read_to_string(view.path()).unwrap();
        assert!(first.contains("Edição"));

        view.render(&Document::fallback(), false).unwrap();
        let second = std::fs::read_to_string(view.path()).unwrap();
        assert!(second.contains("Visualização"));
        assert!(!second.contains("Edição"));
    }
}
