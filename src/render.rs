//! HTML rendering of a schedule page.
//!
//! The page is rebuilt from scratch on every call; the output depends only
//! on the document and on whether edit mode is on. Editing controls are
//! plain buttons tagged with `data-action` and the stable ids of the day or
//! match they act on; outside edit mode they are left out entirely.

use std::borrow::Cow;

use crate::domain::{Day, Document, Match, MatchStatus, modality};

/// Title used when the document has none.
pub const DEFAULT_TITLE: &str = "Tabela de Horários";

const ICONS_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";

/// Renders the complete page.
#[must_use]
pub fn page(document: &Document, edit_mode: bool) -> String {
    let title = if document.title.is_empty() {
        DEFAULT_TITLE
    } else {
        document.title.as_str()
    };

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    html.push_str(&format!("<title>{}</title>\n", escape(title)));
    html.push_str(&format!("<link rel=\"stylesheet\" href=\"{ICONS_CSS}\">\n"));
    html.push_str("</head>\n<body>\n<header>\n");
    html.push_str(&format!(
        "<h1 id=\"page-title\">{}</h1>\n",
        escape(title)
    ));
    html.push_str(&format!(
        "<p id=\"page-subtitle\">{}</p>\n",
        escape(&subtitle(document))
    ));
    html.push_str(&format!(
        "<p class=\"mode\">Modo: <span id=\"mode-label\">{}</span></p>\n",
        mode_label(edit_mode)
    ));
    html.push_str("</header>\n");

    if edit_mode {
        html.push_str(&controls_bar());
    }

    html.push_str("<main id=\"schedule-root\">\n");
    html.push_str(&schedule(document, edit_mode));
    html.push_str("</main>\n");
    html.push_str(&info_box(&document.info));
    html.push_str("</body>\n</html>\n");
    html
}

/// Event and location joined by `" - "`, skipping empty parts.
#[must_use]
pub fn subtitle(document: &Document) -> String {
    [document.event.as_str(), document.location.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" - ")
}

/// Label describing the current mode.
#[must_use]
pub const fn mode_label(edit_mode: bool) -> &'static str {
    if edit_mode { "Edição" } else { "Visualização" }
}

/// Renders one section per day.
#[must_use]
pub fn schedule(document: &Document, edit_mode: bool) -> String {
    let mut html = String::new();
    for day in &document.schedule {
        html.push_str(&day_section(day, edit_mode));
    }
    if edit_mode {
        html.push_str(&button("add-day", &[], "fas fa-calendar-plus", "Adicionar Dia"));
        html.push('\n');
    }
    html
}

/// Renders the list of notes shown below the schedule.
#[must_use]
pub fn info_box(info: &[String]) -> String {
    let mut html = String::from("<div id=\"info-box-root\" class=\"info-box\">\n");
    html.push_str("<h3><i class=\"fas fa-info-circle\"></i> Informações Importantes</h3>\n");
    html.push_str("<ul>\n");
    for text in info {
        html.push_str(&format!(
            "<li><i class=\"fas fa-check-circle\"></i> {}</li>\n",
            escape(text)
        ));
    }
    html.push_str("</ul>\n</div>\n");
    html
}

fn day_section(day: &Day, edit_mode: bool) -> String {
    let day_id = day.id.to_string();
    let mut html = format!(
        "<div class=\"schedule-section\" data-day=\"{day_id}\">\n\
         <h2><i class=\"fas fa-calendar-day\"></i> {} - {}</h2>\n",
        escape(&day.weekday),
        escape(&day.date)
    );

    html.push_str("<div class=\"table-container\">\n<table>\n<thead>\n<tr>");
    for header in ["Horário", "Modalidade", "Confronto", "Placar", "Local", "Status"] {
        html.push_str(&format!("<th>{header}</th>"));
    }
    if edit_mode {
        html.push_str("<th>Ações</th>");
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for m in &day.matches {
        html.push_str(&match_row(m, edit_mode));
    }
    html.push_str("</tbody>\n</table>\n</div>\n");

    if edit_mode {
        let target = [("day", day_id.as_str())];
        html.push_str("<div class=\"day-controls\">");
        html.push_str(&button("add-match", &target, "fas fa-plus", "Adicionar Jogo"));
        html.push_str(&button("edit-day", &target, "fas fa-edit", "Editar Dia"));
        html.push_str(&button("remove-day", &target, "fas fa-trash", "Remover Dia"));
        html.push_str("</div>\n");
    }

    html.push_str("</div>\n");
    html
}

fn match_row(m: &Match, edit_mode: bool) -> String {
    let status = MatchStatus::classify(&m.status);
    let mut html = format!("<tr data-match=\"{}\">", m.id);
    html.push_str(&format!("<td class=\"time-cell\">{}</td>", escape(&m.time)));
    html.push_str(&format!(
        "<td><i class=\"{}\"></i> {}</td>",
        modality::icon_for(&m.modalidade),
        escape(&m.modalidade)
    ));
    html.push_str(&format!("<td class=\"team-cell\">{}</td>", escape(&m.confronto)));
    html.push_str(&format!(
        "<td class=\"score-cell\">{}</td>",
        escape(&m.score_line())
    ));
    html.push_str(&format!(
        "<td class=\"location-cell\">{}</td>",
        escape(&m.local)
    ));
    html.push_str(&format!(
        "<td><span class=\"status-badge {}\">{}</span></td>",
        status.css_class(),
        escape(&m.status)
    ));

    if edit_mode {
        let id = m.id.to_string();
        let target = [("match", id.as_str())];
        html.push_str("<td>");
        html.push_str(&button("edit-match", &target, "fas fa-pen", "Editar"));
        html.push_str(&button("remove-match", &target, "fas fa-trash", "Excluir"));
        html.push_str("</td>");
    }

    html.push_str("</tr>\n");
    html
}

fn controls_bar() -> String {
    let mut html = String::from("<div id=\"controls-bar\" class=\"controls-bar\">");
    html.push_str(&button("toggle-edit", &[], "fas fa-eye", "Alternar Modo"));
    html.push_str(&button("add-day", &[], "fas fa-calendar-plus", "Adicionar Dia"));
    html.push_str(&button("export", &[], "fas fa-download", "Exportar JSON"));
    html.push_str(&button("import", &[], "fas fa-upload", "Importar JSON"));
    html.push_str("</div>\n");
    html
}

fn button(action: &str, data: &[(&str, &str)], icon: &str, label: &str) -> String {
    let attributes: String = data
        .iter()
        .map(|(key, value)| format!(" data-{key}=\"{}\"", escape(value)))
        .collect();
    format!(
        "<button type=\"button\" class=\"back-button\" data-action=\"{action}\"{attributes}>\
         <i class=\"{icon}\"></i> {label}</button>"
    )
}

/// Escapes text for use in HTML content and attribute values.
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::{escape, page, subtitle};
    use crate::domain::{DayDraft, Document, MatchDraft, MatchId};

    fn with_match(status: &str, score1: &str, score2: &str) -> Document {
        let mut document = Document::fallback();
        let mut day = DayDraft::new("Segunda-feira", "2025-12-15").into_day();
        day.matches.push(
            MatchDraft {
                time: "08:00".to_string(),
                modalidade: "Vôlei".to_string(),
                confronto: "1A x 2B".to_string(),
                local: "Quadra 1".to_string(),
                status: status.to_string(),
                score1: score1.to_string(),
                score2: score2.to_string(),
            }
            .into_match(MatchId::new()),
        );
        document.schedule.push(day);
        document
    }

    #[test]
    fn fresh_fallback_page_has_no_days_and_seven_notes() {
        let html = page(&Document::fallback(), false);

        assert_eq!(html.matches("class=\"schedule-section\"").count(), 0);
        assert_eq!(html.matches("<li>").count(), 7);
        assert!(html.contains("<title>Tabela de Horários dos Jogos</title>"));
        assert!(html.contains(
            "<p id=\"page-subtitle\">Interclasse 2025 - IFTM Paracatu</p>"
        ));
        assert!(html.contains("<span id=\"mode-label\">Visualização</span>"));
    }

    #[test]
    fn rows_show_score_status_and_icon() {
        let html = page(&with_match("Finalizado", "2", ""), false);

        assert!(html.contains("Segunda-feira - 2025-12-15"));
        assert!(html.contains("<td class=\"score-cell\">2 x -</td>"));
        assert!(html.contains("status-badge status-finalizado\">Finalizado</span>"));
        assert!(html.contains("<i class=\"fas fa-volleyball-ball\"></i> Vôlei"));
    }

    #[test]
    fn unplayed_match_shows_a_dash() {
        let html = page(&with_match("Agendado", "", ""), false);
        assert!(html.contains("<td class=\"score-cell\">-</td>"));
        assert!(html.contains("status-agendado"));
    }

    #[test]
    fn controls_only_appear_in_edit_mode() {
        let document = with_match("Em andamento", "", "");
        let match_id = document.schedule[0].matches[0].id;

        let viewing = page(&document, false);
        assert!(!viewing.contains("data-action"));
        assert!(!viewing.contains("<th>Ações</th>"));
        assert!(!viewing.contains("controls-bar"));

        let editing = page(&document, true);
        assert!(editing.contains("<th>Ações</th>"));
        assert!(editing.contains(&format!(
            "data-action=\"remove-match\" data-match=\"{match_id}\""
        )));
        for action in ["add-day", "add-match", "edit-day", "remove-day", "edit-match", "export"] {
            assert!(
                editing.contains(&format!("data-action=\"{action}\"")),
                "missing {action}"
            );
        }
        assert!(editing.contains("<span id=\"mode-label\">Edição</span>"));
    }

    #[test]
    fn controls_bar_offers_toggle_add_day_export_and_import() {
        let html = page(&Document::fallback(), true);
        let start = html.find("<div id=\"controls-bar\"").unwrap();
        let bar = &html[start..start + html[start..].find("</div>").unwrap()];

        for action in ["toggle-edit", "add-day", "export", "import"] {
            assert!(bar.contains(&format!("data-action=\"{action}\"")), "missing {action}");
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let document = with_match("Agendado", "1", "0");
        assert_eq!(page(&document, true), page(&document, true));
    }

    #[test]
    fn text_is_escaped() {
        let mut document = Document::empty();
        document.title = "<script>alert('x')</script>".to_string();
        document.info.push("A & B".to_string());

        let html = page(&document, false);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("A &amp; B"));
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn subtitle_skips_empty_parts() {
        let mut document = Document::empty();
        assert_eq!(subtitle(&document), "");
        document.location = "Ginásio".to_string();
        assert_eq!(subtitle(&document), "Ginásio");
    }

    #[test]
    fn empty_title_uses_default() {
        let html = page(&Document::empty(), false);
        assert!(html.contains("<title>Tabela de Horários</title>"));
    }
}
