//! An editing session over one schedule document.
//!
//! The [`Session`] owns the document, the store it is persisted to and the
//! view it is displayed in. Every change is applied in memory, saved, and
//! followed by a full redraw.

use std::io;

use crate::{
    domain::{Day, DayDraft, DayId, Document, Match, MatchDraft, MatchId},
    loader::{Loaded, Loader, Source},
    storage::{Fetch, Store, StoreError},
    view::View,
};

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    /// Returns `true` if the action should go ahead.
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Confirms everything without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// The result of a removal the user was asked to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Removal<T> {
    /// The entity was removed.
    Removed(T),
    /// The user declined; nothing changed.
    Cancelled,
}

/// Errors raised by editing operations.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// Edit mode is off.
    #[error("edit mode is off")]
    ReadOnly,

    /// No day has the given id. Nothing was changed.
    #[error("day {0} not found")]
    DayNotFound(DayId),

    /// No match has the given id. Nothing was changed.
    #[error("match {0} not found")]
    MatchNotFound(MatchId),

    /// The change was applied but could not be saved.
    #[error("change applied but not saved: {0}")]
    Persist(#[from] StoreError),

    /// The view could not be redrawn.
    #[error("failed to render: {0}")]
    Render(#[from] io::Error),
}

/// Prompt shown before removing a day.
pub const REMOVE_DAY_PROMPT: &str = "Remover este dia e todos os jogos nele?";

/// Prompt shown before removing a match.
pub const REMOVE_MATCH_PROMPT: &str = "Remover essa partida?";

/// The document being worked on, with its store, its view and the edit-mode
/// flag.
pub struct Session<S, V> {
    pub(crate) document: Document,
    pub(crate) store: S,
    view: V,
    edit_mode: bool,
}

impl<S: Store, V: View> Session<S, V> {
    /// Loads the document from the best available source and draws it.
    ///
    /// Loading never fails. A failure to draw is logged.
    pub fn open(mut store: S, fetcher: Option<&dyn Fetch>, view: V, edit_mode: bool) -> (Self, Source) {
        let mut loader = Loader::new(&mut store);
        if let Some(fetcher) = fetcher {
            loader = loader.with_fetcher(fetcher);
        }
        let Loaded { document, source } = loader.load();

        let mut session = Self::new(document, store, view, edit_mode);
        if let Err(e) = session.render() {
            tracing::error!("Failed to render: {e}");
        }
        (session, source)
    }

    /// Wraps an already loaded document.
    pub const fn new(document: Document, store: S, view: V, edit_mode: bool) -> Self {
        Self {
            document,
            store,
            view,
            edit_mode,
        }
    }

    /// The current document.
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// The store the document is saved to.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The view the document is drawn in.
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Whether editing operations are allowed.
    pub const fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Turns edit mode on or off, and redraws.
    ///
    /// # Errors
    ///
    /// Returns an error if the view cannot be redrawn.
    pub fn set_edit_mode(&mut self, on: bool) -> io::Result<()> {
        self.edit_mode = on;
        tracing::debug!("Edit mode {}", if on { "on" } else { "off" });
        self.render()
    }

    /// Flips edit mode and redraws, returning the new state.
    ///
    /// # Errors
    ///
    /// Returns an error if the view cannot be redrawn.
    pub fn toggle_edit_mode(&mut self) -> io::Result<bool> {
        self.set_edit_mode(!self.edit_mode)?;
        Ok(self.edit_mode)
    }

    /// Redraws the view from the current state.
    ///
    /// # Errors
    ///
    /// Returns an error if the view cannot be redrawn.
    pub fn render(&mut self) -> io::Result<()> {
        self.view.render(&self.document, self.edit_mode)
    }

    /// Saves the document and redraws.
    ///
    /// The view is redrawn even when saving fails, so what is displayed
    /// always matches what is in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if saving or redrawing fails.
    pub fn commit(&mut self) -> Result<(), EditError> {
        let saved = self.store.save(&mut self.document);
        self.render()?;
        saved?;
        Ok(())
    }

    pub(crate) fn ensure_editable(&self) -> Result<(), EditError> {
        if self.edit_mode {
            Ok(())
        } else {
            Err(EditError::ReadOnly)
        }
    }

    /// Appends a new, empty day.
    ///
    /// # Errors
    ///
    /// Fails if edit mode is off, or if the change cannot be committed.
    pub fn add_day(&mut self, draft: DayDraft) -> Result<DayId, EditError> {
        self.ensure_editable()?;
        let day = draft.into_day();
        let id = day.id;
        self.document.schedule.push(day);
        tracing::info!("Added day {id}");
        self.commit()?;
        Ok(id)
    }

    /// Replaces the weekday and date of a day, keeping its matches.
    ///
    /// # Errors
    ///
    /// Fails if edit mode is off, the day does not exist, or the change
    /// cannot be committed.
    pub fn edit_day(&mut self, id: DayId, draft: DayDraft) -> Result<(), EditError> {
        self.ensure_editable()?;
        let day = self.document.day_mut(id).ok_or(EditError::DayNotFound(id))?;
        day.weekday = draft.weekday();
        day.date = draft.date();
        tracing::info!("Edited day {id}");
        self.commit()
    }

    /// Removes a day and all of its matches, after confirmation.
    ///
    /// # Errors
    ///
    /// Fails if edit mode is off, the day does not exist, or the change
    /// cannot be committed.
    pub fn remove_day(
        &mut self,
        id: DayId,
        confirm: &mut impl Confirm,
    ) -> Result<Removal<Day>, EditError> {
        self.ensure_editable()?;
        let position = self
            .document
            .schedule
            .iter()
            .position(|day| day.id == id)
            .ok_or(EditError::DayNotFound(id))?;

        if !confirm.confirm(REMOVE_DAY_PROMPT) {
            return Ok(Removal::Cancelled);
        }

        let day = self.document.schedule.remove(position);
        tracing::info!("Removed day {id} with {} matches", day.matches.len());
        self.commit()?;
        Ok(Removal::Removed(day))
    }

    /// Appends a match to a day.
    ///
    /// With no day given, a new day with an empty weekday and date is
    /// created to hold the match.
    ///
    /// # Errors
    ///
    /// Fails if edit mode is off, the day does not exist, or the change
    /// cannot be committed.
    pub fn add_match(&mut self, day: Option<DayId>, draft: MatchDraft) -> Result<MatchId, EditError> {
        self.ensure_editable()?;
        let id = MatchId::new();
        let new_match = draft.into_match(id);

        match day {
            Some(day_id) => self
                .document
                .day_mut(day_id)
                .ok_or(EditError::DayNotFound(day_id))?
                .matches
                .push(new_match),
            None => {
                let mut day = Day::new("", "");
                day.matches.push(new_match);
                self.document.schedule.push(day);
            }
        }

        tracing::info!("Added match {id}");
        self.commit()?;
        Ok(id)
    }

    /// Replaces every field of a match, keeping its id.
    ///
    /// # Errors
    ///
    /// Fails if edit mode is off, the match does not exist, or the change
    /// cannot be committed.
    pub fn edit_match(&mut self, id: MatchId, draft: MatchDraft) -> Result<(), EditError> {
        self.ensure_editable()?;
        let slot = self
            .document
            .match_mut(id)
            .ok_or(EditError::MatchNotFound(id))?;
        *slot = draft.into_match(id);
        tracing::info!("Edited match {id}");
        self.commit()
    }

    /// Removes a match, after confirmation.
    ///
    /// # Errors
    ///
    /// Fails if edit mode is off, the match does not exist, or the change
    /// cannot be committed.
    pub fn remove_match(
        &mut self,
        id: MatchId,
        confirm: &mut impl Confirm,
    ) -> Result<Removal<Match>, EditError> {
        self.ensure_editable()?;
        let (day_id, _) = self
            .document
            .find_match(id)
            .map(|(day, m)| (day.id, m.id))
            .ok_or(EditError::MatchNotFound(id))?;

        if !confirm.confirm(REMOVE_MATCH_PROMPT) {
            return Ok(Removal::Cancelled);
        }

        let day = self
            .document
            .day_mut(day_id)
            .ok_or(EditError::DayNotFound(day_id))?;
        let position = day
            .matches
            .iter()
            .position(|m| m.id == id)
            .ok_or(EditError::MatchNotFound(id))?;
        let removed = day.matches.remove(position);

        tracing::info!("Removed match {id}");
        self.commit()?;
        Ok(Removal::Removed(removed))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io;

    use super::{AssumeYes, Confirm, EditError, Removal, Session};
    use crate::{
        domain::{DayDraft, DayId, Document, MatchDraft},
        loader::{Source, tests::StubFetch},
        storage::{MemoryStore, Store},
        view::View,
    };

    /// Counts redraws and remembers the last state drawn.
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub(crate) renders: usize,
        pub(crate) last: Option<(Document, bool)>,
    }

    impl View for Recorder {
        fn render(&mut self, document: &Document, edit_mode: bool) -> io::Result<()> {
            self.renders += 1;
            self.last = Some((document.clone(), edit_mode));
            Ok(())
        }
    }

    struct Decline;

    impl Confirm for Decline {
        fn confirm(&mut self, _prompt: &str) -> bool {
            false
        }
    }

    pub(crate) fn editing() -> Session<MemoryStore, Recorder> {
        Session::new(Document::fallback(), MemoryStore::new(), Recorder::default(), true)
    }

    fn futsal() -> MatchDraft {
        MatchDraft {
            time: "08:00".to_string(),
            modalidade: "Futsal".to_string(),
            confronto: "A x B".to_string(),
            local: "Quadra 1".to_string(),
            ..MatchDraft::default()
        }
    }

    #[test]
    fn open_without_sources_uses_fallback_and_draws_once() {
        let (session, source) = Session::open(
            MemoryStore::new(),
            Some(&StubFetch::Down),
            Recorder::default(),
            false,
        );

        assert_eq!(source, Source::Fallback);
        assert_eq!(session.view().renders, 1);
        assert!(session.document().schedule.is_empty());
        assert_eq!(session.document().info.len(), 7);
        assert!(session.store().load().is_some());
    }

    #[test]
    fn added_match_defaults_to_scheduled() {
        let mut session = editing();
        let day = session
            .add_day(DayDraft::new("Segunda-feira", "2025-12-15"))
            .unwrap();
        session.add_match(Some(day), futsal()).unwrap();

        let document = session.document();
        assert_eq!(document.schedule[0].weekday, "Segunda-feira");
        assert_eq!(document.schedule[0].matches[0].status, "Agendado");
    }

    #[test]
    fn every_change_is_saved_and_redrawn() {
        let mut session = editing();
        let day = session.add_day(DayDraft::new("Terça", "2025-12-16")).unwrap();
        session.add_match(Some(day), futsal()).unwrap();

        assert_eq!(session.view().renders, 2);
        let stored = session.store().load().unwrap();
        assert_eq!(&stored, session.document());
        let (drawn, edit_mode) = session.view().last.clone().unwrap();
        assert_eq!(&drawn, session.document());
        assert!(edit_mode);
    }

    #[test]
    fn add_then_remove_match_restores_the_day() {
        let mut session = editing();
        let day = session.add_day(DayDraft::new("Quarta", "2025-12-17")).unwrap();
        session.add_match(Some(day), futsal()).unwrap();
        let before = session.document().day(day).unwrap().matches.clone();

        let added = session.add_match(Some(day), futsal()).unwrap();
        let removed = session.remove_match(added, &mut AssumeYes).unwrap();

        assert!(matches!(removed, Removal::Removed(m) if m.id == added));
        assert_eq!(session.document().day(day).unwrap().matches, before);
    }

    #[test]
    fn adding_a_match_without_a_day_creates_one() {
        let mut session = editing();
        let id = session.add_match(None, futsal()).unwrap();

        let document = session.document();
        assert_eq!(document.schedule.len(), 1);
        assert_eq!(document.schedule[0].weekday, "");
        assert_eq!(document.schedule[0].date, "");
        assert_eq!(document.schedule[0].matches[0].id, id);
    }

    #[test]
    fn editing_a_day_keeps_its_matches() {
        let mut session = editing();
        let day = session.add_day(DayDraft::new("Quinta", "")).unwrap();
        session.add_match(Some(day), futsal()).unwrap();

        session
            .edit_day(day, DayDraft::new(" Sexta-feira ", "2025-12-19"))
            .unwrap();

        let edited = session.document().day(day).unwrap();
        assert_eq!(edited.weekday, "Sexta-feira");
        assert_eq!(edited.date, "2025-12-19");
        assert_eq!(edited.matches.len(), 1);
    }

    #[test]
    fn editing_a_match_replaces_every_field() {
        let mut session = editing();
        let day = session.add_day(DayDraft::new("Sexta", "")).unwrap();
        let id = session.add_match(Some(day), futsal()).unwrap();

        let mut draft = MatchDraft::from(session.document().find_match(id).unwrap().1);
        draft.status = "Finalizado".to_string();
        draft.score1 = "3".to_string();
        draft.score2 = "2".to_string();
        session.edit_match(id, draft).unwrap();

        let (_, edited) = session.document().find_match(id).unwrap();
        assert_eq!(edited.status, "Finalizado");
        assert_eq!(edited.score_line(), "3 x 2");
        assert_eq!(edited.confronto, "A x B");
    }

    #[test]
    fn removing_a_day_requires_confirmation() {
        let mut session = editing();
        let day = session.add_day(DayDraft::new("Sábado", "")).unwrap();
        session.add_match(Some(day), futsal()).unwrap();

        let declined = session.remove_day(day, &mut Decline).unwrap();
        assert_eq!(declined, Removal::Cancelled);
        assert_eq!(session.document().schedule.len(), 1);

        let removed = session.remove_day(day, &mut AssumeYes).unwrap();
        assert!(matches!(removed, Removal::Removed(d) if d.matches.len() == 1));
        assert!(session.document().schedule.is_empty());
    }

    #[test]
    fn removing_a_match_requires_confirmation() {
        let mut session = editing();
        let day = session.add_day(DayDraft::new("Domingo", "")).unwrap();
        let game = session.add_match(Some(day), futsal()).unwrap();
        let renders = session.view().renders;
        let saved = session.store().raw().map(str::to_string);

        let declined = session.remove_match(game, &mut Decline).unwrap();
        assert_eq!(declined, Removal::Cancelled);
        assert!(session.document().find_match(game).is_some());
        assert_eq!(session.view().renders, renders);
        assert_eq!(session.store().raw().map(str::to_string), saved);

        let removed = session.remove_match(game, &mut AssumeYes).unwrap();
        assert!(matches!(removed, Removal::Removed(m) if m.id == game));
        assert!(session.document().find_match(game).is_none());
        assert_eq!(session.view().renders, renders + 1);
    }

    #[test]
    fn unknown_targets_change_nothing() {
        let mut session = editing();
        let before = session.document().clone();
        let renders = session.view().renders;

        assert!(matches!(
            session.edit_day(DayId::new(), DayDraft::default()),
            Err(EditError::DayNotFound(_))
        ));
        assert!(matches!(
            session.add_match(Some(DayId::new()), futsal()),
            Err(EditError::DayNotFound(_))
        ));
        assert!(matches!(
            session.remove_day(DayId::new(), &mut AssumeYes),
            Err(EditError::DayNotFound(_))
        ));

        assert_eq!(session.document(), &before);
        assert_eq!(session.view().renders, renders);
    }

    #[test]
    fn edits_are_refused_outside_edit_mode() {
        let mut session = editing();
        session.set_edit_mode(false).unwrap();

        assert!(matches!(
            session.add_day(DayDraft::new("Domingo", "")),
            Err(EditError::ReadOnly)
        ));
        assert!(session.document().schedule.is_empty());
    }

    #[test]
    fn toggling_edit_mode_redraws() {
        let mut session = editing();
        assert!(!session.toggle_edit_mode().unwrap());
        assert!(session.toggle_edit_mode().unwrap());
        assert_eq!(session.view().renders, 2);
        assert!(session.view().last.as_ref().unwrap().1);
    }

    #[test]
    fn failed_save_keeps_the_change_and_still_redraws() {
        let mut session = Session::new(
            Document::fallback(),
            MemoryStore::new().read_only(),
            Recorder::default(),
            true,
        );

        let result = session.add_day(DayDraft::new("Segunda-feira", ""));

        assert!(matches!(result, Err(EditError::Persist(_))));
        assert_eq!(session.document().schedule.len(), 1);
        assert_eq!(session.view().renders, 1);
    }
}
