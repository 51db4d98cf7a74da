//! Guide session: progressive reveal, jumps, and current-section tracking.
//!
//! All session behavior lives in the pure [`apply`] function over a closed
//! [`SessionCommand`] enum, so every transition is testable without a
//! terminal. [`Session`] wraps it with the effect layer: logging, numbering
//! resets for unmounted sections, and ownership of the mutable stores.

use log::{info, warn};
use routebook_data::{ContentNode, GuideDoc, TextParagraph};
use thiserror::Error;

use crate::numbering::ListNumbering;
use crate::scope;
use crate::trackables;
use crate::tracker::Tracker;
use crate::viewport::EdgeObserver;

/// Synthetic section id for the guide introduction.
pub const INTRODUCTION_ID: &str = "introduction";
/// Synthetic section id for the acknowledgements.
pub const ACKNOWLEDGEMENTS_ID: &str = "acknowledgements";

/// Failure to resolve a section reference.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SectionError {
    #[error("no section with id '{0}'")]
    UnknownId(String),
}

/// Immutable-per-transition session state.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub guide: GuideDoc,
    /// Section ids revealed so far, in navigable order.
    pub revealed: Vec<String>,
    /// The section the reader is currently in, when known.
    pub current: Option<String>,
    pub tracker: Tracker,
}

/// Commands a session can process.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Reader reached the bottom of the revealed content; reveal the next
    /// section if one remains.
    RevealNext,
    /// Jump directly to a section, revealing everything up to and
    /// including it.
    JumpTo(String),
    /// The set of sections currently in view changed organically; retarget
    /// `current` to the topmost without forcing a jump.
    VisibilityChanged(Vec<String>),
    /// The reader moved past a section; apply its guaranteed updates.
    SectionPassed(String),
}

impl SessionState {
    pub fn new(guide: GuideDoc, tracker: Tracker) -> Self {
        let mut state = Self { guide, revealed: Vec::new(), current: None, tracker };
        // Initial reveal: the first navigable section, when there is one.
        if let Some(first) = state.nav_order().into_iter().next() {
            state.current = Some(first.clone());
            state.revealed.push(first);
        }
        state
    }

    /// Navigable section ids: introduction, chapters, acknowledgements.
    pub fn nav_order(&self) -> Vec<String> {
        let mut order = Vec::new();
        if self.guide.introduction.as_ref().is_some_and(|intro| !intro.is_empty()) {
            order.push(INTRODUCTION_ID.to_string());
        }
        for chapter in self.guide.chapters.as_deref().unwrap_or_default() {
            order.push(chapter.id.clone());
        }
        if self
            .guide
            .acknowledgements
            .as_ref()
            .is_some_and(|acks| !acks.is_empty())
        {
            order.push(ACKNOWLEDGEMENTS_ID.to_string());
        }
        order
    }

    /// Resolve a section id to its display title and content.
    ///
    /// Acknowledgements content that arrives as bare inline runs is wrapped
    /// in a paragraph so it renders like any other section.
    pub fn section_data(&self, id: &str) -> Option<(String, Vec<ContentNode>)> {
        if id == INTRODUCTION_ID {
            return self
                .guide
                .introduction
                .clone()
                .map(|content| ("Introduction".to_string(), content));
        }
        if id == ACKNOWLEDGEMENTS_ID {
            return self.guide.acknowledgements.clone().map(|content| {
                let content = if content.iter().all(ContentNode::is_inline) {
                    vec![ContentNode::TextParagraph(TextParagraph { content, display_hint: None })]
                } else {
                    content
                };
                ("Acknowledgements".to_string(), content)
            });
        }
        self.guide
            .chapters
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|chapter| chapter.id == id)
            .map(|chapter| (chapter.title.clone(), chapter.content.clone()))
    }

    /// Section title for table-of-contents listings.
    pub fn section_title(&self, id: &str) -> Option<String> {
        self.section_data(id).map(|(title, _)| title)
    }

    /// Resolve a section id or explain why it cannot be shown.
    ///
    /// # Errors
    /// Returns [`SectionError::UnknownId`] when no section carries `id`.
    pub fn resolve_section(&self, id: &str) -> Result<(String, Vec<ContentNode>), SectionError> {
        self.section_data(id)
            .ok_or_else(|| SectionError::UnknownId(id.to_string()))
    }
}

/// Apply one command, producing the successor state. Pure: no IO, no
/// logging, no shared mutation.
pub fn apply(state: &SessionState, command: &SessionCommand) -> SessionState {
    let mut next = state.clone();
    let order = state.nav_order();

    match command {
        SessionCommand::RevealNext => {
            let revealed_count = next.revealed.len();
            if revealed_count < order.len() {
                let id = order[revealed_count].clone();
                next.revealed.push(id);
            }
            if next.current.is_none() {
                next.current = next.revealed.first().cloned();
            }
        },
        SessionCommand::JumpTo(id) => {
            if let Some(pos) = order.iter().position(|section| section == id) {
                next.revealed = order[..=pos].to_vec();
                next.current = Some(id.clone());
            }
        },
        SessionCommand::VisibilityChanged(visible) => {
            // Topmost revealed section still in view wins; nothing is
            // revealed or hidden by an organic visibility change.
            if let Some(topmost) = order
                .iter()
                .find(|id| visible.contains(id) && next.revealed.contains(id))
            {
                next.current = Some(topmost.clone());
            }
        },
        SessionCommand::SectionPassed(id) => {
            if let Some((_, content)) = state.section_data(id) {
                let found = trackables::collect(&content);
                for update in &found.updates {
                    next.tracker.apply_update(update);
                }
            }
        },
    }

    next
}

/// Session wrapper owning the stores and the effect layer around [`apply`].
pub struct Session {
    pub state: SessionState,
    pub numbering: ListNumbering,
    pub observer: EdgeObserver,
}

impl Session {
    pub fn new(guide: GuideDoc, tracker: Tracker) -> Self {
        let state = SessionState::new(guide, tracker);
        if state.revealed.is_empty() {
            warn!("guide has no navigable sections");
        }
        Self {
            state,
            numbering: ListNumbering::new(),
            observer: EdgeObserver::new(),
        }
    }

    /// Dispatch a command: log it, apply it, and reset per-section stores
    /// for any section that left the revealed set.
    pub fn dispatch(&mut self, command: &SessionCommand) {
        info!("session command: {command:?}");
        if let SessionCommand::JumpTo(id) = command
            && !self.state.nav_order().iter().any(|section| section == id)
        {
            warn!("jump target '{id}' is not a known section");
        }

        let next = apply(&self.state, command);
        for id in &self.state.revealed {
            if !next.revealed.contains(id) {
                self.numbering.reset_prefix(&scope::section_root(id));
                self.observer.unmount(id);
            }
        }
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routebook_data::Chapter;

    fn guide() -> GuideDoc {
        GuideDoc {
            title: "Any%".into(),
            introduction: Some(vec![ContentNode::text("welcome")]),
            acknowledgements: Some(vec![ContentNode::text("thanks")]),
            chapters: Some(vec![
                Chapter { id: "ch1".into(), title: "Besaid".into(), content: vec![ContentNode::text("a")] },
                Chapter { id: "ch2".into(), title: "Kilika".into(), content: vec![ContentNode::text("b")] },
            ]),
            ..GuideDoc::default()
        }
    }

    #[test]
    fn nav_order_brackets_chapters() {
        let state = SessionState::new(guide(), Tracker::new());
        assert_eq!(state.nav_order(), vec!["introduction", "ch1", "ch2", "acknowledgements"]);
    }

    #[test]
    fn initial_reveal_is_first_section() {
        let state = SessionState::new(guide(), Tracker::new());
        assert_eq!(state.revealed, vec!["introduction"]);
        assert_eq!(state.current.as_deref(), Some("introduction"));
    }

    #[test]
    fn empty_guide_reveals_nothing() {
        let state = SessionState::new(GuideDoc::default(), Tracker::new());
        assert!(state.revealed.is_empty());
        assert!(state.current.is_none());
        assert!(state.nav_order().is_empty());
    }

    #[test]
    fn reveal_next_appends_in_order_and_stops_at_end() {
        let mut state = SessionState::new(guide(), Tracker::new());
        for _ in 0..5 {
            state = apply(&state, &SessionCommand::RevealNext);
        }
        assert_eq!(state.revealed, vec!["introduction", "ch1", "ch2", "acknowledgements"]);
    }

    #[test]
    fn jump_replaces_revealed_with_prefix() {
        let state = SessionState::new(guide(), Tracker::new());
        let state = apply(&state, &SessionCommand::JumpTo("ch2".into()));
        assert_eq!(state.revealed, vec!["introduction", "ch1", "ch2"]);
        assert_eq!(state.current.as_deref(), Some("ch2"));

        // Jumping backwards shrinks the revealed set again.
        let state = apply(&state, &SessionCommand::JumpTo("ch1".into()));
        assert_eq!(state.revealed, vec!["introduction", "ch1"]);
        assert_eq!(state.current.as_deref(), Some("ch1"));
    }

    #[test]
    fn unknown_jump_target_is_a_no_op() {
        let state = SessionState::new(guide(), Tracker::new());
        let next = apply(&state, &SessionCommand::JumpTo("nowhere".into()));
        assert_eq!(next, state);
    }

    #[test]
    fn visibility_change_targets_topmost_revealed() {
        let mut state = SessionState::new(guide(), Tracker::new());
        state = apply(&state, &SessionCommand::RevealNext);
        state = apply(&state, &SessionCommand::RevealNext);
        let state = apply(
            &state,
            &SessionCommand::VisibilityChanged(vec!["ch2".into(), "ch1".into()]),
        );
        assert_eq!(state.current.as_deref(), Some("ch1"));
        // Reveal set untouched by organic visibility changes.
        assert_eq!(state.revealed, vec!["introduction", "ch1", "ch2"]);
    }

    #[test]
    fn acknowledgements_wraps_inline_runs_in_a_paragraph() {
        let state = SessionState::new(guide(), Tracker::new());
        let (title, content) = state.section_data(ACKNOWLEDGEMENTS_ID).unwrap();
        assert_eq!(title, "Acknowledgements");
        assert!(matches!(content[0], ContentNode::TextParagraph(_)));
    }

    #[test]
    fn resolving_an_unknown_section_names_it() {
        let state = SessionState::new(guide(), Tracker::new());
        let err = state.resolve_section("zanarkand").unwrap_err();
        assert_eq!(err, SectionError::UnknownId("zanarkand".into()));
    }

    #[test]
    fn dispatch_resets_numbering_for_unmounted_sections() {
        let mut session = Session::new(guide(), Tracker::new());
        session.dispatch(&SessionCommand::JumpTo("ch2".into()));
        session.numbering.set_last_number("section_ch2_level0.block0", 4);
        session.dispatch(&SessionCommand::JumpTo("ch1".into()));
        assert_eq!(session.numbering.last_number("section_ch2_level0.block0"), 0);
    }
}
