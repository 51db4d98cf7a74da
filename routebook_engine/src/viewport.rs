//! Visibility edges over revealed sections.
//!
//! The reader moving past a section is an edge, not a level: it fires once
//! per mount, and remounting a section (after a backwards jump) arms it
//! again. Double-counting of resource updates is prevented separately by the
//! tracker's applied-id set, so an edge firing twice is harmless; this
//! abstraction exists to keep the event stream clean.

use std::collections::HashSet;

/// Edge produced when the reader scrolls past a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityEdge {
    /// The section's end moved above the viewport: the reader passed it.
    PassedUpward,
}

/// Per-mount edge deduplication.
#[derive(Debug, Default, Clone)]
pub struct EdgeObserver {
    reported: HashSet<String>,
}

impl EdgeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a passed-upward edge for a section. Returns the edge the
    /// first time per mount, `None` on repeats.
    pub fn passed(&mut self, section_id: &str) -> Option<VisibilityEdge> {
        if self.reported.insert(section_id.to_string()) {
            Some(VisibilityEdge::PassedUpward)
        } else {
            None
        }
    }

    /// Drop a section's observer state so a remount can report again.
    pub fn unmount(&mut self, section_id: &str) {
        self.reported.remove(section_id);
    }
}
