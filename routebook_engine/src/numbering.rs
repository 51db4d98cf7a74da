//! Scoped counters for ordered instruction lists.
//!
//! Ordered lists in a guide are frequently split into fragments with
//! paragraphs or battles between them; the later fragments must continue
//! where the earlier ones left off. The store maps a scope key (the parent
//! array position, see [`crate::scope`]) to the last ordinal rendered there.
//! State lives only for the session and resets when sections unmount.

use std::collections::HashMap;

/// Last-used ordinal per scope key.
#[derive(Debug, Default, Clone)]
pub struct ListNumbering {
    counters: HashMap<String, usize>,
}

impl ListNumbering {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last ordinal recorded for `scope`, 0 when the scope has never been
    /// written (so the first item renders as 1).
    pub fn last_number(&self, scope: &str) -> usize {
        self.counters.get(scope).copied().unwrap_or(0)
    }

    /// Record the last ordinal for `scope`. Returns whether the stored value
    /// changed; a same-value write is a no-op, so repeated render passes do
    /// not invalidate anything downstream.
    pub fn set_last_number(&mut self, scope: &str, n: usize) -> bool {
        match self.counters.get(scope) {
            Some(current) if *current == n => false,
            _ => {
                self.counters.insert(scope.to_string(), n);
                true
            },
        }
    }

    /// Drop every counter whose key starts with `prefix`. Used when a
    /// section unmounts so re-entering it starts numbering fresh.
    pub fn reset_prefix(&mut self, prefix: &str) {
        self.counters.retain(|key, _| !key.starts_with(prefix));
    }

    /// Clear a single scope's counter (an explicit `resume: false` list).
    pub fn reset_scope(&mut self, scope: &str) {
        self.counters.remove(scope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_scope_reads_zero() {
        let store = ListNumbering::new();
        assert_eq!(store.last_number("section_x_level0"), 0);
    }

    #[test]
    fn set_is_idempotent() {
        let mut store = ListNumbering::new();
        assert!(store.set_last_number("s", 3));
        assert!(!store.set_last_number("s", 3));
        assert!(store.set_last_number("s", 5));
        assert_eq!(store.last_number("s"), 5);
    }

    #[test]
    fn reset_prefix_only_hits_matching_keys() {
        let mut store = ListNumbering::new();
        store.set_last_number("section_a_level0.block0", 4);
        store.set_last_number("section_a_level0.block2", 7);
        store.set_last_number("section_b_level0.block0", 2);
        store.reset_prefix("section_a_level0");
        assert_eq!(store.last_number("section_a_level0.block0"), 0);
        assert_eq!(store.last_number("section_a_level0.block2"), 0);
        assert_eq!(store.last_number("section_b_level0.block0"), 2);
    }
}
