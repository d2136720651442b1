//! Navigation History
//!
//! LIFO record of previously displayed primary views, used by `go_back`.
//! Entries are only pushed when a new primary view replaces the current one,
//! so the stack never holds the view that is on screen.

use std::collections::VecDeque;

use crate::element::ElementId;

/// Back-stack of prior primary views
#[derive(Clone, Debug, Default)]
pub struct NavigationHistory {
    /// Bottom (oldest) at the front, top (newest) at the back
    entries: VecDeque<ElementId>,
    /// Maximum number of entries (0 = unlimited)
    limit: usize,
}

impl NavigationHistory {
    /// Create an unbounded history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `limit` entries (0 = unlimited)
    ///
    /// When full, pushing drops the oldest entry.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
        }
    }

    /// Push an identity unless it is already on top
    ///
    /// Returns whether the identity was pushed.
    pub fn push(&mut self, id: ElementId) -> bool {
        if self.entries.back() == Some(&id) {
            return false;
        }

        self.entries.push_back(id);
        if self.limit > 0 && self.entries.len() > self.limit {
            if let Some(dropped) = self.entries.pop_front() {
                tracing::debug!(element = %dropped, limit = self.limit, "History full, dropped oldest entry");
            }
        }
        true
    }

    /// Remove and return the top entry; `None` when empty
    pub fn pop(&mut self) -> Option<ElementId> {
        self.entries.pop_back()
    }

    /// Pop the top entry only if it is `id`
    ///
    /// Returns whether an entry was discarded.
    pub fn discard_top(&mut self, id: &str) -> bool {
        if self.entries.back().is_some_and(|top| top.as_str() == id) {
            self.entries.pop_back();
            true
        } else {
            false
        }
    }

    /// The top entry, if any
    #[must_use]
    pub fn peek(&self) -> Option<&ElementId> {
        self.entries.back()
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured capacity (0 = unlimited)
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Snapshot of the entries, bottom to top
    #[must_use]
    pub fn entries(&self) -> Vec<ElementId> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ElementId {
        ElementId::new(s)
    }

    #[test]
    fn test_push_pop_lifo() {
        let mut history = NavigationHistory::new();
        assert!(history.push(id("menu")));
        assert!(history.push(id("lobby")));

        assert_eq!(history.peek(), Some(&id("lobby")));
        assert_eq!(history.pop(), Some(id("lobby")));
        assert_eq!(history.pop(), Some(id("menu")));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn test_no_adjacent_duplicates() {
        let mut history = NavigationHistory::new();
        assert!(history.push(id("menu")));
        assert!(!history.push(id("menu")));
        assert!(history.push(id("game")));
        // Non-adjacent repeats are fine
        assert!(history.push(id("menu")));

        assert_eq!(history.entries(), vec![id("menu"), id("game"), id("menu")]);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = NavigationHistory::with_limit(2);
        history.push(id("a"));
        history.push(id("b"));
        history.push(id("c"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries(), vec![id("b"), id("c")]);
    }

    #[test]
    fn test_discard_top() {
        let mut history = NavigationHistory::new();
        history.push(id("menu"));
        history.push(id("game"));

        assert!(!history.discard_top("menu"));
        assert!(history.discard_top("game"));
        assert_eq!(history.entries(), vec![id("menu")]);
    }

    #[test]
    fn test_clear() {
        let mut history = NavigationHistory::new();
        history.push(id("menu"));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.pop(), None);
    }
}
