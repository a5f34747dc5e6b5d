use std::collections::VecDeque;

/// LIFO store of undo snapshots.
///
/// Generic over the payload so it never depends on what a snapshot holds.
/// Unbounded by default; with a limit set, the oldest entry is evicted once
/// the stack is full. A limit of 0 is clamped to 1.
#[derive(Debug, Clone)]
pub struct History<S> {
    entries: VecDeque<S>,
    limit: Option<usize>,
}

impl<S> Default for History<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> History<S> {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            limit: None,
        }
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::new()
        }
    }

    /// Push a snapshot.
    pub fn save_snapshot(&mut self, snapshot: S) {
        self.entries.push_back(snapshot);
        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                self.entries.pop_front();
            }
        }
    }

    /// Pop the most recent snapshot, if any.
    pub fn recover_snapshot(&mut self) -> Option<S> {
        self.entries.pop_back()
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let mut history: History<u32> = History::new();
        assert!(!history.can_undo());
        assert_eq!(history.recover_snapshot(), None);
    }

    #[test]
    fn pops_in_reverse_order() {
        let mut history = History::new();
        history.save_snapshot("a");
        history.save_snapshot("b");
        history.save_snapshot("c");
        assert_eq!(history.len(), 3);
        assert_eq!(history.recover_snapshot(), Some("c"));
        assert_eq!(history.recover_snapshot(), Some("b"));
        assert_eq!(history.recover_snapshot(), Some("a"));
        assert!(!history.can_undo());
    }

    #[test]
    fn limit_evicts_oldest() {
        let mut history = History::with_limit(2);
        for i in 0..5 {
            history.save_snapshot(i);
        }
        assert_eq!(history.len(), 2);
        assert_eq!(history.recover_snapshot(), Some(4));
        assert_eq!(history.recover_snapshot(), Some(3));
        assert_eq!(history.recover_snapshot(), None);
    }

    #[test]
    fn zero_limit_clamped_to_one() {
        let mut history = History::with_limit(0);
        assert_eq!(history.limit(), Some(1));
        history.save_snapshot(1);
        history.save_snapshot(2);
        assert_eq!(history.len(), 1);
        assert_eq!(history.recover_snapshot(), Some(2));
    }
}
