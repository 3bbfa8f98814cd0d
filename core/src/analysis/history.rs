use alloc::collections::VecDeque;

use crate::*;

/// Bounded FIFO of recent snapshots, newest at the back.
#[derive(Clone, Debug, PartialEq)]
pub struct History {
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Appends a snapshot, evicting the oldest once full.
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Snapshot `steps_back` generations before the newest one.
    pub fn back(&self, steps_back: usize) -> Option<&Snapshot> {
        let index = self.entries.len().checked_sub(steps_back + 1)?;
        self.entries.get(index)
    }

    /// Newest first.
    pub fn iter_recent(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter().rev()
    }

    /// Whether the two newest snapshots are identical.
    pub fn is_static(&self) -> bool {
        match (self.back(0), self.back(1)) {
            (Some(latest), Some(previous)) => latest == previous,
            _ => false,
        }
    }

    /// Smallest period `p >= 2` the recent snapshots repeat with.
    ///
    /// Needs at least four entries. For each candidate the newest
    /// `min(3p, len)` entries must each equal the one `p` steps older.
    pub fn smallest_period(&self) -> Option<usize> {
        let len = self.entries.len();
        if len < 4 {
            return None;
        }

        (2..=len / 2).find(|&period| {
            let window = (period * 3).min(len);
            (0..window - period).all(|offset| match self.back(offset + period) {
                Some(older) => self.back(offset) == Some(older),
                None => false,
            })
        })
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(pattern: &str) -> Snapshot {
        Snapshot::from_cells(pattern.chars().map(|c| Cell::from_symbol(c).unwrap()))
    }

    fn history(patterns: &[&str]) -> History {
        let mut history = History::default();
        for pattern in patterns {
            history.push(snap(pattern));
        }
        history
    }

    #[test]
    fn oldest_entries_are_evicted() {
        let mut history = History::new(3);
        for pattern in ["1..", ".1.", "..1", "2.."] {
            history.push(snap(pattern));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.back(0), Some(&snap("2..")));
        assert_eq!(history.back(2), Some(&snap(".1.")));
        assert_eq!(history.back(3), None);
    }

    #[test]
    fn static_needs_two_equal_entries() {
        assert!(!history(&["11"]).is_static());
        assert!(!history(&["11", "1."]).is_static());
        assert!(history(&["1.", "11", "11"]).is_static());
    }

    #[test]
    fn short_history_has_no_period() {
        assert_eq!(history(&["1.", ".1", "1."]).smallest_period(), None);
    }

    #[test]
    fn period_two_found_from_four_entries() {
        assert_eq!(history(&["1.", ".1", "1.", ".1"]).smallest_period(), Some(2));
    }

    #[test]
    fn reports_smallest_period_not_a_multiple() {
        let alternating = ["1.", ".1", "1.", ".1", "1.", ".1", "1.", ".1"];

        assert_eq!(history(&alternating).smallest_period(), Some(2));
    }

    #[test]
    fn period_three_found() {
        let cycle = history(&["1..", ".1.", "..1", "1..", ".1.", "..1"]);

        assert_eq!(cycle.smallest_period(), Some(3));
    }

    #[test]
    fn transient_prefix_does_not_hide_cycle() {
        let cycle = history(&["2..", "22.", "1..", ".1.", "1..", ".1.", "1..", ".1."]);

        assert_eq!(cycle.smallest_period(), Some(2));
    }

    #[test]
    fn non_repeating_history_has_no_period() {
        let drifting = history(&["1...", ".1..", "..1.", "...1", "2...", ".2.."]);

        assert_eq!(drifting.smallest_period(), None);
    }
}
