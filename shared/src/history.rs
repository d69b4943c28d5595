use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::constants::HISTORY_LEN;
use crate::selection::SpinResult;

/// Most recent results of the current page session, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinHistory {
    results: VecDeque<SpinResult>,
    capacity: usize,
}

impl Default for SpinHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_LEN)
    }
}

impl SpinHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            results: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn record(&mut self, result: SpinResult) {
        if self.results.len() == self.capacity {
            self.results.pop_back();
        }
        self.results.push_front(result);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpinResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// How many of the kept results picked `entry`.
    pub fn wins_for(&self, entry: &str) -> usize {
        self.results.iter().filter(|r| r.winning_entry == entry).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(entry: &str, rotation: f64) -> SpinResult {
        SpinResult {
            winning_index: 0,
            winning_entry: entry.to_string(),
            final_rotation_degrees: rotation,
        }
    }

    #[test]
    fn keeps_newest_first_and_drops_oldest() {
        let mut history = SpinHistory::with_capacity(2);
        history.record(result("Pizza", 100.0));
        history.record(result("Sushi", 200.0));
        history.record(result("Tacos", 300.0));

        let entries: Vec<_> = history.iter().map(|r| r.winning_entry.as_str()).collect();
        assert_eq!(entries, vec!["Tacos", "Sushi"]);
        assert_eq!(history.iter().next().map(|r| r.final_rotation_degrees), Some(300.0));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn counts_wins_per_entry() {
        let mut history = SpinHistory::default();
        assert!(history.is_empty());
        history.record(result("Pizza", 1.0));
        history.record(result("Pizza", 2.0));
        history.record(result("Ramen", 3.0));
        assert_eq!(history.wins_for("Pizza"), 2);
        assert_eq!(history.wins_for("Salad"), 0);
    }
}
