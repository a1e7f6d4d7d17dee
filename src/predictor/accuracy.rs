//! Prediction accuracy tracking
//!
//! Every prediction made while recording a match is checked against the real
//! result. The tracker keeps a bounded window of the most recent outcomes and
//! lifetime counters. None of it is persisted; a new session starts empty.

use std::collections::VecDeque;

/// Rolling and lifetime prediction accuracy
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionAccuracy {
    window: VecDeque<bool>,
    capacity: usize,
    lifetime_correct: u64,
    lifetime_total: u64,
}

impl Default for PredictionAccuracy {
    fn default() -> Self {
        Self::new(20)
    }
}

impl PredictionAccuracy {
    /// Create a tracker remembering the last `capacity` outcomes
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
            lifetime_correct: 0,
            lifetime_total: 0,
        }
    }

    /// Add one outcome, evicting the oldest once the window is full
    pub fn record(&mut self, correct: bool) {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(correct);

        self.lifetime_total += 1;
        if correct {
            self.lifetime_correct += 1;
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn rolling_len(&self) -> usize {
        self.window.len()
    }

    pub fn rolling_correct(&self) -> usize {
        self.window.iter().filter(|&&correct| correct).count()
    }

    /// Share of correct predictions in the window, `None` before the first
    pub fn rolling_rate(&self) -> Option<f64> {
        if self.window.is_empty() {
            return None;
        }
        Some(self.rolling_correct() as f64 / self.window.len() as f64)
    }

    pub fn lifetime_correct(&self) -> u64 {
        self.lifetime_correct
    }

    pub fn lifetime_total(&self) -> u64 {
        self.lifetime_total
    }

    pub fn lifetime_rate(&self) -> Option<f64> {
        if self.lifetime_total == 0 {
            return None;
        }
        Some(self.lifetime_correct as f64 / self.lifetime_total as f64)
    }

    /// Outcomes in the window, oldest first
    pub fn recent(&self) -> impl Iterator<Item = bool> + '_ {
        self.window.iter().copied()
    }
}
