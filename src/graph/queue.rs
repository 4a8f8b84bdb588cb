//! Bookkeeping for a single Kahn pass: the frontier of ready nodes and the
//! remaining in-degree of everything else.

use crate::error::{Error, Result};
use std::collections::{BTreeMap, VecDeque};

/// FIFO of node identifiers.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    items: VecDeque<String>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, value: &str) {
        self.items.push_back(value.to_owned());
    }

    pub fn dequeue(&mut self) -> Option<String> {
        self.items.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Counting container. Items whose count drops to zero are forgotten, so
/// `is_empty` means every count has been used up.
#[derive(Debug, Clone, Default)]
pub struct Multiset {
    counts: BTreeMap<String, usize>,
}

impl Multiset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `item`. A zero count is ignored.
    pub fn add(&mut self, item: &str, count: usize) {
        if count == 0 {
            return;
        }
        *self.counts.entry(item.to_owned()).or_insert(0) += count;
    }

    /// Remove one occurrence of `item` and report whether its count reached
    /// zero.
    pub fn remove_one(&mut self, item: &str) -> Result<bool> {
        let count = self
            .counts
            .get_mut(item)
            .ok_or_else(|| Error::NotInMultiset(item.to_owned()))?;
        *count -= 1;
        if *count == 0 {
            self.counts.remove(item);
            return Ok(true);
        }
        Ok(false)
    }

    pub fn has(&self, item: &str) -> bool {
        self.counts.contains_key(item)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct items still holding a count.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Each distinct item with a positive count, once.
    pub fn all_unique(&self) -> impl Iterator<Item = &str> + '_ {
        self.counts.keys().map(String::as_str)
    }
}
