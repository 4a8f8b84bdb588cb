//! Duplicate-free container of node identifiers.

use crate::error::{Error, Result};
use std::collections::{BTreeSet, btree_set};

/// An unordered bag of unique strings.
///
/// Members iterate in sorted order so that runs over the same input are
/// reproducible, but callers must not rely on any particular order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Set {
    members: BTreeSet<String>,
}

impl Set {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value`. Adding a member twice is a no-op.
    pub fn add(&mut self, value: &str) {
        if !self.members.contains(value) {
            self.members.insert(value.to_owned());
        }
    }

    pub fn has(&self, value: &str) -> bool {
        self.members.contains(value)
    }

    /// Delete `value`, failing if it was never added.
    pub fn remove(&mut self, value: &str) -> Result<()> {
        if self.members.remove(value) {
            Ok(())
        } else {
            Err(Error::NotInSet(value.to_owned()))
        }
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter(self.members.iter())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Borrowing iterator over the members of a [`Set`].
#[derive(Debug, Clone)]
pub struct Iter<'a>(btree_set::Iter<'a, String>);

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Set {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
