//! LIFO container used to hold the current depth-first search path.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    items: Vec<String>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: &str) {
        self.items.push(value.to_owned());
    }

    /// Top of the stack, without removing it.
    pub fn peek(&self) -> Result<&str> {
        self.items
            .last()
            .map(String::as_str)
            .ok_or(Error::StackEmpty)
    }

    pub fn pop(&mut self) -> Result<String> {
        self.items.pop().ok_or(Error::StackEmpty)
    }
}
