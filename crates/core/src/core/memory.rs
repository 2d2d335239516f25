//! Data memory.
//!
//! A sparse word-addressed store backed by a `BTreeMap` so state dumps come
//! out in address order. Unwritten words read as 0; there is no alignment
//! enforcement beyond the word addressing itself.

use std::collections::BTreeMap;

use serde::Serialize;

/// Sparse word-addressed data memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Memory {
    words: BTreeMap<u32, i32>,
}

impl Memory {
    /// Creates an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a word. Unwritten addresses read as 0.
    pub fn load(&self, addr: u32) -> i32 {
        self.words.get(&addr).copied().unwrap_or(0)
    }

    /// Stores a word.
    pub fn store(&mut self, addr: u32, value: i32) {
        self.words.insert(addr, value);
    }

    /// Iterates the written words in address order. Used by state dumps.
    pub fn iter(&self) -> impl Iterator<Item = (u32, i32)> + '_ {
        self.words.iter().map(|(&a, &v)| (a, v))
    }

    /// Number of written words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when no word has been written.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
