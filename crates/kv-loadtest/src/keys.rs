//! Key naming and random data for workers.

use rand::distr::Alphanumeric;
use rand::Rng;
use std::collections::HashSet;

/// Length of the random key prefix owned by each worker.
pub const PREFIX_LENGTH: usize = 10;

/// Random alphanumeric string of `length` characters.
pub fn random_string(length: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Key of the `index`-th operation of the worker owning `prefix`.
pub fn key_for(prefix: &str, index: u64) -> String {
    format!("{prefix}-key-{index}")
}

/// Hands out random prefixes that are unique within one run.
///
/// All prefixes share one length, so no prefix is a string prefix of another
/// and cleanup by prefix never reaches into a different worker's keys.
#[derive(Debug)]
pub struct PrefixAllocator {
    length: usize,
    issued: HashSet<String>,
}

impl Default for PrefixAllocator {
    fn default() -> Self {
        Self::new(PREFIX_LENGTH)
    }
}

impl PrefixAllocator {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            issued: HashSet::new(),
        }
    }

    /// Draw a prefix that has not been handed out before.
    pub fn allocate(&mut self) -> String {
        loop {
            let prefix = random_string(self.length);
            if self.issued.insert(prefix.clone()) {
                return prefix;
            }
        }
    }

    pub fn issued(&self) -> usize {
        self.issued.len()
    }
}
