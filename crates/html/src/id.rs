//! Element id generation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub trait IdGenerator: fmt::Debug + Send + Sync {
    /// Returns `prefix` followed by a suffix unique for this generator.
    fn generate(&self, prefix: &str) -> String;
}

/// Process-wide counter: ids never repeat within one process, across threads included.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialIds;

static NEXT_SEQUENTIAL: AtomicU64 = AtomicU64::new(1);

impl IdGenerator for SequentialIds {
    fn generate(&self, prefix: &str) -> String {
        let n = NEXT_SEQUENTIAL.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}{n}")
    }
}

/// Counter owned by the generator, for reproducible output (one page render, tests).
#[derive(Debug)]
pub struct ScopedIds {
    next: AtomicU64,
}

impl ScopedIds {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }
}

impl Default for ScopedIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for ScopedIds {
    fn generate(&self, prefix: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}{n}")
    }
}
