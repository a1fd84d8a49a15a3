use std::sync::atomic::{AtomicI64, Ordering};

/// Correlation identifier for one in-flight native operation.
pub type CommandHandle = i64;

/// Allocates unique correlation handles.
///
/// A 64-bit monotone counter: wraparound would take centuries at any
/// realistic call rate, so uniqueness among in-flight handles holds without
/// consulting the registry.
#[derive(Debug)]
pub struct HandleAllocator {
    next: AtomicI64,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicI64::new(1),
        }
    }

    /// Allocate the next handle. Never blocks, never fails.
    pub fn next(&self) -> CommandHandle {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for HandleAllocator {
    fn default() -> Self {
        Self::new()
    }
}
