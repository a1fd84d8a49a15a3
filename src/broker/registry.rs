//! Concurrent mapping from correlation handle to pending completion sender.
//!
//! Insertions come from caller threads in `begin()`; removals come from
//! arbitrary native callback threads in `complete()`. The sharded map keeps
//! every mutation serialized per entry; `remove` is the atomic take that
//! enforces single delivery.

use super::handle::CommandHandle;
use super::sink::CompletionSender;
use dashmap::DashMap;
use tracing::error;

#[derive(Debug, Default)]
pub struct PendingCallRegistry {
    entries: DashMap<CommandHandle, CompletionSender>,
}

impl PendingCallRegistry {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Insert the pending entry for a freshly allocated handle.
    ///
    /// A collision means the allocator's uniqueness invariant is broken and
    /// the process can no longer trust handle/outcome correlation; this is a
    /// defect, not a runtime condition, and aborts loudly.
    pub fn register(&self, handle: CommandHandle, sender: CompletionSender) {
        if self.entries.insert(handle, sender).is_some() {
            error!(handle, "pending-call registry collision");
            panic!("duplicate registration for in-flight handle {handle}");
        }
    }

    /// Atomically remove and return the sender for `handle`.
    ///
    /// `None` for unknown handles is tolerated: the native collaborator may
    /// double-invoke a callback or invoke one for a handle completed through
    /// the synthetic path.
    pub fn take(&self, handle: CommandHandle) -> Option<CompletionSender> {
        self.entries.remove(&handle).map(|(_, sender)| sender)
    }

    pub fn contains(&self, handle: CommandHandle) -> bool {
        self.entries.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
