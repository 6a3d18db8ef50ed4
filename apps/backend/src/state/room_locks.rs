//! Per-room write serialization.
//!
//! Every room-mutating operation (vote casting, role assignment,
//! elimination) runs under the room's own async mutex: at most one mutator
//! per room, while distinct rooms proceed in parallel. This is what keeps
//! the voting ledgers free of lost updates and `guess_order` free of
//! double-assignment under concurrent callers.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Default)]
pub struct RoomLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl RoomLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the room's mutator lock, creating it on first use.
    pub async fn acquire(&self, code: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(code.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Drop the lock entry for a deleted room. An in-flight guard keeps the
    /// underlying mutex alive via its `Arc`.
    pub fn forget(&self, code: &str) {
        self.locks.remove(code);
    }
}
