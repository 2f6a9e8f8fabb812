use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

/// Per-user async locks for cart read-modify-write sequences.
///
/// Shared by the cart service and checkout so a purchase and an add for
/// the same user never interleave. Idle entries are pruned on acquire.
#[derive(Default)]
pub struct CartLocks {
    locks: Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>,
}

pub struct CartGuard {
    _guard: OwnedMutexGuard<()>,
}

impl CartLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, user_id: Uuid) -> CartGuard {
        let slot = {
            let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            // Only the map holds an idle entry.
            locks.retain(|id, slot| *id == user_id || Arc::strong_count(slot) > 1);
            Arc::clone(locks.entry(user_id).or_default())
        };

        CartGuard {
            _guard: slot.lock_owned().await,
        }
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.locks.lock().map(|l| l.len()).unwrap_or(0)
    }
}
