use std::sync::{PoisonError, RwLock};

use boards_core::StoreSnapshot;

/// Read access to the host's application state.
pub trait StateStore: Send + Sync {
    fn snapshot(&self) -> StoreSnapshot;
}

/// Lock-guarded snapshot the host replaces as its reducers run.
#[derive(Debug, Default)]
pub struct SharedStore {
    state: RwLock<StoreSnapshot>,
}

impl SharedStore {
    pub fn new(snapshot: StoreSnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
        }
    }

    pub fn replace(&self, snapshot: StoreSnapshot) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    /// Edits the snapshot in place under the write lock.
    pub fn update(&self, edit: impl FnOnce(&mut StoreSnapshot)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        edit(&mut *state);
    }
}

impl StateStore for SharedStore {
    fn snapshot(&self) -> StoreSnapshot {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
