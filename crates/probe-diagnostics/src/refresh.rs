//! Manual re-run signal shared by the three producers.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
/// Cycle counter backing the refresh control.
///
/// Cycle zero is the implicit initial load; every `fire` starts a new
/// cycle. Producers hold no state between cycles, so re-execution is
/// forced simply by rendering against the new cycle number.
pub struct RefreshSignal {
    cycle: AtomicU64,
}

impl RefreshSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.cycle.load(Ordering::SeqCst)
    }

    pub fn fire(&self) -> u64 {
        self.cycle.fetch_add(1, Ordering::SeqCst) + 1
    }
}
