//! EchoAdapter: counts mounts and cleanups, emits nothing.

use crate::adapter::{Adapter, Cleanup};
use crate::payload::MountContext;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// An adapter that records how often it was mounted and cleaned up.
#[derive(Clone, Default)]
pub struct EchoAdapter {
    mounts: Arc<AtomicUsize>,
    cleanups: Arc<AtomicUsize>,
}

impl EchoAdapter {
    /// Create a fresh adapter with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Times `mount` was called.
    pub fn mounts(&self) -> usize {
        self.mounts.load(Ordering::SeqCst)
    }

    /// Times a returned cleanup ran.
    pub fn cleanups(&self) -> usize {
        self.cleanups.load(Ordering::SeqCst)
    }
}

impl Adapter for EchoAdapter {
    fn mount(&self, _ctx: MountContext) -> Option<Cleanup> {
        self.mounts.fetch_add(1, Ordering::SeqCst);
        let cleanups = Arc::clone(&self.cleanups);
        Some(Cleanup::new(move || {
            cleanups.fetch_add(1, Ordering::SeqCst);
        }))
    }
}
