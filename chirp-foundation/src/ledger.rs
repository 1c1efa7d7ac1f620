use chirp_dom::{ElementId, WeakElement};
use chirp_protocol::{Cleanup, MountPayload};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

struct Entry {
    element: WeakElement,
    cleanup: Cleanup,
}

/// Ownership table: at most one pending cleanup per mounted element.
///
/// Entries are keyed by [`ElementId`] and hold only a weak handle to the
/// element, so the ledger is never what keeps a detached element alive.
/// Entries for elements that were dropped without an unmount stay until
/// [`prune_detached`](Self::prune_detached) is called; the host's unmount
/// path is responsible for calling it.
///
/// Cleanups always run after their entry is removed and with the table
/// unlocked, so a cleanup that re-enters the ledger (including unmounting
/// its own element again) finds nothing to run.
#[derive(Clone, Default)]
pub struct CleanupLedger {
    entries: Arc<Mutex<HashMap<ElementId, Entry>>>,
}

impl CleanupLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `cleanup` against the payload's element. No-op without a
    /// cleanup.
    ///
    /// A cleanup already recorded for the element is superseded: it runs
    /// now, before this call returns, so the listeners it owns are released
    /// rather than leaked.
    pub fn attach_cleanup(&self, payload: &MountPayload, cleanup: Option<Cleanup>) {
        let Some(cleanup) = cleanup else {
            return;
        };
        let element = payload.element().downgrade();
        let id = element.id();
        let superseded = self.entries.lock().insert(id, Entry { element, cleanup });
        tracing::debug!(element = %id, superseded = superseded.is_some(), "chirp.ledger.attach");
        if let Some(previous) = superseded {
            previous.cleanup.run();
        }
    }

    /// Remove and run the cleanup recorded for the payload's element.
    /// Returns whether one ran. A second call without an intervening
    /// attach does nothing.
    pub fn run_cleanup(&self, payload: &MountPayload) -> bool {
        self.run_for(payload.element_id())
    }

    /// [`run_cleanup`](Self::run_cleanup) by element id.
    pub fn run_for(&self, id: ElementId) -> bool {
        let entry = self.entries.lock().remove(&id);
        match entry {
            Some(entry) => {
                tracing::debug!(element = %id, "chirp.ledger.run");
                entry.cleanup.run();
                true
            }
            None => false,
        }
    }

    /// Drop entries whose element no longer exists, without running them.
    /// Returns how many were dropped.
    pub fn prune_detached(&self) -> usize {
        let pruned: Vec<Entry> = {
            let mut entries = self.entries.lock();
            let dead: Vec<ElementId> = entries
                .iter()
                .filter(|(_, entry)| entry.element.is_detached())
                .map(|(id, _)| *id)
                .collect();
            dead.iter().filter_map(|id| entries.remove(id)).collect()
        };
        if !pruned.is_empty() {
            tracing::debug!(count = pruned.len(), "chirp.ledger.prune");
        }
        pruned.len()
    }

    /// Whether a cleanup is pending for the element.
    pub fn contains(&self, id: ElementId) -> bool {
        self.entries.lock().contains_key(&id)
    }

    /// Number of pending cleanups.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether no cleanups are pending.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
