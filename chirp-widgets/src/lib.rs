#![deny(missing_docs)]
//! # chirp-widgets: the stock islands
//!
//! Eight adapters built only on the foundation's operations. Each reads its
//! props with `read_props`, wires listeners before its first emission, and
//! returns a cleanup that removes every listener and clears every timer it
//! owns.
//!
//! | Primitive | Adapter | What it does |
//! |-----------|---------|-------------|
//! | `counter-widget` | [`Counter`] | Plus/minus counter |
//! | `wizard_state` | [`Wizard`] | Multi-step form navigation |
//! | `grid_state` | [`Grid`] | Row filter, sort and selection |
//! | `draft_store` | [`DraftStore`] | Debounced form autosave |
//! | `upload_state` | [`UploadState`] | Simulated upload progress |
//! | `action_queue` | [`ActionQueue`] | Simulated slow action |
//! | `state_sync` | [`StateSync`] | Input value mirrored to the URL |
//! | `error_boundary` | [`ErrorBoundary`] | Fallback on island errors |
//!
//! [`register_all`] puts all eight into a host environment.

mod action_queue;
mod counter;
mod draft;
mod error_boundary;
mod grid;
mod js;
mod state_sync;
mod timings;
mod upload;
mod wiring;
mod wizard;

pub use action_queue::ActionQueue;
pub use counter::Counter;
pub use draft::{DRAFT_PREFIX, DraftRecord, DraftStore};
pub use error_boundary::{ErrorBoundary, boundary_accepts};
pub use grid::Grid;
pub use state_sync::{StateSync, with_query_param};
pub use timings::WidgetTimings;
pub use upload::UploadState;
pub use wizard::Wizard;

use chirp_foundation::{HostEnv, register_primitive};
use chirp_protocol::{Adapter, RegistryError};
use std::sync::Arc;

/// Names of every stock primitive, in registration order.
pub const PRIMITIVES: [&str; 8] = [
    Counter::NAME,
    Wizard::NAME,
    Grid::NAME,
    DraftStore::NAME,
    UploadState::NAME,
    ActionQueue::NAME,
    StateSync::NAME,
    ErrorBoundary::NAME,
];

/// Register every stock widget in `env`'s registry.
///
/// Stops at the first failure, which names the primitive.
pub fn register_all(env: &HostEnv, timings: WidgetTimings) -> Result<(), RegistryError> {
    let adapters: [(&str, Arc<dyn Adapter>); 8] = [
        (Counter::NAME, Arc::new(Counter)),
        (Wizard::NAME, Arc::new(Wizard)),
        (Grid::NAME, Arc::new(Grid)),
        (DraftStore::NAME, Arc::new(DraftStore::new(timings))),
        (UploadState::NAME, Arc::new(UploadState::new(timings))),
        (ActionQueue::NAME, Arc::new(ActionQueue::new(timings))),
        (StateSync::NAME, Arc::new(StateSync)),
        (ErrorBoundary::NAME, Arc::new(ErrorBoundary)),
    ];
    for (name, adapter) in adapters {
        register_primitive(env, name, adapter)?;
    }
    tracing::debug!(count = PRIMITIVES.len(), "chirp.widgets.registered");
    Ok(())
}
