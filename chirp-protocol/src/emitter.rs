//! The emission seam.

use crate::event::{EventKind, IslandEvent};
use crate::payload::IslandIdentity;

/// Something that can deliver island events.
///
/// Two implementations exist: [`HostApi`](crate::HostApi) calls host
/// callbacks directly with the semantic arguments, and the foundation's
/// broadcaster dispatches custom events on the page. The event channel
/// picks one per emission by asking [`Emitter::supports`].
pub trait Emitter: Send + Sync {
    /// Whether this emitter handles events of `kind`.
    fn supports(&self, kind: EventKind) -> bool;

    /// Deliver `event` on behalf of the island `source`.
    fn emit(&self, source: &IslandIdentity, event: &IslandEvent);
}
