#![deny(missing_docs)]
//! Lifecycle-and-event foundation every chirp island depends on.
//!
//! Four operations make up the whole surface an island sees:
//!
//! - [`read_props`]: the props bag, or an empty one when malformed
//! - [`register_primitive`]: put an adapter into the host's registry
//! - [`EventChannel::set_state`] / [`set_action`](EventChannel::set_action) /
//!   [`set_error`](EventChannel::set_error): report transitions
//! - the [`Cleanup`](chirp_protocol::Cleanup) a mount returns, which the
//!   host hands to a [`CleanupLedger`]
//!
//! The foundation is synchronous and never retries. It does not touch
//! elements: the channel only calls host callbacks or dispatches events.

mod channel;
mod env;
mod ledger;
mod props;

pub use channel::{Broadcaster, EventChannel};
pub use env::{HostEnv, register_primitive};
pub use ledger::CleanupLedger;
pub use props::read_props;
