//! Recording implementations for testing.
//!
//! Available behind the `test-utils` feature flag. These are minimal
//! implementations that prove the contract is usable and let tests
//! assert on exactly what was emitted.

mod echo_adapter;
mod in_memory_store;
mod recording_host;
mod recording_listener;

pub use echo_adapter::EchoAdapter;
pub use in_memory_store::InMemoryStore;
pub use recording_host::{RecordedEmission, RecordingHost};
pub use recording_listener::RecordingListener;
