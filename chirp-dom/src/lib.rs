#![deny(missing_docs)]
//! # chirp-dom: the host page islands are mounted into
//!
//! A small, thread-safe model of the parts of a browser page an island
//! touches:
//!
//! | Piece | Type | What it does |
//! |-------|------|-------------|
//! | Elements | [`Element`] | Attributes, text, form value, children, listeners |
//! | Targets | [`EventTarget`] | Ordered listener list with handle-based removal |
//! | Page | [`Window`], [`Document`] | The two broadcast targets, location and history |
//! | Timers | [`Timers`] | `set_timeout` / `set_interval` backed by tokio tasks |
//!
//! Every element carries a stable [`ElementId`] assigned at creation. It is
//! the key other crates use to associate per-element state without holding
//! the element alive (see [`WeakElement`]).
//!
//! Selectors are attribute names: `query_selector("data-counter-value")`
//! matches descendants carrying that attribute, in document order.

pub mod element;
pub mod error;
pub mod event;
pub mod id;
pub mod timer;
pub mod window;

pub use element::{Element, WeakElement};
pub use error::DomError;
pub use event::{DomEvent, EventTarget, Listener};
pub use id::{ElementId, ListenerId, TimerId};
pub use timer::Timers;
pub use window::{Document, Window};
