//! Mount payloads and the context handed to an adapter's `mount`.

use crate::host::HostApi;
use crate::store::KeyValueStore;
use chirp_dom::{Element, ElementId, Window};
use serde_json::Value;
use std::sync::Arc;

/// A props bag: the JSON object an island was declared with.
pub type Props = serde_json::Map<String, Value>;

/// Describes one mounted element: which element, which primitive, and the
/// props it was declared with.
///
/// Built once per live element by the mounting host and immutable
/// afterwards; clones share the same element.
#[derive(Debug, Clone)]
pub struct MountPayload {
    element: Element,
    identity: IslandIdentity,
    props: Option<Value>,
}

/// The declared name, id and version of an island, without its element.
///
/// This is all an emission needs. Listeners and timer callbacks keep an
/// identity rather than the payload, so nothing they capture keeps the
/// mounted element alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IslandIdentity {
    name: String,
    id: Option<String>,
    version: Option<String>,
}

impl IslandIdentity {
    /// An identity with no id or version.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            version: None,
        }
    }

    /// Set the instance id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the declared version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Primitive name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Instance id, if declared.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Declared version, if any.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl MountPayload {
    /// A payload with no id, version, or props.
    pub fn new(element: Element, name: impl Into<String>) -> Self {
        Self {
            element,
            identity: IslandIdentity::new(name),
            props: None,
        }
    }

    /// Set the instance id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.identity.id = Some(id.into());
        self
    }

    /// Set the declared version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.identity.version = Some(version.into());
        self
    }

    /// Set the raw props value. Anything other than a JSON object reads
    /// back as empty props.
    pub fn with_props(mut self, props: Value) -> Self {
        self.props = Some(props);
        self
    }

    /// The element this island governs.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// The element's stable id; the key for per-element bookkeeping.
    pub fn element_id(&self) -> ElementId {
        self.element.id()
    }

    /// Name, id and version, detached from the element.
    pub fn identity(&self) -> &IslandIdentity {
        &self.identity
    }

    /// Primitive name.
    pub fn name(&self) -> &str {
        self.identity.name()
    }

    /// Instance id, if declared.
    pub fn id(&self) -> Option<&str> {
        self.identity.id()
    }

    /// Declared version, if any.
    pub fn version(&self) -> Option<&str> {
        self.identity.version()
    }

    /// The raw props value as declared, well-formed or not.
    pub fn raw_props(&self) -> Option<&Value> {
        self.props.as_ref()
    }
}

/// Everything an adapter receives at mount time.
///
/// Owned handles only, so adapters can move pieces into listeners and
/// timer callbacks.
#[non_exhaustive]
#[derive(Clone)]
pub struct MountContext {
    /// The mount payload.
    pub payload: MountPayload,
    /// Host callbacks overriding broadcast, if the host supplied any.
    pub api: Option<HostApi>,
    /// The page the element lives in.
    pub window: Window,
    /// The page's key-value store.
    pub store: Arc<dyn KeyValueStore>,
}

impl MountContext {
    /// Build a context without host callbacks.
    pub fn new(payload: MountPayload, window: Window, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            payload,
            api: None,
            window,
            store,
        }
    }

    /// Attach host callbacks.
    pub fn with_api(mut self, api: Option<HostApi>) -> Self {
        self.api = api;
        self
    }
}
