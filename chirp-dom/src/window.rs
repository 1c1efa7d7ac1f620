//! The page: document, window, location, and history.

use crate::element::Element;
use crate::error::DomError;
use crate::event::EventTarget;
use crate::timer::Timers;
use parking_lot::Mutex;
use std::sync::Arc;
use url::Url;

/// The document: a body element plus a document-scoped listener list.
#[derive(Clone, Debug)]
pub struct Document {
    body: Element,
    events: EventTarget,
}

impl Document {
    /// Create a document with an empty body.
    pub fn new() -> Self {
        Self {
            body: Element::new("body"),
            events: EventTarget::new(),
        }
    }

    /// The body element.
    pub fn body(&self) -> &Element {
        &self.body
    }

    /// Document-scoped listeners.
    pub fn events(&self) -> &EventTarget {
        &self.events
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

struct WindowInner {
    document: Document,
    events: EventTarget,
    timers: Timers,
    location: Mutex<Url>,
    history: Mutex<Vec<String>>,
}

/// The window: owns the document, window-scoped listeners, the current
/// location with its history stack, and the timer table.
///
/// Cloning yields another handle to the same window.
#[derive(Clone)]
pub struct Window {
    inner: Arc<WindowInner>,
}

impl Window {
    /// Create a window at `href`. Timers bind to the current tokio runtime.
    pub fn new(href: &str) -> Result<Self, DomError> {
        let url = Url::parse(href).map_err(|source| DomError::InvalidLocation {
            href: href.to_owned(),
            source,
        })?;
        Ok(Self {
            inner: Arc::new(WindowInner {
                document: Document::new(),
                events: EventTarget::new(),
                timers: Timers::new(),
                history: Mutex::new(vec![url.to_string()]),
                location: Mutex::new(url),
            }),
        })
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.inner.document
    }

    /// Window-scoped listeners.
    pub fn events(&self) -> &EventTarget {
        &self.inner.events
    }

    /// The timer table.
    pub fn timers(&self) -> &Timers {
        &self.inner.timers
    }

    /// A copy of the current location.
    pub fn location(&self) -> Url {
        self.inner.location.lock().clone()
    }

    /// The current location as a string.
    pub fn href(&self) -> String {
        self.inner.location.lock().to_string()
    }

    /// First value of query parameter `name`, if present.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.inner
            .location
            .lock()
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Replace the current history entry without navigating.
    pub fn replace_state(&self, url: Url) {
        let href = url.to_string();
        *self.inner.location.lock() = url;
        let mut history = self.inner.history.lock();
        match history.last_mut() {
            Some(current) => *current = href,
            None => history.push(href),
        }
    }

    /// Push a new history entry without navigating.
    pub fn push_state(&self, url: Url) {
        let href = url.to_string();
        *self.inner.location.lock() = url;
        self.inner.history.lock().push(href);
    }

    /// Number of history entries.
    pub fn history_len(&self) -> usize {
        self.inner.history.lock().len()
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("href", &self.href())
            .field("timers", &self.inner.timers.pending())
            .finish()
    }
}
