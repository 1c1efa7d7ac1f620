use crate::js::{js_string, prop_string, truthy};
use crate::timings::WidgetTimings;
use crate::wiring::{Bindings, MountTimers, Reporter, fields};
use chirp_dom::{DomEvent, Element, TimerId};
use chirp_foundation::read_props;
use chirp_protocol::{
    ActionStatus, Adapter, Cleanup, KeyValueStore, MountContext, Props, StoreError,
};
use chrono::{DateTime, Local, SecondsFormat, Utc};
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

/// Key prefix of every stored draft.
pub const DRAFT_PREFIX: &str = "chirp:draft:";

/// Saved-at text shown when no draft was ever saved.
const NEVER: &str = "never";

/// A stored draft, as kept in the key-value store under
/// `chirp:draft:<draftKey>`.
///
/// Drafts written by earlier page scripts use the same layout and restore
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    /// ISO-8601 UTC timestamp with milliseconds.
    pub saved_at: String,
    /// Field name to value, in form order.
    pub data: IndexMap<String, String>,
}

/// `draft_store`: autosaves form fields to the key-value store and restores
/// them on mount.
///
/// Props: `draftKey` (default `"draft"`). Markup: `data-draft-field`
/// controls (keyed by `name`, else by the attribute value) and an optional
/// `data-draft-saved-at` node. Saves after a quiet period following the
/// last input.
#[derive(Debug, Clone, Copy, Default)]
pub struct DraftStore {
    timings: WidgetTimings,
}

impl DraftStore {
    /// Registered primitive name.
    pub const NAME: &'static str = "draft_store";

    /// A draft store with the given timings.
    pub fn new(timings: WidgetTimings) -> Self {
        Self { timings }
    }
}

fn field_key(field: &Element) -> Option<String> {
    field
        .attribute("name")
        .filter(|key| !key.is_empty())
        .or_else(|| field.attribute("data-draft-field"))
        .filter(|key| !key.is_empty())
}

/// Local wall-clock time of an ISO timestamp, or `Invalid Date`.
fn saved_at_text(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(at) => at.with_timezone(&Local).format("%H:%M:%S").to_string(),
        Err(_) => "Invalid Date".to_owned(),
    }
}

struct Draft {
    draft_key: String,
    storage_key: String,
    fields: Vec<Element>,
    saved_node: Option<Element>,
    store: Arc<dyn KeyValueStore>,
    reporter: Reporter,
    timers: MountTimers,
    debounce: Duration,
    pending: Mutex<Option<TimerId>>,
}

impl Draft {
    fn write_saved_at(&self, iso: Option<&str>) {
        if let Some(node) = &self.saved_node {
            node.set_text_content(&iso.map_or_else(|| NEVER.to_owned(), saved_at_text));
        }
    }

    fn snapshot(&self) -> IndexMap<String, String> {
        let mut data = IndexMap::new();
        for field in &self.fields {
            if let Some(key) = field_key(field) {
                data.insert(key, field.value().unwrap_or_default());
            }
        }
        data
    }

    fn persist(&self) {
        let record = DraftRecord {
            saved_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            data: self.snapshot(),
        };
        let saved = serde_json::to_string(&record)
            .map_err(|err| StoreError::Serialization(err.to_string()))
            .and_then(|raw| self.store.set(&self.storage_key, raw));
        if let Err(err) = saved {
            tracing::warn!(key = %self.storage_key, error = %err, "chirp.draft.save_failed");
            self.reporter.action(
                "save",
                ActionStatus::Error,
                fields(json!({ "draftKey": self.draft_key })),
            );
            return;
        }
        self.write_saved_at(Some(&record.saved_at));
        self.reporter.state(json!({
            "draftKey": self.draft_key,
            "savedAt": record.saved_at,
            "keys": record.data.keys().collect::<Vec<_>>(),
        }));
        self.reporter.action(
            "save",
            ActionStatus::Success,
            fields(json!({ "draftKey": self.draft_key })),
        );
    }

    fn schedule(self: &Arc<Self>) {
        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            self.timers.clear(previous);
        }
        let draft = Arc::clone(self);
        *pending = self.timers.timeout(self.debounce, move || draft.persist());
    }

    fn restore(&self) {
        let raw = match self.store.get(&self.storage_key) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(key = %self.storage_key, error = %err, "chirp.draft.load_failed");
                None
            }
        };
        let Some(raw) = raw else {
            self.write_saved_at(None);
            return;
        };
        let Some((data, saved_at)) = parse_stored(&raw) else {
            tracing::debug!(key = %self.storage_key, "chirp.draft.unreadable");
            self.write_saved_at(None);
            return;
        };
        for field in &self.fields {
            let Some(key) = field_key(field) else {
                continue;
            };
            if field.value().is_none() {
                continue;
            }
            if let Some(value) = data.get(&key) {
                field.set_value(&js_string(value));
            }
        }
        self.write_saved_at(saved_at.as_deref());
        self.reporter.state(json!({
            "draftKey": self.draft_key,
            "restored": true,
        }));
    }
}

/// Loosely read a stored draft: its data fields and saved-at text.
/// `None` when the value is not a draft object at all.
fn parse_stored(raw: &str) -> Option<(Props, Option<String>)> {
    let Value::Object(record) = serde_json::from_str::<Value>(raw).ok()? else {
        return None;
    };
    let data = match record.get("data") {
        Some(Value::Object(data)) => data.clone(),
        Some(other) if truthy(Some(other)) => return None,
        _ => Props::new(),
    };
    let saved_at = record
        .get("savedAt")
        .filter(|value| truthy(Some(value)))
        .map(js_string);
    Some((data, saved_at))
}

impl Adapter for DraftStore {
    fn mount(&self, ctx: MountContext) -> Option<Cleanup> {
        let props = read_props(&ctx.payload);
        let root = ctx.payload.element();
        let draft_key = prop_string(&props, "draftKey", "draft");
        let timers = MountTimers::new(ctx.window.timers());
        let draft = Arc::new(Draft {
            storage_key: format!("{DRAFT_PREFIX}{draft_key}"),
            draft_key,
            fields: root.query_selector_all("data-draft-field"),
            saved_node: root.query_selector("data-draft-saved-at"),
            store: Arc::clone(&ctx.store),
            reporter: Reporter::new(&ctx),
            timers: timers.clone(),
            debounce: self.timings.draft_debounce(),
            pending: Mutex::new(None),
        });

        let mut bindings = Bindings::new().with_timers(&timers);
        for field in &draft.fields {
            let on_input = Arc::clone(&draft);
            bindings.listen(field.events(), "input", move |_: &DomEvent| {
                on_input.schedule()
            });
        }
        draft.restore();

        Some(bindings.into_cleanup())
    }
}
