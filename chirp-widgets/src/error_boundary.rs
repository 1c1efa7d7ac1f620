use crate::js::{js_string, truthy};
use crate::wiring::{Bindings, Reporter};
use chirp_dom::{DomEvent, Element};
use chirp_foundation::read_props;
use chirp_protocol::{Adapter, Cleanup, ERROR_EVENT, IslandIdentity, MountContext, Props};
use serde_json::{Value, json};
use std::sync::Arc;

/// `error_boundary`: swaps its body for a fallback when an island reports
/// an error.
///
/// Props: `boundaryId` (defaults to the payload id, then the name).
/// Markup: `data-error-fallback`, `data-error-body`, `data-error-reset`.
///
/// Listens for `chirp:island:error` on the document. A signal with an `id`
/// only reaches the boundary with that id (when the boundary has one); a
/// signal naming another island is ignored unless it carries the `error`
/// marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorBoundary;

impl ErrorBoundary {
    /// Registered primitive name.
    pub const NAME: &'static str = "error_boundary";
}

/// Whether an error signal with `detail` is meant for the boundary mounted
/// as `boundary`.
pub fn boundary_accepts(boundary: &IslandIdentity, detail: &Props) -> bool {
    let own_id = boundary.id().filter(|id| !id.is_empty());
    if let (Some(target), Some(own)) = (detail.get("id"), own_id) {
        if truthy(Some(target)) && target.as_str() != Some(own) {
            return false;
        }
    }
    if let Some(name) = detail.get("name").filter(|name| truthy(Some(name))) {
        if name.as_str() != Some(boundary.name()) && !truthy(detail.get("error")) {
            return false;
        }
    }
    true
}

struct Boundary {
    boundary_id: String,
    fallback: Option<Element>,
    body: Option<Element>,
    reporter: Reporter,
}

impl Boundary {
    fn show(&self, failed: bool) {
        if let Some(fallback) = &self.fallback {
            fallback.set_hidden(!failed);
        }
        if let Some(body) = &self.body {
            body.set_hidden(failed);
        }
        let state = if failed { "error" } else { "healthy" };
        self.reporter.state(json!({
            "boundaryId": self.boundary_id,
            "state": state,
        }));
    }

    fn on_error(&self, event: &DomEvent) {
        let detail = match event.detail() {
            Some(Value::Object(detail)) => detail.clone(),
            _ => Props::new(),
        };
        if boundary_accepts(self.reporter.identity(), &detail) {
            tracing::debug!(boundary = %self.boundary_id, "chirp.boundary.fallback");
            self.show(true);
        }
    }
}

impl Adapter for ErrorBoundary {
    fn mount(&self, ctx: MountContext) -> Option<Cleanup> {
        let props = read_props(&ctx.payload);
        let root = ctx.payload.element();
        let boundary_id = props
            .get("boundaryId")
            .filter(|id| truthy(Some(id)))
            .map(js_string)
            .or_else(|| ctx.payload.id().filter(|id| !id.is_empty()).map(str::to_owned))
            .unwrap_or_else(|| ctx.payload.name().to_owned());
        let reset = root.query_selector("data-error-reset");
        let boundary = Arc::new(Boundary {
            boundary_id,
            fallback: root.query_selector("data-error-fallback"),
            body: root.query_selector("data-error-body"),
            reporter: Reporter::new(&ctx),
        });

        let mut bindings = Bindings::new();
        let on_error = Arc::clone(&boundary);
        bindings.listen(
            ctx.window.document().events(),
            ERROR_EVENT,
            move |event: &DomEvent| on_error.on_error(event),
        );
        let on_reset = Arc::clone(&boundary);
        bindings.on(reset.as_ref(), "click", move |_: &DomEvent| {
            on_reset.show(false)
        });
        boundary.show(false);

        Some(bindings.into_cleanup())
    }
}
