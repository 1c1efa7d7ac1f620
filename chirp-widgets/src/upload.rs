use crate::js::prop_string;
use crate::timings::WidgetTimings;
use crate::wiring::{Bindings, MountTimers, Reporter, fields};
use chirp_dom::{DomEvent, Element, TimerId};
use chirp_foundation::read_props;
use chirp_protocol::{ActionStatus, Adapter, Cleanup, MountContext};
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;

/// `upload_state`: simulated file upload with a progress bar.
///
/// Props: `stateKey` (default `"upload"`), `endpoint` (default
/// `"/upload"`). Markup: `data-upload-input` file input, `data-upload-start`
/// button, `data-upload-progress`, `data-upload-status`. Nothing is sent
/// anywhere; progress advances on a timer until it reaches 100%.
#[derive(Debug, Clone, Copy, Default)]
pub struct UploadState {
    timings: WidgetTimings,
}

impl UploadState {
    /// Registered primitive name.
    pub const NAME: &'static str = "upload_state";

    /// An upload simulation with the given pacing.
    pub fn new(timings: WidgetTimings) -> Self {
        Self { timings }
    }
}

#[derive(Default)]
struct Progress {
    percent: u8,
    ticker: Option<TimerId>,
}

struct Upload {
    state_key: String,
    endpoint: String,
    input: Option<Element>,
    start: Option<Element>,
    progress_node: Option<Element>,
    status: Option<Element>,
    reporter: Reporter,
    timers: MountTimers,
    timings: WidgetTimings,
    progress: Mutex<Progress>,
}

impl Upload {
    fn file_count(&self) -> usize {
        self.input.as_ref().map_or(0, |input| input.files().len())
    }

    fn write(&self, percent: u8, message: &str) {
        if let Some(node) = &self.progress_node {
            node.set_value(&percent.to_string());
        }
        if let Some(status) = &self.status {
            status.set_text_content(message);
        }
        self.reporter.state(json!({
            "stateKey": self.state_key,
            "endpoint": self.endpoint,
            "percent": percent,
            "message": message,
            "files": self.file_count(),
        }));
    }

    fn set_start_enabled(&self, enabled: bool) {
        if let Some(start) = &self.start {
            if enabled {
                start.remove_attribute("disabled");
            } else {
                start.set_attribute("disabled", "disabled");
            }
        }
    }

    fn run(self: &Arc<Self>) {
        let files = self.file_count();
        if files == 0 {
            self.reporter.action(
                "upload",
                ActionStatus::Error,
                fields(json!({ "reason": "no_files" })),
            );
            self.write(0, "Select at least one file.");
            return;
        }
        self.progress.lock().percent = 0;
        self.set_start_enabled(false);
        self.reporter.action(
            "upload",
            ActionStatus::Pending,
            fields(json!({ "endpoint": self.endpoint, "files": files })),
        );
        self.write(0, "Uploading...");

        let upload = Arc::clone(self);
        let ticker = self
            .timers
            .interval(self.timings.upload_tick(), move || upload.tick(files));
        match ticker {
            Some(id) => self.progress.lock().ticker = Some(id),
            None => self.set_start_enabled(true),
        }
    }

    fn tick(&self, files: usize) {
        let step = self.timings.upload_step_percent.max(1);
        let (percent, finished) = {
            let mut progress = self.progress.lock();
            progress.percent = progress.percent.saturating_add(step).min(100);
            let finished = if progress.percent >= 100 {
                progress.ticker.take()
            } else {
                None
            };
            (progress.percent, finished)
        };
        self.write(percent, &format!("Uploading... {percent}%"));
        if let Some(ticker) = finished {
            self.timers.clear(ticker);
            self.set_start_enabled(true);
            self.write(100, &format!("Uploaded to {}", self.endpoint));
            self.reporter.action(
                "upload",
                ActionStatus::Success,
                fields(json!({ "endpoint": self.endpoint, "files": files })),
            );
        }
    }
}

impl Adapter for UploadState {
    fn mount(&self, ctx: MountContext) -> Option<Cleanup> {
        let props = read_props(&ctx.payload);
        let root = ctx.payload.element();
        let timers = MountTimers::new(ctx.window.timers());
        let upload = Arc::new(Upload {
            state_key: prop_string(&props, "stateKey", "upload"),
            endpoint: prop_string(&props, "endpoint", "/upload"),
            input: root.query_selector("data-upload-input"),
            start: root.query_selector("data-upload-start"),
            progress_node: root.query_selector("data-upload-progress"),
            status: root.query_selector("data-upload-status"),
            reporter: Reporter::new(&ctx),
            timers: timers.clone(),
            timings: self.timings,
            progress: Mutex::new(Progress::default()),
        });

        let mut bindings = Bindings::new().with_timers(&timers);
        let on_start = Arc::clone(&upload);
        bindings.on(upload.start.as_ref(), "click", move |_: &DomEvent| {
            on_start.run()
        });
        upload.write(0, "Idle");

        Some(bindings.into_cleanup())
    }
}
