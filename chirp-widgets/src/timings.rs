use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delays and pacing used by the timed widgets.
///
/// Every field has a default, so a partial JSON object is a valid
/// configuration:
///
/// ```
/// use chirp_widgets::WidgetTimings;
///
/// let timings: WidgetTimings = serde_json::from_str(r#"{"action_delay_ms": 10}"#).unwrap();
/// assert_eq!(timings.action_delay_ms, 10);
/// assert_eq!(timings.draft_debounce_ms, 250);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetTimings {
    /// Quiet period after the last keystroke before a draft is saved.
    pub draft_debounce_ms: u64,
    /// How long the simulated action takes.
    pub action_delay_ms: u64,
    /// Interval between simulated upload progress ticks.
    pub upload_tick_ms: u64,
    /// Progress added per upload tick, in percent.
    pub upload_step_percent: u8,
}

impl WidgetTimings {
    /// The stock timings.
    pub fn new() -> Self {
        Self {
            draft_debounce_ms: 250,
            action_delay_ms: 450,
            upload_tick_ms: 120,
            upload_step_percent: 15,
        }
    }

    /// Override the draft debounce.
    pub fn with_draft_debounce_ms(mut self, ms: u64) -> Self {
        self.draft_debounce_ms = ms;
        self
    }

    /// Override the simulated action delay.
    pub fn with_action_delay_ms(mut self, ms: u64) -> Self {
        self.action_delay_ms = ms;
        self
    }

    /// Override the upload pacing.
    pub fn with_upload(mut self, tick_ms: u64, step_percent: u8) -> Self {
        self.upload_tick_ms = tick_ms;
        self.upload_step_percent = step_percent;
        self
    }

    pub(crate) fn draft_debounce(&self) -> Duration {
        Duration::from_millis(self.draft_debounce_ms)
    }

    pub(crate) fn action_delay(&self) -> Duration {
        Duration::from_millis(self.action_delay_ms)
    }

    pub(crate) fn upload_tick(&self) -> Duration {
        Duration::from_millis(self.upload_tick_ms)
    }
}

impl Default for WidgetTimings {
    fn default() -> Self {
        Self::new()
    }
}
