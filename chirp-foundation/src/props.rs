use chirp_protocol::{MountPayload, Props};
use serde_json::Value;

/// The payload's props when they are a JSON object; otherwise empty.
///
/// Adapters call this instead of touching raw props so a missing or
/// malformed props field never crashes a mount.
pub fn read_props(payload: &MountPayload) -> Props {
    match payload.raw_props() {
        Some(Value::Object(props)) => props.clone(),
        _ => Props::new(),
    }
}
