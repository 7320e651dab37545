use overlay_logging::overlay_debug;
use serde_json::Value;

const STATE_MARKER: &str = "window.__INITIAL_STATE__";
const SCRIPT_CLOSE: &str = "</script>";

/// Pulls the embedded `window.__INITIAL_STATE__ = {...}` payload out of raw
/// page text. The payload runs from the `{` after the assignment to the last
/// `}` before the closing script tag and may span multiple lines; only the
/// first marker occurrence is considered. Returns an empty object when the
/// marker is missing or the payload does not parse; never fails outward.
pub fn extract_initial_state(page_text: &str, url: &str) -> Value {
    match try_extract(page_text) {
        Some(state) => {
            overlay_debug!("Fetched initial state from {url}");
            state
        }
        None => {
            overlay_debug!("No initial state found in {url}");
            Value::Object(Default::default())
        }
    }
}

fn try_extract(page_text: &str) -> Option<Value> {
    let marker = page_text.find(STATE_MARKER)?;
    let after = page_text[marker + STATE_MARKER.len()..].trim_start();
    let after = after.strip_prefix('=')?.trim_start();
    if !after.starts_with('{') {
        return None;
    }
    let close = after.find(SCRIPT_CLOSE)?;
    let payload = &after[..close];
    let end = payload.rfind('}')?;
    serde_json::from_str(&payload[..=end]).ok()
}
