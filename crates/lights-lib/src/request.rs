//! Batch light requests — one JSON object per line.
//!
//! ```text
//! # comment lines and blank lines are skipped
//! {"light": "notifications", "color": "#00FF00", "flash_mode": "timed", "flash_on_ms": 500, "flash_off_ms": 2000}
//! {"light": "attention", "color": "red"}
//! ```

use serde::{Deserialize, Serialize};

use crate::controller::LightController;
use crate::error::{LightsError, Result};
use crate::output::LedOutput;
use crate::state::LightState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightRequest {
    /// Light id (`"backlight"`, `"notifications"`, ...). Kept as text so an
    /// unknown id reaches the controller and is reported as unsupported.
    pub light: String,
    #[serde(flatten)]
    pub state: LightState,
}

/// Parse a JSON-lines batch. A bad line fails the whole batch.
pub fn parse_requests(input: &str) -> Result<Vec<LightRequest>> {
    let mut requests = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let req: LightRequest = serde_json::from_str(line)
            .map_err(|e| LightsError::Request(format!("line {}: {e}", i + 1)))?;
        requests.push(req);
    }
    Ok(requests)
}

/// Outcome of one request in a batch.
#[derive(Debug)]
pub struct Applied {
    pub request: LightRequest,
    pub result: Result<()>,
}

/// Apply requests in order. Unsupported lights don't stop the batch.
pub fn apply_requests<O: LedOutput>(
    controller: &LightController<O>,
    requests: Vec<LightRequest>,
) -> Vec<Applied> {
    requests
        .into_iter()
        .map(|request| {
            let result = controller.set_light_by_id(&request.light, &request.state);
            if let Err(ref e) = result {
                log::warn!("{}: {e}", request.light);
            }
            Applied { request, result }
        })
        .collect()
}
