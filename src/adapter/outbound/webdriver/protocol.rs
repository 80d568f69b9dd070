//! W3C WebDriver wire format.
//!
//! Only the handful of commands the renderer needs: new session, timeouts,
//! navigate, find elements, element text, delete session.

use std::time::Duration;

use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::RenderError;

use super::settings::{Browser, WebDriverConfig};

/// Key under which the driver returns element references.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

#[derive(Debug, Deserialize)]
struct Envelope {
    value: Value,
}

#[derive(Debug, Deserialize)]
struct WireError {
    error: String,
    #[serde(default)]
    message: String,
}

/// Build the `capabilities` body for a new session.
#[must_use]
pub fn capabilities(config: &WebDriverConfig) -> Value {
    let options = match config.browser {
        Browser::Chrome => {
            let mut args = vec![
                format!(
                    "--window-size={},{}",
                    config.window_width, config.window_height
                ),
                format!("--user-agent={}", config.user_agent),
                "--disable-gpu".to_string(),
                "--no-sandbox".to_string(),
            ];
            if config.headless {
                args.insert(0, "--headless=new".to_string());
            }
            json!({ "goog:chromeOptions": { "args": args } })
        }
        Browser::Firefox => {
            let mut args = vec![
                format!("--width={}", config.window_width),
                format!("--height={}", config.window_height),
            ];
            if config.headless {
                args.insert(0, "-headless".to_string());
            }
            json!({
                "moz:firefoxOptions": {
                    "args": args,
                    "prefs": { "general.useragent.override": config.user_agent }
                }
            })
        }
    };

    let mut always_match = json!({
        "browserName": config.browser.to_string(),
        "pageLoadStrategy": "eager",
    });
    if let (Some(target), Some(extra)) = (always_match.as_object_mut(), options.as_object()) {
        target.extend(extra.clone());
    }

    json!({ "capabilities": { "alwaysMatch": always_match } })
}

/// Thin HTTP wrapper that unwraps the `{"value": ...}` envelope.
#[derive(Debug, Clone)]
pub struct WireClient {
    http: Client,
    base: String,
    timeout_ms: u64,
}

impl WireClient {
    pub fn new(base: &str, request_timeout: Duration) -> Result<Self, RenderError> {
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| RenderError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base: base.trim_end_matches('/').to_string(),
            timeout_ms: u64::try_from(request_timeout.as_millis()).unwrap_or(u64::MAX),
        })
    }

    /// Issue a command. `operation` labels timeouts and protocol errors.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        operation: &'static str,
    ) -> Result<Value, RenderError> {
        let url = format!("{}{}", self.base, path);
        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(operation, &e, self.timeout_ms))?;
        let status = response.status();
        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| RenderError::Protocol(format!("{operation}: malformed response: {e}")))?;

        if status.is_success() {
            return Ok(envelope.value);
        }

        Err(match serde_json::from_value::<WireError>(envelope.value) {
            Ok(wire) => classify(operation, &wire.error, &wire.message, self.timeout_ms),
            Err(_) => RenderError::Protocol(format!("{operation}: HTTP {status}")),
        })
    }
}

/// Map a failed HTTP exchange onto [`RenderError`].
fn transport_error(operation: &'static str, err: &reqwest::Error, timeout_ms: u64) -> RenderError {
    if err.is_timeout() {
        RenderError::Timeout {
            operation,
            timeout_ms,
        }
    } else {
        RenderError::Network(format!("{operation}: {err}"))
    }
}

/// Map a WebDriver error code onto [`RenderError`].
///
/// `timeout_ms` is the limit the command ran under.
#[must_use]
pub fn classify(
    operation: &'static str,
    code: &str,
    message: &str,
    timeout_ms: u64,
) -> RenderError {
    match code {
        "timeout" | "script timeout" => RenderError::Timeout {
            operation,
            timeout_ms,
        },
        "no such element" => RenderError::NotFound {
            selector: message.to_string(),
        },
        _ => RenderError::Protocol(format!("{operation}: {code}: {message}")),
    }
}

/// Extract element ids from a find-elements response.
#[must_use]
pub fn element_ids(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get(ELEMENT_KEY).and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
