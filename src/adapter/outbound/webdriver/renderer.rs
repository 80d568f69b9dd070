//! [`Renderer`] backed by a WebDriver session per page.
//!
//! Every `load` opens a fresh browser session and every page release deletes
//! it, so nothing browser-side survives between cycles. A session that was
//! created but failed to navigate is deleted before the error is returned.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use tokio::time::{self, Instant};
use tracing::{debug, warn};

use crate::error::RenderError;
use crate::port::{Element, Page, Renderer};

use super::protocol::{capabilities, element_ids, WireClient};
use super::settings::WebDriverConfig;

/// Extra time granted to the driver beyond its own page-load timeout.
const NAVIGATION_GRACE: Duration = Duration::from_secs(5);

/// Renders pages through a W3C WebDriver endpoint.
pub struct WebDriverRenderer {
    wire: WireClient,
    config: WebDriverConfig,
}

impl WebDriverRenderer {
    pub fn new(config: WebDriverConfig) -> Result<Self, RenderError> {
        let wire = WireClient::new(
            &config.url,
            Duration::from_millis(config.request_timeout_ms),
        )?;
        Ok(Self { wire, config })
    }

    async fn open_session(&self) -> Result<String, RenderError> {
        let value = self
            .wire
            .call(
                Method::POST,
                "/session",
                Some(capabilities(&self.config)),
                "new session",
            )
            .await?;
        value
            .get("sessionId")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| RenderError::Protocol("new session: missing sessionId".into()))
    }

    async fn navigate(&self, session: &str, url: &str, timeout: Duration) -> Result<(), RenderError> {
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.wire
            .call(
                Method::POST,
                &format!("/session/{session}/timeouts"),
                Some(json!({ "pageLoad": timeout_ms })),
                "set timeouts",
            )
            .await?;

        let path = format!("/session/{session}/url");
        let navigate = self.wire.call(
            Method::POST,
            &path,
            Some(json!({ "url": url })),
            "navigate",
        );
        match time::timeout(timeout + NAVIGATION_GRACE, navigate).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(RenderError::Timeout { operation, .. })) => Err(RenderError::Timeout {
                operation,
                timeout_ms,
            }),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(RenderError::Timeout {
                operation: "navigate",
                timeout_ms,
            }),
        }
    }
}

#[async_trait]
impl Renderer for WebDriverRenderer {
    async fn load(&self, url: &str, timeout: Duration) -> Result<Box<dyn Page>, RenderError> {
        let session = self.open_session().await?;
        debug!(session = %session, url, "WebDriver session opened");

        let page = WebDriverPage {
            wire: self.wire.clone(),
            session,
            poll_interval: Duration::from_millis(self.config.poll_interval_ms),
        };

        let navigated = self.navigate(&page.session, url, timeout).await;
        if let Err(e) = navigated {
            Box::new(page).release().await;
            return Err(e);
        }
        Ok(Box::new(page))
    }
}

/// A loaded page inside one WebDriver session.
struct WebDriverPage {
    wire: WireClient,
    session: String,
    poll_interval: Duration,
}

impl WebDriverPage {
    async fn find(&self, selector: &str) -> Result<Vec<String>, RenderError> {
        let value = self
            .wire
            .call(
                Method::POST,
                &format!("/session/{}/elements", self.session),
                Some(json!({ "using": "css selector", "value": selector })),
                "find elements",
            )
            .await?;
        Ok(element_ids(&value))
    }
}

#[async_trait]
impl Page for WebDriverPage {
    async fn query_all(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Vec<Box<dyn Element>>, RenderError> {
        let deadline = Instant::now() + timeout;
        loop {
            let ids = self.find(selector).await?;
            if !ids.is_empty() {
                return Ok(ids
                    .into_iter()
                    .map(|id| {
                        Box::new(WebDriverElement {
                            wire: self.wire.clone(),
                            session: self.session.clone(),
                            id,
                        }) as Box<dyn Element>
                    })
                    .collect());
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(RenderError::NotFound {
                    selector: selector.to_string(),
                });
            }
            time::sleep(self.poll_interval.min(deadline - now)).await;
        }
    }

    async fn release(self: Box<Self>) {
        let result = self
            .wire
            .call(
                Method::DELETE,
                &format!("/session/{}", self.session),
                None,
                "delete session",
            )
            .await;
        match result {
            Ok(_) => debug!(session = %self.session, "WebDriver session closed"),
            Err(e) => warn!(session = %self.session, error = %e, "Failed to close WebDriver session"),
        }
    }
}

struct WebDriverElement {
    wire: WireClient,
    session: String,
    id: String,
}

#[async_trait]
impl Element for WebDriverElement {
    async fn text(&self) -> Result<String, RenderError> {
        let value = self
            .wire
            .call(
                Method::GET,
                &format!("/session/{}/element/{}/text", self.session, self.id),
                None,
                "element text",
            )
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }
}
