//! Renderer port for rendered-page access.
//!
//! A renderer loads a URL in a real browsing context and lets callers query
//! the resulting DOM. Pages are acquired per cycle and must be handed back
//! through [`Page::release`] on every path.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::RenderError;

/// Loads pages.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Open `url` and wait until the document is loaded or `timeout` expires.
    async fn load(&self, url: &str, timeout: Duration) -> Result<Box<dyn Page>, RenderError>;
}

/// A loaded page holding a browsing context.
#[async_trait]
pub trait Page: Send + Sync {
    /// Wait up to `timeout` for at least one element matching `selector`
    /// and return all current matches.
    ///
    /// Returns [`RenderError::NotFound`] or [`RenderError::Timeout`] when
    /// nothing matches in time.
    async fn query_all(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Vec<Box<dyn Element>>, RenderError>;

    /// Tear down the browsing context. Failures are logged by the adapter.
    async fn release(self: Box<Self>);
}

/// A rendered element.
#[async_trait]
pub trait Element: Send + Sync {
    /// Visible text content.
    async fn text(&self) -> Result<String, RenderError>;
}
