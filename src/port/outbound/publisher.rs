//! Publisher port for channel messages.

use std::fmt;

use async_trait::async_trait;

use crate::error::PublishError;

/// Where messages go: a channel username (`@name`) or a numeric chat id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination(String);

impl Destination {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric chat id, if the destination is one.
    #[must_use]
    pub fn numeric_id(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sends text to a destination.
///
/// Unlike a fire-and-forget notifier, the result is returned so the caller
/// can undo its publish bookkeeping when delivery fails.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn send(&self, destination: &Destination, text: &str) -> Result<(), PublishError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_destination() {
        let dest = Destination::new(" -1001234567890 ");
        assert_eq!(dest.as_str(), "-1001234567890");
        assert_eq!(dest.numeric_id(), Some(-1_001_234_567_890));
    }

    #[test]
    fn username_destination() {
        let dest = Destination::new("@price_FPIBANK");
        assert_eq!(dest.numeric_id(), None);
        assert_eq!(dest.to_string(), "@price_FPIBANK");
    }
}
