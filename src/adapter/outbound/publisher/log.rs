use async_trait::async_trait;
use tracing::info;

use crate::error::PublishError;
use crate::port::{Destination, Publisher};

/// Writes messages to the log instead of sending them. Used for dry runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPublisher;

#[async_trait]
impl Publisher for LogPublisher {
    async fn send(&self, destination: &Destination, text: &str) -> Result<(), PublishError> {
        info!(destination = %destination, message = %text, "Dry run, message not sent");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
