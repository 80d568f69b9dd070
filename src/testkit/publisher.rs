//! Publisher that records messages instead of sending them.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::PublishError;
use crate::port::{Destination, Publisher};

/// One delivered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub destination: Destination,
    pub text: String,
}

/// Records successful sends; scripted failures are consumed first.
#[derive(Default)]
pub struct RecordingPublisher {
    sent: Mutex<Vec<SentMessage>>,
    failures: Mutex<VecDeque<PublishError>>,
    attempts: Mutex<u32>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `count` sends with a delivery error.
    pub fn fail_next(&self, count: usize) {
        let mut failures = self.failures.lock().unwrap();
        for _ in 0..count {
            failures.push_back(PublishError::Delivery("scripted failure".into()));
        }
    }

    /// Fail the next send with `error`.
    pub fn fail_with(&self, error: PublishError) {
        self.failures.lock().unwrap().push_back(error);
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|m| m.text).collect()
    }

    /// Sends attempted, including failed ones.
    pub fn attempts(&self) -> u32 {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn send(&self, destination: &Destination, text: &str) -> Result<(), PublishError> {
        *self.attempts.lock().unwrap() += 1;
        if let Some(error) = self.failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        self.sent.lock().unwrap().push(SentMessage {
            destination: destination.clone(),
            text: text.to_string(),
        });
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
