//! Outbound adapters (driven side).

pub mod publisher;
pub mod webdriver;
