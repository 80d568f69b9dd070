//! Publisher adapters.
//!
//! Implements the `port::Publisher` trait for the supported backends.

mod log;

#[cfg(feature = "telegram")]
pub mod telegram;

#[cfg(test)]
mod tests;

pub use log::LogPublisher;
