//! Diagnostic check command handlers.

pub mod config;
pub mod telegram;
