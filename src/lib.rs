//! Pricebeacon - token price watcher for Telegram channels.
//!
//! Loads a JavaScript-rendered page through a WebDriver browser, extracts the
//! token price with an ordered list of selector strategies, and publishes a
//! short update message when the price moves or a heartbeat elapses.
//!
//! # Architecture
//!
//! - [`domain`] - Pure logic: truncation, market cap, debounce, message text
//! - [`port`] - Renderer and publisher traits
//! - [`application`] - Extraction, the watch cycle, and the poll loop
//! - [`adapter`] - WebDriver renderer, Telegram and log publishers, CLI
//! - [`infrastructure`] - Configuration and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `telegram` (default) - Telegram publisher via teloxide
//! - `testkit` - Scripted renderer and recording publisher for tests
//!
//! # Example
//!
//! ```no_run
//! use pricebeacon::domain::{format_display, MarketCap};
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(format_display(dec!(0.123456789), 5), "0.12345");
//! assert_eq!(MarketCap::compute(dec!(0.5), 1_000_000_000).formatted, "$500.00M");
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
