//! Pure price-pipeline logic: formatting, capitalization, debounce and
//! message composition. Nothing in here performs I/O.

pub mod error;
pub mod format;
pub mod market_cap;
pub mod message;
pub mod observation;
pub mod update;

pub use error::DomainError;
pub use format::{format_display, truncate};
pub use market_cap::MarketCap;
pub use message::{FormattedMessage, MessageTemplate};
pub use observation::{Observation, Price};
pub use update::{DeciderState, Decision, DecisionPolicy, Indicator, UpdateDecider};
