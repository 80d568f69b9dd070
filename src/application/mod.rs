//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the price watch.

pub mod context;
pub mod extractor;
pub mod poll;
pub mod scheduler;

pub use context::{CycleOutcome, WatchContext, WatchSettings};
pub use extractor::{
    parse_price_text, ExtractionStrategy, PlausibilityBounds, PriceExtractor, SelectorStrategy,
};
pub use poll::PollLoop;
pub use scheduler::{IntervalScheduler, SchedulerReport};
