//! Trait definitions (hexagonal ports). Depend only on domain and errors.
//!
//! ```text
//!                ┌───────────────────────────┐
//!                │        Application        │
//!     ┌──────────┤  extractor + poll cycle   ├──────────┐
//!     │          └───────────────────────────┘          │
//!     ▼                                                 ▼
//! ┌──────────┐                                    ┌───────────┐
//! │ Renderer │                                    │ Publisher │
//! │ Adapter  │                                    │  Adapter  │
//! └──────────┘                                    └───────────┘
//! ```
//!
//! - [`Renderer`], [`Page`], [`Element`] - rendered page access
//! - [`Publisher`] - channel message delivery

pub mod outbound;

pub use outbound::publisher::{Destination, Publisher};
pub use outbound::renderer::{Element, Page, Renderer};
