//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod publisher;
pub mod renderer;
