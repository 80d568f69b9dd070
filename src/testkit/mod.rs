//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`renderer`] - Mock [`Renderer`](crate::port::Renderer): `ScriptedRenderer`
//!   serving scripted pages, with load and release counters.
//! - [`publisher`] - `RecordingPublisher` capturing sent messages, with
//!   scriptable delivery failures.
//! - [`fixture`] - Canonical extractor and context wiring for tests.

pub mod fixture;
pub mod publisher;
pub mod renderer;
