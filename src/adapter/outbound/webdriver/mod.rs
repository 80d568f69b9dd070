//! WebDriver renderer adapter.
//!
//! Implements the `port::Renderer` trait by driving a real browser through
//! a W3C WebDriver server such as `chromedriver` or `geckodriver`.

pub mod protocol;
pub mod renderer;
pub mod settings;

pub use renderer::WebDriverRenderer;
pub use settings::{Browser, WebDriverConfig};
