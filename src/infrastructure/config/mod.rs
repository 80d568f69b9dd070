//! Infrastructure configuration modules.

pub mod logging;
pub mod settings;
pub mod source;
pub mod telegram;
pub mod token;
pub mod watch;
