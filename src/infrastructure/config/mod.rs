//! Infrastructure configuration modules.

pub mod discovery;
pub mod logging;
pub mod settings;
pub mod store;
pub mod telegram;
