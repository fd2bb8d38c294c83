//! Shared setup for every command

pub mod logging;
pub mod settings;

pub use logging::initialize_logging;
pub use settings::resolve_settings;
