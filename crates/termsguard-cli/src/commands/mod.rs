//! Command implementations.

pub mod analyze;
pub mod config;
pub mod patterns;

pub use self::analyze::execute_analyze;
pub use self::config::execute_config;
pub use self::patterns::execute_patterns;
