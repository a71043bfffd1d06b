//! Helpers shared by the DriverConnect console crates: configuration loading,
//! path expansion, and timestamp formatting.

pub mod config;
pub mod date_handling;
pub mod path_processing;

pub use config::{ConfigError, ConsoleConfig};
pub use date_handling::format_relative;
pub use path_processing::{data_dir, expand_tilde};
