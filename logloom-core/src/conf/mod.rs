mod discover;
mod error;
mod loader;
#[cfg(test)]
mod tests;
pub mod types;
pub mod validation;

pub use discover::discover;
pub use error::ConfigError;
pub use loader::{CONFIG_FILE_NAME, load_config, load_or_default};
pub use types::LogloomConfig;
pub use validation::{ValidationReport, validate_config};
