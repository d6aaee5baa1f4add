//! Process-wide locale settings and the per-call locale context.

/// Locale context passed to reads and writes
mod context;
/// Settings file, model registration and context creation
mod manager;
/// Configuration types and settings
mod types;

pub use context::LocaleContext;
pub use manager::{
    CONFIG_FILE_NAME,
    ConfigManager,
};
pub use types::{
    ConfigError,
    I18nSettings,
    ValidationError,
};
