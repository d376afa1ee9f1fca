// Public modules
pub mod assembly;
pub mod config;
pub mod eliminate;
pub mod error;
pub mod folders;
pub mod manifest;
pub mod prompt;
pub mod setup;
pub mod tokens;
pub mod wizard;

// Internal modules - not part of public API
pub(crate) mod json;

// Public modules for CLI access
pub mod defaults;
pub mod template;

// Re-export common types for convenience
pub use config::{ConfigInput, Configuration, Field, PackageType};
pub use error::{Error, ErrorCode, Result};
pub use setup::{apply_setup, SetupOptions, SetupReport};
