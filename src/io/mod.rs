//! Input/output operations, configuration and error handling

/// Command-line interface and the retrying solve runner
pub mod cli;
/// Engine constants and runtime configuration defaults
pub mod configuration;
/// Error types and context management
pub mod error;
/// PNG export of resolved layers
pub mod image;
/// Random walkways for pre-placement
pub mod path;
/// Built-in demo tilesets
pub mod presets;
/// Terminal progress reporting
pub mod progress;
