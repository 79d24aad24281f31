/// Command-line interface and map generation orchestration
pub mod cli;
/// Constants and default values
pub mod configuration;
/// Error types and result aliases
pub mod error;
/// Map export to PNG, raw bytes and text
pub mod image;
/// Pinned tiles applied before generation
pub mod prefill;
/// Progress bars for multi-map runs
pub mod progress;
/// Animated GIF capture of solver progress
pub mod visualization;
