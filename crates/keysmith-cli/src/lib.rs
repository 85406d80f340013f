// ABOUTME: Library half of the keysmith CLI
// ABOUTME: Exposes config loading and command implementations for the binary

pub mod commands;
pub mod config;

pub use commands::GenerateOptions;
pub use config::Config;
