//! Application Layer
//!
//! Configuration management. Argument parsing and file discovery live in the
//! external wrappers that embed this engine.

pub mod config;

pub use config::Config;
