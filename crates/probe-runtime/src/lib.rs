//! # Probe Runtime Library
//!
//! This library exposes the internal modules of the `whoami` binary for
//! testing. The main entry point is the `main.rs` binary.
//!
//! ## Modules
//!
//! - `config` - layered runtime configuration
//! - `cli` - command-line flags
//! - `display` - console table and JSON rendering
//! - `runtime` - runs the loaders in page order
//! - `wiring` - native adapters for each subsystem

pub mod cli;
pub mod config;
pub mod display;
pub mod runtime;
pub mod wiring;

pub use cli::Args;
pub use config::{load_config, load_config_from, ConfigError, RuntimeConfig};
pub use display::ConsoleDisplay;
pub use runtime::{ProbeRuntime, RunSummary};
pub use wiring::build_native_runtime;
