//! Domain Layer - Pure discovery logic with no I/O
//!
//! This module contains:
//! - ICE candidate descriptors and address extraction
//! - The one-shot discovery session state machine
//! - Terminal outcomes and their status text
//! - Configuration and errors

pub mod candidate;
pub mod config;
pub mod errors;
pub mod outcome;
pub mod session;

pub use candidate::*;
pub use config::*;
pub use errors::*;
pub use outcome::*;
pub use session::*;
