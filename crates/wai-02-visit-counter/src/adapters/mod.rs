//! # Adapters Layer
//!
//! - `memory`: process-local jar
//! - `file` (feature `file-jar`): jar persisted to disk, shared between runs
//! - `clock`: system clock, fixed clock for tests

pub mod clock;
pub mod memory;
mod store;

#[cfg(feature = "file-jar")]
pub mod file;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use clock::SystemClock;
pub use memory::MemoryCookieJar;

#[cfg(feature = "file-jar")]
pub use file::FileCookieJar;

#[cfg(any(test, feature = "test-utils"))]
pub use testing::{DisabledCookieJar, FixedClock};
