//! Domain layer for the visit counter.

pub mod cookie;
pub mod errors;
pub mod outcome;
pub mod record;

pub use cookie::*;
pub use errors::*;
pub use outcome::*;
pub use record::*;
