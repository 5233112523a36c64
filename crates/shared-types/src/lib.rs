//! # Shared Types Crate
//!
//! This crate contains the types every probe subsystem agrees on.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Report row identifiers are defined once in
//!   [`FieldId`]; subsystems never spell them as raw strings.
//! - **Injected Display**: Subsystems write through the [`DisplaySurface`]
//!   port instead of touching a global document, so every writer can be
//!   exercised against a [`RecordingDisplay`].
//! - **Missing Means Dash**: An absent value renders as [`MISSING_VALUE`].

pub mod display;
pub mod entities;
pub mod errors;

pub use display::{
    set_value, DisplaySurface, RecordingDisplay, LOCALE_DATETIME_FORMAT, LOCALE_TIME_FORMAT,
    MISSING_VALUE,
};
pub use entities::*;
pub use errors::*;
