//! # Visit Counter Subsystem
//!
//! **Subsystem ID:** 2
//!
//! Counts how many times this client has run the report and when it last did,
//! persisted in a cookie named `whoami_visit` that lives for one year.
//!
//! ## Architecture
//!
//! - **Domain Layer:** `VisitRecord`, the cookie codec, `VisitOutcome`
//! - **Ports Layer:** `CookieJar` and `Clock` (driven), `VisitCounterApi`
//!   (driving)
//! - **Service Layer:** `VisitCounter`
//! - **Adapters Layer:** in-memory jar, file-backed jar (`file-jar`)
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wai_02_visit_counter::{MemoryCookieJar, SystemClock, VisitCounter, VisitCounterApi};
//!
//! let counter = VisitCounter::new(Arc::new(MemoryCookieJar::new()), Arc::new(SystemClock));
//! let first = counter.record_visit();
//! assert_eq!(first.count_text(), "1 time");
//! let second = counter.record_visit();
//! assert_eq!(second.count_text(), "2 times");
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    decode_component, encode_component, find_cookie, SetCookie, VisitError, VisitOutcome,
    VisitRecord, COOKIE_MAX_AGE_SECS, COOKIE_NAME,
};
pub use ports::{Clock, CookieJar, VisitCounterApi};
pub use service::VisitCounter;

pub use adapters::{MemoryCookieJar, SystemClock};

#[cfg(feature = "file-jar")]
pub use adapters::FileCookieJar;

#[cfg(any(test, feature = "test-utils"))]
pub use adapters::{DisabledCookieJar, FixedClock};
