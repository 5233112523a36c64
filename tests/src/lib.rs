//! # Who-Am-I Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks for the hot pure paths
//! └── src/integration/  # Whole-report flows across subsystems
//!     ├── report_flow.rs
//!     └── visit_persistence.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p wai-tests
//!
//! # Benchmarks
//! cargo bench -p wai-tests
//! ```

pub mod integration;
