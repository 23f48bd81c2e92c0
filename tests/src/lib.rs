//! # Smart Account Test Suite
//!
//! Cross-crate tests that exercise the registry, the casting engine and the
//! connectors together.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Deployed world shared by every test
//! └── integration/      # Scenarios and properties, one file per concern
//!     ├── scenarios.rs  # Lending + prize-pool flows
//!     ├── atomicity.rs  # All-or-nothing batches
//!     ├── ordering.rs   # Scratch-slot data threading
//!     ├── registry.rs   # Resolution lifecycle
//!     ├── reentrancy.rs # Nested casts
//!     └── events.rs     # Audit surface
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sc-tests
//!
//! # By category
//! cargo test -p sc-tests integration::scenarios::
//!
//! # Benchmarks
//! cargo bench -p sc-tests
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
