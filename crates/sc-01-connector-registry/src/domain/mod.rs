//! # Domain Layer (Inner Hexagon)
//!
//! Pure registry logic: entries, governance records and the versioned state.
//! NO locking, NO logging, NO metrics.

pub mod entities;
pub mod state;

pub use entities::*;
pub use state::*;
