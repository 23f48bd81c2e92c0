//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the driven ports.

pub mod memory_world;

pub use memory_world::InMemoryWorld;
