//! # Shared Types Crate
//!
//! Value objects shared by the registry, the smart account engine and the
//! connectors.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every cross-crate primitive is defined here.
//! - **No magic numbers**: the "use the whole balance" convention is the
//!   [`Amount::EntireBalance`] variant, never a bare `U256::MAX` in logic.
//! - **Opaque arguments**: spell arguments travel as [`Bytes`]; each connector
//!   decodes its own layout with [`decode_args`].

pub mod amount;
pub mod codec;
pub mod entities;
pub mod errors;

pub use amount::Amount;
pub use codec::{decode_args, encode_args};
pub use entities::*;
pub use errors::*;
