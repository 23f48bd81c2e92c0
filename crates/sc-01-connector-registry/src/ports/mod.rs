//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Ports (Inbound)**: `RegistryGovernance`, `ConnectorResolver`

pub mod inbound;

pub use inbound::*;
