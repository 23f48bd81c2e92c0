//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Ports (Inbound)**: `SmartAccountApi`
//! - **Driven Ports (Outbound)**: `Connector`, `StateAccess`, `WorldState`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
