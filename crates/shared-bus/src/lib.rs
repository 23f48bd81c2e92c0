//! # Shared Bus - Audit Event Bus
//!
//! Carries the events produced by smart accounts to monitoring and indexing
//! consumers.
//!
//! ## Event Surface
//!
//! - One coarse [`AccountEvent::CastExecuted`] per successful batch
//! - One fine-grained [`AccountEvent::SpellExecuted`] per executed spell
//! - Authority changes on an account
//!
//! Failed batches publish nothing: only committed work is observable.
//!
//! ```text
//! ┌──────────────┐   publish()   ┌──────────────┐  subscribe()  ┌──────────────┐
//! │ SmartAccount │ ────────────→ │  Event Bus   │ ────────────→ │   Indexer    │
//! └──────────────┘               └──────────────┘               └──────────────┘
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{AccountEvent, CastLog, EventFilter, EventTopic, SpellLog};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
