//! Async host for the stone-clash encounter engine.
//!
//! This crate wires the pure rules in `clash-core` into a tokio service:
//! a background worker owns the authoritative encounter state, clients
//! drive it through a cloneable handle, and UI layers follow along via a
//! topic-based event bus. Consumers embed [`ClashHost`] and hand out
//! [`EncounterHandle`] clones to anything that needs to act or observe.
//!
//! Modules are organized by responsibility:
//! - [`host`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`oracle`] supplies settings and participant-directory adapters
//! - [`worker`] keeps the background task internal to the crate
pub mod api;
pub mod events;
pub mod host;
pub mod oracle;

mod worker;

pub use api::{EncounterHandle, HostError, Result};
pub use events::{EncounterEvent, Event, EventBus, PoolEvent, Topic};
pub use host::{ClashHost, ClashHostBuilder, HostConfig};
pub use oracle::{ConfigOracleImpl, OracleManager, RosterEntry, RosterOracleImpl};
