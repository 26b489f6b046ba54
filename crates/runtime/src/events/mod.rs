//! Topic-based event bus for notifying UI layers and relays.
mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{EncounterEvent, PoolEvent};
