//! Canonical encounter state: participants, stone pools, and the round
//! phase machine.
//!
//! All mutation flows through [`crate::ledger::PoolLedger`] and
//! [`crate::engine::EncounterCoordinator`]; these types only provide the
//! storage and the conservative primitive moves.
mod common;
mod encounter;
mod participant;
mod pool;

pub use common::{ParticipantId, Stone, StoneId, VitalityMeter};
pub use encounter::{EncounterState, Phase};
pub use participant::{Allocation, Overdrive, ParticipantState};
pub use pool::StonePool;
