//! Deterministic rules for hidden-allocation stone combat.
//!
//! `clash-core` defines the canonical encounter rules (stone accounting,
//! phase machine, round resolution) and exposes pure APIs reused by the
//! runtime and by offline tools. All state mutation flows through
//! [`ledger::PoolLedger`] and [`engine::EncounterCoordinator`]; supporting
//! crates depend on the types re-exported here.
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod ledger;
pub mod state;

pub use config::ClashConfig;
pub use engine::{
    AttackResult, CombinedAttackOutcome, EncounterCoordinator, GroupDefenseOutcome, RegenReport,
    RevealSnapshot, RevealedAllocation, StartProfile,
};
pub use env::{ClashEnv, ConfigOracle, Env, IdentityOracle, OracleError, StoneGrant};
pub use error::ClashError;
pub use ledger::{CommitRequest, Commitment, OverdriveRequest, PoolLedger};
pub use state::{
    Allocation, EncounterState, Overdrive, ParticipantId, ParticipantState, Phase, Stone, StoneId,
    StonePool, VitalityMeter,
};
