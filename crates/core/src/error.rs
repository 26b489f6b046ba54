//! The closed error taxonomy for ledger and coordinator operations.
//!
//! Every variant is recoverable at the call site: the host reports it to
//! the user and the encounter continues. No operation retries internally,
//! and no error leaves participant state changed — with the single
//! documented exception of the overdrive burn quirk (see
//! [`crate::ledger::PoolLedger::try_commit`]).

use crate::state::{ParticipantId, Phase};

/// Errors surfaced by stone accounting and encounter coordination.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClashError {
    /// An id that does not name a participant of the active encounter.
    #[error("unknown participant {0}")]
    UnknownParticipant(ParticipantId),

    /// Allocation asked for more stones than the ready pool holds.
    /// `requested` is wide enough to report any `u32` attack/defense pair.
    #[error("not enough ready stones: available {available}, requested {requested}")]
    InsufficientStones { available: u64, requested: u64 },

    /// Operation attempted outside its allowed phase.
    #[error("{operation} not allowed in phase {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: Phase,
    },

    /// An encounter needs at least two participants with distinct ids.
    #[error("invalid encounter: {participants} usable participant(s), need at least 2")]
    InvalidEncounter { participants: usize },
}
