//! Event types for different topics.
//!
//! One closed enum per topic: subscribers match exhaustively instead of
//! switching on loosely-typed `{type, payload}` messages. Delivery is
//! at-least-once and unordered across participants, so subscribers must
//! re-render from authoritative state rather than replaying deltas.

use clash_core::{AttackResult, ParticipantId, RegenReport, RevealSnapshot};
use serde::{Deserialize, Serialize};

/// Events about the phase machine and round resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EncounterEvent {
    /// A new encounter replaced any previous one.
    EncounterStarted { participants: Vec<ParticipantId> },

    /// A participant committed (or re-committed) a secret allocation.
    /// Effective values stay hidden until reveal; subscribers only learn
    /// who has committed.
    AllocationUpdated { participant: ParticipantId },

    /// A participant withdrew their commitment.
    AllocationReset { participant: ParticipantId },

    /// All allocations are now public.
    AllocationsRevealed { snapshot: RevealSnapshot },

    /// The round was resolved.
    CombatResolved {
        round: u32,
        results: Vec<AttackResult>,
    },
}

/// Events about stone-pool movements outside the allocation flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PoolEvent {
    /// Exhausted stones returned to ready pools.
    Regenerated { reports: Vec<RegenReport> },

    /// The GM minted fresh stones for a participant.
    StonesDistributed {
        participant: ParticipantId,
        count: usize,
    },
}
