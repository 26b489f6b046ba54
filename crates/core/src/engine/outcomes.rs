//! Plain-data outcome types returned by coordinator operations.

use crate::env::StoneGrant;
use crate::state::ParticipantId;

/// Roster entry handed to [`super::EncounterCoordinator::start`].
///
/// `None` fields resolve through the identity oracle, then the global
/// defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartProfile {
    pub id: ParticipantId,
    pub vitality: Option<u32>,
    pub stones: Option<StoneGrant>,
}

impl StartProfile {
    /// Profile that takes every default.
    pub const fn defaults(id: ParticipantId) -> Self {
        Self {
            id,
            vitality: None,
            stones: None,
        }
    }
}

/// One row of a reveal snapshot: a participant's now-public effective
/// values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevealedAllocation {
    pub participant: ParticipantId,
    pub attack: u32,
    pub defense: u32,
    pub overdrive: bool,
}

/// Everything made public by a reveal. Recomputed from state, so repeated
/// reveals return identical snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevealSnapshot {
    pub round: u32,
    pub allocations: Vec<RevealedAllocation>,
}

/// One damage entry from pairwise resolution. Only recorded when
/// `damage > 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub attacker: ParticipantId,
    pub defender: ParticipantId,
    pub damage: u32,
}

/// Per-participant result of a regeneration sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenReport {
    pub participant: ParticipantId,
    pub returned: usize,
}

/// Result of an ad hoc combined attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombinedAttackOutcome {
    pub damage: u32,
    pub lead_attacker: Option<ParticipantId>,
}

/// Result of an ad hoc shared defense.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupDefenseOutcome {
    pub total_defense: u32,
    pub damage: u32,
    /// Damage actually taken per defender, in the capped input order.
    pub per_defender: Vec<(ParticipantId, u32)>,
}
