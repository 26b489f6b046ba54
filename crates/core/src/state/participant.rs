//! Per-participant state: vitality, stone pool, and the per-round overlays.

use super::common::{ParticipantId, VitalityMeter};
use super::pool::StonePool;

/// A participant's declared intent for the current round.
///
/// Hidden until reveal; `committed` distinguishes "has allocated this round"
/// from the zeroed default a participant resolves with if they never act.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocation {
    pub base_attack: u32,
    pub base_defense: u32,
    pub attack_bonus: u32,
    pub defense_bonus: u32,
    pub revealed: bool,
    pub committed: bool,
}

impl Allocation {
    /// Effective attack used in combat math, saturating.
    pub const fn attack(&self) -> u32 {
        self.base_attack.saturating_add(self.attack_bonus)
    }

    /// Effective defense used in combat math, saturating.
    pub const fn defense(&self) -> u32 {
        self.base_defense.saturating_add(self.defense_bonus)
    }
}

/// Per-round overdrive overlay, reset at every resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Overdrive {
    pub active: bool,
    pub attack_bonus: u32,
    pub defense_bonus: u32,
    pub burned_this_round: usize,
}

/// Full state of one encounter participant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantState {
    pub id: ParticipantId,
    pub vitality: VitalityMeter,
    pub pool: StonePool,
    /// Regeneration parameter. Positive, monotonically non-increasing:
    /// burning in overdrive lowers it (floored at 1) and it is never
    /// restored within the encounter.
    pub mastery_rank: u32,
    pub allocation: Allocation,
    pub overdrive: Overdrive,
}

impl ParticipantState {
    /// Creates a participant at full vitality with `initial_stones` ready.
    pub fn new(id: ParticipantId, vitality: u32, initial_stones: usize, mastery_rank: u32) -> Self {
        let mut pool = StonePool::new(id);
        pool.mint(initial_stones);
        Self {
            id,
            vitality: VitalityMeter::full(vitality),
            pool,
            mastery_rank: mastery_rank.max(1),
            allocation: Allocation::default(),
            overdrive: Overdrive::default(),
        }
    }

    /// Clears the allocation and overdrive overlays (end of round, or
    /// cancelled commitment).
    pub fn clear_overlays(&mut self) {
        self.allocation = Allocation::default();
        self.overdrive = Overdrive::default();
    }
}
