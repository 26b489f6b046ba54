//! Encounter-level state: the round phase machine and the participant roster.

use crate::error::ClashError;

use super::common::ParticipantId;
use super::participant::ParticipantState;

/// Round phase of the encounter.
///
/// Every operation checks its allowed phase against the single
/// [`Phase::can_transition`] table; there are no per-caller phase booleans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Encounter being assembled; no allocations accepted yet.
    Setup,
    /// Participants submit (and may resubmit) secret allocations.
    Allocating,
    /// Allocations are public; awaiting resolution.
    Revealed,
    /// Round resolved; awaiting regeneration into the next round.
    Resolved,
}

impl Phase {
    /// The legal phase transitions.
    ///
    /// `Resolved -> Allocating` loops into the next round; a new encounter
    /// replaces the coordinator instance entirely rather than transitioning
    /// back to `Setup`.
    pub fn can_transition(self, to: Phase) -> bool {
        matches!(
            (self, to),
            (Phase::Setup, Phase::Allocating)
                | (Phase::Allocating, Phase::Revealed)
                | (Phase::Revealed, Phase::Resolved)
                | (Phase::Resolved, Phase::Allocating)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Allocating => "allocating",
            Phase::Revealed => "revealed",
            Phase::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-memory state of the single active encounter.
///
/// Participants live in a `Vec`: its order is the fixed enumeration order
/// used by pairwise resolution and by reveal snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterState {
    pub participants: Vec<ParticipantState>,
    pub round: u32,
    pub phase: Phase,
}

impl EncounterState {
    pub fn new(participants: Vec<ParticipantState>) -> Self {
        Self {
            participants,
            round: 0,
            phase: Phase::Setup,
        }
    }

    pub fn participant(&self, id: ParticipantId) -> Result<&ParticipantState, ClashError> {
        self.participants
            .iter()
            .find(|p| p.id == id)
            .ok_or(ClashError::UnknownParticipant(id))
    }

    pub fn participant_mut(
        &mut self,
        id: ParticipantId,
    ) -> Result<&mut ParticipantState, ClashError> {
        self.participants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ClashError::UnknownParticipant(id))
    }

    /// Moves to `to` if the transition table allows it.
    pub fn transition(&mut self, operation: &'static str, to: Phase) -> Result<(), ClashError> {
        if !self.phase.can_transition(to) {
            return Err(ClashError::InvalidPhase {
                operation,
                phase: self.phase,
            });
        }
        self.phase = to;
        Ok(())
    }

    /// Fails unless the encounter is currently in `expected`.
    pub fn ensure_phase(
        &self,
        operation: &'static str,
        expected: Phase,
    ) -> Result<(), ClashError> {
        if self.phase != expected {
            return Err(ClashError::InvalidPhase {
                operation,
                phase: self.phase,
            });
        }
        Ok(())
    }
}
