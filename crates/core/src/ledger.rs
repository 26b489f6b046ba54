//! Stone-pool accounting: validation and movement between collections.
//!
//! [`PoolLedger`] is the only way stones move between `ready`, `pending`,
//! `exhausted`, and `burned`. It borrows the encounter state mutably for the
//! duration of one operation; the coordinator layers phase rules on top and
//! never inspects stone identities, only counts.

use crate::config::ClashConfig;
use crate::env::ClashEnv;
use crate::error::ClashError;
use crate::state::{EncounterState, Overdrive, ParticipantId};

/// A requested overdrive burn accompanying an allocation.
///
/// An explicit `attack_bonus`/`defense_bonus` split overrides the computed
/// attack-only bonus of `burn * 4`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverdriveRequest {
    pub burn: usize,
    pub attack_bonus: Option<u32>,
    pub defense_bonus: Option<u32>,
}

/// A requested allocation of ready stones to attack and defense.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommitRequest {
    pub attack: u32,
    pub defense: u32,
    pub overdrive: Option<OverdriveRequest>,
}

impl CommitRequest {
    /// Stones the base allocation will move to `pending`.
    ///
    /// Computed in `u64`: a `u32` attack/defense pair can sum past
    /// `u32::MAX`.
    pub const fn total(&self) -> u64 {
        self.attack as u64 + self.defense as u64
    }
}

/// Outcome of a successful commitment: the effective values combat math
/// will use, plus how many stones the overdrive burn consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Commitment {
    pub base_attack: u32,
    pub base_defense: u32,
    pub attack_bonus: u32,
    pub defense_bonus: u32,
    pub burned: usize,
}

impl Commitment {
    /// Effective attack: base plus overdrive bonus, saturating.
    pub const fn attack(&self) -> u32 {
        self.base_attack.saturating_add(self.attack_bonus)
    }

    /// Effective defense: base plus overdrive bonus, saturating.
    pub const fn defense(&self) -> u32 {
        self.base_defense.saturating_add(self.defense_bonus)
    }
}

/// The stone accounting engine.
///
/// All operations are total given a known participant id; only
/// [`PoolLedger::try_commit`] can fail beyond that, with
/// [`ClashError::InsufficientStones`].
pub struct PoolLedger<'a> {
    state: &'a mut EncounterState,
}

impl<'a> PoolLedger<'a> {
    pub fn new(state: &'a mut EncounterState) -> Self {
        Self { state }
    }

    /// Appends `count` freshly-minted stones to the participant's ready
    /// pool. No upper bound is enforced at this layer.
    ///
    /// Returns the new ready count.
    pub fn grant(&mut self, id: ParticipantId, count: usize) -> Result<usize, ClashError> {
        let participant = self.state.participant_mut(id)?;
        participant.pool.mint(count);
        Ok(participant.pool.ready().len())
    }

    /// Validates and commits an allocation, handling any overdrive burn
    /// first.
    ///
    /// The burn in step 1 is deliberately NOT rolled back when the
    /// availability check in step 2 fails: the burn lands before the
    /// allocation is validated, and combat balance may depend on that, so
    /// the quirk is kept rather than fixed. The stale overdrive overlay
    /// from such a failed attempt stays on the participant until the next
    /// cancel or resolution, but it never folds into a later commitment's
    /// effective values. See DESIGN.md.
    pub fn try_commit(
        &mut self,
        env: ClashEnv<'_>,
        id: ParticipantId,
        request: CommitRequest,
    ) -> Result<Commitment, ClashError> {
        let overdrive_enabled = env.overdrive_enabled();
        let participant = self.state.participant_mut(id)?;

        // Step 1: overdrive burn, before the availability check.
        let mut commitment = Commitment {
            base_attack: request.attack,
            base_defense: request.defense,
            attack_bonus: 0,
            defense_bonus: 0,
            burned: 0,
        };
        if let Some(overdrive) = request.overdrive
            && overdrive.burn > 0
            && overdrive_enabled
        {
            let actual = participant.pool.burn_from_ready(overdrive.burn);
            let computed = (actual as u32).saturating_mul(ClashConfig::OVERDRIVE_BONUS_PER_BURN);
            commitment.attack_bonus = overdrive.attack_bonus.unwrap_or(computed);
            commitment.defense_bonus = overdrive.defense_bonus.unwrap_or(0);
            commitment.burned = actual;
            participant.overdrive = Overdrive {
                active: actual > 0,
                attack_bonus: commitment.attack_bonus,
                defense_bonus: commitment.defense_bonus,
                burned_this_round: actual,
            };
        }

        // Step 2: availability check against the post-burn ready pool.
        let total = request.total();
        let available = participant.pool.ready().len();
        if total > available as u64 {
            return Err(ClashError::InsufficientStones {
                available: available as u64,
                requested: total,
            });
        }

        // Step 3: move the base allocation to pending. total <= available,
        // so the narrowing is exact.
        participant.pool.commit(total as usize);
        Ok(commitment)
    }

    /// Returns all pending stones to ready and clears the allocation and
    /// overdrive overlays. Silent no-op when nothing is pending.
    ///
    /// Returns how many stones were released.
    pub fn cancel_commitment(&mut self, id: ParticipantId) -> Result<usize, ClashError> {
        let participant = self.state.participant_mut(id)?;
        let released = participant.pool.release_pending();
        participant.clear_overlays();
        Ok(released)
    }

    /// Moves all pending stones to exhausted. Resolution only.
    pub fn consume_pending(&mut self, id: ParticipantId) -> Result<usize, ClashError> {
        let participant = self.state.participant_mut(id)?;
        Ok(participant.pool.consume_pending())
    }

    /// Returns exhausted stones to ready at the participant's current
    /// regeneration rate: `max(1, mastery_rank - |burned|)`, capped by the
    /// exhausted count. Burned stones never regenerate.
    ///
    /// Returns how many stones returned.
    pub fn regenerate(&mut self, id: ParticipantId) -> Result<usize, ClashError> {
        let participant = self.state.participant_mut(id)?;
        let burned = participant.pool.burned().len() as u32;
        let rate = participant.mastery_rank.saturating_sub(burned).max(1);
        Ok(participant.pool.regenerate(rate as usize))
    }
}
