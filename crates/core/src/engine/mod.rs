//! Phase machine and round resolution.
//!
//! [`EncounterCoordinator`] is the authoritative reducer for
//! [`EncounterState`]. It owns the state of the single active encounter,
//! enforces phase ordering through the [`Phase::can_transition`] table, and
//! delegates every stone movement to [`PoolLedger`] — the coordinator deals
//! in counts, never stone identities. Constructing a new encounter replaces
//! the coordinator instance; there is no module-level global.

mod outcomes;

pub use outcomes::{
    AttackResult, CombinedAttackOutcome, GroupDefenseOutcome, RegenReport, RevealSnapshot,
    RevealedAllocation, StartProfile,
};

use std::collections::HashSet;

use crate::config::ClashConfig;
use crate::env::ClashEnv;
use crate::error::ClashError;
use crate::ledger::{CommitRequest, Commitment, PoolLedger};
use crate::state::{Allocation, EncounterState, ParticipantId, ParticipantState, Phase};

/// The encounter phase/round state machine.
#[derive(Debug)]
pub struct EncounterCoordinator {
    state: EncounterState,
}

impl EncounterCoordinator {
    /// Starts a new encounter with the given roster and enters
    /// `Allocating` at round 0.
    ///
    /// Unspecified vitality/stone values resolve through the identity
    /// oracle, then the built-in defaults; mastery rank comes from the
    /// identity oracle or the configured default. Fails with
    /// [`ClashError::InvalidEncounter`] when fewer than two distinct
    /// participants are given.
    pub fn start(env: ClashEnv<'_>, roster: &[StartProfile]) -> Result<Self, ClashError> {
        let distinct: HashSet<ParticipantId> = roster.iter().map(|p| p.id).collect();
        if roster.len() < ClashConfig::MIN_PARTICIPANTS || distinct.len() != roster.len() {
            return Err(ClashError::InvalidEncounter {
                participants: distinct.len(),
            });
        }

        let identity = env.identity().ok();
        let participants = roster
            .iter()
            .map(|profile| {
                let id = profile.id;
                let vitality = profile
                    .vitality
                    .or_else(|| identity.and_then(|oracle| oracle.default_vitality(id)))
                    .unwrap_or(ClashConfig::DEFAULT_VITALITY);
                let stones = profile
                    .stones
                    .or_else(|| identity.and_then(|oracle| oracle.default_stones(id)))
                    .map(|grant| grant.total())
                    .unwrap_or(ClashConfig::DEFAULT_ATTACK_STONES + ClashConfig::DEFAULT_DEFENSE_STONES);
                let mastery = identity
                    .and_then(|oracle| oracle.mastery_rank(id))
                    .unwrap_or_else(|| env.mastery_rank_default());
                ParticipantState::new(id, vitality, stones, mastery)
            })
            .collect();

        let mut state = EncounterState::new(participants);
        state.transition("start", Phase::Allocating)?;
        Ok(Self { state })
    }

    /// Commits a participant's secret allocation for the round.
    ///
    /// Only legal while `Allocating`. Re-invocation before reveal cancels
    /// the previous commitment and re-commits, so resubmission is
    /// idempotent. The overdrive burn quirk of
    /// [`PoolLedger::try_commit`] applies.
    pub fn allocate(
        &mut self,
        env: ClashEnv<'_>,
        id: ParticipantId,
        request: CommitRequest,
    ) -> Result<Commitment, ClashError> {
        self.state.ensure_phase("allocate", Phase::Allocating)?;
        let already_committed = self.state.participant(id)?.allocation.committed;

        let mut ledger = PoolLedger::new(&mut self.state);
        if already_committed {
            ledger.cancel_commitment(id)?;
        }
        let commitment = ledger.try_commit(env, id, request)?;

        let participant = self.state.participant_mut(id)?;
        participant.allocation = Allocation {
            base_attack: commitment.base_attack,
            base_defense: commitment.base_defense,
            attack_bonus: commitment.attack_bonus,
            defense_bonus: commitment.defense_bonus,
            revealed: false,
            committed: true,
        };
        Ok(commitment)
    }

    /// Cancels a participant's commitment, returning pending stones to
    /// ready. Only legal while `Allocating`; a no-op if nothing was
    /// committed.
    ///
    /// Returns how many stones were released.
    pub fn reset_allocation(&mut self, id: ParticipantId) -> Result<usize, ClashError> {
        self.state.ensure_phase("reset_allocation", Phase::Allocating)?;
        PoolLedger::new(&mut self.state).cancel_commitment(id)
    }

    /// Reveals every participant's allocation and enters `Revealed`.
    ///
    /// Idempotent: a repeat call while already `Revealed` changes nothing
    /// and returns the same snapshot. Authorization (GM-only) is the
    /// caller's responsibility.
    pub fn reveal(&mut self) -> Result<RevealSnapshot, ClashError> {
        if self.state.phase != Phase::Revealed {
            self.state.transition("reveal", Phase::Revealed)?;
            for participant in &mut self.state.participants {
                participant.allocation.revealed = true;
            }
        }
        Ok(self.reveal_snapshot())
    }

    /// Resolves the round: pairwise damage, stone consumption, mastery
    /// penalties, overlay reset. Enters `Resolved` and advances the round
    /// counter.
    ///
    /// Damage entries come in participant enumeration order, i→j before
    /// j→i per pair, and only when damage was actually dealt.
    pub fn resolve(&mut self) -> Result<Vec<AttackResult>, ClashError> {
        self.state.ensure_phase("resolve", Phase::Revealed)?;

        let effective: Vec<(ParticipantId, u32, u32)> = self
            .state
            .participants
            .iter()
            .map(|p| (p.id, p.allocation.attack(), p.allocation.defense()))
            .collect();

        let mut results = Vec::new();
        for i in 0..effective.len() {
            for j in (i + 1)..effective.len() {
                let (id_i, attack_i, defense_i) = effective[i];
                let (id_j, attack_j, defense_j) = effective[j];

                let damage = attack_i.saturating_sub(defense_j);
                if damage > 0 {
                    self.state.participants[j].vitality.apply_damage(damage);
                    results.push(AttackResult {
                        attacker: id_i,
                        defender: id_j,
                        damage,
                    });
                }

                let damage = attack_j.saturating_sub(defense_i);
                if damage > 0 {
                    self.state.participants[i].vitality.apply_damage(damage);
                    results.push(AttackResult {
                        attacker: id_j,
                        defender: id_i,
                        damage,
                    });
                }
            }
        }

        for participant in &mut self.state.participants {
            participant.pool.consume_pending();
            let burned = participant.overdrive.burned_this_round as u32;
            if burned > 0 {
                // Sticky penalty: never restored within the encounter.
                participant.mastery_rank = participant.mastery_rank.saturating_sub(burned).max(1);
            }
            participant.clear_overlays();
        }

        self.state.transition("resolve", Phase::Resolved)?;
        self.state.round += 1;
        Ok(results)
    }

    /// Regenerates every participant's exhausted stones at their current
    /// decayed rate.
    ///
    /// Allowed in any phase; when the round was just resolved this also
    /// re-enters `Allocating` for the next round (allocations were already
    /// cleared by [`Self::resolve`]).
    pub fn regenerate_all(&mut self) -> Vec<RegenReport> {
        let ids: Vec<ParticipantId> = self.state.participants.iter().map(|p| p.id).collect();
        let mut ledger = PoolLedger::new(&mut self.state);
        let reports = ids
            .into_iter()
            .map(|id| RegenReport {
                participant: id,
                // ids come from the roster itself
                returned: ledger.regenerate(id).unwrap_or(0),
            })
            .collect();

        if self.state.phase == Phase::Resolved {
            // Table guarantees Resolved -> Allocating is legal.
            let _ = self.state.transition("regenerate_all", Phase::Allocating);
        }
        reports
    }

    /// Ad hoc side channel: several attackers pool their *current*
    /// effective attack against one target.
    ///
    /// Consumes no stones beyond what allocation already committed and
    /// changes no phase, so invoking it alongside pairwise [`Self::resolve`]
    /// in the same round can double-count damage. That is intentional; see
    /// DESIGN.md. Minimum-party validation is the caller's.
    pub fn combined_attack(
        &mut self,
        attacker_ids: &[ParticipantId],
        target_id: ParticipantId,
    ) -> Result<CombinedAttackOutcome, ClashError> {
        let mut total_attack = 0u32;
        for &id in attacker_ids {
            total_attack = total_attack.saturating_add(self.state.participant(id)?.allocation.attack());
        }
        let defense = self.state.participant(target_id)?.allocation.defense();

        let damage = total_attack.saturating_sub(defense);
        if damage > 0 {
            self.state.participant_mut(target_id)?.vitality.apply_damage(damage);
        }
        Ok(CombinedAttackOutcome {
            damage,
            lead_attacker: attacker_ids.first().copied(),
        })
    }

    /// Ad hoc side channel: up to `max_group_defenders` defenders pool
    /// their *current* effective defense against one attacker; ids beyond
    /// the cap are silently dropped.
    ///
    /// Damage splits as evenly as possible: `floor(damage / n)` each, the
    /// first `damage mod n` defenders (input order) take one extra point.
    pub fn group_defense(
        &mut self,
        env: ClashEnv<'_>,
        defender_ids: &[ParticipantId],
        attacker_id: ParticipantId,
    ) -> Result<GroupDefenseOutcome, ClashError> {
        let cap = env.max_group_defenders().min(defender_ids.len());
        let defenders = &defender_ids[..cap];

        let mut total_defense = 0u32;
        for &id in defenders {
            total_defense = total_defense.saturating_add(self.state.participant(id)?.allocation.defense());
        }
        let attack = self.state.participant(attacker_id)?.allocation.attack();
        let damage = attack.saturating_sub(total_defense);

        let mut per_defender = Vec::with_capacity(defenders.len());
        if damage > 0 && !defenders.is_empty() {
            let base = damage / defenders.len() as u32;
            let remainder = damage % defenders.len() as u32;
            for (index, &id) in defenders.iter().enumerate() {
                let share = base + u32::from((index as u32) < remainder);
                self.state.participant_mut(id)?.vitality.apply_damage(share);
                per_defender.push((id, share));
            }
        } else {
            per_defender.extend(defenders.iter().map(|&id| (id, 0)));
        }

        Ok(GroupDefenseOutcome {
            total_defense,
            damage,
            per_defender,
        })
    }

    /// GM top-up: mints `count` fresh stones into a participant's ready
    /// pool. Returns the new ready count.
    pub fn distribute_stones(
        &mut self,
        id: ParticipantId,
        count: usize,
    ) -> Result<usize, ClashError> {
        PoolLedger::new(&mut self.state).grant(id, count)
    }

    pub fn participant(&self, id: ParticipantId) -> Result<&ParticipantState, ClashError> {
        self.state.participant(id)
    }

    pub fn participants(&self) -> &[ParticipantState] {
        &self.state.participants
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn round(&self) -> u32 {
        self.state.round
    }

    fn reveal_snapshot(&self) -> RevealSnapshot {
        RevealSnapshot {
            round: self.state.round,
            allocations: self
                .state
                .participants
                .iter()
                .map(|p| RevealedAllocation {
                    participant: p.id,
                    attack: p.allocation.attack(),
                    defense: p.allocation.defense(),
                    overdrive: p.overdrive.active,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ClashEnv, ConfigOracle, Env, IdentityOracle, StoneGrant};
    use crate::ledger::OverdriveRequest;

    struct Settings {
        overdrive: bool,
        max_defenders: usize,
    }

    impl ConfigOracle for Settings {
        fn mastery_rank_default(&self) -> u32 {
            2
        }
        fn overdrive_enabled(&self) -> bool {
            self.overdrive
        }
        fn max_group_defenders(&self) -> usize {
            self.max_defenders
        }
    }

    struct Roster;

    impl IdentityOracle for Roster {
        fn display_name(&self, id: ParticipantId) -> Option<String> {
            Some(format!("hero-{}", id.0))
        }
        fn default_vitality(&self, id: ParticipantId) -> Option<u32> {
            // participant 3 has a tougher sheet
            (id == ParticipantId(3)).then_some(20)
        }
        fn default_stones(&self, _: ParticipantId) -> Option<StoneGrant> {
            None
        }
        fn mastery_rank(&self, id: ParticipantId) -> Option<u32> {
            (id == ParticipantId(1)).then_some(3)
        }
    }

    const ROSTER: Roster = Roster;
    const DEFAULT_SETTINGS: Settings = Settings {
        overdrive: true,
        max_defenders: 3,
    };

    fn env() -> ClashEnv<'static> {
        Env::with_all(&ROSTER, &DEFAULT_SETTINGS).as_clash_env()
    }

    fn ids(n: u32) -> Vec<StartProfile> {
        (1..=n).map(|i| StartProfile::defaults(ParticipantId(i))).collect()
    }

    fn request(attack: u32, defense: u32) -> CommitRequest {
        CommitRequest {
            attack,
            defense,
            overdrive: None,
        }
    }

    fn started(n: u32) -> EncounterCoordinator {
        EncounterCoordinator::start(env(), &ids(n)).unwrap()
    }

    #[test]
    fn start_applies_oracle_and_global_defaults() {
        let coordinator = started(3);
        assert_eq!(coordinator.phase(), Phase::Allocating);
        assert_eq!(coordinator.round(), 0);

        let p1 = coordinator.participant(ParticipantId(1)).unwrap();
        assert_eq!(p1.vitality.maximum, 10);
        assert_eq!(p1.pool.ready().len(), 10);
        assert_eq!(p1.mastery_rank, 3);

        let p3 = coordinator.participant(ParticipantId(3)).unwrap();
        assert_eq!(p3.vitality.maximum, 20);
        assert_eq!(p3.mastery_rank, 2);
    }

    #[test]
    fn start_honors_explicit_overrides() {
        let roster = [
            StartProfile {
                id: ParticipantId(1),
                vitality: Some(7),
                stones: Some(StoneGrant {
                    attack: 2,
                    defense: 1,
                }),
            },
            StartProfile::defaults(ParticipantId(2)),
        ];
        let coordinator = EncounterCoordinator::start(env(), &roster).unwrap();
        let p1 = coordinator.participant(ParticipantId(1)).unwrap();
        assert_eq!(p1.vitality.maximum, 7);
        assert_eq!(p1.pool.ready().len(), 3);
    }

    #[test]
    fn start_rejects_small_or_duplicate_rosters() {
        let err = EncounterCoordinator::start(env(), &ids(1)).unwrap_err();
        assert_eq!(err, ClashError::InvalidEncounter { participants: 1 });

        let duplicated = [
            StartProfile::defaults(ParticipantId(1)),
            StartProfile::defaults(ParticipantId(1)),
        ];
        let err = EncounterCoordinator::start(env(), &duplicated).unwrap_err();
        assert_eq!(err, ClashError::InvalidEncounter { participants: 1 });
    }

    #[test]
    fn allocate_then_reset_roundtrips_ready() {
        let mut coordinator = started(2);
        let before: Vec<_> = coordinator
            .participant(ParticipantId(1))
            .unwrap()
            .pool
            .ready()
            .to_vec();

        coordinator.allocate(env(), ParticipantId(1), request(3, 2)).unwrap();
        let released = coordinator.reset_allocation(ParticipantId(1)).unwrap();
        assert_eq!(released, 5);

        let p = coordinator.participant(ParticipantId(1)).unwrap();
        let mut after = p.pool.ready().to_vec();
        let mut expected = before;
        after.sort_by_key(|s| s.id.seq);
        expected.sort_by_key(|s| s.id.seq);
        assert_eq!(after, expected);
        assert_eq!(p.allocation, Allocation::default());
        assert_eq!(p.overdrive, Default::default());
    }

    #[test]
    fn resubmission_replaces_previous_commitment() {
        let mut coordinator = started(2);
        coordinator.allocate(env(), ParticipantId(1), request(4, 4)).unwrap();
        // 10 granted, 8 pending: a fresh 5+2 must fit because the old
        // commitment is released first.
        let commitment = coordinator.allocate(env(), ParticipantId(1), request(5, 2)).unwrap();
        assert_eq!(commitment.attack(), 5);

        let p = coordinator.participant(ParticipantId(1)).unwrap();
        assert_eq!(p.pool.pending().len(), 7);
        assert_eq!(p.pool.ready().len(), 3);
        assert_eq!(p.allocation.base_attack, 5);
        assert_eq!(p.allocation.base_defense, 2);
    }

    #[test]
    fn allocate_is_rejected_outside_allocating() {
        let mut coordinator = started(2);
        coordinator.reveal().unwrap();
        let err = coordinator.allocate(env(), ParticipantId(1), request(1, 1)).unwrap_err();
        assert_eq!(
            err,
            ClashError::InvalidPhase {
                operation: "allocate",
                phase: Phase::Revealed,
            }
        );
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut coordinator = started(2);
        coordinator.allocate(env(), ParticipantId(1), request(3, 1)).unwrap();
        coordinator.allocate(env(), ParticipantId(2), request(2, 2)).unwrap();

        let first = coordinator.reveal().unwrap();
        let second = coordinator.reveal().unwrap();
        assert_eq!(first, second);
        assert_eq!(coordinator.phase(), Phase::Revealed);
        assert!(
            coordinator
                .participants()
                .iter()
                .all(|p| p.allocation.revealed)
        );
    }

    #[test]
    fn resolution_is_symmetric_and_ordered() {
        let mut coordinator = started(2);
        coordinator.allocate(env(), ParticipantId(1), request(5, 2)).unwrap();
        coordinator.allocate(env(), ParticipantId(2), request(4, 3)).unwrap();
        coordinator.reveal().unwrap();

        let results = coordinator.resolve().unwrap();
        assert_eq!(
            results,
            vec![
                AttackResult {
                    attacker: ParticipantId(1),
                    defender: ParticipantId(2),
                    damage: 2,
                },
                AttackResult {
                    attacker: ParticipantId(2),
                    defender: ParticipantId(1),
                    damage: 2,
                },
            ]
        );
        assert_eq!(coordinator.phase(), Phase::Resolved);
        assert_eq!(coordinator.round(), 1);

        let p1 = coordinator.participant(ParticipantId(1)).unwrap();
        assert_eq!(p1.vitality.current, 8);
        assert_eq!(p1.pool.exhausted().len(), 7);
        assert!(p1.pool.pending().is_empty());
        assert_eq!(p1.allocation, Allocation::default());
    }

    #[test]
    fn resolve_records_only_positive_damage() {
        let mut coordinator = started(2);
        coordinator.allocate(env(), ParticipantId(1), request(2, 5)).unwrap();
        coordinator.allocate(env(), ParticipantId(2), request(1, 4)).unwrap();
        coordinator.reveal().unwrap();
        assert!(coordinator.resolve().unwrap().is_empty());
    }

    #[test]
    fn vitality_clamps_at_zero() {
        let roster = [
            StartProfile {
                id: ParticipantId(1),
                vitality: Some(1),
                stones: None,
            },
            StartProfile::defaults(ParticipantId(2)),
        ];
        let mut coordinator = EncounterCoordinator::start(env(), &roster).unwrap();
        coordinator.allocate(env(), ParticipantId(2), request(8, 0)).unwrap();
        coordinator.reveal().unwrap();
        coordinator.resolve().unwrap();
        let p1 = coordinator.participant(ParticipantId(1)).unwrap();
        assert_eq!(p1.vitality.current, 0);
        assert!(p1.vitality.is_defeated());
    }

    #[test]
    fn unallocated_participants_resolve_with_zero_allocation() {
        let mut coordinator = started(2);
        coordinator.allocate(env(), ParticipantId(1), request(3, 0)).unwrap();
        coordinator.reveal().unwrap();
        let results = coordinator.resolve().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].damage, 3);
        assert_eq!(results[0].defender, ParticipantId(2));
    }

    #[test]
    fn mastery_penalty_sticks_and_decays_regen() {
        let mut coordinator = started(2);
        // participant 1 has mastery 3 from the roster oracle; burn one stone
        coordinator
            .allocate(
                env(),
                ParticipantId(1),
                CommitRequest {
                    attack: 2,
                    defense: 2,
                    overdrive: Some(OverdriveRequest {
                        burn: 1,
                        ..Default::default()
                    }),
                },
            )
            .unwrap();
        coordinator.allocate(env(), ParticipantId(2), request(1, 1)).unwrap();
        coordinator.reveal().unwrap();
        coordinator.resolve().unwrap();

        let p1 = coordinator.participant(ParticipantId(1)).unwrap();
        assert_eq!(p1.mastery_rank, 2);

        // rate = max(1, mastery 2 - 1 burned) = 1
        let reports = coordinator.regenerate_all();
        assert_eq!(
            reports[0],
            RegenReport {
                participant: ParticipantId(1),
                returned: 1,
            }
        );
        // resolve left us in Resolved; regenerate loops back to Allocating
        assert_eq!(coordinator.phase(), Phase::Allocating);
    }

    #[test]
    fn failed_burn_overlay_persists_without_folding_into_next_commit() {
        let mut coordinator = started(2);
        // 10 ready, burn 1 leaves 9, then ask for 10: burn lands, commit
        // fails, overlay stays behind.
        let err = coordinator
            .allocate(
                env(),
                ParticipantId(1),
                CommitRequest {
                    attack: 8,
                    defense: 2,
                    overdrive: Some(OverdriveRequest {
                        burn: 1,
                        ..Default::default()
                    }),
                },
            )
            .unwrap_err();
        assert!(matches!(err, ClashError::InsufficientStones { .. }));

        // A fresh plain commitment does not inherit the stale +4 bonus.
        coordinator.allocate(env(), ParticipantId(1), request(2, 1)).unwrap();
        let p = coordinator.participant(ParticipantId(1)).unwrap();
        assert_eq!(p.allocation.attack(), 2);
        assert_eq!(p.allocation.attack_bonus, 0);
        assert!(p.overdrive.active);
        assert_eq!(p.overdrive.burned_this_round, 1);

        // The burned stone still costs mastery at resolution: 3 -> 2.
        coordinator.allocate(env(), ParticipantId(2), request(0, 0)).unwrap();
        coordinator.reveal().unwrap();
        coordinator.resolve().unwrap();
        assert_eq!(coordinator.participant(ParticipantId(1)).unwrap().mastery_rank, 2);
    }

    #[test]
    fn combined_attack_pools_current_allocations() {
        let mut coordinator = started(3);
        coordinator.allocate(env(), ParticipantId(1), request(3, 0)).unwrap();
        coordinator.allocate(env(), ParticipantId(2), request(4, 0)).unwrap();
        coordinator.allocate(env(), ParticipantId(3), request(0, 5)).unwrap();

        let outcome = coordinator
            .combined_attack(&[ParticipantId(1), ParticipantId(2)], ParticipantId(3))
            .unwrap();
        assert_eq!(outcome.damage, 2);
        assert_eq!(outcome.lead_attacker, Some(ParticipantId(1)));
        let target = coordinator.participant(ParticipantId(3)).unwrap();
        assert_eq!(target.vitality.current, 18);
        // no stones consumed beyond the standing allocations
        assert_eq!(target.pool.pending().len(), 5);
    }

    #[test]
    fn combined_attack_rejects_unknown_ids() {
        let mut coordinator = started(2);
        let err = coordinator
            .combined_attack(&[ParticipantId(1), ParticipantId(9)], ParticipantId(2))
            .unwrap_err();
        assert_eq!(err, ClashError::UnknownParticipant(ParticipantId(9)));
    }

    #[test]
    fn group_defense_splits_damage_in_input_order() {
        let mut coordinator = started(4);
        coordinator.allocate(env(), ParticipantId(1), request(7, 0)).unwrap();
        for id in 2..=4 {
            coordinator.allocate(env(), ParticipantId(id), request(0, 0)).unwrap();
        }

        let outcome = coordinator
            .group_defense(
                env(),
                &[ParticipantId(2), ParticipantId(3), ParticipantId(4)],
                ParticipantId(1),
            )
            .unwrap();
        assert_eq!(outcome.total_defense, 0);
        assert_eq!(outcome.damage, 7);
        // 7 split across 3: [3, 2, 2], first defender takes the extra point
        assert_eq!(
            outcome.per_defender,
            vec![
                (ParticipantId(2), 3),
                (ParticipantId(3), 2),
                (ParticipantId(4), 2),
            ]
        );
        assert_eq!(
            coordinator.participant(ParticipantId(2)).unwrap().vitality.current,
            7
        );
    }

    #[test]
    fn group_defense_drops_defenders_beyond_the_cap() {
        let constrained = Settings {
            overdrive: true,
            max_defenders: 2,
        };
        let roster_env: ClashEnv<'_> = Env::with_all(&ROSTER, &constrained).as_clash_env();
        let mut coordinator = EncounterCoordinator::start(roster_env, &ids(4)).unwrap();
        coordinator
            .allocate(roster_env, ParticipantId(1), request(5, 0))
            .unwrap();
        for id in 2..=4 {
            coordinator
                .allocate(roster_env, ParticipantId(id), request(0, 1))
                .unwrap();
        }

        let outcome = coordinator
            .group_defense(
                roster_env,
                &[ParticipantId(2), ParticipantId(3), ParticipantId(4)],
                ParticipantId(1),
            )
            .unwrap();
        // only the first two defenders count: defense 2, damage 3
        assert_eq!(outcome.total_defense, 2);
        assert_eq!(outcome.damage, 3);
        assert_eq!(outcome.per_defender.len(), 2);
        assert_eq!(
            coordinator.participant(ParticipantId(4)).unwrap().vitality.current,
            10
        );
    }

    #[test]
    fn multi_round_loop_conserves_stones() {
        let mut coordinator = started(2);
        for _ in 0..3 {
            coordinator.allocate(env(), ParticipantId(1), request(2, 1)).unwrap();
            coordinator.allocate(env(), ParticipantId(2), request(1, 2)).unwrap();
            coordinator.reveal().unwrap();
            coordinator.resolve().unwrap();
            coordinator.regenerate_all();
            assert_eq!(coordinator.phase(), Phase::Allocating);
        }
        assert_eq!(coordinator.round(), 3);
        for p in coordinator.participants() {
            assert!(p.pool.is_conserved());
            assert_eq!(p.pool.minted(), 10);
        }
    }

    #[test]
    fn distribute_stones_tops_up_ready() {
        let mut coordinator = started(2);
        let ready = coordinator.distribute_stones(ParticipantId(2), 5).unwrap();
        assert_eq!(ready, 15);
    }
}
