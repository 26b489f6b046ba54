//! Encounter worker that owns the authoritative
//! [`clash_core::EncounterCoordinator`].
//!
//! Receives commands from [`crate::EncounterHandle`] and processes them
//! strictly sequentially off one mpsc channel: that single-writer loop is
//! what makes every operation an indivisible transaction against the
//! encounter state, so no caller can observe a partial commit. Publishes
//! [`Event`] notifications after successful mutations.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use clash_core::{
    AttackResult, ClashError, CombinedAttackOutcome, Commitment, CommitRequest,
    EncounterCoordinator, GroupDefenseOutcome, IdentityOracle, ParticipantId, ParticipantState,
    RegenReport, RevealSnapshot, StartProfile,
};

use crate::api::{HostError, Result};
use crate::events::{EncounterEvent, Event, EventBus, PoolEvent};
use crate::oracle::OracleManager;

/// Commands that can be sent to the encounter worker
pub enum Command {
    /// Start a new encounter, replacing any active one.
    StartEncounter {
        roster: Vec<StartProfile>,
        reply: oneshot::Sender<Result<Vec<ParticipantId>>>,
    },
    /// Commit (or re-commit) a participant's secret allocation.
    Allocate {
        participant: ParticipantId,
        request: CommitRequest,
        reply: oneshot::Sender<Result<Commitment>>,
    },
    /// Withdraw a participant's commitment.
    ResetAllocation {
        participant: ParticipantId,
        reply: oneshot::Sender<Result<usize>>,
    },
    /// Reveal all allocations (GM).
    Reveal {
        reply: oneshot::Sender<Result<RevealSnapshot>>,
    },
    /// Resolve the round (GM).
    Resolve {
        reply: oneshot::Sender<Result<Vec<AttackResult>>>,
    },
    /// Regenerate exhausted stones for everyone (GM).
    RegenerateAll {
        reply: oneshot::Sender<Result<Vec<RegenReport>>>,
    },
    /// Ad hoc pooled attack outside the pairwise loop.
    CombinedAttack {
        attackers: Vec<ParticipantId>,
        target: ParticipantId,
        reply: oneshot::Sender<Result<CombinedAttackOutcome>>,
    },
    /// Ad hoc shared defense outside the pairwise loop.
    GroupDefense {
        defenders: Vec<ParticipantId>,
        attacker: ParticipantId,
        reply: oneshot::Sender<Result<GroupDefenseOutcome>>,
    },
    /// Mint fresh stones for a participant (GM).
    DistributeStones {
        participant: ParticipantId,
        count: usize,
        reply: oneshot::Sender<Result<usize>>,
    },
    /// Read one participant's state (read-only snapshot).
    QueryParticipant {
        participant: ParticipantId,
        reply: oneshot::Sender<Result<ParticipantState>>,
    },
    /// Read every participant's state (read-only snapshot).
    QueryAll {
        reply: oneshot::Sender<Result<Vec<ParticipantState>>>,
    },
}

/// Background task that processes encounter commands.
pub struct EncounterWorker {
    coordinator: Option<EncounterCoordinator>,
    oracles: OracleManager,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl EncounterWorker {
    pub fn new(
        oracles: OracleManager,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            coordinator: None,
            oracles,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends when every handle is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::StartEncounter { roster, reply } => {
                let _ = reply.send(self.start_encounter(roster));
            }
            Command::Allocate {
                participant,
                request,
                reply,
            } => {
                let _ = reply.send(self.allocate(participant, request));
            }
            Command::ResetAllocation { participant, reply } => {
                let _ = reply.send(self.reset_allocation(participant));
            }
            Command::Reveal { reply } => {
                let _ = reply.send(self.reveal());
            }
            Command::Resolve { reply } => {
                let _ = reply.send(self.resolve());
            }
            Command::RegenerateAll { reply } => {
                let _ = reply.send(self.regenerate_all());
            }
            Command::CombinedAttack {
                attackers,
                target,
                reply,
            } => {
                let result = self
                    .coordinator_mut()
                    .and_then(|c| c.combined_attack(&attackers, target).map_err(reject("combined_attack")));
                let _ = reply.send(result);
            }
            Command::GroupDefense {
                defenders,
                attacker,
                reply,
            } => {
                let result = self.group_defense(&defenders, attacker);
                let _ = reply.send(result);
            }
            Command::DistributeStones {
                participant,
                count,
                reply,
            } => {
                let _ = reply.send(self.distribute_stones(participant, count));
            }
            Command::QueryParticipant { participant, reply } => {
                let result = self
                    .coordinator()
                    .and_then(|c| Ok(c.participant(participant)?.clone()));
                let _ = reply.send(result);
            }
            Command::QueryAll { reply } => {
                let result = self.coordinator().map(|c| c.participants().to_vec());
                let _ = reply.send(result);
            }
        }
    }

    fn coordinator(&self) -> Result<&EncounterCoordinator> {
        self.coordinator.as_ref().ok_or(HostError::NoActiveEncounter)
    }

    fn coordinator_mut(&mut self) -> Result<&mut EncounterCoordinator> {
        self.coordinator.as_mut().ok_or(HostError::NoActiveEncounter)
    }

    fn start_encounter(&mut self, roster: Vec<StartProfile>) -> Result<Vec<ParticipantId>> {
        let env = self.oracles.as_clash_env();
        let coordinator =
            EncounterCoordinator::start(env, &roster).map_err(reject("start_encounter"))?;
        let participants: Vec<ParticipantId> =
            coordinator.participants().iter().map(|p| p.id).collect();

        info!(
            target: "clash::worker",
            participants = participants.len(),
            "encounter started"
        );
        for &id in &participants {
            if let Some(name) = self.oracles.roster().display_name(id) {
                debug!(target: "clash::worker", %id, name, "participant enrolled");
            }
        }
        // Only one active encounter: a restart replaces the previous state.
        self.coordinator = Some(coordinator);
        self.event_bus.publish(Event::Encounter(EncounterEvent::EncounterStarted {
            participants: participants.clone(),
        }));
        Ok(participants)
    }

    fn allocate(&mut self, participant: ParticipantId, request: CommitRequest) -> Result<Commitment> {
        let env = self.oracles.as_clash_env();
        let coordinator = self.coordinator.as_mut().ok_or(HostError::NoActiveEncounter)?;
        let commitment = coordinator
            .allocate(env, participant, request)
            .map_err(reject("allocate"))?;

        debug!(
            target: "clash::worker",
            %participant,
            burned = commitment.burned,
            "allocation committed"
        );
        self.event_bus
            .publish(Event::Encounter(EncounterEvent::AllocationUpdated { participant }));
        Ok(commitment)
    }

    fn reset_allocation(&mut self, participant: ParticipantId) -> Result<usize> {
        let released = self
            .coordinator_mut()?
            .reset_allocation(participant)
            .map_err(reject("reset_allocation"))?;
        self.event_bus
            .publish(Event::Encounter(EncounterEvent::AllocationReset { participant }));
        Ok(released)
    }

    fn reveal(&mut self) -> Result<RevealSnapshot> {
        let snapshot = self.coordinator_mut()?.reveal().map_err(reject("reveal"))?;
        info!(target: "clash::worker", round = snapshot.round, "allocations revealed");
        self.event_bus
            .publish(Event::Encounter(EncounterEvent::AllocationsRevealed {
                snapshot: snapshot.clone(),
            }));
        Ok(snapshot)
    }

    fn resolve(&mut self) -> Result<Vec<AttackResult>> {
        let coordinator = self.coordinator_mut()?;
        let results = coordinator.resolve().map_err(reject("resolve"))?;
        let round = coordinator.round();

        info!(
            target: "clash::worker",
            round,
            entries = results.len(),
            "round resolved"
        );
        self.event_bus.publish(Event::Encounter(EncounterEvent::CombatResolved {
            round,
            results: results.clone(),
        }));
        Ok(results)
    }

    fn regenerate_all(&mut self) -> Result<Vec<RegenReport>> {
        let reports = self.coordinator_mut()?.regenerate_all();
        self.event_bus.publish(Event::Pool(PoolEvent::Regenerated {
            reports: reports.clone(),
        }));
        Ok(reports)
    }

    fn group_defense(
        &mut self,
        defenders: &[ParticipantId],
        attacker: ParticipantId,
    ) -> Result<GroupDefenseOutcome> {
        let env = self.oracles.as_clash_env();
        let coordinator = self.coordinator.as_mut().ok_or(HostError::NoActiveEncounter)?;
        coordinator
            .group_defense(env, defenders, attacker)
            .map_err(reject("group_defense"))
    }

    fn distribute_stones(&mut self, participant: ParticipantId, count: usize) -> Result<usize> {
        let ready = self
            .coordinator_mut()?
            .distribute_stones(participant, count)
            .map_err(reject("distribute_stones"))?;
        self.event_bus
            .publish(Event::Pool(PoolEvent::StonesDistributed { participant, count }));
        Ok(ready)
    }
}

/// Rejected operations are expected (wrong phase, short pool, typo'd id)
/// and logged at debug; the error still reaches the caller.
fn reject(operation: &'static str) -> impl FnOnce(ClashError) -> HostError {
    move |error| {
        debug!(
            target: "clash::worker",
            operation,
            error = %error,
            "operation rejected"
        );
        HostError::Clash(error)
    }
}
