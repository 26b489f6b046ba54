//! Cloneable façade for issuing commands to the encounter worker.
//!
//! [`EncounterHandle`] hides channel plumbing and offers async helpers for
//! driving the encounter or streaming events from specific topics. GM-only
//! operations (`reveal`, `resolve`, `regenerate_all`, `distribute_stones`)
//! carry no authorization here: deciding who may call them is the
//! embedding host's job.
use tokio::sync::{broadcast, mpsc, oneshot};

use clash_core::{
    AttackResult, CombinedAttackOutcome, Commitment, CommitRequest, GroupDefenseOutcome,
    ParticipantId, ParticipantState, RegenReport, RevealSnapshot, StartProfile,
};

use super::errors::{HostError, Result};
use crate::events::{Event, EventBus, Topic};
use crate::worker::Command;

/// Client-facing handle to interact with the encounter host.
#[derive(Clone)]
pub struct EncounterHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl EncounterHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn send<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<T>>) -> Command,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| HostError::CommandChannelClosed)?;
        reply_rx.await.map_err(HostError::ReplyChannelClosed)?
    }

    /// Start a new encounter, replacing any active one. Returns the
    /// participant ids in enumeration order.
    pub async fn start_encounter(&self, roster: Vec<StartProfile>) -> Result<Vec<ParticipantId>> {
        self.send(|reply| Command::StartEncounter { roster, reply }).await
    }

    /// Commit (or idempotently re-commit) a secret allocation.
    pub async fn allocate(
        &self,
        participant: ParticipantId,
        request: CommitRequest,
    ) -> Result<Commitment> {
        self.send(|reply| Command::Allocate {
            participant,
            request,
            reply,
        })
        .await
    }

    /// Withdraw a commitment, returning its stones to ready.
    pub async fn reset_allocation(&self, participant: ParticipantId) -> Result<usize> {
        self.send(|reply| Command::ResetAllocation { participant, reply }).await
    }

    /// Reveal all allocations. Idempotent. GM-only by convention.
    pub async fn reveal(&self) -> Result<RevealSnapshot> {
        self.send(|reply| Command::Reveal { reply }).await
    }

    /// Resolve the round. GM-only by convention.
    pub async fn resolve(&self) -> Result<Vec<AttackResult>> {
        self.send(|reply| Command::Resolve { reply }).await
    }

    /// Regenerate every participant's exhausted stones. GM-only by
    /// convention.
    pub async fn regenerate_all(&self) -> Result<Vec<RegenReport>> {
        self.send(|reply| Command::RegenerateAll { reply }).await
    }

    /// Pool several attackers' current allocations against one target.
    ///
    /// Validates the minimum party size before anything reaches the
    /// worker.
    pub async fn combined_attack(
        &self,
        attackers: Vec<ParticipantId>,
        target: ParticipantId,
    ) -> Result<CombinedAttackOutcome> {
        if attackers.len() < 2 {
            return Err(HostError::NotEnoughAttackers {
                given: attackers.len(),
            });
        }
        self.send(|reply| Command::CombinedAttack {
            attackers,
            target,
            reply,
        })
        .await
    }

    /// Pool several defenders' current allocations against one attacker.
    pub async fn group_defense(
        &self,
        defenders: Vec<ParticipantId>,
        attacker: ParticipantId,
    ) -> Result<GroupDefenseOutcome> {
        if defenders.len() < 2 {
            return Err(HostError::NotEnoughDefenders {
                given: defenders.len(),
            });
        }
        self.send(|reply| Command::GroupDefense {
            defenders,
            attacker,
            reply,
        })
        .await
    }

    /// Mint fresh stones for a participant. GM-only by convention.
    pub async fn distribute_stones(
        &self,
        participant: ParticipantId,
        count: usize,
    ) -> Result<usize> {
        self.send(|reply| Command::DistributeStones {
            participant,
            count,
            reply,
        })
        .await
    }

    /// Query one participant's state (read-only snapshot).
    pub async fn participant(&self, participant: ParticipantId) -> Result<ParticipantState> {
        self.send(|reply| Command::QueryParticipant { participant, reply }).await
    }

    /// Query every participant's state (read-only snapshot).
    pub async fn all_participants(&self) -> Result<Vec<ParticipantState>> {
        self.send(|reply| Command::QueryAll { reply }).await
    }

    /// Subscribe to events from a specific topic.
    ///
    /// Delivery is at-least-once and best-effort; subscribers should
    /// re-render from [`Self::all_participants`] rather than replaying
    /// deltas.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage.
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
