//! Unified error types surfaced by the host API.
//!
//! Wraps rule violations from the core and channel failures from worker
//! coordination so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use clash_core::ClashError;

pub type Result<T> = std::result::Result<T, HostError>;

#[derive(Debug, Error)]
pub enum HostError {
    /// A rule violation from the encounter core, recoverable at the call
    /// site.
    #[error(transparent)]
    Clash(#[from] ClashError),

    #[error("no active encounter")]
    NoActiveEncounter,

    /// Caller-level validation: a combined attack needs at least two
    /// attackers.
    #[error("combined attack requires at least 2 attackers, got {given}")]
    NotEnoughAttackers { given: usize },

    /// Caller-level validation: a shared defense needs at least two
    /// defenders.
    #[error("group defense requires at least 2 defenders, got {given}")]
    NotEnoughDefenders { given: usize },

    #[error("encounter worker command channel closed")]
    CommandChannelClosed,

    #[error("encounter worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("encounter worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}
