//! Host-side implementations of the core oracle traits.
//!
//! These wrap the host's settings storage and participant directory and
//! bundle them into an [`OracleManager`] so the worker can build
//! [`clash_core::ClashEnv`] views on demand. The directory is filled before
//! the encounter starts; dynamic state lives in the coordinator.
mod config;
mod roster;

use clash_core::{ClashEnv, Env};
use std::sync::Arc;

pub use config::ConfigOracleImpl;
pub use roster::{RosterEntry, RosterOracleImpl};

/// Manages the oracle implementations and provides unified access.
#[derive(Clone)]
pub struct OracleManager {
    roster: Arc<RosterOracleImpl>,
    config: Arc<ConfigOracleImpl>,
}

impl OracleManager {
    pub fn new(roster: Arc<RosterOracleImpl>, config: Arc<ConfigOracleImpl>) -> Self {
        Self { roster, config }
    }

    /// Builds a core environment view over the managed oracles.
    pub fn as_clash_env(&self) -> ClashEnv<'_> {
        Env::with_all(self.roster.as_ref(), self.config.as_ref()).as_clash_env()
    }

    /// Direct access to the participant directory.
    pub fn roster(&self) -> &RosterOracleImpl {
        &self.roster
    }
}
