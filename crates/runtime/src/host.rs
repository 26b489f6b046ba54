//! High-level encounter host orchestrator.
//!
//! The host owns the background worker, wires up command channels and the
//! event bus, and exposes a builder-based API for embedding applications.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use clash_core::ClashConfig;

use crate::api::{EncounterHandle, HostError, Result};
use crate::events::EventBus;
use crate::oracle::{ConfigOracleImpl, OracleManager, RosterOracleImpl};
use crate::worker::{Command, EncounterWorker};

/// Host configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub clash_config: ClashConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            clash_config: ClashConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main host that owns the encounter worker.
///
/// Design: the host owns the worker task; [`EncounterHandle`] provides a
/// cloneable façade for clients.
pub struct ClashHost {
    handle: EncounterHandle,
    worker_handle: JoinHandle<()>,
}

impl ClashHost {
    /// Create a new host builder.
    pub fn builder() -> ClashHostBuilder {
        ClashHostBuilder::new()
    }

    /// Get a cloneable handle to this host.
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> EncounterHandle {
        self.handle.clone()
    }

    /// Shutdown the host gracefully.
    ///
    /// Drops the internal handle so the worker loop ends once every other
    /// handle is gone, then waits for the worker task.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(HostError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`ClashHost`] with flexible configuration.
pub struct ClashHostBuilder {
    config: HostConfig,
    roster: RosterOracleImpl,
}

impl ClashHostBuilder {
    fn new() -> Self {
        Self {
            config: HostConfig::default(),
            roster: RosterOracleImpl::new(),
        }
    }

    /// Override host configuration.
    pub fn config(mut self, config: HostConfig) -> Self {
        self.config = config;
        self
    }

    /// Override rule settings only, keeping default buffer sizes.
    pub fn clash_config(mut self, clash_config: ClashConfig) -> Self {
        self.config.clash_config = clash_config;
        self
    }

    /// Provide the participant directory consulted when encounters start.
    pub fn roster(mut self, roster: RosterOracleImpl) -> Self {
        self.roster = roster;
        self
    }

    /// Build the host and spawn its worker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> ClashHost {
        let oracles = OracleManager::new(
            Arc::new(self.roster),
            Arc::new(ConfigOracleImpl::new(self.config.clash_config)),
        );

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = EncounterHandle::new(command_tx, event_bus.clone());

        let worker = EncounterWorker::new(oracles, command_rx, event_bus);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        ClashHost {
            handle,
            worker_handle,
        }
    }
}
