//! Config oracle implementation for the host.

use clash_core::{ClashConfig, ConfigOracle};

/// Host implementation of [`ConfigOracle`] that wraps [`ClashConfig`].
///
/// Settings are answered per call, so a host that swaps its config between
/// operations is reflected immediately (the core never caches them).
pub struct ConfigOracleImpl {
    config: ClashConfig,
}

impl ConfigOracleImpl {
    pub fn new(config: ClashConfig) -> Self {
        Self { config }
    }
}

impl ConfigOracle for ConfigOracleImpl {
    fn mastery_rank_default(&self) -> u32 {
        self.config.mastery_rank_default
    }

    fn overdrive_enabled(&self) -> bool {
        self.config.overdrive_enabled
    }

    fn max_group_defenders(&self) -> usize {
        self.config.max_group_defenders
    }
}
