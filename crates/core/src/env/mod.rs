//! Traits describing read-only collaborator data.
//!
//! Oracles expose the host's participant directory and settings storage.
//! The [`Env`] aggregate bundles them so the coordinator can reach both
//! without hard coupling to concrete implementations.
mod config;
mod error;
mod identity;

pub use config::ConfigOracle;
pub use error::OracleError;
pub use identity::{IdentityOracle, StoneGrant};

/// Aggregates the read-only oracles required by the coordinator.
#[derive(Debug)]
pub struct Env<'a, I, C>
where
    I: IdentityOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    identity: Option<&'a I>,
    config: Option<&'a C>,
}

impl<'a, I, C> Clone for Env<'a, I, C>
where
    I: IdentityOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, I, C> Copy for Env<'a, I, C>
where
    I: IdentityOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
}

pub type ClashEnv<'a> = Env<'a, dyn IdentityOracle + 'a, dyn ConfigOracle + 'a>;

impl<'a, I, C> Env<'a, I, C>
where
    I: IdentityOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    pub fn new(identity: Option<&'a I>, config: Option<&'a C>) -> Self {
        Self { identity, config }
    }

    pub fn with_all(identity: &'a I, config: &'a C) -> Self {
        Self::new(Some(identity), Some(config))
    }

    pub fn empty() -> Self {
        Self {
            identity: None,
            config: None,
        }
    }

    /// Returns the IdentityOracle, or an error if not available.
    pub fn identity(&self) -> Result<&'a I, OracleError> {
        self.identity.ok_or(OracleError::IdentityNotAvailable)
    }

    /// Returns the ConfigOracle, or an error if not available.
    pub fn config(&self) -> Result<&'a C, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// Whether overdrive is currently enabled, falling back to the
    /// built-in default like the other setting accessors.
    pub fn overdrive_enabled(&self) -> bool {
        self.config
            .map(ConfigOracle::overdrive_enabled)
            .unwrap_or(crate::config::ClashConfig::DEFAULT_OVERDRIVE_ENABLED)
    }

    /// Current shared-defense cap, falling back to the built-in default.
    pub fn max_group_defenders(&self) -> usize {
        self.config
            .map(ConfigOracle::max_group_defenders)
            .unwrap_or(crate::config::ClashConfig::DEFAULT_MAX_GROUP_DEFENDERS)
    }

    /// Mastery rank default from settings, falling back to the built-in
    /// default.
    pub fn mastery_rank_default(&self) -> u32 {
        self.config
            .map(ConfigOracle::mastery_rank_default)
            .unwrap_or(crate::config::ClashConfig::DEFAULT_MASTERY_RANK)
    }
}

impl<'a, I, C> Env<'a, I, C>
where
    I: IdentityOracle + 'a,
    C: ConfigOracle + 'a,
{
    /// Converts this environment into a trait-object based `ClashEnv`.
    pub fn as_clash_env(&self) -> ClashEnv<'a> {
        let identity: Option<&'a dyn IdentityOracle> = self.identity.map(|i| i as _);
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|c| c as _);
        Env::new(identity, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClashConfig;

    #[test]
    fn missing_config_oracle_falls_back_to_built_in_defaults() {
        let env: ClashEnv<'_> = Env::empty();
        assert_eq!(env.overdrive_enabled(), ClashConfig::DEFAULT_OVERDRIVE_ENABLED);
        assert_eq!(env.max_group_defenders(), ClashConfig::DEFAULT_MAX_GROUP_DEFENDERS);
        assert_eq!(env.mastery_rank_default(), ClashConfig::DEFAULT_MASTERY_RANK);
    }
}
