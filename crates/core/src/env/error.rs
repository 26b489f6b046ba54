/// Errors for oracle access through [`super::Env`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("identity oracle not available")]
    IdentityNotAvailable,
    #[error("config oracle not available")]
    ConfigNotAvailable,
}
