/// Read-only access to encounter rule settings.
///
/// Implementations must answer from live settings storage: the coordinator
/// reads these at the point of use and never caches them across operations.
pub trait ConfigOracle {
    fn mastery_rank_default(&self) -> u32;
    fn overdrive_enabled(&self) -> bool;
    fn max_group_defenders(&self) -> usize;
}
