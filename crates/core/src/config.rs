/// Encounter rule constants and tunable parameters.
///
/// The runtime reads these through the config oracle at the point of use,
/// never caching them across operations.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClashConfig {
    /// Regeneration rank used when the identity lookup has no per-participant
    /// value.
    pub mastery_rank_default: u32,
    /// Whether burning ready stones for a temporary bonus is allowed at all.
    pub overdrive_enabled: bool,
    /// Cap on defenders pooled into a shared defense; extra ids are dropped.
    pub max_group_defenders: usize,
}

impl ClashConfig {
    // ===== fixed rule constants =====
    /// Attack bonus granted per stone burned in overdrive.
    pub const OVERDRIVE_BONUS_PER_BURN: u32 = 4;
    /// Minimum participants for a valid encounter.
    pub const MIN_PARTICIPANTS: usize = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MASTERY_RANK: u32 = 2;
    pub const DEFAULT_OVERDRIVE_ENABLED: bool = true;
    pub const DEFAULT_VITALITY: u32 = 10;
    pub const DEFAULT_ATTACK_STONES: usize = 5;
    pub const DEFAULT_DEFENSE_STONES: usize = 5;
    pub const DEFAULT_MAX_GROUP_DEFENDERS: usize = 3;

    pub fn new() -> Self {
        Self {
            mastery_rank_default: Self::DEFAULT_MASTERY_RANK,
            overdrive_enabled: Self::DEFAULT_OVERDRIVE_ENABLED,
            max_group_defenders: Self::DEFAULT_MAX_GROUP_DEFENDERS,
        }
    }
}

impl Default for ClashConfig {
    fn default() -> Self {
        Self::new()
    }
}
