use crate::state::ParticipantId;

/// Initial stone grant for a participant: the ready pool starts with
/// `attack + defense` stones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoneGrant {
    pub attack: usize,
    pub defense: usize,
}

impl StoneGrant {
    pub const fn total(&self) -> usize {
        self.attack + self.defense
    }
}

/// Read-only lookup into the host's participant directory.
///
/// Consulted only at encounter start, to resolve display names and default
/// vitality/stone/mastery values the start request left unspecified. `None`
/// means "no per-participant value"; global defaults apply.
pub trait IdentityOracle {
    fn display_name(&self, id: ParticipantId) -> Option<String>;
    fn default_vitality(&self, id: ParticipantId) -> Option<u32>;
    fn default_stones(&self, id: ParticipantId) -> Option<StoneGrant>;
    fn mastery_rank(&self, id: ParticipantId) -> Option<u32>;
}
