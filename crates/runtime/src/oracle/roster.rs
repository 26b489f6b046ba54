//! In-memory participant directory.

use std::collections::HashMap;

use clash_core::{IdentityOracle, ParticipantId, StoneGrant};

/// One directory entry, typically filled from the host's user/actor/token
/// records before the encounter starts.
#[derive(Clone, Debug, Default)]
pub struct RosterEntry {
    pub name: Option<String>,
    pub vitality: Option<u32>,
    pub attack_stones: Option<usize>,
    pub defense_stones: Option<usize>,
    pub mastery_rank: Option<u32>,
}

/// Host implementation of [`IdentityOracle`] backed by a `HashMap`.
#[derive(Default)]
pub struct RosterOracleImpl {
    entries: HashMap<ParticipantId, RosterEntry>,
}

impl RosterOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ParticipantId, entry: RosterEntry) {
        self.entries.insert(id, entry);
    }

    pub fn with_entry(mut self, id: ParticipantId, entry: RosterEntry) -> Self {
        self.insert(id, entry);
        self
    }
}

impl IdentityOracle for RosterOracleImpl {
    fn display_name(&self, id: ParticipantId) -> Option<String> {
        self.entries.get(&id).and_then(|e| e.name.clone())
    }

    fn default_vitality(&self, id: ParticipantId) -> Option<u32> {
        self.entries.get(&id).and_then(|e| e.vitality)
    }

    fn default_stones(&self, id: ParticipantId) -> Option<StoneGrant> {
        let entry = self.entries.get(&id)?;
        match (entry.attack_stones, entry.defense_stones) {
            (None, None) => None,
            (attack, defense) => Some(StoneGrant {
                attack: attack.unwrap_or(0),
                defense: defense.unwrap_or(0),
            }),
        }
    }

    fn mastery_rank(&self, id: ParticipantId) -> Option<u32> {
        self.entries.get(&id).and_then(|e| e.mastery_rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entries_yield_no_defaults() {
        let roster = RosterOracleImpl::new();
        assert_eq!(roster.default_vitality(ParticipantId(1)), None);
        assert_eq!(roster.default_stones(ParticipantId(1)), None);
    }

    #[test]
    fn partial_stone_defaults_fill_with_zero() {
        let roster = RosterOracleImpl::new().with_entry(
            ParticipantId(1),
            RosterEntry {
                attack_stones: Some(4),
                ..Default::default()
            },
        );
        assert_eq!(
            roster.default_stones(ParticipantId(1)),
            Some(StoneGrant {
                attack: 4,
                defense: 0,
            })
        );
    }
}
