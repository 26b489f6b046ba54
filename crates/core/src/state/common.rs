use std::fmt;

/// Unique identifier for an encounter participant.
///
/// The core never interprets this value; the hosting process maps its own
/// user/actor/token identities onto it when the encounter starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantId(pub u32);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a single stone: owner plus mint sequence number.
///
/// Assigned once when the stone is minted and never reused, even after the
/// stone is burned. Stones are fungible; the id exists so collections can be
/// audited, not to carry gameplay meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoneId {
    pub owner: ParticipantId,
    pub seq: u32,
}

impl fmt::Display for StoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stone-{}-{}", self.owner.0, self.seq)
    }
}

/// An opaque fungible combat resource token.
///
/// Owned by exactly one collection of exactly one participant at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stone {
    pub id: StoneId,
}

impl Stone {
    pub const fn new(id: StoneId) -> Self {
        Self { id }
    }
}

/// Integer vitality meter tracked per participant.
///
/// `current` is clamped to `[0, maximum]` and starts at `maximum`. Only the
/// resolution paths mutate it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VitalityMeter {
    pub current: u32,
    pub maximum: u32,
}

impl VitalityMeter {
    /// Creates a meter filled to its maximum.
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Applies damage, saturating at zero. Returns the points actually lost.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current);
        self.current -= lost;
        lost
    }

    /// True once vitality has been reduced to zero.
    pub const fn is_defeated(&self) -> bool {
        self.current == 0
    }
}
