//! The four-collection stone pool and its primitive moves.
//!
//! A stone is always in exactly one of `ready`, `pending`, `exhausted`, or
//! `burned`. Every operation here moves stones between collections or mints
//! new ones; nothing ever destroys a stone, so
//! `|ready| + |pending| + |exhausted| + |burned| == minted` holds at all
//! times. Burned stones stay in `burned` for the rest of the encounter,
//! which is what makes burning a permanent shrink of the effective pool.
//!
//! Callers (the ledger) decide *when* these moves are legal; this type only
//! guarantees the moves themselves are conservative and deterministic.

use super::common::{ParticipantId, Stone, StoneId};

/// Per-participant stone collections.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StonePool {
    owner: ParticipantId,
    /// Stones available for allocation this round.
    ready: Vec<Stone>,
    /// Stones committed to the current round's allocation.
    pending: Vec<Stone>,
    /// Stones spent in past rounds, awaiting regeneration.
    exhausted: Vec<Stone>,
    /// Stones permanently removed via overdrive. Never regenerate.
    burned: Vec<Stone>,
    /// Total stones ever minted for this participant; also the next seq.
    minted: u32,
}

impl StonePool {
    /// Creates an empty pool for `owner`.
    pub fn new(owner: ParticipantId) -> Self {
        Self {
            owner,
            ready: Vec::new(),
            pending: Vec::new(),
            exhausted: Vec::new(),
            burned: Vec::new(),
            minted: 0,
        }
    }

    /// Appends `count` freshly-minted stones to `ready`.
    ///
    /// Stone ids are owner + mint sequence, assigned once and never reused.
    pub fn mint(&mut self, count: usize) {
        for _ in 0..count {
            let id = StoneId {
                owner: self.owner,
                seq: self.minted,
            };
            self.ready.push(Stone::new(id));
            self.minted += 1;
        }
    }

    /// Moves up to `count` stones from `ready` to `burned` (LIFO).
    ///
    /// Returns how many stones were actually burned.
    pub fn burn_from_ready(&mut self, count: usize) -> usize {
        let actual = count.min(self.ready.len());
        for _ in 0..actual {
            // len checked above
            if let Some(stone) = self.ready.pop() {
                self.burned.push(stone);
            }
        }
        actual
    }

    /// Moves exactly `total` stones from `ready` to `pending` (LIFO).
    ///
    /// The caller must have verified `total <= |ready|`.
    pub fn commit(&mut self, total: usize) {
        debug_assert!(total <= self.ready.len());
        let split = self.ready.len().saturating_sub(total);
        let moved = self.ready.split_off(split);
        // split_off keeps order; reverse so the last stone taken from ready
        // is the first in pending, matching repeated pop/push.
        self.pending.extend(moved.into_iter().rev());
    }

    /// Returns all `pending` stones to `ready`, prepended so their relative
    /// order among themselves is preserved.
    ///
    /// Returns how many stones were released.
    pub fn release_pending(&mut self) -> usize {
        let released = self.pending.len();
        if released > 0 {
            let mut restored: Vec<Stone> = self.pending.drain(..).rev().collect();
            restored.extend(self.ready.drain(..));
            self.ready = restored;
        }
        released
    }

    /// Moves all `pending` stones to `exhausted` unconditionally.
    pub fn consume_pending(&mut self) -> usize {
        let consumed = self.pending.len();
        self.exhausted.extend(self.pending.drain(..));
        consumed
    }

    /// Moves up to `rate` stones from `exhausted` back to `ready` (LIFO).
    ///
    /// Returns how many stones returned. `burned` stones never pass through
    /// here.
    pub fn regenerate(&mut self, rate: usize) -> usize {
        let actual = rate.min(self.exhausted.len());
        for _ in 0..actual {
            if let Some(stone) = self.exhausted.pop() {
                self.ready.push(stone);
            }
        }
        actual
    }

    pub fn owner(&self) -> ParticipantId {
        self.owner
    }

    pub fn ready(&self) -> &[Stone] {
        &self.ready
    }

    pub fn pending(&self) -> &[Stone] {
        &self.pending
    }

    pub fn exhausted(&self) -> &[Stone] {
        &self.exhausted
    }

    pub fn burned(&self) -> &[Stone] {
        &self.burned
    }

    /// Total stones ever minted for this participant.
    pub fn minted(&self) -> u32 {
        self.minted
    }

    /// Stones currently in play: everything except `burned`.
    pub fn effective_total(&self) -> usize {
        self.ready.len() + self.pending.len() + self.exhausted.len()
    }

    /// Conservation invariant: the four collections partition every stone
    /// ever minted.
    pub fn is_conserved(&self) -> bool {
        self.effective_total() + self.burned.len() == self.minted as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_with(ready: usize) -> StonePool {
        let mut pool = StonePool::new(ParticipantId(7));
        pool.mint(ready);
        pool
    }

    #[test]
    fn mint_assigns_sequential_ids() {
        let pool = pool_with(3);
        let seqs: Vec<u32> = pool.ready().iter().map(|s| s.id.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert!(pool.ready().iter().all(|s| s.id.owner == ParticipantId(7)));
    }

    #[test]
    fn commit_takes_from_the_top() {
        let mut pool = pool_with(4);
        pool.commit(2);
        // LIFO: stones 3 then 2 move, in that order
        let pending: Vec<u32> = pool.pending().iter().map(|s| s.id.seq).collect();
        assert_eq!(pending, vec![3, 2]);
        let ready: Vec<u32> = pool.ready().iter().map(|s| s.id.seq).collect();
        assert_eq!(ready, vec![0, 1]);
    }

    #[test]
    fn release_restores_relative_order() {
        let mut pool = pool_with(4);
        pool.commit(2);
        let released = pool.release_pending();
        assert_eq!(released, 2);
        let ready: Vec<u32> = pool.ready().iter().map(|s| s.id.seq).collect();
        assert_eq!(ready, vec![2, 3, 0, 1]);
        assert!(pool.pending().is_empty());
    }

    #[test]
    fn release_on_empty_pending_is_noop() {
        let mut pool = pool_with(2);
        assert_eq!(pool.release_pending(), 0);
        assert_eq!(pool.ready().len(), 2);
    }

    #[test]
    fn burn_caps_at_ready() {
        let mut pool = pool_with(2);
        assert_eq!(pool.burn_from_ready(5), 2);
        assert!(pool.ready().is_empty());
        assert_eq!(pool.burned().len(), 2);
    }

    #[test]
    fn regenerate_is_lifo_and_capped() {
        let mut pool = pool_with(3);
        pool.commit(3);
        pool.consume_pending();
        let returned = pool.regenerate(2);
        assert_eq!(returned, 2);
        assert_eq!(pool.exhausted().len(), 1);
        assert_eq!(pool.ready().len(), 2);
        assert_eq!(pool.regenerate(5), 1);
        assert!(pool.exhausted().is_empty());
    }

    #[test]
    fn conservation_holds_across_all_moves() {
        let mut pool = pool_with(6);
        assert!(pool.is_conserved());
        pool.burn_from_ready(1);
        assert!(pool.is_conserved());
        pool.commit(3);
        assert!(pool.is_conserved());
        pool.release_pending();
        assert!(pool.is_conserved());
        pool.commit(2);
        pool.consume_pending();
        assert!(pool.is_conserved());
        pool.regenerate(1);
        pool.mint(4);
        assert!(pool.is_conserved());
        assert_eq!(pool.minted(), 10);
        assert_eq!(pool.effective_total(), 9);
    }
}
