//! Hand module - the player's not-yet-played pieces
//!
//! A fixed-length sequence of optional pieces. A `None` slot means that
//! piece was played and not yet replaced; the hand refills wholesale (a
//! brand-new draw of every slot) only once *all* slots are empty, never
//! slot-by-slot.

use rand::Rng;

use crate::core::catalog::{self, Piece};

#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    slots: Vec<Option<Piece>>,
}

impl Hand {
    /// Draw a full hand of `size` fresh pieces from the catalog
    pub fn draw<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        Self {
            slots: (0..size).map(|_| Some(catalog::draw_piece(rng))).collect(),
        }
    }

    /// Number of slots (fixed for the session)
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Piece at `index`, if not yet played
    pub fn get(&self, index: usize) -> Option<&Piece> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    /// All slots in order
    pub fn slots(&self) -> &[Option<Piece>] {
        &self.slots
    }

    /// Take the piece at `index`, leaving the slot empty.
    ///
    /// Callers check the slot is occupied first (the UI only starts drags
    /// from non-empty slots); taking an already-empty slot returns `None`
    /// and changes nothing.
    pub fn play_slot(&mut self, index: usize) -> Option<Piece> {
        self.slots.get_mut(index).and_then(|slot| slot.take())
    }

    /// True iff every slot has been played
    pub fn is_exhausted(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    /// Replace the whole hand with a fresh draw of the same size
    pub fn redraw<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::draw(self.size(), rng);
    }

    /// Overwrite a slot with a known piece (for scenario tests)
    #[cfg(test)]
    pub fn set_slot(&mut self, index: usize, piece: Option<Piece>) {
        self.slots[index] = piece;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::SimpleRng;

    #[test]
    fn test_draw_fills_every_slot() {
        let mut rng = SimpleRng::new(3);
        let hand = Hand::draw(3, &mut rng);
        assert_eq!(hand.size(), 3);
        assert!(hand.slots().iter().all(|slot| slot.is_some()));
        assert!(!hand.is_exhausted());
    }

    #[test]
    fn test_play_slot_takes_piece_once() {
        let mut rng = SimpleRng::new(3);
        let mut hand = Hand::draw(3, &mut rng);

        assert!(hand.play_slot(1).is_some());
        assert!(hand.get(1).is_none());
        // Second take of the same slot yields nothing
        assert!(hand.play_slot(1).is_none());
        // Other slots untouched
        assert!(hand.get(0).is_some());
        assert!(hand.get(2).is_some());
    }

    #[test]
    fn test_exhaustion_requires_all_slots_empty() {
        let mut rng = SimpleRng::new(9);
        let mut hand = Hand::draw(3, &mut rng);

        hand.play_slot(0);
        assert!(!hand.is_exhausted());
        hand.play_slot(2);
        assert!(!hand.is_exhausted());
        hand.play_slot(1);
        assert!(hand.is_exhausted());
    }

    #[test]
    fn test_redraw_is_wholesale() {
        let mut rng = SimpleRng::new(9);
        let mut hand = Hand::draw(5, &mut rng);
        for i in 0..5 {
            hand.play_slot(i);
        }
        assert!(hand.is_exhausted());

        hand.redraw(&mut rng);
        assert_eq!(hand.size(), 5);
        assert!(hand.slots().iter().all(|slot| slot.is_some()));
    }

    #[test]
    fn test_out_of_range_index_is_inert() {
        let mut rng = SimpleRng::new(1);
        let mut hand = Hand::draw(3, &mut rng);
        assert!(hand.get(7).is_none());
        assert!(hand.play_slot(7).is_none());
    }
}
