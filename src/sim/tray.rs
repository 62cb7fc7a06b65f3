//! The tray of offered pieces
//!
//! Pieces sit in fixed slots so the front end can address them by index.
//! Taking a piece leaves its slot empty; the other pieces don't move.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::shapes::ShapeKind;
use crate::consts::TRAY_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tray {
    slots: [Option<ShapeKind>; TRAY_SIZE],
}

impl Tray {
    /// Tray filled with fresh random draws
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut tray = Self::default();
        tray.refill(rng);
        tray
    }

    /// Tray holding exactly the given pieces, remaining slots empty
    pub fn from_shapes(shapes: &[ShapeKind]) -> Self {
        let mut tray = Self::default();
        for (slot, &shape) in tray.slots.iter_mut().zip(shapes) {
            *slot = Some(shape);
        }
        tray
    }

    /// Shape in `slot`, if any
    pub fn get(&self, slot: usize) -> Option<ShapeKind> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn slots(&self) -> &[Option<ShapeKind>; TRAY_SIZE] {
        &self.slots
    }

    /// Pieces still on offer, in slot order
    pub fn shapes(&self) -> impl Iterator<Item = ShapeKind> + '_ {
        self.slots.iter().flatten().copied()
    }

    /// Pieces still on offer with their slot index
    pub fn entries(&self) -> impl Iterator<Item = (usize, ShapeKind)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, shape)| shape.map(|s| (slot, s)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove the piece in `slot` if it is `shape`. Returns false on mismatch.
    pub fn take(&mut self, slot: usize, shape: ShapeKind) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) if *entry == Some(shape) => {
                *entry = None;
                true
            }
            _ => false,
        }
    }

    /// Draw a fresh piece into every slot, each independent and uniform
    pub fn refill<R: Rng>(&mut self, rng: &mut R) {
        for slot in &mut self.slots {
            *slot = Some(ShapeKind::random(rng));
        }
    }
}
