use std::collections::BTreeSet;

use crate::board::{BoardLayout, SlotIndex};
use crate::catalog::{PieceId, PieceRef};

/// Population cap: maximum simultaneously occupied slots.
pub const MAX_PIECES: usize = 18;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("slot ({row}, {col}) does not accept pieces")]
    SlotNotPlaceable { row: u8, col: u8 },
    #[error("population cap reached ({cap})")]
    PopulationCapExceeded { cap: usize },
    #[error("no slot at index {index}")]
    UnknownSlot { index: usize },
}

/// Authoritative slot -> occupant mapping. Pure state container: callers
/// re-evaluate synergies after every successful mutation.
///
/// Duplicate piece names across slots are permitted here; the synergy engine
/// dedups by name when counting.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    layout: BoardLayout,
    /// Parallel to the layout's slot sequence; non-placeable entries stay
    /// `None` forever.
    occupants: Vec<Option<PieceRef>>,
    occupied: usize,
}

impl Board {
    pub fn new(layout: BoardLayout) -> Self {
        let occupants = vec![None; layout.len()];
        Self {
            layout,
            occupants,
            occupied: 0,
        }
    }

    pub fn standard() -> Self {
        Self::new(BoardLayout::standard())
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn occupants(&self) -> &[Option<PieceRef>] {
        &self.occupants
    }

    pub fn occupant(&self, index: SlotIndex) -> Option<&PieceRef> {
        self.occupants.get(index).and_then(|slot| slot.as_ref())
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    pub fn is_full(&self) -> bool {
        self.occupied >= MAX_PIECES
    }

    /// Distinct occupant names; the counting key for synergy evaluation.
    pub fn unique_names(&self) -> BTreeSet<&str> {
        self.occupants
            .iter()
            .flatten()
            .map(|piece| piece.name.as_str())
            .collect()
    }

    /// Sets or overwrites the occupant. The previous occupant, if any, is
    /// handed back to the caller's pool rather than dropped silently.
    pub fn place(
        &mut self,
        index: SlotIndex,
        piece: PieceRef,
    ) -> Result<Option<PieceRef>, PlacementError> {
        let slot = self
            .layout
            .slot(index)
            .ok_or(PlacementError::UnknownSlot { index })?;
        if !slot.placeable {
            return Err(PlacementError::SlotNotPlaceable {
                row: slot.row,
                col: slot.col,
            });
        }
        if self.occupants[index].is_none() && self.occupied >= MAX_PIECES {
            return Err(PlacementError::PopulationCapExceeded { cap: MAX_PIECES });
        }
        let evicted = self.occupants[index].replace(piece);
        if evicted.is_none() {
            self.occupied += 1;
        }
        Ok(evicted)
    }

    /// Relocates the occupant of `from`; when `to` is occupied the two
    /// occupants exchange slots. Empty `from` and `from == to` are no-ops.
    pub fn move_piece(&mut self, from: SlotIndex, to: SlotIndex) -> Result<(), PlacementError> {
        if self.layout.slot(from).is_none() {
            return Err(PlacementError::UnknownSlot { index: from });
        }
        let target = self
            .layout
            .slot(to)
            .ok_or(PlacementError::UnknownSlot { index: to })?;
        if !target.placeable {
            return Err(PlacementError::SlotNotPlaceable {
                row: target.row,
                col: target.col,
            });
        }
        if from == to || self.occupants[from].is_none() {
            return Ok(());
        }
        self.occupants.swap(from, to);
        Ok(())
    }

    pub fn remove(&mut self, index: SlotIndex) -> Option<PieceRef> {
        let taken = self.occupants.get_mut(index)?.take();
        if taken.is_some() {
            self.occupied -= 1;
        }
        taken
    }

    pub fn clear(&mut self) {
        self.occupants.fill(None);
        self.occupied = 0;
    }

    pub fn empty_placeable_slots(&self) -> Vec<SlotIndex> {
        self.layout
            .slots()
            .iter()
            .enumerate()
            .filter(|(index, slot)| slot.placeable && self.occupants[*index].is_none())
            .map(|(index, _)| index)
            .collect()
    }

    /// Occupant-or-empty for every placeable slot, in topology order.
    pub fn snapshot_in_order(&self) -> Vec<Option<PieceId>> {
        self.layout
            .slots()
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.placeable)
            .map(|(index, _)| self.occupants[index].as_ref().map(|piece| piece.id))
            .collect()
    }
}
