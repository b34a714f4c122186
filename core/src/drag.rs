use crate::board::SlotIndex;
use crate::catalog::PieceRef;
use crate::state::{Board, PlacementError};

/// Where a gesture picked its piece up from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragSource {
    /// A fresh piece from the catalog list panel.
    List { piece: PieceRef },
    /// A piece already on the board.
    Slot { index: SlotIndex },
}

/// One in-flight gesture. Created at gesture-start, consumed exactly once by
/// `drop_on` or `cancel`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSession {
    source: DragSource,
}

impl DragSession {
    pub fn source(&self) -> &DragSource {
        &self.source
    }

    pub fn origin_slot(&self) -> Option<SlotIndex> {
        match self.source {
            DragSource::List { .. } => None,
            DragSource::Slot { index } => Some(index),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// List piece onto an empty slot.
    Placed,
    /// List piece onto an occupied slot; the evicted occupant returns to the
    /// unplaced pool.
    Replaced { evicted: PieceRef },
    /// Board piece onto an empty slot.
    Moved,
    /// Board piece onto an occupied slot; the occupants exchanged places.
    Swapped,
    /// No session in flight, or a piece dropped on its own slot.
    Ignored,
}

/// Owns the single drag gesture the UI may have in flight. Both mouse and
/// touch adapters funnel into the same three entry points; nothing here
/// depends on an input event shape.
#[derive(Debug, Default)]
pub struct DragController {
    active: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&DragSession> {
        self.active.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Starts a gesture. A second gesture-start while one is in flight is
    /// ignored and reported as `false`.
    pub fn begin(&mut self, source: DragSource) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(DragSession { source });
        true
    }

    /// Ends the gesture with no board mutation; the dragged piece stays where
    /// it was. The only cancellation path.
    pub fn cancel(&mut self) -> Option<DragSession> {
        self.active.take()
    }

    /// Resolves the gesture against `target`. The session is consumed even
    /// when placement fails, so a rejected drop cannot leave a stuck gesture.
    pub fn drop_on(
        &mut self,
        board: &mut Board,
        target: SlotIndex,
    ) -> Result<DropOutcome, PlacementError> {
        let Some(session) = self.active.take() else {
            return Ok(DropOutcome::Ignored);
        };
        match session.source {
            DragSource::List { piece } => {
                let evicted = board.place(target, piece)?;
                Ok(match evicted {
                    Some(evicted) => DropOutcome::Replaced { evicted },
                    None => DropOutcome::Placed,
                })
            }
            DragSource::Slot { index } => {
                if index == target {
                    return Ok(DropOutcome::Ignored);
                }
                let swapped = board.occupant(target).is_some();
                board.move_piece(index, target)?;
                Ok(if swapped {
                    DropOutcome::Swapped
                } else {
                    DropOutcome::Moved
                })
            }
        }
    }
}
