use crate::board::SlotIndex;
use crate::catalog::{Catalog, PieceId, PieceRef};
use crate::codec::{LayoutError, encode_layout, import_layout};
use crate::drag::{DragController, DragSource, DropOutcome};
use crate::state::{Board, MAX_PIECES, PlacementError};
use crate::synergy::{AutoFillError, SynergyStatus, evaluate, plan_auto_fill};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlannerError {
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    AutoFill(#[from] AutoFillError),
    #[error("unknown piece id {0}")]
    UnknownPiece(PieceId),
    #[error("unknown synergy \"{0}\"")]
    UnknownSynergy(String),
}

/// The surface the rendering layer talks to: catalog queries, board state,
/// the synergy panel, and every mutating operation as a typed result.
/// Mutations never recompute anything; callers pull `synergy_panel` after a
/// successful mutation.
#[derive(Debug)]
pub struct Planner {
    catalog: Catalog,
    board: Board,
    drag: DragController,
}

impl Planner {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            board: Board::standard(),
            drag: DragController::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn occupied_count(&self) -> usize {
        self.board.occupied_count()
    }

    pub fn cap_reached(&self) -> bool {
        self.board.is_full()
    }

    pub fn population_cap(&self) -> usize {
        MAX_PIECES
    }

    pub fn synergy_panel(&self) -> Vec<SynergyStatus<'_>> {
        evaluate(&self.catalog, &self.board.unique_names())
    }

    pub fn place_from_list(
        &mut self,
        piece: PieceId,
        slot: SlotIndex,
    ) -> Result<Option<PieceRef>, PlannerError> {
        let piece = self
            .catalog
            .piece(piece)
            .ok_or(PlannerError::UnknownPiece(piece))?
            .piece_ref();
        Ok(self.board.place(slot, piece)?)
    }

    pub fn move_piece(&mut self, from: SlotIndex, to: SlotIndex) -> Result<(), PlannerError> {
        Ok(self.board.move_piece(from, to)?)
    }

    pub fn remove(&mut self, slot: SlotIndex) -> Option<PieceRef> {
        self.board.remove(slot)
    }

    pub fn clear(&mut self) {
        self.board.clear();
    }

    /// Places every missing member of the synergy, or nothing at all.
    /// Returns how many pieces were added; zero means already complete.
    pub fn auto_fill(&mut self, synergy_id: &str) -> Result<usize, PlannerError> {
        let synergy = self
            .catalog
            .synergy(synergy_id)
            .ok_or_else(|| PlannerError::UnknownSynergy(synergy_id.to_string()))?;
        let plan = plan_auto_fill(&self.board, &self.catalog, synergy)?;
        let placed = plan.len();
        for (slot, piece) in plan {
            self.board.place(slot, piece)?;
        }
        Ok(placed)
    }

    pub fn begin_drag_from_list(&mut self, piece: PieceId) -> Result<bool, PlannerError> {
        let piece = self
            .catalog
            .piece(piece)
            .ok_or(PlannerError::UnknownPiece(piece))?
            .piece_ref();
        Ok(self.drag.begin(DragSource::List { piece }))
    }

    pub fn begin_drag_from_slot(&mut self, slot: SlotIndex) -> bool {
        if self.board.occupant(slot).is_none() {
            return false;
        }
        self.drag.begin(DragSource::Slot { index: slot })
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    pub fn drop_on(&mut self, target: SlotIndex) -> Result<DropOutcome, PlannerError> {
        Ok(self.drag.drop_on(&mut self.board, target)?)
    }

    pub fn export_layout(&self) -> String {
        encode_layout(&self.board)
    }

    /// All-or-nothing: a decode failure leaves the board exactly as it was.
    pub fn import_layout(&mut self, raw: &str) -> Result<usize, PlannerError> {
        Ok(import_layout(&mut self.board, &self.catalog, raw)?)
    }
}
