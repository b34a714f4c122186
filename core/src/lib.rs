pub mod board;
pub mod catalog;
pub mod codec;
pub mod drag;
pub mod planner;
pub mod state;
pub mod synergy;

pub use board::{BoardGeometry, BoardLayout, PLACEABLE_SLOTS, Slot, SlotIndex, TOTAL_SLOTS};
pub use catalog::{
    AttackType, Catalog, CatalogData, CatalogWarning, Piece, PieceId, PieceRecord, PieceRef,
    Quality, RangeType, Synergy, SynergyRecord, TagFilter, UtilityType, sort_for_display,
};
pub use codec::{LayoutError, apply_layout, decode_layout, encode_layout, import_layout};
pub use drag::{DragController, DragSession, DragSource, DropOutcome};
pub use planner::{Planner, PlannerError};
pub use state::{Board, MAX_PIECES, PlacementError};
pub use synergy::{AutoFillError, SynergyStatus, evaluate, missing_members, plan_auto_fill};
