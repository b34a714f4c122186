use std::iter;

use crate::catalog::{Catalog, PieceId};
use crate::state::{Board, MAX_PIECES};

/// Token prefix for a run of consecutive empty slots.
pub const EMPTY_RUN_MARKER: char = 'z';

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout expands to {found} slots, expected {expected}")]
    InvalidLength { expected: usize, found: usize },
    #[error("unrecognized layout token \"{token}\"")]
    InvalidToken { token: String },
}

/// Comma-joined tokens over every slot in topology order: `z<len>` for an
/// empty run (trailing runs included), the piece id for an occupied slot.
pub fn encode_layout(board: &Board) -> String {
    let mut tokens: Vec<String> = Vec::new();
    let mut empty_run = 0usize;
    for occupant in board.occupants() {
        match occupant {
            Some(piece) => {
                if empty_run > 0 {
                    tokens.push(format!("{EMPTY_RUN_MARKER}{empty_run}"));
                    empty_run = 0;
                }
                tokens.push(piece.id.to_string());
            }
            None => empty_run += 1,
        }
    }
    if empty_run > 0 {
        tokens.push(format!("{EMPTY_RUN_MARKER}{empty_run}"));
    }
    tokens.join(",")
}

/// Expands a layout string into one cell per slot. Empty tokens are skipped;
/// the expanded count must equal `expected_len` exactly. Nothing here touches
/// a board, so a failed decode cannot corrupt state.
pub fn decode_layout(raw: &str, expected_len: usize) -> Result<Vec<Option<PieceId>>, LayoutError> {
    let mut cells: Vec<Option<PieceId>> = Vec::with_capacity(expected_len);
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if let Some(run) = token.strip_prefix(EMPTY_RUN_MARKER) {
            let length: usize = run.parse().map_err(|_| LayoutError::InvalidToken {
                token: token.to_string(),
            })?;
            cells.extend(iter::repeat_n(None, length));
        } else {
            let id: PieceId = token.parse().map_err(|_| LayoutError::InvalidToken {
                token: token.to_string(),
            })?;
            cells.push(Some(id));
        }
    }
    if cells.len() != expected_len {
        return Err(LayoutError::InvalidLength {
            expected: expected_len,
            found: cells.len(),
        });
    }
    Ok(cells)
}

/// Replaces the board's contents with the decoded cells. Ids unknown to the
/// catalog, cells landing on non-placeable slots, and cells beyond the
/// population cap are skipped silently. Returns the number of pieces placed.
pub fn apply_layout(board: &mut Board, catalog: &Catalog, cells: &[Option<PieceId>]) -> usize {
    board.clear();
    let mut placed = 0usize;
    for (index, cell) in cells.iter().enumerate() {
        let Some(id) = cell else { continue };
        if placed >= MAX_PIECES {
            break;
        }
        let Some(piece) = catalog.piece(*id) else {
            continue;
        };
        let placeable = board
            .layout()
            .slot(index)
            .map(|slot| slot.placeable)
            .unwrap_or(false);
        if !placeable {
            continue;
        }
        if board.place(index, piece.piece_ref()).is_ok() {
            placed += 1;
        }
    }
    placed
}

/// Validate-then-apply import. The board is untouched when decoding fails.
pub fn import_layout(board: &mut Board, catalog: &Catalog, raw: &str) -> Result<usize, LayoutError> {
    let cells = decode_layout(raw, board.layout().len())?;
    Ok(apply_layout(board, catalog, &cells))
}
