use std::collections::BTreeSet;

use crate::board::SlotIndex;
use crate::catalog::{Catalog, PieceRef, Synergy};
use crate::state::{Board, MAX_PIECES};

#[derive(Clone, Debug)]
pub struct SynergyStatus<'a> {
    pub synergy: &'a Synergy,
    /// Unique occupant names that belong to the synergy's member set.
    pub count: usize,
    pub activated: bool,
    /// Every declared member is on the board.
    pub maxed: bool,
}

/// Status for every catalog synergy, activated entries first, descending
/// count within each partition. The sort is stable, so ties keep catalog
/// declaration order.
pub fn evaluate<'a>(catalog: &'a Catalog, unique_names: &BTreeSet<&str>) -> Vec<SynergyStatus<'a>> {
    let mut statuses: Vec<SynergyStatus<'a>> = catalog
        .synergies()
        .iter()
        .map(|synergy| {
            let count = synergy
                .members
                .iter()
                .filter(|member| unique_names.contains(member.as_str()))
                .count();
            SynergyStatus {
                synergy,
                count,
                activated: count >= synergy.required_count,
                maxed: count >= synergy.members.len(),
            }
        })
        .collect();
    statuses.sort_by(|a, b| {
        b.activated
            .cmp(&a.activated)
            .then(b.count.cmp(&a.count))
    });
    statuses
}

/// Members of `synergy` not on the board, in declared member order. Names
/// the catalog cannot resolve were already warned at load and are skipped.
pub fn missing_members<'a>(
    catalog: &Catalog,
    synergy: &'a Synergy,
    unique_names: &BTreeSet<&str>,
) -> Vec<&'a str> {
    synergy
        .members
        .iter()
        .filter(|member| catalog.piece_by_name(member).is_some())
        .filter(|member| !unique_names.contains(member.as_str()))
        .map(String::as_str)
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AutoFillError {
    #[error("filling would exceed the population cap ({cap})")]
    PopulationCapExceeded { cap: usize },
    #[error("not enough empty board slots ({available} free, {needed} needed)")]
    InsufficientEmptySlots { needed: usize, available: usize },
}

/// All-or-nothing placement plan that completes `synergy` on `board`: each
/// missing member paired with an empty placeable slot in topology order. An
/// empty plan means the synergy is already complete. The board is never
/// touched here; on error nothing may be applied.
pub fn plan_auto_fill(
    board: &Board,
    catalog: &Catalog,
    synergy: &Synergy,
) -> Result<Vec<(SlotIndex, PieceRef)>, AutoFillError> {
    let unique_names = board.unique_names();
    let missing = missing_members(catalog, synergy, &unique_names);
    if missing.is_empty() {
        return Ok(Vec::new());
    }
    if board.occupied_count() + missing.len() > MAX_PIECES {
        return Err(AutoFillError::PopulationCapExceeded { cap: MAX_PIECES });
    }
    let empty_slots = board.empty_placeable_slots();
    if empty_slots.len() < missing.len() {
        return Err(AutoFillError::InsufficientEmptySlots {
            needed: missing.len(),
            available: empty_slots.len(),
        });
    }
    let mut plan = Vec::with_capacity(missing.len());
    for (name, slot) in missing.iter().zip(empty_slots) {
        if let Some(piece) = catalog.piece_by_name(name) {
            plan.push((slot, piece.piece_ref()));
        }
    }
    Ok(plan)
}
