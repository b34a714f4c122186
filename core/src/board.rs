/// Total slot count across both board regions; the layout string's
/// positional contract depends on it.
pub const TOTAL_SLOTS: usize = 232;
/// Slots that accept pieces in the standard geometry.
pub const PLACEABLE_SLOTS: usize = 160;

pub const MAIN_COLS: u8 = 20;

/// Placeable columns per rectangular-region row, 1-based.
const MAIN_PLACEABLE_COLUMNS: [&[u8]; 6] = [
    &[8, 9, 12, 13],
    &[8, 9, 12, 13],
    &[8, 9, 12, 13],
    &[1, 2, 3, 4, 5, 6, 7, 8, 9, 12, 13, 14, 15, 16, 17, 18, 19, 20],
    &[1, 2, 3, 4, 5, 6, 7, 8, 9, 12, 13, 14, 15, 16, 17, 18, 19, 20],
    &[],
];

/// Row widths of the triangular region below the rectangle, all placeable.
const TRIANGLE_ROW_WIDTHS: [u8; 7] = [19, 18, 17, 16, 15, 14, 13];

/// Position of a slot in the topology enumeration order.
pub type SlotIndex = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub row: u8,
    pub col: u8,
    pub placeable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardGeometry {
    /// Columns per rectangular row; every row spans `main_cols`, the listed
    /// columns are the placeable ones.
    pub main_cols: u8,
    pub main_placeable_columns: Vec<Vec<u8>>,
    /// Strictly decreasing widths of the fully placeable triangular rows.
    pub triangle_row_widths: Vec<u8>,
}

impl BoardGeometry {
    pub fn standard() -> Self {
        Self {
            main_cols: MAIN_COLS,
            main_placeable_columns: MAIN_PLACEABLE_COLUMNS
                .iter()
                .map(|columns| columns.to_vec())
                .collect(),
            triangle_row_widths: TRIANGLE_ROW_WIDTHS.to_vec(),
        }
    }
}

/// The fixed ordered slot sequence. Enumeration is row-major, rows 1..N,
/// columns 1..N per row; the codec and the placement store both index by it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardLayout {
    slots: Vec<Slot>,
    placeable_count: usize,
}

impl BoardLayout {
    pub fn standard() -> Self {
        Self::from_geometry(&BoardGeometry::standard())
    }

    pub fn from_geometry(geometry: &BoardGeometry) -> Self {
        let mut slots = Vec::new();
        for (row_index, columns) in geometry.main_placeable_columns.iter().enumerate() {
            let row = row_index as u8 + 1;
            for col in 1..=geometry.main_cols {
                slots.push(Slot {
                    row,
                    col,
                    placeable: columns.contains(&col),
                });
            }
        }
        let first_triangle_row = geometry.main_placeable_columns.len() as u8 + 1;
        for (offset, width) in geometry.triangle_row_widths.iter().enumerate() {
            let row = first_triangle_row + offset as u8;
            for col in 1..=*width {
                slots.push(Slot {
                    row,
                    col,
                    placeable: true,
                });
            }
        }
        let placeable_count = slots.iter().filter(|slot| slot.placeable).count();
        Self {
            slots,
            placeable_count,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, index: SlotIndex) -> Option<Slot> {
        self.slots.get(index).copied()
    }

    pub fn placeable_count(&self) -> usize {
        self.placeable_count
    }

    pub fn index_of(&self, row: u8, col: u8) -> Option<SlotIndex> {
        self.slots
            .iter()
            .position(|slot| slot.row == row && slot.col == col)
    }
}
