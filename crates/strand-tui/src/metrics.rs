//! Conversion between engine units and terminal cells.
//!
//! The engine works in pixel-like units (default item width 320). A cell
//! is taken as 10 units wide and 20 units tall, roughly the aspect of a
//! monospace glyph.

/// Units per terminal column.
pub const CELL_WIDTH_PX: i64 = 10;

/// Units per terminal row.
pub const CELL_HEIGHT_PX: i64 = 20;

/// Columns covered by `px` units, rounded down.
pub fn px_to_cols(px: i64) -> i64 {
    px.max(0) / CELL_WIDTH_PX
}

/// Rows covered by `px` units, rounded down.
pub fn px_to_rows(px: i64) -> i64 {
    px.max(0) / CELL_HEIGHT_PX
}

pub fn rows_to_px(rows: i64) -> i64 {
    rows.saturating_mul(CELL_HEIGHT_PX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extents_in_cells() {
        assert_eq!(px_to_cols(320), 32);
        assert_eq!(px_to_rows(200), 10);
        assert_eq!(px_to_cols(960), 96);
    }

    #[test]
    fn test_rounding_and_negatives() {
        assert_eq!(px_to_cols(19), 1);
        assert_eq!(px_to_rows(39), 1);
        assert_eq!(px_to_rows(-40), 0);
    }

    #[test]
    fn test_rows_on_cell_boundaries() {
        for cells in [0, 1, 7, 25] {
            assert_eq!(px_to_rows(rows_to_px(cells)), cells);
        }
    }
}
