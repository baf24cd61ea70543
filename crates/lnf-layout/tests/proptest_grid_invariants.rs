//! Property-based invariant tests for the list index grid.
//!
//! These tests verify that [`IndexGrid`] correctly implements:
//!
//! 1. `index(row(i), column(i)) == i` for every orientation and span.
//! 2. Wrapped grids hold every item without a spare run.
//! 3. `rows_in_column` partitions the items.
//! 4. Every item's row lies inside its column.
//! 5. Out-of-range queries answer `None` rather than panicking.

use lnf_layout::grid::{GridSpan, IndexGrid};
use lnf_layout::orientation::ListOrientation;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn orientation() -> impl Strategy<Value = ListOrientation> {
    prop_oneof![
        Just(ListOrientation::Vertical),
        Just(ListOrientation::VerticalWrap),
        Just(ListOrientation::HorizontalWrap),
    ]
}

fn span() -> impl Strategy<Value = GridSpan> {
    prop_oneof![
        (0usize..20).prop_map(GridSpan::VisibleRows),
        (-10i32..500, -5i32..50).prop_map(|(available, cell_extent)| GridSpan::Fit {
            available,
            cell_extent,
        }),
        Just(GridSpan::Unconstrained),
    ]
}

fn grid() -> impl Strategy<Value = IndexGrid> {
    (orientation(), 0usize..300, span()).prop_map(|(o, len, span)| IndexGrid::new(o, len, span))
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Round trip through (row, column)
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn index_of_row_and_column_is_identity(grid in grid()) {
        for i in 0..grid.len() {
            let row = grid.row(i).expect("row in range");
            let column = grid.column(i).expect("column in range");
            prop_assert_eq!(grid.index(row, column), Some(i));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Grid capacity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn wrapped_grid_has_no_spare_run(grid in grid()) {
        let n = grid.len();
        let (rows, columns) = (grid.row_count(), grid.column_count());
        if n == 0 {
            prop_assert_eq!((rows, columns), (0, 0));
        } else {
            prop_assert!(rows * columns >= n);
            match grid.orientation() {
                ListOrientation::Vertical => prop_assert_eq!((rows, columns), (n, 1)),
                ListOrientation::VerticalWrap => prop_assert!(rows * columns - rows < n),
                ListOrientation::HorizontalWrap => prop_assert!(rows * columns - columns < n),
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-4. Column population
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rows_in_column_partitions_items(grid in grid()) {
        let total: usize = (0..grid.column_count()).map(|c| grid.rows_in_column(c)).sum();
        prop_assert_eq!(total, grid.len());
    }

    #[test]
    fn item_row_is_within_its_column(grid in grid()) {
        for i in 0..grid.len() {
            let row = grid.row(i).expect("row in range");
            let column = grid.column(i).expect("column in range");
            prop_assert!(row < grid.rows_in_column(column));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Out-of-range queries
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn out_of_range_is_none(grid in grid(), extra in 0usize..50, row in 0usize..1000) {
        prop_assert_eq!(grid.row(grid.len() + extra), None);
        prop_assert_eq!(grid.column(grid.len() + extra), None);
        prop_assert_eq!(grid.index(row, grid.column_count() + extra), None);
        prop_assert_eq!(grid.rows_in_column(grid.column_count() + extra), 0);
    }
}
