//! Property-based invariant tests for list navigation.
//!
//! These tests verify that the navigator:
//!
//! 1. Undoes a row move with the opposite row move.
//! 2. Undoes a column move with the opposite column move, in both reading
//!    directions.
//! 3. Only ever lands on choosable, in-range indices.
//! 4. Fails only at the layout's ends.
//! 5. Pages strictly away from the lead and stays in the lead's column.

use lnf_core::geometry::Rect;
use lnf_layout::grid::{GridSpan, IndexGrid};
use lnf_layout::orientation::{ComponentOrientation, ListOrientation};
use lnf_widgets::navigator::{
    AllChoosable, first_index, last_index, next_column, next_row, page_down, page_up,
    previous_column, previous_row,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn orientation() -> impl Strategy<Value = ListOrientation> {
    prop_oneof![
        Just(ListOrientation::Vertical),
        Just(ListOrientation::VerticalWrap),
        Just(ListOrientation::HorizontalWrap),
    ]
}

fn grid() -> impl Strategy<Value = IndexGrid> {
    (orientation(), 1usize..120, 1usize..12)
        .prop_map(|(o, len, rows)| IndexGrid::new(o, len, GridSpan::VisibleRows(rows)))
}

fn component_orientation() -> impl Strategy<Value = ComponentOrientation> {
    prop_oneof![
        Just(ComponentOrientation::LeftToRight),
        Just(ComponentOrientation::RightToLeft),
    ]
}

/// Uniform cells laid out on the grid, 10 pixels tall and 40 wide.
fn cell_bounds(grid: &IndexGrid) -> Vec<Rect> {
    (0..grid.len())
        .map(|i| {
            let row = grid.row(i).unwrap_or(0) as i32;
            let column = grid.column(i).unwrap_or(0) as i32;
            Rect::new(column * 40, row * 10, 40, 10)
        })
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Moves are reversible
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn previous_row_undoes_next_row(grid in grid(), seed in any::<usize>()) {
        let lead = seed % grid.len();
        if let Some(next) = next_row(&grid, Some(lead), &AllChoosable) {
            prop_assert_eq!(previous_row(&grid, Some(next), &AllChoosable), Some(lead));
        }
        if let Some(previous) = previous_row(&grid, Some(lead), &AllChoosable) {
            prop_assert_eq!(next_row(&grid, Some(previous), &AllChoosable), Some(lead));
        }
    }

    #[test]
    fn previous_column_undoes_next_column(
        grid in grid(),
        seed in any::<usize>(),
        direction in component_orientation(),
    ) {
        let lead = seed % grid.len();
        if let Some(next) = next_column(&grid, Some(lead), direction, &AllChoosable) {
            prop_assert_eq!(
                previous_column(&grid, Some(next), direction, &AllChoosable),
                Some(lead)
            );
            prop_assert_eq!(grid.row(next), grid.row(lead));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Targets respect choosability
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn targets_are_choosable_and_in_range(
        grid in grid(),
        seed in any::<usize>(),
        modulus in 2usize..5,
    ) {
        let lead = seed % grid.len();
        let choosable = |i: usize| i % modulus == 0;
        let ltr = ComponentOrientation::LeftToRight;
        let targets = [
            next_row(&grid, Some(lead), &choosable),
            previous_row(&grid, Some(lead), &choosable),
            next_column(&grid, Some(lead), ltr, &choosable),
            previous_column(&grid, Some(lead), ltr, &choosable),
            first_index(grid.len(), &choosable),
            last_index(grid.len(), &choosable),
        ];
        for target in targets.into_iter().flatten() {
            prop_assert!(target < grid.len());
            prop_assert!(choosable(target));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Failure only at the ends
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn row_moves_fail_only_at_the_ends(grid in grid(), seed in any::<usize>()) {
        let lead = seed % grid.len();
        prop_assert_eq!(
            next_row(&grid, Some(lead), &AllChoosable).is_none(),
            lead == end_of_flow(&grid)
        );
        prop_assert_eq!(previous_row(&grid, Some(lead), &AllChoosable).is_none(), lead == 0);
    }
}

/// Last index in row-flow order: the bottom of the last populated column.
fn end_of_flow(grid: &IndexGrid) -> usize {
    let n = grid.len();
    if grid.orientation() != ListOrientation::HorizontalWrap {
        return n - 1;
    }
    let columns = grid.column_count();
    let last_column = columns.min(n) - 1;
    last_column + (grid.rows_in_column(last_column) - 1) * columns
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Paging
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn paging_moves_away_within_the_column(
        grid in grid(),
        seed in any::<usize>(),
        view_rows in 1i32..8,
        top_row in 0i32..10,
    ) {
        let lead = seed % grid.len();
        let bounds = cell_bounds(&grid);
        let visible = Rect::new(0, top_row * 10, 40 * grid.column_count() as i32, view_rows * 10);
        if let Some(down) = page_down(&bounds, &grid, Some(lead), visible, &AllChoosable) {
            prop_assert!(grid.row(down) > grid.row(lead));
            prop_assert_eq!(grid.column(down), grid.column(lead));
        }
        if let Some(up) = page_up(&bounds, &grid, Some(lead), visible, &AllChoosable) {
            prop_assert!(grid.row(up) < grid.row(lead));
            prop_assert_eq!(grid.column(up), grid.column(lead));
        }
    }
}
