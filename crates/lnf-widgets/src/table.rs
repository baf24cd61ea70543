#![forbid(unsafe_code)]

//! Table cell navigation.
//!
//! Unlike list navigation, row and column moves clamp at the edges: the
//! previous row of the first row is the first row. `Tab`/`Enter` style
//! traversal instead wraps through every cell.

use lnf_core::change::{ChangeEvent, ChangeSink};
use lnf_core::event::{KeyCode, KeyEvent};
use lnf_layout::orientation::ComponentOrientation;

use crate::selection::{DefaultSelectionModel, SelectionModel};

/// Row/column arithmetic for a `rows x columns` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableNavigator {
    rows: usize,
    columns: usize,
}

impl TableNavigator {
    pub const fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn columns(&self) -> usize {
        self.columns
    }

    fn step(value: Option<usize>, delta: isize, count: usize) -> Option<usize> {
        let last = count.checked_sub(1)?;
        let Some(value) = value else {
            return Some(0);
        };
        Some(value.min(last).saturating_add_signed(delta).min(last))
    }

    /// Row `delta` rows away, clamped into the table.
    pub fn move_row(&self, row: Option<usize>, delta: isize) -> Option<usize> {
        Self::step(row, delta, self.rows)
    }

    /// Column `delta` columns away, clamped into the table.
    pub fn move_column(&self, column: Option<usize>, delta: isize) -> Option<usize> {
        Self::step(column, delta, self.columns)
    }

    pub fn last_row(&self) -> Option<usize> {
        self.rows.checked_sub(1)
    }

    pub fn last_column(&self) -> Option<usize> {
        self.columns.checked_sub(1)
    }

    /// Next cell in reading order (`forward`) or reverse, wrapping from the
    /// last cell to the first.
    pub fn next_cell_wrapping(
        &self,
        cell: Option<(usize, usize)>,
        forward: bool,
    ) -> Option<(usize, usize)> {
        let total = self.rows.checked_mul(self.columns)?;
        if total == 0 {
            return None;
        }
        let Some((row, column)) = cell else {
            return Some((0, 0));
        };
        let linear = row.min(self.rows - 1) * self.columns + column.min(self.columns - 1);
        let next = if forward {
            (linear + 1) % total
        } else {
            (linear + total - 1) % total
        };
        Some((next / self.columns, next % self.columns))
    }
}

/// Table delegate: a row and a column selection model driven by keys.
#[derive(Debug, Clone, Default)]
pub struct TableUi {
    navigator: TableNavigator,
    rows: DefaultSelectionModel,
    columns: DefaultSelectionModel,
    visible_rows: usize,
    component_orientation: ComponentOrientation,
}

impl TableUi {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            navigator: TableNavigator::new(rows, columns),
            visible_rows: 10,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_visible_rows(mut self, rows: usize) -> Self {
        self.visible_rows = rows;
        self
    }

    #[must_use]
    pub fn with_component_orientation(mut self, orientation: ComponentOrientation) -> Self {
        self.component_orientation = orientation;
        self
    }

    pub fn navigator(&self) -> &TableNavigator {
        &self.navigator
    }

    pub fn row_selection(&self) -> &DefaultSelectionModel {
        &self.rows
    }

    pub fn column_selection(&self) -> &DefaultSelectionModel {
        &self.columns
    }

    /// Lead cell, if both leads are set.
    pub fn lead_cell(&self) -> Option<(usize, usize)> {
        Some((self.rows.lead()?, self.columns.lead()?))
    }

    pub fn set_visible_rows(&mut self, rows: usize) {
        self.visible_rows = rows;
    }

    /// The table's shape changed. Selections are clamped into it.
    pub fn set_dimensions<K: ChangeSink + ?Sized>(
        &mut self,
        rows: usize,
        columns: usize,
        sink: &mut K,
    ) {
        self.navigator = TableNavigator::new(rows, columns);
        self.rows.clamp_to(rows);
        self.columns.clamp_to(columns);
        sink.notify(ChangeEvent::Revalidate);
        sink.notify(ChangeEvent::Repaint(None));
    }

    /// Select a cell. `extend` selects from the anchors instead.
    pub fn change_selection<K: ChangeSink + ?Sized>(
        &mut self,
        row: usize,
        column: usize,
        extend: bool,
        sink: &mut K,
    ) {
        if extend {
            let row_anchor = self.rows.anchor().unwrap_or(row);
            let column_anchor = self.columns.anchor().unwrap_or(column);
            self.rows.set_selection_interval(row_anchor, row);
            self.columns.set_selection_interval(column_anchor, column);
        } else {
            self.rows.set_selection_interval(row, row);
            self.columns.set_selection_interval(column, column);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "table.selection", row, column, extend);

        sink.notify(ChangeEvent::Repaint(None));
    }

    /// Handle a key press. Returns `true` when the event was consumed.
    pub fn handle_key<K: ChangeSink + ?Sized>(&mut self, key: &KeyEvent, sink: &mut K) -> bool {
        if key.is_release() {
            return false;
        }
        let nav = self.navigator;
        let row = self.rows.lead();
        let column = self.columns.lead();
        let horizontal: isize = if self.component_orientation.is_left_to_right() {
            1
        } else {
            -1
        };
        let page = self.visible_rows.max(1) as isize;

        let target = match key.code {
            KeyCode::Up => nav.move_row(row, -1).zip(nav.move_column(column, 0)),
            KeyCode::Down => nav.move_row(row, 1).zip(nav.move_column(column, 0)),
            KeyCode::Left => nav.move_row(row, 0).zip(nav.move_column(column, -horizontal)),
            KeyCode::Right => nav.move_row(row, 0).zip(nav.move_column(column, horizontal)),
            KeyCode::PageUp => nav.move_row(row, -page).zip(nav.move_column(column, 0)),
            KeyCode::PageDown => nav.move_row(row, page).zip(nav.move_column(column, 0)),
            KeyCode::Home if key.ctrl() => Some(0).zip(nav.move_column(column, 0)),
            KeyCode::End if key.ctrl() => nav.last_row().zip(nav.move_column(column, 0)),
            KeyCode::Home => nav.move_row(row, 0).zip(Some(0)),
            KeyCode::End => nav.move_row(row, 0).zip(nav.last_column()),
            KeyCode::Tab => nav.next_cell_wrapping(self.lead_cell(), true),
            KeyCode::BackTab => nav.next_cell_wrapping(self.lead_cell(), false),
            KeyCode::Enter => {
                let forward = !key.shift();
                let (rows, columns) = (nav.rows(), nav.columns());
                // Enter walks down columns: swap the axes, step, swap back.
                TableNavigator::new(columns, rows)
                    .next_cell_wrapping(self.lead_cell().map(|(r, c)| (c, r)), forward)
                    .map(|(c, r)| (r, c))
            }
            KeyCode::Char('a' | 'A') if key.ctrl() => {
                return self.select_all(sink);
            }
            _ => return false,
        };
        let Some((row, column)) = target.filter(|cell| Some(*cell) != self.lead_cell()) else {
            // Clamped moves at the edge still consume the key.
            return target.is_some();
        };
        let extend = key.shift()
            && !matches!(key.code, KeyCode::Tab | KeyCode::BackTab | KeyCode::Enter);
        self.change_selection(row, column, extend, sink);
        true
    }

    fn select_all<K: ChangeSink + ?Sized>(&mut self, sink: &mut K) -> bool {
        let (Some(last_row), Some(last_column)) =
            (self.navigator.last_row(), self.navigator.last_column())
        else {
            return false;
        };
        let lead = self.lead_cell();
        self.rows.set_selection_interval(0, last_row);
        self.columns.set_selection_interval(0, last_column);
        // Keep the lead where it was.
        if let Some((row, column)) = lead {
            self.rows.move_lead(row);
            self.columns.move_lead(column);
        }
        sink.notify(ChangeEvent::Repaint(None));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lnf_core::event::Modifiers;

    fn events() -> Vec<ChangeEvent> {
        Vec::new()
    }

    #[test]
    fn row_moves_clamp_at_edges() {
        let nav = TableNavigator::new(3, 4);
        assert_eq!(nav.move_row(Some(0), -1), Some(0));
        assert_eq!(nav.move_row(Some(2), 1), Some(2));
        assert_eq!(nav.move_row(Some(1), 5), Some(2));
        assert_eq!(nav.move_row(None, 1), Some(0));
        assert_eq!(TableNavigator::new(0, 4).move_row(None, 1), None);
    }

    #[test]
    fn wrapping_traversal_visits_every_cell() {
        let nav = TableNavigator::new(2, 2);
        assert_eq!(nav.next_cell_wrapping(Some((0, 1)), true), Some((1, 0)));
        assert_eq!(nav.next_cell_wrapping(Some((1, 1)), true), Some((0, 0)));
        assert_eq!(nav.next_cell_wrapping(Some((0, 0)), false), Some((1, 1)));
        assert_eq!(nav.next_cell_wrapping(None, true), Some((0, 0)));
        assert_eq!(TableNavigator::new(0, 3).next_cell_wrapping(None, true), None);
    }

    #[test]
    fn arrows_select_cells_and_shift_extends() {
        let mut table = TableUi::new(5, 3);
        assert!(table.handle_key(&KeyEvent::new(KeyCode::Down), &mut events()));
        assert_eq!(table.lead_cell(), Some((0, 0)));
        assert!(table.handle_key(&KeyEvent::new(KeyCode::Right), &mut events()));
        assert_eq!(table.lead_cell(), Some((0, 1)));
        let shift_down = KeyEvent::new(KeyCode::Down).with_modifiers(Modifiers::SHIFT);
        assert!(table.handle_key(&shift_down, &mut events()));
        assert!(table.handle_key(&shift_down, &mut events()));
        assert_eq!(table.row_selection().selected_indices(), vec![0, 1, 2]);
        assert_eq!(table.lead_cell(), Some((2, 1)));
    }

    #[test]
    fn rtl_flips_left_and_right() {
        let mut table =
            TableUi::new(2, 3).with_component_orientation(ComponentOrientation::RightToLeft);
        table.change_selection(0, 1, false, &mut events());
        assert!(table.handle_key(&KeyEvent::new(KeyCode::Left), &mut events()));
        assert_eq!(table.lead_cell(), Some((0, 2)));
    }

    #[test]
    fn enter_walks_down_then_wraps_to_next_column() {
        let mut table = TableUi::new(2, 2);
        table.change_selection(1, 0, false, &mut events());
        assert!(table.handle_key(&KeyEvent::new(KeyCode::Enter), &mut events()));
        assert_eq!(table.lead_cell(), Some((0, 1)));
        assert!(table.handle_key(&KeyEvent::new(KeyCode::Tab), &mut events()));
        assert_eq!(table.lead_cell(), Some((1, 0)));
    }

    #[test]
    fn page_and_home_end() {
        let mut table = TableUi::new(30, 4).with_visible_rows(10);
        table.change_selection(3, 2, false, &mut events());
        assert!(table.handle_key(&KeyEvent::new(KeyCode::PageDown), &mut events()));
        assert_eq!(table.lead_cell(), Some((13, 2)));
        assert!(table.handle_key(&KeyEvent::new(KeyCode::End), &mut events()));
        assert_eq!(table.lead_cell(), Some((13, 3)));
        let ctrl_home = KeyEvent::new(KeyCode::Home).with_modifiers(Modifiers::CTRL);
        assert!(table.handle_key(&ctrl_home, &mut events()));
        assert_eq!(table.lead_cell(), Some((0, 3)));
    }

    #[test]
    fn select_all_keeps_lead_and_shrink_clamps() {
        let mut table = TableUi::new(4, 3);
        table.change_selection(2, 1, false, &mut events());
        let ctrl_a = KeyEvent::new(KeyCode::Char('a')).with_modifiers(Modifiers::CTRL);
        assert!(table.handle_key(&ctrl_a, &mut events()));
        assert_eq!(table.row_selection().selected_indices(), vec![0, 1, 2, 3]);
        assert_eq!(table.lead_cell(), Some((2, 1)));

        table.set_dimensions(2, 3, &mut events());
        assert!(table.row_selection().selected_indices().iter().all(|&r| r < 2));
        assert!(table.row_selection().lead().is_none_or(|lead| lead < 2));
    }
}
