#![forbid(unsafe_code)]

//! Keyboard navigation targets for lists.
//!
//! Every function here is stateless: it takes the current lead and the
//! list's [`IndexGrid`] and answers the index the lead should move to, or
//! `None` when there is nothing to do (empty list, no choosable target, or
//! the lead already at a boundary).
//!
//! Row moves follow the flow of the layout: in a vertical-wrap list the row
//! after the bottom of a column is the top of the next column, in a
//! horizontal-wrap list the row after the bottom of a column is the first
//! row of the next column. Plain vertical lists stop at either end.
//!
//! Items that are not [`Choosable`] are stepped over in the direction of
//! travel.

use lnf_core::geometry::Rect;
use lnf_layout::grid::IndexGrid;
use lnf_layout::orientation::{ComponentOrientation, ListOrientation};

use crate::selection::SelectionModel;

/// Whether an item may receive the lead.
pub trait Choosable {
    fn is_choosable(&self, index: usize) -> bool;
}

/// Every index is choosable.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllChoosable;

impl Choosable for AllChoosable {
    #[inline]
    fn is_choosable(&self, _index: usize) -> bool {
        true
    }
}

impl<F: Fn(usize) -> bool> Choosable for F {
    #[inline]
    fn is_choosable(&self, index: usize) -> bool {
        self(index)
    }
}

/// Where a navigation key wants the lead to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavTarget {
    NextRow,
    PreviousRow,
    NextColumn,
    PreviousColumn,
    First,
    Last,
    PageDown,
    PageUp,
}

/// How the selection follows a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NavMode {
    /// Select only the target.
    #[default]
    Select,
    /// Select the interval from the anchor to the target.
    Extend,
    /// Move the lead, leave the selection alone.
    ChangeLead,
}

impl NavMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Extend => "extend",
            Self::ChangeLead => "change_lead",
        }
    }
}

/// Everything a navigation needs to know about the list.
#[derive(Debug, Clone, Copy)]
pub struct NavContext<'a, C: ?Sized> {
    pub grid: &'a IndexGrid,
    /// Cell bounds in index order (as laid out, mirrored or not).
    pub bounds: &'a [Rect],
    /// Visible part of the list, in list coordinates.
    pub visible: Rect,
    pub orientation: ComponentOrientation,
    pub choosable: &'a C,
}

impl<C: Choosable + ?Sized> NavContext<'_, C> {
    /// Resolve `target` relative to `lead`.
    pub fn resolve(&self, target: NavTarget, lead: Option<usize>) -> Option<usize> {
        match target {
            NavTarget::NextRow => next_row(self.grid, lead, self.choosable),
            NavTarget::PreviousRow => previous_row(self.grid, lead, self.choosable),
            NavTarget::NextColumn => {
                next_column(self.grid, lead, self.orientation, self.choosable)
            }
            NavTarget::PreviousColumn => {
                previous_column(self.grid, lead, self.orientation, self.choosable)
            }
            NavTarget::First => first_index(self.grid.len(), self.choosable),
            NavTarget::Last => last_index(self.grid.len(), self.choosable),
            NavTarget::PageDown => {
                page_down(self.bounds, self.grid, lead, self.visible, self.choosable)
            }
            NavTarget::PageUp => {
                page_up(self.bounds, self.grid, lead, self.visible, self.choosable)
            }
        }
    }
}

/// First choosable index.
pub fn first_index<C: Choosable + ?Sized>(len: usize, choosable: &C) -> Option<usize> {
    (0..len).find(|&i| choosable.is_choosable(i))
}

/// Last choosable index.
pub fn last_index<C: Choosable + ?Sized>(len: usize, choosable: &C) -> Option<usize> {
    (0..len).rev().find(|&i| choosable.is_choosable(i))
}

/// Keep stepping until a choosable index turns up or the steps run out.
fn walk<C: Choosable + ?Sized>(
    start: usize,
    choosable: &C,
    step: impl Fn(usize) -> Option<usize>,
) -> Option<usize> {
    let mut index = start;
    loop {
        index = step(index)?;
        if choosable.is_choosable(index) {
            return Some(index);
        }
    }
}

/// One row along the layout flow.
fn step_row(grid: &IndexGrid, index: usize, forward: bool) -> Option<usize> {
    let len = grid.len();
    match grid.orientation() {
        ListOrientation::Vertical | ListOrientation::VerticalWrap => {
            if forward {
                Some(index + 1).filter(|&next| next < len)
            } else {
                index.checked_sub(1)
            }
        }
        ListOrientation::HorizontalWrap => {
            let columns = grid.column_count();
            let column = index % columns;
            if forward {
                if index + columns < len {
                    Some(index + columns)
                } else {
                    // Top of the next column.
                    Some(column + 1).filter(|&next| next < columns && next < len)
                }
            } else if index >= columns {
                Some(index - columns)
            } else {
                // Bottom of the previous column.
                let previous = column.checked_sub(1)?;
                let rows = grid.rows_in_column(previous);
                Some(previous + rows.checked_sub(1)? * columns)
            }
        }
    }
}

fn valid_lead(grid: &IndexGrid, lead: Option<usize>) -> Option<usize> {
    lead.filter(|&lead| lead < grid.len())
}

/// Next row; without a lead, the first choosable item.
pub fn next_row<C: Choosable + ?Sized>(
    grid: &IndexGrid,
    lead: Option<usize>,
    choosable: &C,
) -> Option<usize> {
    match valid_lead(grid, lead) {
        None => first_index(grid.len(), choosable),
        Some(lead) => walk(lead, choosable, |i| step_row(grid, i, true)),
    }
}

/// Previous row; without a lead, the last choosable item.
pub fn previous_row<C: Choosable + ?Sized>(
    grid: &IndexGrid,
    lead: Option<usize>,
    choosable: &C,
) -> Option<usize> {
    match valid_lead(grid, lead) {
        None => last_index(grid.len(), choosable),
        Some(lead) => walk(lead, choosable, |i| step_row(grid, i, false)),
    }
}

/// Same row, adjacent column. Fails past the outer columns and when the
/// target column is too short to have that row.
fn step_column(grid: &IndexGrid, index: usize, delta: isize) -> Option<usize> {
    let columns = grid.column_count();
    if columns <= 1 {
        return None;
    }
    let row = grid.row(index)?;
    let column = grid.column(index)?.checked_add_signed(delta)?;
    if column >= columns || row >= grid.rows_in_column(column) {
        return None;
    }
    grid.index(row, column)
}

fn column_step<C: Choosable + ?Sized>(
    grid: &IndexGrid,
    lead: Option<usize>,
    delta: isize,
    choosable: &C,
) -> Option<usize> {
    let len = grid.len();
    match valid_lead(grid, lead) {
        None => first_index(len, choosable),
        Some(_) if len == 1 => None,
        Some(lead) => walk(lead, choosable, |i| step_column(grid, i, delta)),
    }
}

/// Column to the visual right (left under right-to-left).
pub fn next_column<C: Choosable + ?Sized>(
    grid: &IndexGrid,
    lead: Option<usize>,
    orientation: ComponentOrientation,
    choosable: &C,
) -> Option<usize> {
    let delta = if orientation.is_left_to_right() { 1 } else { -1 };
    column_step(grid, lead, delta, choosable)
}

/// Column to the visual left (right under right-to-left).
pub fn previous_column<C: Choosable + ?Sized>(
    grid: &IndexGrid,
    lead: Option<usize>,
    orientation: ComponentOrientation,
    choosable: &C,
) -> Option<usize> {
    let delta = if orientation.is_left_to_right() { -1 } else { 1 };
    column_step(grid, lead, delta, choosable)
}

/// Items of `lead`'s column, top to bottom.
fn lane(grid: &IndexGrid, lead: usize) -> Vec<usize> {
    let Some(column) = grid.column(lead) else {
        return Vec::new();
    };
    (0..grid.rows_in_column(column))
        .filter_map(|row| grid.index(row, column))
        .collect()
}

/// Lane position of the last (or first) cell fully inside `view`, falling
/// back to a partially visible one.
fn visible_in_lane(lane: &[usize], bounds: &[Rect], view: Rect, last: bool) -> Option<usize> {
    let fully = |&i: &usize| bounds[i].y >= view.y && bounds[i].bottom() <= view.bottom();
    let partly = |&i: &usize| bounds[i].y < view.bottom() && bounds[i].bottom() > view.y;
    if last {
        lane.iter()
            .rposition(fully)
            .or_else(|| lane.iter().rposition(partly))
    } else {
        lane.iter().position(fully).or_else(|| lane.iter().position(partly))
    }
}

/// One viewport down within the lead's column.
///
/// If the lead is above the last fully visible cell, that cell is the
/// target. Otherwise the viewport is moved to start at the lead and the
/// last fully visible cell of the moved viewport is the target.
pub fn page_down<C: Choosable + ?Sized>(
    bounds: &[Rect],
    grid: &IndexGrid,
    lead: Option<usize>,
    visible: Rect,
    choosable: &C,
) -> Option<usize> {
    let len = grid.len();
    if len == 0 || bounds.len() < len {
        return None;
    }
    let Some(lead) = valid_lead(grid, lead) else {
        return first_index(len, choosable);
    };
    let lane = lane(grid, lead);
    let at = lane.iter().position(|&i| i == lead)?;
    if at + 1 >= lane.len() {
        return None;
    }

    let mut target = visible_in_lane(&lane, bounds, visible, true).filter(|&t| t > at);
    if target.is_none() {
        let lead_rect = bounds[lead];
        let moved = Rect::new(visible.x, lead_rect.y, visible.width, visible.height);
        target = visible_in_lane(&lane, bounds, moved, true).filter(|&t| t > at);
    }
    let target = target.unwrap_or(at + 1);

    lane[target..]
        .iter()
        .chain(lane[at + 1..target].iter().rev())
        .copied()
        .find(|&i| choosable.is_choosable(i))
}

/// One viewport up within the lead's column.
pub fn page_up<C: Choosable + ?Sized>(
    bounds: &[Rect],
    grid: &IndexGrid,
    lead: Option<usize>,
    visible: Rect,
    choosable: &C,
) -> Option<usize> {
    let len = grid.len();
    if len == 0 || bounds.len() < len {
        return None;
    }
    let Some(lead) = valid_lead(grid, lead) else {
        return last_index(len, choosable);
    };
    let lane = lane(grid, lead);
    let at = lane.iter().position(|&i| i == lead)?;
    if at == 0 {
        return None;
    }

    let mut target = visible_in_lane(&lane, bounds, visible, false).filter(|&t| t < at);
    if target.is_none() {
        let lead_rect = bounds[lead];
        let moved = Rect::new(
            visible.x,
            lead_rect.bottom() - visible.height,
            visible.width,
            visible.height,
        );
        target = visible_in_lane(&lane, bounds, moved, false).filter(|&t| t < at);
    }
    let target = target.unwrap_or(at - 1);

    lane[..=target]
        .iter()
        .rev()
        .chain(lane[target + 1..at].iter())
        .copied()
        .find(|&i| choosable.is_choosable(i))
}

/// Apply a resolved navigation target to the selection model.
///
/// Returns `false` when nothing changed: [`NavMode::ChangeLead`] on a model
/// without lead-only moves is a no-op.
pub fn apply_navigation<S: SelectionModel + ?Sized>(
    model: &mut S,
    target: usize,
    mode: NavMode,
    lead_only_supported: bool,
) -> bool {
    match mode {
        NavMode::Select => model.set_selection_interval(target, target),
        NavMode::Extend => {
            let anchor = model.anchor().unwrap_or(target);
            model.set_selection_interval(anchor, target);
        }
        NavMode::ChangeLead => {
            if !lead_only_supported {
                return false;
            }
            model.move_lead(target);
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        message = "list.selection",
        action = mode.as_str(),
        lead = target,
        anchor = ?model.anchor()
    );

    true
}
