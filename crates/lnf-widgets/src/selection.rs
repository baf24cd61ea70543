#![forbid(unsafe_code)]

//! Selection models.
//!
//! A [`SelectionModel`] owns the set of selected indices plus the anchor and
//! lead. Delegates mutate it through interval operations; the model keeps
//! its own invariants for the active [`SelectionMode`].
//!
//! Model mutations on the underlying item collection must be mirrored with
//! [`SelectionModel::insert_index_interval`] /
//! [`SelectionModel::remove_index_interval`] followed by
//! [`SelectionModel::clamp_to`], so anchor and lead never point past the
//! end of the collection.

use std::collections::BTreeSet;

use bitflags::bitflags;

/// How many indices may be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum SelectionMode {
    /// At most one index.
    Single,
    /// One contiguous interval.
    SingleInterval,
    /// Any set of indices.
    #[default]
    MultipleInterval,
}

bitflags! {
    /// Optional operations a selection model supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SelectionCapabilities: u8 {
        /// [`SelectionModel::move_lead`] moves the lead without touching the
        /// selected set.
        const MOVE_LEAD_ONLY = 1 << 0;
    }
}

/// Selection state consumed by the list and table delegates.
pub trait SelectionModel {
    fn selection_mode(&self) -> SelectionMode;

    fn set_selection_mode(&mut self, mode: SelectionMode);

    fn is_selected(&self, index: usize) -> bool;

    /// Selected indices in ascending order.
    fn selected_indices(&self) -> Vec<usize>;

    fn min_selection_index(&self) -> Option<usize>;

    fn max_selection_index(&self) -> Option<usize>;

    fn is_selection_empty(&self) -> bool {
        self.min_selection_index().is_none()
    }

    fn anchor(&self) -> Option<usize>;

    fn lead(&self) -> Option<usize>;

    fn set_anchor(&mut self, anchor: Option<usize>);

    /// Replace the selection with `[a, b]` (either order). Anchor becomes
    /// `a`, lead becomes `b`.
    fn set_selection_interval(&mut self, a: usize, b: usize);

    /// Add `[a, b]` to the selection. Anchor becomes `a`, lead becomes `b`.
    fn add_selection_interval(&mut self, a: usize, b: usize);

    /// Remove `[a, b]` from the selection. Anchor becomes `a`, lead `b`.
    fn remove_selection_interval(&mut self, a: usize, b: usize);

    /// Deselect everything; anchor and lead stay.
    fn clear_selection(&mut self);

    /// `length` items were inserted at `index` (`before`) or after it.
    fn insert_index_interval(&mut self, index: usize, length: usize, before: bool);

    /// Items `[a, b]` were removed.
    fn remove_index_interval(&mut self, a: usize, b: usize);

    /// Drop everything at or past `len`.
    fn clamp_to(&mut self, len: usize);

    /// Optional operations this model supports.
    fn capabilities(&self) -> SelectionCapabilities {
        SelectionCapabilities::empty()
    }

    /// Move the lead without changing the selected set.
    ///
    /// Only meaningful when [`SelectionCapabilities::MOVE_LEAD_ONLY`] is
    /// advertised; the default does nothing.
    fn move_lead(&mut self, _index: usize) {}
}

/// [`SelectionModel`] over a sorted index set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct DefaultSelectionModel {
    mode: SelectionMode,
    selected: BTreeSet<usize>,
    anchor: Option<usize>,
    lead: Option<usize>,
}

impl DefaultSelectionModel {
    #[must_use]
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Number of selected indices.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    fn select_range(&mut self, lo: usize, hi: usize) {
        self.selected.extend(lo..=hi);
    }

    fn deselect_range(&mut self, lo: usize, hi: usize) {
        let tail = self.selected.split_off(&lo);
        self.selected
            .extend(tail.into_iter().filter(|&index| index > hi));
    }
}

#[inline]
fn ordered(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

impl SelectionModel for DefaultSelectionModel {
    fn selection_mode(&self) -> SelectionMode {
        self.mode
    }

    fn set_selection_mode(&mut self, mode: SelectionMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        match mode {
            SelectionMode::Single => {
                let keep = self.lead.filter(|lead| self.selected.contains(lead));
                self.selected.clear();
                self.selected.extend(keep);
            }
            SelectionMode::SingleInterval => {
                // Keep the first contiguous interval only.
                let mut kept = BTreeSet::new();
                for &index in &self.selected {
                    if let Some(last) = kept.last().copied()
                        && index != last + 1
                    {
                        break;
                    }
                    kept.insert(index);
                }
                self.selected = kept;
            }
            SelectionMode::MultipleInterval => {}
        }
    }

    fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    fn selected_indices(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    fn min_selection_index(&self) -> Option<usize> {
        self.selected.first().copied()
    }

    fn max_selection_index(&self) -> Option<usize> {
        self.selected.last().copied()
    }

    fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    fn lead(&self) -> Option<usize> {
        self.lead
    }

    fn set_anchor(&mut self, anchor: Option<usize>) {
        self.anchor = anchor;
    }

    fn set_selection_interval(&mut self, a: usize, b: usize) {
        let a = if self.mode == SelectionMode::Single {
            b
        } else {
            a
        };
        self.anchor = Some(a);
        self.lead = Some(b);
        self.selected.clear();
        let (lo, hi) = ordered(a, b);
        self.select_range(lo, hi);
    }

    fn add_selection_interval(&mut self, a: usize, b: usize) {
        if self.mode == SelectionMode::Single {
            self.set_selection_interval(a, b);
            return;
        }
        let (lo, hi) = ordered(a, b);
        if self.mode == SelectionMode::SingleInterval {
            let disjoint = match (self.min_selection_index(), self.max_selection_index()) {
                (Some(min), Some(max)) => hi + 1 < min || lo > max + 1,
                _ => true,
            };
            if disjoint {
                self.set_selection_interval(a, b);
                return;
            }
        }
        self.anchor = Some(a);
        self.lead = Some(b);
        self.select_range(lo, hi);
    }

    fn remove_selection_interval(&mut self, a: usize, b: usize) {
        self.anchor = Some(a);
        self.lead = Some(b);
        let (lo, mut hi) = ordered(a, b);
        // Punching a hole would leave two intervals: remove through the end.
        if self.mode != SelectionMode::MultipleInterval
            && let (Some(min), Some(max)) = (self.min_selection_index(), self.max_selection_index())
            && lo > min
            && hi < max
        {
            hi = max;
        }
        self.deselect_range(lo, hi);
    }

    fn clear_selection(&mut self) {
        self.selected.clear();
    }

    fn insert_index_interval(&mut self, index: usize, length: usize, before: bool) {
        if length == 0 {
            return;
        }
        let first_new = if before { index } else { index + 1 };
        let fill = self.mode != SelectionMode::Single && self.selected.contains(&index);

        let shifted = self.selected.split_off(&first_new);
        self.selected
            .extend(shifted.into_iter().map(|i| i + length));
        if fill {
            self.select_range(first_new, first_new + length - 1);
        }

        let shift = |slot: Option<usize>| {
            slot.map(|i| {
                if i > index || (before && i == index) {
                    i + length
                } else {
                    i
                }
            })
        };
        self.anchor = shift(self.anchor);
        self.lead = shift(self.lead);
    }

    fn remove_index_interval(&mut self, a: usize, b: usize) {
        let (lo, hi) = ordered(a, b);
        let gap = hi - lo + 1;

        let tail = self.selected.split_off(&lo);
        self.selected
            .extend(tail.into_iter().filter(|&i| i > hi).map(|i| i - gap));

        let shift = |slot: Option<usize>| {
            slot.map(|i| {
                if i > hi {
                    i - gap
                } else if i >= lo {
                    lo.saturating_sub(1)
                } else {
                    i
                }
            })
        };
        self.anchor = shift(self.anchor);
        self.lead = shift(self.lead);
    }

    fn clamp_to(&mut self, len: usize) {
        self.selected.retain(|&i| i < len);
        let clamp = |slot: Option<usize>| {
            slot.and_then(|i| len.checked_sub(1).map(|last| i.min(last)))
        };
        self.anchor = clamp(self.anchor);
        self.lead = clamp(self.lead);
    }

    fn capabilities(&self) -> SelectionCapabilities {
        SelectionCapabilities::MOVE_LEAD_ONLY
    }

    fn move_lead(&mut self, index: usize) {
        self.lead = Some(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_mode_keeps_only_lead() {
        let mut model = DefaultSelectionModel::new(SelectionMode::Single);
        model.set_selection_interval(2, 5);
        assert_eq!(model.selected_indices(), vec![5]);
        assert_eq!((model.anchor(), model.lead()), (Some(5), Some(5)));
        model.add_selection_interval(1, 1);
        assert_eq!(model.selected_indices(), vec![1]);
    }

    #[test]
    fn interval_in_either_order() {
        let mut model = DefaultSelectionModel::default();
        model.set_selection_interval(6, 3);
        assert_eq!(model.selected_indices(), vec![3, 4, 5, 6]);
        assert_eq!((model.anchor(), model.lead()), (Some(6), Some(3)));
    }

    #[test]
    fn single_interval_add_replaces_disjoint_range() {
        let mut model = DefaultSelectionModel::new(SelectionMode::SingleInterval);
        model.set_selection_interval(2, 4);
        model.add_selection_interval(5, 6);
        assert_eq!(model.selected_indices(), vec![2, 3, 4, 5, 6]);
        model.add_selection_interval(9, 9);
        assert_eq!(model.selected_indices(), vec![9]);
    }

    #[test]
    fn single_interval_remove_never_splits() {
        let mut model = DefaultSelectionModel::new(SelectionMode::SingleInterval);
        model.set_selection_interval(0, 9);
        model.remove_selection_interval(4, 5);
        assert_eq!(model.selected_indices(), vec![0, 1, 2, 3]);

        let mut multi = DefaultSelectionModel::default();
        multi.set_selection_interval(0, 9);
        multi.remove_selection_interval(4, 5);
        assert_eq!(multi.selected_indices(), vec![0, 1, 2, 3, 6, 7, 8, 9]);
    }

    #[test]
    fn insert_shifts_and_fills_selected_gap() {
        let mut model = DefaultSelectionModel::default();
        model.set_selection_interval(2, 4);
        model.insert_index_interval(3, 2, true);
        assert_eq!(model.selected_indices(), vec![2, 3, 4, 5, 6]);
        assert_eq!((model.anchor(), model.lead()), (Some(2), Some(6)));

        let mut model = DefaultSelectionModel::default();
        model.set_selection_interval(5, 5);
        model.insert_index_interval(1, 3, false);
        assert_eq!(model.selected_indices(), vec![8]);
        assert_eq!(model.lead(), Some(8));
    }

    #[test]
    fn remove_shifts_down_and_parks_lead() {
        let mut model = DefaultSelectionModel::default();
        model.set_selection_interval(1, 7);
        model.remove_index_interval(3, 4);
        assert_eq!(model.selected_indices(), vec![1, 2, 3, 4, 5]);
        assert_eq!(model.lead(), Some(5));

        model.set_selection_interval(3, 3);
        model.remove_index_interval(2, 4);
        assert!(model.is_selection_empty());
        assert_eq!(model.lead(), Some(1));
    }

    #[test]
    fn clamp_drops_out_of_range() {
        let mut model = DefaultSelectionModel::default();
        model.set_selection_interval(2, 8);
        model.clamp_to(5);
        assert_eq!(model.selected_indices(), vec![2, 3, 4]);
        assert_eq!((model.anchor(), model.lead()), (Some(2), Some(4)));
        model.clamp_to(0);
        assert!(model.is_selection_empty());
        assert_eq!((model.anchor(), model.lead()), (None, None));
    }

    #[test]
    fn move_lead_leaves_selection() {
        let mut model = DefaultSelectionModel::default();
        assert!(model.capabilities().contains(SelectionCapabilities::MOVE_LEAD_ONLY));
        model.set_selection_interval(1, 2);
        model.move_lead(7);
        assert_eq!(model.selected_indices(), vec![1, 2]);
        assert_eq!((model.anchor(), model.lead()), (Some(1), Some(7)));
    }

    #[test]
    fn mode_change_trims_selection() {
        let mut model = DefaultSelectionModel::default();
        model.set_selection_interval(1, 3);
        model.add_selection_interval(6, 7);
        model.set_selection_mode(SelectionMode::SingleInterval);
        assert_eq!(model.selected_indices(), vec![1, 2, 3]);
        model.set_selection_mode(SelectionMode::Single);
        assert!(model.is_selection_empty());
    }
}
