#![forbid(unsafe_code)]

//! List delegate.
//!
//! [`ListUi`] ties an externally owned [`ListModel`] to a
//! [`SelectionModel`] and a cached [`ListLayout`]. Input events resolve a
//! navigation target, mutate the selection and push change events; item
//! mutations only invalidate the layout, which is rebuilt on the next
//! geometry query.
//!
//! # Key bindings
//!
//! | key                       | action                                 |
//! |---------------------------|----------------------------------------|
//! | `Up` / `Down`             | previous / next row                    |
//! | `Left` / `Right`          | previous / next column (wrap layouts)  |
//! | `Home` / `End`            | first / last item                      |
//! | `PageUp` / `PageDown`     | one viewport up / down                 |
//! | `Shift` + navigation      | extend from the anchor                 |
//! | `Ctrl` + navigation       | move the lead only                     |
//! | `Ctrl+A`                  | select all                             |
//! | `Ctrl+Space`              | toggle the lead                        |
//! | printable characters      | type-ahead search                      |
//! | `Escape`                  | clear the type-ahead buffer            |

use std::borrow::Cow;

use lnf_core::change::{ChangeEvent, ChangeSink};
use lnf_core::event::{KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind};
use lnf_core::geometry::{Insets, Point, Rect, Size};
use lnf_layout::cache::{CellMeasure, DirtyReasons, ListLayout, ListLayoutConfig};
use lnf_layout::text::{CellTextMetrics, TextMeasure};
use web_time::Instant;

use crate::mouse::MouseResult;
use crate::navigator::{NavContext, NavMode, NavTarget, apply_navigation};
use crate::selection::{DefaultSelectionModel, SelectionCapabilities, SelectionMode, SelectionModel};
use crate::type_ahead::{TypeAhead, TypeAheadConfig};

/// Items shown by a list.
pub trait ListModel {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text used for measurement and type-ahead; `None` past the end.
    fn label(&self, index: usize) -> Option<Cow<'_, str>>;

    /// Whether the item may be selected when extended support is on.
    fn is_choosable(&self, _index: usize) -> bool {
        true
    }
}

impl<T: AsRef<str>> ListModel for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn label(&self, index: usize) -> Option<Cow<'_, str>> {
        self.get(index).map(|item| Cow::Borrowed(item.as_ref()))
    }
}

impl<T: AsRef<str>> ListModel for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn label(&self, index: usize) -> Option<Cow<'_, str>> {
        self.as_slice().label(index)
    }
}

/// Measures list cells.
pub trait CellRenderer {
    fn preferred_size<M: ListModel + ?Sized>(
        &self,
        model: &M,
        index: usize,
        selected: bool,
        focused: bool,
    ) -> Size;
}

/// Renderer measuring the item label with fixed text metrics.
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    pub metrics: CellTextMetrics,
    pub padding: Insets,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            metrics: CellTextMetrics::default(),
            padding: Insets::new(1, 2, 1, 2),
        }
    }
}

impl CellRenderer for TextRenderer {
    fn preferred_size<M: ListModel + ?Sized>(
        &self,
        model: &M,
        index: usize,
        _selected: bool,
        _focused: bool,
    ) -> Size {
        let text = model
            .label(index)
            .map_or(Size::new(0, self.metrics.line_height), |label| {
                self.metrics.measure(&label)
            });
        Size::new(
            text.width + self.padding.horizontal_sum(),
            text.height + self.padding.vertical_sum(),
        )
    }
}

/// Adapter exposing a model and renderer to the layout cache.
pub struct ListCells<'a, M: ?Sized, R: ?Sized, S: ?Sized> {
    model: &'a M,
    renderer: &'a R,
    selection: &'a S,
    focused: bool,
}

impl<'a, M: ?Sized, R: ?Sized, S: ?Sized> ListCells<'a, M, R, S> {
    pub fn new(model: &'a M, renderer: &'a R, selection: &'a S, focused: bool) -> Self {
        Self {
            model,
            renderer,
            selection,
            focused,
        }
    }
}

impl<M, R, S> CellMeasure for ListCells<'_, M, R, S>
where
    M: ListModel + ?Sized,
    R: CellRenderer + ?Sized,
    S: SelectionModel + ?Sized,
{
    fn cell_count(&self) -> usize {
        self.model.len()
    }

    fn preferred_size(&self, index: usize) -> Size {
        let focused = self.focused && self.selection.lead() == Some(index);
        self.renderer.preferred_size(
            self.model,
            index,
            self.selection.is_selected(index),
            focused,
        )
    }
}

/// List delegate state.
#[derive(Debug, Clone)]
pub struct ListUi<S: SelectionModel = DefaultSelectionModel> {
    layout: ListLayout,
    selection: S,
    lead_only: bool,
    type_ahead: TypeAhead,
    extended_support: bool,
    visible: Rect,
    focused: bool,
    dragging: bool,
}

impl Default for ListUi {
    fn default() -> Self {
        Self::new(ListLayoutConfig::default())
    }
}

impl ListUi {
    pub fn new(config: ListLayoutConfig) -> Self {
        Self::with_selection_model(config, DefaultSelectionModel::default())
    }
}

impl<S: SelectionModel> ListUi<S> {
    pub fn with_selection_model(config: ListLayoutConfig, selection: S) -> Self {
        let lead_only = selection
            .capabilities()
            .contains(SelectionCapabilities::MOVE_LEAD_ONLY);
        Self {
            layout: ListLayout::new(config),
            selection,
            lead_only,
            type_ahead: TypeAhead::default(),
            extended_support: false,
            visible: Rect::default(),
            focused: false,
            dragging: false,
        }
    }

    #[must_use]
    pub fn with_type_ahead(mut self, config: TypeAheadConfig) -> Self {
        self.type_ahead = TypeAhead::new(config);
        self
    }

    #[must_use]
    pub fn with_extended_support(mut self, enabled: bool) -> Self {
        self.extended_support = enabled;
        self
    }

    pub fn selection(&self) -> &S {
        &self.selection
    }

    /// Direct access to the selection model. Callers are responsible for
    /// requesting a repaint.
    pub fn selection_mut(&mut self) -> &mut S {
        &mut self.selection
    }

    /// Swap the selection model.
    pub fn set_selection_model<K: ChangeSink + ?Sized>(&mut self, selection: S, sink: &mut K) -> S {
        self.lead_only = selection
            .capabilities()
            .contains(SelectionCapabilities::MOVE_LEAD_ONLY);
        let old = std::mem::replace(&mut self.selection, selection);
        self.invalidate(DirtyReasons::SELECTION_MODEL, sink);
        old
    }

    pub fn layout(&self) -> &ListLayout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut ListLayout {
        &mut self.layout
    }

    pub fn type_ahead(&self) -> &TypeAhead {
        &self.type_ahead
    }

    /// Timer callback clearing the type-ahead buffer.
    pub fn reset_type_ahead(&mut self) {
        self.type_ahead.reset();
    }

    pub fn extended_support(&self) -> bool {
        self.extended_support
    }

    pub fn set_extended_support(&mut self, enabled: bool) {
        self.extended_support = enabled;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused<K: ChangeSink + ?Sized>(&mut self, focused: bool, sink: &mut K) {
        if self.focused != focused {
            self.focused = focused;
            sink.notify(ChangeEvent::Repaint(None));
        }
    }

    /// Part of the list currently shown by the enclosing viewport.
    pub fn visible_rect(&self) -> Rect {
        if self.visible.is_empty() {
            let size = self.layout.viewport();
            Rect::from_size(size.width, size.height)
        } else {
            self.visible
        }
    }

    pub fn set_visible_rect(&mut self, visible: Rect) {
        self.visible = visible;
    }

    /// The list component was resized.
    pub fn resize<K: ChangeSink + ?Sized>(&mut self, size: Size, sink: &mut K) {
        self.layout.set_viewport(size);
        if self.layout.is_dirty() {
            sink.notify(ChangeEvent::Revalidate);
        }
    }

    /// Mark layout inputs stale (font, renderer, fixed sizes, ...).
    pub fn invalidate<K: ChangeSink + ?Sized>(&mut self, reasons: DirtyReasons, sink: &mut K) {
        self.layout.invalidate(reasons);
        sink.notify(ChangeEvent::Revalidate);
        sink.notify(ChangeEvent::Repaint(None));
    }

    // ── Geometry ─────────────────────────────────────────────────────────

    pub fn preferred_size<M, R>(&mut self, model: &M, renderer: &R) -> Size
    where
        M: ListModel + ?Sized,
        R: CellRenderer + ?Sized,
    {
        let cells = ListCells::new(model, renderer, &self.selection, self.focused);
        self.layout.preferred_size(&cells)
    }

    /// Bounds of item `index`.
    pub fn cell_bounds<M, R>(&mut self, model: &M, renderer: &R, index: usize) -> Option<Rect>
    where
        M: ListModel + ?Sized,
        R: CellRenderer + ?Sized,
    {
        let cells = ListCells::new(model, renderer, &self.selection, self.focused);
        self.layout.bounds(&cells, index)
    }

    /// Union of the bounds of items `a..=b` in either order.
    pub fn range_bounds<M, R>(
        &mut self,
        model: &M,
        renderer: &R,
        a: usize,
        b: usize,
    ) -> Option<Rect>
    where
        M: ListModel + ?Sized,
        R: CellRenderer + ?Sized,
    {
        let cells = ListCells::new(model, renderer, &self.selection, self.focused);
        self.layout.bounds_range(&cells, a, b)
    }

    /// Item whose cell contains `point`.
    pub fn index_at<M, R>(&mut self, model: &M, renderer: &R, point: Point) -> Option<usize>
    where
        M: ListModel + ?Sized,
        R: CellRenderer + ?Sized,
    {
        let cells = ListCells::new(model, renderer, &self.selection, self.focused);
        self.layout.index_at(&cells, point)
    }

    /// Item whose cell is closest to `point`.
    pub fn location_to_index<M, R>(
        &mut self,
        model: &M,
        renderer: &R,
        point: Point,
    ) -> Option<usize>
    where
        M: ListModel + ?Sized,
        R: CellRenderer + ?Sized,
    {
        let cells = ListCells::new(model, renderer, &self.selection, self.focused);
        self.layout.nearest_index(&cells, point)
    }

    /// Ask the host to scroll item `index` into view.
    pub fn ensure_index_visible<M, R, K>(
        &mut self,
        model: &M,
        renderer: &R,
        index: usize,
        sink: &mut K,
    ) where
        M: ListModel + ?Sized,
        R: CellRenderer + ?Sized,
        K: ChangeSink + ?Sized,
    {
        if let Some(bounds) = self.cell_bounds(model, renderer, index) {
            sink.notify(ChangeEvent::ScrollRectToVisible(bounds));
        }
    }

    // ── Model notifications ──────────────────────────────────────────────

    /// `count` items were inserted at `index`.
    pub fn items_inserted<K: ChangeSink + ?Sized>(
        &mut self,
        index: usize,
        count: usize,
        sink: &mut K,
    ) {
        if count == 0 {
            return;
        }
        self.selection.insert_index_interval(index, count, true);
        self.invalidate(DirtyReasons::MODEL, sink);
    }

    /// Items `first..=last` were removed; `model` is already updated.
    pub fn items_removed<M, K>(&mut self, first: usize, last: usize, model: &M, sink: &mut K)
    where
        M: ListModel + ?Sized,
        K: ChangeSink + ?Sized,
    {
        self.selection.remove_index_interval(first, last);
        self.selection.clamp_to(model.len());
        self.invalidate(DirtyReasons::MODEL, sink);
    }

    /// Items `first..=last` changed in place.
    pub fn items_changed<K: ChangeSink + ?Sized>(
        &mut self,
        _first: usize,
        _last: usize,
        sink: &mut K,
    ) {
        self.invalidate(DirtyReasons::MODEL, sink);
    }

    // ── Keyboard ─────────────────────────────────────────────────────────

    /// Handle a key press. Returns `true` when the event was consumed.
    pub fn handle_key<M, R, K>(
        &mut self,
        key: &KeyEvent,
        model: &M,
        renderer: &R,
        sink: &mut K,
    ) -> bool
    where
        M: ListModel + ?Sized,
        R: CellRenderer + ?Sized,
        K: ChangeSink + ?Sized,
    {
        self.handle_key_at(key, Instant::now(), model, renderer, sink)
    }

    /// [`handle_key`](Self::handle_key) with an explicit timestamp for
    /// type-ahead timing.
    pub fn handle_key_at<M, R, K>(
        &mut self,
        key: &KeyEvent,
        now: Instant,
        model: &M,
        renderer: &R,
        sink: &mut K,
    ) -> bool
    where
        M: ListModel + ?Sized,
        R: CellRenderer + ?Sized,
        K: ChangeSink + ?Sized,
    {
        if key.is_release() {
            return false;
        }
        let target = match key.code {
            KeyCode::Up => NavTarget::PreviousRow,
            KeyCode::Down => NavTarget::NextRow,
            KeyCode::Left => NavTarget::PreviousColumn,
            KeyCode::Right => NavTarget::NextColumn,
            KeyCode::Home => NavTarget::First,
            KeyCode::End => NavTarget::Last,
            KeyCode::PageUp => NavTarget::PageUp,
            KeyCode::PageDown => NavTarget::PageDown,
            KeyCode::Char('a' | 'A') if key.ctrl() && !key.alt() => {
                return self.select_all(model, sink);
            }
            KeyCode::Char(' ') if key.ctrl() => return self.toggle_lead(sink),
            KeyCode::Escape => {
                let had_prefix = !self.type_ahead.prefix().is_empty();
                self.type_ahead.reset();
                return had_prefix;
            }
            KeyCode::Char(ch) if !key.ctrl() && !key.alt() && !key.super_key() => {
                let lead = self.selection.lead();
                let extended = self.extended_support;
                let choosable = |index: usize| !extended || model.is_choosable(index);
                let Some(found) = self.type_ahead.on_char(ch, lead, model, now, choosable) else {
                    return false;
                };
                apply_navigation(&mut self.selection, found, NavMode::Select, self.lead_only);
                self.ensure_index_visible(model, renderer, found, sink);
                sink.notify(ChangeEvent::Repaint(None));
                return true;
            }
            _ => return false,
        };
        let mode = if key.shift() {
            NavMode::Extend
        } else if key.ctrl() {
            NavMode::ChangeLead
        } else {
            NavMode::Select
        };
        self.navigate(target, mode, model, renderer, sink)
    }

    /// Resolve `target` and apply it to the selection.
    pub fn navigate<M, R, K>(
        &mut self,
        target: NavTarget,
        mode: NavMode,
        model: &M,
        renderer: &R,
        sink: &mut K,
    ) -> bool
    where
        M: ListModel + ?Sized,
        R: CellRenderer + ?Sized,
        K: ChangeSink + ?Sized,
    {
        if mode == NavMode::ChangeLead && !self.lead_only {
            return false;
        }
        let visible = self.visible_rect();
        let extended = self.extended_support;
        let choosable = |index: usize| !extended || model.is_choosable(index);
        let cells = ListCells::new(model, renderer, &self.selection, self.focused);
        let grid = self.layout.grid(&cells);
        let bounds = if matches!(target, NavTarget::PageUp | NavTarget::PageDown) {
            self.layout.all_bounds(&cells)
        } else {
            Vec::new()
        };
        let context = NavContext {
            grid: &grid,
            bounds: &bounds,
            visible,
            orientation: self.layout.config().component_orientation,
            choosable: &choosable,
        };
        let Some(index) = context.resolve(target, self.selection.lead()) else {
            return false;
        };
        if !apply_navigation(&mut self.selection, index, mode, self.lead_only) {
            return false;
        }
        self.ensure_index_visible(model, renderer, index, sink);
        sink.notify(ChangeEvent::Repaint(None));
        true
    }

    fn select_all<M, K>(&mut self, model: &M, sink: &mut K) -> bool
    where
        M: ListModel + ?Sized,
        K: ChangeSink + ?Sized,
    {
        let len = model.len();
        if len == 0 {
            return false;
        }
        if self.selection.selection_mode() == SelectionMode::Single {
            let Some(lead) = self.selection.lead() else {
                return false;
            };
            self.selection.set_selection_interval(lead, lead);
        } else {
            self.selection.set_selection_interval(0, len - 1);
        }
        self.log_selection("select_all");
        sink.notify(ChangeEvent::Repaint(None));
        true
    }

    fn toggle_lead<K: ChangeSink + ?Sized>(&mut self, sink: &mut K) -> bool {
        let Some(lead) = self.selection.lead() else {
            return false;
        };
        if self.selection.is_selected(lead) {
            self.selection.remove_selection_interval(lead, lead);
        } else {
            self.selection.add_selection_interval(lead, lead);
        }
        self.log_selection("toggle");
        sink.notify(ChangeEvent::Repaint(None));
        true
    }

    // ── Mouse ────────────────────────────────────────────────────────────

    /// Handle a mouse event at list coordinates.
    pub fn handle_mouse<M, R, K>(
        &mut self,
        event: &MouseEvent,
        model: &M,
        renderer: &R,
        sink: &mut K,
    ) -> MouseResult
    where
        M: ListModel + ?Sized,
        R: CellRenderer + ?Sized,
        K: ChangeSink + ?Sized,
    {
        let result = match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(index) = self.index_at(model, renderer, event.position()) else {
                    return MouseResult::Ignored;
                };
                if self.extended_support && !model.is_choosable(index) {
                    return MouseResult::Ignored;
                }
                self.dragging = true;
                self.press(index, event)
            }
            MouseEventKind::Drag(MouseButton::Left) if self.dragging => {
                let Some(index) = self.location_to_index(model, renderer, event.position()) else {
                    return MouseResult::Ignored;
                };
                if self.selection.lead() == Some(index)
                    || (self.extended_support && !model.is_choosable(index))
                {
                    return MouseResult::Ignored;
                }
                self.drag_to(index)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.dragging = false;
                return MouseResult::Ignored;
            }
            _ => return MouseResult::Ignored,
        };
        sink.notify(ChangeEvent::Repaint(None));
        result
    }

    fn press(&mut self, index: usize, event: &MouseEvent) -> MouseResult {
        let ctrl = event.modifiers.contains(Modifiers::CTRL);
        let shift = event.modifiers.contains(Modifiers::SHIFT);
        let anchor = self.selection.anchor();
        let result = match (ctrl, shift, anchor) {
            (true, true, Some(anchor)) => {
                self.selection.add_selection_interval(anchor, index);
                MouseResult::Extended(index)
            }
            (true, false, _) => {
                if self.selection.is_selected(index) {
                    self.selection.remove_selection_interval(index, index);
                } else {
                    self.selection.add_selection_interval(index, index);
                }
                MouseResult::Toggled(index)
            }
            (false, true, Some(anchor)) => {
                self.selection.set_selection_interval(anchor, index);
                MouseResult::Extended(index)
            }
            _ => {
                self.selection.set_selection_interval(index, index);
                MouseResult::Selected(index)
            }
        };
        self.log_selection("press");
        result
    }

    fn drag_to(&mut self, index: usize) -> MouseResult {
        let result = match (self.selection.selection_mode(), self.selection.anchor()) {
            (SelectionMode::Single, _) | (_, None) => {
                self.selection.set_selection_interval(index, index);
                MouseResult::Selected(index)
            }
            (_, Some(anchor)) => {
                self.selection.set_selection_interval(anchor, index);
                MouseResult::Extended(index)
            }
        };
        self.log_selection("drag");
        result
    }

    #[cfg(feature = "tracing")]
    fn log_selection(&self, action: &str) {
        tracing::debug!(
            message = "list.selection",
            action,
            lead = ?self.selection.lead(),
            anchor = ?self.selection.anchor()
        );
    }

    #[cfg(not(feature = "tracing"))]
    #[inline]
    fn log_selection(&self, _action: &str) {}
}
