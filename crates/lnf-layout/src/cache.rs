#![forbid(unsafe_code)]

//! Layout cache for list cells.
//!
//! This module provides [`ListLayout`], which owns the per-cell rectangles of
//! a list and recomputes them lazily. Geometry is rebuilt wholesale, at most
//! once per query burst, whenever one of the recorded [`DirtyReasons`] is set.
//!
//! # Overview
//!
//! Measuring every cell through the renderer is the expensive part of list
//! layout. Painting, hit testing, and keyboard navigation all ask for cell
//! bounds many times between model changes, so the measurements and the
//! derived rectangles are kept until something invalidates them.
//!
//! # Usage
//!
//! ```
//! use lnf_core::geometry::{Rect, Size};
//! use lnf_layout::cache::{DirtyReasons, ListLayout, ListLayoutConfig};
//!
//! let sizes = vec![Size::new(40, 10), Size::new(60, 12), Size::new(30, 8)];
//! let mut layout = ListLayout::new(ListLayoutConfig::default());
//!
//! // First query measures and caches.
//! assert_eq!(layout.bounds(&sizes, 1), Some(Rect::new(0, 10, 60, 12)));
//!
//! // The model changed: record why, the next query rebuilds.
//! layout.invalidate(DirtyReasons::MODEL);
//! assert!(layout.is_dirty());
//! ```
//!
//! # Invalidation
//!
//! Setters record a reason only when the value actually changes. External
//! model mutations must be reported with [`ListLayout::invalidate`]; a
//! missing notification leaves stale geometry (queries past the cached
//! item count answer `None`), it never panics.
//!
//! Mutation never rebuilds eagerly. The pipeline is always
//! mutation → invalidate → rebuild on the next query.

use bitflags::bitflags;
use lnf_core::geometry::{Insets, Point, Rect, Size};

use crate::grid::{GridSpan, IndexGrid, mirror_bounds};
use crate::orientation::{ComponentOrientation, ListOrientation};

/// Default number of rows a wrapped list shows before wrapping.
pub const DEFAULT_VISIBLE_ROW_COUNT: usize = 8;

bitflags! {
    /// Why the cached layout is stale.
    ///
    /// Each reason is tracked independently; any non-empty set forces one
    /// full rebuild on the next query, after which the set is cleared.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DirtyReasons: u16 {
        const MODEL                 = 1 << 0;
        const SELECTION_MODEL       = 1 << 1;
        const FONT                  = 1 << 2;
        const FIXED_CELL_WIDTH      = 1 << 3;
        const FIXED_CELL_HEIGHT     = 1 << 4;
        const PROTOTYPE_CELL        = 1 << 5;
        const RENDERER              = 1 << 6;
        const ORIENTATION           = 1 << 7;
        const HEIGHT                = 1 << 8;
        const WIDTH                 = 1 << 9;
        const COMPONENT_ORIENTATION = 1 << 10;
    }
}

impl Default for DirtyReasons {
    fn default() -> Self {
        Self::empty()
    }
}

/// Source of cell measurements.
///
/// Implemented by whatever pairs the item collection with a renderer. The
/// layout only needs the count and each cell's preferred size.
pub trait CellMeasure {
    /// Number of cells.
    fn cell_count(&self) -> usize;

    /// Preferred size of cell `index` (unselected, unfocused).
    fn preferred_size(&self, index: usize) -> Size;
}

impl CellMeasure for [Size] {
    fn cell_count(&self) -> usize {
        self.len()
    }

    fn preferred_size(&self, index: usize) -> Size {
        self[index]
    }
}

impl CellMeasure for Vec<Size> {
    fn cell_count(&self) -> usize {
        self.len()
    }

    fn preferred_size(&self, index: usize) -> Size {
        self[index]
    }
}

/// `count` cells that all measure `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformCells {
    pub count: usize,
    pub size: Size,
}

impl CellMeasure for UniformCells {
    fn cell_count(&self) -> usize {
        self.count
    }

    fn preferred_size(&self, _index: usize) -> Size {
        self.size
    }
}

/// Inputs that shape the layout, other than the cells themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListLayoutConfig {
    pub orientation: ListOrientation,
    pub component_orientation: ComponentOrientation,
    /// Rows shown before wrapping; `0` means "fit the available extent".
    pub visible_row_count: usize,
    /// Fixed cell width; `None` measures every cell.
    pub fixed_cell_width: Option<i32>,
    /// Fixed cell height; `None` measures every cell.
    pub fixed_cell_height: Option<i32>,
    /// Size of a prototype cell, standing in for both fixed dimensions.
    pub prototype_cell: Option<Size>,
    pub insets: Insets,
}

impl Default for ListLayoutConfig {
    fn default() -> Self {
        Self {
            orientation: ListOrientation::Vertical,
            component_orientation: ComponentOrientation::LeftToRight,
            visible_row_count: DEFAULT_VISIBLE_ROW_COUNT,
            fixed_cell_width: None,
            fixed_cell_height: None,
            prototype_cell: None,
            insets: Insets::ZERO,
        }
    }
}

impl ListLayoutConfig {
    #[must_use]
    pub fn with_orientation(mut self, orientation: ListOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_component_orientation(mut self, orientation: ComponentOrientation) -> Self {
        self.component_orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_visible_row_count(mut self, rows: usize) -> Self {
        self.visible_row_count = rows;
        self
    }

    #[must_use]
    pub fn with_fixed_cell_width(mut self, width: Option<i32>) -> Self {
        self.fixed_cell_width = width;
        self
    }

    #[must_use]
    pub fn with_fixed_cell_height(mut self, height: Option<i32>) -> Self {
        self.fixed_cell_height = height;
        self
    }

    #[must_use]
    pub fn with_prototype_cell(mut self, size: Option<Size>) -> Self {
        self.prototype_cell = size;
        self
    }

    #[must_use]
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    /// Load config from environment variables.
    ///
    /// Reads:
    /// - `LNF_LIST_ORIENTATION`: `vertical`, `vertical-wrap`, or `horizontal-wrap`
    /// - `LNF_LIST_VISIBLE_ROWS`: visible row count before wrapping
    ///
    /// Unparseable values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("LNF_LIST_ORIENTATION")
            && let Ok(orientation) = val.parse::<ListOrientation>()
        {
            config.orientation = orientation;
        }

        if let Ok(val) = std::env::var("LNF_LIST_VISIBLE_ROWS")
            && let Ok(rows) = val.parse::<usize>()
        {
            config.visible_row_count = rows;
        }

        config
    }

    /// Effective fixed width: prototype first, then the explicit value.
    fn cell_width_override(&self) -> Option<i32> {
        self.prototype_cell
            .map(|size| size.width)
            .or(self.fixed_cell_width)
            .filter(|width| *width >= 0)
    }

    fn cell_height_override(&self) -> Option<i32> {
        self.prototype_cell
            .map(|size| size.height)
            .or(self.fixed_cell_height)
            .filter(|height| *height >= 0)
    }
}

/// Statistics about cache effectiveness.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListLayoutStats {
    /// Full rebuilds performed.
    pub rebuilds: u64,
    /// Queries served from the cached layout.
    pub hits: u64,
    /// Queries that forced a rebuild first.
    pub misses: u64,
}

impl ListLayoutStats {
    /// Hit rate as a fraction (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Geometry produced by one rebuild.
#[derive(Debug, Clone, Default)]
struct LayoutState {
    grid: IndexGrid,
    /// Unmirrored cell rectangles, one per item.
    rects: Vec<Rect>,
    cell_size: Size,
    preferred: Size,
}

/// Lazily rebuilt list cell geometry.
///
/// One instance per list; there is no shared state between lists.
#[derive(Debug, Clone)]
pub struct ListLayout {
    config: ListLayoutConfig,
    /// Full component size (including insets).
    viewport: Size,
    dirty: DirtyReasons,
    state: Option<LayoutState>,
    stats: ListLayoutStats,
}

impl Default for ListLayout {
    fn default() -> Self {
        Self::new(ListLayoutConfig::default())
    }
}

impl ListLayout {
    /// Create a layout; the first query always builds.
    #[must_use]
    pub fn new(config: ListLayoutConfig) -> Self {
        Self {
            config,
            viewport: Size::ZERO,
            dirty: DirtyReasons::all(),
            state: None,
            stats: ListLayoutStats::default(),
        }
    }

    /// Current configuration.
    #[inline]
    pub fn config(&self) -> &ListLayoutConfig {
        &self.config
    }

    /// Component size the layout was told about.
    #[inline]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Record that cached geometry is stale.
    #[inline]
    pub fn invalidate(&mut self, reasons: DirtyReasons) {
        self.dirty |= reasons;
    }

    /// Pending reasons since the last rebuild.
    #[inline]
    pub fn dirty_reasons(&self) -> DirtyReasons {
        self.dirty
    }

    /// Whether the next query will rebuild.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.state.is_none() || !self.dirty.is_empty()
    }

    /// Cache statistics.
    #[inline]
    pub fn stats(&self) -> &ListLayoutStats {
        &self.stats
    }

    pub fn set_orientation(&mut self, orientation: ListOrientation) {
        if self.config.orientation != orientation {
            self.config.orientation = orientation;
            self.dirty |= DirtyReasons::ORIENTATION;
        }
    }

    pub fn set_component_orientation(&mut self, orientation: ComponentOrientation) {
        if self.config.component_orientation != orientation {
            self.config.component_orientation = orientation;
            self.dirty |= DirtyReasons::COMPONENT_ORIENTATION;
        }
    }

    pub fn set_visible_row_count(&mut self, rows: usize) {
        if self.config.visible_row_count != rows {
            self.config.visible_row_count = rows;
            self.dirty |= DirtyReasons::ORIENTATION;
        }
    }

    pub fn set_fixed_cell_width(&mut self, width: Option<i32>) {
        if self.config.fixed_cell_width != width {
            self.config.fixed_cell_width = width;
            self.dirty |= DirtyReasons::FIXED_CELL_WIDTH;
        }
    }

    pub fn set_fixed_cell_height(&mut self, height: Option<i32>) {
        if self.config.fixed_cell_height != height {
            self.config.fixed_cell_height = height;
            self.dirty |= DirtyReasons::FIXED_CELL_HEIGHT;
        }
    }

    pub fn set_prototype_cell(&mut self, size: Option<Size>) {
        if self.config.prototype_cell != size {
            self.config.prototype_cell = size;
            self.dirty |= DirtyReasons::PROTOTYPE_CELL;
        }
    }

    pub fn set_insets(&mut self, insets: Insets) {
        if self.config.insets != insets {
            self.config.insets = insets;
            self.dirty |= DirtyReasons::WIDTH | DirtyReasons::HEIGHT;
        }
    }

    /// Tell the layout the component's current size.
    pub fn set_viewport(&mut self, size: Size) {
        if self.viewport.width != size.width {
            self.dirty |= DirtyReasons::WIDTH;
        }
        if self.viewport.height != size.height {
            self.dirty |= DirtyReasons::HEIGHT;
        }
        self.viewport = size;
    }

    /// Rebuild if anything is dirty.
    pub fn validate<M: CellMeasure + ?Sized>(&mut self, cells: &M) {
        if self.is_dirty() {
            self.stats.misses += 1;
            self.rebuild(cells);
        } else {
            self.stats.hits += 1;
        }
    }

    fn state<M: CellMeasure + ?Sized>(&mut self, cells: &M) -> &LayoutState {
        self.validate(cells);
        // validate() always leaves a state behind.
        self.state.get_or_insert_with(LayoutState::default)
    }

    /// Grid shape.
    pub fn grid<M: CellMeasure + ?Sized>(&mut self, cells: &M) -> IndexGrid {
        self.state(cells).grid
    }

    /// Uniform cell size (wrap layouts) or widest cell × 0 (vertical with measured heights).
    pub fn cell_size<M: CellMeasure + ?Sized>(&mut self, cells: &M) -> Size {
        self.state(cells).cell_size
    }

    /// Preferred size of the whole list, insets included.
    pub fn preferred_size<M: CellMeasure + ?Sized>(&mut self, cells: &M) -> Size {
        self.state(cells).preferred
    }

    /// Bounds of cell `index`, or `None` outside `[0, N)`.
    pub fn bounds<M: CellMeasure + ?Sized>(&mut self, cells: &M, index: usize) -> Option<Rect> {
        let total_width = self.mirror_width(cells);
        let orientation = self.config.component_orientation;
        let rect = *self.state(cells).rects.get(index)?;
        Some(mirror_bounds(rect, total_width, orientation))
    }

    /// Union of the bounds of every cell between `a` and `b` inclusive,
    /// in either order. `None` if either index is out of range.
    pub fn bounds_range<M: CellMeasure + ?Sized>(
        &mut self,
        cells: &M,
        a: usize,
        b: usize,
    ) -> Option<Rect> {
        let (lo, hi) = (a.min(b), a.max(b));
        let total_width = self.mirror_width(cells);
        let orientation = self.config.component_orientation;
        let rects = &self.state(cells).rects;
        if hi >= rects.len() {
            return None;
        }
        rects[lo..=hi]
            .iter()
            .map(|rect| mirror_bounds(*rect, total_width, orientation))
            .reduce(|acc, rect| acc.union(&rect))
    }

    /// All cell bounds in index order, mirrored for right-to-left.
    pub fn all_bounds<M: CellMeasure + ?Sized>(&mut self, cells: &M) -> Vec<Rect> {
        let total_width = self.mirror_width(cells);
        let orientation = self.config.component_orientation;
        self.state(cells)
            .rects
            .iter()
            .map(|rect| mirror_bounds(*rect, total_width, orientation))
            .collect()
    }

    /// Index of the cell closest to `point`.
    ///
    /// Distance per axis is zero within the cell's span (edges included) and
    /// the gap to the nearest edge otherwise; the two axes are summed. Ties go to the
    /// lowest index. `None` only for an empty list.
    pub fn nearest_index<M: CellMeasure + ?Sized>(
        &mut self,
        cells: &M,
        point: Point,
    ) -> Option<usize> {
        let bounds = self.all_bounds(cells);
        let mut best: Option<(usize, i64)> = None;
        for (index, rect) in bounds.iter().enumerate() {
            let distance = axis_gap(point.x, rect.x, rect.right())
                + axis_gap(point.y, rect.y, rect.bottom());
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Index of the cell containing `point`, if any.
    pub fn index_at<M: CellMeasure + ?Sized>(&mut self, cells: &M, point: Point) -> Option<usize> {
        let total_width = self.mirror_width(cells);
        let component_orientation = self.config.component_orientation;
        // Undo mirroring so the lookup runs in layout space.
        let local = if component_orientation.is_left_to_right() {
            point
        } else {
            Point::new(total_width - point.x - 1, point.y)
        };
        let insets = self.config.insets;
        let state = self.state(cells);
        let candidate = match state.grid.orientation() {
            ListOrientation::Vertical => {
                let at = state.rects.partition_point(|rect| rect.bottom() <= local.y);
                (at < state.rects.len()).then_some(at)
            }
            ListOrientation::VerticalWrap | ListOrientation::HorizontalWrap => {
                let cell = state.cell_size;
                let dx = local.x - insets.left;
                let dy = local.y - insets.top;
                if cell.width <= 0 || cell.height <= 0 || dx < 0 || dy < 0 {
                    None
                } else {
                    state
                        .grid
                        .index((dy / cell.height) as usize, (dx / cell.width) as usize)
                }
            }
        };
        candidate.filter(|&index| state.rects[index].contains(local))
    }

    /// Width used to mirror right-to-left bounds.
    fn mirror_width<M: CellMeasure + ?Sized>(&mut self, cells: &M) -> i32 {
        if self.viewport.width > 0 {
            self.viewport.width
        } else {
            self.state(cells).preferred.width
        }
    }

    fn rebuild<M: CellMeasure + ?Sized>(&mut self, cells: &M) {
        let config = self.config;
        let len = cells.cell_count();
        let insets = config.insets;
        let inner = Rect::new(0, 0, self.viewport.width, self.viewport.height).inner(insets);

        let fixed_width = config.cell_width_override();
        let fixed_height = config.cell_height_override();

        let mut cell_width = fixed_width.unwrap_or(0);
        let mut heights = Vec::new();
        if fixed_width.is_none() || fixed_height.is_none() {
            if fixed_height.is_none() {
                heights.reserve(len);
            }
            for index in 0..len {
                let size = cells.preferred_size(index);
                if fixed_width.is_none() {
                    cell_width = cell_width.max(size.width);
                }
                if fixed_height.is_none() {
                    heights.push(size.height);
                }
            }
        }
        let height_of = |index: usize| fixed_height.unwrap_or_else(|| heights[index]);

        let state = match config.orientation {
            ListOrientation::Vertical => {
                let grid = IndexGrid::new(ListOrientation::Vertical, len, GridSpan::Unconstrained);
                let width = if inner.width > 0 { inner.width } else { cell_width };
                let mut rects = Vec::with_capacity(len);
                let mut y = inner.y;
                for index in 0..len {
                    let height = height_of(index);
                    rects.push(Rect::new(inner.x, y, width, height));
                    y += height;
                }
                LayoutState {
                    grid,
                    rects,
                    cell_size: Size::new(cell_width, fixed_height.unwrap_or(0)),
                    preferred: Size::new(
                        cell_width + insets.horizontal_sum(),
                        (y - inner.y) + insets.vertical_sum(),
                    ),
                }
            }
            orientation @ (ListOrientation::VerticalWrap | ListOrientation::HorizontalWrap) => {
                let cell_height =
                    fixed_height.unwrap_or_else(|| heights.iter().copied().max().unwrap_or(0));
                let span = if config.visible_row_count > 0 {
                    GridSpan::VisibleRows(config.visible_row_count)
                } else if orientation == ListOrientation::VerticalWrap {
                    GridSpan::Fit {
                        available: inner.height,
                        cell_extent: cell_height,
                    }
                } else {
                    GridSpan::Fit {
                        available: inner.width,
                        cell_extent: cell_width,
                    }
                };
                let grid = IndexGrid::new(orientation, len, span);
                let rects = (0..len)
                    .map(|index| {
                        let row = grid.row(index).unwrap_or(0) as i32;
                        let column = grid.column(index).unwrap_or(0) as i32;
                        Rect::new(
                            inner.x + column * cell_width,
                            inner.y + row * cell_height,
                            cell_width,
                            cell_height,
                        )
                    })
                    .collect();
                LayoutState {
                    grid,
                    rects,
                    cell_size: Size::new(cell_width, cell_height),
                    preferred: Size::new(
                        grid.column_count() as i32 * cell_width + insets.horizontal_sum(),
                        grid.row_count() as i32 * cell_height + insets.vertical_sum(),
                    ),
                }
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "list.layout.rebuild",
            reasons = ?self.dirty,
            items = len,
            rows = state.grid.row_count(),
            columns = state.grid.column_count()
        );

        self.state = Some(state);
        self.dirty = DirtyReasons::empty();
        self.stats.rebuilds += 1;
    }
}

/// Gap between `value` and the nearest edge of `[start, end]`.
#[inline]
fn axis_gap(value: i32, start: i32, end: i32) -> i64 {
    if value < start {
        i64::from(start) - i64::from(value)
    } else if value > end {
        i64::from(value) - i64::from(end)
    } else {
        0
    }
}
