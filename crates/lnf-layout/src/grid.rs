#![forbid(unsafe_code)]

//! Index grid: linear item index ⇄ (row, column).
//!
//! A list with `N` items is laid out as a grid whose shape depends on the
//! [`ListOrientation`]:
//!
//! | orientation       | `row(i)`            | `column(i)`         |
//! |-------------------|---------------------|---------------------|
//! | `Vertical`        | `i`                 | `0`                 |
//! | `VerticalWrap`    | `i % rows`          | `i / rows`          |
//! | `HorizontalWrap`  | `i / columns`       | `i % columns`       |
//!
//! The number of rows (vertical wrap) or columns (horizontal wrap) comes
//! from a [`GridSpan`]: an explicit visible row count, or the available
//! extent divided by the uniform cell extent. An empty list has zero rows
//! and zero columns and answers `None` to every query.
//!
//! Right-to-left components mirror cell x-coordinates at query time with
//! [`mirror_bounds`]; the grid itself is orientation-agnostic.

use lnf_core::geometry::Rect;

use crate::orientation::{ComponentOrientation, ListOrientation};

/// What constrains the grid's run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridSpan {
    /// A configured number of visible rows (must be > 0 to take effect).
    VisibleRows(usize),
    /// Fit as many cells as the available extent allows (minimum one).
    ///
    /// For vertical wrap the extent is the height and the cell extent the
    /// cell height; for horizontal wrap both are widths.
    Fit { available: i32, cell_extent: i32 },
    /// No constraint: a single run holding every item.
    #[default]
    Unconstrained,
}

/// Shape of a laid-out list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexGrid {
    orientation: ListOrientation,
    len: usize,
    rows: usize,
    columns: usize,
}

#[inline]
fn div_ceil(n: usize, d: usize) -> usize {
    if d == 0 { 0 } else { n.div_ceil(d) }
}

impl IndexGrid {
    /// Compute the grid for `len` items.
    #[must_use]
    pub fn new(orientation: ListOrientation, len: usize, span: GridSpan) -> Self {
        let (rows, columns) = if len == 0 {
            (0, 0)
        } else {
            match orientation {
                ListOrientation::Vertical => (len, 1),
                ListOrientation::VerticalWrap => {
                    let rows = match span {
                        GridSpan::VisibleRows(rows) if rows > 0 => rows,
                        GridSpan::Fit {
                            available,
                            cell_extent,
                        } if cell_extent > 0 => (available / cell_extent).max(1) as usize,
                        _ => len,
                    };
                    (rows, div_ceil(len, rows).max(1))
                }
                ListOrientation::HorizontalWrap => {
                    let columns = match span {
                        GridSpan::VisibleRows(rows) if rows > 0 => div_ceil(len, rows).max(1),
                        GridSpan::Fit {
                            available,
                            cell_extent,
                        } if cell_extent > 0 && available > 0 => {
                            (available / cell_extent).max(1) as usize
                        }
                        _ => 1,
                    };
                    (div_ceil(len, columns), columns)
                }
            }
        };
        Self {
            orientation,
            len,
            rows,
            columns,
        }
    }

    /// Orientation the grid was built for.
    #[inline]
    pub const fn orientation(&self) -> ListOrientation {
        self.orientation
    }

    /// Number of items.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the grid holds no items.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Rows per column (the full height of the grid).
    #[inline]
    pub const fn row_count(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub const fn column_count(&self) -> usize {
        self.columns
    }

    /// Row of item `index`.
    pub fn row(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        Some(match self.orientation {
            ListOrientation::Vertical => index,
            ListOrientation::VerticalWrap => index % self.rows,
            ListOrientation::HorizontalWrap => index / self.columns,
        })
    }

    /// Column of item `index`.
    pub fn column(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        Some(match self.orientation {
            ListOrientation::Vertical => 0,
            ListOrientation::VerticalWrap => index / self.rows,
            ListOrientation::HorizontalWrap => index % self.columns,
        })
    }

    /// Item at (`row`, `column`).
    ///
    /// A row past the end of a short last column/row resolves to the last
    /// item, which is what hit testing below the final cell wants. A column
    /// outside the grid has no item.
    pub fn index(&self, row: usize, column: usize) -> Option<usize> {
        if self.len == 0 || column >= self.columns {
            return None;
        }
        let last = self.len - 1;
        Some(match self.orientation {
            ListOrientation::Vertical => row.min(last),
            ListOrientation::VerticalWrap => {
                (self.rows * column + row.min(self.rows - 1)).min(last)
            }
            ListOrientation::HorizontalWrap => {
                row.saturating_mul(self.columns).saturating_add(column).min(last)
            }
        })
    }

    /// Number of populated rows in `column`; zero outside the grid.
    pub fn rows_in_column(&self, column: usize) -> usize {
        if column >= self.columns {
            return 0;
        }
        match self.orientation {
            ListOrientation::Vertical => self.len,
            ListOrientation::VerticalWrap => {
                if column + 1 < self.columns {
                    self.rows
                } else {
                    self.len - column * self.rows
                }
            }
            ListOrientation::HorizontalWrap => {
                div_ceil(self.len.saturating_sub(column), self.columns)
            }
        }
    }
}

/// Mirror a cell rectangle for right-to-left components.
///
/// Left-to-right bounds pass through unchanged.
#[inline]
pub fn mirror_bounds(rect: Rect, total_width: i32, orientation: ComponentOrientation) -> Rect {
    if orientation.is_left_to_right() {
        rect
    } else {
        rect.mirror_x(total_width)
    }
}
