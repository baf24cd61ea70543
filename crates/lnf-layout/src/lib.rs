#![forbid(unsafe_code)]

//! Layout engines for look-and-feel delegates.
//!
//! - [`grid`]: linear index ⇄ (row, column) for vertical and wrapped lists.
//! - [`cache`]: lazily rebuilt per-cell bounds of a list.
//! - [`tab_runs`]: packing tabs into stacked runs.
//! - [`split`]: divider placement between two panes.
//!
//! Everything here is pure computation over [`lnf_core::geometry`] types.
//! Nothing paints and nothing holds a reference to a host component.

pub mod cache;
pub mod grid;
pub mod orientation;
pub mod split;
pub mod tab_runs;
pub mod text;

pub use cache::{CellMeasure, DirtyReasons, ListLayout, ListLayoutConfig, ListLayoutStats};
pub use grid::{GridSpan, IndexGrid, mirror_bounds};
pub use lnf_core::geometry::{Insets, Point, Rect, Size};
pub use orientation::{
    Axis, ComponentOrientation, ListOrientation, OrientationError, OrientationKind,
    SplitOrientation, TabLayoutPolicy, TabPlacement,
};
pub use split::{PaneSizes, SplitConfig, SplitConfigError, SplitLayout};
pub use tab_runs::{TabLabel, TabLayout, TabLayoutConfig, TabRun};
pub use text::{CellTextMetrics, TextMeasure};
