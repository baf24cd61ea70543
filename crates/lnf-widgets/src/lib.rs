#![forbid(unsafe_code)]

//! UI delegates for lists, tables, tabbed panes and split panes.
//!
//! A delegate owns the widget's interaction state and the cached geometry
//! from [`lnf_layout`]. The host toolkit feeds it key and mouse events and
//! model notifications; the delegate answers with selection changes and
//! [`lnf_core::change::ChangeEvent`]s pushed into a
//! [`lnf_core::change::ChangeSink`]. Painting stays with the host.
//!
//! The pipeline is always mutation, then invalidation, then a lazy rebuild
//! on the next geometry query.

pub mod list;
pub mod mouse;
pub mod navigator;
pub mod selection;
pub mod split_pane;
pub mod tabbed_pane;
pub mod table;
pub mod type_ahead;

pub use list::{CellRenderer, ListCells, ListModel, ListUi, TextRenderer};
pub use mouse::MouseResult;
pub use navigator::{AllChoosable, Choosable, NavContext, NavMode, NavTarget};
pub use selection::{
    DefaultSelectionModel, SelectionCapabilities, SelectionMode, SelectionModel,
};
pub use split_pane::{CollapseEdge, SplitPaneUi};
pub use tabbed_pane::{TabSpec, TabbedPaneUi};
pub use table::{TableNavigator, TableUi};
pub use type_ahead::{TypeAhead, TypeAheadConfig};
