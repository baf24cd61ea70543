#![forbid(unsafe_code)]

//! Orientation and placement enums shared by the layout engines.
//!
//! Each enum parses from the integer codes a host toolkit hands over and
//! from lowercase names (for `LNF_*` environment configuration). Unknown
//! values are a configuration bug, so parsing fails loudly with
//! [`OrientationError`] instead of falling back to a default.

use std::fmt;
use std::str::FromStr;

/// How list cells flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListOrientation {
    /// One column, one cell per row.
    #[default]
    Vertical,
    /// Cells fill a column top to bottom, then wrap to the next column.
    VerticalWrap,
    /// Cells fill a row left to right, then wrap to the next row.
    HorizontalWrap,
}

impl ListOrientation {
    /// Whether cells wrap into a grid.
    #[inline]
    pub const fn is_wrapped(self) -> bool {
        !matches!(self, Self::Vertical)
    }
}

/// Reading direction of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentOrientation {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl ComponentOrientation {
    #[inline]
    pub const fn is_left_to_right(self) -> bool {
        matches!(self, Self::LeftToRight)
    }
}

/// Which edge of a tabbed pane carries the tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TabPlacement {
    #[default]
    Top,
    Left,
    Bottom,
    Right,
}

impl TabPlacement {
    /// Tabs on the top or bottom edge flow along x; left/right flow along y.
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// The axis tabs are laid out along inside one run.
    #[inline]
    pub const fn run_axis(self) -> Axis {
        if self.is_horizontal() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }
}

/// How a tabbed pane handles more tabs than fit in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TabLayoutPolicy {
    /// Wrap tabs into several stacked runs.
    #[default]
    Wrap,
    /// Keep a single run and scroll it.
    Scroll,
}

/// Direction of the divider in a split pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SplitOrientation {
    /// Panes side by side (left | right); the divider moves along x.
    #[default]
    Horizontal,
    /// Panes stacked (top / bottom); the divider moves along y.
    Vertical,
}

impl SplitOrientation {
    /// The axis the divider moves along.
    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Horizontal => Axis::Horizontal,
            Self::Vertical => Axis::Vertical,
        }
    }
}

/// A layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

/// The enum an [`OrientationError`] failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationKind {
    List,
    Component,
    TabPlacement,
    TabLayoutPolicy,
    Split,
}

impl fmt::Display for OrientationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list orientation",
            Self::Component => "component orientation",
            Self::TabPlacement => "tab placement",
            Self::TabLayoutPolicy => "tab layout policy",
            Self::Split => "split orientation",
        })
    }
}

/// An orientation/placement value outside the known set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrientationError {
    pub kind: OrientationKind,
    pub value: String,
}

impl OrientationError {
    fn new(kind: OrientationKind, value: impl fmt::Display) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for OrientationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: `{}`", self.kind, self.value)
    }
}

impl std::error::Error for OrientationError {}

fn normalized(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace('_', "-")
}

impl TryFrom<i32> for ListOrientation {
    type Error = OrientationError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Vertical),
            1 => Ok(Self::VerticalWrap),
            2 => Ok(Self::HorizontalWrap),
            other => Err(OrientationError::new(OrientationKind::List, other)),
        }
    }
}

impl FromStr for ListOrientation {
    type Err = OrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "vertical" => Ok(Self::Vertical),
            "vertical-wrap" => Ok(Self::VerticalWrap),
            "horizontal-wrap" => Ok(Self::HorizontalWrap),
            _ => Err(OrientationError::new(OrientationKind::List, s)),
        }
    }
}

impl FromStr for ComponentOrientation {
    type Err = OrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "ltr" | "left-to-right" => Ok(Self::LeftToRight),
            "rtl" | "right-to-left" => Ok(Self::RightToLeft),
            _ => Err(OrientationError::new(OrientationKind::Component, s)),
        }
    }
}

impl TryFrom<i32> for TabPlacement {
    type Error = OrientationError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Top),
            2 => Ok(Self::Left),
            3 => Ok(Self::Bottom),
            4 => Ok(Self::Right),
            other => Err(OrientationError::new(OrientationKind::TabPlacement, other)),
        }
    }
}

impl FromStr for TabPlacement {
    type Err = OrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "top" => Ok(Self::Top),
            "left" => Ok(Self::Left),
            "bottom" => Ok(Self::Bottom),
            "right" => Ok(Self::Right),
            _ => Err(OrientationError::new(OrientationKind::TabPlacement, s)),
        }
    }
}

impl TryFrom<i32> for TabLayoutPolicy {
    type Error = OrientationError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Wrap),
            1 => Ok(Self::Scroll),
            other => Err(OrientationError::new(OrientationKind::TabLayoutPolicy, other)),
        }
    }
}

impl FromStr for TabLayoutPolicy {
    type Err = OrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "wrap" => Ok(Self::Wrap),
            "scroll" => Ok(Self::Scroll),
            _ => Err(OrientationError::new(OrientationKind::TabLayoutPolicy, s)),
        }
    }
}

impl TryFrom<i32> for SplitOrientation {
    type Error = OrientationError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Vertical),
            1 => Ok(Self::Horizontal),
            other => Err(OrientationError::new(OrientationKind::Split, other)),
        }
    }
}

impl FromStr for SplitOrientation {
    type Err = OrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            _ => Err(OrientationError::new(OrientationKind::Split, s)),
        }
    }
}
