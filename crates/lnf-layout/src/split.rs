#![forbid(unsafe_code)]

//! Two-pane split layout with a movable divider.
//!
//! Divider locations are measured along the split axis from the container's
//! own origin, so a location of `insets.left` puts the divider flush with the
//! left inset. The legal range is
//!
//! ```text
//! [start + first.min, end - divider - second.min]
//! ```
//!
//! where `start`/`end` are the container edges minus insets. When both
//! minimums cannot be honoured at once the shortage is taken from both panes
//! equally (the second pane absorbs the odd pixel) and neither pane goes
//! below zero. A missing pane collapses the divider onto that pane's edge.

use std::fmt;

use lnf_core::geometry::{Insets, Rect, Size};

use crate::orientation::{Axis, SplitOrientation};

/// Default divider thickness in pixels.
pub const DEFAULT_DIVIDER_SIZE: i32 = 5;
/// Default distance the divider moves per arrow key.
pub const DEFAULT_KEYBOARD_STEP: i32 = 3;

/// Why a [`SplitConfig`] was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitConfigError {
    /// Divider size below zero.
    NegativeDividerSize(i32),
    /// Keyboard step of zero or less.
    NonPositiveKeyboardStep(i32),
    /// Resize weight outside `[0.0, 1.0]` (or NaN).
    ResizeWeightOutOfRange(f64),
    /// An inset below zero.
    NegativeInsets(Insets),
}

impl fmt::Display for SplitConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeDividerSize(size) => {
                write!(f, "divider size must be >= 0, got {size}")
            }
            Self::NonPositiveKeyboardStep(step) => {
                write!(f, "keyboard step must be > 0, got {step}")
            }
            Self::ResizeWeightOutOfRange(weight) => {
                write!(f, "resize weight must be within [0, 1], got {weight}")
            }
            Self::NegativeInsets(insets) => {
                write!(f, "insets must be non-negative, got {insets:?}")
            }
        }
    }
}

impl std::error::Error for SplitConfigError {}

/// Split pane configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitConfig {
    pub orientation: SplitOrientation,
    pub divider_size: i32,
    pub keyboard_step: i32,
    /// Share of a container resize given to the first pane (0.0 to 1.0).
    pub resize_weight: f64,
    /// Apply every drag step instead of only the release.
    pub continuous_layout: bool,
    pub one_touch_expandable: bool,
    pub insets: Insets,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            orientation: SplitOrientation::Horizontal,
            divider_size: DEFAULT_DIVIDER_SIZE,
            keyboard_step: DEFAULT_KEYBOARD_STEP,
            resize_weight: 0.0,
            continuous_layout: true,
            one_touch_expandable: false,
            insets: Insets::ZERO,
        }
    }
}

impl SplitConfig {
    #[must_use]
    pub fn with_orientation(mut self, orientation: SplitOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_divider_size(mut self, size: i32) -> Self {
        self.divider_size = size;
        self
    }

    #[must_use]
    pub fn with_keyboard_step(mut self, step: i32) -> Self {
        self.keyboard_step = step;
        self
    }

    #[must_use]
    pub fn with_resize_weight(mut self, weight: f64) -> Self {
        self.resize_weight = weight;
        self
    }

    #[must_use]
    pub fn with_continuous_layout(mut self, continuous: bool) -> Self {
        self.continuous_layout = continuous;
        self
    }

    #[must_use]
    pub fn with_one_touch_expandable(mut self, expandable: bool) -> Self {
        self.one_touch_expandable = expandable;
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
    /// - `LNF_SPLIT_DIVIDER_SIZE`: divider thickness in pixels
    /// - `LNF_SPLIT_KEYBOARD_STEP`: arrow-key step in pixels
    ///
    /// Unparseable or out-of-range values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("LNF_SPLIT_DIVIDER_SIZE")
            && let Ok(size) = val.trim().parse::<i32>()
            && size >= 0
        {
            config.divider_size = size;
        }

        if let Ok(val) = std::env::var("LNF_SPLIT_KEYBOARD_STEP")
            && let Ok(step) = val.trim().parse::<i32>()
            && step > 0
        {
            config.keyboard_step = step;
        }

        config
    }

    /// Check the configuration for values the layout cannot honour.
    pub fn validate(&self) -> Result<(), SplitConfigError> {
        if self.divider_size < 0 {
            return Err(SplitConfigError::NegativeDividerSize(self.divider_size));
        }
        if self.keyboard_step <= 0 {
            return Err(SplitConfigError::NonPositiveKeyboardStep(self.keyboard_step));
        }
        if !(0.0..=1.0).contains(&self.resize_weight) {
            return Err(SplitConfigError::ResizeWeightOutOfRange(self.resize_weight));
        }
        let i = self.insets;
        if i.top < 0 || i.left < 0 || i.bottom < 0 || i.right < 0 {
            return Err(SplitConfigError::NegativeInsets(i));
        }
        Ok(())
    }

    #[inline]
    fn axis(&self) -> Axis {
        self.orientation.axis()
    }

    /// Leading and trailing inset along the split axis.
    fn axis_insets(&self) -> (i32, i32) {
        match self.axis() {
            Axis::Horizontal => (self.insets.left, self.insets.right),
            Axis::Vertical => (self.insets.top, self.insets.bottom),
        }
    }

    fn along(&self, size: Size) -> i32 {
        match self.axis() {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    fn across(&self, size: Size) -> i32 {
        match self.axis() {
            Axis::Horizontal => size.height,
            Axis::Vertical => size.width,
        }
    }

    /// `[start, end)` of the usable span along the split axis.
    fn span(&self, container: Size) -> (i32, i32) {
        let (lead, trail) = self.axis_insets();
        let end = (self.along(container) - trail).max(lead);
        (lead, end)
    }
}

/// Size hints of one pane's component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaneSizes {
    pub minimum: Size,
    pub preferred: Size,
}

impl PaneSizes {
    #[must_use]
    pub const fn new(minimum: Size, preferred: Size) -> Self {
        Self { minimum, preferred }
    }
}

/// Smallest legal divider location.
pub fn minimum_divider_location(
    config: &SplitConfig,
    container: Size,
    first: Option<&PaneSizes>,
) -> i32 {
    let (start, _) = config.span(container);
    start + first.map_or(0, |pane| config.along(pane.minimum).max(0))
}

/// Largest legal divider location.
///
/// May be below [`minimum_divider_location`] when the container is too small
/// for both minimums.
pub fn maximum_divider_location(
    config: &SplitConfig,
    container: Size,
    second: Option<&PaneSizes>,
) -> i32 {
    let (_, end) = config.span(container);
    end - config.divider_size - second.map_or(0, |pane| config.along(pane.minimum).max(0))
}

/// Final divider location for a requested one.
///
/// Always lands in `[start, end - divider]` (or `start` when the divider does
/// not fit at all).
pub fn resolve_divider_location(
    config: &SplitConfig,
    container: Size,
    first: Option<&PaneSizes>,
    second: Option<&PaneSizes>,
    requested: i32,
) -> i32 {
    let (start, end) = config.span(container);
    let last = (end - config.divider_size).max(start);
    let (first, second) = match (first, second) {
        (None, _) => return start,
        (Some(_), None) => return last,
        (Some(first), Some(second)) => (first, second),
    };

    let lo = minimum_divider_location(config, container, Some(first));
    let hi = maximum_divider_location(config, container, Some(second));
    if lo <= hi {
        return requested.clamp(lo, hi);
    }

    // Both minimums cannot fit: shrink both panes by half the shortage.
    let available = last - start;
    let first_min = config.along(first.minimum).max(0);
    let second_min = config.along(second.minimum).max(0);
    let shortage = first_min + second_min - available;
    let first_cut = shortage / 2;
    start + (first_min - first_cut).clamp(0, available.max(0))
}

/// Divider location giving the first pane its preferred size.
pub fn preferred_divider_location(
    config: &SplitConfig,
    container: Size,
    first: Option<&PaneSizes>,
    second: Option<&PaneSizes>,
) -> i32 {
    let (start, _) = config.span(container);
    let requested = start + first.map_or(0, |pane| config.along(pane.preferred));
    resolve_divider_location(config, container, first, second, requested)
}

/// Divider location after the container changes size along the split axis.
///
/// The first pane receives `resize_weight` of the change (truncated toward
/// zero), the second pane the rest.
pub fn redistribute_divider_location(
    config: &SplitConfig,
    old_container: Size,
    new_container: Size,
    location: i32,
    first: Option<&PaneSizes>,
    second: Option<&PaneSizes>,
) -> i32 {
    let delta = config.along(new_container) - config.along(old_container);
    let weight = config.resize_weight.clamp(0.0, 1.0);
    let first_delta = (f64::from(delta) * weight) as i32;
    resolve_divider_location(config, new_container, first, second, location + first_delta)
}

/// Preferred size of the whole split pane.
pub fn preferred_size(
    config: &SplitConfig,
    first: Option<&PaneSizes>,
    second: Option<&PaneSizes>,
) -> Size {
    combined_size(config, first.map(|p| p.preferred), second.map(|p| p.preferred))
}

/// Minimum size of the whole split pane.
pub fn minimum_size(
    config: &SplitConfig,
    first: Option<&PaneSizes>,
    second: Option<&PaneSizes>,
) -> Size {
    combined_size(config, first.map(|p| p.minimum), second.map(|p| p.minimum))
}

fn combined_size(config: &SplitConfig, first: Option<Size>, second: Option<Size>) -> Size {
    let a = first.unwrap_or(Size::ZERO);
    let b = second.unwrap_or(Size::ZERO);
    let along = config.along(a) + config.along(b) + config.divider_size;
    let across = config.across(a).max(config.across(b));
    let i = config.insets;
    match config.axis() {
        Axis::Horizontal => Size::new(along + i.horizontal_sum(), across + i.vertical_sum()),
        Axis::Vertical => Size::new(across + i.horizontal_sum(), along + i.vertical_sum()),
    }
}

/// Resolved geometry of a split pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SplitLayout {
    /// Divider location that produced this layout.
    pub location: i32,
    pub first: Option<Rect>,
    pub divider: Rect,
    pub second: Option<Rect>,
}

impl SplitLayout {
    /// Resolve `requested` and compute pane and divider bounds.
    pub fn compute(
        config: &SplitConfig,
        container: Size,
        first: Option<&PaneSizes>,
        second: Option<&PaneSizes>,
        requested: i32,
    ) -> Self {
        let location = resolve_divider_location(config, container, first, second, requested);
        let (start, end) = config.span(container);
        let inner = Rect::from_size(container.width, container.height).inner(config.insets);
        let divider_end = (location + config.divider_size).min(end.max(location));

        let strip = |from: i32, to: i32| -> Rect {
            let len = (to - from).max(0);
            match config.axis() {
                Axis::Horizontal => Rect::new(from, inner.y, len, inner.height),
                Axis::Vertical => Rect::new(inner.x, from, inner.width, len),
            }
        };

        Self {
            location,
            first: first.map(|_| strip(start, location)),
            divider: strip(location, divider_end),
            second: second.map(|_| strip(divider_end, end)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane(min: i32, pref: i32) -> PaneSizes {
        PaneSizes::new(Size::new(min, min), Size::new(pref, pref))
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(SplitConfig::default().validate().is_ok());
        assert_eq!(
            SplitConfig::default().with_divider_size(-1).validate(),
            Err(SplitConfigError::NegativeDividerSize(-1))
        );
        assert!(
            SplitConfig::default()
                .with_resize_weight(1.5)
                .validate()
                .is_err()
        );
        assert!(
            SplitConfig::default()
                .with_resize_weight(f64::NAN)
                .validate()
                .is_err()
        );
        let err = SplitConfig::default().with_keyboard_step(0).validate();
        assert_eq!(
            err.map_err(|e| e.to_string()),
            Err("keyboard step must be > 0, got 0".to_string())
        );
    }

    #[test]
    fn requested_location_is_clamped_to_minimums() {
        let config = SplitConfig::default();
        let container = Size::new(200, 50);
        let (a, b) = (pane(30, 60), pane(40, 60));
        let resolve = |req| resolve_divider_location(&config, container, Some(&a), Some(&b), req);
        assert_eq!(resolve(100), 100);
        assert_eq!(resolve(10), 30);
        assert_eq!(resolve(190), 200 - 5 - 40);
        assert_eq!(minimum_divider_location(&config, container, Some(&a)), 30);
        assert_eq!(maximum_divider_location(&config, container, Some(&b)), 155);
    }

    #[test]
    fn unsatisfiable_minimums_shrink_symmetrically() {
        let config = SplitConfig::default();
        let container = Size::new(80, 20);
        let (a, b) = (pane(50, 50), pane(50, 50));
        // Shortage 25: first pane gives 12, second gives 13.
        let location = resolve_divider_location(&config, container, Some(&a), Some(&b), 60);
        assert_eq!(location, 38);
        let layout = SplitLayout::compute(&config, container, Some(&a), Some(&b), 60);
        assert_eq!(layout.first, Some(Rect::new(0, 0, 38, 20)));
        assert_eq!(layout.divider, Rect::new(38, 0, 5, 20));
        assert_eq!(layout.second, Some(Rect::new(43, 0, 37, 20)));
    }

    #[test]
    fn shrink_never_goes_below_zero() {
        let config = SplitConfig::default();
        let container = Size::new(55, 20);
        let (a, b) = (pane(4, 4), pane(100, 100));
        // Available 50, shortage 54: first would drop to -23, stops at 0.
        assert_eq!(
            resolve_divider_location(&config, container, Some(&a), Some(&b), 30),
            0
        );
    }

    #[test]
    fn absent_pane_collapses_divider_to_its_edge() {
        let config = SplitConfig::default().with_insets(Insets::all(2));
        let container = Size::new(100, 40);
        let a = pane(10, 10);
        assert_eq!(
            resolve_divider_location(&config, container, None, Some(&a), 50),
            2
        );
        assert_eq!(
            resolve_divider_location(&config, container, Some(&a), None, 50),
            100 - 2 - 5
        );
        let layout = SplitLayout::compute(&config, container, Some(&a), None, 50);
        assert_eq!(layout.first, Some(Rect::new(2, 2, 91, 36)));
        assert_eq!(layout.second, None);
    }

    #[test]
    fn vertical_split_uses_heights() {
        let config = SplitConfig::default().with_orientation(SplitOrientation::Vertical);
        let a = PaneSizes::new(Size::new(500, 10), Size::new(500, 30));
        let b = PaneSizes::new(Size::new(500, 10), Size::new(500, 30));
        let layout = SplitLayout::compute(&config, Size::new(60, 100), Some(&a), Some(&b), 40);
        assert_eq!(layout.first, Some(Rect::new(0, 0, 60, 40)));
        assert_eq!(layout.divider, Rect::new(0, 40, 60, 5));
        assert_eq!(layout.second, Some(Rect::new(0, 45, 60, 55)));
        assert_eq!(
            preferred_divider_location(&config, Size::new(60, 100), Some(&a), Some(&b)),
            30
        );
    }

    #[test]
    fn resize_weight_splits_growth() {
        let (a, b) = (pane(10, 10), pane(10, 10));
        let old = Size::new(100, 10);
        let new = Size::new(150, 10);
        let left_heavy = SplitConfig::default().with_resize_weight(1.0);
        assert_eq!(
            redistribute_divider_location(&left_heavy, old, new, 40, Some(&a), Some(&b)),
            90
        );
        let even = SplitConfig::default().with_resize_weight(0.5);
        assert_eq!(
            redistribute_divider_location(&even, old, new, 40, Some(&a), Some(&b)),
            65
        );
        let right_heavy = SplitConfig::default();
        assert_eq!(
            redistribute_divider_location(&right_heavy, old, new, 40, Some(&a), Some(&b)),
            40
        );
    }

    #[test]
    fn preferred_and_minimum_sizes_add_divider() {
        let config = SplitConfig::default();
        let a = PaneSizes::new(Size::new(10, 5), Size::new(40, 30));
        let b = PaneSizes::new(Size::new(20, 8), Size::new(60, 20));
        assert_eq!(
            preferred_size(&config, Some(&a), Some(&b)),
            Size::new(105, 30)
        );
        assert_eq!(minimum_size(&config, Some(&a), Some(&b)), Size::new(35, 8));
    }
}
