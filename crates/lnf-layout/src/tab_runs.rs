#![forbid(unsafe_code)]

//! Multi-run tab layout.
//!
//! Tabs are packed into runs along the placement edge. With the
//! [`TabLayoutPolicy::Wrap`] policy a full layout pass is:
//!
//! 1. **Partition** ([`partition_runs`]): walk tabs in order and start a new
//!    run whenever the next tab would overflow the available extent. The check
//!    is skipped for the first tab of a run, so an oversized tab still gets a
//!    run of its own.
//! 2. **Normalize** ([`normalize_runs`]): while the last run is shorter than
//!    5/8 of the available extent, move the trailing tab of the previous run
//!    into it, as long as the donor keeps at least one tab and does not itself
//!    drop below 5/8 of the grown run.
//! 3. **Rotate**: cyclically rotate the run list so the run holding the
//!    selected tab is last. The last run is painted frontmost, adjacent to
//!    the content area.
//! 4. **Stack**: run `r` of `n` sits `(n - r - 1) × (depth - overlay)` pixels
//!    behind the front run.
//! 5. **Pad**: when there is more than one run, every run is stretched to the
//!    full available extent. The slack is split evenly by integer division and
//!    the remainder goes to the run's last tab.
//! 6. **Selected pad**: the selected tab grows outward by the selected-tab pad
//!    insets (rotated for the placement), clipped to the pane bounds.
//!
//! Right-to-left panes with tabs on the top or bottom edge mirror x positions
//! within the tab area. The [`TabLayoutPolicy::Scroll`] policy keeps a single
//! run at preferred sizes and scrolls it so the selected tab stays visible.
//!
//! The layout is recomputed from scratch on every pass; nothing is cached
//! across model changes.

use lnf_core::geometry::{Insets, Point, Rect, Size};

use crate::orientation::{ComponentOrientation, TabLayoutPolicy, TabPlacement};
use crate::text::TextMeasure;

/// Padding inside every tab, for tabs on the top edge.
pub const DEFAULT_TAB_INSETS: Insets = Insets::new(0, 4, 1, 4);
/// Outward growth of the selected tab, for tabs on the top edge.
pub const DEFAULT_SELECTED_TAB_PAD_INSETS: Insets = Insets::new(2, 2, 2, 1);
/// Margin around the whole tab area, for tabs on the top edge.
pub const DEFAULT_TAB_AREA_INSETS: Insets = Insets::new(3, 2, 0, 2);
pub const DEFAULT_TEXT_ICON_GAP: i32 = 4;
pub const DEFAULT_TAB_RUN_OVERLAY: i32 = 2;

/// Configuration for [`TabLayout::compute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabLayoutConfig {
    pub placement: TabPlacement,
    pub policy: TabLayoutPolicy,
    pub component_orientation: ComponentOrientation,
    pub tab_insets: Insets,
    pub selected_tab_pad_insets: Insets,
    pub tab_area_insets: Insets,
    pub text_icon_gap: i32,
    /// Pixels by which stacked runs overlap.
    pub run_overlay: i32,
}

impl Default for TabLayoutConfig {
    fn default() -> Self {
        Self {
            placement: TabPlacement::Top,
            policy: TabLayoutPolicy::Wrap,
            component_orientation: ComponentOrientation::LeftToRight,
            tab_insets: DEFAULT_TAB_INSETS,
            selected_tab_pad_insets: DEFAULT_SELECTED_TAB_PAD_INSETS,
            tab_area_insets: DEFAULT_TAB_AREA_INSETS,
            text_icon_gap: DEFAULT_TEXT_ICON_GAP,
            run_overlay: DEFAULT_TAB_RUN_OVERLAY,
        }
    }
}

impl TabLayoutConfig {
    #[must_use]
    pub fn with_placement(mut self, placement: TabPlacement) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: TabLayoutPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_component_orientation(mut self, orientation: ComponentOrientation) -> Self {
        self.component_orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_tab_insets(mut self, insets: Insets) -> Self {
        self.tab_insets = insets;
        self
    }

    #[must_use]
    pub fn with_selected_tab_pad_insets(mut self, insets: Insets) -> Self {
        self.selected_tab_pad_insets = insets;
        self
    }

    #[must_use]
    pub fn with_tab_area_insets(mut self, insets: Insets) -> Self {
        self.tab_area_insets = insets;
        self
    }

    #[must_use]
    pub fn with_text_icon_gap(mut self, gap: i32) -> Self {
        self.text_icon_gap = gap;
        self
    }

    #[must_use]
    pub fn with_run_overlay(mut self, overlay: i32) -> Self {
        self.run_overlay = overlay;
        self
    }

    /// Load config from environment variables.
    ///
    /// Reads:
    /// - `LNF_TAB_RUN_OVERLAY`: overlap between stacked runs, in pixels
    /// - `LNF_TAB_LAYOUT`: `wrap` or `scroll`
    ///
    /// Unparseable values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("LNF_TAB_RUN_OVERLAY")
            && let Ok(overlay) = val.trim().parse::<i32>()
            && overlay >= 0
        {
            config.run_overlay = overlay;
        }

        if let Ok(val) = std::env::var("LNF_TAB_LAYOUT")
            && let Ok(policy) = val.parse::<TabLayoutPolicy>()
        {
            config.policy = policy;
        }

        config
    }

    /// Preferred size of one tab.
    ///
    /// Width is text + icon (+ gap when both are present) + horizontal tab
    /// insets + 3; height is the taller of text and icon + vertical tab
    /// insets + 2.
    pub fn measure_tab<M: TextMeasure + ?Sized>(&self, label: &TabLabel<'_>, metrics: &M) -> Size {
        let text = metrics.measure(label.text);
        let icon = label.icon.unwrap_or(Size::ZERO);
        let gap = if label.icon.is_some() && !label.text.is_empty() {
            self.text_icon_gap
        } else {
            0
        };
        Size::new(
            text.width + icon.width + gap + self.tab_insets.horizontal_sum() + 3,
            text.height.max(icon.height) + self.tab_insets.vertical_sum() + 2,
        )
    }
}

/// What a tab shows, for measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabLabel<'a> {
    pub text: &'a str,
    pub icon: Option<Size>,
}

impl<'a> TabLabel<'a> {
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self { text, icon: None }
    }

    #[must_use]
    pub const fn with_icon(mut self, icon: Size) -> Self {
        self.icon = Some(icon);
        self
    }
}

/// A contiguous range `[start, end)` of tab indices laid out together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabRun {
    pub start: usize,
    pub end: usize,
}

impl TabRun {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    #[inline]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    /// Sum of the given per-tab extents over this run.
    pub fn extent(&self, lens: &[i32]) -> i32 {
        lens[self.start..self.end].iter().sum()
    }
}

/// Greedy partition of tab extents into runs no longer than `available`.
///
/// The first tab of a run is never moved to a new run, so every run holds at
/// least one tab. No tabs, no runs.
pub fn partition_runs(lens: &[i32], available: i32) -> Vec<TabRun> {
    let mut runs = Vec::new();
    let mut run_start = 0;
    let mut used = 0i32;
    for (index, &len) in lens.iter().enumerate() {
        if index > run_start && used.saturating_add(len) > available {
            runs.push(TabRun::new(run_start, index));
            run_start = index;
            used = 0;
        }
        used = used.saturating_add(len);
    }
    if !lens.is_empty() {
        runs.push(TabRun::new(run_start, lens.len()));
    }
    runs
}

/// Even out a starved last run by pulling tabs from the run before it.
///
/// A tab moves only while the last run is shorter than 5/8 of `available`,
/// the donor keeps at least two tabs, the moved tab still fits, and the
/// donor stays at least 5/8 of the grown last run.
///
/// Runs must be in index order (before rotation).
pub fn normalize_runs(runs: &mut [TabRun], lens: &[i32], available: i32) {
    let count = runs.len();
    if count < 2 {
        return;
    }
    let available = i64::from(available);
    loop {
        let donor = runs[count - 2];
        let last = runs[count - 1];
        if donor.len() < 2 {
            break;
        }
        let last_len = i64::from(last.extent(lens));
        let donor_len = i64::from(donor.extent(lens));
        let moved = i64::from(lens[donor.end - 1]);

        let starving = last_len * 8 < available * 5;
        let fits = last_len + moved <= available;
        let donor_keeps_up = (donor_len - moved) * 8 >= (last_len + moved) * 5;
        if !(starving && fits && donor_keeps_up) {
            break;
        }
        runs[count - 2].end -= 1;
        runs[count - 1].start -= 1;
    }
}

/// Rotate insets given for the top edge to `placement`.
pub const fn rotate_insets(insets: Insets, placement: TabPlacement) -> Insets {
    match placement {
        TabPlacement::Top => insets,
        TabPlacement::Left => Insets::new(insets.left, insets.top, insets.right, insets.bottom),
        TabPlacement::Bottom => Insets::new(insets.bottom, insets.left, insets.top, insets.right),
        TabPlacement::Right => Insets::new(insets.left, insets.bottom, insets.right, insets.top),
    }
}

/// Result of one tab layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabLayout {
    placement: TabPlacement,
    bounds: Rect,
    rects: Vec<Rect>,
    runs: Vec<TabRun>,
    selected: Option<usize>,
    selected_run: Option<usize>,
    max_tab_width: i32,
    max_tab_height: i32,
    tab_area: Rect,
    scroll_offset: i32,
}

impl TabLayout {
    /// Lay out tabs of the given preferred `sizes` inside `bounds`.
    ///
    /// `scroll_offset` is the previous offset of a scrolling layout; wrapping
    /// layouts ignore it. A `selected` index past the end counts as no
    /// selection.
    pub fn compute(
        config: &TabLayoutConfig,
        sizes: &[Size],
        selected: Option<usize>,
        bounds: Rect,
        scroll_offset: i32,
    ) -> Self {
        let placement = config.placement;
        let horizontal = placement.is_horizontal();
        let selected = selected.filter(|&index| index < sizes.len());
        let area = rotate_insets(config.tab_area_insets, placement);

        let max_tab_width = sizes.iter().map(|size| size.width).max().unwrap_or(0);
        let max_tab_height = sizes.iter().map(|size| size.height).max().unwrap_or(0);
        let depth = if horizontal {
            max_tab_height
        } else {
            max_tab_width
        };
        let lens: Vec<i32> = sizes
            .iter()
            .map(|size| if horizontal { size.width } else { size.height })
            .collect();

        let (start, return_at) = if horizontal {
            (bounds.x + area.left, bounds.right() - area.right)
        } else {
            (bounds.y + area.top, bounds.bottom() - area.bottom)
        };
        let available = return_at - start;

        let mut runs = match config.policy {
            TabLayoutPolicy::Wrap => {
                let mut runs = partition_runs(&lens, available);
                normalize_runs(&mut runs, &lens, available);
                runs
            }
            TabLayoutPolicy::Scroll if lens.is_empty() => Vec::new(),
            TabLayoutPolicy::Scroll => vec![TabRun::new(0, lens.len())],
        };
        let count = runs.len();

        let mut selected_run = None;
        if let Some(index) = selected
            && let Some(position) = runs.iter().position(|run| run.contains(index))
        {
            runs.rotate_left((position + 1) % count);
            selected_run = Some(count - 1);
        }

        // Main-axis slots, per tab: (offset, length).
        let mut slots = vec![(0i32, 0i32); lens.len()];
        let mut scroll = 0;
        match config.policy {
            TabLayoutPolicy::Wrap => {
                for run in &runs {
                    let mut lengths: Vec<i32> = lens[run.start..run.end].to_vec();
                    if count > 1 {
                        pad_run(&mut lengths, available);
                    }
                    let mut at = start;
                    for (index, len) in (run.start..run.end).zip(lengths) {
                        slots[index] = (at, len);
                        at += len;
                    }
                }
            }
            TabLayoutPolicy::Scroll => {
                scroll = scroll_to_selected(&lens, selected, available, scroll_offset);
                let mut at = start - scroll;
                for (index, &len) in lens.iter().enumerate() {
                    slots[index] = (at, len);
                    at += len;
                }
            }
        }

        let step = (depth - config.run_overlay).max(0);
        let runs_depth = if count == 0 {
            0
        } else {
            depth + (count as i32 - 1) * step
        };
        let area_depth = if horizontal {
            area.vertical_sum()
        } else {
            area.horizontal_sum()
        };
        let extent = runs_depth + area_depth;

        let tab_area = match placement {
            TabPlacement::Top => Rect::new(bounds.x, bounds.y, bounds.width, extent),
            TabPlacement::Bottom => {
                Rect::new(bounds.x, bounds.bottom() - extent, bounds.width, extent)
            }
            TabPlacement::Left => Rect::new(bounds.x, bounds.y, extent, bounds.height),
            TabPlacement::Right => {
                Rect::new(bounds.right() - extent, bounds.y, extent, bounds.height)
            }
        };
        let run_cross = |r: usize| -> i32 {
            let behind = (count - r - 1) as i32 * step;
            match placement {
                TabPlacement::Top => tab_area.y + area.top + (count as i32 - 1) * step - behind,
                TabPlacement::Left => tab_area.x + area.left + (count as i32 - 1) * step - behind,
                TabPlacement::Bottom => tab_area.y + area.top + behind,
                TabPlacement::Right => tab_area.x + area.left + behind,
            }
        };

        let mut rects = vec![Rect::default(); lens.len()];
        for (r, run) in runs.iter().enumerate() {
            let cross = run_cross(r);
            for index in run.start..run.end {
                let (main, len) = slots[index];
                rects[index] = if horizontal {
                    Rect::new(main, cross, len, depth)
                } else {
                    Rect::new(cross, main, depth, len)
                };
            }
        }

        if let Some(index) = selected {
            let pad = rotate_insets(config.selected_tab_pad_insets, placement);
            let padded = rects[index].outset(pad);
            rects[index] = clip(padded, bounds);
        }

        if horizontal && !config.component_orientation.is_left_to_right() {
            for rect in &mut rects {
                rect.x = start + return_at - rect.x - rect.width;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "tabs.layout",
            tabs = lens.len(),
            runs = count,
            selected_run = ?selected_run,
            scroll_offset = scroll
        );

        Self {
            placement,
            bounds,
            rects,
            runs,
            selected,
            selected_run,
            max_tab_width,
            max_tab_height,
            tab_area,
            scroll_offset: scroll,
        }
    }

    #[inline]
    pub fn placement(&self) -> TabPlacement {
        self.placement
    }

    /// Runs in paint order; the last one is frontmost.
    #[inline]
    pub fn runs(&self) -> &[TabRun] {
        &self.runs
    }

    #[inline]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Position of the run holding the selected tab (always the last run).
    #[inline]
    pub fn selected_run(&self) -> Option<usize> {
        self.selected_run
    }

    #[inline]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Tab rectangles in tab index order.
    #[inline]
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn tab_bounds(&self, index: usize) -> Option<Rect> {
        self.rects.get(index).copied()
    }

    #[inline]
    pub fn max_tab_width(&self) -> i32 {
        self.max_tab_width
    }

    #[inline]
    pub fn max_tab_height(&self) -> i32 {
        self.max_tab_height
    }

    /// Leading scroll offset of a scrolling layout (zero when wrapping).
    #[inline]
    pub fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    /// Strip along the placement edge that holds every run.
    #[inline]
    pub fn tab_area(&self) -> Rect {
        self.tab_area
    }

    /// Depth of the tab area perpendicular to the runs, insets included.
    pub fn tab_area_extent(&self) -> i32 {
        if self.placement.is_horizontal() {
            self.tab_area.height
        } else {
            self.tab_area.width
        }
    }

    /// What remains of the pane once the tab area is taken out.
    pub fn content_bounds(&self) -> Rect {
        let b = self.bounds;
        let extent = self.tab_area_extent();
        match self.placement {
            TabPlacement::Top => Rect::new(b.x, b.y + extent, b.width, b.height - extent),
            TabPlacement::Bottom => Rect::new(b.x, b.y, b.width, b.height - extent),
            TabPlacement::Left => Rect::new(b.x + extent, b.y, b.width - extent, b.height),
            TabPlacement::Right => Rect::new(b.x, b.y, b.width - extent, b.height),
        }
    }

    /// Run position holding tab `index`.
    pub fn run_for_tab(&self, index: usize) -> Option<usize> {
        self.runs.iter().position(|run| run.contains(index))
    }

    /// Tab under `point`. Front runs shadow the runs behind them.
    pub fn tab_at(&self, point: Point) -> Option<usize> {
        if let Some(index) = self.selected
            && self.rects[index].contains(point)
        {
            return Some(index);
        }
        self.runs
            .iter()
            .rev()
            .flat_map(|run| run.start..run.end)
            .find(|&index| self.rects[index].contains(point))
    }

    /// Tab in the run visually adjacent to `index`'s run.
    ///
    /// `step` is `-1` for the run above (top/bottom placement) or to the left
    /// (left/right placement), `+1` for below or to the right. The chosen tab
    /// is the one whose span covers the centre of tab `index`, or the nearest
    /// one if none does.
    pub fn adjacent_run_tab(&self, index: usize, step: i32) -> Option<usize> {
        let run = self.run_for_tab(index)?;
        let toward_higher_run = match self.placement {
            TabPlacement::Top | TabPlacement::Left => step > 0,
            TabPlacement::Bottom | TabPlacement::Right => step < 0,
        };
        let target = if step == 0 {
            return None;
        } else if toward_higher_run {
            Some(run + 1).filter(|&r| r < self.runs.len())?
        } else {
            run.checked_sub(1)?
        };

        let horizontal = self.placement.is_horizontal();
        let origin = self.rects[index].center();
        let centre = if horizontal { origin.x } else { origin.y };
        let target = self.runs[target];
        (target.start..target.end).min_by_key(|&candidate| {
            let rect = self.rects[candidate];
            if horizontal {
                span_gap(centre, rect.x, rect.right())
            } else {
                span_gap(centre, rect.y, rect.bottom())
            }
        })
    }
}

/// Stretch a run's tab lengths to fill `available`.
fn pad_run(lengths: &mut [i32], available: i32) {
    let Some(count) = i32::try_from(lengths.len()).ok().filter(|&c| c > 0) else {
        return;
    };
    let delta = available - lengths.iter().sum::<i32>();
    if delta <= 0 {
        return;
    }
    let share = delta / count;
    for len in lengths.iter_mut() {
        *len += share;
    }
    if let Some(last) = lengths.last_mut() {
        *last += delta % count;
    }
}

/// Offset of a single scrolling run that keeps the selected tab visible.
fn scroll_to_selected(lens: &[i32], selected: Option<usize>, available: i32, previous: i32) -> i32 {
    let total: i32 = lens.iter().sum();
    let mut offset = previous.clamp(0, (total - available).max(0));
    if let Some(index) = selected {
        let tab_start: i32 = lens[..index].iter().sum();
        let tab_end = tab_start + lens[index];
        if tab_start < offset {
            offset = tab_start;
        } else if tab_end - offset > available {
            offset = (tab_end - available).min(tab_start);
        }
    }
    offset
}

fn clip(rect: Rect, bounds: Rect) -> Rect {
    let x = rect.x.max(bounds.x);
    let y = rect.y.max(bounds.y);
    let right = rect.right().min(bounds.right());
    let bottom = rect.bottom().min(bounds.bottom());
    Rect::new(x, y, (right - x).max(0), (bottom - y).max(0))
}

#[inline]
fn span_gap(value: i32, start: i32, end: i32) -> i64 {
    if value < start {
        i64::from(start) - i64::from(value)
    } else if value > end {
        i64::from(value) - i64::from(end)
    } else {
        0
    }
}
