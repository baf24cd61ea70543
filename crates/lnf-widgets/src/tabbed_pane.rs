#![forbid(unsafe_code)]

//! Tabbed-pane delegate.
//!
//! Owns the tab list and the selected index, lays tabs out with
//! [`TabLayout`] and translates keys and mouse presses into selection
//! changes. Disabled tabs are skipped by keyboard navigation and ignore
//! presses.

use lnf_core::change::{ChangeEvent, ChangeSink, Property};
use lnf_core::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use lnf_core::geometry::{Rect, Size};
use lnf_layout::orientation::TabPlacement;
use lnf_layout::tab_runs::{TabLabel, TabLayout, TabLayoutConfig};
use lnf_layout::text::TextMeasure;
use rustc_hash::FxHashMap;

use crate::mouse::MouseResult;

/// One tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSpec {
    title: String,
    icon: Option<Size>,
    enabled: bool,
    mnemonic: Option<char>,
}

impl TabSpec {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: None,
            enabled: true,
            mnemonic: None,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: Size) -> Self {
        self.icon = Some(icon);
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Alt+`mnemonic` selects the tab.
    #[must_use]
    pub fn with_mnemonic(mut self, mnemonic: char) -> Self {
        self.mnemonic = Some(mnemonic);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon(&self) -> Option<Size> {
        self.icon
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub const fn mnemonic(&self) -> Option<char> {
        self.mnemonic
    }

    fn label(&self) -> TabLabel<'_> {
        TabLabel {
            text: &self.title,
            icon: self.icon,
        }
    }
}

fn mnemonic_key(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

/// Tabbed-pane delegate state.
#[derive(Debug, Clone, Default)]
pub struct TabbedPaneUi {
    config: TabLayoutConfig,
    tabs: Vec<TabSpec>,
    selected: Option<usize>,
    mnemonics: FxHashMap<char, usize>,
    /// Preferred tab sizes from the last measuring pass.
    measured: Vec<Size>,
    bounds: Rect,
    layout: Option<TabLayout>,
    stale: bool,
    scroll_offset: i32,
}

impl TabbedPaneUi {
    pub fn new(config: TabLayoutConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &TabLayoutConfig {
        &self.config
    }

    pub fn set_config<K: ChangeSink + ?Sized>(&mut self, config: TabLayoutConfig, sink: &mut K) {
        if self.config != config {
            self.config = config;
            self.invalidate_measure(sink);
        }
    }

    pub fn tabs(&self) -> &[TabSpec] {
        &self.tabs
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    // ── Tab list ─────────────────────────────────────────────────────────

    pub fn add_tab<K: ChangeSink + ?Sized>(&mut self, tab: TabSpec, sink: &mut K) {
        self.insert_tab(self.tabs.len(), tab, sink);
    }

    /// Insert a tab at `index` (clamped). The first tab becomes selected.
    pub fn insert_tab<K: ChangeSink + ?Sized>(&mut self, index: usize, tab: TabSpec, sink: &mut K) {
        let index = index.min(self.tabs.len());
        self.tabs.insert(index, tab);
        match self.selected {
            None => self.set_selected(Some(index), "insert", sink),
            Some(selected) if selected >= index => {
                self.set_selected(Some(selected + 1), "insert", sink);
            }
            Some(_) => {}
        }
        self.rebuild_mnemonics();
        self.invalidate_measure(sink);
    }

    /// Remove tab `index`. A removed selected tab passes the selection to
    /// the tab that takes its place, or the new last tab.
    pub fn remove_tab<K: ChangeSink + ?Sized>(
        &mut self,
        index: usize,
        sink: &mut K,
    ) -> Option<TabSpec> {
        if index >= self.tabs.len() {
            return None;
        }
        let removed = self.tabs.remove(index);
        let len = self.tabs.len();
        if let Some(selected) = self.selected {
            let next = if selected > index {
                Some(selected - 1)
            } else if selected >= len {
                len.checked_sub(1)
            } else {
                Some(selected)
            };
            self.set_selected(next, "remove", sink);
        }
        self.rebuild_mnemonics();
        self.invalidate_measure(sink);
        Some(removed)
    }

    pub fn set_enabled<K: ChangeSink + ?Sized>(
        &mut self,
        index: usize,
        enabled: bool,
        sink: &mut K,
    ) {
        if let Some(tab) = self.tabs.get_mut(index)
            && tab.enabled != enabled
        {
            tab.enabled = enabled;
            sink.notify(ChangeEvent::Repaint(self.tab_bounds(index)));
        }
    }

    pub fn set_title<K: ChangeSink + ?Sized>(
        &mut self,
        index: usize,
        title: impl Into<String>,
        sink: &mut K,
    ) {
        if let Some(tab) = self.tabs.get_mut(index) {
            tab.title = title.into();
            self.invalidate_measure(sink);
        }
    }

    pub fn set_mnemonic(&mut self, index: usize, mnemonic: Option<char>) {
        if let Some(tab) = self.tabs.get_mut(index) {
            tab.mnemonic = mnemonic;
            self.rebuild_mnemonics();
        }
    }

    /// Tab bound to `mnemonic`, ignoring case.
    pub fn tab_for_mnemonic(&self, mnemonic: char) -> Option<usize> {
        self.mnemonics.get(&mnemonic_key(mnemonic)).copied()
    }

    fn rebuild_mnemonics(&mut self) {
        self.mnemonics.clear();
        for (index, tab) in self.tabs.iter().enumerate() {
            if let Some(mnemonic) = tab.mnemonic {
                self.mnemonics.entry(mnemonic_key(mnemonic)).or_insert(index);
            }
        }
    }

    // ── Selection ────────────────────────────────────────────────────────

    /// Select tab `index`. Returns `false` when out of range or unchanged.
    pub fn select<K: ChangeSink + ?Sized>(&mut self, index: usize, sink: &mut K) -> bool {
        if index >= self.tabs.len() || self.selected == Some(index) {
            return false;
        }
        self.set_selected(Some(index), "select", sink);
        true
    }

    fn set_selected<K: ChangeSink + ?Sized>(
        &mut self,
        index: Option<usize>,
        reason: &str,
        sink: &mut K,
    ) {
        let old = self.selected;
        if old == index {
            return;
        }
        self.selected = index;
        self.stale = true;
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "tabs.switch", reason, from = ?old, to = ?index);
        #[cfg(not(feature = "tracing"))]
        let _ = reason;
        sink.notify(ChangeEvent::PropertyChanged {
            property: Property::SelectedIndex,
            old: old.and_then(|i| i32::try_from(i).ok()),
            new: index.and_then(|i| i32::try_from(i).ok()),
        });
        sink.notify(ChangeEvent::Revalidate);
        sink.notify(ChangeEvent::Repaint(None));
    }

    /// Next enabled tab after `from`, wrapping.
    fn enabled_after(&self, from: usize, forward: bool) -> Option<usize> {
        let len = self.tabs.len();
        (1..=len)
            .map(|offset| {
                if forward {
                    (from + offset) % len
                } else {
                    (from + len - offset % len) % len
                }
            })
            .find(|&index| self.tabs[index].enabled)
    }

    /// Select the next enabled tab, wrapping past the end.
    pub fn select_next<K: ChangeSink + ?Sized>(&mut self, sink: &mut K) -> bool {
        let Some(from) = self.selected else {
            return self.select_first(sink);
        };
        match self.enabled_after(from, true) {
            Some(next) => self.select(next, sink),
            None => false,
        }
    }

    /// Select the previous enabled tab, wrapping past the start.
    pub fn select_previous<K: ChangeSink + ?Sized>(&mut self, sink: &mut K) -> bool {
        let Some(from) = self.selected else {
            return self.select_last(sink);
        };
        match self.enabled_after(from, false) {
            Some(previous) => self.select(previous, sink),
            None => false,
        }
    }

    pub fn select_first<K: ChangeSink + ?Sized>(&mut self, sink: &mut K) -> bool {
        match self.tabs.iter().position(|tab| tab.enabled) {
            Some(index) => self.select(index, sink),
            None => false,
        }
    }

    pub fn select_last<K: ChangeSink + ?Sized>(&mut self, sink: &mut K) -> bool {
        match self.tabs.iter().rposition(|tab| tab.enabled) {
            Some(index) => self.select(index, sink),
            None => false,
        }
    }

    /// Select the tab in the neighbouring run; see
    /// [`TabLayout::adjacent_run_tab`].
    pub fn select_adjacent_run<K: ChangeSink + ?Sized>(&mut self, step: i32, sink: &mut K) -> bool {
        let Some(selected) = self.selected else {
            return false;
        };
        let Some(target) = self
            .current_layout()
            .and_then(|layout| layout.adjacent_run_tab(selected, step))
        else {
            return false;
        };
        if !self.tabs[target].enabled {
            return false;
        }
        self.set_selected(Some(target), "adjacent_run", sink);
        true
    }

    // ── Layout ───────────────────────────────────────────────────────────

    fn invalidate_measure<K: ChangeSink + ?Sized>(&mut self, sink: &mut K) {
        self.measured.clear();
        self.layout = None;
        sink.notify(ChangeEvent::Revalidate);
    }

    /// Measure every tab and lay them out inside `bounds`.
    pub fn do_layout<M: TextMeasure + ?Sized>(&mut self, bounds: Rect, metrics: &M) -> &TabLayout {
        self.measured = self
            .tabs
            .iter()
            .map(|tab| self.config.measure_tab(&tab.label(), metrics))
            .collect();
        self.bounds = bounds;
        self.relayout()
    }

    fn relayout(&mut self) -> &TabLayout {
        let layout = TabLayout::compute(
            &self.config,
            &self.measured,
            self.selected,
            self.bounds,
            self.scroll_offset,
        );
        self.scroll_offset = layout.scroll_offset();
        self.stale = false;
        self.layout.insert(layout)
    }

    /// Last layout, recomputed from cached measurements after a selection
    /// change. `None` until [`do_layout`](Self::do_layout) ran for the
    /// current tab set.
    pub fn current_layout(&mut self) -> Option<&TabLayout> {
        if self.measured.len() != self.tabs.len() {
            return None;
        }
        if self.stale || self.layout.is_none() {
            return Some(self.relayout());
        }
        self.layout.as_ref()
    }

    /// Bounds of tab `index` in the last layout.
    pub fn tab_bounds(&self, index: usize) -> Option<Rect> {
        self.layout.as_ref()?.tab_bounds(index)
    }

    /// Area left for the selected tab's content.
    pub fn content_bounds(&mut self) -> Option<Rect> {
        self.current_layout().map(TabLayout::content_bounds)
    }

    pub fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    /// Scroll a scrolling tab layout by `delta` pixels.
    pub fn scroll_by<K: ChangeSink + ?Sized>(&mut self, delta: i32, sink: &mut K) {
        self.scroll_offset = self.scroll_offset.saturating_add(delta).max(0);
        self.stale = true;
        sink.notify(ChangeEvent::Repaint(None));
    }

    // ── Input ────────────────────────────────────────────────────────────

    /// Handle a key press. Returns `true` when the selection changed.
    pub fn handle_key<K: ChangeSink + ?Sized>(&mut self, key: &KeyEvent, sink: &mut K) -> bool {
        if key.is_release() {
            return false;
        }
        let horizontal = self.config.placement.is_horizontal();
        let ltr = self.config.component_orientation.is_left_to_right();
        match key.code {
            KeyCode::PageUp if key.ctrl() => self.select_previous(sink),
            KeyCode::PageDown if key.ctrl() => self.select_next(sink),
            KeyCode::Char(ch) if key.alt() => match self.tab_for_mnemonic(ch) {
                Some(index) if self.tabs[index].enabled => self.select(index, sink),
                _ => false,
            },
            KeyCode::Home => self.select_first(sink),
            KeyCode::End => self.select_last(sink),
            KeyCode::Left | KeyCode::Right if horizontal => {
                let forward = (key.code == KeyCode::Right) == ltr;
                if forward {
                    self.select_next(sink)
                } else {
                    self.select_previous(sink)
                }
            }
            KeyCode::Up | KeyCode::Down if !horizontal => {
                if key.code == KeyCode::Down {
                    self.select_next(sink)
                } else {
                    self.select_previous(sink)
                }
            }
            KeyCode::Up => self.select_adjacent_run(-1, sink),
            KeyCode::Down => self.select_adjacent_run(1, sink),
            KeyCode::Left => self.select_adjacent_run(-1, sink),
            KeyCode::Right => self.select_adjacent_run(1, sink),
            _ => false,
        }
    }

    /// Handle a mouse event in pane coordinates.
    pub fn handle_mouse<K: ChangeSink + ?Sized>(
        &mut self,
        event: &MouseEvent,
        sink: &mut K,
    ) -> MouseResult {
        let MouseEventKind::Down(MouseButton::Left) = event.kind else {
            return MouseResult::Ignored;
        };
        let Some(index) = self
            .current_layout()
            .and_then(|layout| layout.tab_at(event.position()))
        else {
            return MouseResult::Ignored;
        };
        if !self.tabs[index].enabled {
            return MouseResult::Ignored;
        }
        if self.selected == Some(index) {
            return MouseResult::Activated(index);
        }
        self.set_selected(Some(index), "mouse", sink);
        MouseResult::Selected(index)
    }

    /// Tab placement shortcut.
    pub fn placement(&self) -> TabPlacement {
        self.config.placement
    }
}
