#![forbid(unsafe_code)]

//! Split-pane delegate.
//!
//! [`SplitPaneUi`] keeps the divider location property and resolves it
//! against the panes' minimum sizes on every layout pass. A resolved
//! location that differs from the property is written back, but only after
//! [`SplitPaneUi::mark_displayed`] has been called; during installation the
//! property stays untouched.
//!
//! Besides layout it handles divider drags, keyboard moves and one-touch
//! collapse/restore.

use lnf_core::change::{ChangeEvent, ChangeSink, Property};
use lnf_core::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use lnf_core::geometry::{Point, Size};
use lnf_layout::orientation::Axis;
use lnf_layout::split::{self, PaneSizes, SplitConfig, SplitConfigError, SplitLayout};

use crate::mouse::MouseResult;

/// Pane a one-touch button collapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollapseEdge {
    /// Move the divider to the start, hiding the first pane.
    First,
    /// Move the divider to the end, hiding the second pane.
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragSession {
    /// Pointer offset from the divider's leading edge.
    grab: i32,
    location: i32,
}

/// Split-pane delegate state.
#[derive(Debug, Clone, Default)]
pub struct SplitPaneUi {
    config: SplitConfig,
    first: Option<PaneSizes>,
    second: Option<PaneSizes>,
    /// The divider location property.
    location: Option<i32>,
    last_location: Option<i32>,
    displayed: bool,
    container: Size,
    layout: Option<SplitLayout>,
    collapsed: Option<CollapseEdge>,
    drag: Option<DragSession>,
}

impl SplitPaneUi {
    /// Create a delegate; rejects invalid configuration.
    pub fn new(config: SplitConfig) -> Result<Self, SplitConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    pub fn set_config<K: ChangeSink + ?Sized>(
        &mut self,
        config: SplitConfig,
        sink: &mut K,
    ) -> Result<(), SplitConfigError> {
        config.validate()?;
        self.config = config;
        self.layout = None;
        sink.notify(ChangeEvent::Revalidate);
        Ok(())
    }

    /// Replace the size hints of both panes; `None` means no component.
    pub fn set_panes<K: ChangeSink + ?Sized>(
        &mut self,
        first: Option<PaneSizes>,
        second: Option<PaneSizes>,
        sink: &mut K,
    ) {
        if self.first != first || self.second != second {
            self.first = first;
            self.second = second;
            sink.notify(ChangeEvent::Revalidate);
        }
    }

    /// The container has been shown; resolved locations are written back
    /// from now on.
    pub fn mark_displayed(&mut self) {
        self.displayed = true;
    }

    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    /// The divider location property.
    pub fn divider_location(&self) -> Option<i32> {
        self.location
    }

    pub fn last_divider_location(&self) -> Option<i32> {
        self.last_location
    }

    pub fn collapsed(&self) -> Option<CollapseEdge> {
        self.collapsed
    }

    /// Most recent layout.
    pub fn last_layout(&self) -> Option<&SplitLayout> {
        self.layout.as_ref()
    }

    /// Location where a non-continuous drag would drop the divider.
    pub fn drag_preview(&self) -> Option<i32> {
        self.drag.map(|drag| drag.location)
    }

    pub fn minimum_divider_location(&self) -> i32 {
        split::minimum_divider_location(&self.config, self.container, self.first_hint().as_ref())
    }

    pub fn maximum_divider_location(&self) -> i32 {
        split::maximum_divider_location(&self.config, self.container, self.second_hint().as_ref())
    }

    pub fn preferred_size(&self) -> Size {
        split::preferred_size(&self.config, self.first.as_ref(), self.second.as_ref())
    }

    pub fn minimum_size(&self) -> Size {
        split::minimum_size(&self.config, self.first.as_ref(), self.second.as_ref())
    }

    /// Pane hints with the minimum dropped for a collapsed pane.
    fn first_hint(&self) -> Option<PaneSizes> {
        let mut first = self.first?;
        if self.collapsed == Some(CollapseEdge::First) {
            first.minimum = Size::ZERO;
        }
        Some(first)
    }

    fn second_hint(&self) -> Option<PaneSizes> {
        let mut second = self.second?;
        if self.collapsed == Some(CollapseEdge::Second) {
            second.minimum = Size::ZERO;
        }
        Some(second)
    }

    fn resolve(&self, requested: i32) -> i32 {
        split::resolve_divider_location(
            &self.config,
            self.container,
            self.first_hint().as_ref(),
            self.second_hint().as_ref(),
            requested,
        )
    }

    /// Current location as laid out, falling back to the property.
    fn current_location(&self) -> i32 {
        self.layout
            .map(|layout| layout.location)
            .or(self.location)
            .unwrap_or_else(|| self.minimum_divider_location())
    }

    fn write_location<K: ChangeSink + ?Sized>(&mut self, location: i32, sink: &mut K) -> bool {
        let old = self.location;
        if old == Some(location) {
            return false;
        }
        self.location = Some(location);
        if old.is_some() && self.last_location != old {
            let previous = self.last_location;
            self.last_location = old;
            sink.notify(ChangeEvent::PropertyChanged {
                property: Property::LastDividerLocation,
                old: previous,
                new: old,
            });
        }
        sink.notify(ChangeEvent::PropertyChanged {
            property: Property::DividerLocation,
            old,
            new: Some(location),
        });
        true
    }

    /// Set the divider location property and request a relayout.
    pub fn set_divider_location<K: ChangeSink + ?Sized>(&mut self, location: i32, sink: &mut K) {
        self.collapsed = None;
        if self.write_location(location, sink) {
            sink.notify(ChangeEvent::Revalidate);
        }
    }

    /// Put the divider after the first pane's preferred size.
    pub fn reset_to_preferred_sizes<K: ChangeSink + ?Sized>(&mut self, sink: &mut K) {
        self.collapsed = None;
        let location = split::preferred_divider_location(
            &self.config,
            self.container,
            self.first.as_ref(),
            self.second.as_ref(),
        );
        self.set_divider_location(location, sink);
    }

    /// Lay out both panes inside `container`.
    pub fn layout<K: ChangeSink + ?Sized>(&mut self, container: Size, sink: &mut K) -> SplitLayout {
        let old_container = self.container;
        self.container = container;
        let first = self.first_hint();
        let second = self.second_hint();

        let requested = match self.location {
            Some(location)
                if self.displayed
                    && self.collapsed.is_none()
                    && old_container != Size::ZERO
                    && old_container != container =>
            {
                split::redistribute_divider_location(
                    &self.config,
                    old_container,
                    container,
                    location,
                    first.as_ref(),
                    second.as_ref(),
                )
            }
            Some(location) => location,
            None => split::preferred_divider_location(
                &self.config,
                container,
                first.as_ref(),
                second.as_ref(),
            ),
        };
        let layout = SplitLayout::compute(
            &self.config,
            container,
            first.as_ref(),
            second.as_ref(),
            requested,
        );

        let written = self.displayed && self.write_location(layout.location, sink);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "split.divider",
            requested,
            location = layout.location,
            written
        );
        #[cfg(not(feature = "tracing"))]
        let _ = written;

        self.layout = Some(layout);
        layout
    }

    /// Collapse toward `edge`, or restore when already collapsed the other
    /// way. Returns `false` when one-touch expansion is off.
    pub fn one_touch_expand<K: ChangeSink + ?Sized>(
        &mut self,
        edge: CollapseEdge,
        sink: &mut K,
    ) -> bool {
        if !self.config.one_touch_expandable {
            return false;
        }
        let restore = match (self.collapsed, edge) {
            (Some(CollapseEdge::Second), CollapseEdge::First)
            | (Some(CollapseEdge::First), CollapseEdge::Second) => true,
            (Some(current), wanted) if current == wanted => return false,
            _ => false,
        };
        if restore {
            let back = self.last_location.unwrap_or_else(|| {
                split::preferred_divider_location(
                    &self.config,
                    self.container,
                    self.first.as_ref(),
                    self.second.as_ref(),
                )
            });
            self.set_divider_location(back, sink);
            return true;
        }

        self.collapsed = Some(edge);
        let target = match edge {
            CollapseEdge::First => i32::MIN,
            CollapseEdge::Second => i32::MAX,
        };
        let location = self.resolve(target);
        if self.write_location(location, sink) {
            sink.notify(ChangeEvent::Revalidate);
        }
        true
    }

    /// Move the divider by `delta`, clamped to the legal range.
    pub fn move_divider<K: ChangeSink + ?Sized>(&mut self, delta: i32, sink: &mut K) -> bool {
        self.collapsed = None;
        let current = self.current_location();
        let location = self.resolve(current.saturating_add(delta));
        if location == current {
            return false;
        }
        self.set_divider_location(location, sink);
        true
    }

    /// Handle a key press while the divider has focus.
    pub fn handle_key<K: ChangeSink + ?Sized>(&mut self, key: &KeyEvent, sink: &mut K) -> bool {
        if key.is_release() {
            return false;
        }
        let step = self.config.keyboard_step;
        match key.code {
            KeyCode::Left | KeyCode::Up => self.move_divider(-step, sink),
            KeyCode::Right | KeyCode::Down => self.move_divider(step, sink),
            KeyCode::Home => {
                let target = self.minimum_divider_location();
                self.move_divider(target.saturating_sub(self.current_location()), sink)
            }
            KeyCode::End => {
                let target = self.maximum_divider_location();
                self.move_divider(target.saturating_sub(self.current_location()), sink)
            }
            _ => false,
        }
    }

    fn along(&self, point: Point) -> i32 {
        match self.config.orientation.axis() {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        }
    }

    /// Handle a mouse event in container coordinates.
    pub fn handle_mouse<K: ChangeSink + ?Sized>(
        &mut self,
        event: &MouseEvent,
        sink: &mut K,
    ) -> MouseResult {
        let at = self.along(event.position());
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(layout) = self.layout else {
                    return MouseResult::Ignored;
                };
                if !layout.divider.contains(event.position()) {
                    return MouseResult::Ignored;
                }
                self.drag = Some(DragSession {
                    grab: at - layout.location,
                    location: layout.location,
                });
                MouseResult::DragStarted(layout.location)
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(drag) = self.drag else {
                    return MouseResult::Ignored;
                };
                self.collapsed = None;
                let location = self.resolve(at - drag.grab);
                self.drag = Some(DragSession { location, ..drag });
                if self.config.continuous_layout {
                    self.set_divider_location(location, sink);
                } else {
                    sink.notify(ChangeEvent::Repaint(None));
                }
                MouseResult::DividerMoved(location)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(drag) = self.drag.take() else {
                    return MouseResult::Ignored;
                };
                self.set_divider_location(drag.location, sink);
                MouseResult::DragFinished(drag.location)
            }
            _ => MouseResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lnf_core::geometry::Rect;
    use lnf_layout::orientation::SplitOrientation;

    fn events() -> Vec<ChangeEvent> {
        Vec::new()
    }

    fn pane(min: i32, pref: i32) -> PaneSizes {
        PaneSizes::new(Size::new(min, 10), Size::new(pref, 10))
    }

    fn split(config: SplitConfig) -> SplitPaneUi {
        let mut ui = SplitPaneUi::new(config).unwrap();
        ui.set_panes(Some(pane(20, 60)), Some(pane(30, 80)), &mut events());
        ui
    }

    fn location_changes(events: &[ChangeEvent]) -> Vec<Option<i32>> {
        events
            .iter()
            .filter_map(|event| match event {
                ChangeEvent::PropertyChanged {
                    property: Property::DividerLocation,
                    new,
                    ..
                } => Some(*new),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = SplitPaneUi::new(SplitConfig::default().with_divider_size(-2));
        assert_eq!(err.err(), Some(SplitConfigError::NegativeDividerSize(-2)));
    }

    #[test]
    fn no_write_back_before_displayed() {
        let mut ui = split(SplitConfig::default());
        let mut sink = events();
        let layout = ui.layout(Size::new(200, 50), &mut sink);
        assert_eq!(layout.location, 60);
        assert!(location_changes(&sink).is_empty());
        assert_eq!(ui.divider_location(), None);

        ui.mark_displayed();
        ui.layout(Size::new(200, 50), &mut sink);
        assert_eq!(location_changes(&sink), vec![Some(60)]);
        // Same result again: no redundant notification.
        ui.layout(Size::new(200, 50), &mut sink);
        assert_eq!(location_changes(&sink), vec![Some(60)]);
    }

    #[test]
    fn requested_location_is_clamped_and_written_back() {
        let mut ui = split(SplitConfig::default());
        ui.mark_displayed();
        let mut sink = events();
        ui.set_divider_location(190, &mut sink);
        let layout = ui.layout(Size::new(200, 50), &mut sink);
        // 200 - 5 - 30
        assert_eq!(layout.location, 165);
        assert_eq!(ui.divider_location(), Some(165));
        assert_eq!(ui.last_divider_location(), Some(190));
        assert_eq!(layout.second, Some(Rect::new(170, 0, 30, 50)));
    }

    #[test]
    fn resize_uses_weight() {
        let mut ui = split(SplitConfig::default().with_resize_weight(0.5));
        ui.mark_displayed();
        ui.layout(Size::new(200, 50), &mut events());
        let layout = ui.layout(Size::new(240, 50), &mut events());
        assert_eq!(layout.location, 80);
    }

    #[test]
    fn keyboard_moves_by_step_and_jumps() {
        let mut ui = split(SplitConfig::default().with_keyboard_step(4));
        ui.mark_displayed();
        ui.layout(Size::new(200, 50), &mut events());
        assert!(ui.handle_key(&KeyEvent::new(KeyCode::Right), &mut events()));
        assert_eq!(ui.divider_location(), Some(64));
        ui.layout(Size::new(200, 50), &mut events());
        assert!(ui.handle_key(&KeyEvent::new(KeyCode::Home), &mut events()));
        assert_eq!(ui.divider_location(), Some(20));
        ui.layout(Size::new(200, 50), &mut events());
        assert!(!ui.handle_key(&KeyEvent::new(KeyCode::Left), &mut events()));
        assert!(ui.handle_key(&KeyEvent::new(KeyCode::End), &mut events()));
        assert_eq!(ui.divider_location(), Some(165));
    }

    #[test]
    fn one_touch_collapses_and_restores() {
        let mut ui = split(SplitConfig::default().with_one_touch_expandable(true));
        ui.mark_displayed();
        ui.layout(Size::new(200, 50), &mut events());
        assert!(ui.one_touch_expand(CollapseEdge::Second, &mut events()));
        let layout = ui.layout(Size::new(200, 50), &mut events());
        assert_eq!(layout.location, 195);
        assert_eq!(ui.collapsed(), Some(CollapseEdge::Second));

        assert!(ui.one_touch_expand(CollapseEdge::First, &mut events()));
        assert_eq!(ui.collapsed(), None);
        assert_eq!(ui.layout(Size::new(200, 50), &mut events()).location, 60);

        let mut plain = split(SplitConfig::default());
        assert!(!plain.one_touch_expand(CollapseEdge::First, &mut events()));
    }

    #[test]
    fn continuous_drag_moves_divider() {
        let mut ui = split(SplitConfig::default());
        ui.mark_displayed();
        ui.layout(Size::new(200, 50), &mut events());
        let mut sink = events();
        let down = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 62, 10);
        assert_eq!(ui.handle_mouse(&down, &mut sink), MouseResult::DragStarted(60));
        let drag = MouseEvent::new(MouseEventKind::Drag(MouseButton::Left), 102, 10);
        assert_eq!(ui.handle_mouse(&drag, &mut sink), MouseResult::DividerMoved(100));
        assert_eq!(ui.divider_location(), Some(100));
        let far = MouseEvent::new(MouseEventKind::Drag(MouseButton::Left), 400, 10);
        assert_eq!(ui.handle_mouse(&far, &mut sink), MouseResult::DividerMoved(165));
        let up = MouseEvent::new(MouseEventKind::Up(MouseButton::Left), 400, 10);
        assert_eq!(ui.handle_mouse(&up, &mut sink), MouseResult::DragFinished(165));
        assert_eq!(ui.drag_preview(), None);
    }

    #[test]
    fn non_continuous_drag_commits_on_release() {
        let config = SplitConfig::default()
            .with_orientation(SplitOrientation::Vertical)
            .with_continuous_layout(false);
        let mut ui = SplitPaneUi::new(config).unwrap();
        let top = PaneSizes::new(Size::new(10, 20), Size::new(10, 60));
        let bottom = PaneSizes::new(Size::new(10, 30), Size::new(10, 80));
        ui.set_panes(Some(top), Some(bottom), &mut events());
        ui.mark_displayed();
        ui.layout(Size::new(50, 200), &mut events());
        let down = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 10, 61);
        assert_eq!(ui.handle_mouse(&down, &mut events()), MouseResult::DragStarted(60));
        let drag = MouseEvent::new(MouseEventKind::Drag(MouseButton::Left), 10, 91);
        assert_eq!(ui.handle_mouse(&drag, &mut events()), MouseResult::DividerMoved(90));
        assert_eq!(ui.divider_location(), Some(60));
        assert_eq!(ui.drag_preview(), Some(90));
        let up = MouseEvent::new(MouseEventKind::Up(MouseButton::Left), 10, 91);
        assert_eq!(ui.handle_mouse(&up, &mut events()), MouseResult::DragFinished(90));
        assert_eq!(ui.divider_location(), Some(90));
    }

    #[test]
    fn press_outside_divider_is_ignored() {
        let mut ui = split(SplitConfig::default());
        let press = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 10, 10);
        assert_eq!(ui.handle_mouse(&press, &mut events()), MouseResult::Ignored);
        ui.layout(Size::new(200, 50), &mut events());
        assert_eq!(ui.handle_mouse(&press, &mut events()), MouseResult::Ignored);
    }
}
