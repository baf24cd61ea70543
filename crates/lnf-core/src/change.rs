#![forbid(unsafe_code)]

//! Change notification plumbing.
//!
//! Delegates never repaint or relayout themselves. After a mutation they
//! push a [`ChangeEvent`] into a [`ChangeSink`] supplied by the host and
//! return; the host decides when to repaint. Delivery is fire-and-forget.

use crate::geometry::Rect;

/// Observable properties whose changes are reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Property {
    /// Split-pane divider offset along the split axis.
    DividerLocation,
    /// Divider offset before the most recent move.
    LastDividerLocation,
    /// Selected tab index.
    SelectedIndex,
}

/// A notification emitted by a delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Repaint the given area, or the whole component when `None`.
    Repaint(Option<Rect>),
    /// Cached geometry is stale; layout must be recomputed before painting.
    Revalidate,
    /// Scroll the enclosing viewport so this area is visible.
    ScrollRectToVisible(Rect),
    /// A bound property changed value.
    PropertyChanged {
        property: Property,
        old: Option<i32>,
        new: Option<i32>,
    },
}

/// Receiver of [`ChangeEvent`]s.
pub trait ChangeSink {
    /// Deliver one notification.
    fn notify(&mut self, event: ChangeEvent);
}

/// Sink that drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl ChangeSink for NoopSink {
    #[inline]
    fn notify(&mut self, _event: ChangeEvent) {}
}

/// Recording sink, handy for hosts that batch and for tests.
impl ChangeSink for Vec<ChangeEvent> {
    #[inline]
    fn notify(&mut self, event: ChangeEvent) {
        self.push(event);
    }
}

/// Adapter turning a closure into a [`ChangeSink`].
#[derive(Debug, Clone, Copy)]
pub struct FnSink<F>(pub F);

impl<F: FnMut(ChangeEvent)> ChangeSink for FnSink<F> {
    #[inline]
    fn notify(&mut self, event: ChangeEvent) {
        (self.0)(event);
    }
}
