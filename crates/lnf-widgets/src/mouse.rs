#![forbid(unsafe_code)]

//! Mouse handling results shared by the delegates.

/// What a delegate did with a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseResult {
    /// The event did not concern this delegate.
    Ignored,
    /// The item/tab at this index became the lead and sole selection.
    Selected(usize),
    /// A press landed on the already selected tab.
    Activated(usize),
    /// The item at this index was added to or removed from the selection.
    Toggled(usize),
    /// The selection was extended from the anchor to this index.
    Extended(usize),
    /// A divider drag started at this location.
    DragStarted(i32),
    /// The divider moved (or, for non-continuous layout, its preview did).
    DividerMoved(i32),
    /// A divider drag ended at this location.
    DragFinished(i32),
}

impl MouseResult {
    /// Whether the event was consumed.
    #[inline]
    pub const fn is_handled(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}
