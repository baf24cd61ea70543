#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: geometry, input events, and change notification.
//!
//! # Role in the workspace
//! `lnf-core` is the vocabulary shared by the layout engines and the UI
//! delegates. It owns no state of its own.
//!
//! # Primary responsibilities
//! - **Geometry**: signed pixel `Rect`, `Point`, `Size`, `Insets`.
//! - **Event**: canonical key and mouse events delivered by the host toolkit.
//! - **Change notification**: `ChangeSink`, the fire-and-forget channel
//!   delegates use to request repaint/revalidate and report property changes.
//!
//! # How it fits in the system
//! `lnf-layout` computes geometry in these types; `lnf-widgets` consumes
//! events and pushes `ChangeEvent`s back to the host.

pub mod change;
pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
