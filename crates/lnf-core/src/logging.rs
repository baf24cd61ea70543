#![forbid(unsafe_code)]

//! Tracing re-exports.
//!
//! With the `tracing` feature enabled, delegates emit structured events
//! named with dotted identifiers (`list.selection`, `tabs.layout`, ...).
//! Without it, nothing is compiled in.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
