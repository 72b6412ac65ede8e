//! Canonical event names for structured logging
//!
//! The `log_op_*` macros stamp every boundary event with one of these, and
//! log-capture tests filter on them.

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
