//! Boundary logging macros for engine commands
//!
//! Each command emits exactly one `start` event and then either one `end`
//! or one `end_error` event, all tagged with the command name as `op` and
//! the calling module as `component`. Extra `key = value` fields are passed
//! straight through to `tracing`.
//!
//! Callers must depend on `greenwave-core-types` and `tracing`.

/// Log that a command is starting
///
/// ```
/// # use greenwave_core::log_op_start;
/// log_op_start!("reserve_workshop");
/// log_op_start!("reserve_workshop", workshop_id = "WS11");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = greenwave_core_types::schema::EVENT_START,
            $($($field)*)?
        )
    };
}

/// Log that a command finished successfully after `duration_ms`
///
/// ```
/// # use greenwave_core::log_op_end;
/// log_op_end!("cancel_reservation", duration_ms = 3, workshop_id = "WS11");
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = greenwave_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        )
    };
}

/// Log that a command failed
///
/// Takes the command's `&ExError` and records its kind, stable code and,
/// when present, the entity id it refers to.
///
/// ```
/// # use greenwave_core::log_op_error;
/// # use greenwave_core::errors::{ExError, GreenWaveError};
/// let err = ExError::from(GreenWaveError::AccountNotFound { account_id: "U1".to_string() });
/// log_op_error!("purchase_ticket", &err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: &$crate::errors::ExError = $err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = greenwave_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            entity_id = ex_err.entity_id(),
            $($($field)*)?
        );
    }};
}
