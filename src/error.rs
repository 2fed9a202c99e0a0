//! Error taxonomy for the session surface

use crate::model::Stage;
use thiserror::Error;

/// Errors returned by [`crate::session::SessionHandle::submit`].
///
/// All of these are recoverable: the session keeps running and the user may
/// submit again. There are no fatal errors in this design; the worst
/// business outcome is the `Rejected` stage, which is not an error at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// A previous submit is still in flight; the input was dropped, not
    /// queued.
    #[error("a previous submit is still in flight")]
    Busy,

    /// The input was empty or whitespace-only and never reached the engine.
    #[error("input is empty")]
    EmptyInput,

    /// The session runtime has shut down and no longer accepts input.
    #[error("session runtime has shut down")]
    Closed,
}

/// Internal invariant violations raised while executing a turn.
///
/// These never escape the runtime task: they are logged, surfaced to the
/// presentation layer as a generic transient-failure notice, and the
/// in-flight flag is cleared so the user may retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A write-once field was addressed a second time.
    #[error("field `{field}` is write-once and already set")]
    FieldAlreadySet { field: &'static str },

    /// A stage advance skipped the defined transition order.
    #[error("cannot advance stage from `{from}` to `{to}`")]
    InvalidAdvance { from: Stage, to: Stage },
}
