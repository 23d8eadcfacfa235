//! Bounded execution of vendor calls.

use std::future::Future;
use std::time::Duration;
use terminal_core::error::GatewayError;
use tokio::time;

/// Outcome of a bounded operation.
#[derive(Debug)]
pub enum Bounded<T> {
    /// The operation finished within the deadline, successfully or not.
    Completed(Result<T, GatewayError>),
    /// The deadline fired first. Unknown outcome, not failure: the
    /// operation may still have taken effect on the vendor side.
    TimedOut,
}

impl<T> Bounded<T> {
    pub fn timed_out(&self) -> bool {
        matches!(self, Bounded::TimedOut)
    }

    /// The success value, if the operation completed with one.
    pub fn into_success(self) -> Option<T> {
        match self {
            Bounded::Completed(Ok(value)) => Some(value),
            _ => None,
        }
    }

    /// Collapse into a `Result`, mapping a timeout to
    /// [`GatewayError::Timeout`] with the deadline that fired.
    pub fn into_result(self, deadline: Duration) -> Result<T, GatewayError> {
        match self {
            Bounded::Completed(result) => result,
            Bounded::TimedOut => Err(GatewayError::Timeout(deadline)),
        }
    }
}

/// Run `op` on a background task, waiting at most `deadline`.
///
/// The caller's task is never blocked past the deadline. On timeout the
/// background task is aborted, which cancels it at its next await point;
/// an operation stuck inside a blocking vendor call cannot be interrupted
/// that way and is abandoned as a leaked task. Side effects of a
/// timed-out call must therefore be treated as possibly-applied.
///
/// A panic inside `op` is reported as a completed error, not propagated.
pub async fn run_bounded<T, F>(deadline: Duration, op: F) -> Bounded<T>
where
    F: Future<Output = Result<T, GatewayError>> + Send + 'static,
    T: Send + 'static,
{
    let mut handle = tokio::spawn(op);

    match time::timeout(deadline, &mut handle).await {
        Ok(Ok(result)) => Bounded::Completed(result),
        Ok(Err(join_err)) => Bounded::Completed(Err(GatewayError::Api(format!(
            "background task failed: {join_err}"
        )))),
        Err(_) => {
            handle.abort();
            Bounded::TimedOut
        }
    }
}
