//! Common result and error types for the place-and-route toolchain.

/// The standard result type for fallible internal operations.
///
/// `Ok` contains the result value. `Err` indicates an unrecoverable internal
/// error (a bug in the tool), not a user-facing error. User errors — malformed
/// netlists, libraries, infeasible routes, failed extractions — are reported
/// through [`DiagnosticSink`](pnr_diagnostics::DiagnosticSink) instead, and
/// the operation that encountered them still returns `Ok` with a
/// best-effort or empty result.
pub type PnrResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in the tool, not a problem with user input.
///
/// These should never occur during normal operation. If one does occur, it
/// means an invariant the engines rely on (e.g. "every template has exactly
/// four pregenerated rotations") was violated somewhere upstream.
#[derive(Debug, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let err = InternalError::new("something broke");
        assert_eq!(format!("{err}"), "internal error: something broke");
    }

    #[test]
    fn ok_path() {
        let r: PnrResult<i32> = Ok(42);
        assert!(r.is_ok());
        assert_eq!(r.ok(), Some(42));
    }

    #[test]
    fn err_path() {
        let r: PnrResult<i32> = Err(InternalError::new("test error"));
        assert!(r.is_err());
        assert_eq!(r.err().unwrap().message, "test error");
    }

    #[test]
    fn from_string() {
        let err: InternalError = "from string".to_string().into();
        assert_eq!(err.message, "from string");
    }
}
