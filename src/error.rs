//! Stable error codes shared by every service error type.

/// Maps an error to a stable machine-readable code (`E_*`).
///
/// The presentation layer switches on these codes instead of on message text.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}
