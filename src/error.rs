//! Error kinds reported by the engine.  Every failure is synchronous
//! and surfaced before any iteration runs; a failed render leaves the
//! engine able to accept the next call unaffected.

/// The ways a render request can be rejected.  Numeric overflow and
/// NaN during iteration are deliberately absent: divergent iterates
/// are expected steady-state behavior and are masked by the kernels,
/// never raised.
#[derive(Debug, Fail)]
pub enum Error {
    /// The viewport bounds are not strictly increasing, or one of the
    /// pixel resolutions is zero.
    #[fail(display = "invalid viewport: {}", _0)]
    InvalidViewport(String),

    /// A parameter the selected family requires was not supplied.
    #[fail(display = "missing required parameter `{}`", _0)]
    MissingParameter(&'static str),
}
