use thiserror::Error;

/// Failures raised while building or reading navigation arguments.
///
/// These are contract violations between internal call sites: the route
/// was produced incorrectly upstream. Callers surface them, they never retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// A required argument key was absent
    #[error("missing navigation argument: {0}")]
    MissingArgument(&'static str),

    /// A discriminator token fell outside its closed set
    #[error("unrecognized {kind} token: {value:?}")]
    UnrecognizedDiscriminator { kind: &'static str, value: String },

    /// The route string does not match the destination's pattern
    #[error("route {route:?} does not match {pattern:?}")]
    RouteMismatch { route: String, pattern: String },
}
