/// Convenience result type used across Glimmer.
pub type GlimmerResult<T> = Result<T, GlimmerError>;

/// Top-level error taxonomy used by engine APIs.
///
/// The frame loop itself never propagates errors: anomalies inside a tick are
/// logged and resolve to a skipped object or a dropped frame. Errors exist at
/// the API boundary (validated constructors, host surface calls, config
/// parsing).
#[derive(thiserror::Error, Debug)]
pub enum GlimmerError {
    /// Invalid user-provided configuration or drawable data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure reported by the host drawing surface.
    #[error("surface error: {0}")]
    Surface(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or the host.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlimmerError {
    /// Build a [`GlimmerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlimmerError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`GlimmerError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
