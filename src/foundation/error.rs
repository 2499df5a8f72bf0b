/// Convenience result type used across autograph.
pub type AutographResult<T> = Result<T, AutographError>;

/// Top-level error taxonomy used by library APIs.
///
/// Empty names are not errors: they are rejected as a no-op by the session layer.
#[derive(thiserror::Error, Debug)]
pub enum AutographError {
    /// Invalid user-provided data (colors, canvas sizes, timing values).
    #[error("validation error: {0}")]
    Validation(String),

    /// Font files that cannot be read or registered.
    #[error("font error: {0}")]
    Font(String),

    /// Failures while rasterizing a display list.
    #[error("render error: {0}")]
    Render(String),

    /// Failures while encoding or writing images.
    #[error("encode error: {0}")]
    Encode(String),

    /// Malformed or inconsistent configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AutographError {
    /// Build a [`AutographError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`AutographError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`AutographError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`AutographError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`AutographError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
