/// Convenience result type used across runeglyph.
pub type RuneResult<T> = Result<T, RuneError>;

/// Top-level error taxonomy used by the rendering and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum RuneError {
    /// Invalid caller-provided data (digits, numbers, strip inputs).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid configuration detected before rendering starts.
    #[error("config error: {0}")]
    Config(String),

    /// Failures while rasterizing a scene.
    #[error("render error: {0}")]
    Render(String),

    /// Failures while persisting a rendered frame.
    #[error("export error: {0}")]
    Export(String),

    /// Failures while driving the external video encoder.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RuneError {
    /// Build a [`RuneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RuneError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`RuneError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`RuneError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`RuneError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
