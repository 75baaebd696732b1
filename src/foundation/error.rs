/// Convenience result type used across the crate.
pub type WindowsillResult<T> = Result<T, WindowsillError>;

/// Top-level error taxonomy.
///
/// Pose evaluation itself never fails; errors come from the edges around it (configuration,
/// timeline construction, assets, rasterization and encoding).
#[derive(thiserror::Error, Debug)]
pub enum WindowsillError {
    /// Invalid configuration or caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A timeline whose brackets overlap, leave gaps or are out of order.
    #[error("timeline error: {0}")]
    Timeline(String),

    /// Errors while rendering or encoding a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Missing or unusable external resources (fonts).
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WindowsillError {
    /// Build a [`WindowsillError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WindowsillError::Timeline`] value.
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    /// Build a [`WindowsillError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`WindowsillError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`WindowsillError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
