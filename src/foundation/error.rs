/// Crate-wide result alias.
pub type Room213Result<T> = Result<T, Room213Error>;

/// Errors produced by the timeline, narration, audio and rendering layers.
///
/// Capability errors (`Audio`, `Speech`) are logged and degraded by the owning component and
/// never reach a viewer.
#[derive(thiserror::Error, Debug)]
pub enum Room213Error {
    /// Invalid configuration or catalog data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Audio graph or audio output failure.
    #[error("audio error: {0}")]
    Audio(String),

    /// Speech capability failure.
    #[error("speech error: {0}")]
    Speech(String),

    /// Scene rasterization failure.
    #[error("render error: {0}")]
    Render(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Room213Error {
    /// Build a [`Room213Error::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`Room213Error::Audio`].
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Build a [`Room213Error::Speech`].
    pub fn speech(msg: impl Into<String>) -> Self {
        Self::Speech(msg.into())
    }

    /// Build a [`Room213Error::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`Room213Error::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
