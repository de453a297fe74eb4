use std::fmt;

/// Convenience result type used across Sceneweave.
pub type SceneResult<T> = Result<T, SceneError>;

/// Which lookup produced a store failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreAttempt {
    /// First query, against the configured primary record kind.
    Primary,
    /// Second query, against the other record kind.
    Fallback,
    /// Upsert issued by a save.
    Save,
}

impl fmt::Display for StoreAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Fallback => f.write_str("fallback"),
            Self::Save => f.write_str("save"),
        }
    }
}

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Invalid user-provided or document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid animation or motion configuration.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Transport/storage failure reported by the remote document store.
    #[error("store error ({attempt} attempt on '{table}' by '{key}'): {message}")]
    Store {
        /// Record table that was queried.
        table: String,
        /// Lookup key (UUID or slug) used for the query.
        key: String,
        /// Whether this was the primary, fallback or save attempt.
        attempt: StoreAttempt,
        /// Transport error text.
        message: String,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`SceneError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`SceneError::Store`] value.
    pub fn store(
        table: impl Into<String>,
        key: impl Into<String>,
        attempt: StoreAttempt,
        msg: impl Into<String>,
    ) -> Self {
        Self::Store {
            table: table.into(),
            key: key.into(),
            attempt,
            message: msg.into(),
        }
    }

    /// Return `true` for transport failures raised by the document store.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Store { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
