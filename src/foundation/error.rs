/// Convenience result type used across the reticle engine.
pub type ReticleResult<T> = Result<T, ReticleError>;

/// Top-level error taxonomy used by resolvers and host-facing APIs.
///
/// Resolver errors never cross [`crate::ReticleSession::draw`]: the layout and compile stages turn
/// them into [`crate::LayoutIssue`] records and skip the affected element.
#[derive(thiserror::Error, Debug)]
pub enum ReticleError {
    /// Zero/negative aperture, non-finite ratio, or any input that would divide by zero.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An aspect-ratio index (or similar list reference) outside the configured entries.
    #[error("{what} index {index} is out of range (len {len})")]
    IndexOutOfRange {
        /// Name of the indexed collection.
        what: &'static str,
        /// Requested index as supplied by the host.
        index: i64,
        /// Number of configured entries.
        len: usize,
    },

    /// Something anchors to an element that is currently turned off.
    #[error("undisplayed dependency: {0}")]
    UndisplayedDependency(String),

    /// Host-side validation of a configuration document.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReticleError {
    /// Build a [`ReticleError::InvalidConfiguration`] value.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Build a [`ReticleError::IndexOutOfRange`] value.
    pub fn index_out_of_range(what: &'static str, index: i64, len: usize) -> Self {
        Self::IndexOutOfRange { what, index, len }
    }

    /// Build a [`ReticleError::UndisplayedDependency`] value.
    pub fn undisplayed(msg: impl Into<String>) -> Self {
        Self::UndisplayedDependency(msg.into())
    }

    /// Build a [`ReticleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReticleError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
