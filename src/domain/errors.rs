use thiserror::Error;

/// A stored row that cannot be turned into a [`crate::domain::listings::Listing`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    #[error("column `{0}` is missing")]
    MissingField(&'static str),
    #[error("column `{column}` has an incompatible type: {message}")]
    Incompatible {
        column: &'static str,
        message: String,
    },
    #[error("photos column has an unsupported shape: {0}")]
    PhotosShape(String),
    #[error("column `{column}` is out of range: {value}")]
    OutOfRange { column: &'static str, value: f64 },
}

impl MappingError {
    pub fn incompatible(column: &'static str, message: impl Into<String>) -> Self {
        Self::Incompatible {
            column,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error("{0}")]
    Unexpected(String),
}

impl RepositoryError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}
