//! Sheet operation errors.

use herosheet_domain::DomainError;

use crate::stores::StoreError;

/// Errors that can occur during sheet operations.
///
/// The display text is what the user sees in the notification.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("Character \"{0}\" not found!")]
    NotFound(String),

    #[error("Failed to save character data!")]
    SaveFailed(#[source] StoreError),

    #[error("Character storage could not be read!")]
    Storage(#[source] StoreError),

    #[error("Failed to load character data: {0}")]
    MalformedInput(String),

    #[error("{0}")]
    Domain(#[from] DomainError),
}

impl SheetError {
    /// Map a store error raised while reading.
    pub fn from_read(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(what) => Self::NotFound(what),
            other => Self::Storage(other),
        }
    }
}
