//! Error types for port operations.

/// Failures reported by the host blob storage.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BlobError {
    /// The host rejected or failed the read.
    #[error("Blob read failed: {0}")]
    Read(String),

    /// The host rejected the write. Nothing was persisted.
    #[error("Blob write failed: {0}")]
    Write(String),
}

impl BlobError {
    pub fn read(message: impl ToString) -> Self {
        Self::Read(message.to_string())
    }

    pub fn write(message: impl ToString) -> Self {
        Self::Write(message.to_string())
    }
}

/// Failures reported by the host dice service.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DiceError {
    #[error("Dice tray rejected the roll: {0}")]
    Rejected(String),
}
