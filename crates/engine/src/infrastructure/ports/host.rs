//! Host platform port traits (blob storage, notifications, dice tray).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::{BlobError, DiceError};

// =============================================================================
// Blob Storage
// =============================================================================

/// One string-valued storage slot provided by the host.
///
/// There is no partial update and no locking: callers load, modify and
/// store the whole value.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Current value, or `None` when nothing was ever stored.
    async fn get_blob(&self) -> Result<Option<String>, BlobError>;
    /// Replace the whole value.
    async fn set_blob(&self, blob: String) -> Result<(), BlobError>;
}

// =============================================================================
// Notifications
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

/// A transient, auto-dismissing message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub dismiss_after: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>, dismiss_after: Duration) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
            dismiss_after,
        }
    }

    pub fn error(message: impl Into<String>, dismiss_after: Duration) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
            dismiss_after,
        }
    }

    pub fn info(message: impl Into<String>, dismiss_after: Duration) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
            dismiss_after,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait NotifierPort: Send + Sync {
    fn notify(&self, notification: Notification);
}

// =============================================================================
// Dice Tray
// =============================================================================

/// A roll placed in the host's dice tray (`{"name": "Might Test", "roll": "2d10+2"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRequest {
    pub name: String,
    pub roll: String,
}

impl RollRequest {
    pub fn new(name: impl Into<String>, roll: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roll: roll.into(),
        }
    }
}

/// Id the host assigns to a roll placed in the tray.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RollId(pub String);

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiceTrayPort: Send + Sync {
    async fn put_dice_in_tray(&self, rolls: Vec<RollRequest>) -> Result<RollId, DiceError>;
}
