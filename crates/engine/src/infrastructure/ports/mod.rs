//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions over the host. Ports exist for:
//! - Blob storage (the host's key/value slot)
//! - Notifications and the dice tray
//! - Clock/Random (for testing)

mod error;
mod host;
mod testing;

// =============================================================================
// Host Ports
// =============================================================================
pub use host::{
    BlobStore, DiceTrayPort, Notification, NotificationLevel, NotifierPort, RollId, RollRequest,
};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use host::{MockBlobStore, MockDiceTrayPort, MockNotifierPort};

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{BlobError, DiceError};
