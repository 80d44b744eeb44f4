use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// String-backed identifiers.
///
/// Stored documents carry ids minted by older sheet versions (for example
/// `character-1712345678901`), so ids are opaque strings rather than bare UUIDs.
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix used when minting new ids of this kind.
            pub const PREFIX: &'static str = $prefix;

            /// Wrap an existing id string as-is.
            pub fn from_raw(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(CharacterId, "character");
define_id!(AbilityId, "ability");
define_id!(NotesPageId, "notes-page");

impl CharacterId {
    /// Mint a character id from a random token.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(format!("{}-{}", Self::PREFIX, uuid.simple()))
    }
}

impl AbilityId {
    /// Mint the id for the given counter value (`ability-3`).
    pub fn from_counter(counter: u32) -> Self {
        Self(format!("{}-{}", Self::PREFIX, counter))
    }
}

impl NotesPageId {
    /// Mint the id for the given counter value (`notes-page-3`).
    pub fn from_counter(counter: u32) -> Self {
        Self(format!("{}-{}", Self::PREFIX, counter))
    }
}
