//! ID types for league entities.
//!
//! Every entity in the league document is addressed by a string identifier.
//! Teams used to be referenced by display name; they now carry a stable slug
//! that survives renames.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Ok(Self(s.trim().to_string()))
            }
        }
    };
}

string_id!(
    /// Type-safe wrapper for player IDs (zero-padded sequence, e.g. `"007"`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use softball_league::PlayerId;
    ///
    /// let id = PlayerId::from_sequence(7);
    /// assert_eq!(id.as_str(), "007");
    /// assert_eq!(id.sequence(), Some(7));
    /// ```
    PlayerId
);

string_id!(
    /// Type-safe wrapper for team IDs (slug of the name the team was created with).
    TeamId
);

string_id!(
    /// Type-safe wrapper for match IDs.
    MatchId
);

string_id!(UserId);

impl PlayerId {
    /// Build a player id from its numeric sequence, padded to three digits.
    pub fn from_sequence(n: u32) -> Self {
        Self(format!("{:03}", n))
    }

    /// Numeric part of the id, if it is one.
    pub fn sequence(&self) -> Option<u32> {
        self.0.parse().ok()
    }
}

impl TeamId {
    /// Derive a team id from a display name: lowercase, whitespace runs become `-`.
    pub fn from_name(name: &str) -> Self {
        Self(name.split_whitespace().collect::<Vec<_>>().join("-").to_lowercase())
    }
}

impl MatchId {
    /// Build a match id from a millisecond timestamp.
    pub fn from_millis(millis: u128) -> Self {
        Self(format!("p{}", millis))
    }
}
