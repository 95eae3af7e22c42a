use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of characters shown when an identifier is displayed in short form.
pub const SHORT_LEN: usize = 8;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// The underlying UUID.
            #[must_use]
            pub const fn uuid(self) -> Uuid {
                self.0
            }

            /// The leading characters of the identifier, as printed in listings.
            #[must_use]
            pub fn short(self) -> String {
                self.0.to_string()[..SHORT_LEN].to_string()
            }

            /// Whether `prefix` is a (case-insensitive) prefix of this identifier.
            #[must_use]
            pub fn matches_prefix(self, prefix: &str) -> bool {
                let prefix = prefix.trim().to_ascii_lowercase();
                !prefix.is_empty()
                    && (self.0.to_string().starts_with(&prefix)
                        || self.0.simple().to_string().starts_with(&prefix))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Stable identifier of a [`Day`](super::Day).
    ///
    /// Assigned when the day is created (or first loaded without one) and
    /// never reused, so an edit always targets the day it was opened for.
    DayId
);

entity_id!(
    /// Stable identifier of a [`Match`](super::Match).
    MatchId
);

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::{DayId, MatchId};

    #[test]
    fn short_form_is_leading_hex() {
        let uuid = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(DayId::from(uuid).short(), "67e55044");
    }

    #[test]
    fn prefix_matching_ignores_case_and_hyphens() {
        let id = MatchId::from(Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap());
        assert!(id.matches_prefix("67E5"));
        assert!(id.matches_prefix("67e55044-10b1"));
        assert!(id.matches_prefix("67e5504410b1"));
        assert!(!id.matches_prefix("68"));
        assert!(!id.matches_prefix("  "));
    }

    #[test]
    fn new_ids_are_distinct() {
        assert_ne!(DayId::new(), DayId::new());
    }
}
