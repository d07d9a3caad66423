//! Typed identifiers
//!
//! Entity ids are random uuids shown in a short prefixed form; users are
//! identified by an opaque string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Uuid newtype with a short, prefixed display form (`trv-1a2b3c4d`)
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Prefix plus the first 8 hex digits
            pub fn short(&self) -> String {
                let hex = self.0.simple().to_string();
                format!("{}{}", Self::PREFIX, &hex[..8])
            }

            /// Whether `identifier` names this id, in full or in short form
            pub fn matches(&self, identifier: &str) -> bool {
                let identifier = identifier.trim();
                identifier.eq_ignore_ascii_case(&self.short())
                    || identifier.parse::<Self>().map_or(false, |id| id == *self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.short())
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        /// Accepts a bare uuid or one carrying the display prefix
        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Uuid::parse_str(s.strip_prefix(Self::PREFIX).unwrap_or(s)).map(Self)
            }
        }
    };
}

define_id!(
    /// Identifies a travel
    TravelId,
    "trv-"
);
define_id!(ExpenseId, "exp-");
define_id!(CategoryId, "cat-");
define_id!(CurrencyRateId, "rate-");

/// Identity of the person owning travels, expenses and custom categories
///
/// Opaque string handed over by whatever authenticates the caller.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_id_creation() {
        let id = TravelId::new();
        assert!(!id.as_uuid().is_nil());
    }

    #[test]
    fn test_id_display() {
        let id = ExpenseId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("exp-"));
        assert_eq!(display.len(), 12);

        let rate = CurrencyRateId::new();
        assert!(rate.to_string().starts_with("rate-"));
    }

    #[test]
    fn test_id_equality() {
        let id1 = TravelId::new();
        let id2 = id1;
        assert_eq!(id1, id2);
        assert_ne!(id1, TravelId::new());
    }

    #[test]
    fn test_id_serialization() {
        let id = CategoryId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: CategoryId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_id_parse_with_prefix() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: TravelId = format!("trv-{}", uuid_str).parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);

        let plain: TravelId = uuid_str.parse().unwrap();
        assert_eq!(id, plain);
        assert!("trv-nothex".parse::<TravelId>().is_err());
    }

    #[test]
    fn test_id_matches_full_and_short_forms() {
        let id = ExpenseId::new();
        assert!(id.matches(&id.to_string()));
        assert!(id.matches(&id.to_string().to_uppercase()));
        assert!(id.matches(&id.as_uuid().to_string()));
        assert!(id.matches(&format!(" exp-{} ", id.as_uuid())));
        assert!(!id.matches(&ExpenseId::new().to_string()));
        assert!(!id.matches("Riad"));
    }

    #[test]
    fn test_user_id() {
        let user = UserId::new("google-oauth2|42");
        assert_eq!(user.as_str(), "google-oauth2|42");
        assert_eq!(user, UserId::from("google-oauth2|42"));
        assert_eq!(serde_json::to_string(&user).unwrap(), "\"google-oauth2|42\"");
    }
}
