//! Strongly-typed identifiers.
//!
//! Chat sessions travel through a browser cookie, so ids must round-trip
//! through their string form. ULIDs also keep transcripts sortable by time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

/// Generates a ULID-backed id type that displays as `<prefix>_<ulid>`.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Ulid);

        impl $name {
            /// Creates a new ID with a randomly generated ULID.
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }

            /// Returns the underlying ULID.
            #[must_use]
            pub const fn as_ulid(&self) -> Ulid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }

        /// Accepts both the prefixed display form and a bare ULID.
        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.strip_prefix(concat!($prefix, "_")).unwrap_or(s);
                Ulid::from_str(raw).map(Self).map_err(|e| ParseIdError {
                    id_type: stringify!($name),
                    reason: e.to_string(),
                })
            }
        }
    };
}

define_id!(
    /// Unique identifier for a chat session.
    ChatSessionId,
    "chat"
);

define_id!(
    /// Unique identifier for a message within a chat transcript.
    MessageId,
    "msg"
);

define_id!(
    /// Correlation identifier for a single resource lookup.
    LookupId,
    "lkp"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_session_id_display_format() {
        let id = ChatSessionId::new();
        assert!(id.to_string().starts_with("chat_"));
    }

    #[test]
    fn lookup_id_display_format() {
        let id = LookupId::new();
        assert!(id.to_string().starts_with("lkp_"));
    }

    #[test]
    fn parse_with_prefix() {
        let id = ChatSessionId::new();
        let parsed: ChatSessionId = id.to_string().parse().expect("should parse");
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_without_prefix() {
        let ulid = Ulid::new();
        let id: MessageId = ulid.to_string().parse().expect("should parse");
        assert_eq!(id.as_ulid(), ulid);
    }

    #[test]
    fn parse_rejects_other_prefix() {
        let other = MessageId::new().to_string();
        let result: Result<ChatSessionId, _> = other.parse();
        assert!(result.is_err());
    }

    #[test]
    fn parse_invalid_ulid() {
        let err = "chat_not-a-ulid"
            .parse::<ChatSessionId>()
            .expect_err("should fail");
        assert_eq!(err.id_type, "ChatSessionId");
    }

    #[test]
    fn id_hash() {
        use std::collections::HashSet;

        let id1 = ChatSessionId::new();
        let id2 = ChatSessionId::new();

        let mut set = HashSet::new();
        set.insert(id1);
        set.insert(id2);
        set.insert(id1);

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn id_serde_is_transparent() {
        let id = ChatSessionId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{}\"", id.as_ulid()));
        let parsed: ChatSessionId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, parsed);
    }
}
