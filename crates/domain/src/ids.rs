use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Record ids are opaque strings: issue ids arrive from the server payload,
/// repository ids are generated locally.
macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw id, rejecting empty or whitespace-only values.
            pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
                let raw = raw.into();
                if raw.trim().is_empty() {
                    return Err(DomainError::validation(concat!(
                        $entity,
                        " id cannot be empty"
                    )));
                }
                Ok(Self(raw))
            }

            /// Generate a fresh UUID v4 id.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_id!(IssueId, "Issue");
define_id!(RepositoryId, "Repository");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_blank_ids() {
        assert!(IssueId::parse("").is_err());
        assert!(IssueId::parse("   ").is_err());
        assert_eq!(IssueId::parse("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn generated_ids_are_unique_uuids() {
        let a = RepositoryId::generate();
        let b = RepositoryId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = IssueId::parse("issue-1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"issue-1\"");
        let back: IssueId = serde_json::from_str("\"issue-1\"").unwrap();
        assert_eq!(back, id);
    }
}
