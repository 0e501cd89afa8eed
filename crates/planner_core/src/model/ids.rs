//! Stable identifiers. Supplied by the external ingestion system —
//! never generated by the core, so the planner stays deterministic.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            schemars::JsonSchema,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl TryFrom<uuid::Uuid> for $name {
            type Error = std::convert::Infallible;
            fn try_from(u: uuid::Uuid) -> Result<Self, Self::Error> {
                Ok(Self(u.to_string()))
            }
        }
    };
}

string_id!(PlayerId);
string_id!(FixtureId);
