//! # Object Identifiers
//!
//! Validated identifiers for payments API objects. Ids are interpolated into
//! request paths, so they are restricted to ASCII alphanumerics and `_`.

use crate::error::TerminalError;
use serde::{Deserialize, Serialize};
use std::fmt;

fn validate(kind: &str, value: &str) -> Result<(), TerminalError> {
    if value.is_empty() {
        return Err(TerminalError::invalid_request(format!(
            "{} must not be empty",
            kind
        )));
    }

    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(TerminalError::invalid_request(format!(
            "{} contains invalid characters: {:?}",
            kind, value
        )));
    }

    Ok(())
}

macro_rules! object_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, TerminalError> {
                let value = value.into();
                validate($kind, &value)?;
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = TerminalError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

object_id!(
    /// Terminal reader id (`tmr_...`)
    ReaderId,
    "reader_id"
);

object_id!(
    /// Payment intent id (`pi_...`)
    PaymentIntentId,
    "payment_intent_id"
);
