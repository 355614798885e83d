// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Generates a string-backed identifier newtype.
///
/// Every record identifier is an opaque string assigned at creation time.
/// Identifiers compare by value and hash by value; they carry no ordering
/// semantics beyond lexicographic.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from its string form.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the string form of this identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(String::from(value))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id! {
    /// Identifies one user account.
    ///
    /// User identities are issued by the authentication layer; this core
    /// treats them as opaque and trusted.
    UserId
}

string_id! {
    /// Identifies one event (a single session with fixed capacity).
    EventId
}

string_id! {
    /// Identifies one registration (an occupied or requested seat).
    RegistrationId
}

string_id! {
    /// Identifies one team (a pairing attempt or pairing result).
    TeamId
}

string_id! {
    /// Identifies one notification record.
    NotificationId
}
