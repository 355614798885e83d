// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtmate_domain::DomainError;

/// Errors that can occur while classifying or planning a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain precondition was violated. Not retryable.
    DomainViolation(DomainError),
    /// The prefetched snapshot is referentially inconsistent: a record the
    /// classification relies on is missing or points at a different record.
    /// The caller should re-fetch and re-classify; the condition is usually
    /// a benign race with a concurrent actor.
    Inconsistent(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Inconsistent(msg) => write!(f, "Inconsistent snapshot: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DomainViolation(err) => Some(err),
            Self::Inconsistent(_) => None,
        }
    }
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
