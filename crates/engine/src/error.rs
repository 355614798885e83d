// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the engine boundary.

use courtmate::CoreError;
use courtmate_domain::DomainError;
use courtmate_persistence::StoreError;

/// Engine-level errors.
///
/// These are distinct from domain/core errors and represent the operation
/// contract: precondition violations carry a stable reason code, conflicts
/// are distinguishable from rejections, and store failures pass through
/// unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A domain rule was violated. Not retryable.
    DomainRuleViolation {
        /// The rule that was violated, as a stable reason code.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested record was not found.
    ResourceNotFound {
        /// The type of record that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Concurrent actors kept invalidating the operation's read set.
    ConflictRetriesExhausted {
        /// How many full prefetch/commit cycles were attempted.
        attempts: u32,
    },
    /// The store failed for reasons other than a guard conflict.
    Store(StoreError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::ConflictRetriesExhausted { attempts } => {
                write!(
                    f,
                    "Operation kept conflicting with concurrent changes after {attempts} attempts; please try again"
                )
            }
            Self::Store(err) => write!(f, "Store error: {err}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// Translates a domain error into an engine error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly; each precondition failure gets a stable reason code.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> EngineError {
    match err {
        DomainError::SelfInvite(_) => EngineError::DomainRuleViolation {
            rule: String::from("self_invite"),
            message: err.to_string(),
        },
        DomainError::InviterAlreadyCommitted { .. } => EngineError::DomainRuleViolation {
            rule: String::from("inviter_already_committed"),
            message: err.to_string(),
        },
        DomainError::InviteeUnavailable { .. } => EngineError::DomainRuleViolation {
            rule: String::from("invitee_unavailable"),
            message: err.to_string(),
        },
        DomainError::AlreadyRegistered { .. } => EngineError::DomainRuleViolation {
            rule: String::from("already_registered"),
            message: err.to_string(),
        },
        DomainError::NotTeamMember { .. } => EngineError::DomainRuleViolation {
            rule: String::from("not_team_member"),
            message: err.to_string(),
        },
        DomainError::NotAcceptanceTarget { .. } => EngineError::DomainRuleViolation {
            rule: String::from("not_acceptance_target"),
            message: err.to_string(),
        },
        DomainError::WrongTeamStatus { .. } => EngineError::DomainRuleViolation {
            rule: String::from("wrong_team_status"),
            message: err.to_string(),
        },
        DomainError::NotPrimaryParty { .. } => EngineError::DomainRuleViolation {
            rule: String::from("not_primary_party"),
            message: err.to_string(),
        },
        DomainError::NotSecondaryParty { .. } => EngineError::DomainRuleViolation {
            rule: String::from("not_secondary_party"),
            message: err.to_string(),
        },
        DomainError::RegistrationNotOwned { .. } => EngineError::DomainRuleViolation {
            rule: String::from("registration_not_owned"),
            message: err.to_string(),
        },
        DomainError::RegistrationNotLive(_) => EngineError::DomainRuleViolation {
            rule: String::from("registration_not_live"),
            message: err.to_string(),
        },
        DomainError::PairingNotSupported(_) => EngineError::DomainRuleViolation {
            rule: String::from("pairing_not_supported"),
            message: err.to_string(),
        },
        DomainError::TeamInvariantViolated { .. } => EngineError::DomainRuleViolation {
            rule: String::from("team_invariant_violated"),
            message: err.to_string(),
        },
        DomainError::InvalidTitle(message) => EngineError::InvalidInput {
            field: String::from("title"),
            message,
        },
        DomainError::InvalidSlotCount(count) => EngineError::InvalidInput {
            field: String::from("slots_available"),
            message: format!("Invalid slot count: {count}. Must be at least 1"),
        },
        DomainError::InvalidUserId(message) => EngineError::InvalidInput {
            field: String::from("user_id"),
            message,
        },
        DomainError::InvalidEventMode(value) => EngineError::InvalidInput {
            field: String::from("mode"),
            message: format!("Invalid event mode: '{value}'"),
        },
        DomainError::InvalidStatus(value) => EngineError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid status: '{value}'"),
        },
    }
}

/// Translates a core error into an engine error.
///
/// Inconsistent snapshots normally drive a retry inside the operation
/// loop; translation applies only when one survives to the boundary.
#[must_use]
pub fn translate_core_error(err: CoreError) -> EngineError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Inconsistent(message) => EngineError::Store(StoreError::NotFound(message)),
    }
}
