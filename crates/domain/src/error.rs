// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ids::{EventId, RegistrationId, TeamId, UserId};
use crate::team::TeamStatus;

/// Errors that can occur during domain validation.
///
/// Every variant is a precondition violation: it fails immediately, is never
/// retried, and surfaces to the caller with a specific reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A user attempted to invite themself.
    SelfInvite(UserId),
    /// The inviter already holds a seat that is closed to pairing.
    InviterAlreadyCommitted {
        /// The inviter.
        user_id: UserId,
        /// The event.
        event_id: EventId,
    },
    /// The invitee is already a confirmed occupant of a live pairing.
    InviteeUnavailable {
        /// The invitee.
        user_id: UserId,
        /// The event.
        event_id: EventId,
    },
    /// A user already holds a live registration for this event.
    AlreadyRegistered {
        /// The registering user.
        user_id: UserId,
        /// The event.
        event_id: EventId,
    },
    /// The actor is not a member of the team they tried to act on.
    NotTeamMember {
        /// The acting user.
        user_id: UserId,
        /// The team.
        team_id: TeamId,
    },
    /// The actor tried an acceptance they are not the target of.
    NotAcceptanceTarget {
        /// The acting user.
        user_id: UserId,
        /// The team.
        team_id: TeamId,
    },
    /// The action requires a team in a different status.
    WrongTeamStatus {
        /// The team.
        team_id: TeamId,
        /// The status found.
        found: TeamStatus,
    },
    /// Only the primary party may perform this action.
    NotPrimaryParty {
        /// The acting user.
        user_id: UserId,
        /// The team.
        team_id: TeamId,
    },
    /// Only the secondary party may perform this action.
    NotSecondaryParty {
        /// The acting user.
        user_id: UserId,
        /// The team.
        team_id: TeamId,
    },
    /// A registration may only be withdrawn by its primary holder.
    RegistrationNotOwned {
        /// The acting user.
        user_id: UserId,
        /// The registration.
        registration_id: RegistrationId,
    },
    /// The registration was already cancelled.
    RegistrationNotLive(RegistrationId),
    /// Partner pairing was attempted on an event that does not support it.
    PairingNotSupported(EventId),
    /// Event title is empty or invalid.
    InvalidTitle(String),
    /// Event capacity must be at least one seat.
    InvalidSlotCount(u32),
    /// A user identifier is empty or invalid.
    InvalidUserId(String),
    /// An event mode string did not parse.
    InvalidEventMode(String),
    /// A status string did not parse.
    InvalidStatus(String),
    /// A team's confirmation flags contradict its status.
    TeamInvariantViolated {
        /// The team.
        team_id: TeamId,
        /// The contradictory status.
        status: TeamStatus,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelfInvite(user_id) => {
                write!(f, "User {user_id} cannot invite themself")
            }
            Self::InviterAlreadyCommitted { user_id, event_id } => {
                write!(
                    f,
                    "User {user_id} already holds a closed seat for event {event_id}"
                )
            }
            Self::InviteeUnavailable { user_id, event_id } => {
                write!(
                    f,
                    "User {user_id} is already paired for event {event_id}"
                )
            }
            Self::AlreadyRegistered { user_id, event_id } => {
                write!(
                    f,
                    "User {user_id} is already registered for event {event_id}"
                )
            }
            Self::NotTeamMember { user_id, team_id } => {
                write!(f, "User {user_id} is not a member of team {team_id}")
            }
            Self::NotAcceptanceTarget { user_id, team_id } => {
                write!(
                    f,
                    "User {user_id} is not the pending party of team {team_id}"
                )
            }
            Self::WrongTeamStatus { team_id, found } => {
                write!(f, "Team {team_id} is in status {found}")
            }
            Self::NotPrimaryParty { user_id, team_id } => {
                write!(f, "User {user_id} is not the primary of team {team_id}")
            }
            Self::NotSecondaryParty { user_id, team_id } => {
                write!(f, "User {user_id} is not the secondary of team {team_id}")
            }
            Self::RegistrationNotOwned {
                user_id,
                registration_id,
            } => {
                write!(
                    f,
                    "User {user_id} does not own registration {registration_id}"
                )
            }
            Self::RegistrationNotLive(registration_id) => {
                write!(f, "Registration {registration_id} is not live")
            }
            Self::PairingNotSupported(event_id) => {
                write!(f, "Event {event_id} does not support partner pairing")
            }
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidSlotCount(count) => {
                write!(f, "Invalid slot count: {count}. Must be at least 1")
            }
            Self::InvalidUserId(msg) => write!(f, "Invalid user id: {msg}"),
            Self::InvalidEventMode(s) => write!(f, "Invalid event mode: '{s}'"),
            Self::InvalidStatus(s) => write!(f, "Invalid status: '{s}'"),
            Self::TeamInvariantViolated { team_id, status } => {
                write!(
                    f,
                    "Team {team_id} violates the confirmation invariant for status {status}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
