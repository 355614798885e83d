// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engine request and response data transfer objects.

use thiserror::Error;
use time::OffsetDateTime;

/// Errors raised while parsing request fields into domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The mode string is not a known event mode.
    #[error("Unknown event mode '{0}'. Must be 'Players' or 'Teams'")]
    UnknownMode(String),
    /// The action string is not a known dissolve action.
    #[error("Unknown action '{0}'. Must be 'Decline', 'Leave', or 'Cancel'")]
    UnknownAction(String),
}

/// Request to create a new event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEventRequest {
    /// The organizing user.
    pub organizer_id: String,
    /// Display title.
    pub title: String,
    /// Seat occupancy mode: `Players` or `Teams`.
    pub mode: String,
    /// Fixed capacity in seats.
    pub slots_available: u32,
    /// Scheduled start of the session.
    pub starts_at: OffsetDateTime,
}

/// Response for a successful event creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateEventResponse {
    /// The created event's identifier.
    pub event_id: String,
    /// A success message.
    pub message: String,
}

/// Request to register a solo seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    /// The registering user.
    pub user_id: String,
    /// The event to register for.
    pub event_id: String,
    /// Whether the seat should be open to partner invites (Teams mode).
    pub looking_for_partner: bool,
}

/// Response for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterResponse {
    /// The created registration's identifier.
    pub registration_id: String,
    /// The assigned status: `Confirmed` or `Waitlist`.
    pub status: String,
    /// The FIFO ordinal when waitlisted.
    pub waitlist_position: Option<u32>,
    /// A success message.
    pub message: String,
}

/// Request to invite a partner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendInviteRequest {
    /// The inviting user.
    pub inviter_id: String,
    /// The event.
    pub event_id: String,
    /// The invited user.
    pub invitee_id: String,
}

/// Response for a successfully sent invite.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SendInviteResponse {
    /// The created pending team's identifier.
    pub team_id: String,
    /// A success message.
    pub message: String,
}

/// Request to accept a pending invite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptInviteRequest {
    /// The accepting user.
    pub acceptor_id: String,
    /// The team being accepted.
    pub team_id: String,
    /// The notification that announced the invite, marked read on
    /// consumption.
    pub notification_id: Option<String>,
}

/// Response for an acceptance.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AcceptInviteResponse {
    /// The team's identifier.
    pub team_id: String,
    /// The team's resulting status.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// Request to decline, cancel, or leave a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DissolveTeamRequest {
    /// The acting user.
    pub actor_id: String,
    /// The team being dissolved.
    pub team_id: String,
    /// The dissolution kind: `Decline`, `Leave`, or `Cancel`.
    pub action: String,
    /// The notification that announced the invite, marked read on
    /// consumption.
    pub notification_id: Option<String>,
}

/// Response for a dissolution.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DissolveTeamResponse {
    /// A success message.
    pub message: String,
}

/// Request to withdraw a seat entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawRequest {
    /// The withdrawing user.
    pub user_id: String,
    /// The registration being withdrawn.
    pub registration_id: String,
}

/// Response for a withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WithdrawResponse {
    /// A success message.
    pub message: String,
}
