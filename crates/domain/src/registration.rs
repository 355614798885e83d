// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::ids::{EventId, RegistrationId, TeamId, UserId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Lifecycle status of a seat registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistrationStatus {
    /// Holds a confirmed seat, counted in `registrations_count`.
    Confirmed,
    /// Queued for a seat, counted in `waitlist_count`.
    Waitlist,
    /// Awaiting pairing resolution; holds no seat and is not counted.
    Pending,
    /// Withdrawn; retained for history only.
    Cancelled,
}

impl RegistrationStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Waitlist => "Waitlist",
            Self::Pending => "Pending",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Returns whether this status occupies capacity (confirmed or queued).
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Waitlist | Self::Pending)
    }
}

impl FromStr for RegistrationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Confirmed" => Ok(Self::Confirmed),
            "Waitlist" => Ok(Self::Waitlist),
            "Pending" => Ok(Self::Pending),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pairing state of the seat's secondary slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PartnerStatus {
    /// No partner attached.
    #[default]
    None,
    /// A partner is attached but has not confirmed.
    Pending,
    /// The partner confirmed the pairing.
    Confirmed,
    /// The partner declined the pairing.
    Denied,
}

impl PartnerStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Denied => "Denied",
        }
    }
}

impl FromStr for PartnerStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(Self::None),
            "Pending" => Ok(Self::Pending),
            "Confirmed" => Ok(Self::Confirmed),
            "Denied" => Ok(Self::Denied),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for PartnerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One occupied or requested seat for one primary user in one event.
///
/// The primary player exclusively owns withdrawal intent; the pairing engine
/// mutates status, partner, and team fields on behalf of both paired users.
/// When a team dissolves and a survivor remains, the registration is
/// re-purposed in place (primary swapped) so the seat keeps its position in
/// confirmed/waitlist ordering instead of being reissued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// The registration identifier.
    pub registration_id: RegistrationId,
    /// The event this seat belongs to.
    pub event_id: EventId,
    /// The primary seat holder.
    pub player_id: UserId,
    /// The paired partner, Teams mode only.
    pub player2_id: Option<UserId>,
    /// Seat lifecycle status.
    pub status: RegistrationStatus,
    /// Pairing state of the secondary slot.
    pub partner_status: PartnerStatus,
    /// Back-reference to the pairing record when paired.
    pub team_id: Option<TeamId>,
    /// Whether this confirmed seat holder is open to partner invites.
    pub looking_for_partner: bool,
    /// FIFO ordinal; meaningful only when `status` is `Waitlist`.
    pub waitlist_position: Option<u32>,
    /// Creation timestamp; FIFO tie-break for equal waitlist positions.
    #[serde(with = "time::serde::iso8601")]
    pub created_at: OffsetDateTime,
}

impl Registration {
    /// Returns whether this seat is an open invite target: confirmed,
    /// unpaired, and flagged as looking for a partner.
    #[must_use]
    pub const fn is_free_agent(&self) -> bool {
        matches!(self.status, RegistrationStatus::Confirmed)
            && self.team_id.is_none()
            && self.looking_for_partner
    }

    /// Returns whether `user` is the primary or secondary party of this seat.
    #[must_use]
    pub fn involves(&self, user: &UserId) -> bool {
        self.player_id == *user || self.player2_id.as_ref() == Some(user)
    }
}
