// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::ids::{EventId, RegistrationId, TeamId, UserId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Lifecycle status of a pairing.
///
/// Invariant: `Confirmed` and `Waitlist` imply both confirmation flags are
/// true; `Pending` implies at least one is false. No transition re-enters
/// `Pending` — a dissolved pairing is deleted, never reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TeamStatus {
    /// Awaiting at least one party's confirmation.
    #[default]
    Pending,
    /// Both parties confirmed and a seat was granted.
    Confirmed,
    /// Both parties confirmed but capacity was full; queued.
    Waitlist,
}

impl TeamStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Waitlist => "Waitlist",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - `Pending` → `Confirmed` (both sides accepted, seat granted)
    /// - `Pending` → `Waitlist` (both sides accepted, capacity full)
    /// - `Waitlist` → `Confirmed` (promotion)
    ///
    /// Every other exit from a status is a deletion, not a transition.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Waitlist)
                | (Self::Waitlist, Self::Confirmed)
        )
    }

    /// Returns whether this status occupies event capacity or queue space.
    #[must_use]
    pub const fn holds_seat(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Waitlist)
    }
}

impl FromStr for TeamStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Confirmed" => Ok(Self::Confirmed),
            "Waitlist" => Ok(Self::Waitlist),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for TeamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A pairing attempt or pairing result between exactly two users.
///
/// Teams and registrations reference each other by id only; both records
/// move together through the pairing engine and must never drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// The team identifier.
    pub team_id: TeamId,
    /// The event this pairing belongs to.
    pub event_id: EventId,
    /// The primary party.
    pub player1_id: UserId,
    /// The secondary party.
    pub player2_id: UserId,
    /// Whether the primary party has confirmed.
    pub player1_confirmed: bool,
    /// Whether the secondary party has confirmed.
    pub player2_confirmed: bool,
    /// Pairing lifecycle status.
    pub status: TeamStatus,
    /// The seat registration this pairing occupies, once one exists.
    pub registration_id: Option<RegistrationId>,
    /// Creation timestamp; FIFO tie-break for waitlisted teams.
    #[serde(with = "time::serde::iso8601")]
    pub created_at: OffsetDateTime,
}

impl Team {
    /// Returns whether both parties have confirmed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.player1_confirmed && self.player2_confirmed
    }

    /// Returns whether `user` is either party of this pairing.
    #[must_use]
    pub fn involves(&self, user: &UserId) -> bool {
        self.player1_id == *user || self.player2_id == *user
    }

    /// Returns the party opposite `user`, if `user` is a member.
    #[must_use]
    pub fn other_party(&self, user: &UserId) -> Option<&UserId> {
        if self.player1_id == *user {
            Some(&self.player2_id)
        } else if self.player2_id == *user {
            Some(&self.player1_id)
        } else {
            None
        }
    }

    /// Returns the party whose confirmation flag is still false.
    ///
    /// This is the "target of acceptance": the user who must act next for
    /// the pairing to complete. `None` once both sides have confirmed.
    #[must_use]
    pub const fn unconfirmed_party(&self) -> Option<&UserId> {
        if !self.player1_confirmed {
            Some(&self.player1_id)
        } else if !self.player2_confirmed {
            Some(&self.player2_id)
        } else {
            None
        }
    }

    /// Verifies the confirmation-flag invariant for this team's status.
    ///
    /// # Errors
    ///
    /// Returns an error if a seated team has an unconfirmed party, or a
    /// pending team has both parties confirmed.
    pub fn check_confirmation_invariant(&self) -> Result<(), DomainError> {
        let complete: bool = self.is_complete();
        match self.status {
            TeamStatus::Confirmed | TeamStatus::Waitlist if !complete => {
                Err(DomainError::TeamInvariantViolated {
                    team_id: self.team_id.clone(),
                    status: self.status,
                })
            }
            TeamStatus::Pending if complete => Err(DomainError::TeamInvariantViolated {
                team_id: self.team_id.clone(),
                status: self.status,
            }),
            _ => Ok(()),
        }
    }
}
