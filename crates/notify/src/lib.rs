// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use courtmate_domain::{DomainError, EventId, NotificationId, TeamId, UserId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

#[cfg(test)]
mod tests;

/// Classifies what a notification announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Someone invited the recipient to pair up.
    InviteReceived,
    /// The recipient's pending invite was accepted.
    InviteAccepted,
    /// The recipient's pending invite was declined.
    InviteDeclined,
    /// The inviter cancelled a pending invite to the recipient.
    InviteCancelled,
    /// The recipient's partner left a seated team.
    PartnerLeft,
    /// A pending pairing dissolved because the other party paired elsewhere.
    PartnerPairedElsewhere,
    /// The recipient's shared seat was withdrawn from the event entirely.
    TeamWithdrawn,
    /// The recipient's seat was promoted from the waitlist.
    WaitlistPromoted,
}

impl NotificationKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InviteReceived => "InviteReceived",
            Self::InviteAccepted => "InviteAccepted",
            Self::InviteDeclined => "InviteDeclined",
            Self::InviteCancelled => "InviteCancelled",
            Self::PartnerLeft => "PartnerLeft",
            Self::PartnerPairedElsewhere => "PartnerPairedElsewhere",
            Self::TeamWithdrawn => "TeamWithdrawn",
            Self::WaitlistPromoted => "WaitlistPromoted",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "InviteReceived" => Ok(Self::InviteReceived),
            "InviteAccepted" => Ok(Self::InviteAccepted),
            "InviteDeclined" => Ok(Self::InviteDeclined),
            "InviteCancelled" => Ok(Self::InviteCancelled),
            "PartnerLeft" => Ok(Self::PartnerLeft),
            "PartnerPairedElsewhere" => Ok(Self::PartnerPairedElsewhere),
            "TeamWithdrawn" => Ok(Self::TeamWithdrawn),
            "WaitlistPromoted" => Ok(Self::WaitlistPromoted),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable one-way message to a single user.
///
/// Notifications are appended by the pairing engine as part of the same
/// atomic commit as the roster change they announce. The engine never reads
/// them back, with one exception: the notification that triggered an
/// accept/decline action is marked read in the commit that consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// The notification identifier.
    pub notification_id: NotificationId,
    /// The recipient.
    pub user_id: UserId,
    /// What this notification announces.
    pub kind: NotificationKind,
    /// Short human-readable headline.
    pub title: String,
    /// Human-readable body text.
    pub message: String,
    /// The event the announcement concerns.
    pub event_id: EventId,
    /// The team the announcement concerns, when one is involved.
    pub team_id: Option<TeamId>,
    /// Whether the recipient has consumed this notification.
    pub read: bool,
    /// Creation timestamp.
    #[serde(with = "time::serde::iso8601")]
    pub created_at: OffsetDateTime,
}

impl Notification {
    /// Builds an invite-received notification for the acceptance target.
    #[must_use]
    pub fn invite_received(
        notification_id: NotificationId,
        recipient: UserId,
        inviter: &UserId,
        event_id: EventId,
        team_id: TeamId,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            notification_id,
            user_id: recipient,
            kind: NotificationKind::InviteReceived,
            title: String::from("Partner invite"),
            message: format!("{inviter} invited you to play as their partner"),
            event_id,
            team_id: Some(team_id),
            read: false,
            created_at,
        }
    }

    /// Builds an invite-accepted notification for the other party.
    #[must_use]
    pub fn invite_accepted(
        notification_id: NotificationId,
        recipient: UserId,
        acceptor: &UserId,
        event_id: EventId,
        team_id: TeamId,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            notification_id,
            user_id: recipient,
            kind: NotificationKind::InviteAccepted,
            title: String::from("Invite accepted"),
            message: format!("{acceptor} accepted your partner invite"),
            event_id,
            team_id: Some(team_id),
            read: false,
            created_at,
        }
    }

    /// Builds an invite-declined notification for the inviting party.
    #[must_use]
    pub fn invite_declined(
        notification_id: NotificationId,
        recipient: UserId,
        decliner: &UserId,
        event_id: EventId,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            notification_id,
            user_id: recipient,
            kind: NotificationKind::InviteDeclined,
            title: String::from("Invite declined"),
            message: format!("{decliner} declined your partner invite"),
            event_id,
            team_id: None,
            read: false,
            created_at,
        }
    }

    /// Builds an invite-cancelled notification for the invited party.
    #[must_use]
    pub fn invite_cancelled(
        notification_id: NotificationId,
        recipient: UserId,
        inviter: &UserId,
        event_id: EventId,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            notification_id,
            user_id: recipient,
            kind: NotificationKind::InviteCancelled,
            title: String::from("Invite cancelled"),
            message: format!("{inviter} withdrew their partner invite"),
            event_id,
            team_id: None,
            read: false,
            created_at,
        }
    }

    /// Builds a partner-left notification for the surviving seat holder.
    #[must_use]
    pub fn partner_left(
        notification_id: NotificationId,
        recipient: UserId,
        leaver: &UserId,
        event_id: EventId,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            notification_id,
            user_id: recipient,
            kind: NotificationKind::PartnerLeft,
            title: String::from("Partner left"),
            message: format!("{leaver} left your team; your seat is kept and open to a new partner"),
            event_id,
            team_id: None,
            read: false,
            created_at,
        }
    }

    /// Builds a team-withdrawn notification for the other seat holder when
    /// the primary withdraws the shared seat entirely.
    #[must_use]
    pub fn team_withdrawn(
        notification_id: NotificationId,
        recipient: UserId,
        withdrawer: &UserId,
        event_id: EventId,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            notification_id,
            user_id: recipient,
            kind: NotificationKind::TeamWithdrawn,
            title: String::from("Team withdrawn"),
            message: format!("{withdrawer} withdrew your team's registration from the event"),
            event_id,
            team_id: None,
            read: false,
            created_at,
        }
    }

    /// Builds a paired-elsewhere notification for the party whose pending
    /// invite was invalidated by the other side accepting a different one.
    #[must_use]
    pub fn partner_paired_elsewhere(
        notification_id: NotificationId,
        recipient: UserId,
        partner: &UserId,
        event_id: EventId,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            notification_id,
            user_id: recipient,
            kind: NotificationKind::PartnerPairedElsewhere,
            title: String::from("Invite no longer available"),
            message: format!("{partner} joined another team; your pending invite was dissolved"),
            event_id,
            team_id: None,
            read: false,
            created_at,
        }
    }

    /// Builds a waitlist-promotion notification for a promoted seat holder.
    #[must_use]
    pub fn waitlist_promoted(
        notification_id: NotificationId,
        recipient: UserId,
        event_id: EventId,
        team_id: Option<TeamId>,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            notification_id,
            user_id: recipient,
            kind: NotificationKind::WaitlistPromoted,
            title: String::from("You're in"),
            message: String::from("A seat opened up and your registration is now confirmed"),
            event_id,
            team_id,
            read: false,
            created_at,
        }
    }

    /// Returns a copy with the read flag set.
    #[must_use]
    pub fn mark_read(mut self) -> Self {
        self.read = true;
        self
    }
}
