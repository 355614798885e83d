// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel row structs and their conversions to and from domain records.
//!
//! Statuses and timestamps are stored as text; counters as integers. Every
//! row carries the record's `version`, which rides along into
//! [`Versioned`] on the way out and is written back (bumped) by the commit
//! path on the way in.

use crate::diesel_schema::{events, notifications, registrations, teams};
use crate::error::StoreError;
use courtmate_domain::{
    Event, EventId, EventMode, NotificationId, PartnerStatus, Registration, RegistrationId,
    RegistrationStatus, Team, TeamId, TeamStatus, UserId, Version, Versioned,
};
use courtmate_notify::{Notification, NotificationKind};
use diesel::prelude::*;
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;

/// Formats a timestamp for storage.
pub(crate) fn format_timestamp(value: OffsetDateTime) -> Result<String, StoreError> {
    value
        .format(&Iso8601::DEFAULT)
        .map_err(|e| StoreError::SerializationError(format!("Failed to format timestamp: {e}")))
}

/// Parses a stored timestamp.
pub(crate) fn parse_timestamp(value: &str) -> Result<OffsetDateTime, StoreError> {
    OffsetDateTime::parse(value, &Iso8601::DEFAULT).map_err(|e| {
        StoreError::SerializationError(format!("Failed to parse timestamp '{value}': {e}"))
    })
}

fn to_i32(value: u32, field: &str) -> Result<i32, StoreError> {
    i32::try_from(value)
        .map_err(|_| StoreError::SerializationError(format!("{field} out of range: {value}")))
}

fn to_u32(value: i32, field: &str) -> Result<u32, StoreError> {
    u32::try_from(value)
        .map_err(|_| StoreError::SerializationError(format!("{field} out of range: {value}")))
}

fn parse_status<T: FromStr>(value: &str, field: &str) -> Result<T, StoreError>
where
    T::Err: std::fmt::Display,
{
    T::from_str(value)
        .map_err(|e| StoreError::SerializationError(format!("Invalid {field} '{value}': {e}")))
}

/// Row form of an [`Event`].
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = events)]
pub struct EventRow {
    pub event_id: String,
    pub version: Version,
    pub organizer_id: String,
    pub title: String,
    pub mode: String,
    pub slots_available: i32,
    pub registrations_count: i32,
    pub waitlist_count: i32,
    pub starts_at: String,
    pub created_at: String,
}

impl EventRow {
    /// Builds a row from a domain record at the given version.
    pub fn from_domain(event: &Event, version: Version) -> Result<Self, StoreError> {
        Ok(Self {
            event_id: event.event_id.as_str().to_string(),
            version,
            organizer_id: event.organizer_id.as_str().to_string(),
            title: event.title.clone(),
            mode: event.mode.as_str().to_string(),
            slots_available: to_i32(event.slots_available, "slots_available")?,
            registrations_count: to_i32(event.registrations_count, "registrations_count")?,
            waitlist_count: to_i32(event.waitlist_count, "waitlist_count")?,
            starts_at: format_timestamp(event.starts_at)?,
            created_at: format_timestamp(event.created_at)?,
        })
    }

    /// Converts this row back into a versioned domain record.
    pub fn into_domain(self) -> Result<Versioned<Event>, StoreError> {
        let event: Event = Event {
            event_id: EventId::new(self.event_id),
            organizer_id: UserId::new(self.organizer_id),
            title: self.title,
            mode: parse_status::<EventMode>(&self.mode, "event mode")?,
            slots_available: to_u32(self.slots_available, "slots_available")?,
            registrations_count: to_u32(self.registrations_count, "registrations_count")?,
            waitlist_count: to_u32(self.waitlist_count, "waitlist_count")?,
            starts_at: parse_timestamp(&self.starts_at)?,
            created_at: parse_timestamp(&self.created_at)?,
        };
        Ok(Versioned::new(event, self.version))
    }
}

/// Row form of a [`Registration`].
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = registrations)]
pub struct RegistrationRow {
    pub registration_id: String,
    pub version: Version,
    pub event_id: String,
    pub player_id: String,
    pub player2_id: Option<String>,
    pub status: String,
    pub partner_status: String,
    pub team_id: Option<String>,
    pub looking_for_partner: bool,
    pub waitlist_position: Option<i32>,
    pub created_at: String,
}

impl RegistrationRow {
    /// Builds a row from a domain record at the given version.
    pub fn from_domain(
        registration: &Registration,
        version: Version,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            registration_id: registration.registration_id.as_str().to_string(),
            version,
            event_id: registration.event_id.as_str().to_string(),
            player_id: registration.player_id.as_str().to_string(),
            player2_id: registration
                .player2_id
                .as_ref()
                .map(|id| id.as_str().to_string()),
            status: registration.status.as_str().to_string(),
            partner_status: registration.partner_status.as_str().to_string(),
            team_id: registration
                .team_id
                .as_ref()
                .map(|id| id.as_str().to_string()),
            looking_for_partner: registration.looking_for_partner,
            waitlist_position: registration
                .waitlist_position
                .map(|position| to_i32(position, "waitlist_position"))
                .transpose()?,
            created_at: format_timestamp(registration.created_at)?,
        })
    }

    /// Converts this row back into a versioned domain record.
    pub fn into_domain(self) -> Result<Versioned<Registration>, StoreError> {
        let registration: Registration = Registration {
            registration_id: RegistrationId::new(self.registration_id),
            event_id: EventId::new(self.event_id),
            player_id: UserId::new(self.player_id),
            player2_id: self.player2_id.map(UserId::new),
            status: parse_status::<RegistrationStatus>(&self.status, "registration status")?,
            partner_status: parse_status::<PartnerStatus>(&self.partner_status, "partner status")?,
            team_id: self.team_id.map(TeamId::new),
            looking_for_partner: self.looking_for_partner,
            waitlist_position: self
                .waitlist_position
                .map(|position| to_u32(position, "waitlist_position"))
                .transpose()?,
            created_at: parse_timestamp(&self.created_at)?,
        };
        Ok(Versioned::new(registration, self.version))
    }
}

/// Row form of a [`Team`].
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = teams)]
pub struct TeamRow {
    pub team_id: String,
    pub version: Version,
    pub event_id: String,
    pub player1_id: String,
    pub player2_id: String,
    pub player1_confirmed: bool,
    pub player2_confirmed: bool,
    pub status: String,
    pub registration_id: Option<String>,
    pub created_at: String,
}

impl TeamRow {
    /// Builds a row from a domain record at the given version.
    pub fn from_domain(team: &Team, version: Version) -> Result<Self, StoreError> {
        Ok(Self {
            team_id: team.team_id.as_str().to_string(),
            version,
            event_id: team.event_id.as_str().to_string(),
            player1_id: team.player1_id.as_str().to_string(),
            player2_id: team.player2_id.as_str().to_string(),
            player1_confirmed: team.player1_confirmed,
            player2_confirmed: team.player2_confirmed,
            status: team.status.as_str().to_string(),
            registration_id: team
                .registration_id
                .as_ref()
                .map(|id| id.as_str().to_string()),
            created_at: format_timestamp(team.created_at)?,
        })
    }

    /// Converts this row back into a versioned domain record.
    pub fn into_domain(self) -> Result<Versioned<Team>, StoreError> {
        let team: Team = Team {
            team_id: TeamId::new(self.team_id),
            event_id: EventId::new(self.event_id),
            player1_id: UserId::new(self.player1_id),
            player2_id: UserId::new(self.player2_id),
            player1_confirmed: self.player1_confirmed,
            player2_confirmed: self.player2_confirmed,
            status: parse_status::<TeamStatus>(&self.status, "team status")?,
            registration_id: self.registration_id.map(RegistrationId::new),
            created_at: parse_timestamp(&self.created_at)?,
        };
        Ok(Versioned::new(team, self.version))
    }
}

/// Row form of a [`Notification`].
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = notifications)]
pub struct NotificationRow {
    pub notification_id: String,
    pub version: Version,
    pub user_id: String,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub event_id: String,
    pub team_id: Option<String>,
    pub is_read: bool,
    pub created_at: String,
}

impl NotificationRow {
    /// Builds a row from a domain record at the given version.
    pub fn from_domain(
        notification: &Notification,
        version: Version,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            notification_id: notification.notification_id.as_str().to_string(),
            version,
            user_id: notification.user_id.as_str().to_string(),
            kind: notification.kind.as_str().to_string(),
            title: notification.title.clone(),
            message: notification.message.clone(),
            event_id: notification.event_id.as_str().to_string(),
            team_id: notification
                .team_id
                .as_ref()
                .map(|id| id.as_str().to_string()),
            is_read: notification.read,
            created_at: format_timestamp(notification.created_at)?,
        })
    }

    /// Converts this row back into a versioned domain record.
    pub fn into_domain(self) -> Result<Versioned<Notification>, StoreError> {
        let notification: Notification = Notification {
            notification_id: NotificationId::new(self.notification_id),
            user_id: UserId::new(self.user_id),
            kind: parse_status::<NotificationKind>(&self.kind, "notification kind")?,
            title: self.title,
            message: self.message,
            event_id: EventId::new(self.event_id),
            team_id: self.team_id.map(TeamId::new),
            read: self.is_read,
            created_at: parse_timestamp(&self.created_at)?,
        };
        Ok(Versioned::new(notification, self.version))
    }
}
