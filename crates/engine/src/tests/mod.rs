// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod retry_tests;

use crate::ops::{create_event, register, send_invite};
use crate::request_response::{CreateEventRequest, RegisterRequest, SendInviteRequest};
use courtmate::TransitionPlan;
use courtmate_domain::{
    EventId, Registration, RegistrationStatus, TeamId, UserId, Versioned,
};
use courtmate_notify::Notification;
use courtmate_persistence::{RecordStore, SqliteStore, StoreError};
use time::macros::datetime;

pub fn new_store() -> SqliteStore {
    SqliteStore::new_in_memory().expect("Failed to create in-memory store")
}

pub fn make_event(store: &mut SqliteStore, mode: &str, slots: u32) -> EventId {
    let response = create_event(
        store,
        &CreateEventRequest {
            organizer_id: String::from("organizer"),
            title: String::from("Test session"),
            mode: String::from(mode),
            slots_available: slots,
            starts_at: datetime!(2026-07-07 18:00 UTC),
        },
    )
    .expect("Failed to create event");
    EventId::new(response.event_id)
}

pub fn register_user(
    store: &mut SqliteStore,
    event_id: &EventId,
    user: &str,
    looking: bool,
) -> String {
    register(
        store,
        &RegisterRequest {
            user_id: String::from(user),
            event_id: event_id.as_str().to_string(),
            looking_for_partner: looking,
        },
    )
    .expect("Failed to register")
    .registration_id
}

pub fn invite(
    store: &mut SqliteStore,
    event_id: &EventId,
    inviter: &str,
    invitee: &str,
) -> TeamId {
    let response = send_invite(
        store,
        &SendInviteRequest {
            inviter_id: String::from(inviter),
            event_id: event_id.as_str().to_string(),
            invitee_id: String::from(invitee),
        },
    )
    .expect("Failed to send invite");
    TeamId::new(response.team_id)
}

/// Finds a user's live registration as primary, if any.
pub fn registration_of(
    store: &mut SqliteStore,
    event_id: &EventId,
    user: &str,
) -> Option<Versioned<Registration>> {
    store
        .registrations_for_player(event_id, &UserId::new(user))
        .expect("query failed")
        .into_iter()
        .next()
}

/// Returns a user's notifications, newest first.
pub fn feed(store: &mut SqliteStore, user: &str) -> Vec<Notification> {
    store
        .notifications_for_user(&UserId::new(user))
        .expect("query failed")
        .into_iter()
        .map(|entry| entry.record)
        .collect()
}

/// Asserts the cross-entity counter invariant: the event's denormalized
/// counters equal the actual number of live seat records in each status.
pub fn assert_counters_consistent(store: &mut SqliteStore, event_id: &EventId) {
    let event = store
        .get_event(event_id)
        .expect("query failed")
        .expect("event missing");

    let registrations = store
        .registrations_for_event(event_id)
        .expect("query failed");
    let confirmed: u32 = u32::try_from(
        registrations
            .iter()
            .filter(|entry| entry.record.status == RegistrationStatus::Confirmed)
            .count(),
    )
    .unwrap();
    let waitlisted: u32 = u32::try_from(
        registrations
            .iter()
            .filter(|entry| entry.record.status == RegistrationStatus::Waitlist)
            .count(),
    )
    .unwrap();

    assert_eq!(
        event.record.registrations_count, confirmed,
        "registrations_count diverged from live confirmed seats"
    );
    assert_eq!(
        event.record.waitlist_count, waitlisted,
        "waitlist_count diverged from live waitlisted seats"
    );

    // Seated teams must sit on a registration in the matching status.
    for team in store.teams_for_event(event_id).expect("query failed") {
        if let Some(registration_id) = &team.record.registration_id {
            let registration = store
                .get_registration(registration_id)
                .expect("query failed")
                .expect("team references a missing registration");
            match team.record.status {
                courtmate_domain::TeamStatus::Confirmed => {
                    assert_eq!(registration.record.status, RegistrationStatus::Confirmed);
                }
                courtmate_domain::TeamStatus::Waitlist => {
                    assert_eq!(registration.record.status, RegistrationStatus::Waitlist);
                }
                courtmate_domain::TeamStatus::Pending => {}
            }
        }
    }
}

/// A store wrapper that fails the next `failures` commits with a conflict,
/// then delegates. Exercises the engine's bounded retry loop.
pub struct FlakyStore {
    pub inner: SqliteStore,
    pub failures: u32,
}

impl RecordStore for FlakyStore {
    fn get_event(
        &mut self,
        event_id: &EventId,
    ) -> Result<Option<Versioned<courtmate_domain::Event>>, StoreError> {
        self.inner.get_event(event_id)
    }

    fn list_events(&mut self) -> Result<Vec<Versioned<courtmate_domain::Event>>, StoreError> {
        self.inner.list_events()
    }

    fn get_registration(
        &mut self,
        registration_id: &courtmate_domain::RegistrationId,
    ) -> Result<Option<Versioned<Registration>>, StoreError> {
        self.inner.get_registration(registration_id)
    }

    fn registrations_for_event(
        &mut self,
        event_id: &EventId,
    ) -> Result<Vec<Versioned<Registration>>, StoreError> {
        self.inner.registrations_for_event(event_id)
    }

    fn registrations_for_player(
        &mut self,
        event_id: &EventId,
        player_id: &UserId,
    ) -> Result<Vec<Versioned<Registration>>, StoreError> {
        self.inner.registrations_for_player(event_id, player_id)
    }

    fn registrations_with_secondary(
        &mut self,
        event_id: &EventId,
        player2_id: &UserId,
    ) -> Result<Vec<Versioned<Registration>>, StoreError> {
        self.inner.registrations_with_secondary(event_id, player2_id)
    }

    fn waitlisted_registrations(
        &mut self,
        event_id: &EventId,
    ) -> Result<Vec<Versioned<Registration>>, StoreError> {
        self.inner.waitlisted_registrations(event_id)
    }

    fn get_team(
        &mut self,
        team_id: &TeamId,
    ) -> Result<Option<Versioned<courtmate_domain::Team>>, StoreError> {
        self.inner.get_team(team_id)
    }

    fn teams_for_event(
        &mut self,
        event_id: &EventId,
    ) -> Result<Vec<Versioned<courtmate_domain::Team>>, StoreError> {
        self.inner.teams_for_event(event_id)
    }

    fn teams_for_user(
        &mut self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> Result<Vec<Versioned<courtmate_domain::Team>>, StoreError> {
        self.inner.teams_for_user(event_id, user_id)
    }

    fn get_notification(
        &mut self,
        notification_id: &courtmate_domain::NotificationId,
    ) -> Result<Option<Versioned<Notification>>, StoreError> {
        self.inner.get_notification(notification_id)
    }

    fn notifications_for_user(
        &mut self,
        user_id: &UserId,
    ) -> Result<Vec<Versioned<Notification>>, StoreError> {
        self.inner.notifications_for_user(user_id)
    }

    fn commit(
        &mut self,
        plan: &TransitionPlan,
        appended: &[Notification],
    ) -> Result<(), StoreError> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(StoreError::Conflict {
                detail: String::from("injected conflict"),
            });
        }
        self.inner.commit(plan, appended)
    }
}
