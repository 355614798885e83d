// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::store::{RecordStore, SqliteStore};
use courtmate::{RecordGuard, RecordRef, RecordWrite, TransitionPlan};
use courtmate_domain::{
    Event, EventId, EventMode, PartnerStatus, Registration, RegistrationId, RegistrationStatus,
    Team, TeamId, TeamStatus, UserId,
};
use courtmate_notify::Notification;
use time::macros::datetime;

pub fn sample_event(event_id: &str) -> Event {
    Event {
        event_id: EventId::new(event_id),
        organizer_id: UserId::new("organizer"),
        title: String::from("Doubles night"),
        mode: EventMode::Teams,
        slots_available: 4,
        registrations_count: 0,
        waitlist_count: 0,
        starts_at: datetime!(2026-07-07 18:00 UTC),
        created_at: datetime!(2026-06-01 09:00 UTC),
    }
}

pub fn sample_registration(registration_id: &str, player: &str) -> Registration {
    Registration {
        registration_id: RegistrationId::new(registration_id),
        event_id: EventId::new("evt-1"),
        player_id: UserId::new(player),
        player2_id: None,
        status: RegistrationStatus::Confirmed,
        partner_status: PartnerStatus::None,
        team_id: None,
        looking_for_partner: false,
        waitlist_position: None,
        created_at: datetime!(2026-06-02 10:00 UTC),
    }
}

pub fn sample_team(team_id: &str, player1: &str, player2: &str) -> Team {
    Team {
        team_id: TeamId::new(team_id),
        event_id: EventId::new("evt-1"),
        player1_id: UserId::new(player1),
        player2_id: UserId::new(player2),
        player1_confirmed: true,
        player2_confirmed: false,
        status: TeamStatus::Pending,
        registration_id: None,
        created_at: datetime!(2026-06-02 10:00 UTC),
    }
}

pub fn sample_notification(notification_id: &str, user: &str) -> Notification {
    Notification::invite_received(
        courtmate_domain::NotificationId::new(notification_id),
        UserId::new(user),
        &UserId::new("alice"),
        EventId::new("evt-1"),
        TeamId::new("team-1"),
        datetime!(2026-06-02 10:00 UTC),
    )
}

/// Commits a single record creation through the plan path.
pub fn put_record(store: &mut SqliteStore, write: RecordWrite) {
    let mut plan: TransitionPlan = TransitionPlan::new();
    plan.write(write);
    store.commit(&plan, &[]).expect("Failed to seed record");
}

/// Creates a store seeded with the standard test event.
pub fn store_with_event() -> SqliteStore {
    let mut store: SqliteStore =
        SqliteStore::new_in_memory().expect("Failed to create in-memory store");
    let mut plan: TransitionPlan = TransitionPlan::new();
    plan.guard(RecordGuard::absent(RecordRef::Event(EventId::new("evt-1"))));
    plan.write(RecordWrite::PutEvent(sample_event("evt-1")));
    store.commit(&plan, &[]).expect("Failed to seed event");
    store
}
