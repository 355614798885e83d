// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::plan::{RecordWrite, TransitionPlan};
use courtmate_domain::{
    Event, EventId, EventMode, PartnerStatus, Registration, RegistrationId, RegistrationStatus,
    Team, TeamId, TeamStatus, UserId, Versioned,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub const NOW: OffsetDateTime = datetime!(2026-06-15 12:00 UTC);

pub fn user(id: &str) -> UserId {
    UserId::new(id)
}

pub fn teams_event(slots: u32, confirmed: u32, waitlisted: u32) -> Versioned<Event> {
    Versioned::new(
        Event {
            event_id: EventId::new("evt-1"),
            organizer_id: UserId::new("organizer"),
            title: String::from("Doubles night"),
            mode: EventMode::Teams,
            slots_available: slots,
            registrations_count: confirmed,
            waitlist_count: waitlisted,
            starts_at: datetime!(2026-07-07 18:00 UTC),
            created_at: datetime!(2026-06-01 09:00 UTC),
        },
        1,
    )
}

pub fn players_event(slots: u32, confirmed: u32, waitlisted: u32) -> Versioned<Event> {
    let mut event: Versioned<Event> = teams_event(slots, confirmed, waitlisted);
    event.record.mode = EventMode::Players;
    event
}

pub fn solo_registration(
    id: &str,
    player: &str,
    status: RegistrationStatus,
    looking: bool,
) -> Versioned<Registration> {
    Versioned::new(
        Registration {
            registration_id: RegistrationId::new(id),
            event_id: EventId::new("evt-1"),
            player_id: UserId::new(player),
            player2_id: None,
            status,
            partner_status: PartnerStatus::None,
            team_id: None,
            looking_for_partner: looking,
            waitlist_position: None,
            created_at: NOW,
        },
        1,
    )
}

pub fn paired_registration(
    id: &str,
    player: &str,
    partner: &str,
    team: &str,
    status: RegistrationStatus,
) -> Versioned<Registration> {
    let mut registration: Versioned<Registration> =
        solo_registration(id, player, status, false);
    registration.record.player2_id = Some(UserId::new(partner));
    registration.record.partner_status = PartnerStatus::Pending;
    registration.record.team_id = Some(TeamId::new(team));
    registration
}

pub fn pending_team(
    id: &str,
    player1: &str,
    player2: &str,
    player1_confirmed: bool,
    registration: Option<&str>,
) -> Versioned<Team> {
    Versioned::new(
        Team {
            team_id: TeamId::new(id),
            event_id: EventId::new("evt-1"),
            player1_id: UserId::new(player1),
            player2_id: UserId::new(player2),
            player1_confirmed,
            player2_confirmed: !player1_confirmed,
            status: TeamStatus::Pending,
            registration_id: registration.map(RegistrationId::new),
            created_at: NOW,
        },
        1,
    )
}

pub fn seated_team(
    id: &str,
    player1: &str,
    player2: &str,
    status: TeamStatus,
    registration: &str,
) -> Versioned<Team> {
    Versioned::new(
        Team {
            team_id: TeamId::new(id),
            event_id: EventId::new("evt-1"),
            player1_id: UserId::new(player1),
            player2_id: UserId::new(player2),
            player1_confirmed: true,
            player2_confirmed: true,
            status,
            registration_id: Some(RegistrationId::new(registration)),
            created_at: NOW,
        },
        1,
    )
}

/// Extracts the written event, if the plan updates counters.
pub fn written_event(plan: &TransitionPlan) -> Option<&Event> {
    plan.writes.iter().find_map(|write| match write {
        RecordWrite::PutEvent(event) => Some(event),
        _ => None,
    })
}

/// Extracts the written registration with the given id.
pub fn written_registration<'a>(plan: &'a TransitionPlan, id: &str) -> Option<&'a Registration> {
    plan.writes.iter().find_map(|write| match write {
        RecordWrite::PutRegistration(registration)
            if registration.registration_id.as_str() == id =>
        {
            Some(registration)
        }
        _ => None,
    })
}

/// Extracts the written team with the given id.
pub fn written_team<'a>(plan: &'a TransitionPlan, id: &str) -> Option<&'a Team> {
    plan.writes.iter().find_map(|write| match write {
        RecordWrite::PutTeam(team) if team.team_id.as_str() == id => Some(team),
        _ => None,
    })
}

/// Returns whether the plan deletes the team with the given id.
pub fn deletes_team(plan: &TransitionPlan, id: &str) -> bool {
    plan.writes
        .iter()
        .any(|write| matches!(write, RecordWrite::DeleteTeam(team_id) if team_id.as_str() == id))
}

/// Returns whether the plan deletes the registration with the given id.
pub fn deletes_registration(plan: &TransitionPlan, id: &str) -> bool {
    plan.writes.iter().any(|write| {
        matches!(write, RecordWrite::DeleteRegistration(registration_id) if registration_id.as_str() == id)
    })
}
