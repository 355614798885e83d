// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::register::{RegisterContext, plan_register};
use crate::tests::helpers::{NOW, players_event, solo_registration, teams_event, user,
    written_event, written_registration};
use courtmate_domain::{DomainError, Event, Registration, RegistrationId, RegistrationStatus};

fn register_ctx(confirmed: u32, waitlisted: u32) -> RegisterContext {
    RegisterContext {
        event: players_event(2, confirmed, waitlisted),
        user: user("xavier"),
        looking_for_partner: false,
        registration_id: RegistrationId::new("reg-x"),
        existing: None,
        now: NOW,
    }
}

#[test]
fn test_register_with_capacity_confirms_the_seat() {
    let (plan, status) = plan_register(&register_ctx(0, 0)).unwrap();

    assert_eq!(status, RegistrationStatus::Confirmed);

    let registration: &Registration = written_registration(&plan, "reg-x").unwrap();
    assert_eq!(registration.status, RegistrationStatus::Confirmed);
    assert_eq!(registration.waitlist_position, None);

    let event: &Event = written_event(&plan).unwrap();
    assert_eq!(event.registrations_count, 1);
}

#[test]
fn test_register_at_capacity_waitlists_with_fifo_position() {
    let (plan, status) = plan_register(&register_ctx(2, 1)).unwrap();

    assert_eq!(status, RegistrationStatus::Waitlist);

    let registration: &Registration = written_registration(&plan, "reg-x").unwrap();
    assert_eq!(registration.status, RegistrationStatus::Waitlist);
    assert_eq!(registration.waitlist_position, Some(2));

    let event: &Event = written_event(&plan).unwrap();
    assert_eq!(event.registrations_count, 2);
    assert_eq!(event.waitlist_count, 2);
}

#[test]
fn test_register_twice_is_rejected() {
    let mut ctx: RegisterContext = register_ctx(1, 0);
    ctx.existing = Some(solo_registration(
        "reg-old",
        "xavier",
        RegistrationStatus::Confirmed,
        false,
    ));

    assert!(matches!(
        plan_register(&ctx),
        Err(CoreError::DomainViolation(
            DomainError::AlreadyRegistered { .. }
        ))
    ));
}

#[test]
fn test_register_after_cancellation_is_allowed() {
    let mut ctx: RegisterContext = register_ctx(1, 0);
    ctx.existing = Some(solo_registration(
        "reg-old",
        "xavier",
        RegistrationStatus::Cancelled,
        false,
    ));

    assert!(plan_register(&ctx).is_ok());
}

#[test]
fn test_players_mode_ignores_looking_for_partner() {
    let mut ctx: RegisterContext = register_ctx(0, 0);
    ctx.looking_for_partner = true;

    let (plan, _) = plan_register(&ctx).unwrap();
    let registration: &Registration = written_registration(&plan, "reg-x").unwrap();
    assert!(!registration.looking_for_partner);
}

#[test]
fn test_teams_mode_keeps_looking_for_partner() {
    let mut ctx: RegisterContext = register_ctx(0, 0);
    ctx.event = teams_event(2, 0, 0);
    ctx.looking_for_partner = true;

    let (plan, _) = plan_register(&ctx).unwrap();
    let registration: &Registration = written_registration(&plan, "reg-x").unwrap();
    assert!(registration.looking_for_partner);
}

#[test]
fn test_empty_user_id_is_rejected() {
    let mut ctx: RegisterContext = register_ctx(0, 0);
    ctx.user = user("  ");

    assert!(matches!(
        plan_register(&ctx),
        Err(CoreError::DomainViolation(DomainError::InvalidUserId(_)))
    ));
}
