// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::accept::{AcceptContext, AcceptOutcome, OrphanedInvite, plan_accept_invite};
use crate::error::CoreError;
use crate::plan::{NotificationIntent, TransitionPlan};
use crate::tests::helpers::{
    NOW, deletes_registration, deletes_team, paired_registration, pending_team, seated_team,
    solo_registration, teams_event, user, written_event, written_registration, written_team,
};
use courtmate_domain::{
    DomainError, Event, PartnerStatus, Registration, RegistrationStatus, Team, TeamStatus,
};

fn accept_ctx() -> AcceptContext {
    AcceptContext {
        event: teams_event(2, 0, 0),
        team: pending_team("team-1", "alice", "bob", true, Some("reg-1")),
        acceptor: user("bob"),
        registration: Some(paired_registration(
            "reg-1",
            "alice",
            "bob",
            "team-1",
            RegistrationStatus::Pending,
        )),
        solo_registration: None,
        orphaned: Vec::new(),
        waitlist_head: None,
        now: NOW,
    }
}

#[test]
fn test_accept_with_capacity_confirms_team_and_increments_count() {
    let (plan, outcome) = plan_accept_invite(&accept_ctx()).unwrap();

    assert_eq!(outcome, AcceptOutcome::Completed(TeamStatus::Confirmed));

    let team: &Team = written_team(&plan, "team-1").unwrap();
    assert_eq!(team.status, TeamStatus::Confirmed);
    assert!(team.is_complete());

    let registration: &Registration = written_registration(&plan, "reg-1").unwrap();
    assert_eq!(registration.status, RegistrationStatus::Confirmed);
    assert_eq!(registration.partner_status, PartnerStatus::Confirmed);
    assert!(!registration.looking_for_partner);

    let event: &Event = written_event(&plan).unwrap();
    assert_eq!(event.registrations_count, 1);
    assert_eq!(event.waitlist_count, 0);
}

#[test]
fn test_accept_at_capacity_waitlists_the_team() {
    let mut ctx: AcceptContext = accept_ctx();
    ctx.event = teams_event(1, 1, 0);

    let (plan, outcome) = plan_accept_invite(&ctx).unwrap();

    assert_eq!(outcome, AcceptOutcome::Completed(TeamStatus::Waitlist));

    let team: &Team = written_team(&plan, "team-1").unwrap();
    assert_eq!(team.status, TeamStatus::Waitlist);

    let registration: &Registration = written_registration(&plan, "reg-1").unwrap();
    assert_eq!(registration.status, RegistrationStatus::Waitlist);
    assert_eq!(registration.waitlist_position, Some(1));

    let event: &Event = written_event(&plan).unwrap();
    assert_eq!(event.registrations_count, 1);
    assert_eq!(event.waitlist_count, 1);
}

#[test]
fn test_accept_on_preexisting_seat_inherits_it_without_counter_change() {
    // Fill/join pairings ride a seat that was already granted and counted.
    let mut ctx: AcceptContext = accept_ctx();
    ctx.event = teams_event(2, 1, 0);
    ctx.registration = Some(paired_registration(
        "reg-1",
        "alice",
        "bob",
        "team-1",
        RegistrationStatus::Confirmed,
    ));

    let (plan, outcome) = plan_accept_invite(&ctx).unwrap();

    assert_eq!(outcome, AcceptOutcome::Completed(TeamStatus::Confirmed));
    assert!(written_event(&plan).is_none());
}

#[test]
fn test_accept_notifies_the_other_party() {
    let (plan, _) = plan_accept_invite(&accept_ctx()).unwrap();

    assert!(plan.intents.contains(&NotificationIntent::InviteAccepted {
        recipient: user("alice"),
        acceptor: user("bob"),
        team_id: courtmate_domain::TeamId::new("team-1"),
    }));
}

#[test]
fn test_accept_deletes_the_acceptors_superseded_solo_seat() {
    // Bob registered solo after the invite went out; the accepted pairing
    // supersedes that seat, freeing it for the team's own allocation.
    let mut ctx: AcceptContext = accept_ctx();
    ctx.event = teams_event(1, 1, 0);
    ctx.solo_registration = Some(solo_registration(
        "reg-solo",
        "bob",
        RegistrationStatus::Confirmed,
        false,
    ));

    let (plan, outcome) = plan_accept_invite(&ctx).unwrap();

    assert!(deletes_registration(&plan, "reg-solo"));
    // The freed seat is consumed by the completed team in the same commit.
    assert_eq!(outcome, AcceptOutcome::Completed(TeamStatus::Confirmed));
    let event: &Event = written_event(&plan).unwrap();
    assert_eq!(event.registrations_count, 1);
    assert_eq!(event.waitlist_count, 0);
}

#[test]
fn test_solo_cleanup_on_a_preheld_seat_promotes_the_queue_head() {
    // The pairing settles on Alice's existing seat, so Bob's released solo
    // seat is not reconsumed: the earliest waitlisted entry takes it.
    let mut ctx: AcceptContext = accept_ctx();
    ctx.event = teams_event(2, 2, 1);
    ctx.registration = Some(paired_registration(
        "reg-1",
        "alice",
        "bob",
        "team-1",
        RegistrationStatus::Confirmed,
    ));
    ctx.solo_registration = Some(solo_registration(
        "reg-solo",
        "bob",
        RegistrationStatus::Confirmed,
        false,
    ));
    let mut queued = solo_registration("reg-w", "walter", RegistrationStatus::Waitlist, false);
    queued.record.waitlist_position = Some(1);
    ctx.waitlist_head = Some(crate::withdraw::WaitlistHead {
        registration: queued,
        team: None,
    });

    let (plan, outcome) = plan_accept_invite(&ctx).unwrap();

    assert_eq!(outcome, AcceptOutcome::Completed(TeamStatus::Confirmed));
    assert!(deletes_registration(&plan, "reg-solo"));

    let promoted: &Registration = written_registration(&plan, "reg-w").unwrap();
    assert_eq!(promoted.status, RegistrationStatus::Confirmed);

    // One seat vacated, one filled: confirmed count holds, the queue
    // shrinks.
    let event: &Event = written_event(&plan).unwrap();
    assert_eq!(event.registrations_count, 2);
    assert_eq!(event.waitlist_count, 0);

    assert!(plan.intents.contains(&NotificationIntent::WaitlistPromoted {
        recipient: user("walter"),
        team_id: None,
    }));
}

#[test]
fn test_accept_cascades_the_acceptors_other_pending_invites() {
    let mut ctx: AcceptContext = accept_ctx();
    ctx.orphaned = vec![OrphanedInvite {
        team: pending_team("team-2", "carol", "bob", true, Some("reg-c")),
        registration: Some(paired_registration(
            "reg-c",
            "carol",
            "bob",
            "team-2",
            RegistrationStatus::Confirmed,
        )),
    }];

    let (plan, _) = plan_accept_invite(&ctx).unwrap();

    assert!(deletes_team(&plan, "team-2"));

    // Carol's seat reverts to an open solo slot.
    let reverted: &Registration = written_registration(&plan, "reg-c").unwrap();
    assert_eq!(reverted.player2_id, None);
    assert_eq!(reverted.partner_status, PartnerStatus::None);
    assert_eq!(reverted.team_id, None);
    assert!(reverted.looking_for_partner);
    assert_eq!(reverted.status, RegistrationStatus::Confirmed);

    assert!(plan.intents.contains(&NotificationIntent::PartnerPairedElsewhere {
        recipient: user("carol"),
        partner: user("bob"),
    }));
}

#[test]
fn test_accept_cascade_deletes_seatless_orphan_registrations() {
    let mut ctx: AcceptContext = accept_ctx();
    ctx.orphaned = vec![OrphanedInvite {
        team: pending_team("team-2", "carol", "bob", true, Some("reg-c")),
        registration: Some(paired_registration(
            "reg-c",
            "carol",
            "bob",
            "team-2",
            RegistrationStatus::Pending,
        )),
    }];

    let (plan, _) = plan_accept_invite(&ctx).unwrap();

    assert!(deletes_team(&plan, "team-2"));
    assert!(deletes_registration(&plan, "reg-c"));
}

#[test]
fn test_accept_on_confirmed_team_is_a_status_violation() {
    let mut ctx: AcceptContext = accept_ctx();
    ctx.team = seated_team("team-1", "alice", "bob", TeamStatus::Confirmed, "reg-1");

    assert!(matches!(
        plan_accept_invite(&ctx),
        Err(CoreError::DomainViolation(DomainError::WrongTeamStatus {
            found: TeamStatus::Confirmed,
            ..
        }))
    ));
}

#[test]
fn test_accept_by_the_confirmed_side_is_rejected() {
    let mut ctx: AcceptContext = accept_ctx();
    ctx.acceptor = user("alice");

    assert!(matches!(
        plan_accept_invite(&ctx),
        Err(CoreError::DomainViolation(
            DomainError::NotAcceptanceTarget { .. }
        ))
    ));
}

#[test]
fn test_accept_by_a_stranger_is_rejected() {
    let mut ctx: AcceptContext = accept_ctx();
    ctx.acceptor = user("mallory");

    assert!(matches!(
        plan_accept_invite(&ctx),
        Err(CoreError::DomainViolation(DomainError::NotTeamMember { .. }))
    ));
}

#[test]
fn test_accept_with_vanished_registration_is_inconsistent() {
    let mut ctx: AcceptContext = accept_ctx();
    ctx.registration = None;

    assert!(matches!(
        plan_accept_invite(&ctx),
        Err(CoreError::Inconsistent(_))
    ));
}
