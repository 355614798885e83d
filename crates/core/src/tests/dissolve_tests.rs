// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::dissolve::{DissolveAction, DissolveContext, plan_dissolve};
use crate::error::CoreError;
use crate::plan::{NotificationIntent, TransitionPlan};
use crate::tests::helpers::{
    NOW, deletes_registration, deletes_team, paired_registration, pending_team, seated_team,
    solo_registration, teams_event, user, written_event, written_registration,
};
use courtmate_domain::{
    DomainError, Event, PartnerStatus, Registration, RegistrationStatus, TeamStatus,
};

fn decline_ctx() -> DissolveContext {
    DissolveContext {
        event: teams_event(2, 1, 0),
        team: pending_team("team-1", "alice", "bob", true, Some("reg-1")),
        actor: user("bob"),
        action: DissolveAction::Decline,
        registration: Some(paired_registration(
            "reg-1",
            "alice",
            "bob",
            "team-1",
            RegistrationStatus::Confirmed,
        )),
        survivor_registration: None,
        now: NOW,
    }
}

#[test]
fn test_decline_reverts_the_inviter_seat_and_marks_denied() {
    let plan: TransitionPlan = plan_dissolve(&decline_ctx()).unwrap();

    assert!(deletes_team(&plan, "team-1"));

    let reverted: &Registration = written_registration(&plan, "reg-1").unwrap();
    assert_eq!(reverted.player_id, user("alice"));
    assert_eq!(reverted.player2_id, None);
    assert_eq!(reverted.partner_status, PartnerStatus::Denied);
    assert_eq!(reverted.team_id, None);
    assert!(reverted.looking_for_partner);
    assert_eq!(reverted.status, RegistrationStatus::Confirmed);

    // A pending team never held a seat; counters stay put.
    assert!(written_event(&plan).is_none());

    assert_eq!(
        plan.intents,
        vec![NotificationIntent::InviteDeclined {
            recipient: user("alice"),
            decliner: user("bob"),
        }]
    );
}

#[test]
fn test_decline_by_the_confirmed_side_is_rejected() {
    let mut ctx: DissolveContext = decline_ctx();
    ctx.actor = user("alice");

    assert!(matches!(
        plan_dissolve(&ctx),
        Err(CoreError::DomainViolation(
            DomainError::NotSecondaryParty { .. }
        ))
    ));
}

#[test]
fn test_cancel_reverts_the_inviter_seat_and_notifies_the_invitee() {
    let mut ctx: DissolveContext = decline_ctx();
    ctx.actor = user("alice");
    ctx.action = DissolveAction::Cancel;

    let plan: TransitionPlan = plan_dissolve(&ctx).unwrap();

    assert!(deletes_team(&plan, "team-1"));
    let reverted: &Registration = written_registration(&plan, "reg-1").unwrap();
    assert_eq!(reverted.partner_status, PartnerStatus::None);
    assert!(reverted.looking_for_partner);

    assert_eq!(
        plan.intents,
        vec![NotificationIntent::InviteCancelled {
            recipient: user("bob"),
            inviter: user("alice"),
        }]
    );
}

#[test]
fn test_cancel_by_the_unconfirmed_side_is_rejected() {
    let mut ctx: DissolveContext = decline_ctx();
    ctx.action = DissolveAction::Cancel;

    assert!(matches!(
        plan_dissolve(&ctx),
        Err(CoreError::DomainViolation(
            DomainError::NotPrimaryParty { .. }
        ))
    ));
}

#[test]
fn test_decline_on_a_confirmed_team_is_rejected() {
    let mut ctx: DissolveContext = decline_ctx();
    ctx.team = seated_team("team-1", "alice", "bob", TeamStatus::Confirmed, "reg-1");

    assert!(matches!(
        plan_dissolve(&ctx),
        Err(CoreError::DomainViolation(DomainError::WrongTeamStatus {
            found: TeamStatus::Confirmed,
            ..
        }))
    ));
}

#[test]
fn test_leave_confirmed_team_promotes_the_survivor_in_place() {
    let mut registration = paired_registration(
        "reg-1",
        "alice",
        "bob",
        "team-1",
        RegistrationStatus::Confirmed,
    );
    registration.record.partner_status = PartnerStatus::Confirmed;

    let ctx: DissolveContext = DissolveContext {
        event: teams_event(1, 1, 1),
        team: seated_team("team-1", "alice", "bob", TeamStatus::Confirmed, "reg-1"),
        actor: user("alice"),
        action: DissolveAction::Leave,
        registration: Some(registration),
        survivor_registration: None,
        now: NOW,
    };

    let plan: TransitionPlan = plan_dissolve(&ctx).unwrap();

    assert!(deletes_team(&plan, "team-1"));

    // The seat stays occupied by the survivor alone; no counter moves and
    // no waitlisted team is promoted.
    let kept: &Registration = written_registration(&plan, "reg-1").unwrap();
    assert_eq!(kept.player_id, user("bob"));
    assert_eq!(kept.player2_id, None);
    assert_eq!(kept.status, RegistrationStatus::Confirmed);
    assert!(kept.looking_for_partner);
    assert!(written_event(&plan).is_none());

    assert_eq!(
        plan.intents,
        vec![NotificationIntent::PartnerLeft {
            recipient: user("bob"),
            leaver: user("alice"),
        }]
    );
}

#[test]
fn test_leave_waitlisted_team_releases_the_queue_entry() {
    let mut registration = paired_registration(
        "reg-1",
        "alice",
        "bob",
        "team-1",
        RegistrationStatus::Waitlist,
    );
    registration.record.waitlist_position = Some(1);

    let ctx: DissolveContext = DissolveContext {
        event: teams_event(1, 1, 1),
        team: seated_team("team-1", "alice", "bob", TeamStatus::Waitlist, "reg-1"),
        actor: user("bob"),
        action: DissolveAction::Leave,
        registration: Some(registration),
        survivor_registration: None,
        now: NOW,
    };

    let plan: TransitionPlan = plan_dissolve(&ctx).unwrap();

    assert!(deletes_team(&plan, "team-1"));
    assert!(deletes_registration(&plan, "reg-1"));

    let event: &Event = written_event(&plan).unwrap();
    assert_eq!(event.waitlist_count, 0);
    assert_eq!(event.registrations_count, 1);
}

#[test]
fn test_leave_pending_team_hands_the_slot_to_the_secondary() {
    let ctx: DissolveContext = DissolveContext {
        event: teams_event(2, 1, 0),
        team: pending_team("team-1", "alice", "bob", true, Some("reg-1")),
        actor: user("alice"),
        action: DissolveAction::Leave,
        registration: Some(paired_registration(
            "reg-1",
            "alice",
            "bob",
            "team-1",
            RegistrationStatus::Confirmed,
        )),
        survivor_registration: None,
        now: NOW,
    };

    let plan: TransitionPlan = plan_dissolve(&ctx).unwrap();

    let transferred: &Registration = written_registration(&plan, "reg-1").unwrap();
    assert_eq!(transferred.player_id, user("bob"));
    assert_eq!(transferred.player2_id, None);
    assert!(transferred.looking_for_partner);
    assert_eq!(transferred.status, RegistrationStatus::Confirmed);
}

#[test]
fn test_leave_pending_team_keeps_the_survivors_own_seat() {
    // The secondary already holds an independent confirmed seat, so the
    // leaver's seatless slot is simply deleted.
    let ctx: DissolveContext = DissolveContext {
        event: teams_event(2, 1, 0),
        team: pending_team("team-1", "alice", "bob", true, Some("reg-1")),
        actor: user("alice"),
        action: DissolveAction::Leave,
        registration: Some(paired_registration(
            "reg-1",
            "alice",
            "bob",
            "team-1",
            RegistrationStatus::Pending,
        )),
        survivor_registration: Some(solo_registration(
            "reg-b",
            "bob",
            RegistrationStatus::Confirmed,
            false,
        )),
        now: NOW,
    };

    let plan: TransitionPlan = plan_dissolve(&ctx).unwrap();

    assert!(deletes_registration(&plan, "reg-1"));

    let own: &Registration = written_registration(&plan, "reg-b").unwrap();
    assert_eq!(own.player_id, user("bob"));
    assert!(own.looking_for_partner);
}

#[test]
fn test_leave_pending_team_with_no_registration_is_pure_deletion() {
    let ctx: DissolveContext = DissolveContext {
        event: teams_event(2, 1, 0),
        team: pending_team("team-1", "alice", "bob", true, None),
        actor: user("alice"),
        action: DissolveAction::Leave,
        registration: None,
        survivor_registration: None,
        now: NOW,
    };

    let plan: TransitionPlan = plan_dissolve(&ctx).unwrap();

    assert!(deletes_team(&plan, "team-1"));
    assert_eq!(
        plan.writes.len(),
        1,
        "nothing but the team deletion should be written"
    );
}

#[test]
fn test_dissolve_by_a_stranger_is_rejected() {
    let mut ctx: DissolveContext = decline_ctx();
    ctx.actor = user("mallory");

    assert!(matches!(
        plan_dissolve(&ctx),
        Err(CoreError::DomainViolation(DomainError::NotTeamMember { .. }))
    ));
}
