// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::plan::{NotificationIntent, TransitionPlan};
use crate::tests::helpers::{
    NOW, deletes_team, paired_registration, players_event, seated_team, solo_registration, user,
    written_event, written_registration, written_team,
};
use crate::withdraw::{WaitlistHead, WithdrawContext, plan_withdraw};
use courtmate_domain::{
    DomainError, Event, PartnerStatus, Registration, RegistrationStatus, Team, TeamStatus,
    Versioned,
};

fn solo_withdraw_ctx(status: RegistrationStatus) -> WithdrawContext {
    WithdrawContext {
        event: players_event(2, 2, 1),
        registration: solo_registration("reg-x", "xavier", status, false),
        team: None,
        waitlist_head: None,
        actor: user("xavier"),
        now: NOW,
    }
}

fn waitlist_head(id: &str, player: &str, position: u32) -> WaitlistHead {
    let mut registration: Versioned<Registration> =
        solo_registration(id, player, RegistrationStatus::Waitlist, false);
    registration.record.waitlist_position = Some(position);
    WaitlistHead {
        registration,
        team: None,
    }
}

#[test]
fn test_confirmed_withdrawal_with_queue_promotes_the_head() {
    let mut ctx: WithdrawContext = solo_withdraw_ctx(RegistrationStatus::Confirmed);
    ctx.waitlist_head = Some(waitlist_head("reg-z", "zoe", 1));

    let plan: TransitionPlan = plan_withdraw(&ctx).unwrap();

    // One seat vacated, one filled: confirmed count is unchanged, the
    // queue shrinks.
    let event: &Event = written_event(&plan).unwrap();
    assert_eq!(event.registrations_count, 2);
    assert_eq!(event.waitlist_count, 0);

    let cancelled: &Registration = written_registration(&plan, "reg-x").unwrap();
    assert_eq!(cancelled.status, RegistrationStatus::Cancelled);

    let promoted: &Registration = written_registration(&plan, "reg-z").unwrap();
    assert_eq!(promoted.status, RegistrationStatus::Confirmed);
    assert_eq!(promoted.waitlist_position, None);

    assert_eq!(
        plan.intents,
        vec![NotificationIntent::WaitlistPromoted {
            recipient: user("zoe"),
            team_id: None,
        }]
    );
}

#[test]
fn test_confirmed_withdrawal_without_queue_decrements_count() {
    let mut ctx: WithdrawContext = solo_withdraw_ctx(RegistrationStatus::Confirmed);
    ctx.event = players_event(2, 2, 0);

    let plan: TransitionPlan = plan_withdraw(&ctx).unwrap();

    let event: &Event = written_event(&plan).unwrap();
    assert_eq!(event.registrations_count, 1);
    assert_eq!(event.waitlist_count, 0);
    assert!(plan.intents.is_empty());
}

#[test]
fn test_waitlist_withdrawal_only_shrinks_the_queue() {
    let plan: TransitionPlan = plan_withdraw(&solo_withdraw_ctx(RegistrationStatus::Waitlist))
        .unwrap();

    let event: &Event = written_event(&plan).unwrap();
    assert_eq!(event.registrations_count, 2);
    assert_eq!(event.waitlist_count, 0);
    assert!(plan.intents.is_empty());
}

#[test]
fn test_pending_withdrawal_moves_no_counters() {
    let plan: TransitionPlan = plan_withdraw(&solo_withdraw_ctx(RegistrationStatus::Pending))
        .unwrap();

    assert!(written_event(&plan).is_none());
    let cancelled: &Registration = written_registration(&plan, "reg-x").unwrap();
    assert_eq!(cancelled.status, RegistrationStatus::Cancelled);
}

#[test]
fn test_team_withdrawal_deletes_the_team_and_notifies_the_partner() {
    let mut registration = paired_registration(
        "reg-x",
        "xavier",
        "yara",
        "team-1",
        RegistrationStatus::Confirmed,
    );
    registration.record.partner_status = PartnerStatus::Confirmed;

    let ctx: WithdrawContext = WithdrawContext {
        event: players_event(2, 2, 0),
        registration,
        team: Some(seated_team(
            "team-1",
            "xavier",
            "yara",
            TeamStatus::Confirmed,
            "reg-x",
        )),
        waitlist_head: None,
        actor: user("xavier"),
        now: NOW,
    };

    let plan: TransitionPlan = plan_withdraw(&ctx).unwrap();

    assert!(deletes_team(&plan, "team-1"));
    assert_eq!(
        plan.intents,
        vec![NotificationIntent::TeamWithdrawn {
            recipient: user("yara"),
            withdrawer: user("xavier"),
        }]
    );

    let event: &Event = written_event(&plan).unwrap();
    assert_eq!(event.registrations_count, 1);
}

#[test]
fn test_promoted_waitlisted_team_is_confirmed_with_both_members_notified() {
    let mut head_registration = paired_registration(
        "reg-z",
        "zoe",
        "zack",
        "team-z",
        RegistrationStatus::Waitlist,
    );
    head_registration.record.waitlist_position = Some(1);
    head_registration.record.partner_status = PartnerStatus::Confirmed;

    let mut ctx: WithdrawContext = solo_withdraw_ctx(RegistrationStatus::Confirmed);
    ctx.waitlist_head = Some(WaitlistHead {
        registration: head_registration,
        team: Some(seated_team(
            "team-z",
            "zoe",
            "zack",
            TeamStatus::Waitlist,
            "reg-z",
        )),
    });

    let plan: TransitionPlan = plan_withdraw(&ctx).unwrap();

    let promoted_team: &Team = written_team(&plan, "team-z").unwrap();
    assert_eq!(promoted_team.status, TeamStatus::Confirmed);

    assert!(plan.intents.contains(&NotificationIntent::WaitlistPromoted {
        recipient: user("zoe"),
        team_id: Some(courtmate_domain::TeamId::new("team-z")),
    }));
    assert!(plan.intents.contains(&NotificationIntent::WaitlistPromoted {
        recipient: user("zack"),
        team_id: Some(courtmate_domain::TeamId::new("team-z")),
    }));
}

#[test]
fn test_withdrawal_by_a_non_owner_is_rejected() {
    let mut ctx: WithdrawContext = solo_withdraw_ctx(RegistrationStatus::Confirmed);
    ctx.actor = user("mallory");

    assert!(matches!(
        plan_withdraw(&ctx),
        Err(CoreError::DomainViolation(
            DomainError::RegistrationNotOwned { .. }
        ))
    ));
}

#[test]
fn test_withdrawal_of_a_cancelled_registration_is_rejected() {
    let ctx: WithdrawContext = solo_withdraw_ctx(RegistrationStatus::Cancelled);

    assert!(matches!(
        plan_withdraw(&ctx),
        Err(CoreError::DomainViolation(
            DomainError::RegistrationNotLive(_)
        ))
    ));
}

#[test]
fn test_stale_promotion_candidate_is_inconsistent() {
    let mut ctx: WithdrawContext = solo_withdraw_ctx(RegistrationStatus::Confirmed);
    ctx.waitlist_head = Some(WaitlistHead {
        registration: solo_registration("reg-z", "zoe", RegistrationStatus::Confirmed, false),
        team: None,
    });

    assert!(matches!(
        plan_withdraw(&ctx),
        Err(CoreError::Inconsistent(_))
    ));
}
