// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::plan::{NotificationIntent, RecordGuard, RecordRef, RecordWrite, TransitionPlan};
use courtmate_domain::{
    DomainError, Event, PartnerStatus, Registration, RegistrationStatus, Team, TeamStatus, UserId,
    Versioned,
};
use time::OffsetDateTime;

/// The earliest waitlist entry, prefetched in case the withdrawal frees a
/// confirmed seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistHead {
    /// The waitlisted registration next in line.
    pub registration: Versioned<Registration>,
    /// The waitlisted team behind that registration, if the seat is a pair.
    pub team: Option<Versioned<Team>>,
}

/// Fresh reads backing one withdrawal attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawContext {
    /// The event, read fresh inside the commit phase.
    pub event: Versioned<Event>,
    /// The registration being withdrawn.
    pub registration: Versioned<Registration>,
    /// The team behind the registration, if the seat is a pair.
    pub team: Option<Versioned<Team>>,
    /// The earliest waitlist entry to promote, if one exists.
    pub waitlist_head: Option<WaitlistHead>,
    /// The acting user.
    pub actor: UserId,
    /// The operation timestamp.
    pub now: OffsetDateTime,
}

/// Builds the transition plan for withdrawing a seat entirely.
///
/// Withdrawal always has no survivor: the seat (and, for a pair, the team)
/// is removed outright. A freed confirmed seat promotes the earliest
/// waitlist entry in the same commit, leaving `registrations_count`
/// unchanged; otherwise the counter drops.
///
/// # Errors
///
/// Returns a `DomainViolation` if the actor is not the registration's
/// primary holder or the registration is already cancelled.
#[allow(clippy::too_many_lines)]
pub fn plan_withdraw(ctx: &WithdrawContext) -> Result<TransitionPlan, CoreError> {
    let registration: &Registration = &ctx.registration.record;

    if registration.player_id != ctx.actor {
        return Err(DomainError::RegistrationNotOwned {
            user_id: ctx.actor.clone(),
            registration_id: registration.registration_id.clone(),
        }
        .into());
    }
    if registration.status == RegistrationStatus::Cancelled {
        return Err(
            DomainError::RegistrationNotLive(registration.registration_id.clone()).into(),
        );
    }

    let mut plan: TransitionPlan = TransitionPlan::new();
    plan.guard(RecordGuard::present(
        RecordRef::Registration(registration.registration_id.clone()),
        ctx.registration.version,
    ));

    let mut cancelled: Registration = registration.clone();
    cancelled.status = RegistrationStatus::Cancelled;
    cancelled.player2_id = None;
    cancelled.partner_status = PartnerStatus::None;
    cancelled.team_id = None;
    cancelled.looking_for_partner = false;
    cancelled.waitlist_position = None;
    plan.write(RecordWrite::PutRegistration(cancelled));

    if let Some(team) = &ctx.team {
        plan.guard(RecordGuard::present(
            RecordRef::Team(team.record.team_id.clone()),
            team.version,
        ));
        plan.write(RecordWrite::DeleteTeam(team.record.team_id.clone()));

        if let Some(other) = team.record.other_party(&ctx.actor) {
            let intent: NotificationIntent = if team.record.status == TeamStatus::Pending {
                NotificationIntent::InviteCancelled {
                    recipient: other.clone(),
                    inviter: ctx.actor.clone(),
                }
            } else {
                NotificationIntent::TeamWithdrawn {
                    recipient: other.clone(),
                    withdrawer: ctx.actor.clone(),
                }
            };
            plan.notify(intent);
        }
    }

    let event: &Event = &ctx.event.record;
    match registration.status {
        RegistrationStatus::Pending => {
            // A pending registration never held a seat; nothing to release.
        }
        RegistrationStatus::Confirmed => {
            plan.guard(RecordGuard::present(
                RecordRef::Event(event.event_id.clone()),
                ctx.event.version,
            ));
            let mut updated_event: Event = event.clone();

            if let Some(head) = &ctx.waitlist_head {
                // One seat vacated, one seat filled: the promoted entry
                // takes the freed capacity and only the queue shrinks.
                updated_event.waitlist_count = event.waitlist_count.saturating_sub(1);
                plan.write(RecordWrite::PutEvent(updated_event));
                promote_head(&mut plan, head)?;
            } else {
                updated_event.registrations_count = event.registrations_count.saturating_sub(1);
                plan.write(RecordWrite::PutEvent(updated_event));
            }
        }
        RegistrationStatus::Waitlist => {
            plan.guard(RecordGuard::present(
                RecordRef::Event(event.event_id.clone()),
                ctx.event.version,
            ));
            let mut updated_event: Event = event.clone();
            updated_event.waitlist_count = event.waitlist_count.saturating_sub(1);
            plan.write(RecordWrite::PutEvent(updated_event));
        }
        RegistrationStatus::Cancelled => {}
    }

    Ok(plan)
}

/// Promotes the waitlist head to a confirmed seat inside the same plan.
fn promote_head(plan: &mut TransitionPlan, head: &WaitlistHead) -> Result<(), CoreError> {
    let promoted_record: &Registration = &head.registration.record;
    if promoted_record.status != RegistrationStatus::Waitlist {
        return Err(CoreError::Inconsistent(format!(
            "promotion candidate {} is not waitlisted",
            promoted_record.registration_id
        )));
    }

    let mut promoted: Registration = promoted_record.clone();
    promoted.status = RegistrationStatus::Confirmed;
    promoted.waitlist_position = None;

    plan.guard(RecordGuard::present(
        RecordRef::Registration(promoted_record.registration_id.clone()),
        head.registration.version,
    ));
    plan.write(RecordWrite::PutRegistration(promoted));

    if let Some(team) = &head.team {
        let mut promoted_team: Team = team.record.clone();
        promoted_team.status = TeamStatus::Confirmed;
        plan.guard(RecordGuard::present(
            RecordRef::Team(team.record.team_id.clone()),
            team.version,
        ));
        plan.write(RecordWrite::PutTeam(promoted_team));
    }

    plan.notify(NotificationIntent::WaitlistPromoted {
        recipient: promoted_record.player_id.clone(),
        team_id: promoted_record.team_id.clone(),
    });
    if let Some(partner) = &promoted_record.player2_id {
        plan.notify(NotificationIntent::WaitlistPromoted {
            recipient: partner.clone(),
            team_id: promoted_record.team_id.clone(),
        });
    }

    Ok(())
}
