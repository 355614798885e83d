// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::plan::{NotificationIntent, RecordGuard, RecordRef, RecordWrite, TransitionPlan};
use crate::seats::{SeatAssignment, assign_seat};
use crate::withdraw::WaitlistHead;
use courtmate_domain::{
    DomainError, Event, PartnerStatus, Registration, RegistrationStatus, Team, TeamStatus, UserId,
    Versioned,
};
use time::OffsetDateTime;

/// Another pending team of the acceptor, invalidated by this acceptance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanedInvite {
    /// The pending team to dissolve.
    pub team: Versioned<Team>,
    /// The other party's registration attached to that team, if any. The
    /// acceptor's own registration is never listed here; it is handled via
    /// the solo-registration cleanup.
    pub registration: Option<Versioned<Registration>>,
}

/// Fresh reads backing one acceptance attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptContext {
    /// The event, read fresh inside the commit phase.
    pub event: Versioned<Event>,
    /// The team being accepted.
    pub team: Versioned<Team>,
    /// The accepting user.
    pub acceptor: UserId,
    /// The registration the team references, if one exists yet.
    pub registration: Option<Versioned<Registration>>,
    /// The acceptor's independent solo registration for the same event,
    /// superseded (and deleted) by the accepted pairing. Never the linked
    /// registration itself.
    pub solo_registration: Option<Versioned<Registration>>,
    /// Other pending teams where the acceptor is the unconfirmed party.
    pub orphaned: Vec<OrphanedInvite>,
    /// The earliest waitlist entry other than the records above, in case
    /// the solo-seat cleanup frees a confirmed seat the pairing does not
    /// itself consume.
    pub waitlist_head: Option<WaitlistHead>,
    /// The operation timestamp.
    pub now: OffsetDateTime,
}

/// What the acceptance resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptOutcome {
    /// Both sides are confirmed and the team landed in the given status.
    Completed(TeamStatus),
    /// The other side has not confirmed yet; the team stays pending.
    StillPending,
}

/// Builds the transition plan for accepting an invite.
///
/// When both sides are confirmed the team's final status comes from the
/// seat allocator, evaluated against the fresh counters in `ctx.event` —
/// never against prefetched ones, since concurrent releases and promotions
/// may have moved them.
///
/// # Errors
///
/// Returns a `DomainViolation` if the team is not pending, the acceptor is
/// not a member, or the acceptor is not the unconfirmed side. Returns
/// `Inconsistent` if the team references a registration that was not
/// supplied.
#[allow(clippy::too_many_lines)]
pub fn plan_accept_invite(
    ctx: &AcceptContext,
) -> Result<(TransitionPlan, AcceptOutcome), CoreError> {
    let team: &Team = &ctx.team.record;

    if team.status != TeamStatus::Pending {
        return Err(DomainError::WrongTeamStatus {
            team_id: team.team_id.clone(),
            found: team.status,
        }
        .into());
    }
    if !team.involves(&ctx.acceptor) {
        return Err(DomainError::NotTeamMember {
            user_id: ctx.acceptor.clone(),
            team_id: team.team_id.clone(),
        }
        .into());
    }
    if team.unconfirmed_party() != Some(&ctx.acceptor) {
        return Err(DomainError::NotAcceptanceTarget {
            user_id: ctx.acceptor.clone(),
            team_id: team.team_id.clone(),
        }
        .into());
    }

    let mut plan: TransitionPlan = TransitionPlan::new();
    plan.guard(RecordGuard::present(
        RecordRef::Team(team.team_id.clone()),
        ctx.team.version,
    ));

    let mut updated_team: Team = team.clone();
    if updated_team.player1_id == ctx.acceptor {
        updated_team.player1_confirmed = true;
    } else {
        updated_team.player2_confirmed = true;
    }

    if !updated_team.is_complete() {
        plan.write(RecordWrite::PutTeam(updated_team));
        return Ok((plan, AcceptOutcome::StillPending));
    }

    let linked: &Versioned<Registration> = match (&team.registration_id, &ctx.registration) {
        (Some(_), Some(registration)) => registration,
        (Some(registration_id), None) => {
            return Err(CoreError::Inconsistent(format!(
                "team {} references missing registration {registration_id}",
                team.team_id
            )));
        }
        (None, _) => {
            return Err(CoreError::Inconsistent(format!(
                "pending team {} has no registration to confirm into",
                team.team_id
            )));
        }
    };
    plan.guard(RecordGuard::present(
        RecordRef::Registration(linked.record.registration_id.clone()),
        linked.version,
    ));

    let event: &Event = &ctx.event.record;
    let mut registrations_count: u32 = event.registrations_count;
    let mut waitlist_count: u32 = event.waitlist_count;

    // An independent solo seat of the acceptor is superseded by the pairing;
    // releasing it here means the pair consumes at most one net seat.
    if let Some(solo) = &ctx.solo_registration {
        match solo.record.status {
            RegistrationStatus::Confirmed => {
                registrations_count = registrations_count.saturating_sub(1);
            }
            RegistrationStatus::Waitlist => {
                waitlist_count = waitlist_count.saturating_sub(1);
            }
            RegistrationStatus::Pending | RegistrationStatus::Cancelled => {}
        }
        plan.guard(RecordGuard::present(
            RecordRef::Registration(solo.record.registration_id.clone()),
            solo.version,
        ));
        plan.write(RecordWrite::DeleteRegistration(
            solo.record.registration_id.clone(),
        ));
    }

    let mut updated_registration: Registration = linked.record.clone();
    updated_registration.partner_status = PartnerStatus::Confirmed;
    updated_registration.looking_for_partner = false;

    let outcome: TeamStatus = match linked.record.status {
        // The seat already exists (it predated the pairing); the completed
        // team inherits it and no counter moves.
        RegistrationStatus::Confirmed => TeamStatus::Confirmed,
        RegistrationStatus::Waitlist => TeamStatus::Waitlist,
        RegistrationStatus::Pending => {
            match assign_seat(registrations_count, event.slots_available, waitlist_count) {
                SeatAssignment::Confirmed => {
                    registrations_count += 1;
                    updated_registration.status = RegistrationStatus::Confirmed;
                    updated_registration.waitlist_position = None;
                    TeamStatus::Confirmed
                }
                SeatAssignment::Waitlisted { position } => {
                    waitlist_count += 1;
                    updated_registration.status = RegistrationStatus::Waitlist;
                    updated_registration.waitlist_position = Some(position);
                    TeamStatus::Waitlist
                }
            }
        }
        RegistrationStatus::Cancelled => {
            return Err(CoreError::Inconsistent(format!(
                "team {} references cancelled registration {}",
                team.team_id, linked.record.registration_id
            )));
        }
    };
    updated_team.status = outcome;

    // A confirmed seat released by the solo cleanup and not reconsumed by
    // this pairing promotes the queue head, exactly as any other release.
    if registrations_count < event.slots_available && waitlist_count > 0 {
        if let Some(head) = &ctx.waitlist_head {
            let head_record: &Registration = &head.registration.record;
            if head_record.status == RegistrationStatus::Waitlist {
                registrations_count += 1;
                waitlist_count -= 1;

                let mut promoted: Registration = head_record.clone();
                promoted.status = RegistrationStatus::Confirmed;
                promoted.waitlist_position = None;
                plan.guard(RecordGuard::present(
                    RecordRef::Registration(head_record.registration_id.clone()),
                    head.registration.version,
                ));
                plan.write(RecordWrite::PutRegistration(promoted));

                if let Some(head_team) = &head.team {
                    let mut promoted_team: Team = head_team.record.clone();
                    promoted_team.status = TeamStatus::Confirmed;
                    plan.guard(RecordGuard::present(
                        RecordRef::Team(head_team.record.team_id.clone()),
                        head_team.version,
                    ));
                    plan.write(RecordWrite::PutTeam(promoted_team));
                }

                plan.notify(NotificationIntent::WaitlistPromoted {
                    recipient: head_record.player_id.clone(),
                    team_id: head_record.team_id.clone(),
                });
                if let Some(partner) = &head_record.player2_id {
                    plan.notify(NotificationIntent::WaitlistPromoted {
                        recipient: partner.clone(),
                        team_id: head_record.team_id.clone(),
                    });
                }
            }
        }
    }

    if registrations_count != event.registrations_count || waitlist_count != event.waitlist_count {
        let mut updated_event: Event = event.clone();
        updated_event.registrations_count = registrations_count;
        updated_event.waitlist_count = waitlist_count;
        plan.guard(RecordGuard::present(
            RecordRef::Event(event.event_id.clone()),
            ctx.event.version,
        ));
        plan.write(RecordWrite::PutEvent(updated_event));
    } else {
        // The allocator consulted the counters even if it left them alone.
        plan.guard(RecordGuard::present(
            RecordRef::Event(event.event_id.clone()),
            ctx.event.version,
        ));
    }

    plan.write(RecordWrite::PutTeam(updated_team));
    plan.write(RecordWrite::PutRegistration(updated_registration));

    // The acceptor can only be paired once: every other pending team where
    // they are the unconfirmed party dissolves, and each would-be partner's
    // seat reverts to an open solo slot.
    for orphan in &ctx.orphaned {
        let orphan_team: &Team = &orphan.team.record;
        plan.guard(RecordGuard::present(
            RecordRef::Team(orphan_team.team_id.clone()),
            orphan.team.version,
        ));
        plan.write(RecordWrite::DeleteTeam(orphan_team.team_id.clone()));

        if let Some(attached) = &orphan.registration {
            plan.guard(RecordGuard::present(
                RecordRef::Registration(attached.record.registration_id.clone()),
                attached.version,
            ));
            if attached.record.status == RegistrationStatus::Pending {
                plan.write(RecordWrite::DeleteRegistration(
                    attached.record.registration_id.clone(),
                ));
            } else {
                let mut reverted: Registration = attached.record.clone();
                reverted.player2_id = None;
                reverted.partner_status = PartnerStatus::None;
                reverted.team_id = None;
                reverted.looking_for_partner = true;
                plan.write(RecordWrite::PutRegistration(reverted));
            }
        }

        if let Some(other) = orphan_team.other_party(&ctx.acceptor) {
            plan.notify(NotificationIntent::PartnerPairedElsewhere {
                recipient: other.clone(),
                partner: ctx.acceptor.clone(),
            });
        }
    }

    if let Some(other) = team.other_party(&ctx.acceptor) {
        plan.notify(NotificationIntent::InviteAccepted {
            recipient: other.clone(),
            acceptor: ctx.acceptor.clone(),
            team_id: team.team_id.clone(),
        });
    }

    Ok((plan, AcceptOutcome::Completed(outcome)))
}
