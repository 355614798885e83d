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
use std::str::FromStr;
use time::OffsetDateTime;

/// How a pairing is being dissolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DissolveAction {
    /// The acceptance target turns the invite down.
    Decline,
    /// Either party exits an existing pairing.
    Leave,
    /// The inviting side withdraws a pending invite.
    Cancel,
}

impl DissolveAction {
    /// Converts this action to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Decline => "Decline",
            Self::Leave => "Leave",
            Self::Cancel => "Cancel",
        }
    }
}

impl FromStr for DissolveAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Decline" => Ok(Self::Decline),
            "Leave" => Ok(Self::Leave),
            "Cancel" => Ok(Self::Cancel),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for DissolveAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fresh reads backing one dissolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DissolveContext {
    /// The event, read fresh inside the commit phase.
    pub event: Versioned<Event>,
    /// The team being dissolved.
    pub team: Versioned<Team>,
    /// The acting user.
    pub actor: UserId,
    /// Which dissolution this is.
    pub action: DissolveAction,
    /// The registration the team references, if any.
    pub registration: Option<Versioned<Registration>>,
    /// The survivor's own independent registration, when they hold one
    /// apart from the shared seat.
    pub survivor_registration: Option<Versioned<Registration>>,
    /// The operation timestamp.
    pub now: OffsetDateTime,
}

/// Returns whether the team's side belonging to `user` is confirmed.
fn side_confirmed(team: &Team, user: &UserId) -> bool {
    (team.player1_id == *user && team.player1_confirmed)
        || (team.player2_id == *user && team.player2_confirmed)
}

/// Strips the pairing fields from a registration, leaving an open solo
/// seat in the same status and waitlist position.
fn revert_to_solo(registration: &Registration, partner_status: PartnerStatus) -> Registration {
    let mut reverted: Registration = registration.clone();
    reverted.player2_id = None;
    reverted.partner_status = partner_status;
    reverted.team_id = None;
    reverted.looking_for_partner = true;
    reverted
}

/// Builds the transition plan for declining, cancelling, or leaving a team.
///
/// The team record is deleted in every branch. A dissolution that yields a
/// survivor never frees the seat — the survivor is promoted into it in
/// place — so `registrations_count` moves only when no survivor retains
/// the seat (which for this operation is only the waitlisted-team case,
/// where `waitlist_count` drops instead).
///
/// # Errors
///
/// Returns a `DomainViolation` if the actor is not a member, or the action
/// does not match the actor's role and the team's status. Returns
/// `Inconsistent` if a seated team's registration was not supplied.
#[allow(clippy::too_many_lines)]
pub fn plan_dissolve(ctx: &DissolveContext) -> Result<TransitionPlan, CoreError> {
    let team: &Team = &ctx.team.record;

    if !team.involves(&ctx.actor) {
        return Err(DomainError::NotTeamMember {
            user_id: ctx.actor.clone(),
            team_id: team.team_id.clone(),
        }
        .into());
    }
    let survivor: UserId = team
        .other_party(&ctx.actor)
        .cloned()
        .ok_or_else(|| DomainError::NotTeamMember {
            user_id: ctx.actor.clone(),
            team_id: team.team_id.clone(),
        })?;

    match (ctx.action, team.status) {
        (DissolveAction::Decline, TeamStatus::Pending) => {
            if team.unconfirmed_party() != Some(&ctx.actor) {
                return Err(DomainError::NotSecondaryParty {
                    user_id: ctx.actor.clone(),
                    team_id: team.team_id.clone(),
                }
                .into());
            }
            let mut plan: TransitionPlan = dissolve_pending(ctx, &survivor, PartnerStatus::Denied);
            plan.notify(NotificationIntent::InviteDeclined {
                recipient: survivor,
                decliner: ctx.actor.clone(),
            });
            Ok(plan)
        }
        (DissolveAction::Cancel, TeamStatus::Pending) => {
            if !side_confirmed(team, &ctx.actor) {
                return Err(DomainError::NotPrimaryParty {
                    user_id: ctx.actor.clone(),
                    team_id: team.team_id.clone(),
                }
                .into());
            }
            let mut plan: TransitionPlan = dissolve_pending(ctx, &survivor, PartnerStatus::None);
            plan.notify(NotificationIntent::InviteCancelled {
                recipient: survivor,
                inviter: ctx.actor.clone(),
            });
            Ok(plan)
        }
        (DissolveAction::Leave, TeamStatus::Pending) => {
            let mut plan: TransitionPlan = dissolve_pending(ctx, &survivor, PartnerStatus::None);
            plan.notify(NotificationIntent::PartnerLeft {
                recipient: survivor,
                leaver: ctx.actor.clone(),
            });
            Ok(plan)
        }
        (DissolveAction::Leave, TeamStatus::Confirmed) => {
            let linked: &Versioned<Registration> =
                ctx.registration.as_ref().ok_or_else(|| {
                    CoreError::Inconsistent(format!(
                        "confirmed team {} has no registration to leave",
                        team.team_id
                    ))
                })?;

            // One person departs, the seat stays occupied: the survivor
            // becomes sole primary and the counters do not move.
            let mut updated: Registration = revert_to_solo(&linked.record, PartnerStatus::None);
            updated.player_id = survivor.clone();

            let mut plan: TransitionPlan = TransitionPlan::new();
            plan.guard(RecordGuard::present(
                RecordRef::Team(team.team_id.clone()),
                ctx.team.version,
            ));
            plan.guard(RecordGuard::present(
                RecordRef::Registration(linked.record.registration_id.clone()),
                linked.version,
            ));
            plan.write(RecordWrite::DeleteTeam(team.team_id.clone()));
            plan.write(RecordWrite::PutRegistration(updated));
            plan.notify(NotificationIntent::PartnerLeft {
                recipient: survivor,
                leaver: ctx.actor.clone(),
            });
            Ok(plan)
        }
        (DissolveAction::Leave, TeamStatus::Waitlist) => {
            // A waitlisted pair never held capacity, so there is no seat
            // for a survivor to retain: the whole entry leaves the queue.
            let linked: &Versioned<Registration> =
                ctx.registration.as_ref().ok_or_else(|| {
                    CoreError::Inconsistent(format!(
                        "waitlisted team {} has no registration to release",
                        team.team_id
                    ))
                })?;

            let event: &Event = &ctx.event.record;
            let mut updated_event: Event = event.clone();
            updated_event.waitlist_count = event.waitlist_count.saturating_sub(1);

            let mut plan: TransitionPlan = TransitionPlan::new();
            plan.guard(RecordGuard::present(
                RecordRef::Event(event.event_id.clone()),
                ctx.event.version,
            ));
            plan.guard(RecordGuard::present(
                RecordRef::Team(team.team_id.clone()),
                ctx.team.version,
            ));
            plan.guard(RecordGuard::present(
                RecordRef::Registration(linked.record.registration_id.clone()),
                linked.version,
            ));
            plan.write(RecordWrite::PutEvent(updated_event));
            plan.write(RecordWrite::DeleteTeam(team.team_id.clone()));
            plan.write(RecordWrite::DeleteRegistration(
                linked.record.registration_id.clone(),
            ));
            plan.notify(NotificationIntent::TeamWithdrawn {
                recipient: survivor,
                withdrawer: ctx.actor.clone(),
            });
            Ok(plan)
        }
        (DissolveAction::Decline | DissolveAction::Cancel, found) => {
            Err(DomainError::WrongTeamStatus {
                team_id: team.team_id.clone(),
                found,
            }
            .into())
        }
    }
}

/// Dissolves a pending team: the team is deleted and every touched
/// registration is restored to a solo slot. Pending teams hold no seat, so
/// counters never move here.
fn dissolve_pending(
    ctx: &DissolveContext,
    survivor: &UserId,
    partner_status: PartnerStatus,
) -> TransitionPlan {
    let team: &Team = &ctx.team.record;

    let mut plan: TransitionPlan = TransitionPlan::new();
    plan.guard(RecordGuard::present(
        RecordRef::Team(team.team_id.clone()),
        ctx.team.version,
    ));
    plan.write(RecordWrite::DeleteTeam(team.team_id.clone()));

    if let Some(linked) = &ctx.registration {
        plan.guard(RecordGuard::present(
            RecordRef::Registration(linked.record.registration_id.clone()),
            linked.version,
        ));

        if linked.record.player_id == ctx.actor && ctx.action == DissolveAction::Leave {
            // The slot's owner is walking away from the pairing entirely.
            if ctx.survivor_registration.is_some() {
                // The survivor keeps their own seat; a seatless slot has
                // nothing left to hand over.
                if linked.record.status == RegistrationStatus::Pending {
                    plan.write(RecordWrite::DeleteRegistration(
                        linked.record.registration_id.clone(),
                    ));
                } else {
                    plan.write(RecordWrite::PutRegistration(revert_to_solo(
                        &linked.record,
                        partner_status,
                    )));
                }
            } else {
                let mut transferred: Registration =
                    revert_to_solo(&linked.record, PartnerStatus::None);
                transferred.player_id = survivor.clone();
                plan.write(RecordWrite::PutRegistration(transferred));
            }
        } else {
            plan.write(RecordWrite::PutRegistration(revert_to_solo(
                &linked.record,
                partner_status,
            )));
        }
    }

    if let Some(own) = &ctx.survivor_registration {
        plan.guard(RecordGuard::present(
            RecordRef::Registration(own.record.registration_id.clone()),
            own.version,
        ));
        plan.write(RecordWrite::PutRegistration(revert_to_solo(
            &own.record,
            PartnerStatus::None,
        )));
    }

    plan
}
