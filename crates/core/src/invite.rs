// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::classify::InviteMode;
use crate::error::CoreError;
use crate::plan::{NotificationIntent, RecordGuard, RecordRef, RecordWrite, TransitionPlan};
use courtmate_domain::{
    EventId, PartnerStatus, Registration, RegistrationId, RegistrationStatus, Team, TeamId,
    TeamStatus, UserId,
};
use time::OffsetDateTime;

/// Identifiers minted for the records an invite may create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteIds {
    /// Identifier for the new pending team.
    pub team_id: TeamId,
    /// Identifier for the new pending registration, used only in fresh mode.
    pub registration_id: RegistrationId,
}

/// Builds the transition plan for a classified invite.
///
/// No invite mode changes seat occupancy, so no event counters are touched;
/// the plan guards exactly the records it rewrites plus the absence of the
/// ones it creates.
///
/// # Errors
///
/// Returns `Inconsistent` if the classified seat no longer has the shape the
/// mode requires; the caller should re-classify against fresh reads.
pub fn plan_send_invite(
    mode: &InviteMode,
    event_id: &EventId,
    inviter: &UserId,
    invitee: &UserId,
    ids: &InviteIds,
    now: OffsetDateTime,
) -> Result<TransitionPlan, CoreError> {
    let mut plan: TransitionPlan = TransitionPlan::new();
    plan.guard(RecordGuard::absent(RecordRef::Team(ids.team_id.clone())));

    match mode {
        InviteMode::Fresh => {
            let team: Team = Team {
                team_id: ids.team_id.clone(),
                event_id: event_id.clone(),
                player1_id: inviter.clone(),
                player2_id: invitee.clone(),
                player1_confirmed: true,
                player2_confirmed: false,
                status: TeamStatus::Pending,
                registration_id: Some(ids.registration_id.clone()),
                created_at: now,
            };
            let registration: Registration = Registration {
                registration_id: ids.registration_id.clone(),
                event_id: event_id.clone(),
                player_id: inviter.clone(),
                player2_id: Some(invitee.clone()),
                status: RegistrationStatus::Pending,
                partner_status: PartnerStatus::Pending,
                team_id: Some(ids.team_id.clone()),
                looking_for_partner: false,
                waitlist_position: None,
                created_at: now,
            };
            plan.guard(RecordGuard::absent(RecordRef::Registration(
                ids.registration_id.clone(),
            )));
            plan.write(RecordWrite::PutTeam(team));
            plan.write(RecordWrite::PutRegistration(registration));
        }
        InviteMode::FillOwnSeat { seat } => {
            if seat.record.player2_id.is_some() || seat.record.player_id != *inviter {
                return Err(CoreError::Inconsistent(format!(
                    "seat {} is no longer the inviter's open slot",
                    seat.record.registration_id
                )));
            }
            let team: Team = Team {
                team_id: ids.team_id.clone(),
                event_id: event_id.clone(),
                player1_id: inviter.clone(),
                player2_id: invitee.clone(),
                player1_confirmed: true,
                player2_confirmed: false,
                status: TeamStatus::Pending,
                registration_id: Some(seat.record.registration_id.clone()),
                created_at: now,
            };
            let mut registration: Registration = seat.record.clone();
            registration.player2_id = Some(invitee.clone());
            registration.partner_status = PartnerStatus::Pending;
            registration.team_id = Some(ids.team_id.clone());
            plan.guard(RecordGuard::present(
                RecordRef::Registration(registration.registration_id.clone()),
                seat.version,
            ));
            plan.write(RecordWrite::PutTeam(team));
            plan.write(RecordWrite::PutRegistration(registration));
        }
        InviteMode::JoinInviteeSeat { seat } => {
            if seat.record.player2_id.is_some() || seat.record.player_id != *invitee {
                return Err(CoreError::Inconsistent(format!(
                    "seat {} is no longer the invitee's open slot",
                    seat.record.registration_id
                )));
            }
            // The invitee stays primary on their own seat and becomes the
            // acceptance target; the inviter attaches as confirmed secondary.
            let team: Team = Team {
                team_id: ids.team_id.clone(),
                event_id: event_id.clone(),
                player1_id: invitee.clone(),
                player2_id: inviter.clone(),
                player1_confirmed: false,
                player2_confirmed: true,
                status: TeamStatus::Pending,
                registration_id: Some(seat.record.registration_id.clone()),
                created_at: now,
            };
            let mut registration: Registration = seat.record.clone();
            registration.player2_id = Some(inviter.clone());
            registration.partner_status = PartnerStatus::Pending;
            registration.team_id = Some(ids.team_id.clone());
            plan.guard(RecordGuard::present(
                RecordRef::Registration(registration.registration_id.clone()),
                seat.version,
            ));
            plan.write(RecordWrite::PutTeam(team));
            plan.write(RecordWrite::PutRegistration(registration));
        }
        InviteMode::TakeOverPendingSlot { seat, superseded } => {
            if seat.record.status != RegistrationStatus::Pending
                || seat.record.player2_id.as_ref() != Some(invitee)
            {
                return Err(CoreError::Inconsistent(format!(
                    "slot {} no longer carries {invitee} as pending secondary",
                    seat.record.registration_id
                )));
            }
            let displaced: UserId = seat.record.player_id.clone();
            let team: Team = Team {
                team_id: ids.team_id.clone(),
                event_id: event_id.clone(),
                player1_id: inviter.clone(),
                player2_id: invitee.clone(),
                player1_confirmed: true,
                player2_confirmed: false,
                status: TeamStatus::Pending,
                registration_id: Some(seat.record.registration_id.clone()),
                created_at: now,
            };
            let mut registration: Registration = seat.record.clone();
            registration.player_id = inviter.clone();
            registration.player2_id = Some(invitee.clone());
            registration.partner_status = PartnerStatus::Pending;
            registration.team_id = Some(ids.team_id.clone());
            registration.looking_for_partner = false;
            plan.guard(RecordGuard::present(
                RecordRef::Registration(registration.registration_id.clone()),
                seat.version,
            ));
            plan.guard(RecordGuard::present(
                RecordRef::Team(superseded.record.team_id.clone()),
                superseded.version,
            ));
            plan.write(RecordWrite::PutTeam(team));
            plan.write(RecordWrite::PutRegistration(registration));
            plan.write(RecordWrite::DeleteTeam(superseded.record.team_id.clone()));
            plan.notify(NotificationIntent::PartnerPairedElsewhere {
                recipient: displaced,
                partner: invitee.clone(),
            });
        }
    }

    // The acceptance target is always the party whose confirmation flag is
    // false; in every mode above that is reachable only via the invitee.
    plan.notify(NotificationIntent::InviteReceived {
        recipient: invitee.clone(),
        inviter: inviter.clone(),
        team_id: ids.team_id.clone(),
    });

    Ok(plan)
}
