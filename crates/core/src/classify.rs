// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Invite-mode classification.
//!
//! Which shape an invite takes depends on what already exists for both
//! parties. The probe is assembled from plain prefetch reads; the resulting
//! mode is an immutable value carried into the commit phase, where it is
//! re-validated against fresh reads before any write is attempted.

use crate::error::CoreError;
use courtmate_domain::{
    DomainError, Event, Registration, RegistrationStatus, Team, UserId, Versioned,
};

/// The invitee's attachment as pending secondary on someone else's seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondarySlot {
    /// The registration carrying the invitee as `player2`.
    pub registration: Versioned<Registration>,
    /// The pending team that attachment belongs to, when it was found.
    pub team: Option<Versioned<Team>>,
}

/// Everything the classifier needs to know, read outside the atomic
/// boundary. Values are advisory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteProbe {
    /// The event being registered for.
    pub event: Versioned<Event>,
    /// The inviting user.
    pub inviter: UserId,
    /// The invited user.
    pub invitee: UserId,
    /// The inviter's live registration as primary, if any.
    pub inviter_registration: Option<Versioned<Registration>>,
    /// The invitee's live registration as primary, if any.
    pub invitee_registration: Option<Versioned<Registration>>,
    /// The invitee's attachment as pending secondary elsewhere, if any.
    pub invitee_secondary_slot: Option<SecondarySlot>,
    /// Every live team involving the invitee for this event.
    pub invitee_teams: Vec<Versioned<Team>>,
}

/// The classified shape of an invite.
///
/// Computed once during prefetch and carried as a value into the commit
/// phase rather than re-derived by scattered conditionals at write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteMode {
    /// Neither party brings an existing seat: create a pending team plus a
    /// pending registration owned by the inviter.
    Fresh,
    /// The inviter already holds an open seat: attach the invitee to it.
    FillOwnSeat {
        /// The inviter's open registration.
        seat: Versioned<Registration>,
    },
    /// The invitee holds an open seat of their own: attach the inviter as
    /// secondary; the invitee is the acceptance target on their own seat.
    JoinInviteeSeat {
        /// The invitee's open registration.
        seat: Versioned<Registration>,
    },
    /// The invitee sits as pending secondary on a seatless registration
    /// from an earlier invite: the inviter takes over that slot as primary
    /// and the superseded pending team dissolves.
    TakeOverPendingSlot {
        /// The pending registration being taken over.
        seat: Versioned<Registration>,
        /// The earlier pending team this take-over supersedes.
        superseded: Versioned<Team>,
    },
}

/// Returns whether the team's side belonging to `user` is confirmed.
fn side_confirmed(team: &Team, user: &UserId) -> bool {
    (team.player1_id == *user && team.player1_confirmed)
        || (team.player2_id == *user && team.player2_confirmed)
}

/// Returns whether a registration is an open solo slot: unpaired and
/// flagged as looking for a partner.
fn is_open_solo(registration: &Registration) -> bool {
    registration.player2_id.is_none()
        && registration.team_id.is_none()
        && registration.looking_for_partner
}

/// Classifies an invite against the prefetched probe.
///
/// # Errors
///
/// Returns a `DomainViolation` when a precondition fails: self-invite,
/// pairing on a Players-mode event, an inviter already committed to a
/// closed seat, or an invitee who is already a confirmed occupant of a
/// live pairing (or otherwise not open to invites).
pub fn classify_invite(probe: &InviteProbe) -> Result<InviteMode, CoreError> {
    if probe.inviter == probe.invitee {
        return Err(DomainError::SelfInvite(probe.inviter.clone()).into());
    }

    let event: &Event = &probe.event.record;
    if !event.mode.supports_pairing() {
        return Err(DomainError::PairingNotSupported(event.event_id.clone()).into());
    }

    // Invitee availability: a user already confirmed into any live pairing
    // for this event cannot receive further invites.
    if probe
        .invitee_teams
        .iter()
        .any(|team| side_confirmed(&team.record, &probe.invitee))
    {
        return Err(DomainError::InviteeUnavailable {
            user_id: probe.invitee.clone(),
            event_id: event.event_id.clone(),
        }
        .into());
    }
    if let Some(invitee_seat) = &probe.invitee_registration {
        if !is_open_solo(&invitee_seat.record) {
            return Err(DomainError::InviteeUnavailable {
                user_id: probe.invitee.clone(),
                event_id: event.event_id.clone(),
            }
            .into());
        }
    }

    // Inviter precondition: a confirmed seat that is closed to pairing, or
    // an already-completed pairing, blocks further invites.
    if let Some(own_seat) = &probe.inviter_registration {
        let registration: &Registration = &own_seat.record;
        let committed: bool = matches!(
            registration.status,
            RegistrationStatus::Confirmed | RegistrationStatus::Waitlist
        ) && !registration.looking_for_partner;
        if committed || registration.partner_status == courtmate_domain::PartnerStatus::Confirmed {
            return Err(DomainError::InviterAlreadyCommitted {
                user_id: probe.inviter.clone(),
                event_id: event.event_id.clone(),
            }
            .into());
        }
        if is_open_solo(registration) {
            return Ok(InviteMode::FillOwnSeat {
                seat: own_seat.clone(),
            });
        }
    }

    if let Some(invitee_seat) = &probe.invitee_registration {
        // Availability was checked above, so this seat is an open solo.
        return Ok(InviteMode::JoinInviteeSeat {
            seat: invitee_seat.clone(),
        });
    }

    if let Some(slot) = &probe.invitee_secondary_slot {
        if slot.registration.record.status == RegistrationStatus::Pending {
            let superseded: Versioned<Team> = slot.team.clone().ok_or_else(|| {
                CoreError::Inconsistent(format!(
                    "registration {} carries a pending secondary but references no team",
                    slot.registration.record.registration_id
                ))
            })?;
            return Ok(InviteMode::TakeOverPendingSlot {
                seat: slot.registration.clone(),
                superseded,
            });
        }
        // A pending attachment on a seat-holding registration stays in
        // place; the accept-time cascade resolves whichever pairing loses.
    }

    Ok(InviteMode::Fresh)
}
