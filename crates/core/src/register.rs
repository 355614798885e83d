// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::plan::{RecordGuard, RecordRef, RecordWrite, TransitionPlan};
use crate::seats::{SeatAssignment, assign_seat};
use courtmate_domain::{
    DomainError, Event, PartnerStatus, Registration, RegistrationId, RegistrationStatus, UserId,
    Versioned, validate_user_id,
};
use time::OffsetDateTime;

/// Fresh reads backing one solo registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterContext {
    /// The event, read fresh inside the commit phase.
    pub event: Versioned<Event>,
    /// The registering user.
    pub user: UserId,
    /// Whether the seat should be open to partner invites (Teams mode).
    pub looking_for_partner: bool,
    /// Identifier minted for the new registration.
    pub registration_id: RegistrationId,
    /// The user's existing live registration for this event, if any.
    pub existing: Option<Versioned<Registration>>,
    /// The operation timestamp.
    pub now: OffsetDateTime,
}

/// Builds the transition plan for a solo registration.
///
/// The seat allocator decides confirmed versus waitlisted from the fresh
/// counters; the plan writes the counter move and the new registration as
/// one atomic unit.
///
/// # Errors
///
/// Returns a `DomainViolation` if the user id is invalid or the user
/// already holds a live registration for the event.
pub fn plan_register(
    ctx: &RegisterContext,
) -> Result<(TransitionPlan, RegistrationStatus), CoreError> {
    validate_user_id(ctx.user.as_str())?;

    if let Some(existing) = &ctx.existing {
        if existing.record.status.is_live() {
            return Err(DomainError::AlreadyRegistered {
                user_id: ctx.user.clone(),
                event_id: ctx.event.record.event_id.clone(),
            }
            .into());
        }
    }

    let event: &Event = &ctx.event.record;
    // Looking-for-partner is a pairing concept; Players-mode seats are
    // always closed.
    let looking: bool = event.mode.supports_pairing() && ctx.looking_for_partner;

    let mut registration: Registration = Registration {
        registration_id: ctx.registration_id.clone(),
        event_id: event.event_id.clone(),
        player_id: ctx.user.clone(),
        player2_id: None,
        status: RegistrationStatus::Confirmed,
        partner_status: PartnerStatus::None,
        team_id: None,
        looking_for_partner: looking,
        waitlist_position: None,
        created_at: ctx.now,
    };

    let mut updated_event: Event = event.clone();
    let status: RegistrationStatus = match assign_seat(
        event.registrations_count,
        event.slots_available,
        event.waitlist_count,
    ) {
        SeatAssignment::Confirmed => {
            updated_event.registrations_count += 1;
            RegistrationStatus::Confirmed
        }
        SeatAssignment::Waitlisted { position } => {
            updated_event.waitlist_count += 1;
            registration.status = RegistrationStatus::Waitlist;
            registration.waitlist_position = Some(position);
            RegistrationStatus::Waitlist
        }
    };

    let mut plan: TransitionPlan = TransitionPlan::new();
    plan.guard(RecordGuard::present(
        RecordRef::Event(event.event_id.clone()),
        ctx.event.version,
    ));
    plan.guard(RecordGuard::absent(RecordRef::Registration(
        ctx.registration_id.clone(),
    )));
    plan.write(RecordWrite::PutEvent(updated_event));
    plan.write(RecordWrite::PutRegistration(registration));

    Ok((plan, status))
}
