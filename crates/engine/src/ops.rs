// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The public operations, each wrapped in the prefetch/commit retry loop.

use crate::error::{EngineError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AcceptInviteRequest, AcceptInviteResponse, CreateEventRequest, CreateEventResponse,
    DissolveTeamRequest, DissolveTeamResponse, RegisterRequest, RegisterResponse, RequestError,
    SendInviteRequest, SendInviteResponse, WithdrawRequest, WithdrawResponse,
};
use courtmate::{
    AcceptContext, AcceptOutcome, CoreError, DissolveAction, DissolveContext, InviteIds,
    InviteMode, InviteProbe, NotificationIntent, OrphanedInvite, RecordGuard, RecordRef,
    RecordWrite, RegisterContext, SecondarySlot, TransitionPlan, WaitlistHead, WithdrawContext,
    classify_invite, first_in_line, plan_accept_invite, plan_dissolve, plan_register,
    plan_send_invite, plan_withdraw,
};
use courtmate_domain::{
    Event, EventId, EventMode, NotificationId, PartnerStatus, Registration, RegistrationId,
    RegistrationStatus, Team, TeamId, UserId, Versioned, validate_event_fields,
};
use courtmate_notify::Notification;
use courtmate_persistence::{RecordStore, StoreError};
use std::str::FromStr;
use time::OffsetDateTime;
use tracing::{info, warn};

/// How many full prefetch/commit cycles an operation attempts before the
/// conflict is surfaced to the caller.
pub const RETRY_LIMIT: u32 = 5;

fn mint_event_id() -> EventId {
    EventId::new(format!("evt-{:016x}", rand::random::<u64>()))
}

fn mint_registration_id() -> RegistrationId {
    RegistrationId::new(format!("reg-{:016x}", rand::random::<u64>()))
}

fn mint_team_id() -> TeamId {
    TeamId::new(format!("team-{:016x}", rand::random::<u64>()))
}

fn mint_notification_id() -> NotificationId {
    NotificationId::new(format!("ntf-{:016x}", rand::random::<u64>()))
}

/// Materializes plan intents into notification records for the commit.
fn materialize_intents(
    intents: &[NotificationIntent],
    event_id: &EventId,
    now: OffsetDateTime,
) -> Vec<Notification> {
    intents
        .iter()
        .map(|intent| match intent {
            NotificationIntent::InviteReceived {
                recipient,
                inviter,
                team_id,
            } => Notification::invite_received(
                mint_notification_id(),
                recipient.clone(),
                inviter,
                event_id.clone(),
                team_id.clone(),
                now,
            ),
            NotificationIntent::InviteAccepted {
                recipient,
                acceptor,
                team_id,
            } => Notification::invite_accepted(
                mint_notification_id(),
                recipient.clone(),
                acceptor,
                event_id.clone(),
                team_id.clone(),
                now,
            ),
            NotificationIntent::InviteDeclined { recipient, decliner } => {
                Notification::invite_declined(
                    mint_notification_id(),
                    recipient.clone(),
                    decliner,
                    event_id.clone(),
                    now,
                )
            }
            NotificationIntent::InviteCancelled { recipient, inviter } => {
                Notification::invite_cancelled(
                    mint_notification_id(),
                    recipient.clone(),
                    inviter,
                    event_id.clone(),
                    now,
                )
            }
            NotificationIntent::PartnerLeft { recipient, leaver } => Notification::partner_left(
                mint_notification_id(),
                recipient.clone(),
                leaver,
                event_id.clone(),
                now,
            ),
            NotificationIntent::TeamWithdrawn {
                recipient,
                withdrawer,
            } => Notification::team_withdrawn(
                mint_notification_id(),
                recipient.clone(),
                withdrawer,
                event_id.clone(),
                now,
            ),
            NotificationIntent::PartnerPairedElsewhere { recipient, partner } => {
                Notification::partner_paired_elsewhere(
                    mint_notification_id(),
                    recipient.clone(),
                    partner,
                    event_id.clone(),
                    now,
                )
            }
            NotificationIntent::WaitlistPromoted { recipient, team_id } => {
                Notification::waitlist_promoted(
                    mint_notification_id(),
                    recipient.clone(),
                    event_id.clone(),
                    team_id.clone(),
                    now,
                )
            }
        })
        .collect()
}

/// Marks a consumed notification read in its own tiny commit. Used by the
/// benign-race paths where no roster change accompanies the consumption.
fn consume_notification<S: RecordStore>(
    store: &mut S,
    notification_id: Option<&String>,
) -> Result<(), EngineError> {
    if let Some(id) = notification_id {
        let mut plan: TransitionPlan = TransitionPlan::new();
        plan.write(RecordWrite::MarkNotificationRead(NotificationId::new(
            id.clone(),
        )));
        store.commit(&plan, &[])?;
    }
    Ok(())
}

/// Returns whether the team's side belonging to `user` is confirmed.
fn side_confirmed(team: &Team, user: &UserId) -> bool {
    (team.player1_id == *user && team.player1_confirmed)
        || (team.player2_id == *user && team.player2_confirmed)
}

/// Creates a new event with zeroed counters.
///
/// # Errors
///
/// Returns `InvalidInput` for malformed fields and `Store` for database
/// failures. Identifier collisions retry with a fresh identifier.
pub fn create_event<S: RecordStore>(
    store: &mut S,
    request: &CreateEventRequest,
) -> Result<CreateEventResponse, EngineError> {
    let mode: EventMode =
        EventMode::from_str(&request.mode).map_err(|_| EngineError::InvalidInput {
            field: String::from("mode"),
            message: RequestError::UnknownMode(request.mode.clone()).to_string(),
        })?;

    let now: OffsetDateTime = OffsetDateTime::now_utc();

    for attempt in 1..=RETRY_LIMIT {
        let event: Event = Event {
            event_id: mint_event_id(),
            organizer_id: UserId::new(request.organizer_id.clone()),
            title: request.title.clone(),
            mode,
            slots_available: request.slots_available,
            registrations_count: 0,
            waitlist_count: 0,
            starts_at: request.starts_at,
            created_at: now,
        };
        validate_event_fields(&event).map_err(translate_domain_error)?;

        let mut plan: TransitionPlan = TransitionPlan::new();
        plan.guard(RecordGuard::absent(RecordRef::Event(event.event_id.clone())));
        plan.write(RecordWrite::PutEvent(event.clone()));

        match store.commit(&plan, &[]) {
            Ok(()) => {
                info!(event_id = %event.event_id, mode = %mode, "Created event");
                return Ok(CreateEventResponse {
                    event_id: event.event_id.as_str().to_string(),
                    message: format!("Created event '{}'", event.title),
                });
            }
            Err(StoreError::Conflict { .. }) => {
                warn!(attempt, "Event id collision, retrying with a fresh id");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(EngineError::ConflictRetriesExhausted {
        attempts: RETRY_LIMIT,
    })
}

/// Registers a solo seat for a user.
///
/// # Errors
///
/// Returns a precondition violation if the user already holds a live seat,
/// `ResourceNotFound` for an unknown event, and
/// `ConflictRetriesExhausted` when concurrent occupancy changes keep
/// invalidating the attempt.
pub fn register<S: RecordStore>(
    store: &mut S,
    request: &RegisterRequest,
) -> Result<RegisterResponse, EngineError> {
    let event_id: EventId = EventId::new(request.event_id.clone());
    let user: UserId = UserId::new(request.user_id.clone());

    for attempt in 1..=RETRY_LIMIT {
        let event: Versioned<Event> =
            store
                .get_event(&event_id)?
                .ok_or_else(|| EngineError::ResourceNotFound {
                    resource_type: String::from("Event"),
                    message: format!("Event {event_id} does not exist"),
                })?;
        let existing: Option<Versioned<Registration>> = store
            .registrations_for_player(&event_id, &user)?
            .into_iter()
            .next();

        let ctx: RegisterContext = RegisterContext {
            event,
            user: user.clone(),
            looking_for_partner: request.looking_for_partner,
            registration_id: mint_registration_id(),
            existing,
            now: OffsetDateTime::now_utc(),
        };

        let (plan, status) = plan_register(&ctx).map_err(translate_core_error)?;
        let position: Option<u32> = plan.writes.iter().find_map(|write| match write {
            RecordWrite::PutRegistration(registration)
                if registration.registration_id == ctx.registration_id =>
            {
                registration.waitlist_position
            }
            _ => None,
        });

        match store.commit(&plan, &[]) {
            Ok(()) => {
                info!(
                    event_id = %event_id,
                    user_id = %user,
                    status = %status,
                    "Registered seat"
                );
                return Ok(RegisterResponse {
                    registration_id: ctx.registration_id.as_str().to_string(),
                    status: status.as_str().to_string(),
                    waitlist_position: position,
                    message: match status {
                        RegistrationStatus::Waitlist => {
                            String::from("Event is full; you were added to the waitlist")
                        }
                        _ => String::from("You are registered"),
                    },
                });
            }
            Err(StoreError::Conflict { detail }) => {
                warn!(attempt, %detail, "Registration conflicted, retrying");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(EngineError::ConflictRetriesExhausted {
        attempts: RETRY_LIMIT,
    })
}

/// Assembles the invite classification probe from prefetch reads.
fn probe_invite<S: RecordStore>(
    store: &mut S,
    event: Versioned<Event>,
    inviter: &UserId,
    invitee: &UserId,
) -> Result<InviteProbe, EngineError> {
    let event_id: EventId = event.record.event_id.clone();

    let inviter_candidates: Vec<Versioned<Registration>> =
        store.registrations_for_player(&event_id, inviter)?;
    // Prefer the open slot; an inviter with several live registrations
    // (outbound invites) fills the open one first.
    let inviter_registration: Option<Versioned<Registration>> = inviter_candidates
        .iter()
        .find(|registration| {
            registration.record.player2_id.is_none() && registration.record.looking_for_partner
        })
        .cloned()
        .or_else(|| inviter_candidates.into_iter().next());

    let invitee_registration: Option<Versioned<Registration>> = store
        .registrations_for_player(&event_id, invitee)?
        .into_iter()
        .next();

    let invitee_secondary_slot: Option<SecondarySlot> = {
        let slot: Option<Versioned<Registration>> = store
            .registrations_with_secondary(&event_id, invitee)?
            .into_iter()
            .find(|registration| registration.record.partner_status == PartnerStatus::Pending);
        match slot {
            Some(registration) => {
                let team: Option<Versioned<Team>> = match &registration.record.team_id {
                    Some(team_id) => store.get_team(team_id)?,
                    None => None,
                };
                Some(SecondarySlot { registration, team })
            }
            None => None,
        }
    };

    let invitee_teams: Vec<Versioned<Team>> = store.teams_for_user(&event_id, invitee)?;

    Ok(InviteProbe {
        event,
        inviter: inviter.clone(),
        invitee: invitee.clone(),
        inviter_registration,
        invitee_registration,
        invitee_secondary_slot,
        invitee_teams,
    })
}

/// Re-reads the records an invite mode will write and rebuilds the mode
/// around the fresh versions. `None` means a record vanished and the whole
/// cycle must re-classify.
fn refresh_invite_mode<S: RecordStore>(
    store: &mut S,
    mode: InviteMode,
) -> Result<Option<InviteMode>, EngineError> {
    match mode {
        InviteMode::Fresh => Ok(Some(InviteMode::Fresh)),
        InviteMode::FillOwnSeat { seat } => {
            Ok(store
                .get_registration(&seat.record.registration_id)?
                .map(|fresh| InviteMode::FillOwnSeat { seat: fresh }))
        }
        InviteMode::JoinInviteeSeat { seat } => {
            Ok(store
                .get_registration(&seat.record.registration_id)?
                .map(|fresh| InviteMode::JoinInviteeSeat { seat: fresh }))
        }
        InviteMode::TakeOverPendingSlot { seat, superseded } => {
            let fresh_seat: Option<Versioned<Registration>> =
                store.get_registration(&seat.record.registration_id)?;
            let fresh_team: Option<Versioned<Team>> =
                store.get_team(&superseded.record.team_id)?;
            match (fresh_seat, fresh_team) {
                (Some(seat), Some(superseded)) => {
                    Ok(Some(InviteMode::TakeOverPendingSlot { seat, superseded }))
                }
                _ => Ok(None),
            }
        }
    }
}

/// Invites a partner for a doubles-style event.
///
/// # Errors
///
/// Returns a precondition violation for self-invites, committed inviters,
/// or unavailable invitees; `ResourceNotFound` for an unknown event; and
/// `ConflictRetriesExhausted` when concurrent actors keep moving the
/// records involved.
pub fn send_invite<S: RecordStore>(
    store: &mut S,
    request: &SendInviteRequest,
) -> Result<SendInviteResponse, EngineError> {
    let event_id: EventId = EventId::new(request.event_id.clone());
    let inviter: UserId = UserId::new(request.inviter_id.clone());
    let invitee: UserId = UserId::new(request.invitee_id.clone());

    for attempt in 1..=RETRY_LIMIT {
        // Phase 1: prefetch and classify. These reads are advisory.
        let event: Versioned<Event> =
            store
                .get_event(&event_id)?
                .ok_or_else(|| EngineError::ResourceNotFound {
                    resource_type: String::from("Event"),
                    message: format!("Event {event_id} does not exist"),
                })?;
        let probe: InviteProbe = probe_invite(store, event, &inviter, &invitee)?;
        let mode: InviteMode = match classify_invite(&probe) {
            Ok(mode) => mode,
            Err(CoreError::DomainViolation(err)) => return Err(translate_domain_error(err)),
            Err(CoreError::Inconsistent(detail)) => {
                warn!(attempt, %detail, "Invite prefetch inconsistent, retrying");
                continue;
            }
        };

        // Phase 2: re-read the write set and re-validate the
        // classification against the fresh versions.
        let Some(fresh_mode) = refresh_invite_mode(store, mode)? else {
            warn!(attempt, "Invite target records vanished, re-classifying");
            continue;
        };

        let ids: InviteIds = InviteIds {
            team_id: mint_team_id(),
            registration_id: mint_registration_id(),
        };
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let plan: TransitionPlan =
            match plan_send_invite(&fresh_mode, &event_id, &inviter, &invitee, &ids, now) {
                Ok(plan) => plan,
                Err(CoreError::DomainViolation(err)) => return Err(translate_domain_error(err)),
                Err(CoreError::Inconsistent(detail)) => {
                    warn!(attempt, %detail, "Invite shape changed underfoot, retrying");
                    continue;
                }
            };

        let notifications: Vec<Notification> = materialize_intents(&plan.intents, &event_id, now);
        match store.commit(&plan, &notifications) {
            Ok(()) => {
                info!(
                    event_id = %event_id,
                    inviter = %inviter,
                    invitee = %invitee,
                    team_id = %ids.team_id,
                    "Sent partner invite"
                );
                return Ok(SendInviteResponse {
                    team_id: ids.team_id.as_str().to_string(),
                    message: format!("Invite sent to {invitee}"),
                });
            }
            Err(StoreError::Conflict { detail }) => {
                warn!(attempt, %detail, "Invite commit conflicted, retrying");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(EngineError::ConflictRetriesExhausted {
        attempts: RETRY_LIMIT,
    })
}

/// Accepts a pending invite.
///
/// Accepting an already-resolved team is a no-op success; accepting a
/// vanished team marks the triggering notification read and reports the
/// invite as gone. If the other party confirmed into a different pairing
/// while this invite sat unanswered, the stale team is dissolved and the
/// acceptance is rejected.
///
/// # Errors
///
/// Returns a precondition violation when the acceptor is not the
/// acceptance target, and `ConflictRetriesExhausted` on persistent
/// concurrent interference.
#[allow(clippy::too_many_lines)]
pub fn accept_invite<S: RecordStore>(
    store: &mut S,
    request: &AcceptInviteRequest,
) -> Result<AcceptInviteResponse, EngineError> {
    let team_id: TeamId = TeamId::new(request.team_id.clone());
    let acceptor: UserId = UserId::new(request.acceptor_id.clone());

    for attempt in 1..=RETRY_LIMIT {
        let Some(team) = store.get_team(&team_id)? else {
            // The pairing dissolved under the notification. Consume the
            // notification and resolve silently.
            consume_notification(store, request.notification_id.as_ref())?;
            return Ok(AcceptInviteResponse {
                team_id: team_id.as_str().to_string(),
                status: String::from("Dissolved"),
                message: String::from("This invite is no longer active"),
            });
        };

        if team.record.status != courtmate_domain::TeamStatus::Pending {
            // Second accept on a resolved team: no counter may move again.
            consume_notification(store, request.notification_id.as_ref())?;
            return Ok(AcceptInviteResponse {
                team_id: team_id.as_str().to_string(),
                status: team.record.status.as_str().to_string(),
                message: String::from("This pairing is already settled"),
            });
        }

        let event_id: EventId = team.record.event_id.clone();
        let event: Versioned<Event> =
            store
                .get_event(&event_id)?
                .ok_or_else(|| EngineError::ResourceNotFound {
                    resource_type: String::from("Event"),
                    message: format!("Event {event_id} does not exist"),
                })?;

        // Stale-invite check: the other party may have confirmed into a
        // different pairing while this invite sat unanswered. The stale
        // team is dissolved here rather than left to dangle.
        if let Some(other) = team.record.other_party(&acceptor) {
            let paired_elsewhere: bool =
                store
                    .teams_for_user(&event_id, other)?
                    .iter()
                    .any(|candidate| {
                        candidate.record.team_id != team_id
                            && side_confirmed(&candidate.record, other)
                            && candidate.record.is_complete()
                    });
            if paired_elsewhere {
                let mut cleanup: TransitionPlan = TransitionPlan::new();
                cleanup.guard(RecordGuard::present(
                    RecordRef::Team(team_id.clone()),
                    team.version,
                ));
                cleanup.write(RecordWrite::DeleteTeam(team_id.clone()));
                if let Some(registration_id) = &team.record.registration_id {
                    if let Some(stale) = store.get_registration(registration_id)? {
                        if stale.record.team_id.as_ref() == Some(&team_id) {
                            cleanup.guard(RecordGuard::present(
                                RecordRef::Registration(registration_id.clone()),
                                stale.version,
                            ));
                            if stale.record.status == RegistrationStatus::Pending {
                                cleanup.write(RecordWrite::DeleteRegistration(
                                    registration_id.clone(),
                                ));
                            } else {
                                // A seat-holding slot keeps its seat; only
                                // the dead pairing is stripped off it.
                                let mut reverted: Registration = stale.record.clone();
                                reverted.player2_id = None;
                                reverted.partner_status = PartnerStatus::None;
                                reverted.team_id = None;
                                reverted.looking_for_partner = true;
                                cleanup.write(RecordWrite::PutRegistration(reverted));
                            }
                        }
                    }
                }
                if let Some(id) = &request.notification_id {
                    cleanup.write(RecordWrite::MarkNotificationRead(NotificationId::new(
                        id.clone(),
                    )));
                }
                match store.commit(&cleanup, &[]) {
                    Ok(()) => {
                        info!(team_id = %team_id, "Dissolved stale invite on acceptance");
                        return Err(EngineError::DomainRuleViolation {
                            rule: String::from("invite_no_longer_available"),
                            message: format!("{other} has already joined another team"),
                        });
                    }
                    Err(StoreError::Conflict { detail }) => {
                        warn!(attempt, %detail, "Stale-invite cleanup conflicted, retrying");
                        continue;
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }

        let registration: Option<Versioned<Registration>> = match &team.record.registration_id {
            Some(registration_id) => store.get_registration(registration_id)?,
            None => None,
        };

        let linked_id: Option<&RegistrationId> = registration
            .as_ref()
            .map(|linked| &linked.record.registration_id);
        let solo_registration: Option<Versioned<Registration>> = store
            .registrations_for_player(&event_id, &acceptor)?
            .into_iter()
            .find(|candidate| Some(&candidate.record.registration_id) != linked_id);

        let mut orphaned: Vec<OrphanedInvite> = Vec::new();
        for candidate in store.teams_for_user(&event_id, &acceptor)? {
            let record: &Team = &candidate.record;
            if record.team_id == team_id
                || record.status != courtmate_domain::TeamStatus::Pending
                || record.unconfirmed_party() != Some(&acceptor)
            {
                continue;
            }
            let attached: Option<Versioned<Registration>> = match &record.registration_id {
                Some(registration_id) => store
                    .get_registration(registration_id)?
                    .filter(|attached| attached.record.player_id != acceptor),
                None => None,
            };
            orphaned.push(OrphanedInvite {
                team: candidate.clone(),
                registration: attached,
            });
        }

        // A confirmed solo seat about to be superseded may free capacity;
        // prefetch the queue head so the plan can promote in the same
        // commit if it does.
        let waitlist_head: Option<WaitlistHead> = if solo_registration
            .as_ref()
            .is_some_and(|solo| solo.record.status == RegistrationStatus::Confirmed)
        {
            let skip: Vec<&RegistrationId> = registration
                .iter()
                .chain(solo_registration.iter())
                .map(|entry| &entry.record.registration_id)
                .collect();
            let queue: Vec<Versioned<Registration>> = store
                .waitlisted_registrations(&event_id)?
                .into_iter()
                .filter(|entry| !skip.contains(&&entry.record.registration_id))
                .collect();
            match first_in_line(&queue) {
                Some(head) => {
                    let head_team: Option<Versioned<Team>> = match &head.record.team_id {
                        Some(head_team_id) => store.get_team(head_team_id)?,
                        None => None,
                    };
                    Some(WaitlistHead {
                        registration: head.clone(),
                        team: head_team,
                    })
                }
                None => None,
            }
        } else {
            None
        };

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let ctx: AcceptContext = AcceptContext {
            event,
            team,
            acceptor: acceptor.clone(),
            registration,
            solo_registration,
            orphaned,
            waitlist_head,
            now,
        };

        let (mut plan, outcome) = match plan_accept_invite(&ctx) {
            Ok(result) => result,
            Err(CoreError::DomainViolation(err)) => return Err(translate_domain_error(err)),
            Err(CoreError::Inconsistent(detail)) => {
                warn!(attempt, %detail, "Accept snapshot inconsistent, retrying");
                continue;
            }
        };
        if let Some(id) = &request.notification_id {
            plan.write(RecordWrite::MarkNotificationRead(NotificationId::new(
                id.clone(),
            )));
        }

        let notifications: Vec<Notification> = materialize_intents(&plan.intents, &event_id, now);
        match store.commit(&plan, &notifications) {
            Ok(()) => {
                let status: String = match outcome {
                    AcceptOutcome::Completed(status) => status.as_str().to_string(),
                    AcceptOutcome::StillPending => String::from("Pending"),
                };
                info!(
                    team_id = %team_id,
                    acceptor = %acceptor,
                    status = %status,
                    "Accepted partner invite"
                );
                return Ok(AcceptInviteResponse {
                    team_id: team_id.as_str().to_string(),
                    status,
                    message: String::from("Pairing confirmed"),
                });
            }
            Err(StoreError::Conflict { detail }) => {
                warn!(attempt, %detail, "Accept commit conflicted, retrying");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(EngineError::ConflictRetriesExhausted {
        attempts: RETRY_LIMIT,
    })
}

/// Declines, cancels, or leaves a team.
///
/// Dissolving a team that already vanished is a no-op success (the
/// triggering notification is still consumed).
///
/// # Errors
///
/// Returns `InvalidInput` for an unknown action, precondition violations
/// for role/status mismatches, and `ConflictRetriesExhausted` on
/// persistent concurrent interference.
pub fn dissolve_team<S: RecordStore>(
    store: &mut S,
    request: &DissolveTeamRequest,
) -> Result<DissolveTeamResponse, EngineError> {
    let action: DissolveAction =
        DissolveAction::from_str(&request.action).map_err(|_| EngineError::InvalidInput {
            field: String::from("action"),
            message: RequestError::UnknownAction(request.action.clone()).to_string(),
        })?;
    let team_id: TeamId = TeamId::new(request.team_id.clone());
    let actor: UserId = UserId::new(request.actor_id.clone());

    for attempt in 1..=RETRY_LIMIT {
        let Some(team) = store.get_team(&team_id)? else {
            consume_notification(store, request.notification_id.as_ref())?;
            return Ok(DissolveTeamResponse {
                message: String::from("This pairing is already dissolved"),
            });
        };

        let event_id: EventId = team.record.event_id.clone();
        let event: Versioned<Event> =
            store
                .get_event(&event_id)?
                .ok_or_else(|| EngineError::ResourceNotFound {
                    resource_type: String::from("Event"),
                    message: format!("Event {event_id} does not exist"),
                })?;

        let registration: Option<Versioned<Registration>> = match &team.record.registration_id {
            Some(registration_id) => store.get_registration(registration_id)?,
            None => None,
        };
        let linked_id: Option<RegistrationId> = registration
            .as_ref()
            .map(|linked| linked.record.registration_id.clone());

        let survivor_registration: Option<Versioned<Registration>> =
            match team.record.other_party(&actor) {
                Some(survivor) => store
                    .registrations_for_player(&event_id, survivor)?
                    .into_iter()
                    .find(|candidate| {
                        Some(&candidate.record.registration_id) != linked_id.as_ref()
                    }),
                None => None,
            };

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let ctx: DissolveContext = DissolveContext {
            event,
            team,
            actor: actor.clone(),
            action,
            registration,
            survivor_registration,
            now,
        };

        let mut plan: TransitionPlan = match plan_dissolve(&ctx) {
            Ok(plan) => plan,
            Err(CoreError::DomainViolation(err)) => return Err(translate_domain_error(err)),
            Err(CoreError::Inconsistent(detail)) => {
                warn!(attempt, %detail, "Dissolve snapshot inconsistent, retrying");
                continue;
            }
        };
        if let Some(id) = &request.notification_id {
            plan.write(RecordWrite::MarkNotificationRead(NotificationId::new(
                id.clone(),
            )));
        }

        let notifications: Vec<Notification> = materialize_intents(&plan.intents, &event_id, now);
        match store.commit(&plan, &notifications) {
            Ok(()) => {
                info!(
                    team_id = %team_id,
                    actor = %actor,
                    action = %action,
                    "Dissolved team"
                );
                return Ok(DissolveTeamResponse {
                    message: format!("Team dissolved ({action})"),
                });
            }
            Err(StoreError::Conflict { detail }) => {
                warn!(attempt, %detail, "Dissolve commit conflicted, retrying");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(EngineError::ConflictRetriesExhausted {
        attempts: RETRY_LIMIT,
    })
}

/// Withdraws a seat entirely, promoting the earliest waitlist entry when a
/// confirmed seat frees up.
///
/// Withdrawing an already-removed or already-cancelled registration is a
/// no-op success.
///
/// # Errors
///
/// Returns a precondition violation when the actor does not own the
/// registration, and `ConflictRetriesExhausted` on persistent concurrent
/// interference.
pub fn withdraw<S: RecordStore>(
    store: &mut S,
    request: &WithdrawRequest,
) -> Result<WithdrawResponse, EngineError> {
    let registration_id: RegistrationId = RegistrationId::new(request.registration_id.clone());
    let actor: UserId = UserId::new(request.user_id.clone());

    for attempt in 1..=RETRY_LIMIT {
        let Some(registration) = store.get_registration(&registration_id)? else {
            return Ok(WithdrawResponse {
                message: String::from("This registration is already withdrawn"),
            });
        };
        if registration.record.status == RegistrationStatus::Cancelled {
            return Ok(WithdrawResponse {
                message: String::from("This registration is already withdrawn"),
            });
        }

        let event_id: EventId = registration.record.event_id.clone();
        let event: Versioned<Event> =
            store
                .get_event(&event_id)?
                .ok_or_else(|| EngineError::ResourceNotFound {
                    resource_type: String::from("Event"),
                    message: format!("Event {event_id} does not exist"),
                })?;

        let team: Option<Versioned<Team>> = match &registration.record.team_id {
            Some(team_id) => store.get_team(team_id)?,
            None => None,
        };

        let waitlist_head: Option<WaitlistHead> =
            if registration.record.status == RegistrationStatus::Confirmed {
                let queue: Vec<Versioned<Registration>> =
                    store.waitlisted_registrations(&event_id)?;
                match first_in_line(&queue) {
                    Some(head) => {
                        let head_team: Option<Versioned<Team>> = match &head.record.team_id {
                            Some(team_id) => store.get_team(team_id)?,
                            None => None,
                        };
                        Some(WaitlistHead {
                            registration: head.clone(),
                            team: head_team,
                        })
                    }
                    None => None,
                }
            } else {
                None
            };

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let ctx: WithdrawContext = WithdrawContext {
            event,
            registration,
            team,
            waitlist_head,
            actor: actor.clone(),
            now,
        };

        let plan: TransitionPlan = match plan_withdraw(&ctx) {
            Ok(plan) => plan,
            Err(CoreError::DomainViolation(err)) => return Err(translate_domain_error(err)),
            Err(CoreError::Inconsistent(detail)) => {
                warn!(attempt, %detail, "Withdraw snapshot inconsistent, retrying");
                continue;
            }
        };

        let notifications: Vec<Notification> = materialize_intents(&plan.intents, &event_id, now);
        match store.commit(&plan, &notifications) {
            Ok(()) => {
                info!(
                    registration_id = %registration_id,
                    user_id = %actor,
                    "Withdrew registration"
                );
                return Ok(WithdrawResponse {
                    message: String::from("You are withdrawn from the event"),
                });
            }
            Err(StoreError::Conflict { detail }) => {
                warn!(attempt, %detail, "Withdraw commit conflicted, retrying");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(EngineError::ConflictRetriesExhausted {
        attempts: RETRY_LIMIT,
    })
}
