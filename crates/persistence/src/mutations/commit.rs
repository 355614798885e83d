// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The transactional plan commit.
//!
//! A commit re-reads the version of every guarded record inside the
//! transaction and compares it against the version the plan pinned. Any
//! mismatch — a record that moved, appeared, or vanished since the plan
//! was built — rolls the whole transaction back as a [`StoreError::Conflict`].
//! Writes bump each written record's version by one; created records start
//! at version 1.

use crate::data_models::{EventRow, NotificationRow, RegistrationRow, TeamRow};
use crate::diesel_schema::{events, notifications, registrations, teams};
use crate::error::StoreError;
use courtmate::{RecordRef, RecordWrite, TransitionPlan};
use courtmate_domain::Version;
use courtmate_notify::Notification;
use diesel::prelude::*;

backend_fn! {

/// Atomically applies a transition plan plus its notification records.
///
/// # Errors
///
/// Returns `StoreError::Conflict` if any guard no longer holds; the
/// transaction is rolled back and nothing is applied. Other errors are
/// database or serialization failures.
#[allow(clippy::too_many_lines)]
pub fn commit_plan(
    conn: &mut _,
    plan: &TransitionPlan,
    appended: &[Notification],
) -> Result<(), StoreError> {
    conn.transaction::<(), StoreError, _>(|conn| {
        for guard in &plan.guards {
            let stored: Option<Version> = match &guard.record {
                RecordRef::Event(id) => events::table
                    .filter(events::event_id.eq(id.as_str()))
                    .select(events::version)
                    .first::<Version>(conn)
                    .optional()?,
                RecordRef::Registration(id) => registrations::table
                    .filter(registrations::registration_id.eq(id.as_str()))
                    .select(registrations::version)
                    .first::<Version>(conn)
                    .optional()?,
                RecordRef::Team(id) => teams::table
                    .filter(teams::team_id.eq(id.as_str()))
                    .select(teams::version)
                    .first::<Version>(conn)
                    .optional()?,
                RecordRef::Notification(id) => notifications::table
                    .filter(notifications::notification_id.eq(id.as_str()))
                    .select(notifications::version)
                    .first::<Version>(conn)
                    .optional()?,
            };
            if stored != guard.expected_version {
                return Err(StoreError::Conflict {
                    detail: format!(
                        "{:?} expected version {:?}, found {:?}",
                        guard.record, guard.expected_version, stored
                    ),
                });
            }
        }

        for write in &plan.writes {
            match write {
                RecordWrite::PutEvent(event) => {
                    let current: Option<Version> = events::table
                        .filter(events::event_id.eq(event.event_id.as_str()))
                        .select(events::version)
                        .first::<Version>(conn)
                        .optional()?;
                    match current {
                        Some(version) => {
                            let row: EventRow = EventRow::from_domain(event, version + 1)?;
                            diesel::update(
                                events::table
                                    .filter(events::event_id.eq(event.event_id.as_str())),
                            )
                            .set(&row)
                            .execute(conn)?;
                        }
                        None => {
                            let row: EventRow = EventRow::from_domain(event, 1)?;
                            diesel::insert_into(events::table).values(&row).execute(conn)?;
                        }
                    }
                }
                RecordWrite::PutRegistration(registration) => {
                    let current: Option<Version> = registrations::table
                        .filter(
                            registrations::registration_id
                                .eq(registration.registration_id.as_str()),
                        )
                        .select(registrations::version)
                        .first::<Version>(conn)
                        .optional()?;
                    match current {
                        Some(version) => {
                            let row: RegistrationRow =
                                RegistrationRow::from_domain(registration, version + 1)?;
                            diesel::update(registrations::table.filter(
                                registrations::registration_id
                                    .eq(registration.registration_id.as_str()),
                            ))
                            .set(&row)
                            .execute(conn)?;
                        }
                        None => {
                            let row: RegistrationRow =
                                RegistrationRow::from_domain(registration, 1)?;
                            diesel::insert_into(registrations::table)
                                .values(&row)
                                .execute(conn)?;
                        }
                    }
                }
                RecordWrite::PutTeam(team) => {
                    let current: Option<Version> = teams::table
                        .filter(teams::team_id.eq(team.team_id.as_str()))
                        .select(teams::version)
                        .first::<Version>(conn)
                        .optional()?;
                    match current {
                        Some(version) => {
                            let row: TeamRow = TeamRow::from_domain(team, version + 1)?;
                            diesel::update(
                                teams::table.filter(teams::team_id.eq(team.team_id.as_str())),
                            )
                            .set(&row)
                            .execute(conn)?;
                        }
                        None => {
                            let row: TeamRow = TeamRow::from_domain(team, 1)?;
                            diesel::insert_into(teams::table).values(&row).execute(conn)?;
                        }
                    }
                }
                RecordWrite::DeleteRegistration(id) => {
                    diesel::delete(
                        registrations::table
                            .filter(registrations::registration_id.eq(id.as_str())),
                    )
                    .execute(conn)?;
                }
                RecordWrite::DeleteTeam(id) => {
                    diesel::delete(teams::table.filter(teams::team_id.eq(id.as_str())))
                        .execute(conn)?;
                }
                RecordWrite::MarkNotificationRead(id) => {
                    diesel::update(
                        notifications::table
                            .filter(notifications::notification_id.eq(id.as_str())),
                    )
                    .set((
                        notifications::is_read.eq(true),
                        notifications::version.eq(notifications::version + 1),
                    ))
                    .execute(conn)?;
                }
            }
        }

        for notification in appended {
            let row: NotificationRow = NotificationRow::from_domain(notification, 1)?;
            diesel::insert_into(notifications::table)
                .values(&row)
                .execute(conn)?;
        }

        Ok(())
    })
}

}
