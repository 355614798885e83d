// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Registration record queries.
//!
//! Cancelled registrations are history; every query here that feeds the
//! pairing engine filters them out.

use crate::data_models::RegistrationRow;
use crate::diesel_schema::registrations;
use crate::error::StoreError;
use courtmate_domain::{Registration, RegistrationStatus, Versioned};
use diesel::prelude::*;

backend_fn! {

/// Point-reads one registration by id.
pub fn get_registration(
    conn: &mut _,
    registration_id: &str,
) -> Result<Option<Versioned<Registration>>, StoreError> {
    let row: Option<RegistrationRow> = registrations::table
        .filter(registrations::registration_id.eq(registration_id))
        .first::<RegistrationRow>(conn)
        .optional()?;
    row.map(RegistrationRow::into_domain).transpose()
}

}

backend_fn! {

/// Lists all non-cancelled registrations for an event, oldest first.
pub fn registrations_for_event(
    conn: &mut _,
    event_id: &str,
) -> Result<Vec<Versioned<Registration>>, StoreError> {
    let rows: Vec<RegistrationRow> = registrations::table
        .filter(registrations::event_id.eq(event_id))
        .filter(registrations::status.ne(RegistrationStatus::Cancelled.as_str()))
        .order(registrations::created_at.asc())
        .load::<RegistrationRow>(conn)?;
    rows.into_iter().map(RegistrationRow::into_domain).collect()
}

}

backend_fn! {

/// Lists a user's live registrations as primary holder for an event.
pub fn registrations_for_player(
    conn: &mut _,
    event_id: &str,
    player_id: &str,
) -> Result<Vec<Versioned<Registration>>, StoreError> {
    let rows: Vec<RegistrationRow> = registrations::table
        .filter(registrations::event_id.eq(event_id))
        .filter(registrations::player_id.eq(player_id))
        .filter(registrations::status.ne(RegistrationStatus::Cancelled.as_str()))
        .order(registrations::created_at.asc())
        .load::<RegistrationRow>(conn)?;
    rows.into_iter().map(RegistrationRow::into_domain).collect()
}

}

backend_fn! {

/// Lists live registrations carrying a user as attached secondary.
pub fn registrations_with_secondary(
    conn: &mut _,
    event_id: &str,
    player2_id: &str,
) -> Result<Vec<Versioned<Registration>>, StoreError> {
    let rows: Vec<RegistrationRow> = registrations::table
        .filter(registrations::event_id.eq(event_id))
        .filter(registrations::player2_id.eq(player2_id))
        .filter(registrations::status.ne(RegistrationStatus::Cancelled.as_str()))
        .order(registrations::created_at.asc())
        .load::<RegistrationRow>(conn)?;
    rows.into_iter().map(RegistrationRow::into_domain).collect()
}

}

backend_fn! {

/// Lists an event's waitlisted registrations in FIFO order.
pub fn waitlisted_registrations(
    conn: &mut _,
    event_id: &str,
) -> Result<Vec<Versioned<Registration>>, StoreError> {
    let rows: Vec<RegistrationRow> = registrations::table
        .filter(registrations::event_id.eq(event_id))
        .filter(registrations::status.eq(RegistrationStatus::Waitlist.as_str()))
        .order((
            registrations::waitlist_position.asc(),
            registrations::created_at.asc(),
        ))
        .load::<RegistrationRow>(conn)?;
    rows.into_iter().map(RegistrationRow::into_domain).collect()
}

}
