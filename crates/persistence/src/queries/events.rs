// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event record queries.

use crate::data_models::EventRow;
use crate::diesel_schema::events;
use crate::error::StoreError;
use courtmate_domain::{Event, Versioned};
use diesel::prelude::*;

backend_fn! {

/// Point-reads one event by id.
pub fn get_event(conn: &mut _, event_id: &str) -> Result<Option<Versioned<Event>>, StoreError> {
    let row: Option<EventRow> = events::table
        .filter(events::event_id.eq(event_id))
        .first::<EventRow>(conn)
        .optional()?;
    row.map(EventRow::into_domain).transpose()
}

}

backend_fn! {

/// Lists all events ordered by start time.
pub fn list_events(conn: &mut _) -> Result<Vec<Versioned<Event>>, StoreError> {
    let rows: Vec<EventRow> = events::table
        .order(events::starts_at.asc())
        .load::<EventRow>(conn)?;
    rows.into_iter().map(EventRow::into_domain).collect()
}

}
