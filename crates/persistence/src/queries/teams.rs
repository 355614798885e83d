// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team record queries.

use crate::data_models::TeamRow;
use crate::diesel_schema::teams;
use crate::error::StoreError;
use courtmate_domain::{Team, Versioned};
use diesel::prelude::*;

backend_fn! {

/// Point-reads one team by id.
pub fn get_team(conn: &mut _, team_id: &str) -> Result<Option<Versioned<Team>>, StoreError> {
    let row: Option<TeamRow> = teams::table
        .filter(teams::team_id.eq(team_id))
        .first::<TeamRow>(conn)
        .optional()?;
    row.map(TeamRow::into_domain).transpose()
}

}

backend_fn! {

/// Lists all teams for an event, oldest first.
pub fn teams_for_event(conn: &mut _, event_id: &str) -> Result<Vec<Versioned<Team>>, StoreError> {
    let rows: Vec<TeamRow> = teams::table
        .filter(teams::event_id.eq(event_id))
        .order(teams::created_at.asc())
        .load::<TeamRow>(conn)?;
    rows.into_iter().map(TeamRow::into_domain).collect()
}

}

backend_fn! {

/// Lists every team where the user is either party, for one event.
pub fn teams_for_user(
    conn: &mut _,
    event_id: &str,
    user_id: &str,
) -> Result<Vec<Versioned<Team>>, StoreError> {
    let rows: Vec<TeamRow> = teams::table
        .filter(teams::event_id.eq(event_id))
        .filter(
            teams::player1_id
                .eq(user_id)
                .or(teams::player2_id.eq(user_id)),
        )
        .order(teams::created_at.asc())
        .load::<TeamRow>(conn)?;
    rows.into_iter().map(TeamRow::into_domain).collect()
}

}
