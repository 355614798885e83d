// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification record queries.
//!
//! The engine itself only appends notifications and marks the one that
//! triggered an action read; these reads serve the user-facing feed.

use crate::data_models::NotificationRow;
use crate::diesel_schema::notifications;
use crate::error::StoreError;
use courtmate_domain::Versioned;
use courtmate_notify::Notification;
use diesel::prelude::*;

backend_fn! {

/// Point-reads one notification by id.
pub fn get_notification(
    conn: &mut _,
    notification_id: &str,
) -> Result<Option<Versioned<Notification>>, StoreError> {
    let row: Option<NotificationRow> = notifications::table
        .filter(notifications::notification_id.eq(notification_id))
        .first::<NotificationRow>(conn)
        .optional()?;
    row.map(NotificationRow::into_domain).transpose()
}

}

backend_fn! {

/// Lists a user's notifications, newest first.
pub fn notifications_for_user(
    conn: &mut _,
    user_id: &str,
) -> Result<Vec<Versioned<Notification>>, StoreError> {
    let rows: Vec<NotificationRow> = notifications::table
        .filter(notifications::user_id.eq(user_id))
        .order(notifications::created_at.desc())
        .load::<NotificationRow>(conn)?;
    rows.into_iter().map(NotificationRow::into_domain).collect()
}

}
