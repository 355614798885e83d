// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::Path;
use std::sync::atomic::Ordering;

use diesel::SqliteConnection;
use tracing::info;

use crate::DB_COUNTER;
use crate::backend::sqlite;
use crate::error::StoreError;
use crate::mutations::commit::commit_plan_sqlite;
use crate::queries::{events, notifications, registrations, teams};
use crate::store::RecordStore;
use courtmate::TransitionPlan;
use courtmate_domain::{
    Event, EventId, NotificationId, Registration, RegistrationId, Team, TeamId, UserId, Versioned,
};
use courtmate_notify::Notification;

/// `SQLite`-backed record store.
///
/// The default backend: in-memory for tests and development, file-based
/// (with WAL) for deployments.
pub struct SqliteStore {
    conn: SqliteConnection,
}

impl SqliteStore {
    /// Creates a store on a fresh, uniquely named in-memory database.
    ///
    /// Each call gets its own database via an atomic counter, keeping
    /// parallel tests isolated without time-based names.
    ///
    /// # Errors
    ///
    /// Returns an error if connection, migration, or the foreign-key
    /// startup check fails.
    pub fn new_in_memory() -> Result<Self, StoreError> {
        let id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let database_url: String = format!("file:courtmate_mem_{id}?mode=memory&cache=shared");
        let mut conn: SqliteConnection = sqlite::initialize_database(&database_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;
        Ok(Self { conn })
    }

    /// Creates a store on a file-based database, enabling WAL mode.
    ///
    /// # Errors
    ///
    /// Returns an error if connection, migration, or the foreign-key
    /// startup check fails.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let database_url: String = path.as_ref().to_string_lossy().into_owned();
        let mut conn: SqliteConnection = sqlite::initialize_database(&database_url)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;
        info!("Opened file-based SQLite store at {database_url}");
        Ok(Self { conn })
    }
}

impl RecordStore for SqliteStore {
    fn get_event(&mut self, event_id: &EventId) -> Result<Option<Versioned<Event>>, StoreError> {
        events::get_event_sqlite(&mut self.conn, event_id.as_str())
    }

    fn list_events(&mut self) -> Result<Vec<Versioned<Event>>, StoreError> {
        events::list_events_sqlite(&mut self.conn)
    }

    fn get_registration(
        &mut self,
        registration_id: &RegistrationId,
    ) -> Result<Option<Versioned<Registration>>, StoreError> {
        registrations::get_registration_sqlite(&mut self.conn, registration_id.as_str())
    }

    fn registrations_for_event(
        &mut self,
        event_id: &EventId,
    ) -> Result<Vec<Versioned<Registration>>, StoreError> {
        registrations::registrations_for_event_sqlite(&mut self.conn, event_id.as_str())
    }

    fn registrations_for_player(
        &mut self,
        event_id: &EventId,
        player_id: &UserId,
    ) -> Result<Vec<Versioned<Registration>>, StoreError> {
        registrations::registrations_for_player_sqlite(
            &mut self.conn,
            event_id.as_str(),
            player_id.as_str(),
        )
    }

    fn registrations_with_secondary(
        &mut self,
        event_id: &EventId,
        player2_id: &UserId,
    ) -> Result<Vec<Versioned<Registration>>, StoreError> {
        registrations::registrations_with_secondary_sqlite(
            &mut self.conn,
            event_id.as_str(),
            player2_id.as_str(),
        )
    }

    fn waitlisted_registrations(
        &mut self,
        event_id: &EventId,
    ) -> Result<Vec<Versioned<Registration>>, StoreError> {
        registrations::waitlisted_registrations_sqlite(&mut self.conn, event_id.as_str())
    }

    fn get_team(&mut self, team_id: &TeamId) -> Result<Option<Versioned<Team>>, StoreError> {
        teams::get_team_sqlite(&mut self.conn, team_id.as_str())
    }

    fn teams_for_event(
        &mut self,
        event_id: &EventId,
    ) -> Result<Vec<Versioned<Team>>, StoreError> {
        teams::teams_for_event_sqlite(&mut self.conn, event_id.as_str())
    }

    fn teams_for_user(
        &mut self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> Result<Vec<Versioned<Team>>, StoreError> {
        teams::teams_for_user_sqlite(&mut self.conn, event_id.as_str(), user_id.as_str())
    }

    fn get_notification(
        &mut self,
        notification_id: &NotificationId,
    ) -> Result<Option<Versioned<Notification>>, StoreError> {
        notifications::get_notification_sqlite(&mut self.conn, notification_id.as_str())
    }

    fn notifications_for_user(
        &mut self,
        user_id: &UserId,
    ) -> Result<Vec<Versioned<Notification>>, StoreError> {
        notifications::notifications_for_user_sqlite(&mut self.conn, user_id.as_str())
    }

    fn commit(
        &mut self,
        plan: &TransitionPlan,
        appended: &[Notification],
    ) -> Result<(), StoreError> {
        commit_plan_sqlite(&mut self.conn, plan, appended)
    }
}
