// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::MysqlConnection;

use crate::backend::mysql;
use crate::error::StoreError;
use crate::mutations::commit::commit_plan_mysql;
use crate::queries::{events, notifications, registrations, teams};
use crate::store::RecordStore;
use courtmate::TransitionPlan;
use courtmate_domain::{
    Event, EventId, NotificationId, Registration, RegistrationId, Team, TeamId, UserId, Versioned,
};
use courtmate_notify::Notification;

/// MySQL/MariaDB-backed record store.
///
/// Exists for explicit, opt-in backend validation (`cargo xtask
/// test-mariadb`); `SQLite` remains the default everywhere else.
pub struct MysqlStore {
    conn: MysqlConnection,
}

impl MysqlStore {
    /// Connects to the given `MySQL` database URL and runs migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if connection, migration, or the foreign-key
    /// startup check fails.
    pub fn new_with_url(database_url: &str) -> Result<Self, StoreError> {
        let mut conn: MysqlConnection = mysql::initialize_database(database_url)?;
        mysql::verify_foreign_key_enforcement(&mut conn)?;
        Ok(Self { conn })
    }
}

impl RecordStore for MysqlStore {
    fn get_event(&mut self, event_id: &EventId) -> Result<Option<Versioned<Event>>, StoreError> {
        events::get_event_mysql(&mut self.conn, event_id.as_str())
    }

    fn list_events(&mut self) -> Result<Vec<Versioned<Event>>, StoreError> {
        events::list_events_mysql(&mut self.conn)
    }

    fn get_registration(
        &mut self,
        registration_id: &RegistrationId,
    ) -> Result<Option<Versioned<Registration>>, StoreError> {
        registrations::get_registration_mysql(&mut self.conn, registration_id.as_str())
    }

    fn registrations_for_event(
        &mut self,
        event_id: &EventId,
    ) -> Result<Vec<Versioned<Registration>>, StoreError> {
        registrations::registrations_for_event_mysql(&mut self.conn, event_id.as_str())
    }

    fn registrations_for_player(
        &mut self,
        event_id: &EventId,
        player_id: &UserId,
    ) -> Result<Vec<Versioned<Registration>>, StoreError> {
        registrations::registrations_for_player_mysql(
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
        registrations::registrations_with_secondary_mysql(
            &mut self.conn,
            event_id.as_str(),
            player2_id.as_str(),
        )
    }

    fn waitlisted_registrations(
        &mut self,
        event_id: &EventId,
    ) -> Result<Vec<Versioned<Registration>>, StoreError> {
        registrations::waitlisted_registrations_mysql(&mut self.conn, event_id.as_str())
    }

    fn get_team(&mut self, team_id: &TeamId) -> Result<Option<Versioned<Team>>, StoreError> {
        teams::get_team_mysql(&mut self.conn, team_id.as_str())
    }

    fn teams_for_event(
        &mut self,
        event_id: &EventId,
    ) -> Result<Vec<Versioned<Team>>, StoreError> {
        teams::teams_for_event_mysql(&mut self.conn, event_id.as_str())
    }

    fn teams_for_user(
        &mut self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> Result<Vec<Versioned<Team>>, StoreError> {
        teams::teams_for_user_mysql(&mut self.conn, event_id.as_str(), user_id.as_str())
    }

    fn get_notification(
        &mut self,
        notification_id: &NotificationId,
    ) -> Result<Option<Versioned<Notification>>, StoreError> {
        notifications::get_notification_mysql(&mut self.conn, notification_id.as_str())
    }

    fn notifications_for_user(
        &mut self,
        user_id: &UserId,
    ) -> Result<Vec<Versioned<Notification>>, StoreError> {
        notifications::notifications_for_user_mysql(&mut self.conn, user_id.as_str())
    }

    fn commit(
        &mut self,
        plan: &TransitionPlan,
        appended: &[Notification],
    ) -> Result<(), StoreError> {
        commit_plan_mysql(&mut self.conn, plan, appended)
    }
}
