// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Store adapters.
//!
//! [`RecordStore`] is the capability the pairing engine consumes: point
//! reads, field-equality queries, and the guarded transactional commit.
//! Each adapter dispatches to the monomorphic backend functions generated
//! by `backend_fn!`.

mod mysql;
mod sqlite;

pub use mysql::MysqlStore;
pub use sqlite::SqliteStore;

use crate::error::StoreError;
use courtmate::TransitionPlan;
use courtmate_domain::{
    Event, EventId, NotificationId, Registration, RegistrationId, Team, TeamId, UserId, Versioned,
};
use courtmate_notify::Notification;

/// The record-store capability consumed by the pairing engine.
///
/// Reads are ordinary and non-transactional; every returned value carries
/// the version it was read at, and any decision built on it must be pinned
/// via plan guards and re-checked by [`RecordStore::commit`].
pub trait RecordStore {
    /// Point-reads one event.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_event(&mut self, event_id: &EventId) -> Result<Option<Versioned<Event>>, StoreError>;

    /// Lists all events ordered by start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_events(&mut self) -> Result<Vec<Versioned<Event>>, StoreError>;

    /// Point-reads one registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_registration(
        &mut self,
        registration_id: &RegistrationId,
    ) -> Result<Option<Versioned<Registration>>, StoreError>;

    /// Lists all live registrations for an event, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn registrations_for_event(
        &mut self,
        event_id: &EventId,
    ) -> Result<Vec<Versioned<Registration>>, StoreError>;

    /// Lists a user's live registrations as primary holder for an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn registrations_for_player(
        &mut self,
        event_id: &EventId,
        player_id: &UserId,
    ) -> Result<Vec<Versioned<Registration>>, StoreError>;

    /// Lists live registrations carrying a user as attached secondary.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn registrations_with_secondary(
        &mut self,
        event_id: &EventId,
        player2_id: &UserId,
    ) -> Result<Vec<Versioned<Registration>>, StoreError>;

    /// Lists an event's waitlisted registrations in FIFO order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn waitlisted_registrations(
        &mut self,
        event_id: &EventId,
    ) -> Result<Vec<Versioned<Registration>>, StoreError>;

    /// Point-reads one team.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_team(&mut self, team_id: &TeamId) -> Result<Option<Versioned<Team>>, StoreError>;

    /// Lists all teams for an event, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn teams_for_event(&mut self, event_id: &EventId)
    -> Result<Vec<Versioned<Team>>, StoreError>;

    /// Lists every team where the user is either party, for one event.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn teams_for_user(
        &mut self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> Result<Vec<Versioned<Team>>, StoreError>;

    /// Point-reads one notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_notification(
        &mut self,
        notification_id: &NotificationId,
    ) -> Result<Option<Versioned<Notification>>, StoreError>;

    /// Lists a user's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn notifications_for_user(
        &mut self,
        user_id: &UserId,
    ) -> Result<Vec<Versioned<Notification>>, StoreError>;

    /// Atomically applies a transition plan plus its notification records.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if any plan guard no longer holds;
    /// nothing is applied in that case.
    fn commit(
        &mut self,
        plan: &TransitionPlan,
        appended: &[Notification],
    ) -> Result<(), StoreError>;
}
