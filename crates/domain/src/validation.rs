// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::event::Event;

/// Maximum accepted event title length.
const MAX_TITLE_LEN: usize = 200;

/// Validates an event's basic field constraints.
///
/// This checks field shape only. Occupancy consistency is the engine's
/// responsibility and requires the seat records for context.
///
/// # Errors
///
/// Returns an error if:
/// - The title is empty or longer than 200 characters
/// - The slot count is zero
pub fn validate_event_fields(event: &Event) -> Result<(), DomainError> {
    if event.title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }
    if event.title.len() > MAX_TITLE_LEN {
        return Err(DomainError::InvalidTitle(format!(
            "Title cannot exceed {MAX_TITLE_LEN} characters"
        )));
    }
    validate_slot_count(event.slots_available)?;
    Ok(())
}

/// Validates that an event capacity is at least one seat.
///
/// # Errors
///
/// Returns `DomainError::InvalidSlotCount` if the count is zero.
pub const fn validate_slot_count(slots: u32) -> Result<(), DomainError> {
    if slots == 0 {
        return Err(DomainError::InvalidSlotCount(slots));
    }
    Ok(())
}

/// Validates that a user identifier is non-empty.
///
/// Identities are issued upstream; this only rejects the degenerate empty
/// string that would otherwise alias every absent-partner comparison.
///
/// # Errors
///
/// Returns `DomainError::InvalidUserId` if the id is empty or whitespace.
pub fn validate_user_id(user_id: &str) -> Result<(), DomainError> {
    if user_id.trim().is_empty() {
        return Err(DomainError::InvalidUserId(String::from(
            "User id cannot be empty",
        )));
    }
    Ok(())
}
