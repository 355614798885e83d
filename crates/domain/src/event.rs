// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::ids::{EventId, UserId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// How one unit of event capacity is occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EventMode {
    /// Each seat holds one individual player.
    #[default]
    Players,
    /// Each seat holds one confirmed pair.
    Teams,
}

impl EventMode {
    /// Converts this mode to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Players => "Players",
            Self::Teams => "Teams",
        }
    }

    /// Returns whether this mode supports partner pairing.
    #[must_use]
    pub const fn supports_pairing(&self) -> bool {
        matches!(self, Self::Teams)
    }
}

impl FromStr for EventMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Players" => Ok(Self::Players),
            "Teams" => Ok(Self::Teams),
            _ => Err(DomainError::InvalidEventMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One session with fixed capacity and denormalized occupancy counters.
///
/// `registrations_count` and `waitlist_count` must always equal the number
/// of seat records in the corresponding status for this event. The pairing
/// engine is the only writer permitted to mutate them; it does so only
/// inside the same atomic commit that moves the seat records themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// The event identifier.
    pub event_id: EventId,
    /// The organizer who created the event.
    pub organizer_id: UserId,
    /// Display title.
    pub title: String,
    /// Seat occupancy mode.
    pub mode: EventMode,
    /// Fixed capacity in seats (individuals or pairs, per `mode`).
    pub slots_available: u32,
    /// Number of CONFIRMED seats. Denormalized; engine-maintained.
    pub registrations_count: u32,
    /// Number of WAITLIST seats. Denormalized; engine-maintained.
    pub waitlist_count: u32,
    /// Scheduled start of the session.
    #[serde(with = "time::serde::iso8601")]
    pub starts_at: OffsetDateTime,
    /// Creation timestamp.
    #[serde(with = "time::serde::iso8601")]
    pub created_at: OffsetDateTime,
}

impl Event {
    /// Returns whether at least one confirmed seat is still open.
    #[must_use]
    pub const fn has_open_slot(&self) -> bool {
        self.registrations_count < self.slots_available
    }
}
