// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtmate_domain::{Registration, Versioned};

/// Where a newly completed seat lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatAssignment {
    /// Capacity remains; the seat is confirmed.
    Confirmed,
    /// Capacity is full; the seat queues at the given FIFO position.
    Waitlisted {
        /// The assigned waitlist ordinal.
        position: u32,
    },
}

/// Assigns a new occupant to a seat or the waitlist.
///
/// This is a pure function of the counters handed to it. Because concurrent
/// releases and promotions move those counters, it must be re-evaluated
/// against freshly read values inside the commit phase, never against a
/// stale prefetch.
#[must_use]
pub const fn assign_seat(
    registrations_count: u32,
    slots_available: u32,
    waitlist_count: u32,
) -> SeatAssignment {
    if registrations_count < slots_available {
        SeatAssignment::Confirmed
    } else {
        SeatAssignment::Waitlisted {
            position: waitlist_count + 1,
        }
    }
}

/// Picks the waitlist entry to promote when a confirmed seat frees up.
///
/// FIFO by `waitlist_position`; ties (and legacy records without a
/// position) break by creation time. Returns `None` when nothing is queued,
/// in which case the freed seat simply decrements `registrations_count`.
#[must_use]
pub fn first_in_line(waitlisted: &[Versioned<Registration>]) -> Option<&Versioned<Registration>> {
    waitlisted.iter().min_by_key(|entry| {
        (
            entry.record.waitlist_position.unwrap_or(u32::MAX),
            entry.record.created_at,
        )
    })
}
