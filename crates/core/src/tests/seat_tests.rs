// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::seats::{SeatAssignment, assign_seat, first_in_line};
use crate::tests::helpers::solo_registration;
use courtmate_domain::{Registration, RegistrationStatus, Versioned};
use time::macros::datetime;

#[test]
fn test_assign_grants_seat_while_capacity_remains() {
    assert_eq!(assign_seat(0, 2, 0), SeatAssignment::Confirmed);
    assert_eq!(assign_seat(1, 2, 0), SeatAssignment::Confirmed);
}

#[test]
fn test_assign_waitlists_at_capacity() {
    assert_eq!(
        assign_seat(2, 2, 0),
        SeatAssignment::Waitlisted { position: 1 }
    );
    assert_eq!(
        assign_seat(2, 2, 3),
        SeatAssignment::Waitlisted { position: 4 }
    );
}

#[test]
fn test_assign_waitlists_when_over_capacity() {
    // Capacity can shrink after seats were granted; occupants keep theirs
    // and newcomers queue.
    assert_eq!(
        assign_seat(5, 2, 0),
        SeatAssignment::Waitlisted { position: 1 }
    );
}

fn waitlisted(id: &str, position: Option<u32>, day: u8) -> Versioned<Registration> {
    let mut registration: Versioned<Registration> =
        solo_registration(id, "someone", RegistrationStatus::Waitlist, false);
    registration.record.waitlist_position = position;
    registration.record.created_at = datetime!(2026-06-01 00:00 UTC)
        .replace_day(day)
        .unwrap();
    registration
}

#[test]
fn test_first_in_line_is_fifo_by_position() {
    let entries: Vec<Versioned<Registration>> = vec![
        waitlisted("reg-b", Some(2), 1),
        waitlisted("reg-a", Some(1), 2),
    ];

    let head: &Versioned<Registration> = first_in_line(&entries).unwrap();
    assert_eq!(head.record.registration_id.as_str(), "reg-a");
}

#[test]
fn test_first_in_line_breaks_position_ties_by_creation_time() {
    let entries: Vec<Versioned<Registration>> = vec![
        waitlisted("reg-later", Some(2), 9),
        waitlisted("reg-earlier", Some(2), 3),
    ];

    let head: &Versioned<Registration> = first_in_line(&entries).unwrap();
    assert_eq!(head.record.registration_id.as_str(), "reg-earlier");
}

#[test]
fn test_first_in_line_orders_missing_positions_last() {
    let entries: Vec<Versioned<Registration>> = vec![
        waitlisted("reg-unnumbered", None, 1),
        waitlisted("reg-numbered", Some(5), 9),
    ];

    let head: &Versioned<Registration> = first_in_line(&entries).unwrap();
    assert_eq!(head.record.registration_id.as_str(), "reg-numbered");
}

#[test]
fn test_first_in_line_empty_queue() {
    assert!(first_in_line(&[]).is_none());
}
