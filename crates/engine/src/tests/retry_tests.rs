// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::EngineError;
use crate::ops::{RETRY_LIMIT, register};
use crate::request_response::RegisterRequest;
use crate::tests::{FlakyStore, make_event, new_store};
use courtmate_domain::EventId;
use courtmate_persistence::RecordStore;

fn flaky_store_with_event(failures: u32) -> (FlakyStore, EventId) {
    let mut inner = new_store();
    let event_id = make_event(&mut inner, "Players", 2);
    (FlakyStore { inner, failures }, event_id)
}

#[test]
fn test_transient_conflicts_are_retried_to_success() {
    let (mut store, event_id) = flaky_store_with_event(RETRY_LIMIT - 1);

    let response = register(
        &mut store,
        &RegisterRequest {
            user_id: String::from("xavier"),
            event_id: event_id.as_str().to_string(),
            looking_for_partner: false,
        },
    )
    .unwrap();

    assert_eq!(response.status, "Confirmed");
    let event = store.get_event(&event_id).unwrap().unwrap();
    assert_eq!(event.record.registrations_count, 1);
}

#[test]
fn test_persistent_conflicts_exhaust_the_retry_limit() {
    let (mut store, event_id) = flaky_store_with_event(RETRY_LIMIT + 1);

    let result = register(
        &mut store,
        &RegisterRequest {
            user_id: String::from("xavier"),
            event_id: event_id.as_str().to_string(),
            looking_for_partner: false,
        },
    );

    assert_eq!(
        result,
        Err(EngineError::ConflictRetriesExhausted {
            attempts: RETRY_LIMIT
        })
    );

    // The conflicted attempts left no partial state behind.
    let event = store.get_event(&event_id).unwrap().unwrap();
    assert_eq!(event.record.registrations_count, 0);
}

#[test]
fn test_conflict_error_reads_as_try_again() {
    let err = EngineError::ConflictRetriesExhausted { attempts: 5 };
    assert!(err.to_string().contains("try again"));
}
