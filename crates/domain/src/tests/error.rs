// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, EventId, TeamId, TeamStatus, UserId};

#[test]
fn test_self_invite_message_names_the_user() {
    let err: DomainError = DomainError::SelfInvite(UserId::new("alice"));
    assert_eq!(err.to_string(), "User alice cannot invite themself");
}

#[test]
fn test_invitee_unavailable_message_names_user_and_event() {
    let err: DomainError = DomainError::InviteeUnavailable {
        user_id: UserId::new("bob"),
        event_id: EventId::new("evt-9"),
    };
    assert_eq!(
        err.to_string(),
        "User bob is already paired for event evt-9"
    );
}

#[test]
fn test_wrong_team_status_message_carries_the_status_found() {
    let err: DomainError = DomainError::WrongTeamStatus {
        team_id: TeamId::new("team-3"),
        found: TeamStatus::Confirmed,
    };
    assert_eq!(err.to_string(), "Team team-3 is in status Confirmed");
}

#[test]
fn test_errors_compare_by_value() {
    let a: DomainError = DomainError::InvalidSlotCount(0);
    let b: DomainError = DomainError::InvalidSlotCount(0);
    assert_eq!(a, b);
}
