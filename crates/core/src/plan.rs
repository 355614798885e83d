// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtmate_domain::{
    Event, EventId, NotificationId, Registration, RegistrationId, Team, TeamId, UserId, Version,
};

/// A typed reference to one stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordRef {
    /// An event record.
    Event(EventId),
    /// A registration record.
    Registration(RegistrationId),
    /// A team record.
    Team(TeamId),
    /// A notification record.
    Notification(NotificationId),
}

/// One member of a plan's read set.
///
/// `expected_version: None` asserts the record does not exist; `Some(v)`
/// asserts the stored version still equals `v`. A commit whose guards no
/// longer hold is rejected wholesale by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordGuard {
    /// The guarded record.
    pub record: RecordRef,
    /// The version the record must still be at, or `None` for absent.
    pub expected_version: Option<Version>,
}

impl RecordGuard {
    /// Guards that a record is still at the version it was read at.
    #[must_use]
    pub const fn present(record: RecordRef, version: Version) -> Self {
        Self {
            record,
            expected_version: Some(version),
        }
    }

    /// Guards that a record does not exist.
    #[must_use]
    pub const fn absent(record: RecordRef) -> Self {
        Self {
            record,
            expected_version: None,
        }
    }
}

/// One write in a plan's write set.
///
/// `Put` writes create or fully replace a record; deletes remove it. The
/// store assigns version 1 to created records and bumps the version of
/// replaced ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordWrite {
    /// Create or replace an event record.
    PutEvent(Event),
    /// Create or replace a registration record.
    PutRegistration(Registration),
    /// Create or replace a team record.
    PutTeam(Team),
    /// Delete a registration record.
    DeleteRegistration(RegistrationId),
    /// Delete a team record.
    DeleteTeam(TeamId),
    /// Mark a notification record read.
    MarkNotificationRead(NotificationId),
}

/// A notification the transition must emit, described by content rather
/// than as a finished record.
///
/// Plans stay free of identifier minting and clocks; the orchestration
/// layer materializes each intent into a notification record and appends it
/// to the same commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationIntent {
    /// Tell `recipient` they were invited by `inviter`.
    InviteReceived {
        /// The acceptance target.
        recipient: UserId,
        /// The inviting party.
        inviter: UserId,
        /// The pending team awaiting acceptance.
        team_id: TeamId,
    },
    /// Tell `recipient` that `acceptor` accepted their invite.
    InviteAccepted {
        /// The party that was waiting on acceptance.
        recipient: UserId,
        /// The accepting party.
        acceptor: UserId,
        /// The completed team.
        team_id: TeamId,
    },
    /// Tell `recipient` that `decliner` declined their invite.
    InviteDeclined {
        /// The inviting party.
        recipient: UserId,
        /// The declining party.
        decliner: UserId,
    },
    /// Tell `recipient` that `inviter` withdrew the invite.
    InviteCancelled {
        /// The invited party.
        recipient: UserId,
        /// The inviting party.
        inviter: UserId,
    },
    /// Tell `recipient` that `leaver` left their seated team.
    PartnerLeft {
        /// The surviving party.
        recipient: UserId,
        /// The departing party.
        leaver: UserId,
    },
    /// Tell `recipient` that `withdrawer` withdrew their shared seat.
    TeamWithdrawn {
        /// The other seat holder.
        recipient: UserId,
        /// The withdrawing party.
        withdrawer: UserId,
    },
    /// Tell `recipient` that `partner` joined another team, dissolving a
    /// pending pairing between them.
    PartnerPairedElsewhere {
        /// The party left behind.
        recipient: UserId,
        /// The party that paired elsewhere.
        partner: UserId,
    },
    /// Tell `recipient` their seat was promoted off the waitlist.
    WaitlistPromoted {
        /// The promoted seat holder.
        recipient: UserId,
        /// The promoted team, when the seat is a pair.
        team_id: Option<TeamId>,
    },
}

/// The atomic unit a transition resolves to.
///
/// Guards pin every record whose value the plan depends on; writes are the
/// full effect. Either everything commits or nothing does — counter updates
/// and status updates never observe each other half-applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransitionPlan {
    /// The read set: versions that must still hold at commit time.
    pub guards: Vec<RecordGuard>,
    /// The write set, applied only if every guard holds.
    pub writes: Vec<RecordWrite>,
    /// Notifications to materialize and append to the same commit.
    pub intents: Vec<NotificationIntent>,
}

impl TransitionPlan {
    /// Creates an empty plan.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            guards: Vec::new(),
            writes: Vec::new(),
            intents: Vec::new(),
        }
    }

    /// Adds a guard to the read set.
    pub fn guard(&mut self, guard: RecordGuard) {
        self.guards.push(guard);
    }

    /// Adds a write to the write set.
    pub fn write(&mut self, write: RecordWrite) {
        self.writes.push(write);
    }

    /// Adds a notification intent.
    pub fn notify(&mut self, intent: NotificationIntent) {
        self.intents.push(intent);
    }
}
