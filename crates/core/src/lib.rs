// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure pairing and roster-transition logic.
//!
//! This crate never performs I/O. Callers prefetch record snapshots, ask
//! `classify` which transition applies, and receive a [`TransitionPlan`]:
//! the exact set of version guards and record writes that must commit
//! atomically for the transition to be valid. Executing plans (and retrying
//! them when the guard set conflicts) is the orchestration layer's job.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod accept;
mod classify;
mod dissolve;
mod error;
mod invite;
mod plan;
mod register;
mod seats;
mod withdraw;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use accept::{AcceptContext, AcceptOutcome, OrphanedInvite, plan_accept_invite};
pub use classify::{InviteMode, InviteProbe, SecondarySlot, classify_invite};
pub use dissolve::{DissolveAction, DissolveContext, plan_dissolve};
pub use error::CoreError;
pub use invite::{InviteIds, plan_send_invite};
pub use plan::{NotificationIntent, RecordGuard, RecordRef, RecordWrite, TransitionPlan};
pub use register::{RegisterContext, plan_register};
pub use seats::{SeatAssignment, assign_seat, first_in_line};
pub use withdraw::{WaitlistHead, WithdrawContext, plan_withdraw};
