// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transaction orchestration boundary for the Courtmate pairing engine.
//!
//! Every public operation runs the same two-phase protocol:
//!
//! 1. **Prefetch** — ordinary reads gather everything needed to classify
//!    the situation (which invite shape applies, who survives a
//!    dissolution, whether a waitlist candidate exists). These reads are
//!    advisory; they only shape which writes will be attempted.
//! 2. **Commit** — the records that will actually be written are re-read
//!    fresh, the classification is re-validated against them, and the
//!    resulting plan (version guards plus writes plus notifications) is
//!    handed to the store's transactional commit.
//!
//! If the store reports that a guarded record moved, the whole cycle is
//! retried from scratch up to a small bounded count, then surfaced as a
//! conflict error distinct from a precondition violation.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod error;
mod ops;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{EngineError, translate_core_error, translate_domain_error};
pub use ops::{
    RETRY_LIMIT, accept_invite, create_event, dissolve_team, register, send_invite, withdraw,
};
pub use request_response::{
    AcceptInviteRequest, AcceptInviteResponse, CreateEventRequest, CreateEventResponse,
    DissolveTeamRequest, DissolveTeamResponse, RegisterRequest, RegisterResponse, RequestError,
    SendInviteRequest, SendInviteResponse, WithdrawRequest, WithdrawResponse,
};
