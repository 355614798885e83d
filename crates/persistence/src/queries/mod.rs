// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side store operations.
//!
//! All functions here are backend-agnostic Diesel DSL, monomorphized per
//! backend by the `backend_fn!` macro. Reads performed through this module
//! are ordinary non-transactional reads: the versions they return are
//! advisory and must be re-checked by the commit path.

pub mod events;
pub mod notifications;
pub mod registrations;
pub mod teams;
