// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side store operations.
//!
//! The only mutation entry point is the plan commit: every roster change
//! arrives as a [`courtmate::TransitionPlan`] and is applied inside one
//! database transaction, guarded by the plan's pinned versions.

pub mod commit;
