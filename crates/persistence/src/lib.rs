// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Versioned record store for the Courtmate pairing engine.
//!
//! Every record (event, registration, team, notification) carries a
//! monotonically increasing `version` column. The store exposes ordinary
//! point reads and field-equality queries, plus one transactional
//! primitive: [`RecordStore::commit`], which re-checks a plan's guard set
//! against the stored versions and applies the write set only if every
//! guard still holds. A failed guard aborts the whole transaction and
//! surfaces [`StoreError::Conflict`], which the orchestration layer treats
//! as "re-read, re-classify, retry".
//!
//! ## Database Backend Support
//!
//! ### Supported Backends
//!
//! - **`SQLite`** (default) — Used for development, unit tests, and
//!   integration tests
//! - **`MariaDB`/`MySQL`** — Validated via explicit opt-in tests
//!
//! `SQLite` support is always available and requires no external
//! infrastructure. `MySQL`/`MariaDB` support is compiled by default (no
//! feature flags) but validated only via explicit opt-in tests:
//!
//! ```bash
//! cargo xtask test-mariadb
//! ```
//!
//! This command starts a `MariaDB` container via `Docker`, runs migrations,
//! executes the backend validation tests marked with `#[ignore]`, and
//! cleans up the container.
//!
//! ### Migration Strategy
//!
//! Due to `SQL` syntax differences between backends, we maintain separate
//! migration directories:
//!
//! - `migrations/` — `SQLite`-specific (default)
//! - `migrations_mysql/` — `MySQL`/`MariaDB`-specific
//!
//! Both produce identical schema semantics but use backend-appropriate
//! syntax. See the `backend` module for details.
//!
//! ## Testing Philosophy
//!
//! - Standard tests (`cargo test`) run against `SQLite` only
//! - Backend validation tests are explicitly marked `#[ignore]`
//! - External database tests never run automatically
//! - All infrastructure is orchestrated by `xtask`, not embedded in tests

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
#![allow(clippy::multiple_crate_versions)]

use std::sync::atomic::AtomicU64;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `SqliteStore::new_in_memory()` receives a
/// unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Macro to generate monomorphic backend-specific query/mutation functions.
///
/// This macro generates two separate functions from a single function body:
/// - One suffixed with `_sqlite` taking `&mut SqliteConnection`
/// - One suffixed with `_mysql` taking `&mut MysqlConnection`
///
/// This approach is required because Diesel's type system requires concrete
/// backend types at compile time and cannot handle generic backend
/// functions.
///
/// # Constraints
///
/// - The macro ONLY duplicates function bodies and substitutes connection
///   types
/// - No logic, branching, or dispatch occurs within the macro
/// - Backend dispatch happens exclusively in the store adapters
/// - The generated functions are completely monomorphic
macro_rules! backend_fn {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident (
            $conn:ident : &mut _
            $(, $param:ident : $param_ty:ty)* $(,)?
        ) -> $ret:ty
        $body:block
    ) => {
        pastey::paste! {
            // Generate SQLite version
            $(#[$meta])*
            $vis fn [<$name _sqlite>] (
                $conn: &mut diesel::SqliteConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body

            // Generate MySQL version
            $(#[$meta])*
            $vis fn [<$name _mysql>] (
                $conn: &mut diesel::MysqlConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body
        }
    };
}

pub mod backend;
mod data_models;
mod diesel_schema;
mod error;
pub mod mutations;
pub mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use error::StoreError;
pub use store::{MysqlStore, RecordStore, SqliteStore};
