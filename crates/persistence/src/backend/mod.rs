// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! This module isolates backend-specific initialization, migration,
//! and helper functions that cannot be expressed in backend-agnostic
//! Diesel DSL.
//!
//! ## Backend Support
//!
//! - `sqlite` — `SQLite` backend (default for development and testing)
//! - `mysql` — MySQL/MariaDB backend (validated via opt-in tests)
//!
//! ## Backend-Agnostic Code
//!
//! Most store code should be backend-agnostic and use Diesel DSL.
//! Backend-specific code is limited to:
//!
//! - Connection initialization
//! - Migration execution
//! - Backend-specific configuration (e.g., PRAGMA, engine settings)
//!
//! All record queries and mutations live in `queries/` and `mutations/`
//! modules and must work across all supported backends.

pub mod mysql;
pub mod sqlite;

use diesel::{Connection, MysqlConnection, SqliteConnection};

use crate::error::StoreError;

/// Trait for backend-specific operations.
///
/// This trait provides a unified interface for operations that cannot be
/// expressed in backend-agnostic Diesel DSL.
///
/// This trait is implemented for both `SqliteConnection` and
/// `MysqlConnection`, allowing store adapters to share startup checks
/// while keeping query functions monomorphic.
pub trait StoreBackend: Connection {
    /// Verifies that foreign key enforcement is enabled.
    ///
    /// This is a startup-time check to ensure referential integrity
    /// constraints are enforced by the database backend.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), StoreError>;
}

impl StoreBackend for SqliteConnection {
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), StoreError> {
        sqlite::verify_foreign_key_enforcement(self)
    }
}

impl StoreBackend for MysqlConnection {
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), StoreError> {
        mysql::verify_foreign_key_enforcement(self)
    }
}
