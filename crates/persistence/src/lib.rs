// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Campus Complaints system.
//!
//! This crate implements the [`ComplaintStore`] contract on `SQLite` through
//! Diesel. Complaints live in a single `complaints` table; every lifecycle
//! transition also writes one row to `audit_events`.
//!
//! ## Atomicity
//!
//! `create` and `update` run inside a database transaction: the complaint
//! change and its audit event are committed together or not at all.
//! Concurrent writers to a file database are serialized by `SQLite`; the
//! later commit wins.
//!
//! ## Testing
//!
//! - [`Persistence::new_in_memory`] gives each caller an isolated shared
//!   in-memory database
//! - Migrations are embedded and run on every open

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

use campus_complaints::{ComplaintFilter, ComplaintStore, ComplaintUpdate, StoreError};
use campus_complaints_audit::AuditEvent;
use campus_complaints_domain::{Complaint, ComplaintId, NewComplaint};
use diesel::{Connection, SqliteConnection};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, warn};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use backend::sqlite::MIGRATIONS;
pub use error::PersistenceError;

/// `SQLite`-backed complaint store.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a store backed by a fresh in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// so tests never share state.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_complaints_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a store backed by a `SQLite` database file, creating it if needed.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        info!(path = %path_str, "Opened complaint database");
        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Inserts a complaint and its submission event in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if either insert fails; nothing is written in that case.
    pub fn create_complaint(
        &mut self,
        complaint: &NewComplaint,
        event: &AuditEvent,
    ) -> Result<ComplaintId, PersistenceError> {
        let id: ComplaintId = self.conn.transaction::<_, PersistenceError, _>(|conn| {
            let id: ComplaintId = mutations::insert_complaint(conn, complaint)?;
            mutations::persist_audit_event(conn, &event.clone().for_complaint(id))?;
            Ok(id)
        })?;

        info!(
            complaint_id = %id,
            complaint_type = %complaint.complaint_type,
            assigned_to = %complaint.assigned_to,
            "Complaint created"
        );
        Ok(id)
    }

    /// Loads one complaint.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ComplaintNotFound` if it does not exist.
    pub fn get_complaint(&mut self, id: ComplaintId) -> Result<Complaint, PersistenceError> {
        queries::get_complaint(&mut self.conn, id)
    }

    /// Applies a transition's fields and records its event in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the complaint does not exist or a write fails;
    /// nothing is written in that case.
    pub fn update_complaint(
        &mut self,
        id: ComplaintId,
        update: &ComplaintUpdate,
        event: &AuditEvent,
    ) -> Result<(), PersistenceError> {
        let result: Result<(), PersistenceError> =
            self.conn.transaction::<_, PersistenceError, _>(|conn| {
                mutations::apply_complaint_update(conn, id, update)?;
                mutations::persist_audit_event(conn, &event.clone().for_complaint(id))?;
                Ok(())
            });

        match &result {
            Ok(()) => info!(
                complaint_id = %id,
                status = %update.status,
                action = %event.action.name,
                "Complaint updated"
            ),
            Err(e) => warn!(complaint_id = %id, error = %e, "Complaint update rolled back"),
        }
        result
    }

    /// Lists complaints matching a filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt.
    pub fn list_complaints(
        &mut self,
        filter: &ComplaintFilter,
    ) -> Result<Vec<Complaint>, PersistenceError> {
        queries::query_complaints(&mut self.conn, filter)
    }

    /// Audit events for a complaint, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ComplaintNotFound` if the complaint does not exist.
    pub fn complaint_history(
        &mut self,
        id: ComplaintId,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        if !queries::complaint_exists(&mut self.conn, id)? {
            return Err(PersistenceError::ComplaintNotFound(id));
        }
        queries::get_complaint_history(&mut self.conn, id)
    }
}

impl ComplaintStore for Persistence {
    fn create(
        &mut self,
        complaint: &NewComplaint,
        event: &AuditEvent,
    ) -> Result<ComplaintId, StoreError> {
        Ok(self.create_complaint(complaint, event)?)
    }

    fn get(&mut self, id: ComplaintId) -> Result<Complaint, StoreError> {
        Ok(self.get_complaint(id)?)
    }

    fn update(
        &mut self,
        id: ComplaintId,
        update: &ComplaintUpdate,
        event: &AuditEvent,
    ) -> Result<(), StoreError> {
        Ok(self.update_complaint(id, update, event)?)
    }

    fn query(&mut self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, StoreError> {
        Ok(self.list_complaints(filter)?)
    }

    fn history(&mut self, id: ComplaintId) -> Result<Vec<AuditEvent>, StoreError> {
        Ok(self.complaint_history(id)?)
    }
}
