//! Clinic Triage Core Library
//!
//! Appointment booking, triage, and lookup for a single-clinic desk.
//!
//! # Architecture
//!
//! ```text
//!                    intake form
//!                         │ validate (fail fast)
//!                         ▼
//!              ┌──────────────────────┐
//!              │      ClinicCore      │
//!              └──────────┬───────────┘
//!          write path     │     admission
//!        ┌────────────────┼────────────────┐
//!        ▼                │                ▼
//!   ┌──────────┐          │          ┌────────────┐
//!   │ Database │          │          │ TriageQueue│  (live only,
//!   │ (SQLite) │          │          │ FIFO+prio  │   never persisted)
//!   └────┬─────┘          │          └────────────┘
//!        │ rebuild_indexes(), explicit and caller-triggered
//!        ▼
//!   ┌───────────────────────────────┐
//!   │         IndexSnapshot         │
//!   │  AppointmentTree (by id, BST) │
//!   │  AppointmentTable (hash map)  │
//!   └───────────────────────────────┘
//! ```
//!
//! # Consistency model
//!
//! Writes go straight to the store. The in-memory indexes reflect the store
//! only as of their last explicit rebuild; nothing invalidates them on a
//! write. Callers that need fresh reads after a booking, update, or
//! cancellation must call [`ClinicCore::rebuild_indexes`] themselves.
//!
//! # Modules
//!
//! - [`db`]: SQLite appointment store
//! - [`models`]: domain types and intake validation
//! - [`index`]: tree index, hash index, and triage queue

pub mod db;
pub mod index;
pub mod models;

// Re-export commonly used types
pub use db::Database;
pub use index::{AppointmentTable, AppointmentTree, IndexSnapshot, QueueStatus, TriageQueue};
pub use models::{
    Appointment, AppointmentForm, AppointmentId, AppointmentUpdate, NewAppointment, QueueTicket,
    TicketNumber, ValidationError,
};

use std::path::Path;
use std::sync::Mutex;

use tracing::info;

// =========================================================================
// Top-level Error Type
// =========================================================================

#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    #[error("store error: {0}")]
    Store(#[from] db::DbError),

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("lock poisoned: {0}")]
    Poisoned(String),
}

impl<T> From<std::sync::PoisonError<T>> for ClinicError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicError::Poisoned(e.to_string())
    }
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe front door over the store, the snapshot indexes, and the
/// live triage queue.
///
/// Each piece sits behind its own mutex. Index rebuilds construct the new
/// snapshot before taking the index lock, so concurrent readers never see a
/// half-populated structure; they see the old snapshot right up until the
/// swap.
pub struct ClinicCore {
    db: Mutex<Database>,
    indexes: Mutex<IndexSnapshot>,
    queue: Mutex<TriageQueue>,
}

impl ClinicCore {
    /// Open or create a store at the given path. Indexes start empty until
    /// the first rebuild.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ClinicError> {
        let db = Database::open(path)?;
        Ok(Self {
            db: Mutex::new(db),
            indexes: Mutex::new(IndexSnapshot::empty()),
            queue: Mutex::new(TriageQueue::new()),
        })
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, ClinicError> {
        let db = Database::open_in_memory()?;
        Ok(Self {
            db: Mutex::new(db),
            indexes: Mutex::new(IndexSnapshot::empty()),
            queue: Mutex::new(TriageQueue::new()),
        })
    }

    // =====================================================================
    // Booking
    // =====================================================================

    /// Validate an intake form, persist the appointment, and admit the
    /// patient to the live queue.
    ///
    /// Does not rebuild the indexes; they keep serving the previous
    /// snapshot until [`ClinicCore::rebuild_indexes`] is called.
    pub fn book_appointment(
        &self,
        form: AppointmentForm,
    ) -> Result<(AppointmentId, QueueTicket), ClinicError> {
        let new = form.validate()?;

        let id = self.db.lock()?.insert_appointment(&new)?;
        let ticket = self.queue.lock()?.admit(new.name.clone(), new.is_emergency);

        info!(
            id,
            ticket = ticket.number,
            emergency = new.is_emergency,
            "booked appointment"
        );
        Ok((id, ticket))
    }

    /// Persist a full-row update. Returns whether the row existed. Indexes
    /// stay stale until the next rebuild.
    pub fn update_appointment(&self, appointment: &Appointment) -> Result<bool, ClinicError> {
        Ok(self.db.lock()?.update_appointment(appointment)?)
    }

    /// Delete a stored appointment. Returns whether the row existed.
    /// Indexes stay stale until the next rebuild.
    pub fn cancel_appointment(&self, id: AppointmentId) -> Result<bool, ClinicError> {
        Ok(self.db.lock()?.delete_appointment(id)?)
    }

    // =====================================================================
    // Index Queries
    // =====================================================================

    /// Rebuild both indexes from the store in one pass.
    ///
    /// On failure the previous snapshot stays in place and keeps serving.
    pub fn rebuild_indexes(&self) -> Result<(), ClinicError> {
        let fresh = {
            let db = self.db.lock()?;
            IndexSnapshot::load(&db)?
        };
        *self.indexes.lock()? = fresh;
        Ok(())
    }

    /// Look up an appointment in the current snapshot.
    pub fn find_appointment(&self, id: AppointmentId) -> Result<Option<Appointment>, ClinicError> {
        Ok(self.indexes.lock()?.find(id).cloned())
    }

    /// All snapshot records in ascending id order.
    pub fn appointments_by_id(&self) -> Result<Vec<Appointment>, ClinicError> {
        Ok(self.indexes.lock()?.by_id().cloned().collect())
    }

    /// All snapshot records in the last load's insertion order.
    pub fn appointments_in_load_order(&self) -> Result<Vec<Appointment>, ClinicError> {
        Ok(self.indexes.lock()?.in_load_order().cloned().collect())
    }

    /// Search the store by patient name (substring match). Reads the store
    /// directly, not the snapshot.
    pub fn search_by_name(&self, term: &str) -> Result<Vec<Appointment>, ClinicError> {
        Ok(self.db.lock()?.search_appointments_by_name(term)?)
    }

    // =====================================================================
    // Triage Queue
    // =====================================================================

    /// Call the next patient: emergencies first, then regulars in arrival
    /// order.
    pub fn call_next_patient(&self) -> Result<Option<QueueTicket>, ClinicError> {
        Ok(self.queue.lock()?.call_next())
    }

    /// Snapshot the live queue for display.
    pub fn queue_status(&self) -> Result<QueueStatus, ClinicError> {
        Ok(self.queue.lock()?.status())
    }

    /// Patients currently waiting.
    pub fn queue_len(&self) -> Result<usize, ClinicError> {
        Ok(self.queue.lock()?.len())
    }
}
