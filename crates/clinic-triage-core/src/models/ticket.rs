//! Live-queue ticket model.

use serde::{Deserialize, Serialize};

/// Position in the admission sequence of one [`crate::index::TriageQueue`].
///
/// Local to the queue instance that minted it and unrelated to
/// [`crate::models::AppointmentId`]; the two numbering spaces must never be
/// cross-referenced.
pub type TicketNumber = u64;

/// Lightweight entry minted per admission. Lives only in the queue and is
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueTicket {
    /// Admission sequence number (1-based)
    pub number: TicketNumber,
    /// Patient name as given at admission
    pub name: String,
}
