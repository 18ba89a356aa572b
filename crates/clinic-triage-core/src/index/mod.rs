//! In-memory index layer.
//!
//! Three independent structures serve all lookup, ordering, and triage
//! logic: an ordered tree index and a direct hash index rebuilt wholesale
//! from the store (see [`IndexSnapshot`] for the reload contract), and a
//! live [`TriageQueue`] fed directly by admissions and never persisted.

mod snapshot;
mod table;
mod tree;
mod triage;

pub use snapshot::IndexSnapshot;
pub use table::AppointmentTable;
pub use tree::{AppointmentTree, Inorder};
pub use triage::{QueueStatus, TriageQueue};
