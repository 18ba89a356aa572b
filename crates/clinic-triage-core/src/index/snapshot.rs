//! Snapshot coordinator for the in-memory indexes.
//!
//! Both indexes are rebuilt wholesale from one store fetch; there is no
//! incremental propagation from writes. A caller that mutates the store and
//! needs the indexes to agree must reload explicitly; until then they keep
//! serving the previous snapshot.

use tracing::{debug, warn};

use super::table::AppointmentTable;
use super::tree::{AppointmentTree, Inorder};
use crate::db::{Database, DbResult};
use crate::models::{Appointment, AppointmentId};

/// Paired ordered + direct indexes over one appointment snapshot.
#[derive(Debug, Default)]
pub struct IndexSnapshot {
    tree: AppointmentTree,
    table: AppointmentTable,
}

impl IndexSnapshot {
    /// An empty snapshot, serving nothing until the first load.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a fresh snapshot from every row in the store, in fetch order.
    ///
    /// Fetch order is storage order, so ids arrive ascending and the tree
    /// takes its expected degenerate shape.
    pub fn load(db: &Database) -> DbResult<Self> {
        let rows = db.fetch_appointments()?;
        let mut tree = AppointmentTree::new();
        let mut table = AppointmentTable::new();
        for record in rows {
            tree.insert(record.clone());
            table.insert(record);
        }
        debug!(count = table.len(), "rebuilt appointment indexes");
        Ok(Self { tree, table })
    }

    /// Replace this snapshot with a freshly loaded one.
    ///
    /// The new pair is built before anything is replaced, so a store failure
    /// leaves the current snapshot fully intact and still serving.
    pub fn reload(&mut self, db: &Database) -> DbResult<()> {
        match Self::load(db) {
            Ok(fresh) => {
                *self = fresh;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "index reload failed; keeping previous snapshot");
                Err(e)
            }
        }
    }

    /// Point search through the ordered index.
    pub fn find(&self, id: AppointmentId) -> Option<&Appointment> {
        self.tree.get(id)
    }

    /// All records in ascending id order.
    pub fn by_id(&self) -> Inorder<'_> {
        self.tree.iter()
    }

    /// All records in the load's insertion order.
    pub fn in_load_order(&self) -> impl Iterator<Item = &Appointment> {
        self.table.iter()
    }

    pub fn tree(&self) -> &AppointmentTree {
        &self.tree
    }

    pub fn table(&self) -> &AppointmentTable {
        &self.table
    }

    /// Mutable access to the direct index, for in-memory merges and drops.
    pub fn table_mut(&mut self) -> &mut AppointmentTable {
        &mut self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
