//! Direct appointment index.
//!
//! Hash map from id to appointment for O(1) point operations. Like the
//! ordered index, contents are copies of the store as of the last reload;
//! `update` and `remove` touch the in-memory copy only, never the store.

use std::collections::HashMap;

use crate::models::{Appointment, AppointmentId, AppointmentUpdate};

/// Hash index over appointments, keyed by id.
#[derive(Debug, Default)]
pub struct AppointmentTable {
    map: HashMap<AppointmentId, Appointment>,
    // std HashMap iterates in arbitrary order; the load order is recorded so
    // iteration reproduces the last reload's insertion order.
    load_order: Vec<AppointmentId>,
}

impl AppointmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. A repeated id replaces the held copy and keeps its
    /// original position in the load order.
    pub fn insert(&mut self, record: Appointment) {
        let id = record.id;
        if self.map.insert(id, record).is_none() {
            self.load_order.push(id);
        }
    }

    /// Point lookup by id.
    pub fn get(&self, id: AppointmentId) -> Option<&Appointment> {
        self.map.get(&id)
    }

    /// All held records, in the insertion order of the last full reload.
    pub fn iter(&self) -> impl Iterator<Item = &Appointment> {
        self.load_order.iter().filter_map(|id| self.map.get(id))
    }

    /// Merge partial fields into the held copy, if the id is present.
    /// Returns whether it was.
    ///
    /// In-memory only: callers that want the change persisted must write the
    /// store separately and then trigger a reload.
    pub fn update(&mut self, id: AppointmentId, update: &AppointmentUpdate) -> bool {
        match self.map.get_mut(&id) {
            Some(record) => {
                update.apply_to(record);
                true
            }
            None => false,
        }
    }

    /// Drop the held copy, if the id is present. Returns whether it was.
    /// Same no-write-through caveat as [`AppointmentTable::update`].
    pub fn remove(&mut self, id: AppointmentId) -> bool {
        if self.map.remove(&id).is_some() {
            self.load_order.retain(|&held| held != id);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
