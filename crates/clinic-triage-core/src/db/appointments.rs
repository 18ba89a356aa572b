//! Appointment CRUD operations.

use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{Database, DbResult};
use crate::models::{Appointment, AppointmentId, NewAppointment};

/// Map one store row onto an [`Appointment`].
///
/// Rows are read positionally in schema order. Rows written before the
/// `is_emergency` column existed carry only seven fields; those load with
/// the flag cleared rather than failing the whole fetch.
fn appointment_from_row(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    let is_emergency = row.get::<_, i64>(7).map(|flag| flag != 0).unwrap_or(false);
    Ok(Appointment {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        gender: row.get(3)?,
        location: row.get(4)?,
        scheduled_time: row.get(5)?,
        phone: row.get(6)?,
        is_emergency,
    })
}

impl Database {
    /// Insert a new appointment, returning the store-assigned id.
    pub fn insert_appointment(&self, appointment: &NewAppointment) -> DbResult<AppointmentId> {
        self.conn.execute(
            r#"
            INSERT INTO appointments (
                name, age, gender, location, scheduled_time, phone, is_emergency
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                appointment.name,
                appointment.age,
                appointment.gender,
                appointment.location,
                appointment.scheduled_time,
                appointment.phone,
                appointment.is_emergency as i64,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, name = %appointment.name, "inserted appointment");
        Ok(id)
    }

    /// Fetch every appointment in storage (rowid) order.
    pub fn fetch_appointments(&self) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare("SELECT * FROM appointments")?;
        let rows = stmt.query_map([], appointment_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Fetch an appointment by id.
    pub fn fetch_appointment(&self, id: AppointmentId) -> DbResult<Option<Appointment>> {
        self.conn
            .query_row(
                "SELECT * FROM appointments WHERE id = ?",
                [id],
                appointment_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Update an existing appointment in full. Returns whether the row
    /// existed.
    ///
    /// In-memory indexes do not see this write until their next reload.
    pub fn update_appointment(&self, appointment: &Appointment) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE appointments SET
                name = ?2,
                age = ?3,
                gender = ?4,
                location = ?5,
                scheduled_time = ?6,
                phone = ?7,
                is_emergency = ?8
            WHERE id = ?1
            "#,
            params![
                appointment.id,
                appointment.name,
                appointment.age,
                appointment.gender,
                appointment.location,
                appointment.scheduled_time,
                appointment.phone,
                appointment.is_emergency as i64,
            ],
        )?;
        let updated = rows_affected > 0;
        debug!(id = appointment.id, updated, "updated appointment");
        Ok(updated)
    }

    /// Delete an appointment. Returns whether the row existed.
    ///
    /// Same reload caveat as [`Database::update_appointment`].
    pub fn delete_appointment(&self, id: AppointmentId) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM appointments WHERE id = ?", [id])?;
        let deleted = rows_affected > 0;
        debug!(id, deleted, "deleted appointment");
        Ok(deleted)
    }

    /// Search appointments by name (substring match).
    pub fn search_appointments_by_name(&self, term: &str) -> DbResult<Vec<Appointment>> {
        let pattern = format!("%{}%", term);
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM appointments WHERE name LIKE ?")?;
        let rows = stmt.query_map([pattern], appointment_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
