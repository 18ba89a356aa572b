//! SQLite schema definition.

/// Complete database schema for clinic-triage.
///
/// Column order is load-bearing: the row mapper in `appointments.rs` reads
/// positionally, and rows written before the `is_emergency` column existed
/// are still readable (the mapper defaults the missing field to false).
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Appointments
-- ============================================================================

CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    age INTEGER NOT NULL,
    gender TEXT NOT NULL,
    location TEXT NOT NULL,
    scheduled_time TEXT NOT NULL,
    phone TEXT NOT NULL,
    is_emergency INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_appointments_name ON appointments(name);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_column_order() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let columns: Vec<String> = conn
            .prepare("PRAGMA table_info(appointments)")
            .unwrap()
            .query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert_eq!(
            columns,
            vec![
                "id",
                "name",
                "age",
                "gender",
                "location",
                "scheduled_time",
                "phone",
                "is_emergency",
            ]
        );
    }

    #[test]
    fn test_ids_autoincrement() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        for name in ["a", "b", "c"] {
            conn.execute(
                "INSERT INTO appointments (name, age, gender, location, scheduled_time, phone)
                 VALUES (?, 1, 'x', 'x', 'x', 'x')",
                [name],
            )
            .unwrap();
        }

        let ids: Vec<i64> = conn
            .prepare("SELECT id FROM appointments")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert_eq!(ids, vec![1, 2, 3]);
    }
}
