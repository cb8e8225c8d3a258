//! Database schema migrations for northstar.
//!
//! Migrations are versioned and applied automatically when opening the database.
//! The `schema_version` table tracks the current migration version.

use rusqlite::{Connection, Result as SqliteResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 2;

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Returns 0 for a fresh database.
pub fn get_schema_version(conn: &Connection) -> SqliteResult<i32> {
    match conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e),
    }
}

fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    tracing::debug!(version, "schema migrated");
    Ok(())
}

/// Migration v1: goals table.
///
/// Category-specific columns stay nullable: `focus_area` is set for
/// body/mind goals and `custom_action` for custom goals.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS goals (
            id                TEXT PRIMARY KEY,
            user_id           TEXT NOT NULL,
            title             TEXT NOT NULL,
            category          TEXT NOT NULL,
            focus_area        TEXT,
            target_value      REAL NOT NULL DEFAULT 0,
            current_value     REAL NOT NULL DEFAULT 0,
            custom_action     TEXT,
            last_completed_at TEXT,
            created_at        TEXT NOT NULL
        );",
    )?;
    set_schema_version(&tx, 1)?;
    tx.commit()
}

/// Migration v2: one goal per user.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch("CREATE UNIQUE INDEX IF NOT EXISTS idx_goals_user_id ON goals(user_id);")?;
    set_schema_version(&tx, 2)?;
    tx.commit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_reaches_current_version() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn migrate_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn second_goal_for_same_user_violates_index() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        let insert = "INSERT INTO goals (id, user_id, title, category, created_at)
                      VALUES (?1, 'u1', 'Goal', 'custom', '2026-01-01T00:00:00+00:00')";
        conn.execute(insert, ["a"]).unwrap();
        assert!(conn.execute(insert, ["b"]).is_err());
    }
}
