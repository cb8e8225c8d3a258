//! SQLite-based goal storage.
//!
//! Provides persistent storage for each user's goal and its progress
//! fields. Timestamps are stored as RFC 3339 text.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use uuid::Uuid;

use super::data_dir;
use super::migrations;
use crate::checkin::ProgressUpdate;
use crate::error::{CoreError, DatabaseError, Result};
use crate::goal::{Goal, GoalDraft, GoalPlan};

const GOAL_COLUMNS: &str = "id, user_id, title, category, focus_area, target_value,
     current_value, custom_action, last_completed_at, created_at";

/// SQLite database holding the goals table.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/northstar/northstar.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("northstar.db");
        Self::open_at(&path)
    }

    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        migrations::migrate(&self.conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    /// The goal owned by `user_id`, if onboarding has happened.
    ///
    /// # Errors
    /// Returns an error if the query fails or the row cannot be decoded.
    pub fn goal_for_user(&self, user_id: &str) -> Result<Option<Goal>> {
        let sql = format!("SELECT {GOAL_COLUMNS} FROM goals WHERE user_id = ?1 LIMIT 1");
        let row = self
            .conn
            .query_row(&sql, params![user_id], GoalRow::from_row)
            .optional()?;
        Ok(row.map(GoalRow::into_goal).transpose()?)
    }

    /// Insert a validated goal for `user_id`.
    ///
    /// # Errors
    /// Returns [`CoreError::GoalExists`] if the user already has a goal, or
    /// a database error if the insert fails.
    pub fn insert_goal(
        &self,
        user_id: &str,
        draft: &GoalDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Goal> {
        let goal = Goal {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: draft.title.clone(),
            plan: draft.plan.clone(),
            target_value: draft.target_value,
            current_value: draft.current_value,
            last_completed_at: None,
            created_at,
        };

        let inserted = self.conn.execute(
            "INSERT INTO goals (id, user_id, title, category, focus_area, target_value,
                                current_value, custom_action, last_completed_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, NULL, ?9)",
            params![
                goal.id,
                goal.user_id,
                goal.title,
                goal.plan.category_str(),
                goal.plan.focus_area(),
                goal.target_value,
                goal.current_value,
                goal.plan.custom_action(),
                goal.created_at.to_rfc3339(),
            ],
        );

        match inserted {
            Ok(_) => Ok(goal),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(CoreError::GoalExists {
                    user_id: user_id.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write both progress fields of an accepted check-in in one statement.
    ///
    /// # Errors
    /// Returns an error if the update fails or no goal has the given id.
    pub fn update_goal_progress(&self, update: &ProgressUpdate) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE goals SET current_value = ?1, last_completed_at = ?2 WHERE id = ?3",
            params![
                update.new_current_value,
                update.new_last_completed_at.to_rfc3339(),
                update.goal_id,
            ],
        )?;
        if changed == 0 {
            let message = format!("no goal with id {}", update.goal_id);
            return Err(DatabaseError::QueryFailed(message).into());
        }
        Ok(())
    }
}

fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Flat column values of one `goals` row.
struct GoalRow {
    id: String,
    user_id: String,
    title: String,
    category: String,
    focus_area: Option<String>,
    target_value: f64,
    current_value: f64,
    custom_action: Option<String>,
    last_completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl GoalRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let last_completed_at = row
            .get::<_, Option<String>>(8)?
            .map(|raw| parse_timestamp(8, &raw))
            .transpose()?;
        let created_at = parse_timestamp(9, &row.get::<_, String>(9)?)?;

        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            category: row.get(3)?,
            focus_area: row.get(4)?,
            target_value: row.get(5)?,
            current_value: row.get(6)?,
            custom_action: row.get(7)?,
            last_completed_at,
            created_at,
        })
    }

    fn into_goal(self) -> Result<Goal, DatabaseError> {
        let plan = GoalPlan::from_columns(&self.category, self.focus_area, self.custom_action)
            .map_err(|e| DatabaseError::CorruptRow {
                table: "goals".to_string(),
                message: format!("goal {}: {e}", self.id),
            })?;

        Ok(Goal {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            plan,
            target_value: self.target_value,
            current_value: self.current_value,
            last_completed_at: self.last_completed_at,
            created_at: self.created_at,
        })
    }
}
