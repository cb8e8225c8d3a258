use chrono::{DateTime, Utc};

use crate::checkin::ProgressUpdate;
use crate::error::Result;
use crate::goal::{Goal, GoalDraft};

use super::Database;

/// Persistence collaborator for goals.
///
/// The engine only ever writes `current_value` and `last_completed_at`
/// after creation; a store must write the pair atomically.
pub trait GoalStore {
    /// The goal owned by `user_id`, or `None` before onboarding.
    fn fetch_goal(&self, user_id: &str) -> Result<Option<Goal>>;

    /// Persist a validated goal and return it with its assigned id.
    fn insert_goal(&self, user_id: &str, draft: &GoalDraft, now: DateTime<Utc>) -> Result<Goal>;

    /// Store the progress pair of an accepted check-in.
    fn update_progress(&self, update: &ProgressUpdate) -> Result<()>;
}

impl GoalStore for Database {
    fn fetch_goal(&self, user_id: &str) -> Result<Option<Goal>> {
        self.goal_for_user(user_id)
    }

    fn insert_goal(&self, user_id: &str, draft: &GoalDraft, now: DateTime<Utc>) -> Result<Goal> {
        Database::insert_goal(self, user_id, draft, now)
    }

    fn update_progress(&self, update: &ProgressUpdate) -> Result<()> {
        self.update_goal_progress(update)
    }
}

impl<S: GoalStore + ?Sized> GoalStore for &S {
    fn fetch_goal(&self, user_id: &str) -> Result<Option<Goal>> {
        (**self).fetch_goal(user_id)
    }

    fn insert_goal(&self, user_id: &str, draft: &GoalDraft, now: DateTime<Utc>) -> Result<Goal> {
        (**self).insert_goal(user_id, draft, now)
    }

    fn update_progress(&self, update: &ProgressUpdate) -> Result<()> {
        (**self).update_progress(update)
    }
}
