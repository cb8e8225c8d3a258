use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checkin::ProgressUpdate;
use crate::goal::Goal;

/// Every state change in the system produces an Event.
/// Presentation layers react to them (celebration, sound, refresh);
/// the engine itself never does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    GoalCreated {
        goal_id: String,
        user_id: String,
        category: String,
        at: DateTime<Utc>,
    },
    /// Today's mission was stored as done.
    CheckInCompleted {
        goal_id: String,
        increment: f64,
        current_value: f64,
        percent: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn goal_created(goal: &Goal) -> Self {
        Event::GoalCreated {
            goal_id: goal.id.clone(),
            user_id: goal.user_id.clone(),
            category: goal.plan.category_str().to_string(),
            at: goal.created_at,
        }
    }

    pub fn check_in_completed(update: &ProgressUpdate, percent: f64) -> Self {
        Event::CheckInCompleted {
            goal_id: update.goal_id.clone(),
            increment: update.increment,
            current_value: update.new_current_value,
            percent,
            at: update.new_last_completed_at,
        }
    }
}
