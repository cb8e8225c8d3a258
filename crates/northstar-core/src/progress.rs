//! Display percentage for a goal.
//!
//! Finance goals are a money ratio clamped to `[0, 100]`. Consistency goals
//! count check-ins against 365 days and by default are not clamped, so a
//! goal checked in more than 365 times reads above 100%. Consumers must
//! treat that as a valid value.

use serde::{Deserialize, Serialize};

use crate::goal::{Goal, GoalPlan, CONSISTENCY_TARGET};

/// How consistency percentages are bounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressPolicy {
    /// Clamp body/mind/custom percentages to 100 like finance.
    pub clamp_consistency: bool,
}

/// Completion percentage for `goal` under `policy`.
pub fn project_percent(goal: &Goal, policy: ProgressPolicy) -> f64 {
    match goal.plan {
        GoalPlan::Finance => {
            if goal.target_value > 0.0 {
                (goal.current_value / goal.target_value * 100.0).clamp(0.0, 100.0)
            } else {
                0.0
            }
        }
        GoalPlan::Body { .. } | GoalPlan::Mind { .. } | GoalPlan::Custom { .. } => {
            let percent = goal.current_value / CONSISTENCY_TARGET * 100.0;
            if policy.clamp_consistency {
                percent.clamp(0.0, 100.0)
            } else {
                percent
            }
        }
        GoalPlan::Unknown { .. } => 0.0,
    }
}
