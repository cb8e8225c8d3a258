//! Goal model and onboarding payload validation.
//!
//! A user owns exactly one [`Goal`]. Its category-specific parameters live
//! in the [`GoalPlan`] tagged union, so "focus area for body/mind, custom
//! action for custom, nothing for finance" holds by construction. Rows whose
//! stored category is not recognised load as [`GoalPlan::Unknown`] and
//! degrade to fallback text instead of failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::checkin::ProgressUpdate;
use crate::content::MissionContentTable;
use crate::error::ValidationError;

/// Target for consistency goals: one check-in per day for a year.
pub const CONSISTENCY_TARGET: f64 = 365.0;

/// Closed set of goal archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    Finance,
    Body,
    Mind,
    Custom,
}

impl GoalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalCategory::Finance => "finance",
            GoalCategory::Body => "body",
            GoalCategory::Mind => "mind",
            GoalCategory::Custom => "custom",
        }
    }

    /// Human-readable protocol label shown next to the greeting.
    pub fn label(&self) -> &'static str {
        match self {
            GoalCategory::Finance => "Financial protocol",
            GoalCategory::Body => "Bio-hacking active",
            GoalCategory::Mind => "Augmented cognition",
            GoalCategory::Custom => "Custom protocol",
        }
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "finance" => Ok(GoalCategory::Finance),
            "body" => Ok(GoalCategory::Body),
            "mind" => Ok(GoalCategory::Mind),
            "custom" => Ok(GoalCategory::Custom),
            other => Err(ValidationError::InvalidValue {
                field: "category".to_string(),
                message: format!("'{other}' is not one of finance, body, mind, custom"),
            }),
        }
    }
}

/// Category plus the parameters only that category uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum GoalPlan {
    Finance,
    Body { focus_area: String },
    Mind { focus_area: String },
    Custom { custom_action: String },
    /// Stored category string this build does not know.
    Unknown { raw_category: String },
}

impl GoalPlan {
    /// Rebuild a plan from the flat columns of a stored row.
    ///
    /// A missing custom action is kept as empty text and falls back at
    /// mission time.
    ///
    /// # Errors
    /// A body or mind row without a focus area.
    pub fn from_columns(
        category: &str,
        focus_area: Option<String>,
        custom_action: Option<String>,
    ) -> Result<Self, ValidationError> {
        let missing_focus = || ValidationError::MissingField("focus_area".to_string());
        let plan = match category.parse::<GoalCategory>() {
            Ok(GoalCategory::Finance) => GoalPlan::Finance,
            Ok(GoalCategory::Body) => GoalPlan::Body {
                focus_area: focus_area.ok_or_else(missing_focus)?,
            },
            Ok(GoalCategory::Mind) => GoalPlan::Mind {
                focus_area: focus_area.ok_or_else(missing_focus)?,
            },
            Ok(GoalCategory::Custom) => GoalPlan::Custom {
                custom_action: custom_action.unwrap_or_default(),
            },
            Err(_) => GoalPlan::Unknown {
                raw_category: category.to_string(),
            },
        };
        Ok(plan)
    }

    pub fn category(&self) -> Option<GoalCategory> {
        match self {
            GoalPlan::Finance => Some(GoalCategory::Finance),
            GoalPlan::Body { .. } => Some(GoalCategory::Body),
            GoalPlan::Mind { .. } => Some(GoalCategory::Mind),
            GoalPlan::Custom { .. } => Some(GoalCategory::Custom),
            GoalPlan::Unknown { .. } => None,
        }
    }

    /// Category string as persisted.
    pub fn category_str(&self) -> &str {
        match self {
            GoalPlan::Unknown { raw_category } => raw_category,
            known => known.category().map(|c| c.as_str()).unwrap_or_default(),
        }
    }

    pub fn focus_area(&self) -> Option<&str> {
        match self {
            GoalPlan::Body { focus_area } | GoalPlan::Mind { focus_area } => Some(focus_area),
            _ => None,
        }
    }

    pub fn custom_action(&self) -> Option<&str> {
        match self {
            GoalPlan::Custom { custom_action } => Some(custom_action),
            _ => None,
        }
    }
}

/// The single long-running objective a user tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(flatten)]
    pub plan: GoalPlan,
    pub target_value: f64,
    pub current_value: f64,
    pub last_completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn category(&self) -> Option<GoalCategory> {
        self.plan.category()
    }

    /// Apply an accepted check-in. Both progress fields change together.
    pub fn apply(&mut self, update: &ProgressUpdate) {
        self.current_value = update.new_current_value;
        self.last_completed_at = Some(update.new_last_completed_at);
    }
}

/// Onboarding form as submitted; nothing here is trusted yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewGoal {
    pub title: String,
    pub category: Option<GoalCategory>,
    pub target_value: Option<f64>,
    pub current_value: Option<f64>,
    pub focus_area: Option<String>,
    pub custom_action: Option<String>,
}

/// A validated goal, ready to be inserted by a store.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalDraft {
    pub title: String,
    pub plan: GoalPlan,
    pub target_value: f64,
    pub current_value: f64,
}

impl NewGoal {
    pub fn finance(
        title: impl Into<String>,
        target_value: f64,
        current_value: Option<f64>,
    ) -> Self {
        Self {
            title: title.into(),
            category: Some(GoalCategory::Finance),
            target_value: Some(target_value),
            current_value,
            ..Default::default()
        }
    }

    pub fn body(title: impl Into<String>, focus_area: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: Some(GoalCategory::Body),
            focus_area: Some(focus_area.into()),
            ..Default::default()
        }
    }

    pub fn mind(title: impl Into<String>, focus_area: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: Some(GoalCategory::Mind),
            focus_area: Some(focus_area.into()),
            ..Default::default()
        }
    }

    pub fn custom(title: impl Into<String>, custom_action: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: Some(GoalCategory::Custom),
            custom_action: Some(custom_action.into()),
            ..Default::default()
        }
    }

    /// Check every creation precondition and produce the stored shape.
    ///
    /// Nothing is defaulted except the finance starting amount (0) and the
    /// fixed consistency target.
    ///
    /// # Errors
    /// Returns the first failed precondition.
    pub fn validate(&self, content: &MissionContentTable) -> Result<GoalDraft, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title".to_string()));
        }
        let category = self
            .category
            .ok_or_else(|| ValidationError::MissingField("category".to_string()))?;

        let (plan, target_value, current_value) = match category {
            GoalCategory::Finance => {
                let target = self
                    .target_value
                    .ok_or_else(|| ValidationError::MissingField("target_value".to_string()))?;
                if !target.is_finite() || target <= 0.0 {
                    return Err(ValidationError::InvalidValue {
                        field: "target_value".to_string(),
                        message: format!("must be a positive amount, got {target}"),
                    });
                }
                let current = self.current_value.unwrap_or(0.0);
                if !current.is_finite() || current < 0.0 {
                    return Err(ValidationError::InvalidValue {
                        field: "current_value".to_string(),
                        message: format!("must be zero or more, got {current}"),
                    });
                }
                (GoalPlan::Finance, target, current)
            }
            GoalCategory::Body | GoalCategory::Mind => {
                let focus_area = required_text(self.focus_area.as_deref(), "focus_area")?;
                let registered = content
                    .get(focus_area)
                    .ok_or_else(|| ValidationError::UnknownFocusArea(focus_area.to_string()))?;
                if registered.category != category {
                    return Err(ValidationError::FocusAreaCategory {
                        focus_area: focus_area.to_string(),
                        expected: registered.category.to_string(),
                        actual: category.to_string(),
                    });
                }
                let focus_area = focus_area.to_string();
                let plan = if category == GoalCategory::Body {
                    GoalPlan::Body { focus_area }
                } else {
                    GoalPlan::Mind { focus_area }
                };
                (plan, CONSISTENCY_TARGET, 0.0)
            }
            GoalCategory::Custom => {
                let action = required_text(self.custom_action.as_deref(), "custom_action")?;
                let plan = GoalPlan::Custom {
                    custom_action: action.to_string(),
                };
                (plan, CONSISTENCY_TARGET, 0.0)
            }
        };

        Ok(GoalDraft {
            title: title.to_string(),
            plan,
            target_value,
            current_value,
        })
    }
}

fn required_text<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ValidationError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ValidationError::MissingField(field.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> MissionContentTable {
        MissionContentTable::builtin()
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Finance".parse::<GoalCategory>().unwrap(), GoalCategory::Finance);
        assert_eq!(" mind ".parse::<GoalCategory>().unwrap(), GoalCategory::Mind);
        assert!("health".parse::<GoalCategory>().is_err());
    }

    #[test]
    fn finance_draft_defaults_current_to_zero() {
        let draft = NewGoal::finance("Freedom", 50_000.0, None)
            .validate(&content())
            .unwrap();
        assert_eq!(draft.plan, GoalPlan::Finance);
        assert_eq!(draft.target_value, 50_000.0);
        assert_eq!(draft.current_value, 0.0);
    }

    #[test]
    fn consistency_drafts_use_fixed_target() {
        let draft = NewGoal::body("Shape", "weight_loss").validate(&content()).unwrap();
        assert_eq!(draft.target_value, CONSISTENCY_TARGET);
        assert_eq!(draft.current_value, 0.0);
        assert_eq!(draft.plan.focus_area(), Some("weight_loss"));

        let draft = NewGoal::custom("Guitar", "Practice scales").validate(&content()).unwrap();
        assert_eq!(draft.target_value, CONSISTENCY_TARGET);
        assert_eq!(draft.plan.custom_action(), Some("Practice scales"));
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = NewGoal::custom("   ", "Walk").validate(&content()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("title".into()));
    }

    #[test]
    fn missing_category_is_rejected() {
        let goal = NewGoal {
            title: "Something".into(),
            ..Default::default()
        };
        assert_eq!(
            goal.validate(&content()).unwrap_err(),
            ValidationError::MissingField("category".into())
        );
    }

    #[test]
    fn body_without_focus_area_is_rejected() {
        let goal = NewGoal {
            title: "Shape".into(),
            category: Some(GoalCategory::Body),
            ..Default::default()
        };
        assert_eq!(
            goal.validate(&content()).unwrap_err(),
            ValidationError::MissingField("focus_area".into())
        );
    }

    #[test]
    fn unregistered_focus_area_is_rejected() {
        let err = NewGoal::mind("Zen", "unknown_key").validate(&content()).unwrap_err();
        assert_eq!(err, ValidationError::UnknownFocusArea("unknown_key".into()));
    }

    #[test]
    fn focus_area_must_match_category() {
        let err = NewGoal::mind("Gains", "muscle").validate(&content()).unwrap_err();
        assert!(matches!(err, ValidationError::FocusAreaCategory { .. }));
    }

    #[test]
    fn custom_without_action_is_rejected() {
        let err = NewGoal::custom("Guitar", "").validate(&content()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("custom_action".into()));
    }

    #[test]
    fn finance_requires_positive_target() {
        for bad in [0.0, -10.0, f64::NAN] {
            let err = NewGoal::finance("Freedom", bad, None).validate(&content()).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidValue { .. }));
        }
    }

    #[test]
    fn finance_rejects_negative_start() {
        let err = NewGoal::finance("Freedom", 1000.0, Some(-1.0))
            .validate(&content())
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidValue { ref field, .. } if field == "current_value"
        ));
    }

    #[test]
    fn plan_from_unknown_column_keeps_raw_category() {
        let plan = GoalPlan::from_columns("Saúde", None, None).unwrap();
        assert_eq!(plan.category(), None);
        assert_eq!(plan.category_str(), "Saúde");
    }

    #[test]
    fn plan_from_columns_requires_focus_area_for_body_and_mind() {
        for category in ["body", "mind"] {
            assert_eq!(
                GoalPlan::from_columns(category, None, None).unwrap_err(),
                ValidationError::MissingField("focus_area".into())
            );
        }
        let plan = GoalPlan::from_columns("custom", None, None).unwrap();
        assert_eq!(plan.custom_action(), Some(""));
    }

    #[test]
    fn plan_serializes_with_category_tag() {
        let plan = GoalPlan::Body {
            focus_area: "muscle".into(),
        };
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["category"], "body");
        assert_eq!(json["focus_area"], "muscle");
    }
}
