//! Mission and progress engine.
//!
//! [`ProgressEngine`] binds the pure functions of the calendar, mission,
//! pacing, progress and check-in modules to one content table and one set
//! of cycle settings, and produces the per-day [`DailyView`].

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::checkin::{self, CheckInError, CheckInState, ProgressUpdate};
use crate::content::MissionContentTable;
use crate::error::Result;
use crate::goal::Goal;
use crate::mission;
use crate::pacing;
use crate::progress::{self, ProgressPolicy};
use crate::storage::Config;

/// Cycle year used when none is configured.
pub const DEFAULT_CYCLE_YEAR: i32 = 2026;
/// Currency prefix used when none is configured.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "R$";

/// Cycle and display settings the engine runs with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Year whose last second is the cycle end.
    pub cycle_year: i32,
    /// Prefix for finance amounts in mission text.
    pub currency_symbol: String,
    pub progress: ProgressPolicy,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            cycle_year: DEFAULT_CYCLE_YEAR,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            progress: ProgressPolicy::default(),
        }
    }
}

/// Everything the dashboard shows for one goal on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyView {
    pub goal_id: String,
    pub title: String,
    pub category: String,
    pub category_label: Option<String>,
    pub focus_area: Option<String>,
    pub mission_text: String,
    pub percent: f64,
    pub check_in_state: CheckInState,
    pub current_value: f64,
    pub target_value: f64,
    pub days_remaining: i64,
    pub last_completed_at: Option<DateTime<Utc>>,
}

/// Daily mission and progress engine.
#[derive(Debug, Clone)]
pub struct ProgressEngine {
    content: MissionContentTable,
    settings: EngineSettings,
}

impl ProgressEngine {
    /// Engine with the built-in content table and default settings.
    pub fn new() -> Self {
        Self {
            content: MissionContentTable::builtin(),
            settings: EngineSettings::default(),
        }
    }

    pub fn with_settings(settings: EngineSettings, content: MissionContentTable) -> Self {
        Self { content, settings }
    }

    /// Build from user configuration, loading a content override if set.
    ///
    /// # Errors
    /// Returns an error if the settings are invalid or the content file
    /// cannot be loaded.
    pub fn from_config(config: &Config) -> Result<Self> {
        let settings = config.engine_settings()?;
        let content = match config.content.missions_path.as_deref() {
            Some(path) => MissionContentTable::load(std::path::Path::new(path))?,
            None => MissionContentTable::builtin(),
        };
        Ok(Self::with_settings(settings, content))
    }

    pub fn content(&self) -> &MissionContentTable {
        &self.content
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Cycle end in the timezone of `now`.
    pub fn cycle_end<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<Tz> {
        match calendar::cycle_end(self.settings.cycle_year, &now.timezone()) {
            Some(end) => end,
            None => {
                tracing::warn!(
                    year = self.settings.cycle_year,
                    "cycle year out of range, treating now as the cycle end"
                );
                now.clone()
            }
        }
    }

    pub fn days_remaining<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        calendar::days_remaining(now, &self.cycle_end(now))
    }

    pub fn resolve_mission<Tz: TimeZone>(&self, goal: &Goal, now: &DateTime<Tz>) -> String {
        mission::resolve_mission(
            goal,
            now,
            &self.cycle_end(now),
            &self.content,
            &self.settings.currency_symbol,
        )
    }

    pub fn daily_increment<Tz: TimeZone>(&self, goal: &Goal, now: &DateTime<Tz>) -> f64 {
        pacing::daily_increment(goal, now, &self.cycle_end(now))
    }

    pub fn project_percent(&self, goal: &Goal) -> f64 {
        progress::project_percent(goal, self.settings.progress)
    }

    pub fn derive_state<Tz: TimeZone>(&self, goal: &Goal, now: &DateTime<Tz>) -> CheckInState {
        checkin::derive_state(goal, now)
    }

    /// # Errors
    /// See [`checkin::check_in`].
    pub fn check_in<Tz: TimeZone>(
        &self,
        goal: &Goal,
        now: &DateTime<Tz>,
    ) -> Result<ProgressUpdate, CheckInError> {
        let update = checkin::check_in(goal, now, &self.cycle_end(now))?;
        tracing::debug!(
            goal_id = %update.goal_id,
            increment = update.increment,
            new_value = update.new_current_value,
            "check-in accepted"
        );
        Ok(update)
    }

    /// Mission, percentage and check-in state for `goal` at `now`.
    pub fn daily_view<Tz: TimeZone>(&self, goal: &Goal, now: &DateTime<Tz>) -> DailyView {
        DailyView {
            goal_id: goal.id.clone(),
            title: goal.title.clone(),
            category: goal.plan.category_str().to_string(),
            category_label: goal.category().map(|c| c.label().to_string()),
            focus_area: goal.plan.focus_area().map(str::to_string),
            mission_text: self.resolve_mission(goal, now),
            percent: self.project_percent(goal),
            check_in_state: self.derive_state(goal, now),
            current_value: goal.current_value,
            target_value: goal.target_value,
            days_remaining: self.days_remaining(now),
            last_completed_at: goal.last_completed_at,
        }
    }
}

impl Default for ProgressEngine {
    fn default() -> Self {
        Self::new()
    }
}
