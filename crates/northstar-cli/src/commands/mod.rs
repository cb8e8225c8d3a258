pub mod checkin;
pub mod config;
pub mod goal;
pub mod missions;
pub mod today;

use chrono::{DateTime, FixedOffset};
use northstar_core::{Config, Database, Goal, GoalService, GoalStore, ProgressEngine};

/// Global flags shared by every command.
pub struct Context {
    pub user: Option<String>,
    pub at: Option<DateTime<FixedOffset>>,
}

/// A service wired to the on-disk config and database, plus the
/// resolved user id.
pub struct Session {
    pub service: GoalService<Database>,
    pub user_id: String,
}

impl Context {
    pub fn open(&self) -> Result<Session, Box<dyn std::error::Error>> {
        let config = load_config()?;
        let engine = ProgressEngine::from_config(&config)?;
        let user_id = self
            .user
            .clone()
            .unwrap_or_else(|| config.profile.user_id.clone());
        tracing::debug!(user_id = %user_id, year = config.cycle.year, "session opened");
        Ok(Session {
            service: GoalService::new(Database::open()?, engine),
            user_id,
        })
    }
}

impl Session {
    /// The user's goal, or an error pointing at onboarding.
    pub fn require_goal(&self) -> Result<Goal, Box<dyn std::error::Error>> {
        self.service
            .store()
            .fetch_goal(&self.user_id)?
            .ok_or_else(|| no_goal(&self.user_id))
    }
}

/// The on-disk config, created with defaults on first run.
pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    Ok(Config::load()?)
}

pub fn no_goal(user_id: &str) -> Box<dyn std::error::Error> {
    format!("no goal for user '{user_id}'; create one with `northstar goal create`").into()
}
