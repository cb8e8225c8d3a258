//! # Northstar Core Library
//!
//! Core logic for the Northstar goal tracker. Each user owns one long-running
//! goal; every local day the engine produces a concrete mission, a progress
//! percentage and a once-per-day check-in that advances the goal.
//!
//! ## Architecture
//!
//! - **Calendar**: local-day arithmetic (day of year, same-day checks,
//!   days remaining to the end of the cycle year)
//! - **Engine**: mission text, daily pace, progress projection and the
//!   check-in state machine, all pure and deterministic for a given `now`
//! - **Dashboard**: optimistic check-in with rollback
//! - **Storage**: SQLite goal persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`ProgressEngine`]: per-day view of a goal
//! - [`GoalService`]: onboarding and persisted check-ins over a [`GoalStore`]
//! - [`Database`]: goal persistence
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod checkin;
pub mod content;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod events;
pub mod goal;
pub mod mission;
pub mod pacing;
pub mod progress;
pub mod service;
pub mod storage;

pub use checkin::{CheckInError, CheckInState, ProgressUpdate};
pub use content::{FocusAreaContent, MissionContentTable};
pub use dashboard::{Dashboard, PendingCheckIn};
pub use engine::{DailyView, EngineSettings, ProgressEngine};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use goal::{Goal, GoalCategory, GoalDraft, GoalPlan, NewGoal};
pub use progress::ProgressPolicy;
pub use service::GoalService;
pub use storage::{Config, Database, GoalStore};
