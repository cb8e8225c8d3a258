use chrono::Utc;
use clap::Subcommand;
use northstar_core::{GoalCategory, NewGoal};

use super::Context;

#[derive(Subcommand)]
pub enum GoalAction {
    /// Create the user's goal
    Create {
        /// Goal title
        #[arg(long)]
        title: String,
        /// finance, body, mind or custom
        #[arg(long)]
        category: GoalCategory,
        /// Target amount (finance)
        #[arg(long)]
        target: Option<f64>,
        /// Amount already saved (finance)
        #[arg(long)]
        current: Option<f64>,
        /// Focus area key (body, mind)
        #[arg(long)]
        focus_area: Option<String>,
        /// Daily action text (custom)
        #[arg(long)]
        action: Option<String>,
    },
    /// Show the stored goal
    Show,
}

pub fn run(action: GoalAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.open()?;

    match action {
        GoalAction::Create {
            title,
            category,
            target,
            current,
            focus_area,
            action,
        } => {
            let new_goal = NewGoal {
                title,
                category: Some(category),
                target_value: target,
                current_value: current,
                focus_area,
                custom_action: action,
            };
            let now = ctx.at.map_or_else(Utc::now, |at| at.with_timezone(&Utc));
            let (goal, event) = session.service.onboard(&session.user_id, &new_goal, now)?;
            let out = serde_json::json!({ "goal": goal, "event": event });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        GoalAction::Show => {
            let goal = session.require_goal()?;
            println!("{}", serde_json::to_string_pretty(&goal)?);
        }
    }
    Ok(())
}
