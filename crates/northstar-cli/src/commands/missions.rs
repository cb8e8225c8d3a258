use clap::Subcommand;
use northstar_core::ProgressEngine;

use super::load_config;

#[derive(Subcommand)]
pub enum MissionsAction {
    /// List focus areas and their categories
    List,
    /// Show the mission list of one focus area
    Show {
        /// Focus area key (e.g. "weight_loss")
        focus_area: String,
    },
}

pub fn run(action: MissionsAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = ProgressEngine::from_config(&load_config()?)?;
    let content = engine.content();

    match action {
        MissionsAction::List => {
            let areas: Vec<_> = content
                .focus_areas()
                .map(|(key, area)| {
                    serde_json::json!({
                        "focus_area": key,
                        "category": area.category,
                        "missions": area.missions.len(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&areas)?);
        }
        MissionsAction::Show { focus_area } => match content.get(&focus_area) {
            Some(area) => println!("{}", serde_json::to_string_pretty(area)?),
            None => return Err(format!("unknown focus area: {focus_area}").into()),
        },
    }
    Ok(())
}
