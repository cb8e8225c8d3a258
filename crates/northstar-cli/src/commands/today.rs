use chrono::{DateTime, TimeZone};

use super::{no_goal, Context};

pub fn run<Tz: TimeZone>(
    ctx: &Context,
    now: &DateTime<Tz>,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.open()?;
    let dashboard = session
        .service
        .load_dashboard(&session.user_id, now)?
        .ok_or_else(|| no_goal(&session.user_id))?;
    println!("{}", serde_json::to_string_pretty(dashboard.view())?);
    Ok(())
}
