use chrono::{DateTime, TimeZone};

use super::{no_goal, Context};

pub fn run<Tz: TimeZone>(
    ctx: &Context,
    now: &DateTime<Tz>,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.open()?;
    let mut dashboard = session
        .service
        .load_dashboard(&session.user_id, now)?
        .ok_or_else(|| no_goal(&session.user_id))?;

    let event = session.service.check_in(&mut dashboard, now)?;
    let out = serde_json::json!({ "event": event, "today": dashboard.view() });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
