use chrono::{DateTime, FixedOffset, Local};
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "northstar", version, about = "Northstar daily mission tracker")]
struct Cli {
    /// User id (defaults to profile.user_id from the config)
    #[arg(long, global = true)]
    user: Option<String>,
    /// Evaluate at a fixed instant (RFC 3339) instead of the local clock
    #[arg(long, global = true, value_parser = parse_instant)]
    at: Option<DateTime<FixedOffset>>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Goal onboarding and inspection
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Today's mission, progress and check-in state
    Today,
    /// Mark today's mission as done
    Checkin,
    /// Browse the mission content table
    Missions {
        #[command(subcommand)]
        action: commands::missions::MissionsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn parse_instant(raw: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(raw).map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("NORTHSTAR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let ctx = Context {
        user: cli.user,
        at: cli.at,
    };

    // A fixed `--at` instant keeps its own offset; otherwise the system
    // timezone decides where local midnight falls.
    let result = match cli.command {
        Commands::Goal { action } => commands::goal::run(action, &ctx),
        Commands::Today => match ctx.at {
            Some(at) => commands::today::run(&ctx, &at),
            None => commands::today::run(&ctx, &Local::now()),
        },
        Commands::Checkin => match ctx.at {
            Some(at) => commands::checkin::run(&ctx, &at),
            None => commands::checkin::run(&ctx, &Local::now()),
        },
        Commands::Missions { action } => commands::missions::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
