use clap::Subcommand;
use northstar_core::Config;

use super::load_config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value by dot-path key
    Get {
        /// e.g. "cycle.year", "finance.currency_symbol"
        key: String,
    },
    /// Change one value; an empty value unsets optional keys
    Set { key: String, value: String },
    /// Print the whole config as JSON
    List,
    /// Write the default config back to disk
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = match action {
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            tracing::info!("config reset to defaults");
            config
        }
        ConfigAction::Get { key } => {
            let value = load_config()?
                .get(&key)
                .ok_or_else(|| format!("unknown key: {key}"))?;
            println!("{value}");
            return Ok(());
        }
        ConfigAction::Set { key, value } => {
            let mut config = load_config()?;
            config.set(&key, &value)?;
            config
        }
        ConfigAction::List => load_config()?,
    };
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
