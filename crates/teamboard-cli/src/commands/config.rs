use clap::Subcommand;
use teamboard_core::{Config, ConfigError};

use super::CliResult;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting or a whole section
    Get {
        /// Dotted key, e.g. "incentive.min_activity_count" or "targets"
        key: String,
    },
    /// Change one setting; incentive rules are re-validated before saving
    Set {
        /// Dotted key
        key: String,
        /// New value. Tables take JSON, e.g. '{"score":{"min_score":5}}';
        /// an empty string clears an optional date
        value: String,
    },
    /// Print the whole configuration as TOML
    List {
        /// Print JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Restore defaults for one section, or for everything
    Reset {
        /// incentive, targets or leaderboard
        section: Option<String>,
    },
    /// Print where config.toml lives
    Path,
}

pub fn run(action: ConfigAction) -> CliResult {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key).ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            let stored = config.get(&key).unwrap_or_default();
            println!("{key} = {stored}");
        }
        ConfigAction::List { json } => {
            let config = Config::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", config.to_toml()?);
            }
        }
        ConfigAction::Reset { section } => match section.as_deref() {
            Some(section) => {
                let mut config = Config::load()?;
                config.reset_section(section)?;
                config.save()?;
                println!("{section} reset to defaults");
            }
            None => {
                Config::default().save()?;
                println!("config reset to defaults");
            }
        },
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
    }
    Ok(())
}
