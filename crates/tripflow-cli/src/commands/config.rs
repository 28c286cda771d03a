use std::path::PathBuf;

use clap::Subcommand;
use tripflow_core::PlannerConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Configuration TOML; defaults apply when omitted
        path: Option<PathBuf>,
    },
    /// Write the default configuration to a file
    Init { path: PathBuf },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show { path } => {
            let config = path
                .as_deref()
                .map(PlannerConfig::load_or_default)
                .unwrap_or_default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Init { path } => {
            PlannerConfig::default().save(&path)?;
            println!("configuration written to {}", path.display());
        }
    }
    Ok(())
}
