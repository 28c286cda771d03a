use std::path::PathBuf;

use clap::Args;
use tripflow_core::{ConflictDetector, PlannerConfig};

#[derive(Args)]
pub struct ConflictsArgs {
    /// Timed itinerary JSON file (output of `plan`)
    pub file: PathBuf,
    /// Planner configuration TOML
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: ConflictsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let itinerary = super::load_itinerary(&args.file)?;
    let config = args
        .config
        .as_deref()
        .map(PlannerConfig::load_or_default)
        .unwrap_or_default();

    let conflicts = ConflictDetector::new(&config).detect(&itinerary);
    if conflicts.is_empty() {
        println!("no conflicts");
    } else {
        println!("{}", serde_json::to_string_pretty(&conflicts)?);
    }
    Ok(())
}
