use std::path::PathBuf;

use clap::Args;
use tripflow_core::{plan_itinerary, PlanOptions, PlannerConfig};

#[derive(Args)]
pub struct PlanArgs {
    /// Itinerary JSON file
    pub file: PathBuf,
    /// Routing provider base URL; straight-line estimates when omitted
    #[arg(long)]
    pub router_url: Option<String>,
    /// Keep the stop order exactly as given
    #[arg(long)]
    pub no_optimize: bool,
    /// Planner configuration TOML
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let itinerary = super::load_itinerary(&args.file)?;
    let config = args
        .config
        .as_deref()
        .map(PlannerConfig::load_or_default)
        .unwrap_or_default();
    let deps = super::build_deps(args.router_url.as_deref(), config)?;

    let options = PlanOptions {
        suppress_optimization: args.no_optimize,
    };
    let runtime = tokio::runtime::Runtime::new()?;
    let planned = runtime.block_on(plan_itinerary(itinerary, options, &deps))?;

    println!("{}", serde_json::to_string_pretty(&planned)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tripflow_core::{Activity, Coordinate, Day, Itinerary, PlaceCategory};

    #[test]
    fn plans_a_file_offline() {
        let mut day = Day::new(Utc.with_ymd_and_hms(2026, 4, 10, 0, 0, 0).unwrap());
        day.start_time = Some("09:00".to_string());
        day.activities = vec![
            Activity::place("Temple", PlaceCategory::Sight)
                .with_coordinate(Coordinate::new(35.0116, 135.7681))
                .with_duration(60),
            Activity::place("Museum", PlaceCategory::Museum)
                .with_coordinate(Coordinate::new(35.0394, 135.7292))
                .with_duration(90),
        ];
        let mut itinerary = Itinerary::new("Kyoto");
        itinerary.days.push(day);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trip.json");
        std::fs::write(&path, serde_json::to_string(&itinerary).unwrap()).unwrap();

        let result = run(PlanArgs {
            file: path,
            router_url: None,
            no_optimize: false,
            config: None,
        });
        assert!(result.is_ok());
    }
}
