use std::collections::HashMap;
use std::path::PathBuf;

use clap::Args;
use tripflow_core::optimize_day;

#[derive(Args)]
pub struct OptimizeArgs {
    /// Itinerary JSON file
    pub file: PathBuf,
}

pub fn run(args: OptimizeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let itinerary = super::load_itinerary(&args.file)?;

    for (index, day) in itinerary.days.iter().enumerate() {
        // Only explicit coordinates are available offline.
        let coordinates: HashMap<_, _> = day
            .activities
            .iter()
            .filter_map(|a| a.coordinate().map(|c| (a.id.clone(), c)))
            .collect();

        let result = optimize_day(&day.activities, day.start_coordinate, &coordinates);
        println!("day {} ({}):", index + 1, day.id);
        if !result.order_changed {
            println!("  order already optimal");
            continue;
        }
        for id in &result.order {
            let title = day
                .activities
                .iter()
                .find(|a| &a.id == id)
                .map(|a| a.title.as_str())
                .unwrap_or("?");
            println!("  {title}");
        }
    }
    Ok(())
}
