use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tripflow-cli", version, about = "Tripflow CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan an itinerary: optimize, resolve travel, build the timeline
    Plan(commands::plan::PlanArgs),
    /// Show the optimizer's proposed stop order for each day
    Optimize(commands::optimize::OptimizeArgs),
    /// Detect conflicts in an already-timed itinerary
    Conflicts(commands::conflicts::ConflictsArgs),
    /// Planner configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Optimize(args) => commands::optimize::run(args),
        Commands::Conflicts(args) => commands::conflicts::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
