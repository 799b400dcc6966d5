use gridpath::common::PathResult;
use gridpath::config::{Cli, Config};
use gridpath::planner::plan;
use gridpath::scenario::Scenario;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::{info, warn, Level};
use tracing_subscriber;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();
    let cli = Cli::parse();
    let config = Config::new(&cli);
    config.validate()?;

    let scenario = Scenario::load_from_file(&config.scenario_path)
        .with_context(|| format!("error with scenario file: {}", config.scenario_path))?;
    let obstacles = scenario.obstacle_index();

    let agents = if let Some(num_agents) = config.num_agents {
        let mut rng = StdRng::seed_from_u64(config.seed);
        scenario.generate_agents_randomly(num_agents, &mut rng)?
    } else {
        scenario.agents()?
    };
    let iteration_cap = config.iteration_cap.unwrap_or(scenario.iteration_cap);

    let pass_start = Instant::now();
    let results = plan(&obstacles, &agents, iteration_cap);
    info!("planning pass took {:?}", pass_start.elapsed());

    for agent in &agents {
        match &results[&agent.id] {
            PathResult::Found(path) => info!(
                "agent {} reaches {:?} in {} steps (cost {:.3})",
                agent.id,
                agent.goal,
                path.len() - 1,
                path.total_cost()
            ),
            PathResult::Unreachable => warn!("agent {}: goal {:?} unreachable", agent.id, agent.goal),
            PathResult::Exhausted => warn!(
                "agent {}: gave up after {} iterations",
                agent.id, iteration_cap
            ),
            PathResult::Invalid(reason) => {
                warn!("agent {}: invalid configuration {:?}", agent.id, reason)
            }
        }
    }

    Scenario::write_results_json(&config.output_path, &results)?;
    info!("results written to {}", config.output_path);

    Ok(())
}
