use anyhow::anyhow;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "gridpath",
    about = "Parallel multi-agent A* on 8-connected grids.",
    version = "0.1"
)]
pub struct Cli {
    #[arg(
        long,
        help = "Path to the YAML scenario file",
        default_value = "scenarios/demo.yaml"
    )]
    pub scenario_path: String,

    #[arg(
        long,
        help = "Path to the JSON results file",
        default_value = "result/paths.json"
    )]
    pub output_path: String,

    #[arg(long, help = "Iteration cap per agent search, overrides the scenario")]
    pub iteration_cap: Option<usize>,

    #[arg(
        long,
        help = "Generate this many random agents instead of the scenario's routes"
    )]
    pub num_agents: Option<usize>,

    #[arg(
        long,
        help = "Seed for the random number generator",
        default_value_t = 0
    )]
    pub seed: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub scenario_path: String,
    pub output_path: String,
    pub iteration_cap: Option<usize>,
    pub num_agents: Option<usize>,
    pub seed: u64,
}

impl Config {
    pub fn new(cli: &Cli) -> Self {
        Self {
            scenario_path: cli.scenario_path.clone(),
            output_path: cli.output_path.clone(),
            iteration_cap: cli.iteration_cap,
            num_agents: cli.num_agents,
            seed: cli.seed,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(cap) = self.iteration_cap {
            if cap == 0 {
                return Err(anyhow!("iteration cap must be at least 1, got {}", cap));
            }
        }
        if let Some(num_agents) = self.num_agents {
            if num_agents == 0 {
                return Err(anyhow!("number of agents must be at least 1"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_zero_cap() {
        let config = Config {
            scenario_path: "scenarios/demo.yaml".to_string(),
            output_path: "result/paths.json".to_string(),
            iteration_cap: Some(0),
            num_agents: None,
            seed: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let config = Config {
            scenario_path: "scenarios/demo.yaml".to_string(),
            output_path: "result/paths.json".to_string(),
            iteration_cap: None,
            num_agents: Some(4),
            seed: 42,
        };
        assert!(config.validate().is_ok());
    }
}
