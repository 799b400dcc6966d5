use anyhow::{anyhow, Context, Result};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use tracing::info;

use crate::common::{Agent, Coordinate, PathResult};
use crate::grid::ObstacleIndex;
use crate::planner::DEFAULT_ITERATION_CAP;

fn default_iteration_cap() -> usize {
    DEFAULT_ITERATION_CAP
}

/// One requested route. A route without its own goal falls back to the
/// scenario's shared goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSpec {
    pub start: Coordinate,
    pub goal: Option<Coordinate>,
}

/// A planning pass described as data: the grid bounds, the blocked cells, and
/// the requested routes. This file is the boundary where the original's
/// mouse-driven editing session used to sit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub obstacles: Vec<Coordinate>,
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
    pub shared_goal: Option<Coordinate>,
    #[serde(default = "default_iteration_cap")]
    pub iteration_cap: usize,
}

impl Scenario {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("failed to open scenario {path}"))?;
        let reader = BufReader::new(file);
        let scenario: Scenario = serde_yaml::from_reader(reader)
            .with_context(|| format!("failed to parse scenario {path}"))?;
        Ok(scenario)
    }

    pub fn obstacle_index(&self) -> ObstacleIndex {
        ObstacleIndex::bounded(self.width, self.height, self.obstacles.iter().copied())
    }

    /// Resolves the declared routes into agents, ids assigned by position.
    pub fn agents(&self) -> Result<Vec<Agent>> {
        self.routes
            .iter()
            .enumerate()
            .map(|(id, route)| {
                let goal = route
                    .goal
                    .or(self.shared_goal)
                    .ok_or_else(|| anyhow!("route {id} has no goal and no shared goal is set"))?;
                Ok(Agent {
                    id,
                    start: route.start,
                    goal,
                })
            })
            .collect()
    }

    /// Draws `num_agents` distinct start cells from the free cells of the grid,
    /// all aimed at the shared goal (or at a randomly drawn one when the
    /// scenario does not set it). Deterministic for a fixed seed.
    pub fn generate_agents_randomly<R: Rng + ?Sized>(
        &self,
        num_agents: usize,
        rng: &mut R,
    ) -> Result<Vec<Agent>> {
        let index = self.obstacle_index();

        // Row-major enumeration keeps the candidate order independent of the
        // obstacle list's order.
        let mut free: Vec<Coordinate> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Coordinate::new(x, y)))
            .filter(|&cell| !index.contains(cell) && Some(cell) != self.shared_goal)
            .collect();

        let needed = num_agents + usize::from(self.shared_goal.is_none());
        if free.len() < needed {
            return Err(anyhow!(
                "not enough free cells for {} agents on a {}x{} grid",
                num_agents,
                self.width,
                self.height
            ));
        }

        free.shuffle(rng);

        let goal = match self.shared_goal {
            Some(goal) => goal,
            None => free.pop().ok_or_else(|| anyhow!("no free cell left for a goal"))?,
        };

        let agents: Vec<Agent> = (0..num_agents)
            .map(|id| {
                let start = free.pop().ok_or_else(|| anyhow!("ran out of free cells"))?;
                Ok(Agent { id, start, goal })
            })
            .collect::<Result<_>>()?;

        info!("Generated agents: {agents:?}");
        Ok(agents)
    }

    /// Dumps a pass's results as JSON, keyed by agent id.
    pub fn write_results_json(path: &str, results: &HashMap<usize, PathResult>) -> Result<()> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path).with_context(|| format!("failed to create {path}"))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, results)?;
        Ok(())
    }
}
