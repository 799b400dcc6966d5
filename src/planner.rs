use std::collections::HashMap;
use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use crate::common::{Agent, PathResult};
use crate::grid::ObstacleIndex;
use crate::search::a_star_search;
use crate::stat::Stats;

pub const DEFAULT_ITERATION_CAP: usize = 1000;

/// Runs one independent A* search per agent, in parallel, and joins all
/// results before returning.
///
/// The obstacle index is the only shared state and is read-only for the whole
/// pass; each search owns its frontier and closed table, so results are
/// independent of scheduling order. Every agent gets an entry in the returned
/// map, keyed by agent id, failures included.
pub fn plan(
    obstacles: &ObstacleIndex,
    agents: &[Agent],
    iteration_cap: usize,
) -> HashMap<usize, PathResult> {
    let pass_start = Instant::now();

    let per_agent: Vec<(usize, PathResult, Stats)> = agents
        .par_iter()
        .map(|agent| {
            let mut stats = Stats::default();
            let result = a_star_search(obstacles, agent, iteration_cap, &mut stats);
            (agent.id, result, stats)
        })
        .collect();

    let mut totals = Stats::default();
    let mut results = HashMap::with_capacity(per_agent.len());
    for (id, result, stats) in per_agent {
        debug!(
            "agent {id}: {} ({} nodes expanded)",
            match &result {
                PathResult::Found(path) => format!("path with {} waypoints", path.len()),
                PathResult::Unreachable => "unreachable".to_string(),
                PathResult::Exhausted => "iteration cap exhausted".to_string(),
                PathResult::Invalid(reason) => format!("invalid configuration: {reason:?}"),
            },
            stats.expanded_nodes
        );
        totals.merge(&stats);
        results.insert(id, result);
    }

    totals.time_us = pass_start.elapsed().as_micros() as usize;
    totals.print(agents.len());

    results
}
