use serde::{Deserialize, Serialize};

use crate::grid::euclidean;

/// Integer grid cell address. Equality and hashing are by value; the derived
/// lexicographic order (x, then y) is what the search uses to break f-cost ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Coordinate { x, y }
    }

    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Coordinate {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// One independent pathfinding request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: usize,
    pub start: Coordinate,
    pub goal: Coordinate,
}

/// An ordered waypoint sequence. `steps` is the canonical direction: the first
/// element is the agent's start and the last is its goal. Reconstruction walks
/// parent pointers goal-first; [`Path::from_goal_chain`] is the single place
/// that raw chain gets flipped into canonical order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    pub steps: Vec<Coordinate>,
}

impl Path {
    /// Builds a canonical start-to-goal path from a goal-first parent chain.
    pub fn from_goal_chain(mut chain: Vec<Coordinate>) -> Self {
        chain.reverse();
        Path { steps: chain }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of Euclidean step lengths along the path.
    pub fn total_cost(&self) -> f64 {
        self.steps
            .windows(2)
            .map(|pair| euclidean(pair[0], pair[1]))
            .sum()
    }
}

/// Why an agent's configuration was rejected before searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InvalidReason {
    StartBlocked,
    GoalBlocked,
}

/// Outcome of one agent's search. `Unreachable` means the frontier drained
/// before the goal was finalized; `Exhausted` means the iteration cap fired
/// first. The cap is a resource bound, not a reachability oracle, so the two
/// stay distinct.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PathResult {
    Found(Path),
    Unreachable,
    Exhausted,
    Invalid(InvalidReason),
}
