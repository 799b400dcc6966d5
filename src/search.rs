use crate::common::{Agent, Coordinate, InvalidReason, Path, PathResult};
use crate::grid::{euclidean, ObstacleIndex, NEIGHBOR_OFFSETS};
use crate::node::{ClosedList, OpenList, SearchNode};
use crate::stat::Stats;

use tracing::{debug, instrument, trace};

/// A* over the 8-connected lattice for a single agent.
///
/// The open and closed lists live only for this call; nothing is shared with
/// other agents except the read-only obstacle index. The iteration cap bounds
/// the outer loop, so worst-case memory and latency are bounded per agent.
#[instrument(skip_all, name = "a_star", fields(agent = agent.id, start = format!("{:?}", agent.start), goal = format!("{:?}", agent.goal)), level = "debug")]
pub(crate) fn a_star_search(
    obstacles: &ObstacleIndex,
    agent: &Agent,
    iteration_cap: usize,
    stats: &mut Stats,
) -> PathResult {
    if obstacles.contains(agent.start) {
        debug!("start cell is blocked");
        return PathResult::Invalid(InvalidReason::StartBlocked);
    }
    if obstacles.contains(agent.goal) {
        debug!("goal cell is blocked");
        return PathResult::Invalid(InvalidReason::GoalBlocked);
    }
    if agent.start == agent.goal {
        return PathResult::Found(Path {
            steps: vec![agent.start],
        });
    }

    let mut open = OpenList::new();
    let mut closed = ClosedList::new();

    // The start node is its own parent.
    open.relax(SearchNode::scored(
        agent.start,
        agent.start,
        0.0,
        euclidean(agent.start, agent.goal),
    ));

    while let Some(current) = open.pop_best() {
        trace!("expand node: {current:?}");
        stats.expanded_nodes += 1;
        closed.record(current);

        if current.coord == agent.goal {
            break;
        }

        for &offset in &NEIGHBOR_OFFSETS {
            let neighbor = current.coord.offset(offset);
            if obstacles.contains(neighbor) || closed.contains(neighbor) {
                continue;
            }

            let g_cost = current.g_cost + euclidean(current.coord, neighbor);
            open.relax(SearchNode::scored(
                neighbor,
                current.coord,
                g_cost,
                euclidean(neighbor, agent.goal),
            ));
        }

        stats.iterations += 1;
        if stats.iterations > iteration_cap {
            debug!("iteration cap {iteration_cap} hit before reaching the goal");
            return PathResult::Exhausted;
        }
        trace!("open list size {}", open.len());
    }

    if closed.contains(agent.goal) {
        PathResult::Found(construct_path(&closed, agent.start, agent.goal))
    } else {
        debug!("frontier exhausted, goal not reachable");
        PathResult::Unreachable
    }
}

/// Walks parent pointers goal-first until the start, then flips the chain into
/// the canonical start-to-goal order.
fn construct_path(closed: &ClosedList, start: Coordinate, goal: Coordinate) -> Path {
    let mut chain = vec![goal];
    let mut cursor = goal;
    while cursor != start {
        let Some(node) = closed.get(cursor) else { break };
        cursor = node.parent;
        chain.push(cursor);
    }
    Path::from_goal_chain(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::DEFAULT_ITERATION_CAP;
    use tracing_subscriber;

    // Helper function to setup tracing
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .try_init();
    }

    fn agent(start: (i32, i32), goal: (i32, i32)) -> Agent {
        Agent {
            id: 0,
            start: Coordinate::new(start.0, start.1),
            goal: Coordinate::new(goal.0, goal.1),
        }
    }

    /// Column of obstacles at x=2 over rows 0..=3, leaving a gap at row 4.
    fn walled_grid() -> ObstacleIndex {
        let wall = (0..4).map(|y| Coordinate::new(2, y));
        ObstacleIndex::bounded(5, 5, wall)
    }

    fn search(obstacles: &ObstacleIndex, agent: &Agent, cap: usize) -> PathResult {
        a_star_search(obstacles, agent, cap, &mut Stats::default())
    }

    #[test]
    fn test_cardinal_line_is_optimal() {
        init_tracing();
        let obstacles = ObstacleIndex::unbounded(vec![]);
        let agent = agent((0, 0), (5, 0));
        let PathResult::Found(path) = search(&obstacles, &agent, DEFAULT_ITERATION_CAP) else {
            panic!("expected a path");
        };
        assert_eq!(path.len(), 6);
        assert!((path.total_cost() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_diagonal_line_is_optimal() {
        init_tracing();
        let obstacles = ObstacleIndex::unbounded(vec![]);
        let agent = agent((0, 0), (4, 4));
        let PathResult::Found(path) = search(&obstacles, &agent, DEFAULT_ITERATION_CAP) else {
            panic!("expected a path");
        };
        assert_eq!(path.len(), 5);
        assert!((path.total_cost() - 4.0 * 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_move_is_octile_optimal() {
        init_tracing();
        let obstacles = ObstacleIndex::unbounded(vec![]);
        let agent = agent((0, 0), (3, 4));
        let PathResult::Found(path) = search(&obstacles, &agent, DEFAULT_ITERATION_CAP) else {
            panic!("expected a path");
        };
        // Three diagonal steps plus one cardinal step is the cheapest way to
        // cover (3, 4) on the 8-neighbor lattice.
        let optimal = 3.0 * 2.0_f64.sqrt() + 1.0;
        assert!((path.total_cost() - optimal).abs() < 1e-9);
        // Never below the straight-line distance.
        assert!(path.total_cost() >= 5.0 - 1e-9);
    }

    #[test]
    fn test_degenerate_start_equals_goal() {
        init_tracing();
        let obstacles = ObstacleIndex::unbounded(vec![]);
        let agent = agent((3, 3), (3, 3));
        let PathResult::Found(path) = search(&obstacles, &agent, DEFAULT_ITERATION_CAP) else {
            panic!("expected a degenerate path");
        };
        assert_eq!(path.steps, vec![Coordinate::new(3, 3)]);
        assert_eq!(path.total_cost(), 0.0);
    }

    #[test]
    fn test_blocked_endpoints_are_invalid() {
        init_tracing();
        let obstacles = ObstacleIndex::unbounded(vec![Coordinate::new(0, 0), Coordinate::new(4, 4)]);
        assert_eq!(
            search(&obstacles, &agent((0, 0), (2, 2)), DEFAULT_ITERATION_CAP),
            PathResult::Invalid(InvalidReason::StartBlocked)
        );
        assert_eq!(
            search(&obstacles, &agent((2, 2), (4, 4)), DEFAULT_ITERATION_CAP),
            PathResult::Invalid(InvalidReason::GoalBlocked)
        );
    }

    #[test]
    fn test_enclosed_goal_is_unreachable() {
        init_tracing();
        let fence = NEIGHBOR_OFFSETS
            .iter()
            .map(|&offset| Coordinate::new(3, 3).offset(offset));
        let obstacles = ObstacleIndex::bounded(6, 6, fence);
        assert_eq!(
            search(&obstacles, &agent((0, 0), (3, 3)), DEFAULT_ITERATION_CAP),
            PathResult::Unreachable
        );
    }

    #[test]
    fn test_wall_detours_through_gap() {
        init_tracing();
        let obstacles = walled_grid();
        let agent = agent((0, 2), (4, 2));
        let PathResult::Found(path) = search(&obstacles, &agent, DEFAULT_ITERATION_CAP) else {
            panic!("expected a detour path");
        };
        // The only crossing is the gap at (2, 4).
        assert!(path.steps.contains(&Coordinate::new(2, 4)));
        assert!(path.total_cost() > 4.0);
        // No worse than the obvious diagonal route through the gap.
        assert!(path.total_cost() <= 4.0 * 2.0_f64.sqrt() + 1e-9);
        assert_eq!(path.steps.first(), Some(&agent.start));
        assert_eq!(path.steps.last(), Some(&agent.goal));
    }

    #[test]
    fn test_admissibility_lower_bound_with_obstacles() {
        init_tracing();
        let obstacles = walled_grid();
        let agent = agent((0, 2), (4, 2));
        let PathResult::Found(path) = search(&obstacles, &agent, DEFAULT_ITERATION_CAP) else {
            panic!("expected a path");
        };
        assert!(path.total_cost() >= euclidean(agent.start, agent.goal) - 1e-9);
    }

    #[test]
    fn test_iteration_cap_reports_exhausted() {
        init_tracing();
        let obstacles = walled_grid();
        // A path exists, but two loop iterations cannot reach a goal four
        // cells away. The cap is a resource bound, not a reachability oracle.
        assert_eq!(
            search(&obstacles, &agent((0, 2), (4, 2)), 2),
            PathResult::Exhausted
        );
    }

    #[test]
    fn test_deterministic_under_fixed_tie_break() {
        init_tracing();
        let obstacles = walled_grid();
        let agent = agent((0, 2), (4, 2));
        let first = search(&obstacles, &agent, DEFAULT_ITERATION_CAP);
        let second = search(&obstacles, &agent, DEFAULT_ITERATION_CAP);
        assert_eq!(first, second);
    }
}
