use std::collections::HashSet;

use crate::common::Coordinate;

/// The eight neighbor offsets, clockwise from north. A fixed constant of the
/// engine, not configurable input.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Euclidean distance between two cells. Serves both as the edge cost and as
/// the heuristic: cardinal steps cost 1, diagonal steps sqrt(2), so the
/// heuristic is admissible and consistent on the 8-neighbor lattice.
pub fn euclidean(a: Coordinate, b: Coordinate) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// O(1)-membership index of blocked cells. Built once per planning pass and
/// read-only for its duration; workers share it by reference. With bounds set,
/// every cell outside `[0, width) x [0, height)` counts as blocked.
#[derive(Debug, Clone)]
pub struct ObstacleIndex {
    blocked: HashSet<Coordinate>,
    bounds: Option<(i32, i32)>,
}

impl ObstacleIndex {
    pub fn unbounded<I: IntoIterator<Item = Coordinate>>(blocked: I) -> Self {
        ObstacleIndex {
            blocked: blocked.into_iter().collect(),
            bounds: None,
        }
    }

    pub fn bounded<I: IntoIterator<Item = Coordinate>>(width: i32, height: i32, blocked: I) -> Self {
        ObstacleIndex {
            blocked: blocked.into_iter().collect(),
            bounds: Some((width, height)),
        }
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        if let Some((width, height)) = self.bounds {
            if coord.x < 0 || coord.y < 0 || coord.x >= width || coord.y >= height {
                return true;
            }
        }
        self.blocked.contains(&coord)
    }

    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }
}
