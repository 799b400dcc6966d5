use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::common::Coordinate;

/// Immutable per-node score record. `f_cost` is derived from the other two at
/// construction; there is no way to set the three fields independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchNode {
    pub coord: Coordinate,
    /// Predecessor on the best path found so far; the start node points at itself.
    pub parent: Coordinate,
    pub g_cost: f64,
    pub h_cost: f64,
    pub f_cost: f64,
}

impl SearchNode {
    pub fn scored(coord: Coordinate, parent: Coordinate, g_cost: f64, h_cost: f64) -> Self {
        SearchNode {
            coord,
            parent,
            g_cost,
            h_cost,
            f_cost: g_cost + h_cost,
        }
    }
}

/// The search frontier: coordinates discovered but not yet finalized.
#[derive(Debug, Default)]
pub struct OpenList {
    entries: HashMap<Coordinate, SearchNode>,
}

impl OpenList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discovers or relaxes a node: a present entry is replaced only when the
    /// new g-cost is strictly smaller.
    pub fn relax(&mut self, node: SearchNode) {
        match self.entries.entry(node.coord) {
            Entry::Occupied(mut occupied) => {
                if node.g_cost < occupied.get().g_cost {
                    occupied.insert(node);
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(node);
            }
        }
    }

    /// Removes and returns the best frontier entry: minimum f-cost, ties broken
    /// by lexicographically smallest coordinate. The explicit comparator is the
    /// only thing standing between this search and hash-order nondeterminism.
    pub fn pop_best(&mut self) -> Option<SearchNode> {
        let best = *self.entries.values().min_by(|a, b| {
            a.f_cost
                .total_cmp(&b.f_cost)
                .then_with(|| a.coord.cmp(&b.coord))
        })?;
        self.entries.remove(&best.coord);
        Some(best)
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.entries.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Best-known table of visited coordinates, start included. Parent pointers in
/// here are what reconstruction walks.
#[derive(Debug, Default)]
pub struct ClosedList {
    entries: HashMap<Coordinate, SearchNode>,
}

impl ClosedList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finalized node. An existing entry is only overwritten when the
    /// new g-cost is less than or equal to the stored one, so the most recently
    /// discovered equally-good parent wins.
    pub fn record(&mut self, node: SearchNode) {
        match self.entries.entry(node.coord) {
            Entry::Occupied(mut occupied) => {
                if node.g_cost <= occupied.get().g_cost {
                    occupied.insert(node);
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(node);
            }
        }
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.entries.contains_key(&coord)
    }

    pub fn get(&self, coord: Coordinate) -> Option<&SearchNode> {
        self.entries.get(&coord)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
