use tracing::info;

#[derive(Debug, Clone, Default)]
pub(crate) struct Stats {
    pub(crate) expanded_nodes: usize,
    pub(crate) iterations: usize,
    pub(crate) time_us: usize,
}

impl Stats {
    pub(crate) fn merge(&mut self, other: &Stats) {
        self.expanded_nodes += other.expanded_nodes;
        self.iterations += other.iterations;
    }

    pub(crate) fn print(&self, num_agents: usize) {
        info!(
            "Agents {:?} Time(microseconds) {:?} Expanded nodes {:?} Loop iterations {:?}",
            num_agents, self.time_us, self.expanded_nodes, self.iterations
        );
    }
}
