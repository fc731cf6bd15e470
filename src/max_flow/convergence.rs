use crate::max_flow::edmonds_karp::EdmondsKarp;
use crate::network::graph::Graph;
use num_traits::NumAssign;

/// Maximum number of trains that can converge on one station when every
/// line terminus of its component acts as a source simultaneously.
#[derive(Default)]
pub struct IncomingFlux {
    edmonds_karp: EdmondsKarp,
}

impl IncomingFlux {
    pub fn solve<Flow>(&mut self, station: usize, graph: &mut Graph<Flow>, residual: &mut Graph<Flow>) -> Flow
    where
        Flow: NumAssign + Ord + Copy,
    {
        let sources: Vec<usize> = graph.end_of_lines(station).into_iter().filter(|&v| v != station).collect();
        self.edmonds_karp.solve(&sources, station, graph, residual)
    }
}
