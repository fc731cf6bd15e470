use crate::network::graph::Graph;
use log::debug;
use num_traits::NumAssign;
use std::collections::VecDeque;

/// Shortest-augmenting-path maximum flow over a railway network and its
/// parallel residual network. Paths are searched in the residual network;
/// augmentations are written back to the regular network through the
/// corresponding-edge links.
#[derive(Default)]
pub struct EdmondsKarp {
    visited: Vec<bool>,
    pred: Vec<Option<usize>>,
}

impl EdmondsKarp {
    /// Maximum simultaneous flow from any of `sources` into `target`.
    /// Regular flows are reset and the residual network is rebuilt from the
    /// current capacities before the search starts.
    pub fn solve<Flow>(&mut self, sources: &[usize], target: usize, graph: &mut Graph<Flow>, residual: &mut Graph<Flow>) -> Flow
    where
        Flow: NumAssign + Ord + Copy,
    {
        debug_assert!(sources.iter().all(|&s| s != target));

        graph.reset_flows();
        graph.sync_residual(residual);

        let mut max_flow = Flow::zero();
        let mut augmentations = 0usize;
        while self.path(sources, target, residual) {
            let delta = self.bottleneck(target, residual);
            debug_assert!(delta > Flow::zero());
            self.augment(target, delta, graph, residual);
            max_flow += delta;
            augmentations += 1;
        }
        debug!("max flow into {target} reached after {augmentations} augmentations");

        max_flow
    }

    // multi-source bfs over the residual network; returns true the instant
    // the target is reached
    fn path<Flow>(&mut self, sources: &[usize], target: usize, residual: &Graph<Flow>) -> bool
    where
        Flow: NumAssign + Ord + Copy,
    {
        self.visited.clear();
        self.visited.resize(residual.num_vertices(), false);
        self.pred.clear();
        self.pred.resize(residual.num_vertices(), None);

        let mut que = VecDeque::new();
        for &source in sources {
            if !self.visited[source] {
                self.visited[source] = true;
                que.push_back(source);
            }
        }

        while let Some(u) = que.pop_front() {
            for &edge_id in &residual.vertices[u].adj {
                let edge = &residual.edges[edge_id];
                if !edge.enabled || self.visited[edge.to] || edge.residual_capacity() <= Flow::zero() {
                    continue;
                }
                self.visited[edge.to] = true;
                self.pred[edge.to] = Some(edge_id);
                if edge.to == target {
                    return true;
                }
                que.push_back(edge.to);
            }
        }

        false
    }

    // minimum residual capacity along the predecessor chain
    fn bottleneck<Flow>(&self, target: usize, residual: &Graph<Flow>) -> Flow
    where
        Flow: NumAssign + Ord + Copy,
    {
        let first = self.pred[target].expect("bottleneck requested without a path");
        let mut delta = residual.edges[first].residual_capacity();
        let mut v = target;
        while let Some(edge_id) = self.pred[v] {
            delta = delta.min(residual.edges[edge_id].residual_capacity());
            v = residual.edges[edge_id].from;
        }
        delta
    }

    // walk the predecessor chain and push `value` across each edge
    fn augment<Flow>(&self, target: usize, value: Flow, graph: &mut Graph<Flow>, residual: &mut Graph<Flow>)
    where
        Flow: NumAssign + Ord + Copy,
    {
        let mut v = target;
        while let Some(edge_id) = self.pred[v] {
            Self::push(edge_id, value, graph, residual);
            v = residual.edges[edge_id].from;
        }
    }

    fn push<Flow>(edge_id: usize, value: Flow, graph: &mut Graph<Flow>, residual: &mut Graph<Flow>)
    where
        Flow: NumAssign + Ord + Copy,
    {
        let corresponding = residual.edges[edge_id].corresponding().expect("residual edge is not linked to a regular edge");
        let reverse = residual.edges[edge_id].reverse().expect("residual edge has no reverse");

        // update the regular edge; an increment past capacity saturates the
        // edge and cancels the surplus against the reverse edge's flow
        let capacity = graph.edges[corresponding].capacity;
        let new_flow = graph.edges[corresponding].flow + value;
        if new_flow > capacity {
            let surplus = new_flow - capacity;
            let regular_reverse = graph.edges[corresponding].reverse().expect("regular edge has no reverse");
            graph.edges[corresponding].flow = capacity;
            graph.edges[regular_reverse].flow -= surplus;
        } else {
            graph.edges[corresponding].flow = new_flow;
        }

        // update residual capacities
        residual.edges[edge_id].capacity -= value;
        residual.edges[reverse].capacity += value;
    }
}
