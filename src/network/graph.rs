use crate::network::edge::Edge;
use crate::network::service::ServiceClass;
use crate::network::vertex::Vertex;
use num_traits::NumAssign;
use rand::Rng;
use std::collections::{HashMap, VecDeque};
use std::ops::Neg;

/// A railway network: stations and directed capacity links, stored in
/// dense arenas and referenced by index. A second instance with identical
/// topology can serve as the live residual network; edges of the two are
/// tied together through their corresponding-edge indices.
pub struct Graph<Flow> {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges: Vec<Edge<Flow>>,
    index: HashMap<String, usize>,
    num_edge_pairs: usize,
}

impl<Flow> Default for Graph<Flow> {
    fn default() -> Self {
        Graph { vertices: Vec::new(), edges: Vec::new(), index: HashMap::new(), num_edge_pairs: 0 }
    }
}

impl<Flow> Graph<Flow>
where
    Flow: NumAssign + Ord + Copy,
{
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn num_edge_pairs(&self) -> usize {
        self.num_edge_pairs
    }

    // returns vertex index
    pub fn add_vertex(&mut self, id: &str) -> Option<usize> {
        if self.index.contains_key(id) {
            return None;
        }
        let index = self.vertices.len();
        self.index.insert(id.to_string(), index);
        self.vertices.push(Vertex::new(id));
        Some(index)
    }

    pub fn find_vertex(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    pub fn get_edge(&self, edge_id: usize) -> Option<Edge<Flow>> {
        self.edges.get(edge_id).cloned()
    }

    pub(crate) fn push_edge(&mut self, from: usize, to: usize, capacity: Flow, service: ServiceClass, cost: Flow) -> usize {
        let edge_id = self.edges.len();
        self.edges.push(Edge::new(from, to, capacity, service, cost));
        self.vertices[from].adj.push(edge_id);
        self.vertices[to].incoming.push(edge_id);
        edge_id
    }

    pub(crate) fn wire_reverse(&mut self, a: usize, b: usize) {
        debug_assert!(self.edges[a].reverse.is_none() && self.edges[b].reverse.is_none());
        self.edges[a].reverse = Some(b);
        self.edges[b].reverse = Some(a);
    }

    // returns edge index
    pub fn add_directed_edge(&mut self, source: &str, dest: &str, capacity: Flow, service: ServiceClass) -> Option<usize> {
        let from = self.find_vertex(source)?;
        let to = self.find_vertex(dest)?;
        Some(self.push_edge(from, to, capacity, service, service.cost()))
    }

    // returns both edge indices, source -> dest first
    pub fn add_bidirectional_edge(&mut self, source: &str, dest: &str, capacity: Flow, service: ServiceClass) -> Option<(usize, usize)> {
        let from = self.find_vertex(source)?;
        let to = self.find_vertex(dest)?;
        let e1 = self.push_edge(from, to, capacity, service, service.cost());
        let e2 = self.push_edge(to, from, capacity, service, service.cost());
        self.wire_reverse(e1, e2);
        self.num_edge_pairs += 1;
        Some((e1, e2))
    }

    /// Ties an edge to its counterpart in a parallel graph instance.
    /// Each edge may be linked exactly once.
    pub fn link_corresponding(&mut self, edge_id: usize, corresponding: usize) {
        assert!(self.edges[edge_id].corresponding.is_none(), "edge {edge_id} is already linked to a corresponding edge");
        self.edges[edge_id].corresponding = Some(corresponding);
    }

    /// Builds the parallel residual network: identical stations, identical
    /// edge topology, and corresponding-edge links wired in both directions.
    pub fn residual_companion(&mut self) -> Graph<Flow> {
        let mut residual = Graph::default();
        for vertex in &self.vertices {
            residual.add_vertex(vertex.id());
        }
        for edge in &self.edges {
            residual.push_edge(edge.from, edge.to, edge.capacity, edge.service, edge.cost);
        }
        for edge_id in 0..self.edges.len() {
            residual.edges[edge_id].reverse = self.edges[edge_id].reverse;
            residual.edges[edge_id].enabled = self.edges[edge_id].enabled;
            residual.link_corresponding(edge_id, edge_id);
            self.link_corresponding(edge_id, edge_id);
        }
        residual.num_edge_pairs = self.num_edge_pairs;
        residual
    }

    pub fn reset_flows(&mut self) {
        for edge in &mut self.edges {
            edge.flow = Flow::zero();
        }
    }

    /// Rewrites the residual network's capacities from this graph's current
    /// capacities and flows, and carries the enabled flags over.
    pub fn sync_residual(&self, residual: &mut Graph<Flow>) {
        for edge in &self.edges {
            let r = edge.corresponding.expect("edge is not linked to a residual edge");
            residual.edges[r].capacity = edge.residual_capacity();
            residual.edges[r].enabled = edge.enabled;
        }
    }

    // plain DFS over the raw adjacency; disabled edges and capacities are
    // deliberately not consulted (cheap pruning before a full max-flow run)
    pub fn reachable_from(&self, source: usize) -> Vec<bool> {
        let mut visited = vec![false; self.vertices.len()];
        let mut stack = vec![source];
        visited[source] = true;
        while let Some(u) = stack.pop() {
            for &edge_id in &self.vertices[u].adj {
                let to = self.edges[edge_id].to;
                if !visited[to] {
                    visited[to] = true;
                    stack.push(to);
                }
            }
        }
        visited
    }

    /// Every station reachable from `station` whose out-degree is exactly
    /// one, i.e. the line termini of its connected component.
    pub fn end_of_lines(&self, station: usize) -> Vec<usize> {
        let mut termini = Vec::new();
        let mut visited = vec![false; self.vertices.len()];
        let mut que = VecDeque::from([station]);
        visited[station] = true;

        while let Some(u) = que.pop_front() {
            if self.vertices[u].adj.len() == 1 {
                termini.push(u);
            }
            for &edge_id in &self.vertices[u].adj {
                let to = self.edges[edge_id].to;
                if !visited[to] {
                    visited[to] = true;
                    que.push_back(to);
                }
            }
        }
        termini
    }

    /// Disables each given edge and its reverse, simulating line failures.
    pub fn deactivate_edges(&mut self, edges: &[usize]) -> Vec<usize> {
        for &edge_id in edges {
            self.edges[edge_id].enabled = false;
            if let Some(reverse) = self.edges[edge_id].reverse {
                self.edges[reverse].enabled = false;
            }
        }
        edges.to_vec()
    }

    pub fn activate_edges(&mut self, edges: &[usize]) {
        for &edge_id in edges {
            self.edges[edge_id].enabled = true;
            if let Some(reverse) = self.edges[edge_id].reverse {
                self.edges[reverse].enabled = true;
            }
        }
    }

    /// Disables `num_edges` distinct randomly drawn edges (and their
    /// reverses) and returns them. The generator is caller-supplied so
    /// simulations can be reproduced from a seed.
    pub fn deactivate_random_edges<R: Rng + ?Sized>(&mut self, num_edges: usize, rng: &mut R) -> Vec<usize> {
        let enabled_pairs = self.edges.iter().filter(|e| e.enabled).count() / 2;
        assert!(num_edges <= enabled_pairs, "cannot deactivate {num_edges} of {enabled_pairs} enabled edge pairs");

        let mut deactivated = Vec::new();
        while deactivated.len() < num_edges {
            let station = rng.gen_range(0..self.vertices.len());
            let degree = self.vertices[station].adj.len();
            if degree == 0 {
                continue;
            }
            let edge_id = self.vertices[station].adj[rng.gen_range(0..degree)];
            if self.edges[edge_id].enabled {
                self.edges[edge_id].enabled = false;
                if let Some(reverse) = self.edges[edge_id].reverse {
                    self.edges[reverse].enabled = false;
                }
                deactivated.push(edge_id);
            }
        }
        deactivated
    }

    /// Total flow arriving at a station over its incoming edges.
    pub fn flow_into(&self, station: usize) -> Flow {
        self.vertices[station].incoming.iter().fold(Flow::zero(), |acc, &edge_id| acc + self.edges[edge_id].flow)
    }
}

impl<Flow> Graph<Flow>
where
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy,
{
    pub fn minimum_cost(&self) -> Flow {
        self.edges.iter().fold(Flow::zero(), |cost, edge| cost + edge.cost * edge.flow)
    }

    /// Builds the cost-residual network for cycle canceling: per edge, a
    /// forward arc with the remaining capacity at the edge's cost and a
    /// backward arc with the routed flow at the negated cost, both linked
    /// back to the originating edge.
    pub fn cost_residual(&self) -> Graph<Flow> {
        let mut residual = Graph::default();
        for vertex in &self.vertices {
            residual.add_vertex(vertex.id());
        }
        for (edge_id, edge) in self.edges.iter().enumerate() {
            let forward = residual.push_edge(edge.from, edge.to, edge.residual_capacity(), edge.service, edge.cost);
            let backward = residual.push_edge(edge.to, edge.from, edge.flow, edge.service, -edge.cost);
            residual.wire_reverse(forward, backward);
            residual.edges[forward].enabled = edge.enabled;
            residual.edges[backward].enabled = edge.enabled;
            residual.link_corresponding(forward, edge_id);
            residual.link_corresponding(backward, edge_id);
            residual.num_edge_pairs += 1;
        }
        residual
    }
}
