use crate::max_flow::edmonds_karp::EdmondsKarp;
use crate::network::graph::Graph;
use log::debug;
use num_traits::NumAssign;
use std::ops::Neg;

/// Minimum operating cost for a maximum flow: establish a feasible max
/// flow first, then cancel negative-cost cycles in the cost-residual
/// network until none remain. The flow value never changes while the cost
/// strictly decreases.
#[derive(Default)]
pub struct CycleCanceling {
    edmonds_karp: EdmondsKarp,
}

impl CycleCanceling {
    /// Returns (maximum flow value, minimum total cost of routing it).
    pub fn solve<Flow>(&mut self, source: usize, target: usize, graph: &mut Graph<Flow>, residual: &mut Graph<Flow>) -> (Flow, Flow)
    where
        Flow: NumAssign + Neg<Output = Flow> + Ord + Copy,
    {
        let max_flow = self.edmonds_karp.solve(&[source], target, graph, residual);

        // the cost residual is rebuilt from the feasible flow on every run
        let mut cost_residual = graph.cost_residual();
        let mut prev: Vec<Option<(usize, usize)>> = vec![None; cost_residual.num_vertices()];

        while let Some(start) = Self::find_negative_cycle(&cost_residual, &mut prev) {
            // collect the cycle edges and their bottleneck
            let (first_from, first) = prev[start].expect("negative cycle without a predecessor");
            let mut delta = cost_residual.edges[first].residual_capacity();
            let mut cycle = vec![first];
            let mut v = first_from;
            while v != start {
                let (u, edge_id) = prev[v].expect("negative cycle chain broken");
                cycle.push(edge_id);
                delta = delta.min(cost_residual.edges[edge_id].residual_capacity());
                v = u;
            }
            debug_assert!(delta > Flow::zero());
            debug!("canceling a negative cycle of {} edges", cycle.len());

            Self::cancel(&cycle, delta, graph, &mut cost_residual);
        }

        (max_flow, graph.minimum_cost())
    }

    // bellman-ford over the cost-residual network; a relaxation surviving
    // |V| passes proves a negative cycle, returned via a vertex on it
    fn find_negative_cycle<Flow>(residual: &Graph<Flow>, prev: &mut [Option<(usize, usize)>]) -> Option<usize>
    where
        Flow: NumAssign + Neg<Output = Flow> + Ord + Copy,
    {
        prev.fill(None);
        let mut start = usize::MAX;
        let mut dist = vec![Flow::zero(); residual.num_vertices()];

        for _ in 0..residual.num_vertices() {
            let mut updated = false;
            for (edge_id, edge) in residual.edges.iter().enumerate() {
                if !edge.enabled || edge.residual_capacity() <= Flow::zero() {
                    continue;
                }
                if dist[edge.from] + edge.cost < dist[edge.to] {
                    dist[edge.to] = dist[edge.from] + edge.cost;
                    prev[edge.to] = Some((edge.from, edge_id));
                    start = edge.to;
                    updated = true;
                }
            }
            if !updated {
                return None;
            }
        }

        // walk the predecessor chain until it closes on itself
        let mut visited = vec![false; residual.num_vertices()];
        let mut v = start;
        loop {
            let (u, _) = prev[v].expect("negative cycle chain broken");
            if visited[u] {
                return Some(v);
            }
            visited[u] = true;
            v = u;
        }
    }

    // push `delta` around the cycle: forward arcs add flow to their regular
    // edge, negated-cost arcs remove previously routed flow
    fn cancel<Flow>(cycle: &[usize], delta: Flow, graph: &mut Graph<Flow>, residual: &mut Graph<Flow>)
    where
        Flow: NumAssign + Neg<Output = Flow> + Ord + Copy,
    {
        for &edge_id in cycle {
            let reverse = residual.edges[edge_id].reverse().expect("cost-residual edge has no reverse");
            let corresponding = residual.edges[edge_id].corresponding().expect("cost-residual edge is not linked to a regular edge");

            if residual.edges[edge_id].cost >= Flow::zero() {
                graph.edges[corresponding].flow += delta;
            } else {
                graph.edges[corresponding].flow -= delta;
            }
            residual.edges[edge_id].capacity -= delta;
            residual.edges[reverse].capacity += delta;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::network::service::ServiceClass;
    use rstest::*;

    #[rstest]
    fn cheaper_line_is_preferred_over_the_shorter_expensive_one() {
        let mut graph: Graph<i64> = Graph::default();
        for station in ["S", "H", "A", "B", "T"] {
            graph.add_vertex(station);
        }
        graph.add_bidirectional_edge("S", "H", 2, ServiceClass::Standard).unwrap();
        let (expensive_out, _) = graph.add_bidirectional_edge("H", "B", 2, ServiceClass::AlfaPendular).unwrap();
        graph.add_bidirectional_edge("B", "T", 2, ServiceClass::AlfaPendular).unwrap();
        let (cheap_out, _) = graph.add_bidirectional_edge("H", "A", 2, ServiceClass::Standard).unwrap();
        graph.add_bidirectional_edge("A", "T", 2, ServiceClass::Standard).unwrap();
        let mut residual = graph.residual_companion();

        let source = graph.find_vertex("S").unwrap();
        let target = graph.find_vertex("T").unwrap();
        let (max_flow, cost) = CycleCanceling::default().solve(source, target, &mut graph, &mut residual);

        // all flow is moved onto the Standard line: 2 trains over three
        // segments at cost 2 each
        assert_eq!(max_flow, 2);
        assert_eq!(cost, 12);
        assert_eq!(graph.edges[cheap_out].flow, 2);
        assert_eq!(graph.edges[expensive_out].flow, 0);
    }

    #[rstest]
    fn already_optimal_flow_is_left_untouched() {
        let mut graph: Graph<i64> = Graph::default();
        for station in ["Aveiro", "Coimbra", "Pombal"] {
            graph.add_vertex(station);
        }
        graph.add_bidirectional_edge("Aveiro", "Coimbra", 5, ServiceClass::Standard).unwrap();
        graph.add_bidirectional_edge("Coimbra", "Pombal", 3, ServiceClass::Standard).unwrap();
        let mut residual = graph.residual_companion();

        let aveiro = graph.find_vertex("Aveiro").unwrap();
        let pombal = graph.find_vertex("Pombal").unwrap();
        let (max_flow, cost) = CycleCanceling::default().solve(aveiro, pombal, &mut graph, &mut residual);

        assert_eq!(max_flow, 3);
        assert_eq!(cost, 12);
    }

    #[rstest]
    fn both_service_classes_are_billed_at_their_own_rate() {
        let mut graph: Graph<i64> = Graph::default();
        for station in ["S", "A", "B", "T"] {
            graph.add_vertex(station);
        }
        graph.add_bidirectional_edge("S", "A", 2, ServiceClass::Standard).unwrap();
        graph.add_bidirectional_edge("A", "T", 2, ServiceClass::Standard).unwrap();
        graph.add_bidirectional_edge("S", "B", 2, ServiceClass::AlfaPendular).unwrap();
        graph.add_bidirectional_edge("B", "T", 2, ServiceClass::AlfaPendular).unwrap();
        let mut residual = graph.residual_companion();

        let source = graph.find_vertex("S").unwrap();
        let target = graph.find_vertex("T").unwrap();
        let (max_flow, cost) = CycleCanceling::default().solve(source, target, &mut graph, &mut residual);

        // both lines are saturated: 2 trains at 2+2 plus 2 trains at 4+4
        assert_eq!(max_flow, 4);
        assert_eq!(cost, 24);
    }
}
