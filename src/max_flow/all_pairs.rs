use crate::max_flow::edmonds_karp::EdmondsKarp;
use crate::network::graph::Graph;
use num_traits::NumAssign;

/// Exhaustive search for the station pairs that support the most
/// simultaneous trains. O(V³E²) in the worst case; unreachable pairs are
/// pruned with a plain reachability scan before paying for a max-flow run.
#[derive(Default)]
pub struct AllPairsMaxFlow {
    edmonds_karp: EdmondsKarp,
}

impl AllPairsMaxFlow {
    /// Returns every unordered pair achieving the network-wide maximum
    /// flow, ties included, together with that maximum.
    pub fn solve<Flow>(&mut self, graph: &mut Graph<Flow>, residual: &mut Graph<Flow>) -> (Vec<(usize, usize)>, Flow)
    where
        Flow: NumAssign + Ord + Copy,
    {
        let mut best = Flow::zero();
        let mut winners = Vec::new();

        for v1 in 0..graph.num_vertices() {
            let reachable = graph.reachable_from(v1);
            for v2 in (v1 + 1)..graph.num_vertices() {
                if !reachable[v2] {
                    continue;
                }
                let flow = self.edmonds_karp.solve(&[v1], v2, graph, residual);
                if flow > best {
                    best = flow;
                    winners.clear();
                }
                if flow == best {
                    winners.push((v1, v2));
                }
            }
        }

        (winners, best)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::network::service::ServiceClass;
    use rstest::*;

    #[rstest]
    fn widest_pair_wins() {
        let mut graph: Graph<i64> = Graph::default();
        for station in ["Aveiro", "Coimbra", "Pombal"] {
            graph.add_vertex(station);
        }
        graph.add_bidirectional_edge("Aveiro", "Coimbra", 5, ServiceClass::Standard).unwrap();
        graph.add_bidirectional_edge("Coimbra", "Pombal", 3, ServiceClass::Standard).unwrap();
        let mut residual = graph.residual_companion();

        let (winners, best) = AllPairsMaxFlow::default().solve(&mut graph, &mut residual);

        assert_eq!(best, 5);
        assert_eq!(winners, vec![(0, 1)]);
    }

    #[rstest]
    fn equal_pairs_are_all_reported() {
        let mut graph: Graph<i64> = Graph::default();
        for station in ["Braga", "Nine", "Evora", "Beja"] {
            graph.add_vertex(station);
        }
        // two disconnected lines with the same capacity
        graph.add_bidirectional_edge("Braga", "Nine", 4, ServiceClass::Standard).unwrap();
        graph.add_bidirectional_edge("Evora", "Beja", 4, ServiceClass::Standard).unwrap();
        let mut residual = graph.residual_companion();

        let (winners, best) = AllPairsMaxFlow::default().solve(&mut graph, &mut residual);

        assert_eq!(best, 4);
        assert_eq!(winners, vec![(0, 1), (2, 3)]);
    }

    #[rstest]
    fn unreachable_pairs_are_pruned_not_reported() {
        let mut graph: Graph<i64> = Graph::default();
        for station in ["Braga", "Nine", "Evora"] {
            graph.add_vertex(station);
        }
        graph.add_bidirectional_edge("Braga", "Nine", 2, ServiceClass::Standard).unwrap();
        let mut residual = graph.residual_companion();

        let (winners, best) = AllPairsMaxFlow::default().solve(&mut graph, &mut residual);

        assert_eq!(best, 2);
        assert_eq!(winners, vec![(0, 1)]);
    }
}
