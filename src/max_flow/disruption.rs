use crate::max_flow::convergence::IncomingFlux;
use crate::max_flow::edmonds_karp::EdmondsKarp;
use crate::network::graph::Graph;
use num_traits::NumAssign;
use rand::Rng;

/// Fragility probes: how much capacity survives when part of the network
/// goes down. Every probe restores the disabled edges before returning.
#[derive(Default)]
pub struct DisruptionAnalysis {
    edmonds_karp: EdmondsKarp,
    incoming_flux: IncomingFlux,
}

impl DisruptionAnalysis {
    /// Max flow with `num_edges` randomly chosen edge pairs out of service.
    pub fn max_flow_deactivated_random<Flow, R>(
        &mut self,
        num_edges: usize,
        source: usize,
        target: usize,
        graph: &mut Graph<Flow>,
        residual: &mut Graph<Flow>,
        rng: &mut R,
    ) -> Flow
    where
        Flow: NumAssign + Ord + Copy,
        R: Rng + ?Sized,
    {
        let deactivated = graph.deactivate_random_edges(num_edges, rng);
        let reduced = self.edmonds_karp.solve(&[source], target, graph, residual);
        graph.activate_edges(&deactivated);
        reduced
    }

    /// Max flow with a caller-chosen set of edges out of service.
    pub fn max_flow_deactivated_selected<Flow>(
        &mut self,
        edges: &[usize],
        source: usize,
        target: usize,
        graph: &mut Graph<Flow>,
        residual: &mut Graph<Flow>,
    ) -> Flow
    where
        Flow: NumAssign + Ord + Copy,
    {
        let deactivated = graph.deactivate_edges(edges);
        let reduced = self.edmonds_karp.solve(&[source], target, graph, residual);
        graph.activate_edges(&deactivated);
        reduced
    }

    /// Incoming flux of a station before and after the given edges fail.
    pub fn max_flow_difference<Flow>(
        &mut self,
        station: usize,
        edges: &[usize],
        graph: &mut Graph<Flow>,
        residual: &mut Graph<Flow>,
    ) -> (Flow, Flow)
    where
        Flow: NumAssign + Ord + Copy,
    {
        let baseline = self.incoming_flux.solve(station, graph, residual);
        let deactivated = graph.deactivate_edges(edges);
        let reduced = self.incoming_flux.solve(station, graph, residual);
        graph.activate_edges(&deactivated);
        (baseline, reduced)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::network::service::ServiceClass;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::*;

    fn chain() -> (Graph<i64>, Graph<i64>) {
        let mut graph = Graph::default();
        for station in ["Aveiro", "Coimbra", "Pombal"] {
            graph.add_vertex(station);
        }
        graph.add_bidirectional_edge("Aveiro", "Coimbra", 5, ServiceClass::Standard).unwrap();
        graph.add_bidirectional_edge("Coimbra", "Pombal", 3, ServiceClass::Standard).unwrap();
        let residual = graph.residual_companion();
        (graph, residual)
    }

    #[rstest]
    fn selected_outage_is_measured_and_rolled_back() {
        let (mut graph, mut residual) = chain();
        let aveiro = graph.find_vertex("Aveiro").unwrap();
        let pombal = graph.find_vertex("Pombal").unwrap();

        let mut analysis = DisruptionAnalysis::default();
        let reduced = analysis.max_flow_deactivated_selected(&[2], aveiro, pombal, &mut graph, &mut residual);
        assert_eq!(reduced, 0);

        // edges are back in service afterwards
        assert!(graph.edges.iter().all(|e| e.enabled));
        let intact = EdmondsKarp::default().solve(&[aveiro], pombal, &mut graph, &mut residual);
        assert_eq!(intact, 3);
    }

    #[rstest]
    fn random_outage_with_every_pair_down_kills_all_flow() {
        let (mut graph, mut residual) = chain();
        let aveiro = graph.find_vertex("Aveiro").unwrap();
        let pombal = graph.find_vertex("Pombal").unwrap();

        let mut analysis = DisruptionAnalysis::default();
        let reduced = analysis.max_flow_deactivated_random(2, aveiro, pombal, &mut graph, &mut residual, &mut StdRng::seed_from_u64(7));

        assert_eq!(reduced, 0);
        assert!(graph.edges.iter().all(|e| e.enabled));
    }

    #[rstest]
    fn flux_difference_reports_baseline_and_reduced() {
        let (mut graph, mut residual) = chain();
        let pombal = graph.find_vertex("Pombal").unwrap();

        let mut analysis = DisruptionAnalysis::default();
        let (baseline, reduced) = analysis.max_flow_difference(pombal, &[2], &mut graph, &mut residual);

        assert_eq!(baseline, 3);
        assert_eq!(reduced, 0);
        assert!(graph.edges.iter().all(|e| e.enabled));
    }
}
