use railway_flows::max_flow::all_pairs::AllPairsMaxFlow;
use railway_flows::max_flow::convergence::IncomingFlux;
use railway_flows::max_flow::edmonds_karp::EdmondsKarp;
use railway_flows::min_cost_flow::cycle_canceling::CycleCanceling;
use railway_flows::network::graph::Graph;
use railway_flows::network::service::ServiceClass;

fn main() {
    let mut graph: Graph<i64> = Graph::default();
    for station in ["Porto Campanha", "Aveiro", "Coimbra B", "Entroncamento", "Lisboa Oriente"] {
        graph.add_vertex(station);
    }

    graph.add_bidirectional_edge("Porto Campanha", "Aveiro", 8, ServiceClass::AlfaPendular).unwrap();
    graph.add_bidirectional_edge("Aveiro", "Coimbra B", 6, ServiceClass::AlfaPendular).unwrap();
    graph.add_bidirectional_edge("Coimbra B", "Entroncamento", 5, ServiceClass::Standard).unwrap();
    graph.add_bidirectional_edge("Entroncamento", "Lisboa Oriente", 9, ServiceClass::Standard).unwrap();
    graph.add_bidirectional_edge("Aveiro", "Entroncamento", 3, ServiceClass::Standard).unwrap();

    let mut residual = graph.residual_companion();
    let porto = graph.find_vertex("Porto Campanha").unwrap();
    let lisboa = graph.find_vertex("Lisboa Oriente").unwrap();

    let max_flow = EdmondsKarp::default().solve(&[porto], lisboa, &mut graph, &mut residual);
    println!("trains Porto -> Lisboa: {max_flow}");

    let (pairs, best) = AllPairsMaxFlow::default().solve(&mut graph, &mut residual);
    println!("widest station pairs ({best} trains):");
    for (v1, v2) in pairs {
        println!("  {} <-> {}", graph.vertex(v1).unwrap().id(), graph.vertex(v2).unwrap().id());
    }

    let flux = IncomingFlux::default().solve(lisboa, &mut graph, &mut residual);
    println!("trains converging on Lisboa Oriente: {flux}");

    let (flow, cost) = CycleCanceling::default().solve(porto, lisboa, &mut graph, &mut residual);
    println!("routing {flow} trains at minimum cost {cost}");
}
