pub mod all_pairs;
pub mod convergence;
pub mod disruption;
pub mod edmonds_karp;
