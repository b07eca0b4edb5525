#![allow(dead_code)]

use std::collections::HashSet;
use std::path::PathBuf;

use airnet_lib::{load_routes, Graph, LoadOptions, LoadReport};
use proptest::prelude::*;

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/sample_routes.csv")
}

pub fn load_fixture() -> (Graph, LoadReport) {
    load_routes(&fixture_path(), &LoadOptions::default()).expect("fixture loads")
}

/// Build a graph from `(origin, destination, distance, cost)` tuples, creating
/// airports on first sight with an empty region.
pub fn graph_from(flights: &[(&str, &str, u64, u64)]) -> Graph {
    let mut graph = Graph::new();
    for (origin, destination, distance, cost) in flights {
        graph.insert_node(origin, "");
        graph.insert_node(destination, "");
        graph
            .insert_edge(origin, destination, *distance, *cost)
            .expect("endpoints inserted");
    }
    graph
}

/// Random simple digraph (no parallel flights, no self-loops) over airports
/// named `N0..N{size}` with `2 <= size <= max_size`.
pub fn arb_graph(max_size: usize) -> impl Strategy<Value = Graph> {
    (2..=max_size).prop_flat_map(|size| {
        prop::collection::vec(
            (0..size, 0..size, 1u64..=20, 1u64..=20),
            0..=size * (size - 1),
        )
        .prop_map(move |flights| simple_graph(size, &flights))
    })
}

fn simple_graph(size: usize, flights: &[(usize, usize, u64, u64)]) -> Graph {
    let mut graph = Graph::new();
    let codes: Vec<String> = (0..size).map(|i| format!("N{i}")).collect();
    for code in &codes {
        graph.insert_node(code, "");
    }
    let mut seen = HashSet::new();
    for &(origin, destination, distance, cost) in flights {
        if origin == destination || !seen.insert((origin, destination)) {
            continue;
        }
        graph
            .insert_edge(&codes[origin], &codes[destination], distance, cost)
            .expect("known airports");
    }
    graph
}
