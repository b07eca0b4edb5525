//! Minimum spanning trees over the undirected projection of the network.
//!
//! Flights are directed and may be parallel, so both algorithms first collapse
//! the graph into one [`UndirectedEdge`] per airport pair, keeping the
//! cheapest cost seen in either direction. A network that is not connected
//! yields a spanning forest with [`SpanningTree::disconnected`] set; the edges
//! found are always returned.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::disjoint_set::DisjointSet;
use crate::error::{Error, Result};
use crate::graph::{AirportId, Graph};
use crate::heap::PriorityQueue;

/// Algorithm that produced a [`SpanningTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MstAlgorithm {
    Prim,
    Kruskal,
}

impl fmt::Display for MstAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            MstAlgorithm::Prim => "prim",
            MstAlgorithm::Kruskal => "kruskal",
        };
        f.write_str(value)
    }
}

/// Undirected connection between two airports with a single cost.
///
/// In the projection `from` sorts before `to` by code. In a Prim tree `from`
/// is the parent already in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UndirectedEdge {
    pub from: String,
    pub to: String,
    pub cost: u64,
}

/// Spanning tree (or forest) chosen by one of the MST algorithms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanningTree {
    pub algorithm: MstAlgorithm,
    pub edges: Vec<UndirectedEdge>,
    pub total_cost: u64,
    /// Connected components covered, isolated airports included.
    pub components: usize,
    /// Set when more than one component exists and the result is a forest.
    pub disconnected: bool,
}

impl SpanningTree {
    fn new(algorithm: MstAlgorithm, edges: Vec<UndirectedEdge>, components: usize) -> Self {
        let total_cost = edges.iter().map(|edge| edge.cost).sum();
        let disconnected = components > 1;
        if disconnected {
            warn!(
                %algorithm,
                components,
                edges = edges.len(),
                "network is disconnected; returning a spanning forest"
            );
        }
        Self {
            algorithm,
            edges,
            total_cost,
            components,
            disconnected,
        }
    }

    /// Return the tree only if it spans the whole network.
    pub fn require_connected(self) -> Result<Self> {
        if self.disconnected {
            return Err(Error::DisconnectedNetwork {
                components: self.components,
            });
        }
        Ok(self)
    }
}

/// Projection edge keyed by airport index, used internally by both builders.
#[derive(Debug, Clone, Copy)]
struct IndexedEdge {
    a: AirportId,
    b: AirportId,
    cost: u64,
}

fn project(graph: &Graph) -> Vec<IndexedEdge> {
    let mut positions: HashMap<(AirportId, AirportId), usize> = HashMap::new();
    let mut edges: Vec<IndexedEdge> = Vec::new();

    for flight in graph.flights() {
        if flight.origin == flight.destination {
            continue;
        }
        let origin = graph.airport_at(flight.origin);
        let destination = graph.airport_at(flight.destination);
        let (a, b) = if origin.code <= destination.code {
            (flight.origin, flight.destination)
        } else {
            (flight.destination, flight.origin)
        };

        match positions.get(&(a, b)) {
            Some(&position) => {
                let existing = &mut edges[position];
                existing.cost = existing.cost.min(flight.cost);
            }
            None => {
                positions.insert((a, b), edges.len());
                edges.push(IndexedEdge {
                    a,
                    b,
                    cost: flight.cost,
                });
            }
        }
    }

    edges
}

fn to_named(graph: &Graph, from: AirportId, to: AirportId, cost: u64) -> UndirectedEdge {
    UndirectedEdge {
        from: graph.airport_at(from).code.clone(),
        to: graph.airport_at(to).code.clone(),
        cost,
    }
}

/// Collapse every directed and parallel flight into one edge per airport pair
/// carrying the minimum cost. Edges appear in first-seen order; self-loops are
/// dropped.
pub fn build_undirected_projection(graph: &Graph) -> Vec<UndirectedEdge> {
    project(graph)
        .into_iter()
        .map(|edge| to_named(graph, edge.a, edge.b, edge.cost))
        .collect()
}

/// Prim's algorithm starting from the first airport.
///
/// When the queue drains with airports still outside the tree, growth
/// restarts from the next such airport in insertion order, so a disconnected
/// network yields one tree per component.
pub fn prim_mst(graph: &Graph) -> Result<SpanningTree> {
    let count = graph.airport_count();
    let mut undirected: Vec<Vec<(AirportId, u64)>> = vec![Vec::new(); count];
    for edge in project(graph) {
        undirected[edge.a].push((edge.b, edge.cost));
        undirected[edge.b].push((edge.a, edge.cost));
    }

    let mut key = vec![u64::MAX; count];
    let mut parent: Vec<Option<AirportId>> = vec![None; count];
    let mut in_tree = vec![false; count];
    let mut edges = Vec::new();
    let mut components = 0;

    for root in 0..count {
        if in_tree[root] {
            continue;
        }
        components += 1;
        key[root] = 0;

        let mut queue = PriorityQueue::new();
        queue.insert((0u64, root));

        while !queue.is_empty() {
            let (_, node) = queue.extract_min()?;
            if in_tree[node] {
                continue;
            }
            in_tree[node] = true;

            if let Some(from) = parent[node] {
                edges.push(to_named(graph, from, node, key[node]));
            }

            for &(next, cost) in &undirected[node] {
                if !in_tree[next] && cost < key[next] {
                    key[next] = cost;
                    parent[next] = Some(node);
                    queue.insert((cost, next));
                }
            }
        }
    }

    debug!(edges = edges.len(), components, "prim complete");
    Ok(SpanningTree::new(MstAlgorithm::Prim, edges, components))
}

/// Kruskal's algorithm over the projection sorted by ascending cost, ties
/// kept in projection order.
pub fn kruskal_mst(graph: &Graph) -> Result<SpanningTree> {
    let mut projection = project(graph);
    projection.sort_by_key(|edge| edge.cost);

    let mut sets = DisjointSet::new(graph.airport_count());
    let mut edges = Vec::new();
    for edge in projection {
        if sets.union(edge.a, edge.b) {
            edges.push(to_named(graph, edge.a, edge.b, edge.cost));
        }
    }

    let components = sets.set_count();
    debug!(edges = edges.len(), components, "kruskal complete");
    Ok(SpanningTree::new(MstAlgorithm::Kruskal, edges, components))
}
