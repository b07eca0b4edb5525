use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{AirportId, Flight, Graph};
use crate::heap::PriorityQueue;

/// Weight dimension that drives a shortest-path relaxation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Minimise total flight distance.
    #[default]
    Distance,
    /// Minimise total ticket cost.
    Cost,
}

impl Metric {
    /// Weight minimised by the search.
    fn primary(self, flight: &Flight) -> u64 {
        match self {
            Metric::Distance => flight.distance,
            Metric::Cost => flight.cost,
        }
    }

    /// Weight accumulated passively along the chosen path.
    fn secondary(self, flight: &Flight) -> u64 {
        match self {
            Metric::Distance => flight.cost,
            Metric::Cost => flight.distance,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Metric::Distance => "distance",
            Metric::Cost => "cost",
        };
        f.write_str(value)
    }
}

/// Result of a path query: airport codes from origin to destination inclusive.
///
/// An empty path means either that no route exists or that an endpoint is not
/// in the graph; check [`Graph::contains`] first to tell the two apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Path {
    pub airports: Vec<String>,
    pub total_distance: u64,
    pub total_cost: u64,
}

impl Path {
    /// The "no path" result.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Number of flights taken.
    pub fn hop_count(&self) -> usize {
        self.airports.len().saturating_sub(1)
    }

    pub fn origin(&self) -> Option<&str> {
        self.airports.first().map(String::as_str)
    }

    pub fn destination(&self) -> Option<&str> {
        self.airports.last().map(String::as_str)
    }

    fn from_totals(airports: Vec<String>, metric: Metric, primary: u64, secondary: u64) -> Self {
        let (total_distance, total_cost) = match metric {
            Metric::Distance => (primary, secondary),
            Metric::Cost => (secondary, primary),
        };
        Self {
            airports,
            total_distance,
            total_cost,
        }
    }
}

/// Run Dijkstra's algorithm from `origin` to `destination`, relaxing on the
/// weight selected by `metric` while the other weight accumulates along the
/// same predecessor chain.
///
/// Returns an empty [`Path`] when either endpoint is unknown or the
/// destination is unreachable. The search stops as soon as the destination is
/// settled.
pub fn find_route_dijkstra(
    graph: &Graph,
    origin: &str,
    destination: &str,
    metric: Metric,
) -> Result<Path> {
    let (Some(start), Some(goal)) = (graph.id_of(origin), graph.id_of(destination)) else {
        return Ok(Path::empty());
    };
    debug!(origin, destination, %metric, "running dijkstra");

    let count = graph.airport_count();
    let mut primary = vec![u64::MAX; count];
    let mut secondary = vec![0u64; count];
    let mut parents: Vec<Option<AirportId>> = vec![None; count];
    let mut visited = vec![false; count];
    let mut queue = PriorityQueue::new();

    primary[start] = 0;
    queue.insert((0u64, start));

    while !queue.is_empty() {
        let (_, node) = queue.extract_min()?;
        if visited[node] {
            continue;
        }
        visited[node] = true;

        if node == goal {
            break;
        }

        for flight in graph.flights_from(node) {
            let next = flight.destination;
            if visited[next] {
                continue;
            }

            let candidate = primary[node].saturating_add(metric.primary(flight));
            if candidate < primary[next] {
                primary[next] = candidate;
                secondary[next] = secondary[node].saturating_add(metric.secondary(flight));
                parents[next] = Some(node);
                queue.insert((candidate, next));
            }
        }
    }

    if primary[goal] == u64::MAX {
        return Ok(Path::empty());
    }

    let airports = reconstruct_path(graph, start, goal, |node| parents[node], |node| node)?;
    Ok(Path::from_totals(
        airports,
        metric,
        primary[goal],
        secondary[goal],
    ))
}

/// Shortest distance paths from `origin` to every other airport tagged with
/// `region`.
///
/// Unreachable airports are left out. Results follow the graph's airport
/// insertion order, not distance; sort explicitly if needed.
pub fn shortest_paths_to_region(graph: &Graph, origin: &str, region: &str) -> Result<Vec<Path>> {
    shortest_paths_to_region_by(graph, origin, region, Metric::Distance)
}

/// Same as [`shortest_paths_to_region`] with a selectable metric.
pub fn shortest_paths_to_region_by(
    graph: &Graph,
    origin: &str,
    region: &str,
    metric: Metric,
) -> Result<Vec<Path>> {
    let mut paths = Vec::new();
    for airport in graph.airports() {
        if airport.region != region || airport.code == origin {
            continue;
        }
        let path = find_route_dijkstra(graph, origin, &airport.code, metric)?;
        if !path.is_empty() {
            paths.push(path);
        }
    }
    debug!(origin, region, found = paths.len(), "region search complete");
    Ok(paths)
}

/// Minimum-distance path from `origin` to `destination` using at most
/// `max_stops` flights.
///
/// This is a bounded-hop Dijkstra over `(airport, hops)` states ordered by
/// `(distance, hops, airport)`, so the answer is optimal under the hop limit.
/// A plain FIFO expansion over a weighted graph would only be optimal when
/// the queue happens to relax airports in distance order. A state is skipped
/// when the same airport was already settled with no more hops, since that
/// earlier state is at least as short and can reach everything this one can.
pub fn shortest_path_with_stop_limit(
    graph: &Graph,
    origin: &str,
    destination: &str,
    max_stops: usize,
) -> Result<Path> {
    let (Some(start), Some(goal)) = (graph.id_of(origin), graph.id_of(destination)) else {
        return Ok(Path::empty());
    };
    debug!(origin, destination, max_stops, "running hop-bounded search");

    type State = (AirportId, usize);

    let mut best: HashMap<State, u64> = HashMap::new();
    let mut parents: HashMap<State, State> = HashMap::new();
    let mut settled_hops: Vec<Option<usize>> = vec![None; graph.airport_count()];
    let mut queue = PriorityQueue::new();

    best.insert((start, 0), 0);
    queue.insert((0u64, 0usize, start, 0u64));

    let mut found = None;
    while !queue.is_empty() {
        let (distance, hops, node, cost) = queue.extract_min()?;
        if settled_hops[node].is_some_and(|settled| settled <= hops) {
            continue;
        }
        settled_hops[node] = Some(hops);

        if node == goal {
            found = Some(((node, hops), distance, cost));
            break;
        }
        if hops >= max_stops {
            continue;
        }

        for flight in graph.flights_from(node) {
            let state = (flight.destination, hops + 1);
            let candidate = distance.saturating_add(flight.distance);
            if best.get(&state).map_or(true, |&known| candidate < known) {
                best.insert(state, candidate);
                parents.insert(state, (node, hops));
                queue.insert((
                    candidate,
                    hops + 1,
                    flight.destination,
                    cost.saturating_add(flight.cost),
                ));
            }
        }
    }

    let Some((goal_state, distance, cost)) = found else {
        return Ok(Path::empty());
    };

    let airports = reconstruct_path(
        graph,
        (start, 0),
        goal_state,
        |state| parents.get(&state).copied(),
        |(node, _)| node,
    )?;
    Ok(Path::from_totals(airports, Metric::Distance, distance, cost))
}

/// Walk predecessor links from `goal` back to `start` and return the airport
/// codes in travel order.
///
/// A chain that stops early or runs longer than the number of airports plus
/// one cannot be a simple path and is reported as an internal fault.
fn reconstruct_path<S: Copy + PartialEq>(
    graph: &Graph,
    start: S,
    goal: S,
    parent_of: impl Fn(S) -> Option<S>,
    airport_of: impl Fn(S) -> AirportId,
) -> Result<Vec<String>> {
    let broken = || Error::BrokenPredecessorChain {
        origin: graph.airport_at(airport_of(start)).code.clone(),
        destination: graph.airport_at(airport_of(goal)).code.clone(),
    };

    let mut chain = vec![goal];
    let mut current = goal;
    while current != start {
        if chain.len() > graph.airport_count() {
            return Err(broken());
        }
        current = parent_of(current).ok_or_else(broken)?;
        chain.push(current);
    }

    Ok(chain
        .into_iter()
        .rev()
        .map(|state| graph.airport_at(airport_of(state)).code.clone())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph {
        let mut graph = Graph::new();
        for (code, region) in [("A", "X"), ("B", "Y"), ("C", "Y"), ("D", "Z")] {
            graph.insert_node(code, region);
        }
        graph.insert_edge("A", "B", 10, 5).unwrap();
        graph.insert_edge("B", "C", 10, 5).unwrap();
        graph.insert_edge("A", "C", 30, 8).unwrap();
        graph.insert_edge("C", "D", 5, 2).unwrap();
        graph
    }

    #[test]
    fn dijkstra_prefers_shorter_multi_hop_route() {
        let graph = diamond();
        let path = find_route_dijkstra(&graph, "A", "D", Metric::Distance).unwrap();
        assert_eq!(path.airports, vec!["A", "B", "C", "D"]);
        assert_eq!(path.total_distance, 25);
        assert_eq!(path.total_cost, 12);
    }

    #[test]
    fn dijkstra_by_cost_takes_cheapest_route() {
        let graph = diamond();
        let path = find_route_dijkstra(&graph, "A", "D", Metric::Cost).unwrap();
        assert_eq!(path.airports, vec!["A", "C", "D"]);
        assert_eq!(path.total_cost, 10);
        assert_eq!(path.total_distance, 35);
    }

    #[test]
    fn unknown_or_unreachable_endpoints_yield_empty_path() {
        let graph = diamond();
        assert!(find_route_dijkstra(&graph, "A", "Q", Metric::Distance)
            .unwrap()
            .is_empty());
        assert!(find_route_dijkstra(&graph, "D", "A", Metric::Distance)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn same_origin_and_destination_is_a_single_stop() {
        let graph = diamond();
        let path = find_route_dijkstra(&graph, "B", "B", Metric::Distance).unwrap();
        assert_eq!(path.airports, vec!["B"]);
        assert_eq!(path.hop_count(), 0);
        assert_eq!(path.total_distance, 0);
    }

    #[test]
    fn region_search_skips_origin_and_keeps_insertion_order() {
        let graph = diamond();
        let paths = shortest_paths_to_region(&graph, "A", "Y").unwrap();
        let targets: Vec<_> = paths.iter().filter_map(Path::destination).collect();
        assert_eq!(targets, vec!["B", "C"]);

        let from_b = shortest_paths_to_region(&graph, "B", "Y").unwrap();
        assert_eq!(from_b.len(), 1);
        assert_eq!(from_b[0].destination(), Some("C"));
    }

    #[test]
    fn stop_limit_bounds_hops() {
        let graph = diamond();
        let path = shortest_path_with_stop_limit(&graph, "A", "D", 2).unwrap();
        assert_eq!(path.airports, vec!["A", "C", "D"]);
        assert_eq!(path.total_distance, 35);
        assert_eq!(path.total_cost, 10);

        let unbounded = shortest_path_with_stop_limit(&graph, "A", "D", 3).unwrap();
        assert_eq!(unbounded.total_distance, 25);

        assert!(shortest_path_with_stop_limit(&graph, "A", "D", 1)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn zero_stops_only_reaches_origin() {
        let graph = diamond();
        assert!(shortest_path_with_stop_limit(&graph, "A", "B", 0)
            .unwrap()
            .is_empty());
        let path = shortest_path_with_stop_limit(&graph, "A", "A", 0).unwrap();
        assert_eq!(path.airports, vec!["A"]);
    }

    #[test]
    fn broken_chain_is_an_internal_fault() {
        let graph = diamond();
        let err = reconstruct_path(&graph, 0usize, 3usize, |_| None, |node| node).unwrap_err();
        assert!(matches!(err, Error::BrokenPredecessorChain { .. }));

        // A cycle that never reaches the start is caught by the length guard.
        let err = reconstruct_path(
            &graph,
            0usize,
            3usize,
            |node| Some(if node == 3 { 2 } else { 3 }),
            |node| node,
        )
        .unwrap_err();
        assert!(matches!(err, Error::BrokenPredecessorChain { .. }));
    }
}
