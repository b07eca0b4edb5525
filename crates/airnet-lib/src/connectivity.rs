use serde::Serialize;

use crate::graph::Graph;

/// Inbound and outbound flight counts for one airport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeRecord {
    pub code: String,
    pub inbound: usize,
    pub outbound: usize,
}

impl DegreeRecord {
    pub fn total(&self) -> usize {
        self.inbound + self.outbound
    }
}

/// Degree of every airport, busiest first.
///
/// Computed in a single pass over the adjacency lists. Ties on total degree
/// are ordered by airport code.
pub fn connectivity_report(graph: &Graph) -> Vec<DegreeRecord> {
    let mut inbound = vec![0usize; graph.airport_count()];
    for flight in graph.flights() {
        inbound[flight.destination] += 1;
    }

    let mut records: Vec<DegreeRecord> = graph
        .airports()
        .iter()
        .map(|airport| DegreeRecord {
            code: airport.code.clone(),
            inbound: inbound[airport.id],
            outbound: graph.flights_from(airport.id).len(),
        })
        .collect();

    records.sort_by(|a, b| b.total().cmp(&a.total()).then_with(|| a.code.cmp(&b.code)));
    records
}
