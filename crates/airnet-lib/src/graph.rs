use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Dense index of an airport inside a [`Graph`], assigned in insertion order.
pub type AirportId = usize;

/// Minimum Jaro-Winkler similarity for an airport code to be offered as a
/// suggestion. Codes are short, so the bar sits lower than it would for
/// free-text names.
const MIN_SUGGESTION_SIMILARITY: f64 = 0.7;

/// Number of suggestions attached to unknown-airport errors.
const SUGGESTION_LIMIT: usize = 3;

/// Airport node with its region tag (empty when unknown).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Airport {
    pub id: AirportId,
    pub code: String,
    pub region: String,
}

/// Directed flight between two airports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Flight {
    pub origin: AirportId,
    pub destination: AirportId,
    pub distance: u64,
    pub cost: u64,
}

/// Airport network: nodes keyed by code plus per-origin adjacency lists.
///
/// Edges are directed and parallel flights are kept. A symmetric network is
/// modelled by inserting both directions, see [`Graph::insert_route`].
#[derive(Debug, Clone, Default)]
pub struct Graph {
    airports: Vec<Airport>,
    index: HashMap<String, AirportId>,
    adjacency: Vec<Vec<Flight>>,
    flight_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an airport, returning its index.
    ///
    /// Re-inserting a known code is a no-op except that an empty region tag
    /// may be filled in once; a non-empty tag is never replaced.
    pub fn insert_node(&mut self, code: &str, region: &str) -> AirportId {
        if let Some(&id) = self.index.get(code) {
            let airport = &mut self.airports[id];
            if airport.region.is_empty() && !region.is_empty() {
                airport.region = region.to_string();
            }
            return id;
        }

        let id = self.airports.len();
        self.airports.push(Airport {
            id,
            code: code.to_string(),
            region: region.to_string(),
        });
        self.index.insert(code.to_string(), id);
        self.adjacency.push(Vec::new());
        id
    }

    /// Append a directed flight from `origin` to `destination`.
    ///
    /// Both airports must already exist.
    pub fn insert_edge(
        &mut self,
        origin: &str,
        destination: &str,
        distance: u64,
        cost: u64,
    ) -> Result<()> {
        let origin_id = self.resolve(origin)?;
        let destination_id = self.resolve(destination)?;
        self.adjacency[origin_id].push(Flight {
            origin: origin_id,
            destination: destination_id,
            distance,
            cost,
        });
        self.flight_count += 1;
        Ok(())
    }

    /// Insert a flight and, when `bidirectional` is set, its reverse.
    pub fn insert_route(
        &mut self,
        origin: &str,
        destination: &str,
        distance: u64,
        cost: u64,
        bidirectional: bool,
    ) -> Result<()> {
        self.insert_edge(origin, destination, distance, cost)?;
        if bidirectional && origin != destination {
            self.insert_edge(destination, origin, distance, cost)?;
        }
        Ok(())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Index of the airport with `code`, if present.
    pub fn id_of(&self, code: &str) -> Option<AirportId> {
        self.index.get(code).copied()
    }

    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.id_of(code).map(|id| &self.airports[id])
    }

    /// Airport at a dense index.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this graph.
    pub fn airport_at(&self, id: AirportId) -> &Airport {
        &self.airports[id]
    }

    /// Every airport in insertion order.
    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    /// Outgoing flights for `code`; empty for unknown codes.
    pub fn neighbours(&self, code: &str) -> &[Flight] {
        self.id_of(code)
            .map(|id| self.flights_from(id))
            .unwrap_or(&[])
    }

    /// Outgoing flights for an airport index.
    pub fn flights_from(&self, id: AirportId) -> &[Flight] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every flight, grouped by origin in airport insertion order.
    pub fn flights(&self) -> impl Iterator<Item = &Flight> + '_ {
        self.adjacency.iter().flatten()
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    pub fn flight_count(&self) -> usize {
        self.flight_count
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Airport codes similar to `code`, best match first.
    pub fn fuzzy_airport_matches(&self, code: &str, limit: usize) -> Vec<String> {
        let needle = code.to_ascii_uppercase();
        let mut scored: Vec<(f64, &str)> = self
            .airports
            .iter()
            .map(|airport| {
                let score = strsim::jaro_winkler(&needle, &airport.code.to_ascii_uppercase());
                (score, airport.code.as_str())
            })
            .filter(|(score, _)| *score >= MIN_SUGGESTION_SIMILARITY)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });
        scored
            .into_iter()
            .take(limit)
            .map(|(_, code)| code.to_string())
            .collect()
    }

    /// Build an [`Error::UnknownAirport`] carrying suggestions for `code`.
    pub fn unknown_airport(&self, code: &str) -> Error {
        let suggestions = self.fuzzy_airport_matches(code, SUGGESTION_LIMIT);
        debug!(code, ?suggestions, "unknown airport code");
        Error::UnknownAirport {
            code: code.to_string(),
            suggestions,
        }
    }

    /// Resolve a code to its index or fail with suggestions.
    pub fn resolve(&self, code: &str) -> Result<AirportId> {
        self.id_of(code).ok_or_else(|| self.unknown_airport(code))
    }
}
