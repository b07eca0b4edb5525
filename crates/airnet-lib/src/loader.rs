//! Route loading from CSV files.
//!
//! Expected layout is a header row followed by six columns:
//!
//! ```text
//! origin,destination,origin_city,destination_city,distance,cost
//! ATL,MIA,"Atlanta, GA","Miami, FL",594,120
//! ```
//!
//! The region tag for each airport is the part of the city column after the
//! first `", "`. Rows that cannot be parsed are logged, recorded in the
//! [`LoadReport`] and skipped; loading continues with the next row.

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::graph::Graph;

const EXPECTED_FIELDS: usize = 6;

/// Options controlling how route records become flights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Also insert the reverse flight for every record.
    pub bidirectional: bool,
}

/// One parsed route row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub origin: String,
    pub destination: String,
    pub origin_region: String,
    pub destination_region: String,
    pub distance: u64,
    pub cost: u64,
}

impl RouteRecord {
    /// Insert both airports and the flight (plus its reverse when
    /// `options.bidirectional` is set).
    pub fn apply(&self, graph: &mut Graph, options: &LoadOptions) -> Result<()> {
        graph.insert_node(&self.origin, &self.origin_region);
        graph.insert_node(&self.destination, &self.destination_region);
        graph.insert_route(
            &self.origin,
            &self.destination,
            self.distance,
            self.cost,
            options.bidirectional,
        )
    }
}

/// A row rejected during loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub line: u64,
    pub message: String,
}

/// Totals gathered while loading a route file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub records_loaded: usize,
    pub records_skipped: usize,
    pub skipped: Vec<SkippedRecord>,
}

impl LoadReport {
    fn skip(&mut self, error: Error) {
        warn!(%error, "skipping route record");
        if let Error::MalformedRecord { line, message } = error {
            self.skipped.push(SkippedRecord { line, message });
        }
        self.records_skipped += 1;
    }
}

/// Region tag from a `"City, ST"` field; empty when there is no `", "`.
pub fn extract_region(city: &str) -> &str {
    city.split_once(", ")
        .map(|(_, region)| region.trim())
        .unwrap_or("")
}

/// Load a route CSV file into a new [`Graph`].
pub fn load_routes(path: &Path, options: &LoadOptions) -> Result<(Graph, LoadReport)> {
    debug!(path = %path.display(), bidirectional = options.bidirectional, "loading routes");
    let file = fs::File::open(path)?;
    load_routes_from_reader(file, options)
}

/// Load route CSV data from any reader (file or in-memory buffer).
pub fn load_routes_from_reader<R: Read>(
    reader: R,
    options: &LoadOptions,
) -> Result<(Graph, LoadReport)> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut graph = Graph::new();
    let mut report = LoadReport::default();

    for result in csv_reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                let line = err.position().map(|pos| pos.line()).unwrap_or(0);
                report.skip(Error::MalformedRecord {
                    line,
                    message: err.to_string(),
                });
                continue;
            }
        };

        let line = record.position().map(|pos| pos.line()).unwrap_or(0);
        match parse_record(&record) {
            Ok(route) => {
                route.apply(&mut graph, options)?;
                report.records_loaded += 1;
            }
            Err(message) => report.skip(Error::MalformedRecord { line, message }),
        }
    }

    info!(
        airports = graph.airport_count(),
        flights = graph.flight_count(),
        loaded = report.records_loaded,
        skipped = report.records_skipped,
        "route data loaded"
    );
    Ok((graph, report))
}

fn parse_record(record: &StringRecord) -> std::result::Result<RouteRecord, String> {
    if record.len() != EXPECTED_FIELDS {
        return Err(format!(
            "expected {EXPECTED_FIELDS} fields, found {}",
            record.len()
        ));
    }

    let origin = code_field(record, 0, "origin")?;
    let destination = code_field(record, 1, "destination")?;
    let distance = numeric_field(record, 4, "distance")?;
    let cost = numeric_field(record, 5, "cost")?;

    Ok(RouteRecord {
        origin,
        destination,
        origin_region: extract_region(&record[2]).to_string(),
        destination_region: extract_region(&record[3]).to_string(),
        distance,
        cost,
    })
}

fn code_field(
    record: &StringRecord,
    index: usize,
    name: &str,
) -> std::result::Result<String, String> {
    let value = &record[index];
    if value.is_empty() {
        return Err(format!("{name} airport code is empty"));
    }
    Ok(value.to_string())
}

fn numeric_field(
    record: &StringRecord,
    index: usize,
    name: &str,
) -> std::result::Result<u64, String> {
    let value = &record[index];
    value
        .parse::<u64>()
        .map_err(|err| format!("invalid {name} '{value}': {err}"))
}
