use std::fmt::Write;

use serde::Serialize;

use crate::connectivity::DegreeRecord;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::mst::SpanningTree;
use crate::path::{Metric, Path};

/// Classifies the query that produced a route summary.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RouteOutputKind {
    Route,
    StopLimited,
    Region,
}

impl RouteOutputKind {
    /// Human-readable label shown in textual renderings.
    pub fn label(self) -> &'static str {
        match self {
            RouteOutputKind::Route => "Route",
            RouteOutputKind::StopLimited => "Route (stop limited)",
            RouteOutputKind::Region => "Region route",
        }
    }
}

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// Header, numbered steps and totals.
    PlainText,
    /// One arrow-joined line with totals, as used in region listings.
    Compact,
    /// `+`/`|`/`-` prefixed codes only.
    Basic,
}

/// Airport visited by a route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteStep {
    pub index: usize,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl RouteStep {
    fn display(&self) -> String {
        match &self.region {
            Some(region) => format!("{} ({})", self.code, region),
            None => self.code.clone(),
        }
    }
}

/// Structured representation of a path that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteSummary {
    pub kind: RouteOutputKind,
    pub metric: Metric,
    pub hops: usize,
    pub origin: String,
    pub destination: String,
    pub total_distance: u64,
    pub total_cost: u64,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`Path`] into a summary annotated with region tags.
    pub fn from_path(
        kind: RouteOutputKind,
        graph: &Graph,
        metric: Metric,
        path: &Path,
    ) -> Result<Self> {
        let (Some(origin), Some(destination)) = (path.origin(), path.destination()) else {
            return Err(Error::EmptyRoutePlan);
        };

        let steps = path
            .airports
            .iter()
            .enumerate()
            .map(|(index, code)| RouteStep {
                index,
                code: code.clone(),
                region: graph
                    .airport(code)
                    .map(|airport| airport.region.clone())
                    .filter(|region| !region.is_empty()),
            })
            .collect();

        Ok(Self {
            kind,
            metric,
            hops: path.hop_count(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            total_distance: path.total_distance,
            total_cost: path.total_cost,
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Compact => self.render_compact(),
            RouteRenderMode::Basic => self.render_basic(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "{}: {} -> {} ({} hops, metric: {})",
            self.kind.label(),
            self.origin,
            self.destination,
            self.hops,
            self.metric
        );
        for step in &self.steps {
            let _ = writeln!(buffer, "{:>3}: {}", step.index, step.display());
        }
        let _ = writeln!(
            buffer,
            "Distance: {}, Cost: {}",
            self.total_distance, self.total_cost
        );
        buffer
    }

    fn render_compact(&self) -> String {
        let joined = self
            .steps
            .iter()
            .map(|step| step.code.as_str())
            .collect::<Vec<_>>()
            .join("->");
        format!("{} {} {}\n", joined, self.total_distance, self.total_cost)
    }

    fn render_basic(&self) -> String {
        let mut buffer = String::new();
        let last = self.steps.len().saturating_sub(1);
        for (position, step) in self.steps.iter().enumerate() {
            let prefix = if position == 0 {
                '+'
            } else if position == last {
                '-'
            } else {
                '|'
            };
            let _ = writeln!(buffer, "{prefix} {}", step.code);
        }
        buffer
    }
}

/// Text listing of a spanning tree: one `from - to cost` line per edge, then
/// the total and a note when the result is a forest.
pub fn render_spanning_tree(tree: &SpanningTree) -> String {
    let mut buffer = String::new();
    let _ = writeln!(buffer, "Minimum spanning tree ({}):", tree.algorithm);
    for edge in &tree.edges {
        let _ = writeln!(buffer, "{} - {} {}", edge.from, edge.to, edge.cost);
    }
    let _ = writeln!(buffer, "Total cost: {}", tree.total_cost);
    if tree.disconnected {
        let _ = writeln!(
            buffer,
            "Network is disconnected: spanning forest over {} components",
            tree.components
        );
    }
    buffer
}

/// Text table of airport degrees, limited to the first `limit` rows when set.
pub fn render_connectivity(records: &[DegreeRecord], limit: Option<usize>) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "{:<8} {:>7} {:>8} {:>5}",
        "Airport", "Inbound", "Outbound", "Total"
    );
    let take = limit.unwrap_or(records.len());
    for record in records.iter().take(take) {
        let _ = writeln!(
            buffer,
            "{:<8} {:>7} {:>8} {:>5}",
            record.code,
            record.inbound,
            record.outbound,
            record.total()
        );
    }
    buffer
}
