//! Output formatting for query results.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use airnet_lib::{
    render_connectivity, render_spanning_tree, DegreeRecord, Metric, RouteRenderMode,
    RouteSummary, SpanningTree,
};

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Text,
    /// Minimal `+`/`|`/`-` route listing; other commands fall back to text.
    Basic,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    fn route_mode(self) -> RouteRenderMode {
        match self {
            OutputFormat::Basic => RouteRenderMode::Basic,
            OutputFormat::Text | OutputFormat::Json => RouteRenderMode::PlainText,
        }
    }
}

/// Shortest paths from one airport into a region.
#[derive(Debug, Clone, Serialize)]
pub struct RegionReport {
    pub origin: String,
    pub region: String,
    pub metric: Metric,
    pub routes: Vec<RouteSummary>,
}

/// Serialise `value` as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value).map_err(io::Error::other)?;
    writer.write_all(b"\n")
}

/// Print `value` as JSON on stdout.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write_json(&mut stdout, value)
}

pub fn route_text(summary: &RouteSummary, format: OutputFormat) -> String {
    summary.render(format.route_mode())
}

/// One compact line per reachable airport, or a note when none is reachable.
pub fn region_text(report: &RegionReport) -> String {
    if report.routes.is_empty() {
        return format!(
            "No airports in region {} reachable from {}\n",
            report.region, report.origin
        );
    }

    let mut buffer = format!(
        "Airports in region {} reachable from {} (metric: {}):\n",
        report.region, report.origin, report.metric
    );
    for route in &report.routes {
        buffer.push_str(&route.render(RouteRenderMode::Compact));
    }
    buffer
}

pub fn connections_text(records: &[DegreeRecord], limit: Option<usize>) -> String {
    render_connectivity(records, limit)
}

/// Spanning trees separated by blank lines.
pub fn spanning_trees_text(trees: &[SpanningTree]) -> String {
    trees
        .iter()
        .map(render_spanning_tree)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use airnet_lib::{Graph, Path, RouteOutputKind};

    fn summary(codes: &[&str], distance: u64, cost: u64) -> RouteSummary {
        let mut graph = Graph::new();
        for code in codes {
            graph.insert_node(code, "");
        }
        let path = Path {
            airports: codes.iter().map(|code| code.to_string()).collect(),
            total_distance: distance,
            total_cost: cost,
        };
        RouteSummary::from_path(RouteOutputKind::Region, &graph, Metric::Distance, &path)
            .expect("non-empty path")
    }

    #[test]
    fn json_output_ends_with_newline() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &summary(&["A", "B"], 5, 2)).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"total_distance\": 5"));
    }

    #[test]
    fn region_text_lists_compact_routes() {
        let report = RegionReport {
            origin: "A".into(),
            region: "XX".into(),
            metric: Metric::Distance,
            routes: vec![summary(&["A", "B"], 5, 2), summary(&["A", "B", "C"], 9, 4)],
        };
        let text = region_text(&report);
        assert!(text.starts_with("Airports in region XX reachable from A (metric: distance):"));
        assert!(text.contains("A->B 5 2\n"));
        assert!(text.contains("A->B->C 9 4\n"));
    }

    #[test]
    fn empty_region_report_says_so() {
        let report = RegionReport {
            origin: "A".into(),
            region: "ZZ".into(),
            metric: Metric::Cost,
            routes: Vec::new(),
        };
        assert_eq!(
            region_text(&report),
            "No airports in region ZZ reachable from A\n"
        );
    }

    #[test]
    fn basic_format_uses_prefixed_listing() {
        let text = route_text(&summary(&["A", "B", "C"], 9, 4), OutputFormat::Basic);
        assert_eq!(text, "+ A\n| B\n- C\n");
    }
}
