use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use airnet_cli::output::{
    connections_text, region_text, render_json, route_text, spanning_trees_text, OutputFormat,
    RegionReport,
};
use airnet_lib::{
    connectivity_report, kruskal_mst, load_routes, plan_route, prim_mst,
    shortest_paths_to_region_by, Error as LibError, Graph, LoadOptions, Metric, RouteOutputKind,
    RouteRequest, RouteSummary,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Airline route network queries")]
struct Cli {
    /// Route CSV file to load.
    #[arg(long, env = "AIRNET_DATA", value_name = "FILE")]
    data: PathBuf,

    /// Insert the reverse flight for every route record.
    #[arg(long, global = true)]
    bidirectional: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shortest route between two airports.
    Route {
        /// Origin airport code.
        #[arg(long = "from")]
        from: String,
        /// Destination airport code.
        #[arg(long = "to")]
        to: String,
        /// Weight to minimise. Stop-limited routes always minimise distance.
        #[arg(
            long,
            value_enum,
            default_value_t = MetricArg::Distance,
            conflicts_with = "max_stops"
        )]
        metric: MetricArg,
        /// Maximum number of flights; the route is then shortest by distance.
        #[arg(long)]
        max_stops: Option<usize>,
    },
    /// Shortest routes from an airport to every reachable airport in a region.
    Region {
        /// Origin airport code.
        #[arg(long = "from")]
        from: String,
        /// Region tag, e.g. `FL`.
        #[arg(long)]
        region: String,
        #[arg(long, value_enum, default_value_t = MetricArg::Distance)]
        metric: MetricArg,
    },
    /// Airports ranked by total inbound plus outbound flights.
    Connections {
        /// Only show the first N airports.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Minimum spanning tree (or forest) over the undirected network.
    Mst {
        #[arg(long, value_enum, default_value_t = AlgorithmArg::Both)]
        algorithm: AlgorithmArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MetricArg {
    Distance,
    Cost,
}

impl From<MetricArg> for Metric {
    fn from(value: MetricArg) -> Self {
        match value {
            MetricArg::Distance => Metric::Distance,
            MetricArg::Cost => Metric::Cost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Prim,
    Kruskal,
    Both,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<LibError>() {
                Some(lib_err) if !lib_err.is_user_error() => {
                    eprintln!("internal error: {err:#}");
                }
                _ => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = LoadOptions {
        bidirectional: cli.bidirectional,
    };
    let graph = load_graph(&cli.data, &options)?;

    match &cli.command {
        Command::Route {
            from,
            to,
            metric,
            max_stops,
        } => handle_route(&graph, cli.format, from, to, (*metric).into(), *max_stops),
        Command::Region {
            from,
            region,
            metric,
        } => handle_region(&graph, cli.format, from, region, (*metric).into()),
        Command::Connections { limit } => handle_connections(&graph, cli.format, *limit),
        Command::Mst { algorithm } => handle_mst(&graph, cli.format, *algorithm),
    }
}

fn load_graph(path: &Path, options: &LoadOptions) -> Result<Graph> {
    let (graph, report) = load_routes(path, options)
        .with_context(|| format!("failed to load routes from {}", path.display()))?;
    if report.records_skipped > 0 {
        warn!(
            skipped = report.records_skipped,
            path = %path.display(),
            "route file contained malformed records"
        );
    }
    Ok(graph)
}

fn handle_route(
    graph: &Graph,
    format: OutputFormat,
    from: &str,
    to: &str,
    metric: Metric,
    max_stops: Option<usize>,
) -> Result<()> {
    let mut request = RouteRequest::new(from, to).with_metric(metric);
    if let Some(max_stops) = max_stops {
        request = request.with_max_stops(max_stops);
    }
    debug!(from, to, %metric, ?max_stops, "planning route");

    let plan = plan_route(graph, &request)?;
    let kind = if plan.max_stops.is_some() {
        RouteOutputKind::StopLimited
    } else {
        RouteOutputKind::Route
    };
    let summary = RouteSummary::from_path(kind, graph, plan.metric, &plan.path)?;

    match format {
        OutputFormat::Json => render_json(&summary)?,
        OutputFormat::Text | OutputFormat::Basic => print!("{}", route_text(&summary, format)),
    }
    Ok(())
}

fn handle_region(
    graph: &Graph,
    format: OutputFormat,
    from: &str,
    region: &str,
    metric: Metric,
) -> Result<()> {
    graph.resolve(from)?;
    debug!(from, region, %metric, "searching region");

    let routes = shortest_paths_to_region_by(graph, from, region, metric)?
        .iter()
        .map(|path| RouteSummary::from_path(RouteOutputKind::Region, graph, metric, path))
        .collect::<airnet_lib::Result<Vec<_>>>()?;
    let report = RegionReport {
        origin: from.to_string(),
        region: region.to_string(),
        metric,
        routes,
    };

    match format {
        OutputFormat::Json => render_json(&report)?,
        OutputFormat::Text | OutputFormat::Basic => print!("{}", region_text(&report)),
    }
    Ok(())
}

fn handle_connections(graph: &Graph, format: OutputFormat, limit: Option<usize>) -> Result<()> {
    let records = connectivity_report(graph);
    match format {
        OutputFormat::Json => {
            let shown = limit.unwrap_or(records.len()).min(records.len());
            render_json(&records[..shown])?;
        }
        OutputFormat::Text | OutputFormat::Basic => {
            print!("{}", connections_text(&records, limit));
        }
    }
    Ok(())
}

fn handle_mst(graph: &Graph, format: OutputFormat, algorithm: AlgorithmArg) -> Result<()> {
    let trees = match algorithm {
        AlgorithmArg::Prim => vec![prim_mst(graph)?],
        AlgorithmArg::Kruskal => vec![kruskal_mst(graph)?],
        AlgorithmArg::Both => vec![prim_mst(graph)?, kruskal_mst(graph)?],
    };

    match format {
        OutputFormat::Json => render_json(&trees)?,
        OutputFormat::Text | OutputFormat::Basic => print!("{}", spanning_trees_text(&trees)),
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
