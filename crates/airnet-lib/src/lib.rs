//! airnet library entry points.
//!
//! This crate loads airline route data into an in-memory [`Graph`] and answers
//! route-planning and network-structure queries over it: shortest paths by
//! distance or cost, hop-bounded shortest paths, per-airport connectivity, and
//! minimum spanning trees via Prim's and Kruskal's algorithms. Higher-level
//! consumers (the CLI) should only depend on the functions exported here
//! instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod connectivity;
pub mod disjoint_set;
pub mod error;
pub mod graph;
pub mod heap;
pub mod loader;
pub mod mst;
pub mod output;
pub mod path;
pub mod routing;

pub use connectivity::{connectivity_report, DegreeRecord};
pub use disjoint_set::DisjointSet;
pub use error::{Error, Result};
pub use graph::{Airport, AirportId, Flight, Graph};
pub use heap::PriorityQueue;
pub use loader::{
    extract_region, load_routes, load_routes_from_reader, LoadOptions, LoadReport, RouteRecord,
    SkippedRecord,
};
pub use mst::{
    build_undirected_projection, kruskal_mst, prim_mst, MstAlgorithm, SpanningTree, UndirectedEdge,
};
pub use output::{
    render_connectivity, render_spanning_tree, RouteOutputKind, RouteRenderMode, RouteStep,
    RouteSummary,
};
pub use path::{
    find_route_dijkstra, shortest_path_with_stop_limit, shortest_paths_to_region,
    shortest_paths_to_region_by, Metric, Path,
};
pub use routing::{plan_route, RoutePlan, RouteRequest};
