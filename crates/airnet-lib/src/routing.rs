//! Validated route planning on top of the raw path searches.
//!
//! The functions in [`crate::path`] return an empty [`Path`] for both unknown
//! endpoints and unreachable destinations. [`plan_route`] resolves the
//! endpoints first so callers get a typed [`Error::UnknownAirport`] (with
//! suggestions) or [`Error::RouteNotFound`] instead.
//!
//! # Example
//!
//! ```ignore
//! use airnet_lib::{load_routes, plan_route, LoadOptions, RouteRequest};
//!
//! let (graph, _report) = load_routes("routes.csv".as_ref(), &LoadOptions::default())?;
//! let plan = plan_route(&graph, &RouteRequest::new("ATL", "MIA"))?;
//! println!("Route: {} hops", plan.hop_count());
//! ```

use serde::Serialize;
use tracing::warn;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::path::{find_route_dijkstra, shortest_path_with_stop_limit, Metric, Path};

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
    pub metric: Metric,
    /// Upper bound on flights taken. When set the route minimises distance
    /// and `metric` is ignored.
    pub max_stops: Option<usize>,
}

impl RouteRequest {
    /// Distance-optimised request without a stop limit.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            metric: Metric::Distance,
            max_stops: None,
        }
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_max_stops(mut self, max_stops: usize) -> Self {
        self.max_stops = Some(max_stops);
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    pub metric: Metric,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_stops: Option<usize>,
    pub path: Path,
}

impl RoutePlan {
    /// Number of flights in the route.
    pub fn hop_count(&self) -> usize {
        self.path.hop_count()
    }
}

/// Compute a route for `request`, failing on unknown endpoints or when no
/// route exists.
///
/// A stop limit always searches by distance; the hop-bounded search has no
/// cost-driven variant.
pub fn plan_route(graph: &Graph, request: &RouteRequest) -> Result<RoutePlan> {
    graph.resolve(&request.origin)?;
    graph.resolve(&request.destination)?;

    let (metric, path) = match request.max_stops {
        Some(max_stops) => {
            if request.metric != Metric::Distance {
                warn!(
                    requested = %request.metric,
                    max_stops,
                    "stop-limited routes are searched by distance; ignoring requested metric"
                );
            }
            let path = shortest_path_with_stop_limit(
                graph,
                &request.origin,
                &request.destination,
                max_stops,
            )?;
            (Metric::Distance, path)
        }
        None => (
            request.metric,
            find_route_dijkstra(
                graph,
                &request.origin,
                &request.destination,
                request.metric,
            )?,
        ),
    };

    if path.is_empty() {
        return Err(Error::RouteNotFound {
            origin: request.origin.clone(),
            destination: request.destination.clone(),
        });
    }

    Ok(RoutePlan {
        metric,
        max_stops: request.max_stops,
        path,
    })
}
