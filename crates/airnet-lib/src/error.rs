use thiserror::Error;

/// Convenient result alias for the airnet library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an edge or a query endpoint references an airport code
    /// that is not present in the graph.
    #[error("unknown airport code: {code}{}", format_suggestions(.suggestions))]
    UnknownAirport {
        code: String,
        suggestions: Vec<String>,
    },

    /// Raised when `extract_min` is called on an empty priority queue.
    #[error("priority queue is empty")]
    EmptyQueue,

    /// Raised for a route record that could not be parsed.
    #[error("malformed route record on line {line}: {message}")]
    MalformedRecord { line: u64, message: String },

    /// Raised when a caller requires a connected spanning tree but the network
    /// only admits a spanning forest.
    #[error("network is disconnected ({components} components); only a spanning forest exists")]
    DisconnectedNetwork { components: usize },

    /// Raised when no route could be found between two airports.
    #[error("no route found between {origin} and {destination}")]
    RouteNotFound { origin: String, destination: String },

    /// Raised when a computed route lacks any airports.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Raised when a predecessor chain does not lead back to the origin. This
    /// indicates a bug in the search rather than bad input.
    #[error("internal fault: predecessor chain from {destination} never reached {origin}")]
    BrokenPredecessorChain { origin: String, destination: String },

    /// Wrapper for CSV reader errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error stems from caller input rather than an internal fault.
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            Error::EmptyQueue | Error::BrokenPredecessorChain { .. }
        )
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
