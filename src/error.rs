use thiserror::Error;

/// Problems with the static map, detected while building the graph. These are
/// fatal at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("street {from} - {to} references unknown node {node}")]
    UnknownNode {
        from: String,
        to: String,
        node: String,
    },

    #[error("node {node} has a non-finite position ({x}, {y})")]
    NonFiniteCoordinate { node: String, x: f64, y: f64 },

    #[error("node {0} appears more than once in the coordinate table")]
    DuplicateNode(String),

    #[error("edge {from} - {to} has weight {weight}, weights must be finite and non-negative")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },
}

/// A query that names a node the graph does not contain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("unknown node {0}")]
    UnknownNode(String),
}
