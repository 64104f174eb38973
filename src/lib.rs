//! # street_routing
//!
//! Shortest routes over a small, static street map. Intersections are named points on a
//! planar map image and streets are straight segments between them, so every edge is
//! weighted with the [Euclidean distance](https://en.wikipedia.org/wiki/Euclidean_distance)
//! between its endpoints. Routes are computed with
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) and
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) are
//! pre-computed to answer queries between disconnected nodes without searching.
//!
//! Drawing the map and collecting the user's choice of start and end is left to the
//! caller, which talks to this crate through [build_graph] and [shortest_path], or
//! through a [Router] that owns both the map and the graph.
pub mod error;
pub mod graph;
pub mod position;
pub mod route;
pub mod search;
pub mod street_map;

pub use error::{ConfigError, QueryError};
pub use graph::Graph;
pub use position::Position;
pub use route::{Path, Route};
pub use street_map::{CoordinateTable, Street, StreetMap};

use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use log::{debug, info};

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Neighbours stored inline per node, street intersections rarely have more.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Builds the street graph: every node of the table becomes a graph node and every street
/// an edge weighted by the distance between its endpoints. Fails if a street names a node
/// missing from the table.
pub fn build_graph(
    coordinates: &CoordinateTable,
    streets: &[Street],
) -> Result<Graph, ConfigError> {
    let mut graph = Graph::new();
    for id in coordinates.ids() {
        graph.add_node(id);
    }
    for street in streets {
        let weight = street_map::street_length(coordinates, street)?;
        graph.add_edge(&street.from, &street.to, weight)?;
    }
    graph.generate_components();
    debug!(
        "Built graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Computes the shortest route between two nodes, see [Graph::shortest_path].
pub fn shortest_path(graph: &Graph, start: &str, end: &str) -> Result<Route, QueryError> {
    graph.shortest_path(start, end)
}

/// [Router] is the application context: the immutable [StreetMap] loaded at startup and
/// the [Graph] derived from it. Queries only borrow it.
#[derive(Clone, Debug)]
pub struct Router {
    map: StreetMap,
    graph: Graph,
}

impl Router {
    pub fn new(map: StreetMap) -> Result<Router, ConfigError> {
        let graph = build_graph(map.coordinates(), map.streets())?;
        info!(
            "Router ready: {} nodes, {} streets",
            map.coordinates().len(),
            map.streets().len()
        );
        Ok(Router { map, graph })
    }

    /// Like [Router::new], with the search stopping once the end node is settled.
    pub fn with_early_exit(map: StreetMap, early_exit: bool) -> Result<Router, ConfigError> {
        let mut router = Router::new(map)?;
        router.graph.early_exit = early_exit;
        Ok(router)
    }

    pub fn map(&self) -> &StreetMap {
        &self.map
    }
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Selectable nodes, in the order of the coordinate table.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.map.coordinates().ids()
    }

    pub fn route(&self, start: &str, end: &str) -> Result<Route, QueryError> {
        shortest_path(&self.graph, start, end)
    }

    /// Position pairs of a route's edges, empty for an unreachable route.
    pub fn path_segments(&self, route: &Route) -> Vec<(Position, Position)> {
        route
            .path()
            .map(|path| path.segments(self.map.coordinates()).collect())
            .unwrap_or_default()
    }
}
