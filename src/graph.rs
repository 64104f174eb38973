use crate::error::{ConfigError, QueryError};
use crate::route::{Path, Route};
use crate::search::dijkstra;
use crate::{FxIndexMap, N_SMALLVEC_SIZE};
use core::fmt;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

type Neighbours = SmallVec<[(usize, f64); N_SMALLVEC_SIZE]>;

/// [Graph] stores an undirected weighted adjacency list keyed by node id, in the order
/// nodes were first seen. In addition it maintains connected components in a [UnionFind]
/// so that queries between different components are answered without searching.
#[derive(Clone, Debug)]
pub struct Graph {
    adjacency: FxIndexMap<String, Neighbours>,
    edge_count: usize,
    components: UnionFind<usize>,
    /// Set when nodes were added after the union-find was sized. The union-find must not
    /// be queried while this is set.
    components_dirty: bool,
    /// Stop the search as soon as the end node is settled instead of settling every
    /// reachable node.
    pub early_exit: bool,
}

impl Default for Graph {
    fn default() -> Graph {
        Graph {
            adjacency: FxIndexMap::default(),
            edge_count: 0,
            components: UnionFind::new(0),
            components_dirty: false,
            early_exit: false,
        }
    }
}

impl Graph {
    pub fn new() -> Graph {
        Graph::default()
    }

    /// Adds a node without edges, returning its index. Known nodes are left untouched.
    pub fn add_node(&mut self, id: &str) -> usize {
        if let Some(ix) = self.adjacency.get_index_of(id) {
            return ix;
        }
        // The union-find has a fixed size, so a new node invalidates it.
        self.components_dirty = true;
        self.adjacency.insert_full(id.to_owned(), Neighbours::new()).0
    }

    /// Inserts an undirected edge of weight `w` between `u` and `v`, creating either node
    /// if needed. The weight must be finite and non-negative.
    pub fn add_edge(&mut self, u: &str, v: &str, w: f64) -> Result<(), ConfigError> {
        if !w.is_finite() || w < 0.0 {
            return Err(ConfigError::InvalidWeight {
                from: u.to_owned(),
                to: v.to_owned(),
                weight: w,
            });
        }
        let u_ix = self.add_node(u);
        let v_ix = self.add_node(v);
        self.adjacency[u_ix].push((v_ix, w));
        self.adjacency[v_ix].push((u_ix, w));
        self.edge_count += 1;
        if !self.components_dirty {
            self.components.union(u_ix, v_ix);
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
    pub fn contains(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// The neighbours of a node with the weight of the connecting edge, in insertion order.
    pub fn neighbours(&self, id: &str) -> Option<impl Iterator<Item = (&str, f64)>> {
        let neighbours = self.adjacency.get(id)?;
        Some(neighbours.iter().filter_map(move |&(ix, w)| {
            self.adjacency
                .get_index(ix)
                .map(|(neighbour, _)| (neighbour.as_str(), w))
        }))
    }

    fn index_of(&self, id: &str) -> Result<usize, QueryError> {
        self.adjacency
            .get_index_of(id)
            .ok_or_else(|| QueryError::UnknownNode(id.to_owned()))
    }

    /// Whether the components are out of date and queries have to search instead.
    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up neighbours to the same components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.adjacency.len());
        self.components_dirty = false;
        for (ix, neighbours) in self.adjacency.values().enumerate() {
            for &(n, _) in neighbours {
                self.components.union(ix, n);
            }
        }
    }

    /// Checks if `start` and `end` are known to be on different components. While the
    /// components are dirty nothing is known and this returns `false`.
    fn known_unreachable(&self, start: usize, end: usize) -> bool {
        !self.components_dirty && !self.components.equiv(start, end)
    }

    /// Checks if a path with a finite distance exists between two nodes. Only searches
    /// when the components do not already rule it out.
    pub fn reachable(&self, start: &str, end: &str) -> Result<bool, QueryError> {
        let start_ix = self.index_of(start)?;
        let end_ix = self.index_of(end)?;
        Ok(!self.known_unreachable(start_ix, end_ix) && self.search(start_ix, end_ix).is_some())
    }

    /// Runs the search, treating a distance that overflowed to infinity as no path.
    fn search(&self, start: usize, end: usize) -> Option<(Vec<usize>, f64)> {
        dijkstra(
            &start,
            &end,
            |&node| self.adjacency[node].clone(),
            self.early_exit,
        )
        .filter(|(_, distance)| distance.is_finite())
    }

    /// Computes the shortest path between two nodes of the graph. Returns
    /// [Route::Unreachable] if the nodes are not connected and an error if either is unknown.
    pub fn shortest_path(&self, start: &str, end: &str) -> Result<Route, QueryError> {
        let start_ix = self.index_of(start)?;
        let end_ix = self.index_of(end)?;
        if self.known_unreachable(start_ix, end_ix) {
            debug!("{start} and {end} are on different components");
            return Ok(Route::Unreachable {
                start: start.to_owned(),
                end: end.to_owned(),
            });
        }
        let route = match self.search(start_ix, end_ix) {
            Some((indices, distance)) => {
                let nodes = indices
                    .into_iter()
                    .filter_map(|ix| self.adjacency.get_index(ix).map(|(id, _)| id.clone()))
                    .collect();
                Route::Found(Path::new(nodes, distance))
            }
            None => Route::Unreachable {
                start: start.to_owned(),
                end: end.to_owned(),
            },
        };
        debug!("{start} -> {end}: distance {}", route.distance());
        Ok(route)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Graph:")?;
        for id in self.node_ids() {
            write!(f, "{id}:")?;
            if let Some(neighbours) = self.neighbours(id) {
                for (neighbour, w) in neighbours {
                    write!(f, " {neighbour} ({w:.1})")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
