use crate::position::Position;
use crate::street_map::CoordinateTable;
use core::fmt;
use itertools::Itertools;

/// A shortest path: the nodes from start to end inclusive and the summed edge weights.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    nodes: Vec<String>,
    distance: f64,
}

impl Path {
    pub fn new(nodes: Vec<String>, distance: f64) -> Path {
        Path { nodes, distance }
    }
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }
    pub fn distance(&self) -> f64 {
        self.distance
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn start(&self) -> Option<&str> {
        self.nodes.first().map(String::as_str)
    }
    pub fn end(&self) -> Option<&str> {
        self.nodes.last().map(String::as_str)
    }

    /// Consecutive node positions along the path, one pair per traversed edge. Used to
    /// highlight the route on top of the street drawing.
    pub fn segments<'a>(
        &'a self,
        coordinates: &'a CoordinateTable,
    ) -> impl Iterator<Item = (Position, Position)> + 'a {
        self.nodes
            .iter()
            .tuple_windows()
            .filter_map(|(a, b)| Some((coordinates.get(a)?, coordinates.get(b)?)))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.nodes.iter().join(" -> "))
    }
}

/// The answer to a shortest path query. Two disconnected nodes are not an error but an
/// [Route::Unreachable] result, which has no nodes and an infinite distance.
#[derive(Clone, Debug, PartialEq)]
pub enum Route {
    Found(Path),
    Unreachable { start: String, end: String },
}

impl Route {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Route::Found(_))
    }
    /// The total distance, [f64::INFINITY] when unreachable.
    pub fn distance(&self) -> f64 {
        match self {
            Route::Found(path) => path.distance(),
            Route::Unreachable { .. } => f64::INFINITY,
        }
    }
    pub fn nodes(&self) -> &[String] {
        match self {
            Route::Found(path) => path.nodes(),
            Route::Unreachable { .. } => &[],
        }
    }
    pub fn path(&self) -> Option<&Path> {
        match self {
            Route::Found(path) => Some(path),
            Route::Unreachable { .. } => None,
        }
    }
    pub fn into_path(self) -> Option<Path> {
        match self {
            Route::Found(path) => Some(path),
            Route::Unreachable { .. } => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Route::Found(path) => write!(f, "Path: {path}\nDistance: {:.1}", path.distance()),
            Route::Unreachable { start, end } => write!(f, "No route from {start} to {end}"),
        }
    }
}
