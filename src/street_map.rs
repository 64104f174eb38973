use crate::error::ConfigError;
use crate::position::Position;
use crate::FxIndexMap;
use indexmap::map::Entry::{Occupied, Vacant};

/// Node id to position, kept in insertion order so node listings match the
/// order the map was authored in.
#[derive(Clone, Debug, Default)]
pub struct CoordinateTable {
    positions: FxIndexMap<String, Position>,
}

impl CoordinateTable {
    pub fn new() -> CoordinateTable {
        CoordinateTable::default()
    }

    /// Builds a table from `(id, position)` pairs, failing on the first invalid entry.
    pub fn from_records<I, S, P>(records: I) -> Result<CoordinateTable, ConfigError>
    where
        I: IntoIterator<Item = (S, P)>,
        S: Into<String>,
        P: Into<Position>,
    {
        let mut table = CoordinateTable::new();
        for (id, position) in records {
            table.insert(id, position)?;
        }
        Ok(table)
    }

    pub fn insert<S, P>(&mut self, id: S, position: P) -> Result<(), ConfigError>
    where
        S: Into<String>,
        P: Into<Position>,
    {
        let id = id.into();
        let position = position.into();
        if !position.is_finite() {
            return Err(ConfigError::NonFiniteCoordinate {
                node: id,
                x: position.x,
                y: position.y,
            });
        }
        match self.positions.entry(id) {
            Occupied(e) => Err(ConfigError::DuplicateNode(e.key().clone())),
            Vacant(e) => {
                e.insert(position);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<Position> {
        self.positions.get(id).copied()
    }
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }
    pub fn len(&self) -> usize {
        self.positions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, Position)> {
        self.positions.iter().map(|(id, p)| (id.as_str(), *p))
    }

    /// Length of the straight segment between two known nodes.
    pub fn distance(&self, from: &str, to: &str) -> Option<f64> {
        Some(self.get(from)?.distance(&self.get(to)?))
    }
}

/// One entry of the street list. Streets are undirected, `from` and `to` only
/// reflect how the entry was written.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Street {
    pub from: String,
    pub to: String,
}

impl Street {
    pub fn new<S: Into<String>, T: Into<String>>(from: S, to: T) -> Street {
        Street {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl<S: Into<String>, T: Into<String>> From<(S, T)> for Street {
    fn from((from, to): (S, T)) -> Street {
        Street::new(from, to)
    }
}

/// Length of a street, or an error naming the first endpoint missing from `coordinates`.
pub(crate) fn street_length(
    coordinates: &CoordinateTable,
    street: &Street,
) -> Result<f64, ConfigError> {
    let position = |node: &String| {
        coordinates
            .get(node)
            .ok_or_else(|| ConfigError::UnknownNode {
                from: street.from.clone(),
                to: street.to.clone(),
                node: node.clone(),
            })
    };
    Ok(position(&street.from)?.distance(&position(&street.to)?))
}

/// Finds the first street endpoint missing from `coordinates`.
pub(crate) fn check_streets(
    coordinates: &CoordinateTable,
    streets: &[Street],
) -> Result<(), ConfigError> {
    for street in streets {
        street_length(coordinates, street)?;
    }
    Ok(())
}

/// The validated, immutable description of a map: where the intersections are
/// and which of them are joined by streets. Loaded once at startup.
#[derive(Clone, Debug, Default)]
pub struct StreetMap {
    coordinates: CoordinateTable,
    streets: Vec<Street>,
}

impl StreetMap {
    pub fn new(
        coordinates: CoordinateTable,
        streets: Vec<Street>,
    ) -> Result<StreetMap, ConfigError> {
        check_streets(&coordinates, &streets)?;
        Ok(StreetMap {
            coordinates,
            streets,
        })
    }

    pub fn coordinates(&self) -> &CoordinateTable {
        &self.coordinates
    }
    pub fn streets(&self) -> &[Street] {
        &self.streets
    }

    /// The two end positions of every street, in street list order, for drawing.
    pub fn segments(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.streets.iter().filter_map(|street| {
            Some((
                self.coordinates.get(&street.from)?,
                self.coordinates.get(&street.to)?,
            ))
        })
    }
}
