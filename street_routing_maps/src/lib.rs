use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io;
use std::path::Path;

const CITY_NODES: &str = include_str!("../maps/city/nodes.csv");
const CITY_STREETS: &str = include_str!("../maps/city/streets.csv");

/// A named intersection and its pixel position on the map image.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NodeRecord {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// An undirected street between two intersections.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct StreetRecord {
    pub from: String,
    pub to: String,
}

fn read_records<T, R>(reader: R) -> Result<Vec<T>, csv::Error>
where
    T: DeserializeOwned,
    R: io::Read,
{
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    csv_reader.deserialize().collect()
}

/// Reads `id,x,y` rows.
pub fn read_nodes<R: io::Read>(reader: R) -> Result<Vec<NodeRecord>, csv::Error> {
    read_records(reader)
}

/// Reads `from,to` rows.
pub fn read_streets<R: io::Read>(reader: R) -> Result<Vec<StreetRecord>, csv::Error> {
    read_records(reader)
}

/// Loads a map from a node file and a street file on disk.
pub fn load_street_map(
    nodes_path: &Path,
    streets_path: &Path,
) -> Result<(Vec<NodeRecord>, Vec<StreetRecord>), csv::Error> {
    let nodes = read_nodes(std::fs::File::open(nodes_path)?)?;
    let streets = read_streets(std::fs::File::open(streets_path)?)?;
    Ok((nodes, streets))
}

/// The bundled 28 intersection city map, in file order.
pub fn get_city_map() -> Result<(Vec<NodeRecord>, Vec<StreetRecord>), csv::Error> {
    let nodes = read_nodes(CITY_NODES.as_bytes())?;
    let streets = read_streets(CITY_STREETS.as_bytes())?;
    Ok((nodes, streets))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_map_is_complete() {
        let (nodes, streets) = get_city_map().unwrap();
        assert_eq!(nodes.len(), 28);
        assert_eq!(streets.len(), 30);
        assert_eq!(
            nodes[0],
            NodeRecord {
                id: "P01".to_owned(),
                x: 752.0,
                y: 5.0
            }
        );
        assert_eq!(nodes[27].id, "P28");
    }

    #[test]
    fn reads_padded_rows() {
        let data = "from, to\nA , B\n";
        let streets = read_streets(data.as_bytes()).unwrap();
        assert_eq!(
            streets,
            vec![StreetRecord {
                from: "A".to_owned(),
                to: "B".to_owned()
            }]
        );
    }

    #[test]
    fn rejects_malformed_coordinates() {
        let data = "id,x,y\nA,1.0,north\n";
        assert!(read_nodes(data.as_bytes()).is_err());
    }
}
