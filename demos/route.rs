use anyhow::Context;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use street_routing::{CoordinateTable, Router, Street, StreetMap};
use street_routing_maps::{get_city_map, load_street_map};

// Command line stand-in for the map window: pick a start and an end intersection and
// print the route that would be highlighted.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Start intersection
    #[arg(short, long, default_value = "P01")]
    start: String,

    /// End intersection
    #[arg(short, long, default_value = "P07")]
    end: String,

    /// CSV file with `id,x,y` rows, defaults to the bundled city map
    #[arg(long, requires = "streets")]
    nodes: Option<PathBuf>,

    /// CSV file with `from,to` rows
    #[arg(long, requires = "nodes")]
    streets: Option<PathBuf>,

    /// Stop searching once the end intersection is settled
    #[arg(long)]
    early_exit: bool,

    /// List the intersections and streets instead of routing
    #[arg(short, long)]
    list: bool,
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();
    let cli = Cli::parse();

    let (nodes, streets) = match (&cli.nodes, &cli.streets) {
        (Some(nodes), Some(streets)) => load_street_map(nodes, streets)
            .with_context(|| format!("Could not load {} and {}", nodes.display(), streets.display()))?,
        _ => get_city_map().context("Could not load the bundled city map")?,
    };
    let coordinates =
        CoordinateTable::from_records(nodes.into_iter().map(|n| (n.id, (n.x, n.y))))?;
    let streets = streets
        .into_iter()
        .map(|s| Street::new(s.from, s.to))
        .collect();
    let router = Router::with_early_exit(StreetMap::new(coordinates, streets)?, cli.early_exit)?;

    if cli.list {
        for (id, position) in router.map().coordinates().iter() {
            println!("{id} {position}");
        }
        for (from, to) in router.map().segments() {
            println!("{from} - {to}");
        }
        return Ok(());
    }

    info!("Routing {} -> {}", cli.start, cli.end);
    let route = router.route(&cli.start, &cli.end)?;
    println!("{route}");
    for (from, to) in router.path_segments(&route) {
        println!("  {from} -> {to}");
    }
    Ok(())
}
