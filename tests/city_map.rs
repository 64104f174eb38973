use street_routing::{CoordinateTable, Router, Street, StreetMap};
use street_routing_maps::get_city_map;

fn city_router(early_exit: bool) -> Router {
    let (nodes, streets) = get_city_map().unwrap();
    let coordinates =
        CoordinateTable::from_records(nodes.into_iter().map(|n| (n.id, (n.x, n.y)))).unwrap();
    let streets = streets
        .into_iter()
        .map(|s| Street::new(s.from, s.to))
        .collect();
    Router::with_early_exit(StreetMap::new(coordinates, streets).unwrap(), early_exit).unwrap()
}

#[test]
fn known_routes() {
    let cases = [
        (
            "P01",
            "P07",
            vec!["P01", "P14", "P15", "P16", "P25", "P17", "P18", "P21", "P22", "P28", "P07"],
            1434.5849,
        ),
        (
            "P04",
            "P10",
            vec!["P04", "P16", "P25", "P17", "P18", "P19", "P10"],
            1382.9084,
        ),
        (
            "P03",
            "P09",
            vec!["P03", "P15", "P16", "P25", "P17", "P18", "P19", "P27", "P09"],
            1147.9355,
        ),
        ("P02", "P02", vec!["P02"], 0.0),
    ];
    for early_exit in [false, true] {
        let router = city_router(early_exit);
        for (start, end, nodes, distance) in &cases {
            let route = router.route(start, end).unwrap();
            assert_eq!(route.nodes(), nodes.as_slice());
            assert!((route.distance() - distance).abs() < 1e-3);
        }
    }
}

#[test]
fn description_of_default_query() {
    let router = city_router(false);
    let route = router.route("P01", "P07").unwrap();
    assert_eq!(
        route.to_string(),
        "Path: P01 -> P14 -> P15 -> P16 -> P25 -> P17 -> P18 -> P21 -> P22 -> P28 -> P07\nDistance: 1434.6"
    );
    assert_eq!(router.path_segments(&route).len(), 10);
}

#[test]
fn every_pair_is_connected_and_symmetric() {
    let router = city_router(false);
    let ids = router.node_ids().collect::<Vec<_>>();
    assert_eq!(ids.len(), 28);
    for a in &ids {
        for b in &ids {
            let forward = router.route(a, b).unwrap();
            let backward = router.route(b, a).unwrap();
            assert!(forward.is_reachable());
            assert!((forward.distance() - backward.distance()).abs() < 1e-9);
            let mut reversed = backward.nodes().to_vec();
            reversed.reverse();
            assert_eq!(forward.nodes(), reversed.as_slice());
        }
    }
}

#[test]
fn distance_matches_drawn_segments() {
    let router = city_router(false);
    let ids = router.node_ids().collect::<Vec<_>>();
    for a in &ids {
        for b in &ids {
            let route = router.route(a, b).unwrap();
            let drawn: f64 = router
                .path_segments(&route)
                .iter()
                .map(|(p, q)| p.distance(q))
                .sum();
            assert!((drawn - route.distance()).abs() < 1e-9);
        }
    }
}

#[test]
fn streets_are_drawable() {
    let router = city_router(false);
    assert_eq!(router.map().segments().count(), 30);
    assert_eq!(router.graph().edge_count(), 30);
    assert!(router.route("P01", "P99").is_err());
}
