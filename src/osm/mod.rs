// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod reader;

pub use reader::{
    add_features_from_buffer, add_features_from_file, add_features_from_io, Error, FileFormat,
    Options, DEFAULT_ROAD_TYPES,
};

#[cfg(test)]
mod tests {
    use super::super::{planar_distance, Graph};
    use super::*;

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-9),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    macro_rules! assert_edge {
        ($graph:expr, $from:expr, $to:expr) => {
            assert!($graph.get_edge($from, $to).is_finite());
        };
    }

    macro_rules! assert_no_edge {
        ($graph:expr, $from:expr, $to:expr) => {
            assert!($graph.get_edge($from, $to).is_infinite());
        };
    }

    const SIMPLE_XML: &[u8] = include_bytes!("reader/test_fixtures/simple.osm");

    fn build(data: &[u8], file_format: FileFormat) -> Graph {
        let mut g = Graph::default();
        let options = Options {
            road_types: DEFAULT_ROAD_TYPES,
            file_format,
        };
        add_features_from_buffer(&mut g, &options, data).unwrap();
        g
    }

    fn check_simple_graph(g: &Graph) {
        // 1 - 2 - 3 - 4 ·· 5    6
        //
        // 1-2-3 is residential, 3-4 tertiary, 4-5 service (discarded),
        // 2-4 has no highway tag, 6 lies on no way at all.

        // Only nodes on accepted roads make it into the graph
        assert_eq!(g.len(), 4);
        assert!(g.get_node(5).is_none());
        assert!(g.get_node(6).is_none());

        // Consecutive pairs are connected in both directions
        assert_edge!(g, 1, 2);
        assert_edge!(g, 2, 1);
        assert_edge!(g, 2, 3);
        assert_edge!(g, 3, 2);
        assert_edge!(g, 3, 4);
        assert_edge!(g, 4, 3);

        // ...but non-consecutive pairs of the same way are not
        assert_no_edge!(g, 1, 3);
        assert_no_edge!(g, 3, 1);

        // The service way and the untagged way contribute no edges
        assert_no_edge!(g, 4, 5);
        assert_no_edge!(g, 2, 4);

        // Edge costs are the planar distance between the endpoints
        let a = g.get_node(1).unwrap();
        let b = g.get_node(2).unwrap();
        assert_almost_eq!(
            g.get_edge(1, 2),
            planar_distance(a.lon, a.lat, b.lon, b.lat)
        );
        assert_eq!(g.get_edge(1, 2), g.get_edge(2, 1));
    }

    #[test]
    fn test_build_graph_xml() {
        let g = build(SIMPLE_XML, FileFormat::Xml);
        check_simple_graph(&g);
    }

    #[test]
    fn test_build_graph_gz_round_trip() {
        const DATA: &[u8] = include_bytes!("reader/test_fixtures/simple.osm.gz");
        let g = build(DATA, FileFormat::XmlGz);
        check_simple_graph(&g);
    }

    #[test]
    fn test_build_graph_bz2_round_trip() {
        const DATA: &[u8] = include_bytes!("reader/test_fixtures/simple.osm.bz2");
        let g = build(DATA, FileFormat::XmlBz2);
        check_simple_graph(&g);
    }

    #[test]
    fn test_rebuilding_is_idempotent() {
        let first = build(SIMPLE_XML, FileFormat::Xml);
        let second = build(SIMPLE_XML, FileFormat::Xml);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_node_ref_fails_the_build() {
        const DATA: &[u8] = br#"<osm>
            <node id="1" lon="0.0" lat="0.0"/>
            <way id="100">
                <nd ref="1"/>
                <nd ref="99"/>
                <tag k="highway" v="residential"/>
            </way>
        </osm>"#;

        let mut g = Graph::default();
        let err = add_features_from_buffer(&mut g, &Options::default(), DATA).unwrap_err();

        match err {
            Error::UnknownNodeRef { way, node } => {
                assert_eq!(way, 100);
                assert_eq!(node, 99);
            }
            other => panic!("expected UnknownNodeRef, got {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_refs_on_discarded_ways_are_harmless() {
        // A reference to a missing node only matters on accepted roads;
        // discarded ways are dropped before their references resolve.
        const DATA: &[u8] = br#"<osm>
            <node id="1" lon="0.0" lat="0.0"/>
            <way id="100">
                <nd ref="1"/>
                <nd ref="99"/>
                <tag k="highway" v="service"/>
            </way>
        </osm>"#;

        let mut g = Graph::default();
        add_features_from_buffer(&mut g, &Options::default(), DATA).unwrap();
        assert!(g.is_empty());
    }

    #[test]
    fn test_custom_road_types() {
        let mut g = Graph::default();
        let options = Options {
            road_types: &["service"],
            file_format: FileFormat::Xml,
        };
        add_features_from_buffer(&mut g, &options, SIMPLE_XML).unwrap();

        // Now only the service way 4-5 is accepted
        assert_eq!(g.len(), 2);
        assert_edge!(g, 4, 5);
        assert_edge!(g, 5, 4);
        assert_no_edge!(g, 1, 2);
    }

    #[test]
    fn test_duplicate_consecutive_refs_create_no_self_loop() {
        const DATA: &[u8] = br#"<osm>
            <node id="1" lon="0.0" lat="0.0"/>
            <node id="2" lon="1.0" lat="0.0"/>
            <way id="100">
                <nd ref="1"/>
                <nd ref="1"/>
                <nd ref="2"/>
                <tag k="highway" v="residential"/>
            </way>
        </osm>"#;

        let mut g = Graph::default();
        add_features_from_buffer(&mut g, &Options::default(), DATA).unwrap();

        assert!(g.get_edges(1).iter().all(|e| e.to != 1));
        assert_edge!(g, 1, 2);
    }
}
