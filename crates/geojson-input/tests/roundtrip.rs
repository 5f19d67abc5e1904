//! Property tests: encoded geometries decode to equal values, and decoders
//! enforce cardinality for any input size.

use geojson_input::{
    decode_geometry, decode_line_string, encode_geometry, encode_geometry_with_options, Coordinate,
    DecodeContext, EncodeOptions, Geometry, GeometryFactory, LinearRing, Literal,
    SharedFactoryRegistry, Srid, Violation,
};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-1.0e6..1.0e6f64, -1.0e6..1.0e6f64, proptest::option::of(-1.0e4..1.0e4f64))
        .prop_map(|(x, y, z)| Coordinate { x, y, z })
}

fn srid() -> impl Strategy<Value = Srid> {
    prop_oneof![
        Just(Srid::UNSET),
        Just(Srid::WGS84),
        Just(Srid(3857)),
        (1u32..=i32::MAX as u32).prop_map(Srid),
    ]
}

fn ring() -> impl Strategy<Value = LinearRing> {
    proptest::collection::vec(coordinate(), 3..7).prop_map(|mut coords| {
        coords.push(coords[0]);
        LinearRing { coords }
    })
}

fn polygon_rings() -> impl Strategy<Value = (LinearRing, Vec<LinearRing>)> {
    (ring(), proptest::collection::vec(ring(), 0..3))
}

fn simple_geometry() -> impl Strategy<Value = Geometry> {
    let line = || proptest::collection::vec(coordinate(), 2..8);
    prop_oneof![
        (srid(), coordinate()).prop_map(|(s, c)| Geometry::from(GeometryFactory::new(s).create_point(c))),
        (srid(), line()).prop_map(|(s, l)| Geometry::from(GeometryFactory::new(s).create_line_string(l))),
        (srid(), polygon_rings())
            .prop_map(|(s, (e, i))| Geometry::from(GeometryFactory::new(s).create_polygon(e, i))),
        (srid(), proptest::collection::vec(coordinate(), 1..6))
            .prop_map(|(s, c)| Geometry::from(GeometryFactory::new(s).create_multi_point(c))),
        (srid(), proptest::collection::vec(line(), 1..4))
            .prop_map(|(s, l)| Geometry::from(GeometryFactory::new(s).create_multi_line_string(l))),
        (srid(), proptest::collection::vec(polygon_rings(), 1..3))
            .prop_map(|(s, p)| Geometry::from(GeometryFactory::new(s).create_multi_polygon(p))),
    ]
}

fn geometry() -> impl Strategy<Value = Geometry> {
    prop_oneof![
        3 => simple_geometry(),
        1 => (srid(), proptest::collection::vec(simple_geometry(), 0..4)).prop_map(|(s, members)| {
            let mut collection: Geometry = GeometryFactory::new(s).create_geometry_collection(members).into();
            // Members of a collection with an SRID carry it
            if !s.is_unset() {
                collection.set_srid(s);
            }
            collection
        }),
    ]
}

proptest! {
    #[test]
    fn test_encode_decode_preserves_geometry(g in geometry(), bbox in any::<bool>()) {
        let registry = SharedFactoryRegistry::new();
        let ctx = DecodeContext::new(&registry);
        let options = if bbox { EncodeOptions::with_bbox() } else { EncodeOptions::new() };

        let literal = encode_geometry_with_options(&g, options).unwrap();
        let decoded = decode_geometry(&literal, g.geometry_type(), &ctx).unwrap();
        prop_assert_eq!(decoded, Some(g));
    }

    #[test]
    fn test_line_string_cardinality(coords in proptest::collection::vec(coordinate(), 0..6)) {
        let registry = SharedFactoryRegistry::new();
        let ctx = DecodeContext::new(&registry);
        let literal = Literal::object([
            ("type", Literal::enum_symbol("LineString")),
            (
                "coordinates",
                Literal::list(coords.iter().map(|c| Literal::position(c.x, c.y))),
            ),
        ]);

        match decode_line_string(&literal, &ctx) {
            Ok(Some(line)) => {
                prop_assert!(coords.len() >= 2);
                prop_assert_eq!(line.coords.len(), coords.len());
            }
            Ok(None) => prop_assert!(false, "non-null literal decoded to None"),
            Err(err) => {
                prop_assert!(coords.len() < 2);
                prop_assert_eq!(
                    err.violation(),
                    &Violation::TooFewPositions { found: coords.len(), min: 2 }
                );
            }
        }
    }

    #[test]
    fn test_encoded_srid_is_decoded_srid(g in simple_geometry()) {
        let registry = SharedFactoryRegistry::new();
        let ctx = DecodeContext::new(&registry);

        let decoded = decode_geometry(&encode_geometry(&g).unwrap(), g.geometry_type(), &ctx)
            .unwrap()
            .unwrap();
        prop_assert_eq!(decoded.srid(), g.srid());
        // Only explicit SRIDs touch the registry
        prop_assert_eq!(registry.len(), usize::from(!g.srid().is_unset()));
    }
}
