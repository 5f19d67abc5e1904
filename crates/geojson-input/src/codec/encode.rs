//! Geometry-to-literal encoding.
//!
//! Produces the literal form the decoder accepts, so that decoding an
//! encoded geometry yields an equal value.

use crate::error::EncodeError;
use crate::model::{Coordinate, Geometry, LinearRing, Literal, ObjectField, Polygon};
use crate::schema::{input_object_type, CRS_FIELD, TYPE_FIELD};
use crate::validate::validate_geometry;

/// Name of the optional bounding-box field.
pub const BBOX_FIELD: &str = "bbox";

/// Options for encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Emit a `bbox` field (`[min_x, min_y, max_x, max_y]`).
    ///
    /// Decoders ignore unknown fields, so the output still decodes.
    pub include_bbox: bool,
}

impl EncodeOptions {
    /// Creates default encoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that emit `bbox`.
    pub fn with_bbox() -> Self {
        Self { include_bbox: true }
    }
}

/// Encodes a geometry to an object literal.
pub fn encode_geometry(geometry: &Geometry) -> Result<Literal<'static>, EncodeError> {
    encode_geometry_with_options(geometry, EncodeOptions::default())
}

/// Encodes a geometry to an object literal with the given options.
///
/// The geometry is validated first.
pub fn encode_geometry_with_options(
    geometry: &Geometry,
    options: EncodeOptions,
) -> Result<Literal<'static>, EncodeError> {
    validate_geometry(geometry)?;
    Ok(encode_object(geometry, options))
}

fn encode_object(geometry: &Geometry, options: EncodeOptions) -> Literal<'static> {
    let geometry_type = geometry.geometry_type();
    let payload = match geometry {
        Geometry::Point(p) => encode_position(&p.coord),
        Geometry::LineString(l) => encode_positions(&l.coords),
        Geometry::Polygon(p) => encode_rings(p),
        Geometry::MultiPoint(m) => encode_positions(&m.coords),
        Geometry::MultiLineString(m) => {
            Literal::List(m.line_strings.iter().map(|l| encode_positions(&l.coords)).collect())
        }
        Geometry::MultiPolygon(m) => Literal::List(m.polygons.iter().map(encode_rings).collect()),
        Geometry::GeometryCollection(c) => {
            Literal::List(c.geometries.iter().map(|g| encode_object(g, options)).collect())
        }
    };

    let mut fields = Vec::with_capacity(4);
    fields.push(ObjectField::new(TYPE_FIELD, Literal::enum_symbol(geometry_type.name())));
    fields.push(ObjectField::new(input_object_type(geometry_type).payload_field().name, payload));

    let srid = geometry.srid();
    if !srid.is_unset() {
        fields.push(ObjectField::new(CRS_FIELD, Literal::Int(i64::from(srid.0))));
    }
    if options.include_bbox {
        if let Some(bbox) = geometry.bounding_box() {
            fields.push(ObjectField::new(BBOX_FIELD, Literal::list(bbox.map(Literal::Float))));
        }
    }

    Literal::Object(fields)
}

fn encode_position(coord: &Coordinate) -> Literal<'static> {
    match coord.z {
        Some(z) => Literal::list([Literal::Float(coord.x), Literal::Float(coord.y), Literal::Float(z)]),
        None => Literal::list([Literal::Float(coord.x), Literal::Float(coord.y)]),
    }
}

fn encode_positions(coords: &[Coordinate]) -> Literal<'static> {
    Literal::List(coords.iter().map(encode_position).collect())
}

fn encode_ring(ring: &LinearRing) -> Literal<'static> {
    encode_positions(&ring.coords)
}

fn encode_rings(polygon: &Polygon) -> Literal<'static> {
    Literal::List(polygon.rings().map(encode_ring).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::factory::GeometryFactory;
    use crate::model::Srid;

    #[test]
    fn test_encode_line_string() {
        let line = GeometryFactory::new(Srid::WGS84)
            .create_line_string(vec![Coordinate::new(1.0, 1.0), Coordinate::with_z(2.0, 2.0, 9.0)]);
        let literal = encode_geometry(&line.into()).unwrap();

        let expected = Literal::object([
            ("type", Literal::enum_symbol("LineString")),
            (
                "coordinates",
                Literal::list([
                    Literal::position(1.0, 1.0),
                    Literal::list([Literal::Float(2.0), Literal::Float(2.0), Literal::Float(9.0)]),
                ]),
            ),
            ("crs", Literal::Int(4326)),
        ]);
        assert_eq!(literal, expected);
    }

    #[test]
    fn test_encode_unset_srid_omits_crs() {
        let point = GeometryFactory::default().create_point(Coordinate::new(3.0, 4.0));
        let literal = encode_geometry(&point.into()).unwrap();
        let names: Vec<&str> = literal.as_object().unwrap().iter().map(|f| f.name.as_ref()).collect();
        assert_eq!(names, ["type", "coordinates"]);
    }

    #[test]
    fn test_encode_collection_uses_geometries_field() {
        let f = GeometryFactory::default();
        let collection = f.create_geometry_collection(vec![f.create_point(Coordinate::new(0.0, 0.0)).into()]);
        let literal = encode_geometry(&collection.into()).unwrap();
        let fields = literal.as_object().unwrap();
        assert_eq!(fields[1].name, "geometries");
        assert_eq!(fields[1].value.as_list().map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_encode_bbox() {
        let line = GeometryFactory::default()
            .create_line_string(vec![Coordinate::new(-1.0, 5.0), Coordinate::new(3.0, 2.0)]);
        let literal = encode_geometry_with_options(&line.into(), EncodeOptions::with_bbox()).unwrap();
        let bbox = literal.as_object().unwrap().iter().find(|f| f.name == BBOX_FIELD).unwrap();
        assert_eq!(
            bbox.value,
            Literal::list([Literal::Float(-1.0), Literal::Float(2.0), Literal::Float(3.0), Literal::Float(5.0)])
        );
    }

    #[test]
    fn test_encode_rejects_invalid() {
        let line = GeometryFactory::default().create_line_string(vec![Coordinate::new(0.0, 0.0)]);
        assert!(matches!(
            encode_geometry(&line.into()),
            Err(EncodeError::InvalidGeometry(ValidationError::TooFewPositions { .. }))
        ));
    }
}
