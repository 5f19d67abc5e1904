//! Structural validation of geometry values.
//!
//! The decoder only produces valid geometries. Values built by hand (or
//! through a [`crate::GeometryFactory`]) can be checked here before they are
//! encoded or handed on.

use crate::error::ValidationError;
use crate::model::{Coordinate, Geometry, GeometryType, LineString, LinearRing, Polygon, Srid};

/// Validates a geometry and all of its parts.
///
/// Checks:
/// - minimum position counts (LineString 2, ring 4, multi geometries 1)
/// - ring closure
/// - finite coordinates
/// - parts of multi geometries share the parent SRID; members of a
///   collection with an SRID carry that SRID
pub fn validate_geometry(geometry: &Geometry) -> Result<(), ValidationError> {
    match geometry {
        Geometry::Point(p) => check_finite(std::slice::from_ref(&p.coord), GeometryType::Point),
        Geometry::LineString(l) => validate_line_string(l),
        Geometry::Polygon(p) => validate_polygon(p),
        Geometry::MultiPoint(m) => {
            if m.coords.is_empty() {
                return Err(ValidationError::Empty { geometry_type: GeometryType::MultiPoint });
            }
            check_finite(&m.coords, GeometryType::MultiPoint)
        }
        Geometry::MultiLineString(m) => {
            if m.line_strings.is_empty() {
                return Err(ValidationError::Empty { geometry_type: GeometryType::MultiLineString });
            }
            for line in &m.line_strings {
                check_srid(GeometryType::MultiLineString, m.srid, line.srid)?;
                validate_line_string(line)?;
            }
            Ok(())
        }
        Geometry::MultiPolygon(m) => {
            if m.polygons.is_empty() {
                return Err(ValidationError::Empty { geometry_type: GeometryType::MultiPolygon });
            }
            for polygon in &m.polygons {
                check_srid(GeometryType::MultiPolygon, m.srid, polygon.srid)?;
                validate_polygon(polygon)?;
            }
            Ok(())
        }
        Geometry::GeometryCollection(c) => {
            for member in &c.geometries {
                if !c.srid.is_unset() {
                    check_srid(GeometryType::GeometryCollection, c.srid, member.srid())?;
                }
                validate_geometry(member)?;
            }
            Ok(())
        }
    }
}

fn validate_line_string(line: &LineString) -> Result<(), ValidationError> {
    if line.coords.len() < LineString::MIN_POINTS {
        return Err(ValidationError::TooFewPositions {
            geometry_type: GeometryType::LineString,
            found: line.coords.len(),
            min: LineString::MIN_POINTS,
        });
    }
    check_finite(&line.coords, GeometryType::LineString)
}

fn validate_polygon(polygon: &Polygon) -> Result<(), ValidationError> {
    for (index, ring) in polygon.rings().enumerate() {
        validate_ring(ring, index)?;
    }
    Ok(())
}

fn validate_ring(ring: &LinearRing, index: usize) -> Result<(), ValidationError> {
    if ring.coords.len() < LinearRing::MIN_POINTS {
        return Err(ValidationError::TooFewPositions {
            geometry_type: GeometryType::Polygon,
            found: ring.coords.len(),
            min: LinearRing::MIN_POINTS,
        });
    }
    if !ring.is_closed() {
        return Err(ValidationError::RingNotClosed { ring: index });
    }
    check_finite(&ring.coords, GeometryType::Polygon)
}

fn check_finite(coords: &[Coordinate], geometry_type: GeometryType) -> Result<(), ValidationError> {
    if coords.iter().all(Coordinate::is_finite) {
        Ok(())
    } else {
        Err(ValidationError::NonFiniteCoordinate { geometry_type })
    }
}

fn check_srid(geometry_type: GeometryType, expected: Srid, part: Srid) -> Result<(), ValidationError> {
    if expected == part {
        Ok(())
    } else {
        Err(ValidationError::MixedSrid { geometry_type, expected, part })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::GeometryFactory;
    use crate::model::{GeometryCollection, MultiLineString, MultiPoint};

    fn ring(points: &[(f64, f64)]) -> LinearRing {
        LinearRing { coords: points.iter().copied().map(Coordinate::from).collect() }
    }

    #[test]
    fn test_valid_geometries() {
        let f = GeometryFactory::new(Srid::WGS84);
        let line = f.create_line_string(vec![(0.0, 0.0).into(), (1.0, 1.0).into()]);
        assert!(validate_geometry(&line.clone().into()).is_ok());

        let square = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert!(validate_geometry(&f.create_polygon(square, vec![]).into()).is_ok());

        let collection = f.create_geometry_collection(vec![line.into()]);
        assert!(validate_geometry(&collection.into()).is_ok());
    }

    #[test]
    fn test_line_string_too_short() {
        let line = GeometryFactory::default().create_line_string(vec![(0.0, 0.0).into()]);
        assert_eq!(
            validate_geometry(&line.into()),
            Err(ValidationError::TooFewPositions { geometry_type: GeometryType::LineString, found: 1, min: 2 })
        );
    }

    #[test]
    fn test_polygon_ring_rules() {
        let f = GeometryFactory::default();
        let open = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let square = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert_eq!(
            validate_geometry(&f.create_polygon(square, vec![open]).into()),
            Err(ValidationError::RingNotClosed { ring: 1 })
        );

        let triangle = ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]);
        assert!(matches!(
            validate_geometry(&f.create_polygon(triangle, vec![]).into()),
            Err(ValidationError::TooFewPositions { min: 4, .. })
        ));
    }

    #[test]
    fn test_empty_and_non_finite() {
        let empty = MultiPoint { coords: vec![], srid: Srid::UNSET };
        assert_eq!(
            validate_geometry(&empty.into()),
            Err(ValidationError::Empty { geometry_type: GeometryType::MultiPoint })
        );

        let nan = GeometryFactory::default().create_point(Coordinate::new(f64::NAN, 0.0));
        assert_eq!(
            validate_geometry(&nan.into()),
            Err(ValidationError::NonFiniteCoordinate { geometry_type: GeometryType::Point })
        );

        // Empty collections are valid
        let none = GeometryCollection { geometries: vec![], srid: Srid::UNSET };
        assert!(validate_geometry(&none.into()).is_ok());
    }

    #[test]
    fn test_mixed_srid() {
        let part = GeometryFactory::new(Srid(3857)).create_line_string(vec![(0.0, 0.0).into(), (1.0, 1.0).into()]);
        let multi = MultiLineString { line_strings: vec![part.clone()], srid: Srid::WGS84 };
        assert_eq!(
            validate_geometry(&multi.into()),
            Err(ValidationError::MixedSrid {
                geometry_type: GeometryType::MultiLineString,
                expected: Srid::WGS84,
                part: Srid(3857),
            })
        );

        let collection = GeometryCollection { geometries: vec![part.into()], srid: Srid::WGS84 };
        assert!(validate_geometry(&collection.into()).is_err());
    }
}
