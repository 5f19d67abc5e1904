//! Geometry value types.
//!
//! Geometries are plain data: they keep no reference to the literal they
//! were decoded from. Structural invariants (minimum point counts, ring
//! closure) are enforced by the decoder and by [`crate::validate`].

use std::fmt;

/// GeoJSON geometry type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum GeometryType {
    Point = 1,
    MultiPoint = 2,
    LineString = 3,
    MultiLineString = 4,
    Polygon = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
}

impl GeometryType {
    /// All geometry types, in tag order.
    pub const ALL: [GeometryType; 7] = [
        GeometryType::Point,
        GeometryType::MultiPoint,
        GeometryType::LineString,
        GeometryType::MultiLineString,
        GeometryType::Polygon,
        GeometryType::MultiPolygon,
        GeometryType::GeometryCollection,
    ];

    /// Returns the GeoJSON name of this type (also its enum symbol).
    pub fn name(self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::LineString => "LineString",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }

    /// Parses a GeoJSON type name. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Option<GeometryType> {
        GeometryType::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Spatial reference system identifier.
///
/// `Srid::UNSET` (0) means "use the process-wide default reference system".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Srid(pub u32);

impl Srid {
    /// The unset reference system.
    pub const UNSET: Srid = Srid(0);

    /// WGS 84.
    pub const WGS84: Srid = Srid(4326);

    /// Returns true if no reference system was chosen.
    pub fn is_unset(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Srid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A position: x/y with an optional z ordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Coordinate {
    /// Creates a 2D coordinate.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Creates a 3D coordinate.
    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Compares x and y only.
    pub fn equals_2d(&self, other: &Coordinate) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Returns true if every ordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_none_or(f64::is_finite)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A closed sequence of at least four coordinates bounding a polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRing {
    pub coords: Vec<Coordinate>,
}

impl LinearRing {
    /// Minimum number of coordinates in a ring.
    pub const MIN_POINTS: usize = 4;

    /// Returns true if the first and last coordinates coincide in x/y.
    pub fn is_closed(&self) -> bool {
        match (self.coords.first(), self.coords.last()) {
            (Some(first), Some(last)) => first.equals_2d(last),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub coord: Coordinate,
    pub srid: Srid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    pub coords: Vec<Coordinate>,
    pub srid: Srid,
}

impl LineString {
    /// Minimum number of coordinates in a line string.
    pub const MIN_POINTS: usize = 2;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub exterior: LinearRing,
    pub interiors: Vec<LinearRing>,
    pub srid: Srid,
}

impl Polygon {
    /// Iterates the exterior ring followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiPoint {
    pub coords: Vec<Coordinate>,
    pub srid: Srid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiLineString {
    pub line_strings: Vec<LineString>,
    pub srid: Srid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon {
    pub polygons: Vec<Polygon>,
    pub srid: Srid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollection {
    pub geometries: Vec<Geometry>,
    pub srid: Srid,
}

/// A decoded geometry value.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

/// Axis-aligned bounds `[min_x, min_y, max_x, max_y]`.
pub type BoundingBox = [f64; 4];

impl Geometry {
    /// Returns the type tag of this geometry.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// Returns the spatial reference of this geometry.
    pub fn srid(&self) -> Srid {
        match self {
            Geometry::Point(g) => g.srid,
            Geometry::LineString(g) => g.srid,
            Geometry::Polygon(g) => g.srid,
            Geometry::MultiPoint(g) => g.srid,
            Geometry::MultiLineString(g) => g.srid,
            Geometry::MultiPolygon(g) => g.srid,
            Geometry::GeometryCollection(g) => g.srid,
        }
    }

    /// Sets the spatial reference of this geometry and all of its parts.
    pub fn set_srid(&mut self, srid: Srid) {
        match self {
            Geometry::Point(g) => g.srid = srid,
            Geometry::LineString(g) => g.srid = srid,
            Geometry::Polygon(g) => g.srid = srid,
            Geometry::MultiPoint(g) => g.srid = srid,
            Geometry::MultiLineString(g) => {
                g.srid = srid;
                for line in &mut g.line_strings {
                    line.srid = srid;
                }
            }
            Geometry::MultiPolygon(g) => {
                g.srid = srid;
                for polygon in &mut g.polygons {
                    polygon.srid = srid;
                }
            }
            Geometry::GeometryCollection(g) => {
                g.srid = srid;
                for member in &mut g.geometries {
                    member.set_srid(srid);
                }
            }
        }
    }

    /// Gives `srid` to this geometry and every nested part whose SRID is unset.
    ///
    /// Parts with an explicit SRID are kept. If one differs from `srid`, the
    /// first such SRID is returned as the error; the geometry may then be
    /// partially updated.
    pub fn inherit_srid(&mut self, srid: Srid) -> Result<(), Srid> {
        let own = self.srid();
        if own.is_unset() {
            match self {
                Geometry::GeometryCollection(g) => {
                    g.srid = srid;
                    for member in &mut g.geometries {
                        member.inherit_srid(srid)?;
                    }
                }
                other => other.set_srid(srid),
            }
            Ok(())
        } else if own == srid {
            Ok(())
        } else {
            Err(own)
        }
    }

    /// Visits every coordinate of this geometry in document order.
    pub fn for_each_coord(&self, f: &mut impl FnMut(&Coordinate)) {
        match self {
            Geometry::Point(g) => f(&g.coord),
            Geometry::LineString(g) => g.coords.iter().for_each(f),
            Geometry::Polygon(g) => g.rings().flat_map(|r| r.coords.iter()).for_each(f),
            Geometry::MultiPoint(g) => g.coords.iter().for_each(f),
            Geometry::MultiLineString(g) => {
                g.line_strings.iter().flat_map(|l| l.coords.iter()).for_each(f)
            }
            Geometry::MultiPolygon(g) => g
                .polygons
                .iter()
                .flat_map(Polygon::rings)
                .flat_map(|r| r.coords.iter())
                .for_each(f),
            Geometry::GeometryCollection(g) => {
                for member in &g.geometries {
                    member.for_each_coord(f);
                }
            }
        }
    }

    /// Computes the 2D bounding box, or None for an empty collection.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut bbox: Option<BoundingBox> = None;
        self.for_each_coord(&mut |c| {
            bbox = Some(match bbox {
                None => [c.x, c.y, c.x, c.y],
                Some([min_x, min_y, max_x, max_y]) => {
                    [min_x.min(c.x), min_y.min(c.y), max_x.max(c.x), max_y.max(c.y)]
                }
            });
        });
        bbox
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Geometry {
                fn from(g: $variant) -> Self {
                    Geometry::$variant(g)
                }
            }
        )*
    };
}

impl_from_variant!(
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(f64, f64)]) -> LinearRing {
        LinearRing { coords: points.iter().copied().map(Coordinate::from).collect() }
    }

    #[test]
    fn test_geometry_type_names() {
        for t in GeometryType::ALL {
            assert_eq!(GeometryType::from_name(t.name()), Some(t));
        }
        assert_eq!(GeometryType::from_name("linestring"), None);
        assert_eq!(GeometryType::from_name("LINE_STRING"), None);
    }

    #[test]
    fn test_ring_closure() {
        assert!(ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]).is_closed());
        assert!(!ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).is_closed());
        assert!(!ring(&[]).is_closed());

        // z is ignored for closure
        let mut r = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        r.coords.push(Coordinate::with_z(0.0, 0.0, 5.0));
        assert!(r.is_closed());
    }

    #[test]
    fn test_coordinate_finite() {
        assert!(Coordinate::new(1.0, 2.0).is_finite());
        assert!(!Coordinate::new(f64::NAN, 2.0).is_finite());
        assert!(!Coordinate::with_z(1.0, 2.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_set_srid_propagates() {
        let line = LineString { coords: vec![(0.0, 0.0).into(), (1.0, 1.0).into()], srid: Srid::UNSET };
        let mut g = Geometry::GeometryCollection(GeometryCollection {
            geometries: vec![
                Geometry::MultiLineString(MultiLineString { line_strings: vec![line], srid: Srid::UNSET }),
            ],
            srid: Srid::UNSET,
        });
        g.set_srid(Srid::WGS84);

        let Geometry::GeometryCollection(c) = &g else { panic!("expected collection") };
        let Geometry::MultiLineString(m) = &c.geometries[0] else { panic!("expected multi line") };
        assert_eq!(m.srid, Srid::WGS84);
        assert_eq!(m.line_strings[0].srid, Srid::WGS84);
    }

    #[test]
    fn test_inherit_srid_keeps_explicit_parts() {
        let point = |srid| Geometry::Point(Point { coord: Coordinate::new(1.0, 1.0), srid });
        let nested = |members| Geometry::GeometryCollection(GeometryCollection { geometries: members, srid: Srid::UNSET });

        let mut g = nested(vec![point(Srid::UNSET), point(Srid::WGS84)]);
        assert_eq!(g.inherit_srid(Srid::WGS84), Ok(()));
        assert_eq!(g.srid(), Srid::WGS84);
        let Geometry::GeometryCollection(c) = &g else { panic!("expected collection") };
        assert!(c.geometries.iter().all(|m| m.srid() == Srid::WGS84));

        let mut g = nested(vec![nested(vec![point(Srid(3857))])]);
        assert_eq!(g.inherit_srid(Srid::WGS84), Err(Srid(3857)));

        assert_eq!(point(Srid(3857)).inherit_srid(Srid::WGS84), Err(Srid(3857)));
    }

    #[test]
    fn test_bounding_box() {
        let g = Geometry::Polygon(Polygon {
            exterior: ring(&[(-1.0, 2.0), (3.0, 2.0), (3.0, 5.0), (-1.0, 2.0)]),
            interiors: vec![],
            srid: Srid::UNSET,
        });
        assert_eq!(g.bounding_box(), Some([-1.0, 2.0, 3.0, 5.0]));

        let empty = Geometry::GeometryCollection(GeometryCollection { geometries: vec![], srid: Srid::UNSET });
        assert_eq!(empty.bounding_box(), None);
    }
}
