//! Data model types.
//!
//! - Literal trees (decoder input)
//! - Geometry values (decoder output)

pub mod geometry;
pub mod literal;

pub use geometry::{
    BoundingBox, Coordinate, Geometry, GeometryCollection, GeometryType, LineString, LinearRing,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, Srid,
};
pub use literal::{Literal, ObjectField};
