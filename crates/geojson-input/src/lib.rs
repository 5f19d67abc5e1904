//! GeoJSON geometry input decoding.
//!
//! This crate turns GeoJSON-shaped literal trees, as a query-language parser
//! produces them for input objects, into typed geometry values.
//!
//! # Overview
//!
//! A geometry input object has up to three recognized fields:
//! - `type`: the geometry-type symbol (`Point`, `LineString`, ...)
//! - `coordinates` (or `geometries` for collections): the payload
//! - `crs`: an optional integer SRID
//!
//! Every other field is ignored. A decoder checks the object shape and the
//! variant's invariants, then builds the geometry with the factory for the
//! requested SRID, or the default factory when no `crs` is given.
//!
//! # Quick Start
//!
//! ```rust
//! use geojson_input::{decode_line_string, DecodeContext, Literal, SharedFactoryRegistry, Srid};
//!
//! let literal = Literal::object([
//!     ("type", Literal::enum_symbol("LineString")),
//!     ("coordinates", Literal::list([Literal::position(1.0, 1.0), Literal::position(2.0, 2.0)])),
//!     ("crs", Literal::Int(4326)),
//! ]);
//!
//! let registry = SharedFactoryRegistry::new();
//! let ctx = DecodeContext::new(&registry);
//! let line = decode_line_string(&literal, &ctx).unwrap().unwrap();
//! assert_eq!(line.coords.len(), 2);
//! assert_eq!(line.srid, Srid::WGS84);
//!
//! // Null decodes to nothing
//! assert!(decode_line_string(&Literal::Null, &ctx).unwrap().is_none());
//! ```
//!
//! # Modules
//!
//! - [`model`]: Literal trees and geometry values
//! - [`codec`]: Decoding and encoding
//! - [`factory`]: Geometry factories and the SRID registry
//! - [`schema`]: Input object type descriptors
//! - [`validate`]: Structural validation of geometry values
//! - [`error`]: Error types
//! - [`limits`]: Security limits for decoding
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - Collection nesting and total position count are bounded
//! - SRIDs are range-checked before a factory is created
//! - Invalid input is rejected with descriptive errors

pub mod codec;
pub mod error;
pub mod factory;
pub mod limits;
pub mod model;
pub mod schema;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{
    decode_geometry, decode_geometry_collection, decode_line_string, decode_multi_line_string,
    decode_multi_point, decode_multi_polygon, decode_point, decode_polygon, encode_geometry,
    encode_geometry_with_options, resolve_fields, DecodeContext, DecodeOptions, EncodeOptions,
    ScalarDecoder, StandardScalars,
};
pub use error::{DecodeError, EncodeError, ScalarError, ValidationError, Violation};
pub use factory::{global_registry, FactoryRegistry, GeometryFactory, SharedFactoryRegistry, DEFAULT_FACTORY};
pub use model::{
    BoundingBox, Coordinate, Geometry, GeometryCollection, GeometryType, LineString, LinearRing,
    Literal, MultiLineString, MultiPoint, MultiPolygon, ObjectField, Point, Polygon, Srid,
};
pub use schema::{input_object_type, input_object_types, InputObjectType};
pub use validate::validate_geometry;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
