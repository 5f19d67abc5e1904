//! Literal decoding and encoding for GeoJSON geometry input objects.
//!
//! - [`geometry`]: per-variant decoders and the decode context
//! - [`coords`]: coordinate-structure readers shared by the decoders
//! - [`scalar`]: leaf decoders (positions, integers, type symbols)
//! - [`fields`]: field lookup within object literals
//! - [`encode`]: geometry to literal

pub mod coords;
pub mod encode;
pub mod fields;
pub mod geometry;
pub mod scalar;

pub use coords::PolygonRings;
pub use encode::{encode_geometry, encode_geometry_with_options, EncodeOptions, BBOX_FIELD};
pub use fields::resolve_fields;
pub use geometry::{
    decode_geometry, decode_geometry_collection, decode_line_string, decode_multi_line_string,
    decode_multi_point, decode_multi_polygon, decode_point, decode_polygon, DecodeContext,
    DecodeOptions, MIN_FIELDS,
};
pub use scalar::{ScalarDecoder, StandardScalars};
