//! Error types for geometry decoding, encoding and validation.

use thiserror::Error;

use crate::model::{GeometryType, Srid};

/// Error during literal decoding.
///
/// Every structural deviation is reported as [`DecodeError::InvalidStructure`]
/// for the geometry type being decoded; [`Violation`] records which rule failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("invalid {geometry_type} input structure: {violation}")]
    InvalidStructure {
        geometry_type: GeometryType,
        violation: Violation,
    },
}

impl DecodeError {
    pub(crate) fn invalid(geometry_type: GeometryType, violation: Violation) -> Self {
        DecodeError::InvalidStructure { geometry_type, violation }
    }

    /// Returns the geometry type that was being decoded.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            DecodeError::InvalidStructure { geometry_type, .. } => *geometry_type,
        }
    }

    /// Returns the rule that was violated.
    pub fn violation(&self) -> &Violation {
        match self {
            DecodeError::InvalidStructure { violation, .. } => violation,
        }
    }
}

/// The structural rule a literal broke.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("expected an object literal, found {found}")]
    NotAnObject { found: &'static str },

    #[error("object has {found} fields, at least {min} required")]
    TooFewFields { found: usize, min: usize },

    #[error("required field `{field}` is missing")]
    MissingField { field: &'static str },

    #[error("field `{field}` appears more than once")]
    DuplicateField { field: &'static str },

    #[error("declared type is {found}")]
    TypeMismatch { found: GeometryType },

    #[error("field `{field}`: {source}")]
    InvalidScalar {
        field: &'static str,
        #[source]
        source: ScalarError,
    },

    #[error("field `{field}` must be a list, found {found}")]
    NotAList { field: &'static str, found: &'static str },

    #[error("{found} positions given, at least {min} required")]
    TooFewPositions { found: usize, min: usize },

    #[error("{found} members given, at least {min} required")]
    TooFewMembers { found: usize, min: usize },

    #[error("ring {ring} is not closed (first and last positions differ)")]
    RingNotClosed { ring: usize },

    #[error("position count exceeds maximum {max}")]
    TooManyPositions { max: usize },

    #[error("geometry nesting exceeds maximum depth {max}")]
    NestingTooDeep { max: usize },

    #[error("member {index} is null")]
    NullMember { index: usize },

    #[error("member {index} is not an object with a `type` field")]
    UntaggedMember { index: usize },

    #[error("member {index} has an invalid `type`: {source}")]
    InvalidMemberType {
        index: usize,
        #[source]
        source: ScalarError,
    },

    #[error("member {index}: {source}")]
    InvalidMember {
        index: usize,
        #[source]
        source: Box<DecodeError>,
    },

    #[error("member {index} declares SRID {member}, collection declares {collection}")]
    SridConflict {
        index: usize,
        collection: Srid,
        member: Srid,
    },
}

/// Error from a leaf (scalar or enum) decoder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScalarError {
    #[error("expected a list, found {found}")]
    ExpectedList { found: &'static str },

    #[error("position has {len} ordinates, expected 2 or 3")]
    PositionArity { len: usize },

    #[error("expected a number, found {found}")]
    NotANumber { found: &'static str },

    #[error("number is not finite")]
    NonFinite,

    #[error("expected an integer, found {found}")]
    ExpectedInt { found: &'static str },

    #[error("SRID {value} is negative")]
    NegativeSrid { value: i64 },

    #[error("SRID {value} exceeds maximum {max}")]
    SridOutOfRange { value: i64, max: i64 },

    #[error("expected a geometry type symbol, found {found}")]
    ExpectedEnum { found: &'static str },

    #[error("unknown geometry type {symbol:?}")]
    UnknownGeometryType { symbol: String },
}

/// Error when a constructed geometry breaks a structural invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{geometry_type} has {found} positions, at least {min} required")]
    TooFewPositions {
        geometry_type: GeometryType,
        found: usize,
        min: usize,
    },

    #[error("{geometry_type} has no members")]
    Empty { geometry_type: GeometryType },

    #[error("ring {ring} is not closed")]
    RingNotClosed { ring: usize },

    #[error("{geometry_type} contains a non-finite coordinate")]
    NonFiniteCoordinate { geometry_type: GeometryType },

    #[error("part of {geometry_type} has SRID {part}, expected {expected}")]
    MixedSrid {
        geometry_type: GeometryType,
        expected: Srid,
        part: Srid,
    },
}

/// Error during geometry encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("cannot encode invalid geometry: {0}")]
    InvalidGeometry(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_message() {
        let err = DecodeError::invalid(
            GeometryType::LineString,
            Violation::TooFewPositions { found: 1, min: 2 },
        );
        assert_eq!(
            err.to_string(),
            "invalid LineString input structure: 1 positions given, at least 2 required"
        );
        assert_eq!(err.geometry_type(), GeometryType::LineString);
    }

    #[test]
    fn test_nested_member_message() {
        let inner = DecodeError::invalid(GeometryType::Point, Violation::MissingField { field: "coordinates" });
        let outer = DecodeError::invalid(
            GeometryType::GeometryCollection,
            Violation::InvalidMember { index: 2, source: Box::new(inner) },
        );
        assert!(outer.to_string().contains("member 2: invalid Point input structure"));
    }
}
