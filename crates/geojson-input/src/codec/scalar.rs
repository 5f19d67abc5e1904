//! Leaf decoders for positions, integers and geometry-type symbols.
//!
//! Geometry decoders call these through the [`ScalarDecoder`] trait so that a
//! schema layer with its own scalar grammar can plug in.

use crate::error::ScalarError;
use crate::limits::MAX_SRID;
use crate::model::{Coordinate, GeometryType, Literal, Srid};

/// Decoders for the leaf values of a geometry literal.
pub trait ScalarDecoder: Send + Sync {
    /// Decodes a position (`[x, y]` or `[x, y, z]`).
    fn decode_position(&self, literal: &Literal<'_>) -> Result<Coordinate, ScalarError>;

    /// Decodes an integer.
    fn decode_int(&self, literal: &Literal<'_>) -> Result<i64, ScalarError>;

    /// Decodes a geometry-type symbol.
    fn decode_geometry_type(&self, literal: &Literal<'_>) -> Result<GeometryType, ScalarError>;

    /// Decodes an SRID: a non-negative integer no larger than [`MAX_SRID`].
    fn decode_srid(&self, literal: &Literal<'_>) -> Result<Srid, ScalarError> {
        let value = self.decode_int(literal)?;
        if value < 0 {
            return Err(ScalarError::NegativeSrid { value });
        }
        if value > MAX_SRID {
            return Err(ScalarError::SridOutOfRange { value, max: MAX_SRID });
        }
        Ok(Srid(value as u32))
    }
}

/// The default leaf decoders.
///
/// - Positions are lists of two or three numbers; ints widen to floats.
/// - Integers must be int literals.
/// - Geometry types are enum symbols, or strings (as variables deliver them),
///   spelled exactly like the GeoJSON type names.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScalars;

impl StandardScalars {
    fn decode_number(literal: &Literal<'_>) -> Result<f64, ScalarError> {
        let value = match literal {
            Literal::Int(v) => *v as f64,
            Literal::Float(v) => *v,
            other => return Err(ScalarError::NotANumber { found: other.kind() }),
        };
        if !value.is_finite() {
            return Err(ScalarError::NonFinite);
        }
        Ok(value)
    }
}

impl ScalarDecoder for StandardScalars {
    fn decode_position(&self, literal: &Literal<'_>) -> Result<Coordinate, ScalarError> {
        let items = literal
            .as_list()
            .ok_or(ScalarError::ExpectedList { found: literal.kind() })?;

        match items {
            [x, y] => Ok(Coordinate::new(Self::decode_number(x)?, Self::decode_number(y)?)),
            [x, y, z] => Ok(Coordinate::with_z(
                Self::decode_number(x)?,
                Self::decode_number(y)?,
                Self::decode_number(z)?,
            )),
            _ => Err(ScalarError::PositionArity { len: items.len() }),
        }
    }

    fn decode_int(&self, literal: &Literal<'_>) -> Result<i64, ScalarError> {
        match literal {
            Literal::Int(v) => Ok(*v),
            other => Err(ScalarError::ExpectedInt { found: other.kind() }),
        }
    }

    fn decode_geometry_type(&self, literal: &Literal<'_>) -> Result<GeometryType, ScalarError> {
        let symbol = match literal {
            Literal::Enum(s) | Literal::String(s) => s,
            other => return Err(ScalarError::ExpectedEnum { found: other.kind() }),
        };
        GeometryType::from_name(symbol).ok_or_else(|| ScalarError::UnknownGeometryType {
            symbol: symbol.to_string(),
        })
    }
}
