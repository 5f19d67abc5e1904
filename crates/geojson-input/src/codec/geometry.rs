//! Literal-to-geometry decoding.
//!
//! Every variant follows the same steps:
//!
//! 1. A null literal decodes to `None`.
//! 2. The literal must be an object with at least two fields.
//! 3. `type`, the payload field and `crs` are located with [`resolve_fields`].
//! 4. `type` must be present and equal the variant being decoded.
//! 5. The payload must be present and satisfy the variant's invariants.
//! 6. Without `crs` the geometry is built by [`DEFAULT_FACTORY`]; otherwise
//!    by the registry's factory for the decoded SRID.
//!
//! Any failure is a [`DecodeError::InvalidStructure`] for the variant.

use std::sync::Arc;

use crate::codec::coords::CoordReader;
use crate::codec::fields::{find_duplicate, resolve_fields};
use crate::codec::scalar::{ScalarDecoder, StandardScalars};
use crate::error::{DecodeError, Violation};
use crate::factory::{global_registry, FactoryRegistry, GeometryFactory, DEFAULT_FACTORY};
use crate::limits::{MAX_NESTING_DEPTH, MAX_POSITIONS};
use crate::model::{
    Geometry, GeometryCollection, GeometryType, LineString, Literal, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};
use crate::schema::{input_object_type, CRS_FIELD, TYPE_FIELD};

/// Minimum field count of a geometry object literal (`type` and payload).
pub const MIN_FIELDS: usize = 2;

/// Options for decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum nesting of geometry collections.
    pub max_depth: usize,
    /// Maximum number of positions in one decode call.
    pub max_positions: usize,
    /// Reject objects that repeat `type`, the payload field or `crs`.
    ///
    /// When disabled, the first occurrence is used and later ones are ignored.
    pub reject_duplicate_fields: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_NESTING_DEPTH,
            max_positions: MAX_POSITIONS,
            reject_duplicate_fields: false,
        }
    }
}

impl DecodeOptions {
    /// Creates default decoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates strict options: duplicate fields are rejected.
    pub fn strict() -> Self {
        Self { reject_duplicate_fields: true, ..Self::default() }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_positions(mut self, max_positions: usize) -> Self {
        self.max_positions = max_positions;
        self
    }
}

/// Everything a decode call needs besides the literal.
///
/// The factory registry is injected here rather than reached globally;
/// [`DecodeContext::global`] opts into the process-wide registry.
#[derive(Clone, Copy)]
pub struct DecodeContext<'r> {
    registry: &'r dyn FactoryRegistry,
    scalars: &'r dyn ScalarDecoder,
    options: DecodeOptions,
}

impl<'r> DecodeContext<'r> {
    /// Creates a context over `registry` with the standard leaf decoders.
    pub fn new(registry: &'r dyn FactoryRegistry) -> Self {
        Self { registry, scalars: &StandardScalars, options: DecodeOptions::default() }
    }

    /// Replaces the leaf decoders.
    pub fn with_scalars(mut self, scalars: &'r dyn ScalarDecoder) -> Self {
        self.scalars = scalars;
        self
    }

    /// Replaces the decoding options.
    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }
}

impl DecodeContext<'static> {
    /// Creates a context over the process-wide registry.
    pub fn global() -> Self {
        Self::new(global_registry())
    }
}

impl std::fmt::Debug for DecodeContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodeContext").field("options", &self.options).finish_non_exhaustive()
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Decodes a literal as the `expected` geometry type.
///
/// Returns `Ok(None)` for a null literal.
pub fn decode_geometry(
    literal: &Literal<'_>,
    expected: GeometryType,
    ctx: &DecodeContext<'_>,
) -> Result<Option<Geometry>, DecodeError> {
    Session::new(ctx).geometry(literal, expected, 0).inspect_err(log_rejection)
}

pub fn decode_point(literal: &Literal<'_>, ctx: &DecodeContext<'_>) -> Result<Option<Point>, DecodeError> {
    Session::new(ctx).point(literal).inspect_err(log_rejection)
}

pub fn decode_line_string(literal: &Literal<'_>, ctx: &DecodeContext<'_>) -> Result<Option<LineString>, DecodeError> {
    Session::new(ctx).line_string(literal).inspect_err(log_rejection)
}

pub fn decode_polygon(literal: &Literal<'_>, ctx: &DecodeContext<'_>) -> Result<Option<Polygon>, DecodeError> {
    Session::new(ctx).polygon(literal).inspect_err(log_rejection)
}

pub fn decode_multi_point(literal: &Literal<'_>, ctx: &DecodeContext<'_>) -> Result<Option<MultiPoint>, DecodeError> {
    Session::new(ctx).multi_point(literal).inspect_err(log_rejection)
}

pub fn decode_multi_line_string(
    literal: &Literal<'_>,
    ctx: &DecodeContext<'_>,
) -> Result<Option<MultiLineString>, DecodeError> {
    Session::new(ctx).multi_line_string(literal).inspect_err(log_rejection)
}

pub fn decode_multi_polygon(
    literal: &Literal<'_>,
    ctx: &DecodeContext<'_>,
) -> Result<Option<MultiPolygon>, DecodeError> {
    Session::new(ctx).multi_polygon(literal).inspect_err(log_rejection)
}

pub fn decode_geometry_collection(
    literal: &Literal<'_>,
    ctx: &DecodeContext<'_>,
) -> Result<Option<GeometryCollection>, DecodeError> {
    Session::new(ctx).collection(literal, 0).inspect_err(log_rejection)
}

fn log_rejection(err: &DecodeError) {
    tracing::debug!(geometry_type = %err.geometry_type(), error = %err, "rejected geometry literal");
}

// =============================================================================
// DECODING
// =============================================================================

/// Fields of a geometry object once its type tag checked out.
struct Parts<'l, 'a> {
    payload: &'l Literal<'a>,
    payload_field: &'static str,
    crs: Option<&'l Literal<'a>>,
}

/// State of one decode call.
struct Session<'c> {
    registry: &'c dyn FactoryRegistry,
    options: DecodeOptions,
    coords: CoordReader<'c>,
}

impl<'c> Session<'c> {
    fn new(ctx: &'c DecodeContext<'_>) -> Self {
        Self {
            registry: ctx.registry,
            options: ctx.options,
            coords: CoordReader::new(ctx.scalars, ctx.options.max_positions),
        }
    }

    fn geometry(
        &mut self,
        literal: &Literal<'_>,
        geometry_type: GeometryType,
        depth: usize,
    ) -> Result<Option<Geometry>, DecodeError> {
        Ok(match geometry_type {
            GeometryType::Point => self.point(literal)?.map(Geometry::Point),
            GeometryType::MultiPoint => self.multi_point(literal)?.map(Geometry::MultiPoint),
            GeometryType::LineString => self.line_string(literal)?.map(Geometry::LineString),
            GeometryType::MultiLineString => self.multi_line_string(literal)?.map(Geometry::MultiLineString),
            GeometryType::Polygon => self.polygon(literal)?.map(Geometry::Polygon),
            GeometryType::MultiPolygon => self.multi_polygon(literal)?.map(Geometry::MultiPolygon),
            GeometryType::GeometryCollection => {
                self.collection(literal, depth)?.map(Geometry::GeometryCollection)
            }
        })
    }

    fn point(&mut self, literal: &Literal<'_>) -> Result<Option<Point>, DecodeError> {
        self.decode_simple(
            literal,
            GeometryType::Point,
            |coords, payload, field| coords.position(payload, field),
            |factory, coord| factory.create_point(coord),
        )
    }

    fn line_string(&mut self, literal: &Literal<'_>) -> Result<Option<LineString>, DecodeError> {
        self.decode_simple(
            literal,
            GeometryType::LineString,
            |coords, payload, field| coords.line(payload, field),
            |factory, line| factory.create_line_string(line),
        )
    }

    fn multi_point(&mut self, literal: &Literal<'_>) -> Result<Option<MultiPoint>, DecodeError> {
        self.decode_simple(
            literal,
            GeometryType::MultiPoint,
            |coords, payload, field| {
                let points = coords.positions(payload, field)?;
                if points.is_empty() {
                    return Err(Violation::TooFewPositions { found: 0, min: 1 });
                }
                Ok(points)
            },
            |factory, points| factory.create_multi_point(points),
        )
    }

    fn polygon(&mut self, literal: &Literal<'_>) -> Result<Option<Polygon>, DecodeError> {
        self.decode_simple(
            literal,
            GeometryType::Polygon,
            |coords, payload, field| coords.polygon(payload, field),
            |factory, (exterior, interiors)| factory.create_polygon(exterior, interiors),
        )
    }

    fn multi_line_string(&mut self, literal: &Literal<'_>) -> Result<Option<MultiLineString>, DecodeError> {
        self.decode_simple(
            literal,
            GeometryType::MultiLineString,
            |coords, payload, field| coords.lines(payload, field),
            |factory, lines| factory.create_multi_line_string(lines),
        )
    }

    fn multi_polygon(&mut self, literal: &Literal<'_>) -> Result<Option<MultiPolygon>, DecodeError> {
        self.decode_simple(
            literal,
            GeometryType::MultiPolygon,
            |coords, payload, field| coords.polygons(payload, field),
            |factory, polygons| factory.create_multi_polygon(polygons),
        )
    }

    /// Decodes a variant whose payload is a coordinate structure.
    fn decode_simple<'l, 'a, C, G>(
        &mut self,
        literal: &'l Literal<'a>,
        geometry_type: GeometryType,
        read: impl FnOnce(&mut CoordReader<'c>, &'l Literal<'a>, &'static str) -> Result<C, Violation>,
        build: impl FnOnce(&GeometryFactory, C) -> G,
    ) -> Result<Option<G>, DecodeError> {
        let decoded = self.open(literal, geometry_type).and_then(|parts| {
            let Some(parts) = parts else {
                return Ok(None);
            };
            let content = read(&mut self.coords, parts.payload, parts.payload_field)?;
            let shared = self.srid_factory(parts.crs)?;
            let factory = shared.as_deref().unwrap_or(&DEFAULT_FACTORY);
            Ok(Some(build(factory, content)))
        });
        decoded.map_err(|violation| DecodeError::invalid(geometry_type, violation))
    }

    fn collection(&mut self, literal: &Literal<'_>, depth: usize) -> Result<Option<GeometryCollection>, DecodeError> {
        const TYPE: GeometryType = GeometryType::GeometryCollection;

        let Some(parts) = self.open(literal, TYPE).map_err(|v| DecodeError::invalid(TYPE, v))? else {
            return Ok(None);
        };
        if depth >= self.options.max_depth {
            return Err(DecodeError::invalid(TYPE, Violation::NestingTooDeep { max: self.options.max_depth }));
        }

        let items = parts.payload.as_list().ok_or_else(|| {
            DecodeError::invalid(
                TYPE,
                Violation::NotAList { field: parts.payload_field, found: parts.payload.kind() },
            )
        })?;

        let mut geometries = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            geometries.push(self.member(item, index, depth)?);
        }

        let shared = self.srid_factory(parts.crs).map_err(|v| DecodeError::invalid(TYPE, v))?;
        let factory = shared.as_deref().unwrap_or(&DEFAULT_FACTORY);

        // Members (and nested parts) without their own crs inherit the collection's.
        let srid = factory.srid();
        if !srid.is_unset() {
            for (index, member) in geometries.iter_mut().enumerate() {
                member.inherit_srid(srid).map_err(|member_srid| {
                    DecodeError::invalid(
                        TYPE,
                        Violation::SridConflict { index, collection: srid, member: member_srid },
                    )
                })?;
            }
        }

        Ok(Some(factory.create_geometry_collection(geometries)))
    }

    /// Decodes one collection member, dispatching on its own `type`.
    fn member(&mut self, literal: &Literal<'_>, index: usize, depth: usize) -> Result<Geometry, DecodeError> {
        const TYPE: GeometryType = GeometryType::GeometryCollection;

        if literal.is_null() {
            return Err(DecodeError::invalid(TYPE, Violation::NullMember { index }));
        }
        let geometry_type = self.member_type(literal, index).map_err(|v| DecodeError::invalid(TYPE, v))?;

        match self.geometry(literal, geometry_type, depth + 1) {
            Ok(Some(geometry)) => Ok(geometry),
            // Non-null literals never decode to None
            Ok(None) => Err(DecodeError::invalid(TYPE, Violation::NullMember { index })),
            Err(source) => Err(DecodeError::invalid(
                TYPE,
                Violation::InvalidMember { index, source: Box::new(source) },
            )),
        }
    }

    /// Reads the declared type of a collection member.
    fn member_type(&self, literal: &Literal<'_>, index: usize) -> Result<GeometryType, Violation> {
        let fields = literal.as_object().ok_or(Violation::UntaggedMember { index })?;
        let [type_pos] = resolve_fields(fields, [TYPE_FIELD]);
        let type_pos = type_pos.ok_or(Violation::UntaggedMember { index })?;
        self.coords
            .scalars()
            .decode_geometry_type(&fields[type_pos].value)
            .map_err(|source| Violation::InvalidMemberType { index, source })
    }

    /// Validates the object shape and type tag, and locates the payload.
    fn open<'l, 'a>(
        &self,
        literal: &'l Literal<'a>,
        geometry_type: GeometryType,
    ) -> Result<Option<Parts<'l, 'a>>, Violation> {
        let fields = match literal {
            Literal::Null => return Ok(None),
            Literal::Object(fields) => fields,
            other => return Err(Violation::NotAnObject { found: other.kind() }),
        };
        if fields.len() < MIN_FIELDS {
            return Err(Violation::TooFewFields { found: fields.len(), min: MIN_FIELDS });
        }

        let names = input_object_type(geometry_type).field_names();
        if self.options.reject_duplicate_fields {
            if let Some(field) = find_duplicate(fields, names) {
                return Err(Violation::DuplicateField { field });
            }
        }
        let [type_pos, payload_pos, crs_pos] = resolve_fields(fields, names);

        let type_pos = type_pos.ok_or(Violation::MissingField { field: TYPE_FIELD })?;
        let declared = self
            .coords
            .scalars()
            .decode_geometry_type(&fields[type_pos].value)
            .map_err(|source| Violation::InvalidScalar { field: TYPE_FIELD, source })?;
        if declared != geometry_type {
            return Err(Violation::TypeMismatch { found: declared });
        }

        let payload_field = names[1];
        let payload_pos = payload_pos.ok_or(Violation::MissingField { field: payload_field })?;

        Ok(Some(Parts {
            payload: &fields[payload_pos].value,
            payload_field,
            crs: crs_pos.map(|pos| &fields[pos].value),
        }))
    }

    /// Returns the registry factory for the decoded `crs`, or None without one.
    fn srid_factory(&self, crs: Option<&Literal<'_>>) -> Result<Option<Arc<GeometryFactory>>, Violation> {
        let Some(crs) = crs else {
            return Ok(None);
        };
        let srid = self
            .coords
            .scalars()
            .decode_srid(crs)
            .map_err(|source| Violation::InvalidScalar { field: CRS_FIELD, source })?;
        Ok(Some(self.registry.factory(srid)))
    }
}
