//! Input-type descriptors for schema introspection.
//!
//! Each geometry type has one statically initialised [`InputObjectType`]
//! naming its three fields in a fixed order: the type tag, the payload
//! (`coordinates`, or `geometries` for collections) and the optional `crs`.
//! Decoders take the field names they resolve from here.

use std::fmt;

use crate::model::GeometryType;

pub const TYPE_FIELD: &str = "type";
pub const COORDINATES_FIELD: &str = "coordinates";
pub const GEOMETRIES_FIELD: &str = "geometries";
pub const CRS_FIELD: &str = "crs";

/// Name of the geometry-type enum in the schema.
pub const GEOMETRY_TYPE_ENUM: &str = "GeoJSONGeometryType";

/// Named leaf types referenced by input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafType {
    /// The geometry-type enum.
    GeometryType,
    /// A position scalar (`[x, y]` or `[x, y, z]`).
    Position,
    /// A 32-bit integer.
    Int,
    /// Any geometry input object, dispatched by its `type` field.
    Geometry,
}

impl LeafType {
    /// Returns the schema name of this type.
    pub fn name(self) -> &'static str {
        match self {
            LeafType::GeometryType => GEOMETRY_TYPE_ENUM,
            LeafType::Position => "Position",
            LeafType::Int => "Int",
            LeafType::Geometry => "GeoJSONGeometryInput",
        }
    }
}

/// A leaf type wrapped in zero or more list levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldType {
    pub leaf: LeafType,
    pub list_depth: u8,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.list_depth {
            f.write_str("[")?;
        }
        f.write_str(self.leaf.name())?;
        for _ in 0..self.list_depth {
            f.write_str("]")?;
        }
        Ok(())
    }
}

/// One field of an input object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    pub name: &'static str,
    pub field_type: FieldType,
    pub description: &'static str,
}

/// Descriptor of a GeoJSON input object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputObjectType {
    pub name: &'static str,
    pub geometry_type: GeometryType,
    /// Fields in resolution order: type tag, payload, crs.
    pub fields: [InputField; 3],
}

impl InputObjectType {
    /// Field names in resolution order.
    pub fn field_names(&self) -> [&'static str; 3] {
        [self.fields[0].name, self.fields[1].name, self.fields[2].name]
    }

    /// The `coordinates` (or `geometries`) field.
    pub fn payload_field(&self) -> &InputField {
        &self.fields[1]
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&InputField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Renders this type as SDL.
    pub fn to_sdl(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for InputObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "input {} {{", self.name)?;
        for field in &self.fields {
            writeln!(f, "  \"\"\"{}\"\"\"", field.description)?;
            writeln!(f, "  {}: {}", field.name, field.field_type)?;
        }
        f.write_str("}")
    }
}

const fn input_type(
    name: &'static str,
    geometry_type: GeometryType,
    payload_name: &'static str,
    payload_leaf: LeafType,
    payload_depth: u8,
    payload_description: &'static str,
) -> InputObjectType {
    InputObjectType {
        name,
        geometry_type,
        fields: [
            InputField {
                name: TYPE_FIELD,
                field_type: FieldType { leaf: LeafType::GeometryType, list_depth: 0 },
                description: "The geometry type of the GeoJSON object",
            },
            InputField {
                name: payload_name,
                field_type: FieldType { leaf: payload_leaf, list_depth: payload_depth },
                description: payload_description,
            },
            InputField {
                name: CRS_FIELD,
                field_type: FieldType { leaf: LeafType::Int, list_depth: 0 },
                description: "The coordinate reference system integer identifier",
            },
        ],
    }
}

/// Descriptors indexed by `GeometryType as usize - 1`.
static INPUT_TYPES: [InputObjectType; 7] = [
    input_type(
        "GeoJSONPointInput",
        GeometryType::Point,
        COORDINATES_FIELD,
        LeafType::Position,
        0,
        "The \"coordinates\" field is a single position",
    ),
    input_type(
        "GeoJSONMultiPointInput",
        GeometryType::MultiPoint,
        COORDINATES_FIELD,
        LeafType::Position,
        1,
        "The \"coordinates\" field is an array of positions",
    ),
    input_type(
        "GeoJSONLineStringInput",
        GeometryType::LineString,
        COORDINATES_FIELD,
        LeafType::Position,
        1,
        "The \"coordinates\" field is an array of two or more positions",
    ),
    input_type(
        "GeoJSONMultiLineStringInput",
        GeometryType::MultiLineString,
        COORDINATES_FIELD,
        LeafType::Position,
        2,
        "The \"coordinates\" field is an array of LineString coordinate arrays",
    ),
    input_type(
        "GeoJSONPolygonInput",
        GeometryType::Polygon,
        COORDINATES_FIELD,
        LeafType::Position,
        2,
        "The \"coordinates\" field is an array of closed linear rings",
    ),
    input_type(
        "GeoJSONMultiPolygonInput",
        GeometryType::MultiPolygon,
        COORDINATES_FIELD,
        LeafType::Position,
        3,
        "The \"coordinates\" field is an array of Polygon coordinate arrays",
    ),
    input_type(
        "GeoJSONGeometryCollectionInput",
        GeometryType::GeometryCollection,
        GEOMETRIES_FIELD,
        LeafType::Geometry,
        1,
        "The \"geometries\" field is an array of geometry objects",
    ),
];

/// Returns the input descriptor for a geometry type.
pub fn input_object_type(geometry_type: GeometryType) -> &'static InputObjectType {
    &INPUT_TYPES[geometry_type as usize - 1]
}

/// Returns every input descriptor.
pub fn input_object_types() -> &'static [InputObjectType] {
    &INPUT_TYPES
}

/// Renders the geometry-type enum as SDL.
pub fn geometry_type_enum_sdl() -> String {
    let values: Vec<&str> = GeometryType::ALL.iter().map(|t| t.name()).collect();
    format!("enum {} {{\n  {}\n}}", GEOMETRY_TYPE_ENUM, values.join("\n  "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_table_matches_tags() {
        for t in GeometryType::ALL {
            assert_eq!(input_object_type(t).geometry_type, t);
        }
        assert_eq!(input_object_types().len(), GeometryType::ALL.len());
    }

    #[test]
    fn test_field_names() {
        let line = input_object_type(GeometryType::LineString);
        assert_eq!(line.field_names(), ["type", "coordinates", "crs"]);

        let collection = input_object_type(GeometryType::GeometryCollection);
        assert_eq!(collection.field_names(), ["type", "geometries", "crs"]);
        assert!(collection.field("coordinates").is_none());
    }

    #[test]
    fn test_field_type_display() {
        let polygon = input_object_type(GeometryType::Polygon);
        assert_eq!(polygon.payload_field().field_type.to_string(), "[[Position]]");
        assert_eq!(input_object_type(GeometryType::Point).payload_field().field_type.to_string(), "Position");
        assert_eq!(polygon.field("crs").unwrap().field_type.to_string(), "Int");
    }

    #[test]
    fn test_sdl() {
        let sdl = input_object_type(GeometryType::LineString).to_sdl();
        assert!(sdl.starts_with("input GeoJSONLineStringInput {\n"));
        assert!(sdl.contains("  type: GeoJSONGeometryType\n"));
        assert!(sdl.contains("  coordinates: [Position]\n"));
        assert!(sdl.ends_with("  crs: Int\n}"));

        let e = geometry_type_enum_sdl();
        assert!(e.starts_with("enum GeoJSONGeometryType {\n  Point\n"));
        assert!(e.ends_with("GeometryCollection\n}"));
    }
}
