//! Literal trees handed over by an upstream document parser.
//!
//! A literal is already parsed and typed; decoding never sees raw text.

use std::borrow::Cow;

/// A parsed literal value (null, object, list or scalar).
#[derive(Debug, Clone, PartialEq)]
pub enum Literal<'a> {
    /// Explicit null.
    Null,

    /// Boolean scalar.
    Bool(bool),

    /// Integer scalar.
    Int(i64),

    /// Floating-point scalar.
    Float(f64),

    /// Quoted string scalar.
    String(Cow<'a, str>),

    /// Bare enum symbol (e.g. `LineString` in `{type: LineString}`).
    Enum(Cow<'a, str>),

    /// Ordered list of literals.
    List(Vec<Literal<'a>>),

    /// Object literal. Field order is preserved; names are not guaranteed unique.
    Object(Vec<ObjectField<'a>>),
}

/// A single `name: value` pair of an object literal.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectField<'a> {
    /// Field name as written in the document.
    pub name: Cow<'a, str>,
    /// Field value.
    pub value: Literal<'a>,
}

impl<'a> ObjectField<'a> {
    /// Creates a field.
    pub fn new(name: impl Into<Cow<'a, str>>, value: Literal<'a>) -> Self {
        Self { name: name.into(), value }
    }
}

impl<'a> Literal<'a> {
    /// Creates an enum-symbol literal.
    pub fn enum_symbol(symbol: impl Into<Cow<'a, str>>) -> Self {
        Literal::Enum(symbol.into())
    }

    /// Creates a string literal.
    pub fn string(value: impl Into<Cow<'a, str>>) -> Self {
        Literal::String(value.into())
    }

    /// Creates a list literal.
    pub fn list(items: impl IntoIterator<Item = Literal<'a>>) -> Self {
        Literal::List(items.into_iter().collect())
    }

    /// Creates an object literal from `(name, value)` pairs, keeping their order.
    pub fn object<N>(fields: impl IntoIterator<Item = (N, Literal<'a>)>) -> Self
    where
        N: Into<Cow<'a, str>>,
    {
        Literal::Object(
            fields
                .into_iter()
                .map(|(name, value)| ObjectField::new(name, value))
                .collect(),
        )
    }

    /// Creates a position literal `[x, y]`.
    pub fn position(x: f64, y: f64) -> Self {
        Literal::List(vec![Literal::Float(x), Literal::Float(y)])
    }

    /// Returns true for [`Literal::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    /// Returns the object fields if this is an object literal.
    pub fn as_object(&self) -> Option<&[ObjectField<'a>]> {
        match self {
            Literal::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Returns the items if this is a list literal.
    pub fn as_list(&self) -> Option<&[Literal<'a>]> {
        match self {
            Literal::List(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the literal kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::Bool(_) => "boolean",
            Literal::Int(_) => "int",
            Literal::Float(_) => "float",
            Literal::String(_) => "string",
            Literal::Enum(_) => "enum",
            Literal::List(_) => "list",
            Literal::Object(_) => "object",
        }
    }

    /// Converts borrowed names and strings into owned ones.
    pub fn into_owned(self) -> Literal<'static> {
        match self {
            Literal::Null => Literal::Null,
            Literal::Bool(v) => Literal::Bool(v),
            Literal::Int(v) => Literal::Int(v),
            Literal::Float(v) => Literal::Float(v),
            Literal::String(s) => Literal::String(Cow::Owned(s.into_owned())),
            Literal::Enum(s) => Literal::Enum(Cow::Owned(s.into_owned())),
            Literal::List(items) => Literal::List(items.into_iter().map(Literal::into_owned).collect()),
            Literal::Object(fields) => Literal::Object(
                fields
                    .into_iter()
                    .map(|f| ObjectField {
                        name: Cow::Owned(f.name.into_owned()),
                        value: f.value.into_owned(),
                    })
                    .collect(),
            ),
        }
    }
}

impl From<i64> for Literal<'_> {
    fn from(v: i64) -> Self {
        Literal::Int(v)
    }
}

impl From<f64> for Literal<'_> {
    fn from(v: f64) -> Self {
        Literal::Float(v)
    }
}

impl From<bool> for Literal<'_> {
    fn from(v: bool) -> Self {
        Literal::Bool(v)
    }
}
