//! Geometry factories keyed by spatial reference.
//!
//! A [`GeometryFactory`] stamps one SRID onto every geometry it builds.
//! Factories are obtained from a [`FactoryRegistry`], which creates at most
//! one factory per SRID and shares it between threads.

use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::model::{
    Coordinate, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon, Srid,
};

/// Factory for the unset (process default) reference system.
pub const DEFAULT_FACTORY: GeometryFactory = GeometryFactory::new(Srid::UNSET);

/// Builds geometry values under a single spatial reference system.
///
/// Construction does not validate; callers pass structures that already
/// satisfy the variant's invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryFactory {
    srid: Srid,
}

impl Default for GeometryFactory {
    fn default() -> Self {
        DEFAULT_FACTORY
    }
}

impl GeometryFactory {
    /// Creates a factory bound to `srid`.
    pub const fn new(srid: Srid) -> Self {
        Self { srid }
    }

    /// Returns the SRID this factory stamps on its geometries.
    pub fn srid(&self) -> Srid {
        self.srid
    }

    pub fn create_point(&self, coord: Coordinate) -> Point {
        Point { coord, srid: self.srid }
    }

    pub fn create_line_string(&self, coords: Vec<Coordinate>) -> LineString {
        LineString { coords, srid: self.srid }
    }

    pub fn create_polygon(&self, exterior: LinearRing, interiors: Vec<LinearRing>) -> Polygon {
        Polygon { exterior, interiors, srid: self.srid }
    }

    pub fn create_multi_point(&self, coords: Vec<Coordinate>) -> MultiPoint {
        MultiPoint { coords, srid: self.srid }
    }

    /// Builds a multi line string; each part is built by this factory too.
    pub fn create_multi_line_string(&self, lines: Vec<Vec<Coordinate>>) -> MultiLineString {
        MultiLineString {
            line_strings: lines.into_iter().map(|coords| self.create_line_string(coords)).collect(),
            srid: self.srid,
        }
    }

    /// Builds a multi polygon from `(exterior, interiors)` ring sets.
    pub fn create_multi_polygon(&self, polygons: Vec<(LinearRing, Vec<LinearRing>)>) -> MultiPolygon {
        MultiPolygon {
            polygons: polygons
                .into_iter()
                .map(|(exterior, interiors)| self.create_polygon(exterior, interiors))
                .collect(),
            srid: self.srid,
        }
    }

    /// Builds a collection. Members keep the SRID they were built with.
    pub fn create_geometry_collection(&self, geometries: Vec<Geometry>) -> GeometryCollection {
        GeometryCollection { geometries, srid: self.srid }
    }
}

/// Source of SRID-bound factories.
///
/// Implementations must hand out the same factory for repeated requests of
/// one SRID, including under concurrent first use.
pub trait FactoryRegistry: Send + Sync {
    /// Returns the factory for `srid`, creating it on first use.
    fn factory(&self, srid: Srid) -> Arc<GeometryFactory>;
}

/// Thread-safe, append-only registry of factories.
#[derive(Debug, Default)]
pub struct SharedFactoryRegistry {
    factories: RwLock<FxHashMap<Srid, Arc<GeometryFactory>>>,
}

impl SharedFactoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of factories created so far.
    pub fn len(&self) -> usize {
        self.factories.read().len()
    }

    /// Returns true if no factory has been created yet.
    pub fn is_empty(&self) -> bool {
        self.factories.read().is_empty()
    }

    /// Returns true if a factory for `srid` exists.
    pub fn contains(&self, srid: Srid) -> bool {
        self.factories.read().contains_key(&srid)
    }
}

impl FactoryRegistry for SharedFactoryRegistry {
    fn factory(&self, srid: Srid) -> Arc<GeometryFactory> {
        {
            let factories = self.factories.read();
            if let Some(factory) = factories.get(&srid) {
                tracing::trace!(srid = srid.0, "geometry factory cache hit");
                return Arc::clone(factory);
            }
        }

        // Another thread may have inserted between the two locks; the entry
        // API keeps whichever factory got there first.
        let mut factories = self.factories.write();
        let factory = factories.entry(srid).or_insert_with(|| {
            tracing::debug!(srid = srid.0, "creating geometry factory");
            Arc::new(GeometryFactory::new(srid))
        });
        Arc::clone(factory)
    }
}

lazy_static! {
    static ref GLOBAL_REGISTRY: SharedFactoryRegistry = SharedFactoryRegistry::new();
}

/// Returns the process-wide registry.
pub fn global_registry() -> &'static SharedFactoryRegistry {
    &GLOBAL_REGISTRY
}
