//! Coordinate-structure decoding.
//!
//! Turns nested list literals into positions, lines, rings and polygon ring
//! sets, checking cardinality and closure on the way. Errors are reported as
//! [`Violation`]s; the geometry decoder attaches the geometry type.

use crate::codec::scalar::ScalarDecoder;
use crate::error::Violation;
use crate::model::{Coordinate, LineString, LinearRing, Literal};

/// Exterior ring followed by holes.
pub type PolygonRings = (LinearRing, Vec<LinearRing>);

/// Reads coordinate structures while counting positions against a budget.
///
/// One reader spans a whole decode call, so nested collections share the
/// budget.
pub(crate) struct CoordReader<'s> {
    scalars: &'s dyn ScalarDecoder,
    positions_left: usize,
    max_positions: usize,
}

impl<'s> CoordReader<'s> {
    pub(crate) fn new(scalars: &'s dyn ScalarDecoder, max_positions: usize) -> Self {
        Self { scalars, positions_left: max_positions, max_positions }
    }

    pub(crate) fn scalars(&self) -> &'s dyn ScalarDecoder {
        self.scalars
    }

    /// Decodes a single position.
    pub(crate) fn position(&mut self, literal: &Literal<'_>, field: &'static str) -> Result<Coordinate, Violation> {
        if self.positions_left == 0 {
            return Err(Violation::TooManyPositions { max: self.max_positions });
        }
        self.positions_left -= 1;
        self.scalars
            .decode_position(literal)
            .map_err(|source| Violation::InvalidScalar { field, source })
    }

    /// Decodes a list of positions, without a cardinality check.
    pub(crate) fn positions(&mut self, literal: &Literal<'_>, field: &'static str) -> Result<Vec<Coordinate>, Violation> {
        let items = list(literal, field)?;
        let mut coords = Vec::with_capacity(items.len().min(self.positions_left));
        for item in items {
            coords.push(self.position(item, field)?);
        }
        Ok(coords)
    }

    /// Decodes a line: two or more positions.
    pub(crate) fn line(&mut self, literal: &Literal<'_>, field: &'static str) -> Result<Vec<Coordinate>, Violation> {
        let coords = self.positions(literal, field)?;
        if coords.len() < LineString::MIN_POINTS {
            return Err(Violation::TooFewPositions { found: coords.len(), min: LineString::MIN_POINTS });
        }
        Ok(coords)
    }

    /// Decodes a linear ring: four or more positions, closed.
    pub(crate) fn ring(&mut self, literal: &Literal<'_>, field: &'static str, index: usize) -> Result<LinearRing, Violation> {
        let coords = self.positions(literal, field)?;
        if coords.len() < LinearRing::MIN_POINTS {
            return Err(Violation::TooFewPositions { found: coords.len(), min: LinearRing::MIN_POINTS });
        }
        let ring = LinearRing { coords };
        if !ring.is_closed() {
            return Err(Violation::RingNotClosed { ring: index });
        }
        Ok(ring)
    }

    /// Decodes polygon coordinates: an exterior ring and any number of holes.
    pub(crate) fn polygon(&mut self, literal: &Literal<'_>, field: &'static str) -> Result<PolygonRings, Violation> {
        let items = non_empty_list(literal, field)?;
        let exterior = self.ring(&items[0], field, 0)?;
        let mut interiors = Vec::with_capacity(items.len() - 1);
        for (index, item) in items.iter().enumerate().skip(1) {
            interiors.push(self.ring(item, field, index)?);
        }
        Ok((exterior, interiors))
    }

    /// Decodes multi line string coordinates: one or more lines.
    pub(crate) fn lines(&mut self, literal: &Literal<'_>, field: &'static str) -> Result<Vec<Vec<Coordinate>>, Violation> {
        let items = non_empty_list(literal, field)?;
        items.iter().map(|item| self.line(item, field)).collect()
    }

    /// Decodes multi polygon coordinates: one or more polygons.
    pub(crate) fn polygons(&mut self, literal: &Literal<'_>, field: &'static str) -> Result<Vec<PolygonRings>, Violation> {
        let items = non_empty_list(literal, field)?;
        items.iter().map(|item| self.polygon(item, field)).collect()
    }
}

fn list<'l, 'a>(literal: &'l Literal<'a>, field: &'static str) -> Result<&'l [Literal<'a>], Violation> {
    literal
        .as_list()
        .ok_or(Violation::NotAList { field, found: literal.kind() })
}

pub(crate) fn non_empty_list<'l, 'a>(literal: &'l Literal<'a>, field: &'static str) -> Result<&'l [Literal<'a>], Violation> {
    let items = list(literal, field)?;
    if items.is_empty() {
        return Err(Violation::TooFewMembers { found: 0, min: 1 });
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::scalar::StandardScalars;

    fn pos(x: f64, y: f64) -> Literal<'static> {
        Literal::position(x, y)
    }

    fn square() -> Literal<'static> {
        Literal::list([pos(0.0, 0.0), pos(1.0, 0.0), pos(1.0, 1.0), pos(0.0, 0.0)])
    }

    #[test]
    fn test_line_cardinality() {
        let mut r = CoordReader::new(&StandardScalars, 100);
        let line = r.line(&Literal::list([pos(1.0, 1.0), pos(2.0, 2.0)]), "coordinates").unwrap();
        assert_eq!(line, vec![Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 2.0)]);

        assert_eq!(
            r.line(&Literal::list([pos(1.0, 1.0)]), "coordinates"),
            Err(Violation::TooFewPositions { found: 1, min: 2 })
        );
        assert_eq!(
            r.line(&Literal::list([]), "coordinates"),
            Err(Violation::TooFewPositions { found: 0, min: 2 })
        );
    }

    #[test]
    fn test_ring_closure_and_size() {
        let mut r = CoordReader::new(&StandardScalars, 100);
        let ring = r.ring(&square(), "coordinates", 0).unwrap();
        assert!(ring.is_closed());
        assert_eq!(ring.coords.len(), 4);

        let open = Literal::list([pos(0.0, 0.0), pos(1.0, 0.0), pos(1.0, 1.0), pos(0.0, 1.0)]);
        assert_eq!(r.ring(&open, "coordinates", 3), Err(Violation::RingNotClosed { ring: 3 }));

        let short = Literal::list([pos(0.0, 0.0), pos(1.0, 0.0), pos(0.0, 0.0)]);
        assert_eq!(
            r.ring(&short, "coordinates", 0),
            Err(Violation::TooFewPositions { found: 3, min: 4 })
        );
    }

    #[test]
    fn test_polygon_with_hole() {
        let mut r = CoordReader::new(&StandardScalars, 100);
        let (exterior, interiors) = r.polygon(&Literal::list([square(), square()]), "coordinates").unwrap();
        assert_eq!(exterior.coords.len(), 4);
        assert_eq!(interiors.len(), 1);

        assert_eq!(
            r.polygon(&Literal::list([]), "coordinates"),
            Err(Violation::TooFewMembers { found: 0, min: 1 })
        );
    }

    #[test]
    fn test_not_a_list() {
        let mut r = CoordReader::new(&StandardScalars, 100);
        assert_eq!(
            r.positions(&Literal::Int(5), "coordinates"),
            Err(Violation::NotAList { field: "coordinates", found: "int" })
        );
    }

    #[test]
    fn test_position_budget() {
        let mut r = CoordReader::new(&StandardScalars, 3);
        assert_eq!(
            r.polygon(&Literal::list([square()]), "coordinates"),
            Err(Violation::TooManyPositions { max: 3 })
        );
    }
}
