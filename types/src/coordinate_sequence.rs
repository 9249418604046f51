use crate::{Coord, Envelope};

/// The stated dimensionality of a [`CoordinateSequence`]. Every coordinate
/// in a sequence carries the same set of ordinates; dimension is fixed at
/// construction, not per-coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    /// x, y only.
    Xy,
    /// x, y, z.
    Xyz,
    /// x, y, m (measure), no z.
    Xym,
    /// x, y, z, m.
    Xyzm,
}

impl Dimension {
    pub fn has_z(self) -> bool {
        matches!(self, Dimension::Xyz | Dimension::Xyzm)
    }

    pub fn has_m(self) -> bool {
        matches!(self, Dimension::Xym | Dimension::Xyzm)
    }

    pub fn ordinate_count(self) -> usize {
        match self {
            Dimension::Xy => 2,
            Dimension::Xyz | Dimension::Xym => 3,
            Dimension::Xyzm => 4,
        }
    }
}

/// An ordered, possibly-empty sequence of coordinates sharing a single fixed
/// [`Dimension`].
///
/// This is the storage backing every linear [`Geometry`](crate::Geometry)
/// variant (`LineString`, `LinearRing`, polygon rings, and the coordinate
/// lists feeding multi-geometries).
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateSequence {
    dimension: Dimension,
    coords: Vec<Coord>,
}

impl CoordinateSequence {
    pub fn new(dimension: Dimension) -> Self {
        CoordinateSequence {
            dimension,
            coords: Vec::new(),
        }
    }

    pub fn from_coords(dimension: Dimension, coords: Vec<Coord>) -> Self {
        CoordinateSequence { dimension, coords }
    }

    pub fn xy(coords: Vec<Coord>) -> Self {
        CoordinateSequence::from_coords(Dimension::Xy, coords)
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn get(&self, i: usize) -> Coord {
        self.coords[i]
    }

    pub fn as_slice(&self) -> &[Coord] {
        &self.coords
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coord> {
        self.coords.iter()
    }

    pub fn push(&mut self, c: Coord) {
        self.coords.push(c);
    }

    pub fn envelope(&self) -> Envelope {
        let mut env = Envelope::empty();
        for c in &self.coords {
            env.expand_to_include(*c);
        }
        env
    }

    /// `true` if the first and last coordinates are 2D-equal and there are
    /// at least four coordinates total (the [`LinearRing`](crate::Geometry::LinearRing)
    /// closure-and-minimum-size contract). Sequences shorter than 4 cannot
    /// form a valid ring even if closed.
    pub fn is_closed(&self) -> bool {
        !self.is_empty() && self.get(0) == self.get(self.len() - 1)
    }

    pub fn reversed(&self) -> Self {
        let mut coords = self.coords.clone();
        coords.reverse();
        CoordinateSequence {
            dimension: self.dimension,
            coords,
        }
    }

    pub fn make_precise(&self, pm: &crate::PrecisionModel) -> Self {
        CoordinateSequence {
            dimension: self.dimension,
            coords: self.coords.iter().map(|c| pm.make_precise(*c)).collect(),
        }
    }
}

impl std::ops::Index<usize> for CoordinateSequence {
    type Output = Coord;
    fn index(&self, i: usize) -> &Coord {
        &self.coords[i]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn closed_requires_matching_endpoints() {
        let seq = CoordinateSequence::xy(vec![
            Coord::new(0.0, 0.0),
            Coord::new(1.0, 0.0),
            Coord::new(1.0, 1.0),
            Coord::new(0.0, 0.0),
        ]);
        assert!(seq.is_closed());
    }

    #[test]
    fn envelope_tightness() {
        let seq = CoordinateSequence::xy(vec![
            Coord::new(0.0, 0.0),
            Coord::new(2.0, 1.0),
            Coord::new(1.0, 3.0),
        ]);
        let env = seq.envelope();
        for c in seq.iter() {
            assert!(env.contains_point(*c));
        }
        assert_eq!(env.min_x(), 0.0);
        assert_eq!(env.max_x(), 2.0);
        assert_eq!(env.min_y(), 0.0);
        assert_eq!(env.max_y(), 3.0);
    }
}
