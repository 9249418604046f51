use crate::{Coord, CoordinateSequence, Dimension, Envelope};

/// A single point.
#[derive(Clone, Debug, PartialEq)]
pub struct Point(pub Coord);

/// A sequence of two or more coordinates describing a connected path, or an
/// empty sequence. Unlike [`LinearRing`], a `LineString` need not be closed.
#[derive(Clone, Debug, PartialEq)]
pub struct LineString(pub CoordinateSequence);

impl LineString {
    pub fn new(seq: CoordinateSequence) -> Self {
        LineString(seq)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn num_points(&self) -> usize {
        self.0.len()
    }

    pub fn coords(&self) -> &CoordinateSequence {
        &self.0
    }

    pub fn envelope(&self) -> Envelope {
        self.0.envelope()
    }

    pub fn reversed(&self) -> Self {
        LineString(self.0.reversed())
    }
}

/// A closed [`LineString`] with at least four coordinates, the first equal to
/// the last. `LinearRing` is the building block of [`Polygon`] shells and
/// holes; it is never exposed on its own as a top-level geometry type in the
/// OGC model, but is represented here as a distinct variant because rings
/// carry a stronger invariant than an arbitrary `LineString`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearRing(pub CoordinateSequence);

impl LinearRing {
    /// Constructs a ring, returning [`Error::InvalidRing`](crate::Error::InvalidRing)
    /// if it does not satisfy the closed-with-at-least-four-coordinates
    /// contract (an empty sequence is accepted as the empty ring).
    pub fn try_new(seq: CoordinateSequence) -> Result<Self, crate::Error> {
        if seq.is_empty() {
            return Ok(LinearRing(seq));
        }
        if seq.len() < 4 {
            return Err(crate::Error::InvalidRing {
                reason: "a non-empty linear ring needs at least four coordinates",
            });
        }
        if !seq.is_closed() {
            return Err(crate::Error::InvalidRing {
                reason: "a linear ring's first and last coordinates must match",
            });
        }
        Ok(LinearRing(seq))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn coords(&self) -> &CoordinateSequence {
        &self.0
    }

    pub fn envelope(&self) -> Envelope {
        self.0.envelope()
    }

    pub fn reversed(&self) -> Self {
        LinearRing(self.0.reversed())
    }

    /// Whether this ring, considered in isolation from crossings with other
    /// rings, winds counter-clockwise. Uses the signed area of the ring; a
    /// ring shorter than 4 coordinates has no defined orientation.
    pub fn is_ccw(&self) -> bool {
        signed_area(&self.0) > 0.0
    }
}

fn signed_area(seq: &CoordinateSequence) -> f64 {
    if seq.len() < 4 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..seq.len() - 1 {
        let p0 = seq.get(i);
        let p1 = seq.get(i + 1);
        area += p0.x * p1.y - p1.x * p0.y;
    }
    area / 2.0
}

/// A shell ring plus zero or more hole rings nested inside it.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub shell: LinearRing,
    pub holes: Vec<LinearRing>,
}

impl Polygon {
    pub fn new(shell: LinearRing, holes: Vec<LinearRing>) -> Self {
        Polygon { shell, holes }
    }

    pub fn is_empty(&self) -> bool {
        self.shell.is_empty()
    }

    pub fn envelope(&self) -> Envelope {
        self.shell.envelope()
    }

    /// Returns a copy with the shell wound CCW and every hole wound CW, the
    /// canonical orientation used throughout the topology core.
    pub fn normalized(&self) -> Self {
        let shell = if self.shell.is_empty() || self.shell.is_ccw() {
            self.shell.clone()
        } else {
            self.shell.reversed()
        };
        let holes = self
            .holes
            .iter()
            .map(|h| if h.is_empty() || !h.is_ccw() { h.clone() } else { h.reversed() })
            .collect();
        Polygon { shell, holes }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MultiPoint(pub Vec<Point>);

#[derive(Clone, Debug, PartialEq)]
pub struct MultiLineString(pub Vec<LineString>);

#[derive(Clone, Debug, PartialEq)]
pub struct MultiPolygon(pub Vec<Polygon>);

#[derive(Clone, Debug, PartialEq)]
pub struct GeometryCollection(pub Vec<Geometry>);

/// The curved-geometry family (circular arcs and compound/curved
/// composites). These are recognized as distinct tags so a `Geometry` value
/// can round-trip through a reader/writer that supports them, but every
/// algorithm in this crate is defined only over the linear variants above
/// and returns [`crate::Error::UnsupportedOperation`] when handed one of
/// these.
#[derive(Clone, Debug, PartialEq)]
pub enum CurvedGeometry {
    CircularString(CoordinateSequence),
    CompoundCurve(Vec<CurvedGeometry>),
    CurvePolygon {
        shell: Box<CurvedGeometry>,
        holes: Vec<CurvedGeometry>,
    },
    MultiCurve(Vec<CurvedGeometry>),
    MultiSurface(Vec<CurvedGeometry>),
}

/// A tagged union of every geometry type in the OGC Simple Features model.
///
/// A `Geometry` does not itself carry a reference back to whatever
/// constructed it; the precision model and sequence dimension used at
/// construction time are not a runtime dependency of the value. Geometries
/// are immutable once built: operations like [`Polygon::normalized`] or
/// [`LineString::reversed`] return new values rather than mutating in place.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
    Curved(CurvedGeometry),
}

impl Geometry {
    pub fn dimension(&self) -> GeometryDimension {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => GeometryDimension::Point,
            Geometry::LineString(_) | Geometry::LinearRing(_) | Geometry::MultiLineString(_) => {
                GeometryDimension::Line
            }
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => GeometryDimension::Area,
            Geometry::GeometryCollection(gc) => gc
                .0
                .iter()
                .map(Geometry::dimension)
                .max()
                .unwrap_or(GeometryDimension::Empty),
            Geometry::Curved(_) => GeometryDimension::Line,
        }
    }

    pub fn envelope(&self) -> Envelope {
        match self {
            Geometry::Point(p) => Envelope::from_coord(p.0),
            Geometry::LineString(ls) => ls.envelope(),
            Geometry::LinearRing(lr) => lr.envelope(),
            Geometry::Polygon(poly) => poly.envelope(),
            Geometry::MultiPoint(mp) => {
                let mut e = Envelope::empty();
                for p in &mp.0 {
                    e.expand_to_include(p.0);
                }
                e
            }
            Geometry::MultiLineString(mls) => mls
                .0
                .iter()
                .fold(Envelope::empty(), |e, ls| e.union(&ls.envelope())),
            Geometry::MultiPolygon(mp) => mp
                .0
                .iter()
                .fold(Envelope::empty(), |e, poly| e.union(&poly.envelope())),
            Geometry::GeometryCollection(gc) => gc
                .0
                .iter()
                .fold(Envelope::empty(), |e, g| e.union(&g.envelope())),
            Geometry::Curved(_) => Envelope::empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::LineString(ls) => ls.is_empty(),
            Geometry::LinearRing(lr) => lr.is_empty(),
            Geometry::Polygon(poly) => poly.is_empty(),
            Geometry::MultiPoint(mp) => mp.0.is_empty(),
            Geometry::MultiLineString(mls) => mls.0.iter().all(LineString::is_empty),
            Geometry::MultiPolygon(mp) => mp.0.iter().all(Polygon::is_empty),
            Geometry::GeometryCollection(gc) => gc.0.iter().all(Geometry::is_empty),
            Geometry::Curved(_) => false,
        }
    }

    pub fn is_polygonal(&self) -> bool {
        matches!(self, Geometry::Polygon(_) | Geometry::MultiPolygon(_))
    }

    pub fn is_linear(&self) -> bool {
        matches!(
            self,
            Geometry::LineString(_) | Geometry::LinearRing(_) | Geometry::MultiLineString(_)
        )
    }

    pub fn is_puntal(&self) -> bool {
        matches!(self, Geometry::Point(_) | Geometry::MultiPoint(_))
    }

    pub fn is_curved(&self) -> bool {
        matches!(self, Geometry::Curved(_))
    }
}

/// The topological dimension of a geometry or IntersectionMatrix cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum GeometryDimension {
    Empty,
    Point,
    Line,
    Area,
}

impl From<Point> for Geometry {
    fn from(v: Point) -> Self {
        Geometry::Point(v)
    }
}
impl From<LineString> for Geometry {
    fn from(v: LineString) -> Self {
        Geometry::LineString(v)
    }
}
impl From<LinearRing> for Geometry {
    fn from(v: LinearRing) -> Self {
        Geometry::LinearRing(v)
    }
}
impl From<Polygon> for Geometry {
    fn from(v: Polygon) -> Self {
        Geometry::Polygon(v)
    }
}
impl From<MultiPoint> for Geometry {
    fn from(v: MultiPoint) -> Self {
        Geometry::MultiPoint(v)
    }
}
impl From<MultiLineString> for Geometry {
    fn from(v: MultiLineString) -> Self {
        Geometry::MultiLineString(v)
    }
}
impl From<MultiPolygon> for Geometry {
    fn from(v: MultiPolygon) -> Self {
        Geometry::MultiPolygon(v)
    }
}
impl From<GeometryCollection> for Geometry {
    fn from(v: GeometryCollection) -> Self {
        Geometry::GeometryCollection(v)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ring(coords: Vec<(f64, f64)>) -> LinearRing {
        let seq = CoordinateSequence::xy(coords.into_iter().map(Coord::from).collect());
        LinearRing::try_new(seq).unwrap()
    }

    #[test]
    fn ring_requires_closure() {
        let seq = CoordinateSequence::xy(vec![
            Coord::new(0.0, 0.0),
            Coord::new(1.0, 0.0),
            Coord::new(1.0, 1.0),
        ]);
        assert!(LinearRing::try_new(seq).is_err());
    }

    #[test]
    fn polygon_normalizes_shell_ccw_and_holes_cw() {
        let cw_shell = ring(vec![
            (0.0, 0.0),
            (0.0, 4.0),
            (4.0, 4.0),
            (4.0, 0.0),
            (0.0, 0.0),
        ]);
        assert!(!cw_shell.is_ccw());
        let poly = Polygon::new(cw_shell, vec![]);
        let normalized = poly.normalized();
        assert!(normalized.shell.is_ccw());
    }

    #[test]
    fn geometry_collection_dimension_is_the_max() {
        let gc = GeometryCollection(vec![
            Geometry::Point(Point(Coord::new(0.0, 0.0))),
            Geometry::LineString(LineString(CoordinateSequence::xy(vec![
                Coord::new(0.0, 0.0),
                Coord::new(1.0, 1.0),
            ]))),
        ]);
        assert_eq!(
            Geometry::GeometryCollection(gc).dimension(),
            GeometryDimension::Line
        );
    }
}
