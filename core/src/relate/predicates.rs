use topo2d_types::{Geometry, GeometryDimension};

use super::boundary_node_rule::BoundaryNodeRule;
use super::dimensions::Dimensions;
use super::relate_computer::RelateComputer;

fn self_dim(g: &Geometry) -> Dimensions {
    match g.dimension() {
        GeometryDimension::Empty => Dimensions::Empty,
        GeometryDimension::Point => Dimensions::ZeroDimensional,
        GeometryDimension::Line => Dimensions::OneDimensional,
        GeometryDimension::Area => Dimensions::TwoDimensional,
    }
}

/// Short-circuits on disjoint envelopes before paying for a full relate
/// computation — the fast path every named predicate below takes first.
fn envelopes_disjoint(a: &Geometry, b: &Geometry) -> bool {
    !a.envelope().intersects_envelope(&b.envelope())
}

pub fn intersects(a: &Geometry, b: &Geometry) -> bool {
    if envelopes_disjoint(a, b) {
        return false;
    }
    RelateComputer::default().relate(a, b).is_intersects()
}

pub fn disjoint(a: &Geometry, b: &Geometry) -> bool {
    !intersects(a, b)
}

pub fn contains(a: &Geometry, b: &Geometry) -> bool {
    if envelopes_disjoint(a, b) || !a.envelope().contains_envelope(&b.envelope()) {
        return false;
    }
    RelateComputer::default().relate(a, b).is_contains()
}

pub fn within(a: &Geometry, b: &Geometry) -> bool {
    contains(b, a)
}

pub fn covers(a: &Geometry, b: &Geometry) -> bool {
    if envelopes_disjoint(a, b) || !a.envelope().contains_envelope(&b.envelope()) {
        return false;
    }
    RelateComputer::default().relate(a, b).is_covers()
}

pub fn covered_by(a: &Geometry, b: &Geometry) -> bool {
    covers(b, a)
}

pub fn touches(a: &Geometry, b: &Geometry) -> bool {
    if envelopes_disjoint(a, b) {
        return false;
    }
    let m = RelateComputer::default().relate(a, b);
    m.is_touches(self_dim(a), self_dim(b))
}

pub fn crosses(a: &Geometry, b: &Geometry) -> bool {
    if envelopes_disjoint(a, b) {
        return false;
    }
    let m = RelateComputer::default().relate(a, b);
    m.is_crosses(self_dim(a), self_dim(b))
}

pub fn overlaps(a: &Geometry, b: &Geometry) -> bool {
    if envelopes_disjoint(a, b) {
        return false;
    }
    let m = RelateComputer::default().relate(a, b);
    m.is_overlaps(self_dim(a), self_dim(b))
}

pub fn equals(a: &Geometry, b: &Geometry) -> bool {
    if a.envelope() != b.envelope() {
        return false;
    }
    RelateComputer::default().relate(a, b).is_equal_topo()
}

pub fn relate(a: &Geometry, b: &Geometry, rule: BoundaryNodeRule) -> super::intersection_matrix::IntersectionMatrix {
    RelateComputer::new(rule).relate(a, b)
}

#[cfg(test)]
mod test {
    use super::*;
    use topo2d_types::{Coord, CoordinateSequence, LinearRing, Polygon};

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Geometry {
        let shell = LinearRing::try_new(CoordinateSequence::xy(vec![
            Coord::new(x0, y0),
            Coord::new(x1, y0),
            Coord::new(x1, y1),
            Coord::new(x0, y1),
            Coord::new(x0, y0),
        ]))
        .unwrap();
        Geometry::Polygon(Polygon::new(shell, vec![]))
    }

    #[test]
    fn touching_squares_touch_but_do_not_overlap() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(1.0, 0.0, 2.0, 1.0);
        assert!(touches(&a, &b));
        assert!(!overlaps(&a, &b));
        assert!(intersects(&a, &b));
    }

    #[test]
    fn nested_square_is_within_and_covered_by() {
        let inner = square(1.0, 1.0, 2.0, 2.0);
        let outer = square(0.0, 0.0, 5.0, 5.0);
        assert!(within(&inner, &outer));
        assert!(contains(&outer, &inner));
        assert!(covered_by(&inner, &outer));
        assert!(covers(&outer, &inner));
    }

    #[test]
    fn disjoint_squares_are_disjoint() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(10.0, 10.0, 11.0, 11.0);
        assert!(disjoint(&a, &b));
        assert!(!intersects(&a, &b));
    }
}
