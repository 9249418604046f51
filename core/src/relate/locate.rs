use topo2d_types::{Coord, Geometry, LineString, MultiLineString, MultiPolygon, Polygon};

use crate::kernels::{is_on_line, locate_in_ring, Location};

use super::boundary_node_rule::BoundaryNodeRule;

/// Classifies `p` against `polygon`'s shell and holes: boundary if on any
/// ring, interior if inside the shell and outside every hole, exterior
/// otherwise.
pub fn locate_in_polygon(p: Coord, polygon: &Polygon) -> Location {
    let shell_loc = locate_in_ring(p, polygon.shell.coords().as_slice());
    if shell_loc != Location::Interior {
        return shell_loc;
    }
    for hole in &polygon.holes {
        let hole_loc = locate_in_ring(p, hole.coords().as_slice());
        match hole_loc {
            Location::Interior => return Location::Exterior,
            Location::Boundary => return Location::Boundary,
            Location::Exterior => {}
        }
    }
    Location::Interior
}

pub fn locate_in_multi_polygon(p: Coord, mp: &MultiPolygon) -> Location {
    let mut best = Location::Exterior;
    for poly in &mp.0 {
        match locate_in_polygon(p, poly) {
            Location::Interior => return Location::Interior,
            Location::Boundary => best = Location::Boundary,
            Location::Exterior => {}
        }
    }
    best
}

/// Boundary points of a single line string under `rule`: its two endpoints,
/// unless it's closed (in which case it has none).
pub fn line_boundary_points(line: &LineString, rule: BoundaryNodeRule) -> Vec<Coord> {
    let coords = line.coords().as_slice();
    if coords.len() < 2 {
        return Vec::new();
    }
    if coords.first() == coords.last() {
        return Vec::new();
    }
    let degree = 1; // a lone line string: one line end at each terminus
    if rule.is_boundary(degree) {
        vec![coords[0], *coords.last().unwrap()]
    } else {
        Vec::new()
    }
}

/// Boundary points of a collection of line strings under `rule`: vertices
/// where the component count of line-ends meeting there satisfies the rule.
/// Closed lines contribute no line-ends at their shared start/end vertex.
pub fn multi_line_boundary_points(lines: &MultiLineString, rule: BoundaryNodeRule) -> Vec<Coord> {
    use std::collections::HashMap;
    let mut degree: HashMap<(u64, u64), (Coord, usize)> = HashMap::new();
    let mut bump = |c: Coord, degree: &mut HashMap<(u64, u64), (Coord, usize)>| {
        let key = (c.x.to_bits(), c.y.to_bits());
        degree.entry(key).or_insert((c, 0)).1 += 1;
    };
    for line in &lines.0 {
        let coords = line.coords().as_slice();
        if coords.len() < 2 || coords.first() == coords.last() {
            continue;
        }
        bump(coords[0], &mut degree);
        bump(*coords.last().unwrap(), &mut degree);
    }
    degree
        .values()
        .filter(|(_, d)| rule.is_boundary(*d))
        .map(|(c, _)| *c)
        .collect()
}

pub fn locate_point(target: Coord, geometry: &Geometry, rule: BoundaryNodeRule) -> Location {
    match geometry {
        Geometry::Point(p) => {
            if p.0 == target {
                Location::Interior
            } else {
                Location::Exterior
            }
        }
        Geometry::MultiPoint(mp) => {
            if mp.0.iter().any(|p| p.0 == target) {
                Location::Interior
            } else {
                Location::Exterior
            }
        }
        Geometry::LineString(line) => {
            if line_boundary_points(line, rule).contains(&target) {
                Location::Boundary
            } else if is_on_line(target, line.coords().as_slice()) {
                Location::Interior
            } else {
                Location::Exterior
            }
        }
        Geometry::LinearRing(ring) => {
            if is_on_line(target, ring.coords().as_slice()) {
                Location::Boundary
            } else {
                Location::Exterior
            }
        }
        Geometry::MultiLineString(mls) => {
            let boundary = multi_line_boundary_points(mls, rule);
            if boundary.contains(&target) {
                return Location::Boundary;
            }
            for line in &mls.0 {
                if is_on_line(target, line.coords().as_slice()) {
                    return Location::Interior;
                }
            }
            Location::Exterior
        }
        Geometry::Polygon(poly) => locate_in_polygon(target, poly),
        Geometry::MultiPolygon(mp) => locate_in_multi_polygon(target, mp),
        Geometry::GeometryCollection(gc) => {
            let mut best = Location::Exterior;
            for g in &gc.0 {
                match locate_point(target, g, rule) {
                    Location::Interior => return Location::Interior,
                    Location::Boundary => best = Location::Boundary,
                    Location::Exterior => {}
                }
            }
            best
        }
        Geometry::Curved(_) => Location::Exterior,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use topo2d_types::{CoordinateSequence, LinearRing};

    #[test]
    fn point_interior_to_polygon() {
        let shell = LinearRing::try_new(CoordinateSequence::xy(vec![
            Coord::new(0.0, 0.0),
            Coord::new(4.0, 0.0),
            Coord::new(4.0, 4.0),
            Coord::new(0.0, 4.0),
            Coord::new(0.0, 0.0),
        ]))
        .unwrap();
        let polygon = Polygon::new(shell, vec![]);
        assert_eq!(locate_in_polygon(Coord::new(2.0, 2.0), &polygon), Location::Interior);
    }

    #[test]
    fn point_in_hole_is_exterior() {
        let shell = LinearRing::try_new(CoordinateSequence::xy(vec![
            Coord::new(0.0, 0.0),
            Coord::new(10.0, 0.0),
            Coord::new(10.0, 10.0),
            Coord::new(0.0, 10.0),
            Coord::new(0.0, 0.0),
        ]))
        .unwrap();
        let hole = LinearRing::try_new(CoordinateSequence::xy(vec![
            Coord::new(2.0, 2.0),
            Coord::new(2.0, 4.0),
            Coord::new(4.0, 4.0),
            Coord::new(4.0, 2.0),
            Coord::new(2.0, 2.0),
        ]))
        .unwrap();
        let polygon = Polygon::new(shell, vec![hole]);
        assert_eq!(locate_in_polygon(Coord::new(3.0, 3.0), &polygon), Location::Exterior);
    }
}
