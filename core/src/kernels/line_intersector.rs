use topo2d_types::{Coord, Envelope};

use super::orientation::{orient2d, Orientation::*};

/// A single segment `start` → `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Coord,
    pub end: Coord,
}

impl Segment {
    pub fn new(start: Coord, end: Coord) -> Self {
        Segment { start, end }
    }

    pub fn envelope(&self) -> Envelope {
        Envelope::from_coords(self.start, self.end)
    }
}

/// The result of intersecting two segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineIntersection {
    /// The segments meet in exactly one point.
    SinglePoint {
        intersection: Coord,
        /// `true` iff the intersection coordinate is not 2D-equal to any of
        /// the four segment endpoints — i.e. it is strictly interior to
        /// both segments, not just geometrically interior-looking. This is
        /// the definition that resolves the ambiguity between "proper" and
        /// "interior-on-vertex" for intersection points that land exactly
        /// on an input vertex.
        is_proper: bool,
    },
    /// The segments overlap collinearly; `overlap` is the (possibly
    /// degenerate, single-point) overlap segment.
    Collinear { overlap: Segment },
}

impl LineIntersection {
    pub fn is_proper(&self) -> bool {
        match self {
            LineIntersection::Collinear { .. } => false,
            LineIntersection::SinglePoint { is_proper, .. } => *is_proper,
        }
    }
}

/// Classifies and, where applicable, locates the intersection of segments
/// `p` and `q`. Returns `None` if the segments are disjoint.
///
/// This mirrors the approach used by robust planar-topology engines: cheap
/// envelope and orientation tests rule out the disjoint and collinear cases
/// before any floating-point intersection arithmetic runs, and the actual
/// intersection coordinate is computed via a normalized-determinant formula
/// evaluated in a frame translated to the candidate overlap's midpoint, to
/// minimise cancellation.
pub fn intersect(p: Segment, q: Segment) -> Option<LineIntersection> {
    if !p.envelope().intersects_envelope(&q.envelope()) {
        return None;
    }

    let p_q1 = orient2d(p.start, p.end, q.start);
    let p_q2 = orient2d(p.start, p.end, q.end);
    if matches!((p_q1, p_q2), (Clockwise, Clockwise) | (CounterClockwise, CounterClockwise)) {
        return None;
    }

    let q_p1 = orient2d(q.start, q.end, p.start);
    let q_p2 = orient2d(q.start, q.end, p.end);
    if matches!((q_p1, q_p2), (Clockwise, Clockwise) | (CounterClockwise, CounterClockwise)) {
        return None;
    }

    if matches!((p_q1, p_q2, q_p1, q_p2), (Collinear, Collinear, Collinear, Collinear)) {
        return collinear_intersection(p, q);
    }

    // Single intersection point. If it falls on a shared/incident endpoint,
    // copy that endpoint exactly rather than computing it, for robustness.
    if p_q1 == Collinear || p_q2 == Collinear || q_p1 == Collinear || q_p2 == Collinear {
        let intersection = if p.start == q.start || p.start == q.end {
            p.start
        } else if p.end == q.start || p.end == q.end {
            p.end
        } else if p_q1 == Collinear {
            q.start
        } else if p_q2 == Collinear {
            q.end
        } else if q_p1 == Collinear {
            p.start
        } else {
            p.end
        };
        Some(LineIntersection::SinglePoint {
            intersection,
            is_proper: is_strictly_interior(intersection, p, q),
        })
    } else {
        let intersection = proper_intersection_point(p, q);
        Some(LineIntersection::SinglePoint {
            intersection,
            is_proper: is_strictly_interior(intersection, p, q),
        })
    }
}

fn is_strictly_interior(pt: Coord, p: Segment, q: Segment) -> bool {
    pt != p.start && pt != p.end && pt != q.start && pt != q.end
}

fn collinear_intersection(p: Segment, q: Segment) -> Option<LineIntersection> {
    fn collinear(overlap: Segment) -> LineIntersection {
        LineIntersection::Collinear { overlap }
    }
    fn improper(intersection: Coord) -> LineIntersection {
        LineIntersection::SinglePoint {
            intersection,
            is_proper: false,
        }
    }

    let p_env = p.envelope();
    let q_env = q.envelope();
    Some(match (
        p_env.contains_point(q.start),
        p_env.contains_point(q.end),
        q_env.contains_point(p.start),
        q_env.contains_point(p.end),
    ) {
        (true, true, _, _) => collinear(q),
        (_, _, true, true) => collinear(p),
        (true, false, true, false) if q.start == p.start => improper(q.start),
        (true, _, true, _) => collinear(Segment::new(q.start, p.start)),
        (true, false, false, true) if q.start == p.end => improper(q.start),
        (true, _, _, true) => collinear(Segment::new(q.start, p.end)),
        (false, true, true, false) if q.end == p.start => improper(q.end),
        (_, true, true, _) => collinear(Segment::new(q.end, p.start)),
        (false, true, false, true) if q.end == p.end => improper(q.end),
        (_, true, _, true) => collinear(Segment::new(q.end, p.end)),
        _ => return None,
    })
}

/// Perpendicular distance from `pt` to the (infinite extension of the)
/// segment `seg`, used only to rank candidate endpoints when the
/// determinant solve is ill-conditioned.
fn point_segment_distance(pt: Coord, seg: Segment) -> f64 {
    let (dx, dy) = (seg.end.x - seg.start.x, seg.end.y - seg.start.y);
    if dx == 0.0 && dy == 0.0 {
        return pt.distance(&seg.start);
    }
    let t = ((pt.x - seg.start.x) * dx + (pt.y - seg.start.y) * dy) / (dx * dx + dy * dy);
    let t = t.clamp(0.0, 1.0);
    let proj = Coord::new(seg.start.x + t * dx, seg.start.y + t * dy);
    pt.distance(&proj)
}

/// Among the four segment endpoints, the one closest to the *other*
/// segment: a robust surrogate for the true intersection point when the
/// determinant solve is ill-conditioned (near-parallel or very unequal
/// segment lengths).
fn nearest_endpoint(p: Segment, q: Segment) -> Coord {
    let mut best = p.start;
    let mut best_dist = point_segment_distance(p.start, q);
    for (candidate, other) in [(p.end, q), (q.start, p), (q.end, p)] {
        let dist = point_segment_distance(candidate, other);
        if dist < best_dist {
            best_dist = dist;
            best = candidate;
        }
    }
    best
}

fn raw_intersection(p: Segment, q: Segment) -> Option<Coord> {
    let int_min_x = p.start.x.min(p.end.x).max(q.start.x.min(q.end.x));
    let int_max_x = p.start.x.max(p.end.x).min(q.start.x.max(q.end.x));
    let int_min_y = p.start.y.min(p.end.y).max(q.start.y.min(q.end.y));
    let int_max_y = p.start.y.max(p.end.y).min(q.start.y.max(q.end.y));

    let mid_x = (int_min_x + int_max_x) / 2.0;
    let mid_y = (int_min_y + int_max_y) / 2.0;

    let p1x = p.start.x - mid_x;
    let p1y = p.start.y - mid_y;
    let p2x = p.end.x - mid_x;
    let p2y = p.end.y - mid_y;
    let q1x = q.start.x - mid_x;
    let q1y = q.start.y - mid_y;
    let q2x = q.end.x - mid_x;
    let q2y = q.end.y - mid_y;

    // Homogeneous-coordinates line-through-two-points, then line-line
    // intersection via the cross product of the two line vectors.
    let px = p1y - p2y;
    let py = p2x - p1x;
    let pw = p1x * p2y - p2x * p1y;

    let qx = q1y - q2y;
    let qy = q2x - q1x;
    let qw = q1x * q2y - q2x * q1y;

    let xw = py * qw - qy * pw;
    let yw = qx * pw - px * qw;
    let w = px * qy - qx * py;

    let x = xw / w;
    let y = yw / w;

    if x.is_finite() && y.is_finite() {
        Some(Coord::new(x + mid_x, y + mid_y))
    } else {
        None
    }
}

fn proper_intersection_point(p: Segment, q: Segment) -> Coord {
    let pt = raw_intersection(p, q).unwrap_or_else(|| nearest_endpoint(p, q));
    if p.envelope().contains_point(pt) && q.envelope().contains_point(pt) {
        pt
    } else {
        nearest_endpoint(p, q)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn crossing_segments_proper() {
        let p = Segment::new(Coord::new(0.0, 0.0), Coord::new(10.0, 10.0));
        let q = Segment::new(Coord::new(0.0, 10.0), Coord::new(10.0, 0.0));
        let result = intersect(p, q).unwrap();
        match result {
            LineIntersection::SinglePoint { intersection, is_proper } => {
                assert!(is_proper);
                assert_eq!(intersection, Coord::new(5.0, 5.0));
            }
            _ => panic!("expected single point"),
        }
    }

    #[test]
    fn shared_endpoint_is_not_proper() {
        let p = Segment::new(Coord::new(0.0, 0.0), Coord::new(5.0, 5.0));
        let q = Segment::new(Coord::new(5.0, 5.0), Coord::new(5.0, 0.0));
        let result = intersect(p, q).unwrap();
        assert!(!result.is_proper());
        assert_eq!(
            result,
            LineIntersection::SinglePoint {
                intersection: Coord::new(5.0, 5.0),
                is_proper: false,
            }
        );
    }

    #[test]
    fn collinear_overlap() {
        let p = Segment::new(Coord::new(0.0, 0.0), Coord::new(5.0, 5.0));
        let q = Segment::new(Coord::new(3.0, 3.0), Coord::new(6.0, 6.0));
        let result = intersect(p, q).unwrap();
        assert_eq!(
            result,
            LineIntersection::Collinear {
                overlap: Segment::new(Coord::new(3.0, 3.0), Coord::new(5.0, 5.0))
            }
        );
    }

    #[test]
    fn disjoint_envelopes_short_circuit() {
        let p = Segment::new(Coord::new(0.0, 0.0), Coord::new(1.0, 1.0));
        let q = Segment::new(Coord::new(10.0, 10.0), Coord::new(11.0, 12.0));
        assert_eq!(intersect(p, q), None);
    }

    #[test]
    fn central_endpoint_heuristic_failure_case() {
        // Regression case for a near-parallel, very-unequal-length pair
        // where a naive "midpoint of the two closest endpoints" heuristic
        // picks the wrong endpoint.
        let p = Segment::new(
            Coord::new(163.81867067, -211.31840378),
            Coord::new(165.9174252, -214.1665075),
        );
        let q = Segment::new(
            Coord::new(2.84139601, -57.95412726),
            Coord::new(469.59990601, -502.63851732),
        );
        let result = intersect(p, q).unwrap();
        match result {
            LineIntersection::SinglePoint { intersection, is_proper } => {
                assert!(is_proper);
                assert_eq!(intersection, Coord::new(163.81867067, -211.31840378));
            }
            _ => panic!("expected single point"),
        }
    }
}
