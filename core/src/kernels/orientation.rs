use topo2d_types::Coord;

/// The turn direction of three ordered points, or `Collinear` if they lie on
/// a common line.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

impl Orientation {
    pub fn opposite(self) -> Self {
        match self {
            Orientation::CounterClockwise => Orientation::Clockwise,
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::Collinear => Orientation::Collinear,
        }
    }
}

/// The orientation index of `q` relative to the directed line through `p` and
/// `r`: the sign of the cross product of `(r - p)` and `(q - p)`.
///
/// This is the single correctness-critical primitive in the whole core: it
/// must be *orientation-consistent* under the three cyclic permutations of
/// its arguments, a property a naive floating-point cross product does not
/// reliably have near collinearity. The computation is delegated to the
/// `robust` crate, which implements Shewchuk's adaptive-precision
/// `orient2d`: a fast filtered evaluation with a published error bound,
/// falling back to extended (double-double) precision only when the fast
/// result's magnitude is within that bound of zero.
pub fn orient2d(p: Coord, r: Coord, q: Coord) -> Orientation {
    let det = robust::orient2d(
        robust::Coord { x: p.x, y: p.y },
        robust::Coord { x: r.x, y: r.y },
        robust::Coord { x: q.x, y: q.y },
    );
    if det > 0.0 {
        Orientation::CounterClockwise
    } else if det < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Whether a ring (first coordinate equal to last, at least 4 coordinates)
/// is wound counter-clockwise. Uses the signed-area test on the lowest,
/// then rightmost, point of the ring and its two neighbours, which is exact
/// under `orient2d` regardless of self-intersection elsewhere in the ring.
pub fn is_ccw(ring: &[Coord]) -> bool {
    assert!(ring.len() >= 4, "ring must have at least 4 coordinates");

    // index of the point with the lowest y (rightmost among ties)
    let mut hi_index = 0usize;
    for i in 1..ring.len() - 1 {
        if ring[i].y > ring[hi_index].y {
            hi_index = i;
        }
    }

    let n = ring.len() - 1;
    let mut prev = if hi_index == 0 { n - 1 } else { hi_index - 1 };
    while ring[prev] == ring[hi_index] && prev != hi_index {
        prev = if prev == 0 { n - 1 } else { prev - 1 };
    }

    let mut next = (hi_index + 1) % n;
    while ring[next] == ring[hi_index] && next != hi_index {
        next = (next + 1) % n;
    }

    let p_prev = ring[prev];
    let p_next = ring[next];

    if p_prev == ring[hi_index] || p_next == ring[hi_index] || p_prev == p_next {
        return false;
    }

    let disc = orient2d(p_prev, ring[hi_index], p_next);

    match disc {
        Orientation::Collinear => p_prev.x > p_next.x,
        Orientation::CounterClockwise => true,
        Orientation::Clockwise => false,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn orientation_consistency_under_cyclic_permutation() {
        let p1 = Coord::new(0.0, 0.0);
        let p2 = Coord::new(1.0, 0.0);
        let p3 = Coord::new(1.0, 1.0);
        let a = orient2d(p1, p2, p3);
        let b = orient2d(p2, p3, p1);
        let c = orient2d(p3, p1, p2);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn orientation_anticommutative_on_swap() {
        let p1 = Coord::new(0.0, 0.0);
        let p2 = Coord::new(1.0, 0.0);
        let p3 = Coord::new(1.0, 1.0);
        assert_eq!(orient2d(p1, p2, p3).opposite(), orient2d(p2, p1, p3));
    }

    #[test]
    fn nearly_collinear_points_are_resolved_exactly() {
        // A classic robustness torture case: naive f64 cross product gives
        // inconsistent signs across permutations for points this close to
        // collinear; the DD fallback in `robust` must not.
        let p1 = Coord::new(24.0, 24.0);
        let p2 = Coord::new(12.000000000000004, 12.0);
        let p3 = Coord::new(0.0, 0.0);
        let a = orient2d(p1, p2, p3);
        let b = orient2d(p2, p3, p1);
        let c = orient2d(p3, p1, p2);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn ccw_square_is_detected() {
        let ring = vec![
            Coord::new(0.0, 0.0),
            Coord::new(4.0, 0.0),
            Coord::new(4.0, 4.0),
            Coord::new(0.0, 4.0),
            Coord::new(0.0, 0.0),
        ];
        assert!(is_ccw(&ring));
        let cw: Vec<_> = ring.into_iter().rev().collect();
        assert!(!is_ccw(&cw));
    }
}
