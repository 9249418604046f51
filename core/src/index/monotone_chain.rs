use topo2d_types::{Coord, Envelope};

use crate::kernels::{intersect, LineIntersection, Segment};

/// A contiguous range `[start, end]` of indices into a coordinate slice
/// along which both x and y move monotonically (weakly: consecutive equal
/// ordinates are permitted).
///
/// Monotone chains are the unit of work for noding: two chains whose
/// envelopes don't overlap can never contain a crossing pair of segments,
/// so chain-to-chain testing prunes the quadratic segment-pair check down
/// to an output-sensitive cost in practice.
#[derive(Clone, Debug)]
pub struct MonotoneChain<'a> {
    coords: &'a [Coord],
    pub start: usize,
    pub end: usize,
    envelope: Envelope,
}

impl<'a> MonotoneChain<'a> {
    /// Splits `coords` into maximal monotone chains.
    pub fn build(coords: &'a [Coord]) -> Vec<MonotoneChain<'a>> {
        let mut chains = Vec::new();
        if coords.len() < 2 {
            return chains;
        }
        let mut start = 0usize;
        while start < coords.len() - 1 {
            let end = find_chain_end(coords, start);
            chains.push(MonotoneChain::new(coords, start, end));
            start = end;
        }
        chains
    }

    fn new(coords: &'a [Coord], start: usize, end: usize) -> Self {
        let mut envelope = Envelope::empty();
        for c in &coords[start..=end] {
            envelope.expand_to_include(*c);
        }
        MonotoneChain {
            coords,
            start,
            end,
            envelope,
        }
    }

    pub fn envelope(&self) -> Envelope {
        self.envelope
    }

    pub fn segment_count(&self) -> usize {
        self.end - self.start
    }

    pub fn segment(&self, i: usize) -> Segment {
        Segment::new(self.coords[self.start + i], self.coords[self.start + i + 1])
    }

    /// Finds every intersection between segments of `self` and segments of
    /// `other`, invoking `visit` with (self_segment_index, other_segment_index,
    /// intersection) for each. Uses recursive envelope bisection of the two
    /// chains rather than a full segment×segment cross product.
    pub fn compute_intersections(
        &self,
        other: &MonotoneChain,
        visit: &mut impl FnMut(usize, usize, LineIntersection),
    ) {
        if !self.envelope.intersects_envelope(&other.envelope) {
            return;
        }
        compute_overlaps(self, 0, self.segment_count() - 1, other, 0, other.segment_count() - 1, visit);
    }
}

fn find_chain_end(coords: &[Coord], start: usize) -> usize {
    // direction: -1 descending, 0 unknown, +1 ascending, for x and y
    // independently; extend while both remain compatible with the chain's
    // first established direction.
    let mut x_dir = 0i8;
    let mut y_dir = 0i8;
    let mut i = start;
    while i < coords.len() - 1 {
        let a = coords[i];
        let b = coords[i + 1];
        let dx = dir(a.x, b.x);
        let dy = dir(a.y, b.y);
        if x_dir == 0 {
            x_dir = dx;
        }
        if y_dir == 0 {
            y_dir = dy;
        }
        if (dx != 0 && dx != x_dir) || (dy != 0 && dy != y_dir) {
            return i;
        }
        i += 1;
    }
    i
}

fn dir(a: f64, b: f64) -> i8 {
    if b > a {
        1
    } else if b < a {
        -1
    } else {
        0
    }
}

#[allow(clippy::too_many_arguments)]
fn compute_overlaps(
    a: &MonotoneChain,
    a_lo: usize,
    a_hi: usize,
    b: &MonotoneChain,
    b_lo: usize,
    b_hi: usize,
    visit: &mut impl FnMut(usize, usize, LineIntersection),
) {
    if a_lo == a_hi && b_lo == b_hi {
        if let Some(result) = intersect(a.segment(a_lo), b.segment(b_lo)) {
            visit(a_lo, b_lo, result);
        }
        return;
    }

    let a_env = range_envelope(a, a_lo, a_hi);
    let b_env = range_envelope(b, b_lo, b_hi);
    if !a_env.intersects_envelope(&b_env) {
        return;
    }

    let (a_lo1, a_hi1, a_lo2, a_hi2) = if a_lo < a_hi {
        let mid = (a_lo + a_hi) / 2;
        (a_lo, mid, mid + 1, a_hi)
    } else {
        (a_lo, a_hi, a_lo, a_hi)
    };
    let (b_lo1, b_hi1, b_lo2, b_hi2) = if b_lo < b_hi {
        let mid = (b_lo + b_hi) / 2;
        (b_lo, mid, mid + 1, b_hi)
    } else {
        (b_lo, b_hi, b_lo, b_hi)
    };

    if a_lo < a_hi && b_lo < b_hi {
        compute_overlaps(a, a_lo1, a_hi1, b, b_lo1, b_hi1, visit);
        compute_overlaps(a, a_lo1, a_hi1, b, b_lo2, b_hi2, visit);
        compute_overlaps(a, a_lo2, a_hi2, b, b_lo1, b_hi1, visit);
        compute_overlaps(a, a_lo2, a_hi2, b, b_lo2, b_hi2, visit);
    } else if a_lo < a_hi {
        compute_overlaps(a, a_lo1, a_hi1, b, b_lo, b_hi, visit);
        compute_overlaps(a, a_lo2, a_hi2, b, b_lo, b_hi, visit);
    } else if b_lo < b_hi {
        compute_overlaps(a, a_lo, a_hi, b, b_lo1, b_hi1, visit);
        compute_overlaps(a, a_lo, a_hi, b, b_lo2, b_hi2, visit);
    } else {
        if let Some(result) = intersect(a.segment(a_lo), b.segment(b_lo)) {
            visit(a_lo, b_lo, result);
        }
    }
}

fn range_envelope(chain: &MonotoneChain, lo: usize, hi: usize) -> Envelope {
    let mut env = Envelope::empty();
    for c in &chain.coords[chain.start + lo..=chain.start + hi + 1] {
        env.expand_to_include(*c);
    }
    env
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn splits_at_direction_reversal() {
        let coords = vec![
            Coord::new(0.0, 0.0),
            Coord::new(1.0, 1.0),
            Coord::new(2.0, 0.0),
            Coord::new(3.0, -1.0),
        ];
        let chains = MonotoneChain::build(&coords);
        assert_eq!(chains.len(), 2);
        assert_eq!((chains[0].start, chains[0].end), (0, 1));
        assert_eq!((chains[1].start, chains[1].end), (1, 3));
    }

    #[test]
    fn finds_crossing_between_two_chains() {
        let a = vec![Coord::new(0.0, 0.0), Coord::new(10.0, 10.0)];
        let b = vec![Coord::new(0.0, 10.0), Coord::new(10.0, 0.0)];
        let a_chains = MonotoneChain::build(&a);
        let b_chains = MonotoneChain::build(&b);
        let mut hits = Vec::new();
        for ca in &a_chains {
            for cb in &b_chains {
                ca.compute_intersections(cb, &mut |i, j, result| hits.push((i, j, result)));
            }
        }
        assert_eq!(hits.len(), 1);
    }
}
