use topo2d_types::Coord;

use crate::index::{MonotoneChain, StrTree};
use crate::kernels::LineIntersection;

use super::segment_string::SegmentString;

/// Outcome of [`FastNodingValidator::check`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodingStatus {
    Valid,
    /// An interior intersection remains between two segments that a noder
    /// failed to split: either a proper crossing, or a touch where one
    /// segment's endpoint lands on the other's interior rather than on a
    /// vertex shared by both.
    HasProperIntersection { at: Coord },
}

/// Checks whether a collection of already-noded segment strings really is
/// fully noded, by re-running the intersection search and looking for any
/// interior intersection — a proper crossing, a collinear overlap, or a
/// one-sided endpoint touch. An intersection point that is an endpoint of
/// *both* segments involved is a legitimate shared node and expected.
/// Stops at the first violation found.
pub struct FastNodingValidator;

impl FastNodingValidator {
    pub fn check<C>(strings: &[SegmentString<C>]) -> NodingStatus {
        let chains_per_string: Vec<Vec<MonotoneChain>> =
            strings.iter().map(|s| MonotoneChain::build(s.coords())).collect();

        struct Leaf<'a> {
            env: topo2d_types::Envelope,
            string_index: usize,
            chain: MonotoneChain<'a>,
        }
        impl rstar::RTreeObject for Leaf<'_> {
            type Envelope = rstar::AABB<Coord>;
            fn envelope(&self) -> Self::Envelope {
                rstar::AABB::from_corners(self.env.min(), self.env.max())
            }
        }

        let mut leaves = Vec::new();
        for (string_index, chains) in chains_per_string.iter().enumerate() {
            for chain in chains {
                leaves.push(Leaf {
                    env: chain.envelope(),
                    string_index,
                    chain: chain.clone(),
                });
            }
        }

        let tree = StrTree::bulk_load(leaves);
        let mut violation = None;
        for leaf in tree.iter() {
            if violation.is_some() {
                break;
            }
            tree.visit_envelope(leaf.env, |other| {
                if std::ptr::eq(leaf, other) {
                    return true;
                }
                let same_string = leaf.string_index == other.string_index;
                let mut ok = true;
                leaf.chain.compute_intersections(&other.chain, &mut |si, sj, result| {
                    let seg_i = leaf.chain.start + si;
                    let seg_j = other.chain.start + sj;
                    if same_string && seg_i == seg_j {
                        return;
                    }
                    // A proper interior crossing is always a violation; so is
                    // any touch that isn't a true shared-endpoint node — a
                    // segment's endpoint landing on the interior of another
                    // segment (is_proper == false because it coincides with
                    // one of the four endpoints, but that endpoint doesn't
                    // match on both sides) means noding missed a split there.
                    match result {
                        LineIntersection::SinglePoint { intersection, is_proper } => {
                            let shared_endpoint = !is_proper && {
                                let a = leaf.chain.segment(si);
                                let b = other.chain.segment(sj);
                                (intersection == a.start || intersection == a.end) && (intersection == b.start || intersection == b.end)
                            };
                            if !shared_endpoint {
                                violation = Some(intersection);
                                ok = false;
                            }
                        }
                        LineIntersection::Collinear { overlap } => {
                            violation = Some(overlap.start);
                            ok = false;
                        }
                    }
                });
                ok
            });
        }

        match violation {
            Some(at) => NodingStatus::HasProperIntersection { at },
            None => NodingStatus::Valid,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn noded_input_reports_valid() {
        let strings = vec![
            SegmentString::new(vec![Coord::new(0.0, 5.0), Coord::new(5.0, 5.0)], 0),
            SegmentString::new(vec![Coord::new(5.0, 5.0), Coord::new(10.0, 5.0)], 1),
            SegmentString::new(vec![Coord::new(5.0, 0.0), Coord::new(5.0, 5.0)], 2),
            SegmentString::new(vec![Coord::new(5.0, 5.0), Coord::new(5.0, 10.0)], 3),
        ];
        assert_eq!(FastNodingValidator::check(&strings), NodingStatus::Valid);
    }

    #[test]
    fn unnoded_crossing_is_detected() {
        let strings = vec![
            SegmentString::new(vec![Coord::new(0.0, 5.0), Coord::new(10.0, 5.0)], 0),
            SegmentString::new(vec![Coord::new(5.0, 0.0), Coord::new(5.0, 10.0)], 1),
        ];
        match FastNodingValidator::check(&strings) {
            NodingStatus::HasProperIntersection { at } => {
                assert_eq!(at, Coord::new(5.0, 5.0));
            }
            NodingStatus::Valid => panic!("expected a proper intersection to be detected"),
        }
    }

    #[test]
    fn endpoint_touching_another_segments_interior_is_detected() {
        // B's endpoint (5, 0) lands on A's interior without being a vertex of
        // A: not a proper crossing (`is_proper == false`), but still a node
        // that was never split out of A.
        let strings = vec![
            SegmentString::new(vec![Coord::new(0.0, 0.0), Coord::new(10.0, 0.0)], 0),
            SegmentString::new(vec![Coord::new(5.0, 0.0), Coord::new(5.0, 5.0)], 1),
        ];
        match FastNodingValidator::check(&strings) {
            NodingStatus::HasProperIntersection { at } => {
                assert_eq!(at, Coord::new(5.0, 0.0));
            }
            NodingStatus::Valid => panic!("expected the one-sided endpoint touch to be flagged"),
        }
    }
}
