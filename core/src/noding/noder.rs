use topo2d_types::{Coord, PrecisionModel};

use crate::error::{Error, Result};
use crate::index::{MonotoneChain, StrTree};
use crate::kernels::{intersect, LineIntersection, Segment};

use super::segment_string::NodedSegmentString;

/// Computes a noded representation of a set of input linework: every pair of
/// segments that cross or touch is split so that afterwards no two segments
/// intersect except at a shared endpoint.
///
/// Implementations differ in how they find candidate intersecting pairs and
/// in whether they perturb input coordinates (snapping, snap-rounding) to
/// guarantee termination in the presence of near-coincident geometry.
pub trait Noder<C> {
    fn node(&self, inputs: Vec<NodedSegmentString<C>>) -> Result<Vec<NodedSegmentString<C>>>;
}

/// Finds intersections by testing every pair of input segment strings
/// against each other with no spatial index: O(n^2) in the segment count.
/// Useful as a reference implementation and for small inputs where index
/// overhead isn't worth paying.
#[derive(Debug, Default)]
pub struct SimpleNoder;

impl SimpleNoder {
    pub fn new() -> Self {
        SimpleNoder
    }
}

impl<C: Clone> Noder<C> for SimpleNoder {
    fn node(&self, mut inputs: Vec<NodedSegmentString<C>>) -> Result<Vec<NodedSegmentString<C>>> {
        let n = inputs.len();
        for i in 0..n {
            for j in i..n {
                let segs_i = inputs[i].segment_count();
                let segs_j = inputs[j].segment_count();
                for si in 0..segs_i {
                    for sj in 0..segs_j {
                        if i == j && si == sj {
                            continue;
                        }
                        let a = segment_of(&inputs[i], si);
                        let b = segment_of(&inputs[j], sj);
                        if let Some(result) = intersect(a, b) {
                            record(&mut inputs, i, si, j, sj, result);
                        }
                    }
                }
            }
        }
        Ok(split_all(inputs))
    }
}

/// Finds intersections using monotone chains inside an STR-tree, so that
/// only spatially overlapping segment string pairs are ever tested
/// segment-by-segment.
#[derive(Debug, Default)]
pub struct McIndexNoder;

impl McIndexNoder {
    pub fn new() -> Self {
        McIndexNoder
    }
}

struct ChainRef {
    string_index: usize,
    chain_start: usize,
    chain_end: usize,
}

impl rstar::RTreeObject for ChainRefEnvelope {
    type Envelope = rstar::AABB<Coord>;
    fn envelope(&self) -> Self::Envelope {
        rstar::AABB::from_corners(self.0.min(), self.0.max())
    }
}

struct ChainRefEnvelope(topo2d_types::Envelope, ChainRef);

impl<C: Clone> Noder<C> for McIndexNoder {
    fn node(&self, mut inputs: Vec<NodedSegmentString<C>>) -> Result<Vec<NodedSegmentString<C>>> {
        let chains_per_string: Vec<Vec<MonotoneChain>> =
            inputs.iter().map(|s| MonotoneChain::build(s.coords())).collect();

        let mut leaves = Vec::new();
        for (string_index, chains) in chains_per_string.iter().enumerate() {
            for chain in chains {
                leaves.push(ChainRefEnvelope(
                    chain.envelope(),
                    ChainRef {
                        string_index,
                        chain_start: chain.start,
                        chain_end: chain.end,
                    },
                ));
            }
        }
        let tree = StrTree::bulk_load(leaves);

        let mut pending: Vec<(usize, usize, usize, usize, LineIntersection)> = Vec::new();
        for leaf in tree.iter() {
            let a_ref = &leaf.1;
            let a_chain = MonotoneChain::build(inputs[a_ref.string_index].coords())
                .into_iter()
                .find(|c| c.start == a_ref.chain_start && c.end == a_ref.chain_end)
                .unwrap();

            tree.visit_envelope(leaf.0, |other| {
                let b_ref = &other.1;
                if b_ref.string_index < a_ref.string_index {
                    return true;
                }
                if b_ref.string_index == a_ref.string_index && b_ref.chain_start < a_ref.chain_start {
                    return true;
                }
                if std::ptr::eq(a_ref, b_ref) {
                    return true;
                }
                let b_chain = MonotoneChain::build(inputs[b_ref.string_index].coords())
                    .into_iter()
                    .find(|c| c.start == b_ref.chain_start && c.end == b_ref.chain_end)
                    .unwrap();
                let same_string = a_ref.string_index == b_ref.string_index;
                a_chain.compute_intersections(&b_chain, &mut |si, sj, result| {
                    let seg_i = a_ref.chain_start + si;
                    let seg_j = b_ref.chain_start + sj;
                    if same_string && seg_i == seg_j {
                        return;
                    }
                    pending.push((a_ref.string_index, seg_i, b_ref.string_index, seg_j, result));
                });
                true
            });
        }

        for (si, segi, sj, segj, result) in pending {
            record(&mut inputs, si, segi, sj, segj, result);
        }

        Ok(split_all(inputs))
    }
}

fn segment_of<C>(s: &NodedSegmentString<C>, i: usize) -> Segment {
    let c = s.coords();
    Segment::new(c[i], c[i + 1])
}

fn record<C>(
    inputs: &mut [NodedSegmentString<C>],
    i: usize,
    si: usize,
    j: usize,
    sj: usize,
    result: LineIntersection,
) {
    match result {
        LineIntersection::SinglePoint { intersection, .. } => {
            inputs[i].add_intersection(intersection, si);
            inputs[j].add_intersection(intersection, sj);
        }
        LineIntersection::Collinear { overlap } => {
            inputs[i].add_intersection(overlap.start, si);
            inputs[i].add_intersection(overlap.end, si);
            inputs[j].add_intersection(overlap.start, sj);
            inputs[j].add_intersection(overlap.end, sj);
        }
    }
}

fn split_all<C: Clone>(inputs: Vec<NodedSegmentString<C>>) -> Vec<NodedSegmentString<C>> {
    let mut out = Vec::new();
    for s in inputs {
        for coords in s.noded_substrings() {
            out.push(NodedSegmentString::new(coords, s.context().clone()));
        }
    }
    out
}

/// Wraps a base noder and re-runs it until a fixed point is reached: the
/// result of noding is itself noded again, since splitting one segment
/// string can create a new intersection with a third. Most inputs converge
/// in one or two passes; `max_iterations` bounds the pathological case,
/// surfacing [`Error::NonConvergence`] rather than looping forever.
pub struct IteratedNoder<N> {
    base: N,
    max_iterations: usize,
}

impl<N> IteratedNoder<N> {
    pub fn new(base: N, max_iterations: usize) -> Self {
        IteratedNoder { base, max_iterations }
    }
}

impl<C: Clone, N: Noder<C>> Noder<C> for IteratedNoder<N> {
    fn node(&self, mut inputs: Vec<NodedSegmentString<C>>) -> Result<Vec<NodedSegmentString<C>>> {
        let mut previous_count = inputs.len();
        for iteration in 0..self.max_iterations {
            let result = self.base.node(inputs)?;
            if result.len() == previous_count {
                return Ok(result);
            }
            previous_count = result.len();
            inputs = result;
            let _ = iteration;
        }
        Err(Error::NonConvergence {
            iterations: self.max_iterations,
        })
    }
}

/// A passthrough noder for input the caller already asserts is noded (for
/// example, a coverage whose polygons are known to share exact edges): no
/// intersection search is performed at all.
#[derive(Debug, Default)]
pub struct SegmentExtractingNoder;

impl<C> Noder<C> for SegmentExtractingNoder {
    fn node(&self, inputs: Vec<NodedSegmentString<C>>) -> Result<Vec<NodedSegmentString<C>>> {
        Ok(inputs)
    }
}

/// Wraps [`McIndexNoder`] and rounds every coordinate it produces onto
/// `precision_model`'s grid, including coordinates computed fresh by the
/// intersection search itself. A plain snap-then-node pass only rounds the
/// *original* vertices; each later [`IteratedNoder`] round can still compute
/// an off-grid intersection between two already-rounded segments (two
/// grid-aligned diagonals crossing at a non-grid point, for example), and
/// that point has to be rounded again before the next round sees it.
struct PrecisionSnappingNoder {
    precision_model: PrecisionModel,
    inner: McIndexNoder,
}

impl<C: Clone> Noder<C> for PrecisionSnappingNoder {
    fn node(&self, inputs: Vec<NodedSegmentString<C>>) -> Result<Vec<NodedSegmentString<C>>> {
        let noded = self.inner.node(inputs)?;
        Ok(noded
            .into_iter()
            .map(|s| {
                let coords: Vec<Coord> = s.coords().iter().map(|&c| self.precision_model.make_precise(c)).collect();
                NodedSegmentString::new(coords, s.context().clone())
            })
            .collect())
    }
}

/// Noder used for [`PrecisionModel::Fixed`] overlay input: every coordinate
/// is rounded onto the precision grid (the "hot pixel" grid) before
/// intersection search, guaranteeing by construction that coincident
/// geometry snaps onto identical coordinates and that the MC-index noder
/// underneath it terminates in a single pass.
pub struct SnapRoundingNoder {
    precision_model: PrecisionModel,
    inner: PrecisionSnappingNoder,
}

impl SnapRoundingNoder {
    pub fn new(precision_model: PrecisionModel) -> Self {
        SnapRoundingNoder {
            precision_model,
            inner: PrecisionSnappingNoder {
                precision_model,
                inner: McIndexNoder::new(),
            },
        }
    }
}

impl<C: Clone> Noder<C> for SnapRoundingNoder {
    fn node(&self, inputs: Vec<NodedSegmentString<C>>) -> Result<Vec<NodedSegmentString<C>>> {
        let snapped: Vec<NodedSegmentString<C>> = inputs
            .into_iter()
            .map(|s| {
                let coords: Vec<Coord> = s.coords().iter().map(|&c| self.precision_model.make_precise(c)).collect();
                NodedSegmentString::new(coords, s.context().clone())
            })
            .collect();
        IteratedNoder::new(&self.inner, 5).node(snapped)
    }
}

impl<C, N: Noder<C>> Noder<C> for &N {
    fn node(&self, inputs: Vec<NodedSegmentString<C>>) -> Result<Vec<NodedSegmentString<C>>> {
        (*self).node(inputs)
    }
}

/// Noder used for [`PrecisionModel::Floating`] overlay input: after each
/// round of intersection-based noding, any vertex within `tolerance` of a
/// non-incident segment string vertex is snapped onto it, preventing the
/// class of near-miss intersections that floating-point noding alone can't
/// resolve exactly.
pub struct SnappingNoder {
    tolerance: f64,
    inner: McIndexNoder,
}

impl SnappingNoder {
    pub fn new(tolerance: f64) -> Self {
        SnappingNoder {
            tolerance,
            inner: McIndexNoder::new(),
        }
    }

    fn snap_vertices<C: Clone>(&self, inputs: Vec<NodedSegmentString<C>>) -> Vec<NodedSegmentString<C>> {
        let mut all_vertices: Vec<Coord> = Vec::new();
        for s in &inputs {
            all_vertices.extend_from_slice(s.coords());
        }
        inputs
            .into_iter()
            .map(|s| {
                let coords: Vec<Coord> = s
                    .coords()
                    .iter()
                    .map(|&c| {
                        all_vertices
                            .iter()
                            .find(|&&v| v != c && (v.x - c.x).hypot(v.y - c.y) <= self.tolerance)
                            .copied()
                            .unwrap_or(c)
                    })
                    .collect();
                NodedSegmentString::new(coords, s.context().clone())
            })
            .collect()
    }
}

impl<C: Clone> Noder<C> for SnappingNoder {
    fn node(&self, inputs: Vec<NodedSegmentString<C>>) -> Result<Vec<NodedSegmentString<C>>> {
        let snapped = self.snap_vertices(inputs);
        IteratedNoder::new(&self.inner, 5).node(snapped)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn simple_noder_splits_crossing_strings() {
        let a = NodedSegmentString::new(vec![Coord::new(0.0, 5.0), Coord::new(10.0, 5.0)], 0);
        let b = NodedSegmentString::new(vec![Coord::new(5.0, 0.0), Coord::new(5.0, 10.0)], 1);
        let noder = SimpleNoder::new();
        let result = noder.node(vec![a, b]).unwrap();
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn mc_index_noder_agrees_with_simple_noder_on_segment_count() {
        let a = NodedSegmentString::new(vec![Coord::new(0.0, 5.0), Coord::new(10.0, 5.0)], 0);
        let b = NodedSegmentString::new(vec![Coord::new(5.0, 0.0), Coord::new(5.0, 10.0)], 1);
        let result = McIndexNoder::new().node(vec![a, b]).unwrap();
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn non_crossing_strings_are_untouched() {
        let a = NodedSegmentString::new(vec![Coord::new(0.0, 0.0), Coord::new(1.0, 0.0)], 0);
        let b = NodedSegmentString::new(vec![Coord::new(0.0, 5.0), Coord::new(1.0, 5.0)], 1);
        let result = SimpleNoder::new().node(vec![a, b]).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn segment_extracting_noder_is_a_passthrough() {
        let a = NodedSegmentString::new(vec![Coord::new(0.0, 0.0), Coord::new(1.0, 0.0)], 0);
        let result = SegmentExtractingNoder.node(vec![a]).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn snap_rounding_noder_snaps_freshly_computed_intersections_too() {
        let pm = PrecisionModel::fixed(1.0);
        let a = NodedSegmentString::new(vec![Coord::new(0.0, 0.0), Coord::new(3.0, 2.0)], 0);
        let b = NodedSegmentString::new(vec![Coord::new(0.0, 2.0), Coord::new(3.0, 0.0)], 1);
        let result = SnapRoundingNoder::new(pm).node(vec![a, b]).unwrap();
        for s in &result {
            for &c in s.coords() {
                assert_eq!(c, pm.make_precise(c), "output coordinate {c:?} is not on the precision grid");
            }
        }
    }
}
