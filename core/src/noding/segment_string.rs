use std::collections::BTreeSet;

use topo2d_types::Coord;

/// A linear path tagged with caller-owned context, the unit of work handed
/// to a [`crate::noding::Noder`].
#[derive(Clone, Debug)]
pub struct SegmentString<C> {
    coords: Vec<Coord>,
    pub context: C,
}

impl<C> SegmentString<C> {
    pub fn new(coords: Vec<Coord>, context: C) -> Self {
        assert!(coords.len() >= 2, "a segment string needs at least two coordinates");
        SegmentString { coords, context }
    }

    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    pub fn segment_count(&self) -> usize {
        self.coords.len() - 1
    }

    pub fn is_closed(&self) -> bool {
        self.coords.first() == self.coords.last()
    }
}

/// A recorded intersection point on a [`NodedSegmentString`]: `coordinate`
/// at fractional `distance` along segment `segment_index`, where `distance`
/// is the JTS-style "edge distance" metric (monotone along the segment, not
/// true Euclidean length — sufficient for ordering nodes on a segment,
/// never compared across segments).
#[derive(Clone, Copy, Debug)]
pub struct SegmentNode {
    pub coordinate: Coord,
    pub segment_index: usize,
    pub distance: f64,
}

impl SegmentNode {
    fn sort_key(&self) -> (usize, u64) {
        (self.segment_index, self.distance.to_bits())
    }
}

impl PartialEq for SegmentNode {
    fn eq(&self, other: &Self) -> bool {
        self.segment_index == other.segment_index && self.distance == other.distance
    }
}
impl Eq for SegmentNode {}
impl PartialOrd for SegmentNode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for SegmentNode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// A [`SegmentString`] that has accumulated intersection nodes during
/// noding and can emit the substrings the nodes split it into.
#[derive(Clone, Debug)]
pub struct NodedSegmentString<C> {
    inner: SegmentString<C>,
    nodes: BTreeSet<SegmentNode>,
}

impl<C> NodedSegmentString<C> {
    pub fn new(coords: Vec<Coord>, context: C) -> Self {
        let inner = SegmentString::new(coords, context);
        let mut s = NodedSegmentString {
            inner,
            nodes: BTreeSet::new(),
        };
        s.add_endpoint_nodes();
        s
    }

    fn add_endpoint_nodes(&mut self) {
        let last_segment = self.inner.segment_count() - 1;
        self.nodes.insert(SegmentNode {
            coordinate: self.inner.coords[0],
            segment_index: 0,
            distance: 0.0,
        });
        self.nodes.insert(SegmentNode {
            coordinate: *self.inner.coords.last().unwrap(),
            segment_index: last_segment,
            distance: 0.0,
        });
    }

    pub fn coords(&self) -> &[Coord] {
        self.inner.coords()
    }

    pub fn context(&self) -> &C {
        &self.inner.context
    }

    pub fn segment_count(&self) -> usize {
        self.inner.segment_count()
    }

    /// Records an intersection at `coordinate` on segment `segment_index`.
    /// Idempotent for the same `(coordinate, segment_index)` pair (modulo
    /// the endpoint-canonicalization below). If `coordinate` coincides with
    /// the *next* segment's start vertex, the node is renormalized onto
    /// that segment instead, so a vertex-touching intersection always ends
    /// up attributed to the segment whose start is the vertex — the same
    /// coordinate recorded from either adjacent segment collapses to one
    /// node.
    pub fn add_intersection(&mut self, coordinate: Coord, segment_index: usize) {
        let mut normalized_index = segment_index;
        let mut distance = edge_distance(coordinate, self.inner.coords[segment_index], self.inner.coords[segment_index + 1]);

        let next_index = normalized_index + 1;
        if next_index < self.inner.segment_count() && coordinate == self.inner.coords[next_index] {
            normalized_index = next_index;
            distance = 0.0;
        }

        self.nodes.insert(SegmentNode {
            coordinate,
            segment_index: normalized_index,
            distance,
        });
    }

    pub fn nodes(&self) -> impl Iterator<Item = &SegmentNode> {
        self.nodes.iter()
    }

    /// Splits the path at every recorded node, emitting a fresh coordinate
    /// sequence per substring. Repeated endpoint coordinates between
    /// adjacent substrings (the shared node) are preserved on both sides,
    /// as required to keep each substring independently walkable.
    pub fn noded_substrings(&self) -> Vec<Vec<Coord>> {
        let ordered: Vec<&SegmentNode> = self.nodes.iter().collect();
        let mut substrings = Vec::new();

        for window in ordered.windows(2) {
            let (start, end) = (window[0], window[1]);
            if start.coordinate == end.coordinate && start.segment_index == end.segment_index {
                continue;
            }
            let mut coords = vec![start.coordinate];
            for seg in start.segment_index + 1..=end.segment_index {
                if seg == end.segment_index {
                    break;
                }
                coords.push(self.inner.coords[seg]);
            }
            coords.push(end.coordinate);
            substrings.push(coords);
        }
        substrings
    }
}

fn edge_distance(p: Coord, seg_start: Coord, seg_end: Coord) -> f64 {
    if p == seg_start {
        return 0.0;
    }
    let dx = (seg_end.x - seg_start.x).abs();
    let dy = (seg_end.y - seg_start.y).abs();
    let pdx = (p.x - seg_start.x).abs();
    let pdy = (p.y - seg_start.y).abs();
    if dx > dy {
        pdx
    } else {
        pdy
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn idempotent_add_intersection() {
        let mut s = NodedSegmentString::new(
            vec![Coord::new(0.0, 0.0), Coord::new(10.0, 0.0), Coord::new(10.0, 10.0)],
            (),
        );
        s.add_intersection(Coord::new(5.0, 0.0), 0);
        s.add_intersection(Coord::new(5.0, 0.0), 0);
        assert_eq!(s.nodes().count(), 3); // two endpoints + the one new node
    }

    #[test]
    fn vertex_touching_intersection_normalizes_to_next_segment() {
        let mut s = NodedSegmentString::new(
            vec![Coord::new(0.0, 0.0), Coord::new(10.0, 0.0), Coord::new(10.0, 10.0)],
            (),
        );
        // Recorded against segment 0 but coincides with the start of segment 1.
        s.add_intersection(Coord::new(10.0, 0.0), 0);
        let nodes: Vec<_> = s.nodes().collect();
        assert_eq!(nodes.len(), 2); // just the two endpoints; vertex already present
    }

    #[test]
    fn splits_at_recorded_nodes() {
        let mut s = NodedSegmentString::new(
            vec![Coord::new(0.0, 0.0), Coord::new(10.0, 0.0), Coord::new(10.0, 10.0)],
            (),
        );
        s.add_intersection(Coord::new(5.0, 0.0), 0);
        let subs = s.noded_substrings();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0], vec![Coord::new(0.0, 0.0), Coord::new(5.0, 0.0)]);
        assert_eq!(subs[1], vec![Coord::new(5.0, 0.0), Coord::new(10.0, 0.0), Coord::new(10.0, 10.0)]);
    }
}
