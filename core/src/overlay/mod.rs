//! Polygon-polygon set operations computed over a noded planar arrangement:
//! node both inputs' rings together, trace the arrangement's faces from
//! the resulting half-edge graph, and keep whichever faces each operator's
//! membership rule selects.
//!
//! Only polygon/polygon inputs are supported; point and line overlay are
//! out of scope for this core (see `DESIGN.md`).

pub mod overlay_label;

use std::collections::HashSet;

use topo2d_types::{Coord, CoordinateSequence, LinearRing, MultiPolygon, Polygon, PrecisionModel};

use crate::error::Result;
use crate::index::{HalfEdgeGraph, HalfEdgeId};
use crate::noding::{McIndexNoder, NodedSegmentString, Noder, SnapRoundingNoder};
use crate::relate::locate::locate_in_polygon;

pub use overlay_label::{Membership, OverlayLabel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayOp {
    Intersection,
    Union,
    Difference,
    SymDifference,
}

/// Computes `op(a, b)` under `precision_model`. `Fixed` models route through
/// the snap-rounding noder (guaranteed termination on a finite grid);
/// `Floating`/`FloatingSingle` use the plain MC-index noder, which is
/// sufficient once both inputs are already noded against each other (no
/// near-miss tolerance snapping is applied here — see `DESIGN.md`).
pub fn overlay(a: &Polygon, b: &Polygon, op: OverlayOp, precision_model: PrecisionModel) -> Result<MultiPolygon> {
    if a.is_empty() && b.is_empty() {
        return Ok(MultiPolygon(Vec::new()));
    }

    let mut rings: Vec<NodedSegmentString<()>> = Vec::new();
    for ring in std::iter::once(&a.shell).chain(a.holes.iter()) {
        if !ring.is_empty() {
            rings.push(NodedSegmentString::new(ring.coords().as_slice().to_vec(), ()));
        }
    }
    for ring in std::iter::once(&b.shell).chain(b.holes.iter()) {
        if !ring.is_empty() {
            rings.push(NodedSegmentString::new(ring.coords().as_slice().to_vec(), ()));
        }
    }

    let noded = if precision_model.is_floating() {
        McIndexNoder::new().node(rings)?
    } else {
        SnapRoundingNoder::new(precision_model).node(rings)?
    };

    let mut graph = HalfEdgeGraph::new();
    for string in &noded {
        let coords = string.coords();
        for w in coords.windows(2) {
            if w[0] != w[1] {
                graph.add_edge(w[0], w[1]);
            }
        }
    }

    let faces = trace_faces(&graph);

    let mut kept_rings = Vec::new();
    for face in faces {
        let area2 = signed_area2(&face);
        if area2 <= 0.0 {
            continue; // CW trace: the outer/unbounded side of a component
        }
        let sample = representative_point(&face);
        let label = OverlayLabel {
            in_a: Membership::from_location(locate_in_polygon(sample, a)),
            in_b: Membership::from_location(locate_in_polygon(sample, b)),
        };
        if label.keep_for(op) {
            kept_rings.push(face);
        }
    }

    let polygons = kept_rings
        .into_iter()
        .filter_map(|mut coords| {
            coords.push(coords[0]);
            LinearRing::try_new(CoordinateSequence::xy(coords)).ok().map(|shell| Polygon::new(shell, Vec::new()))
        })
        .collect();

    Ok(MultiPolygon(polygons))
}

/// Traces every face of the arrangement by following `face_next` (the
/// correct next-edge-of-the-left-face rule, computed on the fly from the
/// graph's per-vertex CCW rotation) until each half-edge has been visited
/// exactly once.
pub(crate) fn trace_faces(graph: &HalfEdgeGraph) -> Vec<Vec<Coord>> {
    let mut visited: HashSet<HalfEdgeId> = HashSet::new();
    let mut faces = Vec::new();

    let all_edges = graph.all_half_edge_ids();
    for &start in &all_edges {
        if visited.contains(&start) {
            continue;
        }
        let mut face = Vec::new();
        let mut e = start;
        loop {
            face.push(graph.origin(e));
            visited.insert(e);
            e = face_next(graph, e);
            if e == start {
                break;
            }
            if visited.contains(&e) {
                // Would only happen on a malformed graph; bail rather than loop.
                break;
            }
        }
        if face.len() >= 3 {
            faces.push(face);
        }
    }
    faces
}

/// The next half-edge along the face to the left of `e`: the edge
/// immediately preceding `sym(e)` in the counter-clockwise rotation around
/// `sym(e)`'s origin.
pub(crate) fn face_next(graph: &HalfEdgeGraph, e: HalfEdgeId) -> HalfEdgeId {
    let twin = graph.sym(e);
    let mut cur = twin;
    loop {
        let next = graph.o_next(cur);
        if next == twin {
            return cur;
        }
        cur = next;
    }
}

pub(crate) fn signed_area2(ring: &[Coord]) -> f64 {
    let mut area = 0.0;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        area += a.x * b.y - b.x * a.y;
    }
    area
}

pub(crate) fn representative_point(ring: &[Coord]) -> Coord {
    let n = ring.len() as f64;
    let x = ring.iter().map(|c| c.x).sum::<f64>() / n;
    let y = ring.iter().map(|c| c.y).sum::<f64>() / n;
    Coord::new(x, y)
}

#[cfg(test)]
mod test {
    use super::*;
    use topo2d_types::CoordinateSequence;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
        let shell = LinearRing::try_new(CoordinateSequence::xy(vec![
            Coord::new(x0, y0),
            Coord::new(x1, y0),
            Coord::new(x1, y1),
            Coord::new(x0, y1),
            Coord::new(x0, y0),
        ]))
        .unwrap();
        Polygon::new(shell, vec![])
    }

    #[test]
    fn intersection_of_overlapping_squares_is_the_overlap_area() {
        let a = square(0.0, 0.0, 2.0, 2.0);
        let b = square(1.0, 1.0, 3.0, 3.0);
        let result = overlay(&a, &b, OverlayOp::Intersection, PrecisionModel::default()).unwrap();
        assert_eq!(result.0.len(), 1);
        let area2 = signed_area2(result.0[0].shell.coords().as_slice());
        assert!((area2.abs() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn union_of_disjoint_squares_has_two_components() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(10.0, 10.0, 11.0, 11.0);
        let result = overlay(&a, &b, OverlayOp::Union, PrecisionModel::default()).unwrap();
        assert_eq!(result.0.len(), 2);
    }

    #[test]
    fn difference_removes_the_overlap() {
        let a = square(0.0, 0.0, 2.0, 2.0);
        let b = square(1.0, 0.0, 3.0, 2.0);
        let result = overlay(&a, &b, OverlayOp::Difference, PrecisionModel::default()).unwrap();
        assert_eq!(result.0.len(), 1);
        let area2 = signed_area2(result.0[0].shell.coords().as_slice());
        assert!((area2.abs() - 4.0).abs() < 1e-9);
    }
}
