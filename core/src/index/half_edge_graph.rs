use std::collections::HashMap;

use topo2d_types::Coord;

/// Index of a half-edge in a [`HalfEdgeGraph`]'s arena.
///
/// Half-edges are always allocated in twin pairs at indices `2k` and
/// `2k + 1`; `sym()` is therefore just `index ^ 1`, not a stored pointer.
/// This is the arena-plus-integer-index redesign in place of the
/// pointer-cycle representation a naive port would reach for: no `Rc`,
/// no `RefCell`, and cloning the whole graph is a single `Vec` copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HalfEdgeId(pub u32);

#[derive(Clone, Debug)]
struct HalfEdgeRecord {
    origin: Coord,
    /// Next half-edge counter-clockwise around `origin`.
    next_around_origin: HalfEdgeId,
    /// Next half-edge of the face to the left of this one.
    next_in_face: HalfEdgeId,
}

/// An oriented-edge graph: for every undirected edge between two distinct
/// vertices, a pair of opposing directed half-edges, linked into a
/// counter-clockwise ring around each shared vertex.
///
/// Invariants maintained by construction:
/// 1. `sym(sym(e)) == e`.
/// 2. `origin_ring_next(e)` walks strictly counter-clockwise around `e`'s
///    origin by the polar angle of each edge's destination.
/// 3. `face_next(e)` walks the face boundary to the left of `e`.
#[derive(Clone, Debug, Default)]
pub struct HalfEdgeGraph {
    edges: Vec<HalfEdgeRecord>,
    /// One outgoing half-edge per distinct vertex coordinate.
    vertex_edge: HashMap<CoordKey, HalfEdgeId>,
}

// `Coord` isn't `Eq`/`Hash` (it carries `f64`s); vertices are always
// pre-snapped through a precision model by the time they reach the graph,
// so bit-pattern equality is exactly the 2D equality the graph needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct CoordKey(u64, u64);

fn key(c: Coord) -> CoordKey {
    CoordKey(c.x.to_bits(), c.y.to_bits())
}

impl HalfEdgeGraph {
    pub fn new() -> Self {
        HalfEdgeGraph::default()
    }

    pub fn origin(&self, e: HalfEdgeId) -> Coord {
        self.edges[e.0 as usize].origin
    }

    pub fn destination(&self, e: HalfEdgeId) -> Coord {
        self.origin(self.sym(e))
    }

    pub fn sym(&self, e: HalfEdgeId) -> HalfEdgeId {
        HalfEdgeId(e.0 ^ 1)
    }

    /// The next edge counter-clockwise around `e`'s origin.
    pub fn o_next(&self, e: HalfEdgeId) -> HalfEdgeId {
        self.edges[e.0 as usize].next_around_origin
    }

    /// The next edge of the face bounded to the left of `e`: `sym(o_next(sym(e)))`
    /// in general half-edge formulations, computed directly here since we
    /// maintain `next_in_face` explicitly during insertion.
    pub fn next(&self, e: HalfEdgeId) -> HalfEdgeId {
        self.edges[e.0 as usize].next_in_face
    }

    pub fn degree(&self, origin: Coord) -> usize {
        match self.vertex_edge.get(&key(origin)) {
            None => 0,
            Some(&start) => {
                let mut count = 1;
                let mut e = self.o_next(start);
                while e != start {
                    count += 1;
                    e = self.o_next(e);
                }
                count
            }
        }
    }

    pub fn edges_from(&self, origin: Coord) -> Vec<HalfEdgeId> {
        match self.vertex_edge.get(&key(origin)) {
            None => Vec::new(),
            Some(&start) => {
                let mut out = vec![start];
                let mut e = self.o_next(start);
                while e != start {
                    out.push(e);
                    e = self.o_next(e);
                }
                out
            }
        }
    }

    /// Every allocated half-edge id, in allocation order (twin pairs
    /// adjacent). Used by algorithms that need to visit every half-edge
    /// exactly once, such as face tracing during overlay.
    pub fn all_half_edge_ids(&self) -> Vec<HalfEdgeId> {
        (0..self.edges.len() as u32).map(HalfEdgeId).collect()
    }

    pub fn vertices(&self) -> impl Iterator<Item = Coord> + '_ {
        self.vertex_edge
            .keys()
            .map(|k| Coord::new(f64::from_bits(k.0), f64::from_bits(k.1)))
    }

    /// Adds an undirected edge between `orig` and `dest`, creating both
    /// endpoints if new, and splices the new half-edge pair into each
    /// endpoint's counter-clockwise ring ordered by the polar angle of the
    /// edge's destination. Returns the half-edge with origin `orig`.
    pub fn add_edge(&mut self, orig: Coord, dest: Coord) -> HalfEdgeId {
        let e0 = HalfEdgeId(self.edges.len() as u32);
        let e1 = HalfEdgeId(self.edges.len() as u32 + 1);
        self.edges.push(HalfEdgeRecord {
            origin: orig,
            next_around_origin: e0,
            next_in_face: e1,
        });
        self.edges.push(HalfEdgeRecord {
            origin: dest,
            next_around_origin: e1,
            next_in_face: e0,
        });

        self.insert_at_vertex(orig, e0);
        self.insert_at_vertex(dest, e1);
        e0
    }

    fn insert_at_vertex(&mut self, vertex: Coord, e: HalfEdgeId) {
        let k = key(vertex);
        match self.vertex_edge.get(&k).copied() {
            None => {
                self.vertex_edge.insert(k, e);
                // already a self-loop: next_around_origin == e, set above.
            }
            Some(existing) => {
                // Insert `e` into the CCW ring at `vertex` in polar-angle
                // order of destinations. Walk the ring until we find the
                // gap `e`'s angle falls into, wrapping past the maximum
                // angle back to `existing`.
                let e_angle = polar_angle(vertex, self.destination(e));
                let mut prev = existing;
                loop {
                    let cur = self.o_next(prev);
                    let prev_angle = polar_angle(vertex, self.destination(prev));
                    let cur_angle = polar_angle(vertex, self.destination(cur));
                    let at_wrap_point = cur == existing; // completed the ring
                    let wraps = prev_angle > cur_angle;
                    let fits = if at_wrap_point {
                        true
                    } else if wraps {
                        e_angle > prev_angle || e_angle < cur_angle
                    } else {
                        e_angle > prev_angle && e_angle < cur_angle
                    };
                    if fits {
                        self.edges[prev.0 as usize].next_around_origin = e;
                        self.edges[e.0 as usize].next_around_origin = cur;
                        break;
                    }
                    prev = cur;
                }
                let smallest_angle = polar_angle(vertex, self.destination(self.vertex_edge[&k]));
                if e_angle < smallest_angle {
                    self.vertex_edge.insert(k, e);
                }
            }
        }
    }
}

fn polar_angle(origin: Coord, dest: Coord) -> f64 {
    (dest.y - origin.y).atan2(dest.x - origin.x)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sym_is_involution() {
        let mut g = HalfEdgeGraph::new();
        let e = g.add_edge(Coord::new(0.0, 0.0), Coord::new(1.0, 0.0));
        assert_eq!(g.sym(g.sym(e)), e);
        assert_ne!(g.sym(e), e);
    }

    #[test]
    fn destination_is_sym_origin() {
        let mut g = HalfEdgeGraph::new();
        let orig = Coord::new(0.0, 0.0);
        let dest = Coord::new(1.0, 1.0);
        let e = g.add_edge(orig, dest);
        assert_eq!(g.destination(e), dest);
        assert_eq!(g.origin(g.sym(e)), dest);
    }

    #[test]
    fn ring_around_vertex_is_ccw_ordered() {
        let mut g = HalfEdgeGraph::new();
        let center = Coord::new(0.0, 0.0);
        // Add spokes out of order; the ring should still come back sorted
        // by polar angle.
        g.add_edge(center, Coord::new(1.0, 0.0)); // angle 0
        g.add_edge(center, Coord::new(0.0, 1.0)); // angle pi/2
        g.add_edge(center, Coord::new(-1.0, 0.0)); // angle pi
        g.add_edge(center, Coord::new(0.0, -1.0)); // angle -pi/2

        let ring = g.edges_from(center);
        assert_eq!(ring.len(), 4);
        let angles: Vec<f64> = ring.iter().map(|&e| polar_angle(center, g.destination(e))).collect();
        let mut sorted = angles.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(angles, sorted);
    }
}
