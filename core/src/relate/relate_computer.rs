use std::collections::HashSet;

use topo2d_types::{Coord, Geometry, GeometryDimension};

use crate::index::HalfEdgeGraph;
use crate::kernels::{is_in_ring, is_on_line, Location};
use crate::noding::{McIndexNoder, NodedSegmentString, Noder};
use crate::overlay::{representative_point, signed_area2, trace_faces};

use super::boundary_node_rule::BoundaryNodeRule;
use super::dimensions::Dimensions;
use super::intersection_matrix::IntersectionMatrix;
use super::locate::locate_point;

/// Computes the full DE-9IM matrix between two geometries.
///
/// Per the relate procedure's noding step, A's and B's linework is first
/// noded together with a single [`McIndexNoder`] pass, so every actual
/// crossing between the two inputs becomes an explicit shared vertex before
/// any classification happens — not just the inputs' own original vertices.
/// The noded vertices and the midpoints of the resulting (already-split)
/// segments are then classified against both geometries and folded into the
/// matrix with [`IntersectionMatrix::set_at_least`]. For the area-
/// dimensional cells, a cheap own-vertex-inside-the-other check is tried
/// first; if that's inconclusive (interiors overlap without either polygon
/// having a vertex inside the other, e.g. two crossing rectangles), the
/// noded arrangement's faces are traced and each face's representative
/// point is classified, which catches interior overlap regardless of
/// vertex placement.
pub struct RelateComputer {
    pub boundary_node_rule: BoundaryNodeRule,
}

impl Default for RelateComputer {
    fn default() -> Self {
        RelateComputer {
            boundary_node_rule: BoundaryNodeRule::Mod2,
        }
    }
}

impl RelateComputer {
    pub fn new(boundary_node_rule: BoundaryNodeRule) -> Self {
        RelateComputer { boundary_node_rule }
    }

    pub fn relate(&self, a: &Geometry, b: &Geometry) -> IntersectionMatrix {
        let mut matrix = IntersectionMatrix::empty();

        if a.is_empty() || b.is_empty() {
            return matrix;
        }

        if !a.envelope().intersects_envelope(&b.envelope()) {
            self.fill_exterior_only(a, b, &mut matrix);
            return matrix;
        }

        // Exterior contributions: every geometry's exterior is "everything
        // else", so once interior/boundary cells are filled in, the
        // exterior-interior and exterior-boundary cells record whichever
        // geometry extends past the other. These are captured implicitly by
        // the witness loop below never touching them; the only thing left
        // to ensure is that a geometry entirely outside the other's
        // interior still gets its Exterior/Exterior area recorded, which is
        // always true (Dimensions::Empty is the matrix's initial state and
        // area-area exterior/exterior cells are never meaningfully used by
        // named predicates).

        let mut edges: Vec<NodedSegmentString<()>> = Vec::new();
        extract_edges(a, &mut edges);
        extract_edges(b, &mut edges);
        let noded = McIndexNoder::new().node(edges).unwrap_or_default();

        let mut witnesses: Vec<Coord> = self.witness_points(a);
        witnesses.extend(self.witness_points(b));
        for s in &noded {
            witnesses.extend_from_slice(s.coords());
        }
        let mut seen = HashSet::new();
        witnesses.retain(|c| seen.insert((c.x.to_bits(), c.y.to_bits())));

        for &p in &witnesses {
            let loc_a = locate_point(p, a, self.boundary_node_rule);
            let loc_b = locate_point(p, b, self.boundary_node_rule);
            matrix.set_at_least(loc_a, loc_b, Dimensions::ZeroDimensional);
        }

        for (mid, loc_a, loc_b) in self.linear_midpoint_witnesses(a, b, &noded) {
            let _ = mid;
            matrix.set_at_least(loc_a, loc_b, Dimensions::OneDimensional);
        }

        if a.dimension() == GeometryDimension::Area && b.dimension() == GeometryDimension::Area {
            self.fill_area_overlap(a, b, &noded, &mut matrix);
        } else if a.dimension() == GeometryDimension::Area {
            matrix.set_at_least(Location::Interior, Location::Interior, self.dominant_dim_in_area(b, a));
        } else if b.dimension() == GeometryDimension::Area {
            matrix.set_at_least(Location::Interior, Location::Interior, self.dominant_dim_in_area(a, b));
        }

        self.fill_self_interior_baseline(a, b, &mut matrix);
        matrix
    }

    fn fill_exterior_only(&self, a: &Geometry, b: &Geometry, matrix: &mut IntersectionMatrix) {
        self.fill_self_interior_baseline(a, b, matrix);
    }

    /// Sets the diagonal-ish "a geometry's own interior/boundary exists"
    /// cells against the other geometry's exterior, for any dimension not
    /// already covered above — this is what makes `FF*FF****`-style
    /// disjoint patterns and one-sided containment patterns resolve
    /// correctly even when the geometries don't intersect at all.
    fn fill_self_interior_baseline(&self, a: &Geometry, b: &Geometry, matrix: &mut IntersectionMatrix) {
        let dim_a = self_dimension(a);
        let dim_b = self_dimension(b);
        matrix.set_at_least(Location::Interior, Location::Exterior, dim_a);
        matrix.set_at_least(Location::Exterior, Location::Interior, dim_b);
        if has_boundary(a) {
            matrix.set_at_least(Location::Boundary, Location::Exterior, boundary_dimension(a));
        }
        if has_boundary(b) {
            matrix.set_at_least(Location::Exterior, Location::Boundary, boundary_dimension(b));
        }
    }

    fn dominant_dim_in_area(&self, linear_or_point: &Geometry, area: &Geometry) -> Dimensions {
        let witnesses = self.witness_points(linear_or_point);
        let any_interior = witnesses.iter().any(|&p| locate_point(p, area, self.boundary_node_rule) == Location::Interior);
        if any_interior {
            match linear_or_point.dimension() {
                GeometryDimension::Point => Dimensions::ZeroDimensional,
                _ => Dimensions::OneDimensional,
            }
        } else {
            Dimensions::Empty
        }
    }

    fn fill_area_overlap(&self, a: &Geometry, b: &Geometry, noded: &[NodedSegmentString<()>], matrix: &mut IntersectionMatrix) {
        let a_witnesses = self.witness_points(a);
        let b_witnesses = self.witness_points(b);

        let a_interior_in_b = a_witnesses.iter().any(|&p| locate_point(p, b, self.boundary_node_rule) == Location::Interior);
        let b_interior_in_a = b_witnesses.iter().any(|&p| locate_point(p, a, self.boundary_node_rule) == Location::Interior);

        if a_interior_in_b || b_interior_in_a {
            matrix.set_at_least(Location::Interior, Location::Interior, Dimensions::TwoDimensional);
            return;
        }

        // Neither polygon has a vertex strictly inside the other: either
        // disjoint, or their interiors overlap without either contributing
        // a vertex to the overlap region at all (e.g. two crossing
        // rectangles forming a plus shape, or strict containment with no
        // shared vertex). Trace the faces of the noded arrangement and test
        // each face's representative point against both inputs — this
        // finds an interior witness regardless of where the two boundaries
        // actually cross.
        let mut graph = HalfEdgeGraph::new();
        for s in noded {
            for w in s.coords().windows(2) {
                if w[0] != w[1] {
                    graph.add_edge(w[0], w[1]);
                }
            }
        }
        for face in trace_faces(&graph) {
            if signed_area2(&face) <= 0.0 {
                continue;
            }
            let p = representative_point(&face);
            if locate_point(p, a, self.boundary_node_rule) == Location::Interior
                && locate_point(p, b, self.boundary_node_rule) == Location::Interior
            {
                matrix.set_at_least(Location::Interior, Location::Interior, Dimensions::TwoDimensional);
                return;
            }
        }
    }

    /// Every distinct vertex of `geometry`'s linework, deduplicated by bit
    /// pattern.
    fn witness_points(&self, geometry: &Geometry) -> Vec<Coord> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        collect_vertices(geometry, &mut |c| {
            let key = (c.x.to_bits(), c.y.to_bits());
            if seen.insert(key) {
                out.push(c);
            }
        });
        out
    }

    /// Midpoints of every already-noded segment contributed by either `a`
    /// or `b`, classified by location in both, used as 1-dimensional
    /// witnesses for line/line and line/area interior overlap. Using the
    /// post-noding segments (rather than the original, unnoded ones)
    /// matters whenever the two inputs cross: a midpoint of an original
    /// segment can straddle a crossing and land on the wrong side of the
    /// other geometry, but a midpoint of a segment that's already been
    /// split at every crossing cannot.
    fn linear_midpoint_witnesses(&self, a: &Geometry, b: &Geometry, noded: &[NodedSegmentString<()>]) -> Vec<(Coord, Location, Location)> {
        let mut out = Vec::new();
        for s in noded {
            for w in s.coords().windows(2) {
                let mid = Coord::new((w[0].x + w[1].x) / 2.0, (w[0].y + w[1].y) / 2.0);
                let loc_a = self.locate_on_linework(mid, a);
                let loc_b = self.locate_on_linework(mid, b);
                if loc_a == Location::Interior || loc_b == Location::Interior {
                    out.push((mid, loc_a, loc_b));
                }
            }
        }
        out
    }

    /// Classifies `p` as `Interior` if it lies strictly on the linework of
    /// `geometry` (not at a boundary-rule vertex), else defers to the
    /// ordinary area/point classification.
    fn locate_on_linework(&self, p: Coord, geometry: &Geometry) -> Location {
        match geometry {
            Geometry::LineString(ls) => {
                if is_on_line(p, ls.coords().as_slice()) {
                    Location::Interior
                } else {
                    Location::Exterior
                }
            }
            Geometry::LinearRing(lr) => {
                if is_on_line(p, lr.coords().as_slice()) {
                    Location::Interior
                } else {
                    Location::Exterior
                }
            }
            Geometry::MultiLineString(mls) => {
                if mls.0.iter().any(|ls| is_on_line(p, ls.coords().as_slice())) {
                    Location::Interior
                } else {
                    Location::Exterior
                }
            }
            Geometry::Polygon(poly) => {
                if is_on_line(p, poly.shell.coords().as_slice()) || poly.holes.iter().any(|h| is_on_line(p, h.coords().as_slice())) {
                    Location::Boundary
                } else if is_in_ring(p, poly.shell.coords().as_slice()) {
                    Location::Interior
                } else {
                    Location::Exterior
                }
            }
            Geometry::MultiPolygon(mp) => {
                for poly in &mp.0 {
                    let loc = self.locate_on_linework(p, &Geometry::Polygon(poly.clone()));
                    if loc != Location::Exterior {
                        return loc;
                    }
                }
                Location::Exterior
            }
            _ => locate_point(p, geometry, self.boundary_node_rule),
        }
    }
}

fn self_dimension(g: &Geometry) -> Dimensions {
    match g.dimension() {
        GeometryDimension::Empty => Dimensions::Empty,
        GeometryDimension::Point => Dimensions::ZeroDimensional,
        GeometryDimension::Line => Dimensions::OneDimensional,
        GeometryDimension::Area => Dimensions::TwoDimensional,
    }
}

fn has_boundary(g: &Geometry) -> bool {
    !matches!(g, Geometry::Point(_) | Geometry::MultiPoint(_))
}

fn boundary_dimension(g: &Geometry) -> Dimensions {
    match g {
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Dimensions::OneDimensional,
        Geometry::LineString(_) | Geometry::LinearRing(_) | Geometry::MultiLineString(_) => Dimensions::ZeroDimensional,
        _ => Dimensions::Empty,
    }
}

fn collect_vertices(geometry: &Geometry, visit: &mut impl FnMut(Coord)) {
    match geometry {
        Geometry::Point(p) => visit(p.0),
        Geometry::MultiPoint(mp) => mp.0.iter().for_each(|p| visit(p.0)),
        Geometry::LineString(ls) => ls.coords().iter().for_each(|&c| visit(c)),
        Geometry::LinearRing(lr) => lr.coords().iter().for_each(|&c| visit(c)),
        Geometry::MultiLineString(mls) => mls.0.iter().for_each(|ls| ls.coords().iter().for_each(|&c| visit(c))),
        Geometry::Polygon(poly) => {
            poly.shell.coords().iter().for_each(|&c| visit(c));
            poly.holes.iter().for_each(|h| h.coords().iter().for_each(|&c| visit(c)));
        }
        Geometry::MultiPolygon(mp) => mp.0.iter().for_each(|poly| collect_vertices(&Geometry::Polygon(poly.clone()), visit)),
        Geometry::GeometryCollection(gc) => gc.0.iter().for_each(|g| collect_vertices(g, visit)),
        Geometry::Curved(_) => {}
    }
}

/// Extracts every linear component of `geometry` (polygon rings, line
/// strings) as a [`NodedSegmentString`] to be noded together with the other
/// operand's edges. Point and multipoint components contribute no edges —
/// they're picked up as plain vertex witnesses instead.
fn extract_edges(geometry: &Geometry, out: &mut Vec<NodedSegmentString<()>>) {
    let mut push = |coords: &[Coord]| {
        if coords.len() >= 2 {
            out.push(NodedSegmentString::new(coords.to_vec(), ()));
        }
    };
    match geometry {
        Geometry::LineString(ls) => push(ls.coords().as_slice()),
        Geometry::LinearRing(lr) => push(lr.coords().as_slice()),
        Geometry::MultiLineString(mls) => mls.0.iter().for_each(|ls| push(ls.coords().as_slice())),
        Geometry::Polygon(poly) => {
            push(poly.shell.coords().as_slice());
            poly.holes.iter().for_each(|h| push(h.coords().as_slice()));
        }
        Geometry::MultiPolygon(mp) => mp.0.iter().for_each(|poly| extract_edges(&Geometry::Polygon(poly.clone()), out)),
        Geometry::GeometryCollection(gc) => gc.0.iter().for_each(|g| extract_edges(g, out)),
        _ => {}
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use topo2d_types::{CoordinateSequence, LineString, LinearRing, Point, Polygon};

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
    fn disjoint_polygons() {
        let a = Geometry::Polygon(square(0.0, 0.0, 1.0, 1.0));
        let b = Geometry::Polygon(square(10.0, 10.0, 11.0, 11.0));
        let m = RelateComputer::default().relate(&a, &b);
        assert!(m.is_disjoint());
    }

    #[test]
    fn overlapping_polygons_share_interior() {
        let a = Geometry::Polygon(square(0.0, 0.0, 2.0, 2.0));
        let b = Geometry::Polygon(square(1.0, 1.0, 3.0, 3.0));
        let m = RelateComputer::default().relate(&a, &b);
        assert_eq!(m.get(Location::Interior, Location::Interior), Dimensions::TwoDimensional);
        assert!(m.is_intersects());
    }

    #[test]
    fn identical_polygons_are_topologically_equal() {
        let a = Geometry::Polygon(square(0.0, 0.0, 2.0, 2.0));
        let b = Geometry::Polygon(square(0.0, 0.0, 2.0, 2.0));
        let m = RelateComputer::default().relate(&a, &b);
        assert!(m.is_equal_topo());
    }

    #[test]
    fn point_on_boundary_of_polygon() {
        let a = Geometry::Point(Point(Coord::new(0.0, 1.0)));
        let b = Geometry::Polygon(square(0.0, 0.0, 2.0, 2.0));
        let m = RelateComputer::default().relate(&a, &b);
        assert_eq!(m.get(Location::Interior, Location::Boundary), Dimensions::ZeroDimensional);
    }

    #[test]
    fn contained_polygon_without_shared_vertex() {
        let a = Geometry::Polygon(square(1.0, 1.0, 2.0, 2.0));
        let b = Geometry::Polygon(square(0.0, 0.0, 5.0, 5.0));
        let m = RelateComputer::default().relate(&a, &b);
        assert!(m.is_within());
    }

    #[test]
    fn line_crossing_polygon() {
        let a = Geometry::LineString(LineString(CoordinateSequence::xy(vec![Coord::new(-1.0, 1.0), Coord::new(3.0, 1.0)])));
        let b = Geometry::Polygon(square(0.0, 0.0, 2.0, 2.0));
        let m = RelateComputer::default().relate(&a, &b);
        assert_eq!(m.get(Location::Interior, Location::Interior), Dimensions::OneDimensional);
        assert_eq!(m.get(Location::Interior, Location::Exterior), Dimensions::OneDimensional);
    }

    #[test]
    fn crossing_lines_with_no_shared_vertex_intersect() {
        let a = Geometry::LineString(LineString(CoordinateSequence::xy(vec![Coord::new(0.0, 0.0), Coord::new(12.0, 0.0)])));
        let b = Geometry::LineString(LineString(CoordinateSequence::xy(vec![Coord::new(5.0, -5.0), Coord::new(5.0, 3.0)])));
        let m = RelateComputer::default().relate(&a, &b);
        assert_eq!(m.get(Location::Interior, Location::Interior), Dimensions::ZeroDimensional);
        assert!(m.is_intersects());
    }

    #[test]
    fn plus_shaped_polygons_overlap_without_a_shared_vertex() {
        let a = Geometry::Polygon(square(-5.0, -1.0, 5.0, 1.0));
        let b = Geometry::Polygon(square(-1.0, -5.0, 1.0, 5.0));
        let m = RelateComputer::default().relate(&a, &b);
        assert_eq!(m.get(Location::Interior, Location::Interior), Dimensions::TwoDimensional);
        assert!(m.is_intersects());
    }
}
