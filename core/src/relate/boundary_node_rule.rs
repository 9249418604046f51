/// Determines which vertices of a linear geometry count as its boundary,
/// for geometries made of possibly many component lines that may share
/// endpoints.
///
/// The different rules diverge only on how many incident line ends at a
/// vertex make it a boundary point; all of them agree that an isolated
/// endpoint (degree 1) is a boundary point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryNodeRule {
    /// OGC SFS rule: a vertex is boundary iff an odd number of line ends
    /// meet there. The default for every predicate in this crate.
    #[default]
    Mod2,
    /// Every endpoint of every component line is boundary, regardless of
    /// how many coincide.
    Endpoint,
    /// A vertex is boundary iff exactly one line end meets there.
    MonovalentEndpoint,
    /// A vertex is boundary iff two or more line ends meet there.
    MultivalentEndpoint,
}

impl BoundaryNodeRule {
    /// Whether a vertex where `degree` line ends meet counts as boundary.
    pub fn is_boundary(self, degree: usize) -> bool {
        match self {
            BoundaryNodeRule::Mod2 => degree % 2 == 1,
            BoundaryNodeRule::Endpoint => degree >= 1,
            BoundaryNodeRule::MonovalentEndpoint => degree == 1,
            BoundaryNodeRule::MultivalentEndpoint => degree >= 2,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mod2_treats_even_meeting_point_as_interior() {
        assert!(!BoundaryNodeRule::Mod2.is_boundary(2));
        assert!(BoundaryNodeRule::Mod2.is_boundary(1));
        assert!(BoundaryNodeRule::Mod2.is_boundary(3));
    }

    #[test]
    fn endpoint_rule_always_counts_termini() {
        assert!(BoundaryNodeRule::Endpoint.is_boundary(1));
        assert!(BoundaryNodeRule::Endpoint.is_boundary(4));
    }
}
