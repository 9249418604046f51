use std::str::FromStr;

use crate::kernels::Location;

use super::dimensions::Dimensions;

fn index(loc: Location) -> usize {
    match loc {
        Location::Interior => 0,
        Location::Boundary => 1,
        Location::Exterior => 2,
    }
}

/// A DE-9IM matrix: the dimension of the intersection between every pairing
/// of {interior, boundary, exterior} of a first geometry with {interior,
/// boundary, exterior} of a second. Every named predicate (`intersects`,
/// `contains`, `touches`, ...) is ultimately a pattern test against one of
/// these.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct IntersectionMatrix([[Dimensions; 3]; 3]);

impl IntersectionMatrix {
    pub fn empty() -> Self {
        IntersectionMatrix([[Dimensions::Empty; 3]; 3])
    }

    pub fn get(&self, a: Location, b: Location) -> Dimensions {
        self.0[index(a)][index(b)]
    }

    pub fn set(&mut self, a: Location, b: Location, dim: Dimensions) {
        self.0[index(a)][index(b)] = dim;
    }

    /// Records that `a`/`b` intersect in at least `dim` dimensions, raising
    /// the cell only if `dim` exceeds what's already recorded there. Every
    /// witness the relate computation finds calls this rather than `set`,
    /// since a cell's true value is the maximum over every witness.
    pub fn set_at_least(&mut self, a: Location, b: Location, dim: Dimensions) {
        let cell = &mut self.0[index(a)][index(b)];
        if *cell < dim {
            *cell = dim;
        }
    }

    pub fn set_at_least_if_in_both(&mut self, a: Option<Location>, b: Option<Location>, dim: Dimensions) {
        if let (Some(a), Some(b)) = (a, b) {
            self.set_at_least(a, b, dim);
        }
    }

    pub fn to_code(self) -> String {
        let mut s = String::with_capacity(9);
        for a in [Location::Interior, Location::Boundary, Location::Exterior] {
            for b in [Location::Interior, Location::Boundary, Location::Exterior] {
                s.push(self.get(a, b).code());
            }
        }
        s
    }

    /// Tests `self` against a 9-character DE-9IM pattern: each position is
    /// either an exact code (`F`, `0`, `1`, `2`), `T` (anything but `F`), or
    /// `*` (don't care).
    pub fn matches(self, pattern: &str) -> bool {
        let code = self.to_code();
        if pattern.len() != 9 || code.len() != 9 {
            return false;
        }
        code.chars().zip(pattern.chars()).all(|(actual, want)| match want {
            '*' => true,
            'T' => actual != 'F',
            c => actual == c,
        })
    }

    pub fn is_disjoint(self) -> bool {
        self.matches("FF*FF****")
    }

    pub fn is_intersects(self) -> bool {
        !self.is_disjoint()
    }

    pub fn is_within(self) -> bool {
        self.matches("T*F**F***")
    }

    pub fn is_contains(self) -> bool {
        self.matches("T*****FF*")
    }

    pub fn is_covered_by(self) -> bool {
        self.matches("T*F**F***") || self.matches("*TF**F***") || self.matches("**FT*F***") || self.matches("**F*TF***")
    }

    pub fn is_covers(self) -> bool {
        self.matches("T*****FF*") || self.matches("*T****FF*") || self.matches("***T**FF*") || self.matches("****T*FF*")
    }

    pub fn is_equal_topo(self) -> bool {
        self.matches("T*F**FFF*")
    }

    pub fn is_overlaps(self, dim_a: Dimensions, dim_b: Dimensions) -> bool {
        if dim_a == Dimensions::TwoDimensional && dim_b == Dimensions::TwoDimensional {
            self.matches("T*T***T**")
        } else if dim_a == dim_b {
            self.matches("T*T***T**")
        } else {
            false
        }
    }

    pub fn is_touches(self, dim_a: Dimensions, dim_b: Dimensions) -> bool {
        let _ = (dim_a, dim_b);
        self.matches("FT*******") || self.matches("F**T*****") || self.matches("F***T****")
    }

    pub fn is_crosses(self, dim_a: Dimensions, dim_b: Dimensions) -> bool {
        match (dim_a, dim_b) {
            (Dimensions::OneDimensional, Dimensions::OneDimensional) => self.matches("0********"),
            (a, b) if a < b => self.matches("T*T******"),
            (a, b) if a > b => self.matches("T*****T**"),
            _ => false,
        }
    }
}

impl std::fmt::Debug for IntersectionMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IntersectionMatrix({})", self.to_code())
    }
}

impl FromStr for IntersectionMatrix {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 9 {
            return Err(format!("expected a 9-character DE-9IM code, found {} characters", s.len()));
        }
        let mut m = IntersectionMatrix::empty();
        let chars: Vec<char> = s.chars().collect();
        let mut i = 0;
        for a in [Location::Interior, Location::Boundary, Location::Exterior] {
            for b in [Location::Interior, Location::Boundary, Location::Exterior] {
                let dim = Dimensions::from_code(chars[i]).ok_or_else(|| format!("invalid DE-9IM code character '{}'", chars[i]))?;
                m.set(a, b, dim);
                i += 1;
            }
        }
        Ok(m)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trips_through_code() {
        let m: IntersectionMatrix = "212101212".parse().unwrap();
        assert_eq!(m.to_code(), "212101212");
    }

    #[test]
    fn set_at_least_only_raises() {
        let mut m = IntersectionMatrix::empty();
        m.set_at_least(Location::Interior, Location::Interior, Dimensions::OneDimensional);
        m.set_at_least(Location::Interior, Location::Interior, Dimensions::ZeroDimensional);
        assert_eq!(m.get(Location::Interior, Location::Interior), Dimensions::OneDimensional);
    }

    #[test]
    fn disjoint_pattern() {
        let m: IntersectionMatrix = "FF2FF10F2".parse().unwrap();
        assert!(m.is_disjoint());
        assert!(!m.is_intersects());
    }

    #[test]
    fn equality_pattern() {
        let m: IntersectionMatrix = "2FFF1FFF2".parse().unwrap();
        assert!(m.is_equal_topo());
    }
}
