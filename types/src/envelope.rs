use crate::Coord;

/// An axis-aligned bounding rectangle, possibly empty.
///
/// Unlike [`Coord`], an `Envelope` can represent the empty set (the bounding
/// box of zero coordinates). All non-empty envelopes satisfy
/// `min_x <= max_x` and `min_y <= max_y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    // `None` represents the empty envelope.
    bounds: Option<Bounds>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Bounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Envelope {
    pub fn empty() -> Self {
        Envelope { bounds: None }
    }

    pub fn new(x1: f64, x2: f64, y1: f64, y2: f64) -> Self {
        Envelope {
            bounds: Some(Bounds {
                min_x: x1.min(x2),
                max_x: x1.max(x2),
                min_y: y1.min(y2),
                max_y: y1.max(y2),
            }),
        }
    }

    pub fn from_coord(c: Coord) -> Self {
        Envelope::new(c.x, c.x, c.y, c.y)
    }

    pub fn from_coords(c1: Coord, c2: Coord) -> Self {
        Envelope::new(c1.x, c2.x, c1.y, c2.y)
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    pub fn min_x(&self) -> f64 {
        self.bounds.expect("empty envelope").min_x
    }

    pub fn max_x(&self) -> f64 {
        self.bounds.expect("empty envelope").max_x
    }

    pub fn min_y(&self) -> f64 {
        self.bounds.expect("empty envelope").min_y
    }

    pub fn max_y(&self) -> f64 {
        self.bounds.expect("empty envelope").max_y
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x() - self.min_x()
        }
    }

    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_y() - self.min_y()
        }
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn min(&self) -> Coord {
        Coord::new(self.min_x(), self.min_y())
    }

    pub fn max(&self) -> Coord {
        Coord::new(self.max_x(), self.max_y())
    }

    pub fn center(&self) -> Option<Coord> {
        if self.is_empty() {
            None
        } else {
            Some(Coord::new(
                (self.min_x() + self.max_x()) / 2.0,
                (self.min_y() + self.max_y()) / 2.0,
            ))
        }
    }

    pub fn expand_to_include(&mut self, c: Coord) {
        self.bounds = Some(match self.bounds {
            None => Bounds {
                min_x: c.x,
                max_x: c.x,
                min_y: c.y,
                max_y: c.y,
            },
            Some(b) => Bounds {
                min_x: b.min_x.min(c.x),
                max_x: b.max_x.max(c.x),
                min_y: b.min_y.min(c.y),
                max_y: b.max_y.max(c.y),
            },
        });
    }

    pub fn expand_by(&self, distance: f64) -> Self {
        if self.is_empty() {
            return *self;
        }
        Envelope::new(
            self.min_x() - distance,
            self.max_x() + distance,
            self.min_y() - distance,
            self.max_y() + distance,
        )
    }

    pub fn union(&self, other: &Self) -> Self {
        match (self.bounds, other.bounds) {
            (None, _) => *other,
            (_, None) => *self,
            (Some(a), Some(b)) => Envelope {
                bounds: Some(Bounds {
                    min_x: a.min_x.min(b.min_x),
                    max_x: a.max_x.max(b.max_x),
                    min_y: a.min_y.min(b.min_y),
                    max_y: a.max_y.max(b.max_y),
                }),
            },
        }
    }

    /// The envelope of the intersection of `self` and `other`, or the empty
    /// envelope if they do not overlap.
    pub fn intersection(&self, other: &Self) -> Self {
        if !self.intersects_envelope(other) {
            return Envelope::empty();
        }
        let a = self.bounds.unwrap();
        let b = other.bounds.unwrap();
        Envelope::new(
            a.min_x.max(b.min_x),
            a.max_x.min(b.max_x),
            a.min_y.max(b.min_y),
            a.max_y.min(b.max_y),
        )
    }

    pub fn contains_point(&self, c: Coord) -> bool {
        match self.bounds {
            None => false,
            Some(b) => c.x >= b.min_x && c.x <= b.max_x && c.y >= b.min_y && c.y <= b.max_y,
        }
    }

    pub fn contains_envelope(&self, other: &Self) -> bool {
        match (self.bounds, other.bounds) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(a), Some(b)) => {
                b.min_x >= a.min_x && b.max_x <= a.max_x && b.min_y >= a.min_y && b.max_y <= a.max_y
            }
        }
    }

    pub fn intersects_envelope(&self, other: &Self) -> bool {
        match (self.bounds, other.bounds) {
            (Some(a), Some(b)) => {
                a.min_x <= b.max_x && a.max_x >= b.min_x && a.min_y <= b.max_y && a.max_y >= b.min_y
            }
            _ => false,
        }
    }

    pub fn intersects_point(&self, c: Coord) -> bool {
        self.contains_point(c)
    }

    /// Distance from this envelope to `other`; `0.0` if they intersect.
    pub fn distance(&self, other: &Self) -> f64 {
        if self.intersects_envelope(other) {
            return 0.0;
        }
        let (a, b) = match (self.bounds, other.bounds) {
            (Some(a), Some(b)) => (a, b),
            _ => return f64::INFINITY,
        };
        let dx = if a.max_x < b.min_x {
            b.min_x - a.max_x
        } else if b.max_x < a.min_x {
            a.min_x - b.max_x
        } else {
            0.0
        };
        let dy = if a.max_y < b.min_y {
            b.min_y - a.max_y
        } else if b.max_y < a.min_y {
            a.min_y - b.max_y
        } else {
            0.0
        };
        (dx * dx + dy * dy).sqrt()
    }
}

impl rstar::RTreeObject for Envelope {
    type Envelope = rstar::AABB<Coord>;

    fn envelope(&self) -> Self::Envelope {
        if self.is_empty() {
            rstar::AABB::from_point(Coord::new(0.0, 0.0))
        } else {
            rstar::AABB::from_corners(self.min(), self.max())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tightness() {
        let mut env = Envelope::empty();
        for c in [
            Coord::new(0.0, 0.0),
            Coord::new(2.0, 1.0),
            Coord::new(1.0, 3.0),
        ] {
            env.expand_to_include(c);
        }
        assert_eq!(env.min_x(), 0.0);
        assert_eq!(env.max_x(), 2.0);
        assert_eq!(env.min_y(), 0.0);
        assert_eq!(env.max_y(), 3.0);
    }

    #[test]
    fn disjoint_distance() {
        let a = Envelope::new(0.0, 1.0, 0.0, 1.0);
        let b = Envelope::new(2.0, 3.0, 0.0, 1.0);
        assert_eq!(a.distance(&b), 1.0);
        assert!(!a.intersects_envelope(&b));
    }

    #[test]
    fn intersection_of_overlapping() {
        let a = Envelope::new(0.0, 2.0, 0.0, 2.0);
        let b = Envelope::new(1.0, 3.0, 1.0, 3.0);
        let i = a.intersection(&b);
        assert_eq!(i, Envelope::new(1.0, 2.0, 1.0, 2.0));
    }
}
