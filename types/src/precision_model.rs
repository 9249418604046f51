use crate::Coord;

/// Controls how coordinates are rounded when a geometry is constructed or
/// when a topology operation produces new vertices.
///
/// `PrecisionModel` mirrors the three grades of precision handling found in
/// planar-topology engines: full floating-point precision, reduced
/// (single-precision-equivalent) floating point, and a fixed grid snapped to
/// a given scale factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrecisionModel {
    /// Full double-precision floating point; coordinates are never rounded.
    Floating,
    /// Coordinates are rounded to the precision representable by `f32`, while
    /// still being stored as `f64`.
    FloatingSingle,
    /// Coordinates are snapped to the grid `1 / scale`, i.e. rounded to the
    /// nearest multiple of `1 / scale`. `scale` must be finite and positive.
    Fixed { scale: f64 },
}

impl Default for PrecisionModel {
    fn default() -> Self {
        PrecisionModel::Floating
    }
}

impl PrecisionModel {
    pub fn fixed(scale: f64) -> Self {
        assert!(
            scale.is_finite() && scale > 0.0,
            "fixed precision model scale must be finite and positive"
        );
        PrecisionModel::Fixed { scale }
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, PrecisionModel::Floating | PrecisionModel::FloatingSingle)
    }

    /// Rounds `value` according to this precision model.
    ///
    /// `make_precise` is idempotent: applying it twice yields the same
    /// result as applying it once.
    pub fn make_value_precise(&self, value: f64) -> f64 {
        match self {
            PrecisionModel::Floating => value,
            PrecisionModel::FloatingSingle => value as f32 as f64,
            PrecisionModel::Fixed { scale } => {
                if value.is_nan() || value.is_infinite() {
                    value
                } else {
                    (value * scale).round() / scale
                }
            }
        }
    }

    /// Rounds both ordinates of `c` according to this precision model. `z`
    /// and `m` ordinates, if present, are left untouched.
    pub fn make_precise(&self, c: Coord) -> Coord {
        let mut out = c;
        out.x = self.make_value_precise(c.x);
        out.y = self.make_value_precise(c.y);
        out
    }

    /// The grid spacing of this precision model, or `0.0` for the fully
    /// floating models (no grid).
    pub fn grid_size(&self) -> f64 {
        match self {
            PrecisionModel::Floating | PrecisionModel::FloatingSingle => 0.0,
            PrecisionModel::Fixed { scale } => 1.0 / scale,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn floating_is_noop() {
        let pm = PrecisionModel::Floating;
        let c = Coord::new(1.23456789, -9.87654321);
        assert_eq!(pm.make_precise(c), c);
    }

    #[test]
    fn fixed_rounds_to_grid() {
        let pm = PrecisionModel::fixed(100.0);
        let c = Coord::new(1.2345, 1.2355);
        let rounded = pm.make_precise(c);
        assert_eq!(rounded.x, 1.23);
        assert_eq!(rounded.y, 1.24);
    }

    #[test]
    fn make_precise_is_idempotent() {
        for pm in [
            PrecisionModel::Floating,
            PrecisionModel::FloatingSingle,
            PrecisionModel::fixed(1000.0),
        ] {
            let c = Coord::new(3.14159265, -2.71828182);
            let once = pm.make_precise(c);
            let twice = pm.make_precise(once);
            assert_eq!(once, twice);
        }
    }
}
