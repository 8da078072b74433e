use crate::error::EditError;

/// Multiplicative gain for each color channel. Alpha has no factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl ScaleFactors {
    pub const NEUTRAL: ScaleFactors = ScaleFactors {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Check that every factor is finite and non-negative.
    pub fn validate(self) -> Result<Self, EditError> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        if ok(self.r) && ok(self.g) && ok(self.b) {
            Ok(self)
        } else {
            Err(EditError::InvalidFactors {
                r: self.r,
                g: self.g,
                b: self.b,
            })
        }
    }

    pub fn as_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}
