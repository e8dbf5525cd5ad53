//! Process specification for a binary column.

use crate::error::{ColumnError, ColumnResult};

/// Feed, product and reflux conditions for one design evaluation.
///
/// Compositions are mole fractions of the light component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    /// Feed composition xF
    pub xf: f64,
    /// Distillate composition xD
    pub xd: f64,
    /// Bottoms composition xB
    pub xb: f64,
    /// Reflux ratio R = L/D
    pub reflux: f64,
    /// Feed thermal quality q
    pub q: f64,
}

impl ProcessSpec {
    /// Same spec at a different reflux ratio.
    pub fn with_reflux(self, reflux: f64) -> Self {
        Self { reflux, ..self }
    }

    /// Check the physical ordering `0 <= xB < xF < xD <= 1`, a positive finite
    /// reflux ratio and a finite `q`.
    ///
    /// `q = 1` is left to the q-line solver, which reports it as a degenerate
    /// line.
    pub fn validate(&self) -> ColumnResult<()> {
        for (name, v) in [
            ("xF", self.xf),
            ("xD", self.xd),
            ("xB", self.xb),
            ("R", self.reflux),
            ("q", self.q),
        ] {
            if !v.is_finite() {
                return Err(invalid(format!("{name} is not finite ({v})")));
            }
        }

        if self.xb < 0.0 || self.xd > 1.0 {
            return Err(invalid(format!(
                "compositions must lie in [0, 1] (xB = {}, xD = {})",
                self.xb, self.xd
            )));
        }
        if !(self.xb < self.xf && self.xf < self.xd) {
            return Err(invalid(format!(
                "expected xB < xF < xD, got xB = {}, xF = {}, xD = {}",
                self.xb, self.xf, self.xd
            )));
        }
        if self.reflux <= 0.0 {
            return Err(invalid(format!(
                "reflux ratio must be positive, got {}",
                self.reflux
            )));
        }
        Ok(())
    }
}

fn invalid(what: String) -> ColumnError {
    ColumnError::InvalidSpecification { what }
}
