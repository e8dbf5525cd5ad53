//! Operating lines of the McCabe-Thiele construction.
//!
//! All three lines are straight lines in (x, y) mole-fraction space:
//! - q-line through (xF, xF) with slope q / (q - 1)
//! - enriching line through (xD, xD) and (0, xD / (R + 1))
//! - stripping line through (xB, xB) and the q/enriching intersection

use crate::error::{ColumnError, ColumnResult};
use mt_core::numeric::ensure_finite;

/// `|q - 1|` at or below this is a vertical q-line.
const VERTICAL_Q_TOL: f64 = 1e-12;

/// Relative slope difference at or below which two lines count as parallel.
const PARALLEL_TOL: f64 = 1e-10;

/// y = slope * x + intercept
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Line through two points. Fails if the points share an x value.
    pub fn through(p0: (f64, f64), p1: (f64, f64)) -> ColumnResult<Self> {
        let dx = p1.0 - p0.0;
        if dx == 0.0 {
            return Err(ColumnError::DegenerateLine {
                what: "points share the same liquid fraction",
            });
        }
        let slope = (p1.1 - p0.1) / dx;
        Ok(Self::new(slope, p0.1 - slope * p0.0))
    }

    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Intersection with `other`, or `None` for (near-)parallel lines.
    pub fn intersection(&self, other: &Line) -> Option<(f64, f64)> {
        let ds = self.slope - other.slope;
        let scale = 1.0_f64.max(self.slope.abs()).max(other.slope.abs());
        if ds.abs() <= PARALLEL_TOL * scale {
            return None;
        }
        let x = (other.intercept - self.intercept) / ds;
        Some((x, self.at(x)))
    }
}

/// The three lines for one reflux ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingLines {
    pub q_line: Line,
    pub enriching: Line,
    pub stripping: Line,
    /// Where the q-line meets the enriching line
    pub intersection: (f64, f64),
}

impl OperatingLines {
    /// Active operating line value at `x`: the lower of enriching and
    /// stripping. Above the feed stage that is the enriching line, below it
    /// the stripping line.
    pub fn active(&self, x: f64) -> f64 {
        self.enriching.at(x).min(self.stripping.at(x))
    }
}

/// q-line through (xF, xF) with slope q / (q - 1).
pub fn solve_q_line(q: f64, xf: f64) -> ColumnResult<Line> {
    ensure_finite(q, "q")?;
    ensure_finite(xf, "xF")?;
    if (q - 1.0).abs() <= VERTICAL_Q_TOL {
        return Err(ColumnError::DegenerateLine {
            what: "q = 1 gives a vertical q-line",
        });
    }
    let slope = q / (q - 1.0);
    Ok(Line::new(slope, xf - slope * xf))
}

/// Enriching line for reflux ratio `reflux` and distillate composition `xd`.
pub fn enriching_line(reflux: f64, xd: f64) -> ColumnResult<Line> {
    ensure_finite(reflux, "R")?;
    ensure_finite(xd, "xD")?;
    if reflux <= -1.0 {
        return Err(ColumnError::InvalidArg {
            what: format!("reflux ratio {reflux} gives no enriching line"),
        });
    }
    Ok(Line::new(reflux / (reflux + 1.0), xd / (reflux + 1.0)))
}

/// Enriching and stripping lines plus their shared point on the q-line.
pub fn solve_operating_lines(
    reflux: f64,
    q_line: Line,
    xd: f64,
    xb: f64,
) -> ColumnResult<OperatingLines> {
    ensure_finite(xb, "xB")?;
    let enriching = enriching_line(reflux, xd)?;

    let intersection =
        q_line
            .intersection(&enriching)
            .ok_or(ColumnError::NoIntersection {
                what: "q-line is parallel to the enriching line",
                slope_a: q_line.slope,
                slope_b: enriching.slope,
            })?;

    let stripping = Line::through((xb, xb), intersection).map_err(|_| {
        ColumnError::DegenerateLine {
            what: "stripping line is vertical (intersection at xB)",
        }
    })?;

    Ok(OperatingLines {
        q_line,
        enriching,
        stripping,
        intersection,
    })
}

/// Feed thermal quality from sensible heat needed to bring the feed to its
/// bubble point: q = 1 + cp (T_bubble - T_feed) / h_vap.
///
/// Temperatures in any consistent scale (differences only); `cp_mix` and
/// `h_vap` per mole in consistent units.
pub fn thermal_quality(
    feed_temperature: f64,
    bubble_temperature: f64,
    cp_mix: f64,
    h_vap: f64,
) -> ColumnResult<f64> {
    ensure_finite(feed_temperature, "feed temperature")?;
    ensure_finite(bubble_temperature, "bubble temperature")?;
    ensure_finite(cp_mix, "mixture heat capacity")?;
    if !(h_vap.is_finite() && h_vap > 0.0) {
        return Err(ColumnError::InvalidArg {
            what: format!("heat of vaporization must be positive, got {h_vap}"),
        });
    }
    Ok(1.0 + cp_mix * (bubble_temperature - feed_temperature) / h_vap)
}
