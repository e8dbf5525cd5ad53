//! CSV loader for equilibrium samples.
//!
//! Rows are `x,y` or `x,y,t_k`; every row has the same number of columns. A
//! first line that does not parse as numbers is a header. Blank lines and
//! lines starting with `#` are skipped.

use std::path::Path;

use mt_vle::EquilibriumPoint;
use tracing::debug;

use crate::error::{AppError, AppResult};

fn parse_row(line: &str) -> Option<Vec<f64>> {
    line.split(',')
        .map(|c| c.trim().parse::<f64>().ok())
        .collect()
}

/// Parse equilibrium samples from CSV text.
pub fn parse_vle_csv(text: &str) -> AppResult<Vec<EquilibriumPoint>> {
    let mut points = Vec::new();
    let mut columns: Option<usize> = None;

    let rows = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

    for (index, (line_no, line)) in rows.enumerate() {
        let Some(values) = parse_row(line) else {
            if index == 0 {
                debug!(header = line, "Skipping CSV header");
                continue;
            }
            return Err(AppError::VleParse {
                line: line_no,
                message: format!("expected numeric columns, got '{line}'"),
            });
        };

        let point = match values.as_slice() {
            [x, y] => EquilibriumPoint::new(*x, *y),
            [x, y, t] => EquilibriumPoint::with_temperature(*x, *y, *t),
            other => {
                return Err(AppError::VleParse {
                    line: line_no,
                    message: format!("expected 2 or 3 columns, got {}", other.len()),
                });
            }
        };
        match columns {
            None => columns = Some(values.len()),
            Some(n) if n != values.len() => {
                return Err(AppError::VleParse {
                    line: line_no,
                    message: format!(
                        "expected {n} columns like the first row, got {}",
                        values.len()
                    ),
                });
            }
            Some(_) => {}
        }
        points.push(point);
    }

    if points.is_empty() {
        return Err(AppError::VleParse {
            line: 0,
            message: "no equilibrium samples".to_string(),
        });
    }
    Ok(points)
}

/// Load equilibrium samples from a CSV file.
pub fn load_vle_csv(path: &Path) -> AppResult<Vec<EquilibriumPoint>> {
    let text = std::fs::read_to_string(path).map_err(|e| AppError::VleFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let points = parse_vle_csv(&text)?;
    debug!(path = %path.display(), samples = points.len(), "Loaded equilibrium data");
    Ok(points)
}
