//! # Bolt Group Distribution
//!
//! Apportions net uplift tension and group shear across the anchor grid.
//!
//! Tension starts from the elastic linear field T/n + Mx·y/Σy² + My·x/Σx²,
//! then clips anchors that come out in compression to zero and renormalizes
//! the remainder so the total equals the demanded uplift.
//!
//! Shear follows the configured [`ShearDistribution`] mode. Row modes treat
//! each distinct signed y as its own row, pick the row farthest from (or
//! nearest to) the plate centroid, and give it the whole shear, split
//! equally within it. Equidistant +y/−y rows resolve to the +y row.

use crate::config::ShearDistribution;
use crate::units::{Meters, Millimeters};

use super::pressure::EPS;

/// Positions within this tolerance of a row's y belong to that row (mm)
const ROW_TOL_MM: f64 = 1e-6;

/// Per-anchor demands for one load case.
///
/// Index order matches the layout's `positions()` order.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorDemands {
    /// Per-anchor tension (kN), all entries >= 0
    pub tension_kn: Vec<f64>,
    /// Per-anchor shear (kN), all entries >= 0
    pub shear_kn: Vec<f64>,
}

impl AnchorDemands {
    /// Largest per-anchor tension (kN)
    pub fn max_tension_kn(&self) -> f64 {
        self.tension_kn.iter().cloned().fold(0.0, f64::max)
    }

    /// Largest per-anchor shear (kN)
    pub fn max_shear_kn(&self) -> f64 {
        self.shear_kn.iter().cloned().fold(0.0, f64::max)
    }
}

/// Distribute the net uplift tension across the group.
///
/// `uplift_kn` is the net tension demand (>= 0); moments tilt the linear
/// field toward the tension side. Anchors landing in compression take zero
/// and the positive entries are renormalized to sum to `uplift_kn`.
pub fn distribute_tension(
    uplift_kn: f64,
    mx_knm: f64,
    my_knm: f64,
    positions_mm: &[(f64, f64)],
) -> Vec<f64> {
    let n = positions_mm.len();
    if n == 0 {
        return Vec::new();
    }
    if uplift_kn <= EPS {
        return vec![0.0; n];
    }

    let to_m = |mm: f64| Meters::from(Millimeters(mm)).value();
    let sum_y2: f64 = positions_mm.iter().map(|p| to_m(p.1).powi(2)).sum();
    let sum_x2: f64 = positions_mm.iter().map(|p| to_m(p.0).powi(2)).sum();

    let mut field: Vec<f64> = positions_mm
        .iter()
        .map(|&(x_mm, y_mm)| {
            let mut t = uplift_kn / n as f64;
            if sum_y2 > EPS {
                t += mx_knm * to_m(y_mm) / sum_y2;
            }
            if sum_x2 > EPS {
                t += my_knm * to_m(x_mm) / sum_x2;
            }
            t.max(0.0)
        })
        .collect();

    let total: f64 = field.iter().sum();
    if total > EPS {
        let scale = uplift_kn / total;
        for t in &mut field {
            *t *= scale;
        }
    }
    field
}

/// Distribute the group shear across the anchors for a fixed mode.
///
/// `Auto` is resolved by the caller (it needs utilization feedback); passing
/// it here falls back to `Uniform`.
pub fn distribute_shear(
    v_kn: f64,
    mode: ShearDistribution,
    positions_mm: &[(f64, f64)],
) -> Vec<f64> {
    let n = positions_mm.len();
    if n == 0 {
        return Vec::new();
    }
    if v_kn.abs() <= EPS {
        return vec![0.0; n];
    }

    match mode {
        ShearDistribution::Uniform | ShearDistribution::Auto => vec![v_kn / n as f64; n],
        ShearDistribution::Elastic => {
            let weights: Vec<f64> = positions_mm.iter().map(|p| p.1.abs()).collect();
            let total: f64 = weights.iter().sum();
            if total <= EPS {
                return vec![v_kn / n as f64; n];
            }
            weights.iter().map(|w| v_kn * w / total).collect()
        }
        ShearDistribution::FarRow | ShearDistribution::NearRow => {
            let far = mode == ShearDistribution::FarRow;
            // Rows are distinct signed y values; a symmetric grid has a
            // +y row and a -y row. Equidistant rows resolve to +y.
            let mut target_y = positions_mm[0].1;
            for &(_, y) in &positions_mm[1..] {
                let closer_to_goal = if far {
                    y.abs() > target_y.abs() + ROW_TOL_MM
                } else {
                    y.abs() < target_y.abs() - ROW_TOL_MM
                };
                let tie_on_higher_row = (y.abs() - target_y.abs()).abs() <= ROW_TOL_MM
                    && y > target_y + ROW_TOL_MM;
                if closer_to_goal || tie_on_higher_row {
                    target_y = y;
                }
            }
            let in_row: Vec<bool> = positions_mm
                .iter()
                .map(|p| (p.1 - target_y).abs() <= ROW_TOL_MM)
                .collect();
            let row_count = in_row.iter().filter(|&&b| b).count().max(1);
            in_row
                .iter()
                .map(|&b| if b { v_kn / row_count as f64 } else { 0.0 })
                .collect()
        }
    }
}
