//! # Plate Bending Check
//!
//! Required plate thickness under the peak bearing pressure.
//!
//! The strip method checks two cantilever strips beyond the column
//! footprint, m1 = (B − bf)/2 across the flanges and m2 = (L − 0.8·bf)/2
//! past the web, each at Mu = q·m²/2 per unit width and
//! t = √(6·Mu / (0.90·fy)). Stiffeners shorten the effective cantilevers
//! by a 0.7 factor.
//!
//! The full-section alternative bends the whole plate about a lever of
//! 0.3·min(B, L) under the mean pressure, capped at a configured fraction
//! of f'c.

use serde::{Deserialize, Serialize};

use crate::config::{GeometryConfig, MethodConfig, PlateMethod};
use crate::materials::PlateSteel;

use super::pressure::{PressureResult, EPS};

const PHI_BENDING: f64 = 0.90;
const STIFFENED_FACTOR: f64 = 0.7;

/// One cantilever strip of the plate bending check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripResult {
    /// Strip name for reports
    pub strip: String,
    /// Effective cantilever length (mm)
    pub m_eff_mm: f64,
    /// Bearing pressure on the strip (MPa)
    pub q_mpa: f64,
    /// Required thickness for this strip (mm)
    pub t_req_mm: f64,
}

/// Plate bending result for one load case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateCheck {
    /// Governing required thickness, floored at the configured minimum (mm)
    pub t_req_mm: f64,
    /// Provided thickness (mm)
    pub t_provided_mm: f64,
    /// t_req / t_provided
    pub ratio: f64,
    /// Per-strip breakdown (empty for the full-section method)
    pub strips: Vec<StripResult>,
}

/// Check the plate for the given bearing solution.
pub fn check(
    geometry: &GeometryConfig,
    plate: &PlateSteel,
    fc_mpa: f64,
    method: &MethodConfig,
    pressure: &PressureResult,
) -> PlateCheck {
    let (t_raw, strips) = match method.plate_method {
        PlateMethod::CantileverStrips => cantilever_strips(geometry, plate, pressure),
        PlateMethod::FullSection => (
            full_section(geometry, plate, fc_mpa, method, pressure),
            Vec::new(),
        ),
    };

    let t_req_mm = t_raw.max(method.plate_t_min_mm);
    let t_provided_mm = geometry.plate_t_mm;
    PlateCheck {
        t_req_mm,
        t_provided_mm,
        ratio: t_req_mm / t_provided_mm.max(EPS),
        strips,
    }
}

fn cantilever_strips(
    geometry: &GeometryConfig,
    plate: &PlateSteel,
    pressure: &PressureResult,
) -> (f64, Vec<StripResult>) {
    // B spans the flange width direction, L the depth direction
    let b = geometry.plate_b_mm;
    let l = geometry.plate_a_mm;
    let bf = geometry.column.flange_width_mm;
    let q = pressure.sigma_max_mpa.max(0.0);
    let rfac = if geometry.stiffened {
        STIFFENED_FACTOR
    } else {
        1.0
    };

    let m1 = rfac * ((b - bf) / 2.0).max(0.0);
    let m2 = rfac * ((l - 0.8 * bf) / 2.0).max(0.0);

    let t1 = strip_thickness(m1, q, plate.fy_mpa);
    let t2 = strip_thickness(m2, q, plate.fy_mpa);

    let strips = vec![
        StripResult {
            strip: "flange (B)".to_string(),
            m_eff_mm: m1,
            q_mpa: q,
            t_req_mm: t1,
        },
        StripResult {
            strip: "web (L)".to_string(),
            m_eff_mm: m2,
            q_mpa: q,
            t_req_mm: t2,
        },
    ];
    (t1.max(t2), strips)
}

/// Cantilever strip: Mu = q·m²/2 per unit width, t = √(6·Mu/(φ·fy))
fn strip_thickness(m_mm: f64, q_mpa: f64, fy_mpa: f64) -> f64 {
    if m_mm <= 0.0 || q_mpa <= 0.0 {
        return 0.0;
    }
    let mu = q_mpa * m_mm * m_mm / 2.0;
    (6.0 * mu / (PHI_BENDING * fy_mpa)).sqrt()
}

fn full_section(
    geometry: &GeometryConfig,
    plate: &PlateSteel,
    fc_mpa: f64,
    method: &MethodConfig,
    pressure: &PressureResult,
) -> f64 {
    let q_mean = ((pressure.sigma_max_mpa + pressure.sigma_min_mpa) / 2.0)
        .max(0.0)
        .min(method.full_section_pressure_cap * fc_mpa);
    let m = 0.3 * geometry.plate_a_mm.min(geometry.plate_b_mm);
    strip_thickness(m, q_mean, plate.fy_mpa)
}
