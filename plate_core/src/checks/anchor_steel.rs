//! # Anchor Steel Checks
//!
//! Effective stress area from the thread specification, nominal and design
//! steel capacities, and the tension-shear interaction check for the worst
//! anchor in the group.
//!
//! Thread area formulas:
//! - Unified: Ase = (π/4)·(d − 0.9743/n)² with d in inches, n in TPI
//! - Metric: Ase = (π/4)·(d − 0.9382·p)² with d and p in mm
//! - Unspecified: conservative (π/4)·(d − 1.5 mm)² core

use serde::{Deserialize, Serialize};

use crate::config::{SteelInteraction, ThreadSpec};
use crate::materials::{AnchorGrade, PhiFactors};

use super::pressure::EPS;

const MM_PER_INCH: f64 = 25.4;

/// Effective tensile stress area of a threaded rod (mm²)
pub fn effective_stress_area_mm2(diameter_mm: f64, thread: ThreadSpec) -> f64 {
    let quarter_pi = std::f64::consts::FRAC_PI_4;
    match thread {
        ThreadSpec::UnifiedTpi { tpi } => {
            let d_in = diameter_mm / MM_PER_INCH;
            let ase_in2 = quarter_pi * (d_in - 0.9743 / tpi).max(0.0).powi(2);
            ase_in2 * MM_PER_INCH * MM_PER_INCH
        }
        ThreadSpec::MetricPitch { pitch_mm } => {
            quarter_pi * (diameter_mm - 0.9382 * pitch_mm).max(0.0).powi(2)
        }
        ThreadSpec::Unspecified => quarter_pi * (diameter_mm - 1.5).max(0.0).powi(2),
    }
}

/// Nominal and design steel capacities of a single anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelCapacities {
    /// Effective stress area (mm²)
    pub ase_mm2: f64,
    /// Nominal tension capacity Nsa = Ase·fu (kN)
    pub nsa_kn: f64,
    /// Design tension capacity φ·Nsa (kN)
    pub phi_nsa_kn: f64,
    /// Nominal shear capacity Vsa = 0.6·Nsa (kN)
    pub vsa_kn: f64,
    /// Design shear capacity φ·Vsa (kN)
    pub phi_vsa_kn: f64,
}

/// Compute single-anchor steel capacities for a grade, diameter and thread
pub fn capacities(
    grade: AnchorGrade,
    diameter_mm: f64,
    thread: ThreadSpec,
    phi: &PhiFactors,
) -> SteelCapacities {
    let ase_mm2 = effective_stress_area_mm2(diameter_mm, thread);
    // MPa * mm^2 = N
    let nsa_kn = ase_mm2 * grade.fu_mpa() / 1000.0;
    let vsa_kn = 0.6 * nsa_kn;
    SteelCapacities {
        ase_mm2,
        nsa_kn,
        phi_nsa_kn: phi.steel_tension * nsa_kn,
        vsa_kn,
        phi_vsa_kn: phi.steel_shear * vsa_kn,
    }
}

/// Tension-shear interaction for one anchor's demand pair
pub fn combined_utilization(
    tension_kn: f64,
    shear_kn: f64,
    capacities: &SteelCapacities,
    interaction: SteelInteraction,
) -> f64 {
    let ut = tension_kn / capacities.phi_nsa_kn.max(EPS);
    let uv = shear_kn / capacities.phi_vsa_kn.max(EPS);
    match interaction {
        SteelInteraction::Envelope => (ut + uv).max(ut).max(uv),
        SteelInteraction::PowerOneFive => ut.powf(1.5) + uv.powf(1.5),
        SteelInteraction::Quadratic => ut * ut + uv * uv,
    }
}

/// Worst-anchor steel check over per-anchor demand lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelCheck {
    pub capacities: SteelCapacities,
    /// Worst single-anchor tension utilization
    pub util_tension: f64,
    /// Worst single-anchor shear utilization
    pub util_shear: f64,
    /// Worst single-anchor combined (interaction) utilization
    pub util_combined: f64,
    /// Index of the anchor governing the combined check
    pub governing_anchor: usize,
}

/// Check the whole group: demand lists must share the layout's index order.
pub fn check(
    tension_kn: &[f64],
    shear_kn: &[f64],
    capacities: SteelCapacities,
    interaction: SteelInteraction,
) -> SteelCheck {
    let mut util_tension: f64 = 0.0;
    let mut util_shear: f64 = 0.0;
    let mut util_combined: f64 = 0.0;
    let mut governing_anchor = 0;

    for i in 0..tension_kn.len().max(shear_kn.len()) {
        let t = tension_kn.get(i).copied().unwrap_or(0.0);
        let v = shear_kn.get(i).copied().unwrap_or(0.0);
        util_tension = util_tension.max(t / capacities.phi_nsa_kn.max(EPS));
        util_shear = util_shear.max(v / capacities.phi_vsa_kn.max(EPS));
        let combined = combined_utilization(t, v, &capacities, interaction);
        if combined > util_combined {
            util_combined = combined;
            governing_anchor = i;
        }
    }

    SteelCheck {
        capacities,
        util_tension,
        util_shear,
        util_combined,
        governing_anchor,
    }
}
