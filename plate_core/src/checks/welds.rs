//! # Fillet Weld Sizing
//!
//! Sizes the column-to-plate fillet weld for the resultant base shear.
//! The weld group is taken as the column perimeter 2·(d + bf) and the
//! demand carries a 1.2 amplification. Strength per mm of leg is
//! 0.6·F_EXX·0.707/1000 kN/mm with φ = 0.75; the suggested size rounds
//! up to a whole millimetre.

use serde::{Deserialize, Serialize};

use crate::config::{ColumnFootprint, MethodConfig};

use super::pressure::EPS;

const PHI_WELD: f64 = 0.75;
const DEMAND_FACTOR: f64 = 1.2;

/// Weld sizing result for one load case
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeldCheck {
    /// Weld group length 2·(d + bf) (mm)
    pub length_mm: f64,
    /// Amplified shear demand per mm of weld (kN/mm)
    pub v_per_mm_kn: f64,
    /// Design strength per mm of weld per mm of leg (kN/mm/mm)
    pub phi_rn_per_mm: f64,
    /// Exact required leg size (mm)
    pub w_req_exact_mm: f64,
    /// Suggested leg size, rounded up to a whole mm
    pub w_req_mm: f64,
    /// w_req_exact / provided size
    pub utilization: f64,
}

/// Size the weld for a resultant shear demand (kN).
pub fn size(column: &ColumnFootprint, method: &MethodConfig, v_resultant_kn: f64) -> WeldCheck {
    let length_mm = 2.0 * (column.depth_mm + column.flange_width_mm);
    let v_per_mm_kn = DEMAND_FACTOR * v_resultant_kn.abs() / length_mm.max(1.0);
    let rn_per_mm = 0.6 * method.f_exx_mpa * 0.707 / 1000.0;
    let phi_rn_per_mm = PHI_WELD * rn_per_mm;
    let w_req_exact_mm = v_per_mm_kn / phi_rn_per_mm.max(EPS);
    WeldCheck {
        length_mm,
        v_per_mm_kn,
        phi_rn_per_mm,
        w_req_exact_mm,
        w_req_mm: w_req_exact_mm.ceil(),
        utilization: w_req_exact_mm / method.weld_size_mm.max(EPS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column() -> ColumnFootprint {
        ColumnFootprint {
            depth_mm: 400.0,
            flange_width_mm: 300.0,
        }
    }

    #[test]
    fn test_weld_demand_and_size() {
        // Lw = 1400 mm, V = 140 kN: v = 1.2*140/1400 = 0.12 kN/mm
        // phi*Rn = 0.75*0.6*483*0.707/1000 = 0.153666 kN/mm/mm
        // w_req = 0.12/0.153666 = 0.781 -> 1 mm suggested
        let check = size(&column(), &MethodConfig::default(), 140.0);
        assert!((check.v_per_mm_kn - 0.12).abs() < 1e-9);
        assert!((check.phi_rn_per_mm - 0.153666).abs() < 1e-5);
        assert!((check.w_req_exact_mm - 0.7809).abs() < 1e-3);
        assert_eq!(check.w_req_mm, 1.0);
    }

    #[test]
    fn test_utilization_against_provided_size() {
        let check = size(&column(), &MethodConfig::default(), 140.0);
        // provided 6 mm leg
        assert!((check.utilization - check.w_req_exact_mm / 6.0).abs() < 1e-12);
        assert!(check.utilization < 1.0);
    }

    #[test]
    fn test_zero_shear_zero_size() {
        let check = size(&column(), &MethodConfig::default(), 0.0);
        assert_eq!(check.w_req_exact_mm, 0.0);
        assert_eq!(check.w_req_mm, 0.0);
        assert_eq!(check.utilization, 0.0);
    }

    #[test]
    fn test_demand_scales_linearly() {
        let small = size(&column(), &MethodConfig::default(), 70.0);
        let large = size(&column(), &MethodConfig::default(), 140.0);
        assert!((large.w_req_exact_mm / small.w_req_exact_mm - 2.0).abs() < 1e-9);
    }
}
