//! # Shear Load Path
//!
//! Splits the resultant base shear between friction at the plate/grout
//! interface and the anchor group. Friction capacity is μ·N using only the
//! compressive part of the axial force; any shear beyond it goes to the
//! anchors. When anchors are configured to resist the full shear, friction
//! is bypassed entirely.

use serde::{Deserialize, Serialize};

use super::pressure::EPS;

/// Outcome of the friction/anchor shear split
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShearSplit {
    /// Resultant shear demand (kN)
    pub v_required_kn: f64,
    /// Friction capacity μ·max(N, 0) (kN)
    pub friction_capacity_kn: f64,
    /// Shear carried by friction (kN)
    pub v_friction_kn: f64,
    /// Shear passed to the anchor group (kN)
    pub v_to_anchors_kn: f64,
    /// Fraction of the friction capacity consumed, clamped to [0, 1]
    pub friction_utilization: f64,
}

/// Split the resultant shear between friction and anchors.
///
/// `anchors_resist` forces the whole shear onto the anchor group,
/// ignoring friction.
pub fn split(v_required_kn: f64, n_kn: f64, mu: f64, anchors_resist: bool) -> ShearSplit {
    let friction_capacity_kn = mu * n_kn.max(0.0);

    if anchors_resist {
        return ShearSplit {
            v_required_kn,
            friction_capacity_kn,
            v_friction_kn: 0.0,
            v_to_anchors_kn: v_required_kn,
            friction_utilization: 0.0,
        };
    }

    let v_friction_kn = v_required_kn.min(friction_capacity_kn);
    let v_to_anchors_kn = (v_required_kn - friction_capacity_kn).max(0.0);
    let friction_utilization = if friction_capacity_kn > EPS {
        (v_friction_kn / friction_capacity_kn).min(1.0)
    } else if v_required_kn > EPS {
        1.0
    } else {
        0.0
    };

    ShearSplit {
        v_required_kn,
        friction_capacity_kn,
        v_friction_kn,
        v_to_anchors_kn,
        friction_utilization,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friction_absorbs_small_shear() {
        // mu*N = 0.4*200 = 80 kN > 35 kN demand
        let split = split(35.0, 200.0, 0.4, false);
        assert_eq!(split.v_friction_kn, 35.0);
        assert_eq!(split.v_to_anchors_kn, 0.0);
        assert!((split.friction_utilization - 35.0 / 80.0).abs() < 1e-12);
    }

    #[test]
    fn test_excess_goes_to_anchors() {
        let split = split(120.0, 200.0, 0.4, false);
        assert_eq!(split.friction_capacity_kn, 80.0);
        assert_eq!(split.v_friction_kn, 80.0);
        assert_eq!(split.v_to_anchors_kn, 40.0);
        assert_eq!(split.friction_utilization, 1.0);
    }

    #[test]
    fn test_uplift_kills_friction() {
        let split = split(50.0, -100.0, 0.4, false);
        assert_eq!(split.friction_capacity_kn, 0.0);
        assert_eq!(split.v_to_anchors_kn, 50.0);
        assert_eq!(split.friction_utilization, 1.0);
    }

    #[test]
    fn test_anchors_resist_bypasses_friction() {
        let split = split(50.0, 200.0, 0.4, true);
        assert_eq!(split.v_friction_kn, 0.0);
        assert_eq!(split.v_to_anchors_kn, 50.0);
        assert_eq!(split.friction_utilization, 0.0);
    }

    #[test]
    fn test_zero_shear() {
        let split = split(0.0, 200.0, 0.4, false);
        assert_eq!(split.v_to_anchors_kn, 0.0);
        assert_eq!(split.friction_utilization, 0.0);
    }
}
