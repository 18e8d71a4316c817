//! # Load Cases
//!
//! A [`LoadCase`] carries the five standardized load components the engine
//! requires: axial force N (+ compression), biaxial moments Mx/My, and
//! biaxial shears Vx/Vy. Batch rows may additionally carry identifying
//! metadata (`source_id`, `case_label`) supplied by an import adapter.
//!
//! The engine assumes axis mapping and sign normalization have already been
//! resolved upstream.
//!
//! ## Example
//!
//! ```rust
//! use plate_core::loads::LoadCase;
//!
//! let case = LoadCase::new(200.0, 50.0)
//!     .with_shear(35.0, 10.0)
//!     .with_source("J-12", "LRFD-2a");
//!
//! assert_eq!(case.n_kn, 200.0);
//! assert!((case.shear_resultant_kn() - (35.0f64.powi(2) + 100.0).sqrt()).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

/// One standardized load combination row.
///
/// Sign convention: N is positive in compression; a negative N is net uplift.
///
/// ## JSON Example
///
/// ```json
/// {
///   "n_kn": 200.0,
///   "mx_knm": 50.0,
///   "my_knm": 0.0,
///   "vx_kn": 35.0,
///   "vy_kn": 0.0,
///   "source_id": "J-12",
///   "case_label": "LRFD-2a"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    /// Axial force N (kN, + compression)
    pub n_kn: f64,
    /// Moment about x (kN·m)
    pub mx_knm: f64,
    /// Moment about y (kN·m)
    pub my_knm: f64,
    /// Shear along x (kN)
    pub vx_kn: f64,
    /// Shear along y (kN)
    pub vy_kn: f64,
    /// Identifier from the import source (joint, node, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// Load combination label (e.g. "LRFD-2a")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_label: Option<String>,
}

impl LoadCase {
    /// Create a load case from axial force and major-axis moment
    pub fn new(n_kn: f64, mx_knm: f64) -> Self {
        LoadCase {
            n_kn,
            mx_knm,
            my_knm: 0.0,
            vx_kn: 0.0,
            vy_kn: 0.0,
            source_id: None,
            case_label: None,
        }
    }

    /// Set the minor-axis moment (builder pattern)
    pub fn with_my(mut self, my_knm: f64) -> Self {
        self.my_knm = my_knm;
        self
    }

    /// Set both shear components (builder pattern)
    pub fn with_shear(mut self, vx_kn: f64, vy_kn: f64) -> Self {
        self.vx_kn = vx_kn;
        self.vy_kn = vy_kn;
        self
    }

    /// Attach import metadata (builder pattern)
    pub fn with_source(mut self, source_id: impl Into<String>, case_label: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self.case_label = Some(case_label.into());
        self
    }

    /// Resultant shear √(Vx² + Vy²) (kN)
    pub fn shear_resultant_kn(&self) -> f64 {
        (self.vx_kn * self.vx_kn + self.vy_kn * self.vy_kn).sqrt()
    }

    /// Net uplift demand max(0, -N) (kN)
    pub fn uplift_kn(&self) -> f64 {
        (-self.n_kn).max(0.0)
    }

    /// Display label: case label, source id, or a placeholder
    pub fn display_label(&self) -> String {
        match (&self.case_label, &self.source_id) {
            (Some(label), Some(id)) => format!("{} @ {}", label, id),
            (Some(label), None) => label.clone(),
            (None, Some(id)) => id.clone(),
            (None, None) => "(unnamed)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let case = LoadCase::new(200.0, 50.0).with_my(10.0).with_shear(3.0, 4.0);
        assert_eq!(case.n_kn, 200.0);
        assert_eq!(case.mx_knm, 50.0);
        assert_eq!(case.my_knm, 10.0);
        assert_eq!(case.shear_resultant_kn(), 5.0);
    }

    #[test]
    fn test_uplift() {
        assert_eq!(LoadCase::new(200.0, 0.0).uplift_kn(), 0.0);
        assert_eq!(LoadCase::new(-120.0, 0.0).uplift_kn(), 120.0);
    }

    #[test]
    fn test_display_label() {
        let case = LoadCase::new(0.0, 0.0).with_source("J-3", "ASD-8'");
        assert_eq!(case.display_label(), "ASD-8' @ J-3");
        assert_eq!(LoadCase::new(0.0, 0.0).display_label(), "(unnamed)");
    }

    #[test]
    fn test_serialization_omits_empty_metadata() {
        let case = LoadCase::new(100.0, 25.0);
        let json = serde_json::to_string(&case).unwrap();
        assert!(!json.contains("source_id"));

        let roundtrip: LoadCase = serde_json::from_str(&json).unwrap();
        assert_eq!(case, roundtrip);
    }
}
