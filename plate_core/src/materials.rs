//! # Material Definitions
//!
//! Concrete, plate steel, anchor rod grades and resistance factors.
//!
//! Anchor grade strengths follow common base-plate practice (ASTM F1554,
//! A307, A193 B7, A449, ISO property classes). The `Custom` variant covers
//! anything outside the table.
//!
//! ## Example
//!
//! ```rust
//! use plate_core::materials::{AnchorGrade, MaterialsConfig, Concrete, PlateSteel, PhiFactors};
//!
//! let materials = MaterialsConfig {
//!     concrete: Concrete { fc_mpa: 31.0 },
//!     plate: PlateSteel { fy_mpa: 345.0 },
//!     anchor_grade: AnchorGrade::F1554Gr55,
//!     phi: PhiFactors::default(),
//! };
//! assert!(materials.validate().is_ok());
//! assert_eq!(materials.anchor_grade.fu_mpa(), 620.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Concrete material (foundation / pedestal)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Concrete {
    /// Specified compressive strength f'c (MPa)
    pub fc_mpa: f64,
}

impl Concrete {
    pub fn validate(&self) -> CalcResult<()> {
        if self.fc_mpa <= 0.0 {
            return Err(CalcError::invalid_input(
                "fc_mpa",
                self.fc_mpa.to_string(),
                "Concrete strength must be positive",
            ));
        }
        Ok(())
    }
}

/// Base plate steel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateSteel {
    /// Yield strength fy (MPa)
    pub fy_mpa: f64,
}

impl PlateSteel {
    pub fn validate(&self) -> CalcResult<()> {
        if self.fy_mpa <= 0.0 {
            return Err(CalcError::invalid_input(
                "fy_mpa",
                self.fy_mpa.to_string(),
                "Plate yield strength must be positive",
            ));
        }
        Ok(())
    }
}

/// Anchor rod grade with tabulated fu/fy (MPa)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AnchorGrade {
    /// ASTM F1554 Grade 36
    F1554Gr36,
    /// ASTM F1554 Grade 55
    F1554Gr55,
    /// ASTM F1554 Grade 105
    F1554Gr105,
    /// ASTM A307
    A307,
    /// ASTM A193 Grade B7
    A193B7,
    /// ASTM A449
    A449,
    /// ISO property class 8.8
    Iso88,
    /// ISO property class 10.9
    Iso109,
    /// User-supplied strengths
    Custom { fu_mpa: f64, fy_mpa: f64 },
}

impl AnchorGrade {
    /// All tabulated grades, in display order
    pub const TABULATED: [AnchorGrade; 8] = [
        AnchorGrade::F1554Gr36,
        AnchorGrade::F1554Gr55,
        AnchorGrade::F1554Gr105,
        AnchorGrade::A307,
        AnchorGrade::A193B7,
        AnchorGrade::A449,
        AnchorGrade::Iso88,
        AnchorGrade::Iso109,
    ];

    /// Ultimate tensile strength fu (MPa)
    pub fn fu_mpa(&self) -> f64 {
        match self {
            AnchorGrade::F1554Gr36 => 400.0,
            AnchorGrade::F1554Gr55 => 620.0,
            AnchorGrade::F1554Gr105 => 896.0,
            AnchorGrade::A307 => 414.0,
            AnchorGrade::A193B7 => 860.0,
            AnchorGrade::A449 => 965.0,
            AnchorGrade::Iso88 => 800.0,
            AnchorGrade::Iso109 => 1040.0,
            AnchorGrade::Custom { fu_mpa, .. } => *fu_mpa,
        }
    }

    /// Yield strength fy (MPa)
    pub fn fy_mpa(&self) -> f64 {
        match self {
            AnchorGrade::F1554Gr36 => 248.0,
            AnchorGrade::F1554Gr55 => 380.0,
            AnchorGrade::F1554Gr105 => 724.0,
            AnchorGrade::A307 => 207.0,
            AnchorGrade::A193B7 => 724.0,
            AnchorGrade::A449 => 620.0,
            AnchorGrade::Iso88 => 640.0,
            AnchorGrade::Iso109 => 900.0,
            AnchorGrade::Custom { fy_mpa, .. } => *fy_mpa,
        }
    }

    /// Grade label for display and reports
    pub fn label(&self) -> &'static str {
        match self {
            AnchorGrade::F1554Gr36 => "F1554 Gr.36",
            AnchorGrade::F1554Gr55 => "F1554 Gr.55",
            AnchorGrade::F1554Gr105 => "F1554 Gr.105",
            AnchorGrade::A307 => "A307",
            AnchorGrade::A193B7 => "A193 B7",
            AnchorGrade::A449 => "A449",
            AnchorGrade::Iso88 => "ISO 8.8",
            AnchorGrade::Iso109 => "ISO 10.9",
            AnchorGrade::Custom { .. } => "Custom",
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        if let AnchorGrade::Custom { fu_mpa, fy_mpa } = self {
            if *fu_mpa <= 0.0 || *fy_mpa <= 0.0 {
                return Err(CalcError::invalid_input(
                    "anchor_grade",
                    format!("fu={} fy={}", fu_mpa, fy_mpa),
                    "Custom anchor strengths must be positive",
                ));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for AnchorGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Resistance (strength-reduction) factors per failure mode.
///
/// Each factor must lie in (0, 1]. Defaults follow common LRFD anchorage
/// practice for cast-in anchors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhiFactors {
    /// Anchor steel in tension
    pub steel_tension: f64,
    /// Anchor steel in shear
    pub steel_shear: f64,
    /// Concrete tension breakout
    pub breakout: f64,
    /// Concrete shear breakout
    pub shear_breakout: f64,
    /// Anchor pullout
    pub pullout: f64,
    /// Concrete pryout
    pub pryout: f64,
    /// Concrete bearing under the plate
    pub bearing: f64,
}

impl Default for PhiFactors {
    fn default() -> Self {
        PhiFactors {
            steel_tension: 0.75,
            steel_shear: 0.65,
            breakout: 0.65,
            shear_breakout: 0.70,
            pullout: 0.70,
            pryout: 0.70,
            bearing: 0.65,
        }
    }
}

impl PhiFactors {
    pub fn validate(&self) -> CalcResult<()> {
        let named = [
            ("phi_steel_tension", self.steel_tension),
            ("phi_steel_shear", self.steel_shear),
            ("phi_breakout", self.breakout),
            ("phi_shear_breakout", self.shear_breakout),
            ("phi_pullout", self.pullout),
            ("phi_pryout", self.pryout),
            ("phi_bearing", self.bearing),
        ];
        for (name, value) in named {
            if value <= 0.0 || value > 1.0 {
                return Err(CalcError::invalid_input(
                    name,
                    value.to_string(),
                    "Resistance factor must lie in (0, 1]",
                ));
            }
        }
        Ok(())
    }
}

/// Complete material configuration for a design
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialsConfig {
    pub concrete: Concrete,
    pub plate: PlateSteel,
    pub anchor_grade: AnchorGrade,
    pub phi: PhiFactors,
}

impl MaterialsConfig {
    pub fn validate(&self) -> CalcResult<()> {
        self.concrete.validate()?;
        self.plate.validate()?;
        self.anchor_grade.validate()?;
        self.phi.validate()?;
        Ok(())
    }
}
