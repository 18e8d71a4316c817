//! # Design Configuration
//!
//! Immutable configuration objects set up once per design and shared across
//! every load-case evaluation. The engine never mutates these; each
//! evaluation is a pure function of (config, load case).
//!
//! ## Example
//!
//! ```rust
//! use plate_core::config::{GeometryConfig, ColumnFootprint};
//!
//! let geometry = GeometryConfig {
//!     plate_a_mm: 1054.0,
//!     plate_b_mm: 800.0,
//!     plate_t_mm: 32.0,
//!     column: ColumnFootprint { depth_mm: 400.0, flange_width_mm: 300.0 },
//!     pedestal: None,
//!     a2_a1_override: None,
//!     stiffened: false,
//! };
//! assert!(geometry.validate().is_ok());
//! assert_eq!(geometry.confinement_ratio(), 1.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialsConfig;

/// Column footprint on the plate (W-shape idealized as depth x flange width)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnFootprint {
    /// Section depth d (mm)
    pub depth_mm: f64,
    /// Flange width bf (mm)
    pub flange_width_mm: f64,
}

impl Default for ColumnFootprint {
    fn default() -> Self {
        ColumnFootprint {
            depth_mm: 300.0,
            flange_width_mm: 300.0,
        }
    }
}

/// Pedestal footprint used to derive the bearing confinement ratio A2/A1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pedestal {
    /// Pedestal width along x (mm)
    pub width_mm: f64,
    /// Pedestal length along y (mm)
    pub length_mm: f64,
}

/// Plate and support geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Plate dimension along x, the bending direction for Mx (mm)
    pub plate_a_mm: f64,
    /// Plate dimension along y (mm)
    pub plate_b_mm: f64,
    /// Provided plate thickness (mm)
    pub plate_t_mm: f64,
    /// Column footprint
    pub column: ColumnFootprint,
    /// Optional pedestal footprint (for A2/A1)
    pub pedestal: Option<Pedestal>,
    /// Explicit A2/A1 override; takes precedence over the pedestal footprint
    pub a2_a1_override: Option<f64>,
    /// Plate stiffeners present (reduces effective cantilever lengths)
    pub stiffened: bool,
}

impl GeometryConfig {
    /// Bearing confinement ratio A2/A1, never below 1.0.
    ///
    /// Uses the explicit override when given, otherwise the pedestal-to-plate
    /// area ratio, otherwise 1.0 (unconfined).
    pub fn confinement_ratio(&self) -> f64 {
        if let Some(ratio) = self.a2_a1_override {
            return ratio.max(1.0);
        }
        let plate_area = self.plate_a_mm * self.plate_b_mm;
        if let Some(p) = &self.pedestal {
            if p.width_mm > 0.0 && p.length_mm > 0.0 && plate_area > 0.0 {
                return ((p.width_mm * p.length_mm) / plate_area).max(1.0);
            }
        }
        1.0
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.plate_a_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "plate_a_mm",
                self.plate_a_mm.to_string(),
                "Plate dimension must be positive",
            ));
        }
        if self.plate_b_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "plate_b_mm",
                self.plate_b_mm.to_string(),
                "Plate dimension must be positive",
            ));
        }
        if self.plate_t_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "plate_t_mm",
                self.plate_t_mm.to_string(),
                "Plate thickness must be positive",
            ));
        }
        if self.column.depth_mm <= 0.0 || self.column.flange_width_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "column",
                format!(
                    "d={} bf={}",
                    self.column.depth_mm, self.column.flange_width_mm
                ),
                "Column footprint dimensions must be positive",
            ));
        }
        if let Some(ratio) = self.a2_a1_override {
            if ratio < 1.0 {
                return Err(CalcError::invalid_input(
                    "a2_a1_override",
                    ratio.to_string(),
                    "Confinement ratio A2/A1 must be at least 1.0",
                ));
            }
        }
        if let Some(p) = &self.pedestal {
            if p.width_mm <= 0.0 || p.length_mm <= 0.0 {
                return Err(CalcError::invalid_input(
                    "pedestal",
                    format!("{}x{}", p.width_mm, p.length_mm),
                    "Pedestal dimensions must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// Thread specification for the anchor effective stress area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThreadSpec {
    /// Unified (inch) threads: threads per inch
    UnifiedTpi { tpi: f64 },
    /// Metric threads: pitch in mm
    MetricPitch { pitch_mm: f64 },
    /// No thread data; a conservative d - 1.5 mm core is assumed
    Unspecified,
}

impl ThreadSpec {
    pub fn validate(&self) -> CalcResult<()> {
        match self {
            ThreadSpec::UnifiedTpi { tpi } if *tpi <= 0.0 => Err(CalcError::invalid_input(
                "thread.tpi",
                tpi.to_string(),
                "Threads per inch must be positive",
            )),
            ThreadSpec::MetricPitch { pitch_mm } if *pitch_mm <= 0.0 => {
                Err(CalcError::invalid_input(
                    "thread.pitch_mm",
                    pitch_mm.to_string(),
                    "Thread pitch must be positive",
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Anchor positions: a regular grid, or explicit coordinates.
///
/// Coordinates are relative to the plate centroid (mm), x along plate
/// dimension `a`, y along `b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnchorLayout {
    Grid {
        rows: usize,
        cols: usize,
        spacing_x_mm: f64,
        spacing_y_mm: f64,
    },
    Explicit {
        positions_mm: Vec<(f64, f64)>,
    },
}

impl AnchorLayout {
    /// Materialize the anchor coordinates, centered on the plate centroid.
    ///
    /// Grid rows run along y, columns along x.
    pub fn positions(&self) -> Vec<(f64, f64)> {
        match self {
            AnchorLayout::Grid {
                rows,
                cols,
                spacing_x_mm,
                spacing_y_mm,
            } => {
                let mut out = Vec::with_capacity(rows * cols);
                let x0 = -(*cols as f64 - 1.0) / 2.0 * spacing_x_mm;
                let y0 = -(*rows as f64 - 1.0) / 2.0 * spacing_y_mm;
                for r in 0..*rows {
                    for c in 0..*cols {
                        out.push((x0 + c as f64 * spacing_x_mm, y0 + r as f64 * spacing_y_mm));
                    }
                }
                out
            }
            AnchorLayout::Explicit { positions_mm } => positions_mm.clone(),
        }
    }

    /// Number of anchors in the layout
    pub fn count(&self) -> usize {
        match self {
            AnchorLayout::Grid { rows, cols, .. } => rows * cols,
            AnchorLayout::Explicit { positions_mm } => positions_mm.len(),
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        match self {
            AnchorLayout::Grid {
                rows,
                cols,
                spacing_x_mm,
                spacing_y_mm,
            } => {
                if *rows == 0 || *cols == 0 {
                    return Err(CalcError::invalid_input(
                        "anchor_layout",
                        format!("{}x{}", rows, cols),
                        "Anchor grid must have at least one row and one column",
                    ));
                }
                if (*cols > 1 && *spacing_x_mm <= 0.0) || (*rows > 1 && *spacing_y_mm <= 0.0) {
                    return Err(CalcError::invalid_input(
                        "anchor_layout",
                        format!("sx={} sy={}", spacing_x_mm, spacing_y_mm),
                        "Anchor spacing must be positive",
                    ));
                }
                Ok(())
            }
            AnchorLayout::Explicit { positions_mm } => {
                if positions_mm.is_empty() {
                    return Err(CalcError::invalid_input(
                        "anchor_layout",
                        "[]".to_string(),
                        "Explicit anchor layout must contain at least one anchor",
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Anchorage configuration: rod size, embedment, edge distances, cracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorageConfig {
    pub layout: AnchorLayout,
    /// Nominal rod diameter (mm)
    pub diameter_mm: f64,
    /// Effective embedment depth hef (mm)
    pub hef_mm: f64,
    /// Edge distance from the anchor group to the left plate edge (mm, -x)
    pub edge_left_mm: f64,
    /// Edge distance to the right edge (mm, +x)
    pub edge_right_mm: f64,
    /// Edge distance to the top edge (mm, +y)
    pub edge_top_mm: f64,
    /// Edge distance to the bottom edge (mm, -y)
    pub edge_bottom_mm: f64,
    /// Concrete assumed cracked at service load levels
    pub cracked: bool,
    /// Thread specification for the effective stress area
    pub thread: ThreadSpec,
}

impl AnchorageConfig {
    /// Smallest of the four edge distances (mm)
    pub fn min_edge_mm(&self) -> f64 {
        self.edge_left_mm
            .min(self.edge_right_mm)
            .min(self.edge_top_mm)
            .min(self.edge_bottom_mm)
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.layout.validate()?;
        self.thread.validate()?;
        if self.diameter_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "diameter_mm",
                self.diameter_mm.to_string(),
                "Anchor diameter must be positive",
            ));
        }
        if self.hef_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "hef_mm",
                self.hef_mm.to_string(),
                "Embedment depth must be positive",
            ));
        }
        let edges = [
            ("edge_left_mm", self.edge_left_mm),
            ("edge_right_mm", self.edge_right_mm),
            ("edge_top_mm", self.edge_top_mm),
            ("edge_bottom_mm", self.edge_bottom_mm),
        ];
        for (name, value) in edges {
            if value <= 0.0 {
                return Err(CalcError::invalid_input(
                    name,
                    value.to_string(),
                    "Edge distance must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// Bearing pressure equilibrium model for the partial-contact branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureCase {
    /// Triangular block, bearing strength not limiting
    Case1,
    /// Rectangular block, bearing strength not limiting
    Case2,
    /// Rectangular block at bearing strength (capacity-limited)
    Case3,
    /// Triangular block at bearing strength (capacity-limited)
    Case4,
}

impl PressureCase {
    pub const ALL: [PressureCase; 4] = [
        PressureCase::Case1,
        PressureCase::Case2,
        PressureCase::Case3,
        PressureCase::Case4,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PressureCase::Case1 => "CASE_1",
            PressureCase::Case2 => "CASE_2",
            PressureCase::Case3 => "CASE_3",
            PressureCase::Case4 => "CASE_4",
        }
    }
}

impl std::fmt::Display for PressureCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Pressure case selection: a fixed model, or a worst-of-all search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PressureCaseSelect {
    Case1,
    Case2,
    Case3,
    Case4,
    /// Evaluate all four models and report the one with maximum utilization
    #[default]
    Auto,
}

impl PressureCaseSelect {
    /// The candidate models this selection evaluates
    pub fn candidates(&self) -> &'static [PressureCase] {
        match self {
            PressureCaseSelect::Case1 => &[PressureCase::Case1],
            PressureCaseSelect::Case2 => &[PressureCase::Case2],
            PressureCaseSelect::Case3 => &[PressureCase::Case3],
            PressureCaseSelect::Case4 => &[PressureCase::Case4],
            PressureCaseSelect::Auto => &PressureCase::ALL,
        }
    }
}

/// How group shear is apportioned across the anchor grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShearDistribution {
    /// Equal split across all anchors
    Uniform,
    /// Entire shear to the row farthest from the plate centroid
    FarRow,
    /// Entire shear to the nearest row
    NearRow,
    /// Split weighted by distance from the shear center
    Elastic,
    /// Evaluate Uniform/FarRow/NearRow and report the worst
    #[default]
    Auto,
}

impl ShearDistribution {
    /// The fixed modes an `Auto` selection searches
    pub const AUTO_CANDIDATES: [ShearDistribution; 3] = [
        ShearDistribution::Uniform,
        ShearDistribution::FarRow,
        ShearDistribution::NearRow,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ShearDistribution::Uniform => "UNIFORM",
            ShearDistribution::FarRow => "FAR_ROW",
            ShearDistribution::NearRow => "NEAR_ROW",
            ShearDistribution::Elastic => "ELASTIC",
            ShearDistribution::Auto => "AUTO",
        }
    }
}

/// Plate bending check method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlateMethod {
    /// Cantilever strips beyond the column flange/web (DG1 style)
    #[default]
    CantileverStrips,
    /// Full-section check with a single effective lever arm
    FullSection,
}

/// Tension-shear interaction policy for anchor steel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SteelInteraction {
    /// Conservative linear envelope: max(Ut + Uv, Ut, Uv)
    #[default]
    Envelope,
    /// Power interaction Ut^1.5 + Uv^1.5
    PowerOneFive,
    /// Quadratic interaction Ut^2 + Uv^2
    Quadratic,
}

/// Method and policy knobs for the evaluation pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodConfig {
    pub pressure_case: PressureCaseSelect,
    pub shear_mode: ShearDistribution,
    pub plate_method: PlateMethod,
    pub steel_interaction: SteelInteraction,
    /// Friction coefficient at the plate/grout interface
    pub friction_mu: f64,
    /// Anchors are detailed to resist the full shear (no friction path)
    pub anchors_resist_shear: bool,
    /// Pryout coefficient k_cp
    pub k_cp: f64,
    /// Weld electrode strength F_EXX (MPa)
    pub f_exx_mpa: f64,
    /// Provided fillet weld size (mm)
    pub weld_size_mm: f64,
    /// Minimum plate thickness floor for the bending check (mm)
    pub plate_t_min_mm: f64,
    /// Mean-pressure cap for the full-section plate method, as a fraction of f'c
    pub full_section_pressure_cap: f64,
}

impl Default for MethodConfig {
    fn default() -> Self {
        MethodConfig {
            pressure_case: PressureCaseSelect::Auto,
            shear_mode: ShearDistribution::Auto,
            plate_method: PlateMethod::CantileverStrips,
            steel_interaction: SteelInteraction::Envelope,
            friction_mu: 0.4,
            anchors_resist_shear: false,
            k_cp: 2.0,
            f_exx_mpa: 483.0,
            weld_size_mm: 6.0,
            plate_t_min_mm: 6.0,
            full_section_pressure_cap: 0.35,
        }
    }
}

impl MethodConfig {
    pub fn validate(&self) -> CalcResult<()> {
        if self.friction_mu < 0.0 {
            return Err(CalcError::invalid_input(
                "friction_mu",
                self.friction_mu.to_string(),
                "Friction coefficient cannot be negative",
            ));
        }
        if self.k_cp <= 0.0 {
            return Err(CalcError::invalid_input(
                "k_cp",
                self.k_cp.to_string(),
                "Pryout coefficient must be positive",
            ));
        }
        if self.f_exx_mpa <= 0.0 {
            return Err(CalcError::invalid_input(
                "f_exx_mpa",
                self.f_exx_mpa.to_string(),
                "Electrode strength must be positive",
            ));
        }
        if self.weld_size_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "weld_size_mm",
                self.weld_size_mm.to_string(),
                "Provided weld size must be positive",
            ));
        }
        if self.plate_t_min_mm < 0.0 {
            return Err(CalcError::invalid_input(
                "plate_t_min_mm",
                self.plate_t_min_mm.to_string(),
                "Minimum plate thickness cannot be negative",
            ));
        }
        if self.full_section_pressure_cap <= 0.0 || self.full_section_pressure_cap > 1.0 {
            return Err(CalcError::invalid_input(
                "full_section_pressure_cap",
                self.full_section_pressure_cap.to_string(),
                "Pressure cap must lie in (0, 1]",
            ));
        }
        Ok(())
    }
}

/// Complete, immutable design configuration shared by all load-case
/// evaluations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignConfig {
    pub materials: MaterialsConfig,
    pub geometry: GeometryConfig,
    pub anchorage: AnchorageConfig,
    pub method: MethodConfig,
}

impl DesignConfig {
    /// Validate the entire configuration. Called once before any row is
    /// evaluated; configuration problems fail fast here.
    pub fn validate(&self) -> CalcResult<()> {
        self.materials.validate()?;
        self.geometry.validate()?;
        self.anchorage.validate()?;
        self.method.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{AnchorGrade, Concrete, PhiFactors, PlateSteel};

    fn test_geometry() -> GeometryConfig {
        GeometryConfig {
            plate_a_mm: 1054.0,
            plate_b_mm: 800.0,
            plate_t_mm: 32.0,
            column: ColumnFootprint {
                depth_mm: 400.0,
                flange_width_mm: 300.0,
            },
            pedestal: None,
            a2_a1_override: None,
            stiffened: false,
        }
    }

    #[test]
    fn test_confinement_default() {
        assert_eq!(test_geometry().confinement_ratio(), 1.0);
    }

    #[test]
    fn test_confinement_from_pedestal() {
        let mut geometry = test_geometry();
        geometry.pedestal = Some(Pedestal {
            width_mm: 2108.0,
            length_mm: 1600.0,
        });
        // (2108*1600)/(1054*800) = 4.0
        assert!((geometry.confinement_ratio() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_confinement_override_wins() {
        let mut geometry = test_geometry();
        geometry.pedestal = Some(Pedestal {
            width_mm: 2108.0,
            length_mm: 1600.0,
        });
        geometry.a2_a1_override = Some(2.0);
        assert_eq!(geometry.confinement_ratio(), 2.0);
    }

    #[test]
    fn test_geometry_validation() {
        let mut geometry = test_geometry();
        geometry.plate_a_mm = 0.0;
        assert!(geometry.validate().is_err());

        let mut geometry = test_geometry();
        geometry.a2_a1_override = Some(0.5);
        assert!(geometry.validate().is_err());
    }

    #[test]
    fn test_grid_positions_centered() {
        let layout = AnchorLayout::Grid {
            rows: 2,
            cols: 2,
            spacing_x_mm: 200.0,
            spacing_y_mm: 300.0,
        };
        let positions = layout.positions();
        assert_eq!(positions.len(), 4);
        assert!(positions.contains(&(-100.0, -150.0)));
        assert!(positions.contains(&(100.0, 150.0)));

        let sum_x: f64 = positions.iter().map(|p| p.0).sum();
        let sum_y: f64 = positions.iter().map(|p| p.1).sum();
        assert!(sum_x.abs() < 1e-9);
        assert!(sum_y.abs() < 1e-9);
    }

    #[test]
    fn test_single_anchor_grid() {
        let layout = AnchorLayout::Grid {
            rows: 1,
            cols: 1,
            spacing_x_mm: 0.0,
            spacing_y_mm: 0.0,
        };
        assert!(layout.validate().is_ok());
        assert_eq!(layout.positions(), vec![(0.0, 0.0)]);
    }

    #[test]
    fn test_empty_explicit_layout_rejected() {
        let layout = AnchorLayout::Explicit {
            positions_mm: vec![],
        };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_auto_candidates() {
        assert_eq!(PressureCaseSelect::Auto.candidates().len(), 4);
        assert_eq!(
            PressureCaseSelect::Case2.candidates(),
            &[PressureCase::Case2]
        );
    }

    #[test]
    fn test_method_defaults_valid() {
        assert!(MethodConfig::default().validate().is_ok());
    }

    #[test]
    fn test_design_config_roundtrip() {
        let config = DesignConfig {
            materials: MaterialsConfig {
                concrete: Concrete { fc_mpa: 31.0 },
                plate: PlateSteel { fy_mpa: 345.0 },
                anchor_grade: AnchorGrade::F1554Gr55,
                phi: PhiFactors::default(),
            },
            geometry: test_geometry(),
            anchorage: AnchorageConfig {
                layout: AnchorLayout::Grid {
                    rows: 2,
                    cols: 2,
                    spacing_x_mm: 200.0,
                    spacing_y_mm: 200.0,
                },
                diameter_mm: 25.4,
                hef_mm: 300.0,
                edge_left_mm: 150.0,
                edge_right_mm: 150.0,
                edge_top_mm: 150.0,
                edge_bottom_mm: 150.0,
                cracked: true,
                thread: ThreadSpec::UnifiedTpi { tpi: 13.0 },
            },
            method: MethodConfig::default(),
        };
        assert!(config.validate().is_ok());

        let json = serde_json::to_string_pretty(&config).unwrap();
        let roundtrip: DesignConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, roundtrip);
    }
}
