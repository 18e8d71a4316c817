//! # Project Data Structures
//!
//! The `Project` struct is the root container for one connection design:
//! metadata, the design configuration, and the stored load-case batch.
//! Projects serialize to `.bpd` (base plate design) files as human-readable
//! JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, id, engineer, job info, timestamps)
//! ├── config: DesignConfig (materials, geometry, anchorage, method)
//! └── batch: Vec<LoadCase> (stored load combinations)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use plate_core::project::Project;
//! use plate_core::loads::LoadCase;
//!
//! let mut project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! project.push_case(LoadCase::new(200.0, 50.0));
//!
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("25-042"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{
    AnchorLayout, AnchorageConfig, ColumnFootprint, DesignConfig, GeometryConfig, MethodConfig,
    ThreadSpec,
};
use crate::loads::LoadCase;
use crate::materials::{AnchorGrade, Concrete, MaterialsConfig, PhiFactors, PlateSteel};

/// Current schema version for .bpd files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container serialized to `.bpd` files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// The design configuration evaluated against every stored case
    pub config: DesignConfig,

    /// Stored load combinations, in import order
    pub batch: Vec<LoadCase>,
}

impl Project {
    /// Create a new project with a workable default configuration.
    pub fn new(
        engineer: impl Into<String>,
        job_id: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                id: Uuid::new_v4(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            config: default_config(),
            batch: Vec::new(),
        }
    }

    /// Append a load case to the stored batch
    pub fn push_case(&mut self, case: LoadCase) {
        self.batch.push(case);
        self.touch();
    }

    /// Replace the whole batch (e.g. after a fresh import)
    pub fn set_batch(&mut self, cases: Vec<LoadCase>) {
        self.batch = cases;
        self.touch();
    }

    /// Number of stored load cases
    pub fn case_count(&self) -> usize {
        self.batch.len()
    }

    /// Update the modified timestamp
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Stable project identifier
    pub id: Uuid,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Starting-point configuration for a new project: a 1054x800 plate on
/// unconfined 31 MPa concrete with a 2x2 grid of 1" F1554 Gr.55 rods.
fn default_config() -> DesignConfig {
    DesignConfig {
        materials: MaterialsConfig {
            concrete: Concrete { fc_mpa: 31.0 },
            plate: PlateSteel { fy_mpa: 345.0 },
            anchor_grade: AnchorGrade::F1554Gr55,
            phi: PhiFactors::default(),
        },
        geometry: GeometryConfig {
            plate_a_mm: 1054.0,
            plate_b_mm: 800.0,
            plate_t_mm: 32.0,
            column: ColumnFootprint::default(),
            pedestal: None,
            a2_a1_override: None,
            stiffened: false,
        },
        anchorage: AnchorageConfig {
            layout: AnchorLayout::Grid {
                rows: 2,
                cols: 2,
                spacing_x_mm: 400.0,
                spacing_y_mm: 500.0,
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
    }
}
