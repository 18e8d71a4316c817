//! # plate_core - Base Plate Connection Design Engine
//!
//! `plate_core` is the calculation engine for exposed steel base-plate and
//! anchor-bolt connections: bearing pressure under the plate, the
//! friction/anchor shear path, anchor steel and concrete capacity, plate
//! bending, weld sizing, and governing-case selection over a batch of load
//! combinations. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every evaluation is a pure function of (config, loads)
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Deterministic**: fixed row order, documented tie-break, ε-guarded math
//!
//! ## Quick Start
//!
//! ```rust
//! use plate_core::evaluator::{evaluate_batch, Discipline};
//! use plate_core::loads::LoadCase;
//! use plate_core::project::Project;
//!
//! let project = Project::new("John Engineer", "25-001", "Acme Construction");
//! let cases = vec![
//!     LoadCase::new(200.0, 50.0).with_shear(35.0, 10.0),
//!     LoadCase::new(-80.0, 20.0).with_shear(90.0, 0.0),
//! ];
//!
//! let batch = evaluate_batch(&project.config, &cases).unwrap();
//! let bearing = batch.governing_for(Discipline::Bearing).unwrap();
//! assert!(bearing.utilization.is_finite());
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Immutable design configuration (geometry, anchorage, method)
//! - [`materials`] - Concrete, plate steel, anchor grades, φ factors
//! - [`loads`] - Standardized load-case records
//! - [`checks`] - The check pipeline (pressure, shear path, anchors, plate, welds)
//! - [`evaluator`] - Single-case pipeline and batch governing selection
//! - [`report`] - Flat key→value result rendering
//! - [`project`] - Project container and metadata
//! - [`file_io`] - File operations with atomic saves and locking
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod checks;
pub mod config;
pub mod errors;
pub mod evaluator;
pub mod file_io;
pub mod loads;
pub mod materials;
pub mod project;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use config::DesignConfig;
pub use errors::{CalcError, CalcResult};
pub use evaluator::{evaluate_batch, evaluate_case, BatchResult, CaseEvaluation, Discipline};
pub use file_io::{load_project, save_project, FileLock};
pub use loads::LoadCase;
pub use project::{Project, ProjectMetadata};
