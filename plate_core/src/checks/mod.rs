//! # Design Checks
//!
//! The pure calculation pipeline: each submodule is a stateless solver
//! taking configuration plus load demands and returning a serializable
//! result. The evaluator composes them in dependency order.

pub mod anchor_concrete;
pub mod anchor_steel;
pub mod bolt_group;
pub mod plate;
pub mod pressure;
pub mod shear_path;
pub mod welds;
