//! # Combination Evaluator
//!
//! Runs the full check pipeline for one load case and reduces a batch of
//! cases to one governing record per discipline.
//!
//! Each evaluation is a pure function of (config, load case): bearing
//! pressure first, then the friction/anchor shear split, per-anchor demand
//! distribution, anchor steel and concrete checks, plate bending and weld
//! sizing. Batches run serially in row order; a row that errors is tagged
//! and excluded from governing selection while the rest of the batch
//! continues. Ties on utilization resolve to the last row evaluated.

use serde::{Deserialize, Serialize};

use crate::checks::anchor_concrete::{self, ConcreteCheck};
use crate::checks::anchor_steel::{self, SteelCheck};
use crate::checks::bolt_group::{self, AnchorDemands};
use crate::checks::plate::{self, PlateCheck};
use crate::checks::pressure::{self, PressureResult, EPS};
use crate::checks::shear_path::{self, ShearSplit};
use crate::checks::welds::{self, WeldCheck};
use crate::config::{DesignConfig, ShearDistribution};
use crate::errors::{CalcError, CalcResult};
use crate::loads::LoadCase;

/// Check disciplines reported in governing summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Discipline {
    Bearing,
    Anchors,
    Plate,
    Weld,
}

impl Discipline {
    pub const ALL: [Discipline; 4] = [
        Discipline::Bearing,
        Discipline::Anchors,
        Discipline::Plate,
        Discipline::Weld,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Discipline::Bearing => "bearing",
            Discipline::Anchors => "anchors",
            Discipline::Plate => "plate",
            Discipline::Weld => "weld",
        }
    }
}

/// Anchor group result: resolved distribution mode, per-anchor demands,
/// and the steel and concrete checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorResult {
    /// Shear distribution mode actually used (Auto resolved to a fixed mode)
    pub shear_mode: ShearDistribution,
    /// Largest single-anchor tension (kN)
    pub max_tension_kn: f64,
    /// Largest single-anchor shear (kN)
    pub max_shear_kn: f64,
    pub steel: SteelCheck,
    pub concrete: ConcreteCheck,
}

impl AnchorResult {
    /// Worst of the steel interaction and the concrete modes
    pub fn utilization(&self) -> f64 {
        self.steel.util_combined.max(self.concrete.max_utilization())
    }
}

/// Complete evaluation of one load case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseEvaluation {
    pub loads: LoadCase,
    pub pressure: PressureResult,
    pub friction: ShearSplit,
    pub anchors: AnchorResult,
    pub plate: PlateCheck,
    pub weld: WeldCheck,
}

impl CaseEvaluation {
    /// Scalar utilization for one discipline
    pub fn utilization(&self, discipline: Discipline) -> f64 {
        match discipline {
            Discipline::Bearing => self.pressure.bearing_utilization(),
            Discipline::Anchors => self.anchors.utilization(),
            Discipline::Plate => self.plate.ratio,
            Discipline::Weld => self.weld.utilization,
        }
    }
}

/// One batch row: the evaluation, or the error that stopped it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowRecord {
    pub index: usize,
    pub loads: LoadCase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<CaseEvaluation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<CalcError>,
}

/// Governing row for one discipline across the batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoverningRecord {
    pub discipline: Discipline,
    pub row_index: usize,
    pub loads: LoadCase,
    pub evaluation: CaseEvaluation,
    pub utilization: f64,
}

/// Full batch output: every row plus the per-discipline governing records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub rows: Vec<RowRecord>,
    pub governing: Vec<GoverningRecord>,
}

impl BatchResult {
    /// Governing record for one discipline, if any row evaluated cleanly
    pub fn governing_for(&self, discipline: Discipline) -> Option<&GoverningRecord> {
        self.governing.iter().find(|g| g.discipline == discipline)
    }

    /// Number of rows that failed with an error
    pub fn error_count(&self) -> usize {
        self.rows.iter().filter(|r| r.error.is_some()).count()
    }
}

/// Evaluate one load case through the full pipeline.
///
/// Configuration errors surface immediately; only loads vary between
/// calls against the same config.
pub fn evaluate_case(config: &DesignConfig, loads: &LoadCase) -> CalcResult<CaseEvaluation> {
    config.validate()?;
    validate_loads(loads)?;

    let pressure = pressure::solve(
        &config.geometry,
        &config.materials,
        config.method.pressure_case,
        loads.n_kn,
        loads.mx_knm,
    );

    let v_required = loads.shear_resultant_kn();
    let friction = shear_path::split(
        v_required,
        loads.n_kn,
        config.method.friction_mu,
        config.method.anchors_resist_shear,
    );

    let positions = config.anchorage.layout.positions();
    let tension_kn = bolt_group::distribute_tension(
        loads.uplift_kn(),
        loads.mx_knm,
        loads.my_knm,
        &positions,
    );

    let capacities = anchor_steel::capacities(
        config.materials.anchor_grade,
        config.anchorage.diameter_mm,
        config.anchorage.thread,
        &config.materials.phi,
    );

    let (shear_mode, shear_kn, steel) = resolve_shear_mode(
        config,
        friction.v_to_anchors_kn,
        &tension_kn,
        &positions,
        capacities,
    );

    let demands = AnchorDemands {
        tension_kn,
        shear_kn,
    };
    let group_tension: f64 = demands.tension_kn.iter().sum();
    let concrete = anchor_concrete::check(
        &config.materials,
        &config.anchorage,
        config.method.k_cp,
        group_tension,
        demands.max_tension_kn(),
        friction.v_to_anchors_kn,
    );

    let plate = plate::check(
        &config.geometry,
        &config.materials.plate,
        config.materials.concrete.fc_mpa,
        &config.method,
        &pressure,
    );
    let weld = welds::size(&config.geometry.column, &config.method, v_required);

    Ok(CaseEvaluation {
        loads: loads.clone(),
        pressure,
        friction,
        anchors: AnchorResult {
            shear_mode,
            max_tension_kn: demands.max_tension_kn(),
            max_shear_kn: demands.max_shear_kn(),
            steel,
            concrete,
        },
        plate,
        weld,
    })
}

/// Evaluate a batch serially in row order.
///
/// The configuration is validated once up front; a bad configuration fails
/// the whole batch before any row runs. Row errors are captured in the row
/// record and excluded from governing selection.
pub fn evaluate_batch(config: &DesignConfig, cases: &[LoadCase]) -> CalcResult<BatchResult> {
    config.validate()?;

    let mut rows = Vec::with_capacity(cases.len());
    for (index, loads) in cases.iter().enumerate() {
        match evaluate_case(config, loads) {
            Ok(evaluation) => rows.push(RowRecord {
                index,
                loads: loads.clone(),
                evaluation: Some(evaluation),
                error: None,
            }),
            Err(error) => rows.push(RowRecord {
                index,
                loads: loads.clone(),
                evaluation: None,
                error: Some(error),
            }),
        }
    }

    let mut governing = Vec::new();
    for discipline in Discipline::ALL {
        let mut best: Option<GoverningRecord> = None;
        for row in &rows {
            let evaluation = match &row.evaluation {
                Some(e) => e,
                None => continue,
            };
            let utilization = evaluation.utilization(discipline);
            // >= keeps the last row on ties
            let replace = match &best {
                Some(current) => utilization >= current.utilization,
                None => true,
            };
            if replace {
                best = Some(GoverningRecord {
                    discipline,
                    row_index: row.index,
                    loads: row.loads.clone(),
                    evaluation: evaluation.clone(),
                    utilization,
                });
            }
        }
        if let Some(record) = best {
            governing.push(record);
        }
    }

    Ok(BatchResult { rows, governing })
}

/// Resolve the shear distribution mode, searching the Auto candidates for
/// the one producing the worst per-anchor steel utilization.
fn resolve_shear_mode(
    config: &DesignConfig,
    v_to_anchors_kn: f64,
    tension_kn: &[f64],
    positions: &[(f64, f64)],
    capacities: anchor_steel::SteelCapacities,
) -> (ShearDistribution, Vec<f64>, SteelCheck) {
    let interaction = config.method.steel_interaction;
    match config.method.shear_mode {
        ShearDistribution::Auto => {
            let mut best: Option<(ShearDistribution, Vec<f64>, SteelCheck)> = None;
            for mode in ShearDistribution::AUTO_CANDIDATES {
                let shear_kn = bolt_group::distribute_shear(v_to_anchors_kn, mode, positions);
                let steel = anchor_steel::check(tension_kn, &shear_kn, capacities, interaction);
                let replace = match &best {
                    Some((_, _, current)) => {
                        steel.util_combined > current.util_combined + EPS
                    }
                    None => true,
                };
                if replace {
                    best = Some((mode, shear_kn, steel));
                }
            }
            // AUTO_CANDIDATES is non-empty
            best.unwrap_or_else(|| {
                let shear_kn =
                    bolt_group::distribute_shear(v_to_anchors_kn, ShearDistribution::Uniform, positions);
                let steel = anchor_steel::check(tension_kn, &shear_kn, capacities, interaction);
                (ShearDistribution::Uniform, shear_kn, steel)
            })
        }
        mode => {
            let shear_kn = bolt_group::distribute_shear(v_to_anchors_kn, mode, positions);
            let steel = anchor_steel::check(tension_kn, &shear_kn, capacities, interaction);
            (mode, shear_kn, steel)
        }
    }
}

fn validate_loads(loads: &LoadCase) -> CalcResult<()> {
    let named = [
        ("n_kn", loads.n_kn),
        ("mx_knm", loads.mx_knm),
        ("my_knm", loads.my_knm),
        ("vx_kn", loads.vx_kn),
        ("vy_kn", loads.vy_kn),
    ];
    for (name, value) in named {
        if !value.is_finite() {
            return Err(CalcError::invalid_input(
                name,
                value.to_string(),
                "Load component must be finite",
            ));
        }
    }
    Ok(())
}
