//! # Result Flattening
//!
//! Renders evaluation results as flat key→value maps with fixed field
//! names and units (kN, kN·m, MPa, mm). Report and export collaborators
//! consume these maps without knowing the result structs.
//!
//! Numeric values render with three decimal places; ordering follows the
//! BTreeMap key order so repeated runs produce identical documents.

use std::collections::BTreeMap;

use crate::evaluator::{BatchResult, CaseEvaluation, GoverningRecord};

fn fmt(value: f64) -> String {
    format!("{:.3}", value)
}

/// Flatten the bearing pressure result
pub fn pressure_map(evaluation: &CaseEvaluation) -> BTreeMap<String, String> {
    let p = &evaluation.pressure;
    let mut map = BTreeMap::new();
    map.insert("case".to_string(), p.case.label().to_string());
    map.insert("status".to_string(), p.status.label().to_string());
    map.insert("contact_length_m".to_string(), fmt(p.contact_length_m));
    map.insert("sigma_max_MPa".to_string(), fmt(p.sigma_max_mpa));
    map.insert("sigma_min_MPa".to_string(), fmt(p.sigma_min_mpa));
    map.insert("e_over_a".to_string(), fmt(p.e_over_a));
    if let Some(u) = p.utilization {
        map.insert("utilization".to_string(), fmt(u));
    }
    if let Some(w) = &p.warning {
        map.insert("warning".to_string(), w.clone());
    }
    map
}

/// Flatten the anchor steel and concrete results
pub fn anchor_map(evaluation: &CaseEvaluation) -> BTreeMap<String, String> {
    let a = &evaluation.anchors;
    let mut map = BTreeMap::new();
    map.insert("Ase_mm2".to_string(), fmt(a.steel.capacities.ase_mm2));
    map.insert("phi_Nsa_kN".to_string(), fmt(a.steel.capacities.phi_nsa_kn));
    map.insert("phi_Vsa_kN".to_string(), fmt(a.steel.capacities.phi_vsa_kn));
    map.insert("util_tension".to_string(), fmt(a.steel.util_tension));
    map.insert("util_shear".to_string(), fmt(a.steel.util_shear));
    map.insert("util_combined".to_string(), fmt(a.steel.util_combined));
    map.insert("phi_Ncb_kN".to_string(), fmt(a.concrete.phi_ncb_kn));
    map.insert("phi_Npullout_kN".to_string(), fmt(a.concrete.phi_np_kn));
    map.insert("phi_Vcb_kN".to_string(), fmt(a.concrete.phi_vcb_kn));
    map.insert("phi_Vcp_kN".to_string(), fmt(a.concrete.phi_vcp_kn));
    map.insert(
        "controlling".to_string(),
        a.concrete.controlling.label().to_string(),
    );
    map.insert("shear_mode".to_string(), a.shear_mode.label().to_string());
    map
}

/// Flatten the plate bending result
pub fn plate_map(evaluation: &CaseEvaluation) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    map.insert("t_req_mm".to_string(), fmt(evaluation.plate.t_req_mm));
    map.insert("ratio".to_string(), fmt(evaluation.plate.ratio));
    map
}

/// Flatten the weld sizing result
pub fn weld_map(evaluation: &CaseEvaluation) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    map.insert("w_req_mm".to_string(), fmt(evaluation.weld.w_req_mm));
    map.insert(
        "utilization".to_string(),
        fmt(evaluation.weld.utilization),
    );
    map
}

/// All discipline maps for one evaluation, keyed by discipline label
pub fn case_maps(evaluation: &CaseEvaluation) -> BTreeMap<String, BTreeMap<String, String>> {
    let mut maps = BTreeMap::new();
    maps.insert("bearing".to_string(), pressure_map(evaluation));
    maps.insert("anchors".to_string(), anchor_map(evaluation));
    maps.insert("plate".to_string(), plate_map(evaluation));
    maps.insert("weld".to_string(), weld_map(evaluation));
    maps
}

/// One-line summary of a governing record
pub fn governing_line(record: &GoverningRecord) -> String {
    format!(
        "{}: row {} ({}) utilization {}",
        record.discipline.label(),
        record.row_index,
        record.loads.display_label(),
        fmt(record.utilization)
    )
}

/// Batch summary: one line per discipline plus an error count
pub fn batch_summary(batch: &BatchResult) -> Vec<String> {
    let mut lines: Vec<String> = batch.governing.iter().map(governing_line).collect();
    let errors = batch.error_count();
    if errors > 0 {
        lines.push(format!("{} row(s) failed and were excluded", errors));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::*;
    use crate::evaluator::evaluate_case;
    use crate::loads::LoadCase;
    use crate::materials::*;

    fn test_config() -> DesignConfig {
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
                column: ColumnFootprint {
                    depth_mm: 400.0,
                    flange_width_mm: 300.0,
                },
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

    #[test]
    fn test_fixed_field_names() {
        let eval = evaluate_case(&test_config(), &LoadCase::new(200.0, 50.0)).unwrap();

        let pressure = pressure_map(&eval);
        for key in [
            "case",
            "status",
            "contact_length_m",
            "sigma_max_MPa",
            "sigma_min_MPa",
            "e_over_a",
        ] {
            assert!(pressure.contains_key(key), "missing {}", key);
        }

        let anchors = anchor_map(&eval);
        for key in [
            "Ase_mm2",
            "phi_Nsa_kN",
            "phi_Vsa_kN",
            "util_tension",
            "util_shear",
            "util_combined",
            "phi_Ncb_kN",
            "phi_Npullout_kN",
            "phi_Vcb_kN",
            "phi_Vcp_kN",
        ] {
            assert!(anchors.contains_key(key), "missing {}", key);
        }

        assert!(plate_map(&eval).contains_key("t_req_mm"));
        assert!(plate_map(&eval).contains_key("ratio"));
        assert!(weld_map(&eval).contains_key("w_req_mm"));
    }

    #[test]
    fn test_three_decimal_rendering() {
        let eval = evaluate_case(&test_config(), &LoadCase::new(200.0, 50.0)).unwrap();
        let map = pressure_map(&eval);
        let sigma = &map["sigma_max_MPa"];
        let decimals = sigma.split('.').nth(1).map(|d| d.len());
        assert_eq!(decimals, Some(3));
    }

    #[test]
    fn test_utilization_only_for_capacity_cases() {
        let mut config = test_config();
        config.method.pressure_case = PressureCaseSelect::Case2;
        let eval = evaluate_case(&config, &LoadCase::new(200.0, 50.0)).unwrap();
        assert!(!pressure_map(&eval).contains_key("utilization"));

        config.method.pressure_case = PressureCaseSelect::Case3;
        let eval = evaluate_case(&config, &LoadCase::new(200.0, 50.0)).unwrap();
        assert!(pressure_map(&eval).contains_key("utilization"));
    }

    #[test]
    fn test_governing_line() {
        let config = test_config();
        let cases = vec![LoadCase::new(200.0, 50.0).with_source("J-12", "LRFD-2a")];
        let batch = crate::evaluator::evaluate_batch(&config, &cases).unwrap();
        let lines = batch_summary(&batch);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("row 0"));
        assert!(lines[0].contains("LRFD-2a @ J-12"));
    }
}
