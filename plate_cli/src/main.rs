//! # Base Plate CLI
//!
//! Terminal interface for the base plate design engine. With no arguments
//! it prompts for a single load case, evaluates it against the default
//! configuration and prints the per-discipline results. Given a path to a
//! `.bpd` project file it runs the stored batch and prints the governing
//! record per discipline.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

use plate_core::evaluator::{evaluate_batch, evaluate_case, Discipline};
use plate_core::loads::LoadCase;
use plate_core::project::Project;
use plate_core::report;

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn main() {
    println!("Base Plate CLI - Anchor Bolt Connection Design");
    println!("==============================================");
    println!();

    let args: Vec<String> = env::args().collect();
    if let Some(path) = args.get(1) {
        run_batch(Path::new(path));
    } else {
        run_interactive();
    }
}

fn run_interactive() {
    let project = Project::new("CLI", "demo", "");

    let n_kn = prompt_f64("Axial force N, + compression (kN) [200.0]: ", 200.0);
    let mx_knm = prompt_f64("Moment Mx (kN·m) [50.0]: ", 50.0);
    let my_knm = prompt_f64("Moment My (kN·m) [0.0]: ", 0.0);
    let vx_kn = prompt_f64("Shear Vx (kN) [35.0]: ", 35.0);
    let vy_kn = prompt_f64("Shear Vy (kN) [0.0]: ", 0.0);

    let loads = LoadCase::new(n_kn, mx_knm)
        .with_my(my_knm)
        .with_shear(vx_kn, vy_kn);

    println!();
    println!(
        "Evaluating {:.0}x{:.0}x{:.0} plate, {} anchors...",
        project.config.geometry.plate_a_mm,
        project.config.geometry.plate_b_mm,
        project.config.geometry.plate_t_mm,
        project.config.anchorage.layout.count()
    );
    println!();

    match evaluate_case(&project.config, &loads) {
        Ok(evaluation) => {
            println!("═══════════════════════════════════════");
            println!("  BASE PLATE RESULTS");
            println!("═══════════════════════════════════════");
            for (discipline, map) in report::case_maps(&evaluation) {
                println!();
                println!("{}:", discipline);
                for (key, value) in map {
                    println!("  {:<18} {}", key, value);
                }
            }
            println!();
            println!("═══════════════════════════════════════");
            let worst = Discipline::ALL
                .iter()
                .map(|d| evaluation.utilization(*d))
                .fold(0.0, f64::max);
            println!(
                "  RESULT: {} (worst utilization {:.3})",
                status_icon(worst <= 1.0),
                worst
            );
            println!("═══════════════════════════════════════");

            println!();
            println!("JSON Output:");
            if let Ok(json) = serde_json::to_string_pretty(&evaluation) {
                println!("{}", json);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
    }
}

fn run_batch(path: &Path) {
    let project = match plate_core::file_io::load_project(path) {
        Ok(project) => project,
        Err(e) => {
            eprintln!("Error loading {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };

    println!(
        "Loaded {} ({} load cases)",
        path.display(),
        project.case_count()
    );
    println!();

    match evaluate_batch(&project.config, &project.batch) {
        Ok(batch) => {
            println!("Governing cases:");
            for line in report::batch_summary(&batch) {
                println!("  {}", line);
            }
            println!();
            if let Ok(json) = serde_json::to_string_pretty(&batch.governing) {
                println!("JSON Output:");
                println!("{}", json);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "PASS"
    } else {
        "FAIL"
    }
}
