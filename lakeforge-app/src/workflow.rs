use crate::config::{PondLibrary, RunRequest};
use crate::plotting;
use anyhow::{Context, Result};
use lakeforge_core::{
    analysis::{self, PondReport, ShapeSummary},
    logger::{DailyProductionLogger, HourlyProductionLogger},
    Pond,
};
use lakeforge_schemas::production::ProductionResult;
use log::warn;
use serde::Serialize;
use std::{fs, path::Path};

/// The ponds that could be built and one report per pond definition.
pub struct BatchRun {
    pub ponds: Vec<Pond>,
    pub reports: Vec<PondReport>,
}

#[derive(Debug, Serialize)]
struct PondSummary<'a> {
    lake_id: &'a str,
    year: i32,
    day_of_year: i32,
    production: Option<ProductionResult>,
    shape: Option<ShapeSummary>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    generated_at: String,
    request: &'a RunRequest,
    ponds: Vec<PondSummary<'a>>,
}

/// Builds every pond of the library and computes its production.
///
/// A pond whose definition is invalid is reported with its error like one
/// whose computation fails; neither stops the batch.
pub fn run_batch(library: &PondLibrary, request: &RunRequest, output_dir: &Path) -> Result<BatchRun> {
    println!("\n--- [Workflow] Computing Whole-Lake Production ---");

    let mut ponds = Vec::new();
    let mut build_failures = Vec::new();
    for definition in &library.ponds {
        match analysis::build_pond(definition) {
            Ok(mut pond) => {
                if let Some(hours) = request.time_interval_hours {
                    pond.set_time_interval_hours(hours);
                }
                ponds.push(pond);
            }
            Err(e) => {
                warn!("{}: invalid pond definition: {e}", definition.record.lake_id);
                build_failures.push(PondReport {
                    lake_id: definition.record.lake_id.clone(),
                    year: definition.record.year,
                    day_of_year: definition.record.day_of_year,
                    outcome: Err(e),
                });
            }
        }
    }

    let mut reports = analysis::analyze_batch(&ponds, &request.production_settings());
    reports.extend(build_failures);

    let daily_path = output_dir.join("daily_production.csv");
    let hourly_path = output_dir.join("hourly_production.csv");
    let mut daily_logger = DailyProductionLogger::new(&daily_path.to_string_lossy())?;
    let mut hourly_logger = HourlyProductionLogger::new(&hourly_path.to_string_lossy())?;
    for report in &reports {
        daily_logger.log_report(report)?;
        hourly_logger.log_report(report)?;
    }
    println!(
        "[Workflow] Production logs written to '{}' and '{}'.",
        daily_path.display(),
        hourly_path.display()
    );

    Ok(BatchRun { ponds, reports })
}

/// Writes the JSON summary and the plots, then prints the summary report.
pub fn write_reports(run: &BatchRun, request: &RunRequest, output_dir: &Path) -> Result<()> {
    println!("\n--- [Workflow] Writing Reports ---");

    let summary = RunSummary {
        generated_at: chrono::Utc::now().to_rfc3339(),
        request,
        ponds: run.reports.iter().map(pond_summary).collect(),
    };
    let summary_path = output_dir.join("summary.json");
    let json = serde_json::to_string_pretty(&summary)?;
    fs::write(&summary_path, json)
        .with_context(|| format!("Failed to write {}", summary_path.display()))?;

    if request.plots {
        plotting::generate_all_plots(
            output_dir,
            &output_dir.join("hourly_production.csv"),
            &run.ponds,
            &run.reports,
        )?;
    }

    print_summary_report(&run.reports, request);
    Ok(())
}

fn pond_summary(report: &PondReport) -> PondSummary<'_> {
    let (production, shape, error) = match &report.outcome {
        Ok(production) => (Some(production.daily), Some(production.shape), None),
        Err(e) => (None, None, Some(e.to_string())),
    };
    PondSummary {
        lake_id: &report.lake_id,
        year: report.year,
        day_of_year: report.day_of_year,
        production,
        shape,
        error,
    }
}

fn print_summary_report(reports: &[PondReport], request: &RunRequest) {
    let failed = reports.iter().filter(|r| r.outcome.is_err()).count();

    println!("\n\n--- [Final Summary Report] ---");
    println!("========================================");
    println!(
        "Ponds: {} computed, {} failed | depth interval {} m | {} area weighting",
        reports.len() - failed,
        failed,
        request.depth_interval,
        if request.use_littoral_area { "littoral" } else { "surface" }
    );
    println!("----------------------------------------");

    for report in reports {
        match &report.outcome {
            Ok(production) => println!(
                "  - {:<16} {} day {:>3} | benthic: {:>10.2} | phyto: {:>10.2} | total: {:>10.2} mg C m⁻² d⁻¹",
                report.lake_id,
                report.year,
                report.day_of_year,
                production.daily.benthic_mgc_m2_day,
                production.daily.phyto_mgc_m2_day,
                production.daily.total()
            ),
            Err(e) => println!(
                "  - {:<16} {} day {:>3} | FAILED: {}",
                report.lake_id, report.year, report.day_of_year, e
            ),
        }
    }

    let successful: Vec<&ProductionResult> = reports
        .iter()
        .filter_map(|r| r.outcome.as_ref().ok().map(|p| &p.daily))
        .collect();
    if !successful.is_empty() {
        let n = successful.len() as f64;
        println!("----------------------------------------");
        println!(
            "Mean benthic: {:.2} | Mean phyto: {:.2} mg C m⁻² d⁻¹",
            successful.iter().map(|p| p.benthic_mgc_m2_day).sum::<f64>() / n,
            successful.iter().map(|p| p.phyto_mgc_m2_day).sum::<f64>() / n
        );
    }
    println!("========================================");
}
