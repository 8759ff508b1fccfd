//! PNG charts of a batch run, drawn from the computed reports and the hourly log.

use anyhow::Result;
use lakeforge_core::{
    analysis::{self, HourlyLogEntry, PondReport},
    Pond, PondShape,
};
use plotters::prelude::*;
use std::path::Path;

const COLORS: [RGBColor; 6] = [RED, GREEN, BLUE, MAGENTA, CYAN, BLACK];

pub fn generate_all_plots(
    output_dir: &Path,
    hourly_log_path: &Path,
    ponds: &[Pond],
    reports: &[PondReport],
) -> Result<()> {
    println!("[Plotting] Generating graphs from production data...");

    let hourly = analysis::read_hourly_log(hourly_log_path)?;
    if reports.is_empty() {
        println!("[Plotting] Warning: No data to plot.");
        return Ok(());
    }

    for (i, pond) in ponds.iter().enumerate() {
        plot_hypsographic_curve(output_dir, i + 1, pond)?;
    }
    if !hourly.is_empty() {
        plot_hourly_production(output_dir, &hourly)?;
    }
    plot_daily_production(output_dir, reports)?;

    println!("[Plotting] Graphs have been saved to '{}'.", output_dir.display());
    Ok(())
}

/// Water surface area against depth, surface at the top.
fn plot_hypsographic_curve(output_dir: &Path, index: usize, pond: &Pond) -> Result<()> {
    let shape = pond.shape();
    let samples: Vec<_> = shape.samples().collect();
    if samples.is_empty() {
        return Ok(());
    }

    let path = output_dir.join(format!("hypsography_{}_{}.png", index, pond.lake_id()));
    let root = BitMapBackend::new(&path, (800, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_depth = shape.max_depth()?.max(f64::EPSILON);
    let max_area = samples.iter().map(|s| s.area_m2).fold(0.0, f64::max).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Hypsographic Curve: {}", pond.lake_id()),
            ("sans-serif", 30).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..max_area * 1.05, -max_depth * 1.05..0f64)?;

    chart
        .configure_mesh()
        .x_desc("Surface area (m²)")
        .y_desc("Depth (m)")
        .y_label_formatter(&|y| format!("{:.1}", -y))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.area_m2, -s.depth_m)),
            BLUE.stroke_width(2),
        ))?
        .label("survey")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.filled()));

    let photic_depth = pond.photic_zone_lower_bound()?;
    chart
        .draw_series(LineSeries::new(
            vec![(0.0, -photic_depth), (max_area * 1.05, -photic_depth)],
            GREEN.stroke_width(1),
        ))?
        .label("1% light")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Benthic (solid) and phytoplankton (faded) rates over the day for every pond.
fn plot_hourly_production(output_dir: &Path, data: &[HourlyLogEntry]) -> Result<()> {
    let path = output_dir.join("hourly_production.png");
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_hour = data.iter().map(|d| d.hour).fold(0.0, f64::max).max(1.0);
    let max_rate = data
        .iter()
        .map(|d| d.benthic.max(d.phyto))
        .fold(0.0, f64::max)
        .max(f64::EPSILON);

    let mut chart = ChartBuilder::on(&root)
        .caption("Whole-Lake Production Over the Day", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..max_hour, 0f64..max_rate * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("Hours after sunrise")
        .y_desc("Production (mg C m⁻² h⁻¹)")
        .draw()?;

    let mut lakes: Vec<(&str, i32, i32)> = Vec::new();
    for entry in data {
        let key = (entry.lake_id.as_str(), entry.year, entry.day_of_year);
        if !lakes.contains(&key) {
            lakes.push(key);
        }
    }

    for (i, key) in lakes.iter().enumerate() {
        let color = COLORS[i % COLORS.len()];
        let rows: Vec<&HourlyLogEntry> = data
            .iter()
            .filter(|d| (d.lake_id.as_str(), d.year, d.day_of_year) == *key)
            .collect();

        chart
            .draw_series(LineSeries::new(
                rows.iter().map(|d| (d.hour, d.benthic)),
                color.stroke_width(2),
            ))?
            .label(format!("{} benthic", key.0))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));

        chart
            .draw_series(LineSeries::new(
                rows.iter().map(|d| (d.hour, d.phyto)),
                color.mix(0.5).stroke_width(2),
            ))?
            .label(format!("{} phyto", key.0))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.mix(0.5).filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Side-by-side benthic and phytoplankton bars per pond. Failed ponds are left out.
fn plot_daily_production(output_dir: &Path, reports: &[PondReport]) -> Result<()> {
    let bars: Vec<(&str, f64, f64)> = reports
        .iter()
        .filter_map(|r| {
            r.outcome.as_ref().ok().map(|p| {
                (
                    r.lake_id.as_str(),
                    p.daily.benthic_mgc_m2_day,
                    p.daily.phyto_mgc_m2_day,
                )
            })
        })
        .collect();
    if bars.is_empty() {
        return Ok(());
    }

    let path = output_dir.join("daily_production.png");
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_value = bars
        .iter()
        .map(|(_, b, p)| b.max(*p))
        .fold(0.0, f64::max)
        .max(f64::EPSILON);
    let labels: Vec<&str> = bars.iter().map(|(name, _, _)| *name).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption("Daily Whole-Lake Production", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..bars.len() as f64, 0f64..max_value * 1.1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len() + 1)
        .x_label_formatter(&|x| {
            if x.fract() == 0.0 {
                labels.get(*x as usize).map(|s| s.to_string()).unwrap_or_default()
            } else {
                String::new()
            }
        })
        .y_desc("Production (mg C m⁻² d⁻¹)")
        .draw()?;

    chart
        .draw_series(bars.iter().enumerate().map(|(i, (_, benthic, _))| {
            let x = i as f64;
            Rectangle::new([(x + 0.1, 0.0), (x + 0.48, *benthic)], GREEN.filled())
        }))?
        .label("benthic")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], GREEN.filled()));

    chart
        .draw_series(bars.iter().enumerate().map(|(i, (_, _, phyto))| {
            let x = i as f64;
            Rectangle::new([(x + 0.52, 0.0), (x + 0.9, *phyto)], BLUE.filled())
        }))?
        .label("phytoplankton")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], BLUE.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}
