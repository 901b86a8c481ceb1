//! One fitting run: read the table, fit every zone, write the result

use std::fs;
use std::path::PathBuf;

use bassfit_core::output::{output_path, write_results};
use bassfit_core::{FitEvent, ProgressCallback, data::read_dataset, fit_dataset};
use color_eyre::eyre::WrapErr;
use jiff::{Timestamp, Zoned};

use crate::config::Args;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamped line announcing that a zone is fitted or skipped
fn zone_notice(event: &FitEvent<'_>, now: &Zoned) -> Option<String> {
    let stamp = now.strftime(TIME_FORMAT);
    match event {
        FitEvent::ZoneStarted {
            zone,
            index,
            total,
            observations,
        } => Some(format!(
            "[{stamp}] Fitting zone {zone} ({}/{total}, {observations} observations)",
            index + 1
        )),
        FitEvent::ZoneSkipped { zone } => Some(format!(
            "[{stamp}] Skipping zone {zone}: no observations after the reference date"
        )),
        FitEvent::ZoneFitted { .. } | FitEvent::ZoneFailed { .. } => None,
    }
}

fn log_progress(event: &FitEvent<'_>) {
    if let Some(notice) = zone_notice(event, &Zoned::now()) {
        tracing::info!("{notice}");
        return;
    }

    match event {
        FitEvent::ZoneFitted { result } => {
            let params = &result.parameters;
            tracing::info!(
                "Zone {}: p={:.6}, q={:.6}, m={:.2}",
                result.zone,
                params.p,
                params.q,
                params.m
            );
            tracing::debug!(
                zone = %result.zone,
                rss = result.objective_value,
                island = result.island,
                evaluations = result.evaluations,
                "Fit diagnostics"
            );
        }
        FitEvent::ZoneFailed { zone, error } => {
            tracing::warn!("Zone {zone} failed and was left out: {error}");
        }
        FitEvent::ZoneStarted { .. } | FitEvent::ZoneSkipped { .. } => {}
    }
}

/// Execute a run and return the path of the written table
pub fn run(args: &Args) -> color_eyre::Result<PathBuf> {
    let config = args.load_config()?;
    let path = output_path(&args.output_dir, &args.label).wrap_err("invalid run label")?;

    let started = Zoned::now();
    tracing::info!(
        "[{}] Starting run '{}' on {}",
        started.strftime(TIME_FORMAT),
        args.label,
        args.input.display()
    );
    tracing::debug!(?config, "Effective configuration");

    let dataset = read_dataset(&args.input, &config.columns)
        .wrap_err_with(|| format!("failed to read {}", args.input.display()))?;
    tracing::info!(
        "Loaded {} rows for {} zones",
        dataset.total_rows(),
        dataset.len()
    );

    let callback: ProgressCallback = Box::new(log_progress);
    let results = fit_dataset(&dataset, &config, Some(callback)).wrap_err("fitting failed")?;

    fs::create_dir_all(&args.output_dir).wrap_err_with(|| {
        format!(
            "failed to create output directory {}",
            args.output_dir.display()
        )
    })?;
    write_results(&path, &results)
        .wrap_err_with(|| format!("failed to write {}", path.display()))?;

    let elapsed = Timestamp::now().duration_since(started.timestamp());
    tracing::info!(
        "Fitted {} zones ({} skipped, {} failed) in {:.1}s",
        results.len(),
        results.skipped.len(),
        results.failed.len(),
        elapsed.as_secs_f64()
    );
    tracing::info!("Best parameters saved to {}", path.display());

    Ok(path)
}
