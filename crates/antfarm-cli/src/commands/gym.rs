//! Search for well-performing parameters.

use anyhow::{Context, Result};
use antfarm::prelude::*;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::config::Config;

/// Wrapper so the winning set prints as a pasteable `[params]` table.
#[derive(Serialize)]
struct ParamsTable<'a> {
    params: &'a Params,
}

pub fn run(
    iterations: u32,
    samples: usize,
    ticks: u64,
    seed: Option<u64>,
    csv: Option<&str>,
) -> Result<()> {
    let config = Config::load()?;
    let space = SearchSpace::for_world(config.world.size);
    let gym = GymConfig {
        iterations,
        samples,
        ticks,
        seed,
    };

    println!(
        "{} Searching {} candidates × {} samples × {} ticks...",
        "→".blue(),
        iterations.to_string().cyan(),
        samples.to_string().cyan(),
        ticks.to_string().cyan()
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {elapsed} searching")
            .context("Invalid progress template")?,
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));

    let report = run_search(&config.world, &config.params, &space, &gym)
        .context("Parameter search failed")?;
    spinner.finish_and_clear();

    if let Some(path) = csv {
        std::fs::write(path, report.to_csv())
            .with_context(|| format!("Failed to write {}", path))?;
        println!("  {} Wrote {}", "✓".green(), path);
    }

    let Some(best) = report.best else {
        println!("{} No valid candidate was evaluated.", "•".yellow());
        return Ok(());
    };

    println!();
    println!(
        "{} Best median: {} food (min {}, max {}) after {} ms",
        "✓".green().bold(),
        best.median.to_string().green(),
        best.min_score(),
        best.max_score(),
        report.wall_time_ms
    );
    println!();
    let table = toml::to_string_pretty(&ParamsTable {
        params: &best.params,
    })
    .context("Failed to serialize parameters")?;
    println!("{}", table);

    Ok(())
}
