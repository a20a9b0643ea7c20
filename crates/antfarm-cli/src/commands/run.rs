//! Run the colony simulation.

use anyhow::{Context, Result};
use antfarm::prelude::*;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Config;

pub fn run(ticks: u64, seed: Option<u64>, json: bool) -> Result<()> {
    let config = Config::load()?;

    let mut builder = ColonyBuilder::new()
        .with_world(config.world)
        .with_params(config.params);
    if let Some(seed) = seed {
        builder = builder.with_seed(seed);
    }
    let mut colony = builder.build().context("Failed to build colony")?;

    let initial = colony.stats();
    if !json {
        println!(
            "{} Running {} ticks with {} ants...",
            "→".blue(),
            ticks.to_string().cyan(),
            colony.ants().len().to_string().cyan()
        );
    }

    let pb = ProgressBar::new(ticks);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ticks")
            .context("Invalid progress template")?
            .progress_chars("#>-"),
    );
    if json {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    for _ in 0..ticks {
        colony.tick();
        pb.inc(1);
    }
    pb.finish_and_clear();

    let stats = colony.stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!();
    println!("{} Simulation complete!", "✓".green().bold());
    println!(
        "  Food collected: {} of {}",
        stats.collected_food.to_string().green(),
        stats.total_food_placed.to_string().cyan()
    );
    println!(
        "  Food remaining: {} → {}",
        initial.remaining_food.to_string().yellow(),
        stats.remaining_food.to_string().green()
    );
    println!(
        "  Ants: {} foraging, {} returning",
        stats.foraging_ants.to_string().cyan(),
        stats.returning_ants.to_string().cyan()
    );
    println!(
        "  Pheromones: {} forage, {} return",
        stats.forage_pheromones.to_string().cyan(),
        stats.return_pheromones.to_string().cyan()
    );

    Ok(())
}
