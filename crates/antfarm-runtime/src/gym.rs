//! Gym: offline random search over the parameter set.
//!
//! Each iteration samples a candidate parameter set, runs several
//! independent colonies headless for a fixed number of ticks, and scores
//! the candidate by the median amount of food collected. The best
//! candidate seen so far is kept.

use crate::colony::ColonyStats;
use crate::colony_builder::ColonyBuilder;
use crate::world::WorldConfig;
use antfarm_core::error::{AntfarmError, Result};
use antfarm_core::params::{Params, TICKS_PER_SECOND};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::time::Instant;
use tracing::{debug, info};

/// Ranges each tunable is sampled from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSpace {
    pub ant_speed: Range<f64>,
    pub ant_rotation: Range<f64>,
    pub sense_radius: Range<f64>,
    pub pheromone_decay: Range<f64>,
    pub drop_prob: Range<f64>,
    pub influence: Range<f64>,
    pub sense_prob: Range<f64>,
}

impl SearchSpace {
    /// Ranges scaled to a world of the given size.
    pub fn for_world(size: f64) -> Self {
        Self {
            ant_speed: 0.5..7.0,
            ant_rotation: 0.0..20.0,
            sense_radius: size / 50.0..size / 4.0,
            pheromone_decay: 1.0 / 120.0..1.0,
            drop_prob: 1.0 / 120.0..1.0,
            influence: 0.1..10.0,
            sense_prob: 0.05..1.0,
        }
    }

    /// Draw a candidate. Fields outside the space are taken from `base`.
    pub fn sample<R: Rng>(&self, base: &Params, rng: &mut R) -> Params {
        Params {
            ant_speed: draw(&self.ant_speed, rng),
            ant_rotation: draw(&self.ant_rotation, rng),
            sense_radius: draw(&self.sense_radius, rng),
            pheromone_decay: draw(&self.pheromone_decay, rng),
            drop_prob: draw(&self.drop_prob, rng),
            influence: draw(&self.influence, rng),
            sense_prob: draw(&self.sense_prob, rng),
            ..base.clone()
        }
    }
}

impl Default for SearchSpace {
    fn default() -> Self {
        Self::for_world(WorldConfig::default().size)
    }
}

fn draw<R: Rng>(range: &Range<f64>, rng: &mut R) -> f64 {
    if range.is_empty() {
        range.start
    } else {
        rng.gen_range(range.clone())
    }
}

/// How long and how hard to search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GymConfig {
    /// Candidates to try (default: 20).
    pub iterations: u32,
    /// Independent colonies per candidate (default: 4).
    pub samples: usize,
    /// Ticks each colony runs (default: one simulated minute).
    pub ticks: u64,
    pub seed: Option<u64>,
}

impl Default for GymConfig {
    fn default() -> Self {
        Self {
            iterations: 20,
            samples: 4,
            ticks: (60.0 * TICKS_PER_SECOND) as u64,
            seed: None,
        }
    }
}

/// One evaluated candidate.
#[derive(Debug, Clone, Serialize)]
pub struct Trial {
    pub iteration: u32,
    pub params: Params,
    /// Food collected by each sample colony, in run order.
    pub scores: Vec<u64>,
    pub median: u64,
    /// Statistics of the sample that produced the median.
    pub median_stats: ColonyStats,
}

impl Trial {
    pub fn min_score(&self) -> u64 {
        self.scores.iter().copied().min().unwrap_or(0)
    }

    pub fn max_score(&self) -> u64 {
        self.scores.iter().copied().max().unwrap_or(0)
    }
}

/// Outcome of a search.
#[derive(Debug, Clone, Serialize)]
pub struct GymReport {
    pub best: Option<Trial>,
    pub trials: Vec<Trial>,
    pub wall_time_ms: u64,
}

impl GymReport {
    /// Export every trial to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();
        csv.push_str(
            "iteration,median,min,max,ant_speed,ant_rotation,sense_radius,pheromone_decay,drop_prob,influence,sense_prob\n",
        );
        for trial in &self.trials {
            let p = &trial.params;
            csv.push_str(&format!(
                "{},{},{},{},{:.4},{:.4},{:.2},{:.6},{:.6},{:.4},{:.4}\n",
                trial.iteration,
                trial.median,
                trial.min_score(),
                trial.max_score(),
                p.ant_speed,
                p.ant_rotation,
                p.sense_radius,
                p.pheromone_decay,
                p.drop_prob,
                p.influence,
                p.sense_prob,
            ));
        }
        csv
    }
}

/// Median score and the index of the sample that produced it.
///
/// For an even count the score is the mean of the two middle values and
/// the representative sample is the upper-middle one.
pub fn median_sample(scores: &[u64]) -> Option<(u64, usize)> {
    if scores.is_empty() {
        return None;
    }
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by_key(|&i| scores[i]);

    let mid = order.len() / 2;
    let score = if order.len() % 2 == 1 {
        scores[order[mid]]
    } else {
        (scores[order[mid - 1]] + scores[order[mid]]) / 2
    };
    Some((score, order[mid]))
}

/// Run `samples` colonies with the same parameters and score the median.
pub fn evaluate<R: Rng>(
    world: &WorldConfig,
    params: &Params,
    config: &GymConfig,
    iteration: u32,
    rng: &mut R,
) -> Result<Trial> {
    let mut scores = Vec::with_capacity(config.samples);
    let mut stats = Vec::with_capacity(config.samples);

    for _ in 0..config.samples {
        let mut colony = ColonyBuilder::new()
            .with_world(world.clone())
            .with_params(params.clone())
            .with_seed(rng.gen())
            .build()?;
        colony.run(config.ticks);

        let st = colony.stats();
        scores.push(st.collected_food);
        stats.push(st);
    }

    let (median, index) = median_sample(&scores)
        .ok_or_else(|| AntfarmError::invalid_config("samples", 0, "must be at least 1"))?;

    Ok(Trial {
        iteration,
        params: params.clone(),
        scores,
        median,
        median_stats: stats[index],
    })
}

/// Random search: sample, evaluate, keep the best.
pub fn run_search(
    world: &WorldConfig,
    base: &Params,
    space: &SearchSpace,
    config: &GymConfig,
) -> Result<GymReport> {
    if config.samples == 0 {
        return Err(AntfarmError::invalid_config("samples", 0, "must be at least 1"));
    }
    world.validate()?;
    base.validate()?;

    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let start = Instant::now();
    let mut trials = Vec::with_capacity(config.iterations as usize);
    let mut best: Option<Trial> = None;

    for iteration in 0..config.iterations {
        let candidate = space.sample(base, &mut rng);
        if let Err(err) = candidate.validate() {
            debug!(iteration, error = %err, "skipping invalid candidate");
            continue;
        }

        let trial = evaluate(world, &candidate, config, iteration, &mut rng)?;
        debug!(iteration, median = trial.median, "trial complete");

        let improved = best.as_ref().map_or(true, |b| trial.median > b.median);
        if improved {
            info!(
                iteration,
                median = trial.median,
                min = trial.min_score(),
                max = trial.max_score(),
                "new best"
            );
            best = Some(trial.clone());
        }
        trials.push(trial);
    }

    Ok(GymReport {
        best,
        trials,
        wall_time_ms: start.elapsed().as_millis() as u64,
    })
}
