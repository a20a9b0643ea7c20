//! Tunable simulation parameters.
//!
//! The parameter set is owned by the colony and replaced wholesale by
//! tuning collaborators between ticks. Defaults follow the hand-tuned values
//! for a 1000×1000 world stepped at 60 ticks per second.

use crate::error::{AntfarmError, Result};
use serde::{Deserialize, Serialize};

/// Logical ticks per simulated second, used to derive per-tick defaults.
pub const TICKS_PER_SECOND: f64 = 60.0;

/// What happens when an ant crosses the world edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Teleport to the opposite edge, keep heading.
    #[default]
    Wrap,
    /// Point the offending heading component back inward, keep position.
    Turn,
}

/// Parameters consumed by the tick engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Distance moved per tick (default: 1.8).
    pub ant_speed: f64,
    /// Max random heading rotation per tick, in degrees, either way (default: 9.0).
    pub ant_rotation: f64,
    /// Pheromone deposits an ant may make per trip (default: 20).
    pub pheromone_start: u32,
    /// Radius of the trail query. The most expensive knob (default: 100.0).
    pub sense_radius: f64,
    /// Deposits whose cosine similarity to the heading is below this are
    /// ignored (default: 0.33).
    pub sense_cos_floor: f64,
    /// Amount subtracted from every deposit per tick (default: 1/600, ten seconds).
    pub pheromone_decay: f64,
    /// Probability of depositing on a given tick (default: 1/60).
    pub drop_prob: f64,
    /// Multiplier on the blended trail direction (default: 3.0).
    pub influence: f64,
    /// Probability of sensing on a given tick (default: 0.25).
    pub sense_prob: f64,
    pub boundary: BoundaryPolicy,
    /// Radius within which a forager picks up food (default: 4.0).
    pub food_radius: f64,
    /// Radius within which a returning ant drops food at a hill (default: 15.0).
    pub hill_radius: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            ant_speed: 1.8,
            ant_rotation: 9.0,
            pheromone_start: 20,
            sense_radius: 100.0,
            sense_cos_floor: 0.33,
            pheromone_decay: 1.0 / (10.0 * TICKS_PER_SECOND),
            drop_prob: 1.0 / TICKS_PER_SECOND,
            influence: 3.0,
            sense_prob: 0.25,
            boundary: BoundaryPolicy::Wrap,
            food_radius: 4.0,
            hill_radius: 15.0,
        }
    }
}

impl Params {
    /// Check every field against its safe range.
    ///
    /// The engine never clamps silently: a rejected set is never applied.
    pub fn validate(&self) -> Result<()> {
        non_negative("ant_speed", self.ant_speed)?;
        in_range("ant_rotation", self.ant_rotation, 0.0, 180.0)?;
        positive("sense_radius", self.sense_radius)?;
        in_range("sense_cos_floor", self.sense_cos_floor, -1.0, 1.0)?;
        positive("pheromone_decay", self.pheromone_decay)?;
        in_range("drop_prob", self.drop_prob, 0.0, 1.0)?;
        non_negative("influence", self.influence)?;
        in_range("sense_prob", self.sense_prob, 0.0, 1.0)?;
        non_negative("food_radius", self.food_radius)?;
        non_negative("hill_radius", self.hill_radius)?;
        Ok(())
    }

    /// Ticks until a fresh deposit is fully decayed.
    pub fn pheromone_lifetime(&self) -> u64 {
        (1.0 / self.pheromone_decay).ceil() as u64
    }
}

fn finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AntfarmError::invalid_config(field, value, "must be finite"))
    }
}

fn positive(field: &str, value: f64) -> Result<()> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(AntfarmError::invalid_config(field, value, "must be positive"))
    }
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(AntfarmError::invalid_config(field, value, "must not be negative"))
    }
}

fn in_range(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(AntfarmError::out_of_range(field, min, max, value))
    }
}
