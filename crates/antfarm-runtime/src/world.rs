//! World layout: the initial arrangement of hills, food, and ants.

use antfarm_core::error::{AntfarmError, Result};
use antfarm_core::types::{Ant, Food, Hill};
use antfarm_core::vector::Vector;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How the world is laid out when a colony is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Side length of the square world (default: 1000).
    pub size: f64,
    /// Ants spawned at construction (default: 500).
    pub ant_count: usize,
    /// Hill positions. `None` places a single hill at the center.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hills: Option<Vec<Vector>>,
    /// Number of food clusters scattered around the world (default: 4).
    pub food_clusters: usize,
    /// Food sources per cluster (default: 50).
    pub cluster_size: usize,
    /// Radius of the disc each cluster is spread over (default: 25).
    pub cluster_radius: f64,
    /// Units per food source (default: 10).
    pub food_per_site: u32,
    /// RNG seed. `None` draws one from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub pheromone_cell_size: f64,
    pub food_cell_size: f64,
    pub hill_cell_size: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size: 1000.0,
            ant_count: 500,
            hills: None,
            food_clusters: 4,
            cluster_size: 50,
            cluster_radius: 25.0,
            food_per_site: 10,
            seed: None,
            pheromone_cell_size: 25.0,
            food_cell_size: 10.0,
            hill_cell_size: 50.0,
        }
    }
}

impl WorldConfig {
    /// A world of the given size with nothing in it.
    pub fn empty(size: f64) -> Self {
        Self {
            size,
            ant_count: 0,
            hills: Some(Vec::new()),
            food_clusters: 0,
            ..Default::default()
        }
    }

    pub fn center(&self) -> Vector {
        Vector::new(self.size / 2.0, self.size / 2.0)
    }

    /// Hill positions, resolving the default.
    pub fn hill_positions(&self) -> Vec<Vector> {
        match &self.hills {
            Some(hills) => hills.clone(),
            None => vec![self.center()],
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(AntfarmError::invalid_config("size", self.size, "must be positive"));
        }
        for (field, cell) in [
            ("pheromone_cell_size", self.pheromone_cell_size),
            ("food_cell_size", self.food_cell_size),
            ("hill_cell_size", self.hill_cell_size),
        ] {
            if !(cell.is_finite() && cell > 0.0) {
                return Err(AntfarmError::invalid_config(field, cell, "must be positive"));
            }
        }
        if !(self.cluster_radius.is_finite() && self.cluster_radius >= 0.0) {
            return Err(AntfarmError::invalid_config(
                "cluster_radius",
                self.cluster_radius,
                "must not be negative",
            ));
        }
        if self.food_clusters > 0 && 2.0 * self.cluster_radius > self.size {
            return Err(AntfarmError::invalid_config(
                "cluster_radius",
                self.cluster_radius,
                "clusters must fit inside the world",
            ));
        }
        for hill in self.hill_positions() {
            if !self.contains(&hill) {
                return Err(AntfarmError::invalid_config(
                    "hills",
                    format!("({}, {})", hill.x, hill.y),
                    "hill lies outside the world",
                ));
            }
        }
        Ok(())
    }

    pub fn contains(&self, point: &Vector) -> bool {
        (0.0..self.size).contains(&point.x) && (0.0..self.size).contains(&point.y)
    }
}

pub(crate) fn place_hills(config: &WorldConfig) -> Vec<Hill> {
    config.hill_positions().into_iter().map(Hill::new).collect()
}

/// Spawn ants round-robin on the hills with random unit headings.
///
/// Every ant starts foraging with a full pheromone budget.
pub(crate) fn spawn_ants<R: Rng>(
    config: &WorldConfig,
    hills: &[Hill],
    budget: u32,
    rng: &mut R,
) -> Vec<Ant> {
    let center = config.center();
    (0..config.ant_count)
        .map(|i| {
            let position = if hills.is_empty() {
                center
            } else {
                hills[i % hills.len()].position
            };
            let heading = Vector::from_degrees(rng.gen_range(0.0..360.0));
            Ant::new(position, heading).with_budget(budget)
        })
        .collect()
}

/// Scatter food clusters, keeping each cluster centre away from the hills.
pub(crate) fn scatter_food<R: Rng>(config: &WorldConfig, hills: &[Hill], rng: &mut R) -> Vec<Food> {
    const PLACEMENT_TRIES: usize = 16;

    let margin = config.cluster_radius;
    let clearance = config.size / 8.0;
    let mut food = Vec::with_capacity(config.food_clusters * config.cluster_size);

    for _ in 0..config.food_clusters {
        let mut center = random_point(config.size, margin, rng);
        for _ in 0..PLACEMENT_TRIES {
            let clear = hills
                .iter()
                .all(|h| h.position.distance_to(&center) >= clearance);
            if clear {
                break;
            }
            center = random_point(config.size, margin, rng);
        }

        for _ in 0..config.cluster_size {
            // sqrt keeps the disc uniformly filled
            let r = config.cluster_radius * rng.gen::<f64>().sqrt();
            let offset = Vector::from_degrees(rng.gen_range(0.0..360.0)) * r;
            food.push(Food::new(center + offset, config.food_per_site));
        }
    }
    food
}

fn random_point<R: Rng>(size: f64, margin: f64, rng: &mut R) -> Vector {
    let (lo, hi) = (margin, size - margin);
    if hi <= lo {
        return Vector::new(size / 2.0, size / 2.0);
    }
    Vector::new(rng.gen_range(lo..hi), rng.gen_range(lo..hi))
}
