//! Colony builder.
//!
//! Validates the world layout and parameter set, then generates the
//! initial world and hands it to a fresh [`Colony`].
//!
//! # Example
//!
//! ```rust
//! use antfarm_runtime::colony_builder::ColonyBuilder;
//! use antfarm_runtime::world::WorldConfig;
//!
//! let mut colony = ColonyBuilder::new()
//!     .with_world(WorldConfig { ant_count: 50, ..Default::default() })
//!     .with_seed(42)
//!     .build()?;
//!
//! colony.run(100);
//! assert_eq!(colony.stats().tick, 100);
//! # Ok::<(), antfarm_core::error::AntfarmError>(())
//! ```

use crate::colony::Colony;
use crate::spatial_hash::SpatialHash;
use crate::world::{place_hills, scatter_food, spawn_ants, WorldConfig};
use antfarm_core::error::Result;
use antfarm_core::params::Params;
use antfarm_core::spatial::SpatialIndex;
use antfarm_core::types::{Ant, Food};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;

/// Builder for creating colonies.
#[derive(Debug, Clone, Default)]
pub struct ColonyBuilder {
    world: WorldConfig,
    params: Params,
    ants: Option<Vec<Ant>>,
    food: Vec<Food>,
}

impl ColonyBuilder {
    /// A builder for the default world and parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder for an empty square world: no ants, hills, or food.
    pub fn empty(size: f64) -> Self {
        Self::new().with_world(WorldConfig::empty(size))
    }

    pub fn with_world(mut self, world: WorldConfig) -> Self {
        self.world = world;
        self
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Fix the RNG seed, overriding the world config's.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.world.seed = Some(seed);
        self
    }

    /// Use exactly these ants instead of spawning `ant_count` on the hills.
    pub fn with_ants(mut self, ants: Vec<Ant>) -> Self {
        self.ants = Some(ants);
        self
    }

    /// Place an extra food source on top of the generated clusters.
    pub fn with_food(mut self, food: Food) -> Self {
        self.food.push(food);
        self
    }

    /// Validate everything and generate the initial world.
    pub fn build(self) -> Result<Colony> {
        self.world.validate()?;
        self.params.validate()?;

        let mut rng = match self.world.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let hills = place_hills(&self.world);
        let ants = match self.ants {
            Some(ants) => ants,
            None => spawn_ants(&self.world, &hills, self.params.pheromone_start, &mut rng),
        };

        let mut food_index = SpatialHash::new(self.world.food_cell_size)?;
        for food in scatter_food(&self.world, &hills, &mut rng)
            .into_iter()
            .chain(self.food)
        {
            food_index.insert(food);
        }

        let mut hill_index = SpatialHash::new(self.world.hill_cell_size)?;
        for hill in hills {
            hill_index.insert(hill);
        }

        let forage_trail = SpatialHash::new(self.world.pheromone_cell_size)?;
        let return_trail = SpatialHash::new(self.world.pheromone_cell_size)?;

        info!(
            size = self.world.size,
            ants = ants.len(),
            hills = hill_index.len(),
            food_sources = food_index.len(),
            "colony built"
        );

        Ok(Colony::from_parts(
            self.params,
            self.world.size,
            ants,
            food_index,
            hill_index,
            forage_trail,
            return_trail,
            rng,
        ))
    }
}
