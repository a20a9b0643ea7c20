//! # Antfarm
//!
//! A spatial simulation of ants foraging for food by laying and following
//! pheromone trails.
//!
//! Ants leave the hill foraging, wander with a little random jitter, and
//! drop pheromone as they go. An ant that finds food turns around and
//! heads home, steering toward the pheromone the foragers left behind and
//! laying a trail of its own that later foragers follow back to the food.
//! No ant knows where anything is; the trails do all the work.
//!
//! ## Quick Start
//!
//! ```rust
//! use antfarm::prelude::*;
//!
//! // A small world with one hill in the middle
//! let mut colony = ColonyBuilder::new()
//!     .with_world(WorldConfig {
//!         size: 400.0,
//!         ant_count: 100,
//!         ..Default::default()
//!     })
//!     .with_seed(7)
//!     .build()?;
//!
//! // Drop a pile of food next to the hill
//! colony.insert_food(Vector::new(230.0, 200.0), 25);
//!
//! // Run the simulation
//! colony.run(600);
//!
//! let stats = colony.stats();
//! println!("collected {} of {}", stats.collected_food, stats.total_food_placed);
//! assert!(stats.food_is_conserved());
//! # Ok::<(), AntfarmError>(())
//! ```
//!
//! ## Architecture
//!
//! Antfarm is organized into several crates:
//!
//! - [`antfarm_core`] - Geometry, entity types, parameters, steering math,
//!   and the `SpatialIndex` trait
//! - [`antfarm_runtime`] - The grid spatial hash, the colony tick engine,
//!   world generation, and the parameter search ("gym")
//!
//! ## Tick Order
//!
//! | Step | What happens |
//! |------|--------------|
//! | Move | `position += normalize(heading) * ant_speed` |
//! | Boundary | wrap to the opposite edge, or turn back inward |
//! | Sense | with `sense_prob`, steer toward the other cohort's trail |
//! | Interact | forager takes one unit of food; returner drops it at a hill |
//! | Deposit | with `drop_prob`, spend budget on a fresh pheromone |
//! | Jitter | rotate heading by up to `ant_rotation` degrees |
//!
//! After every ant has stepped, both trails decay and spent deposits and
//! empty food sources are removed.

// Re-export all subcrates
pub use antfarm_core as core;
pub use antfarm_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use antfarm::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use antfarm_core::types::{
        Ant, AntState, Food, Hill, Pheromone, Tick, Trail, FRESH_PHEROMONE, PHEROMONE_FLOOR,
    };
    pub use antfarm_core::vector::Vector;
    pub use antfarm_core::params::{BoundaryPolicy, Params};

    // Core traits
    pub use antfarm_core::spatial::{Handle, Located, SpatialIndex};

    // Error types
    pub use antfarm_core::error::{AntfarmError, ConfigError, Result};

    // Runtime
    pub use antfarm_runtime::colony::{
        Colony, ColonySnapshot, ColonyStats, Entity, EntityKind, TickReport,
    };
    pub use antfarm_runtime::colony_builder::ColonyBuilder;
    pub use antfarm_runtime::world::WorldConfig;
    pub use antfarm_runtime::spatial_hash::SpatialHash;

    // Gym
    pub use antfarm_runtime::gym::{run_search, GymConfig, GymReport, SearchSpace};
}
