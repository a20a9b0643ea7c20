//! Antfarm Runtime Prelude: convenient imports for common usage.
//!
//! ```rust
//! use antfarm_runtime::prelude::*;
//! ```

// Re-export colony
pub use crate::colony::{
    AntSnapshot, Colony, ColonySnapshot, ColonyStats, Entity, EntityKind, FoodSnapshot,
    TickReport,
};

// Re-export colony builder and world layout
pub use crate::colony_builder::ColonyBuilder;
pub use crate::world::WorldConfig;

// Re-export spatial indexes
pub use crate::linear_index::LinearIndex;
pub use crate::spatial_hash::SpatialHash;

// Re-export parameter search
pub use crate::gym::{run_search, GymConfig, GymReport, SearchSpace, Trial};

// Re-export from core
pub use antfarm_core::prelude::*;
