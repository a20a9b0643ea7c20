//! Antfarm Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use antfarm_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{
    Ant, AntState, Trail,
    Food, Pheromone, Hill,
    Tick,
    FRESH_PHEROMONE, PHEROMONE_FLOOR,
};

pub use crate::vector::Vector;

// Re-export the SpatialIndex trait
pub use crate::spatial::{Handle, Located, SpatialIndex};

pub use crate::params::{BoundaryPolicy, Params};

// Re-export error types
pub use crate::error::{AntfarmError, ConfigError, Result};
