//! # Antfarm Core
//!
//! Shared types and traits for the antfarm foraging simulation.
//!
//! Ants wander a continuous 2D plane, carry food from food sites back to
//! their hills, and coordinate indirectly through two decaying pheromone
//! trails. This crate holds everything that does not depend on a concrete
//! spatial index or on the tick loop:
//!
//! - **vector**: 2D point/direction arithmetic
//! - **types**: ants, food, pheromones, hills, and the forage/return state machine
//! - **spatial**: the `SpatialIndex` trait and opaque entry handles
//! - **steering**: how sensed pheromones bend an ant's heading
//! - **params**: the tunable parameter set and its validation
//! - **error**: configuration errors
//!
//! ## Quick Start
//!
//! ```rust
//! use antfarm_core::prelude::*;
//!
//! let mut ant = Ant::new(Vector::new(500.0, 500.0), Vector::new(1.0, 0.0));
//! ant.pick_up_food(20);
//! assert_eq!(ant.state, AntState::Return);
//! assert_eq!(ant.heading, Vector::new(-1.0, 0.0));
//! ```

pub mod vector;
pub mod types;
pub mod spatial;
pub mod steering;
pub mod params;
pub mod error;
pub mod prelude;
