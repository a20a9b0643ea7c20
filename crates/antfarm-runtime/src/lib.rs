//! # Antfarm Runtime
//!
//! The tick engine and everything it runs on.
//!
//! A [`Colony`](colony::Colony) owns a fixed population of ants, food
//! sources, hills, and two pheromone trails, each trail kept in a
//! [`SpatialHash`](spatial_hash::SpatialHash) so radius queries only touch
//! nearby grid cells. [`ColonyBuilder`](colony_builder::ColonyBuilder)
//! lays out the initial world and the [`gym`] searches for parameter sets
//! that collect the most food.

pub mod spatial_hash;
pub mod linear_index;
pub mod world;
pub mod colony;
pub mod colony_builder;
pub mod gym;
pub mod prelude;
