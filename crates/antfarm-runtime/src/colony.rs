//! Colony: the tick engine.
//!
//! The colony owns every ant, the food and hill indexes, and the two
//! pheromone trails. It advances the whole world one discrete step at a
//! time.
//!
//! Each tick:
//! 1. Every ant, in order: move, apply the boundary policy, maybe sense
//!    the opposite trail, interact with food or hills, maybe deposit,
//!    then jitter its heading
//! 2. Both trails decay; spent deposits are removed
//! 3. Exhausted food is removed and remaining food is counted
//! 4. The tick counter advances and statistics are recomputed
//!
//! Pheromones deposited by an ant are visible to later ants in the same
//! tick.

use crate::spatial_hash::SpatialHash;
use antfarm_core::error::Result;
use antfarm_core::params::{BoundaryPolicy, Params};
use antfarm_core::spatial::{Handle, Located, SpatialIndex};
use antfarm_core::steering::{blend_trail, steer};
use antfarm_core::types::*;
use antfarm_core::vector::Vector;
use rand::rngs::SmallRng;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

/// Statistics about the colony, recomputed every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ColonyStats {
    pub tick: Tick,
    pub foraging_ants: usize,
    pub returning_ants: usize,
    /// Units still sitting in food sources.
    pub remaining_food: u64,
    /// Units delivered to a hill. Never decreases.
    pub collected_food: u64,
    pub forage_pheromones: usize,
    pub return_pheromones: usize,
    /// Every unit ever placed in the world.
    pub total_food_placed: u64,
    /// Units taken back out by `remove_food_near`.
    pub food_withdrawn: u64,
}

impl ColonyStats {
    /// Units in flight: one per returning ant.
    pub fn carried_food(&self) -> u64 {
        self.returning_ants as u64
    }

    /// Whether every placed unit is accounted for.
    pub fn food_is_conserved(&self) -> bool {
        self.remaining_food + self.carried_food() + self.collected_food
            == self.total_food_placed - self.food_withdrawn
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub tick: Tick,
    pub pickups: usize,
    pub deliveries: usize,
    pub deposits: usize,
    pub expired_pheromones: usize,
    pub exhausted_food: usize,
}

/// A serializable snapshot of an ant.
#[derive(Debug, Clone, Serialize)]
pub struct AntSnapshot {
    pub position: Vector,
    pub heading: Vector,
    pub state: AntState,
}

/// A serializable snapshot of a food source.
#[derive(Debug, Clone, Serialize)]
pub struct FoodSnapshot {
    pub position: Vector,
    pub amount: u32,
}

/// A complete serializable snapshot of the colony at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct ColonySnapshot {
    pub stats: ColonyStats,
    pub ants: Vec<AntSnapshot>,
    pub food: Vec<FoodSnapshot>,
    pub hills: Vec<Vector>,
    pub forage_trail: usize,
    pub return_trail: usize,
}

/// Which collection `Colony::entities` should enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Ant,
    Food,
    Hill,
    Pheromone(Trail),
}

/// A borrowed view of one entity.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Ant(&'a Ant),
    Food(Handle, &'a Food),
    Hill(Handle, &'a Hill),
    Pheromone(Trail, Handle, &'a Pheromone),
}

impl Entity<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Ant(_) => EntityKind::Ant,
            Entity::Food(..) => EntityKind::Food,
            Entity::Hill(..) => EntityKind::Hill,
            Entity::Pheromone(trail, ..) => EntityKind::Pheromone(*trail),
        }
    }
}

impl Located for Entity<'_> {
    fn position(&self) -> Vector {
        match self {
            Entity::Ant(ant) => ant.position,
            Entity::Food(_, food) => food.position,
            Entity::Hill(_, hill) => hill.position,
            Entity::Pheromone(_, _, p) => p.position,
        }
    }
}

/// The colony. Owns the world and runs the simulation.
///
/// Build one with [`ColonyBuilder`](crate::colony_builder::ColonyBuilder).
#[derive(Debug, Clone)]
pub struct Colony {
    params: Params,
    world_size: f64,
    ants: Vec<Ant>,
    food: SpatialHash<Food>,
    hills: SpatialHash<Hill>,
    forage_trail: SpatialHash<Pheromone>,
    return_trail: SpatialHash<Pheromone>,
    rng: SmallRng,
    collected_food: u64,
    total_food_placed: u64,
    food_withdrawn: u64,
    stats: ColonyStats,
}

/// The pieces of the colony an ant touches while it steps.
struct Surroundings<'a> {
    params: &'a Params,
    world_size: f64,
    food: &'a mut SpatialHash<Food>,
    hills: &'a SpatialHash<Hill>,
    forage_trail: &'a mut SpatialHash<Pheromone>,
    return_trail: &'a mut SpatialHash<Pheromone>,
    rng: &'a mut SmallRng,
    collected_food: &'a mut u64,
}

impl Surroundings<'_> {
    fn trail(&self, trail: Trail) -> &SpatialHash<Pheromone> {
        match trail {
            Trail::Forage => &*self.forage_trail,
            Trail::Return => &*self.return_trail,
        }
    }

    fn trail_mut(&mut self, trail: Trail) -> &mut SpatialHash<Pheromone> {
        match trail {
            Trail::Forage => &mut *self.forage_trail,
            Trail::Return => &mut *self.return_trail,
        }
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen::<f64>() < probability
    }

    /// Advance one ant through the six per-tick steps.
    fn step(&mut self, ant: &mut Ant, report: &mut TickReport) {
        let params = self.params;

        // Move
        if let Some(direction) = ant.heading.try_normalize() {
            ant.position += direction * params.ant_speed;
        }

        apply_boundary(ant, self.world_size, params.boundary);

        // Sense
        if self.chance(params.sense_prob) {
            let trail = self.trail(ant.state.sensed_trail());
            let blend = blend_trail(
                ant.position,
                ant.heading,
                trail
                    .query_radius(ant.position, params.sense_radius)
                    .map(|(_, deposit)| deposit),
                params.sense_cos_floor,
            );
            ant.heading = steer(ant.heading, blend, params.influence);
        }

        // Interact
        if ant.state == AntState::Forage {
            let source = self
                .food
                .query_radius(ant.position, params.food_radius)
                .find(|(_, food)| !food.is_exhausted())
                .map(|(handle, _)| handle);
            if let Some(food) = source.and_then(|handle| self.food.get_mut(handle)) {
                if food.take_one() {
                    ant.pick_up_food(params.pheromone_start);
                    report.pickups += 1;
                }
            }
        }
        if ant.state == AntState::Return
            && self
                .hills
                .query_radius(ant.position, params.hill_radius)
                .next()
                .is_some()
        {
            *self.collected_food += 1;
            ant.drop_off_food(params.pheromone_start);
            report.deliveries += 1;
        }

        // Deposit
        if ant.pheromone_budget > 0 && self.chance(params.drop_prob) && ant.spend_pheromone() {
            self.trail_mut(ant.state.deposit_trail())
                .insert(Pheromone::new(ant.position));
            report.deposits += 1;
        }

        // Jitter
        if params.ant_rotation > 0.0 {
            let angle = self
                .rng
                .gen_range(-params.ant_rotation..=params.ant_rotation);
            ant.heading = ant.heading.rotate(angle);
        }
    }
}

fn apply_boundary(ant: &mut Ant, world_size: f64, policy: BoundaryPolicy) {
    match policy {
        BoundaryPolicy::Wrap => {
            ant.position.x = wrap_axis(ant.position.x, world_size);
            ant.position.y = wrap_axis(ant.position.y, world_size);
        }
        BoundaryPolicy::Turn => {
            if let Some(component) = turn_axis(ant.position.x, world_size) {
                ant.heading.x = component;
            }
            if let Some(component) = turn_axis(ant.position.y, world_size) {
                ant.heading.y = component;
            }
        }
    }
}

fn wrap_axis(value: f64, world_size: f64) -> f64 {
    if value < 0.0 {
        world_size
    } else if value >= world_size {
        0.0
    } else {
        value
    }
}

fn turn_axis(value: f64, world_size: f64) -> Option<f64> {
    if value < 0.0 {
        Some(1.0)
    } else if value >= world_size {
        Some(-1.0)
    } else {
        None
    }
}

impl Colony {
    /// Assemble a colony from already-validated parts.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        params: Params,
        world_size: f64,
        ants: Vec<Ant>,
        food: SpatialHash<Food>,
        hills: SpatialHash<Hill>,
        forage_trail: SpatialHash<Pheromone>,
        return_trail: SpatialHash<Pheromone>,
        rng: SmallRng,
    ) -> Self {
        let total_food_placed = food.iter().map(|(_, f)| f.amount as u64).sum();
        let mut colony = Self {
            params,
            world_size,
            ants,
            food,
            hills,
            forage_trail,
            return_trail,
            rng,
            collected_food: 0,
            total_food_placed,
            food_withdrawn: 0,
            stats: ColonyStats::default(),
        };
        colony.refresh_stats();
        colony
    }

    /// Run a single simulation tick.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();

        // Phase 1: ants, in order
        {
            let mut surroundings = Surroundings {
                params: &self.params,
                world_size: self.world_size,
                food: &mut self.food,
                hills: &self.hills,
                forage_trail: &mut self.forage_trail,
                return_trail: &mut self.return_trail,
                rng: &mut self.rng,
                collected_food: &mut self.collected_food,
            };
            for ant in self.ants.iter_mut() {
                surroundings.step(ant, &mut report);
            }
        }

        // Phase 2: trail decay
        for trail in Trail::ALL {
            report.expired_pheromones += self.decay_trail(trail);
        }

        // Phase 3: food pass
        let (remaining_food, exhausted) = self.sweep_food();
        report.exhausted_food = exhausted;

        // Phase 4: advance
        let returning_ants = self.ants.iter().filter(|a| a.is_carrying()).count();
        self.stats = ColonyStats {
            tick: self.stats.tick + 1,
            foraging_ants: self.ants.len() - returning_ants,
            returning_ants,
            remaining_food,
            collected_food: self.collected_food,
            forage_pheromones: self.forage_trail.len(),
            return_pheromones: self.return_trail.len(),
            total_food_placed: self.total_food_placed,
            food_withdrawn: self.food_withdrawn,
        };
        report.tick = self.stats.tick;

        debug!(
            tick = report.tick,
            pickups = report.pickups,
            deliveries = report.deliveries,
            deposits = report.deposits,
            expired = report.expired_pheromones,
            collected = self.collected_food,
            "tick complete"
        );

        report
    }

    /// Run the simulation for N ticks.
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Decay one trail and remove spent deposits. Returns how many expired.
    fn decay_trail(&mut self, trail: Trail) -> usize {
        let step = self.params.pheromone_decay;
        let field = self.trail_field_mut(trail);

        let spent: Vec<Handle> = field
            .iter_mut()
            .filter_map(|(handle, deposit)| deposit.decay(step).then_some(handle))
            .collect();
        for handle in &spent {
            field.remove(*handle);
        }
        spent.len()
    }

    /// Count remaining units and drop empty sources.
    fn sweep_food(&mut self) -> (u64, usize) {
        let remaining = self.food.iter().map(|(_, food)| food.amount as u64).sum();
        let exhausted = self.food.handles_where(Food::is_exhausted);
        for handle in &exhausted {
            self.food.remove(*handle);
        }
        (remaining, exhausted.len())
    }

    /// Recompute statistics from scratch without advancing the tick.
    fn refresh_stats(&mut self) {
        let returning_ants = self.ants.iter().filter(|a| a.is_carrying()).count();
        self.stats = ColonyStats {
            tick: self.stats.tick,
            foraging_ants: self.ants.len() - returning_ants,
            returning_ants,
            remaining_food: self.food.iter().map(|(_, f)| f.amount as u64).sum(),
            collected_food: self.collected_food,
            forage_pheromones: self.forage_trail.len(),
            return_pheromones: self.return_trail.len(),
            total_food_placed: self.total_food_placed,
            food_withdrawn: self.food_withdrawn,
        };
    }

    fn trail_field_mut(&mut self, trail: Trail) -> &mut SpatialHash<Pheromone> {
        match trail {
            Trail::Forage => &mut self.forage_trail,
            Trail::Return => &mut self.return_trail,
        }
    }

    /// Get colony statistics as of the last completed tick.
    pub fn stats(&self) -> ColonyStats {
        self.stats
    }

    /// Take a serializable snapshot of the colony's current state.
    pub fn snapshot(&self) -> ColonySnapshot {
        let ants = self
            .ants
            .iter()
            .map(|a| AntSnapshot {
                position: a.position,
                heading: a.heading,
                state: a.state,
            })
            .collect();

        let food = self
            .food
            .iter()
            .map(|(_, f)| FoodSnapshot {
                position: f.position,
                amount: f.amount,
            })
            .collect();

        ColonySnapshot {
            stats: self.stats,
            ants,
            food,
            hills: self.hills.iter().map(|(_, h)| h.position).collect(),
            forage_trail: self.forage_trail.len(),
            return_trail: self.return_trail.len(),
        }
    }

    /// Enumerate one kind of entity for rendering or inspection.
    pub fn entities(&self, kind: EntityKind) -> Box<dyn Iterator<Item = Entity<'_>> + '_> {
        match kind {
            EntityKind::Ant => Box::new(self.ants.iter().map(Entity::Ant)),
            EntityKind::Food => Box::new(self.food.iter().map(|(h, f)| Entity::Food(h, f))),
            EntityKind::Hill => Box::new(self.hills.iter().map(|(h, hill)| Entity::Hill(h, hill))),
            EntityKind::Pheromone(trail) => Box::new(
                self.trail(trail)
                    .iter()
                    .map(move |(h, p)| Entity::Pheromone(trail, h, p)),
            ),
        }
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    pub fn food(&self) -> &SpatialHash<Food> {
        &self.food
    }

    pub fn hills(&self) -> &SpatialHash<Hill> {
        &self.hills
    }

    pub fn trail(&self, trail: Trail) -> &SpatialHash<Pheromone> {
        match trail {
            Trail::Forage => &self.forage_trail,
            Trail::Return => &self.return_trail,
        }
    }

    pub fn world_size(&self) -> f64 {
        self.world_size
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Replace the active parameter set. Takes effect from the next tick.
    ///
    /// A rejected set leaves the current one in place.
    pub fn configure(&mut self, params: Params) -> Result<()> {
        if let Err(err) = params.validate() {
            warn!(error = %err, "rejected parameter update");
            return Err(err);
        }
        self.params = params;
        Ok(())
    }

    /// Place a food source.
    pub fn insert_food(&mut self, position: Vector, amount: u32) -> Handle {
        if amount == 0 {
            warn!(x = position.x, y = position.y, "placing empty food source");
        }
        self.total_food_placed += amount as u64;
        let handle = self.food.insert(Food::new(position, amount));
        self.refresh_stats();
        handle
    }

    /// Remove every food source within `radius`. Returns how many were removed.
    pub fn remove_food_near(&mut self, position: Vector, radius: f64) -> usize {
        let doomed: Vec<Handle> = self
            .food
            .query_radius(position, radius)
            .map(|(h, _)| h)
            .collect();
        for handle in &doomed {
            if let Some(food) = self.food.remove(*handle) {
                self.food_withdrawn += food.amount as u64;
            }
        }
        self.refresh_stats();
        doomed.len()
    }

    pub fn insert_hill(&mut self, position: Vector) -> Handle {
        self.hills.insert(Hill::new(position))
    }

    /// Remove every hill within `radius`. Returns how many were removed.
    pub fn remove_hill_near(&mut self, position: Vector, radius: f64) -> usize {
        let doomed: Vec<Handle> = self
            .hills
            .query_radius(position, radius)
            .map(|(h, _)| h)
            .collect();
        for handle in &doomed {
            self.hills.remove(*handle);
        }
        doomed.len()
    }
}
