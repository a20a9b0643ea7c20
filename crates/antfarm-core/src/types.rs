//! Shared entity types used across the antfarm crates.

use crate::spatial::Located;
use crate::vector::Vector;
use serde::{Deserialize, Serialize};

/// Pheromone amount of a freshly deposited entry.
pub const FRESH_PHEROMONE: f64 = 1.0;

/// Pheromone amounts at or below this count as fully decayed.
///
/// Repeated subtraction leaves residue around 1e-15; without the epsilon an
/// entry could survive one tick longer than `ceil(amount / decay)`.
pub const PHEROMONE_FLOOR: f64 = 1e-9;

/// What an ant is currently trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AntState {
    /// Searching for food. Every ant starts here.
    Forage,
    /// Carrying one unit of food back to a hill.
    Return,
}

impl AntState {
    /// The trail an ant in this state marks.
    pub fn deposit_trail(self) -> Trail {
        match self {
            AntState::Forage => Trail::Forage,
            AntState::Return => Trail::Return,
        }
    }

    /// The trail an ant in this state follows.
    ///
    /// Ants follow the trail laid by the other cohort: a returning ant
    /// walks back along where foragers came from, and vice versa.
    pub fn sensed_trail(self) -> Trail {
        self.deposit_trail().opposite()
    }
}

/// One of the two independent pheromone collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trail {
    /// Laid by foraging ants, followed by returning ants.
    Forage,
    /// Laid by returning ants, followed by foraging ants.
    Return,
}

impl Trail {
    pub const ALL: [Trail; 2] = [Trail::Forage, Trail::Return];

    pub fn opposite(self) -> Trail {
        match self {
            Trail::Forage => Trail::Return,
            Trail::Return => Trail::Forage,
        }
    }
}

/// A foraging agent.
///
/// `heading` is kept close to unit length but is not strictly normalized
/// between operations; movement normalizes it before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ant {
    pub position: Vector,
    pub heading: Vector,
    pub state: AntState,
    /// Deposits left before this trip runs dry.
    pub pheromone_budget: u32,
}

impl Ant {
    pub fn new(position: Vector, heading: Vector) -> Self {
        Self {
            position,
            heading,
            state: AntState::Forage,
            pheromone_budget: 0,
        }
    }

    pub fn with_budget(mut self, budget: u32) -> Self {
        self.pheromone_budget = budget;
        self
    }

    pub fn is_carrying(&self) -> bool {
        self.state == AntState::Return
    }

    /// FORAGE → RETURN: grab food, turn around, refill the pheromone budget.
    ///
    /// Callers are responsible for taking the unit out of the food source.
    pub fn pick_up_food(&mut self, budget: u32) {
        self.state = AntState::Return;
        self.turn_around(budget);
    }

    /// RETURN → FORAGE: drop food at a hill, turn around, refill the budget.
    pub fn drop_off_food(&mut self, budget: u32) {
        self.state = AntState::Forage;
        self.turn_around(budget);
    }

    fn turn_around(&mut self, budget: u32) {
        self.heading = -self.heading;
        self.pheromone_budget = budget;
    }

    /// Spend one unit of pheromone. Returns `false` if the budget is empty.
    pub fn spend_pheromone(&mut self) -> bool {
        match self.pheromone_budget.checked_sub(1) {
            Some(left) => {
                self.pheromone_budget = left;
                true
            }
            None => false,
        }
    }
}

/// A food source. Never moves; removed once its amount reaches zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub position: Vector,
    pub amount: u32,
}

impl Food {
    pub fn new(position: Vector, amount: u32) -> Self {
        Self { position, amount }
    }

    /// Take one unit. Returns `false` if the source is already empty.
    pub fn take_one(&mut self) -> bool {
        match self.amount.checked_sub(1) {
            Some(left) => {
                self.amount = left;
                true
            }
            None => false,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.amount == 0
    }
}

/// A single pheromone deposit.
///
/// Density at a location is represented by multiple co-located entries,
/// never by summing into one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pheromone {
    pub position: Vector,
    /// Remaining strength in `(0, 1]`.
    pub amount: f64,
}

impl Pheromone {
    /// A fresh deposit at full strength.
    pub fn new(position: Vector) -> Self {
        Self::with_amount(position, FRESH_PHEROMONE)
    }

    pub fn with_amount(position: Vector, amount: f64) -> Self {
        Self { position, amount }
    }

    /// Subtract one decay step. Returns `true` once the deposit is spent.
    pub fn decay(&mut self, step: f64) -> bool {
        self.amount -= step;
        self.is_spent()
    }

    pub fn is_spent(&self) -> bool {
        self.amount <= PHEROMONE_FLOOR
    }
}

/// A colony hill where food is dropped off. Immutable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hill {
    pub position: Vector,
}

impl Hill {
    pub fn new(position: Vector) -> Self {
        Self { position }
    }
}

impl Located for Ant {
    fn position(&self) -> Vector {
        self.position
    }
}

impl Located for Food {
    fn position(&self) -> Vector {
        self.position
    }
}

impl Located for Pheromone {
    fn position(&self) -> Vector {
        self.position
    }
}

impl Located for Hill {
    fn position(&self) -> Vector {
        self.position
    }
}

/// The current tick of the simulation.
pub type Tick = u64;
