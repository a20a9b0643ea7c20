//! Steering: how sensed pheromones bend an ant's heading.
//!
//! Each nearby deposit pulls the ant toward itself. The pull is the
//! deposit's remaining amount, divided by its distance (clamped below so
//! very close deposits don't dominate), and scaled by how well the deposit
//! lines up with the ant's current heading. Deposits whose cosine
//! similarity to the heading falls below a floor contribute nothing, so an
//! ant is never dragged backwards along the trail it just walked.

use crate::types::Pheromone;
use crate::vector::Vector;

/// Distances below this are clamped when weighting a deposit.
pub const MIN_SENSE_DISTANCE: f64 = 0.1;

/// Weight of one deposit seen from `position` while facing `heading`.
///
/// Returns `None` when the direction to the deposit is undefined (the
/// deposit sits exactly on the ant) or the heading is degenerate.
pub fn deposit_pull(
    position: Vector,
    heading: Vector,
    deposit: &Pheromone,
    cos_floor: f64,
) -> Option<Vector> {
    let offset = deposit.position - position;
    let direction = offset.try_normalize()?;
    let cos = heading.cosine_similarity(&direction)?;

    if cos < cos_floor {
        return Some(Vector::ZERO);
    }

    let strength = deposit.amount / offset.magnitude().max(MIN_SENSE_DISTANCE);
    Some(direction * (strength * cos))
}

/// Sum of the pulls of every sensed deposit.
pub fn blend_trail<'a, I>(position: Vector, heading: Vector, deposits: I, cos_floor: f64) -> Vector
where
    I: IntoIterator<Item = &'a Pheromone>,
{
    deposits
        .into_iter()
        .filter_map(|deposit| deposit_pull(position, heading, deposit, cos_floor))
        .fold(Vector::ZERO, |acc, pull| acc + pull)
}

/// Add the blended pull to the heading and renormalize.
///
/// A result with no usable direction keeps the previous heading.
pub fn steer(heading: Vector, blend: Vector, influence: f64) -> Vector {
    (heading + blend * influence).normalize_or(heading)
}
