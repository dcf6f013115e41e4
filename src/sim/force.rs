//! Force field model
//!
//! Each emitter pulls (or pushes) the ball with an inverse-square
//! acceleration, clamped so that a ball passing right over an emitter does
//! not get flung to infinity.

use glam::Vec2;

use super::level::{Force, Polarity};

/// Vector of length `magnitude` pointing from `from` toward `to`
///
/// `distance` is the precomputed separation of the two points. Coincident
/// points have no direction and give the zero vector.
#[inline]
pub fn split_hypotenuse(from: Vec2, to: Vec2, distance: f32, magnitude: f32) -> Vec2 {
    if distance <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (to.x - from.x) / distance * magnitude,
        (to.y - from.y) / distance * magnitude,
    )
}

/// Signed acceleration magnitude at `distance` from an emitter
#[inline]
pub fn field_strength(distance: f32, sign: f32, strength: f32, clamp: f32) -> f32 {
    (strength * sign / (distance * distance)).clamp(-clamp, clamp)
}

/// Acceleration an emitter at `emitter` imparts on a ball at `ball`
///
/// Both points must be in the same (surface) space; the result is in that
/// space too.
pub fn acceleration(emitter: Vec2, polarity: Polarity, ball: Vec2, strength: f32, clamp: f32) -> Vec2 {
    let distance = ball.distance(emitter);
    if distance <= 0.0 {
        return Vec2::ZERO;
    }
    let magnitude = field_strength(distance, polarity.sign(), strength, clamp);
    split_hypotenuse(ball, emitter, distance, magnitude)
}

/// Number of emitters of each polarity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForceCounts {
    pub attractive: usize,
    pub repulsive: usize,
}

impl ForceCounts {
    pub fn scan(forces: &[Force]) -> Self {
        forces.iter().fold(Self::default(), |mut counts, f| {
            match f.direction {
                Polarity::Attract => counts.attractive += 1,
                Polarity::Repel => counts.repulsive += 1,
            }
            counts
        })
    }
}
