//! Collision detection and response against rectangular walls
//!
//! Everything here works in surface space: the ball centre and the wall
//! rectangle are both normalized before the test.

use glam::Vec2;

use super::viewport::Rect;
use crate::{cartesian_to_polar, normalize_angle, polar_to_cartesian};

/// Contact angle between a circle and a rectangle
///
/// Clamps the centre onto the rectangle to find its nearest point. Returns
/// the angle from that point to the centre when they are within `radius`,
/// `None` otherwise. Corners fall out of the clamp without special cases.
pub fn circle_rect_contact(center: Vec2, radius: f32, rect: &Rect) -> Option<f32> {
    let nearest = center.clamp(rect.min(), rect.max());
    let offset = center - nearest;
    if offset.length() <= radius {
        Some(offset.y.atan2(offset.x))
    } else {
        None
    }
}

/// Mirror a velocity about the contact normal
///
/// `bounce = 2·contact − heading + π`; the speed is kept as-is.
pub fn bounce(velocity: Vec2, contact_angle: f32) -> Vec2 {
    let (speed, heading) = cartesian_to_polar(velocity);
    let angle = normalize_angle(2.0 * contact_angle - heading + std::f32::consts::PI);
    polar_to_cartesian(speed, angle)
}
