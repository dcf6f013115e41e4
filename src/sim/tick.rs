//! Per-frame simulation step
//!
//! Order matters and is fixed: win check, wall bounces, force
//! accelerations, then position integration.

use glam::Vec2;

use super::collision::{bounce, circle_rect_contact};
use super::force::acceleration;
use super::state::{Phase, World};
use crate::settings::Tuning;

/// What a step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Ball not shot yet, nothing moved
    Setup,
    /// Ball advanced
    Moving,
    /// Ball came to rest inside the hole
    Holed,
}

/// Advance the world by `delta` seconds
///
/// `surface_size` is the rendering surface in device pixels; collisions and
/// forces are evaluated on normalized positions.
pub fn tick(world: &mut World, surface_size: Vec2, tuning: &Tuning, delta: f32) -> TickOutcome {
    if world.phase() == Phase::Setup {
        return TickOutcome::Setup;
    }

    if world.hole.contains(&world.ball) {
        return TickOutcome::Holed;
    }

    let viewport = world.viewport(surface_size, 1.0);
    let ball_screen = viewport.to_screen(world.ball.pos);

    for wall in &world.walls {
        let rect = viewport.rect_to_screen(
            Vec2::new(wall.x, wall.y),
            Vec2::new(wall.width, wall.height),
        );
        if let Some(contact) = circle_rect_contact(ball_screen, world.ball.radius, &rect) {
            world.ball.vel = bounce(world.ball.vel, contact);
        }
    }

    for force in &world.forces {
        let accel = acceleration(
            viewport.to_screen(force.pos()),
            force.direction,
            ball_screen,
            tuning.force_strength,
            tuning.force_clamp,
        );
        world.ball.vel += accel * delta;
    }

    world.ball.pos.x += world.ball.vel.x * delta;
    world.ball.pos.y -= world.ball.vel.y * delta;

    TickOutcome::Moving
}
