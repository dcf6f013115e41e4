//! Mutable play state
//!
//! One `World` per scene: the entities plus pan offset and the hit flag.

use glam::Vec2;

use super::force::ForceCounts;
use super::level::{Ball, Force, Hole, Level, Star, Wall};
use super::viewport::Viewport;

/// Whether the ball is waiting for a shot or travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Aiming and placing forces; the ball is frozen
    Setup,
    /// Ball in free motion
    Moving,
}

/// Entities and view state of a level attempt
#[derive(Debug, Clone)]
pub struct World {
    pub ball: Ball,
    pub hole: Hole,
    pub walls: Vec<Wall>,
    pub stars: Vec<Star>,
    pub forces: Vec<Force>,
    /// Pan offset in world units
    pub center: Vec2,
    /// Set once the ball has been shot
    pub hit: bool,
}

impl World {
    pub fn from_level(level: &Level) -> Self {
        Self {
            ball: Ball::spawn(&level.ball),
            hole: level.hole,
            walls: level.walls.clone(),
            stars: level.stars.clone(),
            forces: level.forces.clone(),
            center: Vec2::ZERO,
            hit: false,
        }
    }

    /// Fresh ball at the spawn point, back in setup
    pub fn reset_ball(&mut self, level: &Level) {
        self.ball = Ball::spawn(&level.ball);
        self.hit = false;
    }

    /// Ball and forces back to the authored defaults
    pub fn clear(&mut self, level: &Level) {
        self.reset_ball(level);
        self.forces = level.forces.clone();
    }

    pub fn phase(&self) -> Phase {
        if self.hit { Phase::Moving } else { Phase::Setup }
    }

    pub fn force_counts(&self) -> ForceCounts {
        ForceCounts::scan(&self.forces)
    }

    pub fn viewport(&self, surface_size: Vec2, pixel_ratio: f32) -> Viewport {
        Viewport::new(surface_size, pixel_ratio, self.center)
    }

    /// Index of the first force within `radius` of a surface point
    pub fn force_at(&self, viewport: &Viewport, point: Vec2, radius: f32) -> Option<usize> {
        self.forces
            .iter()
            .position(|f| viewport.to_screen(f.pos()).distance(point) <= radius)
    }
}

/// Turns frame timestamps into step lengths
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Seconds since the previous frame; zero on the first one
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let delta = match self.last_ms {
            Some(last) => ((now_ms - last).max(0.0) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        delta
    }
}
