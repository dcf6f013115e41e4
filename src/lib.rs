//! Gravity Golf - force-field golf puzzle core
//!
//! Core modules:
//! - `sim`: Simulation (levels, viewport mapping, forces, collisions, tick)
//! - `scene`: Scene aggregate, input state machine, lifecycle
//! - `renderer`: Draws the scene onto a `Surface`
//! - `platform`: Browser/headless host abstraction
//! - `settings`: Data-driven physics tuning

pub mod error;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::{LevelError, NavigationError, SettingsError};
pub use scene::Scene;
pub use settings::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Inverse-square strength of every force emitter
    pub const FORCE_STRENGTH: f32 = 1_000_000.0;
    /// Symmetric bound on a single emitter's acceleration
    pub const FORCE_CLAMP: f32 = 5000.0;
    /// Hit-test and render radius shared by all emitters (device pixels)
    pub const FORCE_RADIUS: f32 = 20.0;

    /// Pull-back distance (device pixels) that yields full power
    pub const MAX_DISTANCE: f32 = 200.0;
    /// Launch speed at full power (device pixels/s)
    pub const MAX_VELOCITY: f32 = 800.0;

    /// Key that restarts the ball without touching placed forces
    pub const RESET_KEY: &str = "r";

    /// Decimal places kept when a level is snapshotted for publishing
    pub const PUBLISH_PRECISION: u32 = 2;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(v: Vec2) -> (f32, f32) {
    (v.length(), v.y.atan2(v.x))
}
