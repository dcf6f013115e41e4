//! Scene rendering
//!
//! Paints the world at its normalized positions. Purely a sink: nothing
//! here feeds back into the simulation.

use glam::Vec2;

use crate::platform::Surface;
use crate::sim::{Polarity, World};

/// Colors for game elements
pub mod colors {
    use crate::platform::Color;

    pub const BACKGROUND: Color = [0.02, 0.02, 0.05, 1.0];
    pub const STAR: Color = [0.9, 0.85, 0.3, 1.0];
    pub const HOLE: Color = [0.05, 0.0, 0.1, 1.0];
    pub const HOLE_RING: Color = [0.6, 0.2, 0.8, 1.0];
    pub const WALL: Color = [0.3, 0.3, 0.4, 1.0];
    pub const GRAVITY: Color = [0.4, 0.7, 1.0, 0.8];
    pub const ANTIGRAVITY: Color = [1.0, 0.4, 0.2, 0.8];
    pub const BALL: Color = [1.0, 1.0, 1.0, 1.0];

    /// CSS `rgba()` string for canvas fill styles
    pub fn css(color: Color) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (color[0] * 255.0).round() as u8,
            (color[1] * 255.0).round() as u8,
            (color[2] * 255.0).round() as u8,
            color[3]
        )
    }
}

const HOLE_RING_WIDTH: f32 = 3.0;

/// Draw one frame
pub fn draw(world: &World, surface: &mut dyn Surface, force_radius: f32) {
    let viewport = world.viewport(surface.size(), surface.pixel_ratio());

    surface.clear(colors::BACKGROUND);

    for star in &world.stars {
        let pos = viewport.to_screen(Vec2::new(star.x, star.y));
        surface.fill_circle(pos, star.radius, colors::STAR);
    }

    let hole = viewport.to_screen(world.hole.pos());
    surface.fill_circle(hole, world.hole.radius, colors::HOLE);
    surface.stroke_circle(hole, world.hole.radius, HOLE_RING_WIDTH, colors::HOLE_RING);

    for wall in &world.walls {
        let rect = viewport.rect_to_screen(
            Vec2::new(wall.x, wall.y),
            Vec2::new(wall.width, wall.height),
        );
        surface.fill_rect(rect, colors::WALL);
    }

    for force in &world.forces {
        let color = match force.direction {
            Polarity::Attract => colors::GRAVITY,
            Polarity::Repel => colors::ANTIGRAVITY,
        };
        surface.fill_circle(viewport.to_screen(force.pos()), force_radius, color);
    }

    surface.fill_circle(viewport.to_screen(world.ball.pos), world.ball.radius, colors::BALL);
}
