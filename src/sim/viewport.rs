//! World <-> surface coordinate mapping
//!
//! World space is y-up and centred on the origin. The surface is y-down with
//! the origin in its top-left corner, measured in device pixels. Panning
//! shifts the world by `center`; there is no zoom, so sizes carry over as-is.

use glam::Vec2;

/// Screen-space rectangle (origin is the top-left corner)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }
}

/// Current mapping parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Surface size in device pixels
    pub size: Vec2,
    /// Device pixel ratio (CSS px -> device px)
    pub pixel_ratio: f32,
    /// Pan offset in world units
    pub center: Vec2,
}

impl Viewport {
    pub fn new(size: Vec2, pixel_ratio: f32, center: Vec2) -> Self {
        Self {
            size,
            pixel_ratio,
            center,
        }
    }

    /// World position -> surface position
    #[inline]
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(
            self.size.x / 2.0 + world.x + self.center.x,
            self.size.y / 2.0 - world.y - self.center.y,
        )
    }

    /// Surface position -> world position
    #[inline]
    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x - self.size.x / 2.0 - self.center.x,
            self.size.y / 2.0 - screen.y - self.center.y,
        )
    }

    /// World rectangle (top-left anchored, y-up) -> surface rectangle
    pub fn rect_to_screen(&self, top_left: Vec2, size: Vec2) -> Rect {
        Rect {
            origin: self.to_screen(top_left),
            size,
        }
    }

    /// CSS pixel pointer position -> device pixel surface position
    #[inline]
    pub fn pointer_to_surface(&self, css: Vec2) -> Vec2 {
        css * self.pixel_ratio
    }

    /// Surface-space movement -> world-space movement (y flipped)
    #[inline]
    pub fn screen_delta_to_world(delta: Vec2) -> Vec2 {
        Vec2::new(delta.x, -delta.y)
    }
}
