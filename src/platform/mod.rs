//! Platform abstraction layer
//!
//! The scene talks to its host only through these traits:
//! - `Surface`: size, pixel ratio, drawing, cursor
//! - `FrameScheduler`: one pending per-frame callback, cancellable
//! - `Navigator`: route changes after a win
//! - `Registrations`: listener handles released together on teardown

use std::fmt;

use glam::Vec2;

use crate::error::NavigationError;
use crate::sim::Rect;

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

/// RGBA, components in 0..=1
pub type Color = [f32; 4];

/// Pointer affordance shown over the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    /// Hovering a force that can be dragged
    Grab,
}

impl Cursor {
    pub fn as_css(&self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Grab => "grab",
        }
    }
}

/// Drawing target the scene renders into
pub trait Surface {
    /// Backing size in device pixels
    fn size(&self) -> Vec2;
    /// Device pixels per CSS pixel
    fn pixel_ratio(&self) -> f32;
    /// Re-sync the backing size with the displayed size
    fn fit(&mut self) {}
    fn clear(&mut self, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn set_cursor(&mut self, cursor: Cursor);
}

/// Host frame signal (requestAnimationFrame on the web)
pub trait FrameScheduler {
    /// Ask for one callback on the next frame
    fn request(&mut self);
    /// Drop the pending callback; harmless when nothing is pending
    fn cancel(&mut self);
}

/// Where to go after a level is won
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Level(u32),
    LevelIndex,
}

impl Route {
    /// Route after winning level `id` out of `level_count`
    pub fn after_win(id: u32, level_count: u32) -> Self {
        if id >= level_count {
            Route::LevelIndex
        } else {
            Route::Level(id + 1)
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Level(id) => write!(f, "#/level/{}", id),
            Route::LevelIndex => write!(f, "#/levels"),
        }
    }
}

/// External router
pub trait Navigator {
    fn navigate(&mut self, route: Route) -> Result<(), NavigationError>;
    /// User-visible notice (alert box on the web)
    fn alert(&mut self, message: &str);
}

/// A host subscription that must be undone on teardown
pub trait Registration {
    fn release(&mut self);
}

/// Listener handles owned by a scene, released as one batch
#[derive(Default)]
pub struct Registrations {
    items: Vec<Box<dyn Registration>>,
}

impl Registrations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, registration: impl Registration + 'static) {
        self.items.push(Box::new(registration));
    }

    /// Move every handle out of `other` into this batch
    pub fn append(&mut self, other: &mut Registrations) {
        self.items.append(&mut other.items);
    }

    /// Release every handle; later calls are no-ops
    pub fn release_all(&mut self) {
        for mut item in self.items.drain(..) {
            item.release();
        }
    }
}

impl Drop for Registrations {
    fn drop(&mut self) {
        self.release_all();
    }
}
