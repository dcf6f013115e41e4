//! Headless host: no window, everything recorded
//!
//! Used by the native binary and by tests. Each double hands out a cheap
//! probe so its state can be inspected after the double is boxed into a
//! scene.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec2;

use super::{Color, Cursor, FrameScheduler, Navigator, Registration, Route, Surface};
use crate::error::NavigationError;
use crate::sim::Rect;

/// Draw call log
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    Clear,
    Circle { center: Vec2, radius: f32 },
    Ring { center: Vec2, radius: f32 },
    Rect(Rect),
}

/// Fixed-size surface that records what was drawn in the last frame
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Vec2,
    pixel_ratio: f32,
    ops: Rc<RefCell<Vec<DrawOp>>>,
    cursor: Rc<Cell<Cursor>>,
}

/// Read side of a [`RecordingSurface`]
#[derive(Debug, Clone)]
pub struct SurfaceProbe {
    ops: Rc<RefCell<Vec<DrawOp>>>,
    cursor: Rc<Cell<Cursor>>,
}

impl RecordingSurface {
    pub fn new(size: Vec2, pixel_ratio: f32) -> Self {
        Self {
            size,
            pixel_ratio,
            ops: Rc::default(),
            cursor: Rc::default(),
        }
    }

    pub fn probe(&self) -> SurfaceProbe {
        SurfaceProbe {
            ops: self.ops.clone(),
            cursor: self.cursor.clone(),
        }
    }
}

impl SurfaceProbe {
    pub fn ops(&self) -> Vec<DrawOp> {
        self.ops.borrow().clone()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor.get()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn clear(&mut self, _color: Color) {
        let mut ops = self.ops.borrow_mut();
        ops.clear();
        ops.push(DrawOp::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, _color: Color) {
        self.ops.borrow_mut().push(DrawOp::Circle { center, radius });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, _width: f32, _color: Color) {
        self.ops.borrow_mut().push(DrawOp::Ring { center, radius });
    }

    fn fill_rect(&mut self, rect: Rect, _color: Color) {
        self.ops.borrow_mut().push(DrawOp::Rect(rect));
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor.set(cursor);
    }
}

/// Scheduler whose frames are pumped by hand
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pending: Rc<Cell<bool>>,
    requests: Rc<Cell<u32>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shares state with the scheduler; clone before boxing it
    pub fn probe(&self) -> Self {
        self.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Total `request` calls so far
    pub fn requests(&self) -> u32 {
        self.requests.get()
    }

    /// Consume the pending frame; true if there was one
    pub fn take(&self) -> bool {
        self.pending.replace(false)
    }
}

impl FrameScheduler for ManualScheduler {
    fn request(&mut self) {
        self.pending.set(true);
        self.requests.set(self.requests.get() + 1);
    }

    fn cancel(&mut self) {
        self.pending.set(false);
    }
}

/// Navigator that records routes and alerts
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    routes: Rc<RefCell<Vec<Route>>>,
    alerts: Rc<RefCell<Vec<String>>>,
    reject: Rc<Cell<bool>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigator that refuses every route
    pub fn rejecting() -> Self {
        let nav = Self::default();
        nav.reject.set(true);
        nav
    }

    pub fn probe(&self) -> Self {
        self.clone()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.borrow().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, route: Route) -> Result<(), NavigationError> {
        if self.reject.get() {
            return Err(NavigationError::Rejected {
                route: route.to_string(),
                reason: "rejected by host".to_string(),
            });
        }
        self.routes.borrow_mut().push(route);
        Ok(())
    }

    fn alert(&mut self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

/// Registration that only counts releases
#[derive(Debug, Clone, Default)]
pub struct CountingRegistration {
    released: Rc<Cell<u32>>,
}

impl CountingRegistration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe(&self) -> Self {
        self.clone()
    }

    pub fn released(&self) -> u32 {
        self.released.get()
    }
}

impl Registration for CountingRegistration {
    fn release(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}
