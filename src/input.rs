//! Pointer input types
//!
//! Positions arrive in CSS pixels relative to the surface; the scene scales
//! them to device pixels before any hit test.

use glam::Vec2;

/// Mouse button that started a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left: shoot, drag, pan
    Primary,
    /// Right: remove force
    Secondary,
    Other,
}

impl PointerButton {
    /// Map `MouseEvent.button`
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => PointerButton::Primary,
            2 => PointerButton::Secondary,
            _ => PointerButton::Other,
        }
    }

    /// Bit of this button in `MouseEvent.buttons`
    fn mask(self) -> u16 {
        match self {
            PointerButton::Primary => 1,
            PointerButton::Secondary => 2,
            PointerButton::Other => 4,
        }
    }
}

/// One pointer event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// CSS pixels, surface-relative
    pub pos: Vec2,
    /// Button that changed state (meaningless on moves)
    pub button: PointerButton,
    /// Buttons held down right now, `MouseEvent.buttons` bit layout
    pub buttons: u16,
}

impl PointerInput {
    pub fn new(x: f32, y: f32, button: PointerButton, buttons: u16) -> Self {
        Self {
            pos: Vec2::new(x, y),
            button,
            buttons,
        }
    }

    /// Primary press, or a move with the primary button held
    pub fn primary(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerButton::Primary, PointerButton::Primary.mask())
    }

    /// Secondary press, or a move with the secondary button held
    pub fn secondary(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerButton::Secondary, PointerButton::Secondary.mask())
    }

    /// Move with no button held
    pub fn hover(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerButton::Other, 0)
    }

    pub fn holds(&self, button: PointerButton) -> bool {
        self.buttons & button.mask() != 0
    }
}

/// A press in progress (device pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub start: Vec2,
    pub current: Vec2,
    pub button: PointerButton,
    /// Force grabbed at press time
    pub force: Option<usize>,
}

impl Gesture {
    pub fn new(start: Vec2, button: PointerButton, force: Option<usize>) -> Self {
        Self {
            start,
            current: start,
            button,
            force,
        }
    }

    /// Move to `pos`, returning the step since the last position
    pub fn advance(&mut self, pos: Vec2) -> Vec2 {
        let step = pos - self.current;
        self.current = pos;
        step
    }

    /// Released where it was pressed
    pub fn is_click(&self, release: Vec2) -> bool {
        release == self.start
    }
}
