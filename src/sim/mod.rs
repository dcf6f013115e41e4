//! Simulation module
//!
//! All physics lives here. This module is pure:
//! - No rendering or platform dependencies
//! - Time only enters as an explicit `delta`
//! - Walls and forces are scanned in list order

pub mod collision;
pub mod force;
pub mod level;
pub mod state;
pub mod tick;
pub mod viewport;

pub use collision::{bounce, circle_rect_contact};
pub use force::{ForceCounts, acceleration, field_strength, split_hypotenuse};
pub use level::{Ball, BallSpawn, Force, Hole, Level, Polarity, Star, Wall};
pub use state::{FrameClock, Phase, World};
pub use tick::{TickOutcome, tick};
pub use viewport::{Rect, Viewport};
