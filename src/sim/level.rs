//! Level records and simulation entities
//!
//! Everything a level author places lives here. Positions are world space
//! (y-up); the viewport maps them onto the surface.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::LevelError;

/// Emitter polarity, encoded as `1` / `-1` in level data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Polarity {
    /// Pulls the ball in ("gravity")
    Attract,
    /// Pushes the ball away ("antigravity")
    Repel,
}

impl Polarity {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Polarity::Attract => 1.0,
            Polarity::Repel => -1.0,
        }
    }
}

impl TryFrom<i64> for Polarity {
    type Error = LevelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Polarity::Attract),
            -1 => Ok(Polarity::Repel),
            other => Err(LevelError::InvalidDirection(other)),
        }
    }
}

impl From<Polarity> for i64 {
    fn from(p: Polarity) -> Self {
        match p {
            Polarity::Attract => 1,
            Polarity::Repel => -1,
        }
    }
}

/// A point force emitter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Force {
    pub x: f32,
    pub y: f32,
    pub direction: Polarity,
}

impl Force {
    pub fn new(pos: Vec2, direction: Polarity) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            direction,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Where the ball starts, and how big it is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSpawn {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// The one moving body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    /// Surface convention: positive `y` moves down the screen
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn spawn(spawn: &BallSpawn) -> Self {
        Self {
            pos: Vec2::new(spawn.x, spawn.y),
            vel: Vec2::ZERO,
            radius: spawn.radius,
        }
    }

    /// Speed in device pixels per second
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Hole {
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// True when the ball is entirely inside the hole
    pub fn contains(&self, ball: &Ball) -> bool {
        ball.pos.distance(self.pos()) <= self.radius - ball.radius
    }
}

/// Axis-aligned obstacle; `(x, y)` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Decorative marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Authored level data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// 1-based ordinal
    pub id: u32,
    pub ball: BallSpawn,
    pub hole: Hole,
    #[serde(default)]
    pub walls: Vec<Wall>,
    #[serde(default)]
    pub stars: Vec<Star>,
    #[serde(default)]
    pub forces: Vec<Force>,
}

impl Level {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a JSON array of levels, rejecting an empty pack
    pub fn pack_from_json(json: &str) -> Result<Vec<Self>, LevelError> {
        let levels: Vec<Self> = serde_json::from_str(json)?;
        if levels.is_empty() {
            return Err(LevelError::Empty);
        }
        Ok(levels)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Copy with every coordinate rounded to `places` decimals
    pub fn rounded(&self, places: u32) -> Self {
        let factor = 10f32.powi(places as i32);
        let r = |v: f32| (v * factor).round() / factor;
        Self {
            id: self.id,
            ball: BallSpawn {
                x: r(self.ball.x),
                y: r(self.ball.y),
                radius: r(self.ball.radius),
            },
            hole: Hole {
                x: r(self.hole.x),
                y: r(self.hole.y),
                radius: r(self.hole.radius),
            },
            walls: self
                .walls
                .iter()
                .map(|w| Wall {
                    x: r(w.x),
                    y: r(w.y),
                    width: r(w.width),
                    height: r(w.height),
                })
                .collect(),
            stars: self
                .stars
                .iter()
                .map(|s| Star {
                    x: r(s.x),
                    y: r(s.y),
                    radius: r(s.radius),
                })
                .collect(),
            forces: self
                .forces
                .iter()
                .map(|f| Force {
                    x: r(f.x),
                    y: r(f.y),
                    direction: f.direction,
                })
                .collect(),
        }
    }
}
