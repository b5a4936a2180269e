//! ECS (Entity Component System) types the actions operate on.

use hecs::World;
use std::collections::VecDeque;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::map::Level;
use error::GameError;

/// Main ECS world container
pub struct ECSWorld {
    pub world: World,
    pub level: Level,
    pub resources: Resources,
}

impl ECSWorld {
    pub fn new(level: Level) -> Self {
        Self::with_config(level, GameConfig::default())
    }

    pub fn with_config(level: Level, config: GameConfig) -> Self {
        Self {
            world: World::new(),
            level,
            resources: Resources {
                message_log: MessageLog::new(config.message_log_capacity),
                config,
            },
        }
    }

    /// Builds a walled arena sized from the config.
    pub fn from_config(config: GameConfig) -> Self {
        let level = Level::bordered(config.map_width, config.map_height);
        Self::with_config(level, config)
    }

    /// Append a line to the in-game message log
    pub fn log(&mut self, message: impl Into<String>) {
        self.resources.message_log.push(message);
    }
}

/// Global resources that are shared across actions
pub struct Resources {
    /// Game configuration
    pub config: GameConfig,

    /// Messages shown to the player, oldest first
    pub message_log: MessageLog,
}

/// Bounded log of player-facing messages.
#[derive(Debug, Clone)]
pub struct MessageLog {
    messages: VecDeque<String>,
    capacity: usize,
    total: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
            total: 0,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message.into());
        self.total += 1;
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.back().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of messages ever pushed, including evicted ones.
    pub fn total(&self) -> usize {
        self.total
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub map_width: usize,
    pub map_height: usize,
    pub message_log_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_width: 40,
            map_height: 20,
            message_log_capacity: 100,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

// Player marker component
#[derive(Clone, Copy, Debug)]
pub struct Player;

/// Marker for entities nothing else may walk through
#[derive(Clone, Copy, Debug)]
pub struct BlocksMovement;

// Basic Components
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `None` if either coordinate would overflow.
    pub fn translated(&self, dx: i32, dy: i32) -> Option<Position> {
        Some(Position::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// Leaves the position untouched and returns false on overflow.
    pub fn move_by(&mut self, dx: i32, dy: i32) -> bool {
        match self.translated(dx, dy) {
            Some(moved) => {
                *self = moved;
                true
            }
            None => false,
        }
    }
}

/// Named creature that can show up in combat messages
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
}

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    pub max_hp: i32,
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
}

impl Fighter {
    pub fn new(hp: i32, defense: i32, power: i32) -> Self {
        Self {
            max_hp: hp,
            hp,
            defense,
            power,
        }
    }
}
