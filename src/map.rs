//! Tile grid and the map queries actions rely on.

use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::ecs::{Actor, BlocksMovement, ECSWorld, Fighter, Position};

/// Read-only view of the map that directional actions consult before acting.
pub trait GameMap {
    fn is_in_bounds(&self, x: i32, y: i32) -> bool;

    /// Out-of-bounds cells are never walkable.
    fn is_walkable(&self, x: i32, y: i32) -> bool;

    fn blocking_entity_at(&self, x: i32, y: i32) -> Option<Entity>;

    /// First entity at `(x, y)` that can take part in combat.
    fn actor_at(&self, x: i32, y: i32) -> Option<Entity>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainType {
    Floor,
    Wall,
}

/// 地图格子
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub terrain: TerrainType,
    pub walkable: bool,
}

impl Tile {
    pub fn new(terrain: TerrainType) -> Self {
        Self {
            terrain,
            walkable: matches!(terrain, TerrainType::Floor),
        }
    }
}

/// Row-major grid of tiles.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Level {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Level {
    pub fn filled(width: usize, height: usize, terrain: TerrainType) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::new(terrain); width * height],
        }
    }

    /// Open floor surrounded by a ring of wall.
    pub fn bordered(width: usize, height: usize) -> Self {
        let mut level = Self::filled(width, height, TerrainType::Floor);
        for x in 0..width {
            level.set_index(x, 0, TerrainType::Wall);
            level.set_index(x, height.saturating_sub(1), TerrainType::Wall);
        }
        for y in 0..height {
            level.set_index(0, y, TerrainType::Wall);
            level.set_index(width.saturating_sub(1), y, TerrainType::Wall);
        }
        level
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// 获取指定位置的瓦片
    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    /// Returns false when `(x, y)` is outside the level.
    pub fn set_terrain(&mut self, x: i32, y: i32, terrain: TerrainType) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.tiles[i] = Tile::new(terrain);
                true
            }
            None => false,
        }
    }

    fn set_index(&mut self, x: usize, y: usize, terrain: TerrainType) {
        if x < self.width && y < self.height {
            self.tiles[y * self.width + x] = Tile::new(terrain);
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

impl GameMap for ECSWorld {
    fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        self.level.is_in_bounds(x, y)
    }

    fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.level.get_tile(x, y).is_some_and(|tile| tile.walkable)
    }

    fn blocking_entity_at(&self, x: i32, y: i32) -> Option<Entity> {
        let target = Position::new(x, y);
        self.world
            .query::<&Position>()
            .with::<&BlocksMovement>()
            .iter()
            .find(|(_, pos)| **pos == target)
            .map(|(entity, _)| entity)
    }

    fn actor_at(&self, x: i32, y: i32) -> Option<Entity> {
        let target = Position::new(x, y);
        self.world
            .query::<(&Position, &Actor, &Fighter)>()
            .iter()
            .find(|(_, (pos, _, _))| **pos == target)
            .map(|(entity, _)| entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bordered_level_has_wall_ring() {
        let level = Level::bordered(4, 3);
        assert!(!level.get_tile(0, 0).unwrap().walkable);
        assert!(!level.get_tile(3, 2).unwrap().walkable);
        assert!(level.get_tile(1, 1).unwrap().walkable);
        assert!(level.get_tile(2, 1).unwrap().walkable);
    }

    #[test]
    fn out_of_range_lookups_return_none() {
        let level = Level::filled(3, 3, TerrainType::Floor);
        assert!(level.get_tile(-1, 0).is_none());
        assert!(level.get_tile(0, 3).is_none());
        assert!(!level.is_in_bounds(3, 0));
        assert!(level.is_in_bounds(2, 2));
    }

    #[test]
    fn set_terrain_updates_walkability() {
        let mut level = Level::filled(3, 3, TerrainType::Floor);
        assert!(level.set_terrain(1, 1, TerrainType::Wall));
        assert_eq!(level.get_tile(1, 1).unwrap().terrain, TerrainType::Wall);
        assert!(!level.get_tile(1, 1).unwrap().walkable);
        assert!(!level.set_terrain(5, 5, TerrainType::Wall));
    }

    #[test]
    fn map_queries_find_entities_by_position() {
        let mut world = ECSWorld::new(Level::filled(5, 5, TerrainType::Floor));
        let rock = world.world.spawn((Position::new(1, 1), BlocksMovement));
        let orc = world.world.spawn((
            Position::new(2, 2),
            Actor::new("orc"),
            Fighter::new(10, 0, 3),
            BlocksMovement,
        ));

        assert_eq!(world.blocking_entity_at(1, 1), Some(rock));
        assert_eq!(world.actor_at(1, 1), None);
        assert_eq!(world.actor_at(2, 2), Some(orc));
        assert_eq!(world.blocking_entity_at(3, 3), None);
        assert!(!world.is_walkable(9, 9));
    }
}
