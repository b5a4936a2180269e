//! Player actions and how they resolve against the map.
//!
//! Directional actions never fail on an impossible move or attack: walking into a wall or
//! swinging at an empty tile just does nothing. `perform` only returns an error when the
//! acting entity lacks a component the action needs.

use hecs::Entity;
use tracing::{debug, info};

use crate::ecs::{Actor, ECSWorld, Fighter, Position};
use crate::map::GameMap;
use error::GameError;

/// Fixed grid offset carried by directional actions. Each component is -1, 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Offset {
    dx: i32,
    dy: i32,
}

impl Offset {
    pub const NORTH: Offset = Offset { dx: 0, dy: -1 };
    pub const SOUTH: Offset = Offset { dx: 0, dy: 1 };
    pub const WEST: Offset = Offset { dx: -1, dy: 0 };
    pub const EAST: Offset = Offset { dx: 1, dy: 0 };
    pub const NORTH_WEST: Offset = Offset { dx: -1, dy: -1 };
    pub const NORTH_EAST: Offset = Offset { dx: 1, dy: -1 };
    pub const SOUTH_WEST: Offset = Offset { dx: -1, dy: 1 };
    pub const SOUTH_EAST: Offset = Offset { dx: 1, dy: 1 };

    /// `None` unless both components are one step at most.
    pub fn new(dx: i32, dy: i32) -> Option<Self> {
        let step = -1..=1;
        (step.contains(&dx) && step.contains(&dy)).then_some(Self { dx, dy })
    }

    pub fn dx(&self) -> i32 {
        self.dx
    }

    pub fn dy(&self) -> i32 {
        self.dy
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Skip the turn
    Wait,
    Movement(Offset),
    Melee(Offset),
    /// Attack whoever stands in the way, otherwise step there
    Bump(Offset),
}

impl Action {
    pub fn offset(&self) -> Option<Offset> {
        match self {
            Action::Wait => None,
            Action::Movement(offset) | Action::Melee(offset) | Action::Bump(offset) => {
                Some(*offset)
            }
        }
    }

    pub fn perform(&self, entity: Entity, world: &mut ECSWorld) -> Result<(), GameError> {
        match *self {
            Action::Wait => Ok(()),
            Action::Movement(offset) => perform_movement(entity, offset, world),
            Action::Melee(offset) => perform_melee(entity, offset, world),
            Action::Bump(offset) => perform_bump(entity, offset, world),
        }
    }
}

/// `Ok(None)` when the destination lies past the edge of the coordinate space.
fn destination(
    entity: Entity,
    offset: Offset,
    world: &ECSWorld,
) -> Result<Option<Position>, GameError> {
    world
        .world
        .get::<&Position>(entity)
        .map(|pos| pos.translated(offset.dx, offset.dy))
        .map_err(|_| GameError::MissingComponent {
            entity: entity.id(),
            component: "Position",
        })
}

fn perform_movement(entity: Entity, offset: Offset, world: &mut ECSWorld) -> Result<(), GameError> {
    let Some(dest) = destination(entity, offset, world)? else {
        debug!(?entity, "move ignored: coordinates overflow");
        return Ok(());
    };

    if !world.is_in_bounds(dest.x, dest.y) {
        debug!(?entity, x = dest.x, y = dest.y, "move ignored: out of bounds");
        return Ok(());
    }
    if !world.is_walkable(dest.x, dest.y) {
        debug!(?entity, x = dest.x, y = dest.y, "move ignored: tile not walkable");
        return Ok(());
    }
    if let Some(blocker) = world.blocking_entity_at(dest.x, dest.y) {
        debug!(?entity, ?blocker, "move ignored: destination occupied");
        return Ok(());
    }

    if let Ok(mut pos) = world.world.get::<&mut Position>(entity) {
        pos.move_by(offset.dx, offset.dy);
    }
    Ok(())
}

fn perform_melee(entity: Entity, offset: Offset, world: &mut ECSWorld) -> Result<(), GameError> {
    let (attacker_name, power) = {
        let actor = world.world.get::<&Actor>(entity);
        let fighter = world.world.get::<&Fighter>(entity);
        match (actor, fighter) {
            (Ok(actor), Ok(fighter)) => (actor.name.to_uppercase(), fighter.power),
            _ => return Err(GameError::NotAnActor(entity.id())),
        }
    };

    let Some(dest) = destination(entity, offset, world)? else {
        debug!(?entity, "attack ignored: coordinates overflow");
        return Ok(());
    };
    let Some(target) = world.actor_at(dest.x, dest.y) else {
        debug!(?entity, x = dest.x, y = dest.y, "attack ignored: nobody there");
        return Ok(());
    };

    // actor_at only yields entities carrying both components
    let (target_name, defense) = match (
        world.world.get::<&Actor>(target),
        world.world.get::<&Fighter>(target),
    ) {
        (Ok(actor), Ok(fighter)) => (actor.name.clone(), fighter.defense),
        _ => return Ok(()),
    };

    let damage = power.saturating_sub(defense);
    let description = format!("{attacker_name} attacks {target_name}");

    let message = if damage > 0 {
        if let Ok(mut fighter) = world.world.get::<&mut Fighter>(target) {
            fighter.hp = fighter.hp.saturating_sub(damage);
        }
        format!("{description} for {damage} hit points")
    } else {
        format!("{description} but does no damage")
    };

    info!(?entity, ?target, damage, "{message}");
    world.log(message);
    Ok(())
}

fn perform_bump(entity: Entity, offset: Offset, world: &mut ECSWorld) -> Result<(), GameError> {
    let occupied = destination(entity, offset, world)?
        .is_some_and(|dest| world.actor_at(dest.x, dest.y).is_some());

    if occupied {
        perform_melee(entity, offset, world)
    } else {
        perform_movement(entity, offset, world)
    }
}
