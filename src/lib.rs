pub mod actions;
pub mod ecs;
pub mod input;
pub mod map;

pub use actions::{Action, Offset};
pub use ecs::ECSWorld;
pub use error::GameError;
pub use input::{handle_input, handle_key_event};
pub use map::GameMap;
