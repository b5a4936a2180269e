use anyhow::{Context, Result};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use bump_dungeon::{
    ecs::{Actor, BlocksMovement, ECSWorld, Fighter, GameConfig, Player, Position},
    handle_key_event,
    input::{ConsoleInput, InputSource},
};

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(&path)
            .with_context(|| format!("Failed to load config from {path}"))?,
        None => GameConfig::default(),
    };

    let mut ecs_world = ECSWorld::from_config(config);
    let player = ecs_world.world.spawn((
        Position::new(1, 1),
        Actor::new("player"),
        Fighter::new(30, 2, 5),
        BlocksMovement,
        Player,
    ));
    ecs_world.world.spawn((
        Position::new(4, 1),
        Actor::new("orc"),
        Fighter::new(10, 0, 3),
        BlocksMovement,
    ));

    let _guard = TerminalGuard;
    enable_raw_mode().context("Failed to enable raw mode")?;
    print!("Move with arrows or q/w/e/a/d/z/s/c, wait with x, Esc to quit.\r\n");

    let mut input = ConsoleInput::new();
    let mut seen = 0;
    loop {
        let Some(key) = input.poll(Duration::from_millis(100))? else {
            continue;
        };
        if is_quit(&key) {
            break;
        }
        let Some(action) = handle_key_event(&key) else {
            continue;
        };

        if let Err(e) = action.perform(player, &mut ecs_world) {
            print!("{}\r\n", error::handle_error(&e));
            continue;
        }

        let log = &ecs_world.resources.message_log;
        if log.total() > seen {
            seen = log.total();
            if let Some(message) = log.last() {
                print!("{message}\r\n");
            }
        }
        if let Ok(pos) = ecs_world.world.get::<&Position>(player) {
            print!("@ ({}, {})\r\n", pos.x, pos.y);
        }
    }

    Ok(())
}
