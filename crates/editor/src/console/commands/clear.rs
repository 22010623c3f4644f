//! Removes all test balls.

use bevy::prelude::*;
use bevy_console::{ConsoleCommand, reply};
use body_canvas::{ClearProjectiles, ProjectileRegistry};
use clap::Parser;

#[derive(Parser, ConsoleCommand)]
#[command(name = "clear")]
pub struct ClearCommand {}

pub fn clear_command(
  mut log: ConsoleCommand<ClearCommand>,
  registry: Res<ProjectileRegistry>,
  mut commands: Commands,
) {
  if let Some(Ok(ClearCommand {})) = log.take() {
    let count = registry.len();
    commands.queue(ClearProjectiles);
    reply!(log, "Cleared {} balls", count);
  }
}
