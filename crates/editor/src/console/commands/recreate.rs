//! Rebuilds the physics world from the selected shape.

use bevy::prelude::*;
use bevy_console::{ConsoleCommand, reply};
use body_canvas::RecreateWorldRequested;
use clap::Parser;

#[derive(Parser, ConsoleCommand)]
#[command(name = "recreate")]
pub struct RecreateCommand {}

pub fn recreate_command(
  mut log: ConsoleCommand<RecreateCommand>,
  mut recreate: MessageWriter<RecreateWorldRequested>,
) {
  if let Some(Ok(RecreateCommand {})) = log.take() {
    recreate.write(RecreateWorldRequested);
    reply!(log, "World recreated");
  }
}
