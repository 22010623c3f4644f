//! Fires one test ball from the console.

use bevy::prelude::*;
use bevy_console::{ConsoleCommand, reply};
use body_canvas::{ModeController, fire_in_test_mode};
use clap::Parser;

#[derive(Parser, ConsoleCommand)]
#[command(name = "fire", allow_negative_numbers = true)]
pub struct FireCommand {
  /// Origin x, world units
  x: f32,
  /// Origin y, world units
  y: f32,
  /// Throw vector x
  fx: f32,
  /// Throw vector y
  fy: f32,
}

pub fn fire_command(
  mut log: ConsoleCommand<FireCommand>,
  mode: Res<ModeController>,
  mut commands: Commands,
) {
  if let Some(Ok(FireCommand { x, y, fx, fy })) = log.take() {
    match fire_in_test_mode(&mut commands, &mode, Vec2::new(x, y), Vec2::new(fx, fy)) {
      Ok(()) => {
        reply!(log, "Fired from ({}, {})", x, y);
      }
      Err(err) => {
        reply!(log, "{}", err);
      }
    }
  }
}
