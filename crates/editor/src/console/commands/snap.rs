//! Grid snapping command.

use bevy::prelude::*;
use bevy_console::{ConsoleCommand, reply};
use body_canvas::{CanvasSettings, GridSettings};
use clap::{Parser, ValueEnum};

use crate::shortcuts::on_off;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SnapState {
  On,
  Off,
}

#[derive(Parser, ConsoleCommand)]
#[command(name = "snap")]
pub struct SnapCommand {
  /// Enable or disable snapping
  state: SnapState,
  /// Grid spacing in world units
  gap: Option<f32>,
}

/// Applies a snap command to the grid. Rejects non-positive gaps.
fn apply_snap(grid: &mut GridSettings, state: SnapState, gap: Option<f32>) -> Result<(), String> {
  if let Some(gap) = gap {
    if !(gap.is_finite() && gap > 0.0) {
      return Err(format!("Grid gap must be positive, got {}", gap));
    }
    grid.gap = gap;
  }
  grid.snap_enabled = state == SnapState::On;
  Ok(())
}

pub fn snap_command(mut log: ConsoleCommand<SnapCommand>, mut settings: ResMut<CanvasSettings>) {
  if let Some(Ok(SnapCommand { state, gap })) = log.take() {
    match apply_snap(&mut settings.grid, state, gap) {
      Ok(()) => {
        reply!(
          log,
          "Grid snap: {} (gap {})",
          on_off(settings.grid.snap_enabled),
          settings.grid.gap
        );
      }
      Err(message) => {
        reply!(log, "{}", message);
      }
    }
  }
}
