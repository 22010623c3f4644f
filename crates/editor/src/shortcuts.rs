//! Keyboard shortcuts that drive the canvas.

use bevy::prelude::*;
use body_canvas::{AdvanceMode, CanvasSet, CanvasSettings, ClearProjectiles, RecreateWorldRequested};

use crate::document;
use crate::input::{
  ClearBalls, CycleMode, Recreate, Shortcut, ToggleBackground, ToggleGrid, ToggleImage,
  just_pressed,
};
use crate::tools::console_closed;

pub struct ShortcutsPlugin;

impl Plugin for ShortcutsPlugin {
  fn build(&self, app: &mut App) {
    app.add_systems(
      Update,
      (
        cycle_mode,
        clear_balls,
        recreate_world,
        toggle_image,
        toggle_grid,
        toggle_background,
        document::select_previous_shape,
        document::select_next_shape,
      )
        .run_if(console_closed)
        .in_set(CanvasSet::Input),
    );
  }
}

fn cycle_mode(mut shortcut: Shortcut<CycleMode>, mut advance: MessageWriter<AdvanceMode>) {
  if just_pressed(&mut shortcut) {
    advance.write(AdvanceMode);
  }
}

fn clear_balls(mut shortcut: Shortcut<ClearBalls>, mut commands: Commands) {
  if just_pressed(&mut shortcut) {
    commands.queue(ClearProjectiles);
  }
}

fn recreate_world(
  mut shortcut: Shortcut<Recreate>,
  mut recreate: MessageWriter<RecreateWorldRequested>,
) {
  if just_pressed(&mut shortcut) {
    recreate.write(RecreateWorldRequested);
  }
}

// Each shortcut query writes `PressLatch`, so one system per action.

fn toggle_image(mut shortcut: Shortcut<ToggleImage>, mut settings: ResMut<CanvasSettings>) {
  if just_pressed(&mut shortcut) {
    settings.draw_image = !settings.draw_image;
    info!("Reference image: {}", on_off(settings.draw_image));
  }
}

fn toggle_grid(mut shortcut: Shortcut<ToggleGrid>, mut settings: ResMut<CanvasSettings>) {
  if just_pressed(&mut shortcut) {
    settings.grid.snap_enabled = !settings.grid.snap_enabled;
    info!("Grid snap: {}", on_off(settings.grid.snap_enabled));
  }
}

fn toggle_background(
  mut shortcut: Shortcut<ToggleBackground>,
  mut settings: ResMut<CanvasSettings>,
) {
  if just_pressed(&mut shortcut) {
    settings.background = settings.background.toggled();
    info!("Background: {:?}", settings.background);
  }
}

pub fn on_off(enabled: bool) -> &'static str {
  if enabled { "on" } else { "off" }
}
