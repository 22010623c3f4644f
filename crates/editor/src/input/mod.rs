pub mod actions;
mod bindings;

pub use actions::{
  ClearBalls, CycleMode, EditorInput, NextShape, PressLatch, PreviousShape, Recreate, Shortcut,
  ToggleBackground, ToggleGrid, ToggleImage, just_pressed,
};
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;
pub use bindings::editor_input_actions;

pub struct InputPlugin;

impl Plugin for InputPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(EnhancedInputPlugin)
      .add_input_context::<EditorInput>()
      .add_systems(Startup, spawn_editor_input);
  }
}

fn spawn_editor_input(mut commands: Commands) {
  commands.spawn((Name::new("Editor input"), EditorInput, editor_input_actions()));
}
