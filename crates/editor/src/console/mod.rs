//! Developer console with commands for clearing, rebuilding, grid snapping and
//! firing test balls.

pub mod commands;
mod toggle;

use bevy::prelude::*;
use bevy_console::{AddConsoleCommand, ConsoleConfiguration, ConsolePlugin};
use commands::{
  ClearCommand, FireCommand, RecreateCommand, SnapCommand, clear_command, fire_command,
  recreate_command, snap_command,
};

pub struct ConsolePlugins;

impl Plugin for ConsolePlugins {
  fn build(&self, app: &mut App) {
    if !app.is_plugin_added::<bevy_egui::EguiPlugin>() {
      app.add_plugins(bevy_egui::EguiPlugin::default());
    }
    app
      .add_plugins(ConsolePlugin)
      .insert_resource(ConsoleConfiguration {
        // Disable default toggle keys, we use custom `/` handling
        keys: vec![],
        ..default()
      })
      .add_console_command::<ClearCommand, _>(clear_command)
      .add_console_command::<RecreateCommand, _>(recreate_command)
      .add_console_command::<SnapCommand, _>(snap_command)
      .add_console_command::<FireCommand, _>(fire_command)
      .add_systems(Update, toggle::handle_console_toggle);
  }
}
