use bevy::{asset::AssetEvent, ecs::message::MessageReader, prelude::*, window::PrimaryWindow};
use bevy_common_assets::toml::TomlAssetPlugin;
use body_canvas::CanvasSettings;

use super::{CONFIG_ASSET_PATH, ConfigHandle, ConfigLoaded, EditorConfig};

/// Installs the startup config and, when `watch` is set, reloads it from the
/// asset folder whenever the file changes.
pub struct ConfigPlugin {
  pub config: EditorConfig,
  pub watch: bool,
}

impl Plugin for ConfigPlugin {
  fn build(&self, app: &mut App) {
    app
      .insert_resource(ConfigLoaded(self.config.clone()))
      .add_systems(
        Update,
        (update_window_on_config_change, update_canvas_on_config_change),
      );

    if self.watch {
      app
        .add_plugins(TomlAssetPlugin::<EditorConfig>::new(&["config.toml"]))
        .add_systems(PreStartup, watch_config_file)
        .add_systems(Update, watch_config_changes);
    }
  }
}

fn watch_config_file(mut commands: Commands, asset_server: Res<AssetServer>) {
  let handle: Handle<EditorConfig> = asset_server.load(CONFIG_ASSET_PATH);
  commands.insert_resource(ConfigHandle(handle));
}

fn watch_config_changes(
  mut commands: Commands,
  config_handle: Res<ConfigHandle>,
  mut messages: MessageReader<AssetEvent<EditorConfig>>,
  configs: Res<Assets<EditorConfig>>,
) {
  for event in messages.read() {
    if let AssetEvent::Modified { id } = event {
      if config_handle.0.id() == *id {
        if let Some(config) = configs.get(&config_handle.0) {
          info!("Config reloaded!");
          commands.insert_resource(ConfigLoaded(config.clone()));
        }
      }
    }
  }
}

fn update_window_on_config_change(
  config: Res<ConfigLoaded>,
  mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
  if config.is_changed() && !config.is_added() {
    if let Ok(mut window) = windows.single_mut() {
      let window_config = &config.0.window;
      window
        .resolution
        .set(window_config.width as f32, window_config.height as f32);
      window.title.clone_from(&window_config.title);
    }
  }
}

/// The world scale is fixed at startup, so a reloaded `pixels_per_meter` is
/// ignored.
fn update_canvas_on_config_change(config: Res<ConfigLoaded>, mut settings: ResMut<CanvasSettings>) {
  if !config.is_changed() || config.is_added() {
    return;
  }
  let mut reloaded = config.0.canvas_settings();
  if reloaded.pixels_per_meter != settings.pixels_per_meter {
    warn!(
      "pixels_per_meter cannot change at runtime, keeping {}",
      settings.pixels_per_meter
    );
    reloaded.pixels_per_meter = settings.pixels_per_meter;
  }
  reloaded.projectiles.seed = settings.projectiles.seed;
  if *settings != reloaded {
    *settings = reloaded;
  }
}
