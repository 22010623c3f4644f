mod config;
mod console;
mod document;
mod input;
mod render;
mod shortcuts;
mod tools;

use std::path::PathBuf;

use bevy::{
  diagnostic::FrameTimeDiagnosticsPlugin,
  prelude::*,
  window::{PresentMode, WindowResolution},
};
use body_canvas::{BodyCanvasPlugin, CanvasSet};
use clap::Parser;

/// Rigid-body shape editor with a live physics preview.
#[derive(Parser, Debug)]
#[command(name = "body-editor", version)]
struct Cli {
  /// Config file to load
  #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
  config: PathBuf,
  /// Fixed seed for test ball radii and rotations
  #[arg(long)]
  seed: Option<u64>,
}

fn main() -> AppExit {
  let cli = Cli::parse();

  let mut config = match config::load_config(&cli.config) {
    Ok(config) => config,
    Err(err) => {
      eprintln!("body-editor: {}", err);
      return AppExit::error();
    }
  };
  if cli.seed.is_some() {
    config.projectiles.seed = cli.seed;
  }
  // Hot reload only follows the file the asset server knows about.
  let watch = cli.config == PathBuf::from(config::DEFAULT_CONFIG_PATH);

  let mut app = App::new();

  app
    .add_plugins(DefaultPlugins.set(WindowPlugin {
      primary_window: Some(Window {
        resolution: WindowResolution::new(config.window.width, config.window.height),
        title: config.window.title.clone(),
        present_mode: PresentMode::AutoVsync,
        ..default()
      }),
      ..default()
    }))
    .add_plugins(FrameTimeDiagnosticsPlugin::default())
    .add_plugins(BodyCanvasPlugin::new(config.canvas_settings()))
    .add_plugins(config::ConfigPlugin {
      config: config.clone(),
      watch,
    })
    .add_plugins(input::InputPlugin)
    .add_plugins(console::ConsolePlugins)
    .add_plugins(tools::ToolsPlugin)
    .add_plugins(shortcuts::ShortcutsPlugin)
    .add_plugins(render::CanvasRenderPlugin)
    .insert_resource(document::ShapeLibrary::builtin())
    .add_systems(
      Update,
      document::publish_selection
        .after(CanvasSet::Input)
        .before(CanvasSet::Apply),
    );

  app.run()
}
