mod plugin;

use std::fmt;
use std::path::{Path, PathBuf};

use bevy::{asset::Asset, prelude::*, reflect::TypePath};
use body_canvas::{
  Background, CanvasSettings, GridSettings, PhysicsSettings, ProjectileSettings,
  config::DEFAULT_PIXELS_PER_METER,
};
pub use plugin::ConfigPlugin;
use serde::Deserialize;

/// Path of the config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/editor.config.toml";
/// The same file as seen by the asset server.
pub const CONFIG_ASSET_PATH: &str = "config/editor.config.toml";

#[derive(Asset, TypePath, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
  pub window: WindowConfig,
  pub canvas: CanvasConfig,
  pub grid: GridSettings,
  pub physics: PhysicsSettings,
  pub projectiles: ProjectileSettings,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
  pub width: u32,
  pub height: u32,
  pub title: String,
}

impl Default for WindowConfig {
  fn default() -> Self {
    Self {
      width: 1280,
      height: 720,
      title: "Body Editor".to_string(),
    }
  }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CanvasConfig {
  pub pixels_per_meter: f32,
  pub background: Background,
  pub draw_image: bool,
  pub draw_shapes: bool,
}

impl Default for CanvasConfig {
  fn default() -> Self {
    Self {
      pixels_per_meter: DEFAULT_PIXELS_PER_METER,
      background: Background::default(),
      draw_image: true,
      draw_shapes: true,
    }
  }
}

impl EditorConfig {
  pub fn canvas_settings(&self) -> CanvasSettings {
    CanvasSettings {
      pixels_per_meter: self.canvas.pixels_per_meter,
      background: self.canvas.background,
      draw_image: self.canvas.draw_image,
      draw_shapes: self.canvas.draw_shapes,
      grid: self.grid.clone(),
      physics: self.physics.clone(),
      projectiles: self.projectiles.clone(),
    }
  }
}

#[derive(Debug)]
pub enum ConfigError {
  Read {
    path: PathBuf,
    source: std::io::Error,
  },
  Parse {
    path: PathBuf,
    source: toml::de::Error,
  },
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Read { path, source } => {
        write!(f, "failed to read config {}: {}", path.display(), source)
      }
      Self::Parse { path, source } => {
        write!(f, "failed to parse config {}: {}", path.display(), source)
      }
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Read { source, .. } => Some(source),
      Self::Parse { source, .. } => Some(source),
    }
  }
}

pub fn load_config(path: &Path) -> Result<EditorConfig, ConfigError> {
  let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  toml::from_str(&source).map_err(|source| ConfigError::Parse {
    path: path.to_path_buf(),
    source,
  })
}

#[derive(Resource)]
pub struct ConfigHandle(pub Handle<EditorConfig>);

/// Config currently in effect. Re-inserted on every hot reload.
#[derive(Resource, Debug, Clone)]
pub struct ConfigLoaded(pub EditorConfig);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn shipped_config_parses() {
    let source = include_str!("../../assets/config/editor.config.toml");
    let config: EditorConfig = toml::from_str(source).unwrap();
    assert_eq!(config.window.title, "Body Editor");
    assert_eq!(config.canvas.pixels_per_meter, 1.0);
    assert_eq!(config.physics.velocity_iterations, 10);
    assert_eq!(config.projectiles.max_projectiles, None);
  }

  #[test]
  fn sections_map_onto_canvas_settings() {
    let config: EditorConfig = toml::from_str(
      r#"
        [canvas]
        background = "dark"
        draw_image = false

        [grid]
        snap_enabled = true
        gap = 0.25

        [projectiles]
        max_projectiles = 64
        seed = 9
      "#,
    )
    .unwrap();

    let settings = config.canvas_settings();
    assert_eq!(settings.background, Background::Dark);
    assert!(!settings.draw_image);
    assert!(settings.draw_shapes);
    assert_eq!(settings.grid.gap, 0.25);
    assert!(settings.grid.snap_enabled);
    assert_eq!(settings.projectiles.max_projectiles, Some(64));
    assert_eq!(settings.projectiles.seed, Some(9));
    assert_eq!(settings.pixels_per_meter, 300.0);
  }

  #[test]
  fn unknown_background_is_rejected() {
    let result = toml::from_str::<EditorConfig>("[canvas]\nbackground = \"plaid\"\n");
    assert!(result.is_err());
  }

  #[test]
  fn missing_file_reports_path() {
    let err = load_config(Path::new("does/not/exist.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("does/not/exist.toml"));
  }
}
