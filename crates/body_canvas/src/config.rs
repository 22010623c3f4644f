//! Canvas settings.
//!
//! Everything here is plain data that the application shell deserializes from
//! its TOML config. `pixels_per_meter` is only read once, when the plugin is
//! built; the rest may be replaced at runtime.

use bevy::prelude::*;
use serde::Deserialize;

/// Default world scale, in document pixels per simulation meter.
pub const DEFAULT_PIXELS_PER_METER: f32 = 300.0;

/// Checkerboard variant drawn behind the canvas.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Background {
  #[default]
  Light,
  Dark,
}

impl Background {
  pub fn toggled(self) -> Self {
    match self {
      Self::Light => Self::Dark,
      Self::Dark => Self::Light,
    }
  }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GridSettings {
  pub snap_enabled: bool,
  pub gap: f32,
}

impl Default for GridSettings {
  fn default() -> Self {
    Self {
      snap_enabled: false,
      gap: 0.1,
    }
  }
}

/// Solver iteration counts and the elapsed-time cap for one physics step.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsSettings {
  /// Rapier solver iterations.
  pub velocity_iterations: usize,
  /// Rapier internal stabilization iterations.
  pub position_iterations: usize,
  /// Longest step taken in one frame, in seconds.
  pub max_step: f32,
}

impl Default for PhysicsSettings {
  fn default() -> Self {
    Self {
      velocity_iterations: 10,
      position_iterations: 10,
      max_step: 1.0 / 30.0,
    }
  }
}

/// Parameters of the test balls fired in Test mode.
///
/// Radii are in world units; the physics shape is divided by the world scale.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ProjectileSettings {
  pub min_radius: f32,
  pub max_radius: f32,
  pub density: f32,
  pub linear_damping: f32,
  pub angular_damping: f32,
  /// Multiplier applied to the throw vector before dividing by the world
  /// scale.
  pub impulse_scale: f32,
  /// Oldest projectiles are retired past this count. `None` keeps all of them
  /// until the next reset.
  pub max_projectiles: Option<usize>,
  /// Fixed RNG seed for reproducible radii and rotations.
  pub seed: Option<u64>,
}

impl Default for ProjectileSettings {
  fn default() -> Self {
    Self {
      min_radius: 0.02,
      max_radius: 0.04,
      density: 1.0,
      linear_damping: 0.5,
      angular_damping: 0.5,
      impulse_scale: 2.0,
      max_projectiles: None,
      seed: None,
    }
  }
}

impl ProjectileSettings {
  /// Ordered `(min, max)` radius bounds. Falls back to the default bounds when
  /// either one is non-finite or not positive.
  pub fn radius_range(&self) -> (f32, f32) {
    let valid = |r: f32| r.is_finite() && r > 0.0;
    if valid(self.min_radius) && valid(self.max_radius) {
      (
        self.min_radius.min(self.max_radius),
        self.min_radius.max(self.max_radius),
      )
    } else {
      let fallback = Self::default();
      warn!(
        "Invalid projectile radii [{}, {}], using [{}, {}]",
        self.min_radius, self.max_radius, fallback.min_radius, fallback.max_radius
      );
      (fallback.min_radius, fallback.max_radius)
    }
  }
}

/// Runtime settings of the canvas.
#[derive(Resource, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CanvasSettings {
  pub pixels_per_meter: f32,
  pub background: Background,
  /// Draw the selected document's reference image under the shapes.
  pub draw_image: bool,
  /// Draw the reference polygons' outlines.
  pub draw_shapes: bool,
  pub grid: GridSettings,
  pub physics: PhysicsSettings,
  pub projectiles: ProjectileSettings,
}

impl Default for CanvasSettings {
  fn default() -> Self {
    Self {
      pixels_per_meter: DEFAULT_PIXELS_PER_METER,
      background: Background::default(),
      draw_image: true,
      draw_shapes: true,
      grid: GridSettings::default(),
      physics: PhysicsSettings::default(),
      projectiles: ProjectileSettings::default(),
    }
  }
}

impl CanvasSettings {
  /// Parses settings from a TOML document. Missing keys take their defaults.
  pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(source)
  }
}
