//! Coordinate spaces of the canvas.
//!
//! - **Screen**: window pixels, origin top-left, y down.
//! - **World**: document units. At zoom 1 the camera shows
//!   [`HORIZONTAL_EXTENT`] of them across the viewport.
//! - **Simulation**: world units divided by the [`WorldScale`].

use bevy::prelude::*;

use crate::config::{DEFAULT_PIXELS_PER_METER, GridSettings};

/// Width of the visible world at zoom 1, whatever the window size.
pub const HORIZONTAL_EXTENT: f32 = 2.0;

/// Zoom steps offered by the wheel, in percent.
pub const ZOOM_LEVELS: [f32; 15] = [
  5.0, 10.0, 16.0, 25.0, 33.0, 50.0, 66.0, 100.0, 150.0, 200.0, 300.0, 400.0, 600.0, 800.0, 1000.0,
];

/// Pixels per simulation meter. Set once at startup and never changed.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct WorldScale(f32);

impl WorldScale {
  /// Falls back to the default scale for non-finite or non-positive values.
  pub fn new(pixels_per_meter: f32) -> Self {
    if pixels_per_meter.is_finite() && pixels_per_meter > 0.0 {
      Self(pixels_per_meter)
    } else {
      warn!(
        "Invalid pixels_per_meter {}, using {}",
        pixels_per_meter, DEFAULT_PIXELS_PER_METER
      );
      Self(DEFAULT_PIXELS_PER_METER)
    }
  }

  pub fn pixels_per_meter(self) -> f32 {
    self.0
  }

  pub fn to_simulation(self, world: Vec2) -> Vec2 {
    world / self.0
  }

  pub fn to_world(self, simulation: Vec2) -> Vec2 {
    simulation * self.0
  }

  pub fn length_to_simulation(self, length: f32) -> f32 {
    length / self.0
  }
}

impl Default for WorldScale {
  fn default() -> Self {
    Self(DEFAULT_PIXELS_PER_METER)
  }
}

/// Rounds each axis to the nearest multiple of the grid gap when snapping is
/// on. A non-positive gap leaves the point untouched.
pub fn snap_to_grid(point: Vec2, grid: &GridSettings) -> Vec2 {
  if !grid.snap_enabled || grid.gap <= 0.0 {
    return point;
  }
  let gap = grid.gap;
  Vec2::new(
    (point.x / gap).round() * gap,
    (point.y / gap).round() * gap,
  )
}

/// Pan/zoom state of the world camera and the screen/world mapping.
///
/// The horizontal extent is fixed, so the vertical extent follows the
/// viewport's aspect ratio.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CanvasCamera {
  /// World point shown at the centre of the viewport.
  pub position: Vec2,
  /// Orthographic zoom factor; 1 shows [`HORIZONTAL_EXTENT`] units across,
  /// smaller values magnify.
  pub zoom: f32,
  viewport: Vec2,
}

impl Default for CanvasCamera {
  fn default() -> Self {
    Self::new(Vec2::new(1280.0, 720.0))
  }
}

impl CanvasCamera {
  /// Creates a camera centred on a unit-sized reference image.
  pub fn new(viewport: Vec2) -> Self {
    let mut camera = Self {
      position: Vec2::ZERO,
      zoom: 1.0,
      viewport: Vec2::ONE,
    };
    camera.resize(viewport.x, viewport.y);
    camera.recenter();
    camera
  }

  pub fn viewport(&self) -> Vec2 {
    self.viewport
  }

  pub fn aspect_ratio(&self) -> f32 {
    self.viewport.x / self.viewport.y
  }

  /// Size of the visible world region at the current zoom.
  pub fn visible_extent(&self) -> Vec2 {
    Vec2::new(HORIZONTAL_EXTENT, HORIZONTAL_EXTENT / self.aspect_ratio()) * self.zoom
  }

  /// Updates the viewport size. Pan and zoom are left alone; empty viewports
  /// (minimised windows) are ignored.
  pub fn resize(&mut self, width: f32, height: f32) {
    if width <= 0.0 || height <= 0.0 || !width.is_finite() || !height.is_finite() {
      return;
    }
    self.viewport = Vec2::new(width, height);
  }

  /// Moves the camera so a unit-sized image anchored at the origin fills the
  /// view horizontally.
  pub fn recenter(&mut self) {
    self.position = Vec2::new(0.5, 0.5 / self.aspect_ratio());
  }

  pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
    let ndc = Vec2::new(
      screen.x / self.viewport.x * 2.0 - 1.0,
      1.0 - screen.y / self.viewport.y * 2.0,
    );
    self.position + ndc * self.visible_extent() * 0.5
  }

  pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
    let ndc = (world - self.position) / (self.visible_extent() * 0.5);
    Vec2::new(
      (ndc.x + 1.0) * 0.5 * self.viewport.x,
      (1.0 - ndc.y) * 0.5 * self.viewport.y,
    )
  }

  /// [`Self::screen_to_world`] followed by grid snapping.
  pub fn aligned_screen_to_world(&self, screen: Vec2, grid: &GridSettings) -> Vec2 {
    snap_to_grid(self.screen_to_world(screen), grid)
  }

  /// Pans so the content follows a pointer drag of `delta` screen pixels.
  pub fn pan_by_screen_delta(&mut self, delta: Vec2) {
    let per_pixel = self.visible_extent() / self.viewport;
    self.position -= Vec2::new(delta.x * per_pixel.x, -delta.y * per_pixel.y);
  }

  /// Zoom as shown to the user.
  pub fn zoom_percent(&self) -> f32 {
    100.0 / self.zoom
  }

  /// Steps to the next larger zoom level, keeping the world point under
  /// `screen` in place. Returns false at the last level.
  pub fn zoom_in_at(&mut self, screen: Vec2) -> bool {
    let current = self.zoom_percent();
    match ZOOM_LEVELS.iter().find(|&&level| level > current + 0.01) {
      Some(&level) => {
        self.set_zoom_percent_at(level, screen);
        true
      }
      None => false,
    }
  }

  /// Steps to the next smaller zoom level. Returns false at the first level.
  pub fn zoom_out_at(&mut self, screen: Vec2) -> bool {
    let current = self.zoom_percent();
    match ZOOM_LEVELS.iter().rev().find(|&&level| level < current - 0.01) {
      Some(&level) => {
        self.set_zoom_percent_at(level, screen);
        true
      }
      None => false,
    }
  }

  fn set_zoom_percent_at(&mut self, percent: f32, screen: Vec2) {
    let anchor = self.screen_to_world(screen);
    self.zoom = 100.0 / percent;
    let moved = self.screen_to_world(screen);
    self.position += anchor - moved;
  }
}
