//! Per-frame orchestration.
//!
//! Order within one app update:
//!
//! 1. [`CanvasSet::Input`] (Update): the host's input handlers.
//! 2. [`CanvasSet::Apply`] (Update): resize, mode transitions, world resets.
//! 3. Rapier's [`PhysicsSet`] (PostUpdate): sync, step, writeback.
//! 4. [`CanvasSet::Sync`] (PostUpdate): projectile visuals follow their bodies.
//! 5. [`CanvasSet::Extract`] (PostUpdate): the [`CanvasFrame`] handed to the
//!    renderer is rebuilt.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_rapier2d::prelude::PhysicsSet;

use crate::collision_test::{ProjectileRegistry, ProjectileVisual, TestProjectile, ThrowPreview};
use crate::config::{Background, CanvasSettings};
use crate::coords::{CanvasCamera, WorldScale};
use crate::mode::{CreationCursor, EditMode, Emphasis, ModeController, ModeIndicators};
use crate::shape::SelectedShape;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanvasSet {
  Input,
  Apply,
  Sync,
  Extract,
}

pub(crate) fn configure_sets(app: &mut App) {
  app
    .configure_sets(Update, (CanvasSet::Input, CanvasSet::Apply).chain())
    .configure_sets(
      PostUpdate,
      (CanvasSet::Sync, CanvasSet::Extract)
        .chain()
        .after(PhysicsSet::Writeback),
    );
}

/// The window's drawable area changed size, in logical pixels.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct ViewportResized {
  pub width: f32,
  pub height: f32,
}

pub fn apply_viewport_resize(
  mut resized: MessageReader<ViewportResized>,
  mut camera: ResMut<CanvasCamera>,
) {
  if let Some(last) = resized.read().last() {
    camera.resize(last.width, last.height);
  }
}

/// Moves every projectile visual onto its body.
pub fn sync_projectile_visuals(
  scale: Res<WorldScale>,
  mut registry: ResMut<ProjectileRegistry>,
  bodies: Query<&Transform, With<TestProjectile>>,
) {
  let scale = *scale;
  for (entity, visual) in registry.pairs_mut() {
    let Ok(transform) = bodies.get(entity) else {
      continue;
    };
    let center = scale.to_world(transform.translation.truncate());
    let (_, _, angle) = transform.rotation.to_euler(EulerRot::XYZ);
    visual.follow(center, angle);
  }
}

/// Draw layers, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
  Background,
  ReferenceImage,
  ReferenceOutline,
  Projectiles,
  Overlay,
}

impl Layer {
  pub const ORDER: [Self; 5] = [
    Self::Background,
    Self::ReferenceImage,
    Self::ReferenceOutline,
    Self::Projectiles,
    Self::Overlay,
  ];

  /// Depth used by 2D renderers; later layers draw on top.
  pub fn z(self) -> f32 {
    match self {
      Self::Background => -10.0,
      Self::ReferenceImage => 0.0,
      Self::ReferenceOutline => 1.0,
      Self::Projectiles => 2.0,
      Self::Overlay => 10.0,
    }
  }
}

/// Translucent reference image anchored at the world origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageOverlay {
  pub path: String,
  pub alpha: f32,
}

/// Opacity of the reference image over the background.
pub const IMAGE_OVERLAY_ALPHA: f32 = 0.5;

/// World size of a reference image: its longer side spans one unit.
pub fn fit_unit_size(image_size: Vec2) -> Vec2 {
  if image_size.x <= 0.0 || image_size.y <= 0.0 {
    return Vec2::ONE;
  }
  let ratio = image_size.x / image_size.y;
  if ratio >= 1.0 {
    Vec2::new(1.0, 1.0 / ratio)
  } else {
    Vec2::new(ratio, 1.0)
  }
}

/// Screen-space overlay contents.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Hud {
  pub zoom_percent: f32,
  pub fps: Option<f64>,
  pub mode: EditMode,
  pub indicators: [Emphasis; 3],
}

/// Everything the renderer needs for one frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct CanvasFrame {
  pub background: Background,
  pub camera: CanvasCamera,
  /// Grid gap when snapping is on.
  pub grid_gap: Option<f32>,
  pub image_overlay: Option<ImageOverlay>,
  /// Polygons of the selected document, world units.
  pub outlines: Vec<Vec<Vec2>>,
  pub creation_cursor: Option<Vec2>,
  /// Origin and current end of the throw being aimed.
  pub throw_preview: Option<(Vec2, Vec2)>,
  pub projectiles: Vec<ProjectileVisual>,
  pub hud: Hud,
}

#[allow(clippy::too_many_arguments)]
pub fn extract_canvas_frame(
  settings: Res<CanvasSettings>,
  camera: Res<CanvasCamera>,
  selected: Res<SelectedShape>,
  registry: Res<ProjectileRegistry>,
  mode: Res<ModeController>,
  indicators: Res<ModeIndicators>,
  cursor: Res<CreationCursor>,
  throw: Res<ThrowPreview>,
  diagnostics: Option<Res<DiagnosticsStore>>,
  mut frame: ResMut<CanvasFrame>,
) {
  let document = selected.document();

  frame.background = settings.background;
  frame.camera = *camera;
  frame.grid_gap = (settings.grid.snap_enabled && settings.grid.gap > 0.0).then_some(settings.grid.gap);
  frame.image_overlay = document
    .filter(|_| settings.draw_image)
    .and_then(|doc| doc.image_path.clone())
    .map(|path| ImageOverlay {
      path,
      alpha: IMAGE_OVERLAY_ALPHA,
    });

  frame.outlines.clear();
  if settings.draw_shapes {
    if let Some(doc) = document {
      frame
        .outlines
        .extend(doc.polygons.iter().map(|p| p.vertices.clone()));
    }
  }

  frame.creation_cursor = cursor.next_point;
  frame.throw_preview = throw.segment();
  frame.projectiles.clear();
  frame.projectiles.extend(registry.visuals().iter().copied());

  frame.hud = Hud {
    zoom_percent: camera.zoom_percent(),
    fps: diagnostics
      .as_ref()
      .and_then(|store| store.get(&FrameTimeDiagnosticsPlugin::FPS))
      .and_then(|fps| fps.smoothed()),
    mode: mode.mode(),
    indicators: indicators.0,
  };
}
