//! Edition mode: drag existing vertices of the selected document.

use bevy::prelude::*;
use body_canvas::{CanvasCamera, CanvasSettings, ModeChanged, RecreateWorldRequested, ShapeDocument};

use super::Pointer;
use crate::document::ShapeLibrary;

/// Screen distance within which a press grabs a vertex.
pub const PICK_RADIUS_PX: f32 = 10.0;

/// Vertex being dragged, as (polygon, vertex) indices.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct VertexGrab(pub Option<(usize, usize)>);

/// Closest vertex to `screen` within `radius` pixels.
pub fn nearest_vertex(
  document: &ShapeDocument,
  camera: &CanvasCamera,
  screen: Vec2,
  radius: f32,
) -> Option<(usize, usize)> {
  document
    .polygons
    .iter()
    .enumerate()
    .flat_map(|(p, polygon)| {
      polygon
        .vertices
        .iter()
        .enumerate()
        .map(move |(v, vertex)| ((p, v), *vertex))
    })
    .map(|(index, vertex)| (index, camera.world_to_screen(vertex).distance(screen)))
    .filter(|(_, distance)| *distance <= radius)
    .min_by(|a, b| a.1.total_cmp(&b.1))
    .map(|(index, _)| index)
}

pub fn drag_vertices(
  buttons: Res<ButtonInput<MouseButton>>,
  pointer: Res<Pointer>,
  camera: Res<CanvasCamera>,
  settings: Res<CanvasSettings>,
  mut grab: ResMut<VertexGrab>,
  mut library: ResMut<ShapeLibrary>,
  mut recreate: MessageWriter<RecreateWorldRequested>,
) {
  if buttons.just_pressed(MouseButton::Left) {
    grab.0 = pointer.screen.and_then(|screen| {
      library
        .selected()
        .and_then(|doc| nearest_vertex(doc, &camera, screen, PICK_RADIUS_PX))
    });
  }

  let Some((polygon, vertex)) = grab.0 else {
    return;
  };

  if buttons.pressed(MouseButton::Left) {
    if let Some(screen) = pointer.screen.filter(|_| pointer.delta() != Some(Vec2::ZERO)) {
      let target = camera.aligned_screen_to_world(screen, &settings.grid);
      if let Some(point) = library
        .selected_mut()
        .and_then(|doc| doc.polygons.get_mut(polygon))
        .and_then(|polygon| polygon.vertices.get_mut(vertex))
      {
        *point = target;
      }
    }
  }

  if buttons.just_released(MouseButton::Left) {
    grab.0 = None;
    recreate.write(RecreateWorldRequested);
  }
}

/// Finishes a drag cut short by a mode change.
pub fn release_on_mode_change(
  mut changes: MessageReader<ModeChanged>,
  mut grab: ResMut<VertexGrab>,
  mut recreate: MessageWriter<RecreateWorldRequested>,
) {
  if changes.read().count() > 0 && grab.0.take().is_some() {
    recreate.write(RecreateWorldRequested);
  }
}
