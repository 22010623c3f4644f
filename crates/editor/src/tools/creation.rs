//! Creation mode: clicks append points to a new polygon of the selected
//! document; clicking the first point again closes it.

use bevy::prelude::*;
use body_canvas::{
  CanvasCamera, CanvasSettings, CreationCursor, ModeChanged, Polygon, RecreateWorldRequested,
  ShapeSelectionChanged,
};

use super::Pointer;
use crate::document::ShapeLibrary;

/// Screen distance from the first point within which a click closes the
/// polygon.
pub const CLOSE_RADIUS_PX: f32 = 10.0;

/// Points of the polygon being drawn, world units.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct PolygonDraft {
  pub points: Vec<Vec2>,
}

impl PolygonDraft {
  /// True when a click at `screen` should close the draft.
  pub fn closes_at(&self, screen: Vec2, camera: &CanvasCamera) -> bool {
    self.points.len() >= 3
      && camera.world_to_screen(self.points[0]).distance(screen) <= CLOSE_RADIUS_PX
  }
}

pub fn preview_next_point(
  pointer: Res<Pointer>,
  camera: Res<CanvasCamera>,
  settings: Res<CanvasSettings>,
  mut cursor: ResMut<CreationCursor>,
) {
  let next = pointer
    .screen
    .map(|screen| camera.aligned_screen_to_world(screen, &settings.grid));
  if cursor.next_point != next {
    cursor.next_point = next;
  }
}

pub fn add_points(
  buttons: Res<ButtonInput<MouseButton>>,
  pointer: Res<Pointer>,
  camera: Res<CanvasCamera>,
  settings: Res<CanvasSettings>,
  mut draft: ResMut<PolygonDraft>,
  mut library: ResMut<ShapeLibrary>,
  mut recreate: MessageWriter<RecreateWorldRequested>,
) {
  if !buttons.just_pressed(MouseButton::Left) {
    return;
  }
  let Some(screen) = pointer.screen else {
    return;
  };
  if library.selected().is_none() {
    debug!("No shape selected, ignoring click");
    return;
  }

  if draft.closes_at(screen, &camera) {
    let points = std::mem::take(&mut draft.points);
    if let Some(doc) = library.selected_mut() {
      info!("Added a {}-point polygon to '{}'", points.len(), doc.name);
      doc.polygons.push(Polygon::new(points));
    }
    recreate.write(RecreateWorldRequested);
    return;
  }

  draft
    .points
    .push(camera.aligned_screen_to_world(screen, &settings.grid));
}

/// A half-drawn polygon belongs to the mode and document it was started in.
pub fn drop_draft(
  mut mode_changes: MessageReader<ModeChanged>,
  mut selection_changes: MessageReader<ShapeSelectionChanged>,
  mut draft: ResMut<PolygonDraft>,
) {
  let changed = mode_changes.read().count() + selection_changes.read().count() > 0;
  if changed && !draft.points.is_empty() {
    draft.points.clear();
  }
}
