//! In-memory shape library.
//!
//! The editor's tools edit documents here; [`publish_selection`] mirrors the
//! selected one into the canvas' [`SelectedShape`].

use bevy::prelude::*;
use body_canvas::{SelectedShape, ShapeDocument, ShapeSelectionChanged};

use crate::input::{NextShape, PreviousShape, Shortcut, just_pressed};

#[derive(Resource, Debug, Clone, Default)]
pub struct ShapeLibrary {
  shapes: Vec<ShapeDocument>,
  selected: Option<usize>,
}

impl ShapeLibrary {
  /// Library with the first shape selected.
  pub fn new(shapes: Vec<ShapeDocument>) -> Self {
    let selected = (!shapes.is_empty()).then_some(0);
    Self { shapes, selected }
  }

  /// Starter shapes, traced in world units over a unit-sized image.
  pub fn builtin() -> Self {
    Self::new(vec![
      ShapeDocument::new("crate").with_image("shapes/crate.png").with_polygon(vec![
        Vec2::new(0.1, 0.1),
        Vec2::new(0.9, 0.1),
        Vec2::new(0.9, 0.9),
        Vec2::new(0.1, 0.9),
      ]),
      ShapeDocument::new("ramp")
        .with_polygon(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 0.4)]),
      ShapeDocument::new("cup")
        .with_polygon(vec![
          Vec2::new(0.1, 0.1),
          Vec2::new(0.9, 0.1),
          Vec2::new(0.9, 0.2),
          Vec2::new(0.1, 0.2),
        ])
        .with_polygon(vec![
          Vec2::new(0.1, 0.2),
          Vec2::new(0.2, 0.2),
          Vec2::new(0.2, 0.8),
          Vec2::new(0.1, 0.8),
        ])
        .with_polygon(vec![
          Vec2::new(0.8, 0.2),
          Vec2::new(0.9, 0.2),
          Vec2::new(0.9, 0.8),
          Vec2::new(0.8, 0.8),
        ]),
      ShapeDocument::new("blank"),
    ])
  }

  pub fn len(&self) -> usize {
    self.shapes.len()
  }

  pub fn selected_index(&self) -> Option<usize> {
    self.selected
  }

  pub fn selected(&self) -> Option<&ShapeDocument> {
    self.selected.and_then(|i| self.shapes.get(i))
  }

  pub fn selected_mut(&mut self) -> Option<&mut ShapeDocument> {
    self.selected.and_then(|i| self.shapes.get_mut(i))
  }

  /// Moves the selection by `step`, wrapping at both ends.
  pub fn select_step(&mut self, step: isize) {
    if self.shapes.is_empty() {
      self.selected = None;
      return;
    }
    let len = self.shapes.len() as isize;
    let current = self.selected.map_or(0, |i| i as isize);
    self.selected = Some((current + step).rem_euclid(len) as usize);
  }
}

pub fn select_previous_shape(
  mut shortcut: Shortcut<PreviousShape>,
  mut library: ResMut<ShapeLibrary>,
) {
  if just_pressed(&mut shortcut) {
    library.select_step(-1);
  }
}

pub fn select_next_shape(mut shortcut: Shortcut<NextShape>, mut library: ResMut<ShapeLibrary>) {
  if just_pressed(&mut shortcut) {
    library.select_step(1);
  }
}

/// Copies the selected document into the canvas whenever the library changes
/// and announces selection changes. Edits to the same document are published
/// silently; the tool that made them asks for a rebuild.
pub fn publish_selection(
  library: Res<ShapeLibrary>,
  mut selected: ResMut<SelectedShape>,
  mut changed: MessageWriter<ShapeSelectionChanged>,
  mut published: Local<Option<Option<usize>>>,
) {
  if !library.is_changed() {
    return;
  }
  selected.0 = library.selected().cloned();

  let index = library.selected_index();
  if *published != Some(index) {
    *published = Some(index);
    if let Some(doc) = library.selected() {
      info!("Selected shape '{}'", doc.name);
    }
    changed.write(ShapeSelectionChanged);
  }
}
