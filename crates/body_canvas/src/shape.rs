//! Shape documents as seen by the canvas.
//!
//! The canvas never owns the document model. The application publishes the
//! currently selected document into [`SelectedShape`] and announces changes
//! with [`ShapeSelectionChanged`]; structural edits are announced with
//! [`RecreateWorldRequested`].

use bevy::prelude::*;

/// Ordered outline of one sub-shape, in document units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
  pub vertices: Vec<Vec2>,
}

impl Polygon {
  pub fn new(vertices: impl Into<Vec<Vec2>>) -> Self {
    Self {
      vertices: vertices.into(),
    }
  }

  /// Shoelace area. Positive for counter-clockwise winding.
  pub fn signed_area(&self) -> f32 {
    signed_area(&self.vertices)
  }
}

/// Shoelace area of a closed point loop. Positive for counter-clockwise
/// winding, zero for fewer than three points.
pub fn signed_area(points: &[Vec2]) -> f32 {
  if points.len() < 3 {
    return 0.0;
  }
  let mut twice_area = 0.0;
  for (i, a) in points.iter().enumerate() {
    let b = points[(i + 1) % points.len()];
    twice_area += a.x * b.y - b.x * a.y;
  }
  twice_area * 0.5
}

/// A rigid-body definition: its polygons plus an optional reference image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeDocument {
  pub name: String,
  /// Asset path of the image the shape was traced over.
  pub image_path: Option<String>,
  pub polygons: Vec<Polygon>,
}

impl ShapeDocument {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..default()
    }
  }

  pub fn with_polygon(mut self, vertices: impl Into<Vec<Vec2>>) -> Self {
    self.polygons.push(Polygon::new(vertices));
    self
  }

  pub fn with_image(mut self, path: impl Into<String>) -> Self {
    self.image_path = Some(path.into());
    self
  }
}

/// Read view of the document model's current selection.
#[derive(Resource, Debug, Default, Clone)]
pub struct SelectedShape(pub Option<ShapeDocument>);

impl SelectedShape {
  pub fn document(&self) -> Option<&ShapeDocument> {
    self.0.as_ref()
  }
}

/// The selected document was replaced (or cleared).
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ShapeSelectionChanged;

/// The selected document was structurally edited; rebuild the world without
/// touching the selection.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct RecreateWorldRequested;
