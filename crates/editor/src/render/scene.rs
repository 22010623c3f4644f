//! Background, grid and gizmo-drawn canvas content.

use bevy::prelude::*;
use body_canvas::{Background, CanvasCamera, CanvasFrame};

use crate::tools::creation::PolygonDraft;

const LIGHT_BACKGROUND: Color = Color::srgb(0.82, 0.82, 0.82);
const DARK_BACKGROUND: Color = Color::srgb(0.16, 0.16, 0.18);
const OUTLINE: Color = Color::srgb(0.1, 0.45, 0.9);
const DRAFT: Color = Color::srgb(0.9, 0.45, 0.1);
const THROW: Color = Color::srgb(0.85, 0.15, 0.15);
const BALL: Color = Color::srgb(0.15, 0.6, 0.2);

/// Grids denser than this many lines per axis are skipped.
const MAX_GRID_LINES: f32 = 400.0;

pub fn background_color(background: Background) -> Color {
  match background {
    Background::Light => LIGHT_BACKGROUND,
    Background::Dark => DARK_BACKGROUND,
  }
}

fn grid_color(background: Background) -> Color {
  match background {
    Background::Light => Color::srgba(0.0, 0.0, 0.0, 0.12),
    Background::Dark => Color::srgba(1.0, 1.0, 1.0, 0.12),
  }
}

/// World size of one screen pixel.
fn pixel_size(camera: &CanvasCamera) -> f32 {
  camera.visible_extent().x / camera.viewport().x
}

pub fn apply_background(frame: Res<CanvasFrame>, mut clear_color: ResMut<ClearColor>) {
  let color = background_color(frame.background);
  if clear_color.0 != color {
    clear_color.0 = color;
  }
}

/// Grid line positions along one axis covering `[min, max]`.
pub fn grid_lines(min: f32, max: f32, gap: f32) -> Vec<f32> {
  if gap <= 0.0 || (max - min) / gap > MAX_GRID_LINES {
    return Vec::new();
  }
  let first = (min / gap).ceil() as i64;
  let last = (max / gap).floor() as i64;
  (first..=last).map(|i| i as f32 * gap).collect()
}

pub fn draw_grid(frame: Res<CanvasFrame>, mut gizmos: Gizmos) {
  let Some(gap) = frame.grid_gap else {
    return;
  };
  let half = frame.camera.visible_extent() * 0.5;
  let min = frame.camera.position - half;
  let max = frame.camera.position + half;
  let color = grid_color(frame.background);

  for x in grid_lines(min.x, max.x, gap) {
    gizmos.line_2d(Vec2::new(x, min.y), Vec2::new(x, max.y), color);
  }
  for y in grid_lines(min.y, max.y, gap) {
    gizmos.line_2d(Vec2::new(min.x, y), Vec2::new(max.x, y), color);
  }
}

pub fn draw_outlines(frame: Res<CanvasFrame>, mut gizmos: Gizmos) {
  for outline in &frame.outlines {
    let Some(first) = outline.first() else {
      continue;
    };
    gizmos.linestrip_2d(outline.iter().copied().chain(std::iter::once(*first)), OUTLINE);
  }
}

pub fn draw_creation_preview(
  frame: Res<CanvasFrame>,
  draft: Res<PolygonDraft>,
  mut gizmos: Gizmos,
) {
  let marker = pixel_size(&frame.camera) * 4.0;
  gizmos.linestrip_2d(
    draft.points.iter().copied().chain(frame.creation_cursor),
    DRAFT,
  );
  for point in &draft.points {
    gizmos.circle_2d(*point, marker, DRAFT);
  }
  if let Some(cursor) = frame.creation_cursor {
    gizmos.circle_2d(cursor, marker, DRAFT.with_alpha(0.5));
  }
}

pub fn draw_throw_preview(frame: Res<CanvasFrame>, mut gizmos: Gizmos) {
  if let Some((origin, current)) = frame.throw_preview {
    gizmos.arrow_2d(origin, current, THROW);
  }
}

/// Balls as circles with a spoke showing their rotation.
pub fn draw_projectiles(frame: Res<CanvasFrame>, mut gizmos: Gizmos) {
  for ball in &frame.projectiles {
    let center = ball.center();
    let radius = ball.radius();
    gizmos.circle_2d(center, radius, BALL);
    let spoke = Vec2::from_angle(ball.rotation.to_radians()) * radius;
    gizmos.line_2d(center, center + spoke, BALL);
  }
}
