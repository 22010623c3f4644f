use bevy::{
  camera::ScalingMode,
  prelude::*,
  window::{PrimaryWindow, WindowResized},
};
use body_canvas::{CanvasFrame, HORIZONTAL_EXTENT, ViewportResized};

/// Marker for the camera that renders the canvas.
#[derive(Component)]
pub struct CanvasView;

pub fn setup_camera(mut commands: Commands) {
  commands.spawn((
    Name::new("Canvas camera"),
    CanvasView,
    Camera2d,
    Projection::Orthographic(OrthographicProjection {
      near: -1000.0,
      far: 1000.0,
      scale: 1.0,
      viewport_origin: Vec2::new(0.5, 0.5),
      scaling_mode: ScalingMode::FixedHorizontal {
        viewport_width: HORIZONTAL_EXTENT,
      },
      area: Rect::default(),
    }),
  ));
}

/// The canvas camera's position and zoom are owned by the canvas; the Bevy
/// camera just mirrors them.
pub fn follow_canvas_camera(
  frame: Res<CanvasFrame>,
  mut cameras: Query<(&mut Transform, &mut Projection), With<CanvasView>>,
) {
  if !frame.is_changed() {
    return;
  }
  for (mut transform, mut projection) in cameras.iter_mut() {
    transform.translation.x = frame.camera.position.x;
    transform.translation.y = frame.camera.position.y;
    if let Projection::Orthographic(ref mut ortho) = *projection {
      if ortho.scale != frame.camera.zoom {
        ortho.scale = frame.camera.zoom;
      }
    }
  }
}

pub fn announce_initial_viewport(
  windows: Query<&Window, With<PrimaryWindow>>,
  mut viewport: MessageWriter<ViewportResized>,
) {
  if let Ok(window) = windows.single() {
    viewport.write(ViewportResized {
      width: window.width(),
      height: window.height(),
    });
  }
}

pub fn forward_window_resize(
  mut resized: MessageReader<WindowResized>,
  primary: Query<Entity, With<PrimaryWindow>>,
  mut viewport: MessageWriter<ViewportResized>,
) {
  let Ok(primary) = primary.single() else {
    resized.clear();
    return;
  };
  if let Some(last) = resized.read().filter(|e| e.window == primary).last() {
    viewport.write(ViewportResized {
      width: last.width,
      height: last.height,
    });
  }
}
