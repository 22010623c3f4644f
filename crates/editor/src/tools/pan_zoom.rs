use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use body_canvas::CanvasCamera;

use super::Pointer;

pub fn pan_view(
  buttons: Res<ButtonInput<MouseButton>>,
  pointer: Res<Pointer>,
  mut camera: ResMut<CanvasCamera>,
) {
  if !buttons.any_pressed([MouseButton::Right, MouseButton::Middle]) {
    return;
  }
  if let Some(delta) = pointer.delta().filter(|d| *d != Vec2::ZERO) {
    camera.pan_by_screen_delta(delta);
  }
}

/// One zoom level per wheel notch, anchored at the cursor.
pub fn zoom_view(
  mut wheel: MessageReader<MouseWheel>,
  pointer: Res<Pointer>,
  mut camera: ResMut<CanvasCamera>,
) {
  let notches: f32 = wheel.read().map(|event| event.y).sum();
  let Some(screen) = pointer.screen else {
    return;
  };
  if notches > 0.0 {
    if camera.zoom_in_at(screen) {
      debug!("Zoom: {:.0} %", camera.zoom_percent());
    }
  } else if notches < 0.0 && camera.zoom_out_at(screen) {
    debug!("Zoom: {:.0} %", camera.zoom_percent());
  }
}
