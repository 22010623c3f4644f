//! Pointer tools: pan/zoom in every mode, plus one tool per edit mode.

pub mod creation;
pub mod edition;
pub mod pan_zoom;

use bevy::{prelude::*, window::PrimaryWindow};
use bevy_console::ConsoleOpen;
use body_canvas::{CanvasSet, EditMode, in_mode};

pub struct ToolsPlugin;

impl Plugin for ToolsPlugin {
  fn build(&self, app: &mut App) {
    app
      .init_resource::<Pointer>()
      .init_resource::<creation::PolygonDraft>()
      .init_resource::<edition::VertexGrab>()
      .add_systems(
        Update,
        (
          track_pointer,
          (
            creation::drop_draft,
            edition::release_on_mode_change,
            collision_test::cancel_throw_on_mode_change,
          ),
          (pan_zoom::pan_view, pan_zoom::zoom_view).run_if(console_closed),
          (creation::preview_next_point, creation::add_points)
            .chain()
            .run_if(in_mode(EditMode::Creation).and(console_closed)),
          edition::drag_vertices.run_if(in_mode(EditMode::Edition).and(console_closed)),
          collision_test::aim_and_fire.run_if(in_mode(EditMode::Test).and(console_closed)),
        )
          .chain()
          .in_set(CanvasSet::Input),
      );
  }
}

/// Cursor position in screen pixels, this frame and the previous one.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct Pointer {
  pub screen: Option<Vec2>,
  pub previous: Option<Vec2>,
}

impl Pointer {
  /// Movement since the last frame, when the cursor was inside both times.
  pub fn delta(&self) -> Option<Vec2> {
    Some(self.screen? - self.previous?)
  }
}

fn track_pointer(windows: Query<&Window, With<PrimaryWindow>>, mut pointer: ResMut<Pointer>) {
  pointer.previous = pointer.screen;
  pointer.screen = windows.single().ok().and_then(Window::cursor_position);
}

/// Run condition: the developer console does not own the keyboard.
pub fn console_closed(console: Option<Res<ConsoleOpen>>) -> bool {
  console.is_none_or(|console| !console.open)
}
