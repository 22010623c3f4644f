//! Draws the canvas from the extracted [`body_canvas::CanvasFrame`].
//!
//! Everything here runs after [`CanvasSet::Extract`] and only reads the frame,
//! except the viewport forwarding, which feeds window sizes back into the
//! canvas.

mod camera;
mod hud;
mod overlay;
mod scene;

use bevy::prelude::*;
use bevy::transform::TransformSystems;
use body_canvas::CanvasSet;

pub struct CanvasRenderPlugin;

impl Plugin for CanvasRenderPlugin {
  fn build(&self, app: &mut App) {
    if !app.is_plugin_added::<bevy_egui::EguiPlugin>() {
      app.add_plugins(bevy_egui::EguiPlugin::default());
    }

    app
      .init_resource::<hud::EguiReady>()
      .add_systems(
        Startup,
        (
          camera::setup_camera,
          camera::announce_initial_viewport,
          overlay::spawn_reference_image,
        ),
      )
      .add_systems(Update, camera::forward_window_resize.before(CanvasSet::Apply))
      .add_systems(
        PostUpdate,
        (
          camera::follow_canvas_camera,
          scene::apply_background,
          overlay::update_reference_image,
        )
          .after(CanvasSet::Extract)
          .before(TransformSystems::Propagate),
      )
      .add_systems(
        PostUpdate,
        (
          scene::draw_grid,
          scene::draw_outlines,
          scene::draw_creation_preview,
          scene::draw_throw_preview,
          scene::draw_projectiles,
        )
          .after(CanvasSet::Extract),
      )
      .add_systems(Update, hud::draw_hud.after(CanvasSet::Apply));
  }
}
