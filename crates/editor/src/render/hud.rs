use bevy::prelude::*;
use bevy_egui::{EguiContext, egui};
use body_canvas::{CanvasFrame, EditMode};

/// Frames waited before drawing, so egui is fully set up.
#[derive(Resource, Default)]
pub struct EguiReady(u32);

/// Zoom, FPS and the three mode indicators in the top-left corner.
pub fn draw_hud(
  mut egui_ctx: Query<&mut EguiContext>,
  frame: Res<CanvasFrame>,
  mut ready: ResMut<EguiReady>,
) {
  if ready.0 < 5 {
    ready.0 += 1;
    return;
  }

  let Ok(ctx) = egui_ctx.single_mut() else {
    return;
  };
  let ctx: &egui::Context = ctx.into_inner().get_mut();
  let hud = &frame.hud;

  egui::Area::new(egui::Id::new("canvas_hud"))
    .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
    .interactable(false)
    .show(ctx, |ui| {
      ui.label(format!("Zoom: {:.0} %", hud.zoom_percent));
      if let Some(fps) = hud.fps {
        ui.label(format!("FPS: {:.0}", fps));
      }
      ui.horizontal(|ui| {
        for mode in EditMode::ALL {
          let opacity = hud.indicators[mode.index()].opacity();
          let alpha = (64.0 + 191.0 * opacity) as u8;
          ui.label(egui::RichText::new(mode.label()).color(egui::Color32::from_white_alpha(alpha)));
        }
      });
    });
}
