//! Body Canvas - editing and physics-preview viewport for 2D rigid-body
//! shapes.
//!
//! The canvas maps screen input into world space, tracks the current edit
//! mode, turns the selected shape document into a static Rapier body, and
//! fires test balls at it. Rendering, windowing and the document model live
//! in the host application.

use bevy::prelude::*;

pub mod body_builder;
pub mod config;
pub mod coords;
pub mod frame;
pub mod mode;
pub mod physics;
pub mod shape;

pub use body_builder::{
  FIXTURE_DENSITY, FIXTURE_FRICTION, FIXTURE_RESTITUTION, FixturePlan, MIN_POLYGON_AREA,
  ReferenceFixture, SimulationBody, SpawnReferenceBody, plan_fixtures,
};
pub use collision_test::{
  CanvasRng, ClearProjectiles, FireProjectile, ProjectileRegistry, ProjectileVisual,
  TestProjectile, ThrowPreview, fire_in_test_mode,
};
pub use config::{Background, CanvasSettings, GridSettings, PhysicsSettings, ProjectileSettings};
pub use coords::{CanvasCamera, HORIZONTAL_EXTENT, WorldScale, snap_to_grid};
pub use frame::{CanvasFrame, CanvasSet, Hud, ImageOverlay, Layer, ViewportResized, fit_unit_size};
pub use mode::{
  AdvanceMode, CreationCursor, EditMode, Emphasis, ModeChanged, ModeController, ModeError,
  ModeIndicators, in_mode,
};
pub use physics::{CanvasPhysicsPlugin, ResetWorld};
pub use shape::{Polygon, RecreateWorldRequested, SelectedShape, ShapeDocument, ShapeSelectionChanged};

/// Adds the whole canvas: resources, messages, physics and per-frame systems.
///
/// The world scale is taken from `settings.pixels_per_meter` here and stays
/// fixed for the lifetime of the app.
#[derive(Default)]
pub struct BodyCanvasPlugin {
  pub settings: CanvasSettings,
}

impl BodyCanvasPlugin {
  pub fn new(settings: CanvasSettings) -> Self {
    Self { settings }
  }
}

impl Plugin for BodyCanvasPlugin {
  fn build(&self, app: &mut App) {
    app
      .insert_resource(WorldScale::new(self.settings.pixels_per_meter))
      .insert_resource(self.settings.clone())
      .insert_resource(CanvasRng::new(self.settings.projectiles.seed))
      .init_resource::<CanvasCamera>()
      .init_resource::<ModeController>()
      .init_resource::<ModeIndicators>()
      .init_resource::<CreationCursor>()
      .init_resource::<SelectedShape>()
      .init_resource::<ProjectileRegistry>()
      .init_resource::<ThrowPreview>()
      .init_resource::<CanvasFrame>()
      .add_message::<AdvanceMode>()
      .add_message::<ModeChanged>()
      .add_message::<ShapeSelectionChanged>()
      .add_message::<RecreateWorldRequested>()
      .add_message::<ViewportResized>()
      .add_plugins(CanvasPhysicsPlugin);

    frame::configure_sets(app);

    app
      .add_systems(
        Update,
        (
          frame::apply_viewport_resize,
          mode::apply_mode_transitions,
          physics::reset_on_selection_change,
          physics::reset_on_recreate_request,
        )
          .chain()
          .in_set(CanvasSet::Apply),
      )
      .add_systems(
        PostUpdate,
        frame::sync_projectile_visuals.in_set(CanvasSet::Sync),
      )
      .add_systems(
        PostUpdate,
        frame::extract_canvas_frame.in_set(CanvasSet::Extract),
      );
  }
}
