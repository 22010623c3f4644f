//! E2E tests for the per-frame pipeline: physics step, visual sync and the
//! extracted [`CanvasFrame`].
//!
//! Run: cargo test -p body_canvas --test frame_sync_e2e

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier2d::prelude::{RapierConfiguration, RapierContextSimulation};
use body_canvas::{
  AdvanceMode, Background, BodyCanvasPlugin, CanvasCamera, CanvasFrame, CanvasSettings, EditMode,
  Emphasis, FireProjectile, ProjectileRegistry, SelectedShape, ShapeDocument,
  ShapeSelectionChanged, ViewportResized,
};

const PIXELS_PER_METER: f32 = 300.0;

struct TestHarness {
  app: App,
}

impl TestHarness {
  fn new() -> Self {
    Self::with_settings(CanvasSettings::default())
  }

  fn with_settings(mut settings: CanvasSettings) -> Self {
    settings.pixels_per_meter = PIXELS_PER_METER;
    settings.projectiles.seed = Some(3);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(bevy::transform::TransformPlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
      1.0 / 60.0,
    )));
    app.add_plugins(BodyCanvasPlugin::new(settings));
    app.update();

    Self { app }
  }

  fn run(&mut self, frames: usize) {
    for _ in 0..frames {
      self.app.update();
    }
  }

  fn fire(&mut self, origin: Vec2, force: Vec2) {
    self
      .app
      .world_mut()
      .commands()
      .queue(FireProjectile { origin, force });
    self.app.update();
  }

  fn frame(&self) -> &CanvasFrame {
    self.app.world().resource::<CanvasFrame>()
  }

  fn registry(&self) -> &ProjectileRegistry {
    self.app.world().resource::<ProjectileRegistry>()
  }
}

fn pentagon_with_image() -> ShapeDocument {
  ShapeDocument::new("pentagon")
    .with_image("shapes/pentagon.png")
    .with_polygon(vec![
      Vec2::new(0.0, 0.0),
      Vec2::new(0.4, 0.0),
      Vec2::new(0.5, 0.3),
      Vec2::new(0.2, 0.5),
      Vec2::new(-0.1, 0.3),
    ])
}

#[test]
fn fired_ball_moves_and_its_visual_follows() {
  let mut harness = TestHarness::new();
  let origin = Vec2::new(0.5, 0.5);
  harness.fire(origin, Vec2::new(0.6, 0.0));

  let start = harness.registry().visuals()[0].center();
  harness.run(30);

  let body = harness.registry().bodies()[0];
  let transform = *harness.app.world().get::<Transform>(body).unwrap();
  let visual = harness.registry().visuals()[0];

  let expected_center = transform.translation.truncate() * PIXELS_PER_METER;
  assert!(
    visual.center().abs_diff_eq(expected_center, 1e-4),
    "visual {:?} should sit on body {:?}",
    visual.center(),
    expected_center
  );
  assert!(visual.center().x > start.x, "ball travels along +x");
  assert!((visual.center().y - origin.y).abs() < 1e-3, "no gravity pulls it down");

  let (_, _, angle) = transform.rotation.to_euler(EulerRot::XYZ);
  assert!((visual.rotation - angle.to_degrees()).abs() < 1e-3);
}

#[test]
fn damping_slows_a_free_ball() {
  let mut harness = TestHarness::new();
  harness.fire(Vec2::ZERO, Vec2::new(0.0, 0.9));

  let position = |h: &TestHarness| h.registry().visuals()[0].center().y;
  let p0 = position(&harness);
  harness.run(10);
  let p1 = position(&harness);
  harness.run(10);
  let p2 = position(&harness);

  assert!(p1 > p0 && p2 > p1);
  assert!(p2 - p1 < p1 - p0, "later frames cover less ground");
}

#[test]
fn frame_mirrors_registry_and_document() {
  let mut harness = TestHarness::new();
  harness
    .app
    .world_mut()
    .insert_resource(SelectedShape(Some(pentagon_with_image())));
  harness.app.world_mut().write_message(ShapeSelectionChanged);
  harness.app.update();

  for _ in 0..3 {
    harness.fire(Vec2::new(1.0, 0.2), Vec2::new(-0.5, 0.0));
  }
  harness.run(5);

  let frame = harness.frame();
  assert!(frame.projectiles.iter().eq(harness.registry().visuals()));
  assert_eq!(frame.outlines.len(), 1);
  assert_eq!(frame.outlines[0].len(), 5);

  let overlay = frame.image_overlay.as_ref().expect("document has an image");
  assert_eq!(overlay.path, "shapes/pentagon.png");
  assert_eq!(overlay.alpha, 0.5);

  assert_eq!(frame.background, Background::Light);
  assert_eq!(frame.grid_gap, None);
}

#[test]
fn draw_toggles_hide_image_and_outlines() {
  let mut harness = TestHarness::with_settings(CanvasSettings {
    draw_image: false,
    draw_shapes: false,
    ..default()
  });
  harness
    .app
    .world_mut()
    .insert_resource(SelectedShape(Some(pentagon_with_image())));
  harness.app.world_mut().write_message(ShapeSelectionChanged);
  harness.app.update();

  let frame = harness.frame();
  assert!(frame.image_overlay.is_none());
  assert!(frame.outlines.is_empty());
}

#[test]
fn hud_shows_one_active_indicator_per_mode() {
  let mut harness = TestHarness::new();
  let expected = [EditMode::Creation, EditMode::Edition, EditMode::Test];

  for (step, mode) in expected.iter().enumerate() {
    if step > 0 {
      harness.app.world_mut().write_message(AdvanceMode);
      harness.app.update();
    }
    let hud = &harness.frame().hud;
    assert_eq!(hud.mode, *mode);
    assert_eq!(
      hud.indicators.iter().filter(|e| **e == Emphasis::Active).count(),
      1
    );
    assert_eq!(hud.indicators[mode.index()], Emphasis::Active);
    assert_eq!(hud.zoom_percent.round(), 100.0);
  }
}

#[test]
fn viewport_resize_reaches_camera_and_frame() {
  let mut harness = TestHarness::new();
  harness.app.world_mut().write_message(ViewportResized {
    width: 800.0,
    height: 400.0,
  });
  harness.app.update();

  let camera = harness.app.world().resource::<CanvasCamera>();
  assert_eq!(camera.viewport(), Vec2::new(800.0, 400.0));
  assert_eq!(camera.visible_extent(), Vec2::new(2.0, 1.0));
  assert_eq!(harness.frame().camera, *camera);
}

#[test]
fn snapping_exposes_grid_gap() {
  let mut settings = CanvasSettings::default();
  settings.grid.snap_enabled = true;
  settings.grid.gap = 0.25;
  let harness = TestHarness::with_settings(settings);
  assert_eq!(harness.frame().grid_gap, Some(0.25));
}

#[test]
fn physics_runs_without_gravity_and_with_configured_iterations() {
  let mut settings = CanvasSettings::default();
  settings.physics.position_iterations = 4;
  let mut harness = TestHarness::with_settings(settings);
  harness.run(2);

  let mut q = harness
    .app
    .world_mut()
    .query::<(&RapierConfiguration, &RapierContextSimulation)>();
  let contexts: Vec<_> = q.iter(harness.app.world()).collect();
  assert!(!contexts.is_empty(), "a physics context exists");
  for (config, simulation) in contexts {
    assert_eq!(config.gravity, Vec2::ZERO);
    let parameters = &simulation.integration_parameters;
    assert_eq!(parameters.num_solver_iterations, 10);
    assert_eq!(parameters.num_internal_stabilization_iterations, 4);
  }
}

#[test]
fn settings_changed_at_runtime_reach_physics() {
  let mut harness = TestHarness::new();
  harness.run(3);

  {
    let mut settings = harness.app.world_mut().resource_mut::<CanvasSettings>();
    settings.physics.velocity_iterations = 6;
    settings.physics.position_iterations = 2;
  }
  harness.run(1);

  let mut q = harness
    .app
    .world_mut()
    .query::<&RapierContextSimulation>();
  let simulation = q.single(harness.app.world()).unwrap();
  assert_eq!(simulation.integration_parameters.num_solver_iterations, 6);
  assert_eq!(
    simulation
      .integration_parameters
      .num_internal_stabilization_iterations,
    2
  );
}
