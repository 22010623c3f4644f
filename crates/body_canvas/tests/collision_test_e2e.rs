//! E2E tests for firing test projectiles.
//!
//! Run: cargo test -p body_canvas --test collision_test_e2e

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy_rapier2d::prelude::{Collider, ColliderMassProperties, Damping, RigidBody, Velocity};
use body_canvas::{
  AdvanceMode, BodyCanvasPlugin, CanvasSettings, ClearProjectiles, EditMode, FireProjectile,
  ModeController, ModeError, ProjectileRegistry, SelectedShape, ShapeDocument,
  ShapeSelectionChanged, SimulationBody, TestProjectile, fire_in_test_mode,
};

const PIXELS_PER_METER: f32 = 300.0;

struct TestHarness {
  app: App,
}

impl TestHarness {
  fn new(configure: impl FnOnce(&mut CanvasSettings)) -> Self {
    let mut settings = CanvasSettings {
      pixels_per_meter: PIXELS_PER_METER,
      ..default()
    };
    settings.projectiles.seed = Some(7);
    configure(&mut settings);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(bevy::transform::TransformPlugin);
    app.add_plugins(BodyCanvasPlugin::new(settings));
    app.update();

    Self { app }
  }

  fn select_square(&mut self) {
    let square = ShapeDocument::new("square").with_polygon(vec![
      Vec2::new(0.0, 0.0),
      Vec2::new(300.0, 0.0),
      Vec2::new(300.0, 300.0),
      Vec2::new(0.0, 300.0),
    ]);
    self.app.world_mut().insert_resource(SelectedShape(Some(square)));
    self.app.world_mut().write_message(ShapeSelectionChanged);
    self.app.update();
  }

  fn fire(&mut self, origin: Vec2, force: Vec2) {
    self
      .app
      .world_mut()
      .commands()
      .queue(FireProjectile { origin, force });
    self.app.update();
  }

  fn advance_mode(&mut self) {
    self.app.world_mut().write_message(AdvanceMode);
    self.app.update();
  }

  fn projectiles(&mut self) -> Vec<Entity> {
    let mut q = self
      .app
      .world_mut()
      .query_filtered::<Entity, With<TestProjectile>>();
    q.iter(self.app.world()).collect()
  }

  fn registry(&self) -> &ProjectileRegistry {
    self.app.world().resource::<ProjectileRegistry>()
  }
}

#[test]
fn each_fire_adds_one_body_and_one_visual() {
  let mut harness = TestHarness::new(|_| {});

  for n in 1..=6 {
    harness.fire(Vec2::new(0.5, 0.5), Vec2::new(1.0, 0.0));
    assert_eq!(harness.projectiles().len(), n);
    assert_eq!(harness.registry().len(), n);
    assert_eq!(harness.registry().visuals().len(), n);
  }
}

#[test]
fn radii_stay_within_configured_range() {
  let mut harness = TestHarness::new(|_| {});
  for _ in 0..20 {
    harness.fire(Vec2::ZERO, Vec2::Y);
  }

  for visual in harness.registry().visuals() {
    let radius = visual.radius();
    assert!(
      (0.02..=0.04).contains(&radius),
      "visual radius {} out of range",
      radius
    );
  }

  let bodies: Vec<Entity> = harness.registry().bodies().iter().copied().collect();
  for (body, visual) in bodies.iter().zip(harness.registry().visuals()) {
    let collider = harness.app.world().get::<Collider>(*body).unwrap();
    let ball = collider.as_ball().expect("projectiles are discs");
    let expected = visual.radius() / PIXELS_PER_METER;
    assert!(
      (ball.radius() - expected).abs() < 1e-7,
      "body radius {} should be visual radius scaled to {}",
      ball.radius(),
      expected
    );
  }
}

#[test]
fn projectile_body_matches_launch_parameters() {
  let mut harness = TestHarness::new(|_| {});
  let origin = Vec2::new(0.6, 0.3);
  harness.fire(origin, Vec2::new(-0.9, 0.0));

  let body = harness.registry().bodies()[0];
  let world = harness.app.world();

  assert_eq!(world.get::<SimulationBody>(body), Some(&SimulationBody::Projectile));
  assert!(matches!(world.get::<RigidBody>(body), Some(RigidBody::Dynamic)));
  assert!(matches!(
    world.get::<ColliderMassProperties>(body),
    Some(ColliderMassProperties::Density(d)) if (*d - 1.0).abs() < f32::EPSILON
  ));

  let damping = world.get::<Damping>(body).unwrap();
  assert_eq!(damping.linear_damping, 0.5);
  assert_eq!(damping.angular_damping, 0.5);

  let spawn = origin / PIXELS_PER_METER;
  let transform = world.get::<Transform>(body).unwrap();
  // One frame of motion at most; the ball starts on the origin.
  assert!((transform.translation.y - spawn.y).abs() < 1e-3);

  let velocity = world.get::<Velocity>(body).unwrap();
  assert!(velocity.linvel.x < 0.0, "ball flies along the throw vector");
}

#[test]
fn clear_removes_only_projectiles() {
  let mut harness = TestHarness::new(|_| {});
  harness.select_square();
  for _ in 0..3 {
    harness.fire(Vec2::new(2.0, 2.0), Vec2::ZERO);
  }

  harness.app.world_mut().commands().queue(ClearProjectiles);
  harness.app.update();

  assert!(harness.projectiles().is_empty());
  assert!(harness.registry().is_empty());

  let mut q = harness.app.world_mut().query::<&SimulationBody>();
  let remaining: Vec<SimulationBody> = q.iter(harness.app.world()).copied().collect();
  assert_eq!(remaining, vec![SimulationBody::Reference]);
}

#[test]
fn cap_retires_oldest_projectiles() {
  let mut harness = TestHarness::new(|settings| {
    settings.projectiles.max_projectiles = Some(3);
  });

  let mut fired = Vec::new();
  for _ in 0..5 {
    harness.fire(Vec2::ZERO, Vec2::X);
    fired.push(*harness.registry().bodies().back().unwrap());
  }

  assert_eq!(harness.registry().len(), 3);
  assert_eq!(*harness.registry().bodies(), fired[2..].to_vec());
  assert_eq!(harness.projectiles().len(), 3);
  for retired in &fired[..2] {
    assert!(harness.app.world().get_entity(*retired).is_err());
  }
}

#[test]
fn unbounded_by_default() {
  let mut harness = TestHarness::new(|_| {});
  for _ in 0..50 {
    harness
      .app
      .world_mut()
      .commands()
      .queue(FireProjectile {
        origin: Vec2::ZERO,
        force: Vec2::ZERO,
      });
  }
  harness.app.update();
  assert_eq!(harness.registry().len(), 50);
}

#[test]
fn mode_gated_fire_rejects_outside_test_mode() {
  let mut harness = TestHarness::new(|_| {});

  let attempt = |app: &mut App| {
    app
      .world_mut()
      .run_system_once(|mut commands: Commands, mode: Res<ModeController>| {
        fire_in_test_mode(&mut commands, &mode, Vec2::ZERO, Vec2::X)
      })
      .expect("system should run")
  };

  let rejected = attempt(&mut harness.app);
  assert_eq!(
    rejected,
    Err(ModeError::WrongMode {
      expected: EditMode::Test,
      actual: EditMode::Creation,
    })
  );
  harness.app.update();
  assert!(harness.projectiles().is_empty());

  harness.advance_mode();
  harness.advance_mode();
  assert_eq!(
    harness.app.world().resource::<ModeController>().mode(),
    EditMode::Test
  );

  assert_eq!(attempt(&mut harness.app), Ok(()));
  harness.app.update();
  assert_eq!(harness.projectiles().len(), 1);
}

#[test]
fn seeded_firing_is_reproducible() {
  let radii = || {
    let mut harness = TestHarness::new(|_| {});
    for _ in 0..5 {
      harness.fire(Vec2::ZERO, Vec2::ZERO);
    }
    harness
      .registry()
      .visuals()
      .iter()
      .map(|v| v.radius())
      .collect::<Vec<_>>()
  };
  assert_eq!(radii(), radii());
}
