//! The canvas' physics world.
//!
//! Rapier owns the simulation; this module configures it for an editor preview
//! (no gravity, fixed solver iterations, elapsed-time steps) and owns the
//! world's lifetime: every selection change or recreate request tears down all
//! canvas bodies and rebuilds the reference body.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::body_builder::{SimulationBody, SpawnReferenceBody};
use crate::collision_test::ProjectileRegistry;
use crate::config::CanvasSettings;
use crate::coords::{CanvasCamera, WorldScale};
use crate::shape::{RecreateWorldRequested, ShapeSelectionChanged};

pub struct CanvasPhysicsPlugin;

impl Plugin for CanvasPhysicsPlugin {
  fn build(&self, app: &mut App) {
    // Transforms are in simulation meters; shapes are about one world unit.
    if !app.is_plugin_added::<RapierPhysicsPlugin<NoUserData>>() {
      let scale = app
        .world()
        .get_resource::<WorldScale>()
        .copied()
        .unwrap_or_default();
      app.add_plugins(
        RapierPhysicsPlugin::<NoUserData>::default()
          .with_length_unit(scale.length_to_simulation(1.0)),
      );
    }

    app.add_systems(PostUpdate, apply_physics_settings.before(PhysicsSet::SyncBackend));
  }
}

/// Timestep for a frame-driven preview: one step per frame using the elapsed
/// time, capped at `max_step`.
pub fn timestep_for(settings: &CanvasSettings) -> TimestepMode {
  TimestepMode::Variable {
    max_dt: settings.physics.max_step,
    time_scale: 1.0,
    substeps: 1,
  }
}

/// Pushes gravity, solver iterations and the timestep into Rapier whenever the
/// settings change or a new context appears.
///
/// Rapier has no separate position pass; `position_iterations` drives its
/// internal stabilization iterations instead.
pub fn apply_physics_settings(
  settings: Res<CanvasSettings>,
  timestep: Option<ResMut<TimestepMode>>,
  mut contexts: Query<(&mut RapierConfiguration, &mut RapierContextSimulation)>,
) {
  let changed = settings.is_changed();
  let mut added = false;

  for (mut config, mut simulation) in contexts.iter_mut() {
    if !changed && !config.is_added() {
      continue;
    }
    added |= config.is_added();
    config.gravity = Vec2::ZERO;
    let parameters = &mut simulation.integration_parameters;
    parameters.num_solver_iterations = settings.physics.velocity_iterations.max(1);
    parameters.num_internal_stabilization_iterations =
      settings.physics.position_iterations.max(1);
  }

  if changed || added {
    if let Some(mut timestep) = timestep {
      *timestep = timestep_for(&settings);
    }
  }
}

/// Destroys every canvas body and clears the projectile registry, then
/// rebuilds the reference body if a document is selected.
pub struct ResetWorld;

impl Command for ResetWorld {
  fn apply(self, world: &mut World) {
    let bodies: Vec<Entity> = world
      .query_filtered::<Entity, With<SimulationBody>>()
      .iter(world)
      .collect();
    let destroyed = bodies.len();
    for entity in bodies {
      world.despawn(entity);
    }

    if let Some(mut registry) = world.get_resource_mut::<ProjectileRegistry>() {
      registry.clear();
    }

    info!("World reset: {} bodies destroyed", destroyed);
    SpawnReferenceBody.apply(world);
  }
}

/// A new selection recentres the camera and rebuilds the world.
pub fn reset_on_selection_change(
  mut changes: MessageReader<ShapeSelectionChanged>,
  mut camera: ResMut<CanvasCamera>,
  mut commands: Commands,
) {
  if changes.read().count() == 0 {
    return;
  }
  camera.recenter();
  commands.queue(ResetWorld);
}

pub fn reset_on_recreate_request(
  mut requests: MessageReader<RecreateWorldRequested>,
  mut commands: Commands,
) {
  if requests.read().count() == 0 {
    return;
  }
  commands.queue(ResetWorld);
}
