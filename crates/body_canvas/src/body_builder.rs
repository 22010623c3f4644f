//! Builds the static reference body from the selected shape document.
//!
//! One fixed rigid body sits at the world origin; every polygon that survives
//! the area filter becomes one child collider ("fixture"). Polygons that are
//! too small or degenerate are skipped without error, so a body may end up
//! with no fixtures at all.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::coords::WorldScale;
use crate::shape::{SelectedShape, ShapeDocument, signed_area};

/// Smallest absolute polygon area kept, in simulation units squared.
pub const MIN_POLYGON_AREA: f32 = 0.01;

pub const FIXTURE_DENSITY: f32 = 1.0;
pub const FIXTURE_FRICTION: f32 = 0.8;
pub const FIXTURE_RESTITUTION: f32 = 0.2;

/// Every body the canvas owns in the physics world.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationBody {
  /// Static body built from the selected document.
  Reference,
  /// Dynamic test ball.
  Projectile,
}

/// Collider child of the reference body.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceFixture {
  /// Index of the source polygon in the document.
  pub polygon: usize,
}

/// A polygon that passed the filter, converted to simulation units.
#[derive(Debug, Clone, PartialEq)]
pub struct FixturePlan {
  pub polygon: usize,
  pub vertices: Vec<Vec2>,
  pub area: f32,
}

/// Scales every polygon into simulation units and keeps the ones whose
/// absolute area reaches [`MIN_POLYGON_AREA`]. The document is not modified.
pub fn plan_fixtures(document: &ShapeDocument, scale: WorldScale) -> Vec<FixturePlan> {
  document
    .polygons
    .iter()
    .enumerate()
    .filter_map(|(index, polygon)| {
      let vertices: Vec<Vec2> = polygon
        .vertices
        .iter()
        .map(|v| scale.to_simulation(*v))
        .collect();
      let area = signed_area(&vertices);
      (area.abs() >= MIN_POLYGON_AREA).then_some(FixturePlan {
        polygon: index,
        vertices,
        area,
      })
    })
    .collect()
}

fn fixture_bundle(plan: &FixturePlan) -> Option<impl Bundle> {
  // Same convex-hull semantics as a box2d polygon shape.
  let collider = Collider::convex_hull(&plan.vertices)?;
  Some((
    ReferenceFixture {
      polygon: plan.polygon,
    },
    collider,
    ColliderMassProperties::Density(FIXTURE_DENSITY),
    Friction::coefficient(FIXTURE_FRICTION),
    Restitution::coefficient(FIXTURE_RESTITUTION),
    Transform::default(),
  ))
}

/// Spawns the reference body for `document`, returning its entity.
pub fn spawn_reference_body(world: &mut World, document: &ShapeDocument) -> Entity {
  let scale = world
    .get_resource::<WorldScale>()
    .copied()
    .unwrap_or_default();
  let plans = plan_fixtures(document, scale);

  let mut body = world.spawn((
    Name::new(format!("Reference body: {}", document.name)),
    SimulationBody::Reference,
    RigidBody::Fixed,
    Transform::default(),
  ));

  let mut fixtures = 0;
  body.with_children(|parent| {
    for plan in &plans {
      if let Some(bundle) = fixture_bundle(plan) {
        parent.spawn(bundle);
        fixtures += 1;
      }
    }
  });

  debug!(
    "Built reference body '{}': {} fixtures, {} polygons rejected",
    document.name,
    fixtures,
    document.polygons.len() - fixtures
  );
  body.id()
}

/// Replaces the reference body with one built from the current selection.
///
/// With no selection the old body is removed and nothing is spawned.
pub struct SpawnReferenceBody;

impl Command for SpawnReferenceBody {
  fn apply(self, world: &mut World) {
    despawn_reference_bodies(world);

    let Some(document) = world
      .get_resource::<SelectedShape>()
      .and_then(|selected| selected.document().cloned())
    else {
      return;
    };
    spawn_reference_body(world, &document);
  }
}

fn despawn_reference_bodies(world: &mut World) {
  let existing: Vec<Entity> = world
    .query::<(Entity, &SimulationBody)>()
    .iter(world)
    .filter(|(_, kind)| **kind == SimulationBody::Reference)
    .map(|(entity, _)| entity)
    .collect();
  for entity in existing {
    world.despawn(entity);
  }
}
