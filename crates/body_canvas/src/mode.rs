//! Edit mode state machine.
//!
//! The mode cycles `Creation -> Edition -> Test -> Creation`. Advancing
//! produces a [`ModeTransition`] describing its side effects; the
//! [`apply_mode_transitions`] system carries them out.

use std::fmt;

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditMode {
  /// Clicks add points to a new polygon.
  #[default]
  Creation,
  /// Clicks grab and move existing vertices.
  Edition,
  /// Drags fire test balls at the reference body.
  Test,
}

impl EditMode {
  pub const ALL: [Self; 3] = [Self::Creation, Self::Edition, Self::Test];

  pub fn next(self) -> Self {
    match self {
      Self::Creation => Self::Edition,
      Self::Edition => Self::Test,
      Self::Test => Self::Creation,
    }
  }

  /// Position of this mode's indicator.
  pub fn index(self) -> usize {
    match self {
      Self::Creation => 0,
      Self::Edition => 1,
      Self::Test => 2,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Creation => "Creation",
      Self::Edition => "Edition",
      Self::Test => "Test",
    }
  }
}

impl fmt::Display for EditMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// Highlight of one mode indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
  Active,
  #[default]
  Inactive,
}

impl Emphasis {
  pub fn opacity(self) -> f32 {
    match self {
      Self::Active => 1.0,
      Self::Inactive => 0.0,
    }
  }
}

/// Indicator highlights with exactly one entry active.
pub fn indicators_for(mode: EditMode) -> [Emphasis; 3] {
  let mut emphasis = [Emphasis::Inactive; 3];
  emphasis[mode.index()] = Emphasis::Active;
  emphasis
}

/// Side effect requested by a mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEffect {
  /// Drop the pending shape-creation point.
  ClearCreationCursor,
  /// Replace the mode indicator highlights.
  SetIndicators([Emphasis; 3]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeTransition {
  pub from: EditMode,
  pub to: EditMode,
  pub effects: Vec<ModeEffect>,
}

/// Returned by mode-specific entry points called in the wrong mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeError {
  WrongMode {
    expected: EditMode,
    actual: EditMode,
  },
}

impl fmt::Display for ModeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::WrongMode { expected, actual } => {
        write!(f, "rejected: requires {} mode, canvas is in {} mode", expected, actual)
      }
    }
  }
}

impl std::error::Error for ModeError {}

/// Owner of the current [`EditMode`].
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct ModeController {
  mode: EditMode,
}

impl ModeController {
  pub fn mode(&self) -> EditMode {
    self.mode
  }

  /// Moves to the next mode and describes what else must change.
  pub fn advance(&mut self) -> ModeTransition {
    let from = self.mode;
    self.mode = from.next();
    ModeTransition {
      from,
      to: self.mode,
      effects: vec![
        ModeEffect::ClearCreationCursor,
        ModeEffect::SetIndicators(indicators_for(self.mode)),
      ],
    }
  }

  pub fn require(&self, expected: EditMode) -> Result<(), ModeError> {
    if self.mode == expected {
      Ok(())
    } else {
      Err(ModeError::WrongMode {
        expected,
        actual: self.mode,
      })
    }
  }
}

/// Run condition that is true while the canvas is in `mode`.
pub fn in_mode(mode: EditMode) -> impl FnMut(Res<ModeController>) -> bool + Clone {
  move |controller: Res<ModeController>| controller.mode() == mode
}

/// Pending point of the polygon being created, shown as a preview.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct CreationCursor {
  pub next_point: Option<Vec2>,
}

/// Highlight of the Creation, Edition and Test indicators, in that order.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ModeIndicators(pub [Emphasis; 3]);

impl Default for ModeIndicators {
  fn default() -> Self {
    Self(indicators_for(EditMode::default()))
  }
}

impl ModeIndicators {
  pub fn active_count(&self) -> usize {
    self.0.iter().filter(|e| **e == Emphasis::Active).count()
  }
}

/// Request to move to the next mode.
#[derive(Message, Debug, Clone, Copy)]
pub struct AdvanceMode;

/// Emitted after every mode change.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChanged {
  pub from: EditMode,
  pub to: EditMode,
}

pub fn apply_mode_transitions(
  mut requests: MessageReader<AdvanceMode>,
  mut controller: ResMut<ModeController>,
  mut cursor: ResMut<CreationCursor>,
  mut indicators: ResMut<ModeIndicators>,
  mut changed: MessageWriter<ModeChanged>,
) {
  for _ in requests.read() {
    let transition = controller.advance();
    for effect in &transition.effects {
      match *effect {
        ModeEffect::ClearCreationCursor => cursor.next_point = None,
        ModeEffect::SetIndicators(emphasis) => indicators.0 = emphasis,
      }
    }
    info!("Mode: {} -> {}", transition.from, transition.to);
    changed.write(ModeChanged {
      from: transition.from,
      to: transition.to,
    });
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn starts_in_creation() {
    assert_eq!(ModeController::default().mode(), EditMode::Creation);
    assert_eq!(ModeIndicators::default().0, indicators_for(EditMode::Creation));
  }

  #[test]
  fn three_advances_return_to_start() {
    let mut controller = ModeController::default();
    let expected = [EditMode::Edition, EditMode::Test, EditMode::Creation];
    for mode in expected {
      let transition = controller.advance();
      assert_eq!(transition.to, mode);
      let Some(ModeEffect::SetIndicators(emphasis)) = transition.effects.last().copied() else {
        panic!("transition should end with an indicator update");
      };
      let active = emphasis.iter().filter(|e| **e == Emphasis::Active).count();
      assert_eq!(active, 1, "exactly one indicator must be active");
      assert_eq!(emphasis[mode.index()], Emphasis::Active);
    }
    assert_eq!(controller, ModeController::default());
  }

  #[test]
  fn every_transition_clears_creation_cursor() {
    let mut controller = ModeController::default();
    for _ in 0..3 {
      let transition = controller.advance();
      assert!(transition.effects.contains(&ModeEffect::ClearCreationCursor));
    }
  }

  #[test]
  fn require_reports_both_modes() {
    let controller = ModeController::default();
    assert!(controller.require(EditMode::Creation).is_ok());
    let err = controller.require(EditMode::Test).unwrap_err();
    assert_eq!(
      err,
      ModeError::WrongMode {
        expected: EditMode::Test,
        actual: EditMode::Creation,
      }
    );
    assert!(err.to_string().contains("Test"));
  }

  #[test]
  fn transition_system_applies_effects() {
    let mut app = App::new();
    app
      .add_message::<AdvanceMode>()
      .add_message::<ModeChanged>()
      .init_resource::<ModeController>()
      .init_resource::<ModeIndicators>()
      .insert_resource(CreationCursor {
        next_point: Some(Vec2::new(0.2, 0.4)),
      })
      .add_systems(Update, apply_mode_transitions);

    app.world_mut().write_message(AdvanceMode);
    app.update();

    assert_eq!(app.world().resource::<ModeController>().mode(), EditMode::Edition);
    assert_eq!(app.world().resource::<CreationCursor>().next_point, None);
    let indicators = app.world().resource::<ModeIndicators>();
    assert_eq!(indicators.active_count(), 1);
    assert_eq!(indicators.0[EditMode::Edition.index()], Emphasis::Active);
  }
}
