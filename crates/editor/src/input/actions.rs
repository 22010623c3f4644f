use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

#[derive(Component)]
pub struct EditorInput;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct CycleMode;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct ClearBalls;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct Recreate;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct ToggleImage;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct ToggleGrid;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct ToggleBackground;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct PreviousShape;

#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct NextShape;

/// Set while a key stays held, so each press triggers once.
#[derive(Component, Default)]
pub struct PressLatch(bool);

impl PressLatch {
  /// Feeds one frame of action state; true on the frame the press starts.
  pub fn update(&mut self, state: ActionState) -> bool {
    match state {
      ActionState::Fired if !self.0 => {
        self.0 = true;
        true
      }
      ActionState::None => {
        self.0 = false;
        false
      }
      _ => false,
    }
  }
}

pub type Shortcut<'w, 's, A> =
  Query<'w, 's, (&'static ActionState, &'static mut PressLatch), With<Action<A>>>;

/// True on the first frame action `A` fires.
pub fn just_pressed<A: InputAction>(shortcut: &mut Shortcut<A>) -> bool {
  let mut pressed = false;
  for (state, mut latch) in shortcut.iter_mut() {
    pressed |= latch.update(*state);
  }
  pressed
}
