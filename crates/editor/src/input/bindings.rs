use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::actions::{
  ClearBalls, CycleMode, EditorInput, NextShape, PressLatch, PreviousShape, Recreate,
  ToggleBackground, ToggleGrid, ToggleImage,
};

pub fn editor_input_actions() -> impl Bundle {
  actions!(EditorInput[
      (
          Action::<CycleMode>::new(),
          PressLatch::default(),
          bindings![KeyCode::Tab],
      ),
      (
          Action::<ClearBalls>::new(),
          PressLatch::default(),
          bindings![KeyCode::Backspace],
      ),
      (
          Action::<Recreate>::new(),
          PressLatch::default(),
          bindings![KeyCode::KeyR],
      ),
      (
          Action::<ToggleImage>::new(),
          PressLatch::default(),
          bindings![KeyCode::KeyI],
      ),
      (
          Action::<ToggleGrid>::new(),
          PressLatch::default(),
          bindings![KeyCode::KeyG],
      ),
      (
          Action::<ToggleBackground>::new(),
          PressLatch::default(),
          bindings![KeyCode::KeyB],
      ),
      (
          Action::<PreviousShape>::new(),
          PressLatch::default(),
          bindings![KeyCode::PageUp],
      ),
      (
          Action::<NextShape>::new(),
          PressLatch::default(),
          bindings![KeyCode::PageDown],
      ),
  ])
}
