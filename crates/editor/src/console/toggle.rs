//! `/` toggles the console, Escape closes it.

use bevy::ecs::message::MessageWriter;
use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;
use bevy_console::ConsoleOpen;
use bevy_egui::{EguiContexts, egui};

pub fn handle_console_toggle(
  keys: Res<ButtonInput<KeyCode>>,
  console_open: Res<ConsoleOpen>,
  mut contexts: EguiContexts,
  mut keyboard_events: MessageWriter<KeyboardInput>,
) {
  let toggle = if keys.just_pressed(KeyCode::Escape) {
    // Escape only closes
    if !console_open.open {
      return;
    }
    Some(egui::Key::Escape)
  } else if keys.just_pressed(KeyCode::Slash) {
    // Keep `/` out of the input line when closing
    console_open.open.then_some(egui::Key::Slash)
  } else {
    return;
  };

  if let Some(key) = toggle {
    if let Ok(ctx) = contexts.ctx_mut() {
      ctx.input_mut(|i| {
        i.consume_key(egui::Modifiers::NONE, key);
      });
    }
  }

  // bevy_console toggles on F12; its handler also moves focus to the input.
  keyboard_events.write(KeyboardInput {
    key_code: KeyCode::F12,
    logical_key: Key::F12,
    state: ButtonState::Pressed,
    text: None,
    repeat: false,
    window: Entity::PLACEHOLDER,
  });
}
