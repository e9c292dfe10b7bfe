//! Input mapping
//!
//! Raw key/pointer events become game commands. The mapper never checks
//! whether a session is running; the commands themselves are no-ops then.

use crate::settings::KeyBindings;

/// Raw input from the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Key press, identified by its physical code (`KeyboardEvent.code`)
    Key(String),
    /// Mouse click or tap
    Pointer,
}

/// What a raw input asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Flap,
    ActivateSlowMotion,
    ActivateInvisibility,
}

#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    bindings: KeyBindings,
}

impl InputMapper {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Designated power-up keys map to activations; every other key and any
    /// pointer press is the primary action.
    pub fn map(&self, event: &InputEvent) -> Command {
        match event {
            InputEvent::Key(code) if *code == self.bindings.slow_motion => {
                Command::ActivateSlowMotion
            }
            InputEvent::Key(code) if *code == self.bindings.invisibility => {
                Command::ActivateInvisibility
            }
            InputEvent::Key(_) | InputEvent::Pointer => Command::Flap,
        }
    }
}
