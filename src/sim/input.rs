//! Input resolution
//!
//! Host events (keys, touch buttons, pointer) are queued and drained once per
//! tick into persistent latches, which then resolve to a single movement
//! intent. Left wins over right when both are held.

use serde::Serialize;

use crate::consts::DRAG_VELOCITY_FACTOR;
use crate::settings::InputMode;

/// Digital direction signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Button {
    Left,
    Right,
    Up,
    /// Reported by keyboards, unused by the rules
    Down,
}

impl Button {
    /// On-screen button names
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Button::Left),
            "right" => Some(Button::Right),
            "up" | "jump" => Some(Button::Up),
            "down" => Some(Button::Down),
            _ => None,
        }
    }

    /// DOM `KeyboardEvent.code` values (cursor keys, WASD, space)
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Button::Left),
            "ArrowRight" | "KeyD" => Some(Button::Right),
            "ArrowUp" | "KeyW" | "Space" => Some(Button::Up),
            "ArrowDown" | "KeyS" => Some(Button::Down),
            _ => None,
        }
    }
}

/// Pointer phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Out,
}

/// A raw event from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum InputEvent {
    Key { button: Button, pressed: bool },
    /// Pointer pressed on an on-screen button
    TouchDown(Button),
    /// Pointer released over an on-screen button
    TouchUp(Button),
    /// Pointer left an on-screen button
    TouchOut(Button),
    Pointer { phase: PointerPhase, x: f32, y: f32 },
}

/// Three independent booleans
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Latches {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

impl Latches {
    fn set(&mut self, button: Button, value: bool) {
        match button {
            Button::Left => self.left = value,
            Button::Right => self.right = value,
            Button::Up => self.up = value,
            Button::Down => {}
        }
    }
}

/// Active pointer drag
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Drag {
    pub start_x: f32,
    pub current_x: f32,
}

/// Effective input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub enum Intent {
    /// Discrete: direction in {-1, 0, 1} plus jump request
    Discrete { move_x: i8, jump: bool },
    /// Drag in progress: horizontal velocity override
    Drag { vel_x: f32 },
    /// No drag active: stop and return to neutral
    #[default]
    Released,
}

impl Intent {
    /// Horizontal movement sign
    pub fn move_x(&self) -> i8 {
        match *self {
            Intent::Discrete { move_x, .. } => move_x,
            Intent::Drag { vel_x } if vel_x < 0.0 => -1,
            Intent::Drag { vel_x } if vel_x > 0.0 => 1,
            _ => 0,
        }
    }

    pub fn jump(&self) -> bool {
        matches!(*self, Intent::Discrete { jump: true, .. })
    }
}

/// Persistent input state across ticks
#[derive(Debug, Clone, Default, Serialize)]
pub struct Controls {
    pub keyboard: Latches,
    pub touch: Latches,
    pub drag: Option<Drag>,
}

impl Controls {
    /// Apply one event to the latches
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key { button, pressed } => self.keyboard.set(button, pressed),
            InputEvent::TouchDown(button) => self.touch.set(button, true),
            InputEvent::TouchUp(button) | InputEvent::TouchOut(button) => {
                self.touch.set(button, false)
            }
            InputEvent::Pointer { phase, x, .. } => match phase {
                PointerPhase::Down => {
                    self.drag = Some(Drag {
                        start_x: x,
                        current_x: x,
                    });
                }
                PointerPhase::Move => {
                    if let Some(drag) = &mut self.drag {
                        drag.current_x = x;
                    }
                }
                PointerPhase::Up | PointerPhase::Out => self.drag = None,
            },
        }
    }

    /// Drain this tick's events and resolve the effective intent
    pub fn resolve(&mut self, events: &[InputEvent], mode: InputMode) -> Intent {
        for &event in events {
            self.apply(event);
        }
        match mode {
            InputMode::Discrete => {
                let left = self.keyboard.left || self.touch.left;
                let right = self.keyboard.right || self.touch.right;
                let move_x = if left {
                    -1
                } else if right {
                    1
                } else {
                    0
                };
                Intent::Discrete {
                    move_x,
                    jump: self.keyboard.up || self.touch.up,
                }
            }
            InputMode::Drag => match self.drag {
                Some(drag) => Intent::Drag {
                    vel_x: (drag.current_x - drag.start_x) * DRAG_VELOCITY_FACTOR,
                },
                None => Intent::Released,
            },
        }
    }
}
