//! Keyboard/pointer state and its per-frame translation into player motion.

use fnv::FnvHashMap;
use glam::Vec2;

use super::constants::{DUCK_SPEED_FACTOR, JUMP_VELOCITY, MOVE_SPEED};
use super::state::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    Jump,
    Down,
    Pause,
}

impl Control {
    /// DOM `KeyboardEvent.key` values bound to this control.
    pub fn bindings(self) -> &'static [&'static str] {
        match self {
            Control::Left => &["ArrowLeft", "a", "A"],
            Control::Right => &["ArrowRight", "d", "D"],
            Control::Jump => &["ArrowUp", "w", "W", " "],
            Control::Down => &["ArrowDown", "s", "S"],
            Control::Pause => &["p", "P", "Escape"],
        }
    }

    #[inline]
    pub fn for_key(key: &str) -> Option<Self> {
        [
            Control::Left,
            Control::Right,
            Control::Jump,
            Control::Down,
            Control::Pause,
        ]
        .into_iter()
        .find(|c| c.bindings().contains(&key))
    }
}

/// Axis-aligned rectangle in canvas pixels (pause-menu buttons).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// The parts of the player the input step reads and writes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub grounded: bool,
    pub ducking: bool,
}

/// Horizontal limits for this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveBounds {
    /// Left edge of the visible area; the player can't walk back past it.
    pub camera_x: f32,
    pub world_width: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyDisposition {
    PauseToggled,
    Recorded,
    /// Pause key outside active play.
    Ignored,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputOutcome {
    pub jumped: bool,
    pub ducking: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub pos: Vec2,
    pub hovered: Option<usize>,
}

#[derive(Default)]
pub struct InputHandler {
    held: FnvHashMap<String, bool>,
    pressed: FnvHashMap<String, bool>,
    pointer: PointerState,
    menu_buttons: Vec<Rect>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key_down(&mut self, key: &str, state: GameState) -> KeyDisposition {
        if Control::Pause.bindings().contains(&key) {
            if state == GameState::Playing {
                log::debug!("[keys] pause toggled");
                return KeyDisposition::PauseToggled;
            }
            return KeyDisposition::Ignored;
        }
        if !self.is_key_held(key) {
            self.pressed.insert(key.to_string(), true);
        }
        self.held.insert(key.to_string(), true);
        KeyDisposition::Recorded
    }

    /// Releases `key`. A pending press stays queued until `consume_press`.
    pub fn handle_key_up(&mut self, key: &str) {
        self.held.insert(key.to_string(), false);
    }

    /// `handle_key_down` that also flips `paused` when the key toggled pause.
    pub fn press_key(&mut self, key: &str, state: GameState, paused: &mut bool) -> KeyDisposition {
        let disposition = self.handle_key_down(key, state);
        if disposition == KeyDisposition::PauseToggled {
            *paused = !*paused;
            log::info!("[keys] paused={}", paused);
        }
        disposition
    }

    #[inline]
    pub fn is_key_held(&self, key: &str) -> bool {
        self.held.get(key).copied().unwrap_or(false)
    }

    pub fn is_held(&self, control: Control) -> bool {
        control.bindings().iter().any(|k| self.is_key_held(k))
    }

    /// True if any key of `control` went down since the last call; clears the edge.
    pub fn consume_press(&mut self, control: Control) -> bool {
        let mut fired = false;
        for key in control.bindings() {
            if let Some(flag) = self.pressed.get_mut(*key) {
                fired |= std::mem::take(flag);
            }
        }
        fired
    }

    /// Applies held/pressed state to `player` for one frame.
    pub fn handle_input(
        &mut self,
        player: &mut PlayerBody,
        bounds: MoveBounds,
        state: GameState,
    ) -> InputOutcome {
        if state != GameState::Playing {
            // presses outside play must not replay as a jump on resume
            self.pressed.values_mut().for_each(|f| *f = false);
            return InputOutcome::default();
        }

        player.ducking = self.is_held(Control::Down) && player.grounded;
        let speed = if player.ducking {
            MOVE_SPEED * DUCK_SPEED_FACTOR
        } else {
            MOVE_SPEED
        };

        let left = self.is_held(Control::Left);
        let right = self.is_held(Control::Right);
        let left_limit = bounds.camera_x.max(0.0);
        let right_limit = bounds.world_width - player.width;
        if left && !right {
            if player.pos.x - speed >= left_limit {
                player.vel.x = -speed;
            } else {
                player.pos.x = left_limit;
                player.vel.x = 0.0;
            }
        } else if right && !left {
            if player.pos.x + speed <= right_limit {
                player.vel.x = speed;
            } else {
                player.pos.x = right_limit;
                player.vel.x = 0.0;
            }
        } else {
            player.vel.x = 0.0;
        }

        let mut jumped = false;
        if self.consume_press(Control::Jump) && player.grounded && !player.ducking {
            player.vel.y = -JUMP_VELOCITY;
            player.grounded = false;
            jumped = true;
        }

        InputOutcome {
            jumped,
            ducking: player.ducking,
        }
    }

    pub fn set_menu_buttons(&mut self, buttons: Vec<Rect>) {
        self.menu_buttons = buttons;
        self.pointer.hovered = None;
    }

    /// Updates the hovered pause-menu button; returns it.
    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> Option<usize> {
        self.pointer.pos = Vec2::new(x, y);
        self.pointer.hovered = self.button_at(self.pointer.pos);
        self.pointer.hovered
    }

    pub fn handle_click(&mut self, x: f32, y: f32) -> Option<usize> {
        self.pointer.pos = Vec2::new(x, y);
        self.button_at(self.pointer.pos)
    }

    #[inline]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    fn button_at(&self, p: Vec2) -> Option<usize> {
        self.menu_buttons.iter().position(|r| r.contains(p))
    }

    /// Forgets all key and pointer state (listener teardown, focus loss).
    pub fn clear(&mut self) {
        self.held.clear();
        self.pressed.clear();
        self.pointer = PointerState::default();
    }
}
