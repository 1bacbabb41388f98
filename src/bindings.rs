//! JS-facing handles for the host game loop.
//!
//! The host calls `Input.handleInput`, then the `update*` methods, then the
//! `render*` methods once per animation frame.

use crate::audio::{self, HtmlClip};
use crate::constants::DEFAULT_AUDIO_BASE;
use crate::core::{
    ArmorStatus, AudioManager, AudioToggle, CelebrationStatus, EffectsManager, GameState,
    KeyDisposition, MoveBounds, MusicTrack, PlayerBody, Rect, SoundEffect,
};
use crate::dom;
use crate::events::{KeyboardListeners, KeyboardWiring, PointerListeners, PointerWiring};
use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

// ---------------- Effects ----------------

#[wasm_bindgen]
pub struct Effects {
    inner: EffectsManager,
}

#[wasm_bindgen]
impl Effects {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Effects {
        Effects {
            inner: EffectsManager::new(),
        }
    }

    #[wasm_bindgen(js_name = initializeFireworks)]
    pub fn initialize_fireworks(&mut self, x: f32, y: f32) {
        self.inner.initialize_fireworks(Vec2::new(x, y));
    }

    /// Returns true once the celebration has run its course.
    #[wasm_bindgen(js_name = updateCelebration)]
    pub fn update_celebration(&mut self) -> bool {
        self.inner.update_celebration() == CelebrationStatus::Finished
    }

    #[wasm_bindgen(js_name = renderFireworks)]
    pub fn render_fireworks(&self, ctx: &web::CanvasRenderingContext2d) {
        let mut ctx = ctx.clone();
        self.inner.render_fireworks(&mut ctx);
    }

    #[wasm_bindgen(js_name = activateArmor)]
    pub fn activate_armor(&mut self, x: f32, y: f32) {
        self.inner.activate_armor(Vec2::new(x, y));
    }

    /// Returns true once the activation animation is complete.
    #[wasm_bindgen(js_name = updateArmorActivation)]
    pub fn update_armor_activation(&mut self) -> bool {
        self.inner.update_armor_activation() == ArmorStatus::Complete
    }

    #[wasm_bindgen(js_name = renderArmorExplosion)]
    pub fn render_armor_explosion(&self, ctx: &web::CanvasRenderingContext2d, camera_x: f32) {
        let mut ctx = ctx.clone();
        self.inner.render_armor_explosion(&mut ctx, camera_x);
    }

    #[wasm_bindgen(js_name = addSparkleTrail)]
    pub fn add_sparkle_trail(&mut self, x: f32, y: f32) -> bool {
        self.inner.add_sparkle_trail(Vec2::new(x, y))
    }

    #[wasm_bindgen(js_name = updateSparkleTrails)]
    pub fn update_sparkle_trails(&mut self) {
        self.inner.update_sparkle_trails();
    }

    #[wasm_bindgen(js_name = renderSparkleTrails)]
    pub fn render_sparkle_trails(&self, ctx: &web::CanvasRenderingContext2d, camera_x: f32) {
        let mut ctx = ctx.clone();
        self.inner.render_sparkle_trails(&mut ctx, camera_x);
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[wasm_bindgen(getter = isCelebrating)]
    pub fn is_celebrating(&self) -> bool {
        self.inner.is_celebrating()
    }

    #[wasm_bindgen(getter = isArmorActivating)]
    pub fn is_armor_activating(&self) -> bool {
        self.inner.is_armor_activating()
    }
}

impl Default for Effects {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------- Audio ----------------

#[wasm_bindgen]
pub struct Audio {
    inner: AudioManager<HtmlClip>,
}

#[wasm_bindgen]
impl Audio {
    #[wasm_bindgen(constructor)]
    pub fn new(base_path: Option<String>) -> Audio {
        let base = base_path.as_deref().unwrap_or(DEFAULT_AUDIO_BASE);
        Audio {
            inner: audio::load_clips(base),
        }
    }

    /// Returns true when audio was re-enabled and the caller should resume.
    #[wasm_bindgen(js_name = toggleAudio)]
    pub fn toggle_audio(&mut self) -> bool {
        self.inner.toggle_audio() == AudioToggle::ResumeRequested
    }

    #[wasm_bindgen(js_name = playMusic)]
    pub fn play_music(&mut self, key: &str) {
        if let Some(track) = MusicTrack::from_key(key) {
            self.inner.play_music(track);
        }
    }

    #[wasm_bindgen(js_name = playMusicForState)]
    pub fn play_music_for_state(&mut self, label: &str) {
        if let Some(state) = GameState::from_label(label) {
            self.inner.play_music_for_state(state);
        }
    }

    #[wasm_bindgen(js_name = playSoundEffect)]
    pub fn play_sound_effect(&self, key: &str) {
        if let Some(effect) = SoundEffect::from_key(key) {
            self.inner.play_sound_effect(effect);
        }
    }

    #[wasm_bindgen(js_name = pauseCurrentMusic)]
    pub fn pause_current_music(&self) {
        self.inner.pause_current_music();
    }

    #[wasm_bindgen(js_name = resumeCurrentMusic)]
    pub fn resume_current_music(&self) {
        self.inner.resume_current_music();
    }

    #[wasm_bindgen(js_name = stopAllAudio)]
    pub fn stop_all_audio(&mut self) {
        self.inner.stop_all_audio();
    }

    #[wasm_bindgen(getter = isEnabled)]
    pub fn is_enabled(&self) -> bool {
        self.inner.is_enabled()
    }
}

// ---------------- Input ----------------

/// Player fields the input step touches, mirrored to JS by value.
#[wasm_bindgen]
#[derive(Clone, Copy, Default)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub grounded: bool,
    pub ducking: bool,
}

#[wasm_bindgen]
impl Player {
    #[wasm_bindgen(constructor)]
    pub fn new(x: f32, y: f32, width: f32) -> Player {
        Player {
            x,
            y,
            width,
            ..Default::default()
        }
    }
}

impl Player {
    fn body(&self) -> PlayerBody {
        PlayerBody {
            pos: Vec2::new(self.x, self.y),
            vel: Vec2::new(self.vx, self.vy),
            width: self.width,
            grounded: self.grounded,
            ducking: self.ducking,
        }
    }

    fn store(&mut self, b: &PlayerBody) {
        self.x = b.pos.x;
        self.y = b.pos.y;
        self.vx = b.vel.x;
        self.vy = b.vel.y;
        self.grounded = b.grounded;
        self.ducking = b.ducking;
    }
}

#[wasm_bindgen]
pub struct Input {
    keys: KeyboardWiring,
    clicked: Rc<Cell<Option<usize>>>,
    keyboard: Option<KeyboardListeners>,
    pointer: Option<PointerListeners>,
}

#[wasm_bindgen]
impl Input {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Input {
        Input {
            keys: KeyboardWiring::new(),
            clicked: Rc::new(Cell::new(None)),
            keyboard: None,
            pointer: None,
        }
    }

    /// Attaches keyboard listeners to the window and pointer listeners to
    /// `canvas`. Re-attaching replaces any previous listeners.
    #[wasm_bindgen(js_name = setupEventListeners)]
    pub fn setup_event_listeners(
        &mut self,
        canvas: Option<web::HtmlCanvasElement>,
    ) -> Result<(), JsValue> {
        self.cleanup();
        let canvas = match canvas {
            Some(c) => c,
            None => dom::canvas_by_id(crate::constants::CANVAS_ID).map_err(dom::js_err)?,
        };
        self.keyboard = Some(KeyboardListeners::attach(self.keys.clone()).map_err(dom::js_err)?);
        self.pointer = Some(
            PointerListeners::attach(PointerWiring {
                canvas,
                input: self.keys.input.clone(),
                clicked: self.clicked.clone(),
            })
            .map_err(dom::js_err)?,
        );
        log::info!("[input] listeners attached");
        Ok(())
    }

    pub fn cleanup(&mut self) {
        if let Some(k) = self.keyboard.take() {
            k.detach();
        }
        if let Some(p) = self.pointer.take() {
            p.detach();
        }
        self.keys.input.borrow_mut().clear();
    }

    /// Unknown labels leave the current state untouched.
    #[wasm_bindgen(js_name = setGameState)]
    pub fn set_game_state(&self, label: &str) {
        if let Some(state) = GameState::from_label(label) {
            self.keys.state.set(state);
        }
    }

    /// Returns true if the key toggled pause.
    #[wasm_bindgen(js_name = handleKeyDown)]
    pub fn handle_key_down(&self, key: &str) -> bool {
        self.keys.key_down(key) == KeyDisposition::PauseToggled
    }

    #[wasm_bindgen(js_name = handleKeyUp)]
    pub fn handle_key_up(&self, key: &str) {
        self.keys.input.borrow_mut().handle_key_up(key);
    }

    /// Applies this frame's input to `player`; returns true if it jumped.
    #[wasm_bindgen(js_name = handleInput)]
    pub fn handle_input(&self, player: &mut Player, camera_x: f32, world_width: f32) -> bool {
        // a paused frame is treated like any other non-play state
        let state = if self.keys.paused.get() {
            GameState::Menu
        } else {
            self.keys.state.get()
        };
        let mut body = player.body();
        let outcome = self.keys.input.borrow_mut().handle_input(
            &mut body,
            MoveBounds {
                camera_x,
                world_width,
            },
            state,
        );
        player.store(&body);
        outcome.jumped
    }

    #[wasm_bindgen(getter = isPaused)]
    pub fn is_paused(&self) -> bool {
        self.keys.paused.get()
    }

    #[wasm_bindgen(setter = isPaused)]
    pub fn set_paused(&self, paused: bool) {
        self.keys.paused.set(paused);
    }

    /// Pause-menu button bounds as flat `[x, y, w, h, ...]`.
    #[wasm_bindgen(js_name = setMenuButtons)]
    pub fn set_menu_buttons(&self, flat: Vec<f32>) {
        let rects = flat
            .chunks_exact(4)
            .map(|c| Rect::new(c[0], c[1], c[2], c[3]))
            .collect();
        self.keys.input.borrow_mut().set_menu_buttons(rects);
    }

    #[wasm_bindgen(getter = hoveredButton)]
    pub fn hovered_button(&self) -> Option<u32> {
        self.keys.input.borrow().pointer().hovered.map(|i| i as u32)
    }

    #[wasm_bindgen(js_name = takeMenuClick)]
    pub fn take_menu_click(&self) -> Option<u32> {
        self.clicked.take().map(|i| i as u32)
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Input {
    fn drop(&mut self) {
        self.cleanup();
    }
}
