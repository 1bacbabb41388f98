use crate::constants::PREVENT_DEFAULT_KEYS;
use crate::core::{GameState, InputHandler, KeyDisposition};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type KeyClosure = Closure<dyn FnMut(web::KeyboardEvent)>;

/// Shared state the keyboard callbacks read and write.
#[derive(Clone)]
pub struct KeyboardWiring {
    pub input: Rc<RefCell<InputHandler>>,
    pub state: Rc<Cell<GameState>>,
    pub paused: Rc<Cell<bool>>,
}

/// `keydown`/`keyup` listeners on the window; removed by `detach`.
pub struct KeyboardListeners {
    window: web::Window,
    keydown: KeyClosure,
    keyup: KeyClosure,
}

impl KeyboardWiring {
    pub fn new() -> Self {
        Self {
            input: Rc::new(RefCell::new(InputHandler::new())),
            state: Rc::new(Cell::new(GameState::default())),
            paused: Rc::new(Cell::new(false)),
        }
    }

    /// Records a key press against the current game state, toggling pause.
    pub fn key_down(&self, key: &str) -> KeyDisposition {
        let mut paused = self.paused.get();
        let disposition = self
            .input
            .borrow_mut()
            .press_key(key, self.state.get(), &mut paused);
        self.paused.set(paused);
        disposition
    }
}

impl Default for KeyboardWiring {
    fn default() -> Self {
        Self::new()
    }
}

pub fn handle_keydown(ev: &web::KeyboardEvent, w: &KeyboardWiring) {
    let key = ev.key();
    match w.key_down(&key) {
        KeyDisposition::PauseToggled => ev.prevent_default(),
        KeyDisposition::Recorded if PREVENT_DEFAULT_KEYS.contains(&key.as_str()) => {
            ev.prevent_default();
        }
        _ => {}
    }
}

impl KeyboardListeners {
    pub fn attach(w: KeyboardWiring) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;

        let down = w.clone();
        let keydown = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            handle_keydown(&ev, &down);
        }) as Box<dyn FnMut(_)>);

        let up = w;
        let keyup = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            up.input.borrow_mut().handle_key_up(&ev.key());
        }) as Box<dyn FnMut(_)>);

        window
            .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("keydown listener: {:?}", e))?;
        window
            .add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("keyup listener: {:?}", e))?;

        Ok(Self {
            window,
            keydown,
            keyup,
        })
    }

    pub fn detach(self) {
        _ = self
            .window
            .remove_event_listener_with_callback("keydown", self.keydown.as_ref().unchecked_ref());
        _ = self
            .window
            .remove_event_listener_with_callback("keyup", self.keyup.as_ref().unchecked_ref());
    }
}
