//! Platform-independent game-side logic.
//!
//! Nothing in here touches `web_sys`; the wasm layer adapts these types to
//! the browser through the `Surface2d` and `AudioClip` traits.

pub mod audio;
pub mod constants;
pub mod draw;
pub mod effects;
pub mod input;
pub mod particles;
pub mod state;

pub use audio::*;
pub use constants::*;
pub use draw::*;
pub use effects::*;
pub use input::*;
pub use particles::*;
pub use state::*;
