// Browser-side wiring constants used by the web frontend.

// DOM
pub const CANVAS_ID: &str = "game-canvas";

// Audio assets are resolved as `<base>/<file_name>`
pub const DEFAULT_AUDIO_BASE: &str = "assets/audio";

// Browser defaults (scrolling, find-as-you-type) suppressed for these keys
pub const PREVENT_DEFAULT_KEYS: [&str; 5] = ["ArrowLeft", "ArrowRight", "ArrowUp", "ArrowDown", " "];
