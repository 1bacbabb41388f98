//! Background music and one-shot sound effects over an abstract clip backend.

use fnv::FnvHashMap;

use super::state::GameState;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// The backend refused to start playback (e.g. browser autoplay policy).
    #[error("playback rejected: {0}")]
    PlaybackRejected(String),
    #[error("could not duplicate clip: {0}")]
    DuplicateFailed(String),
}

/// Static per-clip playback configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipSettings {
    pub looping: bool,
    pub volume: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MusicTrack {
    Menu,
    Level,
    Victory,
    GameOver,
}

impl MusicTrack {
    pub const ALL: [MusicTrack; 4] = [
        MusicTrack::Menu,
        MusicTrack::Level,
        MusicTrack::Victory,
        MusicTrack::GameOver,
    ];

    pub fn settings(self) -> ClipSettings {
        let (looping, volume) = match self {
            MusicTrack::Menu => (true, 0.5),
            MusicTrack::Level => (true, 0.4),
            MusicTrack::Victory => (false, 0.6),
            MusicTrack::GameOver => (false, 0.5),
        };
        ClipSettings { looping, volume }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            MusicTrack::Menu => "menu.mp3",
            MusicTrack::Level => "level.mp3",
            MusicTrack::Victory => "victory.mp3",
            MusicTrack::GameOver => "game-over.mp3",
        }
    }

    /// Track played for each game phase.
    pub fn for_state(state: GameState) -> Option<Self> {
        match state {
            GameState::Menu => Some(MusicTrack::Menu),
            GameState::Playing => Some(MusicTrack::Level),
            GameState::LevelComplete | GameState::Celebrating => Some(MusicTrack::Victory),
            GameState::GameOver => Some(MusicTrack::GameOver),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "menu" => Some(MusicTrack::Menu),
            "level" => Some(MusicTrack::Level),
            "victory" => Some(MusicTrack::Victory),
            "gameOver" => Some(MusicTrack::GameOver),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Jump,
    Coin,
    Stomp,
    PowerUp,
    Armor,
    Hurt,
    Pause,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 7] = [
        SoundEffect::Jump,
        SoundEffect::Coin,
        SoundEffect::Stomp,
        SoundEffect::PowerUp,
        SoundEffect::Armor,
        SoundEffect::Hurt,
        SoundEffect::Pause,
    ];

    pub fn settings(self) -> ClipSettings {
        let volume = match self {
            SoundEffect::Jump => 0.3,
            SoundEffect::Coin => 0.4,
            SoundEffect::Stomp => 0.5,
            SoundEffect::PowerUp => 0.6,
            SoundEffect::Armor => 0.7,
            SoundEffect::Hurt => 0.5,
            SoundEffect::Pause => 0.3,
        };
        ClipSettings { looping: false, volume }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump.wav",
            SoundEffect::Coin => "coin.wav",
            SoundEffect::Stomp => "stomp.wav",
            SoundEffect::PowerUp => "power-up.wav",
            SoundEffect::Armor => "armor.wav",
            SoundEffect::Hurt => "hurt.wav",
            SoundEffect::Pause => "pause.wav",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "jump" => Some(SoundEffect::Jump),
            "coin" => Some(SoundEffect::Coin),
            "stomp" => Some(SoundEffect::Stomp),
            "powerUp" => Some(SoundEffect::PowerUp),
            "armor" => Some(SoundEffect::Armor),
            "hurt" => Some(SoundEffect::Hurt),
            "pause" => Some(SoundEffect::Pause),
            _ => None,
        }
    }
}

/// A preloaded playable resource owned by the platform backend.
pub trait AudioClip: Sized {
    /// Starts or resumes playback. Rejections may also arrive later and are
    /// the backend's to swallow.
    fn play(&self) -> Result<(), AudioError>;
    fn pause(&self);
    /// Seeks back to the start without changing play/pause state.
    fn rewind(&self);
    fn set_looping(&self, looping: bool);
    fn set_volume(&self, volume: f32);
    /// Independent copy of the same media so overlapping plays don't cut
    /// each other off.
    fn duplicate(&self) -> Result<Self, AudioError>;
    /// Hands the clip over to be disposed once its playback ends.
    fn release_on_end(self);
}

/// Outcome of `AudioManager::toggle_audio`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioToggle {
    /// Everything stopped and rewound.
    Muted,
    /// Audio re-enabled; the caller decides what to resume.
    ResumeRequested,
}

pub struct AudioManager<C: AudioClip> {
    music: FnvHashMap<MusicTrack, C>,
    effects: FnvHashMap<SoundEffect, C>,
    current: Option<MusicTrack>,
    enabled: bool,
}

impl<C: AudioClip> AudioManager<C> {
    /// Builds every clip through the loaders; clips they cannot create are skipped
    /// and later lookups for them no-op.
    pub fn load<M, E>(mut load_music: M, mut load_effect: E) -> Self
    where
        M: FnMut(MusicTrack) -> Option<C>,
        E: FnMut(SoundEffect) -> Option<C>,
    {
        let mut music = FnvHashMap::default();
        for track in MusicTrack::ALL {
            if let Some(clip) = load_music(track) {
                let s = track.settings();
                clip.set_looping(s.looping);
                clip.set_volume(s.volume);
                music.insert(track, clip);
            } else {
                log::warn!("[audio] music {:?} unavailable", track);
            }
        }
        let mut effects = FnvHashMap::default();
        for effect in SoundEffect::ALL {
            if let Some(clip) = load_effect(effect) {
                clip.set_volume(effect.settings().volume);
                effects.insert(effect, clip);
            } else {
                log::warn!("[audio] sound {:?} unavailable", effect);
            }
        }
        Self {
            music,
            effects,
            current: None,
            enabled: true,
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn current_music(&self) -> Option<MusicTrack> {
        self.current
    }

    pub fn toggle_audio(&mut self) -> AudioToggle {
        self.enabled = !self.enabled;
        log::info!("[audio] enabled={}", self.enabled);
        if self.enabled {
            AudioToggle::ResumeRequested
        } else {
            self.stop_all_audio();
            AudioToggle::Muted
        }
    }

    /// Makes `track` the only playing background track.
    pub fn play_music(&mut self, track: MusicTrack) {
        if !self.enabled {
            return;
        }
        self.stop_current();
        let Some(clip) = self.music.get(&track) else {
            return;
        };
        self.current = Some(track);
        clip.rewind();
        swallow(clip.play());
        log::debug!("[audio] music -> {:?}", track);
    }

    pub fn play_music_for_state(&mut self, state: GameState) {
        if let Some(track) = MusicTrack::for_state(state) {
            self.play_music(track);
        }
    }

    pub fn play_sound_effect(&self, effect: SoundEffect) {
        if !self.enabled {
            return;
        }
        let Some(template) = self.effects.get(&effect) else {
            return;
        };
        let clip = match template.duplicate() {
            Ok(c) => c,
            Err(e) => {
                log::debug!("[audio] {:?}: {}", effect, e);
                return;
            }
        };
        let s = effect.settings();
        clip.set_volume(s.volume);
        clip.set_looping(false);
        swallow(clip.play());
        clip.release_on_end();
    }

    pub fn pause_current_music(&self) {
        if let Some(clip) = self.current_clip() {
            clip.pause();
        }
    }

    pub fn resume_current_music(&self) {
        if !self.enabled {
            return;
        }
        if let Some(clip) = self.current_clip() {
            swallow(clip.play());
        }
    }

    pub fn stop_all_audio(&mut self) {
        for clip in self.music.values().chain(self.effects.values()) {
            clip.pause();
            clip.rewind();
        }
        self.current = None;
    }

    fn stop_current(&mut self) {
        if let Some(clip) = self.current.take().and_then(|t| self.music.get(&t)) {
            clip.pause();
            clip.rewind();
        }
    }

    fn current_clip(&self) -> Option<&C> {
        self.current.and_then(|t| self.music.get(&t))
    }
}

#[inline]
fn swallow(result: Result<(), AudioError>) {
    if let Err(e) = result {
        log::debug!("[audio] {}", e);
    }
}
