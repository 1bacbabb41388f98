use std::fmt;
use std::str::FromStr;

/// Coarse game phase owned by the host loop; used to gate input and pick music.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    LevelComplete,
    Celebrating,
    GameOver,
}

impl GameState {
    /// Host-side label (`"levelComplete"`, ...).
    pub fn label(self) -> &'static str {
        match self {
            GameState::Menu => "menu",
            GameState::Playing => "playing",
            GameState::LevelComplete => "levelComplete",
            GameState::Celebrating => "celebrating",
            GameState::GameOver => "gameOver",
        }
    }

    #[inline]
    pub fn from_label(label: &str) -> Option<Self> {
        label.parse().ok()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown game state label: {0}")]
pub struct UnknownState(pub String);

impl FromStr for GameState {
    type Err = UnknownState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "menu" => Ok(GameState::Menu),
            "playing" => Ok(GameState::Playing),
            "levelComplete" => Ok(GameState::LevelComplete),
            "celebrating" => Ok(GameState::Celebrating),
            "gameOver" => Ok(GameState::GameOver),
            other => Err(UnknownState(other.to_string())),
        }
    }
}
