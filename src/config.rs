//! Tuning tables and play-area constants.
//!
//! Everything here is fixed at compile time; the only runtime input is
//! `$HOME`, used to place the high-score and log files.

use std::path::PathBuf;

// ── Play area ────────────────────────────────────────────────────────────────

pub const GAME_AREA_WIDTH: f32 = 900.0;
/// Render-only side panel to the right of the game area.
pub const INFO_PANEL_WIDTH: f32 = 300.0;
pub const SCREEN_HEIGHT: f32 = 900.0;
pub const FPS: u32 = 60;

// ── Player ───────────────────────────────────────────────────────────────────

/// Minimum distance the ship keeps from every edge.
pub const PLAYER_EDGE_MARGIN: f32 = 30.0;
pub const PLAYER_SHOT_COOLDOWN: u32 = 8;
pub const RELOAD_FRAMES: u32 = 120;
pub const NO_AMMO_FLASH_FRAMES: u32 = 60;
pub const POWER_UP_DURATION: u32 = 600;
pub const AMMO_REFILL: u32 = 25;
pub const HEAL_AMOUNT: i32 = 1;

// ── Session pacing ───────────────────────────────────────────────────────────

/// Frames into a level before the boss may appear (30 s).
pub const BOSS_LEVEL_FRAMES: u32 = 1800;
pub const MOTHERSHIP_SCORE: u32 = 200;
/// Score at which the HUD starts counting down to the mothership.
pub const MOTHERSHIP_WARNING_SCORE: u32 = 180;
pub const POWER_UP_PICKUP_SCORE: u32 = 50;
pub const POWER_UP_SPAWN_CHANCE: f64 = 0.8;
pub const MOTHERSHIP_REWARD_DROPS: usize = 3;

pub const ENEMY_SPAWN_Y: f32 = -50.0;
pub const POWER_UP_SPAWN_Y: f32 = -30.0;
pub const SPAWN_MARGIN: f32 = 50.0;
pub const REWARD_DROP_MARGIN: f32 = 100.0;

// ── Difficulty presets ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Starting stats for the player ship.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerProfile {
    pub health: i32,
    pub speed: f32,
    pub ammo: u32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Unknown names fall back to `Normal`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Normal,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            Difficulty::Easy => "More health, ammo, slower enemies",
            Difficulty::Normal => "Balanced gameplay experience",
            Difficulty::Hard => "Less health, ammo, faster enemies",
        }
    }

    /// Scales enemy speed, spawn rate, shot cadence and score awards.
    pub fn multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.5,
        }
    }

    pub fn player_profile(self) -> PlayerProfile {
        match self {
            Difficulty::Easy => PlayerProfile {
                health: 7,
                speed: 6.0,
                ammo: 100,
            },
            Difficulty::Normal => PlayerProfile {
                health: 5,
                speed: 5.0,
                ammo: 75,
            },
            Difficulty::Hard => PlayerProfile {
                health: 3,
                speed: 4.0,
                ammo: 50,
            },
        }
    }

    /// Frames between power-up spawn rolls.
    pub fn power_up_interval(self) -> u32 {
        match self {
            Difficulty::Easy => 600,
            Difficulty::Normal => 900,
            Difficulty::Hard => 1200,
        }
    }
}

/// Environment variable naming the preset highlighted on the difficulty screen.
pub const DIFFICULTY_ENV: &str = "GALACTIC_DEFENSE_DIFFICULTY";

/// Preset to preselect at startup. Unset means `Normal`; unknown names too.
pub fn preferred_difficulty() -> Difficulty {
    std::env::var(DIFFICULTY_ENV)
        .map(|name| Difficulty::from_name(&name))
        .unwrap_or_default()
}

// ── Files ────────────────────────────────────────────────────────────────────

fn home_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
}

pub fn high_score_path() -> PathBuf {
    home_dir().join(".galactic_defense_score.json")
}

pub fn log_path() -> PathBuf {
    home_dir().join(".galactic_defense.log")
}

/// Sound effects are looked up relative to the working directory.
pub fn sounds_dir() -> PathBuf {
    PathBuf::from("sounds")
}
