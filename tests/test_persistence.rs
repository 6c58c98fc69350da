use std::fs;

use galactic_defense::audio::{AudioSink, Cue, SoundBank, Track};
use galactic_defense::config::{preferred_difficulty, Difficulty, DIFFICULTY_ENV};
use galactic_defense::persistence::{HighScoreRecord, HighScoreStore};
use galactic_defense::GameError;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> HighScoreStore {
    HighScoreStore::new(dir.path().join("score.json"))
}

// ── High score file ───────────────────────────────────────────────────────────

#[test]
fn missing_file_reads_as_zero() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    assert_eq!(store.load(), 0);
    assert!(matches!(store.try_load(), Err(GameError::Io { .. })));
}

#[test]
fn save_then_load() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.save(4200);
    assert_eq!(store.load(), 4200);
    store.save(4500);
    assert_eq!(store.load(), 4500);
    assert_eq!(
        store.try_load().unwrap(),
        HighScoreRecord { high_score: 4500 }
    );
}

#[test]
fn file_is_plain_json() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.save(42);
    let text = fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["high_score"], 42);
}

#[test]
fn malformed_file_reads_as_zero() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), "not json at all").unwrap();
    assert_eq!(store.load(), 0);
    assert!(matches!(store.try_load(), Err(GameError::Json { .. })));
}

#[test]
fn missing_field_defaults_to_zero() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), "{}").unwrap();
    assert_eq!(store.load(), 0);
}

#[test]
fn unwritable_path_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    let store = HighScoreStore::new(dir.path().join("no_such_dir").join("score.json"));
    store.save(10);
    assert_eq!(store.load(), 0);
    assert!(store.try_save(10).is_err());
}

// ── Sound bank ────────────────────────────────────────────────────────────────

#[test]
fn sound_bank_only_knows_present_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("explosion.wav"), b"").unwrap();
    fs::write(dir.path().join("shield.wav"), b"").unwrap();
    let mut bank = SoundBank::load(dir.path());

    assert!(bank.has(Cue::Explosion));
    assert!(bank.has(Cue::ShieldActivate));
    assert!(!bank.has(Cue::PlayerShoot));
    // Missing cues are silently skipped.
    bank.play_cue(Cue::PlayerShoot);
    bank.play_cue(Cue::Explosion);
}

#[test]
fn music_is_not_restarted_while_playing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("menu_music.mp3"), b"").unwrap();
    fs::write(dir.path().join("game_music.mp3"), b"").unwrap();
    let mut bank = SoundBank::load(dir.path());

    bank.play_music(Track::Menu);
    bank.play_music(Track::Game);
    assert_eq!(bank.music_playing(), Some(Track::Menu));

    bank.stop_music();
    assert_eq!(bank.music_playing(), None);
    bank.play_music(Track::Game);
    assert_eq!(bank.music_playing(), Some(Track::Game));
}

#[test]
fn absent_track_never_plays() {
    let dir = TempDir::new().unwrap();
    let mut bank = SoundBank::load(dir.path());
    bank.play_music(Track::Menu);
    assert_eq!(bank.music_playing(), None);
}

#[test]
fn cue_names_match_asset_files() {
    for cue in Cue::ALL {
        assert!(cue.file_name().ends_with(".wav"));
    }
    assert_eq!(Cue::ShieldActivate.file_name(), "shield.wav");
    assert_eq!(Cue::PowerUp.name(), "powerup");
}

// ── Difficulty presets ────────────────────────────────────────────────────────

#[test]
fn difficulty_names_round_trip() {
    for difficulty in Difficulty::ALL {
        assert_eq!(Difficulty::from_name(difficulty.name()), difficulty);
    }
    assert_eq!(Difficulty::from_name(" HARD "), Difficulty::Hard);
    assert_eq!(Difficulty::from_name("nightmare"), Difficulty::Normal);
}

#[test]
fn preferred_difficulty_comes_from_the_environment() {
    std::env::set_var(DIFFICULTY_ENV, "hard");
    assert_eq!(preferred_difficulty(), Difficulty::Hard);
    std::env::set_var(DIFFICULTY_ENV, "impossible");
    assert_eq!(preferred_difficulty(), Difficulty::Normal);
    std::env::remove_var(DIFFICULTY_ENV);
    assert_eq!(preferred_difficulty(), Difficulty::Normal);
}
