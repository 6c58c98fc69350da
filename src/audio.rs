//! Audio collaborator.
//!
//! The simulation names sounds symbolically through [`Cue`] and never cares
//! whether anything is actually heard. Missing assets turn into no-ops.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    PlayerShoot,
    EnemyShoot,
    Explosion,
    PowerUp,
    BossHit,
    MothershipSpawn,
    MothershipDestroy,
    ShieldActivate,
    Reload,
    NoAmmo,
    GameOver,
}

impl Cue {
    pub const ALL: [Cue; 11] = [
        Cue::PlayerShoot,
        Cue::EnemyShoot,
        Cue::Explosion,
        Cue::PowerUp,
        Cue::BossHit,
        Cue::MothershipSpawn,
        Cue::MothershipDestroy,
        Cue::ShieldActivate,
        Cue::Reload,
        Cue::NoAmmo,
        Cue::GameOver,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Cue::PlayerShoot => "player_shoot",
            Cue::EnemyShoot => "enemy_shoot",
            Cue::Explosion => "explosion",
            Cue::PowerUp => "powerup",
            Cue::BossHit => "boss_hit",
            Cue::MothershipSpawn => "mothership_spawn",
            Cue::MothershipDestroy => "mothership_destroy",
            Cue::ShieldActivate => "shield_activate",
            Cue::Reload => "reload",
            Cue::NoAmmo => "no_ammo",
            Cue::GameOver => "game_over",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Cue::ShieldActivate => "shield.wav",
            Cue::PlayerShoot => "player_shoot.wav",
            Cue::EnemyShoot => "enemy_shoot.wav",
            Cue::Explosion => "explosion.wav",
            Cue::PowerUp => "powerup.wav",
            Cue::BossHit => "boss_hit.wav",
            Cue::MothershipSpawn => "mothership_spawn.wav",
            Cue::MothershipDestroy => "mothership_destroy.wav",
            Cue::Reload => "reload.wav",
            Cue::NoAmmo => "no_ammo.wav",
            Cue::GameOver => "game_over.wav",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Track {
    Menu,
    Game,
}

impl Track {
    pub fn file_name(self) -> &'static str {
        match self {
            Track::Menu => "menu_music.mp3",
            Track::Game => "game_music.mp3",
        }
    }
}

/// Anything that can be told to play sounds.
pub trait AudioSink {
    fn play_cue(&mut self, cue: Cue);
    fn play_music(&mut self, track: Track);
    fn stop_music(&mut self);
}

/// Discards every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play_cue(&mut self, _cue: Cue) {}
    fn play_music(&mut self, _track: Track) {}
    fn stop_music(&mut self) {}
}

/// Sound assets found on disk, keyed by cue.
///
/// Playback itself belongs to whatever backend the host wires in; the bank
/// only decides which requests are worth forwarding and tracks whether music
/// is running so a track is never restarted while already playing.
#[derive(Debug, Default)]
pub struct SoundBank {
    dir: PathBuf,
    available: HashSet<Cue>,
    tracks: HashSet<Track>,
    playing: Option<Track>,
}

impl SoundBank {
    /// Scan `dir` for every cue and track. Never fails; absent files are
    /// reported once and then ignored.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let available: HashSet<Cue> = Cue::ALL
            .into_iter()
            .filter(|cue| dir.join(cue.file_name()).is_file())
            .collect();
        let tracks: HashSet<Track> = [Track::Menu, Track::Game]
            .into_iter()
            .filter(|track| dir.join(track.file_name()).is_file())
            .collect();

        let missing: Vec<&str> = Cue::ALL
            .iter()
            .filter(|cue| !available.contains(cue))
            .map(|cue| cue.name())
            .collect();
        if !missing.is_empty() {
            tracing::warn!(
                dir = %dir.display(),
                missing = ?missing,
                "sound assets missing, those cues will be silent"
            );
        }

        Self {
            dir,
            available,
            tracks,
            playing: None,
        }
    }

    pub fn has(&self, cue: Cue) -> bool {
        self.available.contains(&cue)
    }

    pub fn music_playing(&self) -> Option<Track> {
        self.playing
    }
}

impl AudioSink for SoundBank {
    fn play_cue(&mut self, cue: Cue) {
        if !self.has(cue) {
            return;
        }
        let path = self.dir.join(cue.file_name());
        tracing::trace!(cue = cue.name(), path = %path.display(), "cue");
    }

    fn play_music(&mut self, track: Track) {
        if self.playing.is_some() || !self.tracks.contains(&track) {
            return;
        }
        tracing::debug!(track = track.file_name(), "music start");
        self.playing = Some(track);
    }

    fn stop_music(&mut self) {
        if let Some(track) = self.playing.take() {
            tracing::debug!(track = track.file_name(), "music stop");
        }
    }
}
