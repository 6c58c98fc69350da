//! Shared test harness: a seeded RNG and an audio sink that remembers
//! every request so tests can assert on what would have been heard.
#![allow(dead_code)]

use galactic_defense::audio::{AudioSink, Cue, Track};
use galactic_defense::input::PlayerInput;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

pub fn idle() -> PlayerInput {
    PlayerInput::default()
}

pub fn firing() -> PlayerInput {
    PlayerInput {
        shoot: true,
        ..PlayerInput::default()
    }
}

#[derive(Debug, Default)]
pub struct CueLog {
    pub cues: Vec<Cue>,
    pub tracks: Vec<Track>,
    pub stops: usize,
}

impl CueLog {
    pub fn count(&self, cue: Cue) -> usize {
        self.cues.iter().filter(|&&c| c == cue).count()
    }

    pub fn heard(&self, cue: Cue) -> bool {
        self.count(cue) > 0
    }
}

impl AudioSink for CueLog {
    fn play_cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    fn play_music(&mut self, track: Track) {
        self.tracks.push(track);
    }

    fn stop_music(&mut self) {
        self.stops += 1;
    }
}
