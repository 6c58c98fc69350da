//! Screen flow: menu → difficulty select → playing ⇄ paused → game over.
//!
//! Only the `Playing` screen advances the simulation; `Paused` keeps the
//! session around untouched so the shell can keep drawing the frozen frame.

use rand::Rng;

use crate::audio::{AudioSink, Track};
use crate::compute::{init_state, tick, GameStatus, Session};
use crate::config::Difficulty;
use crate::input::{Key, PlayerInput};
use crate::persistence::HighScoreStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    DifficultySelect,
    Playing,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub screen: Screen,
    /// Preset highlighted on the difficulty screen and used for new sessions.
    pub selected: Difficulty,
    pub session: Option<Session>,
    pub high_score: u32,
    store: HighScoreStore,
}

impl App {
    /// Start on the title screen with the stored high score.
    pub fn new(store: HighScoreStore) -> Self {
        let high_score = store.load();
        Self {
            screen: Screen::Menu,
            selected: Difficulty::Normal,
            session: None,
            high_score,
            store,
        }
    }

    pub fn store(&self) -> &HighScoreStore {
        &self.store
    }

    pub fn handle_key(&mut self, key: Key, audio: &mut impl AudioSink) -> Flow {
        if key == Key::Quit {
            return Flow::Quit;
        }

        match (self.screen, key) {
            (Screen::Menu, Key::Start) => self.screen = Screen::DifficultySelect,

            (Screen::DifficultySelect, Key::Easy) => self.selected = Difficulty::Easy,
            (Screen::DifficultySelect, Key::Normal) => self.selected = Difficulty::Normal,
            (Screen::DifficultySelect, Key::Hard) => self.selected = Difficulty::Hard,
            (Screen::DifficultySelect, Key::Confirm) => {
                audio.stop_music();
                audio.play_music(Track::Game);
                self.start_session();
            }
            (Screen::DifficultySelect, Key::Back) => self.screen = Screen::Menu,

            (Screen::Playing, Key::Pause) => self.screen = Screen::Paused,

            (Screen::Paused, Key::Pause) => self.screen = Screen::Playing,
            (Screen::Paused, Key::Menu) | (Screen::GameOver, Key::Menu) => {
                audio.stop_music();
                self.screen = Screen::Menu;
            }

            (Screen::GameOver, Key::Restart) => self.start_session(),

            _ => {}
        }
        Flow::Continue
    }

    /// One frame of whatever the current screen does.
    pub fn frame(&mut self, input: &PlayerInput, rng: &mut impl Rng, audio: &mut impl AudioSink) {
        match self.screen {
            Screen::Menu => audio.play_music(Track::Menu),
            Screen::Playing => {
                let Some(session) = self.session.as_mut() else {
                    self.screen = Screen::Menu;
                    return;
                };
                tick(session, input, rng, audio);
                if session.status == GameStatus::GameOver {
                    self.finish_session();
                }
            }
            Screen::DifficultySelect | Screen::Paused | Screen::GameOver => {}
        }
    }

    fn start_session(&mut self) {
        self.session = Some(init_state(self.selected, self.high_score));
        self.screen = Screen::Playing;
    }

    fn finish_session(&mut self) {
        self.screen = Screen::GameOver;
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if session.score > self.high_score {
            self.high_score = session.score;
            self.store.save(self.high_score);
            tracing::info!(high_score = self.high_score, "new high score saved");
        }
    }
}
