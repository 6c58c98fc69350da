//! Input collaborator: what the shell hands the core each frame.

/// Keys held during the current frame, sampled once by the outer loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub shoot: bool,
}

/// Discrete presses that drive the screen state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Space on the title screen.
    Start,
    Easy,
    Normal,
    Hard,
    Confirm,
    Back,
    Pause,
    Menu,
    Restart,
    Quit,
}
