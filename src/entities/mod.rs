//! Game entities, their type tags, and the contracts they share.
//!
//! Each entity owns its position and recomputes its bounding box from it on
//! every update. Spawning, pruning and collision live in `compute`.

pub mod boss;
pub mod effects;
pub mod enemy;
pub mod mothership;
pub mod player;
pub mod power_up;
pub mod projectile;

pub use boss::Boss;
pub use effects::{Notification, Particle};
pub use enemy::Enemy;
pub use mothership::Mothership;
pub use player::Player;
pub use power_up::PowerUp;
pub use projectile::Projectile;

use crate::geometry::{Rect, Vec2};

// ── Type tags ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Straight descent.
    Basic,
    /// Slow descent with a sinusoidal sway.
    Heavy,
    /// Fast descent that steers toward the player.
    Fast,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Three bullets per shot for `POWER_UP_DURATION` frames.
    TripleShot,
    /// Absorbs all damage for `POWER_UP_DURATION` frames.
    Shield,
    /// Restores one health point.
    Heal,
    /// Doubles movement speed for `POWER_UP_DURATION` frames.
    Speed,
    /// Adds `AMMO_REFILL` rounds and cancels a reload.
    Ammo,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::TripleShot,
        PowerUpKind::Shield,
        PowerUpKind::Heal,
        PowerUpKind::Speed,
        PowerUpKind::Ammo,
    ];

    /// Drops awarded for destroying the mothership.
    pub const REWARDS: [PowerUpKind; 3] =
        [PowerUpKind::TripleShot, PowerUpKind::Shield, PowerUpKind::Ammo];

    pub fn color(self) -> Rgb {
        match self {
            PowerUpKind::TripleShot => Rgb::CYAN,
            PowerUpKind::Shield => Rgb::GREEN,
            PowerUpKind::Heal => Rgb::RED,
            PowerUpKind::Speed => Rgb::YELLOW,
            PowerUpKind::Ammo => Rgb::ORANGE,
        }
    }
}

/// Banner text that floats over the play area for a couple of seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    PowerUp(PowerUpKind),
    MothershipSpawned,
    MothershipDestroyed,
}

impl NotificationKind {
    pub fn message(self) -> &'static str {
        match self {
            NotificationKind::PowerUp(PowerUpKind::TripleShot) => "TRIPLE SHOT!",
            NotificationKind::PowerUp(PowerUpKind::Shield) => "SHIELD UP!",
            NotificationKind::PowerUp(PowerUpKind::Heal) => "HEALTH BOOST!",
            NotificationKind::PowerUp(PowerUpKind::Speed) => "SPEED BOOST!",
            NotificationKind::PowerUp(PowerUpKind::Ammo) => "AMMO REFILL!",
            NotificationKind::MothershipSpawned => "MOTHERSHIP INCOMING!",
            NotificationKind::MothershipDestroyed => "MOTHERSHIP DESTROYED!",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            NotificationKind::PowerUp(kind) => kind.color(),
            NotificationKind::MothershipSpawned => Rgb::GREEN,
            NotificationKind::MothershipDestroyed => Rgb::YELLOW,
        }
    }
}

// ── Colours ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const BLUE: Rgb = Rgb(0, 100, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const ORANGE: Rgb = Rgb(255, 165, 0);
    pub const CYAN: Rgb = Rgb(0, 255, 255);
    pub const PURPLE: Rgb = Rgb(160, 32, 240);
    pub const MINT: Rgb = Rgb(0, 255, 100);
}

// ── Render contract ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpriteKind {
    Player,
    Enemy(EnemyKind),
    Boss,
    Mothership,
    Projectile,
    PowerUp(PowerUpKind),
    Particle,
    Notification(NotificationKind),
}

/// One draw request. `variant` carries a phase or status the renderer may
/// pick a different shape for; `scale` is a size factor around 1.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub pos: Vec2,
    pub variant: u8,
    pub color: Rgb,
    pub scale: f32,
}

pub trait Drawable {
    fn sprite(&self) -> Sprite;
}

// ── Health ───────────────────────────────────────────────────────────────────

pub trait Damageable {
    /// Subtract `damage` from health. Returns `true` once health is at or
    /// below zero.
    fn take_damage(&mut self, damage: i32) -> bool;

    fn health(&self) -> i32;

    fn max_health(&self) -> i32;

    fn bounds(&self) -> Rect;
}
