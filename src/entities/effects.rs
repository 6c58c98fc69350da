//! Cosmetic feedback. Nothing here affects gameplay.

use std::f32::consts::TAU;
use std::ops::Range;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::{Drawable, NotificationKind, Rgb, Sprite, SpriteKind};
use crate::geometry::{Countdown, Vec2};

pub const PARTICLE_LIFE: u32 = 30;
pub const NOTIFICATION_LIFE: u32 = 120;

// ── Particles ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgb,
    life: Countdown,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, color: Rgb) -> Self {
        let mut life = Countdown::idle();
        life.start(PARTICLE_LIFE);
        Self { pos, vel, color, life }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life.tick();
    }

    pub fn is_alive(&self) -> bool {
        self.life.is_active()
    }

    /// Remaining life as a 0..=1 fraction, for fading.
    pub fn fade(&self) -> f32 {
        self.life.remaining() as f32 / PARTICLE_LIFE as f32
    }
}

impl Drawable for Particle {
    fn sprite(&self) -> Sprite {
        Sprite {
            kind: SpriteKind::Particle,
            pos: self.pos,
            variant: 0,
            color: self.color,
            scale: self.fade(),
        }
    }
}

/// `count` particles flying out of `origin` in random directions, each
/// coloured from `palette`.
pub fn burst(
    origin: Vec2,
    palette: &[Rgb],
    count: usize,
    speed: Range<f32>,
    rng: &mut impl Rng,
) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let angle = rng.gen_range(0.0..TAU);
            let magnitude = rng.gen_range(speed.clone());
            let color = palette.choose(rng).copied().unwrap_or(Rgb::WHITE);
            Particle::new(origin, Vec2::from_angle(angle, magnitude), color)
        })
        .collect()
}

// ── Notifications ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub pos: Vec2,
    pub scale: f32,
    life: Countdown,
}

impl Notification {
    pub fn new(kind: NotificationKind, pos: Vec2) -> Self {
        let mut life = Countdown::idle();
        life.start(NOTIFICATION_LIFE);
        Self {
            kind,
            pos,
            scale: 0.1,
            life,
        }
    }

    /// Grow in, pulse, then shrink away while drifting upward.
    pub fn update(&mut self) {
        self.life.tick();
        let life = self.life.remaining();
        if life > 90 {
            self.scale = (self.scale + 0.1).min(1.5);
        } else if life > 30 {
            self.scale = 1.2 + 0.2 * (life as f32 * 0.3).sin();
        } else {
            self.scale = (self.scale - 0.05).max(0.0);
        }
        self.pos.y -= 1.0;
    }

    pub fn is_alive(&self) -> bool {
        self.life.is_active()
    }
}

impl Drawable for Notification {
    fn sprite(&self) -> Sprite {
        Sprite {
            kind: SpriteKind::Notification(self.kind),
            pos: self.pos,
            variant: 0,
            color: self.kind.color(),
            scale: self.scale,
        }
    }
}
