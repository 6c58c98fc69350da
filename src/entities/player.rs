//! The player ship: movement, the ammo/reload cycle, and power-up timers.
//!
//! Reloading, shield, speed boost and triple shot are independent timers,
//! so any combination of them can be active at once.

use crate::audio::{AudioSink, Cue};
use crate::config::{
    Difficulty, AMMO_REFILL, GAME_AREA_WIDTH, HEAL_AMOUNT, NO_AMMO_FLASH_FRAMES,
    PLAYER_EDGE_MARGIN, PLAYER_SHOT_COOLDOWN, POWER_UP_DURATION, RELOAD_FRAMES, SCREEN_HEIGHT,
};
use crate::entities::{Damageable, Drawable, PowerUpKind, Projectile, Rgb, Sprite, SpriteKind};
use crate::geometry::{Countdown, FrameCounter, Rect, Vec2};
use crate::input::PlayerInput;

const SIZE: f32 = 60.0;
const MUZZLE_OFFSET: f32 = 30.0;
const TRIPLE_SPREAD: f32 = 22.0;
const BULLET_SPEED: f32 = 10.0;

/// Status bits packed into the sprite variant.
pub const VARIANT_SHIELD: u8 = 1 << 0;
pub const VARIANT_RELOADING: u8 = 1 << 1;
pub const VARIANT_NO_AMMO: u8 = 1 << 2;

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub ammo: u32,
    health: i32,
    max_health: i32,
    speed: f32,
    max_ammo: u32,
    reload: Countdown,
    no_ammo_flash: Countdown,
    shot_timer: FrameCounter,
    triple_shot: Countdown,
    shield: Countdown,
    speed_boost: Countdown,
    rect: Rect,
}

impl Player {
    pub fn new(pos: Vec2, difficulty: Difficulty) -> Self {
        let profile = difficulty.player_profile();
        Self {
            pos,
            ammo: profile.ammo,
            health: profile.health,
            max_health: profile.health,
            speed: profile.speed,
            max_ammo: profile.ammo,
            reload: Countdown::idle(),
            no_ammo_flash: Countdown::idle(),
            shot_timer: FrameCounter::default(),
            triple_shot: Countdown::idle(),
            shield: Countdown::idle(),
            speed_boost: Countdown::idle(),
            rect: Rect::from_center(pos, SIZE, SIZE),
        }
    }

    /// Move, then advance every per-frame timer.
    pub fn update(&mut self, input: &PlayerInput) {
        let speed = if self.speed_boost.is_active() {
            self.speed * 2.0
        } else {
            self.speed
        };

        if input.left && self.pos.x > PLAYER_EDGE_MARGIN {
            self.pos.x -= speed;
        }
        if input.right && self.pos.x < GAME_AREA_WIDTH - PLAYER_EDGE_MARGIN {
            self.pos.x += speed;
        }
        if input.up && self.pos.y > PLAYER_EDGE_MARGIN {
            self.pos.y -= speed;
        }
        if input.down && self.pos.y < SCREEN_HEIGHT - PLAYER_EDGE_MARGIN {
            self.pos.y += speed;
        }

        self.rect = Rect::from_center(self.pos, SIZE, SIZE);
        self.shot_timer.advance();

        if self.reload.tick() {
            self.ammo = self.max_ammo;
        }
        self.no_ammo_flash.tick();
        self.triple_shot.tick();
        self.shield.tick();
        self.speed_boost.tick();
    }

    /// Try to fire. Rate limited by the shot cooldown; an attempt that gets
    /// past the cooldown restarts it even when nothing comes out.
    pub fn shoot(&mut self, audio: &mut impl AudioSink) -> Vec<Projectile> {
        if !self.shot_timer.exceeds(PLAYER_SHOT_COOLDOWN) {
            return Vec::new();
        }
        self.shot_timer.reset();

        if self.ammo == 0 && !self.is_reloading() {
            self.no_ammo_flash.start(NO_AMMO_FLASH_FRAMES);
            audio.play_cue(Cue::NoAmmo);
            self.begin_reload(audio);
            return Vec::new();
        }
        if self.is_reloading() {
            return Vec::new();
        }

        let muzzle_y = self.pos.y - MUZZLE_OFFSET;
        let bullets = if self.triple_shot.is_active() && self.ammo >= 3 {
            self.ammo -= 3;
            [-TRIPLE_SPREAD, 0.0, TRIPLE_SPREAD]
                .into_iter()
                .map(|dx| {
                    Projectile::new(
                        Vec2::new(self.pos.x + dx, muzzle_y),
                        Vec2::new(0.0, -BULLET_SPEED),
                        2,
                        1.3,
                        Rgb::CYAN,
                    )
                })
                .collect()
        } else if self.ammo >= 1 {
            self.ammo -= 1;
            vec![Projectile::new(
                Vec2::new(self.pos.x, muzzle_y),
                Vec2::new(0.0, -BULLET_SPEED),
                1,
                1.2,
                Rgb::WHITE,
            )]
        } else {
            Vec::new()
        };

        if self.ammo == 0 {
            self.begin_reload(audio);
        }
        audio.play_cue(Cue::PlayerShoot);
        bullets
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Instant kinds apply now; timed kinds restart their 600-frame clock.
    pub fn apply_power_up(&mut self, kind: PowerUpKind, audio: &mut impl AudioSink) {
        match kind {
            PowerUpKind::Heal => self.heal(HEAL_AMOUNT),
            PowerUpKind::Ammo => {
                self.ammo = (self.ammo + AMMO_REFILL).min(self.max_ammo);
                self.reload.clear();
            }
            PowerUpKind::Shield => {
                self.shield.start(POWER_UP_DURATION);
                audio.play_cue(Cue::ShieldActivate);
            }
            PowerUpKind::TripleShot => self.triple_shot.start(POWER_UP_DURATION),
            PowerUpKind::Speed => self.speed_boost.start(POWER_UP_DURATION),
        }
        audio.play_cue(Cue::PowerUp);
    }

    fn begin_reload(&mut self, audio: &mut impl AudioSink) {
        self.reload.start(RELOAD_FRAMES);
        audio.play_cue(Cue::Reload);
    }

    // ── Read-only views ──────────────────────────────────────────────────────

    pub fn max_ammo(&self) -> u32 {
        self.max_ammo
    }

    pub fn is_reloading(&self) -> bool {
        self.reload.is_active()
    }

    /// Frames left before the magazine is full again.
    pub fn reload_remaining(&self) -> u32 {
        self.reload.remaining()
    }

    pub fn shows_no_ammo(&self) -> bool {
        self.no_ammo_flash.is_active()
    }

    pub fn is_shielded(&self) -> bool {
        self.shield.is_active()
    }

    pub fn has_triple_shot(&self) -> bool {
        self.triple_shot.is_active()
    }

    pub fn has_speed_boost(&self) -> bool {
        self.speed_boost.is_active()
    }

    pub fn power_up_remaining(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::TripleShot => self.triple_shot.remaining(),
            PowerUpKind::Shield => self.shield.remaining(),
            PowerUpKind::Speed => self.speed_boost.remaining(),
            PowerUpKind::Heal | PowerUpKind::Ammo => 0,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

impl Damageable for Player {
    /// An active shield swallows the hit entirely.
    fn take_damage(&mut self, damage: i32) -> bool {
        if self.shield.is_active() {
            return false;
        }
        self.health -= damage;
        self.health <= 0
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn max_health(&self) -> i32 {
        self.max_health
    }

    fn bounds(&self) -> Rect {
        self.rect
    }
}

impl Drawable for Player {
    fn sprite(&self) -> Sprite {
        let mut variant = 0;
        if self.is_shielded() {
            variant |= VARIANT_SHIELD;
        }
        if self.is_reloading() {
            variant |= VARIANT_RELOADING;
        }
        if self.shows_no_ammo() {
            variant |= VARIANT_NO_AMMO;
        }
        Sprite {
            kind: SpriteKind::Player,
            pos: self.pos,
            variant,
            color: if self.is_shielded() { Rgb::GREEN } else { Rgb::BLUE },
            scale: 1.0,
        }
    }
}
