use crate::config::{GAME_AREA_WIDTH, SCREEN_HEIGHT};
use crate::entities::{Damageable, Drawable, EnemyKind, Projectile, Rgb, Sprite, SpriteKind};
use crate::geometry::{FrameCounter, Rect, Vec2};

const SIZE: f32 = 60.0;
const MUZZLE_OFFSET: f32 = 30.0;
const BULLET_SPEED: f32 = 4.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub kind: EnemyKind,
    health: i32,
    max_health: i32,
    speed: f32,
    shot_timer: FrameCounter,
    rect: Rect,
}

/// Shot cadence in frames for a difficulty multiplier.
pub fn shot_interval(difficulty_mult: f64) -> u32 {
    ((60.0 / difficulty_mult) as i64).max(30) as u32
}

impl Enemy {
    pub fn new(pos: Vec2, kind: EnemyKind) -> Self {
        let health = match kind {
            EnemyKind::Basic => 1,
            EnemyKind::Heavy => 3,
            EnemyKind::Fast => 2,
        };
        let speed = match kind {
            EnemyKind::Fast => 2.0,
            EnemyKind::Basic | EnemyKind::Heavy => 1.0,
        };
        Self {
            pos,
            kind,
            health,
            max_health: health,
            speed,
            shot_timer: FrameCounter::default(),
            rect: Rect::from_center(pos, SIZE, SIZE),
        }
    }

    /// Same archetype with a custom health pool.
    pub fn with_health(pos: Vec2, kind: EnemyKind, health: i32) -> Self {
        Self {
            health,
            max_health: health,
            ..Self::new(pos, kind)
        }
    }

    pub fn update(&mut self, player_x: f32, difficulty_mult: f64) {
        let speed = self.speed * difficulty_mult as f32;

        match self.kind {
            EnemyKind::Basic => {
                self.pos.y += speed;
            }
            EnemyKind::Heavy => {
                self.pos.y += speed * 0.8;
                self.pos.x += (self.pos.y * 0.02).sin() * 2.0;
            }
            EnemyKind::Fast => {
                if self.pos.x < player_x {
                    self.pos.x += speed * 0.5;
                } else if self.pos.x > player_x {
                    self.pos.x -= speed * 0.5;
                }
                self.pos.y += speed * 1.5;
            }
        }

        self.rect = Rect::from_center(self.pos, SIZE, SIZE);
        self.shot_timer.advance();
    }

    /// Fire one downward bullet if the shot timer has run long enough.
    pub fn shoot(&mut self, difficulty_mult: f64) -> Option<Projectile> {
        if !self.shot_timer.exceeds(shot_interval(difficulty_mult)) {
            return None;
        }
        self.shot_timer.reset();
        Some(Projectile::new(
            Vec2::new(self.pos.x, self.pos.y + MUZZLE_OFFSET),
            Vec2::new(0.0, BULLET_SPEED * difficulty_mult as f32),
            1,
            1.2,
            Rgb::RED,
        ))
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.y > SCREEN_HEIGHT || self.pos.x < 0.0 || self.pos.x > GAME_AREA_WIDTH
    }

    pub fn shot_timer(&self) -> u32 {
        self.shot_timer.frames()
    }
}

impl Damageable for Enemy {
    fn take_damage(&mut self, damage: i32) -> bool {
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

impl Drawable for Enemy {
    fn sprite(&self) -> Sprite {
        let color = match self.kind {
            EnemyKind::Basic => Rgb::RED,
            EnemyKind::Heavy => Rgb::ORANGE,
            EnemyKind::Fast => Rgb::PURPLE,
        };
        Sprite {
            kind: SpriteKind::Enemy(self.kind),
            pos: self.pos,
            variant: u8::from(self.health < self.max_health),
            color,
            scale: 1.0,
        }
    }
}
