//! End-of-level boss: patrols the top of the screen and escalates its fire
//! pattern as it loses health.

use crate::config::GAME_AREA_WIDTH;
use crate::entities::{Damageable, Drawable, Projectile, Rgb, Sprite, SpriteKind};
use crate::geometry::{FrameCounter, Rect, Vec2};

pub const BOSS_HEALTH: i32 = 50;
const WIDTH: f32 = 180.0;
const HEIGHT: f32 = 120.0;
const PATROL_SPEED: f32 = 2.0;
/// Frames of travel before the patrol turns around on its own.
const PATROL_LEG: u32 = 120;
const EDGE_MARGIN: f32 = 90.0;
const MUZZLE_OFFSET: f32 = 60.0;
const SPREAD_OFFSET: f32 = 45.0;
const DAMAGE: i32 = 2;
const BULLET_SIZE: f32 = 1.5;

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub pos: Vec2,
    health: i32,
    max_health: i32,
    phase: u8,
    direction: f32,
    patrol_timer: u32,
    shot_timer: FrameCounter,
    rect: Rect,
}

impl Boss {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            health: BOSS_HEALTH,
            max_health: BOSS_HEALTH,
            phase: 1,
            direction: 1.0,
            patrol_timer: 0,
            shot_timer: FrameCounter::default(),
            rect: Rect::from_center(pos, WIDTH, HEIGHT),
        }
    }

    pub fn update(&mut self) {
        self.patrol_timer += 1;
        if self.patrol_timer < PATROL_LEG {
            self.pos.x += self.direction * PATROL_SPEED;
        } else {
            self.direction = -self.direction;
            self.patrol_timer = 0;
        }
        if self.pos.x < EDGE_MARGIN || self.pos.x > GAME_AREA_WIDTH - EDGE_MARGIN {
            self.direction = -self.direction;
        }

        self.rect = Rect::from_center(self.pos, WIDTH, HEIGHT);
        self.shot_timer.advance();
        self.advance_phase();
    }

    /// Phase 1: single shot. Phase 2: three-way spread. Phase 3: rapid single.
    pub fn shoot(&mut self) -> Vec<Projectile> {
        let cadence = match self.phase {
            1 => 30,
            2 => 25,
            _ => 10,
        };
        if !self.shot_timer.exceeds(cadence) {
            return Vec::new();
        }
        self.shot_timer.reset();

        let muzzle_y = self.pos.y + MUZZLE_OFFSET;
        let bullet = |dx: f32, vel: Vec2, color: Rgb| {
            Projectile::new(Vec2::new(self.pos.x + dx, muzzle_y), vel, DAMAGE, BULLET_SIZE, color)
        };
        match self.phase {
            1 => vec![bullet(0.0, Vec2::new(0.0, 5.0), Rgb::ORANGE)],
            2 => vec![
                bullet(-SPREAD_OFFSET, Vec2::new(-2.0, 4.0), Rgb::ORANGE),
                bullet(0.0, Vec2::new(0.0, 5.0), Rgb::ORANGE),
                bullet(SPREAD_OFFSET, Vec2::new(2.0, 4.0), Rgb::ORANGE),
            ],
            _ => vec![bullet(0.0, Vec2::new(0.0, 6.0), Rgb::RED)],
        }
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    fn advance_phase(&mut self) {
        // Below 20% and 50% of max health respectively.
        let target = if self.health * 5 < self.max_health {
            3
        } else if self.health * 2 < self.max_health {
            2
        } else {
            1
        };
        self.phase = self.phase.max(target);
    }
}

impl Damageable for Boss {
    fn take_damage(&mut self, damage: i32) -> bool {
        self.health -= damage;
        self.advance_phase();
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

impl Drawable for Boss {
    fn sprite(&self) -> Sprite {
        Sprite {
            kind: SpriteKind::Boss,
            pos: self.pos,
            variant: self.phase,
            color: Rgb::YELLOW,
            scale: 1.0,
        }
    }
}
