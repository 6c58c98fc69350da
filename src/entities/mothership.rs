//! The alien mothership: a one-off encounter triggered by score.

use crate::config::GAME_AREA_WIDTH;
use crate::entities::{Damageable, Drawable, Projectile, Rgb, Sprite, SpriteKind};
use crate::geometry::{FrameCounter, Rect, Vec2};

pub const MOTHERSHIP_HEALTH: i32 = 30;
const PHASE_TWO_HEALTH: i32 = 20;
const PHASE_THREE_HEALTH: i32 = 10;
const WIDTH: f32 = 160.0;
const HEIGHT: f32 = 80.0;
const PATROL_SPEED: f32 = 2.0;
const EDGE_MARGIN: f32 = 100.0;
const MUZZLE_OFFSET: f32 = 40.0;
const SPREAD_OFFSET: f32 = 30.0;
const FAN_SPACING: f32 = 25.0;
const FAN_ANGLE_STEP: f32 = 0.4;
const DAMAGE: i32 = 2;
const BULLET_SIZE: f32 = 1.5;

#[derive(Clone, Debug, PartialEq)]
pub struct Mothership {
    pub pos: Vec2,
    health: i32,
    phase: u8,
    direction: f32,
    shot_timer: FrameCounter,
    rect: Rect,
}

impl Mothership {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            health: MOTHERSHIP_HEALTH,
            phase: 1,
            direction: 1.0,
            shot_timer: FrameCounter::default(),
            rect: Rect::from_center(pos, WIDTH, HEIGHT),
        }
    }

    pub fn update(&mut self) {
        self.pos.x += self.direction * PATROL_SPEED;

        let (min_x, max_x) = (EDGE_MARGIN, GAME_AREA_WIDTH - EDGE_MARGIN);
        if self.pos.x <= min_x || self.pos.x >= max_x {
            self.direction = -self.direction;
            self.pos.x = self.pos.x.clamp(min_x, max_x);
        }

        self.rect = Rect::from_center(self.pos, WIDTH, HEIGHT);
        self.shot_timer.advance();
        self.advance_phase();
    }

    /// Phase 1: single shot. Phase 2: three-way spread. Phase 3: five-way fan.
    pub fn shoot(&mut self) -> Vec<Projectile> {
        let cadence = match self.phase {
            1 => 40,
            2 => 35,
            _ => 25,
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
            1 => vec![bullet(0.0, Vec2::new(0.0, 4.0), Rgb::GREEN)],
            2 => vec![
                bullet(-SPREAD_OFFSET, Vec2::new(-1.0, 4.0), Rgb::GREEN),
                bullet(0.0, Vec2::new(0.0, 5.0), Rgb::GREEN),
                bullet(SPREAD_OFFSET, Vec2::new(1.0, 4.0), Rgb::GREEN),
            ],
            _ => (-2i32..=2)
                .map(|i| {
                    let angle = i as f32 * FAN_ANGLE_STEP;
                    let vel = Vec2::new(angle.sin() * 4.0, 5.0 + i.abs() as f32);
                    bullet(i as f32 * FAN_SPACING, vel, Rgb::MINT)
                })
                .collect(),
        }
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    fn advance_phase(&mut self) {
        let target = if self.health <= PHASE_THREE_HEALTH {
            3
        } else if self.health <= PHASE_TWO_HEALTH {
            2
        } else {
            1
        };
        self.phase = self.phase.max(target);
    }
}

impl Damageable for Mothership {
    fn take_damage(&mut self, damage: i32) -> bool {
        self.health -= damage;
        self.advance_phase();
        self.health <= 0
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn max_health(&self) -> i32 {
        MOTHERSHIP_HEALTH
    }

    fn bounds(&self) -> Rect {
        self.rect
    }
}

impl Drawable for Mothership {
    fn sprite(&self) -> Sprite {
        Sprite {
            kind: SpriteKind::Mothership,
            pos: self.pos,
            variant: self.phase,
            color: Rgb::GREEN,
            scale: 1.0,
        }
    }
}
