use crate::config::{GAME_AREA_WIDTH, SCREEN_HEIGHT};
use crate::entities::{Drawable, PowerUpKind, Sprite, SpriteKind};
use crate::geometry::{Rect, Vec2};

const FALL_SPEED: f32 = 2.0;
const BOB_STEP: f32 = 0.2;
const BOB_AMPLITUDE: f32 = 5.0;
const SIZE: f32 = 45.0;

/// A falling pickup that bobs up and down as it drifts.
#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    bob: f32,
    rect: Rect,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            kind,
            bob: 0.0,
            rect: Rect::from_center(pos, SIZE, SIZE),
        }
    }

    pub fn update(&mut self) {
        self.pos.y += FALL_SPEED;
        self.bob += BOB_STEP;
        let center = Vec2::new(self.pos.x, self.pos.y + self.bob.sin() * BOB_AMPLITUDE);
        self.rect = Rect::from_center(center, SIZE, SIZE);
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.y > SCREEN_HEIGHT || self.pos.x < 0.0 || self.pos.x > GAME_AREA_WIDTH
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }
}

impl Drawable for PowerUp {
    fn sprite(&self) -> Sprite {
        Sprite {
            kind: SpriteKind::PowerUp(self.kind),
            pos: self.rect.center(),
            variant: 0,
            color: self.kind.color(),
            scale: 1.0,
        }
    }
}
