use crate::config::{GAME_AREA_WIDTH, SCREEN_HEIGHT};
use crate::entities::{Drawable, Rgb, Sprite, SpriteKind};
use crate::geometry::{Rect, Vec2};

/// A bullet. Owner-agnostic: which list it sits in decides who it can hit.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: i32,
    pub size: f32,
    pub color: Rgb,
    rect: Rect,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, damage: i32, size: f32, color: Rgb) -> Self {
        let mut projectile = Self {
            pos,
            vel,
            damage,
            size,
            color,
            rect: Rect::default(),
        };
        projectile.refresh_rect();
        projectile
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.refresh_rect();
    }

    /// Player bullets leave through the top or sides.
    pub fn left_top(&self) -> bool {
        self.pos.y < 0.0 || self.outside_sides()
    }

    /// Enemy bullets leave through the bottom or sides.
    pub fn left_bottom(&self) -> bool {
        self.pos.y > SCREEN_HEIGHT || self.outside_sides()
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    fn outside_sides(&self) -> bool {
        self.pos.x < 0.0 || self.pos.x > GAME_AREA_WIDTH
    }

    fn refresh_rect(&mut self) {
        let w = (6.0 * self.size).trunc();
        let h = (12.0 * self.size).trunc();
        self.rect = Rect::from_center(self.pos, w, h);
    }
}

impl Drawable for Projectile {
    fn sprite(&self) -> Sprite {
        Sprite {
            kind: SpriteKind::Projectile,
            pos: self.pos,
            variant: u8::from(self.vel.y > 0.0),
            color: self.color,
            scale: self.size,
        }
    }
}
