use std::time::Instant;

use embedded_graphics::{
    Drawable as _,
    prelude::{Point, Primitive as _},
    primitives::{Line, PrimitiveStyle},
};

use crate::assets::color::Color;
use crate::compile::attrs::Attrs;
use crate::compile::compiler::CompileCtx;
use crate::component::{Component, NodeBase};
use crate::foundation::core::{Pos, Size, Vec2};
use crate::foundation::error::BoardResult;
use crate::foundation::math::SplitMix64;
use crate::render::bitmap::Bitmap;

const PADDLE_SPEED: f64 = 1.0;

/// Two self-playing paddles and a ball.
#[derive(Debug)]
pub struct Pong {
    base: NodeBase,
    seed: u64,
    ball_color: Color,
    paddle_color: Color,
    rng: SplitMix64,
    ball: Vec2,
    vel: Vec2,
    paddles: [f64; 2],
}

impl Pong {
    /// Game with the given colors.
    pub fn new(seed: u64, ball_color: Color, paddle_color: Color) -> Self {
        Self {
            base: NodeBase::default(),
            seed,
            ball_color,
            paddle_color,
            rng: SplitMix64::new(seed),
            ball: Vec2::ZERO,
            vel: Vec2::ZERO,
            paddles: [0.0; 2],
        }
    }

    pub(crate) fn decode(
        node: roxmltree::Node<'_, '_>,
        _ctx: &CompileCtx<'_>,
    ) -> Box<dyn Component> {
        let a = Attrs::of(node);
        let mut v = Self::new(
            super::seed_attr(&a),
            a.color_or("ball-color", Color::WHITE),
            a.color_or("paddle-color", Color::WHITE),
        );
        v.base = a.node_base();
        Box::new(v)
    }

    fn paddle_len(&self) -> f64 {
        f64::from((self.base.size.height / 4).max(2))
    }

    fn serve(&mut self) {
        let size = self.base.size;
        self.ball = Vec2::new(f64::from(size.width) / 2.0, f64::from(size.height) / 2.0);
        let dir = if self.rng.below(2) == 0 { -1.0 } else { 1.0 };
        self.vel = Vec2::new(dir, self.rng.range_f64(-0.8, 0.8));
    }
}

impl Component for Pong {
    fn kind(&self) -> &'static str {
        "pong"
    }

    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn init(&mut self, parent: Size) -> BoardResult<()> {
        let size = self.base.resolve(parent, parent);
        self.rng = SplitMix64::new(self.seed);
        let mid = (f64::from(size.height) - self.paddle_len()) / 2.0;
        self.paddles = [mid; 2];
        self.serve();
        self.base.arm(0, Instant::now());
        Ok(())
    }

    fn render(&mut self) -> BoardResult<Bitmap> {
        let size = self.base.size;
        let w = f64::from(size.width);
        let h = f64::from(size.height);
        let len = self.paddle_len();

        // Paddles chase the ball at limited speed.
        for p in &mut self.paddles {
            let target = (self.ball.y - len / 2.0).clamp(0.0, (h - len).max(0.0));
            *p += (target - *p).clamp(-PADDLE_SPEED, PADDLE_SPEED);
        }

        self.ball += self.vel;
        if self.ball.y < 0.0 || self.ball.y > h - 1.0 {
            self.ball.y = self.ball.y.clamp(0.0, (h - 1.0).max(0.0));
            self.vel.y = -self.vel.y;
        }
        let (left, right) = (1.0, w - 2.0);
        if self.ball.x <= left || self.ball.x >= right {
            let side = usize::from(self.ball.x >= right);
            let top = self.paddles[side];
            if (top - 1.0..=top + len).contains(&self.ball.y) {
                self.ball.x = self.ball.x.clamp(left, right);
                self.vel.x = -self.vel.x;
            } else if self.ball.x < 0.0 || self.ball.x > w - 1.0 {
                self.serve();
            }
        }

        let mut out = Bitmap::new(size);
        let paddle = super::to_rgb888(self.paddle_color.premul());
        for (side, top) in self.paddles.iter().enumerate() {
            let x = if side == 0 { 0 } else { size.width as i32 - 1 };
            let y0 = top.round() as i32;
            let _ = Line::new(Point::new(x, y0), Point::new(x, y0 + len as i32 - 1))
                .into_styled(PrimitiveStyle::with_stroke(paddle, 1))
                .draw(&mut out);
        }
        out.fill_rect(
            Pos::new(self.ball.x.round() as i32, self.ball.y.round() as i32),
            Size::new(1, 1),
            self.ball_color.premul(),
        );
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visuals/pong.rs"]
mod tests;
