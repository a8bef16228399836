use std::time::Instant;

use crate::assets::color::{Color, hsv};
use crate::compile::attrs::Attrs;
use crate::compile::compiler::CompileCtx;
use crate::component::{Component, NodeBase};
use crate::foundation::core::{Rgba8Premul, Size, Vec2};
use crate::foundation::error::BoardResult;
use crate::foundation::math::SplitMix64;
use crate::render::bitmap::Bitmap;

const BOUNCE: f64 = 0.8;
const REST_SPEED: f64 = 0.3;

#[derive(Clone, Copy, Debug)]
struct Particle {
    pos: Vec2,
    vel: Vec2,
    color: Rgba8Premul,
}

/// Particles falling under gravity, bouncing off the floor and walls, relaunched at rest.
#[derive(Debug)]
pub struct Gravity {
    base: NodeBase,
    seed: u64,
    count: u32,
    gravity: f64,
    color: Option<Color>,
    rng: SplitMix64,
    particles: Vec<Particle>,
}

impl Gravity {
    /// `count` particles with downward acceleration `gravity` px/frame².
    pub fn new(seed: u64, count: u32, gravity: f64, color: Option<Color>) -> Self {
        Self {
            base: NodeBase::default(),
            seed,
            count,
            gravity,
            color,
            rng: SplitMix64::new(seed),
            particles: Vec::new(),
        }
    }

    pub(crate) fn decode(
        node: roxmltree::Node<'_, '_>,
        _ctx: &CompileCtx<'_>,
    ) -> Box<dyn Component> {
        let a = Attrs::of(node);
        let mut v = Self::new(
            super::seed_attr(&a),
            a.uint_or("particles", 20),
            a.float_or("gravity", 0.2),
            a.color("color"),
        );
        v.base = a.node_base();
        Box::new(v)
    }

    fn launch(&mut self, pos: Vec2) -> Particle {
        let color = match self.color {
            Some(c) => c.premul(),
            None => hsv(self.rng.range_f64(0.0, 360.0), 1.0, 1.0),
        };
        Particle {
            pos,
            vel: Vec2::new(
                self.rng.range_f64(-1.0, 1.0),
                -self.rng.range_f64(1.0, 3.0),
            ),
            color,
        }
    }
}

impl Component for Gravity {
    fn kind(&self) -> &'static str {
        "gravity"
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
        self.particles.clear();
        for _ in 0..self.count {
            let pos = Vec2::new(
                self.rng.range_f64(0.0, f64::from(size.width)),
                self.rng.range_f64(0.0, f64::from(size.height)),
            );
            let p = self.launch(pos);
            self.particles.push(p);
        }
        self.base.arm(0, Instant::now());
        Ok(())
    }

    fn render(&mut self) -> BoardResult<Bitmap> {
        let size = self.base.size;
        let max_x = f64::from(size.width.saturating_sub(1));
        let floor = f64::from(size.height.saturating_sub(1));
        let mut out = Bitmap::new(size);

        for i in 0..self.particles.len() {
            let mut p = self.particles[i];
            p.vel.y += self.gravity;
            p.pos += p.vel;

            if p.pos.x < 0.0 || p.pos.x > max_x {
                p.pos.x = p.pos.x.clamp(0.0, max_x);
                p.vel.x = -p.vel.x;
            }
            if p.pos.y > floor {
                p.pos.y = floor;
                p.vel.y = -p.vel.y * BOUNCE;
                if p.vel.y.abs() < REST_SPEED {
                    p = self.launch(p.pos);
                }
            }
            self.particles[i] = p;
            out.set_pixel(p.pos.x.round() as i32, p.pos.y.round() as i32, p.color);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visuals/gravity.rs"]
mod tests;
