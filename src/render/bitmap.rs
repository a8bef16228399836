use anyhow::Context as _;
use embedded_graphics::{
    Pixel,
    pixelcolor::{Rgb888, RgbColor},
    prelude::{DrawTarget, OriginDimensions, Size as EgSize},
};

use crate::foundation::core::{Pos, Rgba8Premul, Size};
use crate::foundation::error::{BoardError, BoardResult};
use crate::foundation::math::mul_div255_u8;

/// A rendered surface as premultiplied RGBA8 pixels.
///
/// `data` is tightly packed and row-major; `data.len() == width * height * 4` always holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Allocate a fully transparent bitmap.
    pub fn new(size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            data: vec![0; byte_len(size.width, size.height)],
        }
    }

    /// Allocate a bitmap filled with one color.
    pub fn filled(size: Size, color: Rgba8Premul) -> Self {
        let mut out = Self::new(size);
        out.fill(color);
        out
    }

    /// Wrap already-premultiplied bytes.
    pub fn from_premul_bytes(width: u32, height: u32, data: Vec<u8>) -> BoardResult<Self> {
        if data.len() != byte_len(width, height) {
            return Err(BoardError::render(format!(
                "bitmap byte len mismatch: {} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Convert a straight-alpha image into a premultiplied bitmap.
    pub fn from_rgba_image(img: &image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.as_raw().clone();
        premultiply_rgba8_in_place(&mut data);
        Self {
            width,
            height,
            data,
        }
    }

    /// Convert back to a straight-alpha image (for PNG output).
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        image::RgbaImage::from_raw(self.width, self.height, data)
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }

    /// Write the bitmap as a PNG file.
    pub fn save_png(&self, path: &std::path::Path) -> BoardResult<()> {
        self.to_rgba_image()
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Extent as a [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Raw premultiplied bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read one pixel; out-of-bounds reads are transparent.
    pub fn pixel(&self, x: i32, y: i32) -> Rgba8Premul {
        match self.index(x, y) {
            Some(i) => Rgba8Premul {
                r: self.data[i],
                g: self.data[i + 1],
                b: self.data[i + 2],
                a: self.data[i + 3],
            },
            None => Rgba8Premul::transparent(),
        }
    }

    /// Replace one pixel; out-of-bounds writes are dropped.
    pub fn set_pixel(&mut self, x: i32, y: i32, c: Rgba8Premul) {
        if let Some(i) = self.index(x, y) {
            self.data[i..i + 4].copy_from_slice(&c.to_array());
        }
    }

    /// Source-over one pixel.
    pub fn blend_pixel(&mut self, x: i32, y: i32, c: Rgba8Premul) {
        if let Some(i) = self.index(x, y) {
            let dst = [
                self.data[i],
                self.data[i + 1],
                self.data[i + 2],
                self.data[i + 3],
            ];
            self.data[i..i + 4].copy_from_slice(&over(dst, c.to_array()));
        }
    }

    /// Fill every pixel with `c`.
    pub fn fill(&mut self, c: Rgba8Premul) {
        let px = c.to_array();
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Reset to fully transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Fill an axis-aligned rectangle, clipped to the bitmap.
    pub fn fill_rect(&mut self, at: Pos, size: Size, c: Rgba8Premul) {
        let Some((x0, y0, x1, y1)) = self.clip(at, size) else {
            return;
        };
        let px = c.to_array();
        for y in y0..y1 {
            for x in x0..x1 {
                let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
                self.data[i..i + 4].copy_from_slice(&px);
            }
        }
    }

    /// Composite `src` over this bitmap with its top-left at `at`, clipped to bounds.
    pub fn draw_over(&mut self, src: &Bitmap, at: Pos) {
        let Some((x0, y0, x1, y1)) = self.clip(at, src.size()) else {
            return;
        };
        let dst_stride = self.width as usize * 4;
        let src_stride = src.width as usize * 4;
        for y in y0..y1 {
            let sy = (y - at.y) as usize;
            for x in x0..x1 {
                let sx = (x - at.x) as usize;
                let si = sy * src_stride + sx * 4;
                let s = [
                    src.data[si],
                    src.data[si + 1],
                    src.data[si + 2],
                    src.data[si + 3],
                ];
                if s[3] == 0 {
                    continue;
                }
                let di = (y as usize) * dst_stride + (x as usize) * 4;
                if s[3] == 255 {
                    self.data[di..di + 4].copy_from_slice(&s);
                    continue;
                }
                let d = [
                    self.data[di],
                    self.data[di + 1],
                    self.data[di + 2],
                    self.data[di + 3],
                ];
                self.data[di..di + 4].copy_from_slice(&over(d, s));
            }
        }
    }

    /// Crop or pad (transparent) to exactly `size`, anchored at the top-left.
    pub fn fit_to(&self, size: Size) -> Bitmap {
        if self.size() == size {
            return self.clone();
        }
        let mut out = Bitmap::new(size);
        let w = self.width.min(size.width) as usize * 4;
        for y in 0..self.height.min(size.height) as usize {
            let si = y * self.width as usize * 4;
            let di = y * size.width as usize * 4;
            out.data[di..di + w].copy_from_slice(&self.data[si..si + w]);
        }
        out
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }

    fn clip(&self, at: Pos, size: Size) -> Option<(i32, i32, i32, i32)> {
        let x0 = at.x.max(0);
        let y0 = at.y.max(0);
        let x1 = (i64::from(at.x) + i64::from(size.width)).min(i64::from(self.width)) as i32;
        let y1 = (i64::from(at.y) + i64::from(size.height)).min(i64::from(self.height)) as i32;
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0, y0, x1, y1))
    }
}

/// Drawing adapter so `embedded-graphics` fonts and primitives can paint opaque pixels.
impl DrawTarget for Bitmap {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            self.set_pixel(p.x, p.y, Rgba8Premul::opaque(c.r(), c.g(), c.b()));
        }
        Ok(())
    }
}

impl OriginDimensions for Bitmap {
    fn size(&self) -> EgSize {
        EgSize::new(self.width, self.height)
    }
}

fn byte_len(width: u32, height: u32) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4)
}

pub(crate) fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/bitmap.rs"]
mod tests;
