use std::path::Path;
use std::sync::Arc;

use embedded_graphics::{
    Drawable as _,
    mono_font::{MonoFont, MonoTextStyle, ascii},
    pixelcolor::Rgb888,
    prelude::Point,
    text::{Baseline, Text},
};

use crate::assets::color::Color;
use crate::foundation::core::Size;
use crate::foundation::error::{BoardError, BoardResult};
use crate::render::bitmap::Bitmap;

/// A resolved font ready for rasterization.
#[derive(Clone)]
pub(crate) enum FontFace {
    /// Built-in monospace pixel font (crisp on LED panels).
    Mono(&'static MonoFont<'static>),
    /// TrueType/OpenType font shaped with Parley and rasterized with `vello_cpu`.
    Outline { bytes: Arc<Vec<u8>>, size_px: f32 },
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mono(font) => write!(
                f,
                "Mono({}x{})",
                font.character_size.width, font.character_size.height
            ),
            Self::Outline { bytes, size_px } => {
                write!(f, "Outline({} bytes, {size_px}px)", bytes.len())
            }
        }
    }
}

/// Look up a built-in pixel font by its `WxH` name.
pub(crate) fn builtin_mono(name: &str) -> Option<&'static MonoFont<'static>> {
    Some(match name.trim().to_ascii_lowercase().as_str() {
        "4x6" => &ascii::FONT_4X6,
        "5x7" => &ascii::FONT_5X7,
        "5x8" => &ascii::FONT_5X8,
        "6x9" => &ascii::FONT_6X9,
        "6x10" => &ascii::FONT_6X10,
        "6x12" => &ascii::FONT_6X12,
        "6x13" => &ascii::FONT_6X13,
        "7x13" => &ascii::FONT_7X13,
        "7x14" => &ascii::FONT_7X14,
        "8x13" => &ascii::FONT_8X13,
        "9x15" => &ascii::FONT_9X15,
        "9x18" => &ascii::FONT_9X18,
        "10x20" => &ascii::FONT_10X20,
        _ => return None,
    })
}

/// Resolve `name` to a built-in pixel font, or load it as a font file under `font_dir`.
///
/// Missing files fail here so a bad font surfaces at `init`, never mid-frame.
pub(crate) fn load_font(name: &str, size_px: f32, font_dir: &Path) -> BoardResult<FontFace> {
    if let Some(mono) = builtin_mono(name) {
        return Ok(FontFace::Mono(mono));
    }
    if !size_px.is_finite() || size_px <= 0.0 {
        return Err(BoardError::asset("font size must be finite and > 0"));
    }
    let path = font_dir.join(name);
    let bytes = std::fs::read(&path)
        .map_err(|e| BoardError::asset(format!("failed to read font '{}': {e}", path.display())))?;
    Ok(FontFace::Outline {
        bytes: Arc::new(bytes),
        size_px,
    })
}

/// Rasterize `text` at its natural size.
pub(crate) fn rasterize_text(text: &str, face: &FontFace, color: Color) -> BoardResult<Bitmap> {
    match face {
        FontFace::Mono(font) => Ok(rasterize_mono(text, font, color)),
        FontFace::Outline { bytes, size_px } => rasterize_outline(text, bytes, *size_px, color),
    }
}

/// Natural extent of `text` in a monospace font.
pub(crate) fn mono_extent(text: &str, font: &MonoFont<'_>) -> Size {
    let cw = font.character_size.width;
    let ch = font.character_size.height;
    let mut width = 0u32;
    let mut lines = 0u32;
    for line in text.split('\n') {
        lines += 1;
        let n = line.chars().count() as u32;
        if n > 0 {
            width = width.max(n * cw + (n - 1) * font.character_spacing);
        }
    }
    if width == 0 {
        return Size::default();
    }
    Size::new(width, lines * ch)
}

fn rasterize_mono(text: &str, font: &'static MonoFont<'static>, color: Color) -> Bitmap {
    let mut bmp = Bitmap::new(mono_extent(text, font));
    if bmp.size().is_empty() {
        return bmp;
    }
    let style = MonoTextStyle::new(font, Rgb888::new(color.r, color.g, color.b));
    for (i, line) in text.split('\n').enumerate() {
        let y = (i as u32 * font.character_size.height) as i32;
        // Drawing into a Bitmap is infallible.
        let _ = Text::with_baseline(line, Point::new(0, y), style, Baseline::Top).draw(&mut bmp);
    }
    if color.a < 255 {
        let mut scaled = Bitmap::new(bmp.size());
        for y in 0..bmp.height() as i32 {
            for x in 0..bmp.width() as i32 {
                scaled.set_pixel(x, y, bmp.pixel(x, y).scaled(color.a));
            }
        }
        return scaled;
    }
    bmp
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TextBrushRgba8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

fn rasterize_outline(
    text: &str,
    font_bytes: &Arc<Vec<u8>>,
    size_px: f32,
    color: Color,
) -> BoardResult<Bitmap> {
    let brush = TextBrushRgba8 {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    };

    let mut font_ctx = parley::FontContext::default();
    let mut layout_ctx = parley::LayoutContext::<TextBrushRgba8>::new();
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(font_bytes.as_ref().clone()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| BoardError::asset("no font families registered from font bytes"))?;
    let family_name = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| BoardError::asset("registered font family has no name"))?
        .to_string();

    let mut builder = layout_ctx.ranged_builder(&mut font_ctx, text, 1.0, true);
    builder.push_default(parley::style::StyleProperty::FontStack(
        parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
    ));
    builder.push_default(parley::style::StyleProperty::FontSize(size_px));
    builder.push_default(parley::style::StyleProperty::Brush(brush));
    let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
    layout.break_all_lines(None);

    let width = layout.width().ceil().max(0.0) as u32;
    let height = layout.height().ceil().max(0.0) as u32;
    if width == 0 || height == 0 {
        return Ok(Bitmap::new(Size::default()));
    }
    let w: u16 = width
        .try_into()
        .map_err(|_| BoardError::render("text width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BoardError::render("text height exceeds u16"))?;

    let font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(font_bytes.as_ref().clone()),
        0,
    );
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let b = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(b.r, b.g, b.b, b.a));
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Bitmap::from_premul_bytes(width, height, pixmap.data_as_u8_slice_mut().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
