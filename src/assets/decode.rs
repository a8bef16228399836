use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use image::AnimationDecoder as _;
use image::codecs::gif::GifDecoder;
use image::imageops::FilterType;

use crate::foundation::core::Size;
use crate::foundation::error::{BoardError, BoardResult};
use crate::render::bitmap::Bitmap;

/// One decoded animation frame, already premultiplied and sized.
#[derive(Clone, Debug)]
pub(crate) struct DecodedFrame {
    pub(crate) bitmap: Bitmap,
    pub(crate) delay: Duration,
}

/// Load a PNG/JPEG/GIF/SVG file into one or more frames, resized to `target` when given.
pub(crate) fn load_image_file(path: &Path, target: Option<Size>) -> BoardResult<Vec<DecodedFrame>> {
    let bytes = std::fs::read(path)
        .map_err(|e| BoardError::asset(format!("failed to read image '{}': {e}", path.display())))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "svg" => Ok(vec![DecodedFrame {
            bitmap: rasterize_svg(&bytes, target)?,
            delay: Duration::ZERO,
        }]),
        "gif" => decode_gif(&bytes, target),
        _ => Ok(vec![DecodedFrame {
            bitmap: decode_still(&bytes, target)?,
            delay: Duration::ZERO,
        }]),
    }
}

/// Decode encoded still-image bytes and convert to a premultiplied bitmap.
pub(crate) fn decode_still(bytes: &[u8], target: Option<Size>) -> BoardResult<Bitmap> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = resize_to(dyn_img.to_rgba8(), target);
    Ok(Bitmap::from_rgba_image(&rgba))
}

/// Decode every GIF frame (composited by the decoder) with its delay.
pub(crate) fn decode_gif(bytes: &[u8], target: Option<Size>) -> BoardResult<Vec<DecodedFrame>> {
    let decoder = GifDecoder::new(Cursor::new(bytes)).context("open gif decoder")?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .context("decode gif frames")?;
    if frames.is_empty() {
        return Err(BoardError::asset("gif contains no frames"));
    }
    Ok(frames
        .into_iter()
        .map(|f| {
            let (num, den) = f.delay().numer_denom_ms();
            let delay_ms = if den == 0 { 0 } else { num / den };
            let rgba = resize_to(f.into_buffer(), target);
            DecodedFrame {
                bitmap: Bitmap::from_rgba_image(&rgba),
                delay: Duration::from_millis(u64::from(delay_ms)),
            }
        })
        .collect())
}

/// Parse SVG bytes and rasterize at `target`, or at the document's intrinsic size.
pub(crate) fn rasterize_svg(bytes: &[u8], target: Option<Size>) -> BoardResult<Bitmap> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;

    fn to_px(v: f32) -> BoardResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(BoardError::asset("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }
    let size = match target {
        Some(t) if !t.is_empty() => t,
        _ => Size::new(to_px(tree.size().width())?, to_px(tree.size().height())?),
    };

    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width, size.height)
        .ok_or_else(|| BoardError::asset("failed to allocate svg pixmap"))?;
    let sx = (size.width as f32) / tree.size().width();
    let sy = (size.height as f32) / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );
    // tiny-skia pixmaps are premultiplied RGBA8 already.
    Bitmap::from_premul_bytes(size.width, size.height, pixmap.data().to_vec())
}

fn resize_to(img: image::RgbaImage, target: Option<Size>) -> image::RgbaImage {
    match target {
        Some(t) if !t.is_empty() && img.dimensions() != (t.width, t.height) => {
            image::imageops::resize(&img, t.width, t.height, FilterType::Triangle)
        }
        _ => img,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
