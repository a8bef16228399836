use std::io::Cursor;

use super::*;
use crate::foundation::core::Rgba8Premul;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_still_premultiplies() {
    let bmp = decode_still(&png_bytes(1, 1, [100, 50, 200, 128]), None).unwrap();
    assert_eq!(bmp.size(), Size::new(1, 1));
    assert_eq!(
        bmp.pixel(0, 0),
        Rgba8Premul {
            r: ((100u16 * 128 + 127) / 255) as u8,
            g: ((50u16 * 128 + 127) / 255) as u8,
            b: ((200u16 * 128 + 127) / 255) as u8,
            a: 128,
        }
    );
}

#[test]
fn decode_still_resizes_to_target() {
    let bmp = decode_still(&png_bytes(8, 4, [255, 0, 0, 255]), Some(Size::new(4, 2))).unwrap();
    assert_eq!(bmp.size(), Size::new(4, 2));
    assert_eq!(bmp.pixel(1, 1), Rgba8Premul::opaque(255, 0, 0));
}

#[test]
fn decode_gif_keeps_every_frame_and_delay() {
    use image::codecs::gif::GifEncoder;
    use image::{Delay, Frame};

    let mut buf = Vec::new();
    {
        let mut enc = GifEncoder::new(&mut buf);
        for c in [[255, 0, 0, 255], [0, 0, 255, 255]] {
            let img = image::RgbaImage::from_pixel(2, 2, image::Rgba(c));
            enc.encode_frame(Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(100, 1)))
                .unwrap();
        }
    }
    let frames = decode_gif(&buf, None).unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].delay, Duration::from_millis(100));
    assert_eq!(frames[1].bitmap.pixel(0, 0).b, 255);
}

#[test]
fn rasterize_svg_at_target_and_rejects_garbage() {
    let ok = br##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"><rect width="4" height="4" fill="#00ff00"/></svg>"##;
    let bmp = rasterize_svg(ok, Some(Size::new(8, 8))).unwrap();
    assert_eq!(bmp.size(), Size::new(8, 8));
    assert_eq!(bmp.pixel(4, 4), Rgba8Premul::opaque(0, 255, 0));

    assert!(rasterize_svg(b"<svg", None).is_err());
}

#[test]
fn missing_file_is_an_asset_error() {
    let err = load_image_file(Path::new("/nonexistent/ledboard.png"), None).unwrap_err();
    assert!(matches!(err, BoardError::Asset(_)));
}
