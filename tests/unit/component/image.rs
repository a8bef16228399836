use super::*;
use crate::foundation::core::Dim;

fn write_png(dir: &std::path::Path, name: &str, w: u32, h: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]))
        .save(&path)
        .unwrap();
    path
}

fn write_gif(dir: &std::path::Path, name: &str) -> PathBuf {
    use image::codecs::gif::GifEncoder;
    use image::{Delay, Frame};

    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut enc = GifEncoder::new(file);
    for c in [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]] {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba(c));
        enc.encode_frame(Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(200, 1)))
            .unwrap();
    }
    path
}

#[test]
fn still_image_uses_natural_size() {
    let dir = tempfile::tempdir().unwrap();
    let mut img = Image::new(write_png(dir.path(), "a.png", 5, 3));
    img.init(Size::new(64, 32)).unwrap();
    assert_eq!(img.size(), Size::new(5, 3));
    assert_eq!(img.frame_count(), 1);
    let bmp = img.render().unwrap();
    assert_eq!(bmp.pixel(4, 2).to_array(), [10, 20, 30, 255]);
    assert_eq!(img.render().unwrap(), bmp);
}

#[test]
fn one_declared_dimension_keeps_aspect() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "wide.png", 8, 4);
    let mut img = Image::new(&path).with_base(NodeBase::new(Some(Dim::Px(4)), None, None));
    img.init(Size::new(64, 32)).unwrap();
    assert_eq!(img.size(), Size::new(4, 2));
    assert_eq!(img.render().unwrap().size(), Size::new(4, 2));
}

#[test]
fn gif_cycles_frames_and_adopts_its_delay() {
    let dir = tempfile::tempdir().unwrap();
    let mut img = Image::new(write_gif(dir.path(), "anim.gif"));
    img.init(Size::new(64, 32)).unwrap();
    assert_eq!(img.frame_count(), 3);
    assert_eq!(
        img.base().ticker.interval(),
        Some(std::time::Duration::from_millis(200))
    );
    let reds: Vec<u8> = (0..4).map(|_| img.render().unwrap().pixel(0, 0).r).collect();
    assert_eq!(reds, vec![255, 0, 0, 255]);
}

#[test]
fn missing_file_fails_at_init() {
    let mut img = Image::new("/nonexistent/x.png");
    assert!(matches!(
        img.init(Size::new(8, 8)).unwrap_err(),
        crate::foundation::error::BoardError::Asset(_)
    ));
}
