use std::path::PathBuf;

use image::RgbaImage;
use scrollwork::{blend_strip, gradient_band_blend};

fn vertical_ramp(w: u32, h: u32, top: [u8; 4], bottom: [u8; 4]) -> RgbaImage {
    RgbaImage::from_fn(w, h, |_, y| {
        let t = y as f32 / (h - 1) as f32;
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        image::Rgba([
            lerp(top[0], bottom[0]),
            lerp(top[1], bottom[1]),
            lerp(top[2], bottom[2]),
            lerp(top[3], bottom[3]),
        ])
    })
}

#[test]
fn band_blend_writes_png() {
    let dir = PathBuf::from("target").join("blend_band");
    std::fs::create_dir_all(&dir).unwrap();
    let out_path = dir.join("band.png");
    let _ = std::fs::remove_file(&out_path);

    // Sky fading to haze over forest fading to dusk.
    let sky = vertical_ramp(64, 128, [120, 180, 240, 255], [200, 210, 220, 255]);
    let forest = vertical_ramp(64, 128, [40, 90, 50, 255], [20, 40, 25, 255]);

    let band = gradient_band_blend(&sky, &forest, 48).unwrap();
    band.save(&out_path).unwrap();

    assert!(out_path.exists());
    let reloaded = image::open(&out_path).unwrap().to_rgba8();
    assert_eq!(reloaded.dimensions(), (64, 48));

    // Band edges are exactly the source rows they came from.
    assert_eq!(reloaded.get_pixel(10, 0), sky.get_pixel(10, 128 - 48));
    assert_eq!(reloaded.get_pixel(10, 47), forest.get_pixel(10, 47));
}

#[test]
fn band_weights_are_monotone_down_the_ramp() {
    let white = RgbaImage::from_pixel(8, 100, image::Rgba([255, 255, 255, 255]));
    let black = RgbaImage::from_pixel(8, 100, image::Rgba([0, 0, 0, 255]));
    let band = gradient_band_blend(&white, &black, 60).unwrap();

    let mut prev = 255u8;
    for y in 0..60 {
        let v = band.get_pixel(4, y).0[0];
        assert!(v <= prev, "blend brightened at row {y}");
        prev = v;
    }
    assert_eq!(band.get_pixel(4, 0).0[0], 255);
    assert_eq!(band.get_pixel(4, 59).0[0], 0);
}

#[test]
fn strip_stitches_two_zones_seamlessly() {
    let sky = RgbaImage::from_pixel(16, 80, image::Rgba([100, 150, 255, 255]));
    let forest = RgbaImage::from_pixel(16, 80, image::Rgba([30, 80, 40, 255]));
    let strip = blend_strip(&sky, &forest, 20).unwrap();

    assert_eq!(strip.dimensions(), (16, 80 + 80 - 20));
    // Above the band: pure sky. Below: pure forest.
    assert_eq!(strip.get_pixel(0, 0).0, [100, 150, 255, 255]);
    assert_eq!(strip.get_pixel(0, 59).0, [100, 150, 255, 255]);
    assert_eq!(strip.get_pixel(0, 80).0, [30, 80, 40, 255]);
    assert_eq!(strip.get_pixel(0, 139).0, [30, 80, 40, 255]);
}
