use std::path::PathBuf;
use std::process::Command;

use image::RgbaImage;

#[test]
fn cli_blend_writes_png() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let from_path = dir.join("from.png");
    let to_path = dir.join("to.png");
    let out_path = dir.join("band.png");
    let _ = std::fs::remove_file(&out_path);

    RgbaImage::from_pixel(32, 64, image::Rgba([200, 220, 255, 255]))
        .save(&from_path)
        .unwrap();
    RgbaImage::from_pixel(32, 64, image::Rgba([30, 60, 30, 255]))
        .save(&to_path)
        .unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_scrollwork"))
        .args([
            "blend",
            "--from",
            from_path.to_str().unwrap(),
            "--to",
            to_path.to_str().unwrap(),
            "--band",
            "16",
            "--out",
            out_path.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());

    let band = image::open(&out_path).unwrap().to_rgba8();
    assert_eq!(band.dimensions(), (32, 16));
}

#[test]
fn cli_trace_prints_the_journey() {
    let journey_path = PathBuf::from("tests").join("data").join("journey.json");

    let output = Command::new(env!("CARGO_BIN_EXE_scrollwork"))
        .args([
            "trace",
            "--journey",
            journey_path.to_str().unwrap(),
            "--steps",
            "8",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("+500 ft"));
    assert!(stdout.contains("sky"));
    assert!(stdout.contains("datacenter"));
}
