use eframe::egui::Vec2;
use image_pin::surface::{fit_within, ImageSurface};
use std::path::PathBuf;

fn ratio(w: u32, h: u32) -> f32 {
    w as f32 / h as f32
}

#[test]
fn fit_preserves_aspect_ratio_within_bounds() {
    let cases = [
        ((640, 480), Vec2::new(400.0, 400.0)),
        ((300, 200), Vec2::new(400.0, 400.0)), // upscale
        ((200, 800), Vec2::new(100.0, 100.0)),
        ((1920, 1080), Vec2::new(333.0, 777.0)),
    ];
    for ((src_w, src_h), bounds) in cases {
        let (w, h) = fit_within(src_w, src_h, bounds);
        assert!(w as f32 <= bounds.x + 1.0 && h as f32 <= bounds.y + 1.0);
        assert!(
            (ratio(w, h) - ratio(src_w, src_h)).abs() < 0.02,
            "{src_w}x{src_h} into {bounds:?} became {w}x{h}"
        );
        // One side always touches the box.
        assert!((w as f32 - bounds.x).abs() < 1.0 || (h as f32 - bounds.y).abs() < 1.0);
    }
}

#[test]
fn fit_never_collapses_to_zero() {
    assert_eq!(fit_within(0, 0, Vec2::new(100.0, 100.0)), (1, 1));
    let (w, h) = fit_within(1000, 1, Vec2::new(10.0, 10.0));
    assert!(w >= 1 && h >= 1);
    let (w, h) = fit_within(50, 50, Vec2::ZERO);
    assert!(w >= 1 && h >= 1);
}

#[test]
fn rescale_keeps_scaled_present_and_proportional() {
    let mut surface = ImageSurface::default();
    surface.set_image(
        image::RgbaImage::new(640, 480),
        PathBuf::from("640x480.png"),
        Vec2::new(400.0, 400.0),
    );

    for bounds in [
        Vec2::new(200.0, 200.0),
        Vec2::new(50.0, 300.0),
        Vec2::new(1000.0, 30.0),
    ] {
        surface.rescale(bounds);
        let scaled = surface.scaled().expect("scaled image must track the source");
        assert!(
            (ratio(scaled.width(), scaled.height()) - ratio(640, 480)).abs() < 0.05,
            "ratio drifted at bounds {bounds:?}"
        );
    }
}

#[test]
fn rescale_without_image_stays_absent() {
    let mut surface = ImageSurface::default();
    surface.rescale(Vec2::new(300.0, 300.0));
    assert!(surface.scaled().is_none());
    assert!(!surface.take_dirty());
}

#[test]
fn scaled_size_matches_spec_example() {
    // A 3:2 source in a 400x400 window scales to 400x267; the stick logic
    // consumes exactly this size.
    let mut surface = ImageSurface::default();
    surface.set_image(
        image::RgbaImage::new(600, 400),
        PathBuf::from("wide.png"),
        Vec2::new(400.0, 400.0),
    );
    assert_eq!(surface.scaled_size(), Some(Vec2::new(400.0, 267.0)));
}
