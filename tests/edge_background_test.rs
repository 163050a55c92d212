// Integration tests for edge color extraction and backdrop styles
use image::{Rgba, RgbaImage};
use proptest::prelude::*;

use menu_backdrop::backdrop::{style_for, DisplayMode};
use menu_backdrop::edge_color::{
    Bitmap, ColorBucket, EdgeColorExtractor, EdgeSide, ExtractionResult, PixelError, PixelSource,
    RgbColor, BACKGROUND_HEIGHT, BACKGROUND_WIDTH, FALLBACK_COLOR,
};

struct BrokenCanvas;

impl PixelSource for BrokenCanvas {
    fn read_pixels(&self) -> Result<Bitmap, PixelError> {
        Err(PixelError::Unreadable("cross-origin image".to_string()))
    }
}

fn split_bitmap(width: u32, height: u32, left: Rgba<u8>, right: Rgba<u8>) -> Bitmap {
    Bitmap::from_fn(width, height, |x, _| if x < width / 2 { left } else { right })
        .expect("test bitmap")
}

fn noisy_pixel(x: u32, y: u32, seed: u32) -> Rgba<u8> {
    let v = x
        .wrapping_mul(2_654_435_761)
        .wrapping_add(y.wrapping_mul(40_503))
        .wrapping_add(seed);
    Rgba([(v >> 3) as u8, (v >> 11) as u8, (v >> 19) as u8, (v >> 27) as u8])
}

#[test]
fn uniform_red_keeps_background() {
    let bitmap = split_bitmap(40, 30, Rgba([255, 0, 0, 255]), Rgba([255, 0, 0, 255]));

    let result = EdgeColorExtractor::new().extract(&bitmap);

    let background = result.background_image.expect("background expected");
    assert_eq!(background.dimensions(), (BACKGROUND_WIDTH, BACKGROUND_HEIGHT));
    assert_eq!(result.dominant_color, RgbColor::new(255, 0, 0));
}

#[test]
fn red_left_blue_right_flattens() {
    let bitmap = split_bitmap(40, 30, Rgba([255, 0, 0, 255]), Rgba([0, 0, 255, 255]));

    let result = EdgeColorExtractor::new().extract(&bitmap);

    assert!(result.is_flattened());
    assert_eq!(result.dominant_color, RgbColor::new(255, 0, 0));
}

#[test]
fn achromatic_samples_land_in_expected_buckets() {
    assert_eq!(ColorBucket::classify(RgbColor::new(90, 90, 90)), ColorBucket::Gray);
    assert_eq!(ColorBucket::classify(RgbColor::new(10, 10, 10)), ColorBucket::Black);
    assert_eq!(ColorBucket::classify(RgbColor::new(250, 250, 250)), ColorBucket::White);
}

#[test]
fn unreadable_source_falls_back_to_default_gray() {
    let result = EdgeColorExtractor::new().extract_from(&BrokenCanvas);

    assert_eq!(result, ExtractionResult::fallback());
    assert_eq!(result.dominant_color, FALLBACK_COLOR);
    assert_eq!(result.dominant_color.css(), "rgb(209, 213, 219)");
}

#[test]
fn zero_sized_image_falls_back() {
    let image = RgbaImage::new(0, 0);

    let result = EdgeColorExtractor::new().extract_from(&image);

    assert_eq!(result, ExtractionResult::fallback());
}

#[test]
fn slightly_noisy_edges_keep_background_with_exact_mode_color() {
    let base = Rgba([30, 120, 200, 255]);
    let bitmap = Bitmap::from_fn(20, 100, |_, y| {
        if y % 10 == 0 {
            Rgba([35, 125, 205, 255])
        } else {
            base
        }
    })
    .expect("test bitmap");

    let result = EdgeColorExtractor::new().extract(&bitmap);

    assert!(result.background_image.is_some());
    assert_eq!(result.dominant_color, RgbColor::new(30, 120, 200));
}

#[test]
fn presentation_follows_display_mode() {
    let bitmap = split_bitmap(12, 12, Rgba([250, 200, 0, 255]), Rgba([250, 200, 0, 255]));
    let result = EdgeColorExtractor::new().extract(&bitmap);

    let edge = style_for(&result, &DisplayMode::EdgeBackground);
    assert!(edge
        .background_image
        .as_deref()
        .is_some_and(|url| url.starts_with("data:image/png;base64,")));
    assert_eq!(edge.background_color, "transparent");

    let single = style_for(&result, &DisplayMode::SingleColor { override_color: None });
    assert_eq!(single.background_image, None);
    assert_eq!(single.background_color, "rgb(250, 200, 0)");

    let overridden = style_for(
        &result,
        &DisplayMode::SingleColor {
            override_color: Some("white".to_string()),
        },
    );
    assert_eq!(overridden.background_color, "white");
}

proptest! {
    #[test]
    fn extraction_is_deterministic(width in 1u32..48, height in 1u32..48, seed in any::<u32>()) {
        let bitmap = Bitmap::from_fn(width, height, |x, y| noisy_pixel(x, y, seed)).expect("test bitmap");
        let extractor = EdgeColorExtractor::new();

        let first = extractor.extract(&bitmap);
        let second = extractor.extract(&bitmap);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn background_halves_mirror_edge_columns(width in 1u32..32, height in 1u32..300, seed in any::<u32>()) {
        let bitmap = Bitmap::from_fn(width, height, |x, y| noisy_pixel(x, y, seed)).expect("test bitmap");
        let left = bitmap.edge_column(EdgeSide::Left);
        let right = bitmap.edge_column(EdgeSide::Right);

        let background = EdgeColorExtractor::synthesize_background(&left, &right).expect("background");
        prop_assert_eq!(background.dimensions(), (BACKGROUND_WIDTH, BACKGROUND_HEIGHT));

        for y in 0..BACKGROUND_HEIGHT {
            let mapped_y = ((y as f64 / BACKGROUND_HEIGHT as f64) * height as f64).floor() as u32;
            for x in [0, BACKGROUND_WIDTH / 2 - 1, BACKGROUND_WIDTH / 2, BACKGROUND_WIDTH - 1] {
                let source_x = if x < BACKGROUND_WIDTH / 2 { 0 } else { width - 1 };
                let [r, g, b, _] = bitmap.pixel(source_x, mapped_y).0;
                prop_assert_eq!(background.pixel(x, y), Rgba([r, g, b, 255]));
            }
        }
    }

    #[test]
    fn flattened_results_never_carry_background(width in 1u32..24, height in 1u32..24, seed in any::<u32>()) {
        let bitmap = Bitmap::from_fn(width, height, |x, y| noisy_pixel(x, y, seed)).expect("test bitmap");
        let extractor = EdgeColorExtractor::new();

        let analysis = extractor.analyze(&bitmap);
        let result = extractor.extract(&bitmap);

        prop_assert_eq!(analysis.flatten, result.background_image.is_none());
        prop_assert_eq!(analysis.dominant_color, Some(result.dominant_color));
        prop_assert_eq!(analysis.total_samples, height as usize * 2);
    }
}
