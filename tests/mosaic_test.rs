use image::{ImageBuffer, Rgb, RgbImage};
use poly_dot_wasm::{ConvertOptions, MosaicError, PaletteColor, Shape, convert, convert_with_rng, extract_palette};
use rand::SeedableRng;
use rand::rngs::StdRng;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

const SHAPES: [Shape; 3] = [Shape::Triangle, Shape::Square, Shape::Hexagon];

/// A colorful test photo with no pure white anywhere.
fn sample_image(w: u32, h: u32) -> RgbImage {
    ImageBuffer::from_fn(w, h, |x, y| {
        let r = (x * 255 / w.max(1)) as u8;
        let g = (y * 255 / h.max(1)) as u8;
        let b = ((x + y) * 3 % 200) as u8;
        Rgb([r.min(250), g.min(250), b])
    })
}

fn opts(shape: Shape, dots: u32, colors: usize, rotate: i32) -> ConvertOptions {
    ConvertOptions { shape, dots, colors, rotate, seed: Some(2024) }
}

#[test]
fn unrotated_tilings_leave_no_white_pixels() {
    let img = sample_image(97, 61);
    for shape in SHAPES {
        for dots in [10, 300, 2000] {
            let mosaic = convert(&img, &opts(shape, dots, 12, 0)).unwrap();
            let white = mosaic.image.pixels().filter(|p| **p == WHITE).count();
            assert_eq!(white, 0, "{shape} with {dots} dots left {white} white pixels");
        }
    }
}

#[test]
fn rotated_tilings_cover_the_canvas() {
    let img = sample_image(64, 40);
    for shape in SHAPES {
        for rotate in [15, 45, 90, -30] {
            let mosaic = convert(&img, &opts(shape, 400, 8, rotate)).unwrap();
            let white = mosaic.image.pixels().filter(|p| **p == WHITE).count();
            // only sub-pixel slivers along rotated seams may stay unpainted
            assert!(white * 100 < (64 * 40), "{shape} at {rotate} deg left {white} white pixels");
        }
    }
}

#[test]
fn palette_size_is_bounded() {
    let img = sample_image(80, 80);
    for colors in [5, 16, 30] {
        let palette = extract_palette(&img, colors, &mut StdRng::seed_from_u64(colors as u64));
        assert!(!palette.is_empty());
        assert!(palette.len() <= colors, "{} > {}", palette.len(), colors);
    }
}

#[test]
fn output_only_uses_palette_colors() {
    let img = sample_image(50, 50);
    let mosaic = convert(&img, &opts(Shape::Hexagon, 200, 10, 30)).unwrap();
    for p in mosaic.image.pixels() {
        let c = PaletteColor::new(p[0], p[1], p[2]);
        assert!(*p == WHITE || mosaic.palette.contains(&c), "{p:?} not in palette");
    }
}

#[test]
fn zero_and_full_turn_are_identical() {
    let img = sample_image(40, 30);
    for shape in SHAPES {
        let a = convert(&img, &opts(shape, 150, 9, 0)).unwrap();
        let b = convert(&img, &opts(shape, 150, 9, 360)).unwrap();
        assert_eq!(a.image, b.image, "{shape}");
        assert_eq!(a.palette, b.palette);
    }
}

#[test]
fn solid_red_square_mosaic() {
    let img: RgbImage = ImageBuffer::from_pixel(100, 100, Rgb([255, 0, 0]));
    let mosaic = convert(&img, &opts(Shape::Square, 25, 5, 0)).unwrap();
    assert_eq!(mosaic.palette, vec![PaletteColor::new(255, 0, 0)]);
    assert!(mosaic.image.pixels().all(|p| *p == Rgb([255, 0, 0])));
    assert_eq!(mosaic.tiles_painted, 25);
}

#[test]
fn more_tiles_than_pixels() {
    let img = sample_image(10, 10);
    for shape in SHAPES {
        let mosaic = convert(&img, &opts(shape, 1_000_000, 5, 0)).unwrap();
        assert!(mosaic.image.pixels().all(|p| *p != WHITE), "{shape} left white pixels");
        assert!(mosaic.tiles_painted >= 100, "{shape}: {} tiles painted", mosaic.tiles_painted);
        if shape == Shape::Square {
            // square tiles never share a pixel center
            assert_eq!(mosaic.tiles_painted, 100);
        }
    }
}

#[test]
fn two_hues_with_five_colors() {
    let img: RgbImage = ImageBuffer::from_fn(30, 30, |x, _| if x % 2 == 0 { Rgb([220, 30, 30]) } else { Rgb([30, 30, 220]) });
    let mosaic = convert(&img, &opts(Shape::Triangle, 50, 5, 0)).unwrap();
    assert!(!mosaic.palette.is_empty());
    assert!(mosaic.palette.len() <= 5);
}

#[test]
fn injected_rng_drives_the_palette() {
    let img = sample_image(60, 60);
    let options = opts(Shape::Square, 100, 16, 0);
    let a = convert_with_rng(&img, &options, &mut StdRng::seed_from_u64(5)).unwrap();
    let b = convert_with_rng(&img, &options, &mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(a.palette, b.palette);
    assert_eq!(a.image, b.image);
}

#[test]
fn fatal_errors_are_distinct() {
    let empty = RgbImage::new(0, 0);
    assert!(matches!(convert(&empty, &opts(Shape::Square, 10, 5, 0)), Err(MosaicError::EmptyPalette)));

    let img = sample_image(4, 4);
    assert!(matches!(
        convert(&img, &opts(Shape::Hexagon, 0, 5, 0)),
        Err(MosaicError::DegenerateGeometry { .. })
    ));
}
