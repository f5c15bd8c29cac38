/// Basic example: Convert a generated test image to ASCII art
///
/// Draws a circle over a gradient, prints the art and saves a PNG export
use ascii_press::export::{DEFAULT_FILE_NAME, save_png};
use ascii_press::{CharacterSet, ConversionParameters, SourceImage, convert};
use image::{Rgba, RgbaImage};
use std::path::Path;

fn main() {
    println!("ASCII Press - Basic Example");
    println!("===========================\n");

    let width = 320;
    let height = 160;
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 60.0;

    // Horizontal gradient with a white disc and a transparent corner
    let img = RgbaImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - center_x;
        let dy = y as f32 - center_y;
        if (dx * dx + dy * dy).sqrt() < radius {
            Rgba([255, 255, 255, 255])
        } else if x < 40 && y < 40 {
            Rgba([0, 0, 0, 0])
        } else {
            let v = (x * 255 / width) as u8;
            Rgba([v, v / 2, 255 - v, 255])
        }
    });
    println!("Created test image: {}x{}", width, height);

    let params = ConversionParameters {
        output_width: 80,
        contrast: 1.2,
        character_set: CharacterSet::Standard,
        ..Default::default()
    };
    println!("Converting with {:?}\n", params);

    let art = convert(&SourceImage::from_rgba(img), &params).expect("conversion failed");
    print!("{art}");

    save_png(&art, 2.0, Path::new(DEFAULT_FILE_NAME)).expect("Failed to save output");
    println!("\n✓ Saved {}x{} art to: {}", art.width(), art.height(), DEFAULT_FILE_NAME);
}
