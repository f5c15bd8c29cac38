/// Prints the same gradient with every registered character set
use ascii_press::{CharacterSet, ConversionParameters, SourceImage, convert};
use image::{Rgba, RgbaImage};

fn main() {
    let img = RgbaImage::from_fn(256, 32, |x, _| {
        let v = x as u8;
        Rgba([v, v, v, 255])
    });
    let source = SourceImage::from_rgba(img);

    for set in CharacterSet::ALL {
        for invert in [false, true] {
            let params = ConversionParameters {
                output_width: 64,
                invert,
                character_set: set,
                ..Default::default()
            };
            let art = convert(&source, &params).expect("conversion failed");
            println!("{} (invert: {invert})", set.label());
            print!("{art}");
            println!();
        }
    }
}
