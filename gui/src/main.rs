mod app;

use app::AsciiPressApp;
use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    // Configure logging
    env_logger::init();

    // Configure viewport/window
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("ASCII Press")
            .with_icon(load_icon()),
        ..Default::default()
    };

    eframe::run_native(
        "ASCII Press",
        options,
        Box::new(|cc| Ok(Box::new(AsciiPressApp::new(cc)))),
    )
}

/// Build the window icon: a 4x4 grid of shade blocks, lightest top-left
fn load_icon() -> egui::IconData {
    let icon_size = 32;
    let cell = icon_size / 4;
    let mut pixels = vec![0u8; icon_size * icon_size * 4];

    for y in 0..icon_size {
        for x in 0..icon_size {
            let idx = (y * icon_size + x) * 4;
            let level = (x / cell + y / cell) as u32;
            let gray = (40 + level * 30).min(255) as u8;

            pixels[idx] = gray;
            pixels[idx + 1] = gray;
            pixels[idx + 2] = gray;
            pixels[idx + 3] = 255;
        }
    }

    egui::IconData {
        rgba: pixels,
        width: icon_size as u32,
        height: icon_size as u32,
    }
}
