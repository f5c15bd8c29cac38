use ascii_press::config::{FACTOR_RANGE, FACTOR_STEP, WIDTH_RANGE};
use ascii_press::export::{DEFAULT_FILE_NAME, FONT_SIZE_PX, TEXT_COLOR, save_png};
use ascii_press::loader::ImageInput;
use ascii_press::{Action, CharacterSet, Session};
use eframe::egui;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// How long the "Copied" acknowledgment stays visible
const COPIED_FEEDBACK: Duration = Duration::from_secs(2);

/// Main application state for the ASCII Press GUI
pub struct AsciiPressApp {
    /// Parameters, selected file, pending decodes, preview and latest art
    session: Session,

    /// Texture handle for the preview
    preview_texture: Option<egui::TextureHandle>,

    /// When the art was last copied to the clipboard
    copied_at: Option<Instant>,
    /// Error message to display (if any)
    error_message: Option<String>,
}

impl Default for AsciiPressApp {
    fn default() -> Self {
        Self {
            session: Session::new(),
            preview_texture: None,
            copied_at: None,
            error_message: None,
        }
    }
}

impl AsciiPressApp {
    /// Create a new ASCII Press application
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    /// Select an image file for the next generation
    ///
    /// The preview is decoded in the background and shows up once
    /// [`Session::poll_preview`] picks it up.
    pub fn select_image(&mut self, path: PathBuf) {
        log::debug!("selected {}", path.display());
        self.preview_texture = None; // Clear old texture
        self.session.dispatch(Action::SelectImage(ImageInput::Path(path)));
    }

    /// Save the current art as PNG
    pub fn save_output(&self, path: &Path, pixels_per_point: f32) -> Result<(), String> {
        match self.session.art() {
            Some(art) => save_png(art, pixels_per_point, path).map_err(|e| format!("Failed to save: {e}")),
            None => Err("No ASCII art to save".to_string()),
        }
    }

    /// Render the control panel UI
    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Controls");
        ui.separator();

        if ui.button("Open Image...").clicked() {
            self.pick_image();
        }
        let preview = self.session.preview().map(|source| source.pixels());
        Self::display_image(ui, preview, self.session.is_previewing(), &mut self.preview_texture);

        ui.add_space(8.0);

        let mut params = *self.session.params();
        let mut changed = false;

        changed |= ui
            .add(
                egui::Slider::new(&mut params.output_width, WIDTH_RANGE.0..=WIDTH_RANGE.1)
                    .text("Output Width"),
            )
            .on_hover_text("Characters per row")
            .changed();

        changed |= ui
            .add(
                egui::Slider::new(&mut params.contrast, FACTOR_RANGE.0..=FACTOR_RANGE.1)
                    .step_by(FACTOR_STEP)
                    .fixed_decimals(1)
                    .text("Contrast"),
            )
            .changed();

        changed |= ui
            .add(
                egui::Slider::new(&mut params.brightness, FACTOR_RANGE.0..=FACTOR_RANGE.1)
                    .step_by(FACTOR_STEP)
                    .fixed_decimals(1)
                    .text("Brightness"),
            )
            .changed();

        changed |= ui
            .checkbox(&mut params.invert, "Invert Colors")
            .on_hover_text("Swap dense and sparse characters")
            .changed();

        egui::ComboBox::from_label("Character Set")
            .selected_text(params.character_set.label())
            .show_ui(ui, |ui| {
                for set in CharacterSet::ALL {
                    changed |= ui
                        .selectable_value(&mut params.character_set, set, set.label())
                        .changed();
                }
            });

        if changed {
            self.session.dispatch(Action::SetParameters(params));
        }

        ui.add_space(16.0);
        ui.separator();

        let generate = ui.add_enabled(self.session.can_generate(), egui::Button::new("Generate"));
        if generate.clicked() {
            self.session.dispatch(Action::Generate);
        }
        if self.session.is_loading() {
            ui.label("Loading image...");
        }
    }

    fn pick_image(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff"])
            .pick_file()
        {
            self.select_image(path);
        }
    }

    /// Render the copy / download toolbar
    fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        let enabled = self.session.can_export();
        let copied = self.copied_at.is_some_and(|at| at.elapsed() < COPIED_FEEDBACK);

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let download = ui.add_enabled(enabled, egui::Button::new("Download as PNG"));
            if download.clicked() {
                self.download(ui.ctx());
            }

            let label = if copied { "✔ Copied" } else { "Copy" };
            if ui.add_enabled(enabled, egui::Button::new(label)).clicked()
                && let Some(art) = self.session.art()
            {
                ui.ctx().copy_text(art.clipboard_text());
                self.copied_at = Some(Instant::now());
            }
        });

        if copied {
            ui.ctx().request_repaint_after(Duration::from_millis(100));
        }
    }

    fn download(&mut self, ctx: &egui::Context) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(DEFAULT_FILE_NAME)
            .save_file()
            && let Err(e) = self.save_output(&path, ctx.pixels_per_point())
        {
            self.error_message = Some(e);
        }
    }

    /// Convert RgbaImage to egui ColorImage
    fn rgba_to_color_image(img: &RgbaImage) -> egui::ColorImage {
        let (width, height) = img.dimensions();
        egui::ColorImage::from_rgba_unmultiplied([width as usize, height as usize], img.as_raw())
    }

    /// Display the preview image in a square box
    fn display_image(
        ui: &mut egui::Ui,
        image: Option<&RgbaImage>,
        loading: bool,
        texture: &mut Option<egui::TextureHandle>,
    ) {
        let Some(img) = image else {
            ui.label(if loading { "Loading preview..." } else { "No image selected" });
            return;
        };

        // Update texture if needed
        if texture.is_none() {
            *texture = Some(ui.ctx().load_texture(
                "preview",
                Self::rgba_to_color_image(img),
                egui::TextureOptions::default(),
            ));
        }

        if let Some(tex) = texture {
            let size = tex.size_vec2();
            let side = ui.available_width();
            let scale = (side / size.x).min(side / size.y);
            ui.image((tex.id(), size * scale));
            ui.label(format!("{}x{}", img.width(), img.height()));
        }
    }
}

impl eframe::App for AsciiPressApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pick up finished decodes
        if self.session.poll_preview() {
            self.preview_texture = None;
        }
        self.session.poll();
        if self.session.is_loading() || self.session.is_previewing() {
            ctx.request_repaint_after(Duration::from_millis(16));
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        self.pick_image();
                        ui.close();
                    }

                    ui.separator();

                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Left panel: Controls
        egui::SidePanel::left("control_panel")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.render_controls(ui));
            });

        // Central panel: toolbar and art
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_toolbar(ui);
            ui.separator();

            if let Some(ref msg) = self.error_message {
                ui.colored_label(egui::Color32::RED, msg);
                if ui.button("Clear Error").clicked() {
                    self.error_message = None;
                }
                ui.separator();
            }

            egui::ScrollArea::both().show(ui, |ui| match self.session.art() {
                Some(art) => {
                    let [r, g, b] = TEXT_COLOR;
                    ui.label(
                        egui::RichText::new(art.to_string())
                            .monospace()
                            .size(FONT_SIZE_PX as f32)
                            .color(egui::Color32::from_rgb(r, g, b)),
                    );
                }
                None => {
                    ui.label("Select an image and press Generate");
                }
            });
        });
    }
}
