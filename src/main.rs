#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::{Path, PathBuf};

use eframe::egui;
use square_cropper::{
    CropEngine, CursorToken, DrawingSurface, EngineConfig, InputEvent, InputPort, PointerSample,
    QueuedClock, RasterSurface, Subscription,
};

const PREVIEW_SIZE: u32 = 256;
const PADDING: f32 = 20.0;

fn cursor_icon(token: CursorToken) -> egui::CursorIcon {
    match token {
        CursorToken::Default => egui::CursorIcon::Default,
        CursorToken::Move => egui::CursorIcon::Move,
        CursorToken::NwseResize => egui::CursorIcon::ResizeNwSe,
        CursorToken::NeswResize => egui::CursorIcon::ResizeNeSw,
    }
}

fn color_image(surface: &RasterSurface) -> egui::ColorImage {
    let (w, h) = surface.dimensions();
    egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], surface.pixels().as_raw())
}

/// Re-upload `surface` into `texture` if its pixels changed since last time.
fn sync_texture(
    ctx: &egui::Context,
    name: &str,
    surface: &mut RasterSurface,
    texture: &mut Option<egui::TextureHandle>,
) {
    if !surface.take_dirty() && texture.is_some() {
        return;
    }
    let image = color_image(surface);
    if let Some(handle) = texture.as_mut() {
        handle.set(image, egui::TextureOptions::LINEAR);
    } else {
        *texture = Some(ctx.load_texture(name, image, egui::TextureOptions::LINEAR));
    }
}

struct SquareCropper {
    engine: CropEngine<RasterSurface, QueuedClock>,
    input: InputPort,
    subscription: Subscription,
    handle_image: Option<PathBuf>,
    loaded: bool,
    surface_texture: Option<egui::TextureHandle>,
    preview_texture: Option<egui::TextureHandle>,
}

impl SquareCropper {
    fn new(cc: &eframe::CreationContext<'_>, config: EngineConfig, handle_image: Option<PathBuf>) -> Self {
        let ctx = cc.egui_ctx.clone();
        let clock = QueuedClock::with_waker(move || ctx.request_repaint());
        let mut input = InputPort::new();
        let subscription = input.subscribe();
        Self {
            engine: CropEngine::new(RasterSurface::new(1, 1), clock, config),
            input,
            subscription,
            handle_image,
            loaded: false,
            surface_texture: None,
            preview_texture: None,
        }
    }

    fn open_image(&mut self, path: &Path) {
        match image::open(path) {
            Ok(img) => {
                log::info!("opened {}", path.display());
                self.engine
                    .init(img.to_rgba8(), None, self.handle_image.as_deref());
                self.engine
                    .enable_drag(Some(RasterSurface::new(PREVIEW_SIZE, PREVIEW_SIZE)));
                self.engine.enable_resize();
                self.loaded = true;
            }
            Err(e) => log::error!("failed to open {}: {}", path.display(), e),
        }
    }

    fn save_cropped(&self) {
        let mut target = RasterSurface::new(PREVIEW_SIZE, PREVIEW_SIZE);
        match self.engine.export_to(&mut target) {
            Ok(true) => {}
            Ok(false) => return,
            Err(e) => {
                log::error!("export failed: {}", e);
                return;
            }
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Image", &["png", "jpg", "jpeg", "bmp"])
            .save_file()
        {
            if let Err(e) = target.into_image().save(&path) {
                log::error!("failed to save {}: {}", path.display(), e);
            }
        }
    }

    /// Translate this frame's egui pointer state into engine input.
    fn publish_pointer(&mut self, ctx: &egui::Context, image_rect: egui::Rect) {
        let (pos, delta, pressed, released) = ctx.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.delta(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
            )
        });

        let over = pos.is_some_and(|pos| image_rect.contains(pos));
        if let Some(pos) = pos {
            let offset = pos - image_rect.min;
            let sample = PointerSample {
                offset_x: offset.x as f64,
                offset_y: offset.y as f64,
                movement_x: delta.x as f64,
                movement_y: delta.y as f64,
                client_x: pos.x as f64,
                client_y: pos.y as f64,
            };
            if pressed && over {
                self.input.publish(InputEvent::PointerDown(sample));
            }
            if delta != egui::Vec2::ZERO && (over || self.engine.mode().is_active()) {
                self.input.publish(InputEvent::PointerMove(sample));
            }
        }
        // Window-wide, so a release outside the image still ends the gesture.
        if released {
            self.input.publish(InputEvent::PointerUp);
        }
        self.engine.pump(&self.subscription);

        // After pump, so the icon reflects this frame's events.
        if over || self.engine.mode().is_active() {
            ctx.set_cursor_icon(cursor_icon(self.engine.cursor()));
        }
    }
}

impl eframe::App for SquareCropper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for handle in self.engine.clock_mut().take_due() {
            self.engine.run_frame(handle);
        }

        // Handle dropped files
        let dropped = ctx.input(|i| i.raw.dropped_files.first().and_then(|f| f.path.clone()));
        if let Some(path) = dropped {
            self.open_image(&path);
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open Image").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Image", &["png", "jpg", "jpeg", "bmp"])
                        .pick_file()
                    {
                        self.open_image(&path);
                    }
                }
                if self.loaded && ui.button("Save Cropped Image").clicked() {
                    self.save_cropped();
                }
                if let Some(rect) = self.engine.crop_rect() {
                    ui.separator();
                    ui.label(format!(
                        "x: {:.0}  y: {:.0}  size: {:.0}",
                        rect.x, rect.y, rect.size
                    ));
                }
            });
        });

        if !self.loaded {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| ui.label("Open or drop an image"));
            });
            return;
        }

        if let Some(preview) = self.engine.preview_mut() {
            sync_texture(ctx, "preview", preview, &mut self.preview_texture);
        }
        egui::SidePanel::right("preview").show(ctx, |ui| {
            ui.heading("Preview");
            if let Some(texture) = &self.preview_texture {
                let size = egui::vec2(PREVIEW_SIZE as f32, PREVIEW_SIZE as f32);
                let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                ui.painter().image(
                    texture.id(),
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
        });

        sync_texture(ctx, "surface", self.engine.surface_mut(), &mut self.surface_texture);
        let Some(texture) = self.surface_texture.clone() else {
            return;
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            let available_size = ui.available_size();
            let max_size = available_size - egui::vec2(PADDING * 2.0, PADDING * 2.0);
            let image_size = texture.size_vec2();

            // Calculate size to fit within available space while maintaining aspect ratio
            let scale = (max_size.x / image_size.x).min(max_size.y / image_size.y);
            let display_size = image_size * scale;

            let total_display_size = display_size + egui::vec2(PADDING * 2.0, PADDING * 2.0);
            let x_offset = (available_size.x - total_display_size.x) / 2.0;
            let y_offset = (available_size.y - total_display_size.y) / 2.0;
            let start_pos = ui.cursor().min + egui::vec2(x_offset.max(0.0), y_offset.max(0.0));
            let target_rect = egui::Rect::from_min_size(start_pos, total_display_size);
            ui.allocate_rect(target_rect, egui::Sense::hover());

            let image_rect = egui::Rect::from_min_size(
                target_rect.min + egui::vec2(PADDING, PADDING),
                display_size,
            );
            self.engine
                .surface_mut()
                .set_rendered_size(display_size.x, display_size.y);

            ui.painter_at(target_rect).image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            self.publish_pointer(ctx, image_rect);
        });
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => EngineConfig::load(&path).unwrap_or_else(|e| {
            log::warn!("using default config, {} unreadable: {}", path, e);
            EngineConfig::default()
        }),
        None => EngineConfig::default(),
    };
    let handle_image = args.next().map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Square Cropper",
        options,
        Box::new(|cc| Ok(Box::new(SquareCropper::new(cc, config, handle_image)))),
    )
}
