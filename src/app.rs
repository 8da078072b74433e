use eframe::egui;
use std::path::PathBuf;
use web_time::Instant;

use scuba_pic_fix::config::{ExportConfig, FACTOR_RANGE, FACTOR_STEP, IngestConfig};
use scuba_pic_fix::{EditError, FrameSink, PixelBuffer, RenderPipeline, ScaleFactors, image_io};

/// Keeps the preview texture in sync with the pipeline's derived frame.
pub struct PreviewSink {
    ctx: egui::Context,
    texture: Option<egui::TextureHandle>,
    size: [usize; 2],
}

impl PreviewSink {
    fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            texture: None,
            size: [0, 0],
        }
    }
}

impl FrameSink for PreviewSink {
    fn present(&mut self, frame: &PixelBuffer) {
        let size = [frame.width() as usize, frame.height() as usize];
        let image = egui::ColorImage::from_rgba_unmultiplied(size, frame.as_bytes());
        match &mut self.texture {
            Some(tex) => tex.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(self.ctx.load_texture("preview", image, egui::TextureOptions::LINEAR));
            }
        }
        self.size = size;
        self.ctx.request_repaint();
    }
}

pub struct EditorApp {
    pipeline: RenderPipeline<PreviewSink>,
    source_path: Option<PathBuf>,
    /// Slider positions; mirrors the pipeline after every change.
    factors: ScaleFactors,
    ingest: IngestConfig,
    export: ExportConfig,
    status: Option<String>,
    processing_time_ms: f64,
}

impl EditorApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            pipeline: RenderPipeline::new(PreviewSink::new(cc.egui_ctx.clone())),
            source_path: None,
            factors: ScaleFactors::NEUTRAL,
            ingest: IngestConfig::default(),
            export: ExportConfig::default(),
            status: None,
            processing_time_ms: 0.0,
        }
    }

    fn report(&mut self, err: EditError) {
        log::warn!("{err}");
        self.status = Some(err.to_string());
    }

    fn sync_sliders(&mut self) {
        if let Ok(factors) = self.pipeline.factors() {
            self.factors = factors;
        }
    }

    fn open_image(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "tiff", "tif", "bmp", "webp", "gif"])
            .pick_file()
        else {
            return;
        };

        let start = Instant::now();
        match image_io::load_image(&path, &self.ingest) {
            Ok(buffer) => {
                self.pipeline.on_load(buffer);
                self.processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;
                self.source_path = Some(path);
                self.status = None;
                self.sync_sliders();
            }
            Err(e) => self.report(e),
        }
    }

    fn save_result(&mut self) {
        let frame = match self.pipeline.export_frame() {
            Ok(frame) => frame,
            Err(e) => return self.report(e),
        };
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(&self.export.file_name)
            .add_filter("JPEG", &["jpg", "jpeg"])
            .add_filter("PNG", &["png"])
            .save_file()
        else {
            return;
        };

        match image_io::save_frame(frame, &path, &self.export) {
            Ok(()) => self.status = Some(format!("Saved {}", path.display())),
            Err(e) => self.report(e),
        }
    }

    fn apply_factors(&mut self) {
        let start = Instant::now();
        match self.pipeline.set_factors(self.factors) {
            Ok(()) => {
                self.processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;
                self.status = None;
            }
            Err(e) => self.report(e),
        }
        self.sync_sliders();
    }

    fn fix_colors(&mut self) {
        let start = Instant::now();
        match self.pipeline.auto_fix() {
            Ok(_) => {
                self.processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;
                self.status = None;
            }
            Err(e) => self.report(e),
        }
        self.sync_sliders();
    }

    fn reset(&mut self) {
        if let Err(e) = self.pipeline.reset() {
            self.report(e);
        }
        self.sync_sliders();
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let loaded = self.pipeline.is_loaded();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open Image").clicked() {
                    self.open_image();
                }
                if ui.add_enabled(loaded, egui::Button::new("Save Result")).clicked() {
                    self.save_result();
                }
                ui.separator();
                if ui.add_enabled(loaded, egui::Button::new("Fix Colors")).clicked() {
                    self.fix_colors();
                }
                if ui.add_enabled(loaded, egui::Button::new("Reset")).clicked() {
                    self.reset();
                }

                ui.separator();
                if let Ok(original) = self.pipeline.original() {
                    ui.label(format!(
                        "{}x{} | {:.0}ms",
                        original.width(),
                        original.height(),
                        self.processing_time_ms
                    ));
                }
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(status);
                }
            });
        });

        egui::SidePanel::left("controls")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.heading("Channel Gain");
                let mut changed = false;
                ui.add_enabled_ui(loaded, |ui| {
                    changed |= ui_factor_slider(ui, &mut self.factors.r, "Red");
                    changed |= ui_factor_slider(ui, &mut self.factors.g, "Green");
                    changed |= ui_factor_slider(ui, &mut self.factors.b, "Blue");
                });
                if changed {
                    self.apply_factors();
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let sink = self.pipeline.sink();
            if let Some(tex) = &sink.texture {
                egui::ScrollArea::both().show(ui, |ui| {
                    let available = ui.available_size();
                    let img_w = sink.size[0] as f32;
                    let img_h = sink.size[1] as f32;
                    let scale = f32::min(available.x / img_w, available.y / img_h).min(1.0);
                    let display_size = egui::vec2(img_w * scale, img_h * scale);
                    ui.image(egui::load::SizedTexture::new(tex.id(), display_size));
                });
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label("Open an image to begin");
                });
            }
        });
    }
}

fn ui_factor_slider(ui: &mut egui::Ui, value: &mut f64, label: &str) -> bool {
    ui.add(
        egui::Slider::new(value, FACTOR_RANGE)
            .step_by(FACTOR_STEP)
            .text(label),
    )
    .changed()
}
