// Paints EraserApp state into the eframe window and feeds input back to it

// Third party imports
use eframe::{
    self,
    egui::{self, InputState, Layout, RichText, TextureHandle, TextureOptions},
    emath::Align,
    epaint::{pos2, vec2, Color32, ColorImage, FontId, Rect, Stroke},
};

// Rust imports
use std::path::PathBuf;
use std::time::Instant;

// Local imports
use bg_eraser::palette::{
    ACCENT, BG_CARD, BG_DARK, BG_SURFACE, BORDER, TEXT_MUTED, TEXT_PRIMARY,
};
use bg_eraser::preview::{self, PreviewFrame};
use bg_eraser::progress::{self, Bar};
use bg_eraser::shapes::draw_rounded_rect;
use bg_eraser::EraserApp;

const DASH: f32 = 12.0;
const FOOTER: &str = "PNG · JPG · JPEG · WEBP  •  Transparent PNG output";

pub struct App {
    eraser: EraserApp,
    textures: Option<PreviewTextures>,
    texture_revision: u64,
    are_files_hovering: bool,
}

/// GPU copies of the current preview frame
struct PreviewTextures {
    checker: TextureHandle,
    thumbnail: TextureHandle,
    thumbnail_size: egui::Vec2,
    offset: egui::Vec2,
}

impl PreviewTextures {
    fn load(ctx: &egui::Context, frame: &PreviewFrame) -> Self {
        let (cw, ch) = frame.checker.dimensions();
        let checker = ColorImage::from_rgb([cw as usize, ch as usize], frame.checker.as_raw());
        let (tw, th) = frame.thumbnail.dimensions();
        let thumbnail = ColorImage::from_rgba_unmultiplied(
            [tw as usize, th as usize],
            frame.thumbnail.as_raw(),
        );

        Self {
            checker: ctx.load_texture("preview-checker", checker, TextureOptions::NEAREST),
            thumbnail: ctx.load_texture("preview-cutout", thumbnail, TextureOptions::LINEAR),
            thumbnail_size: vec2(tw as f32, th as f32),
            offset: vec2(frame.offset.0 as f32, frame.offset.1 as f32),
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.eraser.update(now);

        if let Some(path) = ctx.input_mut(|input| self.take_dropped_file(input)) {
            self.eraser.accept_dropped(path);
        }
        self.sync_textures(ctx);

        let panel = egui::Frame::none()
            .fill(BG_DARK)
            .inner_margin(egui::Margin::symmetric(30.0, 28.0));
        egui::CentralPanel::default().frame(panel).show(ctx, |ui| {
            ui.style_mut().spacing.item_spacing = vec2(0.0, 0.0);

            self.draw_header(ui);
            ui.add_space(14.0);
            Self::draw_divider(ui);
            ui.add_space(20.0);
            self.draw_preview_card(ui);
            ui.add_space(20.0);
            self.draw_status(ui);
            ui.add_space(10.0);
            self.draw_progress(ui, now);
            ui.add_space(22.0);
            self.draw_buttons(ui);
            ui.add_space(22.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(FOOTER).size(11.0).color(TEXT_MUTED));
            });
        });

        // Clicks from this frame: run them now and paint the result right away
        if self.eraser.handle_commands() {
            ctx.request_repaint();
        }
        if let Some(delay) = self.eraser.next_repaint(now) {
            ctx.request_repaint_after(delay);
        }
    }
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, eraser: EraserApp) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        Self {
            eraser,
            textures: None,
            texture_revision: 0,
            are_files_hovering: false,
        }
    }

    fn take_dropped_file(&mut self, input_state: &mut InputState) -> Option<PathBuf> {
        self.are_files_hovering = !input_state.raw.hovered_files.is_empty();

        if self.are_files_hovering || input_state.raw.dropped_files.is_empty() {
            return None;
        }
        let dropped = std::mem::take(&mut input_state.raw.dropped_files);
        if dropped.len() > 1 {
            log::warn!("{} files dropped, only the first one is used", dropped.len());
        }
        dropped.into_iter().find_map(|file| file.path)
    }

    /// Re-upload textures only when the preview itself changed
    fn sync_textures(&mut self, ctx: &egui::Context) {
        let revision = self.eraser.preview_revision();
        if revision == self.texture_revision {
            return;
        }
        self.textures = self
            .eraser
            .preview()
            .frame()
            .map(|frame| PreviewTextures::load(ctx, frame));
        self.texture_revision = revision;
    }

    fn draw_header(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("BG").size(24.0).strong().color(ACCENT));
            ui.label(RichText::new(" Eraser").size(24.0).strong().color(TEXT_PRIMARY));

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(RichText::new("Powered by U²-Net").size(11.0).color(TEXT_MUTED));
            });
        });
    }

    fn draw_divider(ui: &mut egui::Ui) {
        let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), 1.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 0.0, BORDER);
    }

    fn draw_preview_card(&self, ui: &mut egui::Ui) {
        let (w, h) = preview::AREA;
        let stroke_color = if self.are_files_hovering { ACCENT } else { BORDER };

        egui::Frame::none()
            .fill(BG_CARD)
            .stroke(Stroke::new(1.0, stroke_color))
            .show(ui, |ui| {
                let (response, painter) =
                    ui.allocate_painter(vec2(w as f32, h as f32), egui::Sense::hover());
                let rect = response.rect;

                match &self.textures {
                    Some(textures) => {
                        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                        painter.image(textures.checker.id(), rect, uv, Color32::WHITE);
                        let cutout =
                            Rect::from_min_size(rect.min + textures.offset, textures.thumbnail_size);
                        painter.image(textures.thumbnail.id(), cutout, uv, Color32::WHITE);
                    }
                    None => Self::draw_placeholder(&painter, rect, stroke_color),
                }
            });
    }

    fn draw_placeholder(painter: &egui::Painter, rect: Rect, border: Color32) {
        let inner = rect.shrink(preview::MARGIN as f32);
        let stroke = Stroke::new(1.5, border);
        let corners = [
            inner.left_top(),
            inner.right_top(),
            inner.right_bottom(),
            inner.left_bottom(),
            inner.left_top(),
        ];
        painter.add(egui::Shape::dashed_line(&corners, stroke, DASH, DASH));

        let center = rect.center();
        painter.text(
            center - vec2(0.0, 24.0),
            egui::Align2::CENTER_CENTER,
            "⬆",
            FontId::proportional(36.0),
            BORDER,
        );
        painter.text(
            center + vec2(0.0, 20.0),
            egui::Align2::CENTER_CENTER,
            "Drop or upload an image",
            FontId::proportional(14.0),
            TEXT_MUTED,
        );
        painter.text(
            center + vec2(0.0, 42.0),
            egui::Align2::CENTER_CENTER,
            "Background will be removed automatically",
            FontId::proportional(11.0),
            BORDER,
        );
    }

    fn draw_status(&self, ui: &mut egui::Ui) {
        let (rect, _) =
            ui.allocate_exact_size(vec2(ui.available_width(), 36.0), egui::Sense::hover());
        let painter = ui.painter();
        draw_rounded_rect(painter, rect, 8.0, BG_SURFACE);

        let status = self.eraser.status();
        let dot = pos2(rect.left() + 18.0, rect.center().y);
        painter.circle_filled(dot, 4.0, status.tone.color());
        painter.text(
            dot + vec2(14.0, 0.0),
            egui::Align2::LEFT_CENTER,
            &status.message,
            FontId::proportional(13.0),
            TEXT_MUTED,
        );
    }

    fn draw_progress(&self, ui: &mut egui::Ui, now: Instant) {
        let (rect, _) = ui.allocate_exact_size(
            vec2(ui.available_width(), progress::HEIGHT),
            egui::Sense::hover(),
        );
        let painter = ui.painter();
        painter.rect_filled(rect, 0.0, BG_SURFACE);

        match self.eraser.progress().bar(now) {
            Bar::Hidden => {}
            Bar::Running { fraction } => {
                let filled = Rect::from_min_size(
                    rect.min,
                    vec2(rect.width() * fraction.clamp(0.0, 1.0), rect.height()),
                );
                painter.rect_filled(filled, 0.0, ACCENT);
            }
            Bar::Terminal(color) => painter.rect_filled(rect, 0.0, color),
        }
    }

    fn draw_buttons(&mut self, ui: &mut egui::Ui) {
        let (upload, save) = self.eraser.buttons_mut();
        let spacing = 16.0;
        let row = upload.size().x + save.size().x + spacing;
        let lead = ((ui.available_width() - row) / 2.0).max(0.0);

        ui.horizontal(|ui| {
            ui.add_space(lead);
            ui.add(upload);
            ui.add_space(spacing);
            ui.add(save);
        });
    }
}
