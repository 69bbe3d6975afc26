use eframe::egui::{
    self, CentralPanel, ColorImage, Context, DroppedFile, Pos2, Rect, Slider, TextureHandle,
    TextureOptions, Vec2, ViewportBuilder, ViewportCommand, ViewportId,
};

use crate::overlay::{Mode, OverlayController, StickOutcome, ViewportCtx};
use crate::settings::Settings;
use crate::surface::ImageSurface;

/// Slider bounds, in percent. The store itself does not clamp; this control
/// is the only writer.
pub const OPACITY_MIN: u32 = 10;
pub const OPACITY_MAX: u32 = 95;

const IMAGE_WINDOW_SIZE: Vec2 = Vec2::new(400.0, 400.0);

const LABEL_STICK: &str = "Click to stick";
const LABEL_UNSTICK: &str = "Click to unstick";
const LABEL_NOTHING: &str = "There is nothing to stick!";

fn image_viewport_id() -> ViewportId {
    ViewportId::from_hash_of("image_window")
}

/// Sends commands to the image window viewport from the control panel's
/// context.
struct ImageViewport<'a> {
    ctx: &'a Context,
}

impl ViewportCtx for ImageViewport<'_> {
    fn send_viewport_cmd(&self, cmd: ViewportCommand) {
        self.ctx.send_viewport_cmd_to(image_viewport_id(), cmd);
    }

    fn request_repaint(&self) {
        self.ctx.request_repaint_of(image_viewport_id());
    }
}

/// The whole application: a control panel (root viewport) plus the image
/// window (immediate child viewport). Both windows share one settings value
/// and one save-and-exit close handler.
pub struct PinApp {
    pub settings: Settings,
    config_path: String,
    pub surface: ImageSurface,
    pub controller: OverlayController,
    stick_label: &'static str,
    texture: Option<TextureHandle>,
    /// Frame top-left and client size of the image window, captured while it
    /// is normal. The stick math runs on the client size because that is
    /// what the image was fitted to; the outer rect includes decorations and
    /// would skew the centering shift and the restored size.
    window_geometry: Option<(Pos2, Vec2)>,
    image_window_size: Vec2,
}

impl PinApp {
    pub fn new(settings: Settings, config_path: String) -> Self {
        Self {
            settings,
            config_path,
            surface: ImageSurface::default(),
            controller: OverlayController::default(),
            stick_label: LABEL_STICK,
            texture: None,
            window_geometry: None,
            image_window_size: IMAGE_WINDOW_SIZE,
        }
    }

    pub fn stick_label(&self) -> &str {
        self.stick_label
    }

    /// Record where the image window sits: frame top-left plus client size,
    /// the pair the stick translation and the unstick restore operate on.
    pub fn note_window_geometry(&mut self, frame_pos: Pos2, client_size: Vec2) {
        self.window_geometry = Some((frame_pos, client_size));
    }

    /// The stick/unstick button. The label doubles as the only user-visible
    /// feedback channel: a stick request without an image flips it to an
    /// explanatory message instead of raising an error.
    pub fn toggle_stick(&mut self, ctx: &Context) {
        self.toggle_stick_with(&ImageViewport { ctx });
    }

    pub fn toggle_stick_with(&mut self, viewport: &impl ViewportCtx) {
        match self.controller.mode() {
            Mode::Stuck => {
                self.controller.unstick(viewport);
                self.stick_label = LABEL_STICK;
            }
            Mode::Normal => {
                let Some((pos, size)) = self.window_geometry else {
                    // The window has not reported its geometry yet; sticking
                    // now would move the overlay to a made-up position. The
                    // no-image feedback still applies.
                    if !self.surface.has_image() {
                        self.stick_label = LABEL_NOTHING;
                    }
                    return;
                };
                match self
                    .controller
                    .stick(viewport, pos, size, self.surface.scaled_size())
                {
                    StickOutcome::Stuck => self.stick_label = LABEL_UNSTICK,
                    StickOutcome::NothingToStick => self.stick_label = LABEL_NOTHING,
                    StickOutcome::AlreadyStuck => {}
                }
            }
        }
    }

    /// Forward a platform file drop to the surface and invalidate the texture
    /// if it took the image.
    pub fn handle_dropped_files(&mut self, files: Vec<DroppedFile>) {
        if self.surface.accept_drop(&files, self.image_window_size) {
            self.texture = None;
        }
    }

    /// Shared close handler for both windows: persist settings, then close
    /// the root viewport, which ends the process.
    pub fn save_and_exit(&self, ctx: &Context) {
        if let Err(err) = self.settings.save(&self.config_path) {
            tracing::error!(%err, path = %self.config_path, "failed to save settings");
        }
        ctx.send_viewport_cmd_to(ViewportId::ROOT, ViewportCommand::Close);
    }

    fn control_panel(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            if ui.button(self.stick_label).clicked() {
                self.toggle_stick(ctx);
            }
            ui.separator();
            ui.label("Opacity");
            let mut percent = (self.settings.opacity * 100.0).round() as u32;
            if ui
                .add(Slider::new(&mut percent, OPACITY_MIN..=OPACITY_MAX).show_value(false))
                .changed()
            {
                self.settings.opacity = percent as f32 / 100.0;
            }
        });
    }

    fn image_window(&mut self, ctx: &Context) {
        ctx.show_viewport_immediate(
            image_viewport_id(),
            ViewportBuilder::default()
                .with_title("Image Window")
                .with_inner_size(IMAGE_WINDOW_SIZE),
            |ctx, _class| {
                let (inner_rect, outer_rect, close_requested, dropped_files) = ctx.input(|i| {
                    (
                        i.viewport().inner_rect,
                        i.viewport().outer_rect,
                        i.viewport().close_requested(),
                        i.raw.dropped_files.clone(),
                    )
                });

                // Remember where the window sits while it is normal; this is
                // the geometry the next stick starts from.
                if self.controller.mode() == Mode::Normal {
                    if let (Some(inner), Some(outer)) = (inner_rect, outer_rect) {
                        self.note_window_geometry(outer.min, inner.size());
                    }
                }

                let bounds = inner_rect.map(|r| r.size()).unwrap_or(IMAGE_WINDOW_SIZE);
                if (bounds - self.image_window_size).length() >= 1.0 {
                    self.image_window_size = bounds;
                    self.surface.rescale(bounds);
                }

                if !dropped_files.is_empty() {
                    self.handle_dropped_files(dropped_files);
                }

                if self.surface.take_dirty() {
                    self.texture = None;
                }
                if self.texture.is_none() {
                    if let Some(scaled) = self.surface.scaled() {
                        let color_image = ColorImage::from_rgba_unmultiplied(
                            [scaled.width() as usize, scaled.height() as usize],
                            scaled.as_raw(),
                        );
                        self.texture = Some(ctx.load_texture(
                            "dropped-image",
                            color_image,
                            TextureOptions::LINEAR,
                        ));
                    }
                }

                let opacity = self.settings.opacity;
                CentralPanel::default().show(ctx, |ui| {
                    if let Some(texture) = &self.texture {
                        let rect =
                            Rect::from_center_size(ui.max_rect().center(), texture.size_vec2());
                        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                        ui.painter().image(
                            texture.id(),
                            rect,
                            uv,
                            egui::Color32::WHITE.gamma_multiply(opacity),
                        );
                    }
                });

                if close_requested {
                    self.save_and_exit(ctx);
                }
            },
        );
    }
}

impl eframe::App for PinApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.control_panel(ctx);
        self.image_window(ctx);

        if ctx.input(|i| i.viewport().close_requested()) {
            self.save_and_exit(ctx);
        }
    }
}
