use eframe::egui::{Pos2, Vec2, ViewportCommand, WindowLevel};

/// Horizontal and vertical shift compensating for the title bar and frame
/// that disappear when the window turns frameless.
pub const FRAME_COMPENSATION: Vec2 = Vec2::new(1.0, 31.0);

/// Seam between the stick/unstick logic and the window manager. The real
/// implementation forwards to an `egui::Context`; tests record the commands.
pub trait ViewportCtx {
    fn send_viewport_cmd(&self, cmd: ViewportCommand);
    fn request_repaint(&self);
}

impl ViewportCtx for eframe::egui::Context {
    fn send_viewport_cmd(&self, cmd: ViewportCommand) {
        self.send_viewport_cmd(cmd);
    }

    fn request_repaint(&self) {
        self.request_repaint();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Stuck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickOutcome {
    Stuck,
    /// No image has been dropped yet, so there is nothing to pin.
    NothingToStick,
    /// The window is already stuck; the request is ignored rather than
    /// letting a repeated transition corrupt the remembered geometry.
    AlreadyStuck,
}

#[derive(Debug, Clone, Copy)]
struct PreStickGeometry {
    pos: Pos2,
    size: Vec2,
}

/// Drives the image window between its two modes.
///
/// In `Stuck` mode the window is frameless, always on top and transparent to
/// mouse input, resized to exactly the scaled image so it overlays other
/// applications without intercepting interaction. The controller only emits
/// viewport commands; it never talks to the OS directly.
#[derive(Default)]
pub struct OverlayController {
    mode: Mode,
    pre_stick: Option<PreStickGeometry>,
}

impl OverlayController {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Turn the image window into a pinned overlay.
    ///
    /// The window is moved so the image content stays visually where it was:
    /// the top-left corner shifts by half the difference between the window
    /// and the scaled image, plus [`FRAME_COMPENSATION`] for the vanishing
    /// title bar. The window then shrinks to exactly the scaled image.
    pub fn stick(
        &mut self,
        ctx: &impl ViewportCtx,
        win_pos: Pos2,
        win_size: Vec2,
        scaled: Option<Vec2>,
    ) -> StickOutcome {
        if self.mode == Mode::Stuck {
            return StickOutcome::AlreadyStuck;
        }
        let Some(scaled) = scaled else {
            return StickOutcome::NothingToStick;
        };

        let shift = Vec2::new(
            ((win_size.x - scaled.x) / 2.0).round(),
            ((win_size.y - scaled.y) / 2.0).round(),
        ) + FRAME_COMPENSATION;

        // Hide first so the reconfiguration does not flicker.
        ctx.send_viewport_cmd(ViewportCommand::Visible(false));
        ctx.send_viewport_cmd(ViewportCommand::OuterPosition(win_pos + shift));
        ctx.send_viewport_cmd(ViewportCommand::InnerSize(scaled));
        ctx.send_viewport_cmd(ViewportCommand::MousePassthrough(true));
        ctx.send_viewport_cmd(ViewportCommand::WindowLevel(WindowLevel::AlwaysOnTop));
        ctx.send_viewport_cmd(ViewportCommand::Decorations(false));
        ctx.send_viewport_cmd(ViewportCommand::Visible(true));
        ctx.request_repaint();

        tracing::debug!(?win_pos, ?win_size, ?scaled, "image window stuck");
        self.pre_stick = Some(PreStickGeometry {
            pos: win_pos,
            size: win_size,
        });
        self.mode = Mode::Stuck;
        StickOutcome::Stuck
    }

    /// Restore the exact pre-stick geometry and clear the overlay flags.
    /// A no-op when the window is not stuck.
    pub fn unstick(&mut self, ctx: &impl ViewportCtx) {
        let Some(prev) = self.pre_stick.take() else {
            return;
        };

        ctx.send_viewport_cmd(ViewportCommand::Visible(false));
        ctx.send_viewport_cmd(ViewportCommand::OuterPosition(prev.pos));
        ctx.send_viewport_cmd(ViewportCommand::InnerSize(prev.size));
        ctx.send_viewport_cmd(ViewportCommand::MousePassthrough(false));
        ctx.send_viewport_cmd(ViewportCommand::WindowLevel(WindowLevel::Normal));
        ctx.send_viewport_cmd(ViewportCommand::Decorations(true));
        ctx.send_viewport_cmd(ViewportCommand::Visible(true));
        ctx.request_repaint();

        tracing::debug!(pos = ?prev.pos, size = ?prev.size, "image window unstuck");
        self.mode = Mode::Normal;
    }
}
