use std::path::{Path, PathBuf};

use eframe::egui::{DroppedFile, Vec2};
use image::{imageops::FilterType, RgbaImage};

/// A decoded image together with the path it was dropped from. The path is
/// what makes two drops comparable: re-dropping the same file is a no-op.
pub struct LoadedImage {
    pub pixels: RgbaImage,
    pub source: PathBuf,
}

/// Owns the dropped image and its window-fitted derivative.
///
/// `scaled` is `Some` exactly when `image` is `Some`; it is recomputed on
/// every window resize and every image change. The surface knows nothing
/// about textures or painting, which keeps it testable without a window.
#[derive(Default)]
pub struct ImageSurface {
    image: Option<LoadedImage>,
    scaled: Option<RgbaImage>,
    dirty: bool,
}

impl ImageSurface {
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Dimensions of the source image, before any fitting.
    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image
            .as_ref()
            .map(|img| (img.pixels.width(), img.pixels.height()))
    }

    pub fn scaled(&self) -> Option<&RgbaImage> {
        self.scaled.as_ref()
    }

    pub fn scaled_size(&self) -> Option<Vec2> {
        self.scaled
            .as_ref()
            .map(|img| Vec2::new(img.width() as f32, img.height() as f32))
    }

    /// True once after each change to `scaled`; the paint path uses this to
    /// know when its texture went stale.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Replace the owned image and re-derive the scaled copy. Dropping the
    /// same source path again changes nothing.
    pub fn set_image(&mut self, pixels: RgbaImage, source: PathBuf, bounds: Vec2) {
        if self.image.as_ref().is_some_and(|img| img.source == source) {
            return;
        }
        self.image = Some(LoadedImage { pixels, source });
        self.rescale(bounds);
    }

    /// Recompute `scaled` to fit `bounds` while preserving the aspect ratio.
    pub fn rescale(&mut self, bounds: Vec2) {
        let Some(img) = &self.image else {
            self.scaled = None;
            return;
        };
        let (w, h) = fit_within(img.pixels.width(), img.pixels.height(), bounds);
        self.scaled = Some(image::imageops::resize(
            &img.pixels,
            w,
            h,
            FilterType::Triangle,
        ));
        self.dirty = true;
    }

    /// Accept a platform file drop. The first file with a resolvable local
    /// path is used, the rest are ignored. Non-image extensions and files
    /// that fail to decode are rejected without touching any state.
    pub fn accept_drop(&mut self, files: &[DroppedFile], bounds: Vec2) -> bool {
        let Some(path) = files.iter().find_map(|file| file.path.clone()) else {
            return false;
        };
        if !is_image_path(&path) {
            tracing::debug!(path = %path.display(), "ignoring non-image drop");
            return false;
        }
        match image::open(&path) {
            Ok(decoded) => {
                tracing::info!(path = %path.display(), "image dropped");
                self.set_image(decoded.to_rgba8(), path, bounds);
                true
            }
            Err(err) => {
                tracing::debug!(%err, path = %path.display(), "dropped file failed to decode");
                false
            }
        }
    }
}

/// Largest size with the aspect ratio of `src_w x src_h` that fits `bounds`.
/// Scales up as well as down; dimensions never drop below one pixel.
pub fn fit_within(src_w: u32, src_h: u32, bounds: Vec2) -> (u32, u32) {
    if src_w == 0 || src_h == 0 || bounds.x < 1.0 || bounds.y < 1.0 {
        return (src_w.max(1), src_h.max(1));
    }
    let scale = (bounds.x / src_w as f32).min(bounds.y / src_h as f32);
    let w = (src_w as f32 * scale).round() as u32;
    let h = (src_h as f32 * scale).round() as u32;
    (w.max(1), h.max(1))
}

fn is_image_path(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    matches!(
        ext.as_deref(),
        Some("png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" | "ico" | "tiff" | "tif")
    )
}
