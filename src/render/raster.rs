use std::path::Path;

use anyhow::Context;
use resvg::tiny_skia;

use crate::foundation::error::{RingscopeError, RingscopeResult};

const MAX_DIM: u32 = 16_384;

/// Rasterized frame.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert to straight alpha in place; no-op when already straight.
    pub fn demultiply(&mut self) {
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut self.data);
            self.premultiplied = false;
        }
    }
}

/// SVG rasterizer with a font database shared across frames.
pub struct Rasterizer {
    options: usvg::Options<'static>,
}

impl Rasterizer {
    /// Rasterizer with the system fonts loaded, so axis labels resolve.
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        tracing::debug!(faces = options.fontdb.len(), "font database loaded");
        Self { options }
    }

    /// Rasterizer without any fonts; text is dropped.
    pub fn without_fonts() -> Self {
        Self {
            options: usvg::Options::default(),
        }
    }

    /// Parse and render `svg` at its intrinsic size. Pixels are premultiplied.
    #[tracing::instrument(skip_all)]
    pub fn rasterize(&self, svg: &str) -> RingscopeResult<FrameRGBA> {
        let tree = usvg::Tree::from_str(svg, &self.options)
            .map_err(|e| RingscopeError::render(format!("parse svg: {e}")))?;
        let size = tree.size().to_int_size();
        if size.width() > MAX_DIM || size.height() > MAX_DIM {
            return Err(RingscopeError::render(format!(
                "svg raster size too large: {}x{} (max {MAX_DIM}x{MAX_DIM})",
                size.width(),
                size.height()
            )));
        }
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
            .ok_or_else(|| RingscopeError::render("svg has an empty canvas"))?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        Ok(FrameRGBA {
            width: pixmap.width(),
            height: pixmap.height(),
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `frame` as a straight-alpha PNG, creating parent directories as needed.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> RingscopeResult<()> {
    let mut frame = frame.clone();
    frame.demultiply();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
