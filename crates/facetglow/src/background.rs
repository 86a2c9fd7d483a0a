use std::path::Path;

use anyhow::{bail, Context, Result};
use uniforms::TextureHandle;

/// Handle reported for the bound background; the real id belongs to the renderer.
pub const BACKGROUND_TEXTURE: TextureHandle = TextureHandle(1);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Background {
    pub width: u32,
    pub height: u32,
}

impl Background {
    /// Reads only the image header; pixel data is never decoded.
    pub fn probe(path: &Path) -> Result<Self> {
        let (width, height) = image::image_dimensions(path)
            .with_context(|| format!("failed to read background image {}", path.display()))?;
        if width == 0 || height == 0 {
            bail!("background image {} has no pixels", path.display());
        }
        tracing::debug!(path = %path.display(), width, height, "probed background image");
        Ok(Self { width, height })
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
