use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{FlashError, FlashResult};

/// Largest raster edge accepted, to avoid pathological allocations.
const MAX_DIM: u32 = 16_384;

/// Rasterize an SVG document into premultiplied RGBA8 at `width x height`.
pub fn rasterize_svg_to_rgba8(svg: &str, width: u32, height: u32) -> FlashResult<Vec<u8>> {
    if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
        return Err(FlashError::render(format!(
            "raster size {width}x{height} outside 1..={MAX_DIM}"
        )));
    }

    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opts).context("parse svg tree")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| FlashError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(&tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

/// Rasterize `svg` and write it as a PNG, creating parent directories as needed.
pub fn save_png(svg: &str, width: u32, height: u32, path: &Path) -> FlashResult<()> {
    let rgba = rasterize_svg_to_rgba8(svg, width, height)?;
    crate::encode::sink::ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &rgba,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/raster.rs"]
mod tests;
