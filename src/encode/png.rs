use std::path::Path;

use crate::{
    foundation::error::{AutographError, AutographResult},
    render::backend::FrameRGBA,
    style::request::RenderRequest,
};

/// File name offered for a saved signature: `signature-<name>.png`, whitespace runs as `-`.
pub fn download_file_name(request: &RenderRequest) -> String {
    let slug = request.text().split_whitespace().collect::<Vec<_>>().join("-");
    format!("signature-{slug}.png")
}

/// Convert premultiplied RGBA8 to straight alpha in place.
pub fn unpremultiply_rgba8(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// Frame pixels as straight-alpha RGBA8, validated against the frame size.
pub fn straight_rgba8(frame: &FrameRGBA) -> AutographResult<Vec<u8>> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected {
        return Err(AutographError::encode(format!(
            "frame data is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }
    let mut data = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8(&mut data);
    }
    Ok(data)
}

/// Encode a frame as PNG bytes (RGBA, transparent where nothing was drawn).
pub fn encode_png(frame: &FrameRGBA) -> AutographResult<Vec<u8>> {
    let data = straight_rgba8(frame)?;
    let img = image::RgbaImage::from_raw(frame.width, frame.height, data)
        .ok_or_else(|| AutographError::encode("frame buffer does not match its dimensions"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| AutographError::encode(format!("png encode: {e}")))?;
    Ok(buf)
}

/// Write a frame to `path` as PNG, creating parent directories.
#[tracing::instrument(skip(frame), fields(path = %path.display()))]
pub fn save_png(frame: &FrameRGBA, path: &Path) -> AutographResult<()> {
    ensure_parent_dir(path)?;
    let data = straight_rgba8(frame)?;
    image::save_buffer_with_format(
        path,
        &data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| AutographError::encode(format!("write png '{}': {e}", path.display())))?;
    tracing::debug!("png written");
    Ok(())
}

pub fn ensure_parent_dir(path: &Path) -> AutographResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
