//! Map export as scaled PNG, raw interchange bytes or glyph text

use crate::io::error::{GenerationError, Result, invalid_parameter};
use crate::spatial::{TileMap, TileType};
use image::{ImageBuffer, Rgba};
use std::path::Path;

/// File format chosen from an output path's extension
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Palette-coloured image
    Png,
    /// One tile id byte per cell, row-major
    Bytes,
    /// One glyph per tile, one line per row
    Text,
}

impl OutputFormat {
    /// Detect the format from `.png`, `.bin` or `.txt`
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is missing or unsupported
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("bin") => Ok(Self::Bytes),
            Some("txt") => Ok(Self::Text),
            _ => Err(invalid_parameter(
                "output",
                &path.display(),
                &"expected a .png, .bin or .txt file",
            )),
        }
    }
}

/// Write `map` to `output_path` in the format its extension names
///
/// # Errors
///
/// Returns an error if:
/// - The extension is not supported
/// - The parent directory cannot be created
/// - The file cannot be written
pub fn export_map(
    map: &TileMap,
    palette: &[[u8; 4]; TileType::COUNT],
    output_path: &Path,
    scale: u32,
) -> Result<()> {
    match OutputFormat::from_path(output_path)? {
        OutputFormat::Png => export_map_as_png(map, palette, output_path, scale),
        OutputFormat::Bytes => write_file(output_path, &map.to_bytes()),
        OutputFormat::Text => write_file(output_path, map.to_string().as_bytes()),
    }
}

/// Pixel size of a `width`×`height` tile grid drawn at `scale` pixels per tile
///
/// A zero scale is treated as one pixel per tile.
///
/// # Errors
///
/// Returns `InvalidParameter` if either side does not fit in a `u32`
pub fn scaled_dimensions(width: usize, height: usize, scale: u32) -> Result<(u32, u32)> {
    let scale = scale.max(1);
    let scaled = |tiles: usize| {
        u32::try_from(tiles)
            .ok()
            .and_then(|tiles| tiles.checked_mul(scale))
    };

    match (scaled(width), scaled(height)) {
        (Some(px_width), Some(px_height)) => Ok((px_width, px_height)),
        _ => Err(invalid_parameter(
            "scale",
            &scale,
            &format!("a {width}x{height} map at this scale exceeds the image size limit"),
        )),
    }
}

/// Render `map` with one `scale`×`scale` block of palette colour per tile
///
/// # Errors
///
/// Returns `InvalidParameter` if the scaled image size overflows
pub fn render_map(
    map: &TileMap,
    palette: &[[u8; 4]; TileType::COUNT],
    scale: u32,
) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
    let (width, height) = scaled_dimensions(map.width(), map.height(), scale)?;
    let scale = scale.max(1);

    Ok(ImageBuffer::from_fn(width, height, |px, py| {
        let x = (px / scale) as usize;
        let y = (py / scale) as usize;
        let rgba = map
            .tile(x, y)
            .and_then(|tile| palette.get(tile.index()))
            .copied()
            .unwrap_or([0, 0, 0, 0]);
        Rgba(rgba)
    }))
}

/// Export the map as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The scaled image size overflows
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_map_as_png(
    map: &TileMap,
    palette: &[[u8; 4]; TileType::COUNT],
    output_path: &Path,
    scale: u32,
) -> Result<()> {
    let img = render_map(map, palette, scale)?;

    create_parent_dir(output_path)?;
    img.save(output_path)
        .map_err(|e| GenerationError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

fn write_file(output_path: &Path, contents: &[u8]) -> Result<()> {
    create_parent_dir(output_path)?;
    std::fs::write(output_path, contents).map_err(|e| GenerationError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "write file",
        source: e,
    })
}

fn create_parent_dir(output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| GenerationError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}
