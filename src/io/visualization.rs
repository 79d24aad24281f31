//! Frame capture and GIF generation for solver visualization

use crate::algorithm::bitset::Domain;
use crate::io::configuration::{
    MAX_CAPTURED_FRAMES, TILE_PALETTE, UNDETERMINED_COLOR, VIEWER_MIN_FRAME_DELAY_MS,
};
use crate::io::error::{GenerationError, Result, invalid_parameter};
use crate::io::image::scaled_dimensions;
use crate::spatial::{Grid, TileType};
use image::{Frame, Rgba, RgbaImage};
use ndarray::Array2;
use std::path::Path;

/// Grid snapshot taken after a solver cycle
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Cycle after which the snapshot was taken
    pub cycle: usize,
    /// Domains indexed by `[row, col]`
    pub domains: Array2<Domain>,
}

/// Captures grid snapshots for visualization
///
/// At most `MAX_CAPTURED_FRAMES` intermediate snapshots are kept. The capture
/// interval is chosen from the cell count so a normal run spreads its frames
/// over the whole generation. The final state is always recorded.
pub struct VisualizationCapture {
    pub(crate) frames: Vec<CapturedFrame>,
    width: usize,
    height: usize,
    interval: usize,
}

impl VisualizationCapture {
    /// Create a capture for a grid of the given size
    pub fn new(width: usize, height: usize) -> Self {
        let cells = width.saturating_mul(height).max(1);
        Self {
            frames: Vec::new(),
            width,
            height,
            interval: cells.div_ceil(MAX_CAPTURED_FRAMES).max(1),
        }
    }

    /// Record the grid after `cycle` if it falls on the capture interval
    pub fn record_cycle(&mut self, cycle: usize, grid: &Grid) {
        if cycle % self.interval == 0 && self.frames.len() < MAX_CAPTURED_FRAMES {
            self.frames.push(CapturedFrame {
                cycle,
                domains: grid.snapshot(),
            });
        }
    }

    /// Record the finished grid regardless of interval and frame limit
    pub fn record_final(&mut self, grid: &Grid) {
        let cycle = self.frames.last().map_or(0, |frame| frame.cycle + 1);
        self.frames.push(CapturedFrame {
            cycle,
            domains: grid.snapshot(),
        });
    }

    /// Returns all captured snapshots
    pub fn get_frames(&self) -> &[CapturedFrame] {
        &self.frames
    }

    /// Cycles between two captured snapshots
    pub const fn interval(&self) -> usize {
        self.interval
    }

    /// Export the captured frames as a GIF with automatic frame skipping
    ///
    /// Automatically skips frames if the requested frame rate exceeds viewer capabilities.
    /// For example, if `GIF_FRAME_DELAY_MS` is 5ms (200 FPS) but viewers only support 50ms (20 FPS),
    /// this will keep every 10th frame to maintain the apparent animation speed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - The scaled frame size overflows
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32, scale: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(invalid_parameter(
                "visualization",
                &0,
                &"no frames captured for visualization",
            ));
        }

        let dimensions = scaled_dimensions(self.width, self.height, scale)?;
        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms)
        } else {
            1
        };

        let frames = self.generate_frames(
            effective_delay_ms,
            skip_factor as usize,
            scale.max(1),
            dimensions,
        );

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GenerationError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| GenerationError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| GenerationError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(
        &self,
        delay_ms: u32,
        skip_factor: usize,
        scale: u32,
        dimensions: (u32, u32),
    ) -> Vec<Frame> {
        let last_index = self.frames.len().saturating_sub(1);
        let mut frames: Vec<Frame> = self
            .frames
            .iter()
            .enumerate()
            .filter(|(i, _)| i % skip_factor == 0 || *i == last_index)
            .map(|(_, captured)| render_frame(&captured.domains, delay_ms, scale, dimensions))
            .collect();

        // Final frame displays longer for better visibility
        let final_frame_delay = delay_ms * 25;
        if let Some(last_frame_img) = frames.last().map(|f| f.buffer().clone()) {
            frames.push(Frame::from_parts(
                last_frame_img,
                0,
                0,
                image::Delay::from_numer_denom_ms(final_frame_delay, 1),
            ));
        }

        frames
    }

    /// Returns the total number of captured snapshots
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

fn render_frame(
    domains: &Array2<Domain>,
    delay_ms: u32,
    scale: u32,
    (width, height): (u32, u32),
) -> Frame {
    let mut img = RgbaImage::new(width, height);

    for ((row, col), domain) in domains.indexed_iter() {
        let color = Rgba(domain_color(domain));
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(col as u32 * scale + dx, row as u32 * scale + dy, color);
            }
        }
    }

    Frame::from_parts(img, 0, 0, image::Delay::from_numer_denom_ms(delay_ms, 1))
}

/// Colour of a cell in an animation frame
///
/// Collapsed cells use their palette colour. Undetermined cells mix the
/// average colour of their candidates with `UNDETERMINED_COLOR`, darker the
/// more candidates remain. Empty domains use `UNDETERMINED_COLOR`.
pub fn domain_color(domain: &Domain) -> [u8; 4] {
    let count = domain.len();
    if count == 0 {
        return UNDETERMINED_COLOR;
    }

    let mut sums = [0u32; 4];
    for tile in domain.iter() {
        let color = TILE_PALETTE
            .get(tile.index())
            .copied()
            .unwrap_or(UNDETERMINED_COLOR);
        for (sum, channel) in sums.iter_mut().zip(color) {
            *sum += u32::from(channel);
        }
    }

    // Weight of the candidate average: 1 when collapsed, 0 when nothing is ruled out
    let known = (TileType::COUNT - count) as u32;
    let unknown = (count - 1) as u32;
    let total = known + unknown;
    let count = count as u32;

    let mut color = [0u8; 4];
    for ((out, sum), shade) in color.iter_mut().zip(sums).zip(UNDETERMINED_COLOR) {
        let average = sum / count;
        *out = if total == 0 {
            average as u8
        } else {
            ((average * known + u32::from(shade) * unknown) / total) as u8
        };
    }
    color
}
