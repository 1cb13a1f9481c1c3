//! Grayscale template matcher used as the default [`ObjectTracker`].
//!
//! The region selected at `init` is kept as a fixed luma template. Each
//! `update` scores every placement within `search_radius` pixels of the last
//! position by the mean absolute difference over a sparse grid of template
//! samples and moves to the best one. A best score above `match_threshold`
//! means the target is lost.

use crate::frame::Frame;
use crate::geometry::BoundingBox;
use crate::tracker::ObjectTracker;

pub const DEFAULT_SEARCH_RADIUS: u32 = 24;
pub const DEFAULT_MATCH_THRESHOLD: f64 = 40.0;
const MAX_SAMPLES: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateConfig {
    pub search_radius: u32,
    /// Highest mean absolute luma difference (0-255) still counted as a match.
    pub match_threshold: f64,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            search_radius: DEFAULT_SEARCH_RADIUS,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }
}

struct Sample {
    dx: usize,
    dy: usize,
    luma: u8,
}

struct Lock {
    bbox: BoundingBox,
    frame_width: usize,
    frame_height: usize,
    samples: Vec<Sample>,
}

pub struct TemplateTracker {
    config: TemplateConfig,
    lock: Option<Lock>,
}

impl TemplateTracker {
    pub fn new(config: TemplateConfig) -> Self {
        Self { config, lock: None }
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }
}

impl ObjectTracker for TemplateTracker {
    fn init(&mut self, frame: &Frame, bbox: BoundingBox) -> bool {
        self.lock = None;
        if bbox.validate().is_err() || !bbox.within(frame.width, frame.height) {
            tracing::debug!("template region {} outside {}x{} frame", bbox, frame.width, frame.height);
            return false;
        }
        let luma = frame.luma_plane();
        let samples = sample_template(&luma, frame.width, &bbox);
        tracing::debug!("template locked at {} with {} samples", bbox, samples.len());
        self.lock = Some(Lock {
            bbox,
            frame_width: frame.width,
            frame_height: frame.height,
            samples,
        });
        true
    }

    fn update(&mut self, frame: &Frame) -> Option<BoundingBox> {
        let lock = self.lock.as_mut()?;
        if frame.width != lock.frame_width || frame.height != lock.frame_height {
            tracing::debug!(
                "frame size changed {}x{} -> {}x{}",
                lock.frame_width,
                lock.frame_height,
                frame.width,
                frame.height
            );
            self.lock = None;
            return None;
        }
        let luma = frame.luma_plane();
        let (x, y, score) = best_match(&luma, lock, self.config.search_radius);
        if score > self.config.match_threshold {
            tracing::debug!("best template score {:.1} above threshold", score);
            self.lock = None;
            return None;
        }
        lock.bbox = lock.bbox.moved_to(x, y);
        Some(lock.bbox)
    }
}

fn sample_template(luma: &[u8], stride: usize, bbox: &BoundingBox) -> Vec<Sample> {
    let width = bbox.width as usize;
    let height = bbox.height as usize;
    let step = sample_step(width * height);
    let (x0, y0) = (bbox.x as usize, bbox.y as usize);
    let mut samples = Vec::new();
    for dy in (0..height).step_by(step) {
        for dx in (0..width).step_by(step) {
            samples.push(Sample {
                dx,
                dy,
                luma: luma[(y0 + dy) * stride + x0 + dx],
            });
        }
    }
    samples
}

fn sample_step(area: usize) -> usize {
    let mut step = 1;
    while area / (step * step) > MAX_SAMPLES {
        step += 1;
    }
    step
}

/// Best placement (x, y, mean absolute difference) around the last position.
/// Placements that leave the frame are not considered.
fn best_match(luma: &[u8], lock: &Lock, radius: u32) -> (i32, i32, f64) {
    let radius = radius as i32;
    let max_x = lock.frame_width as i32 - lock.bbox.width as i32;
    let max_y = lock.frame_height as i32 - lock.bbox.height as i32;
    let mut best = (lock.bbox.x, lock.bbox.y, f64::INFINITY);
    for y in (lock.bbox.y - radius).max(0)..=(lock.bbox.y + radius).min(max_y) {
        for x in (lock.bbox.x - radius).max(0)..=(lock.bbox.x + radius).min(max_x) {
            let score = mean_abs_diff(luma, lock, x as usize, y as usize);
            if score < best.2 {
                best = (x, y, score);
            }
        }
    }
    best
}

fn mean_abs_diff(luma: &[u8], lock: &Lock, x: usize, y: usize) -> f64 {
    let stride = lock.frame_width;
    let total: u64 = lock
        .samples
        .iter()
        .map(|s| luma[(y + s.dy) * stride + x + s.dx].abs_diff(s.luma) as u64)
        .sum();
    total as f64 / lock.samples.len().max(1) as f64
}
