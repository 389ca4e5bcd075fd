//! Frame loading, debug overlay rendering and report output for the
//! `bluemark` command.

use anyhow::{Context, Result};
use bluemark_detect::{blueness_chart, DetectionTrace, MarkerCandidate, Point};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut};
use serde::Serialize;
use std::path::Path;

pub use bluemark_detect;

/// Chart area below the frame; blueness tops out at 255
pub const CHART_HEIGHT: u32 = 256;

const GROUP_A_COLOR: [u8; 3] = [255, 0, 0];
const GROUP_B_COLOR: [u8; 3] = [255, 165, 0];
const GUIDE_COLOR: Rgba<u8> = Rgba([128, 128, 128, 255]);

/// Decoded frame in RGBA8
pub fn load_frame<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path = path.as_ref();
    let img = image::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(img.to_rgba8())
}

/// Renders one detection pass the way the debug view shows it.
///
/// Top `height` rows: group A points red and group B points orange, opacity
/// proportional to blueness, with a gray circle per marker. Below a gray
/// baseline: every candidate's blueness sorted strongest first.
pub fn render_overlay(trace: &DetectionTrace, width: u32, height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(width, height + CHART_HEIGHT, Rgba([0, 0, 0, 255]));

    plot_group(&mut canvas, &trace.group_a, GROUP_A_COLOR);
    plot_group(&mut canvas, &trace.group_b, GROUP_B_COLOR);

    for marker in &trace.candidates {
        draw_hollow_circle_mut(
            &mut canvas,
            (marker.centroid.x.round() as i32, marker.centroid.y.round() as i32),
            marker.radius.round().max(1.0) as i32,
            GUIDE_COLOR,
        );
    }

    let baseline = height as f32;
    draw_line_segment_mut(&mut canvas, (0.0, baseline), (width as f32, baseline), GUIDE_COLOR);

    for (x, blueness) in blueness_chart(&trace.points, width as usize) {
        let y = height as i64 + blueness as i64;
        if y > height as i64 && y < (height + CHART_HEIGHT) as i64 {
            canvas.put_pixel((x as u32).min(width - 1), y as u32, GUIDE_COLOR);
        }
    }

    canvas
}

fn plot_group(canvas: &mut RgbaImage, group: &[Point], color: [u8; 3]) {
    for p in group {
        let alpha = p.blueness.clamp(0, 255) as u16;
        let px = canvas.get_pixel_mut(p.x as u32, p.y as u32);
        for c in 0..3 {
            let over = color[c] as u16 * alpha;
            let under = px.0[c] as u16 * (255 - alpha);
            px.0[c] = ((over + under) / 255) as u8;
        }
    }
}

/// JSON report for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub source: String,
    pub width: u32,
    pub height: u32,
    pub threshold: u8,
    pub candidate_points: usize,
    pub dropped_points: usize,
    pub markers: Vec<MarkerCandidate>,
}

impl FrameReport {
    pub fn new(source: &Path, width: u32, height: u32, trace: &DetectionTrace) -> Self {
        Self {
            source: source.display().to_string(),
            width,
            height,
            threshold: trace.threshold,
            candidate_points: trace.points.len(),
            dropped_points: trace.dropped_count(),
            markers: trace.candidates.clone(),
        }
    }

    pub fn summary(&self) -> String {
        let mut out = format!(
            "{}: {}x{}, threshold={}, {} candidate points, {} marker(s)",
            self.source,
            self.width,
            self.height,
            self.threshold,
            self.candidate_points,
            self.markers.len()
        );
        for (i, m) in self.markers.iter().enumerate() {
            out.push_str(&format!(
                "\n  marker {}: centroid=({:.2}, {:.2}) radius~{:.2} points={}",
                i + 1,
                m.centroid.x,
                m.centroid.y,
                m.radius,
                m.point_count
            ));
        }
        out
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
