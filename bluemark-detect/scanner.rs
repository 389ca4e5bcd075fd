use bluemark_core::{PixelBuffer, Point, Threshold, CHANNELS};
use rayon::prelude::*;

/// Blueness of one RGB triple: `blue - max(red, green)`
#[inline(always)]
pub fn blueness(r: u8, g: u8, b: u8) -> i16 {
    b as i16 - r.max(g) as i16
}

/// Color-threshold scan turning an RGBA frame into candidate points
pub struct PixelScanner;

impl PixelScanner {
    /// Sequential row-major scan.
    ///
    /// A pixel is kept iff its blueness is strictly greater than `threshold`.
    /// Output order is scan order; the partition seeds depend on it.
    pub fn scan(buffer: &PixelBuffer<'_>, threshold: Threshold) -> Vec<Point> {
        let width = buffer.width();
        let threshold = threshold as i16;

        buffer
            .data()
            .chunks_exact(CHANNELS)
            .enumerate()
            .filter_map(|(index, px)| {
                let blueness = blueness(px[0], px[1], px[2]);
                (blueness > threshold).then(|| Point {
                    x: index % width,
                    y: index / width,
                    blueness,
                })
            })
            .collect()
    }

    /// Row-parallel scan; output is identical to [`PixelScanner::scan`]
    pub fn scan_parallel(buffer: &PixelBuffer<'_>, threshold: Threshold) -> Vec<Point> {
        let threshold = threshold as i16;

        (0..buffer.height())
            .into_par_iter()
            .flat_map_iter(|y| Self::scan_row(buffer.row(y), y, threshold))
            .collect()
    }

    fn scan_row(row: &[u8], y: usize, threshold: i16) -> Vec<Point> {
        let mut v = Vec::new();
        for (x, px) in row.chunks_exact(CHANNELS).enumerate() {
            let blueness = blueness(px[0], px[1], px[2]);
            if blueness > threshold {
                v.push(Point { x, y, blueness });
            }
        }
        v
    }
}
