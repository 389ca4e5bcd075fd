#![allow(dead_code)]

use bluemark_core::CHANNELS;

/// Initialize tracing subscriber for tests.
/// Safe to call multiple times - will only initialize once.
/// Respects RUST_LOG env var, defaults to "debug".
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

pub fn gray_frame(width: usize, height: usize) -> Vec<u8> {
    [120, 120, 120, 255].repeat(width * height)
}

pub fn set_pixel(data: &mut [u8], width: usize, x: usize, y: usize, rgba: [u8; 4]) {
    let i = (y * width + x) * CHANNELS;
    data[i..i + CHANNELS].copy_from_slice(&rgba);
}

/// Solid blue square of side `size` centered on (`cx`, `cy`)
pub fn blue_square(data: &mut [u8], width: usize, cx: usize, cy: usize, size: usize) {
    let half = size / 2;
    for y in cy - half..cy - half + size {
        for x in cx - half..cx - half + size {
            set_pixel(data, width, x, y, [10, 20, 250, 255]);
        }
    }
}
