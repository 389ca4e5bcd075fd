/// Chart helpers for debug visualization
use bluemark_core::Point;

/// Blueness values sorted strongest first
pub fn blueness_profile(points: &[Point]) -> Vec<i16> {
    let mut profile: Vec<i16> = points.iter().map(|p| p.blueness).collect();
    profile.sort_unstable_by(|a, b| b.cmp(a));
    profile
}

/// Profile laid out across `chart_width`: entry `i` sits at `chart_width * i / n`
pub fn blueness_chart(points: &[Point], chart_width: usize) -> Vec<(f32, i16)> {
    let profile = blueness_profile(points);
    let n = profile.len() as f32;
    profile
        .into_iter()
        .enumerate()
        .map(|(i, b)| (chart_width as f32 * i as f32 / n, b))
        .collect()
}
