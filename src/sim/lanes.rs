//! Lane geometry
//!
//! Pure mapping from a viewport width and lane count to lane center
//! coordinates. Recomputed whenever the viewport changes; no state.

use crate::consts::{LANE_MARGIN, MIN_VIEW_WIDTH};

/// Horizontal center of each lane, dividing the usable width (viewport
/// minus symmetric margins) into equal segments.
///
/// Degenerate inputs clamp rather than fail: widths below
/// [`MIN_VIEW_WIDTH`] are raised to it, a zero lane count becomes one.
pub fn lane_centers(view_w: f32, lane_count: usize) -> Vec<f32> {
    let w = if view_w.is_finite() { view_w.max(MIN_VIEW_WIDTH) } else { MIN_VIEW_WIDTH };
    let count = lane_count.max(1);
    let usable = w - LANE_MARGIN * 2.0;
    (0..count)
        .map(|i| LANE_MARGIN + usable * (i as f32 + 0.5) / count as f32)
        .collect()
}

/// Index of the lane center closest to `x`.
pub fn nearest_lane(centers: &[f32], x: f32) -> usize {
    let mut best = 0;
    let mut best_dist = f32::MAX;
    for (i, &c) in centers.iter().enumerate() {
        let d = (c - x).abs();
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_are_evenly_spaced() {
        let lanes = lane_centers(420.0, 4);
        assert_eq!(lanes.len(), 4);
        let step = lanes[1] - lanes[0];
        for pair in lanes.windows(2) {
            assert!((pair[1] - pair[0] - step).abs() < 1e-3);
        }
        // Symmetric about the viewport center
        assert!((lanes[0] - LANE_MARGIN + lanes[3] + LANE_MARGIN - 420.0).abs() < 1e-3);
    }

    #[test]
    fn centers_stay_inside_margins() {
        for &w in &[300.0, 420.0, 520.0, 1100.0] {
            for &n in &[1usize, 2, 4, 7] {
                for &c in lane_centers(w, n).iter() {
                    assert!(c >= LANE_MARGIN && c <= w - LANE_MARGIN);
                }
            }
        }
    }

    #[test]
    fn degenerate_inputs_clamp() {
        let lanes = lane_centers(-50.0, 4);
        assert_eq!(lanes.len(), 4);
        for &c in &lanes {
            assert!(c.is_finite() && c > 0.0 && c < MIN_VIEW_WIDTH);
        }
        assert_eq!(lane_centers(f32::NAN, 0).len(), 1);
    }

    #[test]
    fn nearest_lane_picks_closest_center() {
        let lanes = lane_centers(420.0, 4);
        assert_eq!(nearest_lane(&lanes, 0.0), 0);
        assert_eq!(nearest_lane(&lanes, 420.0), 3);
        assert_eq!(nearest_lane(&lanes, lanes[2] + 1.0), 2);
    }
}
