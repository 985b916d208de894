//! Pure volley geometry: array and bullet angle layout.
//!
//! Array offsets are anchored and interleaved around zero (0, +1, -1,
//! +2, -2, ...) so array 0 always sits on the base angle regardless of the
//! total array count. Bullet offsets span the configured spread centered
//! on the array direction, degrading to a full ring at >= 360 degrees.

use barrage_core::types::normalize_deg;

/// Angular offset of an array from the base angle, in degrees.
///
/// Index 0 is always centered; subsequent indices alternate sides at
/// growing multiples of the array spread: +1, -1, +2, -2, ...
pub fn anchored_array_offset(array_index: usize, total_arrays: usize, array_spread_deg: f64) -> f64 {
    if total_arrays <= 1 || array_index == 0 {
        return 0.0;
    }

    let rank = array_index.div_ceil(2) as f64;
    let sign = if array_index % 2 == 1 { 1.0 } else { -1.0 };
    sign * rank * array_spread_deg
}

/// Angular offset of a bullet within its array, in degrees.
///
/// Bullets span [-spread/2, +spread/2] with even endpoint spacing. A
/// single bullet sits at 0. A spread of >= 360 degrees places bullets on a
/// full evenly spaced ring without duplicating the 0/360 endpoint.
pub fn bullet_offset_within_array(bullet_index: usize, count: usize, spread_deg: f64) -> f64 {
    if count <= 1 {
        return 0.0;
    }

    if spread_deg >= 360.0 {
        let step = 360.0 / count as f64;
        return bullet_index as f64 * step;
    }

    let step = spread_deg / (count - 1) as f64;
    bullet_index as f64 * step - spread_deg / 2.0
}

/// Final normalized angle for one bullet of one array.
pub fn cast_angle(
    base_deg: f64,
    array_index: usize,
    total_arrays: usize,
    array_spread_deg: f64,
    bullet_index: usize,
    bullets_per_array: usize,
    bullet_spread_deg: f64,
) -> f64 {
    normalize_deg(
        base_deg
            + anchored_array_offset(array_index, total_arrays, array_spread_deg)
            + bullet_offset_within_array(bullet_index, bullets_per_array, bullet_spread_deg),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_zero_always_centered() {
        for total in 1..=10 {
            assert_eq!(anchored_array_offset(0, total, 90.0), 0.0);
        }
    }

    #[test]
    fn test_array_offsets_interleave() {
        // Indices 1,2,3,4 alternate sign at growing multiples of the step
        let step = 45.0;
        assert_eq!(anchored_array_offset(1, 5, step), step);
        assert_eq!(anchored_array_offset(2, 5, step), -step);
        assert_eq!(anchored_array_offset(3, 5, step), 2.0 * step);
        assert_eq!(anchored_array_offset(4, 5, step), -2.0 * step);
    }

    #[test]
    fn test_single_bullet_no_offset() {
        // No divide-by-zero for a one-bullet array
        assert_eq!(bullet_offset_within_array(0, 1, 30.0), 0.0);
        assert_eq!(bullet_offset_within_array(0, 1, 360.0), 0.0);
    }

    #[test]
    fn test_bullet_offsets_span_spread() {
        // 5 bullets across 30 degrees span -15..+15
        let offsets: Vec<f64> = (0..5)
            .map(|i| bullet_offset_within_array(i, 5, 30.0))
            .collect();
        assert_eq!(offsets, vec![-15.0, -7.5, 0.0, 7.5, 15.0]);
    }

    #[test]
    fn test_full_ring_no_duplicate_endpoint() {
        // 360-degree spread: 4 bullets at 0/90/180/270, not 0/120/240/360
        let offsets: Vec<f64> = (0..4)
            .map(|i| bullet_offset_within_array(i, 4, 360.0))
            .collect();
        assert_eq!(offsets, vec![0.0, 90.0, 180.0, 270.0]);
    }

    #[test]
    fn test_cast_angles_normalized() {
        for array in 0..7 {
            for bullet in 0..9 {
                let angle = cast_angle(350.0, array, 7, 70.0, bullet, 9, 120.0);
                assert!((0.0..360.0).contains(&angle), "angle {angle}");
            }
        }
    }

    #[test]
    fn test_three_array_fan_centered_on_base() {
        // 3 arrays, 5 bullets/array, 90deg array spread, 30deg bullet
        // spread: first array centered on base with bullets -15..+15
        let base = 90.0;
        let angles: Vec<f64> = (0..5).map(|b| cast_angle(base, 0, 3, 90.0, b, 5, 30.0)).collect();
        assert_eq!(angles, vec![75.0, 82.5, 90.0, 97.5, 105.0]);
    }
}
