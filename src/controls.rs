//! User gestures shared by the main window and the popout.

/// A transport or slider action, independent of which window produced it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Gesture {
    TogglePlayPause,
    Previous,
    Next,
    /// Move the progress slider by this many seconds.
    SeekBy(i64),
    /// Move the volume slider by this many percent.
    VolumeBy(i64),
}

/// Where a slider lands after moving `current` by `delta`: always within `0..=max`.
pub fn slider_value(current: u32, delta: i64, max: u32) -> u32 {
    let v = (i64::from(current) + delta).clamp(0, i64::from(max));
    u32::try_from(v).unwrap_or(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_moves_within_bounds() {
        assert_eq!(slider_value(10, 5, 245), 15);
        assert_eq!(slider_value(10, -5, 245), 5);
        assert_eq!(slider_value(2, -5, 245), 0);
        assert_eq!(slider_value(243, 5, 245), 245);
        assert_eq!(slider_value(98, 5, 100), 100);
    }

    #[test]
    fn slider_pulls_out_of_range_values_back_in() {
        // A permissive seek can leave time past the end; the slider cannot show that.
        assert_eq!(slider_value(120, 0, 100), 100);
        assert_eq!(slider_value(120, -5, 100), 100);
    }
}
