use std::ops::RangeInclusive;
use std::time::Duration;

// The slider ranges; the config loader clamps into the same bounds so the
// menu and the file can never disagree about what is legal.
pub const FOV_RANGE: RangeInclusive<f32> = 60.0..=120.0;
pub const SENSITIVITY_RANGE: RangeInclusive<f32> = 10.0..=100.0;
pub const FPS_CAP_RANGE: RangeInclusive<u32> = 30..=240;

/// The three values the settings menu edits. Read every frame, so slider
/// changes take effect immediately.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Settings {
    pub fov_degrees: f32,
    pub mouse_sensitivity: f32,
    pub fps_cap: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fov_degrees: 80.0,
            mouse_sensitivity: 50.0,
            fps_cap: 60,
        }
    }
}

impl Settings {
    pub fn clamped(mut self) -> Self {
        self.fov_degrees = self.fov_degrees.clamp(*FOV_RANGE.start(), *FOV_RANGE.end());
        self.mouse_sensitivity = self
            .mouse_sensitivity
            .clamp(*SENSITIVITY_RANGE.start(), *SENSITIVITY_RANGE.end());
        self.fps_cap = self.fps_cap.clamp(*FPS_CAP_RANGE.start(), *FPS_CAP_RANGE.end());
        self
    }

    /// Wall-clock budget of one frame under the current cap.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.fps_cap as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.fov_degrees, 80.0);
        assert_eq!(settings.mouse_sensitivity, 50.0);
        assert_eq!(settings.fps_cap, 60);
    }

    #[test]
    fn test_clamping() {
        let settings = Settings {
            fov_degrees: 200.0,
            mouse_sensitivity: 3.0,
            fps_cap: 1000,
        }
        .clamped();
        assert_eq!(settings.fov_degrees, 120.0);
        assert_eq!(settings.mouse_sensitivity, 10.0);
        assert_eq!(settings.fps_cap, 240);
    }

    #[test]
    fn test_frame_budget() {
        let budget = Settings::default().frame_budget();
        assert!((budget.as_secs_f32() - 1.0 / 60.0).abs() < 1e-6);
    }
}
