use serde::{Deserialize, Serialize};

/// Downward acceleration (y grows downward) with the vertical speed clamp it feeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gravity {
    pub magnitude: f32,
    /// Fastest upward speed; negative.
    pub max_rise_speed: f32,
    /// Fastest downward speed; positive.
    pub max_fall_speed: f32,
}

impl Default for Gravity {
    fn default() -> Self {
        Self {
            magnitude: 400.0,
            max_rise_speed: -150.0,
            max_fall_speed: 200.0,
        }
    }
}

impl Gravity {
    pub fn new(magnitude: f32, max_rise_speed: f32, max_fall_speed: f32) -> Self {
        Self {
            magnitude,
            max_rise_speed,
            max_fall_speed,
        }
    }

    pub fn clamp(&self, vy: f32) -> f32 {
        vy.clamp(self.max_rise_speed, self.max_fall_speed.max(self.max_rise_speed))
    }

    /// Vertical velocity after `delta_time` of gravity scaled by `scale`, clamped.
    pub fn integrate(&self, vy: f32, scale: f32, delta_time: f32) -> f32 {
        self.clamp(vy + self.magnitude * scale * delta_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn gravity_accelerates_downward() {
        let gravity = Gravity::default();
        assert_approx_eq!(gravity.integrate(0.0, 1.0, 1.0 / 60.0), 400.0 / 60.0, 1e-5);
        assert_approx_eq!(gravity.integrate(0.0, 0.5, 1.0 / 60.0), 200.0 / 60.0, 1e-5);
        assert_eq!(gravity.integrate(10.0, 0.0, 1.0 / 60.0), 10.0);
    }

    #[test]
    fn gravity_clamps_both_directions() {
        let gravity = Gravity::default();
        assert_eq!(gravity.integrate(199.0, 1.0, 1.0), 200.0);
        assert_eq!(gravity.integrate(-400.0, 1.0, 0.0), -150.0);
        assert_eq!(gravity.integrate(-100.0, 1.0, 0.0), -100.0);
    }

    #[test]
    fn inverted_limits_pin_to_rise_speed() {
        let gravity = Gravity::new(100.0, -20.0, -40.0);
        assert_eq!(gravity.integrate(0.0, 1.0, 1.0), -20.0);
        assert_eq!(gravity.integrate(-90.0, 0.0, 1.0), -20.0);
    }
}
