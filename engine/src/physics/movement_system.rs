use serde::{Deserialize, Serialize};

use crate::physics_component::PhysicsComponent;

/// Controller tuning for the player body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    /// Horizontal velocity added per tick at full stick deflection.
    pub acceleration: f32,
    /// Vertical velocity of a full-pressure jump. Negative is up.
    pub jump_velocity: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            acceleration: 10.0,
            jump_velocity: -75.0,
        }
    }
}

/// What the player asked for this tick.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PlayerIntent {
    /// -1.0 (left) to 1.0 (right).
    pub move_x: f32,
    /// Jump released this tick, with the normalised hold pressure.
    pub jump: Option<f32>,
}

impl PlayerIntent {
    pub fn run(move_x: f32) -> Self {
        Self {
            move_x,
            jump: None,
        }
    }

    pub fn jump(pressure: f32) -> Self {
        Self {
            move_x: 0.0,
            jump: Some(pressure),
        }
    }
}

pub struct MovementSystem {}

impl MovementSystem {
    /// Applies the intent to the body's velocity. Returns `true` if a jump started.
    pub fn apply_intent(
        physics: &mut PhysicsComponent,
        intent: &PlayerIntent,
        settings: &MovementSettings,
    ) -> bool {
        if intent.move_x.is_finite() {
            physics.velocity.x += intent.move_x.clamp(-1.0, 1.0) * settings.acceleration;
        }

        let Some(pressure) = intent.jump else {
            return false;
        };
        if !physics.on_ground || physics.is_falling() {
            return false;
        }
        let pressure = if pressure.is_finite() {
            pressure.clamp(0.0, 1.0)
        } else {
            0.0
        };
        physics.velocity.y = settings.jump_velocity * pressure;
        physics.on_ground = false;
        log::trace!("Jump with pressure {}", pressure);
        true
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use glam::Vec2;

    use super::*;

    fn grounded() -> PhysicsComponent {
        PhysicsComponent {
            on_ground: true,
            ..Default::default()
        }
    }

    #[test]
    fn run_accumulates_horizontal_velocity() {
        let settings = MovementSettings::default();
        let mut physics = grounded();
        MovementSystem::apply_intent(&mut physics, &PlayerIntent::run(1.0), &settings);
        MovementSystem::apply_intent(&mut physics, &PlayerIntent::run(1.0), &settings);
        assert_approx_eq!(physics.velocity.x, 20.0);
        MovementSystem::apply_intent(&mut physics, &PlayerIntent::run(-0.5), &settings);
        assert_approx_eq!(physics.velocity.x, 15.0);
    }

    #[test]
    fn deflection_is_clamped() {
        let settings = MovementSettings::default();
        let mut physics = grounded();
        MovementSystem::apply_intent(&mut physics, &PlayerIntent::run(5.0), &settings);
        assert_approx_eq!(physics.velocity.x, 10.0);
        MovementSystem::apply_intent(&mut physics, &PlayerIntent::run(f32::NAN), &settings);
        assert_approx_eq!(physics.velocity.x, 10.0);
    }

    #[test]
    fn jump_scales_with_pressure() {
        let settings = MovementSettings::default();
        let mut physics = grounded();
        assert!(MovementSystem::apply_intent(
            &mut physics,
            &PlayerIntent::jump(0.5),
            &settings
        ));
        assert_approx_eq!(physics.velocity.y, -37.5);
        assert!(!physics.on_ground);
    }

    #[test]
    fn jump_requires_ground() {
        let settings = MovementSettings::default();
        let mut airborne = PhysicsComponent::default();
        assert!(!MovementSystem::apply_intent(
            &mut airborne,
            &PlayerIntent::jump(1.0),
            &settings
        ));
        assert_eq!(airborne.velocity, Vec2::ZERO);

        let mut falling = grounded();
        falling.velocity.y = 5.0;
        assert!(!MovementSystem::apply_intent(
            &mut falling,
            &PlayerIntent::jump(1.0),
            &settings
        ));
        assert_approx_eq!(falling.velocity.y, 5.0);
        assert!(falling.on_ground);
    }
}
