use glam::Vec2;

/// Per-body motion state, written only by the physics step and by intent application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsComponent {
    pub velocity: Vec2,
    pub gravity_scale: f32,
    pub on_ground: bool,
    /// Position at the start of the most recent tick.
    pub prev_position: Vec2,
}

impl Default for PhysicsComponent {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
            on_ground: false,
            prev_position: Vec2::ZERO,
        }
    }
}

impl PhysicsComponent {
    pub fn at(position: Vec2) -> Self {
        Self {
            prev_position: position,
            ..Default::default()
        }
    }

    pub fn is_falling(&self) -> bool {
        self.velocity.y > 0.0
    }

    pub fn is_rising(&self) -> bool {
        self.velocity.y < 0.0
    }
}
