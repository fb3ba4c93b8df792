use glam::Vec2;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TransformComponent {
    pub position: Vec2,
}

impl TransformComponent {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
        }
    }
}
