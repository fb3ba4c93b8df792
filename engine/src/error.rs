use thiserror::Error;

use crate::collider_component::CollisionType;
use crate::entity::Entity;

/// Reasons a slope triangle is rejected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TriangleError {
    #[error("triangle vertex is NaN or infinite")]
    NonFiniteVertex,

    #[error("triangle has two or more coincident vertices")]
    DuplicateVertices,

    #[error("triangle vertices are collinear")]
    Collinear,

    #[error("triangle area {area} is below the minimum of {min}")]
    AreaTooSmall { area: f32, min: f32 },

    #[error("triangle area {area} exceeds the maximum of {max}")]
    AreaTooLarge { area: f32, max: f32 },

    #[error("triangle has no right angle")]
    NotRightAngled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolygonError {
    #[error("polygon coordinate list has odd length {0}; expected x,y pairs")]
    OddCoordinateCount(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayerError {
    #[error("maximum number of collision layers ({max}) exceeded")]
    LimitExceeded { max: usize },

    #[error("collision layer index {0} is out of range")]
    OutOfRange(usize),
}

/// Top-level error for world mutations. Geometry and layer errors convert into it so
/// level-building code can use `?` across all of them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    #[error("Triangle Error: {0}")]
    Triangle(#[from] TriangleError),

    #[error("Polygon Error: {0}")]
    Polygon(#[from] PolygonError),

    #[error("Layer Error: {0}")]
    Layer(#[from] LayerError),

    #[error("entity {0} is not alive")]
    DeadEntity(Entity),

    #[error("entity {0} is not a dynamic body")]
    NotDynamic(Entity),

    #[error("entity {entity} cannot become {requested:?}")]
    InvalidCollisionType {
        entity: Entity,
        requested: CollisionType,
    },

    #[error("bounds must have non-negative width and height, got {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },
}
