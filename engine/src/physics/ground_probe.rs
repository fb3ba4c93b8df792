use glam::Vec2;

use crate::collider_component::{Body, ColliderComponent};
use crate::entity::Entity;
use crate::geom::Aabb;

/// Floor surface found beneath a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundHit {
    pub entity: Entity,
    pub surface_y: f32,
    /// Upward-facing normal of the supporting surface.
    pub normal: Vec2,
    /// Gap between the body's lower edge and the surface; negative when slightly sunk in.
    pub distance: f32,
}

/// How far below a body the probe looks this tick: the larger of the configured distance
/// and the distance the body is about to fall.
pub fn reach(aabb: &Aabb, probe_distance: f32, travel: f32) -> Aabb {
    Aabb::new(aabb.min, Vec2::new(aabb.max.x, aabb.max.y + probe_distance.max(travel)))
}

/// Top of a floor collider beneath `aabb` and its normal, if the collider can support it.
/// Boxes need horizontal overlap; slopes are sampled at the body's center column.
fn surface_beneath(
    aabb: &Aabb,
    position: Vec2,
    collider: &ColliderComponent,
) -> Option<(f32, Vec2)> {
    if !collider.role.is_floor() {
        return None;
    }
    match &collider.body {
        Body::Box(rect) => {
            let other = rect.aabb().translated(position);
            if aabb.max.x <= other.min.x || aabb.min.x >= other.max.x {
                return None;
            }
            Some((other.min.y, Vec2::NEG_Y))
        }
        Body::Triangle(tri) => {
            let tri = tri.translated(position);
            let center_x = aabb.center().x;
            let bounds = tri.aabb();
            if center_x < bounds.min.x || center_x > bounds.max.x {
                return None;
            }
            let normal = if tri.normal().y < 0.0 {
                tri.normal()
            } else {
                -tri.normal()
            };
            tri.surface_y_at(center_x).map(|y| (y, normal))
        }
        Body::Polygon(_) => None,
    }
}

/// Closest floor within `[-tolerance, max(distance, travel)]` of the body's lower edge.
pub fn probe<'a, I>(
    aabb: &Aabb,
    travel: f32,
    distance: f32,
    tolerance: f32,
    candidates: I,
) -> Option<GroundHit>
where
    I: IntoIterator<Item = (Entity, Vec2, &'a ColliderComponent)>,
{
    let query_distance = distance.max(travel);
    candidates
        .into_iter()
        .filter_map(|(entity, position, collider)| {
            let (surface_y, normal) = surface_beneath(aabb, position, collider)?;
            let gap = surface_y - aabb.max.y;
            (gap >= -tolerance && gap <= query_distance).then_some(GroundHit {
                entity,
                surface_y,
                normal,
                distance: gap,
            })
        })
        .min_by(|a, b| a.distance.abs().total_cmp(&b.distance.abs()))
}
