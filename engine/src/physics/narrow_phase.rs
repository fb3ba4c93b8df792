use glam::Vec2;

use super::contact::{Contact, MIN_PENETRATION, Overlap};
use crate::collider_component::{Body, ColliderComponent, ShapeKind};
use crate::entity::Entity;
use crate::geom::{Aabb, Polygon, Triangle};

/// Normal and depth of an overlap, before entity metadata is attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    pub normal: Vec2,
    pub depth: f32,
}

/// Strict separation test: shared edges are not overlap.
fn separated(a: &Aabb, b: &Aabb) -> bool {
    a.min.x >= b.max.x || a.max.x <= b.min.x || a.min.y >= b.max.y || a.max.y <= b.min.y
}

/// Sign of the separation normal along `axis` (0 = x, 1 = y): `-1` pushes `a` toward
/// negative coordinates. Coincident centers fall back to the min edge, then to the other
/// axis' center, so swapping `a` and `b` flips the sign unless the boxes are identical.
fn separation_sign(a: &Aabb, b: &Aabb, axis: usize) -> f32 {
    let other = 1 - axis;
    let keys = [
        (a.center()[axis], b.center()[axis]),
        (a.min[axis], b.min[axis]),
        (a.center()[other], b.center()[other]),
    ];
    keys.iter()
        .find(|(ka, kb)| ka != kb)
        .map_or(1.0, |(ka, kb)| if ka < kb { -1.0 } else { 1.0 })
}

/// Minimum-overlap axis separation. The normal points from `b`'s center toward `a`'s;
/// ties resolve on the vertical axis.
pub fn box_vs_box(a: &Aabb, b: &Aabb) -> Option<Penetration> {
    if separated(a, b) {
        return None;
    }

    let overlap = a.overlap(b);
    if overlap.x < overlap.y {
        if overlap.x < MIN_PENETRATION {
            return None;
        }
        Some(Penetration {
            normal: Vec2::new(separation_sign(a, b, 0), 0.0),
            depth: overlap.x,
        })
    } else {
        if overlap.y < MIN_PENETRATION {
            return None;
        }
        Some(Penetration {
            normal: Vec2::new(0.0, separation_sign(a, b, 1)),
            depth: overlap.y,
        })
    }
}

/// Single-point slope probe at the box's horizontal center. A falling (or resting) box is
/// tested with its lower edge, a rising box with its upper edge; the normal always opposes
/// the motion, so a ramp hit from the wrong side reports the flipped normal.
pub fn box_vs_triangle(a: &Aabb, velocity: Vec2, tri: &Triangle) -> Option<Penetration> {
    if separated(a, &tri.aabb()) {
        return None;
    }

    let surface_y = tri.surface_y_at(a.center().x)?;
    let normal = tri.normal();

    let (depth, normal) = if velocity.y >= 0.0 {
        if !(a.max.y >= surface_y && a.min.y < surface_y) {
            return None;
        }
        let normal = if normal.y < 0.0 { normal } else { -normal };
        (a.max.y - surface_y, normal)
    } else {
        if !(a.min.y <= surface_y && a.max.y > surface_y) {
            return None;
        }
        let normal = if normal.y > 0.0 { normal } else { -normal };
        (surface_y - a.min.y, normal)
    };

    if depth < MIN_PENETRATION {
        return None;
    }
    Some(Penetration { normal, depth })
}

/// Detection only; box-vs-polygon has no resolution.
pub fn box_vs_polygon(a: &Aabb, poly: &Polygon) -> bool {
    !separated(a, &poly.aabb()) && poly.intersects_aabb(a)
}

/// Not supported; slopes never move.
pub fn triangle_vs_triangle(_a: &Triangle, _b: &Triangle) -> Option<Penetration> {
    None
}

/// Tests a dynamic box against a static collider placed at `position`.
pub fn collide_static(
    a: &Aabb,
    velocity: Vec2,
    other: Entity,
    position: Vec2,
    collider: &ColliderComponent,
) -> Option<Overlap> {
    let shape = collider.shape();
    let penetration = match &collider.body {
        Body::Box(rect) => box_vs_box(a, &rect.aabb().translated(position)),
        Body::Triangle(tri) => box_vs_triangle(a, velocity, &tri.translated(position)),
        Body::Polygon(poly) => {
            let local = a.translated(-position);
            return box_vs_polygon(&local, poly).then_some(Overlap::Unresolved { other, shape });
        }
    }?;

    Some(Overlap::Contact(Contact {
        other,
        normal: penetration.normal,
        depth: penetration.depth,
        shape,
        is_wall: collider.role.is_wall(),
        is_floor: collider.role.is_floor(),
    }))
}

/// Dynamic pairs are detected but never resolved.
pub fn collide_dynamic(a: &Aabb, other: Entity, b: &Aabb) -> Option<Overlap> {
    box_vs_box(a, b).map(|_| Overlap::Unresolved {
        other,
        shape: ShapeKind::Box,
    })
}
