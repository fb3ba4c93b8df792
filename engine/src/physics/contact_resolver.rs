use glam::Vec2;

use super::contact::{Contact, MIN_PENETRATION};
use crate::collider_component::ShapeKind;
use crate::entity::Entity;

/// Deepest contact of each class for one body in one tick.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DominantContacts {
    pub slope: Option<Contact>,
    pub vertical: Option<Contact>,
    pub horizontal: Option<Contact>,
}

impl DominantContacts {
    pub fn select(contacts: &[Contact]) -> Self {
        let mut dominant = DominantContacts::default();
        for contact in contacts.iter().filter(|c| c.depth >= MIN_PENETRATION) {
            let slot = if contact.shape == ShapeKind::Triangle {
                &mut dominant.slope
            } else if contact.is_vertical() {
                &mut dominant.vertical
            } else {
                &mut dominant.horizontal
            };
            if slot.is_none_or(|current| contact.depth > current.depth) {
                *slot = Some(*contact);
            }
        }
        dominant
    }

    pub fn is_empty(&self) -> bool {
        self.slope.is_none() && self.vertical.is_none() && self.horizontal.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub position: Vec2,
    pub velocity: Vec2,
    pub grounded: bool,
    /// Colliders whose contact moved the body this tick.
    pub applied: Vec<Entity>,
}

/// Resolves slope, then vertical, then horizontal contacts. Pure: the caller commits.
pub fn resolve(position: Vec2, velocity: Vec2, contacts: &[Contact]) -> Resolution {
    let dominant = DominantContacts::select(contacts);
    let mut out = Resolution {
        position,
        velocity,
        grounded: false,
        applied: Vec::new(),
    };

    if let Some(slope) = dominant.slope {
        let n = slope.normal;
        out.position += n * slope.depth;
        if n.y > 0.0 {
            out.velocity.y = 0.0;
        } else {
            let into = out.velocity.dot(n);
            if into < 0.0 {
                out.velocity -= n * into;
            }
        }
        out.grounded = slope.supports_from_below();
        out.applied.push(slope.other);
    } else if let Some(vertical) = dominant.vertical {
        let n = vertical.normal;
        out.position.y += n.y * vertical.depth;
        if out.velocity.y * n.y < 0.0 {
            out.velocity.y = 0.0;
        }
        out.grounded = vertical.supports_from_below();
        out.applied.push(vertical.other);
    }

    if let Some(horizontal) = dominant.horizontal
        && (dominant.slope.is_none() || horizontal.is_wall)
    {
        let n = horizontal.normal;
        out.position.x += n.x * horizontal.depth;
        if out.velocity.x * n.x < 0.0 {
            out.velocity.x = 0.0;
        }
        out.applied.push(horizontal.other);
    }

    log::trace!(
        "Resolved {} contact(s): {:?} -> {:?}, grounded={}",
        out.applied.len(),
        position,
        out.position,
        out.grounded
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f32::consts::FRAC_1_SQRT_2;

    fn contact(id: u32, normal: Vec2, depth: f32, shape: ShapeKind, is_wall: bool) -> Contact {
        Contact {
            other: Entity::from_raw(id),
            normal,
            depth,
            shape,
            is_wall,
            is_floor: !is_wall,
        }
    }

    #[test]
    fn keeps_deepest_per_class() {
        let contacts = [
            contact(1, Vec2::new(0.0, -1.0), 0.5, ShapeKind::Box, false),
            contact(2, Vec2::new(0.0, -1.0), 1.5, ShapeKind::Box, false),
            contact(3, Vec2::new(1.0, 0.0), 0.2, ShapeKind::Box, true),
            contact(4, Vec2::new(-1.0, 0.0), 0.7, ShapeKind::Box, true),
        ];
        let dominant = DominantContacts::select(&contacts);
        assert_eq!(dominant.vertical.map(|c| c.other.id()), Some(2));
        assert_eq!(dominant.horizontal.map(|c| c.other.id()), Some(4));
        assert!(dominant.slope.is_none());
    }

    #[test]
    fn floor_contact_grounds_and_stops_fall() {
        let contacts = [contact(1, Vec2::new(0.0, -1.0), 2.0, ShapeKind::Box, false)];
        let out = resolve(Vec2::new(0.0, -6.0), Vec2::new(3.0, 120.0), &contacts);
        assert_eq!(out.position, Vec2::new(0.0, -8.0));
        assert_eq!(out.velocity, Vec2::new(3.0, 0.0));
        assert!(out.grounded);
        assert_eq!(out.applied, vec![Entity::from_raw(1)]);
    }

    #[test]
    fn ceiling_contact_stops_rise_without_grounding() {
        let contacts = [contact(1, Vec2::new(0.0, 1.0), 1.0, ShapeKind::Box, false)];
        let out = resolve(Vec2::ZERO, Vec2::new(0.0, -80.0), &contacts);
        assert_eq!(out.position, Vec2::new(0.0, 1.0));
        assert_eq!(out.velocity.y, 0.0);
        assert!(!out.grounded);
    }

    #[test]
    fn wall_contact_zeroes_inward_velocity_only() {
        let contacts = [contact(1, Vec2::new(-1.0, 0.0), 0.5, ShapeKind::Box, true)];
        let out = resolve(Vec2::new(10.0, 0.0), Vec2::new(4.0, 0.0), &contacts);
        assert_eq!(out.position, Vec2::new(9.5, 0.0));
        assert_eq!(out.velocity.x, 0.0);

        let leaving = resolve(Vec2::new(10.0, 0.0), Vec2::new(-4.0, 0.0), &contacts);
        assert_eq!(leaving.velocity.x, -4.0);
    }

    #[test]
    fn slope_projects_velocity_and_grounds() {
        let n = Vec2::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2);
        let contacts = [contact(1, n, 2.0, ShapeKind::Triangle, false)];
        let out = resolve(Vec2::ZERO, Vec2::new(0.0, 100.0), &contacts);
        assert_approx_eq!(out.position.x, 2.0 * FRAC_1_SQRT_2, 1e-5);
        assert_approx_eq!(out.position.y, -2.0 * FRAC_1_SQRT_2, 1e-5);
        assert_approx_eq!(out.velocity.dot(n), 0.0, 1e-4);
        assert!(out.grounded);
    }

    #[test]
    fn slope_suppresses_untagged_horizontal_contacts() {
        let n = Vec2::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2);
        let side = contact(2, Vec2::new(-1.0, 0.0), 1.0, ShapeKind::Box, false);
        let slope = contact(1, n, 0.5, ShapeKind::Triangle, false);
        let out = resolve(Vec2::ZERO, Vec2::new(5.0, 0.0), &[slope, side]);
        assert_eq!(out.applied, vec![Entity::from_raw(1)]);

        let wall = Contact { is_wall: true, ..side };
        let out = resolve(Vec2::ZERO, Vec2::new(5.0, 0.0), &[slope, wall]);
        assert_eq!(out.applied, vec![Entity::from_raw(1), Entity::from_raw(2)]);
        assert_eq!(out.velocity.x, 0.0);
    }

    #[test]
    fn ceiling_slope_zeroes_vertical_velocity() {
        let n = Vec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2);
        let contacts = [contact(1, n, 1.0, ShapeKind::Triangle, false)];
        let out = resolve(Vec2::ZERO, Vec2::new(2.0, -60.0), &contacts);
        assert_eq!(out.velocity, Vec2::new(2.0, 0.0));
        assert!(!out.grounded);
    }

    #[test]
    fn sub_threshold_contacts_leave_state_unchanged() {
        let contacts = [
            contact(1, Vec2::new(0.0, -1.0), 0.005, ShapeKind::Box, false),
            contact(2, Vec2::new(1.0, 0.0), 0.0, ShapeKind::Box, true),
        ];
        let position = Vec2::new(3.0, 4.0);
        let velocity = Vec2::new(-2.0, 7.0);
        let out = resolve(position, velocity, &contacts);
        assert_eq!(out.position, position);
        assert_eq!(out.velocity, velocity);
        assert!(!out.grounded);
        assert!(out.applied.is_empty());
    }
}
