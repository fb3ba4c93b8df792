use std::collections::HashSet;
use std::time::Duration;

use glam::Vec2;

use super::broad_phase::{self, Candidates};
use super::collision_event::{CollisionEvent, CollisionEventTracker, CollisionInfo};
use super::collision_layers::{CollisionLayers, Layer};
use super::contact::{MIN_VELOCITY, Overlap};
use super::contact_resolver;
use super::ground_probe::{self, GroundHit};
use super::movement_system::{MovementSettings, MovementSystem, PlayerIntent};
use super::narrow_phase;
use super::physics_config::PhysicsConfig;
use super::spatial_hash_grid::{CellKey, SpatialHashGrid};
use crate::collider_component::{
    Body, ColliderComponent, CollisionRole, CollisionType, ShapeKind,
};
use crate::components::Components;
use crate::components::bounds_component::BoundsComponent;
use crate::components::sleep_component::SleepComponent;
use crate::entity::{Entity, EntityAllocator};
use crate::error::PhysicsError;
use crate::geom::{Aabb, Polygon, Rectangle, Triangle};
use crate::physics_component::PhysicsComponent;
use crate::transform_component::TransformComponent;
use crate::utils::scope_timer::ScopeTimer;

/// Static collider geometry, relative to the collider's position.
#[derive(Debug, Clone, PartialEq)]
pub enum ColliderShape {
    Box { width: f32, height: f32 },
    Triangle([f32; 6]),
    Polygon(Vec<f32>),
}

/// Read-only view of one dynamic body for debug overlays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub entity: Entity,
    pub aabb: Aabb,
    pub velocity: Vec2,
    pub on_ground: bool,
    pub awake: bool,
}

/// Owns every entity, component store, grid and the layer matrix, and advances them one
/// fixed tick at a time.
#[derive(Debug)]
pub struct PhysicsWorld {
    config: PhysicsConfig,
    entities: EntityAllocator,
    components: Components,
    layers: CollisionLayers,
    static_grid: SpatialHashGrid,
    dynamic_grid: SpatialHashGrid,
    events: CollisionEventTracker,
    unresolved_seen: HashSet<ShapeKind>,
    tick: u64,
    last_step_duration: Duration,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

fn snap_velocity(velocity: Vec2) -> Vec2 {
    Vec2::new(
        if velocity.x.abs() < MIN_VELOCITY { 0.0 } else { velocity.x },
        if velocity.y.abs() < MIN_VELOCITY { 0.0 } else { velocity.y },
    )
}

impl PhysicsWorld {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            entities: EntityAllocator::new(),
            components: Components::default(),
            layers: CollisionLayers::new(),
            static_grid: SpatialHashGrid::new(config.cell_size),
            dynamic_grid: SpatialHashGrid::new(config.cell_size),
            events: CollisionEventTracker::default(),
            unresolved_seen: HashSet::new(),
            tick: 0,
            last_step_duration: Duration::ZERO,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn components(&self) -> &Components {
        &self.components
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Wall time spent in the most recent accepted `step`.
    pub fn last_step_duration(&self) -> Duration {
        self.last_step_duration
    }

    // --- layers ---

    pub fn register_layer(&mut self, name: &str) -> Result<Layer, PhysicsError> {
        Ok(self.layers.register(name)?)
    }

    pub fn layer_name(&self, layer: Layer) -> Option<&str> {
        self.layers.name(layer)
    }

    pub fn enable_collision(&mut self, a: Layer, b: Layer) {
        self.layers.enable(a, b);
    }

    pub fn disable_collision(&mut self, a: Layer, b: Layer) {
        self.layers.disable(a, b);
    }

    pub fn should_collide(&self, a: Layer, b: Layer) -> bool {
        self.layers.should_collide(a, b)
    }

    pub fn set_layer(&mut self, entity: Entity, layer: Layer) -> Result<(), PhysicsError> {
        let collider = self
            .components
            .colliders
            .get_mut(entity)
            .ok_or(PhysicsError::DeadEntity(entity))?;
        collider.layer = layer;
        Ok(())
    }

    /// Switches an entity between its native collision type and `Ignore`. Dynamic bodies
    /// cannot become static and static geometry cannot become dynamic.
    pub fn set_collision_type(
        &mut self,
        entity: Entity,
        collision_type: CollisionType,
    ) -> Result<(), PhysicsError> {
        let native = if self.components.physics.contains(entity) {
            CollisionType::Dynamic
        } else {
            CollisionType::Static
        };
        let collider = self
            .components
            .colliders
            .get_mut(entity)
            .ok_or(PhysicsError::DeadEntity(entity))?;
        if collision_type != CollisionType::Ignore && collision_type != native {
            return Err(PhysicsError::InvalidCollisionType {
                entity,
                requested: collision_type,
            });
        }
        if collider.collision_type != collision_type {
            log::debug!("{} collision type set to {:?}", entity, collision_type);
        }
        collider.collision_type = collision_type;
        Ok(())
    }

    // --- lifecycle ---

    /// Adds immovable level geometry at `(x, y)`.
    pub fn add_static_collider(
        &mut self,
        x: f32,
        y: f32,
        shape: ColliderShape,
        role: CollisionRole,
    ) -> Result<Entity, PhysicsError> {
        let position = Vec2::new(x, y);
        let body = match shape {
            ColliderShape::Box { width, height } => {
                BoundsComponent::new(width, height, Vec2::ZERO)?;
                Body::Box(Rectangle::new(0.0, 0.0, width, height))
            }
            ColliderShape::Triangle(coords) => Body::Triangle(Triangle::new(Vec2::ZERO, coords)?),
            ColliderShape::Polygon(coords) => Body::Polygon(Polygon::new(Vec2::ZERO, &coords)?),
        };
        let bounds = BoundsComponent::from_local_aabb(body.local_aabb())?;

        let entity = self.entities.create();
        let aabb = bounds.world_aabb(position);
        let padding = self.config.static_padding;
        match &body {
            Body::Box(_) => self.static_grid.insert(entity, &aabb, padding),
            shaped => self
                .static_grid
                .insert_where(entity, &aabb, padding, |cell| shaped.touches_cell(position, cell)),
        }

        log::debug!(
            "Spawned static {:?} collider {} at {:?} ({} cells)",
            body.kind(),
            entity,
            position,
            self.static_grid.cells_of(entity).len()
        );
        self.components
            .transforms
            .insert(entity, TransformComponent::new(x, y));
        self.components.bounds.insert(entity, bounds);
        self.components.colliders.insert(
            entity,
            ColliderComponent::new(CollisionType::Static, role, body),
        );
        Ok(entity)
    }

    /// Spawns a box body that falls, moves and collides.
    pub fn spawn_dynamic_body(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<Entity, PhysicsError> {
        let position = Vec2::new(x, y);
        let bounds = BoundsComponent::new(width, height, Vec2::ZERO)?;

        let entity = self.entities.create();
        self.dynamic_grid
            .insert(entity, &bounds.world_aabb(position), 0);
        self.components
            .transforms
            .insert(entity, TransformComponent::new(x, y));
        self.components.bounds.insert(entity, bounds);
        self.components.colliders.insert(
            entity,
            ColliderComponent::new(
                CollisionType::Dynamic,
                CollisionRole::NONE,
                Body::Box(Rectangle::new(0.0, 0.0, width, height)),
            ),
        );
        self.components
            .physics
            .insert(entity, PhysicsComponent::at(position));
        self.components
            .sleep
            .insert(entity, SleepComponent::default());

        log::debug!("Spawned dynamic body {} at {:?}", entity, position);
        Ok(entity)
    }

    /// Removes the entity, all of its components and its grid membership.
    pub fn destroy(&mut self, entity: Entity) -> Result<(), PhysicsError> {
        if !self.entities.destroy(entity) {
            return Err(PhysicsError::DeadEntity(entity));
        }
        self.static_grid.remove(entity);
        self.dynamic_grid.remove(entity);
        self.components.remove_all(entity);
        self.events.forget(entity);
        log::debug!("Destroyed {}", entity);
        Ok(())
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // --- body access ---

    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        self.components.position(entity)
    }

    /// Teleports a body or collider, re-indexing it in its grid.
    pub fn set_position(&mut self, entity: Entity, position: Vec2) -> Result<(), PhysicsError> {
        let transform = self
            .components
            .transforms
            .get_mut(entity)
            .ok_or(PhysicsError::DeadEntity(entity))?;
        transform.position = position;
        self.reindex(entity);
        Ok(())
    }

    fn reindex(&mut self, entity: Entity) {
        let (Some(aabb), Some(collider)) = (
            self.components.world_aabb(entity),
            self.components.colliders.get(entity),
        ) else {
            return;
        };
        let Some(position) = self.components.position(entity) else {
            return;
        };
        // Grid membership follows the body, not the current collision type.
        let dynamic = self.components.physics.contains(entity);
        match (dynamic, &collider.body) {
            (true, _) => self.dynamic_grid.insert(entity, &aabb, 0),
            (false, Body::Box(_)) => {
                self.static_grid
                    .insert(entity, &aabb, self.config.static_padding)
            }
            (false, shaped) => self.static_grid.insert_where(
                entity,
                &aabb,
                self.config.static_padding,
                |cell| shaped.touches_cell(position, cell),
            ),
        }
    }

    pub fn aabb(&self, entity: Entity) -> Option<Aabb> {
        self.components.world_aabb(entity)
    }

    pub fn physics(&self, entity: Entity) -> Option<&PhysicsComponent> {
        self.components.physics.get(entity)
    }

    pub fn physics_mut(&mut self, entity: Entity) -> Result<&mut PhysicsComponent, PhysicsError> {
        if !self.entities.is_alive(entity) {
            return Err(PhysicsError::DeadEntity(entity));
        }
        self.components
            .physics
            .get_mut(entity)
            .ok_or(PhysicsError::NotDynamic(entity))
    }

    pub fn velocity(&self, entity: Entity) -> Option<Vec2> {
        self.physics(entity).map(|p| p.velocity)
    }

    pub fn set_velocity(&mut self, entity: Entity, velocity: Vec2) -> Result<(), PhysicsError> {
        self.physics_mut(entity)?.velocity = velocity;
        Ok(())
    }

    /// Applies player input to a dynamic body ahead of the next tick. Returns whether a jump
    /// started.
    pub fn apply_intent(
        &mut self,
        entity: Entity,
        intent: &PlayerIntent,
        settings: &MovementSettings,
    ) -> Result<bool, PhysicsError> {
        let physics = self.physics_mut(entity)?;
        Ok(MovementSystem::apply_intent(physics, intent, settings))
    }

    pub fn is_grounded(&self, entity: Entity) -> bool {
        self.physics(entity).is_some_and(|p| p.on_ground)
    }

    pub fn is_awake(&self, entity: Entity) -> bool {
        self.components
            .sleep
            .get(entity)
            .is_some_and(|s| !s.is_sleeping)
    }

    // --- queries ---

    pub fn query_static(&self, region: &Aabb) -> Vec<Entity> {
        self.static_grid.query(region)
    }

    pub fn query_dynamic(&self, region: &Aabb) -> Vec<Entity> {
        self.dynamic_grid.query(region)
    }

    pub fn query_static_cells(&self, region: &Aabb) -> Vec<CellKey> {
        self.static_grid.query_cells(region)
    }

    pub fn query_dynamic_cells(&self, region: &Aabb) -> Vec<CellKey> {
        self.dynamic_grid.query_cells(region)
    }

    /// World rectangle of a cell key returned by the cell queries.
    pub fn cell_bounds(&self, key: CellKey) -> Aabb {
        self.static_grid.cell_bounds(key)
    }

    pub fn debug_snapshot(&self) -> Vec<BodySnapshot> {
        self.components
            .physics
            .iter()
            .filter_map(|(entity, physics)| {
                Some(BodySnapshot {
                    entity,
                    aabb: self.components.world_aabb(entity)?,
                    velocity: physics.velocity,
                    on_ground: physics.on_ground,
                    awake: self.is_awake(entity),
                })
            })
            .collect()
    }

    /// Events produced by past ticks, oldest first.
    pub fn drain_events(&mut self) -> Vec<CollisionEvent> {
        self.events.drain()
    }

    // --- stepping ---

    /// Advances every dynamic body by one fixed tick. Bodies whose AABB is outside `region`
    /// (grown by the configured wake margin) sleep through it.
    pub fn step(&mut self, delta_time: f32, region: &Aabb) {
        if !(delta_time.is_finite() && delta_time > 0.0) {
            log::warn!("Skipping physics step with invalid delta time {}", delta_time);
            return;
        }
        let mut elapsed = Duration::ZERO;
        {
            let _timer = ScopeTimer::recording("physics step", &mut elapsed);
            let wake_region = region.expanded(self.config.wake_margin);
            let bodies = self.components.physics.entities().to_vec();
            for entity in bodies {
                self.step_body(entity, delta_time, &wake_region);
            }
        }
        self.last_step_duration = elapsed;
        self.tick += 1;
    }

    fn update_sleep(&mut self, entity: Entity, awake: bool) {
        if let Some(sleep) = self.components.sleep.get_mut(entity)
            && sleep.set_awake(awake)
        {
            if awake {
                log::debug!("{} woke up", entity);
            } else {
                log::debug!("{} fell asleep", entity);
            }
        }
    }

    fn probe_ground(
        &self,
        entity: Entity,
        layer: Layer,
        aabb: &Aabb,
        travel: f32,
    ) -> Option<GroundHit> {
        let reach = ground_probe::reach(aabb, self.config.ground_probe_distance, travel);
        let candidates: Vec<_> = self
            .static_grid
            .query(&reach)
            .into_iter()
            .filter(|other| {
                broad_phase::is_eligible(&self.components, &self.layers, entity, layer, *other)
            })
            .filter_map(|other| {
                let position = self.components.position(other)?;
                let collider = self.components.colliders.get(other)?;
                Some((other, position, collider))
            })
            .collect();
        ground_probe::probe(
            aabb,
            travel,
            self.config.ground_probe_distance,
            self.config.ground_probe_tolerance,
            candidates,
        )
    }

    fn step_body(&mut self, entity: Entity, delta_time: f32, wake_region: &Aabb) {
        let (Some(position), Some(bounds), Some(collider), Some(mut physics)) = (
            self.components.position(entity),
            self.components.bounds.get(entity).copied(),
            self.components.colliders.get(entity),
            self.components.physics.get(entity).copied(),
        ) else {
            return;
        };
        let layer = collider.layer;
        let collides = collider.collision_type != CollisionType::Ignore;

        let aabb = bounds.world_aabb(position);
        let awake = aabb.intersects(wake_region);
        self.update_sleep(entity, awake);
        if !awake {
            return;
        }

        physics.prev_position = position;
        let gravity = self.config.gravity;
        let mut touching: Vec<(Entity, CollisionInfo)> = Vec::new();

        // Ground probe: skip vertical integration while supported.
        let mut ground = None;
        if collides && physics.velocity.y >= 0.0 {
            let falling = gravity.integrate(physics.velocity.y, physics.gravity_scale, delta_time);
            ground = self.probe_ground(entity, layer, &aabb, falling * delta_time);
        }
        if let Some(hit) = ground {
            physics.velocity.y = 0.0;
            touching.push((
                hit.entity,
                CollisionInfo {
                    normal: hit.normal,
                    depth: (-hit.distance).max(0.0),
                    resolved: true,
                },
            ));
        } else {
            physics.velocity.y =
                gravity.integrate(physics.velocity.y, physics.gravity_scale, delta_time);
        }
        physics.velocity = snap_velocity(physics.velocity);

        let mut next = position + physics.velocity * delta_time;
        if let Some(hit) = ground {
            next.y += hit.distance;
        }
        physics.velocity.x *= self.config.velocity_damping;

        // Broad phase over the swept box, then narrow phase at the projected position.
        let next_aabb = bounds.world_aabb(next);
        let candidates = if collides {
            broad_phase::gather(
                &self.components,
                &self.layers,
                &self.static_grid,
                &self.dynamic_grid,
                entity,
                layer,
                &aabb.union(&next_aabb),
            )
        } else {
            Candidates::default()
        };

        let mut contacts = Vec::new();
        let mut unresolved = Vec::new();
        for other in &candidates.statics {
            let (Some(other_position), Some(other_collider)) = (
                self.components.position(*other),
                self.components.colliders.get(*other),
            ) else {
                continue;
            };
            match narrow_phase::collide_static(
                &next_aabb,
                physics.velocity,
                *other,
                other_position,
                other_collider,
            ) {
                Some(Overlap::Contact(contact)) => contacts.push(contact),
                Some(Overlap::Unresolved { other, shape }) => {
                    unresolved.push(shape);
                    touching.push((
                        other,
                        CollisionInfo {
                            normal: Vec2::ZERO,
                            depth: 0.0,
                            resolved: false,
                        },
                    ));
                }
                None => {}
            }
        }
        for other in &candidates.dynamics {
            let Some(other_aabb) = self.components.world_aabb(*other) else {
                continue;
            };
            if let Some(overlap) = narrow_phase::collide_dynamic(&next_aabb, *other, &other_aabb) {
                touching.push((
                    overlap.other(),
                    CollisionInfo {
                        normal: Vec2::ZERO,
                        depth: 0.0,
                        resolved: false,
                    },
                ));
            }
        }

        let resolution = contact_resolver::resolve(next, physics.velocity, &contacts);
        next = resolution.position;
        physics.velocity = snap_velocity(resolution.velocity);
        physics.on_ground = ground.is_some() || resolution.grounded;

        for contact in &contacts {
            touching.push((
                contact.other,
                CollisionInfo {
                    normal: contact.normal,
                    depth: contact.depth,
                    resolved: resolution.applied.contains(&contact.other),
                },
            ));
        }
        touching.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.depth.total_cmp(&a.1.depth)));
        touching.dedup_by_key(|(other, _)| *other);

        log::trace!(
            "{}: {} candidate(s), {} contact(s), on_ground={}",
            entity,
            candidates.len(),
            contacts.len(),
            physics.on_ground
        );

        for shape in unresolved {
            if self.unresolved_seen.insert(shape) {
                log::warn!("Box vs {:?} overlaps are detected but not resolved", shape);
            }
        }

        // Commit.
        if let Some(stored) = self.components.physics.get_mut(entity) {
            *stored = physics;
        }
        if next != position {
            if let Some(transform) = self.components.transforms.get_mut(entity) {
                transform.position = next;
            }
            self.dynamic_grid
                .update(entity, &bounds.world_aabb(next), 0);
        }
        self.events.record(entity, touching);
    }
}
