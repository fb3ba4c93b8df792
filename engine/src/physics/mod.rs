pub mod broad_phase;
pub mod collision_event;
pub mod collision_layers;
pub mod contact;
pub mod contact_resolver;
pub mod gravity_resource;
pub mod ground_probe;
pub mod movement_system;
pub mod narrow_phase;
pub mod physics_config;
pub mod physics_world;
pub mod spatial_hash_grid;
