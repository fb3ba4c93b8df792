use deepdown_engine::utils::scope_timer::ScopeTimer;
use deepdown_engine::{
    Aabb, CollisionEventType, CollisionRole, FixedTimestep, PhysicsError, PhysicsWorld,
    PlayerIntent, level,
};
use glam::Vec2;

use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoSummary {
    pub ticks: u64,
    pub player_position: Vec2,
    pub grounded: bool,
    pub events: usize,
}

/// A small room: floor, two walls, a ledge, a ramp up to it and a decorative polygon.
pub fn build_level(world: &mut PhysicsWorld) -> Result<(), PhysicsError> {
    let _timer = ScopeTimer::new("build demo level");
    level::spawn_floor(world, Vec2::new(0.0, 160.0), Vec2::new(480.0, 16.0))?;
    level::spawn_wall(world, Vec2::new(-16.0, 0.0), Vec2::new(16.0, 176.0))?;
    level::spawn_wall(world, Vec2::new(480.0, 0.0), Vec2::new(16.0, 176.0))?;
    level::spawn_platform(world, Vec2::new(320.0, 128.0), Vec2::new(96.0, 32.0))?;
    level::spawn_slope(
        world,
        Vec2::new(288.0, 128.0),
        [Vec2::new(0.0, 32.0), Vec2::new(32.0, 32.0), Vec2::new(32.0, 0.0)],
    )?;
    level::spawn_polygon(
        world,
        Vec2::new(96.0, 120.0),
        &[
            Vec2::new(0.0, 8.0),
            Vec2::new(8.0, 0.0),
            Vec2::new(16.0, 8.0),
            Vec2::new(8.0, 16.0),
        ],
        CollisionRole::NONE,
    )?;
    Ok(())
}

/// Scripted input: run right, hop, keep running up the ramp, then walk back.
fn intent_for(frame: u32) -> PlayerIntent {
    match frame {
        0..60 => PlayerIntent::default(),
        60..240 => PlayerIntent {
            move_x: 1.0,
            jump: (frame == 120).then_some(0.8),
        },
        240..300 => PlayerIntent::default(),
        300..420 => PlayerIntent::run(-1.0),
        _ => PlayerIntent::default(),
    }
}

fn view_around(position: Vec2, settings: &Settings) -> Aabb {
    let half = Vec2::new(settings.demo.view_width, settings.demo.view_height) * 0.5;
    Aabb::new(position - half, position + half)
}

pub fn run(settings: &Settings) -> Result<DemoSummary, PhysicsError> {
    let mut world = PhysicsWorld::new(settings.physics);
    build_level(&mut world)?;
    let player = level::spawn_player(&mut world, Vec2::new(32.0, 100.0))?;

    let frame_rate = if settings.demo.frame_rate > 0.0 {
        settings.demo.frame_rate
    } else {
        60.0
    };
    let mut timestep = FixedTimestep::new(1.0 / frame_rate, settings.demo.max_steps_per_frame);
    let mut events = 0;

    for frame in 0..settings.demo.frames {
        world.apply_intent(player, &intent_for(frame), &settings.movement)?;

        let steps = timestep.advance(1.0 / frame_rate);
        for _ in 0..steps {
            let position = world.position(player).unwrap_or_default();
            world.step(timestep.fixed_dt(), &view_around(position, settings));
            log::debug!(
                "tick {}: player {:?} grounded={}",
                world.tick(),
                world.aabb(player),
                world.is_grounded(player)
            );
        }

        for event in world.drain_events() {
            events += 1;
            if event.event_type != CollisionEventType::Stay {
                log::debug!(
                    "{:?}: {} / {} normal={:?} resolved={}",
                    event.event_type,
                    event.entity,
                    event.other_entity,
                    event.collision_info.normal,
                    event.collision_info.resolved
                );
            }
        }

        if frame % 60 == 0 {
            log::info!(
                "frame {}: player at {:?}, velocity {:?}, grounded={}, last step {:.2?}",
                frame,
                world.position(player).unwrap_or_default(),
                world.velocity(player).unwrap_or_default(),
                world.is_grounded(player),
                world.last_step_duration()
            );
        }
    }

    log::info!(
        "Simulated {:.2}s over {} frames, {:.3}s of backlog dropped",
        timestep.total_time(),
        timestep.frame_count(),
        timestep.dropped_time()
    );

    Ok(DemoSummary {
        ticks: world.tick(),
        player_position: world.position(player).unwrap_or_default(),
        grounded: world.is_grounded(player),
        events,
    })
}
