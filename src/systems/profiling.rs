//! Lightweight per-system timing, kept over a sliding window so the driver
//! can report slow frames with the systems responsible.

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::{IntoSystem, System};
use micromap::Map;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;
use strum_macros::{Display, EnumCount};
use thousands::Separable;

/// Identifies a profiled system in timing reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumCount)]
pub enum SystemId {
    Input,
    Restart,
    Spawn,
    Firing,
    PlayerMovement,
    EnemyMovement,
    BulletMovement,
    Collision,
    Combat,
    Effects,
    Stage,
}

/// The maximum number of systems that can be profiled.
const MAX_SYSTEMS: usize = <SystemId as strum::EnumCount>::COUNT;
/// The number of durations kept per system.
const TIMING_WINDOW_SIZE: usize = 30;

#[derive(Resource, Default, Debug)]
pub struct SystemTimings {
    timings: Mutex<Map<SystemId, VecDeque<Duration>, MAX_SYSTEMS>>,
}

impl SystemTimings {
    pub fn add_timing(&self, id: SystemId, duration: Duration) {
        let mut timings = self.timings.lock();
        let queue = timings.entry(id).or_insert_with(VecDeque::new);

        queue.push_back(duration);
        if queue.len() > TIMING_WINDOW_SIZE {
            queue.pop_front();
        }
    }

    /// Mean duration per system over the window, most expensive first.
    pub fn slowest_systems(&self) -> Vec<(SystemId, Duration)> {
        let timings = self.timings.lock();
        let mut means: Vec<(SystemId, Duration)> = timings
            .iter()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|(id, queue)| {
                let total: Duration = queue.iter().sum();
                (*id, total / queue.len() as u32)
            })
            .collect();

        means.sort_by(|a, b| b.1.cmp(&a.1));
        means
    }

    /// Human-readable effective frame rate implied by the mean total frame
    /// cost over the window.
    pub fn effective_fps(&self) -> String {
        let total: Duration = self.slowest_systems().iter().map(|(_, mean)| *mean).sum();
        if total.is_zero() {
            return "idle".to_string();
        }

        match 1.0 / total.as_secs_f64() {
            f if f > 100.0 => format!("{} FPS", (f as u64).separate_with_commas()),
            f if f < 10.0 => format!("{:.1} FPS", f),
            f => format!("{:.0} FPS", f),
        }
    }
}

/// Wraps a system so its run time is recorded under the given id.
pub fn profile<S, M>(id: SystemId, system: S) -> impl FnMut(&mut bevy_ecs::world::World)
where
    S: IntoSystem<(), (), M> + 'static,
{
    let mut system: S::System = IntoSystem::into_system(system);
    let mut is_initialized = false;
    move |world: &mut bevy_ecs::world::World| {
        if !is_initialized {
            system.initialize(world);
            is_initialized = true;
        }

        let start = std::time::Instant::now();
        system.run((), world);
        system.apply_deferred(world);
        let duration = start.elapsed();

        if let Some(timings) = world.get_resource::<SystemTimings>() {
            timings.add_timing(id, duration);
        }
    }
}
