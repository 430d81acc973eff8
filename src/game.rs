//! This module contains the main simulation state and the per-tick driver.

use std::time::Instant;

use bevy_ecs::event::EventRegistry;
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::Res;
use bevy_ecs::world::World;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::error::GameError;
use crate::events::{ContactEvent, GameCommand, GameEvent};
use crate::snapshot::{self, Snapshot};
use crate::systems::{
    self, profile, Abilities, DeltaTime, FireTimer, GameRng, GameStage, GlobalState, KillCount, MoveIntent, PlayerLevel,
    ScoreResource, SpawnTimer, SystemId, SystemTimings, Tuning, WaveState,
};

/// System set ordering: input drains first, gameplay updates run behind the
/// pause gate, and progression responds to what the update produced.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Command queue drain and restart handling; always runs.
    Input,
    /// Entity updates and timers; skipped while the simulation is gated.
    Update,
    /// Progression checks that react to the update's outcome.
    Respond,
}

/// Core simulation state built on the Bevy ECS architecture.
///
/// All live entities, progression resources, and timers live in a single
/// `World`; a `Schedule` defines the fixed per-tick system order
/// (spawn, movement, combat, progression). The struct is reconstructed from
/// scratch for a new run, or reset in place by a restart command.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Initializes the simulation with the given tuning profile.
    pub fn new(tuning: Tuning) -> Game {
        Self::with_rng(tuning, SmallRng::from_os_rng())
    }

    /// Initializes the simulation with a seeded RNG, for deterministic runs.
    pub fn seeded(tuning: Tuning, seed: u64) -> Game {
        Self::with_rng(tuning, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(tuning: Tuning, rng: SmallRng) -> Game {
        let mut world = World::default();
        let mut schedule = Schedule::default();

        debug!("Setting up ECS event registry and observers");
        Self::setup_ecs(&mut world);

        debug!("Inserting resources into ECS world");
        Self::insert_resources(&mut world, tuning, rng);

        debug!("Configuring system execution schedule");
        Self::configure_schedule(&mut schedule);

        world.spawn(tuning.player_bundle());

        info!(?tuning, "Simulation initialized");
        Game { world, schedule }
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameError>(world);
        EventRegistry::register_event::<GameEvent>(world);
        EventRegistry::register_event::<ContactEvent>(world);

        world.add_observer(systems::spawn_effect_observer);
    }

    fn insert_resources(world: &mut World, tuning: Tuning, rng: SmallRng) {
        world.insert_resource(tuning);
        world.insert_resource(GlobalState { exit: false });
        world.insert_resource(GameStage::default());
        world.insert_resource(WaveState::default());
        world.insert_resource(Abilities::default());
        world.insert_resource(ScoreResource::default());
        world.insert_resource(KillCount::default());
        world.insert_resource(PlayerLevel::default());
        world.insert_resource(FireTimer::default());
        world.insert_resource(SpawnTimer::default());
        world.insert_resource(MoveIntent::default());
        world.insert_resource(DeltaTime { seconds: 0.0, ticks: 0 });
        world.insert_resource(SystemTimings::default());
        world.insert_resource(GameRng(rng));
    }

    fn configure_schedule(schedule: &mut Schedule) {
        let drain_commands = profile(SystemId::Input, systems::drain_commands_system);
        let restart = profile(SystemId::Restart, systems::restart_system);
        let drain_errors = profile(SystemId::Input, systems::drain_errors_system);
        let spawn_director = profile(SystemId::Spawn, systems::spawn_director_system);
        let auto_fire = profile(SystemId::Firing, systems::auto_fire_system);
        let player_movement = profile(SystemId::PlayerMovement, systems::player_movement_system);
        let enemy_pursuit = profile(SystemId::EnemyMovement, systems::enemy_pursuit_system);
        let bullet_movement = profile(SystemId::BulletMovement, systems::bullet_movement_system);
        let collision = profile(SystemId::Collision, systems::collision_system);
        let combat_resolution = profile(SystemId::Combat, systems::combat_resolution_system);
        let effect_lifetime = profile(SystemId::Effects, systems::effect_lifetime_system);
        let stage = profile(SystemId::Stage, systems::stage_system);

        schedule
            .add_systems((
                (drain_commands, restart, drain_errors).chain().in_set(GameplaySet::Input),
                (
                    spawn_director,
                    auto_fire,
                    player_movement,
                    enemy_pursuit,
                    bullet_movement,
                    collision,
                    combat_resolution,
                    effect_lifetime,
                )
                    .chain()
                    .in_set(GameplaySet::Update),
                stage.in_set(GameplaySet::Respond),
            ))
            .configure_sets((
                GameplaySet::Input,
                GameplaySet::Update
                    .after(GameplaySet::Input)
                    .run_if(|stage: Res<GameStage>| !stage.paused()),
                GameplaySet::Respond
                    .after(GameplaySet::Update)
                    .run_if(|stage: Res<GameStage>| !stage.paused()),
            ));
    }

    /// Queues a command from the input layer. Commands are drained once per
    /// tick, on the next call to [`Game::tick`].
    pub fn queue(&mut self, command: GameCommand) {
        self.world.send_event(GameEvent::Command(command));
    }

    /// Executes one tick of simulation logic.
    ///
    /// Rendering-facing callers should follow this with [`Game::snapshot`];
    /// the snapshot is valid until the next tick.
    ///
    /// # Arguments
    ///
    /// * `dt` - Wall-clock delta time in seconds since the previous tick
    ///
    /// # Returns
    ///
    /// `true` if the simulation requested shutdown (exit command received).
    pub fn tick(&mut self, dt: f32) -> bool {
        self.world.insert_resource(DeltaTime { seconds: dt, ticks: 1 });

        let start = Instant::now();
        self.schedule.run(&mut self.world);
        let total = start.elapsed();

        // Flag frames that blow the budget, with the systems responsible.
        // 20% headroom over the delta accounts for normal variance.
        let budget_ms = (dt * 1000.0 * 1.2) as u128;
        if budget_ms > 0 && total.as_millis() > budget_ms {
            let timings = self.world.resource::<SystemTimings>();
            let slowest = timings
                .slowest_systems()
                .into_iter()
                .take(3)
                .map(|(id, mean)| format!("{} ({:.2?})", id, mean))
                .collect::<Vec<_>>()
                .join(", ");
            warn!(
                total = format!("{:.3?}", total),
                budget = format!("{budget_ms}ms"),
                systems = slowest,
                "Frame took longer than expected"
            );
        }

        self.world.resource::<GlobalState>().exit
    }

    /// Builds the read-only render snapshot for the current state.
    pub fn snapshot(&mut self) -> Snapshot {
        snapshot::capture(&mut self.world)
    }

    /// The current high-level stage, for embedders that gate their own UI.
    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }
}
