//! The frame-loop driver that advances the simulation once per display
//! refresh.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::constants::LOOP_TIME;
use crate::formatter;
use crate::game::Game;
use crate::systems::{SystemTimings, Tuning};

/// How often the driver reports its timing window, in frames.
const TIMING_REPORT_INTERVAL: u64 = 600;

/// Wraps a [`Game`] with wall-clock delta measurement and optional frame
/// pacing.
///
/// Embedders whose render loop is already paced by the display (vsync,
/// `requestAnimationFrame`) should call [`App::frame`] once per refresh;
/// embedders that own the loop call [`App::run`] repeatedly and let it sleep
/// away the remainder of each frame.
pub struct App {
    pub game: Game,
    last_tick: Instant,
    focused: bool,
}

impl App {
    pub fn new(tuning: Tuning) -> Self {
        info!(loop_time = ?LOOP_TIME, "Starting simulation driver");
        App {
            game: Game::new(tuning),
            last_tick: Instant::now(),
            focused: true,
        }
    }

    /// Advances one frame using the measured wall-clock delta, without
    /// sleeping.
    ///
    /// # Returns
    ///
    /// `true` if the simulation should continue running.
    pub fn frame(&mut self) -> bool {
        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = Instant::now();

        // Increment the global tick counter for tracing
        formatter::increment_tick();

        if formatter::tick_count() % TIMING_REPORT_INTERVAL == 0 {
            let timings = self.game.world.resource::<SystemTimings>();
            debug!(fps = timings.effective_fps(), "Driver timing window");
        }

        !self.game.tick(dt)
    }

    /// Advances one frame and sleeps for the remaining frame time, targeting
    /// the fixed 60 Hz loop rate.
    ///
    /// Sleep precision varies with focus: a focused simulation uses spin
    /// sleeping for accurate pacing, an unfocused one conserves CPU with a
    /// plain thread sleep.
    ///
    /// # Returns
    ///
    /// `true` if the simulation should continue running.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        if !self.frame() {
            return false;
        }

        // Sleep if we still have time left
        if start.elapsed() < LOOP_TIME {
            let remaining = LOOP_TIME.saturating_sub(start.elapsed());
            if remaining != Duration::ZERO {
                sleep(remaining, self.focused);
            }
        }

        true
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

fn sleep(duration: Duration, focused: bool) {
    if focused {
        spin_sleep::sleep(duration);
    } else {
        std::thread::sleep(duration);
    }
}
