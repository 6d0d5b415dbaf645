//! The simulation clock: scaled, pausable time for the whole engine.

use anyhow::{Result, bail};
use bevy::prelude::*;
use chrono::{DateTime, Utc};

use crate::orbital::epoch::{date_from_sim_millis, sim_millis_from_date};

/// Lowest allowed time-speed multiplier.
pub const MIN_TIME_SCALE: f64 = 0.0;

/// Highest allowed time-speed multiplier.
pub const MAX_TIME_SCALE: f64 = 1000.0;

/// Simulated milliseconds elapsed since the J2000.0 epoch, advanced once per
/// frame by the real frame delta times an adjustable speed multiplier.
///
/// The clock is an owned resource passed to every consumer; there is no
/// ambient global time state. Propagation systems run strictly after
/// [`tick_simulation_clock`] so every body in a frame sees the same instant.
#[derive(Resource, Debug)]
pub struct SimulationClock {
    sim_time_ms: f64,
    speed: f64,
    paused: bool,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            sim_time_ms: 0.0,
            speed: 1.0,
            paused: false,
        }
    }
}

impl SimulationClock {
    /// Advance by one frame of real time. Returns the simulated delta applied
    /// (zero while paused).
    ///
    /// Rejects negative and non-finite deltas so a broken host timer cannot
    /// push NaN through every downstream position.
    pub fn tick(&mut self, real_delta_ms: f64) -> Result<f64> {
        if !real_delta_ms.is_finite() || real_delta_ms < 0.0 {
            bail!(
                "frame delta must be a non-negative finite millisecond count, got {real_delta_ms}"
            );
        }
        if self.paused {
            return Ok(0.0);
        }
        let sim_delta = real_delta_ms * self.speed;
        self.sim_time_ms += sim_delta;
        Ok(sim_delta)
    }

    /// Set the speed multiplier, clamped to `[MIN_TIME_SCALE, MAX_TIME_SCALE]`.
    /// Takes effect on the next tick; accumulated simulation time is untouched.
    pub fn set_speed(&mut self, multiplier: f64) -> Result<()> {
        if !multiplier.is_finite() {
            bail!("time-speed multiplier must be finite, got {multiplier}");
        }
        self.speed = multiplier.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE);
        Ok(())
    }

    /// Current speed multiplier.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Simulated milliseconds since the J2000.0 epoch.
    pub fn sim_time_ms(&self) -> f64 {
        self.sim_time_ms
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume advancing. Frame deltas are supplied per-tick by the host loop,
    /// so the first post-resume tick advances by exactly that frame's delta
    /// times the speed; no pause-length jump can occur.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Rewind to the J2000.0 epoch (simulation time zero).
    pub fn reset(&mut self) {
        self.sim_time_ms = 0.0;
    }

    /// Jump to the current wall-clock instant: the sky as it is right now.
    pub fn seek_to_real_now(&mut self) {
        self.sim_time_ms = sim_millis_from_date(Utc::now());
    }

    /// Calendar date corresponding to the current simulation time.
    pub fn current_date(&self) -> DateTime<Utc> {
        date_from_sim_millis(self.sim_time_ms)
    }
}

/// System advancing the simulation clock once per frame from the render
/// loop's wall-clock delta.
pub fn tick_simulation_clock(time: Res<Time>, mut clock: ResMut<SimulationClock>) {
    let delta_ms = time.delta_secs_f64() * 1000.0;
    if let Err(err) = clock.tick(delta_ms) {
        warn!("simulation clock rejected frame delta: {err}");
    }
}

/// Human-readable elapsed simulated time, e.g. "2y 34d 05:06:07".
pub fn format_elapsed(sim_ms: f64) -> String {
    let sign = if sim_ms < 0.0 { "-" } else { "" };
    let total_seconds = (sim_ms.abs() / 1000.0) as u64;
    let days = total_seconds / 86_400;
    let years = days / 365;
    let rem_days = days % 365;
    let hours = (total_seconds / 3600) % 24;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;

    if years > 0 {
        format!("{sign}{years}y {rem_days}d {hours:02}:{minutes:02}:{seconds:02}")
    } else if days > 0 {
        format!("{sign}{rem_days}d {hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// Speed multiplier for HUD display, e.g. "250.00x".
pub fn format_speed(multiplier: f64) -> String {
    format!("{multiplier:.2}x")
}
