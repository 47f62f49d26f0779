//! Closed-form physics behind the roller-coaster quests.
//!
//! Two widgets: the loop speed calculator (minimum entry speed for a vertical
//! loop) and the energy tracking simulator (a car rolling along a track of
//! heights with mechanical energy conserved).

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

/// Gravitational acceleration in m/s².
pub const GRAVITY: f64 = 9.8;

/// Factor at or above which a loop entry speed is considered safe.
pub const SAFE_FACTOR: f64 = 1.5;
/// Factor at or above which a loop entry speed needs caution.
pub const CAUTION_FACTOR: f64 = 1.2;

/// Track position advanced per simulation tick.
pub const TICK_STEP: f64 = 0.1;
/// Number of past samples kept besides the newest one.
pub const HISTORY_WINDOW: usize = 50;

/// Errors for invalid physics inputs.
#[derive(Debug, Error, PartialEq)]
pub enum PhysicsError {
    #[error("Track must have at least one height")]
    EmptyTrack,
    #[error("Mass must be positive, got {0}")]
    NonPositiveMass(f64),
    #[error("Loop height must be positive, got {0}")]
    InvalidLoopHeight(f64),
    #[error("Safety factor must be at least 1.0, got {0}")]
    InvalidSafetyFactor(f64),
}

fn check_mass(mass: f64) -> Result<f64, PhysicsError> {
    if mass > 0.0 && mass.is_finite() {
        Ok(mass)
    } else {
        Err(PhysicsError::NonPositiveMass(mass))
    }
}

/// Safety rating of a loop entry speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyLevel {
    Safe,
    Caution,
    Dangerous,
}

/// Inputs and results of the loop speed calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoopSpeed {
    pub loop_height: f64,
    pub car_mass: f64,
    pub safety_factor: f64,
}

impl LoopSpeed {
    pub fn new(loop_height: f64, car_mass: f64, safety_factor: f64) -> Result<Self, PhysicsError> {
        if !(loop_height > 0.0 && loop_height.is_finite()) {
            return Err(PhysicsError::InvalidLoopHeight(loop_height));
        }
        if !(safety_factor >= 1.0 && safety_factor.is_finite()) {
            return Err(PhysicsError::InvalidSafetyFactor(safety_factor));
        }
        Ok(Self {
            loop_height,
            car_mass: check_mass(car_mass)?,
            safety_factor,
        })
    }

    pub fn radius(&self) -> f64 {
        self.loop_height / 2.0
    }

    /// Minimum speed at the bottom of the loop: `sqrt(5 g r)`.
    ///
    /// Mass cancels out; it is carried for display only.
    pub fn min_speed(&self) -> f64 {
        (5.0 * GRAVITY * self.radius()).sqrt()
    }

    /// Recommended entry speed with the safety margin applied.
    pub fn safe_speed(&self) -> f64 {
        self.min_speed() * self.safety_factor
    }

    pub fn safety_level(&self) -> SafetyLevel {
        if self.safety_factor >= SAFE_FACTOR {
            SafetyLevel::Safe
        } else if self.safety_factor >= CAUTION_FACTOR {
            SafetyLevel::Caution
        } else {
            SafetyLevel::Dangerous
        }
    }
}

impl Default for LoopSpeed {
    fn default() -> Self {
        Self {
            loop_height: 30.0,
            car_mass: 500.0,
            safety_factor: 1.5,
        }
    }
}

/// Energy of the car at one point on the track, in joules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergySample {
    pub potential: f64,
    pub kinetic: f64,
    pub total: f64,
    pub height: f64,
    pub position: f64,
}

impl EnergySample {
    /// Speed from kinetic energy: `sqrt(2 KE / m)`.
    pub fn speed(&self, mass: f64) -> f64 {
        (2.0 * self.kinetic / mass).sqrt()
    }
}

/// A track given as heights at evenly spaced stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyTrack {
    heights: Vec<f64>,
    mass: f64,
}

impl Default for EnergyTrack {
    fn default() -> Self {
        Self {
            heights: vec![100.0, 60.0, 80.0, 40.0, 70.0, 20.0],
            mass: 500.0,
        }
    }
}

impl EnergyTrack {
    pub fn new(heights: Vec<f64>, mass: f64) -> Result<Self, PhysicsError> {
        if heights.is_empty() {
            return Err(PhysicsError::EmptyTrack);
        }
        Ok(Self {
            heights,
            mass: check_mass(mass)?,
        })
    }

    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Position of the last station.
    pub fn end(&self) -> f64 {
        (self.heights.len() - 1) as f64
    }

    pub fn max_height(&self) -> f64 {
        self.heights.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Height at `position`, interpolated linearly between stations.
    pub fn height_at(&self, position: f64) -> f64 {
        let position = position.clamp(0.0, self.end());
        let index = position.floor() as usize;
        let next = (index + 1).min(self.heights.len() - 1);
        let fraction = position - index as f64;
        self.heights[index] + (self.heights[next] - self.heights[index]) * fraction
    }

    /// Energy at `position`, assuming the car starts from rest at the highest point.
    pub fn energy_at(&self, position: f64) -> EnergySample {
        let height = self.height_at(position);
        let potential = self.mass * GRAVITY * height;
        let total = self.mass * GRAVITY * self.max_height();
        EnergySample {
            potential,
            kinetic: (total - potential).max(0.0),
            total,
            height,
            position: position.clamp(0.0, self.end()),
        }
    }
}

/// Steps a car along an [`EnergyTrack`], recording recent samples.
#[derive(Debug, Clone, Default)]
pub struct EnergyTrackSimulator {
    track: EnergyTrack,
    position: f64,
    playing: bool,
    history: VecDeque<EnergySample>,
}

impl EnergyTrackSimulator {
    pub fn new(track: EnergyTrack) -> Self {
        Self {
            track,
            position: 0.0,
            playing: false,
            history: VecDeque::new(),
        }
    }

    pub fn play(&mut self) {
        if self.position < self.track.end() {
            self.playing = true;
        }
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Stop and return to the start, forgetting recorded samples.
    pub fn reset(&mut self) {
        self.playing = false;
        self.position = 0.0;
        self.history.clear();
    }

    /// Advance one step if playing and return the current sample.
    ///
    /// Playback stops on reaching the end of the track.
    pub fn tick(&mut self) -> EnergySample {
        if self.playing {
            let next = self.position + TICK_STEP;
            if next >= self.track.end() {
                self.position = self.track.end();
                self.playing = false;
            } else {
                self.position = next;
            }
            let sample = self.current();
            if self.history.len() > HISTORY_WINDOW {
                self.history.pop_front();
            }
            self.history.push_back(sample);
        }
        self.current()
    }

    pub fn current(&self) -> EnergySample {
        self.track.energy_at(self.position)
    }

    /// Current car speed in m/s.
    pub fn speed(&self) -> f64 {
        self.current().speed(self.track.mass())
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn history(&self) -> impl Iterator<Item = &EnergySample> {
        self.history.iter()
    }

    pub fn track(&self) -> &EnergyTrack {
        &self.track
    }
}
