//! Baking soda and vinegar volcano experiment recorder.
//!
//! The learner measures ingredients, starts the reaction and logs
//! observations while the fizzing dies down. Time is driven by
//! [`VolcanoExperiment::tick`], one call per elapsed second.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Minimum baking soda (tablespoons) needed to start.
pub const MIN_BAKING_SODA: u32 = 2;
/// Minimum vinegar (tablespoons) needed to start.
pub const MIN_VINEGAR: u32 = 4;
/// Seconds spent pouring before the reaction begins.
pub const ADDING_SECONDS: u32 = 2;
/// Reaction second at which the experiment completes.
pub const REACTION_SECONDS: u32 = 20;
/// Intensity lost per reaction second.
pub const INTENSITY_DECAY: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExperimentError {
    #[error("Need at least 2 tbsp baking soda, got {0}")]
    NotEnoughBakingSoda(u32),
    #[error("Need at least 4 tbsp vinegar, got {0}")]
    NotEnoughVinegar(u32),
    #[error("Experiment already started")]
    AlreadyStarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Stage {
    #[default]
    Setup,
    Adding,
    Reaction,
    Complete,
}

/// Qualitative reading of the reaction intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactionBand {
    Vigorous,
    Moderate,
    Mild,
    Complete,
}

impl ReactionBand {
    pub fn from_intensity(intensity: u32) -> Self {
        match intensity {
            81.. => ReactionBand::Vigorous,
            51..=80 => ReactionBand::Moderate,
            21..=50 => ReactionBand::Mild,
            _ => ReactionBand::Complete,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ReactionBand::Vigorous => "Vigorous reaction - lots of bubbling!",
            ReactionBand::Moderate => "Moderate reaction - steady bubbling",
            ReactionBand::Mild => "Mild reaction - small bubbles",
            ReactionBand::Complete => "Reaction complete - bubbling stopped",
        }
    }
}

/// A note stamped with the reaction timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub second: u32,
    pub text: String,
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s: {}", self.second, self.text)
    }
}

/// Result reported to the quest after each change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub stage: Stage,
    pub baking_soda: u32,
    pub vinegar: u32,
    pub food_coloring: String,
    pub observations: Vec<String>,
    pub reaction_intensity: u32,
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolcanoExperiment {
    stage: Stage,
    baking_soda: u32,
    vinegar: u32,
    food_coloring: String,
    observations: Vec<Observation>,
    intensity: u32,
    timer: u32,
    adding_elapsed: u32,
    recording: bool,
}

impl Default for VolcanoExperiment {
    fn default() -> Self {
        Self {
            stage: Stage::Setup,
            baking_soda: 0,
            vinegar: 0,
            food_coloring: "red".to_string(),
            observations: Vec::new(),
            intensity: 0,
            timer: 0,
            adding_elapsed: 0,
            recording: false,
        }
    }
}

impl VolcanoExperiment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn baking_soda(&self) -> u32 {
        self.baking_soda
    }

    pub fn vinegar(&self) -> u32 {
        self.vinegar
    }

    pub fn food_coloring(&self) -> &str {
        &self.food_coloring
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn intensity(&self) -> u32 {
        self.intensity
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn band(&self) -> ReactionBand {
        ReactionBand::from_intensity(self.intensity)
    }

    /// Ingredient setters only apply during setup. They return whether the
    /// value was taken.
    pub fn set_baking_soda(&mut self, tablespoons: u32) -> bool {
        if self.stage != Stage::Setup {
            return false;
        }
        self.baking_soda = tablespoons;
        true
    }

    pub fn set_vinegar(&mut self, tablespoons: u32) -> bool {
        if self.stage != Stage::Setup {
            return false;
        }
        self.vinegar = tablespoons;
        true
    }

    pub fn set_food_coloring(&mut self, color: impl Into<String>) -> bool {
        if self.stage != Stage::Setup {
            return false;
        }
        self.food_coloring = color.into();
        true
    }

    /// Begin pouring. Requires enough of both ingredients.
    pub fn start(&mut self) -> Result<(), ExperimentError> {
        if self.stage != Stage::Setup {
            return Err(ExperimentError::AlreadyStarted);
        }
        if self.baking_soda < MIN_BAKING_SODA {
            return Err(ExperimentError::NotEnoughBakingSoda(self.baking_soda));
        }
        if self.vinegar < MIN_VINEGAR {
            return Err(ExperimentError::NotEnoughVinegar(self.vinegar));
        }
        self.stage = Stage::Adding;
        self.recording = true;
        self.timer = 0;
        self.adding_elapsed = 0;
        log::debug!(
            "volcano started: {} tbsp soda, {} tbsp vinegar",
            self.baking_soda,
            self.vinegar
        );
        Ok(())
    }

    /// Advance one second.
    pub fn tick(&mut self) {
        match self.stage {
            Stage::Adding => {
                self.adding_elapsed += 1;
                if self.adding_elapsed >= ADDING_SECONDS {
                    self.stage = Stage::Reaction;
                    self.add_observation("Bubbling and fizzing started immediately");
                    self.add_observation("Gas bubbles are forming rapidly");
                    let foam = format!("{} colored foam is rising", self.food_coloring);
                    self.add_observation(foam);
                }
            }
            Stage::Reaction if self.recording => {
                let elapsed = self.timer;
                self.timer += 1;
                self.intensity = 100u32.saturating_sub(elapsed * INTENSITY_DECAY);
                if elapsed >= REACTION_SECONDS {
                    self.stage = Stage::Complete;
                    self.recording = false;
                    log::debug!("volcano complete after {} s", self.timer);
                }
            }
            _ => {}
        }
    }

    /// Record a note at the current timer value. Blank notes are ignored.
    pub fn add_observation(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.trim().is_empty() {
            return;
        }
        self.observations.push(Observation {
            second: self.timer,
            text,
        });
    }

    /// Back to setup. The chosen food coloring is kept.
    pub fn reset(&mut self) {
        let food_coloring = std::mem::take(&mut self.food_coloring);
        *self = Self {
            food_coloring,
            ..Self::default()
        };
    }

    pub fn report(&self) -> ExperimentReport {
        ExperimentReport {
            stage: self.stage,
            baking_soda: self.baking_soda,
            vinegar: self.vinegar,
            food_coloring: self.food_coloring.clone(),
            observations: self.observations.iter().map(ToString::to_string).collect(),
            reaction_intensity: self.intensity,
            duration: self.timer,
        }
    }
}
