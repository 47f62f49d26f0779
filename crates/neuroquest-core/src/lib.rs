//! NeuroQuest Core Library
//!
//! Platform-agnostic logic behind the NeuroQuest learning quests: styled-text
//! templates and translation lookup, drag-and-drop and sketching state
//! machines driven by the host UI, the physics of the simulator quests, and
//! the quiz, speech and experiment activities built on top of them.

pub mod dragdrop;
pub mod experiment;
pub mod i18n;
pub mod input;
pub mod physics;
pub mod quiz;
pub mod sketch;
pub mod speech;
pub mod template;
pub mod tools;

pub use dragdrop::{DragDropCoordinator, DragItem, DropZone};
pub use experiment::{ExperimentError, ExperimentReport, Observation, ReactionBand, Stage, VolcanoExperiment};
pub use i18n::{Catalog, CatalogError, Language, Translator};
pub use input::{PointerInput, PointerSource};
pub use physics::{EnergySample, EnergyTrack, EnergyTrackSimulator, LoopSpeed, PhysicsError, SafetyLevel};
pub use quiz::{InteractiveQuestion, OptionFeedback, Question, QuestionKind, QuestionOption};
pub use sketch::{History, PathElement, SketchSurface};
pub use speech::{MoveDirection, SectionKind, SpeechOrganizer, SpeechSection, SpeechSummary};
pub use template::{RenderNode, StyleSpec, StyledText, parse_styled_text};
pub use tools::{SerializableColor, StrokeStyle, ToolKind};
