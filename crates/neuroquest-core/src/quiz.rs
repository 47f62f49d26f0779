//! Interactive quiz questions.
//!
//! A question is answered once; feedback and the explanation are revealed
//! only when the quest enables feedback. Drag-drop questions get an answer
//! zone and drawing questions a sketch surface, both owned here.

use crate::dragdrop::{DragDropCoordinator, DropZone};
use crate::sketch::SketchSurface;
use serde::{Deserialize, Serialize};

/// Id of the zone registered for drag-drop questions.
pub const ANSWER_ZONE_ID: &str = "answer-zone";
/// Item kind accepted by the answer zone.
pub const OPTION_KIND: &str = "option";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    DragDrop,
    Drawing,
    Sorting,
    Matching,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

impl QuestionOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_correct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

/// How an option should be shown once feedback is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionFeedback {
    /// Feedback hidden, or the option is neither chosen nor correct.
    Neutral,
    /// Chosen and correct.
    Correct,
    /// Chosen and wrong.
    Wrong,
    /// Correct but not chosen.
    Missed,
}

#[derive(Debug, Clone)]
pub struct InteractiveQuestion {
    question: Question,
    show_feedback: bool,
    selected: Option<String>,
    answered: bool,
    show_hint: bool,
    drag_drop: DragDropCoordinator,
    sketch: SketchSurface,
}

impl InteractiveQuestion {
    pub fn new(question: Question, show_feedback: bool) -> Self {
        let mut drag_drop = DragDropCoordinator::new();
        if question.kind == QuestionKind::DragDrop {
            drag_drop.register_drop_zone(DropZone::new(
                ANSWER_ZONE_ID,
                [OPTION_KIND],
                50.0,
                200.0,
                300.0,
                150.0,
            ));
        }
        Self {
            question,
            show_feedback,
            selected: None,
            answered: false,
            show_hint: false,
            drag_drop,
            sketch: SketchSurface::new(),
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Choose an option. Only the first valid choice counts.
    ///
    /// Returns true if the choice was recorded.
    pub fn select_option(&mut self, option_id: &str) -> bool {
        if self.answered || !self.question.options.iter().any(|o| o.id == option_id) {
            return false;
        }
        self.selected = Some(option_id.to_string());
        self.answered = true;
        log::debug!("question {} answered with {}", self.question.id, option_id);
        true
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    /// Whether the chosen option is correct; `None` before answering.
    pub fn is_correct(&self) -> Option<bool> {
        let selected = self.selected.as_deref()?;
        self.question
            .options
            .iter()
            .find(|o| o.id == selected)
            .map(|o| o.is_correct)
    }

    fn feedback_visible(&self) -> bool {
        self.answered && self.show_feedback
    }

    pub fn option_feedback(&self, option_id: &str) -> OptionFeedback {
        if !self.feedback_visible() {
            return OptionFeedback::Neutral;
        }
        let Some(option) = self.question.options.iter().find(|o| o.id == option_id) else {
            return OptionFeedback::Neutral;
        };
        let chosen = self.selected.as_deref() == Some(option_id);
        match (chosen, option.is_correct) {
            (true, true) => OptionFeedback::Correct,
            (true, false) => OptionFeedback::Wrong,
            (false, true) => OptionFeedback::Missed,
            (false, false) => OptionFeedback::Neutral,
        }
    }

    /// The explanation, once answered with feedback enabled.
    pub fn explanation(&self) -> Option<&str> {
        if !self.feedback_visible() {
            return None;
        }
        self.question.explanation.as_deref()
    }

    pub fn toggle_hint(&mut self) {
        self.show_hint = !self.show_hint;
    }

    /// The hint text while the hint is toggled on.
    pub fn hint(&self) -> Option<&str> {
        if !self.show_hint {
            return None;
        }
        self.question.hint.as_deref()
    }

    /// Clear the answer, hide the hint and wipe the drawing.
    pub fn reset(&mut self) {
        self.selected = None;
        self.answered = false;
        self.show_hint = false;
        self.sketch.clear_canvas();
    }

    pub fn drag_drop(&self) -> &DragDropCoordinator {
        &self.drag_drop
    }

    pub fn drag_drop_mut(&mut self) -> &mut DragDropCoordinator {
        &mut self.drag_drop
    }

    pub fn sketch(&self) -> &SketchSurface {
        &self.sketch
    }

    pub fn sketch_mut(&mut self) -> &mut SketchSurface {
        &mut self.sketch
    }
}
