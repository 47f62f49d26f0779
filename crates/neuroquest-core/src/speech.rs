//! Persuasive speech organizer.
//!
//! A speech is an ordered list of sections (hook, position, arguments, ...)
//! that the learner fills in, reorders and previews.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Average speaking rate used for time estimates.
pub const WORDS_PER_MINUTE: usize = 150;

/// Role of a section in the speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    Hook,
    Position,
    Argument,
    Counterargument,
    Conclusion,
}

impl SectionKind {
    /// Default heading for a new section of this kind.
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Hook => "Hook (Attention Grabber)",
            SectionKind::Position => "Position Statement",
            SectionKind::Argument => "Supporting Argument",
            SectionKind::Counterargument => "Address Counterargument",
            SectionKind::Conclusion => "Conclusion & Call to Action",
        }
    }

    /// Writing tips shown next to the section.
    pub fn tips(self) -> &'static [&'static str] {
        match self {
            SectionKind::Hook => &[
                "Start with a question",
                "Use a surprising statistic",
                "Tell a brief story",
                "Make a bold statement",
            ],
            SectionKind::Position => &[
                "Clearly state your position",
                "Be specific and direct",
                "Make it memorable",
                "Preview your main points",
            ],
            SectionKind::Argument => &[
                "Use evidence and examples",
                "Appeal to logic and emotion",
                "Make it relevant to audience",
                "Use credible sources",
            ],
            SectionKind::Counterargument => &[
                "Acknowledge opposing views",
                "Respectfully address concerns",
                "Provide counter-evidence",
                "Strengthen your position",
            ],
            SectionKind::Conclusion => &[
                "Summarize key points",
                "Restate your position",
                "End with a call to action",
                "Make it memorable",
            ],
        }
    }
}

/// Direction for [`SpeechOrganizer::move_section`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechSection {
    pub id: String,
    pub kind: SectionKind,
    pub title: String,
    pub content: String,
}

impl SpeechSection {
    pub fn new(kind: SectionKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            title: kind.title().to_string(),
            content: String::new(),
        }
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// Snapshot reported to the quest after each change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechSummary {
    pub topic: String,
    pub sections: Vec<SpeechSection>,
    pub target_minutes: u32,
    pub word_count: usize,
}

/// Ordered speech sections for one topic.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechOrganizer {
    topic: String,
    target_minutes: u32,
    sections: Vec<SpeechSection>,
}

impl Default for SpeechOrganizer {
    fn default() -> Self {
        Self::new("park")
    }
}

impl SpeechOrganizer {
    /// Start a speech on `topic` with an empty hook and position statement.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            target_minutes: 3,
            sections: vec![
                SpeechSection::new(SectionKind::Hook),
                SpeechSection::new(SectionKind::Position),
            ],
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    pub fn target_minutes(&self) -> u32 {
        self.target_minutes
    }

    pub fn set_target_minutes(&mut self, minutes: u32) {
        self.target_minutes = minutes;
    }

    pub fn sections(&self) -> &[SpeechSection] {
        &self.sections
    }

    /// Append an empty section, returning its id.
    pub fn add_section(&mut self, kind: SectionKind) -> String {
        let section = SpeechSection::new(kind);
        let id = section.id.clone();
        self.sections.push(section);
        id
    }

    /// Replace a section's text. Returns false for an unknown id.
    pub fn update_section(&mut self, id: &str, content: impl Into<String>) -> bool {
        match self.sections.iter_mut().find(|s| s.id == id) {
            Some(section) => {
                section.content = content.into();
                true
            }
            None => false,
        }
    }

    pub fn delete_section(&mut self, id: &str) {
        self.sections.retain(|s| s.id != id);
    }

    /// Swap a section with its neighbour.
    ///
    /// Returns false if the id is unknown or the section is already at that end.
    pub fn move_section(&mut self, id: &str, direction: MoveDirection) -> bool {
        let Some(index) = self.sections.iter().position(|s| s.id == id) else {
            return false;
        };
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|&i| i < self.sections.len()),
        };
        match target {
            Some(target) => {
                self.sections.swap(index, target);
                true
            }
            None => false,
        }
    }

    /// Non-blank section texts joined by blank lines.
    pub fn preview(&self) -> String {
        self.sections
            .iter()
            .filter(|s| !s.content.trim().is_empty())
            .map(|s| s.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn word_count(&self) -> usize {
        self.sections.iter().map(SpeechSection::word_count).sum()
    }

    /// Speaking time in whole minutes, rounded up.
    pub fn reading_minutes(&self) -> usize {
        self.word_count().div_ceil(WORDS_PER_MINUTE)
    }

    pub fn summary(&self) -> SpeechSummary {
        SpeechSummary {
            topic: self.topic.clone(),
            sections: self.sections.clone(),
            target_minutes: self.target_minutes,
            word_count: self.word_count(),
        }
    }
}
