//! Reasoning patterns attached to thoughts as tags

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Thought;
use crate::stage::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningPattern {
    Deductive,
    Inductive,
    Abductive,
    Analogical,
    Creative,
}

impl ReasoningPattern {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Deductive => "deductive",
            Self::Inductive => "inductive",
            Self::Abductive => "abductive",
            Self::Analogical => "analogical",
            Self::Creative => "creative",
        }
    }
}

impl fmt::Display for ReasoningPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps stages to reasoning patterns
#[derive(Debug, Clone, Default)]
pub struct ReasoningEngine;

impl ReasoningEngine {
    pub fn new() -> Self {
        Self
    }

    /// Pattern for a thought's stage; deductive unless a rule says otherwise
    pub fn analyze_thought_pattern(&self, thought: &Thought) -> ReasoningPattern {
        match thought.stage {
            Stage::Analysis | Stage::Evaluation => ReasoningPattern::Deductive,
            Stage::Ideation => ReasoningPattern::Creative,
            Stage::Synthesis => ReasoningPattern::Inductive,
            _ => ReasoningPattern::Deductive,
        }
    }

    /// Returns the thought with its mapped pattern appended to the tags.
    ///
    /// Tags are never deduplicated, so applying twice records the pattern twice.
    pub fn apply_reasoning_strategy(&self, thought: &Thought) -> Thought {
        let pattern = self.analyze_thought_pattern(thought);
        tracing::debug!(
            "Applying {} reasoning to thought {} ({})",
            pattern,
            thought.thought_number,
            thought.stage
        );
        thought.with_tag(pattern.name())
    }
}
