use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ReasoningError;

/// Named phases of a reasoning sequence, in their canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "Problem Definition")]
    ProblemDefinition,
    #[serde(rename = "Plan")]
    Plan,
    #[serde(rename = "Research")]
    Research,
    #[serde(rename = "Analysis")]
    Analysis,
    #[serde(rename = "Ideation")]
    Ideation,
    #[serde(rename = "Synthesis")]
    Synthesis,
    #[serde(rename = "Evaluation")]
    Evaluation,
    #[serde(rename = "Refinement")]
    Refinement,
    #[serde(rename = "Implementation")]
    Implementation,
    #[serde(rename = "Conclusion")]
    Conclusion,
}

impl Stage {
    pub const ALL: [Stage; 10] = [
        Stage::ProblemDefinition,
        Stage::Plan,
        Stage::Research,
        Stage::Analysis,
        Stage::Ideation,
        Stage::Synthesis,
        Stage::Evaluation,
        Stage::Refinement,
        Stage::Implementation,
        Stage::Conclusion,
    ];

    /// Human-readable canonical label
    pub fn label(&self) -> &'static str {
        match self {
            Self::ProblemDefinition => "Problem Definition",
            Self::Plan => "Plan",
            Self::Research => "Research",
            Self::Analysis => "Analysis",
            Self::Ideation => "Ideation",
            Self::Synthesis => "Synthesis",
            Self::Evaluation => "Evaluation",
            Self::Refinement => "Refinement",
            Self::Implementation => "Implementation",
            Self::Conclusion => "Conclusion",
        }
    }

    /// Symbolic identifier, e.g. `PROBLEM_DEFINITION`
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::ProblemDefinition => "PROBLEM_DEFINITION",
            Self::Plan => "PLAN",
            Self::Research => "RESEARCH",
            Self::Analysis => "ANALYSIS",
            Self::Ideation => "IDEATION",
            Self::Synthesis => "SYNTHESIS",
            Self::Evaluation => "EVALUATION",
            Self::Refinement => "REFINEMENT",
            Self::Implementation => "IMPLEMENTATION",
            Self::Conclusion => "CONCLUSION",
        }
    }

    /// Comma separated list of every canonical label
    pub fn valid_labels() -> String {
        Self::ALL
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Resolve a caller supplied stage name.
    ///
    /// Tries an exact label match first, then the symbolic name ignoring case,
    /// then the label ignoring case.
    pub fn resolve(value: &str) -> Result<Self, ReasoningError> {
        if let Some(stage) = Self::ALL.iter().find(|s| s.label() == value) {
            return Ok(*stage);
        }

        if let Some(stage) = Self::ALL
            .iter()
            .find(|s| s.symbol().eq_ignore_ascii_case(value))
        {
            return Ok(*stage);
        }

        Self::ALL
            .iter()
            .find(|s| s.label().eq_ignore_ascii_case(value))
            .copied()
            .ok_or_else(|| ReasoningError::invalid_stage(value))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stage {
    type Err = ReasoningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}
