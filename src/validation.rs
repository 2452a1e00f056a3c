use chrono::Utc;
use thiserror::Error;

use crate::error::ReasoningResult;
use crate::models::{Thought, ThoughtParams};
use crate::stage::Stage;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid thought number: {number} (must be at least 1)")]
    InvalidThoughtNumber { number: i32 },

    #[error("Total thoughts ({total}) must be greater than or equal to thought number ({number})")]
    TotalBelowNumber { number: i32, total: i32 },

    #[error("Score {score} must be between 0.0 and 1.0")]
    ScoreOutOfRange { score: f64 },

    #[error("Cannot revise thought {revises} from thought {number}: only earlier thoughts can be revised")]
    RevisionNotEarlier { number: i32, revises: i32 },
}

/// Turns raw thought parameters into a validated, timestamped [`Thought`]
#[derive(Debug, Clone, Default)]
pub struct ThoughtValidator;

impl ThoughtValidator {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the stage, stamp the creation time and check structural rules.
    ///
    /// Rules are checked in a fixed order and the first violation is reported.
    pub fn validate(&self, params: ThoughtParams) -> ReasoningResult<Thought> {
        let stage = Stage::resolve(&params.stage)?;

        let thought = Thought {
            thought: params.thought,
            thought_number: params.thought_number,
            total_thoughts: params.total_thoughts,
            next_thought_needed: params.next_thought_needed,
            stage,
            is_revision: params.is_revision.unwrap_or(false),
            revises_thought: params.revises_thought,
            branch_from_thought: params.branch_from_thought,
            branch_id: params.branch_id,
            needs_more_thoughts: params.needs_more_thoughts,
            score: params.score,
            tags: params.tags.unwrap_or_default(),
            created_at: Utc::now(),
        };

        self.check_invariants(&thought)?;
        Ok(thought)
    }

    pub fn check_invariants(&self, thought: &Thought) -> std::result::Result<(), ValidationError> {
        if thought.thought_number < 1 {
            return Err(ValidationError::InvalidThoughtNumber {
                number: thought.thought_number,
            });
        }

        if thought.total_thoughts < thought.thought_number {
            return Err(ValidationError::TotalBelowNumber {
                number: thought.thought_number,
                total: thought.total_thoughts,
            });
        }

        if let Some(score) = thought.score {
            // NaN fails the range check as well
            if !(0.0..=1.0).contains(&score) {
                return Err(ValidationError::ScoreOutOfRange { score });
            }
        }

        if let Some(revises) = thought.revises_thought {
            if revises >= thought.thought_number {
                return Err(ValidationError::RevisionNotEarlier {
                    number: thought.thought_number,
                    revises,
                });
            }
        }

        Ok(())
    }
}
