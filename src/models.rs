use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ReasoningError;
use crate::metacognition::QualityMetrics;
use crate::stage::Stage;

/// Parameters for capture_thought and think
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ThoughtParams {
    #[schemars(description = "The thought content to record")]
    pub thought: String,

    #[schemars(description = "Position of this thought in the sequence (1-based)")]
    pub thought_number: i32,

    #[schemars(description = "Expected total number of thoughts in the sequence")]
    pub total_thoughts: i32,

    #[schemars(description = "Whether another thought is expected after this one")]
    pub next_thought_needed: bool,

    #[schemars(description = "Thinking stage, e.g. 'Problem Definition', 'ANALYSIS' or 'ideation'")]
    pub stage: String,

    #[schemars(description = "Whether this thought revises an earlier one")]
    #[serde(default)]
    pub is_revision: Option<bool>,

    #[schemars(description = "Number of the thought being revised")]
    #[serde(default)]
    pub revises_thought: Option<i32>,

    #[schemars(description = "Number of the thought this one branches from")]
    #[serde(default)]
    pub branch_from_thought: Option<i32>,

    #[schemars(description = "Identifier of the branch this thought belongs to")]
    #[serde(default)]
    pub branch_id: Option<String>,

    #[schemars(description = "Whether more thoughts than planned are needed")]
    #[serde(default)]
    pub needs_more_thoughts: Option<bool>,

    #[schemars(description = "Quality score between 0.0 and 1.0")]
    #[serde(default)]
    pub score: Option<f64>,

    #[schemars(description = "Tags for categorization (e.g., ['architecture', 'risk'])")]
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Parameters for apply_reasoning
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ApplyReasoningParams {
    #[schemars(description = "Number of the thought to reason over")]
    pub thought_id: i32,

    #[schemars(description = "Reasoning pattern to report: deductive, inductive, abductive, analogical, creative")]
    #[serde(default)]
    pub reasoning_type: Option<String>,
}

/// Parameters for operations addressing a single thought
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ThoughtIdParams {
    #[schemars(description = "Number of the thought")]
    pub thought_id: i32,
}

/// Parameters for branch_thought
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BranchParams {
    #[schemars(description = "Number of the thought to branch from")]
    pub parent_thought_id: i32,

    #[schemars(description = "Identifier for the branch")]
    pub branch_id: String,
}

/// A validated, timestamped thought.
///
/// Values are never mutated in place; updates produce a new `Thought` which
/// replaces the stored entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thought {
    pub thought: String,
    pub thought_number: i32,
    pub total_thoughts: i32,
    pub next_thought_needed: bool,
    pub stage: Stage,
    pub is_revision: bool,
    pub revises_thought: Option<i32>,
    pub branch_from_thought: Option<i32>,
    pub branch_id: Option<String>,
    pub needs_more_thoughts: Option<bool>,
    pub score: Option<f64>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Thought {
    /// Copy of this thought with `tag` appended
    pub fn with_tag(&self, tag: impl Into<String>) -> Self {
        let mut tags = self.tags.clone();
        tags.push(tag.into());
        Self {
            tags,
            ..self.clone()
        }
    }

    /// Same recorded thought, regardless of tags added since
    pub fn is_same_record(&self, other: &Thought) -> bool {
        self.thought_number == other.thought_number && self.created_at == other.created_at
    }

    pub fn shares_tag_with(&self, other: &Thought) -> bool {
        self.tags.iter().any(|tag| other.tags.contains(tag))
    }

    /// Branch id when the thought declares both a parent and a branch
    pub fn branch_key(&self) -> Option<&str> {
        match (self.branch_from_thought, self.branch_id.as_deref()) {
            (Some(_), Some(branch_id)) => Some(branch_id),
            _ => None,
        }
    }
}

/// Response from capture_thought
#[derive(Debug, Serialize)]
pub struct CaptureResponse {
    pub thought_number: i32,
    pub stage: Stage,
    pub timestamp: String,
    pub branch_id: Option<String>,
}

/// Response from apply_reasoning
#[derive(Debug, Serialize)]
pub struct ReasoningResponse {
    pub thought_number: i32,
    pub reasoning_pattern: String,
    pub tags: Vec<String>,
}

/// Response from evaluate_quality
#[derive(Debug, Serialize)]
pub struct QualityResponse {
    pub thought_number: i32,
    pub metrics: QualityMetrics,
    pub suggestions: Vec<String>,
}

/// Projection of a related thought
#[derive(Debug, Serialize, PartialEq)]
pub struct RelatedThought {
    pub thought_number: i32,
    pub stage: Stage,
    pub tags: Vec<String>,
}

impl From<&Thought> for RelatedThought {
    fn from(thought: &Thought) -> Self {
        Self {
            thought_number: thought.thought_number,
            stage: thought.stage,
            tags: thought.tags.clone(),
        }
    }
}

/// Response from retrieve_relevant
#[derive(Debug, Serialize)]
pub struct RelevantResponse {
    pub thought_number: i32,
    pub related_count: usize,
    pub related_thoughts: Vec<RelatedThought>,
}

/// Response from branch_thought
#[derive(Debug, Serialize)]
pub struct BranchResponse {
    pub parent_thought: i32,
    pub branch_id: String,
    pub created: bool,
    pub is_active: bool,
}

/// Snapshot of the thought processed by think
#[derive(Debug, Serialize)]
pub struct CurrentThought {
    pub thought_number: i32,
    pub total_thoughts: i32,
    pub next_thought_needed: bool,
    pub stage: Stage,
    pub score: Option<f64>,
    pub tags: Vec<String>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ThoughtAnalysis {
    pub related_thoughts_count: usize,
    pub reasoning_pattern: String,
    pub quality_metrics: QualityMetrics,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ThinkingContext {
    pub active_branches: Vec<String>,
    pub thought_history_length: usize,
    pub current_stage: Stage,
}

/// Response from think
#[derive(Debug, Serialize)]
pub struct ThinkResponse {
    pub current_thought: CurrentThought,
    pub analysis: ThoughtAnalysis,
    pub context: ThinkingContext,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct StageSummary {
    pub count: usize,
    pub average_score: f64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TimelineEntry {
    pub thought_number: i32,
    pub stage: Stage,
    pub score: Option<f64>,
    pub branch_id: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MemoryStats {
    pub short_term_count: usize,
    pub long_term_count: usize,
    pub long_term_by_stage: BTreeMap<Stage, usize>,
}

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub started_at: String,
    pub total_thoughts: usize,
    pub stages: BTreeMap<Stage, StageSummary>,
    pub branches: BTreeMap<String, usize>,
    pub revisions: usize,
    pub declared_total: i32,
    pub next_thought_needed: bool,
    pub memory: MemoryStats,
    pub timeline: Vec<TimelineEntry>,
}

/// Response from thinking_summary
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SummaryResponse {
    Empty { summary: String },
    Summary { summary: SessionSummary },
}

impl SummaryResponse {
    pub const NO_THOUGHTS: &'static str = "No thoughts recorded yet";

    pub fn empty() -> Self {
        Self::Empty {
            summary: Self::NO_THOUGHTS.to_string(),
        }
    }
}

/// Response from clear_thinking
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

/// Failure payload
#[derive(Debug, Serialize)]
pub struct Failure {
    pub error: String,
    pub error_kind: String,
    pub timestamp: String,
}

/// Uniform result envelope returned by every operation
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Success(T),
    Failed(Failure),
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl<T> From<std::result::Result<T, ReasoningError>> for Envelope<T> {
    fn from(result: std::result::Result<T, ReasoningError>) -> Self {
        match result {
            Ok(payload) => Self::Success(payload),
            Err(err) => Self::Failed(Failure {
                error_kind: err.kind().to_string(),
                error: err.to_string(),
                timestamp: Utc::now().to_rfc3339(),
            }),
        }
    }
}
