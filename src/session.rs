use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use crate::config::ReasoningConfig;
use crate::error::{ReasoningError, ReasoningResult};
use crate::memory::MemoryManager;
use crate::metacognition::MetacognitiveMonitor;
use crate::models::{
    ApplyReasoningParams, BranchParams, BranchResponse, CaptureResponse, ClearResponse,
    CurrentThought, QualityResponse, ReasoningResponse, RelatedThought, RelevantResponse,
    SessionSummary, StageSummary, SummaryResponse, ThinkResponse, ThinkingContext, Thought,
    ThoughtAnalysis, ThoughtParams, TimelineEntry,
};
use crate::reasoning::ReasoningEngine;
use crate::stage::Stage;
use crate::validation::ThoughtValidator;

/// One thinking session: the ordered thought history, the branch index and
/// the components that validate, remember, tag and score thoughts.
///
/// Every operation validates before it mutates, so a failed call leaves the
/// session untouched.
#[derive(Debug, Clone)]
pub struct ThinkingSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    validator: ThoughtValidator,
    memory: MemoryManager,
    reasoning: ReasoningEngine,
    monitor: MetacognitiveMonitor,
    history: Vec<Thought>,
    // thought number -> position of its first occurrence in history
    index: HashMap<i32, usize>,
    // branch id -> numbers of the thoughts captured into it
    branches: BTreeMap<String, Vec<i32>>,
    active_branch: Option<String>,
}

impl ThinkingSession {
    pub fn new(config: &ReasoningConfig) -> Self {
        let id = Uuid::new_v4();
        tracing::info!("Starting thinking session {}", id);

        Self {
            id,
            started_at: Utc::now(),
            validator: ThoughtValidator::new(),
            memory: MemoryManager::new(&config.memory),
            reasoning: ReasoningEngine::new(),
            monitor: MetacognitiveMonitor::new(&config.quality),
            history: Vec::new(),
            index: HashMap::new(),
            branches: BTreeMap::new(),
            active_branch: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn history(&self) -> &[Thought] {
        &self.history
    }

    pub fn memory(&self) -> &MemoryManager {
        &self.memory
    }

    pub fn active_branch(&self) -> Option<&str> {
        self.active_branch.as_deref()
    }

    pub fn branch_thoughts(&self, branch_id: &str) -> Option<&[i32]> {
        self.branches.get(branch_id).map(Vec::as_slice)
    }

    /// First thought recorded with `number`
    pub fn get(&self, number: i32) -> Option<&Thought> {
        self.index.get(&number).map(|&pos| &self.history[pos])
    }

    fn position(&self, number: i32) -> ReasoningResult<usize> {
        self.index
            .get(&number)
            .copied()
            .ok_or_else(|| ReasoningError::thought_not_found(number))
    }

    fn record(&mut self, thought: Thought) {
        if let Some(branch_id) = thought.branch_key() {
            self.branches
                .entry(branch_id.to_string())
                .or_default()
                .push(thought.thought_number);
        }

        self.index
            .entry(thought.thought_number)
            .or_insert(self.history.len());
        self.history.push(thought);
    }

    /// Validate and store a thought
    pub fn capture(&mut self, params: ThoughtParams) -> ReasoningResult<CaptureResponse> {
        let thought = self.validator.validate(params)?;

        tracing::info!(
            "Capturing thought {} of {} at stage '{}'",
            thought.thought_number,
            thought.total_thoughts,
            thought.stage
        );

        self.memory.consolidate(&thought);

        let response = CaptureResponse {
            thought_number: thought.thought_number,
            stage: thought.stage,
            timestamp: thought.created_at.to_rfc3339(),
            branch_id: thought.branch_id.clone(),
        };
        self.record(thought);

        Ok(response)
    }

    /// Tag a stored thought with its stage's reasoning pattern.
    ///
    /// `reasoning_type` only changes the reported label; the appended tag is
    /// always the pattern mapped from the stage.
    pub fn apply_reasoning(&mut self, params: ApplyReasoningParams) -> ReasoningResult<ReasoningResponse> {
        let pos = self.position(params.thought_id)?;
        let current = &self.history[pos];

        let mapped = self.reasoning.analyze_thought_pattern(current);
        let reported = params
            .reasoning_type
            .unwrap_or_else(|| mapped.name().to_string());
        let updated = self.reasoning.apply_reasoning_strategy(current);

        tracing::info!(
            "Applied {} reasoning to thought {} (reported as '{}')",
            mapped,
            params.thought_id,
            reported
        );

        let response = ReasoningResponse {
            thought_number: updated.thought_number,
            reasoning_pattern: reported,
            tags: updated.tags.clone(),
        };
        self.history[pos] = updated;

        Ok(response)
    }

    pub fn evaluate_quality(&self, thought_id: i32) -> ReasoningResult<QualityResponse> {
        let thought = &self.history[self.position(thought_id)?];
        let metrics = self.monitor.evaluate_quality(thought);
        let suggestions = self.monitor.suggest_improvements(&metrics);

        tracing::info!(
            "Evaluated thought {}: {} improvement suggestion(s)",
            thought_id,
            suggestions.len()
        );

        Ok(QualityResponse {
            thought_number: thought.thought_number,
            metrics,
            suggestions,
        })
    }

    pub fn retrieve_relevant(&self, thought_id: i32) -> ReasoningResult<RelevantResponse> {
        let thought = &self.history[self.position(thought_id)?];
        let related: Vec<RelatedThought> = self
            .memory
            .retrieve_relevant(thought)
            .iter()
            .map(RelatedThought::from)
            .collect();

        tracing::info!("Found {} thought(s) related to thought {}", related.len(), thought_id);

        Ok(RelevantResponse {
            thought_number: thought.thought_number,
            related_count: related.len(),
            related_thoughts: related,
        })
    }

    /// Open a branch from an existing thought.
    ///
    /// A new branch starts empty and becomes the active branch; an existing
    /// branch is left as it is.
    pub fn branch(&mut self, params: BranchParams) -> ReasoningResult<BranchResponse> {
        let parent = self
            .get(params.parent_thought_id)
            .ok_or_else(|| ReasoningError::parent_not_found(params.parent_thought_id))?
            .thought_number;

        let created = !self.branches.contains_key(&params.branch_id);
        if created {
            self.branches.insert(params.branch_id.clone(), Vec::new());
            self.active_branch = Some(params.branch_id.clone());
            tracing::info!("Created branch '{}' from thought {}", params.branch_id, parent);
        } else {
            tracing::info!("Branch '{}' already exists", params.branch_id);
        }

        Ok(BranchResponse {
            parent_thought: parent,
            is_active: self.active_branch.as_deref() == Some(params.branch_id.as_str()),
            branch_id: params.branch_id,
            created,
        })
    }

    /// Validate, tag, remember, score and store a thought in one call.
    ///
    /// The thought is consolidated before related thoughts are counted, so an
    /// important thought is already in long-term memory; that copy is not
    /// counted as related to itself.
    pub fn think(&mut self, params: ThoughtParams) -> ReasoningResult<ThinkResponse> {
        let validated = self.validator.validate(params)?;
        let pattern = self.reasoning.analyze_thought_pattern(&validated);
        let thought = self.reasoning.apply_reasoning_strategy(&validated);

        tracing::info!(
            "Thinking through thought {} of {} at stage '{}'",
            thought.thought_number,
            thought.total_thoughts,
            thought.stage
        );

        self.memory.consolidate(&thought);
        let metrics = self.monitor.evaluate_quality(&thought);
        let suggestions = self.monitor.suggest_improvements(&metrics);
        let related = self.memory.retrieve_relevant(&thought);

        let current_thought = CurrentThought {
            thought_number: thought.thought_number,
            total_thoughts: thought.total_thoughts,
            next_thought_needed: thought.next_thought_needed,
            stage: thought.stage,
            score: thought.score,
            tags: thought.tags.clone(),
            timestamp: thought.created_at.to_rfc3339(),
        };
        let current_stage = thought.stage;
        self.record(thought);

        Ok(ThinkResponse {
            current_thought,
            analysis: ThoughtAnalysis {
                related_thoughts_count: related.len(),
                reasoning_pattern: pattern.name().to_string(),
                quality_metrics: metrics,
                suggestions,
            },
            context: ThinkingContext {
                active_branches: self.branches.keys().cloned().collect(),
                thought_history_length: self.history.len(),
                current_stage,
            },
        })
    }

    pub fn summary(&self) -> SummaryResponse {
        let Some(latest) = self.history.last() else {
            return SummaryResponse::empty();
        };

        let mut totals: BTreeMap<Stage, (usize, f64)> = BTreeMap::new();
        for thought in &self.history {
            let entry = totals.entry(thought.stage).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += thought.score.unwrap_or(0.0);
        }

        let stages = totals
            .into_iter()
            .map(|(stage, (count, sum))| {
                (
                    stage,
                    StageSummary {
                        count,
                        average_score: sum / count as f64,
                    },
                )
            })
            .collect();

        let timeline = self
            .history
            .iter()
            .map(|t| TimelineEntry {
                thought_number: t.thought_number,
                stage: t.stage,
                score: t.score,
                branch_id: t.branch_id.clone(),
            })
            .collect();

        SummaryResponse::Summary {
            summary: SessionSummary {
                session_id: self.id.to_string(),
                started_at: self.started_at.to_rfc3339(),
                total_thoughts: self.history.len(),
                stages,
                branches: self
                    .branches
                    .iter()
                    .map(|(id, thoughts)| (id.clone(), thoughts.len()))
                    .collect(),
                revisions: self.history.iter().filter(|t| t.is_revision).count(),
                declared_total: latest.total_thoughts,
                next_thought_needed: latest.next_thought_needed,
                memory: self.memory.stats(),
                timeline,
            },
        }
    }

    /// Drop the history, every branch and both memory tiers
    pub fn clear(&mut self) -> ClearResponse {
        tracing::info!(
            "Clearing session {}: {} thought(s), {} branch(es)",
            self.id,
            self.history.len(),
            self.branches.len()
        );

        self.history.clear();
        self.index.clear();
        self.branches.clear();
        self.active_branch = None;
        self.memory.clear();

        ClearResponse {
            message: "Thinking process cleared".to_string(),
        }
    }
}

impl Default for ThinkingSession {
    fn default() -> Self {
        Self::new(&ReasoningConfig::default())
    }
}
