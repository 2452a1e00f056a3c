use serde::Serialize;

use crate::config::QualityConfig;
use crate::models::Thought;
use crate::stage::Stage;

/// Quality metrics derived from a thought's score and stage
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct QualityMetrics {
    pub coherence: f64,
    pub depth: f64,
    pub creativity: f64,
    pub practicality: f64,
    pub relevance: f64,
    pub clarity: f64,
}

impl QualityMetrics {
    /// Metrics paired with their names, in declaration order
    pub fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("coherence", self.coherence),
            ("depth", self.depth),
            ("creativity", self.creativity),
            ("practicality", self.practicality),
            ("relevance", self.relevance),
            ("clarity", self.clarity),
        ]
    }
}

fn suggestion_for(metric: &str) -> &'static str {
    match metric {
        "coherence" => "Improve logical flow and connections between ideas",
        "depth" => "Explore the topic more thoroughly and consider underlying principles",
        "creativity" => "Consider alternative perspectives and novel approaches",
        "practicality" => "Focus on actionable and implementable solutions",
        "relevance" => "Ensure alignment with the core problem and objectives",
        "clarity" => "Express ideas more clearly and concisely",
        _ => "Review this aspect of the thought",
    }
}

/// Scores thoughts and proposes improvements for weak metrics
#[derive(Debug, Clone)]
pub struct MetacognitiveMonitor {
    suggestion_threshold: f64,
}

impl MetacognitiveMonitor {
    pub fn new(config: &QualityConfig) -> Self {
        Self {
            suggestion_threshold: config.suggestion_threshold,
        }
    }

    /// Derive the six metrics. Unscored thoughts get all zeros.
    ///
    /// Stage bonuses are applied after the base fractions and are not clamped,
    /// so a boosted metric may exceed 1.0.
    pub fn evaluate_quality(&self, thought: &Thought) -> QualityMetrics {
        let Some(score) = thought.score else {
            return QualityMetrics::default();
        };

        let mut metrics = QualityMetrics {
            coherence: score,
            depth: score * 0.8,
            creativity: score * 0.7,
            practicality: score * 0.9,
            relevance: score * 0.85,
            clarity: score * 0.95,
        };

        match thought.stage {
            Stage::Ideation => metrics.creativity *= 1.2,
            Stage::Evaluation => metrics.practicality *= 1.2,
            _ => {}
        }

        metrics
    }

    pub fn suggest_improvements(&self, metrics: &QualityMetrics) -> Vec<String> {
        metrics
            .named()
            .iter()
            .filter(|(_, value)| *value < self.suggestion_threshold)
            .map(|(name, _)| suggestion_for(name).to_string())
            .collect()
    }
}

impl Default for MetacognitiveMonitor {
    fn default() -> Self {
        Self::new(&QualityConfig::default())
    }
}
