use std::collections::{BTreeMap, VecDeque};

use crate::config::MemoryConfig;
use crate::models::{MemoryStats, Thought};
use crate::stage::Stage;

/// Two-tier thought memory.
///
/// The short-term tier is a bounded recency buffer; the long-term tier keeps
/// every thought whose score reaches the importance threshold, grouped by
/// stage. Both tiers hold their own copies of the thoughts they receive.
#[derive(Debug, Clone)]
pub struct MemoryManager {
    short_term: VecDeque<Thought>,
    // Stages in first-insertion order
    long_term: Vec<(Stage, Vec<Thought>)>,
    capacity: usize,
    importance_threshold: f64,
}

impl MemoryManager {
    pub fn new(config: &MemoryConfig) -> Self {
        Self {
            short_term: VecDeque::with_capacity(config.short_term_capacity),
            long_term: Vec::new(),
            capacity: config.short_term_capacity,
            importance_threshold: config.importance_threshold,
        }
    }

    /// Record a thought in short-term memory and promote it when important.
    pub fn consolidate(&mut self, thought: &Thought) {
        self.short_term.push_back(thought.clone());
        while self.short_term.len() > self.capacity {
            if let Some(evicted) = self.short_term.pop_front() {
                tracing::debug!("Evicted thought {} from short-term memory", evicted.thought_number);
            }
        }

        match thought.score {
            Some(score) if score >= self.importance_threshold => {
                tracing::debug!(
                    "Promoting thought {} ({}) to long-term memory with score {}",
                    thought.thought_number,
                    thought.stage,
                    score
                );
                match self.long_term.iter_mut().find(|(stage, _)| *stage == thought.stage) {
                    Some((_, thoughts)) => thoughts.push(thought.clone()),
                    None => self.long_term.push((thought.stage, vec![thought.clone()])),
                }
            }
            _ => {}
        }
    }

    /// Long-term thoughts sharing at least one tag with `thought`, other than
    /// `thought` itself.
    ///
    /// A stored copy is the same thought when its number and creation time
    /// match, even if tags were appended since. `think` relies on this: it
    /// promotes the thought before counting relatives and never counts its
    /// own copy.
    ///
    /// Results follow storage order: stages in first-insertion order, then
    /// insertion order within each stage.
    pub fn retrieve_relevant(&self, thought: &Thought) -> Vec<Thought> {
        self.long_term
            .iter()
            .flat_map(|(_, thoughts)| thoughts.iter())
            .filter(|stored| !stored.is_same_record(thought) && stored.shares_tag_with(thought))
            .cloned()
            .collect()
    }

    pub fn short_term(&self) -> impl Iterator<Item = &Thought> {
        self.short_term.iter()
    }

    pub fn long_term(&self, stage: Stage) -> &[Thought] {
        self.long_term
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, thoughts)| thoughts.as_slice())
            .unwrap_or(&[])
    }

    pub fn stats(&self) -> MemoryStats {
        let long_term_by_stage: BTreeMap<Stage, usize> = self
            .long_term
            .iter()
            .map(|(stage, thoughts)| (*stage, thoughts.len()))
            .collect();

        MemoryStats {
            short_term_count: self.short_term.len(),
            long_term_count: long_term_by_stage.values().sum(),
            long_term_by_stage,
        }
    }

    pub fn clear(&mut self) {
        self.short_term.clear();
        self.long_term.clear();
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new(&MemoryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn thought(number: i32, stage: Stage, score: Option<f64>, tags: &[&str]) -> Thought {
        Thought {
            thought: format!("thought {}", number),
            thought_number: number,
            total_thoughts: 20,
            next_thought_needed: true,
            stage,
            is_revision: false,
            revises_thought: None,
            branch_from_thought: None,
            branch_id: None,
            needs_more_thoughts: None,
            score,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_short_term_keeps_most_recent() {
        let mut memory = MemoryManager::default();
        for n in 1..=12 {
            memory.consolidate(&thought(n, Stage::Plan, None, &[]));
        }
        let kept: Vec<i32> = memory.short_term().map(|t| t.thought_number).collect();
        assert_eq!(kept, (3..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_long_term_survives_short_term_eviction() {
        let mut memory = MemoryManager::default();
        memory.consolidate(&thought(1, Stage::Analysis, Some(0.9), &["x"]));
        for n in 2..=11 {
            memory.consolidate(&thought(n, Stage::Plan, Some(0.1), &[]));
        }
        assert!(memory.short_term().all(|t| t.thought_number != 1));
        assert_eq!(memory.long_term(Stage::Analysis).len(), 1);
        assert_eq!(memory.stats().long_term_count, 1);
        assert_eq!(memory.stats().short_term_count, 10);
    }

    #[test]
    fn test_importance_threshold_is_inclusive() {
        let mut memory = MemoryManager::default();
        memory.consolidate(&thought(1, Stage::Research, Some(0.7), &[]));
        memory.consolidate(&thought(2, Stage::Research, Some(0.69), &[]));
        memory.consolidate(&thought(3, Stage::Research, None, &[]));
        let kept: Vec<i32> = memory
            .long_term(Stage::Research)
            .iter()
            .map(|t| t.thought_number)
            .collect();
        assert_eq!(kept, vec![1]);
    }

    #[test]
    fn test_retrieve_relevant_follows_storage_order() {
        let mut memory = MemoryManager::default();
        memory.consolidate(&thought(1, Stage::Synthesis, Some(0.8), &["a"]));
        memory.consolidate(&thought(2, Stage::Analysis, Some(0.8), &["b", "a"]));
        memory.consolidate(&thought(3, Stage::Synthesis, Some(0.8), &["a"]));
        memory.consolidate(&thought(4, Stage::Analysis, Some(0.8), &["c"]));

        let query = thought(9, Stage::Conclusion, None, &["a", "b"]);
        let found: Vec<i32> = memory
            .retrieve_relevant(&query)
            .iter()
            .map(|t| t.thought_number)
            .collect();
        assert_eq!(found, vec![1, 3, 2]);
    }

    #[test]
    fn test_query_thought_is_not_its_own_relative() {
        let mut memory = MemoryManager::default();
        let stored = thought(1, Stage::Analysis, Some(0.9), &["a"]);
        memory.consolidate(&stored);
        assert!(memory.retrieve_relevant(&stored).is_empty());
        assert!(memory.retrieve_relevant(&stored.with_tag("deductive")).is_empty());
    }

    #[test]
    fn test_untagged_query_finds_nothing() {
        let mut memory = MemoryManager::default();
        memory.consolidate(&thought(1, Stage::Synthesis, Some(0.9), &["a"]));
        let query = thought(2, Stage::Synthesis, Some(0.9), &[]);
        assert!(memory.retrieve_relevant(&query).is_empty());
    }

    #[test]
    fn test_custom_capacity() {
        let mut memory = MemoryManager::new(&MemoryConfig {
            short_term_capacity: 2,
            importance_threshold: 0.5,
        });
        for n in 1..=3 {
            memory.consolidate(&thought(n, Stage::Plan, Some(0.5), &[]));
        }
        assert_eq!(memory.stats().short_term_count, 2);
        assert_eq!(memory.long_term(Stage::Plan).len(), 3);
    }

    #[test]
    fn test_clear_empties_both_tiers() {
        let mut memory = MemoryManager::default();
        memory.consolidate(&thought(1, Stage::Plan, Some(0.9), &["a"]));
        memory.clear();
        assert_eq!(memory.short_term().count(), 0);
        assert_eq!(memory.stats().long_term_count, 0);
    }
}
