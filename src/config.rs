use crate::error::{ReasoningError, ReasoningResult};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// UnifiedReasoning service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReasoningConfig {
    /// Memory tier configuration
    pub memory: MemoryConfig,
    /// Quality review configuration
    pub quality: QualityConfig,
    /// Server configuration
    pub server: ServerConfig,
}

/// Short-term / long-term memory settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Number of thoughts kept in the short-term buffer
    pub short_term_capacity: usize,
    /// Minimum score for promotion into long-term memory
    pub importance_threshold: f64,
}

/// Metacognitive review settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Metrics strictly below this value produce an improvement suggestion
    pub suggestion_threshold: f64,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server name/identifier
    pub name: String,
    /// Server version
    pub version: String,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            short_term_capacity: 10,
            importance_threshold: 0.7,
        }
    }
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            suggestion_threshold: 0.7,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl ReasoningConfig {
    /// Load configuration from defaults, an optional TOML file and the environment
    pub fn load() -> ReasoningResult<Self> {
        match std::env::var("UNIFIED_REASONING_CONFIG") {
            Ok(path) => {
                tracing::info!("Using UNIFIED_REASONING_CONFIG: {}", path);
                Self::load_from(Some(Path::new(&path)))
            }
            Err(_) => Self::load_from(None),
        }
    }

    /// Load configuration, reading `path` (or `unified-reasoning.toml`) if present
    pub fn load_from(path: Option<&Path>) -> ReasoningResult<Self> {
        let defaults = Self::default();

        let mut config = Config::builder()
            .set_default("memory.short_term_capacity", defaults.memory.short_term_capacity as i64)?
            .set_default("memory.importance_threshold", defaults.memory.importance_threshold)?
            .set_default("quality.suggestion_threshold", defaults.quality.suggestion_threshold)?
            .set_default("server.name", defaults.server.name)?
            .set_default("server.version", defaults.server.version)?;

        config = match path {
            Some(path) => config.add_source(File::from(path).required(false)),
            None => config.add_source(File::with_name("unified-reasoning.toml").required(false)),
        };

        // UNIFIED_REASONING_MEMORY__SHORT_TERM_CAPACITY=20
        config = config.add_source(
            Environment::with_prefix("UNIFIED_REASONING")
                .prefix_separator("_")
                .separator("__"),
        );

        let config: Self = config.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> ReasoningResult<()> {
        if self.memory.short_term_capacity == 0 {
            return Err(ReasoningError::Validation {
                field: "memory.short_term_capacity".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        for (field, value) in [
            ("memory.importance_threshold", self.memory.importance_threshold),
            ("quality.suggestion_threshold", self.quality.suggestion_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ReasoningError::Validation {
                    field: field.to_string(),
                    reason: format!("{} is outside 0.0-1.0", value),
                });
            }
        }

        Ok(())
    }
}
