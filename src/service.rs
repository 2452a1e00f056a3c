use std::future::Future;
use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{CallToolResult, Content, ErrorData, ServerCapabilities, ServerInfo},
    ServerHandler,
};
use rmcp_macros::{tool, tool_handler, tool_router};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::config::ReasoningConfig;
use crate::error::ReasoningResult;
use crate::models::{
    ApplyReasoningParams, BranchParams, Envelope, ThoughtIdParams, ThoughtParams,
};
use crate::session::ThinkingSession;

/// Main service struct for the UnifiedReasoning MCP server.
///
/// Mutating tools take the session's write lock; read-only tools share the
/// read lock.
#[derive(Clone)]
pub struct UnifiedReasoningService {
    tool_router: ToolRouter<Self>,
    session: Arc<RwLock<ThinkingSession>>,
    config: ReasoningConfig,
}

impl UnifiedReasoningService {
    /// Create a new service instance from the environment
    pub async fn new() -> ReasoningResult<Self> {
        tracing::info!("Initializing UnifiedReasoning service");
        let config = ReasoningConfig::load()?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: ReasoningConfig) -> Self {
        tracing::info!(
            "Short-term capacity {}, importance threshold {}, suggestion threshold {}",
            config.memory.short_term_capacity,
            config.memory.importance_threshold,
            config.quality.suggestion_threshold
        );

        Self {
            tool_router: Self::tool_router(),
            session: Arc::new(RwLock::new(ThinkingSession::new(&config))),
            config,
        }
    }

    /// Shared handle to the session
    pub fn session(&self) -> Arc<RwLock<ThinkingSession>> {
        self.session.clone()
    }

    pub fn config(&self) -> &ReasoningConfig {
        &self.config
    }

    /// Fold an operation result into the envelope returned to the caller
    fn respond<T: Serialize>(
        tool: &str,
        result: ReasoningResult<T>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        if let Err(e) = &result {
            tracing::warn!("{} failed: {}", tool, e);
        }

        let body = encode(&Envelope::from(result)).map_err(|e| {
            tracing::error!("{} response could not be encoded: {}", tool, e);
            ErrorData::from(e)
        })?;
        Ok(CallToolResult::success(vec![Content::text(body)]))
    }
}

/// JSON text of an envelope, as carried in the tool's content block
fn encode<T: Serialize>(envelope: &Envelope<T>) -> ReasoningResult<String> {
    Ok(serde_json::to_string(envelope)?)
}

#[tool_router]
impl UnifiedReasoningService {
    #[tool(description = "Capture a thought in a staged reasoning sequence, with optional revision and branch markers")]
    pub async fn capture_thought(
        &self,
        params: Parameters<ThoughtParams>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        let result = self.session.write().await.capture(params.0);
        Self::respond("capture_thought", result)
    }

    #[tool(description = "Tag a captured thought with the reasoning pattern of its stage")]
    pub async fn apply_reasoning(
        &self,
        params: Parameters<ApplyReasoningParams>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        let result = self.session.write().await.apply_reasoning(params.0);
        Self::respond("apply_reasoning", result)
    }

    #[tool(description = "Score a captured thought on six quality metrics and suggest improvements")]
    pub async fn evaluate_quality(
        &self,
        params: Parameters<ThoughtIdParams>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        let result = self.session.read().await.evaluate_quality(params.0.thought_id);
        Self::respond("evaluate_quality", result)
    }

    #[tool(description = "Find important thoughts sharing a tag with a captured thought")]
    pub async fn retrieve_relevant(
        &self,
        params: Parameters<ThoughtIdParams>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        let result = self.session.read().await.retrieve_relevant(params.0.thought_id);
        Self::respond("retrieve_relevant", result)
    }

    #[tool(description = "Open a named branch from a captured thought")]
    pub async fn branch_thought(
        &self,
        params: Parameters<BranchParams>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        let result = self.session.write().await.branch(params.0);
        Self::respond("branch_thought", result)
    }

    #[tool(description = "Capture, tag, remember and review a thought in one step")]
    pub async fn think(
        &self,
        params: Parameters<ThoughtParams>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        let result = self.session.write().await.think(params.0);
        Self::respond("think", result)
    }

    #[tool(description = "Summarize the thinking session by stage, branch and timeline")]
    pub async fn thinking_summary(&self) -> std::result::Result<CallToolResult, ErrorData> {
        let summary = self.session.read().await.summary();
        Self::respond("thinking_summary", Ok(summary))
    }

    #[tool(description = "Clear all thoughts, branches and memory from the session")]
    pub async fn clear_thinking(&self) -> std::result::Result<CallToolResult, ErrorData> {
        let cleared = self.session.write().await.clear();
        Self::respond("clear_thinking", Ok(cleared))
    }
}

#[tool_handler]
impl ServerHandler for UnifiedReasoningService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: rmcp::model::ProtocolVersion::V_2024_11_05,
            server_info: rmcp::model::Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
            },
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            instructions: Some("UnifiedReasoning MCP Server for staged thinking with heuristic reasoning and quality review".into()),
        }
    }
}
