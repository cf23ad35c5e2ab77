//! HealthStat MCP Server Implementation
//!
//! Implements the MCP server with all HealthStat tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::chat::ChatRelay;
use crate::config::Config;
use crate::metrics::{FieldValue, RawBiometrics};
use crate::models::{ProfileStore, UnitSystem, UserProfile};
use crate::tools::status::StatusTracker;
use crate::tools::{charts, chat, metrics};

/// HealthStat MCP Service
#[derive(Clone)]
pub struct HealthStatService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    store: Arc<ProfileStore>,
    relay: Arc<ChatRelay>,
    chart_dir: PathBuf,
    tool_router: ToolRouter<HealthStatService>,
}

impl HealthStatService {
    pub fn new(config: &Config, relay: ChatRelay) -> Self {
        let tracker = StatusTracker::new(
            relay.is_configured(),
            config.gemini_model.clone(),
            config.chart_dir.clone(),
        );
        Self {
            status_tracker: Arc::new(Mutex::new(tracker)),
            store: Arc::new(ProfileStore::new()),
            relay: Arc::new(relay),
            chart_dir: config.chart_dir.clone(),
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateHealthMetricsParams {
    /// "metric" (default) or "imperial"
    pub unit: Option<String>,
    pub name: Option<String>,
    /// Age in years (10-120)
    pub age: Option<f64>,
    /// Metric height in centimeters (100-250)
    pub height_cm: Option<f64>,
    /// Metric weight in kilograms (30-300)
    pub weight_kg: Option<f64>,
    /// Imperial height, feet part (3-8)
    pub height_ft: Option<f64>,
    /// Imperial height, inches part (0-11.99), defaults to 0
    pub height_in: Option<f64>,
    /// Imperial weight in pounds (66-660)
    pub weight_lbs: Option<f64>,
    /// "male" or "female"
    pub gender: Option<String>,
    /// Activity factor (1.2, 1.375, 1.55, 1.725, 1.9) or its name
    pub activity_level: Option<serde_json::Value>,
    /// "lose", "maintain" or "gain"
    pub goal: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct HealthChatParams {
    pub message: String,
    /// Profile to discuss; defaults to the current profile
    pub metrics: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RenderHealthChartsParams {
    /// PNG file name inside the chart directory
    pub file_name: Option<String>,
    /// Width in pixels (200-4000, default 1200)
    pub width: Option<u32>,
    /// Height in pixels (200-4000, default 900)
    pub height: Option<u32>,
}

fn parse_unit(unit: Option<&str>) -> Option<UnitSystem> {
    match unit.map(|u| u.trim().to_lowercase()).as_deref() {
        None | Some("") | Some("metric") => Some(UnitSystem::Metric),
        Some("imperial") => Some(UnitSystem::Imperial),
        Some(_) => None,
    }
}

fn activity_value(value: Option<serde_json::Value>) -> Option<FieldValue> {
    match value? {
        serde_json::Value::Null => None,
        serde_json::Value::Number(n) => n.as_f64().map(FieldValue::Number),
        serde_json::Value::String(s) => Some(FieldValue::Text(s)),
        other => Some(FieldValue::Text(other.to_string())),
    }
}

impl CalculateHealthMetricsParams {
    fn into_raw(self) -> Option<RawBiometrics> {
        Some(RawBiometrics {
            unit: parse_unit(self.unit.as_deref())?,
            name: self.name,
            age: self.age.map(FieldValue::Number),
            height_cm: self.height_cm.map(FieldValue::Number),
            weight_kg: self.weight_kg.map(FieldValue::Number),
            height_ft: self.height_ft.map(FieldValue::Number),
            height_in: self.height_in.map(FieldValue::Number),
            weight_lbs: self.weight_lbs.map(FieldValue::Number),
            gender: self.gender,
            activity_level: activity_value(self.activity_level),
            goal: self.goal,
        })
    }
}

fn json_result<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl HealthStatService {
    // --- Status ---

    #[tool(description = "Get the current status of the HealthStat service including build info, profile state, chat configuration, and process information")]
    async fn healthstat_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.store);
        json_result(&status)
    }

    #[tool(description = "Get step-by-step instructions for using HealthStat. Call this when starting a session or when unsure which inputs the tools accept.")]
    fn healthstat_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::HEALTHSTAT_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(HEALTHSTAT_INSTRUCTIONS)]))
    }

    // --- Metrics ---

    #[tool(description = "Validate biometric inputs (metric or imperial), calculate BMI, BMR, TDEE, goal calories, body fat, water and micronutrient needs, and make the result the current profile")]
    fn calculate_health_metrics(&self, Parameters(p): Parameters<CalculateHealthMetricsParams>) -> Result<CallToolResult, McpError> {
        let Some(raw) = p.into_raw() else {
            return json_result(&serde_json::json!({
                "error": "Unit must be \"metric\" or \"imperial\".",
                "field": "unit",
            }));
        };
        match metrics::calculate_health_metrics(&self.store, &raw) {
            Ok(response) => json_result(&response),
            Err(e) => json_result(&serde_json::json!({
                "error": e.message,
                "field": e.field,
            })),
        }
    }

    #[tool(description = "Get the current profile: the last successfully submitted biometrics and their calculated metrics")]
    fn get_current_profile(&self) -> Result<CallToolResult, McpError> {
        let result = metrics::get_current_profile(&self.store);
        if !result.loaded {
            return json_result(&serde_json::json!({
                "loaded": false,
                "message": "No profile yet. Call calculate_health_metrics first.",
            }));
        }
        json_result(&result)
    }

    // --- Charts ---

    #[tool(description = "Render the dashboard charts (BMI gauge, body fat, macronutrient split, calorie levels) for the current profile to a PNG file")]
    fn render_health_charts(&self, Parameters(p): Parameters<RenderHealthChartsParams>) -> Result<CallToolResult, McpError> {
        let result = charts::render_health_charts(
            &self.store,
            &self.chart_dir,
            p.file_name.as_deref(),
            p.width,
            p.height,
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Chat ---

    #[tool(description = "Ask the health assistant a question. The current profile is sent as context unless metrics are supplied.")]
    async fn health_chat(&self, Parameters(p): Parameters<HealthChatParams>) -> Result<CallToolResult, McpError> {
        let metrics = match p.metrics {
            Some(value) => Some(
                serde_json::from_value::<UserProfile>(value)
                    .map_err(|e| McpError::invalid_params(format!("Invalid metrics: {}", e), None))?,
            ),
            None => None,
        };
        let response = chat::health_chat(&self.relay, &self.store, p.message, metrics).await;
        json_result(&response)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for HealthStatService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "healthstat".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("HealthStat Dashboard".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "HealthStat - Personal health metrics and an AI health assistant. \
                 IMPORTANT: Call healthstat_instructions before first use. \
                 Metrics: calculate_health_metrics (validates and replaces the current profile), get_current_profile. \
                 Charts: render_health_charts. \
                 Chat: health_chat (uses the current profile as context). \
                 Status: healthstat_status."
                    .into(),
            ),
        }
    }
}
