//! Agent definitions
//!
//! An agent is a record: who it is, what it must do, which tools it may call
//! and which shape its answer must take. The orchestrator turns specs into
//! running agents.

use crate::error::Result;
use crate::prompts;
use crate::schemas::{AllFinancialNews, Analysis, OutputShape, PriceData, UnifiedResponse};
use serde_json::Value;

/// Answer shape expected from an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    News,
    Price,
    Analysis,
    Unified,
}

impl OutputKind {
    /// Shape name
    pub fn name(self) -> &'static str {
        match self {
            Self::News => AllFinancialNews::NAME,
            Self::Price => PriceData::NAME,
            Self::Analysis => Analysis::NAME,
            Self::Unified => UnifiedResponse::NAME,
        }
    }

    /// JSON schema of the shape
    pub fn json_schema(self) -> Value {
        match self {
            Self::News => AllFinancialNews::json_schema(),
            Self::Price => PriceData::json_schema(),
            Self::Analysis => Analysis::json_schema(),
            Self::Unified => UnifiedResponse::json_schema(),
        }
    }

    /// Validate `value` against the shape, returning its canonical form
    pub fn check(self, value: Value) -> Result<Value> {
        Ok(match self {
            Self::News => serde_json::to_value(AllFinancialNews::from_value(value)?)?,
            Self::Price => serde_json::to_value(PriceData::from_value(value)?)?,
            Self::Analysis => serde_json::to_value(Analysis::from_value(value)?)?,
            Self::Unified => serde_json::to_value(UnifiedResponse::from_value(value)?)?,
        })
    }
}

/// Configuration record for one agent
#[derive(Debug, Clone)]
pub struct AgentSpec {
    /// Identifier used in logs and errors
    pub id: &'static str,
    /// Display name given to the model
    pub name: &'static str,
    /// One-line role description
    pub role: &'static str,
    /// Numbered instructions
    pub instructions: Vec<String>,
    /// Names of the tools the agent may call
    pub tools: Vec<&'static str>,
    /// Expected answer shape
    pub output: OutputKind,
    /// Whether the agent may answer with an error envelope
    pub reports_errors: bool,
}

impl AgentSpec {
    /// Render the system prompt for this agent
    pub fn system_prompt(&self) -> Result<String> {
        prompts::render_system_prompt(self)
    }

    /// Whether the agent runs a tool loop
    pub fn uses_tools(&self) -> bool {
        !self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::fixtures;

    #[test]
    fn test_output_kind_names() {
        assert_eq!(OutputKind::News.name(), "AllFinancialNews");
        assert_eq!(OutputKind::Unified.name(), "UnifiedResponse");
    }

    #[test]
    fn test_check_returns_canonical_value() {
        let mut price = fixtures::price_json();
        price["volume"] = serde_json::json!(51234567.0);
        let checked = OutputKind::Price.check(price).unwrap();
        assert_eq!(checked["volume"], serde_json::json!(51234567));
    }

    #[test]
    fn test_check_rejects_wrong_shape() {
        assert!(OutputKind::Analysis.check(fixtures::price_json()).is_err());
        assert!(OutputKind::News.check(fixtures::news_json()).is_err());
    }
}
