//! Tool trait definition

use agent_core::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Trait for tools that agents can execute
///
/// Tools are functions that LLM agents can call to interact with the world.
/// Each tool must provide a name, description, and JSON schema for its input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with parameters matching [`Tool::input_schema`]
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry and match the name in ToolDefinition
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// This description helps the LLM understand when to use this tool
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "symbol": { "type": "string" }
    ///     },
    ///     "required": ["symbol"]
    /// });
    /// ```
    fn input_schema(&self) -> Value;
}

/// Read a required, non-empty string parameter
pub fn required_str<'a>(params: &'a Value, key: &str) -> Result<&'a str> {
    params
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::ProcessingFailed(format!("Missing or invalid '{key}' parameter")))
}

/// Read an optional string parameter; blank strings count as absent
pub fn optional_str<'a>(params: &'a Value, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_str() {
        let params = json!({"symbol": " AAPL ", "blank": "", "n": 3});
        assert_eq!(required_str(&params, "symbol").unwrap(), "AAPL");
        assert!(required_str(&params, "blank").is_err());
        assert!(required_str(&params, "n").is_err());
        assert!(required_str(&params, "missing").is_err());
    }

    #[test]
    fn test_optional_str() {
        let params = json!({"period": "1y", "blank": "  "});
        assert_eq!(optional_str(&params, "period"), Some("1y"));
        assert_eq!(optional_str(&params, "blank"), None);
        assert_eq!(optional_str(&params, "missing"), None);
    }
}
