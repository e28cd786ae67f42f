//! Function declarations offered to the model

use serde_json::Value;

/// A callable function as the model sees it
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema of the arguments object
    pub parameters: Value,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// JSON Schema fragments for tool arguments and answer shapes
///
/// ```
/// use agent_llm::tools::schema;
/// use serde_json::json;
///
/// let quote = schema::object(
///     json!({
///         "symbol": schema::string("Ticker symbol"),
///         "last_price": schema::number("Latest traded price"),
///     }),
///     &["symbol", "last_price"],
/// );
/// assert_eq!(quote["required"][1], "last_price");
/// ```
pub mod schema {
    use serde_json::{Value, json};

    fn typed(kind: &str, description: &str) -> Value {
        json!({ "type": kind, "description": description })
    }

    pub fn object(properties: Value, required: &[&str]) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    pub fn string(description: &str) -> Value {
        typed("string", description)
    }

    /// String with a `format` such as `"uri"` or `"date"`
    pub fn formatted_string(description: &str, format: &str) -> Value {
        let mut value = typed("string", description);
        value["format"] = json!(format);
        value
    }

    pub fn number(description: &str) -> Value {
        typed("number", description)
    }

    pub fn integer(description: &str) -> Value {
        typed("integer", description)
    }

    pub fn array(description: &str, items: Value) -> Value {
        let mut value = typed("array", description);
        value["items"] = items;
        value
    }
}
