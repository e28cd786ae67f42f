//! System prompt template

use super::render;
use crate::agents::AgentSpec;
use crate::error::Result;
use serde_json::json;

const SYSTEM_TEMPLATE: &str = r#"You are the {{ name }}.
Role: {{ role }}.

For the stock symbol you are given:
{% for line in instructions %}
{{ loop.index }}. {{ line }}
{% endfor %}
{% if tools %}

Tools: {{ tools | join(", ") }}. Base every figure on tool results, never on memory.
{% endif %}

Answer with one JSON object matching this JSON schema ({{ shape }}):
{{ schema }}
{% if reports_errors %}

If the symbol is not a valid ticker, answer {"error": {"kind": "invalid_symbol", "message": "<why>"}} instead.
If the tools find no market data for the symbol, answer {"error": {"kind": "not_found", "message": "<why>"}} instead.
{% endif %}

Output only the JSON object. No Markdown, no code fences, no commentary."#;

/// Render the system prompt for an agent
pub fn render_system_prompt(spec: &AgentSpec) -> Result<String> {
    let schema = serde_json::to_string_pretty(&spec.output.json_schema())?;
    render(
        SYSTEM_TEMPLATE,
        json!({
            "name": spec.name,
            "role": spec.role,
            "instructions": spec.instructions,
            "tools": spec.tools,
            "shape": spec.output.name(),
            "schema": schema,
            "reports_errors": spec.reports_errors,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::roster;
    use crate::config::StockConfig;

    #[test]
    fn test_member_prompt() {
        let spec = roster::price_agent(&StockConfig::default());
        let prompt = render_system_prompt(&spec).unwrap();

        assert!(prompt.starts_with("You are the Market Data Analyst."));
        assert!(prompt.contains("1. Call stock_price for the symbol."));
        assert!(prompt.contains("Tools: stock_price."));
        assert!(prompt.contains("\"last_price\""));
        assert!(prompt.contains("\"kind\": \"not_found\""));
    }

    #[test]
    fn test_coordinator_prompt_has_no_tools_or_envelope() {
        let spec = roster::coordinator(&StockConfig::default());
        let prompt = render_system_prompt(&spec).unwrap();

        assert!(!prompt.contains("Tools:"));
        assert!(!prompt.contains("invalid_symbol"));
        assert!(prompt.contains("(UnifiedResponse)"));
    }
}
