use serde_json::{json, Value};

use crate::bridge::ToolDescriptor;

/// System prompt for conversational requests: free text, no JSON.
pub fn chat_system_prompt(user_prompt: &str) -> String {
    format!(
        r#"You are a helpful AI assistant. The user is having a conversation with you.

USER REQUEST: "{user_prompt}"

Respond naturally and conversationally. You can:
- Answer questions
- Explain concepts
- Help with math and calculations
- Provide general information
- Have friendly conversations

Respond directly as a helpful assistant. Do NOT suggest using tools or mention any integrations.

RESPONSE FORMAT: Respond with plain text, no JSON structure needed."#
    )
}

/// System prompt for tool requests: enumerates the available tools and
/// requires a JSON reply shaped as an action plan.
pub fn tool_system_prompt(tools: &[ToolDescriptor], user_prompt: &str) -> String {
    let tools_info = serde_json::to_string_pretty(&tools_info(tools)).unwrap_or_default();
    format!(
        r#"You are an expert AI assistant that helps users accomplish tasks using available tools.

AVAILABLE TOOLS:
{tools_info}

USER REQUEST: "{user_prompt}"

YOUR TASK:
1. Analyze the user's request and break it down into specific actions
2. For each action, select the most appropriate tool
3. Generate detailed, high-quality content for content creation tasks
4. Extract all necessary parameters from the user's request
5. If the request involves multiple steps, create a sequence of actions

RESPONSE FORMAT:
Return a JSON object with this structure:
{{
  "plan": "Brief description of your overall plan",
  "actions": [
    {{
      "tool": "exact_name_of_tool",
      "reasoning": "Why this tool is appropriate",
      "parameters": {{ ... }}
    }}
  ],
  "confidence": 0-100
}}

CONTENT GUIDELINES:
- For emails: Write complete emails with subject, body, and proper formatting
- For social posts: Create engaging, well-written content with appropriate hashtags
- For any content: Be specific, detailed, and professional
- Don't just repeat the user's request - expand on it with quality content"#
    )
}

fn tools_info(tools: &[ToolDescriptor]) -> Value {
    Value::Array(
        tools
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": tool.input_schema.properties,
                    "required": tool.input_schema.required,
                })
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_prompt_embeds_request_and_forbids_tools() {
        let prompt = chat_system_prompt("what is rust");
        assert!(prompt.contains(r#"USER REQUEST: "what is rust""#));
        assert!(prompt.contains("Do NOT suggest using tools"));
        assert!(prompt.contains("no JSON structure needed"));
    }

    #[test]
    fn tool_prompt_enumerates_tools_and_requires_json() {
        let tools = vec![
            ToolDescriptor::new("gmail_send_email", "Send an email").with_schema_fields(&["to"]),
            ToolDescriptor::new("slack_post", "Post to slack"),
        ];
        let prompt = tool_system_prompt(&tools, "send an update");
        assert!(prompt.contains("gmail_send_email"));
        assert!(prompt.contains("slack_post"));
        assert!(prompt.contains(r#""confidence": 0-100"#));
        assert!(prompt.contains(r#"USER REQUEST: "send an update""#));
    }

    #[test]
    fn tools_info_carries_schema_fields() {
        let tools =
            vec![ToolDescriptor::new("calendar_create_event", "Create").with_schema_fields(&["recipient"])];
        let info = tools_info(&tools);
        assert_eq!(info[0]["name"], "calendar_create_event");
        assert!(info[0]["parameters"].get("recipient").is_some());
    }
}
