use serde_json::{Map, Value};

use crate::bridge::ToolDescriptor;
use crate::intent::rules::{self, CHAT_RULES};
use crate::intent::types::{Intent, IntentMode};

const CHAT_REASONING: &str = "Detected conversational/informational request";
const AMBIGUOUS_REASONING: &str = "Ambiguous intent, defaulting to conversational mode";

/// Classify a user message against the tools the server advertises.
///
/// Deterministic and free of I/O: the rule chain runs in priority order and
/// the first match wins. Tool ties are broken by descriptor order as supplied
/// by the tool server.
pub fn classify(text: &str, tools: &[ToolDescriptor]) -> Intent {
    let input = text.trim().to_lowercase();

    for rule in CHAT_RULES {
        if rule.matches(&input) {
            return Intent::chat(CHAT_REASONING);
        }
    }

    if !rules::has_tool_keyword(&input) {
        return Intent::chat(AMBIGUOUS_REASONING);
    }

    if let Some(matched) = find_tool_match(&input, tools) {
        let reasoning = format!("Detected request for {} integration", matched.application);
        return Intent {
            mode: IntentMode::Tool,
            application: Some(matched.application),
            action: Some(matched.action),
            parameters: matched.parameters,
            reasoning,
        };
    }

    // Keywords fired but no descriptor matched: a tool-mode intent with no
    // concrete tool bound, left for the plan generator to resolve.
    let mut parameters = Map::new();
    parameters.insert("originalInput".to_string(), Value::String(input));
    Intent {
        mode: IntentMode::Tool,
        application: Some("generic".to_string()),
        action: Some("unknown".to_string()),
        parameters,
        reasoning: "Detected request for generic integration".to_string(),
    }
}

struct ToolMatch {
    application: String,
    action: String,
    parameters: Map<String, Value>,
}

fn find_tool_match(input: &str, tools: &[ToolDescriptor]) -> Option<ToolMatch> {
    for tool in tools {
        let tool_name = tool.name.to_lowercase();
        let matched_by_name = input.contains(&tool_name);
        let matched_by_description =
            !matched_by_name && matches_description(input, &tool.description.to_lowercase());

        if matched_by_name || matched_by_description {
            return Some(ToolMatch {
                application: extract_application(&tool_name),
                action: tool.name.clone(),
                parameters: extract_parameters(input, tool),
            });
        }
    }
    None
}

/// Any description word longer than 3 characters appearing in the input
/// counts as a match.
fn matches_description(input: &str, description: &str) -> bool {
    description
        .split_whitespace()
        .filter(|word| word.len() > 3)
        .any(|word| input.contains(word))
}

/// Derive the short application tag for a tool name: fixed keyword table
/// first, then the token preceding the first delimiter.
fn extract_application(tool_name: &str) -> String {
    const TABLE: &[(&[&str], &str)] = &[
        (&["email", "gmail"], "gmail"),
        (&["calendar"], "calendar"),
        (&["linkedin"], "linkedin"),
        (&["slack"], "slack"),
        (&["drive"], "drive"),
        (&["leave", "vacation"], "leave_manager"),
    ];

    for (needles, application) in TABLE {
        if needles.iter().any(|needle| tool_name.contains(needle)) {
            return (*application).to_string();
        }
    }

    match tool_name.split('_').next().filter(|token| !token.is_empty()) {
        Some(token) => token.to_string(),
        None => "unknown".to_string(),
    }
}

/// Structural parameter extraction: an email-shaped token binds to existing
/// `to`/`email`/`recipient` schema fields, a double-quoted substring to
/// existing `message`/`body`/`content` fields. Everything else is left to the
/// plan generator.
fn extract_parameters(input: &str, tool: &ToolDescriptor) -> Map<String, Value> {
    const ADDRESS_FIELDS: &[&str] = &["to", "email", "recipient"];
    const CONTENT_FIELDS: &[&str] = &["message", "body", "content"];

    let schema = &tool.input_schema.properties;
    let mut parameters = Map::new();

    if let Some(address) = find_email(input) {
        for field in ADDRESS_FIELDS {
            if schema.contains_key(*field) {
                parameters.insert((*field).to_string(), Value::String(address.clone()));
            }
        }
    }

    if let Some(quoted) = find_quoted(input) {
        for field in CONTENT_FIELDS {
            if schema.contains_key(*field) {
                parameters.insert((*field).to_string(), Value::String(quoted.clone()));
            }
        }
    }

    parameters
}

fn find_email(input: &str) -> Option<String> {
    input
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| !is_email_char(c)))
        .find(|token| is_email_shaped(token))
        .map(str::to_string)
}

fn is_email_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-' | '@')
}

fn is_email_shaped(token: &str) -> bool {
    let Some((local, domain)) = token.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'))
    {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

fn find_quoted(input: &str) -> Option<String> {
    let start = input.find('"')?;
    let rest = &input[start + 1..];
    let end = rest.find('"')?;
    let content = &rest[..end];
    if content.is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar_tool() -> ToolDescriptor {
        ToolDescriptor::new("calendar_create_event", "Schedule a meeting or calendar event")
            .with_schema_fields(&["recipient", "title"])
    }

    fn email_tool() -> ToolDescriptor {
        ToolDescriptor::new("gmail_send_email", "Send an email via Gmail")
            .with_schema_fields(&["to", "body"])
    }

    #[test]
    fn explicit_pattern_wins_over_keywords() {
        // "send" and "email" are tool keywords, but the trailing question
        // mark is an explicit chat pattern and takes precedence.
        let intent = classify("can you send an email for me?", &[email_tool()]);
        assert_eq!(intent.mode, IntentMode::Chat);
    }

    #[test]
    fn no_keyword_defaults_to_chat() {
        let intent = classify("the weather looks nice today", &[email_tool()]);
        assert_eq!(intent.mode, IntentMode::Chat);
        assert_eq!(intent.reasoning, AMBIGUOUS_REASONING);
    }

    #[test]
    fn capital_of_france_is_chat_regardless_of_tools() {
        let intent = classify("What is the capital of France?", &[email_tool(), calendar_tool()]);
        assert_eq!(intent.mode, IntentMode::Chat);
        assert!(intent.application.is_none());
    }

    #[test]
    fn schedule_meeting_matches_calendar_and_extracts_recipient() {
        let intent = classify(
            "schedule a meeting with jane@example.com tomorrow",
            &[calendar_tool()],
        );
        assert_eq!(intent.mode, IntentMode::Tool);
        assert_eq!(intent.application.as_deref(), Some("calendar"));
        assert_eq!(intent.action.as_deref(), Some("calendar_create_event"));
        assert_eq!(
            intent.parameters.get("recipient"),
            Some(&Value::String("jane@example.com".to_string()))
        );
    }

    #[test]
    fn name_substring_match_takes_descriptor_order() {
        let first = ToolDescriptor::new("notify_team", "Notify the team in chat");
        let second = ToolDescriptor::new("notify_team", "Duplicate entry, never reached");
        let intent = classify("notify_team about the launch", &[first, second]);
        assert_eq!(intent.action.as_deref(), Some("notify_team"));
        assert_eq!(intent.application.as_deref(), Some("notify"));
    }

    #[test]
    fn description_words_longer_than_three_match() {
        let tool = ToolDescriptor::new("lm_apply", "Submit a leave request for approval");
        let intent = classify("send my leave request", &[tool]);
        assert_eq!(intent.mode, IntentMode::Tool);
        assert_eq!(intent.action.as_deref(), Some("lm_apply"));
        // "leave" in the tool description does not drive the application tag;
        // the tool name does, falling back to its first token.
        assert_eq!(intent.application.as_deref(), Some("lm"));
    }

    #[test]
    fn keyword_without_descriptor_match_returns_generic() {
        let intent = classify("export the quarterly numbers", &[calendar_tool()]);
        assert_eq!(intent.mode, IntentMode::Tool);
        assert_eq!(intent.application.as_deref(), Some("generic"));
        assert_eq!(intent.action.as_deref(), Some("unknown"));
        assert_eq!(
            intent.parameters.get("originalInput"),
            Some(&Value::String("export the quarterly numbers".to_string()))
        );
    }

    #[test]
    fn quoted_content_binds_to_existing_schema_fields() {
        let intent = classify(
            "send an email to bob@corp.io saying \"ship it today\"",
            &[email_tool()],
        );
        assert_eq!(intent.mode, IntentMode::Tool);
        assert_eq!(
            intent.parameters.get("to"),
            Some(&Value::String("bob@corp.io".to_string()))
        );
        assert_eq!(
            intent.parameters.get("body"),
            Some(&Value::String("ship it today".to_string()))
        );
        // The schema has no "message" field, so nothing binds there.
        assert!(intent.parameters.get("message").is_none());
    }

    #[test]
    fn email_binding_requires_schema_field() {
        let tool = ToolDescriptor::new("slack_post", "Post a message to slack")
            .with_schema_fields(&["channel"]);
        let intent = classify("post an update for dave@corp.io", &[tool]);
        assert_eq!(intent.mode, IntentMode::Tool);
        assert!(intent.parameters.is_empty());
    }

    #[test]
    fn leave_tool_resolves_to_leave_manager() {
        assert_eq!(extract_application("leave_apply"), "leave_manager");
        assert_eq!(extract_application("vacation_request"), "leave_manager");
    }

    #[test]
    fn application_table_and_fallback() {
        assert_eq!(extract_application("gmail_send_email"), "gmail");
        assert_eq!(extract_application("calendar_create_event"), "calendar");
        assert_eq!(extract_application("jira_create_ticket"), "jira");
        assert_eq!(extract_application("standalone"), "standalone");
    }

    #[test]
    fn email_token_survives_surrounding_punctuation() {
        assert_eq!(
            find_email("loop in (jane@example.com), please"),
            Some("jane@example.com".to_string())
        );
        assert_eq!(find_email("no address here"), None);
    }

    #[test]
    fn arithmetic_input_is_chat() {
        let intent = classify("12 * (4 + 3)", &[email_tool()]);
        assert_eq!(intent.mode, IntentMode::Chat);
    }

    #[test]
    fn classification_is_deterministic() {
        let tools = [email_tool(), calendar_tool()];
        let first = classify("send an email to sam@corp.io", &tools);
        let second = classify("send an email to sam@corp.io", &tools);
        assert_eq!(first, second);
    }
}
