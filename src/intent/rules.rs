//! The ordered rule chain behind the classifier. Each rule is a tagged
//! variant so it can be unit-tested in isolation and reordered deliberately.

/// Action verbs and third-party service names that typically indicate tool
/// usage. Presence is tested by substring containment against the normalized
/// input.
pub const TOOL_KEYWORDS: &[&str] = &[
    "send",
    "email",
    "schedule",
    "create",
    "post",
    "share",
    "book",
    "reserve",
    "add",
    "update",
    "delete",
    "search",
    "find",
    "get",
    "fetch",
    "download",
    "upload",
    "save",
    "export",
    "import",
    "notify",
    "remind",
    "calendar",
    "meeting",
    "appointment",
    "task",
    "todo",
    "contact",
    "message",
    "call",
    "linkedin",
    "twitter",
    "facebook",
    "instagram",
    "gmail",
    "outlook",
    "slack",
    "teams",
    "zoom",
    "drive",
    "dropbox",
    "notion",
    "trello",
    "jira",
    "salesforce",
    "hubspot",
    "zapier",
];

const GREETING_PREFIXES: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
];
const SMALL_TALK_PREFIXES: &[&str] = &["how are you", "what's up", "what can you do"];
const QUESTION_PREFIXES: &[&str] = &["what is", "what are", "explain", "tell me about", "how does"];
const MATH_PREFIXES: &[&str] = &["calculate", "solve", "what's", "whats"];
const FAREWELL_PREFIXES: &[&str] = &["thank you", "thanks", "bye", "goodbye"];

/// Verbs that disqualify the arithmetic heuristic: digits inside "send 3
/// emails" are not a calculation.
const ARITHMETIC_EXCLUSIONS: &[&str] = &["send", "email", "create"];

const KNOWLEDGE_MARKERS: &[&str] = &["what is", "who is", "when is"];

/// Chat-detection rules, evaluated against the normalized (trimmed,
/// lowercased) input. First match wins; any match short-circuits tool
/// matching entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRule {
    /// Fixed prefix/suffix patterns: greetings, question openers,
    /// calculation openers, thanks/farewell, and anything ending in `?`.
    ExplicitPattern,
    /// Arithmetic-looking input with no action verb present.
    Arithmetic,
    /// General-knowledge question markers anywhere in the input.
    GeneralKnowledge,
}

/// Evaluation order is part of the contract: explicit patterns take
/// precedence over the heuristics, and all of them over the keyword gate.
pub const CHAT_RULES: [ChatRule; 3] = [
    ChatRule::ExplicitPattern,
    ChatRule::Arithmetic,
    ChatRule::GeneralKnowledge,
];

impl ChatRule {
    pub fn matches(&self, input: &str) -> bool {
        match self {
            ChatRule::ExplicitPattern => {
                input.ends_with('?')
                    || starts_with_any(input, GREETING_PREFIXES)
                    || starts_with_any(input, SMALL_TALK_PREFIXES)
                    || starts_with_any(input, QUESTION_PREFIXES)
                    || starts_with_any(input, MATH_PREFIXES)
                    || starts_with_any(input, FAREWELL_PREFIXES)
            }
            ChatRule::Arithmetic => {
                looks_arithmetic(input) && !contains_any(input, ARITHMETIC_EXCLUSIONS)
            }
            ChatRule::GeneralKnowledge => contains_any(input, KNOWLEDGE_MARKERS),
        }
    }
}

/// Keyword gate: without at least one tool keyword the input never reaches
/// tool matching.
pub fn has_tool_keyword(input: &str) -> bool {
    contains_any(input, TOOL_KEYWORDS)
}

fn starts_with_any(input: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| input.starts_with(prefix))
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}

fn looks_arithmetic(input: &str) -> bool {
    input
        .chars()
        .any(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '='))
}
