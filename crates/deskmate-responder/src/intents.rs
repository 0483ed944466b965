//! Ordered intent rules — the heuristic stage of response selection.
//!
//! Rules are plain data so that ordering and refinement stay auditable:
//! rules are tried top to bottom, the first whose trigger appears in the
//! lowercased message wins, and a rule's refiners are checked before its
//! generic response is used.

/// A single intent category.
pub struct IntentRule {
    pub name: &'static str,
    /// Substrings that activate this rule.
    pub triggers: &'static [&'static str],
    /// Substrings that select `refined_response` over `response`.
    pub refiners: &'static [&'static str],
    /// Response when a refiner also matches (e.g., "create a task").
    pub refined_response: Option<&'static str>,
    /// Generic response for the category.
    pub response: &'static str,
}

/// The fixed rule set, in evaluation order.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        name: "greeting",
        triggers: &["hello", "hi"],
        refiners: &[],
        refined_response: None,
        response: "Hello! I'm your office assistant. I can help you with tasks, reminders, \
                   calendar events, and more. What would you like to do today?",
    },
    IntentRule {
        name: "task",
        triggers: &["task", "todo"],
        refiners: &["create", "add", "new"],
        refined_response: Some(
            "I'd be happy to help you create a task! Please provide the task title and any \
             additional details like priority or due date.",
        ),
        response: "I can help you manage tasks. You can create new tasks, view existing ones, \
                   or mark them as complete. What would you like to do?",
    },
    IntentRule {
        name: "reminder",
        triggers: &["reminder", "remind"],
        refiners: &["set", "create", "add"],
        refined_response: Some(
            "I can help you set a reminder! Please tell me what you want to be reminded \
             about and when (date and time).",
        ),
        response: "I can help you manage reminders. You can set new reminders, view existing \
                   ones, or delete them. What would you like to do?",
    },
    IntentRule {
        name: "calendar",
        triggers: &["calendar", "meeting", "schedule"],
        refiners: &["create", "add", "schedule"],
        refined_response: Some(
            "I can help you schedule a meeting or calendar event! Please provide the event \
             title, date, and time.",
        ),
        response: "I can help you manage your calendar. You can view events, create new ones, \
                   or check your schedule. What would you like to do?",
    },
    IntentRule {
        name: "help",
        triggers: &["help", "what can you do"],
        refiners: &[],
        refined_response: None,
        response: "I'm your office assistant! I can help you with:\n\
                   \u{2022} Creating and managing tasks\n\
                   \u{2022} Setting reminders\n\
                   \u{2022} Scheduling calendar events\n\
                   \u{2022} Answering questions\n\
                   \u{2022} Providing daily briefings\n\n\
                   Just let me know what you need!",
    },
    IntentRule {
        name: "thanks",
        triggers: &["thank"],
        refiners: &[],
        refined_response: None,
        response: "You're welcome! I'm here to help make your workday more productive. \
                   Is there anything else you need assistance with?",
    },
];

/// The guaranteed terminal response when nothing else matches.
pub const DEFAULT_RESPONSE: &str =
    "I understand you're asking about something. I can help you with tasks, reminders, \
     calendar events, and general office assistance. Could you please be more specific \
     about what you'd like me to help you with?";

/// Match a lowercased message against the rules, returning the canned
/// response of the first matching category.
pub fn match_intent(lower: &str) -> Option<&'static str> {
    for rule in INTENT_RULES {
        if rule.triggers.iter().any(|t| lower.contains(t)) {
            if let Some(refined) = rule.refined_response {
                if rule.refiners.iter().any(|r| lower.contains(r)) {
                    return Some(refined);
                }
            }
            return Some(rule.response);
        }
    }
    None
}
