//! Intent Classifier
//!
//! Maps a free-text question onto one of the calculations the engine can
//! answer. Rules are checked in order and the first match wins; a message
//! matching none of them goes to the generic responder.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    RetirementAge,
    SavingsLongevity,
    RuleOf72,
    MonthlySavings,
}

/// One entry of the ordered rule table
struct IntentRule {
    intent: Intent,
    matches: fn(&str) -> bool,
}

/// Predicates receive the lowercased message.
const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::RetirementAge,
        matches: |m| m.contains("when can i retire"),
    },
    IntentRule {
        intent: Intent::SavingsLongevity,
        matches: |m| m.contains("how long will") && (m.contains("last") || m.contains("money")),
    },
    IntentRule {
        intent: Intent::RuleOf72,
        matches: |m| m.contains("rule of 72"),
    },
    IntentRule {
        intent: Intent::MonthlySavings,
        matches: |m| m.contains("monthly") && m.contains("save"),
    },
];

/// Intent classifier
pub struct IntentClassifier;

impl IntentClassifier {
    /// `None` means no calculation applies.
    pub fn classify(message: &str) -> Option<Intent> {
        let lowered = message.to_lowercase();

        INTENT_RULES
            .iter()
            .find(|rule| (rule.matches)(&lowered))
            .map(|rule| rule.intent)
    }

    /// Rule order, for inspection
    pub fn intents() -> impl Iterator<Item = Intent> {
        INTENT_RULES.iter().map(|rule| rule.intent)
    }
}
