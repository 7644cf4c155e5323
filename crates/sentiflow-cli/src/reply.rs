//! Keyword intent classification and templated replies

use sentiflow_core::normalize::{strip_negation, tokenize};
use sentiflow_core::SentimentLabel;

/// Intent keywords, checked in order; first match wins
const INTENTS: &[(&str, &[&str])] = &[
    ("refund", &["refund", "refunds", "money back", "return", "returned"]),
    (
        "delivery_issue",
        &[
            "late", "delay", "delayed", "package", "parcel", "not delivered", "missing",
            "arrive", "arrived", "shipping",
        ],
    ),
    ("account_issue", &["login", "log in", "password", "account", "access", "locked"]),
    (
        "technical_issue",
        &["error", "bug", "crash", "crashed", "crashes", "not working", "broken", "issue", "problem"],
    ),
    ("billing_issue", &["charge", "charged", "billing", "invoice", "payment", "bill"]),
    ("greeting", &["hi", "hello", "hey", "greetings"]),
    ("farewell", &["bye", "goodbye", "thanks", "thank you"]),
];

const GENERAL: &str = "general";

/// Rule-based intent detection over cleaned text
#[derive(Debug, Default, Clone, Copy)]
pub struct IntentClassifier;

impl IntentClassifier {
    /// Classify cleaned text; keywords match whole words, negation tags are ignored
    pub fn classify(&self, cleaned: &str) -> &'static str {
        let words: Vec<String> = tokenize(cleaned)
            .filter(|t| t.is_word())
            .map(|t| strip_negation(t.text).0.to_lowercase())
            .collect();

        for &(intent, keywords) in INTENTS {
            if keywords.iter().any(|k| contains_phrase(&words, k)) {
                return intent;
            }
        }
        GENERAL
    }
}

fn contains_phrase(words: &[String], phrase: &str) -> bool {
    let parts: Vec<&str> = phrase.split_whitespace().collect();
    if parts.is_empty() || parts.len() > words.len() {
        return false;
    }
    words
        .windows(parts.len())
        .any(|window| window.iter().zip(&parts).all(|(w, p)| w == p))
}

fn templates(intent: &str, label: SentimentLabel) -> &'static [&'static str] {
    use SentimentLabel::*;
    match (intent, label) {
        ("greeting", Positive) => &[
            "Hi! Happy to help you today.",
            "Hello! Good to see you, what can I do for you?",
        ],
        ("greeting", Neutral) => &["Hello! How can I help you today?", "Hi. What can I do for you?"],
        ("greeting", Negative) => &[
            "Hello. Sounds like something is wrong, tell me about it.",
            "Hi. I'm here to sort this out with you, what happened?",
        ],
        ("farewell", Positive) => &["Glad I could help. Have a great day!", "Happy to help. Goodbye!"],
        ("farewell", Neutral) => &["Goodbye.", "Thank you."],
        ("farewell", Negative) => &[
            "Sorry today wasn't better. Thanks for the feedback.",
            "Thank you for telling us. We'll work on it.",
        ],
        ("refund", Positive) => &["Sure, I can help with the refund. What's your order ID?"],
        ("refund", Neutral) => &["I can help with the refund. Please share your order ID."],
        ("refund", Negative) => &["I understand you want a refund. Send me your order ID and I'll start it."],
        ("delivery_issue", Positive) => &["Happy to look into the delivery. Do you have the tracking ID?"],
        ("delivery_issue", Neutral) => &["Looks like a delivery issue. Could you share the tracking number?"],
        ("delivery_issue", Negative) => &["Sorry your package is late. Can you share the order ID so I can check?"],
        ("account_issue", Positive) => &["Let's get your account sorted. What error do you see?"],
        ("account_issue", Neutral) => &["I can help with account access. What seems to be the problem?"],
        ("account_issue", Negative) => &["Login trouble is annoying, let's fix it. What error do you get?"],
        ("technical_issue", Positive) => &["Let's sort out the technical issue. What exactly happens?"],
        ("technical_issue", Neutral) => &["I can help with that. What exactly is not working?"],
        ("technical_issue", Negative) => &["Technical problems are frustrating. What error are you seeing?"],
        ("billing_issue", Positive) => &["Sure, which billing detail would you like to check?"],
        ("billing_issue", Neutral) => &["I can help with billing. What looks incorrect?"],
        ("billing_issue", Negative) => &["Sorry about the billing trouble. What's wrong exactly?"],
        (_, Positive) => &[
            "That sounds great! How else can I help?",
            "Good to hear. What would you like to do next?",
        ],
        (_, Neutral) => &["I can help with that. Could you tell me a bit more?"],
        (_, Negative) => &["I understand the concern. Could you tell me more so I can help?"],
    }
}

/// Picks a reply template for an intent and sentiment
#[derive(Debug, Default)]
pub struct ReplyGenerator {
    classifier: IntentClassifier,
}

impl ReplyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intent(&self, cleaned: &str) -> &'static str {
        self.classifier.classify(cleaned)
    }

    /// Reply for a turn; templates rotate on `turn_index`
    pub fn reply(&self, cleaned: &str, label: SentimentLabel, turn_index: usize) -> &'static str {
        let options = templates(self.intent(cleaned), label);
        options[turn_index % options.len()]
    }
}
