//! Noise removal: HTML, URLs, emails, phone numbers, control characters

use once_cell::sync::Lazy;
use regex::Regex;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)https?://\S+|www\.\S+").expect("valid regex"));
static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+").expect("valid regex"));
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d\-\s]{7,}\d").expect("valid regex"));

/// Decode HTML entities, then replace every tag with a single space.
///
/// Entities are decoded first so escaped markup (`&lt;b&gt;`) is stripped too.
pub fn strip_html(text: &str) -> String {
    let decoded = html_escape::decode_html_entities(text);
    HTML_TAG.replace_all(&decoded, " ").into_owned()
}

/// Replace URLs, email addresses and phone-number-shaped digit runs with spaces
pub fn strip_contact_noise(text: &str) -> String {
    let text = URL.replace_all(text, " ");
    let text = EMAIL.replace_all(&text, " ");
    PHONE.replace_all(&text, " ").into_owned()
}

/// Replace control characters (C0, DEL and C1) with spaces
pub fn strip_control_chars(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
