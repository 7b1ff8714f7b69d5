//! Text normalizer: strips code-fence wrapping and surrounding whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

/// Opening fence with an optional ASCII language tag (```` ```json ````).
static RE_OPENING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```[A-Za-z0-9_+-]*\s*").unwrap());
static RE_CLOSING_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*```$").unwrap());

/// Trims `raw` and removes any fenced-code wrapping. Never fails.
///
/// Stripping repeats until the text no longer starts with a fence, so the
/// result is a fixed point and normalizing twice changes nothing.
pub fn normalize(raw: &str) -> String {
    let mut text = raw.trim().to_string();

    while text.starts_with("```") {
        let opened = RE_OPENING_FENCE.replace(&text, "");
        let closed = RE_CLOSING_FENCE.replace(&opened, "");
        text = closed.trim().to_string();
    }

    text
}
