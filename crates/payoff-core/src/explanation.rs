//! Bounded explanation text and Norwegian number formatting
//!
//! Every user-facing rationale (strategy explanations, recommendation
//! explanations, the audit summary) goes through [`Explanation`], which caps
//! the text at [`MAX_EXPLANATION_CHARS`] characters at construction time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hard cap on explanation length, counted in Unicode scalar values
pub const MAX_EXPLANATION_CHARS: usize = 240;

const ELLIPSIS: char = '…';

/// Explanation text guaranteed to be at most [`MAX_EXPLANATION_CHARS`] long
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Explanation(String);

impl Explanation {
    /// Build an explanation, cutting over-long text and marking the cut with `…`
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.chars().count() <= MAX_EXPLANATION_CHARS {
            return Self(text);
        }

        let mut cut: String = text.chars().take(MAX_EXPLANATION_CHARS - 1).collect();
        cut.truncate(cut.trim_end().len());
        cut.push(ELLIPSIS);
        Self(cut)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters (not bytes)
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl From<String> for Explanation {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<Explanation> for String {
    fn from(explanation: Explanation) -> Self {
        explanation.0
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Format an amount as whole kroner with space thousands separators: `12 345 kr`
pub fn format_kr(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{} kr", grouped)
    } else {
        format!("{} kr", grouped)
    }
}

/// Months as years with one decimal and a decimal comma: `38` -> `3,2`
pub fn format_years(months: u32) -> String {
    format!("{:.1}", months as f64 / 12.0).replace('.', ",")
}

/// Percentage with one decimal and a decimal comma: `19.5` -> `19,5 %`
pub fn format_rate(rate: f64) -> String {
    format!("{:.1} %", rate).replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_kept() {
        let e = Explanation::new("Kort forklaring");
        assert_eq!(e.as_str(), "Kort forklaring");
    }

    #[test]
    fn test_long_text_is_cut_to_bound() {
        let text = "ø".repeat(500);
        let e = Explanation::new(text);
        assert_eq!(e.char_len(), MAX_EXPLANATION_CHARS);
        assert!(e.as_str().ends_with('…'));
    }

    #[test]
    fn test_text_at_bound_is_untouched() {
        let text = "a".repeat(MAX_EXPLANATION_CHARS);
        let e = Explanation::new(text.clone());
        assert_eq!(e.as_str(), text);
    }

    #[test]
    fn test_deserialize_enforces_bound() {
        let json = serde_json::to_string(&"x".repeat(300)).unwrap();
        let e: Explanation = serde_json::from_str(&json).unwrap();
        assert!(e.char_len() <= MAX_EXPLANATION_CHARS);
    }

    #[test]
    fn test_format_kr() {
        assert_eq!(format_kr(0.0), "0 kr");
        assert_eq!(format_kr(999.4), "999 kr");
        assert_eq!(format_kr(12345.6), "12 346 kr");
        assert_eq!(format_kr(1_234_567.0), "1 234 567 kr");
        assert_eq!(format_kr(-5820.0), "-5 820 kr");
    }

    #[test]
    fn test_format_years_and_rate() {
        assert_eq!(format_years(38), "3,2");
        assert_eq!(format_years(0), "0,0");
        assert_eq!(format_rate(19.5), "19,5 %");
    }
}
