//! Display model for a classification verdict.
//!
//! Everything the classifier sends back as free text is sanitised here, so a
//! front end can print these strings without the terminal interpreting them.

use crate::model::{Category, ClassificationResult};
use strum::{AsRefStr, Display};

pub const HIGH_CONFIDENCE: f64 = 0.80;
pub const MEDIUM_CONFIDENCE: f64 = 0.60;

/// Qualitative confidence tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Band {
    High,
    Medium,
    Low,
}

impl Band {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= HIGH_CONFIDENCE {
            Band::High
        } else if confidence >= MEDIUM_CONFIDENCE {
            Band::Medium
        } else {
            Band::Low
        }
    }
}

/// Rounded percentage, 0..=100.
pub fn confidence_percent(confidence: f64) -> u8 {
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Make untrusted text inert on a terminal. Control characters other than
/// newline and tab are shown in caret notation (`ESC` becomes `^[`), C1
/// controls become U+FFFD.
pub fn sanitize_terminal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' | '\t' => out.push(c),
            '\u{7f}' => out.push_str("^?"),
            c if (c as u32) < 0x20 => {
                out.push('^');
                out.push(char::from(c as u8 + 0x40));
            }
            c if c.is_control() => out.push(char::REPLACEMENT_CHARACTER),
            c => out.push(c),
        }
    }
    out
}

/// Fields shown while a result is on screen. Built once when the result
/// state is entered.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub category: Category,
    pub label: String,
    pub badge_class: &'static str,
    pub percent: u8,
    pub band: Band,
    pub suggested_response: String,
    pub keyword_tags: Vec<String>,
}

impl ResultView {
    pub fn new(result: &ClassificationResult) -> Self {
        Self {
            category: result.classification,
            label: result.classification.to_string(),
            badge_class: result.classification.badge_class(),
            percent: confidence_percent(result.confidence),
            band: Band::from_confidence(result.confidence),
            suggested_response: sanitize_terminal(&result.suggested_response),
            keyword_tags: result.keywords.iter().map(|k| sanitize_terminal(k)).collect(),
        }
    }

    pub fn percent_label(&self) -> String {
        format!("{}%", self.percent)
    }

    /// Text bar of `width` cells filled in proportion to the confidence.
    pub fn confidence_bar(&self, width: usize) -> String {
        let filled = (usize::from(self.percent) * width + 50) / 100;
        format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(confidence: f64) -> ClassificationResult {
        ClassificationResult {
            classification: Category::Productive,
            confidence,
            suggested_response: "Obrigado pelo contato...".to_string(),
            keywords: vec!["ajuda".to_string(), "sistema".to_string()],
        }
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(Band::from_confidence(1.0), Band::High);
        assert_eq!(Band::from_confidence(0.80), Band::High);
        assert_eq!(Band::from_confidence(0.7999), Band::Medium);
        assert_eq!(Band::from_confidence(0.60), Band::Medium);
        assert_eq!(Band::from_confidence(0.5999), Band::Low);
        assert_eq!(Band::from_confidence(0.0), Band::Low);
    }

    #[test]
    fn test_band_uses_raw_confidence_not_rounded_percent() {
        // 0.795 rounds to 80% but is still below the high threshold.
        assert_eq!(confidence_percent(0.795), 80);
        assert_eq!(Band::from_confidence(0.795), Band::Medium);
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(confidence_percent(0.92), 92);
        assert_eq!(confidence_percent(0.555), 56);
        assert_eq!(confidence_percent(0.0), 0);
        assert_eq!(confidence_percent(1.0), 100);
        for step in 0..=1000 {
            let c = f64::from(step) / 1000.0;
            assert_eq!(f64::from(confidence_percent(c)), (c * 100.0).round());
        }
    }

    #[test]
    fn test_band_names() {
        assert_eq!(Band::High.to_string(), "high");
        assert_eq!(Band::Medium.as_ref(), "medium");
        assert_eq!(Band::Low.to_string(), "low");
    }

    #[test]
    fn test_result_view_fields() {
        let view = ResultView::new(&result(0.92));
        assert_eq!(view.label, "Produtivo");
        assert_eq!(view.badge_class, "produtivo");
        assert_eq!(view.percent_label(), "92%");
        assert_eq!(view.band, Band::High);
        assert_eq!(view.keyword_tags, vec!["ajuda", "sistema"]);
        assert_eq!(view.suggested_response, "Obrigado pelo contato...");
    }

    #[test]
    fn test_escape_sequences_are_neutralised() {
        let mut hostile = result(0.3);
        hostile.suggested_response = "ok\x1b]0;pwned\x07\x1b[2J\r\nnext\tline".to_string();
        hostile.keywords = vec!["\x1b[31mred".to_string(), "a\u{9b}b".to_string()];

        let view = ResultView::new(&hostile);
        assert!(!view.suggested_response.contains('\x1b'));
        assert!(!view.suggested_response.contains('\x07'));
        assert_eq!(view.suggested_response, "ok^[]0;pwned^G^[[2J^M\nnext\tline");
        assert_eq!(view.keyword_tags, vec!["^[[31mred", "a\u{fffd}b"]);
        assert_eq!(view.band, Band::Low);
    }

    #[test]
    fn test_sanitize_keeps_plain_text() {
        let text = "Olá <João> & \"equipe\"\nObrigado";
        assert_eq!(sanitize_terminal(text), text);
        assert_eq!(sanitize_terminal("del\x7f"), "del^?");
    }

    #[test]
    fn test_confidence_bar() {
        let view = ResultView::new(&result(0.92));
        assert_eq!(view.confidence_bar(10), "#########-");
        let empty = ResultView::new(&result(0.0));
        assert_eq!(empty.confidence_bar(4), "----");
    }
}
