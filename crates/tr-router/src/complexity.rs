//! Five-term lexical complexity heuristic.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static COMPLEX_VERBS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:analyze|explain|compare|evaluate|synthesize|create|design|develop)\b")
        .expect("complex verb pattern")
});

static TECHNICAL_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:algorithm|architecture|optimization|implementation|framework|protocol)\b")
        .expect("technical term pattern")
});

const WORD_CAP: f64 = 0.30;
const CHAR_CAP: f64 = 0.20;
const QUESTION_CAP: f64 = 0.20;
const VERB_CAP: f64 = 0.20;
const TECHNICAL_CAP: f64 = 0.10;

/// Raw counts and the capped score derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexityReport {
    pub words: usize,
    pub chars: usize,
    pub questions: usize,
    pub complex_verbs: usize,
    pub technical_terms: usize,
    pub score: f64,
}

impl ComplexityReport {
    /// Short human-readable list of the terms that contributed.
    pub fn signals(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.questions > 0 {
            out.push(format!("{} questions", self.questions));
        }
        if self.complex_verbs > 0 {
            out.push(format!("{} complex verbs", self.complex_verbs));
        }
        if self.technical_terms > 0 {
            out.push(format!("{} technical terms", self.technical_terms));
        }
        out
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count every term and score them.
pub fn analyze(text: &str) -> ComplexityReport {
    let words = word_count(text);
    let chars = text.chars().count();
    let questions = text.matches('?').count();
    let complex_verbs = COMPLEX_VERBS.find_iter(text).count();
    let technical_terms = TECHNICAL_TERMS.find_iter(text).count();

    let mut score = 0.0;
    score += (words as f64 / 100.0).min(WORD_CAP);
    score += (chars as f64 / 500.0).min(CHAR_CAP);
    score += (questions as f64 * 0.1).min(QUESTION_CAP);
    score += (complex_verbs as f64 * 0.15).min(VERB_CAP);
    score += (technical_terms as f64 * 0.1).min(TECHNICAL_CAP);

    ComplexityReport {
        words,
        chars,
        questions,
        complex_verbs,
        technical_terms,
        score: score.min(1.0),
    }
}

/// Complexity in `[0, 1]`; empty text scores 0.
pub fn analyze_complexity(text: &str) -> f64 {
    analyze(text).score
}
