//! Quality gate for answers from the local tier.

use serde::Serialize;
use std::fmt;

pub const MIN_RESPONSE_CHARS: usize = 10;
/// Response must be at least this fraction of the prompt length.
pub const MIN_PROMPT_RATIO: f64 = 0.1;
pub const ERROR_INDICATORS: [&str; 5] = ["error", "cannot", "unable", "sorry", "i don't know"];
/// Distinct indicators needed to reject a response.
pub const MAX_INDICATOR_HITS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum QualityVerdict {
    Pass,
    TooShort { chars: usize },
    BelowPromptRatio { chars: usize, prompt_chars: usize },
    ErrorIndicators { hits: Vec<&'static str> },
}

impl QualityVerdict {
    pub fn passed(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl fmt::Display for QualityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("response quality acceptable"),
            Self::TooShort { chars } => {
                write!(f, "response quality insufficient ({} chars, minimum {})", chars, MIN_RESPONSE_CHARS)
            }
            Self::BelowPromptRatio { chars, prompt_chars } => write!(
                f,
                "response quality insufficient ({} chars for a {} char prompt)",
                chars, prompt_chars
            ),
            Self::ErrorIndicators { hits } => {
                write!(f, "response quality insufficient (error indicators: {})", hits.join(", "))
            }
        }
    }
}

pub fn evaluate(response: &str, prompt: &str) -> QualityVerdict {
    let chars = response.chars().count();
    if chars < MIN_RESPONSE_CHARS {
        return QualityVerdict::TooShort { chars };
    }

    let prompt_chars = prompt.chars().count();
    if (chars as f64) < prompt_chars as f64 * MIN_PROMPT_RATIO {
        return QualityVerdict::BelowPromptRatio { chars, prompt_chars };
    }

    let lower = response.to_lowercase();
    let hits: Vec<&'static str> = ERROR_INDICATORS.iter().copied().filter(|i| lower.contains(i)).collect();
    if hits.len() >= MAX_INDICATOR_HITS {
        return QualityVerdict::ErrorIndicators { hits };
    }

    QualityVerdict::Pass
}

/// `true` when the response is good enough to return without escalating.
pub fn check_quality(response: &str, prompt: &str) -> bool {
    evaluate(response, prompt).passed()
}
