//! Prompt refinement used by the distillation flow.

pub const REFINE_INSTRUCTION: &str = "Refine the following prompt for clarity and conciseness. \
Remove any ambiguity. Return only the refined prompt, nothing else.";

/// Refinements shorter than this (after trimming) are discarded.
pub const MIN_REFINED_CHARS: usize = 10;

pub fn refine_prompt(prompt: &str) -> String {
    format!("{}\n\nPrompt: {}", REFINE_INSTRUCTION, prompt)
}

/// Trimmed refinement, or `None` when it is too short to use.
pub fn accept_refinement(refined: &str) -> Option<&str> {
    let trimmed = refined.trim();
    if trimmed.chars().count() < MIN_REFINED_CHARS {
        None
    } else {
        Some(trimmed)
    }
}
