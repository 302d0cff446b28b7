use crate::*;
use tr_core::{ModelTier, Priority, RouterConfig, TierConfig};

fn cfg() -> RouterConfig {
    RouterConfig::default()
}

fn with_fast_cloud() -> RouterConfig {
    let mut c = RouterConfig::default();
    c.models.fast_cloud = Some(TierConfig::gemini("gemini-2.5-flash", Some("k"), 0.0000005));
    c
}

/// Loose thresholds so the weighted score decides long, complex prompts.
fn quality_heavy(fast_cloud: bool) -> RouterConfig {
    let mut c = if fast_cloud { with_fast_cloud() } else { cfg() };
    c.routing.complexity_threshold = 0.95;
    c.routing.max_slm_tokens = 2000;
    c.routing.cost_weight = 0.1;
    c.routing.latency_weight = 0.1;
    c.routing.quality_weight = 0.8;
    c
}

fn long_complex_prompt() -> String {
    format!("Analyze and explain the algorithm? {}", "data ".repeat(800))
}

// ========== Complexity ==========

#[test]
fn test_empty_text_scores_zero() {
    assert_eq!(analyze_complexity(""), 0.0);
}

#[test]
fn test_whitespace_only_counts_chars() {
    // no words, but 5 chars at 1/500 each
    let r = analyze("   \n\t");
    assert_eq!(r.words, 0);
    assert_eq!(r.chars, 5);
    assert!((r.score - 0.01).abs() < 1e-9);
}

#[test]
fn test_term_caps() {
    let r = analyze("Design a distributed system architecture for 10 million concurrent users");
    assert_eq!(r.words, 10);
    assert_eq!(r.chars, 72);
    assert_eq!(r.complex_verbs, 1);
    assert_eq!(r.technical_terms, 1);
    assert!((r.score - 0.494).abs() < 1e-9);
}

#[test]
fn test_question_cap() {
    let r = analyze("? ? ? ? ? ?");
    assert_eq!(r.questions, 6);
    // 6 words, 11 chars, questions capped at 0.2
    assert!((r.score - (0.06 + 0.022 + 0.2)).abs() < 1e-9);
}

#[test]
fn test_keywords_whole_word_case_insensitive() {
    let r = analyze("EXPLAIN the Protocol; explained protocols redesign");
    assert_eq!(r.complex_verbs, 1);
    assert_eq!(r.technical_terms, 1);
}

#[test]
fn test_verb_term_capped() {
    let two = analyze("analyze compare");
    let four = analyze("analyze compare evaluate design");
    let verb_two = two.score - (0.02 + 15.0 / 500.0);
    let verb_four = four.score - (0.04 + 31.0 / 500.0);
    assert!((verb_two - 0.2).abs() < 1e-9);
    assert!((verb_four - 0.2).abs() < 1e-9);
}

#[test]
fn test_complexity_bounded() {
    let huge = "Why? analyze explain compare algorithm architecture protocol ".repeat(400);
    let s = analyze_complexity(&huge);
    assert!(s <= 1.0 && s >= 0.0);
}

#[test]
fn test_complexity_monotonic_in_words() {
    let mut prev = 0.0;
    for n in 0..150 {
        let s = analyze_complexity(&"word ".repeat(n));
        assert!(s >= prev, "score dropped at {} words", n);
        prev = s;
    }
}

#[test]
fn test_complexity_monotonic_in_keywords() {
    let mut prev = 0.0;
    for n in 0..6 {
        let text = format!("{} {}", "design ".repeat(n), "framework ".repeat(n));
        let s = analyze_complexity(&text);
        assert!(s >= prev);
        prev = s;
    }
}

#[test]
fn test_complexity_monotonic_in_chars() {
    // word count fixed at 5, words get longer
    let mut prev = 0.0;
    for len in 1..120 {
        let word = "x".repeat(len);
        let text = vec![word.as_str(); 5].join(" ");
        let r = analyze(&text);
        assert_eq!(r.words, 5);
        assert!(r.score >= prev, "score dropped at word length {}", len);
        prev = r.score;
    }
    assert!(prev > analyze_complexity("x x x x x"));
}

#[test]
fn test_complexity_monotonic_in_questions() {
    let mut prev = 0.0;
    for n in 0..8 {
        let text = format!("what{}", "?".repeat(n));
        let r = analyze(&text);
        assert_eq!(r.questions, n);
        assert!(r.score >= prev, "score dropped at {} question marks", n);
        prev = r.score;
    }
}

#[test]
fn test_signals() {
    let r = analyze("Why compare the framework?");
    let signals = r.signals();
    assert!(signals.iter().any(|s| s.contains("questions")));
    assert!(signals.iter().any(|s| s.contains("complex verbs")));
    assert!(signals.iter().any(|s| s.contains("technical")));
}

// ========== Estimator ==========

#[test]
fn test_token_estimate() {
    assert!((estimate_tokens("one two three four five six seven eight nine ten") - 13.0).abs() < 1e-9);
    assert_eq!(estimate_tokens(""), 0.0);
}

#[test]
fn test_latency_profiles() {
    let c = with_fast_cloud();
    let text = "word ".repeat(1000); // 1300 tokens
    assert!((estimate_latency(&text, ModelTier::Local, &c).unwrap() - (0.5 + 2.6)).abs() < 1e-9);
    assert!((estimate_latency(&text, ModelTier::General, &c).unwrap() - (2.0 + 13.0)).abs() < 1e-9);
    assert!((estimate_latency(&text, ModelTier::FastCloud, &c).unwrap() - (1.0 + 6.5)).abs() < 1e-9);
}

#[test]
fn test_cost_estimate() {
    let c = cfg();
    let text = "word ".repeat(100); // 130 tokens
    assert!((estimate_cost(&text, ModelTier::General, &c).unwrap() - 130.0 * 0.00001).abs() < 1e-12);
    assert_eq!(estimate_cost(&text, ModelTier::Local, &c).unwrap(), 0.0);
}

#[test]
fn test_estimate_missing_tier() {
    let c = cfg();
    assert!(estimate("hello", ModelTier::FastCloud, &c).is_err());
}

#[test]
fn test_latency_override() {
    let mut c = cfg();
    c.models.local.base_latency = Some(0.1);
    c.models.local.latency_divisor = Some(1000.0);
    let l = estimate_latency(&"word ".repeat(1000), ModelTier::Local, &c).unwrap();
    assert!((l - 1.4).abs() < 1e-9);
}

// ========== Scoring ==========

#[test]
fn test_quality_curves() {
    assert_eq!(quality(ModelTier::Local, 0.0), 1.0);
    assert_eq!(quality(ModelTier::Local, 1.0), 0.5);
    assert!((quality(ModelTier::General, 0.5) - 0.6).abs() < 1e-9);
    assert_eq!(quality(ModelTier::FastCloud, 0.9), 1.0);
}

#[test]
fn test_tie_prefers_local_over_general() {
    let s = TierScores { local: 0.5, general: 0.5, fast_cloud: None };
    assert_eq!(s.winner(0.1, 0.7), ModelTier::Local);
}

#[test]
fn test_tie_prefers_fast_cloud() {
    let s = TierScores { local: 0.5, general: 0.4, fast_cloud: Some(0.5) };
    assert_eq!(s.winner(0.1, 0.7), ModelTier::FastCloud);
}

#[test]
fn test_zero_fast_cloud_score_unavailable() {
    let s = TierScores { local: -0.2, general: -0.3, fast_cloud: Some(0.0) };
    assert_eq!(s.winner(0.1, 0.7), ModelTier::Local);
}

#[test]
fn test_local_needs_low_complexity() {
    let s = TierScores { local: 0.9, general: 0.1, fast_cloud: None };
    assert_eq!(s.winner(0.75, 0.7), ModelTier::General);
}

// ========== Routing ==========

#[test]
fn test_route_hi_balanced_is_local() {
    let d = route("Hi", Priority::Balanced, &cfg());
    assert_eq!(d.model_type, ModelTier::Local);
    assert_eq!(d.confidence, 0.7);
    assert!(d.reason.contains("complexity: 0.01"));
}

#[test]
fn test_route_design_never_local() {
    let text = "Design a distributed system architecture for 10 million concurrent users";
    for c in [cfg(), with_fast_cloud()] {
        let d = route(text, Priority::Balanced, &c);
        assert_eq!(d.model_type, ModelTier::General);
        assert_eq!(d.confidence, 0.9);
        assert!(d.reason.contains("0.49"));
    }
}

#[test]
fn test_route_deterministic() {
    let c = with_fast_cloud();
    let text = "Compare and contrast REST APIs vs GraphQL, including performance implications";
    for p in [Priority::Cost, Priority::Speed, Priority::Balanced] {
        let a = route(text, p, &c);
        let b = route(text, p, &c);
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }
}

#[test]
fn test_large_input_forces_fast_cloud() {
    let c = with_fast_cloud();
    let big = "word ".repeat(1600); // 2080 tokens
    for p in [Priority::Cost, Priority::Speed, Priority::Balanced] {
        let d = route(&big, p, &c);
        assert_eq!(d.model_type, ModelTier::FastCloud);
        assert_eq!(d.confidence, 0.95);
        assert!(d.reason.contains("2080 tokens"));
    }
}

#[test]
fn test_large_input_without_fast_cloud() {
    let big = "word ".repeat(1600);
    let d = route(&big, Priority::Cost, &cfg());
    assert_eq!(d.model_type, ModelTier::General);
    assert!(d.reason.contains("1600 words"));
}

#[test]
fn test_route_cost_priority() {
    let d = route("What is the capital of France?", Priority::Cost, &cfg());
    assert_eq!(d.model_type, ModelTier::Local);
    assert_eq!(d.confidence, 0.8);
    assert!(d.reason.contains("cost-optimized"));
}

#[test]
fn test_route_cost_priority_complex_falls_through() {
    let text = "Design a distributed system architecture for 10 million concurrent users";
    let d = route(text, Priority::Cost, &cfg());
    // 0.49 < 0.8, so cost rule still applies
    assert_eq!(d.model_type, ModelTier::Local);
}

#[test]
fn test_route_speed_large_prefers_fast_cloud() {
    let text = "alpha ".repeat(800); // 1040 tokens
    let d = route(&text, Priority::Speed, &with_fast_cloud());
    assert_eq!(d.model_type, ModelTier::FastCloud);
    assert_eq!(d.confidence, 0.9);
    assert!(d.reason.contains("1040 tokens"));
}

#[test]
fn test_route_speed_simple_is_local() {
    let text = "alpha ".repeat(800);
    let d = route(&text, Priority::Speed, &cfg());
    assert_eq!(d.model_type, ModelTier::Local);
    assert_eq!(d.confidence, 0.75);
    assert!(d.reason.contains("0.50"));
}

#[test]
fn test_route_speed_complex_goes_general() {
    let text = "Why? How? What? Analyze, explain, compare the algorithm architecture?";
    let d = route(text, Priority::Speed, &cfg());
    assert_eq!(d.model_type, ModelTier::General);
    assert!(d.reason.contains("0.73"));
}

#[test]
fn test_route_high_complexity_large_prefers_fast_cloud() {
    let mut c = with_fast_cloud();
    c.routing.max_slm_tokens = 500;
    let text = "alpha ".repeat(800);
    let d = route(&text, Priority::Balanced, &c);
    assert_eq!(d.model_type, ModelTier::FastCloud);
    assert!(d.reason.contains("High complexity (0.50)"));
}

#[test]
fn test_weighted_fast_cloud_wins() {
    let d = route(&long_complex_prompt(), Priority::Balanced, &quality_heavy(true));
    assert_eq!(d.model_type, ModelTier::FastCloud);
    assert_eq!(d.confidence, 0.85);
    assert!(d.reason.contains("tokens"));
}

#[test]
fn test_weighted_general_wins_without_fast_cloud() {
    let d = route(&long_complex_prompt(), Priority::Balanced, &quality_heavy(false));
    assert_eq!(d.model_type, ModelTier::General);
    assert_eq!(d.confidence, 0.85);
    assert!(d.reason.starts_with("Balanced decision: general"));
}

#[test]
fn test_weights_relative_not_normalized() {
    let mut c = cfg();
    c.routing.cost_weight *= 10.0;
    c.routing.latency_weight *= 10.0;
    c.routing.quality_weight *= 10.0;
    assert_eq!(route("Hi", Priority::Balanced, &c).model_type, ModelTier::Local);
}

#[test]
fn test_zero_weights_tie_local() {
    let mut c = with_fast_cloud();
    c.routing.cost_weight = 0.0;
    c.routing.latency_weight = 0.0;
    c.routing.quality_weight = 0.0;
    assert_eq!(route("Hello there", Priority::Balanced, &c).model_type, ModelTier::Local);
}

#[test]
fn test_decision_estimates_match_tier() {
    let c = with_fast_cloud();
    let d = route("Hi", Priority::Balanced, &c);
    assert_eq!(d.estimated_cost, estimate_cost("Hi", d.model_type, &c).unwrap());
    assert_eq!(d.estimated_latency, estimate_latency("Hi", d.model_type, &c).unwrap());
}

#[test]
fn test_route_empty_query() {
    let d = route("", Priority::Balanced, &cfg());
    assert_eq!(d.model_type, ModelTier::Local);
}

#[test]
fn test_every_reason_has_number() {
    let c = with_fast_cloud();
    let prompts = [
        "Hi".to_string(),
        "What is the capital of France?".to_string(),
        "word ".repeat(1600),
        "alpha ".repeat(800),
        "Design a distributed system architecture for 10 million concurrent users".to_string(),
    ];
    for p in &prompts {
        for prio in [Priority::Cost, Priority::Speed, Priority::Balanced] {
            let d = route(p, prio, &c);
            assert!(d.reason.chars().any(|ch| ch.is_ascii_digit()), "no number in '{}'", d.reason);
        }
    }
}

// ========== Performance ==========

#[test]
fn test_route_performance() {
    let c = with_fast_cloud();
    let start = std::time::Instant::now();
    for _ in 0..1000 {
        route("Explain quantum computing and its applications in machine learning", Priority::Balanced, &c);
    }
    assert!(start.elapsed().as_millis() < 5000);
}
