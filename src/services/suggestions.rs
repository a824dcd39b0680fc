// src/services/suggestions.rs
//! Keyword heuristics for follow-up questions.

const MAX_SUGGESTIONS: usize = 3;

struct Bucket {
    keywords: &'static [&'static str],
    suggestions: [&'static str; 3],
}

// Tested in this order; matches accumulate.
const BUCKETS: &[Bucket] = &[
    Bucket {
        keywords: &["derivative", "differentiate"],
        suggestions: [
            "Can you show me the step-by-step process?",
            "What are the different differentiation rules?",
            "How do I find the second derivative?",
        ],
    },
    Bucket {
        keywords: &["integral", "integrate"],
        suggestions: [
            "What integration technique should I use?",
            "Can you explain integration by parts?",
            "How do I evaluate definite integrals?",
        ],
    },
    Bucket {
        keywords: &["force", "acceleration"],
        suggestions: [
            "Can you draw a free-body diagram?",
            "What are the forces acting on the object?",
            "How do I use Newton's second law?",
        ],
    },
    Bucket {
        keywords: &["equation", "solve"],
        suggestions: [
            "What method should I use to solve this?",
            "Can you check my work?",
            "Are there multiple solutions?",
        ],
    },
];

pub const GENERIC_SUGGESTIONS: [&str; 3] = [
    "Can you explain this step by step?",
    "What's the underlying concept here?",
    "Can you show me a similar example?",
];

pub fn suggest(message: &str) -> Vec<String> {
    let lower = message.to_lowercase();

    let mut out: Vec<&str> = BUCKETS
        .iter()
        .filter(|b| b.keywords.iter().any(|k| lower.contains(k)))
        .flat_map(|b| b.suggestions)
        .collect();

    if out.is_empty() {
        out.extend(GENERIC_SUGGESTIONS);
    }

    out.into_iter().take(MAX_SUGGESTIONS).map(String::from).collect()
}
