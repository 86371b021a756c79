//! Skill resolution — three passes over the resume text.
//!
//! 1. Direct alias match against the taxonomy (case-insensitive).
//! 2. Contextual association: terms like "微服务" imply a canonical skill.
//! 3. Adjacency runs such as "Java/SpringBoot/SQL", taken verbatim.
//!
//! Passes 1–2 yield canonical names. Pass 3 keeps the token's original case,
//! so "java" from a run does not collapse into a canonical "Java".

use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::taxonomy::SkillTaxonomy;

/// Two or more alphanumeric tokens joined by "/" or "、".
static ADJACENT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9+#]+(?:\s*[/、]\s*[A-Za-z0-9+#]+)+").expect("adjacency regex")
});

static RUN_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[/、]\s*").expect("separator regex"));

/// Resolves the distinct skills mentioned in `text`, sorted by code point.
pub fn resolve_skills(text: &str, taxonomy: &SkillTaxonomy) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut found: Vec<String> = Vec::new();

    for entry in taxonomy.entries() {
        if entry.aliases.iter().any(|alias| lower.contains(alias.as_str())) {
            push_unique(&mut found, &entry.canonical);
        }
    }

    for association in taxonomy.associations() {
        if lower.contains(&association.term.to_lowercase()) {
            push_unique(&mut found, &association.implies);
        }
    }

    for run in ADJACENT_RUN_RE.find_iter(text) {
        for token in RUN_SEPARATOR_RE.split(run.as_str()) {
            let token = token.trim();
            if !token.is_empty() {
                push_unique(&mut found, token);
            }
        }
    }

    found.sort();
    found.dedup();
    found
}

fn push_unique(found: &mut Vec<String>, skill: &str) {
    if !found.iter().any(|s| s == skill) {
        found.push(skill.to_string());
    }
}
