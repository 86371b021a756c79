//! Resume text structuring — turns an ordered sequence of document lines into a
//! `ResumeRecord`.
//!
//! Every document format funnels through `extract`; readers only produce lines.
//! Extraction is synchronous, allocation-local, and total: missing data becomes
//! a sentinel, never an error.

pub mod fields;
pub mod sections;
pub mod skills;
pub mod taxonomy;

use tracing::debug;

use crate::models::resume::{ResumeRecord, NOT_PROVIDED, UNKNOWN_NAME};
use sections::{segment_sections, SectionKey};
use taxonomy::SkillTaxonomy;

/// Extracts a resume record using the built-in skill taxonomy.
///
/// `lines` must be in reading order; entries are expected trimmed and
/// non-empty.
pub fn extract<S: AsRef<str>>(lines: &[S]) -> ResumeRecord {
    extract_with_taxonomy(lines, SkillTaxonomy::builtin())
}

pub fn extract_with_taxonomy<S: AsRef<str>>(
    lines: &[S],
    taxonomy: &SkillTaxonomy,
) -> ResumeRecord {
    let full_text = lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n");

    let sections = segment_sections(lines);

    let record = ResumeRecord {
        name: fields::extract_name(lines).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        phone: fields::extract_phone(&full_text).unwrap_or_else(|| NOT_PROVIDED.to_string()),
        email: fields::extract_email(&full_text).unwrap_or_else(|| NOT_PROVIDED.to_string()),
        work_experience: sections.get(SectionKey::Work).to_string(),
        project_experience: sections.get(SectionKey::Project).to_string(),
        education: sections.get(SectionKey::Education).to_string(),
        skills: skills::resolve_skills(&full_text, taxonomy),
    };

    debug!(
        name = %record.name,
        lines = lines.len(),
        sections = sections.len(),
        skills = record.skills.len(),
        "Resume text structured"
    );

    record
}
