// Prompt fragments for the resume advisory call.

/// Prefix placed before the resume text. The model is asked to critique the
/// resume as an experienced recruiter would.
pub const RESUME_REVIEW_PREFIX: &str = "你是一名资深HR，请为以下简历提供优化建议：";

/// Builds the single prompt sent to the model.
pub fn build_review_prompt(resume_text: &str) -> String {
    format!("{RESUME_REVIEW_PREFIX}\n{resume_text}")
}
