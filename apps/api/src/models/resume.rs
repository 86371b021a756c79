use serde::{Deserialize, Serialize};

/// Placeholder name when no strategy finds one.
pub const UNKNOWN_NAME: &str = "unknown";
/// Placeholder for a missing phone number or email address.
pub const NOT_PROVIDED: &str = "not provided";

/// Structured view of one resume document.
///
/// Every field is always populated: absent data carries a sentinel or an
/// empty string, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub work_experience: String,
    pub project_experience: String,
    pub education: String,
    /// Distinct, ascending code-point order.
    pub skills: Vec<String>,
}

impl Default for ResumeRecord {
    fn default() -> Self {
        Self {
            name: UNKNOWN_NAME.to_string(),
            phone: NOT_PROVIDED.to_string(),
            email: NOT_PROVIDED.to_string(),
            work_experience: String::new(),
            project_experience: String::new(),
            education: String::new(),
            skills: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_uses_sentinels() {
        let record = ResumeRecord::default();
        assert_eq!(record.name, "unknown");
        assert_eq!(record.phone, "not provided");
        assert_eq!(record.email, "not provided");
        assert!(record.skills.is_empty());
    }

    #[test]
    fn test_record_serializes_camel_case_keys() {
        let json = serde_json::to_value(ResumeRecord::default()).unwrap();
        assert!(json.get("workExperience").is_some());
        assert!(json.get("projectExperience").is_some());
        assert!(json.get("work_experience").is_none());
    }
}
