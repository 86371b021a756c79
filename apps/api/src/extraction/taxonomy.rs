//! Skill taxonomy — canonical skill names, their lowercase aliases, and the
//! contextual terms that imply a skill without naming it.
//!
//! The built-in taxonomy is constructed once per process and shared read-only
//! by every extraction call.

use std::sync::LazyLock;

/// A canonical skill and the lowercase aliases that identify it in text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillEntry {
    pub canonical: String,
    pub aliases: Vec<String>,
}

/// A contextual term (matched case-insensitively as a substring) and the
/// canonical skill it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    pub term: String,
    pub implies: String,
}

#[derive(Debug, Clone, Default)]
pub struct SkillTaxonomy {
    entries: Vec<SkillEntry>,
    associations: Vec<Association>,
}

const BUILTIN_SKILLS: &[(&str, &[&str])] = &[
    ("Java", &["java", "j2ee", "jdk"]),
    ("Spring Boot", &["springboot", "spring boot", "sb"]),
    ("Spring Cloud", &["spring cloud", "springcloud"]),
    ("MySQL", &["mysql", "mariadb"]),
    ("Redis", &["redis"]),
    ("RabbitMQ", &["rabbitmq"]),
    ("Kafka", &["kafka"]),
    ("Docker", &["docker"]),
    ("Git", &["git"]),
];

const BUILTIN_ASSOCIATIONS: &[(&str, &str)] = &[
    ("微服务", "Spring Cloud"),
    ("分布式", "Dubbo"),
    ("ci/cd", "Jenkins"),
    ("对象存储", "OSS"),
];

static BUILTIN: LazyLock<SkillTaxonomy> = LazyLock::new(|| {
    SkillTaxonomy::new(
        BUILTIN_SKILLS
            .iter()
            .map(|(canonical, aliases)| SkillEntry {
                canonical: canonical.to_string(),
                aliases: aliases.iter().map(|a| a.to_string()).collect(),
            })
            .collect(),
        BUILTIN_ASSOCIATIONS
            .iter()
            .map(|(term, implies)| Association {
                term: term.to_string(),
                implies: implies.to_string(),
            })
            .collect(),
    )
});

impl SkillTaxonomy {
    /// Builds a taxonomy. Aliases are stored lowercased and empty aliases or
    /// terms are dropped, so a match can never fire on the empty string.
    pub fn new(entries: Vec<SkillEntry>, associations: Vec<Association>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| SkillEntry {
                aliases: entry
                    .aliases
                    .into_iter()
                    .map(|a| a.to_lowercase())
                    .filter(|a| !a.is_empty())
                    .collect(),
                canonical: entry.canonical,
            })
            .collect();
        let associations = associations
            .into_iter()
            .filter(|a| !a.term.is_empty())
            .collect();

        Self {
            entries,
            associations,
        }
    }

    /// The process-wide taxonomy used by `extraction::extract`.
    pub fn builtin() -> &'static SkillTaxonomy {
        &BUILTIN
    }

    pub fn entries(&self) -> &[SkillEntry] {
        &self.entries
    }

    pub fn associations(&self) -> &[Association] {
        &self.associations
    }
}
