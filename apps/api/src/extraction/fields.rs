//! Contact field extraction — name, phone, and email from resume lines.
//!
//! Each extractor returns `None` when nothing qualifies; the assembler turns
//! that into the record's sentinel value.

use std::sync::LazyLock;

use regex::Regex;

/// Labelled name: "姓名：张三", "名字 李四", "个人简介：王五".
static LABELLED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:姓名|名字|个人简介)[:：\s]*(\p{Han}{2,4})").expect("name regex")
});

static HAN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{Han}").expect("han regex"));

/// Optional label, optional +86/0086 prefix, then a mainland mobile number
/// with optional separators after the 3rd and 7th digits. The number must not
/// sit inside a longer digit run (ID cards, order numbers).
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|[^0-9])(?:(?:电话|手机|联系方式)[:：\s]*)?(?:(?:\+86|0086)[-\s]?)?(1[3-9][0-9][-\s]?[0-9]{4}[-\s]?[0-9]{4})(?:[^0-9]|$)",
    )
    .expect("phone regex")
});

/// Email bounded on both sides by a character that cannot extend the address.
/// Matched against lowercased text, so the TLD class stays lowercase.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[^A-Za-z0-9_@.]([A-Za-z0-9_.+\-]+@[A-Za-z0-9_.\-]+\.[a-z]{2,})[^A-Za-z0-9_@.]",
    )
    .expect("email regex")
});

/// Lines considered by the title-position fallback.
const TITLE_LINES: usize = 3;
/// Words that mark a title line as a document heading rather than a name.
const TITLE_STOPWORDS: &[&str] = &["简历", "求职"];

/// Finds the candidate's name.
///
/// 1. First line carrying a name label followed by 2–4 Han characters.
/// 2. Otherwise, the first of the leading three lines that is at most four
///    characters long, holds at least two Han characters, and is not a
///    "resume"/"job-seeking" title.
pub fn extract_name<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    let labelled = lines.iter().find_map(|line| {
        LABELLED_NAME_RE
            .captures(line.as_ref())
            .map(|caps| caps[1].to_string())
    });
    if labelled.is_some() {
        return labelled;
    }

    lines
        .iter()
        .take(TITLE_LINES)
        .map(|line| line.as_ref().trim())
        .find(|line| is_bare_name(line))
        .map(String::from)
}

fn is_bare_name(line: &str) -> bool {
    let han_count = HAN_RE.find_iter(line).count();
    (2..=4).contains(&han_count)
        && line.chars().count() <= 4
        && !TITLE_STOPWORDS.iter().any(|w| line.contains(w))
}

/// Finds a mainland mobile number and returns its eleven digits.
pub fn extract_phone(full_text: &str) -> Option<String> {
    PHONE_RE
        .captures(full_text)
        .map(|caps| caps[1].chars().filter(|c| c.is_ascii_digit()).collect())
}

/// Finds the first email address. The text is case-folded before matching,
/// so the result is always lowercase.
pub fn extract_email(full_text: &str) -> Option<String> {
    let lowered = full_text.to_lowercase();
    EMAIL_RE
        .captures(&lowered)
        .map(|caps| caps[1].to_string())
}
