//! Section segmentation — splits resume lines into work / project / education
//! blocks by recognising heading lines.
//!
//! Headings have no fixed format, so a line is a heading when it contains any
//! of the known marker substrings. Categories are tested in priority order
//! work → project → education, so a line mentioning both "工作经历" and
//! "项目经验" is a work heading.
//!
//! The scan is an explicit cursor over the line slice. After each heading a
//! bounded lookahead window (at most `MAX_CONTEXT_LINES`, stopping before the
//! next heading) seeds the new section, then ordinary lines accumulate until
//! the next heading.

use std::collections::BTreeMap;

use tracing::trace;

/// Upper bound on lines collected by the lookahead after a heading.
pub const MAX_CONTEXT_LINES: usize = 5;

/// Label that starts each entry inside a project section.
const PROJECT_NAME_LABEL: &str = "项目名称：";

/// Separator placed between project entries after splitting.
const PROJECT_SEPARATOR: &str = "\n\n";

/// Markers after which an education block lists certificates and honours.
const CERTIFICATE_MARKERS: &[&str] = &["\n证书荣誉", "\n证书：", "\n荣誉："];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKey {
    /// Content before the first recognised heading.
    Header,
    Work,
    Project,
    Education,
}

/// Heading markers per category, in priority order.
const SECTION_MARKERS: &[(SectionKey, &[&str])] = &[
    (SectionKey::Work, &["工作经历", "工作经验", "工作履历"]),
    (
        SectionKey::Project,
        &["项目经验", "项目经历", "研发项目", "项目描述"],
    ),
    (
        SectionKey::Education,
        &["教育背景", "教育经历", "学历", "教育情况", "毕业院校"],
    ),
];

/// Returns the section a heading line opens, or `None` for ordinary content.
pub fn classify_heading(line: &str) -> Option<SectionKey> {
    SECTION_MARKERS
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| line.contains(m)))
        .map(|(key, _)| *key)
}

pub fn is_heading(line: &str) -> bool {
    classify_heading(line).is_some()
}

/// One contiguous block of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBlock<'a, S> {
    pub key: SectionKey,
    /// Lines captured by the lookahead right after the heading. Empty for the
    /// header block.
    pub context: &'a [S],
    /// Every content line of the block, each followed by a newline.
    pub text: String,
}

/// Cursor-driven scanner yielding `SectionBlock`s in document order.
///
/// Heading lines are consumed but never included in block text.
pub struct SectionScanner<'a, S> {
    lines: &'a [S],
    cursor: usize,
}

impl<'a, S: AsRef<str>> SectionScanner<'a, S> {
    pub fn new(lines: &'a [S]) -> Self {
        Self { lines, cursor: 0 }
    }

    /// Collects up to `MAX_CONTEXT_LINES` lines starting at `start`, stopping
    /// before the first heading. Returns the exclusive end index.
    fn lookahead(&self, start: usize) -> usize {
        let mut end = start;
        while end < self.lines.len()
            && end - start < MAX_CONTEXT_LINES
            && !is_heading(self.lines[end].as_ref())
        {
            end += 1;
        }
        end
    }
}

impl<'a, S: AsRef<str>> Iterator for SectionScanner<'a, S> {
    type Item = SectionBlock<'a, S>;

    fn next(&mut self) -> Option<Self::Item> {
        let lines = self.lines;
        let first = lines.get(self.cursor)?;
        let mut text = String::new();

        let (key, context) = match classify_heading(first.as_ref()) {
            Some(key) => {
                let start = self.cursor + 1;
                let end = self.lookahead(start);
                for line in &lines[start..end] {
                    text.push_str(line.as_ref());
                    text.push('\n');
                }
                self.cursor = end;
                (key, &lines[start..end])
            }
            None => (SectionKey::Header, &lines[..0]),
        };

        while let Some(line) = lines.get(self.cursor) {
            if is_heading(line.as_ref()) {
                break;
            }
            text.push_str(line.as_ref());
            text.push('\n');
            self.cursor += 1;
        }

        Some(SectionBlock { key, context, text })
    }
}

/// Accumulated, trimmed text per section. Keys without content are absent and
/// read back as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    sections: BTreeMap<SectionKey, String>,
}

impl SectionMap {
    pub fn get(&self, key: SectionKey) -> &str {
        self.sections.get(&key).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Stores a flushed block. A later non-empty block under the same key
    /// replaces the earlier one.
    fn flush(&mut self, key: SectionKey, block: &str) {
        let block = block.trim();
        if block.is_empty() {
            return;
        }
        self.sections.insert(key, block.to_string());
    }

    fn update(&mut self, key: SectionKey, f: impl FnOnce(&str) -> String) {
        if let Some(text) = self.sections.get_mut(&key) {
            *text = f(text);
        }
    }
}

/// Segments the lines into sections and applies the project and education
/// clean-up passes.
pub fn segment_sections<S: AsRef<str>>(lines: &[S]) -> SectionMap {
    let mut map = SectionMap::default();
    for block in SectionScanner::new(lines) {
        trace!(
            key = ?block.key,
            context_lines = block.context.len(),
            "Section block scanned"
        );
        map.flush(block.key, &block.text);
    }

    map.update(SectionKey::Project, split_project_entries);
    map.update(SectionKey::Education, strip_certificates);
    map
}

/// Separates individual projects with a blank line, one entry per
/// "项目名称：" label. Blocks without the label are returned unchanged.
pub fn split_project_entries(block: &str) -> String {
    if !block.contains(PROJECT_NAME_LABEL) {
        return block.to_string();
    }

    block
        .split(PROJECT_NAME_LABEL)
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| format!("{PROJECT_NAME_LABEL}{}", fragment.trim()))
        .collect::<Vec<_>>()
        .join(PROJECT_SEPARATOR)
}

/// Cuts the education block at the first certificate / honours marker.
pub fn strip_certificates(block: &str) -> String {
    let cut = CERTIFICATE_MARKERS
        .iter()
        .filter_map(|marker| block.find(marker))
        .min()
        .unwrap_or(block.len());
    block[..cut].trim().to_string()
}
