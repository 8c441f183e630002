//! Skill document parsing
//!
//! Each skill is a folder containing SKILL.md with a frontmatter block. The
//! block is read with a lenient line-based reader rather than a strict YAML
//! parser, so descriptions containing bare colons or quotes still load.

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use skillaudit_types::Skill;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// File name expected inside every skill directory
pub const SKILL_FILE: &str = "SKILL.md";

/// Values that open a multi-line block instead of carrying content
const BLOCK_MARKERS: [&str; 4] = [">-", ">", "|", "|-"];

/// Prefix marking a continuation line of the current key
const CONTINUATION_INDENT: &str = "  ";

/// Parsed frontmatter fields and the body that follows them
#[derive(Debug, Clone, Default)]
pub struct SkillDocument {
    fields: BTreeMap<String, String>,
    body: String,
}

impl SkillDocument {
    /// Parse a full SKILL.md text
    pub fn parse(content: &str) -> Result<Self> {
        let frontmatter_re = Regex::new(r"(?s)\A---\s*\n(.*?)\n---")
            .map_err(|e| anyhow!("Failed to compile regex: {}", e))?;

        let captures = frontmatter_re
            .captures(content)
            .ok_or_else(|| anyhow!("No frontmatter block found"))?;

        let block = captures
            .get(1)
            .ok_or_else(|| anyhow!("Failed to extract frontmatter"))?
            .as_str();
        let end = captures.get(0).map_or(0, |m| m.end());

        Ok(Self {
            fields: parse_fields(block)?,
            body: content[end..].to_string(),
        })
    }

    /// Look up a frontmatter value
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Number of lines in the trimmed body, zero when the body is blank
    pub fn body_line_count(&self) -> usize {
        let trimmed = self.body.trim();
        if trimmed.is_empty() {
            0
        } else {
            trimmed.split('\n').count()
        }
    }

    /// Convert into a skill, using `fallback_name` when no `name` key is present
    pub fn into_skill(self, fallback_name: &str, source: &Path) -> Skill {
        let line_count = self.body_line_count();
        let mut fields = self.fields;

        let name = fields
            .remove("name")
            .unwrap_or_else(|| fallback_name.to_string());
        let description = fields.remove("description").unwrap_or_default();

        let mut skill = Skill::new(name, description)
            .with_body_line_count(line_count)
            .with_source_path(source);
        skill.tools = fields.remove("tools");
        skill.version = fields.remove("version");
        skill
    }
}

/// Read `key: value` lines, joining indented continuation lines with spaces
fn parse_fields(block: &str) -> Result<BTreeMap<String, String>> {
    let key_re = Regex::new(r"^(\w[\w-]*):\s*(.*)")
        .map_err(|e| anyhow!("Failed to compile key regex: {}", e))?;

    let mut fields = BTreeMap::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in block.split('\n') {
        let is_continuation = line.starts_with(CONTINUATION_INDENT);

        if let Some(caps) = key_re.captures(line).filter(|_| !is_continuation) {
            if let Some((key, parts)) = current.take() {
                fields.insert(key, parts.join(" ").trim().to_string());
            }

            let key = caps[1].to_string();
            let value = caps[2].trim();
            let parts = if BLOCK_MARKERS.contains(&value) {
                Vec::new()
            } else {
                vec![value.to_string()]
            };
            current = Some((key, parts));
        } else if is_continuation {
            if let Some((_, parts)) = current.as_mut() {
                parts.push(line.trim().to_string());
            }
        }
    }

    if let Some((key, parts)) = current {
        fields.insert(key, parts.join(" ").trim().to_string());
    }

    Ok(fields)
}

/// Load a skill from a directory containing SKILL.md
pub fn load_skill_dir(dir: &Path) -> Result<Skill> {
    let skill_file = dir.join(SKILL_FILE);

    if !skill_file.exists() {
        return Err(anyhow!("{} not found in {:?}", SKILL_FILE, dir));
    }

    let content = fs::read_to_string(&skill_file)
        .with_context(|| format!("Failed to read {:?}", skill_file))?;

    let document = SkillDocument::parse(&content)
        .with_context(|| format!("Failed to parse skill from {:?}", skill_file))?;

    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(document.into_skill(&dir_name, dir))
}
