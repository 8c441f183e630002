//! Skill corpus loading
//!
//! Walks one corpus root, loading one skill per subdirectory:
//! - Hidden directories and plain files are ignored
//! - Directories without a parseable SKILL.md are skipped
//! - A later directory (in sorted order) replaces an earlier skill of the same name

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{CorpusError, Result};
use crate::skill::load_skill_dir;
use skillaudit_types::Skill;

/// All skills loaded from one corpus root, keyed by name
#[derive(Debug, Clone, Default)]
pub struct SkillCorpus {
    /// Loaded skills, ordered by name
    skills: BTreeMap<String, Skill>,
}

impl SkillCorpus {
    /// Default corpus root: ~/.claude/skills/
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".claude").join("skills"))
    }

    /// Scan the corpus root and load every skill directory
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.exists() {
            return Err(CorpusError::RootNotFound { path: root });
        }

        if !root.is_dir() {
            return Err(CorpusError::NotADirectory { path: root });
        }

        info!("Scanning skills directory {:?}", root);

        let mut corpus = Self::default();

        for dir in skill_directories(&root)? {
            match load_skill_dir(&dir) {
                Ok(skill) => {
                    debug!("Loaded skill: {} at {:?}", skill.name, dir);
                    corpus.insert(skill);
                }
                Err(e) => {
                    debug!("Skipping {:?}: {:#}", dir, e);
                }
            }
        }

        info!("Loaded {} skills", corpus.len());
        Ok(corpus)
    }

    fn insert(&mut self, skill: Skill) {
        if let Some(previous) = self.skills.get(&skill.name) {
            warn!(
                "Duplicate skill name '{}': {:?} replaces {:?}",
                skill.name, skill.source_path, previous.source_path
            );
        }
        self.skills.insert(skill.name.clone(), skill);
    }

    /// Consume the corpus, returning skills in name order
    pub fn into_skills(self) -> Vec<Skill> {
        self.skills.into_values().collect()
    }

    /// Get number of skills
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Check if corpus is empty
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Visible subdirectories of `root`, sorted by path
fn skill_directories(root: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(root).map_err(|source| CorpusError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CorpusError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if hidden || !path.is_dir() {
            continue;
        }
        dirs.push(path);
    }

    dirs.sort();
    Ok(dirs)
}
