//! `SkillAudit` Skills Corpus
//!
//! Loads a directory of skill definitions for auditing.
//!
//! ## Layout
//!
//! - One subdirectory per skill, each containing `SKILL.md`
//! - `SKILL.md` starts with a `---` delimited frontmatter block
//!   (`name`, `description`, `tools`, `version`), followed by the body
//!
//! Directories that are hidden, lack `SKILL.md`, or have no frontmatter block
//! are skipped. Only a missing corpus root is an error.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod error;
pub mod registry;
pub mod skill;

pub use error::CorpusError;
pub use registry::SkillCorpus;
pub use skill::{load_skill_dir, SkillDocument, SKILL_FILE};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{CorpusError, SkillCorpus};
}
