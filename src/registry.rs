//! The template registry: a fixed set of four on-disk project skeletons,
//! one per `{language}-{database}` combination.
//!
//! The registry is verified as a whole before the materializer touches the
//! filesystem. A missing combination is a broken installation, not a
//! recoverable condition.

use std::path::{Path, PathBuf};

use crate::errors::ScaffoldError;
use crate::selection::{Database, Language};

/// All supported template combinations.
pub const COMBINATIONS: [(Language, Database); 4] = [
    (Language::Js, Database::Mongo),
    (Language::Js, Database::Pg),
    (Language::Ts, Database::Mongo),
    (Language::Ts, Database::Pg),
];

/// Resolves template combinations to directories under a fixed root.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    root: PathBuf,
}

impl TemplateRegistry {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the template for one combination.
    pub fn template_dir(&self, language: Language, database: Database) -> PathBuf {
        self.root.join(format!("{}-{}", language, database))
    }

    /// Check that every supported combination exists on disk.
    ///
    /// Runs before any filesystem mutation; the first missing combination
    /// is reported as a fatal `MissingTemplate`.
    pub fn verify(&self) -> Result<(), ScaffoldError> {
        for (language, database) in COMBINATIONS {
            let dir = self.template_dir(language, database);
            if !dir.is_dir() {
                return Err(ScaffoldError::MissingTemplate {
                    combination: format!("{}-{}", language, database),
                    path: dir,
                });
            }
        }
        Ok(())
    }
}
