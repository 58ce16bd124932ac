//! The selection model: which template to materialize, and where.
//!
//! A [`PartialSelection`] is what the argument resolver produces — any field
//! the user did not pin down on the command line stays `None` for the
//! completer to fill in. A [`Selection`] is the fully resolved tuple the
//! materializer runs on.

/// Backend implementation language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Js,
    Ts,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Js => "js",
            Language::Ts => "ts",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Backing database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Database {
    Mongo,
    Pg,
}

impl Database {
    pub fn as_str(&self) -> &'static str {
        match self {
            Database::Mongo => "mongo",
            Database::Pg => "pg",
        }
    }
}

impl std::fmt::Display for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Selection fields as resolved from command-line arguments alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialSelection {
    pub project_name: Option<String>,
    pub language: Option<Language>,
    pub database: Option<Database>,
    /// The positional argument was the literal `.`.
    pub use_current_dir: bool,
}

impl PartialSelection {
    /// Resolve raw CLI inputs into a partial selection.
    ///
    /// - `.` as the name means "scaffold into the current directory".
    /// - When both language flags are passed, `--ts` wins; likewise
    ///   `--mongo` wins over `--pg`.
    /// - Nothing here is an error; missing fields are the completer's job.
    pub fn from_args(name: Option<&str>, ts: bool, js: bool, mongo: bool, pg: bool) -> Self {
        let (project_name, use_current_dir) = match name {
            Some(".") => (Some(".".to_string()), true),
            Some(n) => (Some(n.to_string()), false),
            None => (None, false),
        };

        let language = if ts {
            Some(Language::Ts)
        } else if js {
            Some(Language::Js)
        } else {
            None
        };

        let database = if mongo {
            Some(Database::Mongo)
        } else if pg {
            Some(Database::Pg)
        } else {
            None
        };

        Self {
            project_name,
            language,
            database,
            use_current_dir,
        }
    }

    /// True when both the language and the database were pinned by flags,
    /// so the completer can skip straight past its welcome banner.
    pub fn stack_fully_flagged(&self) -> bool {
        self.language.is_some() && self.database.is_some()
    }
}

/// A fully resolved selection. Every field is populated by the time the
/// materializer sees one of these; `project_name` is only ever reassigned
/// in the rename branch of conflict resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub project_name: String,
    pub language: Language,
    pub database: Database,
    pub use_current_dir: bool,
}

impl Selection {
    /// The `{language}-{database}` template combination id.
    pub fn combination(&self) -> String {
        format!("{}-{}", self.language, self.database)
    }
}
